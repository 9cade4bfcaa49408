//! Immutable, self-validating value objects.
//!
//! Every constructor rejects out-of-range input with
//! `DomainError::Validation`, and deserialization runs the same checks, so a
//! value object obtained from a stored record is as trustworthy as one built
//! in code.

mod capacity;
mod distance;
mod speed;
mod time_range;

pub use capacity::Capacity;
pub use distance::Distance;
pub use speed::Speed;
pub use time_range::TimeRange;
