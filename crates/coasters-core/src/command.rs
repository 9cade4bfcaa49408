//! Commands accepted by the fleet handlers.

use uuid::Uuid;

/// An intent to change a coaster, carried from the HTTP layer to a handler.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable dotted name such as `fleet.add_wagon`. Used as a log field.
    fn command_type(&self) -> &'static str;

    /// Identifier shared by every log line the command produces.
    fn correlation_id(&self) -> Uuid;
}
