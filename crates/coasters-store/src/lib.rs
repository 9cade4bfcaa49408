//! Redis adapters for the coaster operations services.
//!
//! Coasters are stored as JSON snapshots under an environment-specific key
//! prefix; the same server carries the pub/sub message bus.

pub mod connection;
pub mod keyspace;
pub mod redis_coaster_repository;
pub mod redis_message_bus;

pub use connection::RedisSettings;
pub use keyspace::Keyspace;
pub use redis_coaster_repository::RedisCoasterRepository;
pub use redis_message_bus::RedisMessageBus;
