//! Access log (audit trail) boundary.
//!
//! One immutable record per gated request. Writes are best-effort from the
//! gate's point of view; the store itself reports failures honestly.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryAccessLogStore;
pub use postgres::PostgresAccessLogStore;
pub use r#trait::{AccessLogRecord, AccessLogStore};
