//! Infrastructure layer: user lookup and access log persistence.

pub mod access_log;
pub mod db;
pub mod error;
pub mod users;

pub use access_log::{AccessLogRecord, AccessLogStore, InMemoryAccessLogStore, PostgresAccessLogStore};
pub use error::StoreError;
pub use users::{InMemoryUserStore, PostgresUserStore, UserStore};
