//! User lookup boundary.
//!
//! Users and their roles are owned elsewhere; the gate only needs to fetch one
//! user by subject, filtered by status.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryUserStore;
pub use postgres::PostgresUserStore;
pub use r#trait::UserStore;
