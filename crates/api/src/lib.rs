//! HTTP API: gate middleware, access logging and router wiring.

pub mod access_log;
pub mod app;
pub mod config;
pub mod context;
pub mod errors;
pub mod gate;
pub mod middleware;

pub use access_log::AccessLogRecorder;
pub use config::{ConfigError, GateConfig};
pub use context::{AuthenticatedUser, RequestInfo};
pub use gate::{Gate, GateOutcome};
