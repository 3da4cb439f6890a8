//! Startup configuration, read once from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use routeguard_auth::{RoutePermissionTable, RouteTableError};

/// Route table shipped with the binary, used when no file is configured.
pub const DEFAULT_ROUTE_PERMISSIONS: &str = include_str!("../config/route_permissions.json");

const DEV_SECRET: &str = "dev-secret";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SERVICE_TAG: &str = "Role";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid BIND_ADDR '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("failed to read route permissions from {path}: {source}")]
    ReadRouteTable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    RouteTable(#[from] RouteTableError),
}

#[derive(Debug, Clone)]
pub struct GateConfig {
    /// HS256 signing secret (`JWT_SECRET`).
    pub jwt_secret: String,
    /// Route table file (`ROUTE_PERMISSIONS_PATH`); `None` uses the built-in table.
    pub route_permissions_path: Option<PathBuf>,
    pub bind_addr: SocketAddr,
    /// Postgres URL (`DATABASE_URL`); `None` selects in-memory stores.
    pub database_url: Option<String>,
    /// `service` tag written on every access log record (`ACCESS_LOG_SERVICE`).
    pub access_log_service: String,
}

impl GateConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret = var("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            DEV_SECRET.to_string()
        });

        let bind = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr { value: bind.clone(), source })?;

        Ok(Self {
            jwt_secret,
            route_permissions_path: var("ROUTE_PERMISSIONS_PATH").map(PathBuf::from),
            bind_addr,
            database_url: var("DATABASE_URL"),
            access_log_service: var("ACCESS_LOG_SERVICE")
                .unwrap_or_else(|| DEFAULT_SERVICE_TAG.to_string()),
        })
    }

    /// Load and compile the route table. Failures are fatal at startup.
    pub fn load_route_table(&self) -> Result<RoutePermissionTable, ConfigError> {
        let table = match &self.route_permissions_path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| {
                    ConfigError::ReadRouteTable {
                        path: path.clone(),
                        source,
                    }
                })?;
                RoutePermissionTable::from_json_str(&json)?
            }
            None => RoutePermissionTable::from_json_str(DEFAULT_ROUTE_PERMISSIONS)?,
        };
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = GateConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.jwt_secret, DEV_SECRET);
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.access_log_service, "Role");
        assert!(cfg.database_url.is_none());
        assert!(cfg.route_permissions_path.is_none());
    }

    #[test]
    fn explicit_values_win_and_blank_is_unset() {
        let cfg = GateConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("DATABASE_URL", "  "),
            ("ACCESS_LOG_SERVICE", "Gate"),
        ]))
        .unwrap();

        assert_eq!(cfg.jwt_secret, "s3cret");
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert!(cfg.database_url.is_none());
        assert_eq!(cfg.access_log_service, "Gate");
    }

    #[test]
    fn bad_bind_addr_is_an_error() {
        let err = GateConfig::from_lookup(lookup(&[("BIND_ADDR", "nope")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    }

    #[test]
    fn built_in_route_table_compiles() {
        let cfg = GateConfig::from_lookup(lookup(&[])).unwrap();
        let table = cfg.load_route_table().unwrap();

        assert!(!table.is_empty());
        assert!(table.resolve("/users/123", "GET").is_some());
        assert!(table.resolve("/users/me", "GET").is_none());
        assert!(table.find("/whoami", "GET").is_some());
    }

    #[test]
    fn missing_route_table_file_is_an_error() {
        let cfg = GateConfig::from_lookup(lookup(&[(
            "ROUTE_PERMISSIONS_PATH",
            "/definitely/not/here.json",
        )]))
        .unwrap();
        assert!(matches!(
            cfg.load_route_table(),
            Err(ConfigError::ReadRouteTable { .. })
        ));
    }
}
