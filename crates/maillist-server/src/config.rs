// ABOUTME: Configuration loading and validation for the maillist processes.
// ABOUTME: Reads MAILINGLIST_* environment variables and falls back to documented defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_DB_PATH: &str = "list.db";
pub const DEFAULT_BIND_JSON: &str = "0.0.0.0:8080";
pub const DEFAULT_BIND_GRPC: &str = "0.0.0.0:8081";
pub const DEFAULT_GRPC_ADDR: &str = "http://127.0.0.1:8081";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidBind { var: &'static str, value: String },
}

/// Process configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct MaillistConfig {
    pub db_path: PathBuf,
    pub bind_json: SocketAddr,
    pub bind_grpc: SocketAddr,
    /// Endpoint the bundled gRPC client connects to.
    pub grpc_addr: String,
}

impl MaillistConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - MAILINGLIST_DB: SQLite file path (default: list.db)
    /// - MAILINGLIST_BIND_JSON: JSON API listen address (default: 0.0.0.0:8080)
    /// - MAILINGLIST_BIND_GRPC: gRPC API listen address (default: 0.0.0.0:8081)
    /// - MAILINGLIST_GRPC_ADDR: client target (default: http://127.0.0.1:8081)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let db_path = get("MAILINGLIST_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let bind_json = parse_bind(
            "MAILINGLIST_BIND_JSON",
            get("MAILINGLIST_BIND_JSON").unwrap_or_else(|| DEFAULT_BIND_JSON.to_string()),
        )?;
        let bind_grpc = parse_bind(
            "MAILINGLIST_BIND_GRPC",
            get("MAILINGLIST_BIND_GRPC").unwrap_or_else(|| DEFAULT_BIND_GRPC.to_string()),
        )?;

        let grpc_addr = grpc_addr_from_lookup(lookup);

        Ok(Self {
            db_path,
            bind_json,
            bind_grpc,
            grpc_addr,
        })
    }
}

/// Client target only. Listen addresses are not read, so a bad bind
/// setting does not affect the client.
pub fn grpc_addr_from_env() -> String {
    grpc_addr_from_lookup(|key| std::env::var(key).ok())
}

pub fn grpc_addr_from_lookup<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("MAILINGLIST_GRPC_ADDR")
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_GRPC_ADDR.to_string())
}

/// Parse a listen address. A bare `:port` means every interface.
pub fn parse_bind(var: &'static str, value: String) -> Result<SocketAddr, ConfigError> {
    let candidate = if value.starts_with(':') {
        format!("0.0.0.0{value}")
    } else {
        value.clone()
    };
    candidate
        .parse()
        .map_err(|_| ConfigError::InvalidBind { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<MaillistConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MaillistConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn config_loads_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.db_path, PathBuf::from("list.db"));
        assert_eq!(config.bind_json, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.bind_grpc, "0.0.0.0:8081".parse::<SocketAddr>().unwrap());
        assert_eq!(config.grpc_addr, "http://127.0.0.1:8081");
    }

    #[test]
    fn config_reads_overrides() {
        let config = load(&[
            ("MAILINGLIST_DB", "/tmp/other.db"),
            ("MAILINGLIST_BIND_JSON", "127.0.0.1:9000"),
            ("MAILINGLIST_BIND_GRPC", ":9001"),
            ("MAILINGLIST_GRPC_ADDR", "http://10.0.0.5:9001"),
        ])
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.bind_json, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.bind_grpc, "0.0.0.0:9001".parse::<SocketAddr>().unwrap());
        assert_eq!(config.grpc_addr, "http://10.0.0.5:9001");
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config = load(&[("MAILINGLIST_DB", ""), ("MAILINGLIST_BIND_JSON", "  ")]).unwrap();

        assert_eq!(config.db_path, PathBuf::from("list.db"));
        assert_eq!(config.bind_json.port(), 8080);
    }

    #[test]
    fn client_target_ignores_bad_bind_settings() {
        let map: HashMap<&str, &str> = HashMap::from([
            ("MAILINGLIST_BIND_JSON", "not-an-addr"),
            ("MAILINGLIST_GRPC_ADDR", "http://10.0.0.5:9001"),
        ]);
        let lookup = |key: &str| map.get(key).map(|v| v.to_string());

        assert!(MaillistConfig::from_lookup(lookup).is_err());
        assert_eq!(grpc_addr_from_lookup(lookup), "http://10.0.0.5:9001");
        assert_eq!(grpc_addr_from_lookup(|_| None), DEFAULT_GRPC_ADDR);
    }

    #[test]
    fn config_rejects_invalid_bind() {
        let err = load(&[("MAILINGLIST_BIND_GRPC", "not-an-addr")]).unwrap_err();

        assert!(
            err.to_string().contains("MAILINGLIST_BIND_GRPC"),
            "error should name the variable: {}",
            err
        );
    }
}
