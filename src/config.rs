use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Labdesk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_PORT: u16 = 5000;

/// Selects the pure in-memory backend when given as the database path.
pub const MEMORY_DB_PATH: &str = ":memory:";

const ENV_HOST: &str = "LABDESK_HOST";
const ENV_PORT: &str = "LABDESK_PORT";
const ENV_DB_PATH: &str = "LABDESK_DB_PATH";
const ENV_SEED: &str = "LABDESK_SEED";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid {expected}: {value}")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("Cannot determine a data directory; set LABDESK_DB_PATH")]
    NoDataDir,
}

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "labdesk=debug,labdesk_lib=debug,tower_http=info"
    } else {
        "labdesk=info,labdesk_lib=info"
    }
}

/// Per-user data directory for Labdesk files.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_dir()
        .map(|dir| dir.join("labdesk"))
        .ok_or(ConfigError::NoDataDir)
}

/// Where user accounts are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserStore {
    /// Users live with everything else and vanish on exit.
    Memory,
    /// Users go to a SQLite file.
    Sqlite(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub user_store: UserStore,
    /// Load the demo data set at startup.
    pub seed: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or empty keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = match get(ENV_HOST) {
            Some(raw) => raw.trim().parse::<IpAddr>().map_err(|_| ConfigError::InvalidValue {
                var: ENV_HOST,
                value: raw,
                expected: "IP address",
            })?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let port = match get(ENV_PORT) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: ENV_PORT,
                value: raw,
                expected: "port number",
            })?,
            None => DEFAULT_PORT,
        };

        let user_store = match get(ENV_DB_PATH) {
            Some(raw) if raw.trim() == MEMORY_DB_PATH => UserStore::Memory,
            Some(raw) => UserStore::Sqlite(PathBuf::from(raw)),
            None => UserStore::Sqlite(data_dir()?.join("users.db")),
        };

        let seed = match get(ENV_SEED) {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidValue {
                var: ENV_SEED,
                value: raw,
                expected: "boolean",
            })?,
            None => true,
        };

        Ok(Self {
            addr: SocketAddr::new(host, port),
            user_store,
            seed,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_bind_localhost_5000() {
        let config = config_from(&[(ENV_DB_PATH, MEMORY_DB_PATH)]).unwrap();
        assert_eq!(config.addr, "127.0.0.1:5000".parse().unwrap());
        assert_eq!(config.user_store, UserStore::Memory);
        assert!(config.seed);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = config_from(&[
            (ENV_HOST, "0.0.0.0"),
            (ENV_PORT, "8080"),
            (ENV_DB_PATH, "/tmp/labdesk/users.db"),
            (ENV_SEED, "off"),
        ])
        .unwrap();
        assert_eq!(config.addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(
            config.user_store,
            UserStore::Sqlite(PathBuf::from("/tmp/labdesk/users.db"))
        );
        assert!(!config.seed);
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config = config_from(&[(ENV_PORT, " "), (ENV_DB_PATH, MEMORY_DB_PATH)]).unwrap();
        assert_eq!(config.addr.port(), DEFAULT_PORT);
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = config_from(&[(ENV_PORT, "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: ENV_PORT, .. }));
    }

    #[test]
    fn bad_seed_flag_is_rejected() {
        let err = config_from(&[(ENV_SEED, "maybe"), (ENV_DB_PATH, MEMORY_DB_PATH)]).unwrap_err();
        assert!(err.to_string().contains(ENV_SEED));
    }

    #[test]
    fn app_name_is_labdesk() {
        assert_eq!(APP_NAME, "Labdesk");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
