use std::net::SocketAddr;
use thiserror::Error;

use crate::room::models::RegistryPolicy;

pub const BIND_ADDR_VAR: &str = "ROOMHUB_BIND_ADDR";
pub const CREATE_ON_JOIN_VAR: &str = "ROOMHUB_CREATE_ON_JOIN";
pub const PRUNE_EMPTY_ROOMS_VAR: &str = "ROOMHUB_PRUNE_EMPTY_ROOMS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a socket address: {value}")]
    InvalidAddress { var: &'static str, value: String },

    #[error("{var} is not a boolean: {value}")]
    InvalidBool { var: &'static str, value: String },
}

/// Runtime configuration for the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub policy: RegistryPolicy,
}

impl AppConfig {
    /// Reads configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = RegistryPolicy::default();

        let bind_value = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddress {
                var: BIND_ADDR_VAR,
                value: bind_value.clone(),
            })?;

        let policy = RegistryPolicy {
            create_on_join: parse_bool(
                CREATE_ON_JOIN_VAR,
                lookup(CREATE_ON_JOIN_VAR),
                defaults.create_on_join,
            )?,
            prune_empty_rooms: parse_bool(
                PRUNE_EMPTY_ROOMS_VAR,
                lookup(PRUNE_EMPTY_ROOMS_VAR),
                defaults.prune_empty_rooms,
            )?,
        };

        Ok(Self { bind_addr, policy })
    }
}

fn parse_bool(var: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.policy, RegistryPolicy::default());
        assert!(config.policy.create_on_join);
        assert!(!config.policy.prune_empty_rooms);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (BIND_ADDR_VAR, "127.0.0.1:8080"),
            (CREATE_ON_JOIN_VAR, "false"),
            (PRUNE_EMPTY_ROOMS_VAR, "YES"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse().unwrap());
        assert!(!config.policy.create_on_join);
        assert!(config.policy.prune_empty_rooms);
    }

    #[rstest]
    #[case("1", true)]
    #[case("on", true)]
    #[case(" True ", true)]
    #[case("0", false)]
    #[case("off", false)]
    #[case("no", false)]
    fn test_bool_spellings(#[case] raw: &str, #[case] expected: bool) {
        let config = config_from(&[(PRUNE_EMPTY_ROOMS_VAR, raw)]).unwrap();
        assert_eq!(config.policy.prune_empty_rooms, expected);
    }

    #[test]
    fn test_invalid_bool() {
        let err = config_from(&[(CREATE_ON_JOIN_VAR, "maybe")]).unwrap_err();

        assert_eq!(
            err,
            ConfigError::InvalidBool {
                var: CREATE_ON_JOIN_VAR,
                value: "maybe".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_address() {
        let err = config_from(&[(BIND_ADDR_VAR, "localhost")]).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidAddress { .. }));
        assert_eq!(
            err.to_string(),
            "ROOMHUB_BIND_ADDR is not a socket address: localhost"
        );
    }
}
