//! Server Configuration
//!
//! Read from the process environment (after `.env` is loaded by main).
//! The model credential is mandatory; everything else has a default.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use crate::adapters::groq::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set in the environment variables")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub model_timeout: Duration,
    pub retry_invalid_output: bool,
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = get("GROQ_API_KEY").ok_or(ConfigError::Missing("GROQ_API_KEY"))?;

        let port = match get("MERCURY_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                ConfigError::Invalid {
                    name: "MERCURY_PORT",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_PORT,
        };

        let model_timeout = match get("MERCURY_MODEL_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "MERCURY_MODEL_TIMEOUT_SECS",
                        value: raw,
                        reason: "expected a positive number of seconds".to_string(),
                    })
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        let retry_invalid_output = match get("MERCURY_RETRY_INVALID_OUTPUT") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| ConfigError::Invalid {
                name: "MERCURY_RETRY_INVALID_OUTPUT",
                value: raw.clone(),
                reason: "expected true or false".to_string(),
            })?,
            None => false,
        };

        let cors_origins = get("MERCURY_CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        Ok(Self {
            api_key,
            model: get("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: get("GROQ_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            host: get("MERCURY_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            cors_origins,
            model_timeout,
            retry_invalid_output,
        })
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            name: "MERCURY_HOST",
            value: self.host.clone(),
            reason: e.to_string(),
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        assert_eq!(load(&[]).unwrap_err(), ConfigError::Missing("GROQ_API_KEY"));
        assert_eq!(
            load(&[("GROQ_API_KEY", "  ")]).unwrap_err(),
            ConfigError::Missing("GROQ_API_KEY")
        );
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("GROQ_API_KEY", "gsk-test")]).unwrap();

        assert_eq!(config.api_key, "gsk-test");
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.model_timeout, Duration::from_secs(30));
        assert!(!config.retry_invalid_output);
        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("GROQ_API_KEY", "gsk-test"),
            ("GROQ_MODEL", "llama-3.1-8b-instant"),
            ("MERCURY_HOST", "127.0.0.1"),
            ("MERCURY_PORT", "9000"),
            ("MERCURY_CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("MERCURY_MODEL_TIMEOUT_SECS", "5"),
            ("MERCURY_RETRY_INVALID_OUTPUT", "true"),
        ])
        .unwrap();

        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.model_timeout, Duration::from_secs(5));
        assert!(config.retry_invalid_output);
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[("GROQ_API_KEY", "k"), ("MERCURY_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "MERCURY_PORT", .. }));

        let err = load(&[("GROQ_API_KEY", "k"), ("MERCURY_MODEL_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "MERCURY_MODEL_TIMEOUT_SECS",
                ..
            }
        ));

        let err = load(&[("GROQ_API_KEY", "k"), ("MERCURY_RETRY_INVALID_OUTPUT", "maybe")])
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "MERCURY_RETRY_INVALID_OUTPUT",
                ..
            }
        ));
    }
}
