//! Server configuration from environment variables
//!
//! ```bash
//! PORT=5000
//! BLOOD_BANK_HOST=0.0.0.0
//! BLOOD_BANK_DATA_DIR=data
//! BLOOD_BANK_BCRYPT_COST=12
//! ```

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::warn;

use crate::store::StoreConfig;

/// Runtime configuration for the server binary
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Absolute path of the store's data directory
    pub data_dir: PathBuf,
    pub bcrypt_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            data_dir: PathBuf::from("data"),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Config {
    /// Create from environment variables
    ///
    /// Environment:
    /// - BLOOD_BANK_HOST: Bind address (optional, default 0.0.0.0)
    /// - PORT: Listen port (optional, default 5000)
    /// - BLOOD_BANK_DATA_DIR: Store directory, relative to the working
    ///   directory unless absolute (optional, default `data`)
    /// - BLOOD_BANK_BCRYPT_COST: Password hashing cost, clamped to 4..=31
    ///   (optional, default 12)
    ///
    /// Unparsable values keep the default and log a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable lookup (used by tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("BLOOD_BANK_HOST").unwrap_or(defaults.host);
        let port = parse_or("PORT", lookup("PORT"), defaults.port);
        let bcrypt_cost = parse_or(
            "BLOOD_BANK_BCRYPT_COST",
            lookup("BLOOD_BANK_BCRYPT_COST"),
            defaults.bcrypt_cost,
        )
        .clamp(4, 31);

        let data_dir = lookup("BLOOD_BANK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        Self {
            host,
            port,
            data_dir: absolutize(&data_dir),
            bcrypt_cost,
        }
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    /// Store configuration for the data directory
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.data_dir)
    }
}

fn parse_or<T: FromStr + Copy>(name: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "unparsable value, using default");
            default
        }),
        None => default,
    }
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.port, 5000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert!(config.data_dir.is_absolute());
        assert!(config.data_dir.ends_with("data"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("BLOOD_BANK_HOST", "127.0.0.1"),
            ("BLOOD_BANK_DATA_DIR", "/var/lib/bank"),
            ("BLOOD_BANK_BCRYPT_COST", "6"),
        ]));

        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/bank"));
        assert_eq!(config.bcrypt_cost, 6);
        assert_eq!(config.store_config().data_dir(), Path::new("/var/lib/bank"));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = Config::from_lookup(lookup(&[("PORT", "not-a-port"), ("BLOOD_BANK_BCRYPT_COST", "99")]));
        assert_eq!(config.port, 5000);
        assert_eq!(config.bcrypt_cost, 31);
    }
}
