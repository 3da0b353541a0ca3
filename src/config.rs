// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment once at startup and injected
//! into the storage and crypto layers.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `STORAGE_DIR` | Root directory for stored files | `./storage` |
//! | `FILE_ENCRYPTION_KEY` | Hex-encoded 256-bit key (64 hex chars) | Random per process (see below) |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//!
//! ## Ephemeral key hazard
//!
//! Without `FILE_ENCRYPTION_KEY` a random key is generated at startup and
//! never persisted. Files encrypted by that process cannot be decrypted
//! after it exits.

use std::path::PathBuf;

use crate::crypto::{CryptoError, EncryptionKey};
use crate::storage::paths::DEFAULT_STORAGE_ROOT;

/// Environment variable name for the storage root directory.
pub const STORAGE_DIR_ENV: &str = "STORAGE_DIR";

/// Environment variable name for the hex-encoded encryption key.
pub const ENCRYPTION_KEY_ENV: &str = "FILE_ENCRYPTION_KEY";

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Default `RUST_LOG` filter.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Process configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_root: PathBuf,
    pub encryption_key: EncryptionKey,
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Fails if `FILE_ENCRYPTION_KEY` is set but malformed.
    pub fn from_env() -> Result<Self, CryptoError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CryptoError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_root = lookup(STORAGE_DIR_ENV)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_ROOT.to_string());

        let encryption_key =
            EncryptionKey::from_hex_or_generate(lookup(ENCRYPTION_KEY_ENV).as_deref())?;

        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = lookup(PORT_ENV)
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let log_format = match lookup(LOG_FORMAT_ENV).as_deref() {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            storage_root: PathBuf::from(storage_root),
            encryption_key,
            host,
            port,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyOrigin;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.storage_root, PathBuf::from(DEFAULT_STORAGE_ROOT));
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.encryption_key.origin(), KeyOrigin::Ephemeral);
    }

    #[test]
    fn reads_configured_values() {
        let key = "0f".repeat(32);
        let config = AppConfig::from_lookup(lookup_from(&[
            (STORAGE_DIR_ENV, "/srv/files"),
            (ENCRYPTION_KEY_ENV, key.as_str()),
            (PORT_ENV, "9090"),
            (LOG_FORMAT_ENV, "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.storage_root, PathBuf::from("/srv/files"));
        assert_eq!(config.port, 9090);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.encryption_key.origin(), KeyOrigin::Configured);
    }

    #[test]
    fn malformed_key_is_fatal() {
        let result = AppConfig::from_lookup(lookup_from(&[(ENCRYPTION_KEY_ENV, "short")]));
        assert!(matches!(result, Err(CryptoError::InvalidKey(_))));
    }

    #[test]
    fn bad_port_falls_back_to_default() {
        let config = AppConfig::from_lookup(lookup_from(&[(PORT_ENV, "not-a-port")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
