// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Symmetric key material for file encryption.
//!
//! A single 256-bit key is loaded once per process. When no key is
//! configured, a random key is generated instead. That key lives only in
//! process memory: anything encrypted with it becomes unreadable after a
//! restart. Callers can detect this case through [`KeyOrigin::Ephemeral`].

use std::fmt;

use ring::rand::{SecureRandom, SystemRandom};

use super::CryptoError;

/// Key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Where the active key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOrigin {
    /// Loaded from configuration (hex-encoded environment value).
    Configured,
    /// Generated at startup because no key was configured.
    Ephemeral,
}

/// A 256-bit symmetric key.
#[derive(Clone)]
pub struct EncryptionKey {
    bytes: [u8; KEY_LEN],
    origin: KeyOrigin,
}

impl EncryptionKey {
    /// Parse a hex-encoded 256-bit key.
    ///
    /// # Errors
    /// Returns `CryptoError::InvalidKey` unless the input is exactly 64 hex
    /// characters.
    pub fn from_hex(hex_key: &str) -> Result<Self, CryptoError> {
        let decoded = hex::decode(hex_key.trim())
            .map_err(|e| CryptoError::InvalidKey(format!("key is not valid hex: {e}")))?;
        let bytes: [u8; KEY_LEN] = decoded.try_into().map_err(|v: Vec<u8>| {
            CryptoError::InvalidKey(format!("expected {KEY_LEN} bytes, got {}", v.len()))
        })?;
        Ok(Self {
            bytes,
            origin: KeyOrigin::Configured,
        })
    }

    /// Build a key from raw bytes (tests and embedding callers).
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self {
            bytes,
            origin: KeyOrigin::Configured,
        }
    }

    /// Generate a fresh random key that is never persisted.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut bytes = [0u8; KEY_LEN];
        SystemRandom::new()
            .fill(&mut bytes)
            .map_err(|_| CryptoError::Rng)?;
        Ok(Self {
            bytes,
            origin: KeyOrigin::Ephemeral,
        })
    }

    /// Load the configured key, or fall back to a generated one.
    pub fn from_hex_or_generate(hex_key: Option<&str>) -> Result<Self, CryptoError> {
        match hex_key {
            Some(k) if !k.trim().is_empty() => Self::from_hex(k),
            _ => Self::generate(),
        }
    }

    pub fn origin(&self) -> KeyOrigin {
        self.origin
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

// Never print key material.
impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_64_hex_chars() {
        let key = EncryptionKey::from_hex(&"ab".repeat(32)).unwrap();
        assert_eq!(key.as_bytes(), &[0xab; 32]);
        assert_eq!(key.origin(), KeyOrigin::Configured);
    }

    #[test]
    fn accepts_uppercase_hex() {
        assert!(EncryptionKey::from_hex(&"AB".repeat(32)).is_ok());
    }

    #[test]
    fn rejects_wrong_length() {
        let result = EncryptionKey::from_hex(&"ab".repeat(16));
        assert!(matches!(result, Err(CryptoError::InvalidKey(_))));
    }

    #[test]
    fn rejects_non_hex() {
        let result = EncryptionKey::from_hex(&"zz".repeat(32));
        assert!(matches!(result, Err(CryptoError::InvalidKey(_))));
    }

    #[test]
    fn missing_key_falls_back_to_ephemeral() {
        let key = EncryptionKey::from_hex_or_generate(None).unwrap();
        assert_eq!(key.origin(), KeyOrigin::Ephemeral);

        let blank = EncryptionKey::from_hex_or_generate(Some("  ")).unwrap();
        assert_eq!(blank.origin(), KeyOrigin::Ephemeral);
    }

    #[test]
    fn generated_keys_differ() {
        let a = EncryptionKey::generate().unwrap();
        let b = EncryptionKey::generate().unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn debug_does_not_leak_key() {
        let key = EncryptionKey::from_bytes([0x42; 32]);
        let printed = format!("{key:?}");
        assert!(!printed.contains("42"));
    }
}
