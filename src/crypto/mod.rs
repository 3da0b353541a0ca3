// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Crypto Primitives
//!
//! Symmetric encryption of byte buffers and text, plus content hashing.
//! This module knows nothing about files, paths, or categories.
//!
//! - `key` - 256-bit key loading (configured hex or ephemeral fallback)
//! - `cipher` - AES-256-CBC/PKCS#7 with a random IV per call
//! - `hash` - SHA-256 digests and verification

pub mod cipher;
pub mod hash;
pub mod key;

pub use cipher::{FileCipher, BLOCK_LEN, IV_LEN};
pub use hash::{hash, verify_hash};
pub use key::{EncryptionKey, KeyOrigin, KEY_LEN};

/// Errors raised by the crypto primitives.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// Configured key is malformed. Fatal at startup.
    #[error("Invalid encryption key: {0}")]
    InvalidKey(String),

    /// Ciphertext could not be decrypted (corrupt data, wrong key or IV).
    #[error("Decryption failed: {0}")]
    Decryption(String),

    /// System randomness was unavailable.
    #[error("Random number generator failure")]
    Rng,
}
