// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! AES-256-CBC with PKCS#7 padding.
//!
//! Every call to [`FileCipher::encrypt_bytes`] draws a fresh 16-byte IV, so
//! identical plaintexts never produce identical ciphertexts. On disk the IV
//! is stored in front of the ciphertext (see [`FileCipher::seal`]).

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use ring::rand::{SecureRandom, SystemRandom};

use super::{CryptoError, EncryptionKey, KeyOrigin};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// IV length in bytes (one AES block).
pub const IV_LEN: usize = 16;

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// Symmetric cipher bound to a single process-wide key.
#[derive(Debug, Clone)]
pub struct FileCipher {
    key: EncryptionKey,
    rng: SystemRandom,
}

impl FileCipher {
    pub fn new(key: EncryptionKey) -> Self {
        Self {
            key,
            rng: SystemRandom::new(),
        }
    }

    /// Origin of the active key.
    pub fn key_origin(&self) -> KeyOrigin {
        self.key.origin()
    }

    fn random_iv(&self) -> Result<[u8; IV_LEN], CryptoError> {
        let mut iv = [0u8; IV_LEN];
        self.rng.fill(&mut iv).map_err(|_| CryptoError::Rng)?;
        Ok(iv)
    }

    /// Encrypt a byte buffer of any length, returning `(ciphertext, iv)`.
    pub fn encrypt_bytes(&self, plaintext: &[u8]) -> Result<(Vec<u8>, [u8; IV_LEN]), CryptoError> {
        let iv = self.random_iv()?;
        let ciphertext = Aes256CbcEnc::new(self.key.as_bytes().into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);
        Ok((ciphertext, iv))
    }

    /// Decrypt a buffer produced by [`encrypt_bytes`](Self::encrypt_bytes).
    ///
    /// # Errors
    /// `CryptoError::Decryption` if the length is not a non-zero multiple of
    /// the block size, or the padding is invalid (wrong key, wrong IV, or
    /// corrupted data).
    pub fn decrypt_bytes(&self, ciphertext: &[u8], iv: &[u8; IV_LEN]) -> Result<Vec<u8>, CryptoError> {
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
            return Err(CryptoError::Decryption(format!(
                "ciphertext length {} is not a multiple of {BLOCK_LEN}",
                ciphertext.len()
            )));
        }

        Aes256CbcDec::new(self.key.as_bytes().into(), iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| CryptoError::Decryption("invalid padding".to_string()))
    }

    /// Encrypt UTF-8 text, returning `(ciphertext_hex, iv_hex)`.
    pub fn encrypt_text(&self, plaintext: &str) -> Result<(String, String), CryptoError> {
        let (ciphertext, iv) = self.encrypt_bytes(plaintext.as_bytes())?;
        Ok((hex::encode(ciphertext), hex::encode(iv)))
    }

    /// Decrypt hex-encoded ciphertext produced by [`encrypt_text`](Self::encrypt_text).
    pub fn decrypt_text(&self, encrypted_hex: &str, iv_hex: &str) -> Result<String, CryptoError> {
        let ciphertext = hex::decode(encrypted_hex)
            .map_err(|e| CryptoError::Decryption(format!("malformed ciphertext hex: {e}")))?;
        let iv: [u8; IV_LEN] = hex::decode(iv_hex)
            .map_err(|e| CryptoError::Decryption(format!("malformed IV hex: {e}")))?
            .try_into()
            .map_err(|v: Vec<u8>| {
                CryptoError::Decryption(format!("IV must be {IV_LEN} bytes, got {}", v.len()))
            })?;

        let plaintext = self.decrypt_bytes(&ciphertext, &iv)?;
        String::from_utf8(plaintext)
            .map_err(|_| CryptoError::Decryption("plaintext is not valid UTF-8".to_string()))
    }

    /// Encrypt and frame as `iv || ciphertext` for storage.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let (ciphertext, iv) = self.encrypt_bytes(plaintext)?;
        let mut sealed = Vec::with_capacity(IV_LEN + ciphertext.len());
        sealed.extend_from_slice(&iv);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    /// Split an `iv || ciphertext` object and decrypt it.
    pub fn open(&self, sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if sealed.len() < IV_LEN {
            return Err(CryptoError::Decryption(format!(
                "object is {} bytes, shorter than the {IV_LEN}-byte IV",
                sealed.len()
            )));
        }
        let (iv, ciphertext) = sealed.split_at(IV_LEN);
        let mut iv_block = [0u8; IV_LEN];
        iv_block.copy_from_slice(iv);
        self.decrypt_bytes(ciphertext, &iv_block)
    }
}
