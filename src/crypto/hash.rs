// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! SHA-256 content hashes.

use sha2::{Digest, Sha256};

/// SHA-256 of `data`, lowercase hex.
pub fn hash(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Check `data` against an expected hex digest (case-insensitive).
pub fn verify_hash(data: &[u8], expected_hex: &str) -> bool {
    hash(data).eq_ignore_ascii_case(expected_hex.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digest() {
        assert_eq!(
            hash(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash(b"hello world!"), hash(b"hello world!"));
        assert_eq!(hash(b"hello world!").len(), 64);
    }

    #[test]
    fn verify_matches_own_hash() {
        let data = b"contract body";
        assert!(verify_hash(data, &hash(data)));
        assert!(verify_hash(data, &hash(data).to_uppercase()));
    }

    #[test]
    fn verify_rejects_other_content() {
        assert!(!verify_hash(b"original", &hash(b"tampered")));
        assert!(!verify_hash(b"original", "not a digest"));
    }
}
