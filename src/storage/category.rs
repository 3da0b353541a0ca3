// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! File categories and their storage policy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Class of stored file. Decides the subdirectory, the allowed extensions,
/// and whether encryption is forced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Contract,
    Credential,
    Asset,
    Document,
}

/// Per-category rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPolicy {
    /// Lowercase extensions without the leading dot.
    pub allowed_extensions: &'static [&'static str],
    /// Whether files are encrypted regardless of caller preference.
    pub always_encrypt: bool,
}

impl FileCategory {
    pub const ALL: [FileCategory; 4] = [
        FileCategory::Contract,
        FileCategory::Credential,
        FileCategory::Asset,
        FileCategory::Document,
    ];

    /// Directory name under the storage root.
    pub fn dir_name(self) -> &'static str {
        match self {
            FileCategory::Contract => "contract",
            FileCategory::Credential => "credential",
            FileCategory::Asset => "asset",
            FileCategory::Document => "document",
        }
    }

    pub fn policy(self) -> CategoryPolicy {
        match self {
            FileCategory::Contract => CategoryPolicy {
                allowed_extensions: &["pdf", "doc", "docx", "txt"],
                always_encrypt: false,
            },
            FileCategory::Credential => CategoryPolicy {
                allowed_extensions: &["json", "txt", "key", "pem", "crt"],
                always_encrypt: true,
            },
            FileCategory::Asset => CategoryPolicy {
                allowed_extensions: &["jpg", "jpeg", "png", "gif", "svg", "pdf", "zip"],
                always_encrypt: false,
            },
            FileCategory::Document => CategoryPolicy {
                allowed_extensions: &["pdf", "doc", "docx", "txt", "md", "xlsx", "csv"],
                always_encrypt: false,
            },
        }
    }

    pub fn allows_extension(self, extension: &str) -> bool {
        let ext = extension.to_ascii_lowercase();
        self.policy().allowed_extensions.contains(&ext.as_str())
    }

    /// Effective encryption for a store request.
    pub fn effective_encryption(self, requested: bool) -> bool {
        requested || self.policy().always_encrypt
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for FileCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileCategory::ALL
            .into_iter()
            .find(|c| c.dir_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown file category: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_credentials_force_encryption() {
        assert!(FileCategory::Credential.effective_encryption(false));
        assert!(!FileCategory::Contract.effective_encryption(false));
        assert!(!FileCategory::Asset.effective_encryption(false));
        assert!(!FileCategory::Document.effective_encryption(false));
        assert!(FileCategory::Document.effective_encryption(true));
    }

    #[test]
    fn extension_check_ignores_case() {
        assert!(FileCategory::Asset.allows_extension("PNG"));
        assert!(FileCategory::Credential.allows_extension("pem"));
        assert!(!FileCategory::Contract.allows_extension("png"));
        assert!(!FileCategory::Document.allows_extension("exe"));
    }

    #[test]
    fn parses_dir_names() {
        for category in FileCategory::ALL {
            assert_eq!(category.dir_name().parse::<FileCategory>().unwrap(), category);
        }
        assert_eq!("Credential".parse::<FileCategory>().unwrap(), FileCategory::Credential);
        assert!("video".parse::<FileCategory>().is_err());
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&FileCategory::Asset).unwrap();
        assert_eq!(json, "\"asset\"");
    }
}
