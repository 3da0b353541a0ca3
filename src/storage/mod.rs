// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # File Storage Module
//!
//! Persists client files under a single storage root, one subdirectory per
//! category. Sensitive categories are encrypted with the crypto primitives
//! before they reach disk.
//!
//! ## Storage Layout
//!
//! ```text
//! {STORAGE_DIR}/
//!   contract/{owner}_{millis}_{name}     # .pdf .doc .docx .txt
//!   credential/{owner}_{millis}_{name}   # .json .txt .key .pem .crt (always encrypted)
//!   asset/{owner}_{millis}_{name}        # .jpg .jpeg .png .gif .svg .pdf .zip
//!   document/{owner}_{millis}_{name}     # .pdf .doc .docx .txt .md .xlsx .csv
//! ```
//!
//! ## Important Notes
//!
//! - Only bytes live here. Path, hash, and encryption flag are persisted by
//!   the caller's metadata store.
//! - Files are never updated in place; a new version is a new store call.
//! - Deletes are best-effort and never fail from the caller's view.

pub mod category;
pub mod encrypted_fs;
pub mod naming;
pub mod paths;
pub mod stats;

pub use category::{CategoryPolicy, FileCategory};
pub use encrypted_fs::{
    DeleteOutcome, FileInfo, FileStorage, StorageError, StorageResult, StoredFileResult,
    MAX_FILE_SIZE,
};
pub use naming::{content_type_for, sanitize_filename, validate_file_type};
pub use paths::StoragePaths;
pub use stats::{CategoryStats, StorageStats};
