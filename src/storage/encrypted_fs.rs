// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Category-aware file storage with selective encryption.
//!
//! ## On-disk format
//!
//! - Plain files are written verbatim.
//! - Encrypted files are `iv (16 bytes) || AES-256-CBC ciphertext`.
//!
//! The content hash is always computed over the plaintext, so callers can
//! verify a retrieved file against the hash they persisted at store time.
//!
//! All operations are blocking `std::fs` calls. Concurrent stores never
//! collide because each one writes a timestamp-qualified name.

use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::naming::{compose_stored_name, sanitize_filename, validate_file_type};
use super::{FileCategory, StoragePaths, StorageStats};
use crate::crypto::{self, CryptoError, FileCipher, KeyOrigin};

/// Largest accepted file, in bytes (10 MiB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Error type for file storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Upload exceeds [`MAX_FILE_SIZE`]. Raised before any I/O.
    #[error("File too large: {size} bytes exceeds the {max} byte limit")]
    FileTooLarge { size: usize, max: usize },

    /// Extension not allowed for the category. Raised before any I/O.
    #[error("File type not allowed for category {category}: {filename}")]
    InvalidFileType {
        filename: String,
        category: FileCategory,
    },

    /// Stored object could not be read.
    #[error("Failed to retrieve {path}: {source}")]
    FileRetrieval {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Stored object could not be stat'ed.
    #[error("Failed to read file info for {path}: {source}")]
    FileInfo {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Encryption or decryption failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Relative path is empty, absolute, or escapes the root.
    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    /// I/O error while initializing or writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// What the metadata layer needs to persist for a stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StoredFileResult {
    /// Path relative to the storage root, e.g. `document/c1_1706400000000_a.pdf`.
    pub relative_path: String,
    /// SHA-256 of the plaintext, lowercase hex.
    pub content_hash: String,
    /// Whether the on-disk object is `iv || ciphertext`.
    pub is_encrypted: bool,
}

/// Filesystem metadata for a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileInfo {
    /// Size of the on-disk object in bytes (includes IV and padding when encrypted).
    pub size: u64,
    pub modified_at: DateTime<Utc>,
}

/// Result of a best-effort delete. Never surfaced as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    AlreadyAbsent,
    /// Path was rejected before touching the filesystem.
    Rejected,
    Failed(io::ErrorKind),
}

/// File storage rooted at a single directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    paths: StoragePaths,
    cipher: FileCipher,
}

impl FileStorage {
    /// Create a new FileStorage instance.
    ///
    /// Does not touch the filesystem; directories are created by
    /// [`initialize`](Self::initialize) or lazily by [`store`](Self::store).
    pub fn new(paths: StoragePaths, cipher: FileCipher) -> Self {
        Self { paths, cipher }
    }

    /// Get the storage paths.
    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    /// Origin of the encryption key in use.
    pub fn key_origin(&self) -> KeyOrigin {
        self.cipher.key_origin()
    }

    /// Create one directory per category. Idempotent.
    pub fn initialize(&self) -> StorageResult<()> {
        for category in FileCategory::ALL {
            fs::create_dir_all(self.paths.category_dir(category))?;
        }
        Ok(())
    }

    /// Write-read-delete round trip under the storage root.
    pub fn health_check(&self) -> StorageResult<()> {
        let scratch = self.paths.health_check_file();
        let data = b"health_check_data";

        fs::write(&scratch, data)?;
        let read_back = fs::read(&scratch)?;
        fs::remove_file(&scratch)?;

        if read_back != data {
            return Err(StorageError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                "health check data mismatch",
            )));
        }
        Ok(())
    }

    /// Store a file.
    ///
    /// Size and extension are checked before anything is written.
    /// Credentials are always encrypted, whatever `should_encrypt` says.
    pub fn store(
        &self,
        data: &[u8],
        declared_filename: &str,
        category: FileCategory,
        owner_id: &str,
        should_encrypt: bool,
    ) -> StorageResult<StoredFileResult> {
        if data.len() > MAX_FILE_SIZE {
            return Err(StorageError::FileTooLarge {
                size: data.len(),
                max: MAX_FILE_SIZE,
            });
        }
        if !validate_file_type(declared_filename, category) {
            return Err(StorageError::InvalidFileType {
                filename: declared_filename.to_string(),
                category,
            });
        }

        self.initialize()?;

        let stored_name = compose_stored_name(
            &sanitize_filename(owner_id),
            Utc::now().timestamp_millis(),
            &sanitize_filename(declared_filename),
        );
        let content_hash = crypto::hash(data);
        let is_encrypted = category.effective_encryption(should_encrypt);

        let target = self.paths.category_dir(category).join(&stored_name);
        if is_encrypted {
            write_atomic(&target, &self.cipher.seal(data)?)?;
        } else {
            write_atomic(&target, data)?;
        }

        let relative_path = StoragePaths::relative_path(category, &stored_name);
        tracing::info!(
            path = %relative_path,
            size = data.len(),
            encrypted = is_encrypted,
            "Stored file"
        );

        Ok(StoredFileResult {
            relative_path,
            content_hash,
            is_encrypted,
        })
    }

    /// Read a stored file, decrypting it when `is_encrypted` is set.
    ///
    /// The content hash is not checked here; use [`crypto::verify_hash`]
    /// against the persisted hash.
    pub fn retrieve(&self, relative_path: &str, is_encrypted: bool) -> StorageResult<Vec<u8>> {
        let path = self.paths.resolve(relative_path)?;
        let raw = fs::read(&path).map_err(|source| StorageError::FileRetrieval {
            path: relative_path.to_string(),
            source,
        })?;

        tracing::debug!(path = %relative_path, encrypted = is_encrypted, "Retrieved file");

        if is_encrypted {
            Ok(self.cipher.open(&raw)?)
        } else {
            Ok(raw)
        }
    }

    /// Remove a stored file, best-effort.
    ///
    /// Missing files count as success. Other failures are logged and
    /// reported through the returned [`DeleteOutcome`] only.
    pub fn delete(&self, relative_path: &str) -> DeleteOutcome {
        let path = match self.paths.resolve(relative_path) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(path = %relative_path, error = %e, "Refusing to delete");
                return DeleteOutcome::Rejected;
            }
        };

        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(path = %relative_path, "Deleted file");
                DeleteOutcome::Deleted
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => DeleteOutcome::AlreadyAbsent,
            Err(e) => {
                tracing::warn!(path = %relative_path, error = %e, "Failed to delete file");
                DeleteOutcome::Failed(e.kind())
            }
        }
    }

    /// Size and modification time, without reading contents.
    pub fn file_info(&self, relative_path: &str) -> StorageResult<FileInfo> {
        let path = self.paths.resolve(relative_path)?;
        let info_err = |source: io::Error| StorageError::FileInfo {
            path: relative_path.to_string(),
            source,
        };

        let meta = fs::metadata(&path).map_err(info_err)?;
        let modified = meta.modified().map_err(info_err)?;
        Ok(FileInfo {
            size: meta.len(),
            modified_at: DateTime::<Utc>::from(modified),
        })
    }

    /// Count files and bytes per category. O(total files), uncached.
    ///
    /// Not transactional: concurrent writes may or may not be counted.
    pub fn storage_stats(&self) -> StorageResult<StorageStats> {
        let mut stats = StorageStats::default();

        for category in FileCategory::ALL {
            let entries = match fs::read_dir(self.paths.category_dir(category)) {
                Ok(entries) => entries,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    stats.record_empty(category);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let mut files = 0u64;
            let mut size = 0u64;
            for entry in entries {
                // Entries may vanish mid-scan.
                let Ok(entry) = entry else {
                    continue;
                };
                if is_temp_entry(&entry.file_name()) {
                    continue;
                }
                let Ok(meta) = entry.metadata() else {
                    continue;
                };
                if meta.is_file() {
                    files += 1;
                    size += meta.len();
                }
            }
            stats.record(category, files, size);
        }

        Ok(stats)
    }
}

/// Prefix of in-flight store files. Dot-prefixed so stats skip them.
pub(crate) const TEMP_PREFIX: &str = ".upload-";

/// Write to a short-named temp file in the same directory, then rename
/// into place. The temp name never exceeds the final name's length budget.
fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "target has no parent"))?;

    // Removed on drop if anything below fails.
    let mut temp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(".tmp")
        .tempfile_in(dir)?;
    temp.write_all(data)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn is_temp_entry(name: &OsStr) -> bool {
    name.to_str()
        .is_some_and(|n| n.starts_with(TEMP_PREFIX) && n.ends_with(".tmp"))
}
