// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path constants and utilities for the file storage layout.

use std::path::{Component, Path, PathBuf};

use super::{FileCategory, StorageError, StorageResult};

/// Default storage root when `STORAGE_DIR` is not set.
pub const DEFAULT_STORAGE_ROOT: &str = "./storage";

/// Storage path utilities.
///
/// ```text
/// {root}/
///   contract/{owner}_{millis}_{name}
///   credential/{owner}_{millis}_{name}
///   asset/{owner}_{millis}_{name}
///   document/{owner}_{millis}_{name}
/// ```
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all stored files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for a category.
    pub fn category_dir(&self, category: FileCategory) -> PathBuf {
        self.root.join(category.dir_name())
    }

    /// Root-relative path for a stored object, always `/`-separated.
    pub fn relative_path(category: FileCategory, stored_name: &str) -> String {
        format!("{}/{stored_name}", category.dir_name())
    }

    /// Resolve a root-relative path to an absolute one.
    ///
    /// Only plain name components are accepted; absolute paths, `.` and `..`
    /// are rejected so a tampered path cannot leave the root.
    pub fn resolve(&self, relative_path: &str) -> StorageResult<PathBuf> {
        let rel = Path::new(relative_path);
        if relative_path.is_empty() {
            return Err(StorageError::InvalidPath("empty path".to_string()));
        }
        if !rel.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(StorageError::InvalidPath(relative_path.to_string()));
        }
        Ok(self.root.join(rel))
    }

    /// Scratch file for one health check; unique per call so concurrent
    /// checks never touch each other's file.
    pub fn health_check_file(&self) -> PathBuf {
        self.root
            .join(format!(".health_check-{}", uuid::Uuid::new_v4().simple()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_use_storage_root() {
        let paths = StoragePaths::default();
        assert_eq!(paths.root(), Path::new("./storage"));
    }

    #[test]
    fn category_dirs_are_correct() {
        let paths = StoragePaths::new("/srv/files");
        assert_eq!(
            paths.category_dir(FileCategory::Contract),
            PathBuf::from("/srv/files/contract")
        );
        assert_eq!(
            paths.category_dir(FileCategory::Credential),
            PathBuf::from("/srv/files/credential")
        );
        assert_eq!(
            paths.category_dir(FileCategory::Asset),
            PathBuf::from("/srv/files/asset")
        );
        assert_eq!(
            paths.category_dir(FileCategory::Document),
            PathBuf::from("/srv/files/document")
        );
    }

    #[test]
    fn relative_paths_are_category_prefixed() {
        assert_eq!(
            StoragePaths::relative_path(FileCategory::Document, "c1_1_a.pdf"),
            "document/c1_1_a.pdf"
        );
    }

    #[test]
    fn resolve_joins_onto_root() {
        let paths = StoragePaths::new("/srv/files");
        assert_eq!(
            paths.resolve("asset/c1_1_logo.png").unwrap(),
            PathBuf::from("/srv/files/asset/c1_1_logo.png")
        );
    }

    #[test]
    fn health_check_files_are_unique() {
        let paths = StoragePaths::new("/srv/files");
        let a = paths.health_check_file();
        let b = paths.health_check_file();
        assert_ne!(a, b);
        assert_eq!(a.parent(), Some(Path::new("/srv/files")));
    }

    #[test]
    fn resolve_rejects_escapes() {
        let paths = StoragePaths::new("/srv/files");
        for bad in ["", "../etc/passwd", "asset/../../x", "/etc/passwd", "./asset/x"] {
            assert!(
                matches!(paths.resolve(bad), Err(StorageError::InvalidPath(_))),
                "{bad} should be rejected"
            );
        }
    }
}
