// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Aggregate usage statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::FileCategory;

/// Totals for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryStats {
    pub files: u64,
    /// On-disk bytes.
    pub size: u64,
}

/// Usage across the whole storage root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StorageStats {
    pub total_files: u64,
    pub total_size: u64,
    /// Keyed by category directory name.
    pub per_category: BTreeMap<String, CategoryStats>,
}

impl StorageStats {
    pub(crate) fn record(&mut self, category: FileCategory, files: u64, size: u64) {
        self.total_files += files;
        self.total_size += size;
        self.per_category
            .insert(category.dir_name().to_string(), CategoryStats { files, size });
    }

    pub(crate) fn record_empty(&mut self, category: FileCategory) {
        self.record(category, 0, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accumulates_totals() {
        let mut stats = StorageStats::default();
        stats.record(FileCategory::Asset, 2, 100);
        stats.record(FileCategory::Document, 1, 50);
        stats.record_empty(FileCategory::Credential);

        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.total_size, 150);
        assert_eq!(stats.per_category["credential"], CategoryStats::default());
    }

    #[test]
    fn serializes_category_keys() {
        let mut stats = StorageStats::default();
        stats.record(FileCategory::Contract, 1, 10);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["per_category"]["contract"]["files"], 1);
        assert_eq!(json["total_size"], 10);
    }
}
