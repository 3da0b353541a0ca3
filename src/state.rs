// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::storage::FileStorage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<FileStorage>,
}

impl AppState {
    pub fn new(storage: FileStorage) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    pub fn storage(&self) -> &FileStorage {
        &self.storage
    }
}
