// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Relational Vault - Secure File Storage Service
//!
//! Persists client files (contracts, credentials, assets, documents) under a
//! single storage root, encrypting sensitive categories with AES-256-CBC and
//! returning a SHA-256 content hash for later integrity checks.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `config` - Environment configuration
//! - `crypto` - Symmetric encryption and content hashing
//! - `storage` - Category-aware file storage

pub mod api;
pub mod config;
pub mod crypto;
pub mod error;
pub mod state;
pub mod storage;
