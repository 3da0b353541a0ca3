// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! File storage API endpoints.
//!
//! Uploads arrive as raw request bodies; the filename, owner, and
//! encryption preference travel as query parameters. Metadata persistence
//! stays with the caller: the upload response is everything it needs to
//! fetch the file again.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    crypto,
    error::ApiError,
    state::AppState,
    storage::{content_type_for, FileCategory, FileInfo, StorageStats, StoredFileResult},
};

/// Upload parameters.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UploadQuery {
    /// Client-declared filename (untrusted, sanitized before use).
    pub filename: String,
    /// Owner or client identifier.
    pub owner_id: String,
    /// Request encryption. Credentials are encrypted regardless.
    #[serde(default)]
    pub encrypt: bool,
}

/// Download parameters.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DownloadQuery {
    /// Relative path returned at upload time.
    pub path: String,
    /// Encryption flag returned at upload time.
    #[serde(default)]
    pub encrypted: bool,
    /// Optional content hash to verify after decryption.
    pub expected_hash: Option<String>,
}

/// Path-only parameters.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PathQuery {
    /// Relative path returned at upload time.
    pub path: String,
}

/// Store a file under a category.
#[utoipa::path(
    post,
    path = "/v1/files/{category}",
    params(
        ("category" = String, Path, description = "contract, credential, asset or document"),
        UploadQuery
    ),
    request_body(content = Vec<u8>, content_type = "application/octet-stream", description = "Raw file bytes"),
    tag = "Files",
    responses(
        (status = 201, description = "File stored", body = StoredFileResult),
        (status = 400, description = "Unknown category"),
        (status = 413, description = "File exceeds the size limit"),
        (status = 422, description = "Extension not allowed for the category")
    )
)]
pub async fn upload_file(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(params): Query<UploadQuery>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<StoredFileResult>), ApiError> {
    // The route's body limit surfaces here as a 413 rejection.
    let body =
        body.map_err(|rejection| ApiError::new(rejection.status(), rejection.body_text()))?;
    let category: FileCategory = category.parse().map_err(ApiError::bad_request)?;
    if params.owner_id.trim().is_empty() {
        return Err(ApiError::bad_request("owner_id is required"));
    }

    let stored = state.storage().store(
        &body,
        &params.filename,
        category,
        &params.owner_id,
        params.encrypt,
    )?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Fetch a stored file's plaintext.
#[utoipa::path(
    get,
    path = "/v1/files/content",
    params(DownloadQuery),
    tag = "Files",
    responses(
        (status = 200, description = "File contents", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 404, description = "File not found"),
        (status = 409, description = "Content hash mismatch"),
        (status = 422, description = "Decryption failed")
    )
)]
pub async fn download_file(
    State(state): State<AppState>,
    Query(params): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    let data = state.storage().retrieve(&params.path, params.encrypted)?;

    if let Some(expected) = params.expected_hash.as_deref() {
        if !crypto::verify_hash(&data, expected) {
            tracing::warn!(path = %params.path, "Content hash mismatch on retrieval");
            return Err(ApiError::conflict("Content hash mismatch"));
        }
    }

    let content_type = content_type_for(&params.path);
    Ok(([(header::CONTENT_TYPE, content_type)], data).into_response())
}

/// Size and modification time of a stored file.
#[utoipa::path(
    get,
    path = "/v1/files/info",
    params(PathQuery),
    tag = "Files",
    responses(
        (status = 200, body = FileInfo),
        (status = 404, description = "File not found")
    )
)]
pub async fn file_info(
    State(state): State<AppState>,
    Query(params): Query<PathQuery>,
) -> Result<Json<FileInfo>, ApiError> {
    Ok(Json(state.storage().file_info(&params.path)?))
}

/// Delete a stored file. Always succeeds from the caller's view.
#[utoipa::path(
    delete,
    path = "/v1/files",
    params(PathQuery),
    tag = "Files",
    responses((status = 204))
)]
pub async fn delete_file(
    State(state): State<AppState>,
    Query(params): Query<PathQuery>,
) -> StatusCode {
    let outcome = state.storage().delete(&params.path);
    tracing::debug!(path = %params.path, ?outcome, "Delete requested");
    StatusCode::NO_CONTENT
}

/// Aggregate usage per category.
#[utoipa::path(
    get,
    path = "/v1/stats",
    tag = "Files",
    responses((status = 200, body = StorageStats))
)]
pub async fn storage_stats(State(state): State<AppState>) -> Result<Json<StorageStats>, ApiError> {
    Ok(Json(state.storage().storage_stats()?))
}
