// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    state::AppState,
    storage::{CategoryStats, FileCategory, FileInfo, StorageStats, StoredFileResult, MAX_FILE_SIZE},
};

pub mod files;
pub mod health;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route(
            "/files/{category}",
            // One byte of headroom so the storage layer reports the size error.
            post(files::upload_file).layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 1)),
        )
        .route("/files/content", get(files::download_file))
        .route("/files/info", get(files::file_info))
        .route("/files", axum::routing::delete(files::delete_file))
        .route("/stats", get(files::storage_stats))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        files::upload_file,
        files::download_file,
        files::file_info,
        files::delete_file,
        files::storage_stats,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            FileCategory,
            StoredFileResult,
            FileInfo,
            StorageStats,
            CategoryStats,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Files", description = "File storage and retrieval"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
