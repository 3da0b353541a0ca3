// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::crypto::CryptoError;
use crate::storage::StorageError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match &e {
            StorageError::FileTooLarge { .. } => {
                Self::new(StatusCode::PAYLOAD_TOO_LARGE, e.to_string())
            }
            StorageError::InvalidFileType { .. } => Self::unprocessable(e.to_string()),
            StorageError::InvalidPath(_) => Self::bad_request(e.to_string()),
            StorageError::FileRetrieval { source, .. } | StorageError::FileInfo { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Self::not_found(e.to_string())
            }
            StorageError::Crypto(CryptoError::Decryption(_)) => {
                Self::unprocessable(e.to_string())
            }
            _ => {
                tracing::error!(error = %e, "Storage operation failed");
                Self::internal("Storage operation failed")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileCategory;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let nf = ApiError::not_found("missing");
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.message, "missing");

        let bad = ApiError::bad_request("bad");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);
        assert_eq!(bad.message, "bad");

        let unp = ApiError::unprocessable("oops");
        assert_eq!(unp.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(unp.message, "oops");
    }

    #[test]
    fn storage_errors_map_to_statuses() {
        let too_large = ApiError::from(StorageError::FileTooLarge { size: 11, max: 10 });
        assert_eq!(too_large.status, StatusCode::PAYLOAD_TOO_LARGE);

        let bad_type = ApiError::from(StorageError::InvalidFileType {
            filename: "x.exe".into(),
            category: FileCategory::Document,
        });
        assert_eq!(bad_type.status, StatusCode::UNPROCESSABLE_ENTITY);

        let missing = ApiError::from(StorageError::FileRetrieval {
            path: "document/x.txt".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        assert_eq!(missing.status, StatusCode::NOT_FOUND);

        let denied = ApiError::from(StorageError::FileRetrieval {
            path: "document/x.txt".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        });
        assert_eq!(denied.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(denied.message, "Storage operation failed");
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"bad data"}"#);
    }
}
