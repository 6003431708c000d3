// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types and handling for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing file in request")]
    MissingFile,

    #[error("File too large: maximum size is {max_mb} MB")]
    FileTooLarge { max_mb: usize },

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Join error")]
    Join(#[from] tokio::task::JoinError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::MissingFile => (StatusCode::BAD_REQUEST, "MISSING_FILE"),
            ApiError::FileTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE"),
            ApiError::Multipart(_) => (StatusCode::BAD_REQUEST, "MULTIPART_ERROR"),
            ApiError::InvalidModel(_) => (StatusCode::BAD_REQUEST, "INVALID_MODEL"),
            ApiError::Join(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TASK_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code, "Request failed");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ifc_slicer_core::Error> for ApiError {
    fn from(err: ifc_slicer_core::Error) -> Self {
        // Only the document itself can fail at this level
        ApiError::InvalidModel(err.to_string())
    }
}

impl From<ifc_slicer_processing::Error> for ApiError {
    fn from(err: ifc_slicer_processing::Error) -> Self {
        // Per-element faults are recorded in the category map, so only a bad
        // element collection reaches here
        ApiError::InvalidModel(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::MissingFile.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::FileTooLarge { max_mb: 1 }.into_response().status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        let invalid: ApiError = ifc_slicer_core::Error::InvalidInput("no elements".into()).into();
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_classification_error_is_invalid_model() {
        let err: ApiError = ifc_slicer_processing::Error::from(ifc_slicer_core::Error::InvalidInput(
            "'elements' is not an array".into(),
        ))
        .into();
        assert!(matches!(err, ApiError::InvalidModel(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
