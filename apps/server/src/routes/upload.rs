// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model upload endpoint.

use crate::error::ApiError;
use crate::services::classify_upload;
use crate::types::UploadResponse;
use crate::AppState;
use axum::{
    extract::{Multipart, State},
    Json,
};

struct UploadedFile {
    filename: String,
    data: Vec<u8>,
}

/// Extract the `file` field from a multipart request.
async fn extract_file(multipart: &mut Multipart) -> Result<UploadedFile, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        tracing::debug!(field_name = %field_name, "Processing multipart field");

        if field_name == "file" {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await?;
            tracing::debug!(filename = %filename, size = bytes.len(), "Extracted file from multipart");
            return Ok(UploadedFile {
                filename,
                data: bytes.to_vec(),
            });
        }
    }

    tracing::warn!("No 'file' field found in multipart request");
    Err(ApiError::MissingFile)
}

/// POST /uploadfile/ - Classify an uploaded raw-model document.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let UploadedFile { filename, data } = extract_file(&mut multipart).await?;

    if data.len() > state.config.max_file_size_bytes() {
        return Err(ApiError::FileTooLarge {
            max_mb: state.config.max_file_size_mb,
        });
    }

    let content_size = data.len();
    tracing::info!(filename = %filename, size = content_size, "Received upload");

    // Process on blocking thread pool (CPU-intensive)
    let options = state.config.classify_options();
    let result = tokio::task::spawn_blocking(move || classify_upload(&data, &options)).await??;

    Ok(Json(UploadResponse {
        filename,
        content_size,
        failures: result.categories.failures().to_vec(),
        skipped: result.categories.skipped().to_vec(),
        categories: result.categories,
        stats: result.stats,
    }))
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::{router, AppState};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "ifc-slicer-test-boundary";

    fn state(vars: &'static [(&'static str, &'static str)]) -> AppState {
        let config = Config::from_lookup(|key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        });
        AppState {
            config: Arc::new(config),
        }
    }

    fn multipart_request(field: &str, filename: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/json\r\n\r\n{content}\r\n--{b}--\r\n",
            b = BOUNDARY,
        );
        Request::builder()
            .method("POST")
            .uri("/uploadfile/")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const MODEL: &str = r#"{"elements":[
        {"type":"IfcSlab","global_id":"slab-1","representations":[{"kind":"SweptSolid","items":[
            {"depth":200,"points":[[0,0],[10,0],[10,10],[0,10],[0,0]]}]}]},
        {"type":"IfcSlab","global_id":"slab-2"},
        {"type":"IfcWall","global_id":"wall-1","info":{"Name":"Partition"}}
    ]}"#;

    #[tokio::test]
    async fn test_upload_classifies_model() {
        let response = router(state(&[]))
            .oneshot(multipart_request("file", "model.json", MODEL))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["filename"], "model.json");
        assert_eq!(json["content_size"], MODEL.len());
        assert_eq!(json["categories"]["IfcSlab"][0]["element"]["element_type"], "IfcSlab");
        assert!(json["categories"]["IfcSlab"][1].get("element").is_none());
        assert_eq!(json["categories"]["IfcWall"][0]["info"]["Name"], "Partition");
        assert_eq!(json["failures"][0]["global_id"], "slab-2");
        assert_eq!(json["failures"][0]["kind"], "missing_geometry");
        assert_eq!(json["stats"]["typed_count"], 1);
    }

    #[tokio::test]
    async fn test_missing_file_field() {
        let response = router(state(&[]))
            .oneshot(multipart_request("other", "model.json", MODEL))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["code"], "MISSING_FILE");
    }

    #[tokio::test]
    async fn test_invalid_model() {
        let response = router(state(&[]))
            .oneshot(multipart_request("file", "model.json", r#"{"points":{}}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["code"], "INVALID_MODEL");
    }

    #[tokio::test]
    async fn test_file_too_large() {
        let response = router(state(&[("MAX_FILE_SIZE_MB", "0")]))
            .oneshot(multipart_request("file", "model.json", MODEL))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_form_and_health() {
        let app = router(state(&[]));

        let response = app
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(std::str::from_utf8(&html).unwrap().contains("action=\"/uploadfile/\""));

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(json_body(response).await["status"], "ok");
    }
}
