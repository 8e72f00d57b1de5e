//! DICOM upload handler.

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::config::{DICOM_UPLOAD_FIELD, MAX_DICOM_UPLOAD_BYTES};
use crate::domain::DicomSeries;
use crate::errors::{AppError, AppResult};

/// Multipart body of an upload
#[derive(ToSchema)]
pub struct UploadForm {
    /// DICOM Part 10 file
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Upload result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    #[schema(example = "DICOM file uploaded and metadata stored successfully.")]
    pub message: String,
    pub series: DicomSeries,
}

/// Create DICOM routes
pub fn dicom_routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::max(MAX_DICOM_UPLOAD_BYTES))
}

/// Upload a DICOM file and store its series metadata
#[utoipa::path(
    post,
    path = "/dicom/upload",
    tag = "DICOM",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Metadata stored", body = UploadResponse),
        (status = 400, description = "Missing file, unreadable DICOM or missing metadata"),
        (status = 413, description = "Upload larger than the body limit"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(|e| rejected(e.status(), e.body_text()))?;

    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| rejected(e.status(), e.body_text()))?
    {
        if field.name() == Some(DICOM_UPLOAD_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| rejected(e.status(), e.body_text()))?;
            file = Some(bytes);
            break;
        }
    }

    let bytes = file.ok_or_else(|| {
        AppError::bad_request(format!("Missing '{}' field", DICOM_UPLOAD_FIELD))
    })?;

    let series = state.dicom_service.upload(bytes.to_vec()).await?;

    Ok(Json(UploadResponse {
        message: "DICOM file uploaded and metadata stored successfully.".to_string(),
        series,
    }))
}

/// Classify a multipart failure. Oversized bodies keep their own status.
fn rejected(status: StatusCode, detail: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!(
            "Upload exceeds the {} byte limit",
            MAX_DICOM_UPLOAD_BYTES
        ))
    } else {
        AppError::bad_request(format!("Invalid upload: {}", detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_body_maps_to_413() {
        let err = rejected(StatusCode::PAYLOAD_TOO_LARGE, "length limit exceeded".to_string());
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(err.to_string().contains(&MAX_DICOM_UPLOAD_BYTES.to_string()));
    }

    #[test]
    fn test_malformed_body_stays_a_bad_request() {
        let err = rejected(StatusCode::BAD_REQUEST, "missing boundary".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid upload: missing boundary");
    }
}
