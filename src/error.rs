use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabError {
    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Error processing image: {0}")]
    ProcessingError(String),

    #[error("Image too large: {size} bytes (max: {max} bytes)")]
    ImageTooLarge { size: usize, max: usize },

    #[error("Missing file in request")]
    MissingFile,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Failure body of the in-band error contract: per-request failures are
/// reported with HTTP 200 and `is_success: false`, never as transport-level
/// errors.
#[derive(Serialize)]
pub struct FailureResponse {
    pub is_success: bool,
    pub error: String,
}

impl IntoResponse for LabError {
    fn into_response(self) -> Response {
        let body = Json(FailureResponse {
            is_success: false,
            error: self.to_string(),
        });

        (StatusCode::OK, body).into_response()
    }
}
