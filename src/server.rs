use crate::config::Config;
use crate::engines::tesseract::TesseractEngine;
use crate::error::LabError;
use crate::parser::TestRecord;
use crate::processor::ReportProcessor;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, State},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<ReportProcessor>,
    pub config: Arc<Config>,
}

/// Successful extraction response
#[derive(Serialize)]
pub struct LabTestsResponse {
    pub is_success: bool,
    pub data: Vec<TestRecord>,
}

/// Liveness/info response for the root route
#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// Run the HTTP server
pub async fn run(config: Config) -> anyhow::Result<()> {
    // Engine construction is fail-fast: a missing or misconfigured OCR
    // setup must prevent startup, not fail per request.
    let engine = TesseractEngine::new(&config)?;
    let processor = ReportProcessor::new(Arc::new(engine));

    let addr = format!("{}:{}", config.host, config.port);
    let app = router(AppState {
        processor: Arc::new(processor),
        config: Arc::new(config),
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router; split out so tests can drive it with a scripted engine.
pub fn router(state: AppState) -> Router {
    let max_file_size = state.config.max_file_size;

    Router::new()
        .route("/get-lab-tests", post(handle_lab_tests))
        .route("/", get(handle_root))
        .layer(DefaultBodyLimit::max(max_file_size))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle lab report extraction requests.
///
/// Errors are reported in-band: the response is HTTP 200 in both the
/// success and the failure case, with `is_success` carrying the outcome.
async fn handle_lab_tests(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<LabTestsResponse>, LabError> {
    let start = Instant::now();

    let mut file_data: Option<Bytes> = None;

    // Parse multipart form
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| LabError::InvalidRequest(format!("Failed to parse multipart: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "file" {
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| LabError::InvalidRequest(format!("Failed to read file data: {}", e)))?,
            );
        }
        // Other fields are ignored
    }

    let data = file_data.ok_or(LabError::MissingFile)?;

    if data.len() > state.config.max_file_size {
        return Err(LabError::ImageTooLarge {
            size: data.len(),
            max: state.config.max_file_size,
        });
    }

    let records = state.processor.process(&data)?;

    tracing::info!(
        "Extracted {} lab tests in {}ms (engine: {})",
        records.len(),
        start.elapsed().as_millis(),
        state.processor.engine_name()
    );

    Ok(Json(LabTestsResponse {
        is_success: true,
        data: records,
    }))
}

/// Handle liveness/info requests
async fn handle_root() -> impl IntoResponse {
    Json(RootResponse {
        message: "Lab Report Processing API is running. Use POST /get-lab-tests to process lab reports."
            .to_string(),
    })
}
