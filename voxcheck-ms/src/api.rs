//! Mock scoring API
//!
//! Implements the scoring service contract the transcoding client expects:
//! `POST /predict` with a multipart `audio` file part, JSON response with a
//! `risk_score` field. The score is uniformly random in [0, 1); there is no
//! model behind this endpoint.

use axum::{
    extract::Multipart,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use rand::Rng;
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use voxcheck_common::api::{ErrorResponse, ScoreResponse};

/// Create the API router
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/predict", post(predict))
        .layer(TraceLayer::new_for_http())
        // The browser client is served from another origin
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "module": "voxcheck-ms",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Mock scoring endpoint
async fn predict(
    mut multipart: Multipart,
) -> Result<Json<ScoreResponse>, (StatusCode, Json<ErrorResponse>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("Malformed multipart request: {}", e)))?
    {
        if field.name() != Some("audio") {
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| bad_request(format!("Failed to read audio part: {}", e)))?;

        let risk_score = rand::thread_rng().gen::<f64>();
        info!(
            bytes = data.len(),
            risk_score, "received audio file, sending mock risk"
        );

        return Ok(Json(ScoreResponse::from_score(risk_score)));
    }

    warn!("predict request without an 'audio' part");
    Err(bad_request(
        "No audio file found in request. Make sure the key is \"audio\".".to_string(),
    ))
}

fn bad_request(error: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}
