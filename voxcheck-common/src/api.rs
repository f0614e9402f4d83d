//! Scoring API wire types
//!
//! Shared between the transcoding client and the mock scoring server so the
//! two sides cannot drift apart. The real backend returns `risk_score` plus
//! `prediction_label` and `status`; the mock returns `risk_score` only, so
//! everything beyond the score is optional.

use serde::{Deserialize, Serialize};

/// Successful scoring response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    /// Risk score in [0, 1]
    pub risk_score: f64,

    /// Human-readable classification, if the backend provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction_label: Option<String>,

    /// Backend status string, if provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ScoreResponse {
    /// Response carrying only a score (mock server shape)
    pub fn from_score(risk_score: f64) -> Self {
        Self {
            risk_score,
            prediction_label: None,
            status: None,
        }
    }
}

/// Error response body returned by the scoring service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
