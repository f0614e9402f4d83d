//! Scoring service client
//!
//! Posts the canonical WAV buffer to the scoring endpoint as a multipart
//! file attachment and extracts the returned risk score.

use crate::error::{Error, Result};
use std::time::Duration;
use tracing::{debug, warn};
use voxcheck_common::api::{ErrorResponse, ScoreResponse};

/// Scoring service HTTP client
pub struct ScoringClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl ScoringClient {
    /// Build a client for the given endpoint with a bounded request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }

    /// Submit one canonical WAV buffer and return the risk score.
    ///
    /// The buffer is sent as a form part named `audio` with filename
    /// `voice.wav`. A non-2xx status or a response without a numeric
    /// `risk_score` field is an `Error::Scoring`.
    pub async fn submit(&self, wav: Vec<u8>) -> Result<f64> {
        let wav_len = wav.len();
        let part = reqwest::multipart::Part::bytes(wav)
            .file_name("voice.wav")
            .mime_str("audio/wav")?;
        let form = reqwest::multipart::Form::new().part("audio", part);

        debug!(endpoint = %self.endpoint, bytes = wav_len, "submitting recording for scoring");

        let response = self
            .http_client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "no error detail".to_string());
            return Err(Error::Scoring(format!(
                "scoring service returned {}: {}",
                status, detail
            )));
        }

        let score: ScoreResponse = response.json().await.map_err(|e| {
            Error::Scoring(format!("response missing a numeric risk_score: {}", e))
        })?;

        if !(0.0..=1.0).contains(&score.risk_score) {
            warn!(
                risk_score = score.risk_score,
                "risk score outside expected [0,1] range"
            );
        }

        Ok(score.risk_score)
    }
}
