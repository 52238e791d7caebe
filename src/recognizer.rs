//! Speech recognition capability.
//!
//! The assistant never performs speech-to-text itself; it consumes a local
//! recognition service through this narrow interface. One utterance per
//! session, final results only, at most one alternative.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::RecognizerConfig;
use crate::error::{Error, Result};

/// A speech-recognition session source. `capture_utterance` completes
/// exactly once per call, with either a transcript or an error; it never
/// retries on its own.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn capture_utterance(&self) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    transcript: String,
}

/// Recognizer backed by a local speech-recognition HTTP service.
pub struct HttpRecognizer {
    client: Client,
    endpoint: String,
    locale: String,
}

impl HttpRecognizer {
    pub fn new(config: &RecognizerConfig) -> Result<Self> {
        if config.endpoint.is_empty() {
            return Err(Error::Config("recognizer endpoint required".to_string()));
        }

        // The timeout bounds the whole listening session, so it is much
        // longer than an ordinary request timeout.
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            locale: config.locale.clone(),
        })
    }
}

#[async_trait]
impl SpeechRecognizer for HttpRecognizer {
    async fn capture_utterance(&self) -> Result<String> {
        let body = json!({
            "locale": self.locale,
            "interim_results": false,
            "max_alternatives": 1,
        });

        debug!("Starting recognition session at {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Recognition(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Recognition(format!(
                "recognition service returned {status}: {body}"
            )));
        }

        let parsed: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| Error::Recognition(e.to_string()))?;

        Ok(parsed.transcript)
    }
}
