//! Speech synthesis capability.
//!
//! Text-to-speech is consumed, not implemented: utterances are handed to a
//! local synthesis service which queues and plays them in the order they
//! arrive. Nothing in-flight is ever cancelled.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use crate::config::SynthesizerConfig;
use crate::error::{Error, Result};

/// An enqueue-utterance sink for spoken replies.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn enqueue_utterance(&self, text: &str) -> Result<()>;
}

/// Synthesizer backed by a local speech-synthesis HTTP service.
pub struct HttpSynthesizer {
    client: Client,
    endpoint: String,
    voice: String,
}

impl HttpSynthesizer {
    pub fn new(config: &SynthesizerConfig) -> Result<Self> {
        if config.endpoint.is_empty() {
            return Err(Error::Config("synthesizer endpoint required".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            voice: config.voice.clone(),
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpSynthesizer {
    async fn enqueue_utterance(&self, text: &str) -> Result<()> {
        debug!("Enqueuing utterance ({} chars)", text.len());

        let body = json!({
            "text": text,
            "voice": self.voice,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Synthesis(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Synthesis(format!(
                "synthesis service returned {status}: {body}"
            )));
        }

        Ok(())
    }
}
