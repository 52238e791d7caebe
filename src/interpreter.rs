//! Remote intent interpretation over HTTP.
//!
//! Sends a recognized transcript to the portal's /api/voice/interpret
//! endpoint and parses the structured reply. Connection failures, non-2xx
//! statuses and malformed bodies all surface as errors; the caller decides
//! how to report them.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::InterpreterConfig;
use crate::error::{Error, Result};

/// Request body for the interpretation endpoint.
#[derive(Debug, Serialize)]
pub struct InterpretRequest<'a> {
    pub transcript: &'a str,
}

/// A single action parameter. Only scalar kinds are allowed on the wire;
/// nested objects or arrays fail deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl ParamValue {
    /// The value as text, if it is the text kind.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

pub type Parameters = HashMap<String, ParamValue>;

/// Structured reply from the interpretation endpoint. Every field is
/// optional; an absent `parameters` mapping parses as an empty map.
/// Extra fields (the backend also sends `intent` and `confidence`) are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InterpretationResponse {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub parameters: Parameters,
}

/// Intent interpretation interface. The real implementation talks to the
/// portal backend; tests substitute a canned one.
#[async_trait]
pub trait Interpreter: Send + Sync {
    async fn interpret(&self, transcript: &str) -> Result<InterpretationResponse>;
}

pub struct HttpInterpreter {
    client: Client,
    endpoint: String,
}

impl HttpInterpreter {
    pub fn new(config: &InterpreterConfig) -> Result<Self> {
        if config.endpoint.is_empty() {
            return Err(Error::Config("interpreter endpoint required".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl Interpreter for HttpInterpreter {
    async fn interpret(&self, transcript: &str) -> Result<InterpretationResponse> {
        debug!("Sending transcript to {}: {transcript}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&InterpretRequest { transcript })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Interpreter { status, body });
        }

        let body = response.text().await?;
        let parsed: InterpretationResponse =
            serde_json::from_str(&body).map_err(|e| Error::Protocol(e.to_string()))?;

        debug!(
            "Interpreter reply: action={:?}, reply={:?}",
            parsed.action, parsed.reply
        );
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parses_all_fields() {
        let json = r#"{
            "reply": "Fetching vehicle details.",
            "action": "CHECK_VEHICLE",
            "intent": "CHECK_VEHICLE",
            "confidence": 0.9,
            "parameters": {
                "vehicleNumber": "MH12AB1234",
                "attempt": 2,
                "urgent": true
            }
        }"#;

        let response: InterpretationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.reply.as_deref(), Some("Fetching vehicle details."));
        assert_eq!(response.action.as_deref(), Some("CHECK_VEHICLE"));
        assert_eq!(
            response.parameters.get("vehicleNumber"),
            Some(&ParamValue::Text("MH12AB1234".to_string()))
        );
        assert_eq!(
            response.parameters.get("attempt"),
            Some(&ParamValue::Number(2.0))
        );
        assert_eq!(
            response.parameters.get("urgent"),
            Some(&ParamValue::Flag(true))
        );
    }

    #[test]
    fn absent_fields_parse_as_none_and_empty_map() {
        let response: InterpretationResponse = serde_json::from_str("{}").unwrap();
        assert!(response.reply.is_none());
        assert!(response.action.is_none());
        assert!(response.parameters.is_empty());

        let response: InterpretationResponse =
            serde_json::from_str(r#"{"action": "GO_HOME"}"#).unwrap();
        assert_eq!(response.action.as_deref(), Some("GO_HOME"));
        assert!(response.parameters.is_empty());
    }

    #[test]
    fn nested_parameter_values_are_rejected() {
        let object = r#"{"parameters": {"vehicle": {"number": "MH12AB1234"}}}"#;
        assert!(serde_json::from_str::<InterpretationResponse>(object).is_err());

        let array = r#"{"parameters": {"vehicles": ["MH12AB1234"]}}"#;
        assert!(serde_json::from_str::<InterpretationResponse>(array).is_err());
    }

    #[test]
    fn transcript_survives_the_wire_format_unchanged() {
        let transcript = "rénew my \"license\" \\ कृपया 🚗 <tag>";
        let body = serde_json::to_string(&InterpretRequest { transcript }).unwrap();

        // What the server would read back out of the request body.
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["transcript"].as_str(), Some(transcript));

        // And the same text coming back as a reply.
        let reply_body = serde_json::json!({ "reply": transcript }).to_string();
        let response: InterpretationResponse = serde_json::from_str(&reply_body).unwrap();
        assert_eq!(response.reply.as_deref(), Some(transcript));
    }

    #[test]
    fn malformed_body_is_a_protocol_error_message() {
        let err = serde_json::from_str::<InterpretationResponse>("not json").unwrap_err();
        let wrapped = Error::Protocol(err.to_string());
        assert!(wrapped.to_string().starts_with("malformed interpreter response"));
    }
}
