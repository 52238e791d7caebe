//! Configuration management for voice-assistant-rs.
//!
//! Loads config from YAML files in standard locations. Every section has
//! sensible defaults so the assistant runs without any config file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    pub enabled: bool,
    /// Endpoint of the local speech-recognition service.
    pub endpoint: String,
    pub locale: String,
    /// How long a single listening session may take, in seconds.
    pub timeout_secs: u64,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "http://localhost:8765/api/recognize".into(),
            locale: "en-US".into(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SynthesizerConfig {
    pub enabled: bool,
    /// Endpoint of the local speech-synthesis service.
    pub endpoint: String,
    pub voice: String,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "http://localhost:8767/api/speak".into(),
            voice: "default".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Intent-interpretation endpoint of the portal backend.
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/api/voice/interpret".into(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Base URL the fixed relative navigation targets resolve against.
    pub base_url: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub notifications: bool,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            notifications: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub recognizer: RecognizerConfig,
    pub synthesizer: SynthesizerConfig,
    pub interpreter: InterpreterConfig,
    pub portal: PortalConfig,
    pub feedback: FeedbackConfig,
}

impl Config {
    /// Load configuration from YAML file.
    ///
    /// Searches standard locations if no path is provided:
    /// 1. ./config.yaml
    /// 2. ~/.config/voice-assistant/config.yaml
    /// 3. /etc/voice-assistant/config.yaml
    pub fn load(path: Option<&Path>) -> Self {
        let resolved = path.map(PathBuf::from).or_else(|| {
            let candidates = [
                std::env::current_dir().ok().map(|d| d.join("config.yaml")),
                dirs::home_dir().map(|h| h.join(".config/voice-assistant/config.yaml")),
                Some(PathBuf::from("/etc/voice-assistant/config.yaml")),
            ];
            candidates.into_iter().flatten().find(|p| p.exists())
        });

        let Some(config_path) = resolved else {
            info!("No config file found, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match serde_yml::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", config_path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}, using defaults", config_path.display());
                Self::default()
            }
        }
    }
}
