//! voice-assistant-rs: spoken command front-end for the transport portal.

mod actions;
mod assistant;
mod config;
mod error;
mod interpreter;
mod notifier;
mod portal;
mod recognizer;
mod synthesizer;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::assistant::{Handlers, VoiceAssistant};
use crate::interpreter::InterpretationResponse;
use crate::recognizer::SpeechRecognizer;
use crate::synthesizer::SpeechSynthesizer;

#[derive(Parser, Debug)]
#[command(
    name = "voice-assistant-rs",
    about = "Voice command assistant for the transport services portal"
)]
struct Args {
    /// Path to config.yaml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Handle a single command, then exit
    #[arg(long)]
    once: bool,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("voice-assistant-rs starting");

    let config = config::Config::load(args.config.as_deref());
    info!("Interpreter endpoint: {}", config.interpreter.endpoint);

    let recognizer: Option<Arc<dyn SpeechRecognizer>> = if config.recognizer.enabled {
        match recognizer::HttpRecognizer::new(&config.recognizer) {
            Ok(r) => Some(Arc::new(r)),
            Err(e) => {
                warn!("Speech recognition unavailable: {e}");
                None
            }
        }
    } else {
        info!("Speech recognition disabled in config");
        None
    };

    let synthesizer: Option<Arc<dyn SpeechSynthesizer>> = if config.synthesizer.enabled {
        match synthesizer::HttpSynthesizer::new(&config.synthesizer) {
            Ok(s) => Some(Arc::new(s)),
            Err(e) => {
                warn!("Speech synthesis unavailable: {e}");
                None
            }
        }
    } else {
        info!("Speech synthesis disabled in config");
        None
    };

    let interpreter = Arc::new(interpreter::HttpInterpreter::new(&config.interpreter)?);

    let notifier = notifier::Notifier::new(config.feedback.notifications);
    let portal = Arc::new(portal::DesktopPortal::new(&config.portal, notifier));

    let handlers = Handlers {
        on_result: None,
        on_reply: Some(Box::new(|response: &InterpretationResponse| {
            debug!("Raw interpreter response: {response:?}");
        })),
    };

    let assistant = VoiceAssistant::new(recognizer, synthesizer, interpreter, portal, handlers);

    info!("Ready — press Enter to speak, type a command to send it directly, Ctrl-D to exit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();

        let transcript = if line.is_empty() {
            match assistant.listen().await {
                Some(transcript) => transcript,
                None => {
                    if args.once {
                        break;
                    }
                    continue;
                }
            }
        } else {
            // Typed commands skip recognition and go straight to the
            // interpreter, so the pipeline works without audio hardware.
            line.to_string()
        };

        assistant.send_transcript(&transcript).await;

        if args.once {
            break;
        }
    }

    info!("voice-assistant-rs exiting");
    Ok(())
}
