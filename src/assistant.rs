//! Voice command orchestration.
//!
//! One interaction cycle: listen → transcript → interpret → speak reply →
//! dispatch action effect. Availability of the speech capabilities is fixed
//! at construction and never re-probed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::actions::{self, ActionCode, Effect};
use crate::interpreter::{InterpretationResponse, Interpreter, Parameters};
use crate::portal::PortalUi;
use crate::recognizer::SpeechRecognizer;
use crate::synthesizer::SpeechSynthesizer;

/// Optional caller-side observers for recognition results and interpreter
/// replies. Absence means no observation, not an error.
#[derive(Default)]
pub struct Handlers {
    pub on_result: Option<Box<dyn Fn(&str) + Send + Sync>>,
    pub on_reply: Option<Box<dyn Fn(&InterpretationResponse) + Send + Sync>>,
}

pub struct VoiceAssistant {
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    interpreter: Arc<dyn Interpreter>,
    portal: Arc<dyn PortalUi>,
    handlers: Handlers,
    /// Guards against overlapping recognition sessions.
    listening: AtomicBool,
}

impl VoiceAssistant {
    pub fn new(
        recognizer: Option<Arc<dyn SpeechRecognizer>>,
        synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
        interpreter: Arc<dyn Interpreter>,
        portal: Arc<dyn PortalUi>,
        handlers: Handlers,
    ) -> Self {
        if recognizer.is_none() {
            portal.alert("Speech recognition is not available. Voice capture is disabled.");
        }
        if synthesizer.is_none() {
            debug!("Speech synthesis not available, replies will not be spoken");
        }

        Self {
            recognizer,
            synthesizer,
            interpreter,
            portal,
            handlers,
            listening: AtomicBool::new(false),
        }
    }

    /// Whether voice capture is possible at all for this instance.
    pub fn recognition_available(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Capture one utterance. Returns the transcript, or `None` when
    /// recognition is unavailable, a session is already active, or the
    /// session failed. Failures are reported to the user; there is no
    /// automatic retry and the transcript is not auto-submitted.
    pub async fn listen(&self) -> Option<String> {
        let Some(recognizer) = &self.recognizer else {
            debug!("listen() ignored: recognition unavailable");
            return None;
        };

        if self.listening.swap(true, Ordering::SeqCst) {
            warn!("listen() ignored: a recognition session is already active");
            return None;
        }

        info!("Listening...");
        let outcome = recognizer.capture_utterance().await;
        self.listening.store(false, Ordering::SeqCst);

        match outcome {
            Ok(transcript) => {
                info!("Heard: {transcript}");
                if let Some(on_result) = &self.handlers.on_result {
                    on_result(&transcript);
                }
                Some(transcript)
            }
            Err(e) => {
                self.portal.alert(&format!("Speech recognition error: {e}"));
                None
            }
        }
    }

    /// Queue text for audible playback. Silently does nothing without a
    /// synthesizer; enqueue failures are logged, never escalated.
    pub async fn speak(&self, text: &str) {
        let Some(synthesizer) = &self.synthesizer else {
            return;
        };
        if let Err(e) = synthesizer.enqueue_utterance(text).await {
            warn!("Failed to speak reply: {e}");
        }
    }

    /// Submit a transcript to the interpreter and carry out the reply:
    /// notify the reply observer, speak the textual reply, dispatch the
    /// action. Interpreter failures surface as a single user-facing alert.
    pub async fn send_transcript(&self, transcript: &str) {
        debug!("Submitting transcript: {transcript}");

        match self.interpreter.interpret(transcript).await {
            Ok(response) => {
                if let Some(on_reply) = &self.handlers.on_reply {
                    on_reply(&response);
                }
                if let Some(reply) = &response.reply {
                    self.speak(reply).await;
                }
                if let Some(action) = &response.action {
                    self.handle_action(action, &response.parameters);
                }
            }
            Err(e) => {
                self.portal.alert(&format!("Could not interpret the command: {e}"));
            }
        }
    }

    /// Dispatch an interpreter action code to its portal effect. Codes
    /// outside the known vocabulary are ignored.
    pub fn handle_action(&self, action: &str, parameters: &Parameters) {
        let Some(code) = ActionCode::parse(action) else {
            debug!("Ignoring unknown action code: {action}");
            return;
        };

        match actions::dispatch(code, parameters) {
            Effect::Navigate(page) => self.portal.navigate(page),
            Effect::Alert(message) => self.portal.alert(&message),
            Effect::Prompt(message) => self.portal.prompt(&message),
        }
    }
}
