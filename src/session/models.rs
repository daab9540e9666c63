/*!
 * Session-specific models and DTOs.
 *
 * These structures carry the session boundary's data shapes: the user command
 * delivered by the extension messaging transport, and the serializable view
 * of a session handed back to the extension UI.
 */

use serde::{Deserialize, Serialize};

use crate::errors::ErrorKind;
use crate::session::state::SessionPhase;

fn default_source_language() -> String {
    "auto".to_string()
}

/// The single user-initiated command relayed into the hosting context:
/// "translate this page to language X".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranslateCommand {
    /// Target language code
    pub target_language: String,

    /// Source language code; defaults to the "auto" sentinel, which asks the
    /// engine to detect the page language
    #[serde(default = "default_source_language")]
    pub source_language: String,
}

impl TranslateCommand {
    /// Create a command with automatic source-language detection
    pub fn new(target_language: &str) -> Self {
        Self {
            target_language: target_language.to_string(),
            source_language: default_source_language(),
        }
    }

    /// Create a command with an explicit source language
    pub fn with_source(target_language: &str, source_language: &str) -> Self {
        Self {
            target_language: target_language.to_string(),
            source_language: source_language.to_string(),
        }
    }
}

impl std::fmt::Display for TranslateCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.source_language, self.target_language)
    }
}

/// Serializable view of a session for the extension UI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    /// Current lifecycle phase
    pub phase: SessionPhase,
    /// Whether the engine reported availability
    pub engine_ready: bool,
    /// Whether the current attempt has concluded
    pub finished: bool,
    /// Whether an error is active
    pub error: bool,
    /// Numeric wire code of the active error
    pub error_code: ErrorKind,
    /// Readiness polls performed so far
    pub ready_poll_count: u32,
    /// Milliseconds from injection to engine load completion
    pub load_time_ms: u64,
    /// Milliseconds from injection to engine readiness
    pub ready_time_ms: u64,
    /// Milliseconds spent performing the translation
    pub translation_time_ms: u64,
    /// Detected source language, when known
    pub detected_source_language: Option<String>,
}

impl std::fmt::Display for SessionSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] ready={} finished={} error={}",
            self.phase, self.engine_ready, self.finished, self.error_code
        )
    }
}
