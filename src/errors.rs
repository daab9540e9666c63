/*!
 * Error types for the translate-agent crate.
 *
 * This module contains the session error taxonomy shared with the extension
 * boundary, plus custom error types for the engine seam and the coordinator
 * API, using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Classification of a translation-session failure.
///
/// The discriminants are the wire codes the extension boundary expects, so
/// gaps in the numbering are intentional. `BadOrigin` and `ScriptLoadError`
/// are reserved for the resource-loading boundary; the coordinator itself
/// never produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorKind {
    /// No error active
    #[default]
    None,

    /// Engine construction failed
    InitializationError,

    /// The engine reports the page language cannot be handled
    UnsupportedLanguage,

    /// The engine reports a generic translation failure
    TranslationError,

    /// Readiness poll budget exhausted before the engine became available
    TranslationTimeout,

    /// Invoking the engine raised an unhandled failure
    UnexpectedScriptError,

    /// A requested resource origin failed validation (reserved)
    BadOrigin,

    /// A dynamically loaded dependency failed to load (reserved)
    ScriptLoadError,
}

impl ErrorKind {
    /// Numeric wire code for the extension boundary.
    pub fn code(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::InitializationError => 2,
            Self::UnsupportedLanguage => 4,
            Self::TranslationError => 6,
            Self::TranslationTimeout => 7,
            Self::UnexpectedScriptError => 8,
            Self::BadOrigin => 9,
            Self::ScriptLoadError => 10,
        }
    }

    /// Parse a wire code back into an error kind.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            2 => Some(Self::InitializationError),
            4 => Some(Self::UnsupportedLanguage),
            6 => Some(Self::TranslationError),
            7 => Some(Self::TranslationTimeout),
            8 => Some(Self::UnexpectedScriptError),
            9 => Some(Self::BadOrigin),
            10 => Some(Self::ScriptLoadError),
            _ => None,
        }
    }

    /// Whether an error is active.
    pub fn is_error(&self) -> bool {
        *self != Self::None
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::InitializationError => "initialization error",
            Self::UnsupportedLanguage => "unsupported language",
            Self::TranslationError => "translation error",
            Self::TranslationTimeout => "translation timeout",
            Self::UnexpectedScriptError => "unexpected script error",
            Self::BadOrigin => "bad origin",
            Self::ScriptLoadError => "script load error",
        };
        write!(f, "{}", name)
    }
}

// Serialized as the numeric wire code, not a string name.
impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.code())
    }
}

impl<'de> Deserialize<'de> for ErrorKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u32::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown error code: {}", code)))
    }
}

/// Errors that can occur at the engine boundary
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine rejected or failed the invocation synchronously
    #[error("Engine invocation failed: {0}")]
    InvocationFailed(String),

    /// The engine has not finished its own startup
    #[error("Engine is not ready")]
    NotReady,
}

/// Errors that can occur when driving the coordinator API
#[derive(Error, Debug)]
pub enum CoordinatorError {
    /// A translation attempt is already in flight for this session
    #[error("A translation attempt is already in progress")]
    AttemptInProgress,
}
