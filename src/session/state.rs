/*!
 * Session state for one in-page translation attempt.
 *
 * One `SessionState` exists per page-load session. It is owned by the
 * coordinator, which is its sole mutator; everything else observes it through
 * the coordinator's accessors or a snapshot.
 */

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::errors::ErrorKind;

/// One-shot lifecycle callback. Registered at most once per session and
/// invoked at most once, through `Option::take`.
pub type Notifier = Box<dyn FnOnce() + Send>;

/// Lifecycle phase of a translation session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Engine not constructed yet
    #[default]
    Unloaded,
    /// Engine constructed, readiness polling in progress
    Loading,
    /// Engine available, no attempt in flight
    Ready,
    /// Engine construction or readiness failed; terminal for the session
    LoadFailed,
    /// A translation attempt is in flight
    Translating,
    /// The last attempt concluded successfully
    Translated,
    /// The last attempt concluded with an error
    TranslationFailed,
}

impl SessionPhase {
    /// Get a human-readable phase string
    pub fn display(&self) -> &'static str {
        match self {
            Self::Unloaded => "Unloaded",
            Self::Loading => "Loading",
            Self::Ready => "Ready",
            Self::LoadFailed => "Load Failed",
            Self::Translating => "Translating",
            Self::Translated => "Translated",
            Self::TranslationFailed => "Translation Failed",
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Mutable record for one translation session
pub struct SessionState {
    /// Current lifecycle phase
    pub phase: SessionPhase,

    /// True once the engine reported availability. Set only by the readiness
    /// poll; never regresses to false.
    pub engine_ready: bool,

    /// True when the current attempt has concluded (success or failure)
    pub finished: bool,

    /// Classification of the most recent failure
    pub error_code: ErrorKind,

    /// Number of readiness polls performed so far
    pub ready_poll_count: u32,

    /// When this session was created (the coordinator's code was injected)
    pub injected_at: Instant,

    /// When the engine capability finished loading
    pub loaded_at: Option<Instant>,

    /// When the engine reported availability
    pub ready_at: Option<Instant>,

    /// When the current attempt was started
    pub start_at: Option<Instant>,

    /// When the current attempt concluded
    pub end_at: Option<Instant>,

    /// One-shot callback fired when readiness is known, success or failure
    pub ready_notifier: Option<Notifier>,

    /// One-shot callback fired when a translation attempt concludes
    pub result_notifier: Option<Notifier>,
}

impl SessionState {
    /// Create the state for a fresh session, stamping `injected_at` now.
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Unloaded,
            engine_ready: false,
            finished: false,
            error_code: ErrorKind::None,
            ready_poll_count: 0,
            injected_at: Instant::now(),
            loaded_at: None,
            ready_at: None,
            start_at: None,
            end_at: None,
            ready_notifier: None,
            result_notifier: None,
        }
    }

    /// Register the ready notifier. No op if already set; the first writer
    /// wins, intentionally.
    pub fn set_ready_notifier(&mut self, notifier: Notifier) {
        if self.ready_notifier.is_none() {
            self.ready_notifier = Some(notifier);
        }
    }

    /// Register the result notifier. No op if already set; the first writer
    /// wins, intentionally.
    pub fn set_result_notifier(&mut self, notifier: Notifier) {
        if self.result_notifier.is_none() {
            self.result_notifier = Some(notifier);
        }
    }

    /// Take the ready notifier for invocation, leaving the slot empty so a
    /// second delivery is impossible.
    pub fn take_ready_notifier(&mut self) -> Option<Notifier> {
        self.ready_notifier.take()
    }

    /// Take the result notifier for invocation, leaving the slot empty so a
    /// second delivery is impossible.
    pub fn take_result_notifier(&mut self) -> Option<Notifier> {
        self.result_notifier.take()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("phase", &self.phase)
            .field("engine_ready", &self.engine_ready)
            .field("finished", &self.finished)
            .field("error_code", &self.error_code)
            .field("ready_poll_count", &self.ready_poll_count)
            .field("ready_notifier", &self.ready_notifier.is_some())
            .field("result_notifier", &self.result_notifier.is_some())
            .finish_non_exhaustive()
    }
}
