/*!
 * Translation coordinator for the in-page session lifecycle.
 *
 * This module handles:
 * - Engine load notifications from the external resource loader
 * - Bounded readiness polling against the engine capability
 * - Starting translations and tracking their progress reports
 * - Error classification and one-shot notifier delivery
 */

use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::app_config::CoordinatorConfig;
use crate::engine::{ProgressCallback, ProgressReport, TranslationEngine};
use crate::errors::{CoordinatorError, ErrorKind};
use crate::session::models::{SessionSnapshot, TranslateCommand};
use crate::session::state::{Notifier, SessionPhase, SessionState};

/// Outcome of a single readiness poll step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The engine reported availability
    Ready,
    /// The engine is not available yet; another poll should follow
    Retry,
    /// The retry budget is exhausted; the session failed to load
    TimedOut,
}

/// Coordinator for one in-page translation session.
///
/// Mediates between the extension caller and the opaque engine capability.
/// The coordinator is the sole mutator of the session state and the sole
/// caller into the engine; clones share the same session.
#[derive(Clone)]
pub struct TranslationCoordinator {
    /// The engine capability, injected by the external loader
    engine: Arc<dyn TranslationEngine>,
    /// Polling and language configuration
    config: CoordinatorConfig,
    /// Session state, confined behind one mutex
    state: Arc<Mutex<SessionState>>,
}

impl TranslationCoordinator {
    /// Create a coordinator for a fresh session driving the given engine.
    ///
    /// Stamps the session's injection time now.
    pub fn new(engine: Arc<dyn TranslationEngine>, config: CoordinatorConfig) -> Self {
        Self {
            engine,
            config,
            state: Arc::new(Mutex::new(SessionState::new())),
        }
    }

    /// Create a coordinator with the default configuration
    pub fn with_defaults(engine: Arc<dyn TranslationEngine>) -> Self {
        Self::new(engine, CoordinatorConfig::default())
    }

    /// Get the configuration in use
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    // =========================================================================
    // Load lifecycle
    // =========================================================================

    /// Called by the resource loader once the engine capability exists.
    ///
    /// Records the load time and begins the readiness poll loop on the
    /// current tokio runtime. A second call is ignored.
    pub fn on_engine_constructed(&self) {
        {
            let mut state = self.state.lock();
            if state.phase != SessionPhase::Unloaded {
                warn!("Engine load reported in phase {}; ignoring", state.phase);
                return;
            }
            state.loaded_at = Some(Instant::now());
            state.phase = SessionPhase::Loading;
        }
        debug!("Engine constructed, starting readiness poll");

        let coordinator = self.clone();
        tokio::spawn(async move {
            coordinator.run_readiness_poll().await;
        });
    }

    /// Called by the resource loader when engine construction failed.
    ///
    /// The session ends in `LoadFailed` with `InitializationError` and the
    /// ready notifier fires instead of any polling.
    pub fn on_engine_construction_failed(&self) {
        let notifier = {
            let mut state = self.state.lock();
            if state.phase != SessionPhase::Unloaded && state.phase != SessionPhase::Loading {
                warn!(
                    "Engine construction failure reported in phase {}; ignoring",
                    state.phase
                );
                return;
            }
            state.loaded_at = Some(Instant::now());
            state.error_code = ErrorKind::InitializationError;
            state.phase = SessionPhase::LoadFailed;
            state.take_ready_notifier()
        };

        error!("Engine construction failed");
        if let Some(notify) = notifier {
            notify();
        }
    }

    /// Called when a script executing the engine raised an unhandled error.
    ///
    /// Classified as `UnexpectedScriptError`; the ready notifier fires so the
    /// caller learns the load outcome.
    pub fn on_engine_script_error(&self) {
        let notifier = {
            let mut state = self.state.lock();
            state.error_code = ErrorKind::UnexpectedScriptError;
            if state.phase == SessionPhase::Unloaded || state.phase == SessionPhase::Loading {
                state.phase = SessionPhase::LoadFailed;
            }
            state.take_ready_notifier()
        };

        error!("Engine script raised an unhandled error");
        if let Some(notify) = notifier {
            notify();
        }
    }

    // =========================================================================
    // Readiness polling
    // =========================================================================

    /// Perform one readiness poll step.
    ///
    /// Driven by `run_readiness_poll`; exposed for callers that schedule the
    /// retries themselves. Once the poll has reached a terminal outcome,
    /// further calls are no-ops returning that outcome, so the loop cannot
    /// re-enter and `engine_ready` never regresses.
    pub fn poll_readiness(&self) -> PollOutcome {
        let mut state = self.state.lock();

        if state.phase != SessionPhase::Loading {
            return if state.engine_ready {
                PollOutcome::Ready
            } else {
                PollOutcome::TimedOut
            };
        }

        if self.engine.is_available() {
            state.ready_at = Some(Instant::now());
            state.engine_ready = true;
            state.phase = SessionPhase::Ready;
            let notifier = state.take_ready_notifier();
            drop(state);

            info!("Engine ready");
            if let Some(notify) = notifier {
                notify();
            }
            return PollOutcome::Ready;
        }

        if state.ready_poll_count >= self.config.max_poll_retries {
            state.error_code = ErrorKind::TranslationTimeout;
            state.phase = SessionPhase::LoadFailed;
            let notifier = state.take_ready_notifier();
            drop(state);

            warn!(
                "Engine not ready after {} polls, giving up",
                self.config.max_poll_retries
            );
            if let Some(notify) = notifier {
                notify();
            }
            return PollOutcome::TimedOut;
        }

        state.ready_poll_count += 1;
        PollOutcome::Retry
    }

    /// Drive `poll_readiness` until it reaches a terminal outcome, sleeping
    /// for the configured interval between retries.
    pub async fn run_readiness_poll(&self) {
        loop {
            match self.poll_readiness() {
                PollOutcome::Retry => tokio::time::sleep(self.config.poll_interval()).await,
                PollOutcome::Ready | PollOutcome::TimedOut => return,
            }
        }
    }

    // =========================================================================
    // Notifier registration
    // =========================================================================

    /// Register the callback fired once when readiness is known, success or
    /// failure. No op if one is already registered; the first writer wins.
    pub fn set_ready_notifier(&self, notifier: Notifier) {
        self.state.lock().set_ready_notifier(notifier);
    }

    /// Register the callback fired once when a translation attempt concludes.
    /// No op if one is already registered; the first writer wins.
    pub fn set_result_notifier(&self, notifier: Notifier) {
        self.state.lock().set_result_notifier(notifier);
    }

    // =========================================================================
    // Translation
    // =========================================================================

    /// Translate the page contents.
    ///
    /// Translation is asynchronous: `Ok(true)` only means the engine accepted
    /// the request, and completion is observed through the result notifier
    /// and the `finished`/`error_code` accessors.
    ///
    /// Returns `Ok(false)` without contacting the engine when it is not
    /// ready, and `Err(AttemptInProgress)` while a previous attempt has not
    /// concluded.
    pub async fn translate(
        &self,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<bool, CoordinatorError> {
        if source_lang.is_empty() || target_lang.is_empty() {
            warn!("translate called with an empty language identifier");
            return Ok(false);
        }

        {
            let mut state = self.state.lock();
            if state.phase == SessionPhase::Translating {
                return Err(CoordinatorError::AttemptInProgress);
            }

            state.finished = false;
            state.error_code = ErrorKind::None;

            if !state.engine_ready {
                debug!("translate requested before the engine became ready");
                return Ok(false);
            }

            state.start_at = Some(Instant::now());
            state.phase = SessionPhase::Translating;
        }

        info!("Translating page: {} -> {}", source_lang, target_lang);

        let coordinator = self.clone();
        let on_progress: ProgressCallback =
            Arc::new(move |report| coordinator.on_progress(report));

        match self
            .engine
            .translate_page(source_lang, target_lang, on_progress)
            .await
        {
            Ok(()) => Ok(true),
            Err(err) => {
                error!("Translate: {}", err);
                let notifier = {
                    let mut state = self.state.lock();
                    state.error_code = ErrorKind::UnexpectedScriptError;
                    if state.phase == SessionPhase::Translating {
                        state.phase = SessionPhase::TranslationFailed;
                    }
                    state.take_result_notifier()
                };
                if let Some(notify) = notifier {
                    notify();
                }
                Ok(false)
            }
        }
    }

    /// The single externally invoked entry point per user action.
    ///
    /// Defaults the source language to the "auto" detection sentinel when the
    /// caller does not name one.
    pub async fn request_translate(
        &self,
        target_lang: &str,
        source_lang: Option<&str>,
    ) -> Result<bool, CoordinatorError> {
        self.translate(source_lang.unwrap_or("auto"), target_lang)
            .await
    }

    /// Handle a translate command relayed by the messaging transport
    pub async fn handle_command(
        &self,
        command: &TranslateCommand,
    ) -> Result<bool, CoordinatorError> {
        debug!("Handling translate command: {}", command);
        self.translate(&command.source_language, &command.target_language)
            .await
    }

    /// Progress callback handed to the engine; invoked zero or more times per
    /// translation attempt.
    ///
    /// The engine may translate incrementally as the user scrolls content
    /// into view, producing many non-final reports, or all at once with a
    /// single final report. Either way the result notifier is delivered at
    /// most once per attempt, since taking it empties the slot.
    fn on_progress(&self, report: ProgressReport) {
        debug!(
            "Translation progress: {:.0}% finished={}",
            report.progress * 100.0,
            report.finished
        );

        let (failed, notifier) = {
            let mut state = self.state.lock();
            state.finished = report.finished;

            let mut notifier: Option<Notifier> = None;
            let failed = match report.error_kind() {
                Some(kind) => {
                    state.error_code = kind;
                    if state.phase == SessionPhase::Translating {
                        state.phase = SessionPhase::TranslationFailed;
                    }
                    notifier = state.take_result_notifier();
                    true
                }
                None => false,
            };

            if state.finished {
                state.end_at = Some(Instant::now());
                if state.phase == SessionPhase::Translating {
                    state.phase = if state.error_code == ErrorKind::None {
                        SessionPhase::Translated
                    } else {
                        SessionPhase::TranslationFailed
                    };
                }
                if notifier.is_none() {
                    notifier = state.take_result_notifier();
                }
            }

            (failed, notifier)
        };

        if failed {
            // Restore so the page is left in a consistent state.
            warn!("Translation failed: {}", self.error_code());
            self.engine.restore();
        }

        if let Some(notify) = notifier {
            notify();
        }
    }

    /// Revert the page contents to their original value, effectively undoing
    /// any performed translation. Delegates to the engine, which no-ops if
    /// the page was not translated.
    pub fn revert(&self) {
        debug!("Reverting page to original content");
        self.engine.restore();
    }

    // =========================================================================
    // Accessors and derived values
    // =========================================================================

    /// Current lifecycle phase
    pub fn phase(&self) -> SessionPhase {
        self.state.lock().phase
    }

    /// Whether the engine reported availability
    pub fn is_ready(&self) -> bool {
        self.state.lock().engine_ready
    }

    /// Whether the current translation attempt has concluded
    pub fn is_finished(&self) -> bool {
        self.state.lock().finished
    }

    /// Whether an error is active
    pub fn error(&self) -> bool {
        self.state.lock().error_code.is_error()
    }

    /// Classification of the most recent failure
    pub fn error_code(&self) -> ErrorKind {
        self.state.lock().error_code
    }

    /// Readiness polls performed so far
    pub fn ready_poll_count(&self) -> u32 {
        self.state.lock().ready_poll_count
    }

    /// The language the translated page was in.
    ///
    /// Valid only after a successful translation; `Some("und")` when the
    /// engine lacks detection capability, `None` otherwise.
    pub fn detected_source_language(&self) -> Option<String> {
        {
            let state = self.state.lock();
            if !state.engine_ready
                || !state.finished
                || state.error_code != ErrorKind::None
            {
                return None;
            }
        }
        Some(
            self.engine
                .detected_language()
                .unwrap_or_else(|| "und".to_string()),
        )
    }

    /// Time from injection to the engine capability being loaded; zero until
    /// the load completes.
    pub fn load_time(&self) -> Duration {
        let state = self.state.lock();
        match state.loaded_at {
            Some(loaded_at) => loaded_at.duration_since(state.injected_at),
            None => Duration::ZERO,
        }
    }

    /// Time from injection to the engine being ready; zero until then.
    pub fn ready_time(&self) -> Duration {
        let state = self.state.lock();
        if !state.engine_ready {
            return Duration::ZERO;
        }
        match state.ready_at {
            Some(ready_at) => ready_at.duration_since(state.injected_at),
            None => Duration::ZERO,
        }
    }

    /// Time spent performing the current translation; zero until it finishes.
    pub fn translation_time(&self) -> Duration {
        let state = self.state.lock();
        if !state.finished {
            return Duration::ZERO;
        }
        match (state.start_at, state.end_at) {
            (Some(start_at), Some(end_at)) => end_at.duration_since(start_at),
            _ => Duration::ZERO,
        }
    }

    /// Serializable view of the session for the extension UI
    pub fn snapshot(&self) -> SessionSnapshot {
        let detected_source_language = self.detected_source_language();
        let load_time_ms = self.load_time().as_millis() as u64;
        let ready_time_ms = self.ready_time().as_millis() as u64;
        let translation_time_ms = self.translation_time().as_millis() as u64;

        let state = self.state.lock();
        SessionSnapshot {
            phase: state.phase,
            engine_ready: state.engine_ready,
            finished: state.finished,
            error: state.error_code.is_error(),
            error_code: state.error_code,
            ready_poll_count: state.ready_poll_count,
            load_time_ms,
            ready_time_ms,
            translation_time_ms,
            detected_source_language,
        }
    }
}

impl std::fmt::Debug for TranslationCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationCoordinator")
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}
