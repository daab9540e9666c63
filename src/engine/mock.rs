/*!
 * Mock engine implementation for testing.
 *
 * This module provides a mock translation engine that simulates the behaviors
 * the coordinator has to cope with:
 * - `MockEngine::ready()` - available from the first poll
 * - `MockEngine::ready_after(n)` - becomes available after n failed polls
 * - `MockEngine::never_ready()` - never becomes available
 * - `MockEngine::rejecting(..)` - fails every translate invocation
 * - `MockEngine::with_reports(..)` - emits scripted progress reports
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::engine::{ProgressCallback, ProgressReport, TranslationEngine};
use crate::errors::EngineError;

/// Availability behavior for the mock engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReadyBehavior {
    /// Available from the first check
    Immediately,
    /// Unavailable for the first n checks, available afterwards
    AfterChecks(usize),
    /// Never becomes available
    Never,
}

/// Translate behavior for the mock engine
#[derive(Debug, Clone)]
pub enum TranslateBehavior {
    /// Accept the request and hold the progress callback for the test to drive
    Accept,
    /// Accept the request and synchronously emit the scripted reports
    Reports(Vec<ProgressReport>),
    /// Fail the invocation with the given message
    Reject(String),
}

/// Mock translation engine for testing coordinator behavior
pub struct MockEngine {
    /// Availability behavior
    ready: ReadyBehavior,
    /// Translate behavior
    translate: TranslateBehavior,
    /// Detected language reported after a successful translation
    detected: Option<String>,
    /// Number of availability checks performed
    availability_checks: AtomicUsize,
    /// Number of restore calls performed
    restore_calls: AtomicUsize,
    /// Last (source, target) pair passed to translate_page
    last_request: Mutex<Option<(String, String)>>,
    /// Progress callback captured from the last accepted request
    captured_progress: Mutex<Option<ProgressCallback>>,
}

impl std::fmt::Debug for MockEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockEngine")
            .field("ready", &self.ready)
            .field("translate", &self.translate)
            .field("detected", &self.detected)
            .finish_non_exhaustive()
    }
}

impl MockEngine {
    /// Create a mock engine with the specified behaviors
    pub fn new(ready: ReadyBehavior, translate: TranslateBehavior) -> Self {
        Self {
            ready,
            translate,
            detected: None,
            availability_checks: AtomicUsize::new(0),
            restore_calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            captured_progress: Mutex::new(None),
        }
    }

    /// Create a mock engine that is available from the first poll
    pub fn ready() -> Self {
        Self::new(ReadyBehavior::Immediately, TranslateBehavior::Accept)
    }

    /// Create a mock engine that becomes available after n failed polls
    pub fn ready_after(checks: usize) -> Self {
        Self::new(ReadyBehavior::AfterChecks(checks), TranslateBehavior::Accept)
    }

    /// Create a mock engine that never becomes available
    pub fn never_ready() -> Self {
        Self::new(ReadyBehavior::Never, TranslateBehavior::Accept)
    }

    /// Create a ready mock engine that fails every translate invocation
    pub fn rejecting(message: &str) -> Self {
        Self::new(
            ReadyBehavior::Immediately,
            TranslateBehavior::Reject(message.to_string()),
        )
    }

    /// Create a ready mock engine that emits the scripted reports on translate
    pub fn with_reports(reports: Vec<ProgressReport>) -> Self {
        Self::new(ReadyBehavior::Immediately, TranslateBehavior::Reports(reports))
    }

    /// Set the detected language the engine reports
    pub fn with_detected_language(mut self, lang: &str) -> Self {
        self.detected = Some(lang.to_string());
        self
    }

    /// Number of availability checks performed so far
    pub fn availability_checks(&self) -> usize {
        self.availability_checks.load(Ordering::SeqCst)
    }

    /// Number of restore calls performed so far
    pub fn restore_calls(&self) -> usize {
        self.restore_calls.load(Ordering::SeqCst)
    }

    /// Last (source, target) pair passed to translate_page
    pub fn last_request(&self) -> Option<(String, String)> {
        self.last_request.lock().clone()
    }

    /// Drive the captured progress callback with a report.
    ///
    /// Panics if no request was accepted yet - tests should only emit after a
    /// successful translate_page.
    pub fn emit(&self, report: ProgressReport) {
        let callback = self
            .captured_progress
            .lock()
            .clone()
            .expect("no progress callback captured");
        callback(report);
    }
}

#[async_trait]
impl TranslationEngine for MockEngine {
    fn is_available(&self) -> bool {
        let checks_so_far = self.availability_checks.fetch_add(1, Ordering::SeqCst);
        match self.ready {
            ReadyBehavior::Immediately => true,
            ReadyBehavior::AfterChecks(n) => checks_so_far >= n,
            ReadyBehavior::Never => false,
        }
    }

    async fn translate_page(
        &self,
        source_lang: &str,
        target_lang: &str,
        on_progress: ProgressCallback,
    ) -> Result<(), EngineError> {
        *self.last_request.lock() = Some((source_lang.to_string(), target_lang.to_string()));

        match &self.translate {
            TranslateBehavior::Accept => {
                *self.captured_progress.lock() = Some(on_progress);
                Ok(())
            }
            TranslateBehavior::Reports(reports) => {
                for report in reports {
                    on_progress(*report);
                }
                Ok(())
            }
            TranslateBehavior::Reject(message) => {
                Err(EngineError::InvocationFailed(message.clone()))
            }
        }
    }

    fn restore(&self) {
        self.restore_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn detected_language(&self) -> Option<String> {
        self.detected.clone()
    }
}
