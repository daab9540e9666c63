/*!
 * The seam to the external translation engine.
 *
 * The engine is an opaque third-party capability constructed by an external
 * loader; the coordinator only drives it through this trait:
 * - `is_available`: whether the engine finished its own internal startup
 * - `translate_page`: start an asynchronous page translation
 * - `restore`: put the page back in its original, untranslated state
 * - `detected_language`: source-language detection, where supported
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::errors::{EngineError, ErrorKind};

pub mod mock;

/// Callback handed to the engine for progress delivery.
///
/// The engine may invoke it zero or more times per translation: incrementally
/// as content scrolls into view, or once with the final report when the whole
/// page is translated in one pass.
pub type ProgressCallback = Arc<dyn Fn(ProgressReport) + Send + Sync>;

/// One engine-originated progress report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressReport {
    /// Fraction of the page translated so far, in `0.0..=1.0`
    pub progress: f64,

    /// Whether this report concludes the translation attempt
    pub finished: bool,

    /// Error signal, absent when the engine has nothing to report
    pub error: Option<EngineErrorSignal>,
}

impl ProgressReport {
    /// A successful final report.
    pub fn finished() -> Self {
        Self {
            progress: 1.0,
            finished: true,
            error: None,
        }
    }

    /// A non-final report at the given fraction.
    pub fn partial(progress: f64) -> Self {
        Self {
            progress,
            finished: false,
            error: None,
        }
    }

    /// A report carrying an engine error signal.
    pub fn failed(error: EngineErrorSignal) -> Self {
        Self {
            progress: 0.0,
            finished: false,
            error: Some(error),
        }
    }

    /// Map the error signal, if any, to a session error kind.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.and_then(EngineErrorSignal::to_error_kind)
    }
}

/// Error signal carried by a progress report.
///
/// Older engine protocols report failure as a bare boolean; newer ones use a
/// numeric code. Both shapes are accepted; only codes 1 and 2 are defined by
/// the engine protocol, any other nonzero code collapses to the generic
/// translation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineErrorSignal {
    /// Legacy boolean flag, true meaning a generic translation failure
    Legacy(bool),

    /// Numeric engine error code
    Code(u32),
}

impl EngineErrorSignal {
    /// Map the signal to a session error kind; `None` when no error is
    /// actually signaled (legacy `false` or code 0).
    pub fn to_error_kind(self) -> Option<ErrorKind> {
        match self {
            Self::Legacy(false) | Self::Code(0) => None,
            Self::Legacy(true) | Self::Code(1) => Some(ErrorKind::TranslationError),
            Self::Code(2) => Some(ErrorKind::UnsupportedLanguage),
            Self::Code(_) => Some(ErrorKind::TranslationError),
        }
    }
}

/// Common trait for translation engine capabilities
///
/// The coordinator receives an engine at construction and is its sole caller;
/// it never constructs one itself.
#[async_trait]
pub trait TranslationEngine: Send + Sync + Debug {
    /// Whether the engine has finished its own internal startup.
    ///
    /// `translate_page` should only be called once this returns true.
    fn is_available(&self) -> bool;

    /// Start translating the page contents.
    ///
    /// Translation is asynchronous: an `Ok` return only means the engine
    /// accepted the request, and completion is observed through
    /// `on_progress` reports.
    async fn translate_page(
        &self,
        source_lang: &str,
        target_lang: &str,
        on_progress: ProgressCallback,
    ) -> Result<(), EngineError>;

    /// Restore the page contents to their original, untranslated state.
    ///
    /// Expected to no-op if no translation was performed.
    fn restore(&self);

    /// The source language the engine detected, where supported.
    ///
    /// Engines without detection capability return `None`.
    fn detected_language(&self) -> Option<String> {
        None
    }
}
