/*!
 * Tests for the engine seam types and the mock engine
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_test::assert_ok;

use translate_agent::engine::mock::MockEngine;
use translate_agent::engine::{
    EngineErrorSignal, ProgressCallback, ProgressReport, TranslationEngine,
};
use translate_agent::errors::{EngineError, ErrorKind};

fn noop_progress() -> ProgressCallback {
    Arc::new(|_| {})
}

/// Test the legacy boolean error shape
#[test]
fn test_error_signal_withLegacyBoolean_shouldMapTrueToTranslationError() {
    assert_eq!(EngineErrorSignal::Legacy(false).to_error_kind(), None);
    assert_eq!(
        EngineErrorSignal::Legacy(true).to_error_kind(),
        Some(ErrorKind::TranslationError)
    );
}

/// Test the numeric error code shape
#[test]
fn test_error_signal_withNumericCodes_shouldUseFixedLookup() {
    assert_eq!(EngineErrorSignal::Code(0).to_error_kind(), None);
    assert_eq!(
        EngineErrorSignal::Code(1).to_error_kind(),
        Some(ErrorKind::TranslationError)
    );
    assert_eq!(
        EngineErrorSignal::Code(2).to_error_kind(),
        Some(ErrorKind::UnsupportedLanguage)
    );
}

/// Test that undefined nonzero codes collapse to the generic failure
#[test]
fn test_error_signal_withUnknownNonzeroCode_shouldMapToTranslationError() {
    assert_eq!(
        EngineErrorSignal::Code(3).to_error_kind(),
        Some(ErrorKind::TranslationError)
    );
    assert_eq!(
        EngineErrorSignal::Code(99).to_error_kind(),
        Some(ErrorKind::TranslationError)
    );
}

/// Test progress report constructors
#[test]
fn test_progress_report_withConstructors_shouldSetFields() {
    let report = ProgressReport::finished();
    assert!(report.finished);
    assert_eq!(report.progress, 1.0);
    assert_eq!(report.error_kind(), None);

    let report = ProgressReport::partial(0.4);
    assert!(!report.finished);
    assert_eq!(report.progress, 0.4);
    assert_eq!(report.error_kind(), None);

    let report = ProgressReport::failed(EngineErrorSignal::Code(2));
    assert!(!report.finished);
    assert_eq!(report.error_kind(), Some(ErrorKind::UnsupportedLanguage));
}

/// Test availability behavior of the delayed-ready mock
#[test]
fn test_mock_engine_withReadyAfterChecks_shouldBecomeAvailable() {
    let engine = MockEngine::ready_after(2);
    assert!(!engine.is_available());
    assert!(!engine.is_available());
    assert!(engine.is_available());
    assert_eq!(engine.availability_checks(), 3);
}

/// Test availability behavior of the never-ready mock
#[test]
fn test_mock_engine_withNeverReady_shouldStayUnavailable() {
    let engine = MockEngine::never_ready();
    for _ in 0..10 {
        assert!(!engine.is_available());
    }
    assert_eq!(engine.availability_checks(), 10);
}

/// Test request capture on accepted translations
#[tokio::test]
async fn test_mock_engine_withAcceptedTranslate_shouldCaptureRequestAndCallback() {
    let engine = MockEngine::ready();
    let accepted = engine
        .translate_page("auto", "en", noop_progress())
        .await;
    assert_ok!(accepted);
    assert_eq!(
        engine.last_request(),
        Some(("auto".to_string(), "en".to_string()))
    );

    // The captured callback is live and drivable.
    engine.emit(ProgressReport::partial(0.5));
}

/// Test synchronous rejection behavior
#[tokio::test]
async fn test_mock_engine_withRejectingBehavior_shouldFailInvocation() {
    let engine = MockEngine::rejecting("boom");
    let result = engine.translate_page("auto", "en", noop_progress()).await;
    assert!(matches!(result, Err(EngineError::InvocationFailed(msg)) if msg == "boom"));
}

/// Test scripted report emission
#[tokio::test]
async fn test_mock_engine_withScriptedReports_shouldEmitSynchronously() {
    let reports = vec![ProgressReport::partial(0.5), ProgressReport::finished()];
    let engine = MockEngine::with_reports(reports);

    let seen = Arc::new(AtomicUsize::new(0));
    let seen_clone = Arc::clone(&seen);
    let callback: ProgressCallback = Arc::new(move |_| {
        seen_clone.fetch_add(1, Ordering::SeqCst);
    });

    engine
        .translate_page("auto", "en", callback)
        .await
        .unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 2);
}

/// Test restore call recording
#[test]
fn test_mock_engine_withRestoreCalls_shouldCountThem() {
    let engine = MockEngine::ready();
    assert_eq!(engine.restore_calls(), 0);
    engine.restore();
    engine.restore();
    assert_eq!(engine.restore_calls(), 2);
}

/// Test detection capability configuration
#[test]
fn test_mock_engine_withDetectedLanguage_shouldReportIt() {
    let engine = MockEngine::ready();
    assert_eq!(engine.detected_language(), None);

    let engine = MockEngine::ready().with_detected_language("ja");
    assert_eq!(engine.detected_language(), Some("ja".to_string()));
}
