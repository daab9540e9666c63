/*!
 * Tests for coordinator configuration
 */

use anyhow::Result;
use std::time::Duration;
use tempfile::TempDir;
use translate_agent::app_config::{CoordinatorConfig, LogLevel};

/// Test default configuration values
#[test]
fn test_default_config_withNoOverrides_shouldUseDocumentedDefaults() {
    let config = CoordinatorConfig::default();
    assert_eq!(config.poll_interval_ms, 100);
    assert_eq!(config.max_poll_retries, 6);
    assert_eq!(config.source_language, "auto");
    assert_eq!(config.target_language, "en");
    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.poll_interval(), Duration::from_millis(100));
}

/// Test that defaults validate cleanly
#[test]
fn test_validate_withDefaultConfig_shouldSucceed() {
    let config = CoordinatorConfig::default();
    assert!(config.validate().is_ok());
}

/// Test validation of a zero poll interval
#[test]
fn test_validate_withZeroPollInterval_shouldFail() {
    let config = CoordinatorConfig {
        poll_interval_ms: 0,
        ..CoordinatorConfig::default()
    };
    assert!(config.validate().is_err());
}

/// Test validation of empty language identifiers
#[test]
fn test_validate_withEmptyLanguages_shouldFail() {
    let config = CoordinatorConfig {
        source_language: String::new(),
        ..CoordinatorConfig::default()
    };
    assert!(config.validate().is_err());

    let config = CoordinatorConfig {
        target_language: String::new(),
        ..CoordinatorConfig::default()
    };
    assert!(config.validate().is_err());
}

/// Test that the detection sentinel is rejected as a target
#[test]
fn test_validate_withAutoTargetLanguage_shouldFail() {
    let config = CoordinatorConfig {
        target_language: "auto".to_string(),
        ..CoordinatorConfig::default()
    };
    assert!(config.validate().is_err());
}

/// Test save and reload round trip
#[test]
fn test_config_file_withSaveThenLoad_shouldRoundTrip() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("conf.json");

    let config = CoordinatorConfig {
        poll_interval_ms: 50,
        max_poll_retries: 3,
        source_language: "fr".to_string(),
        target_language: "de".to_string(),
        log_level: LogLevel::Debug,
    };
    config.save_to_file(&path)?;

    let loaded = CoordinatorConfig::from_file(&path)?;
    assert_eq!(loaded, config);
    Ok(())
}

/// Test loading a missing config file
#[test]
fn test_from_file_withMissingFile_shouldFail() {
    let result = CoordinatorConfig::from_file("/nonexistent/conf.json");
    assert!(result.is_err());
}

/// Test that an invalid config file fails validation on load
#[test]
fn test_from_file_withInvalidConfig_shouldFail() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("conf.json");
    std::fs::write(&path, r#"{"poll_interval_ms": 0}"#)?;

    assert!(CoordinatorConfig::from_file(&path).is_err());
    Ok(())
}

/// Test that missing fields fall back to serde defaults
#[test]
fn test_deserialize_withEmptyObject_shouldFillDefaults() -> Result<()> {
    let config: CoordinatorConfig = serde_json::from_str("{}")?;
    assert_eq!(config, CoordinatorConfig::default());
    Ok(())
}

/// Test log level conversion to the log crate's filter
#[test]
fn test_log_level_withEachVariant_shouldMapToLevelFilter() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::Info.to_level_filter(), log::LevelFilter::Info);
    assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
