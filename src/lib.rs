/*!
 * # translate-agent
 *
 * A Rust library implementing the translation-session coordinator of an
 * in-page translation extension.
 *
 * ## Features
 *
 * - Lifecycle tracking for a single in-page translation attempt
 * - Bounded readiness polling against an external engine capability
 * - Progress and completion tracking with at-most-once notifier delivery
 * - Error classification with the extension boundary's wire codes
 * - Derived load, ready and translation timings
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `engine`: The seam to the opaque translation engine capability:
 *   - `engine::mock`: Mock engine for testing
 * - `session`: Session state, lifecycle phases and boundary DTOs:
 *   - `session::state`: Mutable session record and phase machine
 *   - `session::models`: Transport command and UI snapshot shapes
 * - `coordinator`: The translation coordinator driving the session
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod coordinator;
pub mod engine;
pub mod errors;
pub mod session;

// Re-export main types for easier usage
pub use app_config::CoordinatorConfig;
pub use coordinator::{PollOutcome, TranslationCoordinator};
pub use engine::{EngineErrorSignal, ProgressCallback, ProgressReport, TranslationEngine};
pub use errors::{CoordinatorError, EngineError, ErrorKind};
pub use session::{SessionPhase, SessionSnapshot, TranslateCommand};
