/*!
 * Session module for in-page translation sessions.
 *
 * This module provides:
 * - The mutable session record and its lifecycle phases
 * - One-shot notifier registration with first-writer-wins semantics
 * - DTOs for the extension boundary
 */

// Allow dead code - session types have extra accessors for library consumers
#![allow(dead_code)]

pub mod models;
pub mod state;

// Re-export main types
pub use models::{SessionSnapshot, TranslateCommand};
pub use state::{Notifier, SessionPhase, SessionState};
