//! ATTUNE Test Harness - Synthetic audio and full-session scenarios
//!
//! This crate provides:
//! - Deterministic signal generators (tones, noise, silence)
//! - Speech surrogates with known classifier outcomes
//! - A scenario harness driving sensor and engine on one manual clock
//! - End-to-end session integration testing

pub mod signal;
pub mod scenario;

pub use signal::*;
pub use scenario::*;
