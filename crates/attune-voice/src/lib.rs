//! ATTUNE Voice - Acoustic feature extraction
//!
//! This is NOT a speech codec and NOT a speech recognizer.
//! It reduces a chunk of voice audio to three prosodic scalars.
//!
//! # Philosophy
//!
//! Downstream affect classification needs very little from the signal:
//! - Pitch (fundamental frequency, Hz) via autocorrelation
//! - Energy (RMS loudness, 0-1) against a reference speech level
//! - Tempo (speaking-rate ratio) via zero-crossing rate
//!
//! Extraction is stateless and total: malformed, empty, or silent input
//! degrades to documented baseline values, never to an error. Smoothing
//! lives in a caller-held [`FeatureWindow`] over the last ten chunks.

pub mod extract;
pub mod window;

pub use extract::*;
pub use window::*;
