//! ATTUNE Core - Fundamental types and primitives
//!
//! This crate defines the core types shared across the ATTUNE workspace:
//! - Affect primitives (EmotionType, EmotionState, feature vectors)
//! - Time primitives (SessionTime) and the injectable Clock capability
//! - Error types

pub mod emotion;
pub mod error;
pub mod time;

pub use emotion::*;
pub use error::*;
pub use time::*;
