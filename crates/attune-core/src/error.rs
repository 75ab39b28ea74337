//! Error types for ATTUNE
//!
//! The error surface is deliberately small. Malformed audio, silent chunks,
//! and implausible estimates degrade to documented baselines instead of
//! erroring; the hard failures below exist only where silently reinterpreting
//! input would corrupt a session.

use thiserror::Error;

/// Core ATTUNE errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttuneError {
    // Snapshot errors
    #[error("Unknown phase name: {0}")]
    UnknownPhase(String),

    #[error("Unknown emotion name: {0}")]
    UnknownEmotion(String),

    #[error("Unknown goal kind: {0}")]
    UnknownGoalKind(String),

    // Registry errors
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Session already registered: {0}")]
    SessionExists(String),
}

/// Result type for ATTUNE operations
pub type AttuneResult<T> = Result<T, AttuneError>;
