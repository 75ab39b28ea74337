//! ATTUNE Session - The R2C2 conversation state machine
//!
//! Drives a four-phase coaching conversation (Relationship, Reaction,
//! Content, Coaching) over 360-degree feedback. Transitions combine elapsed
//! time floors and ceilings with emotional readiness derived from the voice
//! pipeline in `attune-emotion`.
//!
//! # Philosophy
//!
//! The engine is a synchronous, single-writer core. It never spawns work,
//! never performs I/O, and reads time only through the injected clock, so a
//! whole session can be driven deterministically in a test. One
//! [`SessionEngine`] owns one [`ConversationState`]; the owning runtime
//! serializes access per session, typically through a [`SessionRegistry`].

pub mod engine;
pub mod extract;
pub mod feedback;
pub mod phase;
pub mod prompts;
pub mod registry;
pub mod snapshot;
pub mod state;
pub mod summary;

pub use engine::*;
pub use extract::*;
pub use feedback::*;
pub use phase::*;
pub use prompts::*;
pub use registry::*;
pub use snapshot::*;
pub use state::*;
pub use summary::*;
