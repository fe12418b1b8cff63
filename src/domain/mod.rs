//! Domain types for the voxcal pipeline.
//!
//! This module contains the core data structures:
//! - EventMention: unvalidated fragments pulled from a transcript
//! - EventSpec: a fully qualified, timezone-aware event
//! - CreatedEvent: the remote calendar's confirmation

pub mod event;

// Re-export commonly used types
pub use event::{CreatedEvent, EventMention, EventSpec};
