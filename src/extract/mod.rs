//! Transcript-to-event extraction pipeline.
//!
//! Turns loosely structured spoken fragments ("at 5 pm tomorrow") into a
//! fully qualified, timezone-aware event. The pipeline:
//!
//! 1. **mention**: split out the event name, locate date/time entities
//! 2. **relative**: resolve "tomorrow" against a reference date
//! 3. **normalize**: convert "5 pm" phrasing to a 24-hour clock
//! 4. **assemble**: combine, parse, localize, attach the fixed duration
//!
//! Every step is pure apart from the caller-supplied reference date;
//! the assembler reports failures as typed [`ExtractionError`] values
//! rather than panicking.

pub mod assemble;
pub mod entities;
pub mod instant;
pub mod mention;
pub mod normalize;
pub mod relative;

// Re-export key types
pub use assemble::{assemble, ExtractionError};
pub use entities::{EntityKind, EntityRecognizer, EntitySpan, RuleBasedRecognizer};
pub use instant::parse_instant;
pub use mention::extract;
pub use normalize::to_24h;
pub use relative::{resolve_date, strip_relative_time};
