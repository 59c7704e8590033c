//! Core types for the astrocal pipeline.
//!
//! This crate provides everything between the raw feed payload and the final
//! .ics bytes:
//! - `feed` for decoding the museum API's monthly JSON payloads
//! - `normalize` for resolving raw records into phenomenon events
//! - `ics` for rendering the collected events as one calendar document
//!
//! It performs no I/O; fetching and publishing live in the astrocal binary.

pub mod error;
pub mod event;
pub mod feed;
pub mod ics;
pub mod normalize;

// Re-export all event types at crate root for convenience
pub use event::*;
