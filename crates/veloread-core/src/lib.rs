//! Platform-independent RSVP playback engine.
//!
//! The crate owns everything between raw token delivery and rendered
//! output: per-token pacing weights, monosyllable grouping, display
//! window computation, the tick-driven pacing scheduler, and the
//! cursor/checkpoint machinery that makes a reading position survive
//! pause, reload, and page jumps. Document ingestion and durable
//! storage stay behind the traits in [`source`].

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod app;
pub mod document;
pub mod grouping;
pub mod lexical;
pub mod progress;
pub mod render;
pub mod source;
pub mod window;
