//! Lexicube Transport Glue
//!
//! The resolver core in `lexicube-chain` consumes parsed proximity
//! tuples and produces candidate words. This crate owns everything on
//! either side of that boundary:
//!
//! - [`wire`] — the `"<CubeId>:<TagId>"` report form the physical
//!   transport delivers
//! - [`display`] — outbound per-cube display commands: letters, chain
//!   border annotations, and guess feedback colors
//! - [`pipeline`] — the single worker task that owns the resolver and
//!   debouncer, so every report is processed to completion before the
//!   next is read

pub mod display;
pub mod pipeline;
pub mod wire;

pub use display::{
    border_annotations, border_commands, load_rack, outcome_commands, BorderGlyph, CubeCommand,
    GuessOutcome,
};
pub use pipeline::{Announcement, WordPipeline};
pub use wire::{parse_report, ProximityEvent, WireError};
