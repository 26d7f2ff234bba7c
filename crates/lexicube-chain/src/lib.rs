//! Lexicube Chain Resolution
//!
//! Each physical cube periodically reports the tag id of whichever cube
//! currently sits to its right (or reports nothing when no cube is
//! adjacent). This crate turns that noisy, unordered, per-cube stream
//! into ordered candidate words, while tolerating stale messages,
//! duplicate delivery, self-reference, and transient inconsistency.
//!
//! # Structure
//!
//! - [`AdjacencyGraph`] — the mutable "who is immediately left of whom"
//!   relation, a plain edge map with at most one outgoing edge per cube
//! - [`ChainResolver`] — the single mutating entry point: one proximity
//!   report in, the full current candidate word set out
//! - [`GuessDebouncer`] — a timed gate that keeps a statically arranged
//!   rack from re-firing the same guess on every redundant sensor read
//!
//! # Failure semantics
//!
//! Unknown tags, self-referential reports, cycles, and runaway walks
//! are routine consequences of noisy physical sensing. None of them
//! raise an error; all degrade to an empty candidate list, which reads
//! downstream as "no confident candidate is currently assemblable" and
//! never as "nothing is adjacent".

mod debounce;
mod graph;
mod resolver;

pub use debounce::{GuessDebouncer, DEFAULT_DEBOUNCE_WINDOW};
pub use graph::AdjacencyGraph;
pub use resolver::{ChainResolver, ResolverConfig, UnknownTagPolicy, Word, DEFAULT_MAX_SLOTS};
