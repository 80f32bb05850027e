//! Length-bounded chunking of encoded items.
//!
//! Packs an ordered list of tags into the fewest consecutive chunks whose
//! encoded length, plus a fixed overhead and a fixed trailing suffix, stays
//! within a character limit.

pub mod slicer;

pub use slicer::{Chunk, ChunkBudget, Chunker};
