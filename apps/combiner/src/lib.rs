//! Combines a list of game commands into as few summon commands as fit in a
//! single command block.
//!
//! The pieces, leaves first:
//! - [`nbt`] encodes structured tag trees as compact text.
//! - [`curve`] walks a 3-D grid along a snake path.
//! - [`chunker`] packs encoded items into length-bounded chunks.
//! - [`layout`] builds the command block grid and fills it.
//! - [`combiner`] ties them together into the output command stream.

pub mod chunker;
pub mod combiner;
pub mod curve;
pub mod errors;
pub mod input;
pub mod layout;
pub mod nbt;

pub use combiner::{combine, CombineOptions, Combined, COMMAND_BLOCK_TEXT_LIMIT};
pub use errors::{CombinerError, Result};
