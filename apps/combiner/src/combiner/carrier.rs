//! Carrier stack — the nested placeholder entities that transport a chunk.
//!
//! With support blocks the stack lands a stone base, a redstone block and an
//! activator rail, separated by fire buffers that break instead of placing.
//! The buffer order is load-bearing: the redstone block has to be buffered by
//! a different fire type than its neighbours. Fire variants are used because
//! they drop no item when they break.

use crate::errors::Result;
use crate::nbt::{encoded_len, Compound, Tag};

const PASSENGERS: &str = "Passengers";

/// Blocks of the support stack, bottom to top.
pub const SUPPORT_STACK: [&str; 9] = [
    "stone",
    "fire",
    "fire",
    "redstone_block",
    "fire",
    "soul_fire",
    "fire",
    "fire",
    "activator_rail",
];

/// Falling-block entity tag. The outermost entity of a summon carries no `id`.
pub fn falling_block(block: Option<&str>, time: Option<i32>, with_id: bool) -> Compound {
    let mut tag = Compound::new();
    if with_id {
        tag.insert("id", "falling_block");
    }
    if let Some(time) = time {
        tag.insert("Time", time);
    }
    if let Some(block) = block {
        tag.insert("BlockState", Compound::new().with("Name", block));
    }
    tag
}

/// Minecart entity that runs `command` once when activated.
pub fn command_minecart(command: &str) -> Tag {
    Compound::new()
        .with("id", "command_block_minecart")
        .with("Command", Tag::quoted(command))
        .into()
}

/// Nested entity stack; each layer rides the one before it.
#[derive(Debug, Clone, PartialEq)]
pub struct Carrier {
    layers: Vec<Compound>,
}

impl Carrier {
    /// `layers` are outermost first.
    pub fn new(layers: Vec<Compound>) -> Self {
        Self { layers }
    }

    /// The full support stack, or a single fire placeholder when support
    /// blocks are already in place.
    pub fn for_support_blocks(support_blocks: bool) -> Self {
        if !support_blocks {
            return Self::new(vec![falling_block(Some("fire"), Some(1), false)]);
        }
        let layers = SUPPORT_STACK
            .iter()
            .enumerate()
            .map(|(i, block)| falling_block(Some(block), Some(1), i > 0))
            .collect();
        Self::new(layers)
    }

    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Nests the layers and hands `payload` to the innermost one.
    pub fn wrap(&self, payload: Vec<Tag>) -> Tag {
        let mut passengers = payload;
        for layer in self.layers.iter().skip(1).rev() {
            let mut entity = layer.clone();
            entity.insert(PASSENGERS, passengers);
            passengers = vec![entity.into()];
        }
        let mut root = self.layers.first().cloned().unwrap_or_default();
        root.insert(PASSENGERS, passengers);
        root.into()
    }

    /// Encoded length of the carrier excluding the innermost payload list's
    /// brackets.
    pub fn wrapper_len(&self) -> Result<usize> {
        Ok(encoded_len(&self.wrap(vec![]))? - 2)
    }
}
