//! Command combining — packs a command list into as few carrier summons as fit.
//!
//! Flow: generate_layout → wrap each command in a minecart → Chunker (with the
//! cleanup minecarts as the shared suffix) → wrap each chunk in the carrier →
//! encode → prefix the summon header.
//!
//! Everything up to the chunker runs eagerly in [`combine`]; chunks are packed
//! and encoded lazily as the returned [`Combined`] is consumed.

pub mod carrier;
pub mod cleanup;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chunker::{ChunkBudget, Chunker};
use crate::curve::{GridSpec, Vector3};
use crate::errors::Result;
use crate::layout::{generate_layout, DEFAULT_ORIGIN};
use crate::nbt::encode;

pub use carrier::{command_minecart, falling_block, Carrier, SUPPORT_STACK};
pub use cleanup::cleanup_commands;

/// Maximum characters a command block accepts.
pub const COMMAND_BLOCK_TEXT_LIMIT: usize = 32500;

// ────────────────────────────────────────────────────────────────────────────
// Options
// ────────────────────────────────────────────────────────────────────────────

/// Settings for one combine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombineOptions {
    /// Grid shape; an auto axis is derived from the command count.
    pub dimensions: GridSpec,
    /// Run commands straight from the minecarts instead of building a grid.
    pub run_once: bool,
    /// Summon the support stack. Disable when the blocks are already placed.
    pub support_blocks: bool,
    /// Upper bound on each output command's length.
    pub text_limit: usize,
    /// Offset of the first grid cell.
    pub origin: Vector3,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            dimensions: GridSpec::default(),
            run_once: false,
            support_blocks: true,
            text_limit: COMMAND_BLOCK_TEXT_LIMIT,
            origin: DEFAULT_ORIGIN,
        }
    }
}

/// Summon prefix of every output command. Without the support stack the
/// carrier is summoned higher so it lands on the existing blocks.
pub fn summon_header(support_blocks: bool) -> String {
    let offset = if support_blocks { 1 } else { 3 };
    format!("summon falling_block ~ ~{offset} ~ ")
}

// ────────────────────────────────────────────────────────────────────────────
// Combine
// ────────────────────────────────────────────────────────────────────────────

/// Lazy sequence of combined output commands.
///
/// Yields `Err` at most once (an item that cannot fit any chunk) and then ends.
#[derive(Debug)]
pub struct Combined {
    header: String,
    carrier: Carrier,
    chunks: Option<Chunker>,
    emitted: usize,
}

impl Combined {
    fn empty(header: String, carrier: Carrier) -> Self {
        Self {
            header,
            carrier,
            chunks: None,
            emitted: 0,
        }
    }

    /// Number of output commands yielded so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl Iterator for Combined {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Result<String>> {
        let chunk = match self.chunks.as_mut()?.next()? {
            Ok(chunk) => chunk,
            Err(e) => return Some(Err(e)),
        };

        let source_count = chunk.source_count();
        let tag = self.carrier.wrap(chunk.into_tags());
        let encoded = match encode(&tag) {
            Ok(encoded) => encoded,
            Err(e) => return Some(Err(e)),
        };
        let command = format!("{}{}", self.header, encoded);

        debug!(
            chunk = self.emitted,
            commands = source_count,
            length = command.chars().count(),
            "Emitting combined command"
        );
        self.emitted += 1;
        Some(Ok(command))
    }
}

/// Combines `commands` into summon commands, each no longer than
/// `options.text_limit` characters.
///
/// Layout and encoding errors surface here; an item too large for any chunk
/// surfaces from the returned sequence. Empty input yields nothing.
pub fn combine(commands: &[String], options: &CombineOptions) -> Result<Combined> {
    let header = summon_header(options.support_blocks);
    let carrier = Carrier::for_support_blocks(options.support_blocks);

    if commands.is_empty() {
        return Ok(Combined::empty(header, carrier));
    }

    let overhead = header.chars().count() + carrier.wrapper_len()?;

    let generated = generate_layout(
        commands,
        &options.dimensions,
        options.origin,
        options.run_once,
    )?
    .into_commands();

    let minecarts = generated.iter().map(|c| command_minecart(c)).collect();
    let cleanup = cleanup_commands(options.support_blocks)
        .iter()
        .map(|c| command_minecart(c))
        .collect();

    info!(
        commands = commands.len(),
        generated = generated.len(),
        run_once = options.run_once,
        support_blocks = options.support_blocks,
        overhead,
        "Combining commands"
    );

    let chunker = Chunker::new(
        minecarts,
        ChunkBudget {
            limit: options.text_limit,
            overhead,
        },
        cleanup,
    )?;

    Ok(Combined {
        header,
        carrier,
        chunks: Some(chunker),
        emitted: 0,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
