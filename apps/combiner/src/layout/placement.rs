//! Placement commands for the chain of command blocks.
//!
//! Rows run along x and alternate direction every row; within a layer rows
//! advance along z, alternating direction every layer. Each row is filled
//! facing along the row, then its end block is replaced with one facing the
//! next row. The last row end of a layer faces up into the next layer.
//! This is the same path [`crate::curve::SnakeCurve`] walks.

use std::fmt;

use crate::curve::{Extents, Vector3};

/// Direction a command block points (and so passes execution to).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    East,
    West,
    South,
    North,
    Up,
}

impl Facing {
    pub fn as_str(self) -> &'static str {
        match self {
            Facing::East => "east",
            Facing::West => "west",
            Facing::South => "south",
            Facing::North => "north",
            Facing::Up => "up",
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Always-active chain command block that hides its output.
pub fn chain_block(facing: Facing) -> String {
    format!("chain_command_block[facing={facing}]{{auto:1b,TrackOutput:0b}}")
}

/// Builds two commands per row: a `fill` for the row and a `setblock` for
/// its turning end block.
pub fn placement_commands(extents: Extents, origin: Vector3) -> Vec<String> {
    let rows_per_layer = extents.z as usize + 1;
    let mut commands = Vec::new();

    let x_start = origin.x;
    let x_end = origin.x + i64::from(extents.x);
    let mut forward_x = true;
    let mut forward_z = true;

    for layer in 0..=extents.y {
        let y = origin.y + i64::from(layer);
        let rows: Vec<u32> = if forward_z {
            (0..=extents.z).collect()
        } else {
            (0..=extents.z).rev().collect()
        };

        for (row, z) in rows.into_iter().enumerate() {
            let z = origin.z + i64::from(z);
            let (along, row_end) = if forward_x {
                (Facing::East, x_end)
            } else {
                (Facing::West, x_start)
            };
            let turn = if row + 1 == rows_per_layer {
                Facing::Up
            } else if forward_z {
                Facing::South
            } else {
                Facing::North
            };

            commands.push(format!(
                "fill ~{x_start} ~{y} ~{z} ~{x_end} ~{y} ~{z} {}",
                chain_block(along)
            ));
            commands.push(format!("setblock ~{row_end} ~{y} ~{z} {}", chain_block(turn)));

            forward_x = !forward_x;
        }

        forward_z = !forward_z;
    }

    commands
}
