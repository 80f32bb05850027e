//! Grid layout: turns user commands into the commands that build a chain of
//! command blocks snaking through a grid and load one user command per block.
//!
//! - `placement` fills the grid rows and turns each row end toward the next
//!   row (or up to the next layer).
//! - `install` writes command `i` into the block at curve position `i`.

pub mod install;
pub mod placement;

use tracing::debug;

use crate::curve::{GridSpec, SnakeCurve, Vector3};
use crate::errors::Result;

pub use install::{install_command, install_commands};
pub use placement::{placement_commands, Facing};

/// Offset of grid cell `(0, 0, 0)` from the executing entity.
pub const DEFAULT_ORIGIN: Vector3 = Vector3::new(1, -3, 1);

/// Generated commands, in execution order: placement first, then install.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutPlan {
    pub placement: Vec<String>,
    pub install: Vec<String>,
}

impl LayoutPlan {
    pub fn len(&self) -> usize {
        self.placement.len() + self.install.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placement.is_empty() && self.install.is_empty()
    }

    /// Placement commands followed by install commands.
    pub fn into_commands(self) -> Vec<String> {
        let mut commands = self.placement;
        commands.extend(self.install);
        commands
    }
}

/// Lays `commands` out over the grid described by `dimensions`.
///
/// With `run_once` no grid is built and the commands pass through unchanged,
/// to be run directly from the carrier.
pub fn generate_layout(
    commands: &[String],
    dimensions: &GridSpec,
    origin: Vector3,
    run_once: bool,
) -> Result<LayoutPlan> {
    if run_once {
        return Ok(LayoutPlan {
            placement: vec![],
            install: commands.to_vec(),
        });
    }

    let curve = SnakeCurve::new(dimensions, Some(commands.len()))?;
    let extents = curve.extents();
    debug!(
        x = extents.x,
        y = extents.y,
        z = extents.z,
        cells = curve.length(),
        commands = commands.len(),
        "Resolved grid extents"
    );

    Ok(LayoutPlan {
        placement: placement_commands(extents, origin),
        install: install_commands(commands, &curve, origin)?,
    })
}
