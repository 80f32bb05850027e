//! Boustrophedon ("snake") traversal of a 3-D grid.
//!
//! x sweeps back and forth every step, z advances once per x sweep and
//! reverses every layer, y advances once per full layer. Consecutive cells
//! always differ by a unit step along exactly one axis.
//!
//! Each axis is driven by [`bounce`], a clipped triangle wave that holds one
//! extra step at either boundary. That hold is what lets the slower axis move
//! while the faster one stays put at its edge.

use crate::curve::extent::{Extents, GridSpec};
use crate::curve::vector::Vector3;
use crate::errors::{CombinerError, Result};

// ────────────────────────────────────────────────────────────────────────────
// Wave functions
// ────────────────────────────────────────────────────────────────────────────

/// Period-`period` ramp oscillating between 0 and 1.
pub fn triangle_wave(t: f64, period: f64) -> f64 {
    1.0 - (1.0 - t / period + 2.0 * (0.5 * t / period).floor()).abs()
}

/// Maps step `t` onto `[0, extent]`, moving one unit per step and holding
/// for one step at each end.
pub fn bounce(t: u64, extent: u32) -> u32 {
    let e = f64::from(extent);
    // Shifted half a step so the held step lands on the boundary.
    let wave = triangle_wave(t as f64 + 0.5, e + 1.0);
    ((e + 1.0) * wave - 0.5).clamp(0.0, e).round() as u32
}

fn position(t: u64, extents: Extents) -> Vector3 {
    let row_len = u64::from(extents.x) + 1;
    let layer_len = row_len * (u64::from(extents.z) + 1);
    Vector3::new(
        bounce(t, extents.x).into(),
        bounce(t / layer_len, extents.y).into(),
        bounce(t / row_len, extents.z).into(),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Curve
// ────────────────────────────────────────────────────────────────────────────

/// A snake traversal over resolved extents. Random access is pure; stepping
/// goes through a [`SnakeCursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnakeCurve {
    extents: Extents,
    length: usize,
}

impl SnakeCurve {
    /// Resolves `spec` (deriving its auto axis from `target`, if any) and
    /// builds the curve.
    pub fn new(spec: &GridSpec, target: Option<usize>) -> Result<Self> {
        Self::from_extents(spec.resolve(target)?)
    }

    /// Fails with `InvalidDimensions` if the grid has more cells than a
    /// `usize` can count.
    pub fn from_extents(extents: Extents) -> Result<Self> {
        let length = extents.volume()?;
        Ok(Self { extents, length })
    }

    pub fn extents(&self) -> Extents {
        self.extents
    }

    /// Number of cells visited.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn position_at(&self, index: usize) -> Result<Vector3> {
        self.check_index(index)?;
        Ok(position(index as u64, self.extents))
    }

    /// Unit step from `index - 1` to `index`; `None` at index 0.
    pub fn direction_at(&self, index: usize) -> Result<Option<Vector3>> {
        let current = self.position_at(index)?;
        if index == 0 {
            return Ok(None);
        }
        Ok(Some(current - position(index as u64 - 1, self.extents)))
    }

    pub fn cursor(&self) -> SnakeCursor<'_> {
        SnakeCursor {
            curve: self,
            index: 0,
            last: None,
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.length() {
            return Err(CombinerError::IndexOutOfRange {
                index,
                length: self.length(),
            });
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cursor
// ────────────────────────────────────────────────────────────────────────────

/// One cell of the traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveStep {
    pub index: usize,
    pub position: Vector3,
    /// Unit step from the previous cell; `None` for the first cell.
    pub direction: Option<Vector3>,
}

/// Sequential walker over a [`SnakeCurve`]. Holds only the next index and the
/// last cell it yielded.
#[derive(Debug, Clone)]
pub struct SnakeCursor<'a> {
    curve: &'a SnakeCurve,
    index: usize,
    last: Option<Vector3>,
}

impl SnakeCursor<'_> {
    /// Index of the next cell to be yielded.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cell most recently yielded.
    pub fn position(&self) -> Option<Vector3> {
        self.last
    }

    /// Rewinds to index 0 and forgets the previous cell.
    pub fn reset(&mut self) {
        self.index = 0;
        self.last = None;
    }
}

impl Iterator for SnakeCursor<'_> {
    type Item = CurveStep;

    fn next(&mut self) -> Option<CurveStep> {
        if self.index >= self.curve.length() {
            return None;
        }
        let position = position(self.index as u64, self.curve.extents);
        let step = CurveStep {
            index: self.index,
            position,
            direction: self.last.map(|prev| position - prev),
        };
        self.index += 1;
        self.last = Some(position);
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.curve.length().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SnakeCursor<'_> {}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
