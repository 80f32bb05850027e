//! Grid extents: a requested shape with an optional auto axis, and the
//! resolved shape the curve walks.
//!
//! An extent `e` on an axis means `e + 1` cells along it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CombinerError, Result};

/// Value used on the command line and in config for an auto-derived axis.
pub const AUTO_AXIS: i64 = -1;

/// Requested grid extents. `None` on an axis means "derive from the item count".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub x: Option<u32>,
    pub y: Option<u32>,
    pub z: Option<u32>,
}

impl Default for GridSpec {
    /// 8 × auto × 8: nine-cell-wide layers stacked as high as needed.
    fn default() -> Self {
        Self::auto_height(8, 8)
    }
}

impl GridSpec {
    pub fn fixed(x: u32, y: u32, z: u32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }

    pub fn auto_height(x: u32, z: u32) -> Self {
        Self {
            x: Some(x),
            y: None,
            z: Some(z),
        }
    }

    /// Resolves the auto axis, if any, to the smallest extent whose grid holds
    /// `target` cells.
    pub fn resolve(&self, target: Option<usize>) -> Result<Extents> {
        let axes = [self.x, self.y, self.z];
        let auto: Vec<usize> = (0..3).filter(|i| axes[*i].is_none()).collect();

        let resolved = match (auto.as_slice(), target) {
            ([], _) => [axes[0], axes[1], axes[2]].map(|a| a.unwrap_or(0)),
            ([axis], Some(target)) => {
                let mut resolved = axes.map(|a| a.unwrap_or(0));
                let other_cells = (0..3)
                    .filter(|i| i != axis)
                    .try_fold(1usize, |acc, i| acc.checked_mul(cells(resolved[i])?))
                    .ok_or_else(|| {
                        CombinerError::InvalidDimensions(format!(
                            "{self} has more cells per layer than can be counted"
                        ))
                    })?;
                let needed = target.div_ceil(other_cells);
                let extent = needed.saturating_sub(1);
                resolved[*axis] = u32::try_from(extent).map_err(|_| {
                    CombinerError::UnresolvedExtent(format!(
                        "{target} cells need an extent of {extent}, which is too large"
                    ))
                })?;
                resolved
            }
            ([_], None) => {
                return Err(CombinerError::UnresolvedExtent(format!(
                    "{self} has an auto axis but no target cell count"
                )))
            }
            (_, _) => {
                return Err(CombinerError::UnresolvedExtent(format!(
                    "{self} has more than one auto axis"
                )))
            }
        };

        let extents = Extents {
            x: resolved[0],
            y: resolved[1],
            z: resolved[2],
        };
        extents.volume()?;
        Ok(extents)
    }
}

impl FromStr for GridSpec {
    type Err = CombinerError;

    /// Parses `"x,y,z"`, with `-1` marking an auto axis.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(CombinerError::InvalidDimensions(format!(
                "expected three comma-separated values, got '{s}'"
            )));
        }

        let mut axes = [None; 3];
        for (slot, part) in axes.iter_mut().zip(&parts) {
            let value: i64 = part.parse().map_err(|_| {
                CombinerError::InvalidDimensions(format!("'{part}' is not an integer"))
            })?;
            *slot = match value {
                AUTO_AXIS => None,
                v => Some(u32::try_from(v).map_err(|_| {
                    CombinerError::InvalidDimensions(format!(
                        "extent {v} must be non-negative or {AUTO_AXIS}"
                    ))
                })?),
            };
        }

        Ok(Self {
            x: axes[0],
            y: axes[1],
            z: axes[2],
        })
    }
}

impl fmt::Display for GridSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |a: Option<u32>| a.map_or(AUTO_AXIS, i64::from);
        write!(f, "{},{},{}", show(self.x), show(self.y), show(self.z))
    }
}

/// Fully resolved extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extents {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Extents {
    /// Number of cells in the box. Fails with `InvalidDimensions` when the
    /// count does not fit in a `usize`.
    pub fn volume(&self) -> Result<usize> {
        [self.x, self.y, self.z]
            .into_iter()
            .try_fold(1usize, |acc, e| acc.checked_mul(cells(e)?))
            .ok_or_else(|| {
                CombinerError::InvalidDimensions(format!("grid {self} has too many cells"))
            })
    }
}

impl fmt::Display for Extents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// Cells along an axis of extent `e`.
fn cells(extent: u32) -> Option<usize> {
    usize::try_from(extent).ok()?.checked_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── resolve ─────────────────────────────────────────────────────────────

    #[test]
    fn test_auto_height_for_five_cells() {
        let spec: GridSpec = "1,-1,1".parse().unwrap();
        let extents = spec.resolve(Some(5)).unwrap();
        assert_eq!(extents, Extents { x: 1, y: 1, z: 1 });
        assert!(extents.volume().unwrap() >= 5);
    }

    #[test]
    fn test_auto_height_exact_fit_does_not_overshoot() {
        let extents = GridSpec::auto_height(8, 8).resolve(Some(81)).unwrap();
        assert_eq!(extents.y, 0);
        let extents = GridSpec::auto_height(8, 8).resolve(Some(82)).unwrap();
        assert_eq!(extents.y, 1);
    }

    #[test]
    fn test_auto_height_zero_target() {
        let extents = GridSpec::auto_height(2, 2).resolve(Some(0)).unwrap();
        assert_eq!(extents.y, 0);
    }

    #[test]
    fn test_auto_x_axis() {
        let spec = GridSpec {
            x: None,
            y: Some(0),
            z: Some(1),
        };
        assert_eq!(spec.resolve(Some(7)).unwrap().x, 3);
    }

    #[test]
    fn test_fixed_ignores_target() {
        let extents = GridSpec::fixed(1, 2, 3).resolve(Some(1000)).unwrap();
        assert_eq!(extents, Extents { x: 1, y: 2, z: 3 });
        assert_eq!(extents.volume().unwrap(), 24);
    }

    #[test]
    fn test_auto_without_target_fails() {
        let err = GridSpec::default().resolve(None).unwrap_err();
        assert!(matches!(err, CombinerError::UnresolvedExtent(_)));
    }

    #[test]
    fn test_two_auto_axes_fail() {
        let spec: GridSpec = "-1,-1,3".parse().unwrap();
        assert!(spec.resolve(Some(4)).is_err());
    }

    #[test]
    fn test_oversized_layer_fails_instead_of_overflowing() {
        let spec: GridSpec = "4294967295,-1,4294967295".parse().unwrap();
        let err = spec.resolve(Some(5)).unwrap_err();
        assert!(matches!(err, CombinerError::InvalidDimensions(_)));
    }

    #[test]
    fn test_oversized_fixed_grid_fails() {
        let spec = GridSpec::fixed(u32::MAX, u32::MAX, u32::MAX);
        assert!(matches!(
            spec.resolve(Some(1)),
            Err(CombinerError::InvalidDimensions(_))
        ));
        let extents = Extents {
            x: u32::MAX,
            y: u32::MAX,
            z: u32::MAX,
        };
        assert!(extents.volume().is_err());
    }

    #[test]
    fn test_large_auto_axis_within_range() {
        let extents = GridSpec::auto_height(u32::MAX, 0).resolve(Some(5)).unwrap();
        assert_eq!(extents.y, 0);
        assert_eq!(extents.volume().unwrap(), 1 << 32);
    }

    // ── parsing ─────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_round_trips_display() {
        let spec: GridSpec = " 8, -1 ,8".parse().unwrap();
        assert_eq!(spec, GridSpec::default());
        assert_eq!(spec.to_string(), "8,-1,8");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("8,8".parse::<GridSpec>().is_err());
        assert!("8,x,8".parse::<GridSpec>().is_err());
        assert!("8,-2,8".parse::<GridSpec>().is_err());
    }
}
