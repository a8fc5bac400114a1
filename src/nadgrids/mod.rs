//!
//! Grid shift handling
//!
//! Grids are supplied by the host as raw bytes ([`read_ntv2_bytes`],
//! [`read_geotiff_bytes`]) and live in a process wide catalog until
//! removed. A projection definition referencing grids resolves them
//! once at construction time.
//!
use crate::errors::{Error, Result};
use crate::log::trace;
use crate::transform::Direction;

pub(crate) mod grid;

mod catalog;
mod geotiff;
mod header;
mod ntv2;

pub use catalog::{add_grids, clear, contains, remove_grids, GridRef};
pub use grid::Grid;

use std::ops::ControlFlow;

/// Load a NTv2 (.gsb) grid from raw bytes and register it under `name`
pub fn read_ntv2_bytes(name: &str, bytes: &[u8]) -> Result<()> {
    let grids = ntv2::read_ntv2(&mut &bytes[..])?;
    trace!("Loaded ntv2 {}: {} subgrids", name, grids.len());
    catalog::add_grids(name, grids);
    Ok(())
}

/// Load a GeoTIFF shift grid from raw bytes and register it under `name`
pub fn read_geotiff_bytes(name: &str, bytes: &[u8]) -> Result<()> {
    let grids = geotiff::read_geotiff(name, bytes)?;
    catalog::add_grids(name, grids);
    Ok(())
}

/// The resolved grid list of a projection definition
///
/// Built from the `+nadgrids=` name list: a leading `@` marks a grid
/// as optional, a bare name is mandatory. For a point outside every
/// subgrid an optional list is a no-op while a mandatory one fails.
#[derive(Debug, Clone)]
pub struct NadGrids {
    names: String,
    grids: Vec<GridRef>,
    mandatory: bool,
}

impl PartialEq for NadGrids {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl NadGrids {
    pub fn apply_shift(
        &self,
        dir: Direction,
        lam: f64,
        phi: f64,
        z: f64,
    ) -> Result<(f64, f64, f64)> {
        if self.grids.is_empty() {
            return Ok((lam, phi, z));
        }

        match self.find_grid(lam, phi) {
            Some(g) => g.nad_cvt(dir, lam, phi, z),
            None if self.mandatory => Err(Error::PointOutsideNadShiftArea),
            // Outside of every subgrid: pass through unchanged
            None => Ok((lam, phi, z)),
        }
    }

    /// Find the best subgrid for a point: a containing root grid, then
    /// the deepest containing child, preferring the highest resolution.
    fn find_grid(&self, lam: f64, phi: f64) -> Option<&GridRef> {
        let mut candidate: Option<&GridRef> = None;
        for g in self.grids.iter().filter(|g| g.matches(lam, phi)) {
            candidate = match candidate {
                None => Some(g),
                Some(best) => {
                    if g.is_child_of(best) || g.cell_size() < best.cell_size() {
                        Some(g)
                    } else {
                        Some(best)
                    }
                }
            };
        }
        candidate
    }

    /// Resolve a list of grid names against the catalog
    ///
    /// The parsing stops at a `@null` entry. A missing mandatory grid
    /// is an error, a missing optional one is skipped.
    pub fn new_grid_transform(names: &str) -> Result<Self> {
        let mut v: Vec<GridRef> = vec![];
        let mut mandatory = false;

        match names.split(',').try_for_each(|s| {
            let s = s.trim();
            if s == "@null" || s == "null" {
                // Mark the end of parsing
                ControlFlow::Break(true)
            } else if let Some(s) = s.strip_prefix('@') {
                // Optional grid
                catalog::find_grids(s, &mut v);
                ControlFlow::Continue(())
            } else {
                // Mandatory grid
                if catalog::find_grids(s, &mut v) {
                    mandatory = true;
                    ControlFlow::Continue(())
                } else {
                    ControlFlow::Break(false)
                }
            }
        }) {
            ControlFlow::Break(false) => Err(Error::NadGridNotAvailable),
            _ => Ok(Self {
                names: names.to_string(),
                grids: v,
                mandatory,
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nadgrids_forward_inverse_roundtrip() {
        read_ntv2_bytes("roundtrip.gsb", &ntv2::tests::sample_ntv2()).unwrap();

        let grids = NadGrids::new_grid_transform("roundtrip.gsb").unwrap();
        assert!(!grids.is_empty());

        let (lam, phi) = (2.2f64.to_radians(), 51.7f64.to_radians());
        let (slam, sphi, _) = grids.apply_shift(Direction::Forward, lam, phi, 0.).unwrap();

        // constant 2" west / 1" north shift
        approx::assert_abs_diff_eq!(lam - slam, 2.0 * 4.84813681109536e-6, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(sphi - phi, 1.0 * 4.84813681109536e-6, epsilon = 1e-12);

        let (rlam, rphi, _) = grids
            .apply_shift(Direction::Inverse, slam, sphi, 0.)
            .unwrap();
        approx::assert_abs_diff_eq!(rlam, lam, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(rphi, phi, epsilon = 1e-12);

        remove_grids("roundtrip.gsb");
    }

    #[test]
    fn nadgrids_outside_optional_is_noop() {
        read_ntv2_bytes("optional.gsb", &ntv2::tests::sample_ntv2()).unwrap();

        let grids = NadGrids::new_grid_transform("@optional.gsb").unwrap();
        let (lam, phi) = (120f64.to_radians(), -33f64.to_radians());
        assert_eq!(
            grids.apply_shift(Direction::Forward, lam, phi, 0.).unwrap(),
            (lam, phi, 0.)
        );

        remove_grids("optional.gsb");
    }

    #[test]
    fn nadgrids_outside_mandatory_fails() {
        read_ntv2_bytes("mandatory.gsb", &ntv2::tests::sample_ntv2()).unwrap();

        let grids = NadGrids::new_grid_transform("mandatory.gsb").unwrap();
        let (lam, phi) = (120f64.to_radians(), -33f64.to_radians());
        assert!(matches!(
            grids.apply_shift(Direction::Forward, lam, phi, 0.),
            Err(Error::PointOutsideNadShiftArea)
        ));

        remove_grids("mandatory.gsb");
    }

    #[test]
    fn nadgrids_missing_mandatory_grid() {
        assert!(matches!(
            NadGrids::new_grid_transform("no_such_grid.gsb"),
            Err(Error::NadGridNotAvailable)
        ));
        // optional missing grids resolve to an empty no-op list
        assert!(NadGrids::new_grid_transform("@no_such_grid.gsb")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn nadgrids_geotiff_shift() {
        read_geotiff_bytes("shift.tif", &geotiff::tests::sample_geotiff()).unwrap();

        let grids = NadGrids::new_grid_transform("shift.tif").unwrap();
        let (lam, phi) = (11.3f64.to_radians(), 51.2f64.to_radians());
        let (slam, sphi, _) = grids.apply_shift(Direction::Forward, lam, phi, 0.).unwrap();

        approx::assert_abs_diff_eq!(lam - slam, 2.0 * 4.84813681109536e-6, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(sphi - phi, 1.0 * 4.84813681109536e-6, epsilon = 1e-12);

        remove_grids("shift.tif");
    }
}
