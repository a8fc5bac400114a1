//!
//! Geocentric "projection" stub
//!
//! Coordinates pass through untouched: the pipeline performs the
//! actual geodetic/geocentric conversion when `is_geocent` is set.
//!
use crate::errors::Result;
use crate::parameters::ParamList;
use crate::proj::ProjData;

// Projection stub
super::projection! { geocent, cart }

#[derive(Debug, Clone)]
pub(crate) struct Projection {}

impl Projection {
    pub fn geocent(p: &mut ProjData, _params: &ParamList) -> Result<Self> {
        p.is_geocent = true;
        p.x0 = 0.;
        p.y0 = 0.;
        Ok(Self {})
    }

    pub fn cart(p: &mut ProjData, params: &ParamList) -> Result<Self> {
        Self::geocent(p, params)
    }

    #[inline(always)]
    pub fn forward(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        Ok((x, y, z))
    }

    #[inline(always)]
    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        Ok((x, y, z))
    }

    pub const fn has_inverse() -> bool {
        true
    }

    pub const fn has_forward() -> bool {
        true
    }
}
