//
// Stub projection for lat/long coordinates. The coordinates are left
// untouched but proj=latlong has to act sort of like a projection so
// that the pipeline treats geographic CRSs uniformly.
//
use crate::errors::Result;
use crate::parameters::ParamList;
use crate::proj::ProjData;

// Projection stub
super::projection! { latlong, longlat, latlon, lonlat }

#[derive(Debug, Clone)]
pub(crate) struct Projection {}

impl Projection {
    pub fn latlong(p: &mut ProjData, _params: &ParamList) -> Result<Self> {
        p.is_latlong = true;
        p.x0 = 0.;
        p.y0 = 0.;
        Ok(Self {})
    }

    pub fn longlat(p: &mut ProjData, params: &ParamList) -> Result<Self> {
        Self::latlong(p, params)
    }

    pub fn latlon(p: &mut ProjData, params: &ParamList) -> Result<Self> {
        Self::latlong(p, params)
    }

    pub fn lonlat(p: &mut ProjData, params: &ParamList) -> Result<Self> {
        Self::latlong(p, params)
    }

    #[inline(always)]
    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        Ok((lam, phi, z))
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
