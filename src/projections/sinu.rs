//!
//! Sinusoidal (Sanson-Flamsteed)
//!
//! Pseudocylindrical, equal area. The ellipsoidal form runs on the
//! meridional distance series.
//!
//! ref: <https://proj.org/operations/projections/sinu.html>
//!
use crate::errors::{Error, Result};
use crate::math::{
    consts::{EPS_10, FRAC_PI_2},
    enfn, inv_mlfn, mlfn, Enfn,
};
use crate::parameters::ParamList;
use crate::proj::ProjData;

// Projection stub
super::projection! { sinu }

#[derive(Debug, Clone)]
pub(crate) enum Projection {
    Sph,
    Ell { es: f64, en: Enfn },
}

impl Projection {
    pub fn sinu(p: &mut ProjData, _params: &ParamList) -> Result<Self> {
        if p.ellps.is_ellipsoid() {
            Ok(Self::Ell {
                es: p.ellps.es,
                en: enfn(p.ellps.es),
            })
        } else {
            Ok(Self::Sph)
        }
    }

    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        match self {
            Self::Ell { es, en } => {
                let (s, c) = phi.sin_cos();
                Ok((
                    lam * c / (1. - es * s * s).sqrt(),
                    mlfn(phi, s, c, *en),
                    z,
                ))
            }
            Self::Sph => Ok((lam * phi.cos(), phi, z)),
        }
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        match self {
            Self::Ell { es, en } => {
                let phi = inv_mlfn(y, *es, *en)?;
                let s = phi.abs();
                if s < FRAC_PI_2 {
                    let sinphi = phi.sin();
                    Ok((
                        x * (1. - es * sinphi * sinphi).sqrt() / phi.cos(),
                        phi,
                        z,
                    ))
                } else if (s - EPS_10) < FRAC_PI_2 {
                    Ok((0., phi, z))
                } else {
                    Err(Error::CoordTransOutsideProjectionDomain)
                }
            }
            Self::Sph => {
                let phi = y;
                let s = phi.abs();
                if s < FRAC_PI_2 {
                    Ok((x / phi.cos(), phi, z))
                } else if (s - EPS_10) < FRAC_PI_2 {
                    Ok((0., if phi < 0. { -FRAC_PI_2 } else { FRAC_PI_2 }, z))
                } else {
                    Err(Error::CoordTransOutsideProjectionDomain)
                }
            }
        }
    }

    pub const fn has_inverse() -> bool {
        true
    }

    pub const fn has_forward() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::math::consts::EPS_10;
    use crate::proj::Proj;
    use crate::tests::utils::{test_proj_forward, test_proj_inverse};

    #[test]
    fn proj_sinu_ellps() {
        let p = Proj::from_proj_string("+proj=sinu +ellps=GRS80").unwrap();

        // Reference values from proj 9: echo 2 1 | proj +proj=sinu +ellps=GRS80
        let inputs = [
            ((2., 1., 0.), (222605.29953946592, 110574.38855415257, 0.)),
            ((2., -1., 0.), (222605.29953946592, -110574.38855415257, 0.)),
            ((-2., 1., 0.), (-222605.29953946592, 110574.38855415257, 0.)),
            (
                (-2., -1., 0.),
                (-222605.29953946592, -110574.38855415257, 0.),
            ),
        ];

        test_proj_forward(&p, &inputs, 1e-8);
        test_proj_inverse(&p, &inputs, 1e-8);
    }

    #[test]
    fn proj_sinu_sphere_roundtrip() {
        let p = Proj::from_proj_string("+proj=sinu +R=6400000").unwrap();

        let (lam, phi) = (12f64.to_radians(), 55f64.to_radians());
        let (x, y, _) = p.projection().forward(lam, phi, 0.).unwrap();
        let (rlam, rphi, _) = p.projection().inverse(x, y, 0.).unwrap();
        approx::assert_abs_diff_eq!(rlam, lam, epsilon = EPS_10);
        approx::assert_abs_diff_eq!(rphi, phi, epsilon = EPS_10);
    }

    #[test]
    fn proj_sinu_equator_is_linear() {
        let p = Proj::from_proj_string("+proj=sinu +R=6371000").unwrap();
        let (x, y, _) = p.projection().forward(1f64.to_radians(), 0., 0.).unwrap();
        approx::assert_abs_diff_eq!(x, 1f64.to_radians(), epsilon = 1e-15);
        assert_eq!(y, 0.);
    }
}
