//!
//! Azimuthal Equidistant
//!
//! Distances and azimuths from the projection center are true.
//!
//! The polar ellipsoidal aspects run on the meridional distance
//! series; the oblique and equatorial ellipsoidal aspects solve the
//! geodesic with Vincenty's direct and inverse formulas.
//!
//! ref: <https://proj.org/operations/projections/aeqd.html>
//!
use crate::errors::{Error, Result};
use crate::math::{
    aasin,
    consts::{EPS_10, FRAC_PI_2, PI},
    e0fn, e1fn, e2fn, e3fn, gmlfn, imlfn, vincenty_direct, vincenty_inverse,
};
use crate::parameters::ParamList;
use crate::proj::ProjData;

// Projection stub
super::projection! { aeqd }

const TOL: f64 = 1.0e-14;

#[allow(non_camel_case_types)]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    N_POLE,
    S_POLE,
    OBLIQ,
    EQUIT,
}

use Mode::*;

#[derive(Debug, Clone)]
pub(crate) enum Projection {
    /// Spherical, all aspects
    Sph {
        mode: Mode,
        phi0: f64,
        sinph0: f64,
        cosph0: f64,
    },
    /// Polar ellipsoidal, meridional distance based
    PolarEll {
        north: bool,
        phi0: f64,
        mp: f64,
        e0: f64,
        e1: f64,
        e2: f64,
        e3: f64,
    },
    /// Oblique/equatorial ellipsoidal, geodesic based
    ObliqEll { f: f64, phi0: f64 },
}

impl Projection {
    pub fn aeqd(p: &mut ProjData, _params: &ParamList) -> Result<Self> {
        let phi0 = p.phi0;
        let t = phi0.abs();

        let mode = if (t - FRAC_PI_2).abs() < EPS_10 {
            if phi0 < 0. {
                S_POLE
            } else {
                N_POLE
            }
        } else if t < EPS_10 {
            EQUIT
        } else {
            OBLIQ
        };

        if p.ellps.is_sphere() {
            let (sinph0, cosph0) = phi0.sin_cos();
            Ok(Self::Sph {
                mode,
                phi0,
                sinph0,
                cosph0,
            })
        } else {
            match mode {
                N_POLE | S_POLE => {
                    let es = p.ellps.es;
                    let (e0, e1, e2, e3) = (e0fn(es), e1fn(es), e2fn(es), e3fn(es));
                    let north = mode == N_POLE;
                    let mp = if north {
                        gmlfn(e0, e1, e2, e3, FRAC_PI_2)
                    } else {
                        gmlfn(e0, e1, e2, e3, -FRAC_PI_2)
                    };
                    Ok(Self::PolarEll {
                        north,
                        phi0,
                        mp,
                        e0,
                        e1,
                        e2,
                        e3,
                    })
                }
                OBLIQ | EQUIT => Ok(Self::ObliqEll {
                    f: p.ellps.f,
                    phi0,
                }),
            }
        }
    }

    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        match self {
            Self::Sph {
                mode,
                sinph0,
                cosph0,
                ..
            } => {
                let (sinphi, cosphi) = phi.sin_cos();
                let (sinlam, coslam) = lam.sin_cos();
                match mode {
                    EQUIT | OBLIQ => {
                        let cosc = if *mode == EQUIT {
                            cosphi * coslam
                        } else {
                            sinph0 * sinphi + cosph0 * cosphi * coslam
                        };
                        if (cosc.abs() - 1.).abs() < TOL {
                            if cosc < 0. {
                                // antipodal point
                                return Err(Error::CoordTransOutsideProjectionDomain);
                            }
                            Ok((0., 0., z))
                        } else {
                            let c = cosc.acos();
                            let k = c / c.sin();
                            Ok((
                                k * cosphi * sinlam,
                                k * if *mode == EQUIT {
                                    sinphi
                                } else {
                                    cosph0 * sinphi - sinph0 * cosphi * coslam
                                },
                                z,
                            ))
                        }
                    }
                    N_POLE | S_POLE => {
                        let (phi, coslam) = if *mode == N_POLE {
                            (-phi, -coslam)
                        } else {
                            (phi, coslam)
                        };
                        if (phi - FRAC_PI_2).abs() < EPS_10 {
                            return Err(Error::CoordTransOutsideProjectionDomain);
                        }
                        let y = FRAC_PI_2 + phi;
                        Ok((y * sinlam, y * coslam, z))
                    }
                }
            }
            Self::PolarEll {
                north,
                mp,
                e0,
                e1,
                e2,
                e3,
                ..
            } => {
                let rho = (mp - gmlfn(*e0, *e1, *e2, *e3, phi)).abs();
                let coslam = if *north { -lam.cos() } else { lam.cos() };
                Ok((rho * lam.sin(), rho * coslam, z))
            }
            Self::ObliqEll { f, phi0 } => {
                let (s, azi) = vincenty_inverse(*f, *phi0, 0., phi, lam)?;
                if s < EPS_10 {
                    Ok((0., 0., z))
                } else {
                    let (sin_az, cos_az) = azi.sin_cos();
                    Ok((s * sin_az, s * cos_az, z))
                }
            }
        }
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        match self {
            Self::Sph {
                mode,
                phi0,
                sinph0,
                cosph0,
            } => {
                let mut c_rh = x.hypot(y);
                if c_rh > PI {
                    if c_rh - EPS_10 > PI {
                        return Err(Error::CoordTransOutsideProjectionDomain);
                    }
                    c_rh = PI;
                } else if c_rh < EPS_10 {
                    return Ok((0., *phi0, z));
                }
                match mode {
                    OBLIQ | EQUIT => {
                        let (sinc, cosc) = c_rh.sin_cos();
                        let (mut xx, yy);
                        let phi = if *mode == EQUIT {
                            xx = x * sinc;
                            yy = cosc * c_rh;
                            aasin(y * sinc / c_rh)?
                        } else {
                            let phi = aasin(cosc * sinph0 + y * sinc * cosph0 / c_rh)?;
                            xx = x * sinc * cosph0;
                            yy = (cosc - sinph0 * phi.sin()) * c_rh;
                            phi
                        };
                        if yy == 0. {
                            xx = 0.;
                        }
                        Ok((
                            if xx == 0. && yy == 0. {
                                0.
                            } else {
                                xx.atan2(yy)
                            },
                            phi,
                            z,
                        ))
                    }
                    N_POLE => Ok((x.atan2(-y), FRAC_PI_2 - c_rh, z)),
                    S_POLE => Ok((x.atan2(y), c_rh - FRAC_PI_2, z)),
                }
            }
            Self::PolarEll {
                north,
                phi0,
                mp,
                e0,
                e1,
                e2,
                e3,
            } => {
                let c = x.hypot(y);
                if c < EPS_10 {
                    return Ok((0., *phi0, z));
                }
                if *north {
                    Ok((x.atan2(-y), imlfn(mp - c, *e0, *e1, *e2, *e3)?, z))
                } else {
                    Ok((x.atan2(y), imlfn(mp + c, *e0, *e1, *e2, *e3)?, z))
                }
            }
            Self::ObliqEll { f, phi0 } => {
                let c = x.hypot(y);
                if c < EPS_10 {
                    return Ok((0., *phi0, z));
                }
                let azi = x.atan2(y);
                let (phi, lam) = vincenty_direct(*f, *phi0, 0., azi, c)?;
                Ok((lam, phi, z))
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
    use crate::proj::Proj;

    fn roundtrip(projstr: &str, lon: f64, lat: f64, eps: f64) {
        let p = Proj::from_proj_string(projstr).unwrap();
        let (lam, phi) = (lon.to_radians(), lat.to_radians());
        let (x, y, _) = p.projection().forward(lam, phi, 0.).unwrap();
        let (rlam, rphi, _) = p.projection().inverse(x, y, 0.).unwrap();
        approx::assert_abs_diff_eq!(rlam, lam, epsilon = eps);
        approx::assert_abs_diff_eq!(rphi, phi, epsilon = eps);
    }

    #[test]
    fn proj_aeqd_oblique_ellipsoidal() {
        roundtrip("+proj=aeqd +lat_0=48 +lon_0=9 +ellps=GRS80", 2., 1., 1e-9);
        roundtrip("+proj=aeqd +lat_0=48 +lon_0=9 +ellps=GRS80", -60., -20., 1e-9);
    }

    #[test]
    fn proj_aeqd_equatorial_ellipsoidal() {
        roundtrip("+proj=aeqd +lat_0=0 +lon_0=0 +ellps=GRS80", 10., 42., 1e-9);
    }

    #[test]
    fn proj_aeqd_polar_ellipsoidal() {
        roundtrip("+proj=aeqd +lat_0=90 +ellps=GRS80", 13., 72., 1e-9);
        roundtrip("+proj=aeqd +lat_0=-90 +ellps=GRS80", 13., -72., 1e-9);
    }

    #[test]
    fn proj_aeqd_spherical() {
        roundtrip("+proj=aeqd +lat_0=40 +R=6371000", 2., 1., 1e-9);
        roundtrip("+proj=aeqd +lat_0=90 +R=6371000", 100., 45., 1e-9);
        roundtrip("+proj=aeqd +lat_0=0 +R=6371000", -140., -80., 1e-9);
    }

    #[test]
    fn proj_aeqd_center_maps_to_origin() {
        let p = Proj::from_proj_string("+proj=aeqd +lat_0=48 +lon_0=9 +ellps=GRS80").unwrap();
        let (x, y, _) = p.projection().forward(0., 48f64.to_radians(), 0.).unwrap();
        assert_eq!((x, y), (0., 0.));
    }

    #[test]
    fn proj_aeqd_distance_is_true() {
        // On a sphere, the distance from the center equals R * central angle
        let p = Proj::from_proj_string("+proj=aeqd +lat_0=0 +lon_0=0 +R=6371000").unwrap();
        let (x, y, _) = p.projection().forward(1f64.to_radians(), 0., 0.).unwrap();
        approx::assert_abs_diff_eq!(x, 1f64.to_radians(), epsilon = 1e-12);
        assert_eq!(y, 0.);
    }
}
