//!
//! Robinson
//!
//! Table driven pseudocylindrical projection for world maps. The
//! coefficient tables interpolate Robinson's original 5 degree nodes
//! with cubics; the inverse brackets the latitude in the Y table and
//! refines with Newton-Raphson.
//!
//! ref: <https://proj.org/operations/projections/robin.html>
//!
use crate::ellps::Ellipsoid;
use crate::errors::{Error, Result};
use crate::math::consts::FRAC_PI_2;
use crate::parameters::ParamList;
use crate::proj::ProjData;

// Projection stub
super::projection! { robin }

type Coefs = [f64; 4];

// Cubic spline coefficients over 5 degree latitude nodes
#[rustfmt::skip]
const COEFS_X: [Coefs; 19] = [
    [1.0,    2.2199e-17,  -7.15515e-05, 3.1103e-06],
    [0.9986, -0.000482243, -2.4897e-05, -1.3309e-06],
    [0.9954, -0.00083103,  -4.48605e-05, -9.86701e-07],
    [0.99,   -0.00135364,  -5.9661e-05,  3.6777e-06],
    [0.9822, -0.00167442,  -4.49547e-06, -5.72411e-06],
    [0.973,  -0.00214868,  -9.03571e-05, 1.8736e-08],
    [0.96,   -0.00305085,  -9.00761e-05, 1.64917e-06],
    [0.9427, -0.00382792,  -6.53386e-05, -2.6154e-06],
    [0.9216, -0.00467746,  -0.00010457,  4.81243e-06],
    [0.8962, -0.00536223,  -3.23831e-05, -5.43432e-06],
    [0.8679, -0.00609363,  -0.000113898, 3.32484e-06],
    [0.835,  -0.00698325,  -6.40253e-05, 9.34959e-07],
    [0.7986, -0.00755338,  -5.00009e-05, 9.35324e-07],
    [0.7597, -0.00798324,  -3.5971e-05,  -2.27626e-06],
    [0.7186, -0.00851367,  -7.01149e-05, -8.6303e-06],
    [0.6732, -0.00986209,  -0.000199569, 1.91974e-05],
    [0.6213, -0.010418,    8.83923e-05,  6.24051e-06],
    [0.5722, -0.00906601,  0.000182,     6.24051e-06],
    [0.5322, -0.00677797,  0.000275608,  6.24051e-06],
];

#[rustfmt::skip]
const COEFS_Y: [Coefs; 19] = [
    [-5.20417e-18, 0.0124,     1.21431e-18,  -8.45284e-11],
    [0.062,        0.0124,     -1.26793e-09, 4.22642e-10],
    [0.124,        0.0124,     5.07171e-09,  -1.60604e-09],
    [0.186,        0.0123999,  -1.90189e-08, 6.00152e-09],
    [0.248,        0.0124002,  7.10039e-08,  -2.24e-08],
    [0.31,         0.0123992,  -2.64997e-07, 8.35986e-08],
    [0.372,        0.0124029,  9.88983e-07,  -3.11994e-07],
    [0.434,        0.0123893,  -3.69093e-06, -4.35621e-07],
    [0.4958,       0.0123198,  -1.02252e-05, -3.45523e-07],
    [0.5571,       0.0121916,  -1.54081e-05, -5.82288e-07],
    [0.6176,       0.0119938,  -2.41424e-05, -5.25327e-07],
    [0.6769,       0.011713,   -3.20223e-05, -5.16405e-07],
    [0.7346,       0.0113541,  -3.97684e-05, -6.09052e-07],
    [0.7903,       0.0109107,  -4.89042e-05, -1.04739e-06],
    [0.8435,       0.0103431,  -6.4615e-05,  -1.40374e-09],
    [0.8936,       0.00969686, -6.4636e-05,  -8.547e-06],
    [0.9394,       0.00840947, -0.000192841, -4.2106e-06],
    [0.9761,       0.00616527, -0.000256,    -4.2106e-06],
    [1.0,          0.00328947, -0.000319159, -4.2106e-06],
];

const FXC: f64 = 0.8487;
const FYC: f64 = 1.3523;
// 1 / 5 degrees, in degrees per radian
const C1: f64 = 11.45915590261646417544;
// 5 degrees in radians
const RC1: f64 = 0.08726646259971647884;
const NODES: usize = 18;
const ONEEPS: f64 = 1.000001;
const EPS: f64 = 1e-8;
const NITER: usize = 100;

#[inline]
fn v(c: &Coefs, z: f64) -> f64 {
    c[0] + z * (c[1] + z * (c[2] + z * c[3]))
}

#[inline]
fn dv(c: &Coefs, z: f64) -> f64 {
    c[1] + z * (2. * c[2] + z * 3. * c[3])
}

#[derive(Debug, Clone)]
pub(crate) struct Projection {}

impl Projection {
    pub fn robin(p: &mut ProjData, _params: &ParamList) -> Result<Self> {
        // Spherical only
        p.ellps = Ellipsoid::sphere(p.ellps.a)?;
        Ok(Self {})
    }

    pub fn forward(&self, lam: f64, phi: f64, z: f64) -> Result<(f64, f64, f64)> {
        if phi.is_nan() || lam.is_nan() {
            return Err(Error::NanCoordinateValue);
        }

        let mut dphi = phi.abs();
        let i = ((dphi * C1 + 1e-15).floor() as usize).min(NODES);
        dphi = (dphi - RC1 * i as f64).to_degrees();

        let x = v(&COEFS_X[i], dphi) * FXC * lam;
        let mut y = v(&COEFS_Y[i], dphi) * FYC;
        if phi < 0. {
            y = -y;
        }
        Ok((x, y, z))
    }

    pub fn inverse(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        let mut lam = x / FXC;
        let mut phi = (y / FYC).abs();

        if phi >= 1. {
            // pathologic cases at the map boundary
            if phi > ONEEPS {
                return Err(Error::CoordTransOutsideProjectionDomain);
            }
            phi = if y < 0. { -FRAC_PI_2 } else { FRAC_PI_2 };
            lam /= COEFS_X[NODES][0];
            return Ok((lam, phi, z));
        }

        // bracket the Y table row
        let mut i = (phi * NODES as f64).floor() as usize;
        if i >= NODES {
            i = NODES - 1;
        }
        loop {
            if COEFS_Y[i][0] > phi {
                i -= 1;
            } else if COEFS_Y[i + 1][0] <= phi {
                i += 1;
            } else {
                break;
            }
        }

        let cy = COEFS_Y[i];
        // first guess, linear interpolation over the 5 degree interval
        let mut t = 5. * (phi - cy[0]) / (COEFS_Y[i + 1][0] - cy[0]);
        let root = [cy[0] - phi, cy[1], cy[2], cy[3]];

        // Newton-Raphson refinement
        let mut k = NITER;
        loop {
            let t1 = v(&root, t) / dv(&root, t);
            t -= t1;
            if t1.abs() < EPS {
                break;
            }
            k -= 1;
            if k == 0 {
                return Err(Error::ToleranceConditionError);
            }
        }

        phi = (5. * i as f64 + t).to_radians();
        if y < 0. {
            phi = -phi;
        }
        lam /= v(&COEFS_X[i], t);

        Ok((lam, phi, z))
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
    use crate::tests::utils::{test_proj_forward, test_proj_inverse};

    #[test]
    fn proj_robin_forward() {
        let p = Proj::from_proj_string("+proj=robin +a=6378137").unwrap();

        let inputs = [(
            (20., 30., 0.),
            (1813955.5552560245, 3208557.5354172005, 0.),
        )];

        test_proj_forward(&p, &inputs, 1e-6);
        test_proj_inverse(&p, &inputs, 1e-6);
    }

    #[test]
    fn proj_robin_graticule_roundtrip() {
        let p = Proj::from_proj_string("+proj=robin +a=6378137").unwrap();

        let mut lat = -85.0f64;
        while lat <= 85. {
            let mut lon = -175.0f64;
            while lon <= 175. {
                let (lam, phi) = (lon.to_radians(), lat.to_radians());
                let (x, y, _) = p.projection().forward(lam, phi, 0.).unwrap();
                let (rlam, rphi, _) = p.projection().inverse(x, y, 0.).unwrap();
                approx::assert_abs_diff_eq!(rlam, lam, epsilon = 1e-8);
                approx::assert_abs_diff_eq!(rphi, phi, epsilon = 1e-8);
                lon += 35.;
            }
            lat += 17.;
        }
    }

    #[test]
    fn proj_robin_poles() {
        let p = Proj::from_proj_string("+proj=robin +a=6378137").unwrap();
        let (_, y, _) = p
            .projection()
            .forward(0., 90f64.to_radians(), 0.)
            .unwrap();
        // map height at the pole is FYC * Y[18](0) = 1.3523
        approx::assert_abs_diff_eq!(y, 1.3523, epsilon = 1e-12);
    }
}
