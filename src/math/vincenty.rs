//!
//! Vincenty direct and inverse geodesic solutions
//!
//! Both run on the unit ellipsoid (semi major axis 1, flattening f):
//! distances are expressed in radii. Convergence criterion is 1e-12
//! with a 100 iteration cap; nearly antipodal pairs may legitimately
//! fail to converge and are reported as errors.
//!
use crate::errors::{Error, Result};

const TOL: f64 = 1.0e-12;
const MAX_ITER: usize = 100;

/// Distance and forward azimuth from (phi1, lam1) to (phi2, lam2).
///
/// Returns `(s, azi1)` with `s` in units of the semi major axis.
pub(crate) fn vincenty_inverse(
    f: f64,
    phi1: f64,
    lam1: f64,
    phi2: f64,
    lam2: f64,
) -> Result<(f64, f64)> {
    let b = 1. - f;

    let u1 = ((1. - f) * phi1.tan()).atan();
    let u2 = ((1. - f) * phi2.tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let ll = lam2 - lam1;
    let mut lam = ll;

    let (mut sin_sig, mut cos_sig, mut sigma, mut cos_sqalpha, mut cos_2sigm, mut sin_lam);
    let mut cos_lam;

    let mut i = MAX_ITER;
    loop {
        (sin_lam, cos_lam) = lam.sin_cos();
        let t1 = cos_u2 * sin_lam;
        let t2 = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lam;
        sin_sig = (t1 * t1 + t2 * t2).sqrt();
        if sin_sig == 0. {
            // coincident points
            return Ok((0., 0.));
        }
        cos_sig = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lam;
        sigma = sin_sig.atan2(cos_sig);
        let sin_alpha = cos_u1 * cos_u2 * sin_lam / sin_sig;
        cos_sqalpha = 1. - sin_alpha * sin_alpha;
        cos_2sigm = if cos_sqalpha != 0. {
            cos_sig - 2. * sin_u1 * sin_u2 / cos_sqalpha
        } else {
            // equatorial line
            0.
        };
        let c = f / 16. * cos_sqalpha * (4. + f * (4. - 3. * cos_sqalpha));
        let lam_prev = lam;
        lam = ll
            + (1. - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sig
                        * (cos_2sigm + c * cos_sig * (-1. + 2. * cos_2sigm * cos_2sigm)));
        if (lam - lam_prev).abs() < TOL {
            break;
        }
        i -= 1;
        if i == 0 {
            return Err(Error::GeodesicConvError);
        }
    }

    let u_sq = cos_sqalpha * (1. - b * b) / (b * b);
    let aa = 1. + u_sq / 16384. * (4096. + u_sq * (-768. + u_sq * (320. - 175. * u_sq)));
    let bb = u_sq / 1024. * (256. + u_sq * (-128. + u_sq * (74. - 47. * u_sq)));
    let dsig = bb
        * sin_sig
        * (cos_2sigm
            + bb / 4.
                * (cos_sig * (-1. + 2. * cos_2sigm * cos_2sigm)
                    - bb / 6.
                        * cos_2sigm
                        * (-3. + 4. * sin_sig * sin_sig)
                        * (-3. + 4. * cos_2sigm * cos_2sigm)));

    let s = b * aa * (sigma - dsig);
    let azi1 = (cos_u2 * sin_lam).atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lam);

    Ok((s, azi1))
}

/// Destination point from (phi1, lam1) along azimuth `azi1` over
/// distance `s` (in units of the semi major axis).
pub(crate) fn vincenty_direct(
    f: f64,
    phi1: f64,
    lam1: f64,
    azi1: f64,
    s: f64,
) -> Result<(f64, f64)> {
    let b = 1. - f;

    let (sin_azi, cos_azi) = azi1.sin_cos();
    let tan_u1 = (1. - f) * phi1.tan();
    let cos_u1 = 1. / (1. + tan_u1 * tan_u1).sqrt();
    let sin_u1 = tan_u1 * cos_u1;

    let sigma1 = tan_u1.atan2(cos_azi);
    let sin_alpha = cos_u1 * sin_azi;
    let cos_sqalpha = 1. - sin_alpha * sin_alpha;
    let u_sq = cos_sqalpha * (1. - b * b) / (b * b);
    let aa = 1. + u_sq / 16384. * (4096. + u_sq * (-768. + u_sq * (320. - 175. * u_sq)));
    let bb = u_sq / 1024. * (256. + u_sq * (-128. + u_sq * (74. - 47. * u_sq)));

    let mut sigma = s / (b * aa);
    let (mut sin_sig, mut cos_sig, mut cos_2sigm);

    let mut i = MAX_ITER;
    loop {
        cos_2sigm = (2. * sigma1 + sigma).cos();
        (sin_sig, cos_sig) = sigma.sin_cos();
        let dsig = bb
            * sin_sig
            * (cos_2sigm
                + bb / 4.
                    * (cos_sig * (-1. + 2. * cos_2sigm * cos_2sigm)
                        - bb / 6.
                            * cos_2sigm
                            * (-3. + 4. * sin_sig * sin_sig)
                            * (-3. + 4. * cos_2sigm * cos_2sigm)));
        let sigma_prev = sigma;
        sigma = s / (b * aa) + dsig;
        if (sigma - sigma_prev).abs() < TOL {
            break;
        }
        i -= 1;
        if i == 0 {
            return Err(Error::GeodesicConvError);
        }
    }

    let t = sin_u1 * sin_sig - cos_u1 * cos_sig * cos_azi;
    let phi2 = (sin_u1 * cos_sig + cos_u1 * sin_sig * cos_azi)
        .atan2((1. - f) * (sin_alpha * sin_alpha + t * t).sqrt());
    let lam = (sin_sig * sin_azi).atan2(cos_u1 * cos_sig - sin_u1 * sin_sig * cos_azi);
    let c = f / 16. * cos_sqalpha * (4. + f * (4. - 3. * cos_sqalpha));
    let ll = lam
        - (1. - c)
            * f
            * sin_alpha
            * (sigma
                + c * sin_sig * (cos_2sigm + c * cos_sig * (-1. + 2. * cos_2sigm * cos_2sigm)));

    Ok((phi2, lam1 + ll))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const F_GRS80: f64 = 1. / 298.257222101;

    #[test]
    fn vincenty_direct_inverts_inverse() {
        let (phi1, lam1) = (48.8566f64.to_radians(), 2.3522f64.to_radians());
        let (phi2, lam2) = (40.7128f64.to_radians(), -74.0060f64.to_radians());

        let (s, azi) = vincenty_inverse(F_GRS80, phi1, lam1, phi2, lam2).unwrap();
        let (rphi, rlam) = vincenty_direct(F_GRS80, phi1, lam1, azi, s).unwrap();

        assert_abs_diff_eq!(rphi, phi2, epsilon = 1e-11);
        assert_abs_diff_eq!(rlam, lam2, epsilon = 1e-11);
    }

    #[test]
    fn vincenty_known_distance() {
        // Paris - London, expected ~343.5 km
        let (s, _) = vincenty_inverse(
            F_GRS80,
            48.8566f64.to_radians(),
            2.3522f64.to_radians(),
            51.5074f64.to_radians(),
            -0.1278f64.to_radians(),
        )
        .unwrap();
        let km = s * 6378.137;
        assert!((343.0..345.0).contains(&km), "distance {km} km");
    }

    #[test]
    fn vincenty_coincident_points() {
        let (s, azi) = vincenty_inverse(F_GRS80, 0.5, 0.5, 0.5, 0.5).unwrap();
        assert_eq!((s, azi), (0., 0.));
    }
}
