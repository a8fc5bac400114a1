//!
//! Geodetic to/from geocentric conversion
//!
use crate::errors::{Error, Result};
use crate::math::consts::{FRAC_PI_2, PI, TAU};

const GENAU: f64 = 1.0e-12;
const GENAU2: f64 = GENAU * GENAU;
const MAXITER: usize = 30;
const FRAC_PI_2_EPS: f64 = 1.001 * FRAC_PI_2;

/// Convert geodetic coordinates to geocentric coordinates
///
/// Latitude and longitude are in radians, height in meters above the
/// ellipsoid. The returned (X, Y, Z) are in meters: the first axis
/// points from the Earth centre to (lon 0, lat 0), the second to
/// (lon 90, lat 0) and the third to the North pole.
///
/// Latitudes slightly beyond +/- pi/2 (up to 0.1%) are snapped onto the
/// pole; anything further out is an error.
pub fn geodetic_to_geocentric(x: f64, y: f64, z: f64, a: f64, es: f64) -> Result<(f64, f64, f64)> {
    let mut lon = x;
    let mut lat = y;

    if lat < -FRAC_PI_2 && lat > -FRAC_PI_2_EPS {
        lat = -FRAC_PI_2
    } else if lat > FRAC_PI_2 && lat < FRAC_PI_2_EPS {
        lat = FRAC_PI_2
    } else if !(-FRAC_PI_2..=FRAC_PI_2).contains(&lat) {
        return Err(Error::LatitudeOutOfRange);
    };

    if lon > PI {
        // TAU is 2PI
        lon -= TAU;
    }

    let (sin_lat, cos_lat) = lat.sin_cos();
    // Earth radius at location
    let rn = a / (1. - es * (sin_lat * sin_lat)).sqrt();
    Ok((
        (rn + z) * cos_lat * lon.cos(),
        (rn + z) * cos_lat * lon.sin(),
        ((rn * (1. - es)) + z) * sin_lat,
    ))
}

/// Convert geocentric coordinates to geodetic coordinates
///
/// Iterative method from the Institut fuer Erdmessung, University of
/// Hannover. CPHI and SPHI are iterated to 1e-12 radian; for normal
/// heights the algorithm converges in 2-3 steps. Of the symmetric
/// solutions the one with the smallest |height| is computed.
pub fn geocentric_to_geodetic(
    x: f64,
    y: f64,
    z: f64,
    a: f64,
    es: f64,
    b: f64,
) -> Result<(f64, f64, f64)> {
    let d2 = (x * x) + (y * y);

    // distance between semi-minor axis and location
    let p = d2.sqrt();
    // distance between center and location
    let rr = (d2 + z * z).sqrt();

    // if (X,Y,Z)=(0.,0.,0.) then Height becomes semi-minor axis
    // of ellipsoid (=center of mass), Latitude becomes PI/2
    let lon = if p / a < GENAU {
        if rr / a < GENAU {
            return Ok((0., FRAC_PI_2, -b));
        }
        0.
    } else {
        y.atan2(x)
    };

    let ct = z / rr;
    let st = p / rr;
    let mut rx = 1.0 / (1.0 - es * (2.0 - es) * st * st).sqrt();
    let mut cphi0 = st * (1.0 - es) * rx;
    let mut sphi0 = ct * rx;
    let (mut rk, mut rn, mut cphi, mut sphi, mut sdphi, mut height);

    // loop to find sin(Latitude) resp. Latitude
    // until |sin(Latitude(iter)-Latitude(iter-1))| < genau
    let mut iter = 0;
    loop {
        iter += 1;
        rn = a / (1.0 - es * sphi0 * sphi0).sqrt();
        // ellipsoidal (geodetic) height
        height = p * cphi0 + z * sphi0 - rn * (1.0 - es * sphi0 * sphi0);

        // avoid zero division
        if (rn + height) == 0. {
            return Ok((lon, 0., height));
        }

        rk = es * rn / (rn + height);
        rx = 1.0 / (1.0 - rk * (2.0 - rk) * st * st).sqrt();
        cphi = st * (1.0 - rk) * rx;
        sphi = ct * rx;
        sdphi = sphi * cphi0 - cphi * sphi0;
        cphi0 = cphi;
        sphi0 = sphi;

        if sdphi * sdphi <= GENAU2 {
            break;
        }

        if iter >= MAXITER {
            break;
        }
    }

    // ellipsoidal (geodetic) latitude
    Ok((lon, sphi.atan2(cphi.abs()), height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const A: f64 = 6378137.0;
    const ES: f64 = 0.0066943799901413165;
    const B: f64 = 6356752.314;

    #[test]
    fn geocent_roundtrip() {
        let (lon, lat, h) = (2.3522f64.to_radians(), 48.8566f64.to_radians(), 120.);
        let (x, y, z) = geodetic_to_geocentric(lon, lat, h, A, ES).unwrap();
        let (rlon, rlat, rh) = geocentric_to_geodetic(x, y, z, A, ES, B).unwrap();
        assert_abs_diff_eq!(rlon, lon, epsilon = 1e-12);
        assert_abs_diff_eq!(rlat, lat, epsilon = 1e-12);
        assert_abs_diff_eq!(rh, h, epsilon = 1e-6);
    }

    #[test]
    fn geocent_origin() {
        let (lon, lat, h) = geocentric_to_geodetic(0., 0., 0., A, ES, B).unwrap();
        assert_eq!(lon, 0.);
        assert_eq!(lat, FRAC_PI_2);
        assert_eq!(h, -B);
    }

    #[test]
    fn geocent_pole_snapping() {
        // 0.1% over the pole is tolerated
        let lat = FRAC_PI_2 * 1.0005;
        assert!(geodetic_to_geocentric(0., lat, 0., A, ES).is_ok());
        // further out is an error
        let lat = FRAC_PI_2 * 1.002;
        assert!(matches!(
            geodetic_to_geocentric(0., lat, 0., A, ES),
            Err(Error::LatitudeOutOfRange)
        ));
    }
}
