//!
//! Datum transformation
//!
use crate::datum_params::DatumParams;
use crate::ellps::Ellipsoid;
use crate::errors::Result;
use crate::geocent::{geocentric_to_geodetic, geodetic_to_geocentric};
use crate::transform::Direction;

use DatumParams::*;

const SRS_WGS84_SEMIMAJOR: f64 = 6378137.0;
const SRS_WGS84_SEMIMINOR: f64 = 6356752.314;
const SRS_WGS84_ES: f64 = 0.0066943799901413165;

// Tolerance on the eccentricity comparison, loose enough
// for GRS80 and WGS84 to be considered identical
const ES_TOLERANCE: f64 = 0.000000000050;

/// Hold datum information
///
/// When grid shifting is in use, the geocentric roundtrip runs on the
/// WGS84 ellipsoid since shifted coordinates are WGS84 based.
#[derive(Debug, Clone)]
pub struct Datum {
    pub(crate) params: DatumParams,
    pub(crate) a: f64,
    pub(crate) b: f64,
    pub(crate) es: f64,
}

impl Datum {
    pub fn new(ellps: &Ellipsoid, params: DatumParams) -> Self {
        if matches!(params, NadGrids(_)) {
            Self {
                params,
                a: SRS_WGS84_SEMIMAJOR,
                b: SRS_WGS84_SEMIMINOR,
                es: SRS_WGS84_ES,
            }
        } else {
            Self {
                params,
                a: ellps.a,
                b: ellps.b,
                es: ellps.es,
            }
        }
    }

    /// Convert from geodetic coordinates to wgs84 geocentric
    pub fn towgs84(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        match &self.params {
            ToWGS84_0 => geodetic_to_geocentric(x, y, z, self.a, self.es),
            ToWGS84_3(dx, dy, dz) => geodetic_to_geocentric(x, y, z, self.a, self.es)
                .map(|(x, y, z)| (x + dx, y + dy, z + dz)),
            ToWGS84_7(dx, dy, dz, rx, ry, rz, s) => {
                geodetic_to_geocentric(x, y, z, self.a, self.es).map(|(x, y, z)| {
                    (
                        dx + s * (x - rz * y + ry * z),
                        dy + s * (rz * x + y - rx * z),
                        dz + s * (-ry * x + rx * y + z),
                    )
                })
            }
            NadGrids(grids) => grids
                .apply_shift(Direction::Forward, x, y, z)
                .and_then(|(x, y, z)| geodetic_to_geocentric(x, y, z, self.a, self.es)),
            NoDatum => Ok((x, y, z)),
        }
    }

    /// Convert from wgs84 geocentric to geodetic coordinates
    pub fn fromwgs84(&self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        match &self.params {
            ToWGS84_0 => geocentric_to_geodetic(x, y, z, self.a, self.es, self.b),
            ToWGS84_3(dx, dy, dz) => {
                geocentric_to_geodetic(x - dx, y - dy, z - dz, self.a, self.es, self.b)
            }
            ToWGS84_7(dx, dy, dz, rx, ry, rz, s) => {
                let (x, y, z) = ((x - dx) / s, (y - dy) / s, (z - dz) / s);
                geocentric_to_geodetic(
                    x + rz * y - ry * z,
                    -rz * x + y + rx * z,
                    ry * x - rx * y + z,
                    self.a,
                    self.es,
                    self.b,
                )
            }
            NadGrids(grids) => geocentric_to_geodetic(x, y, z, self.a, self.es, self.b)
                .and_then(|(x, y, z)| grids.apply_shift(Direction::Inverse, x, y, z)),
            NoDatum => Ok((x, y, z)),
        }
    }

    #[inline]
    pub fn uses_nadgrids(&self) -> bool {
        matches!(self.params, NadGrids(_))
    }

    #[inline]
    pub fn no_datum(&self) -> bool {
        matches!(self.params, NoDatum)
    }

    pub fn is_identical_to(&self, other: &Self) -> bool {
        (self.uses_nadgrids() && other.uses_nadgrids() || self.params == other.params)
            && self.a == other.a
            && (self.es - other.es).abs() < ES_TOLERANCE
    }

    /// Datum to datum transformation through WGS84 geocentric space
    ///
    /// Following the historical PROJ 4.6.0 behavior, no transformation
    /// is applied if either side opted out of datum handling.
    pub fn transform(src: &Self, dst: &Self, x: f64, y: f64, z: f64) -> Result<(f64, f64, f64)> {
        if src.no_datum() || dst.no_datum() || src.is_identical_to(dst) {
            Ok((x, y, z))
        } else {
            src.towgs84(x, y, z)
                .and_then(|(x, y, z)| dst.fromwgs84(x, y, z))
        }
    }
}
