//!
//! Datum shift parameters
//!
use crate::datums::DatumParamDefn;
use crate::errors::{Error, Result};
use crate::math::consts::SEC_TO_RAD;
use crate::nadgrids::NadGrids;

/// Datum parameters
///
/// Rotation terms of the 7 parameter variant are stored in radians and
/// the scale as the plain factor `1 + ppm * 1e-6`, both converted at
/// parse time.
#[derive(Clone, Debug, PartialEq)]
pub enum DatumParams {
    ToWGS84_0,
    ToWGS84_3(f64, f64, f64),
    ToWGS84_7(f64, f64, f64, f64, f64, f64, f64),
    NadGrids(NadGrids),
    NoDatum,
}

// A definition without datum information opts out of datum shifting
impl Default for DatumParams {
    fn default() -> Self {
        DatumParams::NoDatum
    }
}

impl DatumParams {
    /// Create parameters from a 'towgs84' like string
    ///
    /// Translations are in meters, rotations in seconds of arc
    /// and the scale in parts per million.
    pub fn from_towgs84_str(towgs84: &str) -> Result<Self> {
        #[inline]
        fn parse(v: Option<&str>) -> Result<f64> {
            v.ok_or(Error::InvalidToWGS84String)?
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::InvalidToWGS84String)
        }

        let mut i = towgs84.split(',');
        match towgs84.split(',').count() {
            3 => Ok(DatumParams::ToWGS84_3(
                parse(i.next())?,
                parse(i.next())?,
                parse(i.next())?,
            )),
            7 => Ok(DatumParams::ToWGS84_7(
                parse(i.next())?,
                parse(i.next())?,
                parse(i.next())?,
                parse(i.next())? * SEC_TO_RAD,
                parse(i.next())? * SEC_TO_RAD,
                parse(i.next())? * SEC_TO_RAD,
                parse(i.next())? / 1_000_000.0 + 1.,
            )),
            _ => Err(Error::InvalidToWGS84String),
        }
        .map(Self::normalized)
    }

    /// Create parameters from a 'nadgrids' list
    ///
    /// The `@null` sentinel opts out of datum shifting entirely.
    pub fn from_nadgrid_str(nadgrids: &str) -> Result<Self> {
        if nadgrids.trim() == "@null" || nadgrids.trim() == "null" {
            Ok(Self::NoDatum)
        } else {
            NadGrids::new_grid_transform(nadgrids).map(Self::NadGrids)
        }
    }

    // All zero parameters mean a plain WGS84 conversion
    fn normalized(self) -> Self {
        match self {
            Self::ToWGS84_3(0., 0., 0.) => Self::ToWGS84_0,
            Self::ToWGS84_7(0., 0., 0., 0., 0., 0., s) if s == 1. => Self::ToWGS84_0,
            other => other,
        }
    }

    #[inline]
    pub fn no_datum(&self) -> bool {
        matches!(self, Self::NoDatum)
    }
}

// Convert from datum parameters definition
impl TryFrom<&DatumParamDefn> for DatumParams {
    type Error = Error;

    fn try_from(defn: &DatumParamDefn) -> Result<Self> {
        match defn {
            DatumParamDefn::ToWGS84_0 => Ok(Self::ToWGS84_0),
            DatumParamDefn::ToWGS84_3(dx, dy, dz) => {
                Ok(Self::ToWGS84_3(*dx, *dy, *dz).normalized())
            }
            DatumParamDefn::ToWGS84_7(dx, dy, dz, rx, ry, rz, s) => Ok(Self::ToWGS84_7(
                *dx,
                *dy,
                *dz,
                *rx * SEC_TO_RAD,
                *ry * SEC_TO_RAD,
                *rz * SEC_TO_RAD,
                *s / 1_000_000.0 + 1.,
            )),
            DatumParamDefn::NadGrids(s) => Self::from_nadgrid_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datum_params_towgs84_3() {
        let p = DatumParams::from_towgs84_str("-87,-98,-121").unwrap();
        assert_eq!(p, DatumParams::ToWGS84_3(-87., -98., -121.));
    }

    #[test]
    fn datum_params_towgs84_7_converts_units() {
        let p = DatumParams::from_towgs84_str("414.1,41.3,603.1,-0.855,2.141,-7.023,0").unwrap();
        match p {
            DatumParams::ToWGS84_7(dx, _, _, rx, _, _, s) => {
                assert_eq!(dx, 414.1);
                assert_eq!(rx, -0.855 * SEC_TO_RAD);
                assert_eq!(s, 1.0);
            }
            _ => panic!("expected 7 parameters"),
        }
    }

    #[test]
    fn datum_params_zero_normalized() {
        assert_eq!(
            DatumParams::from_towgs84_str("0,0,0").unwrap(),
            DatumParams::ToWGS84_0
        );
        assert_eq!(
            DatumParams::from_towgs84_str("0,0,0,0,0,0,0").unwrap(),
            DatumParams::ToWGS84_0
        );
    }

    #[test]
    fn datum_params_null_grid() {
        assert!(DatumParams::from_nadgrid_str("@null").unwrap().no_datum());
    }

    #[test]
    fn datum_params_invalid() {
        assert!(DatumParams::from_towgs84_str("1,2").is_err());
        assert!(DatumParams::from_towgs84_str("a,b,c").is_err());
    }
}
