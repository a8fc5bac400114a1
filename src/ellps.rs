//!
//! Derived values for ellipsoids
//!
//! A complete ellipsoid definition comprises a size (primary) and a shape
//! (secondary) parameter.
//!
//! Size parameters supported are:
//!     R, defining the radius of a spherical planet
//!     a, defining the semimajor axis of an ellipsoidal planet
//!
//! Shape parameters supported are:
//!     rf, the reverse flattening of the ellipsoid
//!     f,  the flattening of the ellipsoid
//!     es, the eccentricity squared
//!     e,  the eccentricity
//!     b,  the semiminor axis
//!
//! The ellps=xxx parameter provides both size and shape for a number of
//! built in ellipsoid definitions.
//!
//! The ellipsoid definition may be augmented with a spherification flag:
//! `sphere` collapses the ellipsoid onto its semimajor axis, `R_A` gives
//! a sphere with the same surface area as the ellipsoid.
//!
use crate::datums::DatumDefn;
use crate::ellipsoids::{self, EllipsoidDefn, FlatteningParam};
use crate::errors::{Error, Result};
use crate::parameters::ParamList;

const EPSLN: f64 = 1.0e-10;

// series coefficients for the authalic mean radius
const SIXTH: f64 = 1. / 6.;
const RA4: f64 = 17. / 360.;
const RA6: f64 = 67. / 3024.;

#[derive(Debug, Clone, PartialEq)]
pub struct Ellipsoid {
    // The linear parameters
    pub a: f64,  // semimajor axis (radius if eccentricity==0)
    pub b: f64,  // semiminor axis
    pub ra: f64, // 1/a

    // The eccentricities
    pub e: f64,       // first eccentricity
    pub es: f64,      // first eccentricity squared
    pub ep2: f64,     // second eccentricity squared
    pub one_es: f64,  // 1 - e^2
    pub rone_es: f64, // 1/one_es

    // The flattenings
    pub f: f64,  // first flattening
    pub rf: f64, // 1/f
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self {
            a: 0.,
            b: 0.,
            ra: 0.,
            e: 0.,
            es: 0.,
            ep2: 0.,
            one_es: 1.,
            rone_es: 1.,
            f: 0.,
            rf: f64::INFINITY,
        }
    }
}

/// A shape parameter
/// by order of precedence
#[allow(non_camel_case_types)]
enum ShapeParameter {
    SP_rf(f64),
    SP_f(f64),
    SP_es(f64),
    SP_e(f64),
    SP_b(f64),
}

use ShapeParameter::*;

impl Ellipsoid {
    /// Create sphere parameters
    pub fn sphere(radius: f64) -> Result<Self> {
        if !radius.is_normal() || radius <= 0. {
            return Err(Error::InvalidParameterValue("Invalid radius"));
        }
        Ok(Self {
            a: radius,
            b: radius,
            ra: 1. / radius,
            ..Default::default()
        })
    }

    #[inline]
    pub fn is_sphere(&self) -> bool {
        self.es == 0.
    }

    #[inline]
    pub fn is_ellipsoid(&self) -> bool {
        self.es != 0.
    }

    pub(crate) fn try_from_ellipsoid(defn: &EllipsoidDefn) -> Result<Self> {
        Self::calc_params(
            defn.a,
            match defn.rf_or_b {
                FlatteningParam::InvFlat(rf) => SP_rf(rf),
                FlatteningParam::MinorAxis(b) => SP_b(b),
            },
        )
    }

    pub(crate) fn try_from_ellipsoid_with_params(
        defn: &EllipsoidDefn,
        params: &ParamList,
    ) -> Result<Self> {
        let a = params.try_value::<f64>("a")?.unwrap_or(defn.a);
        Self::find_shape_parameter(params)
            .unwrap_or(Ok(match defn.rf_or_b {
                FlatteningParam::InvFlat(rf) => SP_rf(rf),
                FlatteningParam::MinorAxis(b) => SP_b(b),
            }))
            .and_then(|sp| Self::calc_params(a, sp))
            .map(|ellps| ellps.spherification(params))
    }

    /// Resolve the ellipsoid from the parameter list
    ///
    /// Precedence: a sphere radius `R` overrides everything, then an
    /// explicit `ellps` name, then the datum's default ellipsoid, then
    /// explicit `a` with a shape parameter, then WGS84.
    pub(crate) fn from_params(
        params: &ParamList,
        datum_def: Option<&DatumDefn>,
    ) -> Result<Self> {
        if let Some(radius) = params.get("R") {
            Self::sphere(radius.try_into()?)
        } else if let Some(p) = params.get("ellps") {
            match ellipsoids::find_ellipsoid(p.try_into()?) {
                Some(defn) => Self::try_from_ellipsoid_with_params(defn, params),
                None => Err(Error::InvalidEllipsoid),
            }
        } else if let Some(defn) = datum_def {
            Self::try_from_ellipsoid_with_params(defn.ellps, params)
        } else if let Some(a) = params.try_value::<f64>("a")? {
            match Self::find_shape_parameter(params) {
                Some(sp) => Self::calc_params(a, sp?).map(|e| e.spherification(params)),
                // No shape parameter: sphere of radius a
                None => Self::sphere(a),
            }
        } else {
            Self::try_from_ellipsoid_with_params(&ellipsoids::constants::WGS84, params)
        }
    }

    fn find_shape_parameter(params: &ParamList) -> Option<Result<ShapeParameter>> {
        let get = |name: &str| params.try_value::<f64>(name).transpose();
        if let Some(rf) = get("rf") {
            Some(rf.map(SP_rf))
        } else if let Some(f) = get("f") {
            Some(f.map(SP_f))
        } else if let Some(es) = get("es") {
            Some(es.map(SP_es))
        } else if let Some(e) = get("e") {
            Some(e.map(SP_e))
        } else {
            get("b").map(|b| b.map(SP_b))
        }
    }

    /// Apply spherification flags
    fn spherification(mut self, params: &ParamList) -> Self {
        if params.check_option("R_A").unwrap_or(false) {
            // Authalic mean radius
            let es = self.es;
            let a = self.a * (1. - es * (SIXTH + es * (RA4 + es * RA6)));
            self = Self {
                a,
                b: a,
                ra: 1. / a,
                ..Default::default()
            };
        } else if params.check_option("sphere").unwrap_or(false) {
            self = Self {
                a: self.a,
                b: self.a,
                ra: 1. / self.a,
                ..Default::default()
            };
        }
        self
    }

    /// Calculate derived parameters given a and a shape parameter
    fn calc_params(a: f64, sp: ShapeParameter) -> Result<Self> {
        if a <= 0. {
            return Err(Error::InvalidParameterValue("Invalid major axis"));
        }

        let mut el = Ellipsoid {
            a,
            ..Default::default()
        };

        match sp {
            SP_rf(rf) => {
                if rf <= 1. {
                    return Err(Error::InvalidParameterValue("Invalid inverse flattening"));
                }
                let f = 1. / rf;
                el.f = f;
                el.rf = rf;
                el.es = 2. * f - f * f;
                el.b = (1.0 - f) * a;
            }
            SP_f(f) => {
                if !(0. ..1.).contains(&f) {
                    return Err(Error::InvalidParameterValue("Invalid flattening"));
                }
                el.f = f;
                el.es = 2. * f - f * f;
                el.b = (1.0 - f) * a;
                if f > 0. {
                    el.rf = 1. / f;
                }
            }
            SP_es(es) => {
                if !(0. ..1.).contains(&es) {
                    return Err(Error::InvalidParameterValue("Invalid eccentricity"));
                }
                el.es = es;
                el.f = 1. - (1. - es).sqrt();
                el.b = (1.0 - el.f) * a;
                if el.f > 0. {
                    el.rf = 1. / el.f;
                }
            }
            SP_e(e) => {
                if !(0. ..1.).contains(&e) {
                    return Err(Error::InvalidParameterValue("Invalid eccentricity"));
                }
                el.es = e * e;
                el.f = 1. - (1. - el.es).sqrt();
                el.b = (1.0 - el.f) * a;
                if el.f > 0. {
                    el.rf = 1. / el.f;
                }
            }
            SP_b(b) => {
                if b <= 0. || b > a {
                    return Err(Error::InvalidParameterValue("Invalid minor axis"));
                }
                let a2 = a * a;
                let b2 = b * b;
                el.b = b;
                el.es = (a2 - b2) / a2;
                el.f = (a - b) / a;
                if el.f > 0. {
                    el.rf = 1. / el.f;
                }
            }
        }

        if (a - el.b).abs() < EPSLN {
            el.b = a;
            el.es = 0.;
            el.f = 0.;
            el.rf = f64::INFINITY;
        }

        el.e = el.es.sqrt();
        el.one_es = 1. - el.es;
        el.rone_es = 1. / el.one_es;
        el.ep2 = (a * a - el.b * el.b) / (el.b * el.b);
        el.ra = 1. / el.a;

        Ok(el)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projstring;
    use approx::assert_abs_diff_eq;

    #[test]
    fn ellps_from_name() {
        let params = projstring::parse("+ellps=GRS80").unwrap();
        let el = Ellipsoid::from_params(&params, None).unwrap();
        assert_eq!(el.a, 6_378_137.);
        assert_abs_diff_eq!(el.es, 0.006_694_380_022_903_416, epsilon = 1e-15);
        assert_abs_diff_eq!(el.b, 6_356_752.314_140_356, epsilon = 1e-6);
        assert!(el.is_ellipsoid());
    }

    #[test]
    fn ellps_a_b_gives_rf() {
        let params = projstring::parse("+a=6378137 +b=6356752.314245179").unwrap();
        let el = Ellipsoid::from_params(&params, None).unwrap();
        // WGS84 inverse flattening
        assert_abs_diff_eq!(el.rf, 298.257_223_563, epsilon = 1e-6);
    }

    #[test]
    fn ellps_web_mercator_sphere() {
        let params = projstring::parse("+a=6378137 +b=6378137").unwrap();
        let el = Ellipsoid::from_params(&params, None).unwrap();
        assert!(el.is_sphere());
        assert_eq!(el.rf, f64::INFINITY);
    }

    #[test]
    fn ellps_defaults_to_wgs84() {
        let params = projstring::parse("+proj=longlat").unwrap();
        let el = Ellipsoid::from_params(&params, None).unwrap();
        assert_eq!(el.a, 6_378_137.);
        assert_abs_diff_eq!(el.rf, 298.257_223_563, epsilon = 1e-9);
    }

    #[test]
    fn ellps_authalic_radius() {
        let params = projstring::parse("+ellps=GRS80 +R_A").unwrap();
        let el = Ellipsoid::from_params(&params, None).unwrap();
        assert!(el.is_sphere());
        // close to the GRS80 authalic sphere radius
        assert_abs_diff_eq!(el.a, 6_371_007.2, epsilon = 1.0);
    }

    #[test]
    fn ellps_invalid_name() {
        let params = projstring::parse("+ellps=foo").unwrap();
        assert!(matches!(
            Ellipsoid::from_params(&params, None),
            Err(Error::InvalidEllipsoid)
        ));
    }
}
