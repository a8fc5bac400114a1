//!
//! Math utilities
//!
use crate::errors::{Error, Result};

pub(crate) mod consts {
    //!
    //! Numeric constants
    //!

    // Note that TAU is 2*PI
    pub(crate) use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

    // Was defined in proj4js for preventing divergence
    // of the Mollweide algorithm
    pub(crate) const EPS_10: f64 = 1.0e-10;

    // Other epsilon values in use
    pub(crate) const EPS_12: f64 = 1.0e-12;
    pub(crate) const EPS_7: f64 = 1.0e-7;

    pub(crate) const SEC_TO_RAD: f64 = 4.848_136_811_095_36e-6;
}

// The [`f64::asinh`] implementation uses a naive hypot which may
// overflow for arguments close to f64::MAX. Use the hypot-based
// formula instead.
#[inline]
pub(crate) fn asinh(x: f64) -> f64 {
    (x.abs() + 1.0f64.hypot(x)).ln().copysign(x)
}

// arcsin/arccos with clamping of rounding excursions slightly
// outside [-1, 1]. Genuine out of range arguments are errors.
const AASINCOS_TOL: f64 = 1.0e-10;

pub(crate) fn aasin(v: f64) -> Result<f64> {
    let av = v.abs();
    if av >= 1. {
        if av > 1. + AASINCOS_TOL {
            Err(Error::ToleranceConditionError)
        } else {
            Ok(std::f64::consts::FRAC_PI_2.copysign(v))
        }
    } else {
        Ok(v.asin())
    }
}

mod adjlon;
mod auth;
mod mlfn;
mod msfn;
mod phi2;
mod qsfn;
mod tsfn;
mod vincenty;

pub(crate) use adjlon::{adjlat, adjlon};
pub(crate) use auth::{authlat, authset, Apa};
pub(crate) use mlfn::{e0fn, e1fn, e2fn, e3fn, enfn, gmlfn, imlfn, inv_mlfn, mlfn, Enfn};
pub(crate) use msfn::msfn;
pub(crate) use phi2::phi2;
pub(crate) use qsfn::qsfn;
pub(crate) use tsfn::tsfn;
pub(crate) use vincenty::{vincenty_direct, vincenty_inverse};
