//!
//! Coordinate reference system transformation library
//!
//! Based on the proj4 family of algorithms.
//!
//! References:
//! * <http://docs.opengeospatial.org/as/18-005r5/18-005r5.html>
//! * <https://proj.org/development/reference/cpp/cpp_general.html>
//!
//! The crate converts coordinates between any two CRSs declared in
//! PROJ-string, WKT1, WKT2 or PROJJSON form, or registered under an
//! authority code. The transformation pipeline composes unit and axis
//! normalisation, inverse projection, datum shift (Helmert parameters or
//! grid interpolation) and forward projection, with the classic proj4
//! short-circuits for identical datums.
//!
//! The crate performs no I/O: grid-shift files (NTv2, GeoTIFF) are handed
//! over as raw byte slices through [`nadgrids`].
//!

mod datum_params;
mod datum_transform;
mod datums;
mod defn;
mod ellipsoids;
mod ellps;
mod geocent;
mod math;
mod parameters;
mod prime_meridians;
mod projstring;
mod units;

pub mod adaptors;
pub mod errors;
pub mod nadgrids;
pub mod point;
pub mod proj;
pub mod projections;
pub mod projjson;
pub mod registry;
pub mod serializers;
pub mod transform;
pub mod transformer;
pub mod wkt;

// Reexports
pub use defn::Defn;
pub use point::Point;
pub use proj::Proj;
pub use transformer::Transformer;

#[cfg(test)]
mod tests;

// log for logging (optional).
#[cfg(feature = "logging")]
use log;

#[cfg(not(feature = "logging"))]
mod log {
    // Use __XXX__ to prevent 'ambiguous name' error
    // when exporting
    macro_rules! __trace__    ( ($($tt:tt)*) => {{}} );
    macro_rules! __debug__    ( ($($tt:tt)*) => {{}} );
    macro_rules! __error__    ( ($($tt:tt)*) => {{}} );
    macro_rules! __info__     ( ($($tt:tt)*) => {{}} );
    macro_rules! __warn__     ( ($($tt:tt)*) => {{}} );

    #[allow(unused_imports)]
    pub(crate) use {
        __debug__ as debug, __error__ as error, __info__ as info, __trace__ as trace,
        __warn__ as warn,
    };
}
