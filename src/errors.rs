//!
//! Crate errors
//!

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InputStringError(&'static str),
    #[error("Missing value for parameter {0}")]
    NoValueParameter(String),
    #[error("Cannot retrieve value for parameter {0}")]
    ParameterValueError(String),
    #[error("WKT parse error: {0}")]
    WktParseError(String),
    #[error("PROJJSON parse error: {0}")]
    JsonParseError(String),
    #[error("Missing projection name")]
    MissingProjectionError,
    #[error("Unrecognized datum")]
    InvalidDatum,
    #[error("Unrecognized ellipsoid")]
    InvalidEllipsoid,
    #[error("{0}")]
    InvalidParameterValue(&'static str),
    #[error("Latitude out of range")]
    LatitudeOutOfRange,
    #[error("Latitude or longitude over range")]
    LatOrLongExceedLimit,
    #[error("NAD grid not available")]
    NadGridNotAvailable,
    #[error("Inverse grid shift failed to converge")]
    InverseGridShiftConvError,
    #[error("Point outside NAD shift area")]
    PointOutsideNadShiftArea,
    #[error("Invalid 'towgs84' string")]
    InvalidToWGS84String,
    #[error("Invalid axis")]
    InvalidAxis,
    #[error("Nan value for coordinate")]
    NanCoordinateValue,
    #[error("Coordinate out of range")]
    CoordinateOutOfRange,
    #[error("Projection not found")]
    ProjectionNotFound,
    #[error("CRS definition not found: {0}")]
    CrsNotFound(String),
    #[error("No forward projection defined for dest projection")]
    NoForwardProjectionDefined,
    #[error("No inverse projection defined for src projection")]
    NoInverseProjectionDefined,
    #[error("Standard parallels cannot be equal and on opposite sides of the equator")]
    ProjErrConicLatEqual,
    #[error("Tolerance condition not satisfied")]
    ToleranceConditionError,
    #[error("Non convergence of phi2 calculation")]
    NonInvPhi2Convergence,
    #[error("No convergence for inv. meridian distance")]
    InvMeridDistConvError,
    #[error("Geodesic solution did not converge")]
    GeodesicConvError,
    #[error("Invalid UTM zone")]
    InvalidUtmZone,
    #[error("An ellipsoid is required")]
    EllipsoidRequired,
    #[error("Coordinate transform outside projection domain")]
    CoordTransOutsideProjectionDomain,
    #[error("Failed to compute inverse projection")]
    InverseProjectionFailure,
    #[error("Invalid Ntv2 grid format: {0}")]
    InvalidNtv2GridFormat(&'static str),
    #[error("Invalid GeoTIFF grid format: {0}")]
    InvalidGeoTiffFormat(&'static str),
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("UTF8 error")]
    Utf8Error(#[from] std::str::Utf8Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
