//!
//! CRS serializers
//!
//! Deterministic emission of a normalised definition in every
//! supported surface syntax. All serializers read the retained
//! [`crate::proj::Proj::defn`] record so a definition re-emits the
//! parameters it was built from.
//!
mod epsg;
mod projjson;
mod projstring;
mod wkt;

pub use epsg::guess_epsg;
pub use projjson::{to_projjson, to_projjson_pretty};
pub use projstring::to_proj_string;
pub use wkt::{to_wkt1, to_wkt2};

use crate::proj::Proj;

/// The effective projection parameters of a definition, with the
/// shorthand forms (utm zones) expanded. Shared by the WKT and
/// PROJJSON emitters.
pub(crate) struct MethodView {
    pub wkt1_name: &'static str,
    pub wkt2_name: &'static str,
    /// (wkt1 name, wkt2 name, value, kind)
    pub parameters: Vec<(&'static str, &'static str, f64, ParamKind)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ParamKind {
    Angular,
    Linear,
    Scale,
}

impl MethodView {
    pub(crate) fn new(proj: &Proj) -> Option<Self> {
        let defn = proj.defn();
        use ParamKind::*;

        let mut parameters: Vec<(&'static str, &'static str, f64, ParamKind)> = vec![];

        let mut push = |w1, w2, v, k| parameters.push((w1, w2, v, k));

        let lat_0 = |v: Option<f64>| v.unwrap_or(0.);

        let (wkt1_name, wkt2_name) = match defn.proj.as_str() {
            "utm" => {
                let zone = defn.zone.unwrap_or(0) as f64;
                push(
                    "latitude_of_origin",
                    "Latitude of natural origin",
                    0.,
                    Angular,
                );
                push(
                    "central_meridian",
                    "Longitude of natural origin",
                    6. * zone - 183.,
                    Angular,
                );
                push(
                    "scale_factor",
                    "Scale factor at natural origin",
                    0.9996,
                    Scale,
                );
                push("false_easting", "False easting", 500_000., Linear);
                push(
                    "false_northing",
                    "False northing",
                    if defn.south { 10_000_000. } else { 0. },
                    Linear,
                );
                ("Transverse_Mercator", "Transverse Mercator")
            }
            "tmerc" | "etmerc" => {
                push(
                    "latitude_of_origin",
                    "Latitude of natural origin",
                    lat_0(defn.lat_0),
                    Angular,
                );
                push(
                    "central_meridian",
                    "Longitude of natural origin",
                    lat_0(defn.lon_0),
                    Angular,
                );
                push(
                    "scale_factor",
                    "Scale factor at natural origin",
                    defn.k_0.unwrap_or(1.),
                    Scale,
                );
                push(
                    "false_easting",
                    "False easting",
                    defn.x_0.unwrap_or(0.),
                    Linear,
                );
                push(
                    "false_northing",
                    "False northing",
                    defn.y_0.unwrap_or(0.),
                    Linear,
                );
                ("Transverse_Mercator", "Transverse Mercator")
            }
            "lcc" => {
                let two_sp = defn.lat_2.is_some();
                if let Some(lat_1) = defn.lat_1 {
                    push(
                        "standard_parallel_1",
                        "Latitude of 1st standard parallel",
                        lat_1,
                        Angular,
                    );
                }
                if let Some(lat_2) = defn.lat_2 {
                    push(
                        "standard_parallel_2",
                        "Latitude of 2nd standard parallel",
                        lat_2,
                        Angular,
                    );
                }
                push(
                    "latitude_of_origin",
                    "Latitude of false origin",
                    lat_0(defn.lat_0.or(defn.lat_1)),
                    Angular,
                );
                push(
                    "central_meridian",
                    "Longitude of false origin",
                    lat_0(defn.lon_0),
                    Angular,
                );
                if let Some(k_0) = defn.k_0 {
                    push("scale_factor", "Scale factor at natural origin", k_0, Scale);
                }
                push(
                    "false_easting",
                    "Easting at false origin",
                    defn.x_0.unwrap_or(0.),
                    Linear,
                );
                push(
                    "false_northing",
                    "Northing at false origin",
                    defn.y_0.unwrap_or(0.),
                    Linear,
                );
                if two_sp {
                    (
                        "Lambert_Conformal_Conic_2SP",
                        "Lambert Conic Conformal (2SP)",
                    )
                } else {
                    (
                        "Lambert_Conformal_Conic_1SP",
                        "Lambert Conic Conformal (1SP)",
                    )
                }
            }
            "aea" => {
                push(
                    "standard_parallel_1",
                    "Latitude of 1st standard parallel",
                    lat_0(defn.lat_1),
                    Angular,
                );
                push(
                    "standard_parallel_2",
                    "Latitude of 2nd standard parallel",
                    lat_0(defn.lat_2),
                    Angular,
                );
                push(
                    "latitude_of_origin",
                    "Latitude of false origin",
                    lat_0(defn.lat_0),
                    Angular,
                );
                push(
                    "central_meridian",
                    "Longitude of false origin",
                    lat_0(defn.lon_0),
                    Angular,
                );
                push(
                    "false_easting",
                    "Easting at false origin",
                    defn.x_0.unwrap_or(0.),
                    Linear,
                );
                push(
                    "false_northing",
                    "Northing at false origin",
                    defn.y_0.unwrap_or(0.),
                    Linear,
                );
                ("Albers_Conic_Equal_Area", "Albers Equal Area")
            }
            "merc" | "webmerc" => {
                let variant_b = defn.lat_ts.is_some();
                if let Some(lat_ts) = defn.lat_ts {
                    push(
                        "standard_parallel_1",
                        "Latitude of standard parallel",
                        lat_ts,
                        Angular,
                    );
                } else {
                    push(
                        "scale_factor",
                        "Scale factor at natural origin",
                        defn.k_0.unwrap_or(1.),
                        Scale,
                    );
                }
                push(
                    "central_meridian",
                    "Longitude of natural origin",
                    lat_0(defn.lon_0),
                    Angular,
                );
                push(
                    "false_easting",
                    "False easting",
                    defn.x_0.unwrap_or(0.),
                    Linear,
                );
                push(
                    "false_northing",
                    "False northing",
                    defn.y_0.unwrap_or(0.),
                    Linear,
                );
                if defn.proj == "webmerc" {
                    (
                        "Mercator_Auxiliary_Sphere",
                        "Popular Visualisation Pseudo Mercator",
                    )
                } else if variant_b {
                    ("Mercator_2SP", "Mercator (variant B)")
                } else {
                    ("Mercator_1SP", "Mercator (variant A)")
                }
            }
            "stere" | "ups" => {
                let polar = defn.proj == "ups"
                    || defn.lat_0.map(|l| l.abs() == 90.).unwrap_or(false);
                push(
                    "latitude_of_origin",
                    "Latitude of natural origin",
                    if defn.proj == "ups" {
                        if defn.south {
                            -90.
                        } else {
                            90.
                        }
                    } else {
                        lat_0(defn.lat_0)
                    },
                    Angular,
                );
                if let Some(lat_ts) = defn.lat_ts {
                    push(
                        "standard_parallel_1",
                        "Latitude of standard parallel",
                        lat_ts,
                        Angular,
                    );
                }
                push(
                    "central_meridian",
                    "Longitude of natural origin",
                    lat_0(defn.lon_0),
                    Angular,
                );
                push(
                    "scale_factor",
                    "Scale factor at natural origin",
                    if defn.proj == "ups" {
                        0.994
                    } else {
                        defn.k_0.unwrap_or(1.)
                    },
                    Scale,
                );
                push(
                    "false_easting",
                    "False easting",
                    if defn.proj == "ups" {
                        2_000_000.
                    } else {
                        defn.x_0.unwrap_or(0.)
                    },
                    Linear,
                );
                push(
                    "false_northing",
                    "False northing",
                    if defn.proj == "ups" {
                        2_000_000.
                    } else {
                        defn.y_0.unwrap_or(0.)
                    },
                    Linear,
                );
                if polar {
                    ("Polar_Stereographic", "Polar Stereographic (variant A)")
                } else {
                    ("Oblique_Stereographic", "Oblique Stereographic")
                }
            }
            "aeqd" => {
                push(
                    "latitude_of_center",
                    "Latitude of natural origin",
                    lat_0(defn.lat_0),
                    Angular,
                );
                push(
                    "longitude_of_center",
                    "Longitude of natural origin",
                    lat_0(defn.lon_0),
                    Angular,
                );
                push(
                    "false_easting",
                    "False easting",
                    defn.x_0.unwrap_or(0.),
                    Linear,
                );
                push(
                    "false_northing",
                    "False northing",
                    defn.y_0.unwrap_or(0.),
                    Linear,
                );
                ("Azimuthal_Equidistant", "Azimuthal Equidistant")
            }
            "cea" => {
                push(
                    "standard_parallel_1",
                    "Latitude of 1st standard parallel",
                    lat_0(defn.lat_ts),
                    Angular,
                );
                push(
                    "central_meridian",
                    "Longitude of natural origin",
                    lat_0(defn.lon_0),
                    Angular,
                );
                push(
                    "false_easting",
                    "False easting",
                    defn.x_0.unwrap_or(0.),
                    Linear,
                );
                push(
                    "false_northing",
                    "False northing",
                    defn.y_0.unwrap_or(0.),
                    Linear,
                );
                ("Cylindrical_Equal_Area", "Lambert Cylindrical Equal Area")
            }
            "eqc" => {
                push(
                    "standard_parallel_1",
                    "Latitude of 1st standard parallel",
                    lat_0(defn.lat_ts),
                    Angular,
                );
                push(
                    "latitude_of_origin",
                    "Latitude of natural origin",
                    lat_0(defn.lat_0),
                    Angular,
                );
                push(
                    "central_meridian",
                    "Longitude of natural origin",
                    lat_0(defn.lon_0),
                    Angular,
                );
                push(
                    "false_easting",
                    "False easting",
                    defn.x_0.unwrap_or(0.),
                    Linear,
                );
                push(
                    "false_northing",
                    "False northing",
                    defn.y_0.unwrap_or(0.),
                    Linear,
                );
                ("Equirectangular", "Equidistant Cylindrical")
            }
            "sinu" | "robin" | "moll" | "wag4" | "wag5" => {
                push(
                    "central_meridian",
                    "Longitude of natural origin",
                    lat_0(defn.lon_0),
                    Angular,
                );
                push(
                    "false_easting",
                    "False easting",
                    defn.x_0.unwrap_or(0.),
                    Linear,
                );
                push(
                    "false_northing",
                    "False northing",
                    defn.y_0.unwrap_or(0.),
                    Linear,
                );
                match defn.proj.as_str() {
                    "sinu" => ("Sinusoidal", "Sinusoidal"),
                    "robin" => ("Robinson", "Robinson"),
                    _ => ("Mollweide", "Mollweide"),
                }
            }
            _ => return None,
        };

        Some(Self {
            wkt1_name,
            wkt2_name,
            parameters,
        })
    }
}
