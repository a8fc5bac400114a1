//!
//! Projection method and parameter name mappings
//!
//! Maps WKT1 projection names and WKT2/EPSG method names onto the
//! proj method names, and their parameter names onto proj parameter
//! keys. Matching is case insensitive and treats spaces and
//! underscores alike, which covers the ESRI flavored spellings.
//!
use crate::wkt::model::{Parameter, UnitType};

pub struct ParamMapping {
    pub wkt_names: &'static [&'static str],
    pub proj_name: &'static str,
    pub unit_type: UnitType,
}

pub struct MethodMapping {
    pub wkt_names: &'static [&'static str],
    pub proj_name: &'static str,
    /// extra parameters appended verbatim to the projstring
    pub proj_aux: &'static str,
    pub params: &'static [&'static ParamMapping],
}

// -----------------
// Parameters
// -----------------

const LAT_0: ParamMapping = ParamMapping {
    wkt_names: &[
        "latitude_of_origin",
        "Latitude of natural origin",
        "Latitude of false origin",
        "latitude_of_center",
        "Latitude of projection centre",
        "Central_Parallel",
    ],
    proj_name: "lat_0",
    unit_type: UnitType::Angular,
};

const LAT_1: ParamMapping = ParamMapping {
    wkt_names: &["standard_parallel_1", "Latitude of 1st standard parallel"],
    proj_name: "lat_1",
    unit_type: UnitType::Angular,
};

// 1SP conics: the natural origin is the standard parallel
const LAT_1_ORIGIN: ParamMapping = ParamMapping {
    wkt_names: &["latitude_of_origin", "Latitude of natural origin"],
    proj_name: "lat_1",
    unit_type: UnitType::Angular,
};

const LAT_2: ParamMapping = ParamMapping {
    wkt_names: &["standard_parallel_2", "Latitude of 2nd standard parallel"],
    proj_name: "lat_2",
    unit_type: UnitType::Angular,
};

const LAT_TS: ParamMapping = ParamMapping {
    wkt_names: &[
        "standard_parallel_1",
        "Latitude of 1st standard parallel",
        "Latitude of standard parallel",
    ],
    proj_name: "lat_ts",
    unit_type: UnitType::Angular,
};

// Mercator variants declare a natural origin latitude of 0
const LAT_TS_ORIGIN: ParamMapping = ParamMapping {
    wkt_names: &["latitude_of_origin", "Latitude of natural origin"],
    proj_name: "lat_ts",
    unit_type: UnitType::Angular,
};

const LON_0: ParamMapping = ParamMapping {
    wkt_names: &[
        "central_meridian",
        "Longitude of natural origin",
        "Longitude of false origin",
        "longitude_of_center",
        "Longitude of projection centre",
        "Longitude of origin",
    ],
    proj_name: "lon_0",
    unit_type: UnitType::Angular,
};

const K_0: ParamMapping = ParamMapping {
    wkt_names: &[
        "scale_factor",
        "Scale factor at natural origin",
        "Scale factor on initial line",
    ],
    proj_name: "k_0",
    unit_type: UnitType::Scale,
};

const X_0: ParamMapping = ParamMapping {
    wkt_names: &[
        "false_easting",
        "False easting",
        "Easting at false origin",
        "Easting at projection centre",
    ],
    proj_name: "x_0",
    unit_type: UnitType::Linear,
};

const Y_0: ParamMapping = ParamMapping {
    wkt_names: &[
        "false_northing",
        "False northing",
        "Northing at false origin",
        "Northing at projection centre",
    ],
    proj_name: "y_0",
    unit_type: UnitType::Linear,
};

const ALPHA: ParamMapping = ParamMapping {
    wkt_names: &["azimuth", "Azimuth of initial line"],
    proj_name: "alpha",
    unit_type: UnitType::Angular,
};

const GAMMA: ParamMapping = ParamMapping {
    wkt_names: &["rectified_grid_angle", "Angle from Rectified to Skew Grid"],
    proj_name: "gamma",
    unit_type: UnitType::Angular,
};

// -----------------
// Methods
// -----------------

macro_rules! method {
    ($name:ident, $names:expr, $proj:expr, $aux:expr, $params:expr) => {
        const $name: MethodMapping = MethodMapping {
            wkt_names: $names,
            proj_name: $proj,
            proj_aux: $aux,
            params: $params,
        };
    };
}

method!(
    TMERC,
    &[
        "Transverse Mercator",
        "Transverse_Mercator",
        "Gauss_Kruger",
        "CT_TransverseMercator"
    ],
    "tmerc",
    "",
    &[&LAT_0, &LON_0, &K_0, &X_0, &Y_0]
);

method!(
    LCC_2SP,
    &[
        "Lambert Conic Conformal (2SP)",
        "Lambert_Conformal_Conic_2SP",
        "Lambert_Conformal_Conic"
    ],
    "lcc",
    "",
    &[&LAT_1, &LAT_2, &LAT_0, &LON_0, &X_0, &Y_0]
);

method!(
    LCC_1SP,
    &[
        "Lambert Conic Conformal (1SP)",
        "Lambert_Conformal_Conic_1SP"
    ],
    "lcc",
    "",
    &[&LAT_1_ORIGIN, &LON_0, &K_0, &X_0, &Y_0]
);

method!(
    AEA,
    &[
        "Albers Equal Area",
        "Albers_Conic_Equal_Area",
        "Albers"
    ],
    "aea",
    "",
    &[&LAT_1, &LAT_2, &LAT_0, &LON_0, &X_0, &Y_0]
);

method!(
    MERC,
    &[
        "Mercator (variant A)",
        "Mercator (variant B)",
        "Mercator_Variant_A",
        "Mercator_Variant_B",
        "Mercator_1SP",
        "Mercator_2SP",
        "Mercator"
    ],
    "merc",
    "",
    &[&LAT_TS, &LAT_TS_ORIGIN, &LON_0, &K_0, &X_0, &Y_0]
);

method!(
    MERC_AUX_SPHERE,
    &[
        "Mercator_Auxiliary_Sphere",
        "Popular Visualisation Pseudo Mercator",
        "Popular_Visualisation_Pseudo_Mercator"
    ],
    "merc",
    // proj4js semantics: spherical formulas, no datum shift
    "+sphere +nadgrids=@null",
    &[&LAT_TS, &LON_0, &K_0, &X_0, &Y_0]
);

method!(
    STERE,
    &[
        "Stereographic",
        "Oblique_Stereographic",
        "Polar_Stereographic",
        "Polar Stereographic (variant A)",
        "Polar Stereographic (variant B)",
        "Stereographic_North_Pole",
        "Stereographic_South_Pole"
    ],
    "stere",
    "",
    &[&LAT_0, &LAT_TS, &LON_0, &K_0, &X_0, &Y_0]
);

method!(
    AEQD,
    &[
        "Azimuthal_Equidistant",
        "Azimuthal Equidistant",
        "Modified Azimuthal Equidistant"
    ],
    "aeqd",
    "",
    &[&LAT_0, &LON_0, &X_0, &Y_0]
);

method!(
    SINU,
    &["Sinusoidal"],
    "sinu",
    "",
    &[&LON_0, &X_0, &Y_0]
);

method!(
    CEA,
    &[
        "Cylindrical_Equal_Area",
        "Lambert_Cylindrical_Equal_Area",
        "Lambert Cylindrical Equal Area",
        "Lambert Cylindrical Equal Area (Spherical)"
    ],
    "cea",
    "",
    &[&LAT_TS, &LON_0, &X_0, &Y_0]
);

method!(
    EQC,
    &[
        "Equirectangular",
        "Plate_Carree",
        "Equidistant Cylindrical",
        "Equidistant_Cylindrical"
    ],
    "eqc",
    "",
    &[&LAT_TS, &LAT_0, &LON_0, &X_0, &Y_0]
);

method!(
    ROBIN,
    &["Robinson"],
    "robin",
    "",
    &[&LON_0, &X_0, &Y_0]
);

method!(
    MOLL,
    &["Mollweide"],
    "moll",
    "",
    &[&LON_0, &X_0, &Y_0]
);

method!(
    OMERC,
    &[
        "Hotine Oblique Mercator",
        "Hotine_Oblique_Mercator",
        "Hotine Oblique Mercator (variant B)",
        "Oblique_Mercator"
    ],
    "omerc",
    "",
    &[&LAT_0, &LON_0, &ALPHA, &GAMMA, &K_0, &X_0, &Y_0]
);

const METHODS: [&MethodMapping; 14] = [
    &TMERC,
    &LCC_2SP,
    &LCC_1SP,
    &AEA,
    &MERC_AUX_SPHERE,
    &MERC,
    &STERE,
    &AEQD,
    &SINU,
    &CEA,
    &EQC,
    &ROBIN,
    &MOLL,
    &OMERC,
];

/// Compare WKT names ignoring case and the space/underscore distinction
fn names_match(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a.chars().zip(b.chars()).all(|(ca, cb)| {
            let ca = if ca == ' ' { '_' } else { ca };
            let cb = if cb == ' ' { '_' } else { cb };
            ca.eq_ignore_ascii_case(&cb)
        })
}

/// Find the mapping for a WKT method name
pub fn find_method_mapping(name: &str) -> Option<&'static MethodMapping> {
    METHODS
        .iter()
        .find(|m| m.wkt_names.iter().any(|n| names_match(n, name)))
        .copied()
}

impl MethodMapping {
    /// Find the proj parameter for a WKT parameter
    pub fn find_proj_param(&self, p: &Parameter) -> Option<&'static ParamMapping> {
        self.find_proj_param_name(p.name)
    }

    /// Find the proj parameter for a WKT parameter name
    pub fn find_proj_param_name(&self, name: &str) -> Option<&'static ParamMapping> {
        self.params
            .iter()
            .find(|pm| pm.wkt_names.iter().any(|n| names_match(n, name)))
            .copied()
    }
}
