//!
//! Retained normalised CRS definition
//!
//! [`Defn`] keeps the surface-level parameters a projection was built
//! from, after normalisation to canonical keys. The transform pipeline
//! never reads it; it exists for the serializers, for the EPSG guess and
//! for the bit-exact identity short-circuit (two projections with equal
//! definitions transform as a no-op).
//!
//! Angular values are stored in decimal degrees, exactly as they appear
//! in a projstring, so that definitions re-emit faithfully.
//!
use crate::errors::Result;
use crate::parameters::ParamList;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Defn {
    /// Canonical lowercase projection name
    pub proj: String,

    // Ellipsoid choice
    pub ellps: Option<String>,
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub rf: Option<f64>,
    pub r: Option<f64>,

    // Datum reference
    pub datum: Option<String>,
    pub towgs84: Option<Vec<f64>>,
    pub nadgrids: Option<String>,
    pub pm: Option<String>,

    // Units and axis
    pub units: Option<String>,
    pub to_meter: Option<f64>,
    pub axis: Option<String>,

    // Angular parameters (decimal degrees)
    pub lat_0: Option<f64>,
    pub lat_1: Option<f64>,
    pub lat_2: Option<f64>,
    pub lat_ts: Option<f64>,
    pub lon_0: Option<f64>,
    pub lonc: Option<f64>,
    pub alpha: Option<f64>,
    pub gamma: Option<f64>,

    // Scale and offsets
    pub k_0: Option<f64>,
    pub x_0: Option<f64>,
    pub y_0: Option<f64>,

    // UTM
    pub zone: Option<i32>,
    pub south: bool,

    // Flags
    pub over: bool,
    pub r_a: bool,
    pub sphere: bool,
    pub no_defs: bool,
}

impl Defn {
    pub(crate) fn from_params(params: &ParamList) -> Result<Self> {
        let angular = |name: &str| -> Result<Option<f64>> { params.try_value::<f64>(name) };

        Ok(Self {
            proj: params
                .try_value::<&str>("proj")?
                .unwrap_or("")
                .to_ascii_lowercase(),
            ellps: params.try_value::<&str>("ellps")?.map(str::to_string),
            a: params.try_value::<f64>("a")?,
            b: params.try_value::<f64>("b")?,
            rf: params.try_value::<f64>("rf")?,
            r: params.try_value::<f64>("R")?,
            datum: params.try_value::<&str>("datum")?.map(str::to_string),
            towgs84: params
                .try_value::<&str>("towgs84")?
                .map(|s| {
                    s.split(',')
                        .map(|v| {
                            v.trim().parse::<f64>().map_err(|_| {
                                crate::errors::Error::InvalidToWGS84String
                            })
                        })
                        .collect::<Result<Vec<f64>>>()
                })
                .transpose()?,
            nadgrids: params.try_value::<&str>("nadgrids")?.map(str::to_string),
            pm: params.try_value::<&str>("pm")?.map(str::to_string),
            units: params.try_value::<&str>("units")?.map(str::to_string),
            to_meter: params.try_value::<f64>("to_meter")?,
            axis: params.try_value::<&str>("axis")?.map(str::to_string),
            lat_0: angular("lat_0")?,
            lat_1: angular("lat_1")?,
            lat_2: angular("lat_2")?,
            lat_ts: angular("lat_ts")?,
            lon_0: angular("lon_0")?,
            lonc: angular("lonc")?,
            alpha: angular("alpha")?,
            gamma: angular("gamma")?.or(angular("rectified_grid_angle")?),
            k_0: params
                .try_value::<f64>("k_0")?
                .or(params.try_value::<f64>("k")?),
            x_0: params.try_value::<f64>("x_0")?,
            y_0: params.try_value::<f64>("y_0")?,
            zone: params.try_value::<i32>("zone")?,
            south: params.check_option("south")?,
            over: params.check_option("over")?,
            r_a: params.check_option("R_A")?,
            sphere: params.check_option("sphere")?,
            no_defs: params.check_option("no_defs")?,
        })
    }

    /// True when the definition describes a geographic (unprojected) CRS
    pub fn is_geographic(&self) -> bool {
        matches!(self.proj.as_str(), "longlat" | "latlong" | "latlon" | "lonlat")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projstring;

    #[test]
    fn defn_collects_parameters() {
        let params = projstring::parse(
            "+proj=utm +zone=32 +ellps=GRS80 +towgs84=0,0,0 +units=m +no_defs",
        )
        .unwrap();
        let defn = Defn::from_params(&params).unwrap();
        assert_eq!(defn.proj, "utm");
        assert_eq!(defn.zone, Some(32));
        assert_eq!(defn.ellps.as_deref(), Some("GRS80"));
        assert_eq!(defn.towgs84.as_deref(), Some(&[0., 0., 0.][..]));
        assert!(defn.no_defs);
        assert!(!defn.south);
    }

    #[test]
    fn defn_equality_is_exact() {
        let parse = |s| Defn::from_params(&projstring::parse(s).unwrap()).unwrap();
        let a = parse("+proj=merc +lon_0=10 +ellps=WGS84");
        let b = parse("+proj=merc +lon_0=10 +ellps=WGS84");
        let c = parse("+proj=merc +lon_0=11 +ellps=WGS84");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
