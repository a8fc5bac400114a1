//!
//! Format a WKT CRS syntactic tree to a projstring
//!
use crate::datums;
use crate::errors::{Error, Result};
use crate::wkt::builder::{parse_number, Node};
use crate::wkt::methods::{find_method_mapping, MethodMapping};
use crate::wkt::model::*;

use std::fmt::Write;

// Radians per degree, used to spot degree-valued angular units
const DEG_FACTOR: f64 = 0.017453292519943295;
const FACTOR_EPS: f64 = 1.0e-9;

fn is_degree_unit(unit: &Unit) -> bool {
    unit.name.to_ascii_lowercase().contains("degree")
        || (unit.factor - DEG_FACTOR).abs() < FACTOR_EPS
}

/// WKT CRS tree to projstring formatter
pub struct Formatter {
    out: String,
    // suppress the default towgs84 when a BOUNDCRS transformation
    // supplies its own parameters
    default_towgs84: bool,
}

impl Formatter {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            default_towgs84: true,
        }
    }

    /// Format a root node to a projstring
    pub fn format(mut self, node: &Node) -> Result<String> {
        self.add_node(node)?;
        Ok(self.out)
    }

    fn add_node(&mut self, node: &Node) -> Result<()> {
        match node {
            Node::GEOGCS(cs) => self.add_geogcs(cs),
            Node::PROJCS(cs) => self.add_projcs(cs),
            Node::COMPOUNDCRS(crs) => match &crs.h_crs {
                Horizontalcrs::Projcs(cs) => self.add_projcs(cs),
                Horizontalcrs::Geogcs(cs) => self.add_geogcs(cs),
            },
            Node::BOUNDCRS(crs) => self.add_boundcrs(crs),
            _ => Err(Error::WktParseError(format!(
                "Cannot create projstring from {node:?}"
            ))),
        }
    }

    fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn add_geogcs(&mut self, geogcs: &Geogcs) -> Result<()> {
        self.push("+proj=longlat");
        self.add_datum(&geogcs.datum)?;
        self.add_prime_meridian(geogcs.prime_meridian.as_ref())?;

        // A non degree angular unit scales through the semi major axis
        if let Some(unit) = &geogcs.unit {
            if unit.unit_type == UnitType::Angular && !is_degree_unit(unit) {
                let a = parse_number(geogcs.datum.ellipsoid.a)?;
                write!(self.out, " +to_meter={}", unit.factor * a)
                    .map_err(|_| Error::WktParseError("write failed".into()))?;
            }
        }

        self.add_axes(&geogcs.axes)
    }

    fn add_projcs(&mut self, projcs: &Projcs) -> Result<()> {
        let method = &projcs.projection.method;
        let mapping = find_method_mapping(method.name).ok_or_else(|| {
            Error::WktParseError(format!(
                "No projection mapping found for method {:?}",
                method.name
            ))
        })?;

        write!(self.out, "+proj={}", mapping.proj_name)
            .map_err(|_| Error::WktParseError("write failed".into()))?;

        let axis_unit = projcs.unit.as_ref();
        let geod_unit = projcs.geogcs.unit.as_ref();

        self.add_parameters(&projcs.projection.parameters, mapping, axis_unit, geod_unit)?;

        if !mapping.proj_aux.is_empty() {
            self.push(" ");
            self.push(mapping.proj_aux);
        }

        // Forced spherical semantics carry no datum shift of their own
        if !mapping.proj_aux.contains("nadgrids") {
            self.add_datum(&projcs.geogcs.datum)?;
        } else {
            self.add_ellipsoid(&projcs.geogcs.datum.ellipsoid)?;
        }

        self.add_prime_meridian(projcs.geogcs.prime_meridian.as_ref())?;
        self.add_axes(&projcs.axes)
    }

    fn add_parameters(
        &mut self,
        params: &[Parameter],
        mapping: &MethodMapping,
        axis_unit: Option<&Unit>,
        geod_unit: Option<&Unit>,
    ) -> Result<()> {
        fn write_value(
            out: &mut String,
            name: &str,
            p: &Parameter,
            unit_type: UnitType,
            ref_unit: Option<&Unit>,
        ) -> Result<()> {
            // A unit attached to the parameter itself wins over the
            // coordinate system unit
            let unit = p.unit.as_ref().or(ref_unit);
            let formatted = match (unit_type, unit) {
                (UnitType::Linear, Some(u)) if u.factor != 1. => {
                    format!(" +{}={}", name, parse_number(p.value)? * u.factor)
                }
                (UnitType::Angular, Some(u)) if !is_degree_unit(u) => {
                    format!(
                        " +{}={}",
                        name,
                        (parse_number(p.value)? * u.factor).to_degrees()
                    )
                }
                _ => format!(" +{}={}", name, p.value),
            };
            out.push_str(&formatted);
            Ok(())
        }

        params.iter().try_for_each(|p| {
            if let Some(pm) = mapping.find_proj_param(p) {
                match pm.unit_type {
                    UnitType::Linear => {
                        write_value(&mut self.out, pm.proj_name, p, pm.unit_type, axis_unit)
                    }
                    UnitType::Angular => {
                        write_value(&mut self.out, pm.proj_name, p, pm.unit_type, geod_unit)
                    }
                    _ => {
                        write!(self.out, " +{}={}", pm.proj_name, p.value)
                            .map_err(|_| Error::WktParseError("write failed".into()))
                    }
                }
            } else {
                // Irrelevant parameter for this method
                Ok(())
            }
        })?;

        match axis_unit {
            Some(unit) if unit.factor != 1.0 => {
                write!(self.out, " +to_meter={}", unit.factor)
                    .map_err(|_| Error::WktParseError("write failed".into()))?;
            }
            _ => self.push(" +units=m"),
        }

        Ok(())
    }

    fn add_datum(&mut self, datum: &Datum) -> Result<()> {
        // A recognized datum name carries its ellipsoid and shift
        // parameters through the builtin table
        if let Some(code) = normalize_datum_code(datum.name) {
            write!(self.out, " +datum={code}")
                .map_err(|_| Error::WktParseError("write failed".into()))?;
            return Ok(());
        }

        self.add_ellipsoid(&datum.ellipsoid)?;

        if datum.to_wgs84.is_empty() {
            if self.default_towgs84 {
                // Assume WGS84 or GRS80 compatible
                self.push(" +towgs84=0,0,0,0,0,0,0");
            }
        } else {
            self.push(" +towgs84=");
            datum.to_wgs84.iter().try_fold("", |sep, n| {
                write!(self.out, "{sep}{n}")
                    .map_err(|_| Error::WktParseError("write failed".into()))
                    .and(Ok(","))
            })?;
        }
        Ok(())
    }

    // Without a database, output the ellipsoid parameters and get rid
    // of the ellipsoid name and authority
    fn add_ellipsoid(&mut self, ellps: &Ellipsoid) -> Result<()> {
        let mut a = parse_number(ellps.a)?;
        // Ellipsoid axes in a non meter unit are converted
        if let Some(unit) = &ellps.unit {
            match unit.unit_type {
                UnitType::Linear => a *= unit.factor,
                _ => {
                    return Err(Error::WktParseError(format!(
                        "Unexpected {:?} unit for ellipsoid",
                        unit.unit_type
                    )));
                }
            }
        }
        let rf = parse_number(ellps.rf)?;
        if rf == 0. {
            // A zero inverse flattening denotes a sphere
            write!(self.out, " +a={a} +b={a}")
        } else {
            write!(self.out, " +a={a} +rf={rf}")
        }
        .map_err(|_| Error::WktParseError("write failed".into()))
    }

    fn add_prime_meridian(&mut self, pm: Option<&PrimeMeridian>) -> Result<()> {
        if let Some(pm) = pm {
            if pm.longitude != 0. {
                write!(self.out, " +pm={}", pm.longitude)
                    .map_err(|_| Error::WktParseError("write failed".into()))?;
            }
        }
        Ok(())
    }

    fn add_axes(&mut self, axes: &[AxisDir]) -> Result<()> {
        if axes.is_empty() {
            return Ok(());
        }

        let mut dirs = String::with_capacity(3);
        for ax in axes.iter().take(3) {
            dirs.push(match ax.direction.to_ascii_uppercase().as_str() {
                "EAST" => 'e',
                "WEST" => 'w',
                "NORTH" => 'n',
                "SOUTH" => 's',
                "UP" => 'u',
                "DOWN" => 'd',
                // Ignore esoteric directions (OTHER, GEOCENTRIC_X, ...)
                _ => return Ok(()),
            });
        }
        if dirs.len() == 2 {
            dirs.push('u');
        }
        if dirs != "enu" {
            write!(self.out, " +axis={dirs}")
                .map_err(|_| Error::WktParseError("write failed".into()))?;
        }
        Ok(())
    }

    fn add_boundcrs(&mut self, crs: &Boundcrs) -> Result<()> {
        self.default_towgs84 = false;
        match &crs.source {
            Horizontalcrs::Projcs(cs) => self.add_projcs(cs)?,
            Horizontalcrs::Geogcs(cs) => self.add_geogcs(cs)?,
        }

        if crs
            .method
            .map(|m| m.to_ascii_lowercase().contains("ntv2"))
            .unwrap_or(false)
        {
            // The parameter value is the grid file name
            if let Some(p) = crs.parameters.first() {
                write!(self.out, " +nadgrids={}", p.value)
                    .map_err(|_| Error::WktParseError("write failed".into()))?;
            }
            return Ok(());
        }

        // Helmert transformation parameters, EPSG names
        let get = |names: &[&str]| -> f64 {
            crs.parameters
                .iter()
                .find(|p| names.iter().any(|n| n.eq_ignore_ascii_case(p.name)))
                .and_then(|p| p.value.parse::<f64>().ok())
                .unwrap_or(0.)
        };

        let dx = get(&["X-axis translation"]);
        let dy = get(&["Y-axis translation"]);
        let dz = get(&["Z-axis translation"]);
        let rx = get(&["X-axis rotation"]);
        let ry = get(&["Y-axis rotation"]);
        let rz = get(&["Z-axis rotation"]);
        let s = get(&["Scale difference"]);

        if rx == 0. && ry == 0. && rz == 0. && s == 0. {
            write!(self.out, " +towgs84={dx},{dy},{dz}")
        } else {
            write!(self.out, " +towgs84={dx},{dy},{dz},{rx},{ry},{rz},{s}")
        }
        .map_err(|_| Error::WktParseError("write failed".into()))
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a WKT datum name to a builtin datum code
///
/// Strips the ESRI `D_` prefix, collapses spaces to underscores and
/// resolves a curated alias set. Returns None when the name does not
/// resolve to a datum of the builtin table.
pub fn normalize_datum_code(name: &str) -> Option<&'static str> {
    let mut code = name.trim().to_ascii_lowercase().replace(' ', "_");
    if let Some(stripped) = code.strip_prefix("d_") {
        code = stripped.to_string();
    }

    let code = match code.as_str() {
        "wgs_1984" | "world_geodetic_system_1984" | "wgs_84" => "WGS84",
        "north_american_datum_1983" | "north_american_1983" => "NAD83",
        "north_american_datum_1927" | "north_american_1927" => "NAD27",
        "new_zealand_geodetic_datum_1949" | "new_zealand_1949" => "nzgd49",
        "osgb_1936" | "ordnance_survey_great_britain_1936" => "OSGB36",
        "belge_1972" | "reseau_national_belge_1972" => "rnb72",
        "militar_geographische_institute" | "militargeographische_institut" => "hermannskogel",
        "deutsches_hauptdreiecksnetz" => "potsdam",
        "greek_geodetic_reference_system_1987" => "GGRS87",
        "ch1903" => "ch1903",
        other => other,
    };

    datums::find_datum(code).map(|d| d.id)
}
