//!
//! PROJJSON parsing
//!
//! A PROJJSON document is the JSON shape of WKT2. It is parsed as a
//! generic JSON tree and lowered to a projstring through the same
//! method and parameter tables as the WKT path.
//!
use crate::errors::{Error, Result};
use crate::wkt::methods::find_method_mapping;
use crate::wkt::model::UnitType;
use crate::wkt::normalize_datum_code;
use serde_json::Value;
use std::fmt::Write;

const DEG_TO_RAD: f64 = 0.017453292519943295;

/// Convert a PROJJSON document to a projstring
pub fn projjson_to_projstring(s: &str) -> Result<String> {
    let v: Value =
        serde_json::from_str(s).map_err(|err| Error::JsonParseError(err.to_string()))?;
    let mut out = String::new();
    write_crs(&mut out, &v)?;
    Ok(out)
}

fn err(msg: &str) -> Error {
    Error::JsonParseError(msg.into())
}

fn wr(out: &mut String, args: std::fmt::Arguments) -> Result<()> {
    out.write_fmt(args).map_err(|_| err("write failed"))
}

fn write_crs(out: &mut String, v: &Value) -> Result<()> {
    match v.get("type").and_then(Value::as_str) {
        Some("GeographicCRS") | Some("GeodeticCRS") => {
            out.push_str("+proj=longlat");
            write_datum(out, v)?;
            write_axis(out, v)
        }
        Some("ProjectedCRS") => write_projected(out, v),
        Some("BoundCRS") => write_bound(out, v),
        Some("CompoundCRS") => {
            // Lower the horizontal component
            let components = v
                .get("components")
                .and_then(Value::as_array)
                .ok_or_else(|| err("Missing components in CompoundCRS"))?;
            components
                .iter()
                .find(|c| {
                    matches!(
                        c.get("type").and_then(Value::as_str),
                        Some("GeographicCRS") | Some("ProjectedCRS") | Some("BoundCRS")
                    )
                })
                .ok_or_else(|| err("No horizontal CRS in CompoundCRS"))
                .and_then(|c| write_crs(out, c))
        }
        Some(other) => Err(Error::JsonParseError(format!(
            "Unsupported CRS type {other}"
        ))),
        None => Err(err("Missing CRS type")),
    }
}

/// Resolve a `unit` property to a conversion factor
///
/// Either a well known name or an object carrying an explicit
/// `conversion_factor`.
fn unit_factor(unit: Option<&Value>, unit_type: UnitType) -> Result<f64> {
    match unit {
        None => Ok(match unit_type {
            UnitType::Angular => DEG_TO_RAD,
            _ => 1.,
        }),
        Some(Value::String(name)) => match name.as_str() {
            "metre" | "meter" => Ok(1.),
            "degree" => Ok(DEG_TO_RAD),
            "arc-second" | "arcsecond" => Ok(DEG_TO_RAD / 3600.),
            "grad" => Ok(std::f64::consts::PI / 200.),
            "radian" => Ok(1.),
            "unity" => Ok(1.),
            _ => Err(Error::JsonParseError(format!("Unknown unit {name}"))),
        },
        Some(obj) => obj
            .get("conversion_factor")
            .and_then(Value::as_f64)
            .ok_or_else(|| err("Missing unit conversion_factor")),
    }
}

/// A number that may carry its own unit object
fn measure(v: &Value, unit_type: UnitType) -> Result<f64> {
    match v {
        Value::Number(n) => n.as_f64().ok_or_else(|| err("Invalid number")),
        Value::Object(_) => {
            let value = v
                .get("value")
                .and_then(Value::as_f64)
                .ok_or_else(|| err("Missing value"))?;
            Ok(value * unit_factor(v.get("unit"), unit_type)?)
        }
        _ => Err(err("Expected number or measure object")),
    }
}

fn write_datum(out: &mut String, v: &Value) -> Result<()> {
    let datum = v
        .get("datum")
        .or_else(|| v.get("datum_ensemble"))
        .ok_or_else(|| err("Missing datum"))?;

    let named = datum
        .get("name")
        .and_then(Value::as_str)
        .and_then(normalize_datum_code);

    if let Some(code) = named {
        wr(out, format_args!(" +datum={code}"))?;
    } else {
        let ellps = datum
            .get("ellipsoid")
            .ok_or_else(|| err("Missing ellipsoid"))?;

        if let Some(radius) = ellps.get("radius") {
            let r = measure(radius, UnitType::Linear)?;
            wr(out, format_args!(" +R={r}"))?;
        } else {
            let a = measure(
                ellps
                    .get("semi_major_axis")
                    .ok_or_else(|| err("Missing semi_major_axis"))?,
                UnitType::Linear,
            )?;
            if let Some(rf) = ellps.get("inverse_flattening") {
                let rf = measure(rf, UnitType::Scale)?;
                if rf == 0. {
                    wr(out, format_args!(" +a={a} +b={a}"))?;
                } else {
                    wr(out, format_args!(" +a={a} +rf={rf}"))?;
                }
            } else if let Some(b) = ellps.get("semi_minor_axis") {
                let b = measure(b, UnitType::Linear)?;
                wr(out, format_args!(" +a={a} +b={b}"))?;
            } else {
                return Err(err("Missing ellipsoid shape parameter"));
            }
        }
    }

    // Prime meridian is a sibling of the datum in PROJJSON
    if let Some(pm) = datum
        .get("prime_meridian")
        .or_else(|| v.get("prime_meridian"))
    {
        let lon_v = pm
            .get("longitude")
            .ok_or_else(|| err("Missing prime meridian longitude"))?;
        // a bare number is in degrees
        let lon = match lon_v {
            Value::Number(n) => n.as_f64().ok_or_else(|| err("Invalid number"))?,
            obj => {
                let raw = obj
                    .get("value")
                    .and_then(Value::as_f64)
                    .ok_or_else(|| err("Missing value"))?;
                let factor = unit_factor(obj.get("unit"), UnitType::Angular)?;
                if (factor - DEG_TO_RAD).abs() < 1e-15 {
                    raw
                } else {
                    raw * factor / DEG_TO_RAD
                }
            }
        };
        if lon != 0. {
            wr(out, format_args!(" +pm={lon}"))?;
        }
    }

    Ok(())
}

fn write_projected(out: &mut String, v: &Value) -> Result<()> {
    let conversion = v
        .get("conversion")
        .ok_or_else(|| err("Missing conversion"))?;
    let method_name = conversion
        .get("method")
        .and_then(|m| m.get("name"))
        .and_then(Value::as_str)
        .ok_or_else(|| err("Missing conversion method name"))?;

    let mapping = find_method_mapping(method_name).ok_or_else(|| {
        Error::JsonParseError(format!("No projection mapping found for {method_name}"))
    })?;

    wr(out, format_args!("+proj={}", mapping.proj_name))?;

    if let Some(params) = conversion.get("parameters").and_then(Value::as_array) {
        for p in params {
            let name = p
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| err("Missing parameter name"))?;
            let Some(pm) = mapping.find_proj_param_name(name) else {
                // Irrelevant parameter for this method
                continue;
            };
            let value = p
                .get("value")
                .ok_or_else(|| err("Missing parameter value"))?;
            match pm.unit_type {
                UnitType::Angular => {
                    let raw = measure(value, UnitType::Scale)?;
                    let factor = unit_factor(p.get("unit"), UnitType::Angular)?;
                    // degree valued parameters pass through untouched
                    let v = if (factor - DEG_TO_RAD).abs() < 1e-15 {
                        raw
                    } else {
                        raw * factor / DEG_TO_RAD
                    };
                    wr(out, format_args!(" +{}={v}", pm.proj_name))?;
                }
                UnitType::Linear => {
                    let v = measure(value, UnitType::Scale)?
                        * unit_factor(p.get("unit"), UnitType::Linear)?;
                    wr(out, format_args!(" +{}={v}", pm.proj_name))?;
                }
                _ => {
                    let v = measure(value, UnitType::Scale)?;
                    wr(out, format_args!(" +{}={v}", pm.proj_name))?;
                }
            }
        }
    }

    if !mapping.proj_aux.is_empty() {
        out.push(' ');
        out.push_str(mapping.proj_aux);
    }

    // Cartesian axis unit
    let cs_factor = v
        .get("coordinate_system")
        .and_then(|cs| cs.get("axis"))
        .and_then(Value::as_array)
        .and_then(|axes| axes.first())
        .and_then(|ax| ax.get("unit"))
        .map(|u| unit_factor(Some(u), UnitType::Linear))
        .transpose()?
        .unwrap_or(1.);
    if cs_factor != 1. {
        wr(out, format_args!(" +to_meter={cs_factor}"))?;
    } else {
        out.push_str(" +units=m");
    }

    let base = v
        .get("base_crs")
        .ok_or_else(|| err("Missing base_crs in ProjectedCRS"))?;
    if !mapping.proj_aux.contains("nadgrids") {
        write_datum(out, base)?;
    }

    write_axis(out, v)
}

fn write_axis(out: &mut String, v: &Value) -> Result<()> {
    let Some(axes) = v
        .get("coordinate_system")
        .and_then(|cs| cs.get("axis"))
        .and_then(Value::as_array)
    else {
        return Ok(());
    };

    let mut dirs = String::with_capacity(3);
    for ax in axes.iter().take(3) {
        match ax
            .get("direction")
            .and_then(Value::as_str)
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("east") => dirs.push('e'),
            Some("west") => dirs.push('w'),
            Some("north") => dirs.push('n'),
            Some("south") => dirs.push('s'),
            Some("up") => dirs.push('u'),
            Some("down") => dirs.push('d'),
            _ => return Ok(()),
        }
    }
    if dirs.len() == 2 {
        dirs.push('u');
    }
    if !dirs.is_empty() && dirs != "enu" {
        wr(out, format_args!(" +axis={dirs}"))?;
    }
    Ok(())
}

fn write_bound(out: &mut String, v: &Value) -> Result<()> {
    let source = v
        .get("source_crs")
        .ok_or_else(|| err("Missing source_crs in BoundCRS"))?;
    write_crs(out, source)?;

    let Some(transformation) = v.get("transformation") else {
        return Ok(());
    };

    let method = transformation
        .get("method")
        .and_then(|m| m.get("name"))
        .and_then(Value::as_str)
        .unwrap_or("");

    let params = transformation
        .get("parameters")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    if method.to_ascii_lowercase().contains("ntv2") {
        // The parameter value is the grid file name
        if let Some(name) = params
            .iter()
            .find_map(|p| p.get("value").and_then(Value::as_str))
        {
            wr(out, format_args!(" +nadgrids={name}"))?;
        }
        return Ok(());
    }

    let get = |name: &str| -> f64 {
        params
            .iter()
            .find(|p| {
                p.get("name")
                    .and_then(Value::as_str)
                    .map(|n| n.eq_ignore_ascii_case(name))
                    .unwrap_or(false)
            })
            .and_then(|p| p.get("value"))
            .and_then(Value::as_f64)
            .unwrap_or(0.)
    };

    let dx = get("X-axis translation");
    let dy = get("Y-axis translation");
    let dz = get("Z-axis translation");
    let rx = get("X-axis rotation");
    let ry = get("Y-axis rotation");
    let rz = get("Z-axis rotation");
    let s = get("Scale difference");

    if rx == 0. && ry == 0. && rz == 0. && s == 0. {
        wr(out, format_args!(" +towgs84={dx},{dy},{dz}"))
    } else {
        wr(out, format_args!(" +towgs84={dx},{dy},{dz},{rx},{ry},{rz},{s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::Proj;

    #[test]
    fn projjson_geographic() {
        let json = r#"{
            "type": "GeographicCRS",
            "name": "WGS 84",
            "datum": {
                "type": "GeodeticReferenceFrame",
                "name": "World Geodetic System 1984",
                "ellipsoid": {
                    "name": "WGS 84",
                    "semi_major_axis": 6378137,
                    "inverse_flattening": 298.257223563
                }
            },
            "coordinate_system": {
                "subtype": "ellipsoidal",
                "axis": [
                    {"name": "Geodetic longitude", "abbreviation": "Lon", "direction": "east", "unit": "degree"},
                    {"name": "Geodetic latitude", "abbreviation": "Lat", "direction": "north", "unit": "degree"}
                ]
            },
            "id": {"authority": "EPSG", "code": 4326}
        }"#;

        assert_eq!(
            projjson_to_projstring(json).unwrap(),
            "+proj=longlat +datum=WGS84"
        );
    }

    #[test]
    fn projjson_projected_utm() {
        let json = r#"{
            "type": "ProjectedCRS",
            "name": "WGS 84 / UTM zone 31N",
            "base_crs": {
                "type": "GeographicCRS",
                "name": "WGS 84",
                "datum": {
                    "type": "GeodeticReferenceFrame",
                    "name": "Custom datum",
                    "ellipsoid": {
                        "name": "WGS 84",
                        "semi_major_axis": 6378137,
                        "inverse_flattening": 298.257223563
                    }
                }
            },
            "conversion": {
                "name": "UTM zone 31N",
                "method": {"name": "Transverse Mercator", "id": {"authority": "EPSG", "code": 9807}},
                "parameters": [
                    {"name": "Latitude of natural origin", "value": 0, "unit": "degree"},
                    {"name": "Longitude of natural origin", "value": 3, "unit": "degree"},
                    {"name": "Scale factor at natural origin", "value": 0.9996, "unit": "unity"},
                    {"name": "False easting", "value": 500000, "unit": "metre"},
                    {"name": "False northing", "value": 0, "unit": "metre"}
                ]
            },
            "coordinate_system": {
                "subtype": "Cartesian",
                "axis": [
                    {"name": "Easting", "abbreviation": "E", "direction": "east", "unit": "metre"},
                    {"name": "Northing", "abbreviation": "N", "direction": "north", "unit": "metre"}
                ]
            }
        }"#;

        let projstr = projjson_to_projstring(json).unwrap();
        assert_eq!(
            projstr,
            "+proj=tmerc +lat_0=0 +lon_0=3 +k_0=0.9996 +x_0=500000 +y_0=0 +units=m +a=6378137 +rf=298.257223563"
        );

        let p = Proj::from_projjson(json).unwrap();
        assert_eq!(p.projname(), "tmerc");
        assert_eq!(p.x0(), 500000.);
    }

    #[test]
    fn projjson_parameter_unit_objects() {
        // A gradian valued central meridian through a conversion factor
        let json = r#"{
            "type": "ProjectedCRS",
            "name": "gradians",
            "base_crs": {
                "type": "GeographicCRS",
                "name": "x",
                "datum": {
                    "name": "unknown",
                    "ellipsoid": {"name": "sph", "semi_major_axis": 6370997, "inverse_flattening": 0}
                }
            },
            "conversion": {
                "name": "c",
                "method": {"name": "Robinson"},
                "parameters": [
                    {"name": "Longitude of natural origin", "value": 100,
                     "unit": {"type": "AngularUnit", "name": "grad", "conversion_factor": 0.0157079632679489}}
                ]
            }
        }"#;

        let projstr = projjson_to_projstring(json).unwrap();
        // 100 gradians is 90 degrees
        assert!(projstr.starts_with("+proj=robin +lon_0=89.99999"));
        assert!(projstr.contains("+a=6370997 +b=6370997"));
    }

    #[test]
    fn projjson_bound_crs() {
        let json = r#"{
            "type": "BoundCRS",
            "source_crs": {
                "type": "GeographicCRS",
                "name": "ED50",
                "datum": {
                    "name": "European Datum 1950",
                    "ellipsoid": {"name": "International 1924", "semi_major_axis": 6378388, "inverse_flattening": 297}
                }
            },
            "target_crs": {"type": "GeographicCRS", "name": "WGS 84"},
            "transformation": {
                "name": "ED50 to WGS 84",
                "method": {"name": "Geocentric translations"},
                "parameters": [
                    {"name": "X-axis translation", "value": -87, "unit": "metre"},
                    {"name": "Y-axis translation", "value": -98, "unit": "metre"},
                    {"name": "Z-axis translation", "value": -121, "unit": "metre"}
                ]
            }
        }"#;

        assert_eq!(
            projjson_to_projstring(json).unwrap(),
            "+proj=longlat +a=6378388 +rf=297 +towgs84=-87,-98,-121"
        );
    }

    #[test]
    fn projjson_sphere_radius() {
        let json = r#"{
            "type": "GeographicCRS",
            "name": "Moon sphere",
            "datum": {
                "name": "unknown body",
                "ellipsoid": {"name": "sphere", "radius": 1737400}
            }
        }"#;

        assert_eq!(
            projjson_to_projstring(json).unwrap(),
            "+proj=longlat +R=1737400"
        );
    }

    #[test]
    fn projjson_rejects_malformed() {
        assert!(projjson_to_projstring("{").is_err());
        assert!(projjson_to_projstring(r#"{"type": "TemporalCRS"}"#).is_err());
        assert!(projjson_to_projstring(r#"{"name": "no type"}"#).is_err());
    }
}
