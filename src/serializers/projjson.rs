//!
//! Definition to PROJJSON
//!
use super::{MethodView, ParamKind};
use crate::proj::Proj;
use serde_json::{json, Value};

fn ellipsoid_json(proj: &Proj) -> Value {
    let defn = proj.defn();
    let el = proj.ellps();
    let name = defn.ellps.as_deref().unwrap_or("unnamed");
    if el.is_sphere() {
        json!({ "name": name, "radius": el.a })
    } else {
        json!({
            "name": name,
            "semi_major_axis": el.a,
            "inverse_flattening": el.rf,
        })
    }
}

fn datum_json(proj: &Proj) -> Value {
    let name = proj
        .defn()
        .datum
        .as_deref()
        .map(super::wkt::datum_wkt_name)
        .unwrap_or("unknown");

    let mut datum = json!({
        "type": "GeodeticReferenceFrame",
        "name": name,
        "ellipsoid": ellipsoid_json(proj),
    });

    let pm = proj.from_greenwich.to_degrees();
    if pm != 0. {
        datum["prime_meridian"] = json!({
            "name": proj.defn().pm.as_deref().unwrap_or("unnamed"),
            "longitude": pm,
        });
    }
    datum
}

fn geographic_json(proj: &Proj, name: &str) -> Value {
    json!({
        "type": "GeographicCRS",
        "name": name,
        "datum": datum_json(proj),
        "coordinate_system": {
            "subtype": "ellipsoidal",
            "axis": [
                { "name": "Geodetic longitude", "abbreviation": "Lon",
                  "direction": "east", "unit": "degree" },
                { "name": "Geodetic latitude", "abbreviation": "Lat",
                  "direction": "north", "unit": "degree" },
            ],
        },
    })
}

fn crs_json(proj: &Proj) -> Value {
    if proj.defn().is_geographic() {
        return geographic_json(proj, "unknown");
    }

    let Some(view) = MethodView::new(proj) else {
        return geographic_json(proj, "unknown");
    };

    let parameters: Vec<Value> = view
        .parameters
        .iter()
        .map(|(_, name, value, kind)| {
            json!({
                "name": name,
                "value": value,
                "unit": match kind {
                    ParamKind::Angular => "degree",
                    ParamKind::Linear => "metre",
                    ParamKind::Scale => "unity",
                },
            })
        })
        .collect();

    json!({
        "type": "ProjectedCRS",
        "name": "unknown",
        "base_crs": geographic_json(proj, "unknown"),
        "conversion": {
            "name": "unknown",
            "method": { "name": view.wkt2_name },
            "parameters": parameters,
        },
        "coordinate_system": {
            "subtype": "Cartesian",
            "axis": [
                { "name": "Easting", "abbreviation": "E",
                  "direction": "east", "unit": "metre" },
                { "name": "Northing", "abbreviation": "N",
                  "direction": "north", "unit": "metre" },
            ],
        },
    })
}

/// Emit a definition as compact PROJJSON
pub fn to_projjson(proj: &Proj) -> String {
    crs_json(proj).to_string()
}

/// Emit a definition as pretty printed PROJJSON
pub fn to_projjson_pretty(proj: &Proj) -> String {
    serde_json::to_string_pretty(&crs_json(proj)).unwrap_or_else(|_| crs_json(proj).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::Proj;

    #[test]
    fn projjson_geographic_roundtrip() {
        let p = Proj::from_proj_string("+proj=longlat +ellps=GRS80").unwrap();
        let json = to_projjson(&p);
        assert!(json.contains("\"GeographicCRS\""));

        let p2 = Proj::from_projjson(&json).unwrap();
        assert!(p2.is_latlong());
        approx::assert_abs_diff_eq!(p2.ellps().a, p.ellps().a, epsilon = 0.1);
        approx::assert_abs_diff_eq!(p2.ellps().rf, p.ellps().rf, epsilon = 1e-6);
    }

    #[test]
    fn projjson_projected_roundtrip() {
        let p = Proj::from_proj_string("+proj=merc +lat_ts=30 +lon_0=12 +ellps=WGS84").unwrap();
        let json = to_projjson(&p);

        let p2 = Proj::from_projjson(&json).unwrap();
        assert_eq!(p2.projname(), "merc");
        approx::assert_abs_diff_eq!(p2.lam0(), p.lam0(), epsilon = 1e-12);
        approx::assert_abs_diff_eq!(p2.data().k0, p.data().k0, epsilon = 1e-6);
    }

    #[test]
    fn projjson_pretty_parses_back() {
        let p = Proj::from_proj_string("+proj=robin +a=6378137").unwrap();
        let json = to_projjson_pretty(&p);
        assert!(json.contains('\n'));
        let p2 = Proj::from_projjson(&json).unwrap();
        assert_eq!(p2.projname(), "robin");
    }
}
