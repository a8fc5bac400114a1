//!
//! Definition to WKT1 / WKT2
//!
use super::{MethodView, ParamKind};
use crate::datums::{self, DatumParamDefn};
use crate::proj::Proj;
use std::fmt::Write;

const DEG_UNIT: &str = r#"UNIT["degree",0.0174532925199433]"#;
const METRE_UNIT: &str = r#"UNIT["metre",1]"#;
const ANGLEUNIT: &str = r#"ANGLEUNIT["degree",0.0174532925199433]"#;
const LENGTHUNIT: &str = r#"LENGTHUNIT["metre",1]"#;
const SCALEUNIT: &str = r#"SCALEUNIT["unity",1]"#;

/// WKT names of the builtin datum codes
pub(crate) fn datum_wkt_name(code: &str) -> &str {
    match code.to_ascii_lowercase().as_str() {
        "wgs84" => "WGS_1984",
        "nad83" => "North_American_Datum_1983",
        "nad27" => "North_American_Datum_1927",
        "nzgd49" => "New_Zealand_Geodetic_Datum_1949",
        "osgb36" => "OSGB_1936",
        "rnb72" => "Reseau_National_Belge_1972",
        "potsdam" => "Deutsches_Hauptdreiecksnetz",
        "ggrs87" => "Greek_Geodetic_Reference_System_1987",
        "hermannskogel" => "Militar_Geographische_Institute",
        "carthage" => "Carthage",
        "ire65" => "Ireland_1965",
        "ch1903" => "CH1903",
        _ => code,
    }
}

/// Helmert parameters of a definition, raw (meters / arc-seconds / ppm)
fn towgs84_values(proj: &Proj) -> Option<Vec<f64>> {
    let defn = proj.defn();
    if let Some(v) = &defn.towgs84 {
        return Some(v.clone());
    }
    let code = defn.datum.as_deref()?;
    match &datums::find_datum(code)?.params {
        DatumParamDefn::ToWGS84_0 => Some(vec![0., 0., 0.]),
        DatumParamDefn::ToWGS84_3(x, y, z) => Some(vec![*x, *y, *z]),
        DatumParamDefn::ToWGS84_7(x, y, z, rx, ry, rz, s) => {
            Some(vec![*x, *y, *z, *rx, *ry, *rz, *s])
        }
        DatumParamDefn::NadGrids(_) => None,
    }
}

// The spheroid of a definition: (name, a, rf); rf 0 denotes a sphere
fn spheroid(proj: &Proj) -> (String, f64, f64) {
    let defn = proj.defn();
    let el = proj.ellps();
    let name = defn
        .ellps
        .clone()
        .unwrap_or_else(|| if el.is_sphere() { "sphere".into() } else { "unnamed".into() });
    let rf = if el.rf.is_finite() { el.rf } else { 0. };
    (name, el.a, rf)
}

fn datum_name(proj: &Proj) -> String {
    proj.defn()
        .datum
        .as_deref()
        .map(datum_wkt_name)
        .map(str::to_string)
        .unwrap_or_else(|| "unknown".into())
}

// ---------------
// WKT 1
// ---------------

fn wkt1_geogcs(proj: &Proj, name: &str) -> String {
    let (ellps_name, a, rf) = spheroid(proj);
    let mut out = format!(
        r#"GEOGCS["{name}",DATUM["{}",SPHEROID["{ellps_name}",{a},{rf}]"#,
        datum_name(proj),
    );
    if let Some(towgs84) = towgs84_values(proj) {
        out.push_str(",TOWGS84[");
        let mut sep = "";
        for v in towgs84 {
            let _ = write!(out, "{sep}{v}");
            sep = ",";
        }
        out.push(']');
    }
    out.push(']');

    let pm = proj.defn().pm.as_deref().unwrap_or("Greenwich");
    let _ = write!(out, r#",PRIMEM["{}",{}]"#, pm_name(pm), pm_value(proj));
    let _ = write!(out, ",{DEG_UNIT}]");
    out
}

fn pm_name(pm: &str) -> &str {
    if pm.parse::<f64>().is_ok() {
        "unnamed"
    } else {
        pm
    }
}

fn pm_value(proj: &Proj) -> f64 {
    proj.from_greenwich.to_degrees()
}

/// Emit a definition as WKT1
///
/// Produces a `GEOGCS` for geographic definitions, otherwise a
/// `PROJCS` wrapping the base `GEOGCS`.
pub fn to_wkt1(proj: &Proj) -> String {
    let defn = proj.defn();

    if defn.is_geographic() {
        return wkt1_geogcs(proj, "unknown");
    }

    let Some(view) = MethodView::new(proj) else {
        // No WKT counterpart (geocent, ...): fall back to the base
        // geographic system
        return wkt1_geogcs(proj, "unknown");
    };

    let mut out = format!(
        r#"PROJCS["unknown",{},PROJECTION["{}"]"#,
        wkt1_geogcs(proj, "unknown"),
        view.wkt1_name
    );

    for (name, _, value, _) in &view.parameters {
        let _ = write!(out, r#",PARAMETER["{name}",{value}]"#);
    }

    let _ = write!(out, ",{METRE_UNIT}");
    let _ = write!(out, r#",AXIS["Easting",EAST],AXIS["Northing",NORTH]]"#);
    out
}

// ---------------
// WKT 2
// ---------------

fn wkt2_datum(proj: &Proj) -> String {
    let (ellps_name, a, rf) = spheroid(proj);
    let mut out = format!(
        r#"DATUM["{}",ELLIPSOID["{ellps_name}",{a},{rf},{LENGTHUNIT}]]"#,
        datum_name(proj),
    );
    let _ = write!(
        out,
        r#",PRIMEM["{}",{},{ANGLEUNIT}]"#,
        pm_name(proj.defn().pm.as_deref().unwrap_or("Greenwich")),
        pm_value(proj)
    );
    out
}

fn wkt2_geogcrs(proj: &Proj, name: &str) -> String {
    format!(
        concat!(
            r#"GEOGCRS["{}",{},"#,
            r#"CS[ellipsoidal,2],"#,
            r#"AXIS["geodetic longitude (Lon)",east,ORDER[1]],"#,
            r#"AXIS["geodetic latitude (Lat)",north,ORDER[2]],"#,
            r#"{}]"#
        ),
        name,
        wkt2_datum(proj),
        ANGLEUNIT
    )
}

/// Emit a definition as WKT2
pub fn to_wkt2(proj: &Proj) -> String {
    let defn = proj.defn();

    if defn.is_geographic() {
        return wkt2_geogcrs(proj, "unknown");
    }

    let Some(view) = MethodView::new(proj) else {
        return wkt2_geogcrs(proj, "unknown");
    };

    let mut out = format!(
        r#"PROJCRS["unknown",BASEGEOGCRS["unknown",{}],CONVERSION["unknown",METHOD["{}"]"#,
        wkt2_datum(proj),
        view.wkt2_name
    );

    for (_, name, value, kind) in &view.parameters {
        let unit = match kind {
            ParamKind::Angular => ANGLEUNIT,
            ParamKind::Linear => LENGTHUNIT,
            ParamKind::Scale => SCALEUNIT,
        };
        let _ = write!(out, r#",PARAMETER["{name}",{value},{unit}]"#);
    }
    out.push(']');

    let _ = write!(
        out,
        concat!(
            r#",CS[Cartesian,2],"#,
            r#"AXIS["(E)",east,ORDER[1]],AXIS["(N)",north,ORDER[2]],"#,
            r#"{}]"#
        ),
        LENGTHUNIT
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::Proj;
    use crate::wkt::{version, WktVersion};

    #[test]
    fn wkt1_geographic_roundtrip() {
        let p = Proj::from_proj_string("+proj=longlat +datum=WGS84").unwrap();
        let wkt = to_wkt1(&p);
        assert!(wkt.starts_with(r#"GEOGCS["#));
        assert!(wkt.contains(r#"DATUM["WGS_1984""#));
        assert_eq!(version(&wkt), WktVersion::Wkt1);

        let p2 = Proj::from_wkt(&wkt).unwrap();
        assert!(p2.is_latlong());
        approx::assert_abs_diff_eq!(p2.ellps().a, p.ellps().a, epsilon = 0.1);
    }

    #[test]
    fn wkt1_projected_roundtrip() {
        let p = Proj::from_proj_string("+proj=utm +zone=33 +south +datum=WGS84").unwrap();
        let wkt = to_wkt1(&p);
        assert!(wkt.contains(r#"PROJECTION["Transverse_Mercator"]"#));
        assert!(wkt.contains(r#"PARAMETER["central_meridian",15]"#));
        assert!(wkt.contains(r#"PARAMETER["false_northing",10000000]"#));

        let p2 = Proj::from_wkt(&wkt).unwrap();
        approx::assert_abs_diff_eq!(p2.lam0(), p.lam0(), epsilon = 1e-12);
        approx::assert_abs_diff_eq!(p2.data().k0, p.data().k0, epsilon = 1e-6);
        assert_eq!(p2.y0(), 10_000_000.);
    }

    #[test]
    fn wkt2_geographic() {
        let p = Proj::from_proj_string("+proj=longlat +datum=WGS84").unwrap();
        let wkt = to_wkt2(&p);
        assert!(wkt.starts_with(r#"GEOGCRS["#));
        assert!(wkt.contains("ELLIPSOID"));
        assert!(wkt.contains("ANGLEUNIT"));
        assert_eq!(version(&wkt), WktVersion::Wkt2_2015);

        let p2 = Proj::from_wkt(&wkt).unwrap();
        assert!(p2.is_latlong());
    }

    #[test]
    fn wkt2_projected_roundtrip() {
        let p = Proj::from_proj_string(
            "+proj=lcc +lat_1=49 +lat_2=44 +lat_0=46.5 +lon_0=3 +x_0=700000 +y_0=6600000 +ellps=GRS80",
        )
        .unwrap();
        let wkt = to_wkt2(&p);
        assert!(wkt.contains(r#"METHOD["Lambert Conic Conformal (2SP)"]"#));
        assert_eq!(version(&wkt), WktVersion::Wkt2_2015);

        let p2 = Proj::from_wkt(&wkt).unwrap();
        assert_eq!(p2.projname(), "lcc");
        approx::assert_abs_diff_eq!(p2.ellps().a, p.ellps().a, epsilon = 0.1);
        approx::assert_abs_diff_eq!(p2.data().phi0, p.data().phi0, epsilon = 1e-12);
        assert_eq!(p2.x0(), 700000.);
    }
}
