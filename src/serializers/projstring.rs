//!
//! Definition to projstring
//!
use crate::proj::Proj;
use std::fmt::Write;

/// Emit a definition as a projstring
///
/// Parameters come out in a stable order, `+proj=` always first, so
/// equal definitions produce identical strings.
pub fn to_proj_string(proj: &Proj) -> String {
    let defn = proj.defn();
    let mut out = format!("+proj={}", defn.proj);

    let mut num = |key: &str, v: Option<f64>| {
        if let Some(v) = v {
            let _ = write!(out, " +{key}={v}");
        }
    };

    num("lat_0", defn.lat_0);
    num("lat_1", defn.lat_1);
    num("lat_2", defn.lat_2);
    num("lat_ts", defn.lat_ts);
    num("lon_0", defn.lon_0);
    num("lonc", defn.lonc);
    num("alpha", defn.alpha);
    num("gamma", defn.gamma);
    num("k_0", defn.k_0);
    num("x_0", defn.x_0);
    num("y_0", defn.y_0);

    if let Some(zone) = defn.zone {
        let _ = write!(out, " +zone={zone}");
    }
    if defn.south {
        out.push_str(" +south");
    }

    // Ellipsoid: explicit radius, then a with b or rf, then the
    // named ellipsoid
    if let Some(r) = defn.r {
        let _ = write!(out, " +R={r}");
    } else if let Some(a) = defn.a {
        let _ = write!(out, " +a={a}");
        if let Some(b) = defn.b {
            let _ = write!(out, " +b={b}");
        } else if let Some(rf) = defn.rf {
            let _ = write!(out, " +rf={rf}");
        }
    } else if let Some(ellps) = &defn.ellps {
        let _ = write!(out, " +ellps={ellps}");
    }

    if let Some(datum) = &defn.datum {
        let _ = write!(out, " +datum={datum}");
    }
    if let Some(towgs84) = &defn.towgs84 {
        out.push_str(" +towgs84=");
        let mut sep = "";
        for v in towgs84 {
            let _ = write!(out, "{sep}{v}");
            sep = ",";
        }
    }
    if let Some(nadgrids) = &defn.nadgrids {
        let _ = write!(out, " +nadgrids={nadgrids}");
    }
    if let Some(pm) = &defn.pm {
        let _ = write!(out, " +pm={pm}");
    }

    if let Some(to_meter) = defn.to_meter {
        let _ = write!(out, " +to_meter={to_meter}");
    } else if let Some(units) = &defn.units {
        let _ = write!(out, " +units={units}");
    }

    if let Some(axis) = &defn.axis {
        let _ = write!(out, " +axis={axis}");
    }

    if defn.over {
        out.push_str(" +over");
    }
    if defn.r_a {
        out.push_str(" +R_A");
    }
    if defn.sphere {
        out.push_str(" +sphere");
    }
    if defn.no_defs {
        out.push_str(" +no_defs");
    }

    out
}
