//!
//! EPSG code guess
//!
//! Table based reverse lookup for the small set of systems where a
//! code can be derived with confidence: the WGS84 and NAD83
//! geographic systems, Web Mercator, the UTM zones and the UPS pair.
//!
use crate::proj::Proj;

fn is_wgs84_based(proj: &Proj) -> bool {
    let defn = proj.defn();
    defn.datum.as_deref().map(|d| d.eq_ignore_ascii_case("WGS84")) == Some(true)
        || defn.ellps.as_deref().map(|e| e.eq_ignore_ascii_case("WGS84")) == Some(true)
}

/// Guess the EPSG code of a definition
///
/// Returns `None` whenever the definition does not obviously match a
/// well known code: a wrong guess is worse than no guess.
pub fn guess_epsg(proj: &Proj) -> Option<String> {
    let defn = proj.defn();

    match defn.proj.as_str() {
        // Geographic systems
        "longlat" | "latlong" | "latlon" | "lonlat" => match defn.datum.as_deref() {
            Some(d) if d.eq_ignore_ascii_case("WGS84") => Some("EPSG:4326".into()),
            Some(d) if d.eq_ignore_ascii_case("NAD83") => Some("EPSG:4269".into()),
            _ => None,
        },

        // Web Mercator: the spherical mercator on the WGS84 major axis
        "merc" | "webmerc" => {
            let spherical = defn.proj == "webmerc"
                || (defn.a == Some(6378137.) && defn.b == Some(6378137.))
                || (defn.sphere && defn.a == Some(6378137.));
            if spherical
                && defn.x_0.unwrap_or(0.) == 0.
                && defn.y_0.unwrap_or(0.) == 0.
                && defn.lon_0.unwrap_or(0.) == 0.
                && defn.k_0.unwrap_or(1.) == 1.
                && defn.lat_ts.unwrap_or(0.) == 0.
            {
                Some("EPSG:3857".into())
            } else {
                None
            }
        }

        // UTM zones
        "utm" => {
            if !is_wgs84_based(proj) {
                return None;
            }
            let zone = defn.zone?;
            if !(1..=60).contains(&zone) {
                return None;
            }
            if defn.south {
                Some(format!("EPSG:327{zone:02}"))
            } else {
                Some(format!("EPSG:326{zone:02}"))
            }
        }

        // The expanded transverse mercator form of a UTM zone
        "tmerc" | "etmerc" => {
            if !is_wgs84_based(proj) {
                return None;
            }
            if defn.k_0 != Some(0.9996)
                || defn.x_0 != Some(500_000.)
                || defn.lat_0.unwrap_or(0.) != 0.
            {
                return None;
            }
            let lon_0 = defn.lon_0?;
            let zone = (lon_0 + 183.) / 6.;
            if zone.fract() != 0. || !(1. ..=60.).contains(&zone) {
                return None;
            }
            match defn.y_0.unwrap_or(0.) {
                y if y == 0. => Some(format!("EPSG:326{:02}", zone as i32)),
                y if y == 10_000_000. => Some(format!("EPSG:327{:02}", zone as i32)),
                _ => None,
            }
        }

        // Universal Polar Stereographic
        "ups" | "stere" => {
            if !is_wgs84_based(proj) {
                return None;
            }
            let polar_north = defn.proj == "ups" && !defn.south
                || defn.lat_0 == Some(90.);
            let polar_south = defn.proj == "ups" && defn.south
                || defn.lat_0 == Some(-90.);
            let ups_params = defn.proj == "ups"
                || (defn.k_0 == Some(0.994)
                    && defn.x_0 == Some(2_000_000.)
                    && defn.y_0 == Some(2_000_000.));
            if ups_params && polar_north {
                Some("EPSG:5041".into())
            } else if ups_params && polar_south {
                Some("EPSG:5042".into())
            } else {
                None
            }
        }

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::Proj;
    use crate::registry;

    #[test]
    fn epsg_guess_geographic() {
        let p = Proj::from_proj_string("+proj=longlat +datum=WGS84 +no_defs").unwrap();
        assert_eq!(guess_epsg(&p).as_deref(), Some("EPSG:4326"));

        let p = Proj::from_proj_string("+proj=longlat +datum=NAD83 +no_defs").unwrap();
        assert_eq!(guess_epsg(&p).as_deref(), Some("EPSG:4269"));

        let p = Proj::from_proj_string("+proj=longlat +ellps=bessel").unwrap();
        assert_eq!(guess_epsg(&p), None);
    }

    #[test]
    fn epsg_guess_webmercator() {
        let p = registry::get("EPSG:3857").unwrap();
        assert_eq!(guess_epsg(&p).as_deref(), Some("EPSG:3857"));
    }

    #[test]
    fn epsg_guess_utm() {
        let p = Proj::from_proj_string("+proj=utm +zone=32 +datum=WGS84").unwrap();
        assert_eq!(guess_epsg(&p).as_deref(), Some("EPSG:32632"));

        let p = Proj::from_proj_string("+proj=utm +zone=33 +south +ellps=WGS84").unwrap();
        assert_eq!(guess_epsg(&p).as_deref(), Some("EPSG:32733"));

        // expanded form
        let p = Proj::from_proj_string(
            "+proj=tmerc +lat_0=0 +lon_0=9 +k_0=0.9996 +x_0=500000 +y_0=0 +datum=WGS84",
        )
        .unwrap();
        assert_eq!(guess_epsg(&p).as_deref(), Some("EPSG:32632"));

        // a non UTM central meridian yields no guess
        let p = Proj::from_proj_string(
            "+proj=tmerc +lat_0=0 +lon_0=10 +k_0=0.9996 +x_0=500000 +y_0=0 +datum=WGS84",
        )
        .unwrap();
        assert_eq!(guess_epsg(&p), None);
    }

    #[test]
    fn epsg_guess_ups() {
        let p = registry::get("EPSG:5041").unwrap();
        assert_eq!(guess_epsg(&p).as_deref(), Some("EPSG:5041"));
        let p = registry::get("EPSG:5042").unwrap();
        assert_eq!(guess_epsg(&p).as_deref(), Some("EPSG:5042"));
    }
}
