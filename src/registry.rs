//!
//! CRS registry
//!
//! Process wide mapping from authority codes (`EPSG:3857`) and named
//! aliases to parsed, shared projection definitions. The authority
//! part of a key is case insensitive, the code part is preserved.
//!
//! Seeded with the well known builtins: the WGS84 and NAD83 geographic
//! systems, Web Mercator and its legacy aliases, the UTM zones and
//! the polar UPS pair.
//!
use crate::errors::{Error, Result};
use crate::log::error;
use crate::proj::Proj;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

type Store = HashMap<String, Arc<Proj>>;

lazy_static! {
    static ref REGISTRY: RwLock<Store> = RwLock::new(builtins());
}

const EPSG_4326: &str = "+proj=longlat +datum=WGS84 +no_defs";
const EPSG_4269: &str = "+proj=longlat +datum=NAD83 +no_defs";
const EPSG_3857: &str = concat!(
    "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 ",
    "+units=m +nadgrids=@null +no_defs"
);
const EPSG_5041: &str = concat!(
    "+proj=stere +lat_0=90 +lat_ts=90 +lon_0=0 +k=0.994 +x_0=2000000 +y_0=2000000 ",
    "+datum=WGS84 +units=m +no_defs"
);
const EPSG_5042: &str = concat!(
    "+proj=stere +lat_0=-90 +lat_ts=-90 +lon_0=0 +k=0.994 +x_0=2000000 +y_0=2000000 ",
    "+datum=WGS84 +units=m +no_defs"
);

fn builtins() -> Store {
    let mut store = Store::new();

    let mut seed = |key: &str, defn: &str| match Proj::from_proj_string(defn) {
        Ok(proj) => {
            store.insert(normalize_key(key), Arc::new(proj));
        }
        Err(_err) => {
            error!("Invalid builtin definition for {}: {:?}", key, _err);
        }
    };

    seed("EPSG:4326", EPSG_4326);
    seed("EPSG:4269", EPSG_4269);
    seed("EPSG:3857", EPSG_3857);
    seed("EPSG:5041", EPSG_5041);
    seed("EPSG:5042", EPSG_5042);

    // UTM zones, north then south
    for zone in 1..=60 {
        seed(
            &format!("EPSG:326{zone:02}"),
            &format!("+proj=utm +zone={zone} +datum=WGS84 +units=m +no_defs"),
        );
        seed(
            &format!("EPSG:327{zone:02}"),
            &format!("+proj=utm +zone={zone} +south +datum=WGS84 +units=m +no_defs"),
        );
    }

    // Aliases
    let mut alias = |key: &str, target: &str| {
        if let Some(proj) = store.get(&normalize_key(target)).cloned() {
            store.insert(normalize_key(key), proj);
        }
    };

    alias("WGS84", "EPSG:4326");
    alias("EPSG:3785", "EPSG:3857");
    alias("EPSG:900913", "EPSG:3857");
    alias("EPSG:102113", "EPSG:3857");
    alias("GOOGLE", "EPSG:3857");

    store
}

/// Normalize a registry key: the authority part is case insensitive,
/// the code part is preserved. A bare name has no code part and is
/// fully case insensitive.
fn normalize_key(key: &str) -> String {
    match key.split_once(':') {
        Some((authority, code)) => {
            format!("{}:{}", authority.trim().to_ascii_uppercase(), code.trim())
        }
        None => key.trim().to_ascii_uppercase(),
    }
}

/// Look up a definition
pub fn get(key: &str) -> Option<Arc<Proj>> {
    let normalized = normalize_key(key);
    let found = REGISTRY.read().unwrap().get(&normalized).cloned();

    #[cfg(feature = "crs-definitions")]
    {
        if found.is_none() {
            return epsg_fallback(&normalized);
        }
    }

    found
}

// Resolve unknown EPSG codes through the embedded proj4 definitions
#[cfg(feature = "crs-definitions")]
fn epsg_fallback(normalized: &str) -> Option<Arc<Proj>> {
    let code = normalized.strip_prefix("EPSG:")?.parse::<u16>().ok()?;
    let defn = crs_definitions::from_code(code)?;
    let proj = Arc::new(Proj::from_proj_string(defn.proj4).ok()?);
    REGISTRY
        .write()
        .unwrap()
        .insert(normalized.to_string(), proj.clone());
    Some(proj)
}

/// Register a definition under a key
///
/// The definition may be any string accepted by
/// [`Proj::from_user_string`].
pub fn set(key: &str, defn: &str) -> Result<()> {
    let proj = Proj::from_user_string(defn)?;
    set_proj(key, proj);
    Ok(())
}

/// Register an already parsed definition under a key
pub fn set_proj(key: &str, proj: Proj) {
    REGISTRY
        .write()
        .unwrap()
        .insert(normalize_key(key), Arc::new(proj));
}

/// Check for a registered key
pub fn has(key: &str) -> bool {
    REGISTRY.read().unwrap().contains_key(&normalize_key(key))
}

/// Remove a registered key
pub fn remove(key: &str) -> bool {
    REGISTRY.write().unwrap().remove(&normalize_key(key)).is_some()
}

/// Register `key` as an alias of an existing entry
pub fn alias(key: &str, existing: &str) -> Result<()> {
    let proj = get(existing).ok_or_else(|| Error::CrsNotFound(existing.into()))?;
    REGISTRY.write().unwrap().insert(normalize_key(key), proj);
    Ok(())
}

/// Restore the registry to its builtin state
pub fn reset() {
    *REGISTRY.write().unwrap() = builtins();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_builtin_lookup() {
        let p = get("EPSG:4326").unwrap();
        assert!(p.is_latlong());

        // authority is case insensitive
        assert!(get("epsg:4326").is_some());
        assert!(get("ePsG:3857").is_some());

        // aliases
        assert!(get("GOOGLE").is_some());
        assert!(get("WGS84").unwrap().is_latlong());
        assert!(get("EPSG:900913").is_some());
    }

    #[test]
    fn registry_utm_seeds() {
        let p = get("EPSG:32632").unwrap();
        assert_eq!(p.projname(), "utm");
        approx::assert_abs_diff_eq!(p.lam0(), 9f64.to_radians(), epsilon = 1e-12);

        let p = get("EPSG:32733").unwrap();
        assert_eq!(p.y0(), 10_000_000.);
    }

    #[test]
    fn registry_ups_seeds() {
        let p = get("EPSG:5041").unwrap();
        assert_eq!(p.projname(), "stere");
        assert_eq!(p.x0(), 2_000_000.);
    }

    #[test]
    fn registry_set_get_remove() {
        assert!(!has("TEST:registry_roundtrip"));
        set(
            "TEST:registry_roundtrip",
            "+proj=merc +lon_0=110 +ellps=WGS84",
        )
        .unwrap();
        assert!(has("test:registry_roundtrip"));

        alias("TEST:registry_alias", "TEST:registry_roundtrip").unwrap();
        assert!(has("TEST:registry_alias"));

        assert!(remove("TEST:registry_roundtrip"));
        assert!(!has("TEST:registry_roundtrip"));
        // the alias still resolves
        assert!(has("TEST:registry_alias"));
        remove("TEST:registry_alias");
    }

    #[test]
    fn registry_code_is_case_sensitive() {
        set("TEST:CaseCode", "+proj=longlat +ellps=WGS84").unwrap();
        assert!(has("test:CaseCode"));
        assert!(!has("TEST:casecode"));
        remove("TEST:CaseCode");
    }

    #[test]
    fn registry_unknown() {
        assert!(get("EPSG:999999").is_none());
        assert!(matches!(
            crate::proj::Proj::from_user_string("EPSG:999999"),
            Err(Error::CrsNotFound(_))
        ));
    }
}
