//!
//! Process wide catalog of loaded grids
//!
//! Grids are loaded rarely and looked up on every datum transform
//! setup, so the store sits behind a reader preferring lock and hands
//! out shared references. Removal drops a name and its subgrids once
//! the last projection referencing them goes away.
//!
use super::grid::Grid;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Shared reference to a loaded subgrid
pub type GridRef = Arc<Grid>;

lazy_static! {
    static ref CATALOG: RwLock<HashMap<String, Vec<GridRef>>> = RwLock::new(HashMap::new());
}

/// Register subgrids under `name`
///
/// Subgrids of a multi grid file are expected ordered from the lowest
/// to the highest resolution.
pub fn add_grids(name: &str, grids: Vec<Grid>) {
    let grids: Vec<GridRef> = grids.into_iter().map(Arc::new).collect();
    CATALOG
        .write()
        .unwrap()
        .entry(name.to_string())
        .or_default()
        .extend(grids);
}

/// Collect the subgrids registered under `name`
///
/// Returns false if the name is unknown.
pub(crate) fn find_grids(name: &str, grids: &mut Vec<GridRef>) -> bool {
    match CATALOG.read().unwrap().get(name) {
        Some(found) => {
            grids.extend(found.iter().cloned());
            true
        }
        None => false,
    }
}

/// Check for a registered name
pub fn contains(name: &str) -> bool {
    CATALOG.read().unwrap().contains_key(name)
}

/// Remove the subgrids registered under `name`
pub fn remove_grids(name: &str) -> bool {
    CATALOG.write().unwrap().remove(name).is_some()
}

/// Drop all registered grids
pub fn clear() {
    CATALOG.write().unwrap().clear();
}
