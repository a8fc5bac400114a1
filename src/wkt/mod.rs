//!
//! WKT CRS parsing
//!
//! Supports both WKT1 and WKT2 (2015 and 2019 revisions). The surface
//! syntax is tokenized ([`parser`]), built into a typed model
//! ([`builder`], [`model`]) and lowered to a projstring
//! ([`projstr`]); the projstring then feeds the regular definition
//! pipeline so every input syntax normalizes identically.
//!
pub mod builder;
pub mod methods;
pub mod model;
pub mod parser;
pub mod projstr;

use crate::errors::Result;

pub use builder::Builder;
pub use projstr::{normalize_datum_code, Formatter};

/// WKT revision, decided from the keyword set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WktVersion {
    Wkt1,
    Wkt2_2015,
    Wkt2_2019,
}

/// Probe the WKT revision of a string
///
/// WKT1 signals: `PROJCS`, `GEOGCS`, `LOCAL_CS`, `UNIT`. WKT2
/// signals: `PROJCRS`, `GEOGCRS`, `BOUNDCRS`, `LENGTHUNIT`,
/// `ANGLEUNIT`, `SCALEUNIT`; the 2019 revision additionally `USAGE`.
pub fn version(s: &str) -> WktVersion {
    let has_keyword = |kw: &str| {
        s.match_indices(kw).any(|(i, _)| {
            // a keyword is followed by an opening bracket and not
            // preceded by an identifier character
            let before_ok = i == 0
                || !s[..i]
                    .chars()
                    .next_back()
                    .map(|c| c.is_alphanumeric() || c == '_')
                    .unwrap_or(false);
            let after = s[i + kw.len()..].trim_start();
            before_ok && (after.starts_with('[') || after.starts_with('('))
        })
    };

    if has_keyword("USAGE") {
        WktVersion::Wkt2_2019
    } else if has_keyword("PROJCRS")
        || has_keyword("GEOGCRS")
        || has_keyword("BOUNDCRS")
        || has_keyword("LENGTHUNIT")
        || has_keyword("ANGLEUNIT")
        || has_keyword("SCALEUNIT")
    {
        WktVersion::Wkt2_2015
    } else {
        WktVersion::Wkt1
    }
}

/// Convert a WKT string to a projstring
pub fn wkt_to_projstring(i: &str) -> Result<String> {
    Builder::new()
        .parse(i)
        .and_then(|node| Formatter::new().format(&node))
}
