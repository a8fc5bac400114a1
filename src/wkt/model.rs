//!
//! Typed WKT CRS model
//!
//! Shared lowering target of the WKT1, WKT2 and PROJJSON parsers;
//! borrows from the source text.
//!

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitType {
    Linear,
    Angular,
    Scale,
    Unknown,
}

#[derive(Debug, PartialEq)]
pub struct Authority<'a> {
    pub name: &'a str,
    pub code: &'a str,
}

#[derive(Debug, PartialEq)]
pub struct Unit<'a> {
    pub name: &'a str,
    pub factor: f64,
    pub unit_type: UnitType,
    pub authority: Option<Authority<'a>>,
}

#[derive(Debug, PartialEq)]
pub struct Method<'a> {
    pub name: &'a str,
    pub authority: Option<Authority<'a>>,
}

#[derive(Debug, PartialEq)]
pub struct Parameter<'a> {
    pub name: &'a str,
    pub value: &'a str,
    pub unit: Option<Unit<'a>>,
    pub authority: Option<Authority<'a>>,
}

#[derive(Debug, PartialEq)]
pub struct Ellipsoid<'a> {
    pub name: &'a str,
    pub a: &'a str,
    pub rf: &'a str,
    pub unit: Option<Unit<'a>>,
}

#[derive(Debug, PartialEq)]
pub struct Datum<'a> {
    pub name: &'a str,
    pub ellipsoid: Ellipsoid<'a>,
    pub to_wgs84: Vec<&'a str>,
}

#[derive(Debug, PartialEq)]
pub struct PrimeMeridian<'a> {
    pub name: &'a str,
    /// decimal degrees east of Greenwich
    pub longitude: f64,
}

#[derive(Debug, PartialEq)]
pub struct AxisDir<'a> {
    pub name: &'a str,
    /// EAST, WEST, NORTH, SOUTH, UP, DOWN
    pub direction: &'a str,
}

#[derive(Debug, PartialEq)]
pub struct Geogcs<'a> {
    pub name: &'a str,
    pub datum: Datum<'a>,
    pub prime_meridian: Option<PrimeMeridian<'a>>,
    pub unit: Option<Unit<'a>>,
    pub axes: Vec<AxisDir<'a>>,
    pub authority: Option<Authority<'a>>,
}

#[derive(Debug, PartialEq)]
pub struct Projection<'a> {
    pub name: &'a str,
    pub method: Method<'a>,
    pub parameters: Vec<Parameter<'a>>,
    pub authority: Option<Authority<'a>>,
}

#[derive(Debug, PartialEq)]
pub struct Projcs<'a> {
    pub name: &'a str,
    pub geogcs: Geogcs<'a>,
    pub projection: Projection<'a>,
    pub unit: Option<Unit<'a>>,
    pub axes: Vec<AxisDir<'a>>,
    pub authority: Option<Authority<'a>>,
}

#[derive(Debug, PartialEq)]
pub enum Horizontalcrs<'a> {
    Projcs(Projcs<'a>),
    Geogcs(Geogcs<'a>),
}

#[derive(Debug, PartialEq)]
pub struct Compoundcrs<'a> {
    pub name: &'a str,
    pub h_crs: Horizontalcrs<'a>,
}

#[derive(Debug, PartialEq)]
pub struct Verticalcrs<'a> {
    pub name: &'a str,
}

/// WKT2 BOUNDCRS: a source CRS plus its transformation to WGS84
#[derive(Debug, PartialEq)]
pub struct Boundcrs<'a> {
    pub source: Horizontalcrs<'a>,
    /// transformation method name
    pub method: Option<&'a str>,
    /// transformation parameters
    pub parameters: Vec<Parameter<'a>>,
}
