//!
//! Build the typed CRS model from the WKT syntactic stream
//!
//! Keywords cover both WKT1 and the WKT2 revisions; unknown nodes are
//! consumed and ignored so `USAGE`, `SCOPE`, `AREA`, `REMARK`, ... do
//! not get in the way.
//!
use crate::errors::{Error, Result};
use crate::wkt::model::*;
use crate::wkt::parser::{parse, Attribute, Processor};

#[allow(non_camel_case_types)]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq)]
pub enum Node<'a> {
    AUTHORITY(Authority<'a>),
    UNIT(Unit<'a>),
    METHOD(Method<'a>),
    PARAMETER(Parameter<'a>),
    DATUM(Datum<'a>),
    PRIMEM(PrimeMeridian<'a>),
    AXIS(AxisDir<'a>),
    PROJCS(Projcs<'a>),
    GEOGCS(Geogcs<'a>),
    PROJECTION(Projection<'a>),
    ELLIPSOID(Ellipsoid<'a>),
    COMPOUNDCRS(Compoundcrs<'a>),
    VERTICALCRS(Verticalcrs<'a>),
    BOUNDCRS(Boundcrs<'a>),
    SOURCECRS(Horizontalcrs<'a>),
    ABRIDGED(Option<&'a str>, Vec<Parameter<'a>>),
    TOWGS84(Vec<&'a str>),
    OTHER(&'a str),
}

#[derive(Debug, Default)]
pub struct Builder;

impl Builder {
    pub fn new() -> Self {
        Builder {}
    }

    pub fn parse<'a>(&self, s: &'a str) -> Result<Node<'a>> {
        parse(s, self)
    }
}

impl<'a> Processor<'a> for Builder {
    type Err = Error;
    type Output = Node<'a>;

    fn process<I>(&self, key: &'a str, depth: usize, attrs: I) -> Result<Self::Output, Self::Err>
    where
        I: Iterator<Item = Attribute<'a, Self::Output>>,
    {
        let _ = depth;
        match key {
            "AUTHORITY" | "ID" => self.authority(attrs).map(Node::AUTHORITY),
            "PROJCS" | "PROJCRS" | "PROJECTEDCRS" => self.projcs(attrs).map(Node::PROJCS),
            "GEOGCS" | "GEOGCRS" | "GEOGRAPHICCRS" | "BASEGEODCRS" | "BASEGEOGCRS" | "GEODCRS" => {
                self.geogcs(attrs).map(Node::GEOGCS)
            }
            "ELLIPSOID" | "SPHEROID" => self.ellipsoid(attrs).map(Node::ELLIPSOID),
            "CONVERSION" => self.projection(attrs).map(Node::PROJECTION),
            "PROJECTION" | "METHOD" => self.method(attrs).map(Node::METHOD),
            "PARAMETER" | "PARAMETERFILE" => self.parameter(attrs).map(Node::PARAMETER),
            "DATUM" | "GEODETICDATUM" | "TRF" | "ENSEMBLE" => self.datum(attrs).map(Node::DATUM),
            "PRIMEM" | "PRIMEMERIDIAN" => self.primem(attrs).map(Node::PRIMEM),
            "AXIS" => self.axis(attrs).map(Node::AXIS),
            "UNIT" | "LENGTHUNIT" | "ANGLEUNIT" | "SCALEUNIT" | "SCALUNIT" => {
                self.unit(key, attrs).map(Node::UNIT)
            }
            "COMPD_CS" | "COMPOUNDCRS" => self.compoundcrs(attrs).map(Node::COMPOUNDCRS),
            "VERT_CS" | "VERTCRS" | "VERTICALCRS" => self.verticalcrs(attrs).map(Node::VERTICALCRS),
            "TOWGS84" => self.towgs84(attrs).map(Node::TOWGS84),
            "BOUNDCRS" => self.boundcrs(attrs).map(Node::BOUNDCRS),
            "SOURCECRS" => self.sourcecrs(attrs).map(Node::SOURCECRS),
            "ABRIDGEDTRANSFORMATION" | "TRANSFORMATION" => self.abridged(attrs),
            _ => {
                // Consume tokens
                for _ in attrs {}
                Ok(Node::OTHER(key))
            }
        }
    }
}

impl Builder {
    fn projcs<'a>(
        &self,
        attrs: impl Iterator<Item = Attribute<'a, Node<'a>>>,
    ) -> Result<Projcs<'a>> {
        let mut name = None;
        let mut geogcs = None;
        let mut projection = None;
        let mut method = None;
        let mut unit = None;
        let mut authority = None;
        let mut axes = vec![];

        let mut parameters: Vec<Parameter<'a>> = vec![];

        for (i, a) in attrs.enumerate() {
            match a {
                Attribute::Quoted(s) if i == 0 => name = Some(s),
                Attribute::Keyword(_, n) => match n {
                    Node::GEOGCS(cs) => geogcs = Some(cs),
                    Node::PROJECTION(p) => projection = Some(p),
                    // WKT1 carries the parameters at the root level
                    Node::AUTHORITY(auth) => authority = Some(auth),
                    Node::UNIT(u) => unit = Some(u),
                    Node::METHOD(m) => method = Some(m),
                    Node::PARAMETER(p) => parameters.push(p),
                    Node::AXIS(ax) => axes.push(ax),
                    _ => (),
                },
                _ => (),
            }
        }

        // On pre WKT2 the projection method is a sibling node
        if projection.is_none() {
            let me = method.ok_or(Error::WktParseError(
                "No projection method defined".into(),
            ))?;
            projection = Some(Projection {
                name: "unnamed",
                method: me,
                parameters,
                authority: None,
            });
        }

        Ok(Projcs {
            name: name.unwrap_or("unnamed"),
            geogcs: geogcs.ok_or(Error::WktParseError("Missing PROJCS GEOGCS".into()))?,
            projection: projection
                .ok_or(Error::WktParseError("Missing PROJCS projection".into()))?,
            unit,
            axes,
            authority,
        })
    }

    fn projection<'a>(
        &self,
        attrs: impl Iterator<Item = Attribute<'a, Node<'a>>>,
    ) -> Result<Projection<'a>> {
        let mut name = None;
        let mut method = None;
        let mut authority = None;

        let mut parameters: Vec<Parameter<'a>> = vec![];

        for (i, a) in attrs.enumerate() {
            match a {
                Attribute::Quoted(s) if i == 0 => name = Some(s),
                Attribute::Keyword(_, n) => match n {
                    Node::METHOD(m) => method = Some(m),
                    Node::PARAMETER(p) => parameters.push(p),
                    Node::AUTHORITY(auth) => authority = Some(auth),
                    _ => (),
                },
                _ => (),
            }
        }

        Ok(Projection {
            name: name.unwrap_or(""),
            method: method.ok_or(Error::WktParseError(
                "Missing METHOD in projection definition".into(),
            ))?,
            parameters,
            authority,
        })
    }

    fn method<'a>(
        &self,
        attrs: impl Iterator<Item = Attribute<'a, Node<'a>>>,
    ) -> Result<Method<'a>> {
        let mut name = None;
        let mut authority = None;

        for (i, a) in attrs.enumerate() {
            match a {
                Attribute::Quoted(s) if i == 0 => name = Some(s),
                Attribute::Keyword(_, Node::AUTHORITY(auth)) => authority = Some(auth),
                _ => (),
            }
        }

        Ok(Method {
            name: name.ok_or(Error::WktParseError(
                "Missing METHOD or PROJECTION name".into(),
            ))?,
            authority,
        })
    }

    fn parameter<'a>(
        &self,
        attrs: impl Iterator<Item = Attribute<'a, Node<'a>>>,
    ) -> Result<Parameter<'a>> {
        let mut name = None;
        let mut value = None;
        let mut unit = None;
        let mut authority = None;

        for (i, a) in attrs.enumerate() {
            match a {
                Attribute::Quoted(s) if i == 0 => name = Some(s),
                // PARAMETERFILE values are quoted file names
                Attribute::Number(s) | Attribute::Quoted(s) if i == 1 => value = Some(s),
                Attribute::Keyword(_, n) => match n {
                    Node::AUTHORITY(auth) => authority = Some(auth),
                    Node::UNIT(u) => unit = Some(u),
                    _ => (),
                },
                _ => (),
            }
        }

        Ok(Parameter {
            name: name.ok_or(Error::WktParseError("Missing PARAMETER name".into()))?,
            value: value.ok_or(Error::WktParseError("Missing PARAMETER value".into()))?,
            unit,
            authority,
        })
    }

    fn geogcs<'a>(
        &self,
        attrs: impl Iterator<Item = Attribute<'a, Node<'a>>>,
    ) -> Result<Geogcs<'a>> {
        let mut name = None;
        let mut datum = None;
        let mut prime_meridian = None;
        let mut unit = None;
        let mut axes = vec![];
        let mut authority = None;

        for (i, a) in attrs.enumerate() {
            match a {
                Attribute::Quoted(s) if i == 0 => name = Some(s),
                Attribute::Keyword(_, n) => match n {
                    Node::DATUM(d) => datum = Some(d),
                    Node::PRIMEM(pm) => prime_meridian = Some(pm),
                    Node::UNIT(u) => unit = Some(u),
                    Node::AXIS(ax) => axes.push(ax),
                    Node::AUTHORITY(auth) => authority = Some(auth),
                    _ => (),
                },
                _ => (),
            }
        }

        Ok(Geogcs {
            name: name.unwrap_or(""),
            datum: datum.ok_or(Error::WktParseError(
                "Missing DATUM for Geodetic CRS".into(),
            ))?,
            prime_meridian,
            unit,
            axes,
            authority,
        })
    }

    fn datum<'a>(&self, attrs: impl Iterator<Item = Attribute<'a, Node<'a>>>) -> Result<Datum<'a>> {
        let mut name = None;
        let mut ellipsoid = None;
        let mut to_wgs84 = vec![];

        for (i, a) in attrs.enumerate() {
            match a {
                Attribute::Quoted(s) if i == 0 => name = Some(s),
                Attribute::Keyword(_, n) => match n {
                    Node::ELLIPSOID(e) => ellipsoid = Some(e),
                    Node::TOWGS84(v) => to_wgs84 = v,
                    _ => (),
                },
                _ => (),
            }
        }

        Ok(Datum {
            name: name.unwrap_or("unknown"),
            ellipsoid: ellipsoid.ok_or(Error::WktParseError(
                "Missing ellipsoid for DATUM".into(),
            ))?,
            to_wgs84,
        })
    }

    fn primem<'a>(
        &self,
        attrs: impl Iterator<Item = Attribute<'a, Node<'a>>>,
    ) -> Result<PrimeMeridian<'a>> {
        let mut name = None;
        let mut longitude = None;

        for (i, a) in attrs.enumerate() {
            match a {
                Attribute::Quoted(s) if i == 0 => name = Some(s),
                Attribute::Number(s) if i == 1 => longitude = Some(parse_number(s)?),
                _ => (),
            }
        }

        Ok(PrimeMeridian {
            name: name.ok_or(Error::WktParseError("Missing PRIMEM name".into()))?,
            longitude: longitude
                .ok_or(Error::WktParseError("Missing PRIMEM longitude".into()))?,
        })
    }

    fn axis<'a>(
        &self,
        attrs: impl Iterator<Item = Attribute<'a, Node<'a>>>,
    ) -> Result<AxisDir<'a>> {
        let mut name = None;
        let mut direction = None;

        for (i, a) in attrs.enumerate() {
            match a {
                Attribute::Quoted(s) if i == 0 => name = Some(s),
                Attribute::Ident(s) if direction.is_none() => direction = Some(s),
                _ => (),
            }
        }

        Ok(AxisDir {
            name: name.unwrap_or(""),
            direction: direction
                .ok_or(Error::WktParseError("Missing AXIS direction".into()))?,
        })
    }

    fn authority<'a>(
        &self,
        attrs: impl Iterator<Item = Attribute<'a, Node<'a>>>,
    ) -> Result<Authority<'a>> {
        let mut name = None;
        let mut code = None;

        for (i, a) in attrs.enumerate() {
            match a {
                Attribute::Quoted(s) if i == 0 => name = Some(s),
                Attribute::Number(s) | Attribute::Quoted(s) if i == 1 => code = Some(s),
                _ => (),
            }
        }

        Ok(Authority {
            name: name.ok_or(Error::WktParseError("Missing AUTHORITY name".into()))?,
            code: code.ok_or(Error::WktParseError("Missing AUTHORITY code".into()))?,
        })
    }

    fn unit<'a>(
        &self,
        key: &'a str,
        attrs: impl Iterator<Item = Attribute<'a, Node<'a>>>,
    ) -> Result<Unit<'a>> {
        let mut name = None;
        let mut factor = None;
        let mut authority = None;

        for (i, a) in attrs.enumerate() {
            match a {
                Attribute::Quoted(s) if i == 0 => name = Some(s),
                Attribute::Number(s) if i == 1 => factor = Some(parse_number(s)?),
                Attribute::Keyword(_, Node::AUTHORITY(auth)) => authority = Some(auth),
                _ => (),
            }
        }

        let name = name.ok_or(Error::WktParseError("Missing UNIT name".into()))?;

        Ok(Unit {
            name,
            factor: factor.ok_or(Error::WktParseError("Missing UNIT factor".into()))?,
            unit_type: match key {
                "ANGLEUNIT" => UnitType::Angular,
                "SCALEUNIT" | "SCALUNIT" => UnitType::Scale,
                "LENGTHUNIT" => UnitType::Linear,
                // WKT1 UNIT: guess from the name
                _ => {
                    let lower = name.to_ascii_lowercase();
                    if lower.contains("degree") || lower.contains("grad") || lower == "radian" {
                        UnitType::Angular
                    } else {
                        UnitType::Linear
                    }
                }
            },
            authority,
        })
    }

    fn compoundcrs<'a>(
        &self,
        attrs: impl Iterator<Item = Attribute<'a, Node<'a>>>,
    ) -> Result<Compoundcrs<'a>> {
        let mut name = None;
        let mut h_crs = None;

        for (i, a) in attrs.enumerate() {
            match a {
                Attribute::Quoted(s) if i == 0 => name = Some(s),
                Attribute::Keyword(_, n) => match n {
                    Node::PROJCS(cs) => h_crs = Some(Horizontalcrs::Projcs(cs)),
                    Node::GEOGCS(cs) => h_crs = Some(Horizontalcrs::Geogcs(cs)),
                    _ => (),
                },
                _ => (),
            }
        }

        Ok(Compoundcrs {
            name: name.ok_or(Error::WktParseError("Missing compound CRS name".into()))?,
            h_crs: h_crs.ok_or(Error::WktParseError(
                "Missing horizontal CRS in compound CRS".into(),
            ))?,
        })
    }

    fn verticalcrs<'a>(
        &self,
        attrs: impl Iterator<Item = Attribute<'a, Node<'a>>>,
    ) -> Result<Verticalcrs<'a>> {
        let mut name = None;

        for (i, a) in attrs.enumerate() {
            if let Attribute::Quoted(s) = a {
                if i == 0 {
                    name = Some(s);
                }
            }
        }

        Ok(Verticalcrs {
            name: name.unwrap_or(""),
        })
    }

    fn ellipsoid<'a>(
        &self,
        attrs: impl Iterator<Item = Attribute<'a, Node<'a>>>,
    ) -> Result<Ellipsoid<'a>> {
        let mut name = None;
        let mut semi_major = None;
        let mut rf = None;
        let mut unit = None;

        for (i, a) in attrs.enumerate() {
            match a {
                Attribute::Quoted(s) if i == 0 => name = Some(s),
                Attribute::Number(s) if i == 1 => semi_major = Some(s),
                Attribute::Number(s) if i == 2 => rf = Some(s),
                Attribute::Keyword(_, Node::UNIT(u)) => unit = Some(u),
                _ => (),
            }
        }

        Ok(Ellipsoid {
            name: name.ok_or(Error::WktParseError("Missing ELLIPSOID name".into()))?,
            a: semi_major.ok_or(Error::WktParseError(
                "Invalid ELLIPSOID semi-major axis".into(),
            ))?,
            rf: rf.ok_or(Error::WktParseError(
                "Invalid ELLIPSOID inverse flattening".into(),
            ))?,
            unit,
        })
    }

    fn towgs84<'a>(
        &self,
        attrs: impl Iterator<Item = Attribute<'a, Node<'a>>>,
    ) -> Result<Vec<&'a str>> {
        let mut to_wgs84 = vec![];

        for a in attrs {
            match a {
                Attribute::Number(s) => to_wgs84.push(s),
                _ => {
                    return Err(Error::WktParseError(format!("Expecting number not {a:?}")));
                }
            }
        }

        if !matches!(to_wgs84.len(), 0 | 3 | 7) {
            return Err(Error::WktParseError(
                "Wrong number of parameters for TOWGS84".into(),
            ));
        }

        Ok(to_wgs84)
    }

    fn boundcrs<'a>(
        &self,
        attrs: impl Iterator<Item = Attribute<'a, Node<'a>>>,
    ) -> Result<Boundcrs<'a>> {
        let mut source = None;
        let mut method = None;
        let mut parameters = vec![];

        for a in attrs {
            if let Attribute::Keyword(_, n) = a {
                match n {
                    Node::SOURCECRS(crs) => source = Some(crs),
                    Node::ABRIDGED(m, params) => {
                        method = m;
                        parameters = params;
                    }
                    _ => (),
                }
            }
        }

        Ok(Boundcrs {
            source: source.ok_or(Error::WktParseError(
                "Missing SOURCECRS in BOUNDCRS".into(),
            ))?,
            method,
            parameters,
        })
    }

    fn sourcecrs<'a>(
        &self,
        attrs: impl Iterator<Item = Attribute<'a, Node<'a>>>,
    ) -> Result<Horizontalcrs<'a>> {
        for a in attrs {
            if let Attribute::Keyword(_, n) = a {
                match n {
                    Node::PROJCS(cs) => return Ok(Horizontalcrs::Projcs(cs)),
                    Node::GEOGCS(cs) => return Ok(Horizontalcrs::Geogcs(cs)),
                    _ => (),
                }
            }
        }
        Err(Error::WktParseError("Empty SOURCECRS".into()))
    }

    fn abridged<'a>(
        &self,
        attrs: impl Iterator<Item = Attribute<'a, Node<'a>>>,
    ) -> Result<Node<'a>> {
        let mut method = None;
        let mut parameters = vec![];

        for a in attrs {
            if let Attribute::Keyword(_, n) = a {
                match n {
                    Node::METHOD(m) => method = Some(m.name),
                    Node::PARAMETER(p) => parameters.push(p),
                    _ => (),
                }
            }
        }

        Ok(Node::ABRIDGED(method, parameters))
    }
}

pub fn parse_number(s: &str) -> Result<f64> {
    s.parse::<f64>()
        .map_err(|err| Error::WktParseError(format!("Error parsing number: {err:?}")))
}
