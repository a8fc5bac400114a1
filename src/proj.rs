//!
//! Projection installation
//!
use crate::datum_params::DatumParams;
use crate::datum_transform::Datum;
use crate::datums::{self, DatumDefn};
use crate::defn::Defn;
use crate::ellps::Ellipsoid;
use crate::errors::{Error, Result};
use crate::parameters::ParamList;
use crate::projections::{self, ProjDelegate};
use crate::{prime_meridians, projjson, projstring, registry, units, wkt};

pub type Axis = [u8; 3];

const NORMALIZED_AXIS: Axis = [b'e', b'n', b'u'];

/// Projection data mutable by the projection
/// initialization functions
#[derive(Debug, Clone)]
pub struct ProjData {
    pub(crate) ellps: Ellipsoid,
    pub(crate) lam0: f64,
    pub(crate) phi0: f64,
    pub(crate) x0: f64,
    pub(crate) y0: f64,
    pub k0: f64,
    pub(crate) to_meter: f64,
    pub(crate) vto_meter: f64,
    pub(crate) is_latlong: bool,
    pub(crate) is_geocent: bool,
}

/// An initialized projection: the canonical parsed form of a CRS
/// definition together with the precomputed projection constants.
///
/// Immutable once constructed; a `Proj` may be shared freely between
/// threads.
#[derive(Debug, Clone)]
pub struct Proj {
    projname: &'static str,
    data: ProjData,
    datum: Datum,
    axis: Axis,
    pub(crate) from_greenwich: f64,
    pub(crate) geoc: bool,
    pub(crate) over: bool,
    projection: ProjDelegate,
    defn: Defn,
}

impl Proj {
    // ----------------
    // Datum definition
    // ----------------
    fn datum_defn<'a>(params: &'a ParamList) -> Result<Option<&'a DatumDefn>> {
        // Do we have a "datum" parameter ?
        params
            .get("datum")
            .map(|p| match datums::find_datum(p.try_into()?) {
                Some(v) => Ok(Some(v)),
                None => Err(Error::InvalidDatum),
            })
            .unwrap_or(Ok(None))
    }

    // -----------------
    // Datum parameters
    // ----------------
    fn datum_params(params: &ParamList, defn: Option<&DatumDefn>) -> Result<DatumParams> {
        // Precedence order is 'nadgrids', 'towgs84', 'datum'
        if let Some(p) = params.get("nadgrids") {
            DatumParams::from_nadgrid_str(p.try_into()?)
        } else if let Some(p) = params.get("towgs84") {
            DatumParams::from_towgs84_str(p.try_into()?)
        } else if let Some(p) = defn {
            DatumParams::try_from(&p.params)
        } else {
            Ok(DatumParams::default())
        }
    }

    // --------------
    // Prime meridian
    // --------------
    fn prime_meridian(params: &ParamList) -> Result<f64> {
        if let Some(p) = params.get("pm") {
            // named prime meridian or numeric degrees east
            match prime_meridians::find_prime_meridian(p.try_into()?) {
                Some(v) => Ok(v.to_radians()),
                None => p.try_angular_value(),
            }
        } else if let Some(p) = params.get("from_greenwich") {
            p.try_angular_value()
        } else {
            Ok(0.)
        }
    }

    // -----------------
    // Axis
    // ----------------
    fn parse_axis(params: &ParamList) -> Result<Axis> {
        if let Some(p) = params.get("axis") {
            let axis_arg: &str = p.try_into()?;
            if axis_arg.len() != 3 {
                Err(Error::InvalidAxis)
            } else {
                let mut axis = [0u8, 0u8, 0u8];
                // Ensure that no token is repeated: each of the
                // `find` must hit a distinct position.
                let ew = axis_arg.find(['e', 'w']).ok_or(Error::InvalidAxis)?;
                let ns = axis_arg.find(['n', 's']).ok_or(Error::InvalidAxis)?;
                let ud = axis_arg.find(['u', 'd']).ok_or(Error::InvalidAxis)?;
                axis[ew] = axis_arg.as_bytes()[ew];
                axis[ns] = axis_arg.as_bytes()[ns];
                axis[ud] = axis_arg.as_bytes()[ud];
                Ok(axis)
            }
        } else {
            Ok(NORMALIZED_AXIS)
        }
    }

    /// Return true if the axes are normalized
    pub fn normalized_axis(&self) -> bool {
        self.axis == NORMALIZED_AXIS
    }

    // -----------------
    // Units
    // ----------------
    fn units(params: &ParamList) -> Result<f64> {
        let from_units = params
            .get("units")
            .map(|p| {
                let name: &str = p.try_into()?;
                if name.eq_ignore_ascii_case(units::DEGREES) {
                    // angular unit of a geographic CRS
                    Ok(None)
                } else {
                    units::find_units(name)
                        .map(|u| Some(u.to_meter))
                        .ok_or(Error::InvalidParameterValue("Unknown unit"))
                }
            })
            .transpose()?
            .flatten();

        // An explicit to_meter always wins
        match params.try_value::<f64>("to_meter")? {
            Some(to_meter) => Ok(to_meter),
            None => Ok(from_units.unwrap_or(1.)),
        }
    }

    /// Consume a ParamList and create a Projection object
    pub fn init(params: ParamList) -> Result<Self> {
        // Projection name
        let projname: &str = params
            .get("proj")
            .ok_or(Error::MissingProjectionError)?
            .try_into()?;

        let proj_init =
            projections::find_projection(projname).ok_or(Error::ProjectionNotFound)?;

        // Normalised definition, retained for serialization and
        // identity checks
        let defn = Defn::from_params(&params)?;

        // Get datum definition (if any)
        let datum_defn = Self::datum_defn(&params)?;

        // Get datum parameters
        let datum_params = Self::datum_params(&params, datum_defn)?;

        // Do we have an ellipse ?
        let ellps = Ellipsoid::from_params(&params, datum_defn)?;

        // Datum, bound to the resolved ellipsoid before any
        // projection level spherification
        let datum = Datum::new(&ellps, datum_params);

        // Get prime meridian
        let from_greenwich = Self::prime_meridian(&params)?;

        // Axis
        let axis = Self::parse_axis(&params)?;

        // Units
        let to_meter = Self::units(&params)?;
        let vto_meter = params.try_value::<f64>("vto_meter")?.unwrap_or(to_meter);

        let mut data = ProjData {
            ellps,
            lam0: params
                .try_angular_value("lon_0")?
                .or(params.try_angular_value("long_0")?)
                .unwrap_or(0.),
            phi0: params.try_angular_value("lat_0")?.unwrap_or(0.),
            x0: params.try_value::<f64>("x_0")?.unwrap_or(0.),
            y0: params.try_value::<f64>("y_0")?.unwrap_or(0.),
            k0: match params
                .try_value::<f64>("k_0")?
                .or(params.try_value::<f64>("k")?)
            {
                Some(k0) if k0 <= 0. => {
                    return Err(Error::InvalidParameterValue("k_0 must be positive"))
                }
                Some(k0) => k0,
                None => 1.,
            },
            to_meter,
            vto_meter,
            is_latlong: false,
            is_geocent: false,
        };

        // Initialize the projection, this may adjust
        // lam0/phi0/x0/y0/k0 (utm, ups, ...)
        let projection = proj_init.init(&mut data, &params)?;

        Ok(Self {
            projname: proj_init.name(),
            data,
            datum,
            axis,
            from_greenwich,
            geoc: params.check_option("geoc")?,
            over: params.check_option("over")?,
            projection,
            defn,
        })
    }

    /// Create a projection from a proj string
    pub fn from_proj_string(s: &str) -> Result<Self> {
        Self::init(projstring::parse(s)?)
    }

    /// Create a projection from a WKT string (WKT1 or WKT2)
    pub fn from_wkt(s: &str) -> Result<Self> {
        Self::from_proj_string(&wkt::wkt_to_projstring(s)?)
    }

    /// Create a projection from a PROJJSON document
    pub fn from_projjson(s: &str) -> Result<Self> {
        Self::from_proj_string(&projjson::projjson_to_projstring(s)?)
    }

    /// Create a projection from a user string
    ///
    /// Accepts a proj string (leading `+`), a PROJJSON document
    /// (leading `{`), a WKT string (contains `[`) or an authority code
    /// looked up in the registry (`EPSG:3857`).
    pub fn from_user_string(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with('+') {
            Self::from_proj_string(s)
        } else if s.starts_with('{') {
            Self::from_projjson(s)
        } else if s.contains('[') {
            Self::from_wkt(s)
        } else {
            registry::get(s)
                .map(|p| (*p).clone())
                .ok_or_else(|| Error::CrsNotFound(s.into()))
        }
    }

    /// Create a projection from a bare EPSG code using the
    /// embedded proj4 definitions
    #[cfg(feature = "crs-definitions")]
    pub fn from_epsg_code(code: u16) -> Result<Self> {
        crs_definitions::from_code(code)
            .ok_or_else(|| Error::CrsNotFound(format!("EPSG:{code}")))
            .and_then(|defn| Self::from_proj_string(defn.proj4))
    }

    // Accessors

    #[inline]
    pub fn projname(&self) -> &'static str {
        self.projname
    }

    #[inline]
    pub fn data(&self) -> &ProjData {
        &self.data
    }

    #[inline]
    pub fn defn(&self) -> &Defn {
        &self.defn
    }

    #[inline]
    pub(crate) fn projection(&self) -> &ProjDelegate {
        &self.projection
    }

    #[inline]
    pub(crate) fn datum(&self) -> &Datum {
        &self.datum
    }

    #[inline]
    pub fn ellps(&self) -> &Ellipsoid {
        &self.data.ellps
    }

    #[inline]
    pub(crate) fn axis(&self) -> &Axis {
        &self.axis
    }

    #[inline]
    pub fn is_latlong(&self) -> bool {
        self.data.is_latlong
    }

    #[inline]
    pub fn is_geocent(&self) -> bool {
        self.data.is_geocent
    }

    #[inline]
    pub(crate) fn lam0(&self) -> f64 {
        self.data.lam0
    }

    #[inline]
    pub(crate) fn x0(&self) -> f64 {
        self.data.x0
    }

    #[inline]
    pub(crate) fn y0(&self) -> f64 {
        self.data.y0
    }

    #[inline]
    pub(crate) fn to_meter(&self) -> f64 {
        self.data.to_meter
    }

    #[inline]
    pub(crate) fn vto_meter(&self) -> f64 {
        self.data.vto_meter
    }

    #[inline]
    pub fn has_inverse(&self) -> bool {
        self.projection.has_inverse()
    }

    #[inline]
    pub fn has_forward(&self) -> bool {
        self.projection.has_forward()
    }

    /// True when both projections were built from the very same
    /// normalised definition
    pub fn same_definition(&self, other: &Self) -> bool {
        self.defn == other.defn
    }
}
