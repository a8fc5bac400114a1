//!
//! Reusable transformer
//!
use crate::errors::Result;
use crate::proj::Proj;
use crate::transform::{transform, Direction, Transform};

/// A source/destination projection pair
///
/// Holds the initialized projections and their derived constants so
/// repeated transforms pay the setup cost only once. Immutable after
/// construction and safe to share between threads: `forward` and
/// `inverse` may be called concurrently.
#[derive(Debug, Clone)]
pub struct Transformer {
    src: Proj,
    dst: Proj,
}

impl Transformer {
    /// Build a transformer from two CRS user strings
    ///
    /// Inputs accept anything [`Proj::from_user_string`] accepts:
    /// proj strings, WKT, PROJJSON or registered authority codes.
    pub fn new(src: &str, dst: &str) -> Result<Self> {
        Ok(Self {
            src: Proj::from_user_string(src)?,
            dst: Proj::from_user_string(dst)?,
        })
    }

    /// Build a transformer from already initialized projections
    pub fn from_projs(src: Proj, dst: Proj) -> Self {
        Self { src, dst }
    }

    #[inline]
    pub fn source(&self) -> &Proj {
        &self.src
    }

    #[inline]
    pub fn destination(&self) -> &Proj {
        &self.dst
    }

    /// Transform points from the source CRS to the destination CRS
    pub fn forward<P>(&self, points: &mut P) -> Result<()>
    where
        P: Transform + ?Sized,
    {
        transform(&self.src, &self.dst, points)
    }

    /// Transform points from the destination CRS back to the source CRS
    pub fn inverse<P>(&self, points: &mut P) -> Result<()>
    where
        P: Transform + ?Sized,
    {
        transform(&self.dst, &self.src, points)
    }

    /// Transform in an explicit direction
    pub fn apply<P>(&self, dir: Direction, points: &mut P) -> Result<()>
    where
        P: Transform + ?Sized,
    {
        match dir {
            Direction::Forward => self.forward(points),
            Direction::Inverse => self.inverse(points),
        }
    }
}
