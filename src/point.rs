//!
//! Point type
//!
//! A small, trivially copyable coordinate value. For geographic CRSs
//! x/y are longitude and latitude in radians; for projected CRSs they
//! are easting and northing in the declared unit. The optional measure
//! `m` is carried through transformations untouched and is NaN when
//! absent.
//!
use crate::errors::Result;
use crate::transform::Transform;

#[derive(Debug, Clone, Copy)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub m: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: 0.,
            m: f64::NAN,
        }
    }

    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            m: f64::NAN,
        }
    }

    pub fn with_m(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self { x, y, z, m }
    }

    /// True when the point carries a measure
    pub fn has_m(&self) -> bool {
        !self.m.is_nan()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x
            && self.y == other.y
            && self.z == other.z
            // absent measures compare equal
            && (self.m == other.m || (self.m.is_nan() && other.m.is_nan()))
    }
}

impl Transform for Point {
    fn transform_coordinates<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(f64, f64, f64) -> Result<(f64, f64, f64)>,
    {
        f(self.x, self.y, self.z).map(|(x, y, z)| {
            self.x = x;
            self.y = y;
            self.z = z;
        })
    }
}

impl Transform for [Point] {
    fn transform_coordinates<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(f64, f64, f64) -> Result<(f64, f64, f64)>,
    {
        self.iter_mut().try_for_each(|pt| {
            (pt.x, pt.y, pt.z) = f(pt.x, pt.y, pt.z)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::Proj;
    use crate::transform::transform;

    #[test]
    fn point_measure_is_preserved() {
        let from = Proj::from_proj_string("+proj=latlong +ellps=GRS80").unwrap();
        let to = Proj::from_proj_string("+proj=etmerc +ellps=GRS80").unwrap();

        let mut pt = Point::with_m(2f64.to_radians(), 1f64.to_radians(), 0., 42.);
        transform(&from, &to, &mut pt).unwrap();
        assert_eq!(pt.m, 42.);

        let mut pt = Point::new(2f64.to_radians(), 1f64.to_radians());
        transform(&from, &to, &mut pt).unwrap();
        assert!(!pt.has_m());
    }

    #[test]
    fn point_nan_measure_equality() {
        assert_eq!(Point::new(1., 2.), Point::new(1., 2.));
        assert_ne!(Point::new(1., 2.), Point::with_m(1., 2., 0., 0.));
    }
}
