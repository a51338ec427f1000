//! Geodesy on the sphere, using n-vectors ([Gade, 2010](crate::Bibliography::Gad10)).
//!
//! All computations are carried out on unit vectors in 3-space, so there are
//! no singularities at the poles, and no loss of precision for very short
//! or nearly antipodal distances.
use super::GeodesicModel;
use crate::math::angular;
use crate::{Error, GeoPosition, NVector};
use std::f64::consts::FRAC_PI_2;
use std::f64::consts::PI;

/// The mean radius of the earth, (2a + b)/3, for the GRS80 ellipsoid
pub const MEAN_EARTH_RADIUS: f64 = 6_371_008.771_415;

/// A great circle path, given either as a starting point and the bearing
/// (degrees) to set out along, or as the start and end points of a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Path {
    Bearing(GeoPosition, f64),
    Segment(GeoPosition, GeoPosition),
}

impl Path {
    fn start(&self) -> NVector {
        match self {
            Path::Bearing(start, _) => start.to_nvector(),
            Path::Segment(start, _) => start.to_nvector(),
        }
    }

    /// The normal vector of the great circle along the path
    fn normal(&self) -> NVector {
        match self {
            Path::Bearing(start, bearing) => NVector::great_circle(start, *bearing),
            Path::Segment(start, end) => start.to_nvector().cross(&end.to_nvector()),
        }
    }
}

/// The spherical earth model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    radius: f64,
}

impl Default for Spherical {
    fn default() -> Spherical {
        Spherical {
            radius: MEAN_EARTH_RADIUS,
        }
    }
}

impl Spherical {
    /// A sphere of the given radius, in meters
    pub fn new(radius: f64) -> Result<Spherical, Error> {
        if !(radius.is_finite() && radius > 0.) {
            log::error!("Spherical: radius must be positive, got {radius}");
            return Err(Error::BadParam("radius".to_string(), radius.to_string()));
        }
        Ok(Spherical { radius })
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The angular distance between `from` and `to`, in radians
    #[must_use]
    pub fn angular_distance(&self, from: &GeoPosition, to: &GeoPosition) -> f64 {
        from.to_nvector().angle_to(&to.to_nvector(), None)
    }

    /// The point halfway along the great circle path between `from` and `to`.
    /// Undefined, hence [`Error::Domain`], for antipodal points.
    pub fn midpoint(&self, from: &GeoPosition, to: &GeoPosition) -> Result<GeoPosition, Error> {
        let m = from.to_nvector() + to.to_nvector();
        if m.norm() < 1e-15 {
            return Err(Error::Domain(
                "no midpoint between antipodal points".to_string(),
            ));
        }
        m.to_position()
    }

    /// The point at the given `fraction` along the great circle path between
    /// `from` (fraction 0) and `to` (fraction 1).
    pub fn intermediate_point(
        &self,
        from: &GeoPosition,
        to: &GeoPosition,
        fraction: f64,
    ) -> Result<GeoPosition, Error> {
        let n1 = from.to_nvector();
        let n2 = to.to_nvector();
        let normal = n1.cross(&n2);
        if normal.norm() < 1e-15 && n1.dot(&n2) < 0. {
            return Err(Error::Domain(
                "no unique path between antipodal points".to_string(),
            ));
        }

        let delta = n1.angle_to(&n2, None) * fraction;
        // Direction vector, perpendicular to n1, in the plane of n2
        let d = normal.normalize().cross(&n1);
        let (sind, cosd) = delta.sin_cos();
        (n1.scale(cosd) + d.scale(sind)).to_position()
    }

    /// The signed distance from `position` to the great circle through
    /// `start` and `end`. Negative to the left of the path, positive to the
    /// right.
    pub fn cross_track_distance(
        &self,
        position: &GeoPosition,
        start: &GeoPosition,
        end: &GeoPosition,
    ) -> Result<f64, Error> {
        let gc = self.segment_normal(start, end)?;
        let alpha = gc.angle_to(&position.to_nvector(), None) - FRAC_PI_2;
        Ok(alpha * self.radius)
    }

    /// The distance from `start` to the point on the great circle through
    /// `start` and `end` closest to `position`. Negative if that point is
    /// behind `start`.
    pub fn along_track_distance(
        &self,
        position: &GeoPosition,
        start: &GeoPosition,
        end: &GeoPosition,
    ) -> Result<f64, Error> {
        let gc = self.segment_normal(start, end)?;
        let p = position.to_nvector();
        let foot = gc.cross(&p).cross(&gc);
        Ok(start.to_nvector().angle_to(&foot, Some(&gc)) * self.radius)
    }

    fn segment_normal(&self, start: &GeoPosition, end: &GeoPosition) -> Result<NVector, Error> {
        let gc = start.to_nvector().cross(&end.to_nvector());
        if gc.norm() < 1e-15 {
            return Err(Error::Domain(
                "coincident or antipodal points do not define a great circle".to_string(),
            ));
        }
        Ok(gc)
    }

    /// Is the projection of `position` onto the great circle through `start`
    /// and `end` between those two points? For coincident end points, only
    /// that point itself is within extent.
    #[must_use]
    pub fn is_within_extent(&self, position: &GeoPosition, start: &GeoPosition, end: &GeoPosition) -> bool {
        if start == end {
            return position == start;
        }
        let n0 = position.to_nvector();
        let n1 = start.to_nvector();
        let n2 = end.to_nvector();

        // Vectors from the end points toward each other, and toward the position
        let extent1 = (n0 - n1).dot(&(n2 - n1));
        let extent2 = (n0 - n2).dot(&(n1 - n2));
        let same_hemisphere = n0.dot(&n1) >= 0. && n0.dot(&n2) >= 0.;
        extent1 >= 0. && extent2 >= 0. && same_hemisphere
    }

    /// The point on the segment from `start` to `end` closest to `position`:
    /// either the foot of the perpendicular from `position`, or the nearer
    /// end point.
    pub fn nearest_point_on_segment(
        &self,
        position: &GeoPosition,
        start: &GeoPosition,
        end: &GeoPosition,
    ) -> Result<GeoPosition, Error> {
        if self.is_within_extent(position, start, end) && start != end {
            let n0 = position.to_nvector();
            let c1 = start.to_nvector().cross(&end.to_nvector());
            let c2 = n0.cross(&c1);
            return c1.cross(&c2).to_position();
        }
        let d1 = self.angular_distance(position, start);
        let d2 = self.angular_distance(position, end);
        Ok(if d1 < d2 { *start } else { *end })
    }

    /// Is `position` inside the polygon given by `vertices`? The polygon may
    /// be given open or closed (first vertex repeated at the end), and may
    /// be convex or concave, but not self intersecting.
    #[must_use]
    pub fn is_enclosed_by(&self, position: &GeoPosition, vertices: &[GeoPosition]) -> bool {
        let mut vertices = vertices;
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices = &vertices[..vertices.len() - 1];
        }
        if vertices.len() < 3 {
            return false;
        }

        // Sum the signed angles subtended at the position by each edge
        let p = position.to_nvector();
        let rays: Vec<NVector> = vertices.iter().map(|v| p - v.to_nvector()).collect();
        let mut sum = 0.;
        for (i, ray) in rays.iter().enumerate() {
            let next = &rays[(i + 1) % rays.len()];
            sum += ray.angle_to(next, Some(&p));
        }
        sum.abs() > PI
    }

    /// The intersection of two great circle paths, or `None` if the great
    /// circles coincide.
    ///
    /// Two great circles always meet in a pair of antipodal points. For a
    /// path given by bearing, the point ahead is selected. For two segments,
    /// the point nearest to the segments is selected.
    pub fn intersection(&self, path1: &Path, path2: &Path) -> Result<Option<GeoPosition>, Error> {
        let (p1, p2) = (path1.start(), path2.start());
        let (c1, c2) = (path1.normal(), path2.normal());

        let i1 = c1.cross(&c2);
        if i1.norm() < 1e-15 {
            return Ok(None);
        }
        let i2 = -i1;

        // Is the candidate i1 ahead (+1) or behind (-1) the start of each path?
        let dir1 = sign(c1.cross(&p1).dot(&i1));
        let dir2 = sign(c2.cross(&p2).dot(&i1));

        let intersection = match (path1, path2) {
            (Path::Bearing(..), Path::Bearing(..)) => match dir1 + dir2 {
                2 => i1,
                -2 => i2,
                // Both behind or both ahead: pick the one closer to the starting points
                0 if (p1 + p2).dot(&i1) > 0. => i2,
                0 => i1,
                s if s > 0 => i1,
                _ => i2,
            },
            (Path::Bearing(..), Path::Segment(..)) => {
                if dir1 > 0 {
                    i1
                } else {
                    i2
                }
            }
            (Path::Segment(..), Path::Bearing(..)) => {
                if dir2 > 0 {
                    i1
                } else {
                    i2
                }
            }
            (Path::Segment(s1, e1), Path::Segment(s2, e2)) => {
                let reference = s1.to_nvector() + e1.to_nvector() + s2.to_nvector() + e2.to_nvector();
                match c1.great_circle_intersection(&c2, &reference) {
                    Some(i) => i,
                    None => return Ok(None),
                }
            }
        };
        Ok(Some(intersection.to_position()?))
    }
}

fn sign(x: f64) -> i32 {
    if x > 0. {
        1
    } else if x < 0. {
        -1
    } else {
        0
    }
}

impl GeodesicModel for Spherical {
    fn distance(&self, from: &GeoPosition, to: &GeoPosition) -> Result<f64, Error> {
        Ok(self.angular_distance(from, to) * self.radius)
    }

    fn initial_bearing(&self, from: &GeoPosition, to: &GeoPosition) -> Result<f64, Error> {
        let p1 = from.to_nvector();
        let p2 = to.to_nvector();

        // Great circle through the two points, and through p1 and the north pole
        let c1 = p1.cross(&p2);
        let c2 = p1.cross(&NVector::north_pole());
        let bearing = c1.angle_to(&c2, Some(&p1)).to_degrees();
        Ok(angular::normalize_bearing(bearing))
    }

    fn final_bearing(&self, from: &GeoPosition, to: &GeoPosition) -> Result<f64, Error> {
        let reverse = self.initial_bearing(to, from)?;
        Ok(angular::normalize_bearing(reverse + 180.))
    }

    fn destination(
        &self,
        origin: &GeoPosition,
        bearing: f64,
        distance: f64,
    ) -> Result<GeoPosition, Error> {
        if !bearing.is_finite() || !distance.is_finite() {
            return Err(Error::Domain(format!(
                "non-finite bearing ({bearing}) or distance ({distance})"
            )));
        }
        let n1 = origin.to_nvector();
        let delta = distance / self.radius;

        // East and north unit vectors at the origin, well defined at the poles
        let (sinlam, coslam) = origin.longitude().to_radians().sin_cos();
        let de = NVector::raw(-sinlam, coslam, 0.);
        let dn = n1.cross(&de);

        let (sinb, cosb) = bearing.to_radians().sin_cos();
        let direction = dn.scale(cosb) + de.scale(sinb);

        let (sind, cosd) = delta.sin_cos();
        Ok((n1.scale(cosd) + direction.scale(sind))
            .to_position()?
            .with_height(origin.height()))
    }
}

// ----- T E S T S ---------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    fn cambridge() -> Result<GeoPosition, Error> {
        GeoPosition::new(52.205, 0.119)
    }

    fn paris() -> Result<GeoPosition, Error> {
        GeoPosition::new(48.857, 2.351)
    }

    #[test]
    fn distance_and_bearings() -> Result<(), Error> {
        let sphere = Spherical::default();
        let (a, b) = (cambridge()?, paris()?);

        assert_float_eq!(sphere.distance(&a, &b)?, 404_279.720_588_95, abs <= 1e-6);
        assert_eq!(sphere.distance(&a, &b)?, sphere.distance(&b, &a)?);
        assert_eq!(sphere.distance(&a, &a)?, 0.);

        assert_float_eq!(sphere.initial_bearing(&a, &b)?, 156.166_582_58, abs <= 1e-8);
        assert_float_eq!(sphere.final_bearing(&a, &b)?, 157.890_440_19, abs <= 1e-8);

        // Due north, due south
        let equator = GeoPosition::new(0., 10.)?;
        let north = GeoPosition::new(10., 10.)?;
        assert_float_eq!(sphere.initial_bearing(&equator, &north)?, 0., abs <= 1e-12);
        assert_float_eq!(sphere.initial_bearing(&north, &equator)?, 180., abs <= 1e-12);

        let unit = Spherical::new(1.)?;
        assert_float_eq!(unit.distance(&equator, &north)?, 10_f64.to_radians(), abs <= 1e-15);
        assert!(matches!(Spherical::new(-1.), Err(Error::BadParam(_, _))));
        Ok(())
    }

    #[test]
    fn destination() -> Result<(), Error> {
        let sphere = Spherical::default();
        let greenwich = GeoPosition::new(51.4778, -0.0015)?;
        let p = sphere.destination(&greenwich, 300.7, 7794.)?;
        assert_float_eq!(p.latitude(), 51.513_545_64, abs <= 1e-8);
        assert_float_eq!(p.longitude(), -0.098_345_25, abs <= 1e-8);

        // Setting out from the pole
        let pole = GeoPosition::new(90., 0.)?;
        let p = sphere.destination(&pole, 180., 1_000_000.)?;
        assert_float_eq!(p.latitude(), 81.006_796_32, abs <= 1e-8);
        assert!(p.longitude().abs() < 1e-10);

        // And back again
        let (a, b) = (cambridge()?, paris()?);
        let p = sphere.destination(&a, sphere.initial_bearing(&a, &b)?, sphere.distance(&a, &b)?)?;
        assert_float_eq!(p.latitude(), b.latitude(), abs <= 1e-10);
        assert_float_eq!(p.longitude(), b.longitude(), abs <= 1e-10);

        assert!(matches!(
            sphere.destination(&a, f64::INFINITY, 1.),
            Err(Error::Domain(_))
        ));
        Ok(())
    }

    #[test]
    fn midpoint_and_intermediate() -> Result<(), Error> {
        let sphere = Spherical::default();
        let (a, b) = (cambridge()?, paris()?);

        let m = sphere.midpoint(&a, &b)?;
        assert_float_eq!(m.latitude(), 50.536_326_88, abs <= 1e-8);
        assert_float_eq!(m.longitude(), 1.274_614_10, abs <= 1e-8);

        let p = sphere.intermediate_point(&a, &b, 0.25)?;
        assert_float_eq!(p.latitude(), 51.372_083_86, abs <= 1e-8);
        assert_float_eq!(p.longitude(), 0.707_337_10, abs <= 1e-8);

        // The end points
        let p = sphere.intermediate_point(&a, &b, 0.)?;
        assert_float_eq!(p.latitude(), a.latitude(), abs <= 1e-12);
        let p = sphere.intermediate_point(&a, &b, 1.)?;
        assert_float_eq!(p.longitude(), b.longitude(), abs <= 1e-12);

        // Antipodes
        let anti = GeoPosition::new(-52.205, -179.881)?;
        assert!(matches!(sphere.midpoint(&a, &anti), Err(Error::Domain(_))));
        assert!(matches!(
            sphere.intermediate_point(&a, &anti, 0.5),
            Err(Error::Domain(_))
        ));
        Ok(())
    }

    #[test]
    fn cross_and_along_track() -> Result<(), Error> {
        let sphere = Spherical::default();
        let p = GeoPosition::new(53.2611, -0.7972)?;
        let start = GeoPosition::new(53.3206, -1.7297)?;
        let end = GeoPosition::new(53.1887, 0.1334)?;

        let xt = sphere.cross_track_distance(&p, &start, &end)?;
        assert_float_eq!(xt, -307.549_993_8, abs <= 1e-6);
        let at = sphere.along_track_distance(&p, &start, &end)?;
        assert_float_eq!(at, 62_331.579_1, abs <= 1e-3);

        // Swapping the ends moves the point to the other side
        let xt = sphere.cross_track_distance(&p, &end, &start)?;
        assert_float_eq!(xt, 307.549_993_8, abs <= 1e-6);

        assert!(matches!(
            sphere.cross_track_distance(&p, &start, &start),
            Err(Error::Domain(_))
        ));
        Ok(())
    }

    #[test]
    fn nearest_point() -> Result<(), Error> {
        let sphere = Spherical::default();
        let start = GeoPosition::new(51.0, 1.0)?;
        let end = GeoPosition::new(51.0, 2.0)?;

        let p = GeoPosition::new(51.0, 1.9)?;
        assert!(sphere.is_within_extent(&p, &start, &end));
        let n = sphere.nearest_point_on_segment(&p, &start, &end)?;
        assert_float_eq!(n.latitude(), 51.000_384_113_805_64, abs <= 1e-10);
        assert_float_eq!(n.longitude(), 1.900_003_311_624_411, abs <= 1e-10);

        // Beyond the end of the segment
        let p = GeoPosition::new(51.0, 2.1)?;
        assert!(!sphere.is_within_extent(&p, &start, &end));
        assert_eq!(sphere.nearest_point_on_segment(&p, &start, &end)?, end);
        let p = GeoPosition::new(52.0, 0.5)?;
        assert_eq!(sphere.nearest_point_on_segment(&p, &start, &end)?, start);
        Ok(())
    }

    #[test]
    fn enclosure() -> Result<(), Error> {
        let sphere = Spherical::default();
        let square = [
            GeoPosition::new(45., 1.)?,
            GeoPosition::new(45., 2.)?,
            GeoPosition::new(46., 2.)?,
            GeoPosition::new(46., 1.)?,
        ];
        let inside = GeoPosition::new(45.1, 1.1)?;
        let outside = GeoPosition::new(44.9, 1.1)?;
        assert!(sphere.is_enclosed_by(&inside, &square));
        assert!(!sphere.is_enclosed_by(&outside, &square));

        // Closed polygons work the same
        let mut closed = square.to_vec();
        closed.push(square[0]);
        assert!(sphere.is_enclosed_by(&inside, &closed));
        assert!(!sphere.is_enclosed_by(&outside, &closed));

        // Degenerate
        assert!(!sphere.is_enclosed_by(&inside, &square[..2]));
        Ok(())
    }

    #[test]
    fn intersections() -> Result<(), Error> {
        let sphere = Spherical::default();

        let path1 = Path::Bearing(GeoPosition::new(51.8853, 0.2545)?, 108.55);
        let path2 = Path::Bearing(GeoPosition::new(49.0034, 2.5735)?, 32.44);
        let i = sphere.intersection(&path1, &path2)?.ok_or(Error::Domain("none".into()))?;
        assert_float_eq!(i.latitude(), 50.907_607_500, abs <= 1e-8);
        assert_float_eq!(i.longitude(), 4.508_574_646, abs <= 1e-8);

        // Reno to Baker
        let reo = Path::Bearing(GeoPosition::new(42.600, -117.866)?, 51.);
        let bke = Path::Bearing(GeoPosition::new(44.840, -117.806)?, 137.);
        let i = sphere.intersection(&reo, &bke)?.ok_or(Error::Domain("none".into()))?;
        assert_float_eq!(i.latitude(), 43.571_900_384, abs <= 1e-8);
        assert_float_eq!(i.longitude(), -116.188_757_484, abs <= 1e-8);

        // Two segments crossing the equator and the 0.5° meridian
        let equator = Path::Segment(GeoPosition::new(0., -1.)?, GeoPosition::new(0., 1.)?);
        let meridian = Path::Segment(GeoPosition::new(-1., 0.5)?, GeoPosition::new(1., 0.5)?);
        let i = sphere.intersection(&equator, &meridian)?.ok_or(Error::Domain("none".into()))?;
        assert!(i.latitude().abs() < 1e-12);
        assert_float_eq!(i.longitude(), 0.5, abs <= 1e-12);

        // A bearing toward a segment, from either side of the call
        let southward = Path::Bearing(GeoPosition::new(1., 0.)?, 180.);
        let i = sphere.intersection(&southward, &equator)?.ok_or(Error::Domain("none".into()))?;
        assert!(i.latitude().abs() < 1e-12);
        assert!(i.longitude().abs() < 1e-12);
        let i = sphere.intersection(&equator, &southward)?.ok_or(Error::Domain("none".into()))?;
        assert!(i.latitude().abs() < 1e-12);
        assert!(i.longitude().abs() < 1e-12);

        // Coincident great circles
        let eastward = Path::Bearing(GeoPosition::new(0., 20.)?, 90.);
        assert_eq!(sphere.intersection(&equator, &eastward)?, None);
        Ok(())
    }
}
