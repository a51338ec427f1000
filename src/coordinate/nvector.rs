//! The n-vector: A position on the sphere, represented by its unit normal vector.
//! See [Gade, 2010](crate::Bibliography::Gad10).
use super::GeoPosition;
use crate::Error;
use std::ops::{Add, Index, Neg, Sub};

/// A 3D vector, in the earth centered frame with the x-axis toward
/// (0°N, 0°E), the y-axis toward (0°N, 90°E), and the z-axis toward the
/// North Pole. When representing a position, it has unit length.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct NVector(pub [f64; 3]);

// ----- C O N S T R U C T O R S ---------------------------------------------

impl NVector {
    /// A vector from its three components
    #[must_use]
    pub fn raw(x: f64, y: f64, z: f64) -> NVector {
        NVector([x, y, z])
    }

    /// The unit vector toward the North Pole
    #[must_use]
    pub fn north_pole() -> NVector {
        NVector([0., 0., 1.])
    }

    /// The normal vector of the great circle through `position`,
    /// heading out along `bearing` (degrees)
    #[must_use]
    pub fn great_circle(position: &GeoPosition, bearing: f64) -> NVector {
        let (sinphi, cosphi) = position.latitude().to_radians().sin_cos();
        let (sinlam, coslam) = position.longitude().to_radians().sin_cos();
        let (sinb, cosb) = bearing.to_radians().sin_cos();
        NVector([
            sinlam * cosb - sinphi * coslam * sinb,
            -coslam * cosb - sinphi * sinlam * sinb,
            cosphi * sinb,
        ])
    }
}

impl From<&GeoPosition> for NVector {
    fn from(position: &GeoPosition) -> NVector {
        let (sinphi, cosphi) = position.latitude().to_radians().sin_cos();
        let (sinlam, coslam) = position.longitude().to_radians().sin_cos();
        NVector([cosphi * coslam, cosphi * sinlam, sinphi])
    }
}

impl GeoPosition {
    /// The n-vector representation of `self`
    #[must_use]
    pub fn to_nvector(&self) -> NVector {
        NVector::from(self)
    }
}

// ----- A R I T H M E T I C -------------------------------------------------

impl NVector {
    /// Multiply by a scalar
    #[must_use]
    pub fn scale(&self, factor: f64) -> NVector {
        NVector([self[0] * factor, self[1] * factor, self[2] * factor])
    }

    /// Scalar product
    #[must_use]
    pub fn dot(&self, other: &NVector) -> f64 {
        self[0] * other[0] + self[1] * other[1] + self[2] * other[2]
    }

    /// Vector product
    #[must_use]
    pub fn cross(&self, other: &NVector) -> NVector {
        NVector([
            self[1] * other[2] - self[2] * other[1],
            self[2] * other[0] - self[0] * other[2],
            self[0] * other[1] - self[1] * other[0],
        ])
    }

    /// Euclidean length
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// The unit vector in the direction of `self`. The zero vector
    /// has no direction, and stays zero.
    #[must_use]
    pub fn normalize(&self) -> NVector {
        let norm = self.norm();
        if norm == 0. {
            return *self;
        }
        self.scale(1. / norm)
    }

    /// The angle, in radians, between `self` and `other`:
    /// atan2(|u×v|, u·v), which stays accurate near 0 and π.
    ///
    /// If a `reference` normal is given, the angle is signed: positive
    /// if `self`→`other` is clockwise looking along the reference,
    /// i.e. in [-π, π]. Otherwise it is in [0, π].
    #[must_use]
    pub fn angle_to(&self, other: &NVector, reference: Option<&NVector>) -> f64 {
        let cross = self.cross(other);
        let mut sin = cross.norm();
        if let Some(n) = reference {
            if cross.dot(n) < 0. {
                sin = -sin;
            }
        }
        sin.atan2(self.dot(other))
    }

    /// The position represented by `self`. Fails with [`Error::Domain`]
    /// for the zero vector, which represents no position at all.
    pub fn to_position(&self) -> Result<GeoPosition, Error> {
        let n = self.normalize();
        if n.norm() == 0. || !n.norm().is_finite() {
            return Err(Error::Domain("the zero vector is not a position".to_string()));
        }
        let lat = n[2].atan2(n[0].hypot(n[1]));
        let lon = n[1].atan2(n[0]);
        GeoPosition::new(lat.to_degrees(), lon.to_degrees())
    }

    /// The intersection of the great circles with normals `self` and `other`:
    /// normalize(n₁ × n₂), or its antipode, whichever is closer to `reference`.
    /// `None` if the two great circles coincide.
    #[must_use]
    pub fn great_circle_intersection(&self, other: &NVector, reference: &NVector) -> Option<NVector> {
        let candidate = self.cross(other);
        if candidate.norm() < 1e-15 {
            return None;
        }
        let candidate = candidate.normalize();
        if candidate.dot(reference) < 0. {
            return Some(-candidate);
        }
        Some(candidate)
    }
}

impl Index<usize> for NVector {
    type Output = f64;
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl Add for NVector {
    type Output = NVector;
    fn add(self, other: NVector) -> NVector {
        NVector([self[0] + other[0], self[1] + other[1], self[2] + other[2]])
    }
}

impl Sub for NVector {
    type Output = NVector;
    fn sub(self, other: NVector) -> NVector {
        NVector([self[0] - other[0], self[1] - other[1], self[2] - other[2]])
    }
}

impl Neg for NVector {
    type Output = NVector;
    fn neg(self) -> NVector {
        self.scale(-1.)
    }
}

// ----- T E S T S ---------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() -> Result<(), Error> {
        let v = NVector::raw(0.5, 0.5, 0.707);
        let p = v.to_position()?;
        assert!((p.latitude() - 44.99567351533113).abs() < 1e-12);
        assert!((p.longitude() - 45.).abs() < 1e-12);

        let p = GeoPosition::new(52.205, 0.119)?;
        let q = p.to_nvector().to_position()?;
        assert!((p.latitude() - q.latitude()).abs() < 1e-12);
        assert!((p.longitude() - q.longitude()).abs() < 1e-12);

        assert!(matches!(
            NVector::default().to_position(),
            Err(Error::Domain(_))
        ));
        Ok(())
    }

    #[test]
    fn great_circle() -> Result<(), Error> {
        let p = GeoPosition::new(53.3206, -1.7297)?;
        let gc = NVector::great_circle(&p, 96.0);
        assert!((gc[0] + 0.794_078_52).abs() < 1e-8);
        assert!((gc[1] - 0.128_555_80).abs() < 1e-8);
        assert!((gc[2] - 0.594_064_57).abs() < 1e-8);

        // The great circle normal is perpendicular to the position
        assert!(gc.dot(&p.to_nvector()).abs() < 1e-15);
        Ok(())
    }

    #[test]
    fn angles() -> Result<(), Error> {
        let u = GeoPosition::new(52.205, 0.119)?.to_nvector();
        let v = GeoPosition::new(48.857, 2.351)?.to_nvector();

        // Symmetric, and zero iff equal
        assert_eq!(u.angle_to(&v, None), v.angle_to(&u, None));
        assert_eq!(u.angle_to(&u, None), 0.);
        assert!(u.angle_to(&v, None) > 0.);

        // Signed when a reference normal is given
        let n = u.cross(&v);
        assert!(u.angle_to(&v, Some(&n)) > 0.);
        assert!(v.angle_to(&u, Some(&n)) < 0.);

        // Antipodes
        let w = -u;
        assert!((u.angle_to(&w, None) - std::f64::consts::PI).abs() < 1e-15);
        Ok(())
    }

    #[test]
    fn intersection_of_normals() -> Result<(), Error> {
        let equator = NVector::north_pole();
        let greenwich = NVector::great_circle(&GeoPosition::new(0., 0.)?, 0.);
        let reference = GeoPosition::new(10., 10.)?.to_nvector();
        let i = equator
            .great_circle_intersection(&greenwich, &reference)
            .ok_or(Error::Domain("no intersection".into()))?;
        let p = i.to_position()?;
        assert!(p.latitude().abs() < 1e-12);
        assert!(p.longitude().abs() < 1e-12);

        // And the antipode, when the reference is on the other side
        let reference = GeoPosition::new(-10., 170.)?.to_nvector();
        let i = equator
            .great_circle_intersection(&greenwich, &reference)
            .ok_or(Error::Domain("no intersection".into()))?;
        assert!((i.to_position()?.longitude() - 180.).abs() < 1e-12);

        // Coincident great circles do not intersect in a point
        assert!(equator
            .great_circle_intersection(&equator, &reference)
            .is_none());
        Ok(())
    }
}
