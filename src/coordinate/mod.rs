//! Geographic positions, and their n-vector representation
pub mod nvector;

use crate::math::angular;
use crate::Error;
use crate::GeodesicModel;

/// A geographic position: latitude and longitude in degrees, and a height
/// in meters above the ellipsoid (0 unless given).
///
/// The latitude is always in [-90, 90], and the longitude always normalized
/// to (-180, 180]. Every transformation returns a new instance.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct GeoPosition {
    latitude: f64,
    longitude: f64,
    height: f64,
}

// ----- C O N S T R U C T O R S ---------------------------------------------

impl GeoPosition {
    /// A `GeoPosition` from latitude/longitude in degrees. Fails with
    /// [`Error::Domain`] for non-finite input or latitudes outside [-90, 90].
    pub fn new(latitude: f64, longitude: f64) -> Result<GeoPosition, Error> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(Error::Domain(format!(
                "non-finite position ({latitude}, {longitude})"
            )));
        }
        if latitude.abs() > 90. {
            return Err(Error::Domain(format!(
                "latitude {latitude} outside [-90, 90]"
            )));
        }
        Ok(GeoPosition {
            latitude,
            longitude: angular::normalize_longitude(longitude),
            height: 0.,
        })
    }

    /// A `GeoPosition` from latitude, degrees, minutes, seconds and longitude,
    /// degrees, minutes, seconds. South and west are given by a negative
    /// degree component, `-0.` included.
    pub fn dms(latitude: (f64, u16, f64), longitude: (f64, u16, f64)) -> Result<GeoPosition, Error> {
        GeoPosition::new(
            angular::dms_to_dd(latitude.0, latitude.1, latitude.2),
            angular::dms_to_dd(longitude.0, longitude.1, longitude.2),
        )
    }

    /// A copy of `self`, at the given height
    #[must_use]
    pub fn with_height(self, height: f64) -> GeoPosition {
        GeoPosition { height, ..self }
    }
}

// ----- A C C E S S O R S ---------------------------------------------------

impl GeoPosition {
    /// Latitude, in degrees
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude, in degrees
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Height, in meters
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }
}

// ----- G E O D E S I C S ---------------------------------------------------

/// Convenience wrappers for the [`GeodesicModel`] operations, so that
/// `a.distance_to(&b, &model)` reads the way it is spoken.
impl GeoPosition {
    pub fn distance_to<M>(&self, other: &GeoPosition, model: &M) -> Result<f64, Error>
    where
        M: GeodesicModel + ?Sized,
    {
        model.distance(self, other)
    }

    pub fn initial_bearing_to<M>(&self, other: &GeoPosition, model: &M) -> Result<f64, Error>
    where
        M: GeodesicModel + ?Sized,
    {
        model.initial_bearing(self, other)
    }

    pub fn final_bearing_to<M>(&self, other: &GeoPosition, model: &M) -> Result<f64, Error>
    where
        M: GeodesicModel + ?Sized,
    {
        model.final_bearing(self, other)
    }

    pub fn destination<M>(&self, bearing: f64, distance: f64, model: &M) -> Result<GeoPosition, Error>
    where
        M: GeodesicModel + ?Sized,
    {
        model.destination(self, bearing, distance)
    }
}

// ----- T E S T S ---------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction() -> Result<(), Error> {
        let p = GeoPosition::new(55., 12.)?;
        assert_eq!(p.latitude(), 55.);
        assert_eq!(p.longitude(), 12.);
        assert_eq!(p.height(), 0.);

        // Longitudes are normalized to (-180, 180]
        assert_eq!(GeoPosition::new(0., -180.)?.longitude(), 180.);
        assert_eq!(GeoPosition::new(0., 370.)?.longitude(), 10.);
        assert_eq!(GeoPosition::new(0., 190.)?.longitude(), -170.);

        // Structural equality
        assert_eq!(GeoPosition::new(0., 180.)?, GeoPosition::new(0., -180.)?);
        assert_ne!(p, p.with_height(1.));

        // Out of domain
        assert!(matches!(GeoPosition::new(90.5, 0.), Err(Error::Domain(_))));
        assert!(matches!(GeoPosition::new(f64::NAN, 0.), Err(Error::Domain(_))));
        assert!(matches!(
            GeoPosition::new(0., f64::INFINITY),
            Err(Error::Domain(_))
        ));

        let p = GeoPosition::dms((55., 30, 36.), (-12., 45, 36.))?;
        assert_eq!(p.latitude(), 55.51);
        assert_eq!(p.longitude(), -12.76);

        // Greenwich Park, just west of the meridian
        let p = GeoPosition::dms((51., 28, 40.), (-0., 0, 36.))?;
        assert_eq!(p.longitude(), -0.01);
        let p = GeoPosition::dms((-0., 30, 0.), (0., 30, 0.))?;
        assert_eq!(p.latitude(), -0.5);
        assert_eq!(p.longitude(), 0.5);
        Ok(())
    }
}
