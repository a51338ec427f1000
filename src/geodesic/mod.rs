//! Point-to-point geometry on the earth: distances, bearings, destinations.
//!
//! Two independent models are provided, selected explicitly by the caller:
//! [`Spherical`](spherical::Spherical), built on n-vectors, and
//! [`Vincenty`](vincenty::Vincenty), solving the geodesic problems on an
//! ellipsoid of revolution.
pub mod spherical;
pub mod vincenty;

use crate::Error;
use crate::GeoPosition;

/// The capabilities shared by all earth models: distance and bearings
/// between two positions, and the destination reached from a position
/// by following a bearing for a given distance.
///
/// Distances are in meters, bearings in degrees clockwise from north,
/// in [0, 360).
pub trait GeodesicModel {
    /// The length of the shortest path between `from` and `to`
    fn distance(&self, from: &GeoPosition, to: &GeoPosition) -> Result<f64, Error>;

    /// The bearing at `from` of the shortest path toward `to`
    fn initial_bearing(&self, from: &GeoPosition, to: &GeoPosition) -> Result<f64, Error>;

    /// The bearing of the shortest path, on arrival at `to`
    fn final_bearing(&self, from: &GeoPosition, to: &GeoPosition) -> Result<f64, Error>;

    /// The position reached by travelling `distance` from `origin`,
    /// setting out along `bearing`
    fn destination(
        &self,
        origin: &GeoPosition,
        bearing: f64,
        distance: f64,
    ) -> Result<GeoPosition, Error>;
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Ellipsoid, Spherical, Vincenty};

    // Both models answer the same questions, and roughly agree
    #[test]
    fn models_agree() -> Result<(), Error> {
        let models: [Box<dyn GeodesicModel>; 2] = [
            Box::new(Spherical::default()),
            Box::new(Vincenty::new(Ellipsoid::named("WGS84")?)),
        ];
        let cambridge = GeoPosition::new(52.205, 0.119)?;
        let paris = GeoPosition::new(48.857, 2.351)?;

        let mut distances = Vec::new();
        for model in &models {
            let d = cambridge.distance_to(&paris, model.as_ref())?;
            let b = cambridge.initial_bearing_to(&paris, model.as_ref())?;
            let p = cambridge.destination(b, d, model.as_ref())?;
            assert!((p.latitude() - paris.latitude()).abs() < 1e-8);
            assert!((p.longitude() - paris.longitude()).abs() < 1e-8);
            distances.push(d);
        }
        assert!((distances[0] - distances[1]).abs() / distances[1] < 5e-3);
        Ok(())
    }
}
