//! The Vincenty solution of the direct and inverse geodesic problems
use super::GeodesicModel;
use crate::math::angular;
use crate::{Ellipsoid, Error, GeoPosition};
use log::{debug, error};

/// The solution of the direct geodesic problem
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectSolution {
    pub destination: GeoPosition,
    /// Bearing on arrival, degrees in [0, 360)
    pub final_bearing: f64,
}

/// The solution of the inverse geodesic problem
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseSolution {
    /// Meters
    pub distance: f64,
    /// Degrees in [0, 360)
    pub initial_bearing: f64,
    /// Degrees in [0, 360)
    pub final_bearing: f64,
    /// The number of λ iterations spent
    pub iterations: usize,
}

/// Ellipsoidal geodesics, following Vincenty
/// ([1975](crate::Bibliography::Vin75), [1976](crate::Bibliography::Vin76)).
///
/// The iteration settings are validated on construction: the convergence
/// `epsilon` must be in (0, 1) radians, and the iteration limit in 3..=1000.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vincenty {
    ellipsoid: Ellipsoid,
    epsilon: f64,
    max_iterations: usize,
}

const DEFAULT_EPSILON: f64 = 1e-12;
const DEFAULT_MAX_ITERATIONS: usize = 200;

impl Vincenty {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid) -> Vincenty {
        Vincenty {
            ellipsoid,
            epsilon: DEFAULT_EPSILON,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Set the stop criterion for the iterations
    pub fn with_epsilon(self, epsilon: f64) -> Result<Vincenty, Error> {
        if !(epsilon > 0. && epsilon < 1.) {
            error!("Vincenty: epsilon must be in (0, 1), got {epsilon}");
            return Err(Error::BadParam("epsilon".to_string(), epsilon.to_string()));
        }
        Ok(Vincenty { epsilon, ..self })
    }

    /// Set the iteration budget
    pub fn with_iteration_limit(self, max_iterations: usize) -> Result<Vincenty, Error> {
        if !(3..=1000).contains(&max_iterations) {
            error!("Vincenty: iteration limit must be in 3..=1000, got {max_iterations}");
            return Err(Error::BadParam(
                "iterations".to_string(),
                max_iterations.to_string(),
            ));
        }
        Ok(Vincenty {
            max_iterations,
            ..self
        })
    }

    #[must_use]
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    #[must_use]
    pub fn iteration_limit(&self) -> usize {
        self.max_iterations
    }

    /// The direct problem: Where do we end up, travelling `distance` meters
    /// from `origin`, setting out along `bearing` (degrees)?
    pub fn direct(
        &self,
        origin: &GeoPosition,
        bearing: f64,
        distance: f64,
    ) -> Result<DirectSolution, Error> {
        if !bearing.is_finite() || !distance.is_finite() {
            return Err(Error::Domain(format!(
                "non-finite bearing ({bearing}) or distance ({distance})"
            )));
        }
        let from = (
            origin.latitude().to_radians(),
            origin.longitude().to_radians(),
        );
        let [lat, lon, azi] = self
            .ellipsoid
            .geodesic_fwd(from, bearing.to_radians(), distance, self.epsilon, self.max_iterations)
            .into_result("Vincenty direct")?;
        let destination =
            GeoPosition::new(lat.to_degrees(), lon.to_degrees())?.with_height(origin.height());
        Ok(DirectSolution {
            destination,
            final_bearing: angular::normalize_bearing(azi.to_degrees()),
        })
    }

    /// The bearing on arrival, after travelling `distance` from `origin`
    /// along the initial `bearing`
    pub fn final_bearing_on(
        &self,
        origin: &GeoPosition,
        bearing: f64,
        distance: f64,
    ) -> Result<f64, Error> {
        Ok(self.direct(origin, bearing, distance)?.final_bearing)
    }

    /// The inverse problem: The distance and bearings between `from` and `to`.
    ///
    /// Coincident points (including two points on the same pole) yield zero
    /// distance and zero bearings. The bearing between the two opposite poles
    /// is undefined, and reported as [`Error::Domain`]. Near-antipodal points,
    /// where the iteration fails, are reported as [`Error::Convergence`].
    pub fn inverse(&self, from: &GeoPosition, to: &GeoPosition) -> Result<InverseSolution, Error> {
        let (lat1, lat2) = (from.latitude(), to.latitude());
        if lat1.abs() == 90. && lat2 == -lat1 {
            return Err(Error::Domain(
                "bearing undefined between the opposite poles".to_string(),
            ));
        }
        if lat1.abs() == 90. && lat1 == lat2 {
            return Ok(InverseSolution {
                distance: 0.,
                initial_bearing: 0.,
                final_bearing: 0.,
                iterations: 0,
            });
        }

        let outcome = self.ellipsoid.geodesic_inv(
            (lat1.to_radians(), from.longitude().to_radians()),
            (lat2.to_radians(), to.longitude().to_radians()),
            self.epsilon,
            self.max_iterations,
        );
        let iterations = outcome.iterations;
        let [distance, a1, a2] = outcome.into_result("Vincenty inverse")?;
        debug!("Vincenty inverse: converged after {iterations} iterations");

        Ok(InverseSolution {
            distance,
            initial_bearing: angular::normalize_bearing(a1.to_degrees()),
            final_bearing: angular::normalize_bearing(a2.to_degrees()),
            iterations,
        })
    }
}

impl GeodesicModel for Vincenty {
    fn distance(&self, from: &GeoPosition, to: &GeoPosition) -> Result<f64, Error> {
        Ok(self.inverse(from, to)?.distance)
    }

    fn initial_bearing(&self, from: &GeoPosition, to: &GeoPosition) -> Result<f64, Error> {
        Ok(self.inverse(from, to)?.initial_bearing)
    }

    fn final_bearing(&self, from: &GeoPosition, to: &GeoPosition) -> Result<f64, Error> {
        Ok(self.inverse(from, to)?.final_bearing)
    }

    fn destination(
        &self,
        origin: &GeoPosition,
        bearing: f64,
        distance: f64,
    ) -> Result<GeoPosition, Error> {
        Ok(self.direct(origin, bearing, distance)?.destination)
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    fn wgs84() -> Result<Vincenty, Error> {
        Ok(Vincenty::new(Ellipsoid::named("WGS84")?))
    }

    #[test]
    fn land_s_end_to_john_o_groats() -> Result<(), Error> {
        let vincenty = wgs84()?;
        let a = GeoPosition::new(50.06632, -5.71475)?;
        let b = GeoPosition::new(58.64402, -3.07009)?;

        let inv = vincenty.inverse(&a, &b)?;
        assert_float_eq!(inv.distance, 969_954.166_313_828_9, abs <= 1e-6);
        assert_float_eq!(inv.initial_bearing, 9.141_877_488_912_858, abs <= 1e-9);
        assert_float_eq!(inv.final_bearing, 11.297_220_414_315_143, abs <= 1e-9);
        assert_eq!(inv.iterations, 4);

        let dir = vincenty.direct(&a, inv.initial_bearing, inv.distance)?;
        assert_float_eq!(dir.destination.latitude(), 58.64402, abs <= 1e-9);
        assert_float_eq!(dir.destination.longitude(), -3.07009, abs <= 1e-9);
        assert_float_eq!(dir.final_bearing, inv.final_bearing, abs <= 1e-9);
        Ok(())
    }

    #[test]
    fn inverse() -> Result<(), Error> {
        let vincenty = wgs84()?;

        // Newport, RI to Cleveland, OH
        let a = GeoPosition::new(41.49008, -71.312796)?;
        let b = GeoPosition::new(41.499498, -81.695391)?;
        let inv = vincenty.inverse(&a, &b)?;
        assert_float_eq!(inv.distance, 866_455.432_915, abs <= 1e-5);
        assert_float_eq!(inv.initial_bearing, 273.513_747_350_476_8, abs <= 1e-9);
        assert_float_eq!(inv.final_bearing, 266.624_126_498_466_1, abs <= 1e-9);

        // Flinders Peak to Buninyong
        let a = GeoPosition::new(37.95103, 144.42487)?;
        let b = GeoPosition::new(37.65280, 143.9265)?;
        let inv = vincenty.inverse(&a, &b)?;
        assert_float_eq!(inv.distance, 54_973.295_265_514_986, abs <= 1e-6);
        assert_float_eq!(inv.initial_bearing, 233.130_077_307_154_98, abs <= 1e-9);
        assert_float_eq!(inv.final_bearing, 232.824_607_412_497_56, abs <= 1e-9);

        // Along a meridian
        let a = GeoPosition::new(10., 0.)?;
        let b = GeoPosition::new(60., 0.)?;
        let inv = vincenty.inverse(&a, &b)?;
        assert_float_eq!(inv.distance, 5_548_217.986_254_205, abs <= 1e-5);
        assert_eq!(inv.initial_bearing, 0.);
        let ellps = vincenty.ellipsoid();
        let m = ellps.meridian_distance(60.) - ellps.meridian_distance(10.);
        assert_float_eq!(inv.distance, m, abs <= 1e-4);

        // GRS80, Copenhagen to Paris
        let vincenty = Vincenty::new(Ellipsoid::named("GRS80")?);
        let a = GeoPosition::new(55., 12.)?;
        let b = GeoPosition::new(49., 2.)?;
        let inv = vincenty.inverse(&a, &b)?;
        assert_float_eq!(inv.distance, 956_066.231_961_962_4, abs <= 1e-5);
        assert_float_eq!(inv.initial_bearing, 229.845_939_579_688_26, abs <= 1e-9);
        assert_float_eq!(inv.final_bearing, 221.947_420_581_655_56, abs <= 1e-9);
        Ok(())
    }

    #[test]
    fn direct() -> Result<(), Error> {
        let vincenty = wgs84()?;
        let a = GeoPosition::new(-37.95103, 144.42487)?;
        let dir = vincenty.direct(&a, 306.86816, 54_972.271)?;
        assert_float_eq!(dir.destination.latitude(), -37.652_817_717_445_76, abs <= 1e-9);
        assert_float_eq!(dir.destination.longitude(), 143.926_497_668_219_16, abs <= 1e-9);
        assert_float_eq!(dir.final_bearing, 307.173_631_384_666_5, abs <= 1e-9);
        let final_bearing = vincenty.final_bearing_on(&a, 306.86816, 54_972.271)?;
        assert_eq!(final_bearing, dir.final_bearing);

        // Across the antimeridian, the longitude is normalized
        let a = GeoPosition::new(0., 179.5)?;
        let dir = vincenty.direct(&a, 90., 111_319.490_793)?;
        assert!(dir.destination.longitude() < -179.);

        assert!(matches!(
            vincenty.direct(&a, f64::NAN, 1.),
            Err(Error::Domain(_))
        ));
        Ok(())
    }

    #[test]
    fn degenerate() -> Result<(), Error> {
        let vincenty = wgs84()?;

        // Identical points
        let a = GeoPosition::new(55., 12.)?;
        let inv = vincenty.inverse(&a, &a)?;
        assert_eq!(inv.distance, 0.);
        assert_eq!(inv.initial_bearing, 0.);
        assert_eq!(inv.final_bearing, 0.);

        // Same pole, different longitudes
        let n1 = GeoPosition::new(90., 0.)?;
        let n2 = GeoPosition::new(90., 30.)?;
        assert_eq!(vincenty.inverse(&n1, &n2)?.distance, 0.);

        // The opposite poles
        let s = GeoPosition::new(-90., 0.)?;
        assert!(matches!(vincenty.inverse(&n1, &s), Err(Error::Domain(_))));
        assert!(matches!(vincenty.inverse(&s, &n2), Err(Error::Domain(_))));

        // Near-antipodal
        let origin = GeoPosition::new(0., 0.)?;
        for (lat, lon) in [(0.5, 179.7), (0., 179.5), (0., 180.)] {
            let b = GeoPosition::new(lat, lon)?;
            assert!(matches!(
                vincenty.inverse(&origin, &b),
                Err(Error::Convergence { .. })
            ));
        }
        Ok(())
    }

    #[test]
    fn settings() -> Result<(), Error> {
        let vincenty = wgs84()?.with_epsilon(1e-10)?.with_iteration_limit(50)?;
        assert_eq!(vincenty.epsilon(), 1e-10);
        assert_eq!(vincenty.iteration_limit(), 50);
        assert!(matches!(wgs84()?.with_epsilon(0.), Err(Error::BadParam(_, _))));
        assert!(matches!(wgs84()?.with_epsilon(1.), Err(Error::BadParam(_, _))));
        assert!(matches!(
            wgs84()?.with_iteration_limit(2),
            Err(Error::BadParam(_, _))
        ));

        // A budget too small for the problem at hand
        let tight = wgs84()?.with_iteration_limit(3)?;
        let a = GeoPosition::new(50.06632, -5.71475)?;
        let b = GeoPosition::new(58.64402, -3.07009)?;
        assert_eq!(
            tight.inverse(&a, &b),
            Err(Error::Convergence {
                operation: "Vincenty inverse",
                iterations: 3
            })
        );
        Ok(())
    }
}
