mod cartesians;
pub(crate) mod constants;
mod geodesics;
mod latitudes;
mod meridians;

use crate::Error;
use log::warn;

/// Representation of an ellipsoid of revolution, by its semimajor axis, *a*,
/// and its flattening, *f*.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    f: f64,
}

/// GRS80 is the default ellipsoid.
impl Default for Ellipsoid {
    fn default() -> Ellipsoid {
        Ellipsoid::GRS80
    }
}

impl Ellipsoid {
    pub const GRS80: Ellipsoid = Ellipsoid {
        a: 6_378_137.0,
        f: 1. / 298.257_222_100_882_7,
    };

    pub const WGS84: Ellipsoid = Ellipsoid {
        a: 6_378_137.0,
        f: 1. / 298.257_223_563,
    };

    pub const AIRY1830: Ellipsoid = Ellipsoid {
        a: 6_377_563.396,
        f: 1. / 299.324_964_6,
    };

    /// User defined ellipsoid. The semimajor axis must be positive, and the
    /// flattening inside (0, 1), so a > b > 0. Otherwise [`Error::BadParam`].
    pub fn new(semimajor_axis: f64, flattening: f64) -> Result<Ellipsoid, Error> {
        if !(semimajor_axis.is_finite() && semimajor_axis > 0.) {
            warn!("Ellipsoid: invalid semimajor axis {semimajor_axis}");
            return Err(Error::BadParam("a".to_string(), semimajor_axis.to_string()));
        }
        if !(flattening > 0. && flattening < 1.) {
            warn!("Ellipsoid: invalid flattening {flattening}");
            return Err(Error::BadParam("f".to_string(), flattening.to_string()));
        }
        Ok(Ellipsoid {
            a: semimajor_axis,
            f: flattening,
        })
    }

    /// Predefined ellipsoid, from the static table of built-ins, or given
    /// as a literal pair of semimajor axis and reciprocal flattening,
    /// e.g. `"6378137, 298.257223563"`.
    pub fn named(name: &str) -> Result<Ellipsoid, Error> {
        let name = name.trim();
        if let Some(ellps) = constants::ELLIPSOIDS.get(name) {
            return Ok(*ellps);
        }

        // The "a, rf" literal form
        let parts: Vec<&str> = name.split(',').map(str::trim).collect();
        if parts.len() == 2 {
            if let (Ok(a), Ok(rf)) = (parts[0].parse::<f64>(), parts[1].parse::<f64>()) {
                if rf > 1. {
                    if let Ok(ellps) = Ellipsoid::new(a, 1. / rf) {
                        return Ok(ellps);
                    }
                }
                warn!("Ellipsoid: invalid shape parameters a={a}, rf={rf}");
                return Err(Error::BadParam("ellps".to_string(), name.to_string()));
            }
        }

        Err(Error::NotFound(name.to_string(), ": unknown ellipsoid".to_string()))
    }

    // ----- Eccentricities --------------------------------------------------------

    /// The squared eccentricity *e² = (a² - b²) / a²*.
    #[must_use]
    pub fn eccentricity_squared(&self) -> f64 {
        self.f * (2_f64 - self.f)
    }

    /// The eccentricity *e*
    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_squared().sqrt()
    }

    /// The squared second eccentricity *e'² = (a² - b²) / b² = e² / (1 - e²)*
    #[must_use]
    pub fn second_eccentricity_squared(&self) -> f64 {
        let es = self.eccentricity_squared();
        es / (1.0 - es)
    }

    // ----- Axes ------------------------------------------------------------------

    /// The semimajor axis, *a*
    #[must_use]
    pub fn semimajor_axis(&self) -> f64 {
        self.a
    }

    /// The semiminor axis, *b*
    #[must_use]
    pub fn semiminor_axis(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    // ----- Flattenings -----------------------------------------------------------

    /// The flattening, *f = (a - b)/a*
    #[must_use]
    pub fn flattening(&self) -> f64 {
        self.f
    }

    /// The third flattening, *n = (a - b) / (a + b) = f / (2 - f)*
    #[must_use]
    pub fn third_flattening(&self) -> f64 {
        self.f / (2.0 - self.f)
    }

    // ----- Curvatures ------------------------------------------------------------

    /// The radius of curvature in the prime vertical, *N*
    #[must_use]
    pub fn prime_vertical_radius_of_curvature(&self, latitude: f64) -> f64 {
        self.a / (1.0 - latitude.sin().powi(2) * self.eccentricity_squared()).sqrt()
    }

    /// The meridian radius of curvature, *M*
    #[must_use]
    pub fn meridian_radius_of_curvature(&self, latitude: f64) -> f64 {
        let num = self.a * (1.0 - self.eccentricity_squared());
        let denom = (1.0 - latitude.sin().powi(2) * self.eccentricity_squared()).powf(1.5);
        num / denom
    }

    /// The polar radius of curvature, *c*
    #[must_use]
    pub fn polar_radius_of_curvature(&self) -> f64 {
        self.a * self.a / self.semiminor_axis()
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipsoid() -> Result<(), Error> {
        // Constructors
        let ellps = Ellipsoid::named("intl")?;
        assert_eq!(ellps.flattening(), 1. / 297.);
        assert_eq!(ellps, Ellipsoid::named("Intl1924")?);

        let ellps = Ellipsoid::named("GRS80")?;
        assert_eq!(ellps.semimajor_axis(), 6378137.0);
        assert_eq!(ellps.flattening(), 1. / 298.25722_21008_82711_24316);
        assert_eq!(ellps, Ellipsoid::default());

        assert!((ellps.normalized_meridian_arc_unit() - 0.9983242984230415).abs() < 1e-13);
        assert!((4.0 * ellps.meridian_quadrant() - 40007862.9169218).abs() < 1e-7);

        let ellps = Ellipsoid::named("6378137, 298.257223563")?;
        assert_eq!(ellps, Ellipsoid::named("WGS84")?);

        assert_eq!(Ellipsoid::named("WGS84")?, Ellipsoid::WGS84);
        assert_eq!(Ellipsoid::named("Airy1830")?, Ellipsoid::AIRY1830);

        assert!(matches!(
            Ellipsoid::named("Clarke1867"),
            Err(Error::NotFound(_, _))
        ));
        for bad in ["6378137, 0.5", "6378137, 0", "-6378137, 298.257223563", "inf, 298"] {
            assert!(matches!(Ellipsoid::named(bad), Err(Error::BadParam(_, _))));
        }
        Ok(())
    }

    #[test]
    fn invalid_shapes() -> Result<(), Error> {
        // Spheres, prolate, and degenerate shapes are not ellipsoids here
        for (a, f) in [
            (-1., f64::NAN),
            (6_378_137., f64::NAN),
            (6_378_137., 0.),
            (6_378_137., -0.01),
            (6_378_137., 1.),
            (0., 0.003),
            (-6_378_137., 0.003),
            (f64::INFINITY, 0.003),
            (f64::NAN, 0.003),
        ] {
            assert!(matches!(Ellipsoid::new(a, f), Err(Error::BadParam(_, _))));
        }
        let ellps = Ellipsoid::new(6_378_137., 1. / 298.257_223_563)?;
        assert_eq!(ellps, Ellipsoid::WGS84);
        assert!(ellps.semiminor_axis() > 0. && ellps.semiminor_axis() < ellps.semimajor_axis());
        Ok(())
    }

    #[test]
    fn shape_and_size() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let ellps = Ellipsoid::new(ellps.semimajor_axis(), ellps.flattening())?;
        assert_eq!(ellps.semimajor_axis(), 6378137.0);
        assert_eq!(ellps.flattening(), 1. / 298.25722_21008_82711_24316);

        // Additional shape descriptors
        assert!((ellps.eccentricity() - 0.081819191).abs() < 1.0e-10);
        assert!((ellps.eccentricity_squared() - 0.00669_43800_22903_41574).abs() < 1.0e-10);

        // Additional size descriptors
        assert!((ellps.semiminor_axis() - 6_356_752.31414_0347).abs() < 1e-9);
        assert!((ellps.semimajor_axis() - 6_378_137.0).abs() < 1e-9);

        let airy = Ellipsoid::named("Airy1830")?;
        assert!((airy.semiminor_axis() - 6_356_256.909).abs() < 1e-3);
        Ok(())
    }

    #[test]
    fn curvatures() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        // The curvatures at the North Pole
        assert!(
            (ellps.meridian_radius_of_curvature(90_f64.to_radians()) - 6_399_593.6259).abs() < 1e-4
        );
        assert!(
            (ellps.prime_vertical_radius_of_curvature(90_f64.to_radians()) - 6_399_593.6259).abs()
                < 1e-4
        );
        assert!(
            (ellps.polar_radius_of_curvature()
                - ellps.meridian_radius_of_curvature(90_f64.to_radians()))
            .abs()
                < 1e-6
        );

        // The curvatures at the Equator
        assert!((ellps.meridian_radius_of_curvature(0.0) - 6_335_439.3271).abs() < 1.0e-4);
        assert!(
            (ellps.prime_vertical_radius_of_curvature(0.0) - ellps.semimajor_axis()).abs() < 1.0e-4
        );
        Ok(())
    }
}
