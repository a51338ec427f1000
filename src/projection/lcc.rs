//! Lambert Conformal Conic, on one (tangent) or two (secant) standard
//! parallels. Follows [Snyder (1987)](crate::Bibliography::Sny87), and the
//! PROJ implementation, cf. https://proj.org/operations/projections/lcc.html
use crate::math::ancillary::{pj_msfn, sinhpsi_to_tanphi, ts};
use crate::{Ellipsoid, Error, GeoPosition};
use log::trace;
use std::f64::consts::FRAC_PI_2;

const EPS10: f64 = 1e-10;

/// The defining parameters of a Lambert conformal conic. Angles in
/// degrees, false easting and northing in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LccConfig {
    pub standard_parallel_1: f64,
    /// Defaults to `standard_parallel_1`, i.e. the tangent case
    pub standard_parallel_2: Option<f64>,
    /// Defaults to the standard parallel in the tangent case, and to
    /// the equator in the secant case
    pub origin_latitude: Option<f64>,
    pub origin_longitude: f64,
    pub scale: f64,
    pub false_easting: f64,
    pub false_northing: f64,
    pub ellipsoid: Ellipsoid,
}

impl LccConfig {
    /// A tangent cone on `ellipsoid`, touching at `standard_parallel`,
    /// with unit scale, and no false origin offsets.
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid, standard_parallel: f64) -> LccConfig {
        LccConfig {
            standard_parallel_1: standard_parallel,
            standard_parallel_2: None,
            origin_latitude: None,
            origin_longitude: 0.,
            scale: 1.,
            false_easting: 0.,
            false_northing: 0.,
            ellipsoid,
        }
    }
}

/// The Lambert conformal conic projector, with the cone constants
/// precomputed from an [`LccConfig`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LambertConformalConic {
    config: LccConfig,
    // The cone constant
    n: f64,
    // Snyder's F, scaled by the semimajor axis later
    c: f64,
    // The conic radius of the origin latitude
    rho0: f64,
}

impl LambertConformalConic {
    /// Fails with [`Error::BadParam`] for standard parallels at the poles,
    /// or symmetric around the equator.
    pub fn new(config: &LccConfig) -> Result<LambertConformalConic, Error> {
        let phi1 = config.standard_parallel_1.to_radians();
        let phi2 = config.standard_parallel_2.unwrap_or(config.standard_parallel_1).to_radians();
        let lat_0 = match config.origin_latitude {
            Some(lat) => lat.to_radians(),
            None if (phi1 - phi2).abs() < EPS10 => phi1,
            None => 0.,
        };

        let bad = |key: &str, value: f64, reason: &str| {
            Error::BadParam(key.to_string(), format!("{value}: {reason}"))
        };
        if (phi1 + phi2).abs() < EPS10 {
            return Err(bad(
                "lat_2",
                config.standard_parallel_2.unwrap_or(f64::NAN),
                "|lat_1 + lat_2| should be > 0",
            ));
        }
        let sc = phi1.sin_cos();
        if sc.1.abs() < EPS10 || phi1.abs() >= FRAC_PI_2 {
            return Err(bad("lat_1", config.standard_parallel_1, "|lat_1| should be < 90°"));
        }
        if phi2.cos().abs() < EPS10 || phi2.abs() >= FRAC_PI_2 {
            return Err(bad("lat_2", phi2.to_degrees(), "|lat_2| should be < 90°"));
        }
        if !(config.scale > 0.) {
            return Err(bad("k_0", config.scale, "should be positive"));
        }

        let e = config.ellipsoid.eccentricity();
        let es = config.ellipsoid.eccentricity_squared();

        // Snyder (1987) eq. 14-15
        let m1 = pj_msfn(sc, es);

        // Snyder (1987) eq. 15-9: exp(-𝜓)
        let ml1 = ts(sc, e);

        let mut n = sc.0;

        // Secant case?
        if (phi1 - phi2).abs() >= EPS10 {
            let sc = phi2.sin_cos();
            n = (m1 / pj_msfn(sc, es)).ln();
            if n == 0. {
                return Err(bad("ellps", e, "invalid eccentricity"));
            }
            let ml2 = ts(sc, e);
            let denom = (ml1 / ml2).ln();
            if denom == 0. {
                return Err(bad("ellps", e, "invalid eccentricity"));
            }
            n /= denom;
        }

        let c = m1 * ml1.powf(-n) / n;
        let mut rho0 = 0.;
        if (lat_0.abs() - FRAC_PI_2).abs() > EPS10 {
            rho0 = c * ts(lat_0.sin_cos(), e).powf(n);
        }
        trace!("LCC: n = {n}, c = {c}, rho0 = {rho0}");

        Ok(LambertConformalConic {
            config: *config,
            n,
            c,
            rho0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &LccConfig {
        &self.config
    }

    /// The cone constant, i.e. the ratio between the angle at the apex of
    /// the developed cone, and the longitude difference
    #[must_use]
    pub fn cone_constant(&self) -> f64 {
        self.n
    }

    /// Geographic to projected. Fails with [`Error::Domain`] at the pole
    /// opposite the apex of the cone.
    pub fn forward(&self, position: &GeoPosition) -> Result<(f64, f64), Error> {
        let cfg = &self.config;
        let ak = cfg.ellipsoid.semimajor_axis() * cfg.scale;
        let e = cfg.ellipsoid.eccentricity();
        let lam = (position.longitude() - cfg.origin_longitude).to_radians();
        let phi = position.latitude().to_radians();
        let mut rho = 0.;

        // Close to one of the poles?
        if (phi.abs() - FRAC_PI_2).abs() < EPS10 {
            if phi * self.n <= 0. {
                return Err(Error::Domain(format!(
                    "latitude {} is the pole opposite the cone apex",
                    position.latitude()
                )));
            }
        } else {
            rho = self.c * ts(phi.sin_cos(), e).powf(self.n);
        }

        let sc = (lam * self.n).sin_cos();
        let x = ak * rho * sc.0 + cfg.false_easting;
        let y = ak * (self.rho0 - rho * sc.1) + cfg.false_northing;
        Ok((x, y))
    }

    /// Projected to geographic. The conformal-to-geographic latitude
    /// conversion is iterative, and fails with [`Error::Convergence`]
    /// when it does not settle.
    pub fn inverse(&self, x: f64, y: f64) -> Result<GeoPosition, Error> {
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::Domain(format!("non-finite coordinate ({x}, {y})")));
        }
        let cfg = &self.config;
        let ak = cfg.ellipsoid.semimajor_axis() * cfg.scale;
        let e = cfg.ellipsoid.eccentricity();
        let n = self.n;

        let mut x = (x - cfg.false_easting) / ak;
        let mut y = self.rho0 - (y - cfg.false_northing) / ak;
        let mut rho = x.hypot(y);

        // On one of the poles
        if rho == 0. {
            return GeoPosition::new(90_f64.copysign(n), cfg.origin_longitude);
        }

        // Standard parallel on the southern hemisphere?
        if n < 0. {
            rho = -rho;
            x = -x;
            y = -y;
        }

        let ts0 = (rho / self.c).powf(1. / n);
        let taup = (1. / ts0 - ts0) / 2.;
        let tau = sinhpsi_to_tanphi(taup, e).into_result("LCC inverse")?;

        let lat = tau.atan().to_degrees();
        let lon = (x.atan2(y) / n).to_degrees() + cfg.origin_longitude;
        GeoPosition::new(lat, lon)
    }
}

/// Project `position` with the cone given by `config`
pub fn project(position: &GeoPosition, config: &LccConfig) -> Result<(f64, f64), Error> {
    LambertConformalConic::new(config)?.forward(position)
}

/// Recover the position projected to (`x`, `y`) with the cone given by `config`
pub fn unproject(x: f64, y: f64, config: &LccConfig) -> Result<GeoPosition, Error> {
    LambertConformalConic::new(config)?.inverse(x, y)
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    fn secant(ellipsoid: Ellipsoid, lat_1: f64, lat_2: f64, lon_0: f64) -> LccConfig {
        LccConfig {
            standard_parallel_2: Some(lat_2),
            origin_longitude: lon_0,
            ..LccConfig::new(ellipsoid, lat_1)
        }
    }

    #[test]
    fn one_standard_parallel() -> Result<(), Error> {
        let config = LccConfig {
            origin_longitude: 12.,
            ..LccConfig::new(Ellipsoid::named("GRS80")?, 57.)
        };
        let lcc = LambertConformalConic::new(&config)?;

        // Validation values from PROJ:
        //     echo 12 55 0 0 | cct -d18 proj=lcc lat_1=57 lon_0=12  -- | clip
        //     echo 10 55 0 0 | cct -d18 proj=lcc lat_1=57 lon_0=12  -- | clip
        //     echo 14 59 0 0 | cct -d18 proj=lcc lat_1=57 lon_0=12  -- | clip
        let cases = [
            ((55., 12.), (0., -222_728.122_307_816_05)),
            ((55., 10.), (-128_046.472_438_652_24, -220_853.700_160_506_41)),
            ((59., 14.), (115_005.414_566_200_68, 224_484.514_376_338_89)),
        ];
        for ((lat, lon), (x, y)) in cases {
            let p = GeoPosition::new(lat, lon)?;
            let (e, n) = lcc.forward(&p)?;
            assert_float_eq!(e, x, abs <= 2e-6);
            assert_float_eq!(n, y, abs <= 2e-6);

            let back = lcc.inverse(e, n)?;
            assert_float_eq!(back.latitude(), lat, abs <= 1e-12);
            assert_float_eq!(back.longitude(), lon, abs <= 1e-12);
        }
        Ok(())
    }

    #[test]
    fn two_standard_parallels() -> Result<(), Error> {
        let grs80 = Ellipsoid::named("GRS80")?;
        let p = GeoPosition::new(40., 12.)?;

        // echo 12 40 0 0 | cct -d12 proj=lcc lat_1=33 lat_2=45 lon_0=10 -- | clip
        let config = secant(grs80, 33., 45., 10.);
        let (x, y) = project(&p, &config)?;
        assert_float_eq!(x, 169_863.026_093_938_3, abs <= 2e-6);
        assert_float_eq!(y, 4_735_925.219_292_450_7, abs <= 2e-6);
        let back = unproject(x, y, &config)?;
        assert_float_eq!(back.latitude(), 40., abs <= 1e-12);
        assert_float_eq!(back.longitude(), 12., abs <= 1e-12);

        // echo 12 40 0 0 | cct -d12 proj=lcc lat_1=33 lat_2=45 lat_0=35 lon_0=10 -- | clip
        let config = LccConfig {
            origin_latitude: Some(35.),
            ..secant(grs80, 33., 45., 10.)
        };
        let (x, y) = project(&p, &config)?;
        assert_float_eq!(x, 169_863.026_093_938_36, abs <= 2e-6);
        assert_float_eq!(y, 554_155.440_793_916_6, abs <= 2e-6);

        // ... x_0=12345 y_0=67890
        let config = LccConfig {
            false_easting: 12345.,
            false_northing: 67890.,
            ..config
        };
        let (x, y) = project(&p, &config)?;
        assert_float_eq!(x, 182_208.026_093_938_3, abs <= 2e-6);
        assert_float_eq!(y, 622_045.440_793_916_6, abs <= 2e-6);

        // ... k_0=0.99
        let config = LccConfig { scale: 0.99, ..config };
        let (x, y) = project(&p, &config)?;
        assert_float_eq!(x, 180_509.395_832_998_9, abs <= 2e-6);
        assert_float_eq!(y, 616_503.886_385_977_5, abs <= 2e-6);
        let back = unproject(x, y, &config)?;
        assert_float_eq!(back.latitude(), 40., abs <= 1e-12);
        assert_float_eq!(back.longitude(), 12., abs <= 1e-12);
        Ok(())
    }

    #[test]
    fn latitudinal_offset() -> Result<(), Error> {
        // echo 12 40 0 0 | cct -d12 proj=lcc lat_1=39 lat_0=35 lon_0=10 -- | clip
        let config = LccConfig {
            origin_latitude: Some(35.),
            origin_longitude: 10.,
            ..LccConfig::new(Ellipsoid::named("GRS80")?, 39.)
        };
        let (x, y) = project(&GeoPosition::new(40., 12.)?, &config)?;
        assert_float_eq!(x, 170_800.011_728_740_65, abs <= 2e-6);
        assert_float_eq!(y, 557_172.361_112_929_4, abs <= 2e-6);
        Ok(())
    }

    // The worked example of Snyder (1987), pp. 296-297
    #[test]
    fn snyder() -> Result<(), Error> {
        let config = LccConfig {
            origin_latitude: Some(23.),
            ..secant(Ellipsoid::named("Clarke1866")?, 33., 45., -96.)
        };
        let lcc = LambertConformalConic::new(&config)?;
        assert_float_eq!(lcc.cone_constant(), 0.630_496_5, abs <= 1e-7);

        let (x, y) = lcc.forward(&GeoPosition::new(35., -75.)?)?;
        assert_float_eq!(x, 1_894_410.898_357, abs <= 1e-5);
        assert_float_eq!(y, 1_564_649.478_496, abs <= 1e-5);
        Ok(())
    }

    #[test]
    fn southern_hemisphere() -> Result<(), Error> {
        let config = secant(Ellipsoid::named("GRS80")?, -33., -45., 10.);
        let lcc = LambertConformalConic::new(&config)?;
        assert!(lcc.cone_constant() < 0.);

        let (x, y) = lcc.forward(&GeoPosition::new(-40., 12.)?)?;
        assert_float_eq!(x, 169_863.026_093_938_3, abs <= 2e-6);
        assert_float_eq!(y, -4_735_925.219_292_450_7, abs <= 2e-6);
        let back = lcc.inverse(x, y)?;
        assert_float_eq!(back.latitude(), -40., abs <= 1e-12);
        assert_float_eq!(back.longitude(), 12., abs <= 1e-12);
        Ok(())
    }

    #[test]
    fn poles() -> Result<(), Error> {
        let config = secant(Ellipsoid::named("GRS80")?, 33., 45., 10.);
        let lcc = LambertConformalConic::new(&config)?;

        // The apex of the cone is the north pole...
        let (x, y) = lcc.forward(&GeoPosition::new(90., 0.)?)?;
        assert_eq!(x, 0.);
        let back = lcc.inverse(x, y)?;
        assert_float_eq!(back.latitude(), 90., abs <= 1e-9);

        // ... and the south pole is out of reach
        assert!(matches!(
            lcc.forward(&GeoPosition::new(-90., 0.)?),
            Err(Error::Domain(_))
        ));
        assert!(matches!(lcc.inverse(f64::NAN, 0.), Err(Error::Domain(_))));
        Ok(())
    }

    #[test]
    fn bad_parameters() -> Result<(), Error> {
        let grs80 = Ellipsoid::named("GRS80")?;
        for config in [
            secant(grs80, 30., -30., 0.),
            LccConfig::new(grs80, 0.),
            LccConfig::new(grs80, 90.),
            secant(grs80, 45., -90., 0.),
            LccConfig {
                scale: 0.,
                ..LccConfig::new(grs80, 45.)
            },
        ] {
            assert!(matches!(
                LambertConformalConic::new(&config),
                Err(Error::BadParam(_, _))
            ));
        }
        Ok(())
    }
}
