//! Transverse Mercator, following Engsager & Poder (2007), with the
//! 6th order [Krüger](crate::Bibliography::Kru12) series and the convergence and scale computations of
//! [Karney (2011)](crate::Bibliography::Kar11)
use crate::math::{angular, fourier, fourier_coefficients, FourierCoefficients, PolynomialCoefficients};
use crate::{Ellipsoid, Error, GeoPosition};
use log::trace;

// Don't wanna play if we're too far from the center meridian
const ETA_MAX: f64 = 2.623395162778;

/// The result of a forward projection: Easting and northing in meters,
/// the grid convergence in degrees, and the point scale factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub easting: f64,
    pub northing: f64,
    pub convergence: f64,
    pub scale: f64,
}

/// The transverse Mercator projection, with its prerequisites
/// precomputed once and for all
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransverseMercator {
    ellipsoid: Ellipsoid,
    lon_0: f64,
    k_0: f64,
    x_0: f64,
    // The scaled spherical Earth radius - Qn in Engsager's implementation
    qs: f64,
    // Origin northing minus true northing at the origin latitude
    zb: f64,
    tm: FourierCoefficients,
    // Term-wise derivatives of the Krüger series
    dtm: FourierCoefficients,
}

impl TransverseMercator {
    /// Transverse Mercator on `ellipsoid`, with the origin at (`lat_0`, `lon_0`)
    /// (degrees), scale `k_0` on the central meridian, and false easting and
    /// northing `x_0`, `y_0`.
    #[must_use]
    pub fn new(
        ellipsoid: Ellipsoid,
        lat_0: f64,
        lon_0: f64,
        k_0: f64,
        x_0: f64,
        y_0: f64,
    ) -> TransverseMercator {
        let n = ellipsoid.third_flattening();
        let qs = k_0 * ellipsoid.semimajor_axis() * ellipsoid.normalized_meridian_arc_unit();

        // The Fourier series for the transverse mercator coordinates,
        // from [Engsager & Poder, 2007](crate::Bibliography::Eng07),
        // with extensions to 6th order by [Karney, 2011](crate::Bibliography::Kar11).
        let tm = fourier_coefficients(n, &TRANSVERSE_MERCATOR);

        // Conformal latitude value of the latitude-of-origin - Z in Engsager's notation
        let z = ellipsoid.latitude_geographic_to_conformal(lat_0.to_radians());
        let zb = y_0 - qs * (z + fourier::sin(2. * z, &tm.fwd));

        TransverseMercator {
            ellipsoid,
            lon_0,
            k_0,
            x_0,
            qs,
            zb,
            tm,
            dtm: tm.differentiated(),
        }
    }

    #[must_use]
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// The central meridian, in degrees
    #[must_use]
    pub fn central_meridian(&self) -> f64 {
        self.lon_0
    }

    /// Geographic to grid. Fails with [`Error::Domain`] too far
    /// from the central meridian.
    pub fn forward(&self, position: &GeoPosition) -> Result<GridPoint, Error> {
        let ellps = &self.ellipsoid;
        let phi = position.latitude().to_radians();
        let lam = angular::normalize_symmetric((position.longitude() - self.lon_0).to_radians());

        // --- 1. Geographical -> Conformal latitude, rotated longitude
        let psi = ellps.isometric_latitude(phi);
        let taup = psi.sinh();
        let (sinlam, coslam) = lam.sin_cos();

        // --- 2. Conformal LAT, LNG -> complex spherical LAT
        let xip = taup.atan2(coslam);
        let etap = (sinlam / taup.hypot(coslam)).asinh();

        // --- 3. Complex spherical N, E -> ellipsoidal normalized N, E
        let arg = [2. * xip, 2. * etap];
        let dc = fourier::complex_sin(arg, &self.tm.fwd);
        let xi = xip + dc[0];
        let eta = etap + dc[1];
        if eta.abs() > ETA_MAX {
            return Err(Error::Domain(format!(
                "({}, {}) too far from central meridian {}",
                position.latitude(),
                position.longitude(),
                self.lon_0
            )));
        }

        // --- 4. Convergence and scale, from the derivative of the series
        let dd = fourier::complex_cos(arg, &self.dtm.fwd);
        let p = 1. + dd[0];
        let q = -dd[1];
        let gamma = (psi.tanh() * lam.tan()).atan() + q.atan2(p);
        let es = ellps.eccentricity_squared();
        let sinphi = phi.sin();
        let k = self.k_0 * (1. - es * sinphi * sinphi).sqrt() * (1. + phi.tan().powi(2)).sqrt()
            / taup.hypot(coslam)
            * ellps.normalized_meridian_arc_unit()
            * p.hypot(q);

        // --- 5. ellipsoidal normalized N, E -> metric N, E
        let easting = self.qs * eta + self.x_0;
        let northing = self.qs * xi + self.zb;
        trace!("tmerc: ({phi}, {lam}) -> ({easting}, {northing})");
        Ok(GridPoint {
            easting,
            northing,
            convergence: gamma.to_degrees(),
            scale: k,
        })
    }

    /// Grid to geographic. Also returns the grid convergence (degrees) and
    /// scale factor at the point.
    pub fn inverse(&self, easting: f64, northing: f64) -> Result<(GeoPosition, f64, f64), Error> {
        if !easting.is_finite() || !northing.is_finite() {
            return Err(Error::Domain(format!(
                "non-finite grid coordinate ({easting}, {northing})"
            )));
        }
        let ellps = &self.ellipsoid;

        // --- 1. Normalize N, E
        let eta = (easting - self.x_0) / self.qs;
        let xi = (northing - self.zb) / self.qs;
        if eta.abs() > ETA_MAX {
            return Err(Error::Domain(format!(
                "easting {easting} too far from central meridian"
            )));
        }

        // --- 2. Normalized N, E -> complex spherical LAT, LNG
        let arg = [2. * xi, 2. * eta];
        let dc = fourier::complex_sin(arg, &self.tm.inv);
        let xip = xi + dc[0];
        let etap = eta + dc[1];
        let dd = fourier::complex_cos(arg, &self.dtm.inv);
        let p = 1. + dd[0];
        let q = dd[1];

        // --- 3. Complex spherical LAT -> Gaussian LAT, LNG -> ellipsoidal LAT, LNG
        let sinh_etap = etap.sinh();
        let (sinxip, cosxip) = xip.sin_cos();
        let r = sinh_etap.hypot(cosxip);
        let taup = sinxip / r;
        let tau = crate::math::ancillary::sinhpsi_to_tanphi(taup, ellps.eccentricity())
            .into_result("Transverse Mercator inverse")?;
        let phi = tau.atan();
        let lam = sinh_etap.atan2(cosxip);

        // --- 4. Convergence and scale
        let gamma = (xip.tan() * etap.tanh()).atan() + q.atan2(p);
        let es = ellps.eccentricity_squared();
        let sinphi = phi.sin();
        let k = self.k_0 * (1. - es * sinphi * sinphi).sqrt() * (1. + tau * tau).sqrt() * r
            * ellps.normalized_meridian_arc_unit()
            / p.hypot(q);

        let position = GeoPosition::new(phi.to_degrees(), lam.to_degrees() + self.lon_0)?;
        Ok((position, gamma.to_degrees(), k))
    }
}

#[rustfmt::skip]
const TRANSVERSE_MERCATOR: PolynomialCoefficients = PolynomialCoefficients {
    // Geodetic to TM. [Engsager & Poder, 2007](crate::Bibliography::Eng07)
    fwd: [
        [1./2.,   -2./3.,   5./16.,   41./180.,   -127./288.0 ,   7891./37800.],
        [0., 13./48.,   -3./5.,   557./1440.,   281./630.,   -1983433./1935360.],
        [0., 0., 61./240.,  -103./140.,   15061./26880.,   167603./181440.],
        [0., 0., 0., 49561./161280.,   -179./168.,   6601661./7257600.],
        [0., 0., 0., 0., 34729./80640.,   -3418889./1995840.],
        [0., 0., 0., 0., 0., 212378941./319334400.]
    ],

    // TM to Geodetic. [Engsager & Poder, 2007](crate::Bibliography::Eng07)
    inv: [
        [-1./2.,   2./3.,   -37./96.,   1./360.,   81./512.,   -96199./604800.],
        [0., -1./48.,   -1./15.,   437./1440.,   -46./105.,   1118711./3870720.],
        [0., 0., -17./480.,   37./840.,   209./4480.,   -5569./90720.],
        [0., 0., 0., -4397./161280.,   11./504.,   830251./7257600.],
        [0., 0., 0., 0., -4583./161280.,   108847./3991680.],
        [0., 0., 0., 0., 0., -20648693./638668800.]
    ]
};

// ----- T E S T S ---------------------------------------------------------------------
