use super::*;
use crate::GeoPosition;

use std::f64::consts::FRAC_PI_2;

impl Ellipsoid {
    // ----- Cartesian <--> Geographic conversion ----------------------------------

    /// Geographic to cartesian (earth centered, earth fixed) conversion.
    ///
    /// Follows the the derivation given by
    /// Bowring ([1976](crate::Bibliography::Bow76) and
    /// [1985](crate::Bibliography::Bow85))
    #[must_use]
    #[allow(non_snake_case)] // make it possible to mimic math notation from original paper
    pub fn cartesian(&self, geographic: &GeoPosition) -> [f64; 3] {
        let lam = geographic.longitude().to_radians();
        let phi = geographic.latitude().to_radians();
        let h = geographic.height();

        let N = self.prime_vertical_radius_of_curvature(phi);
        let (sinphi, cosphi) = phi.sin_cos();
        let (sinlam, coslam) = lam.sin_cos();

        let X = (N + h) * cosphi * coslam;
        let Y = (N + h) * cosphi * sinlam;
        let Z = (N * (1.0 - self.eccentricity_squared()) + h) * sinphi;

        [X, Y, Z]
    }

    /// Cartesian to geogaphic conversion.
    ///
    /// Follows the the derivation given by
    /// Bowring ([1976](crate::Bibliography::Bow76) and
    /// [1985](crate::Bibliography::Bow85)), in the formulation of
    /// Fukushima ([1999](crate::Bibliography::Fuk99))
    #[allow(non_snake_case)] // make it possible to mimic math notation from original paper
    pub fn geographic(&self, cartesian: &[f64; 3]) -> Result<GeoPosition, Error> {
        let [X, Y, Z] = *cartesian;

        // We need a few additional ellipsoidal parameters
        let b = self.semiminor_axis();
        let eps = self.second_eccentricity_squared();
        let es = self.eccentricity_squared();

        // The longitude is straightforward
        let lam = Y.atan2(X);

        // The perpendicular distance from the point coordinate to the Z-axis
        // (HM eq. 5-28)
        let p = X.hypot(Y);

        // For p < 1 picometer, we simplify things to avoid numerical havoc.
        if p < 1.0e-12 {
            // The sign of Z determines the hemisphere
            let phi = FRAC_PI_2.copysign(Z);
            // We have forced phi to one of the poles, so the height is |Z| - b
            let h = Z.abs() - b;
            return Ok(GeoPosition::new(phi.to_degrees(), lam.to_degrees())?.with_height(h));
        }

        let T = (Z * self.a) / (p * b);
        let c = 1.0 / (1.0 + T * T).sqrt();
        let s = c * T;

        let phi_num = Z + eps * b * s.powi(3);
        let phi_denom = p - es * self.a * c.powi(3);
        let phi = phi_num.atan2(phi_denom);

        let lenphi = phi_num.hypot(phi_denom);
        let sinphi = phi_num / lenphi;
        let cosphi = phi_denom / lenphi;

        // We already have sinphi and es, so we can compute the radius
        // of curvature faster by inlining
        let N = self.a / (1.0 - sinphi.powi(2) * es).sqrt();

        // Bowring (1985), as quoted by Burtch (2006), suggests this expression
        // as more accurate than the commonly used h = p / cosphi - N;
        let h = p * cosphi + Z * sinphi - self.a * self.a / N;

        Ok(GeoPosition::new(phi.to_degrees(), lam.to_degrees())?.with_height(h))
    }
}

// ----- Tests ---------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_to_cart() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        // Roundtrip geographic <-> cartesian
        let geo = GeoPosition::new(55., 12.)?.with_height(100.);
        let cart = ellps.cartesian(&geo);
        let geo2 = ellps.geographic(&cart)?;
        assert!((geo.latitude() - geo2.latitude()).abs() < 1.0e-12);
        assert!((geo.longitude() - geo2.longitude()).abs() < 1.0e-12);
        assert!((geo.height() - geo2.height()).abs() < 1.0e-9);

        // The poles
        let pole = GeoPosition::new(-90., 0.)?;
        let cart = ellps.cartesian(&pole);
        assert!((cart[2] + ellps.semiminor_axis()).abs() < 1e-9);
        let back = ellps.geographic(&[0., 0., cart[2]])?;
        assert_eq!(back.latitude(), -90.);
        assert!(back.height().abs() < 1e-9);
        Ok(())
    }
}
