use super::*;
use std::f64::consts::FRAC_PI_2;

// ----- Meridian geometry -----------------------------------------------------
impl Ellipsoid {
    /// The mean length of one radian of the meridian, *Qn*, in units of the
    /// semimajor axis. Series in the third flattening, from
    /// [Karney 2011](crate::Bibliography::Kar11) eq. (14)
    #[must_use]
    pub fn normalized_meridian_arc_unit(&self) -> f64 {
        let n = self.third_flattening();
        crate::math::horner(n * n, &constants::MERIDIAN_ARC_COEFFICIENTS) / (1. + n)
    }

    /// The radius, *A*, of the sphere having the same meridian length as
    /// the ellipsoid. [Deakin et al 2012](crate::Bibliography::Dea12) eq. (41)
    #[must_use]
    pub fn rectifying_radius(&self) -> f64 {
        self.a * self.normalized_meridian_arc_unit() / (1. + self.third_flattening())
    }

    /// Equator to pole, along a meridian
    #[must_use]
    pub fn meridian_quadrant(&self) -> f64 {
        self.a * FRAC_PI_2 * self.normalized_meridian_arc_unit()
    }

    /// The distance along the meridian from the equator to `latitude`
    /// (degrees), by [Bowring (1983)](crate::Bibliography::Bow83).
    #[must_use]
    #[allow(non_snake_case)]
    pub fn meridian_distance(&self, latitude: f64) -> f64 {
        let phi = latitude.to_radians();
        let n = self.third_flattening();
        let B = 9. * (1. - 3. * n * n / 8.);
        let (s, c) = (2. * phi).sin_cos();
        let x = 1. + 13. / 12. * n * c;
        let y = 13. / 12. * n * s;
        let theta = phi - B * x.hypot(y).powf(-2. / 13.) * (2. / 13. * y.atan2(x)).sin();
        self.bowring_radius() * theta
    }

    /// The latitude (degrees) reached at `distance` along the meridian,
    /// counting from the equator. The inverse of
    /// [`meridian_distance`](Ellipsoid::meridian_distance).
    #[must_use]
    #[allow(non_snake_case)]
    pub fn meridian_latitude(&self, distance: f64) -> f64 {
        let n = self.third_flattening();
        let C = 1. - 9. * n * n / 16.;
        let theta = distance / self.bowring_radius();
        let (s, c) = (2. * theta).sin_cos();
        let x = 1. - 155. / 84. * n * c;
        let y = 155. / 84. * n * s;
        let phi = theta + 63. / 4. * C * x.hypot(y).powf(8. / 155.) * (8. / 155. * y.atan2(x)).sin();
        phi.to_degrees()
    }

    // The rectifying radius, truncated after the n⁴ term
    fn bowring_radius(&self) -> f64 {
        let n = self.third_flattening();
        let m = 1. + n * n / 8.;
        self.a * m * m / (1. + n)
    }
}

// ----- Tests ---------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meridian_distance() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        assert!((ellps.rectifying_radius() - 6_356_774.720_017_125).abs() < 1e-6);

        // At the pole, the distance is the meridian quadrant
        assert!((ellps.meridian_distance(90.) - ellps.meridian_quadrant()).abs() < 1e-6);
        assert!((ellps.meridian_latitude(ellps.meridian_quadrant()) - 90.).abs() < 1e-10);
        assert_eq!(ellps.meridian_distance(0.), 0.);
        assert!((ellps.meridian_distance(55.) - 6_097_230.312_996_5).abs() < 1e-6);

        // Symmetric around the equator
        assert!((ellps.meridian_distance(-30.) + ellps.meridian_distance(30.)).abs() < 1e-9);

        for lat in [-89.9, -45., 0., 30., 55., 89.9] {
            let m = ellps.meridian_distance(lat);
            assert!((ellps.meridian_latitude(m) - lat).abs() < 1e-8);
        }
        Ok(())
    }
}
