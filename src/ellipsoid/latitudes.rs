use super::*;
use crate::math::ancillary::sinhpsi_to_tanphi;

// ----- Latitudes -------------------------------------------------------------
impl Ellipsoid {
    // --- Classic latitudes: geographic, geocentric & reduced ---

    /// Geographic latitude, 𝜙 to geocentric latitude, 𝜃.
    #[must_use]
    pub fn latitude_geographic_to_geocentric(&self, geographic: f64) -> f64 {
        ((1.0 - self.f * (2.0 - self.f)) * geographic.tan()).atan()
    }

    /// Geocentric latitude, 𝜃 to geographic latitude, 𝜙.
    #[must_use]
    pub fn latitude_geocentric_to_geographic(&self, latitude: f64) -> f64 {
        (latitude.tan() / (1.0 - self.eccentricity_squared())).atan()
    }

    /// Geographic latitude to reduced latitude, 𝛽, i.e. the latitude
    /// on the auxiliary sphere of the Vincenty algorithm
    #[must_use]
    pub fn latitude_geographic_to_reduced(&self, latitude: f64) -> f64 {
        latitude.tan().atan2(1. / (1. - self.f))
    }

    /// Reduced latitude, 𝛽, to geographic latitude
    #[must_use]
    pub fn latitude_reduced_to_geographic(&self, latitude: f64) -> f64 {
        latitude.tan().atan2(1. - self.f)
    }

    // --- Isometric and conformal latitudes ---

    /// Geographic latitude to isometric latitude, 𝜓
    #[must_use]
    pub fn isometric_latitude(&self, latitude: f64) -> f64 {
        let e = self.eccentricity();
        latitude.tan().asinh() - (e * latitude.sin()).atanh() * e
    }

    /// Isometric latitude, 𝜓, to geographic latitude, by Newton iteration
    pub fn latitude_isometric_to_geographic(&self, isometric: f64) -> Result<f64, Error> {
        let tau = sinhpsi_to_tanphi(isometric.sinh(), self.eccentricity())
            .into_result("isometric latitude inversion")?;
        Ok(tau.atan())
    }

    /// Geographic latitude, 𝜙, to conformal, 𝜒
    #[must_use]
    pub fn latitude_geographic_to_conformal(&self, latitude: f64) -> f64 {
        self.isometric_latitude(latitude).sinh().atan()
    }

    /// Conformal latitude, 𝜒, to geographic, 𝜙
    pub fn latitude_conformal_to_geographic(&self, conformal: f64) -> Result<f64, Error> {
        let tau = sinhpsi_to_tanphi(conformal.tan(), self.eccentricity())
            .into_result("conformal latitude inversion")?;
        Ok(tau.atan())
    }
}

// ----- Tests ---------------------------------------------------------------------
