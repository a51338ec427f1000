//! Universal Transverse Mercator: The transverse Mercator, in 60 zones,
//! each 6° wide, with the irregular zones over Norway and Svalbard.
use super::tmerc::TransverseMercator;
use super::{GridCoordinate, Hemisphere};
use crate::{Ellipsoid, Error, GeoPosition};
use log::debug;

/// Latitude band letters, 8° each from 80°S. The last band, X, is 12° high,
/// hence the repeated letter.
const BANDS: &[u8] = b"CDEFGHJKLMNPQRSTUVWXX";

/// The scale on the central meridian, by definition of UTM
const K_0: f64 = 0.9996;
const FALSE_EASTING: f64 = 500_000.;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.;
const LATITUDE_SLACK: f64 = 1e-9;

/// The UTM projector, on a given ellipsoid (WGS84 by default)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Utm {
    ellipsoid: Ellipsoid,
}

impl Default for Utm {
    fn default() -> Utm {
        Utm {
            ellipsoid: Ellipsoid::WGS84,
        }
    }
}

impl Utm {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid) -> Utm {
        Utm { ellipsoid }
    }

    #[must_use]
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// The latitude band letter of `latitude`. Fails with [`Error::Domain`]
    /// outside the UTM latitude range of [-80, 84].
    pub fn latitude_band(latitude: f64) -> Result<char, Error> {
        if !(-80.0..=84.0).contains(&latitude) {
            return Err(Error::Domain(format!(
                "latitude {latitude} outside the UTM range [-80, 84]"
            )));
        }
        let index = (latitude / 8. + 10.).floor() as usize;
        Ok(BANDS[index.min(BANDS.len() - 1)] as char)
    }

    /// The zone of `position`, taking the irregular zones of Norway and
    /// Svalbard into account.
    pub fn zone_of(position: &GeoPosition) -> Result<usize, Error> {
        let band = Utm::latitude_band(position.latitude())?;
        let lon = position.longitude();
        let mut zone = (((lon + 180.) / 6.).floor() as usize + 1).min(60);

        // Norway: Zone 32V is widened to cover the west coast
        if band == 'V' && zone == 31 && lon >= 3. {
            zone = 32;
        }

        // Svalbard: Zones 32X, 34X, and 36X are unused
        if band == 'X' {
            zone = match zone {
                32 if lon < 9. => 31,
                32 => 33,
                34 if lon < 21. => 33,
                34 => 35,
                36 if lon < 33. => 35,
                36 => 37,
                _ => zone,
            };
        }
        Ok(zone)
    }

    /// The transverse Mercator projector for a given zone and hemisphere
    #[must_use]
    pub fn projector(&self, zone: usize, hemisphere: Hemisphere) -> TransverseMercator {
        let lon_0 = (zone as f64 - 1.) * 6. - 180. + 3.;
        let y_0 = match hemisphere {
            Hemisphere::North => 0.,
            Hemisphere::South => FALSE_NORTHING_SOUTH,
        };
        TransverseMercator::new(self.ellipsoid, 0., lon_0, K_0, FALSE_EASTING, y_0)
    }

    /// Geographic to UTM, in the zone and hemisphere of the position
    pub fn forward(&self, position: &GeoPosition) -> Result<GridCoordinate, Error> {
        let zone = Utm::zone_of(position)?;
        debug!(
            "UTM: ({}, {}) in zone {zone}",
            position.latitude(),
            position.longitude()
        );
        self.forward_in(position, zone, Hemisphere::of(position.latitude()))
    }

    /// Geographic to UTM, in a given zone and hemisphere. Useful for
    /// positions just outside the zone proper.
    pub fn forward_in(
        &self,
        position: &GeoPosition,
        zone: usize,
        hemisphere: Hemisphere,
    ) -> Result<GridCoordinate, Error> {
        Utm::latitude_band(position.latitude())?;
        if !(1..=60).contains(&zone) {
            return Err(Error::Range(format!("zone {zone} outside 1..=60")));
        }
        let grid = self.projector(zone, hemisphere).forward(position)?;
        let coordinate = GridCoordinate::new(zone, hemisphere, grid.easting, grid.northing)?;
        Ok(coordinate.with_factors(grid.convergence, grid.scale))
    }

    /// UTM to geographic. Fails with [`Error::Range`] for grid coordinates
    /// inside the rectangle, but north of 84° or south of 80°S.
    pub fn inverse(&self, grid: &GridCoordinate) -> Result<GeoPosition, Error> {
        let projector = self.projector(grid.zone(), grid.hemisphere());
        let (position, _, _) = projector.inverse(grid.easting(), grid.northing())?;

        // Round trips from the band limits may land a hair outside
        let latitude = position.latitude();
        if !(-80. - LATITUDE_SLACK..=84. + LATITUDE_SLACK).contains(&latitude) {
            return Err(Error::Range(format!(
                "{} {} inverts to latitude {latitude}, outside the UTM range [-80, 84]",
                grid.easting(),
                grid.northing()
            )));
        }
        Ok(position)
    }
}

// ----- Tests ---------------------------------------------------------------------
