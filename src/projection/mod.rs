//! Grid projections: From geographic positions to grid coordinates, and back
pub mod lcc;
pub mod mgrs;
pub mod osgb;
pub mod tmerc;
pub mod utm;

use crate::Error;
use std::fmt;

/// Northern or southern half of a zoned grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// The hemisphere of a latitude, with the equator counted as north
    #[must_use]
    pub fn of(latitude: f64) -> Hemisphere {
        if latitude < 0. {
            Hemisphere::South
        } else {
            Hemisphere::North
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Hemisphere::North => write!(f, "N"),
            Hemisphere::South => write!(f, "S"),
        }
    }
}

/// A coordinate in the zoned UTM grid: zone, hemisphere, easting and
/// northing in meters, and (when produced by a projector) the grid
/// convergence in degrees and the point scale factor.
///
/// The rectangle of valid eastings and northings is checked on
/// construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCoordinate {
    zone: usize,
    hemisphere: Hemisphere,
    easting: f64,
    northing: f64,
    convergence: Option<f64>,
    scale: Option<f64>,
}

impl GridCoordinate {
    pub fn new(
        zone: usize,
        hemisphere: Hemisphere,
        easting: f64,
        northing: f64,
    ) -> Result<GridCoordinate, Error> {
        if !(1..=60).contains(&zone) {
            return Err(Error::Range(format!("zone {zone} outside 1..=60")));
        }
        if !(0.0..=1_000_000.0).contains(&easting) {
            return Err(Error::Range(format!("easting {easting} outside [0, 1000000]")));
        }
        let northings = match hemisphere {
            Hemisphere::North => 0.0..=9_350_000.0,
            Hemisphere::South => 1_100_000.0..=10_000_000.0,
        };
        if !northings.contains(&northing) {
            return Err(Error::Range(format!(
                "northing {northing} outside [{}, {}] ({hemisphere})",
                northings.start(),
                northings.end()
            )));
        }
        Ok(GridCoordinate {
            zone,
            hemisphere,
            easting,
            northing,
            convergence: None,
            scale: None,
        })
    }

    /// A copy of `self`, carrying the grid convergence (degrees) and
    /// scale factor at the point
    #[must_use]
    pub fn with_factors(self, convergence: f64, scale: f64) -> GridCoordinate {
        GridCoordinate {
            convergence: Some(convergence),
            scale: Some(scale),
            ..self
        }
    }

    #[must_use]
    pub fn zone(&self) -> usize {
        self.zone
    }

    #[must_use]
    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    #[must_use]
    pub fn easting(&self) -> f64 {
        self.easting
    }

    #[must_use]
    pub fn northing(&self) -> f64 {
        self.northing
    }

    /// Grid convergence, in degrees. The angle from true north to grid
    /// north, positive clockwise.
    #[must_use]
    pub fn convergence(&self) -> Option<f64> {
        self.convergence
    }

    #[must_use]
    pub fn scale(&self) -> Option<f64> {
        self.scale
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:02} {} {:.3} {:.3}",
            self.zone, self.hemisphere, self.easting, self.northing
        )
    }
}

// ----- Tests ---------------------------------------------------------------------
