//! The Military Grid Reference System: 100 km squares of the UTM grid,
//! identified by a pair of letters, and a position within the square
//! given at a stated precision ([NGA, 2014](crate::Bibliography::Nga14)).
use super::tmerc::TransverseMercator;
use super::utm::Utm;
use super::{GridCoordinate, Hemisphere};
use crate::{Error, GeoPosition};
use log::trace;
use std::fmt;
use std::str::FromStr;

// Column letters, cycling every third zone
const COLUMN_LETTERS: [&[u8]; 3] = [b"ABCDEFGH", b"JKLMNPQR", b"STUVWXYZ"];

// Row letters, offset by 5 in even zones
const ROW_LETTERS: [&[u8]; 2] = [b"ABCDEFGHJKLMNPQRSTUV", b"FGHJKLMNPQRSTUVABCDE"];

const BAND_LETTERS: &str = "CDEFGHJKLMNPQRSTUVWX";

/// A grid reference: zone, latitude band, the letters of the 100 km square,
/// and the easting and northing within the square, given by `precision`
/// digits each (1: 10 km resolution ... 5: 1 m resolution).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridReference {
    zone: usize,
    band: char,
    column: char,
    row: char,
    easting: u32,
    northing: u32,
    precision: usize,
}

impl GridReference {
    /// A grid reference from its constituents. The letters are checked for
    /// consistency with the zone when decoding, not here.
    pub fn new(
        zone: usize,
        band: char,
        square: (char, char),
        easting: u32,
        northing: u32,
        precision: usize,
    ) -> Result<GridReference, Error> {
        if !(1..=5).contains(&precision) {
            return Err(Error::BadParam(
                "precision".to_string(),
                precision.to_string(),
            ));
        }
        let limit = 10_u32.pow(precision as u32);
        if easting >= limit || northing >= limit {
            return Err(Error::Range(format!(
                "digits ({easting}, {northing}) exceed precision {precision}"
            )));
        }
        Ok(GridReference {
            zone,
            band: band.to_ascii_uppercase(),
            column: square.0.to_ascii_uppercase(),
            row: square.1.to_ascii_uppercase(),
            easting,
            northing,
            precision,
        })
    }

    /// The grid reference of the 100 km square holding `grid`, with the
    /// position in the square truncated to `precision` digits. The latitude
    /// band is taken on WGS84: use [`encode_on`](GridReference::encode_on)
    /// for grid coordinates on other ellipsoids.
    pub fn encode(grid: &GridCoordinate, precision: usize) -> Result<GridReference, Error> {
        GridReference::encode_on(grid, precision, &Utm::default())
    }

    /// As [`encode`](GridReference::encode), with the latitude band
    /// taken on the ellipsoid of `utm`.
    pub fn encode_on(
        grid: &GridCoordinate,
        precision: usize,
        utm: &Utm,
    ) -> Result<GridReference, Error> {
        if !(1..=5).contains(&precision) {
            return Err(Error::BadParam(
                "precision".to_string(),
                precision.to_string(),
            ));
        }
        let zone = grid.zone();
        let (e, n) = (grid.easting(), grid.northing());

        let column = (e / 100_000.).floor() as usize;
        if !(1..=8).contains(&column) {
            return Err(Error::Range(format!(
                "easting {e} outside the lettered columns"
            )));
        }
        let row = (n / 100_000.).floor() as usize % 20;
        let column = COLUMN_LETTERS[(zone - 1) % 3][column - 1] as char;
        let row = ROW_LETTERS[(zone - 1) % 2][row] as char;

        // The band follows from the latitude of the point
        let position = utm.inverse(grid)?;
        let band = Utm::latitude_band(position.latitude())?;

        // Truncate, rather than round, to the stated precision
        let resolution = 10_f64.powi(5 - precision as i32);
        let easting = ((e % 100_000.) / resolution).floor() as u32;
        let northing = ((n % 100_000.) / resolution).floor() as u32;
        trace!("MGRS: {e} {n} -> {zone}{band} {column}{row} {easting} {northing}");

        GridReference::new(zone, band, (column, row), easting, northing, precision)
    }

    /// The UTM coordinate of the south west corner of the cell given by
    /// `self`, on WGS84.
    ///
    /// Fails with [`Error::ZoneMismatch`] if the letters of the 100 km square
    /// do not belong to the zone, or if the square lies outside the latitude
    /// band. Fails with [`Error::Domain`] for zones or latitude bands outside
    /// the UTM grid (including the polar bands A, B, Y, Z).
    pub fn decode(&self) -> Result<GridCoordinate, Error> {
        self.decode_on(&Utm::default())
    }

    /// As [`decode`](GridReference::decode), on the ellipsoid of `utm`
    pub fn decode_on(&self, utm: &Utm) -> Result<GridCoordinate, Error> {
        let zone = self.zone;
        if !(1..=60).contains(&zone) {
            return Err(Error::Domain(format!("zone {zone} outside 1..=60")));
        }
        let Some(band_index) = BAND_LETTERS.find(self.band) else {
            return Err(Error::Domain(format!(
                "latitude band '{}' outside the UTM grid",
                self.band
            )));
        };

        let columns = COLUMN_LETTERS[(zone - 1) % 3];
        let Some(column) = columns.iter().position(|&c| c as char == self.column) else {
            return Err(Error::ZoneMismatch(format!(
                "column letter '{}' does not belong to zone {zone}",
                self.column
            )));
        };
        let rows = ROW_LETTERS[(zone - 1) % 2];
        let Some(row) = rows.iter().position(|&c| c as char == self.row) else {
            return Err(Error::ZoneMismatch(format!(
                "row letter '{}' does not belong to zone {zone}",
                self.row
            )));
        };

        let resolution = 10_f64.powi(5 - self.precision as i32);
        let easting = (column + 1) as f64 * 100_000. + self.easting as f64 * resolution;
        let mut northing = row as f64 * 100_000. + self.northing as f64 * resolution;

        let hemisphere = if self.band >= 'N' {
            Hemisphere::North
        } else {
            Hemisphere::South
        };
        let projector = utm.projector(zone, hemisphere);
        let (lowest, highest) = band_limits(&projector, self.band, band_index)?;

        // The row letters repeat every 2000 km. Count from the bottom of
        // the band, rounded down to the 100 km square
        let band_northing = (lowest / 100_000.).floor() * 100_000.;
        while northing < band_northing {
            northing += 2_000_000.;
        }

        // The square must overlap the band
        if northing < lowest - 100_000. || northing > highest + 100_000. {
            return Err(Error::ZoneMismatch(format!(
                "square {}{} is outside band {}{}",
                self.column, self.row, zone, self.band
            )));
        }

        GridCoordinate::new(zone, hemisphere, easting, northing)
    }

    #[must_use]
    pub fn zone(&self) -> usize {
        self.zone
    }

    #[must_use]
    pub fn band(&self) -> char {
        self.band
    }

    /// The letters of the 100 km square
    #[must_use]
    pub fn square(&self) -> (char, char) {
        (self.column, self.row)
    }

    #[must_use]
    pub fn easting(&self) -> u32 {
        self.easting
    }

    #[must_use]
    pub fn northing(&self) -> u32 {
        self.northing
    }

    #[must_use]
    pub fn precision(&self) -> usize {
        self.precision
    }
}

// The lowest and highest northings of a latitude band, anywhere in the
// zone of `projector`. In the southern hemisphere a parallel is lowest at
// the zone edges, in the northern on the central meridian. The widened
// zones of bands V and X reach 6° from their central meridian.
fn band_limits(
    projector: &TransverseMercator,
    band: char,
    band_index: usize,
) -> Result<(f64, f64), Error> {
    let bottom = -80. + 8. * band_index as f64;
    let top = if band == 'X' { 84. } else { bottom + 8. };
    let lon_0 = projector.central_meridian();
    let reach = if matches!(band, 'V' | 'X') { 6. } else { 3. };

    let mut lowest = f64::INFINITY;
    let mut highest = f64::NEG_INFINITY;
    for latitude in [bottom, top] {
        for longitude in [lon_0, lon_0 + reach] {
            let northing = projector
                .forward(&GeoPosition::new(latitude, longitude)?)?
                .northing;
            lowest = lowest.min(northing);
            highest = highest.max(northing);
        }
    }
    Ok((lowest, highest))
}

impl fmt::Display for GridReference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let p = self.precision;
        write!(
            f,
            "{:02}{} {}{} {:0p$} {:0p$}",
            self.zone, self.band, self.column, self.row, self.easting, self.northing
        )
    }
}

/// Parse "31U DQ 48251 11932", or the compact "31UDQ4825111932"
impl FromStr for GridReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<GridReference, Error> {
        let compact: String = s.split_whitespace().collect();
        let syntax = || Error::Syntax(format!("malformed grid reference '{s}'"));

        let digits = compact.chars().take_while(char::is_ascii_digit).count();
        if !(1..=2).contains(&digits) {
            return Err(syntax());
        }
        let zone: usize = compact[..digits].parse().map_err(|_| syntax())?;

        let mut rest = compact[digits..].chars();
        let (Some(band), Some(column), Some(row)) = (rest.next(), rest.next(), rest.next()) else {
            return Err(syntax());
        };
        if ![band, column, row].iter().all(char::is_ascii_alphabetic) {
            return Err(syntax());
        }

        let numbers: String = rest.collect();
        let precision = numbers.len() / 2;
        if numbers.len() % 2 != 0 || !numbers.chars().all(|c| c.is_ascii_digit()) {
            return Err(syntax());
        }
        let easting = numbers[..precision].parse().map_err(|_| syntax())?;
        let northing = numbers[precision..].parse().map_err(|_| syntax())?;
        GridReference::new(zone, band, (column, row), easting, northing, precision)
    }
}

// ----- Tests ---------------------------------------------------------------------
