//! The British National Grid: A transverse Mercator on the Airy 1830
//! ellipsoid, with a fixed true origin at 49°N 2°W, and two-letter codes
//! for the 100 km squares. Follows the series expansions published by the
//! Ordnance Survey ([2020](crate::Bibliography::Ord20)).
use crate::math::ConvergenceOutcome;
use crate::{Datum, Ellipsoid, Error, GeoPosition};
use log::{debug, trace};
use std::fmt;
use std::str::FromStr;

/// Scale factor on the central meridian
const F0: f64 = 0.999_601_271_7;
/// True origin, degrees
const LAT_0: f64 = 49.;
const LON_0: f64 = -2.;
/// Map coordinates of the true origin, meters
const E0: f64 = 400_000.;
const N0: f64 = -100_000.;

/// The defined rectangle of the grid, meters
const MAX_EASTING: f64 = 700_000.;
const MAX_NORTHING: f64 = 1_300_000.;

// Budget for the meridional arc iteration of the inverse. Typically 3-4 suffice.
const MAX_ITERATIONS: usize = 20;

/// A coordinate of the national grid, in meters from the false origin.
/// Always inside the defined rectangle of [0, 700 km) × [0, 1300 km).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NationalGridCoordinate {
    easting: f64,
    northing: f64,
}

impl NationalGridCoordinate {
    pub fn new(easting: f64, northing: f64) -> Result<NationalGridCoordinate, Error> {
        if !(0.0..MAX_EASTING).contains(&easting) || !(0.0..MAX_NORTHING).contains(&northing) {
            return Err(Error::Range(format!(
                "({easting}, {northing}) outside the national grid"
            )));
        }
        Ok(NationalGridCoordinate { easting, northing })
    }

    #[must_use]
    pub fn easting(&self) -> f64 {
        self.easting
    }

    #[must_use]
    pub fn northing(&self) -> f64 {
        self.northing
    }

    /// The grid reference of the 100 km square holding `self`, with the
    /// position in the square truncated to `digits` digits per coordinate.
    pub fn to_reference(&self, digits: usize) -> Result<NationalGridReference, Error> {
        if !(1..=5).contains(&digits) {
            return Err(Error::BadParam("digits".to_string(), digits.to_string()));
        }
        let e100 = (self.easting / 100_000.).floor() as u32;
        let n100 = (self.northing / 100_000.).floor() as u32;

        // Letter indices, counting from 'A' in a 5×5 grid, skipping 'I'
        let mut l1 = (19 - n100) - (19 - n100) % 5 + (e100 + 10) / 5;
        let mut l2 = (19 - n100) * 5 % 25 + e100 % 5;
        if l1 > 7 {
            l1 += 1;
        }
        if l2 > 7 {
            l2 += 1;
        }
        let letter = |l: u32| char::from(b'A' + l as u8);

        let resolution = 10_f64.powi(5 - digits as i32);
        let easting = ((self.easting % 100_000.) / resolution).floor() as u32;
        let northing = ((self.northing % 100_000.) / resolution).floor() as u32;
        NationalGridReference::new((letter(l1), letter(l2)), easting, northing, digits)
    }
}

impl fmt::Display for NationalGridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.3} {:.3}", self.easting, self.northing)
    }
}

/// A reference to a cell in the national grid: The two letters of the
/// 100 km square, and the position within the square at a precision of
/// `digits` digits per coordinate (1: 10 km ... 5: 1 m).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NationalGridReference {
    square: (char, char),
    easting: u32,
    northing: u32,
    digits: usize,
}

impl NationalGridReference {
    pub fn new(
        square: (char, char),
        easting: u32,
        northing: u32,
        digits: usize,
    ) -> Result<NationalGridReference, Error> {
        if !(1..=5).contains(&digits) {
            return Err(Error::BadParam("digits".to_string(), digits.to_string()));
        }
        let limit = 10_u32.pow(digits as u32);
        if easting >= limit || northing >= limit {
            return Err(Error::Range(format!(
                "digits ({easting}, {northing}) exceed precision {digits}"
            )));
        }
        let square = (square.0.to_ascii_uppercase(), square.1.to_ascii_uppercase());
        Ok(NationalGridReference {
            square,
            easting,
            northing,
            digits,
        })
    }

    #[must_use]
    pub fn square(&self) -> (char, char) {
        self.square
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
    pub fn digits(&self) -> usize {
        self.digits
    }

    /// The south west corner of the cell. Letters outside the national grid
    /// scheme give [`Error::ZoneMismatch`], squares in the scheme but outside
    /// the grid rectangle give [`Error::Range`].
    pub fn decode(&self) -> Result<NationalGridCoordinate, Error> {
        let (first, second) = self.square;
        let mismatch = || {
            Error::ZoneMismatch(format!(
                "'{first}{second}' is not a national grid square"
            ))
        };

        // Only these 500 km squares hold any part of the grid
        if !"HJNOST".contains(first) || !second.is_ascii_uppercase() || second == 'I' {
            return Err(mismatch());
        }
        let index = |c: char| {
            let l = c as u32 - 'A' as u32;
            if l > 7 {
                l - 1
            } else {
                l
            }
        };
        let (l1, l2) = (index(first), index(second));

        let e100 = ((l1 - 2) % 5) * 5 + l2 % 5;
        let n100 = (19 - (l1 / 5) * 5) as i64 - (l2 / 5) as i64;
        if n100 < 0 {
            return Err(mismatch());
        }

        let resolution = 10_f64.powi(5 - self.digits as i32);
        NationalGridCoordinate::new(
            e100 as f64 * 100_000. + self.easting as f64 * resolution,
            n100 as f64 * 100_000. + self.northing as f64 * resolution,
        )
    }
}

impl fmt::Display for NationalGridReference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let d = self.digits;
        write!(
            f,
            "{}{} {:0d$} {:0d$}",
            self.square.0, self.square.1, self.easting, self.northing
        )
    }
}

/// Parse "TG 51409 13177", or the compact "TG5140913177"
impl FromStr for NationalGridReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<NationalGridReference, Error> {
        let compact: String = s.split_whitespace().collect();
        let syntax = || Error::Syntax(format!("malformed grid reference '{s}'"));

        let mut chars = compact.chars();
        let (Some(first), Some(second)) = (chars.next(), chars.next()) else {
            return Err(syntax());
        };
        if !first.is_ascii_alphabetic() || !second.is_ascii_alphabetic() {
            return Err(syntax());
        }
        let numbers: String = chars.collect();
        if numbers.len() % 2 != 0 || !numbers.chars().all(|c| c.is_ascii_digit()) {
            return Err(syntax());
        }
        let digits = numbers.len() / 2;
        let easting = numbers[..digits].parse().map_err(|_| syntax())?;
        let northing = numbers[digits..].parse().map_err(|_| syntax())?;
        NationalGridReference::new((first, second), easting, northing, digits)
    }
}

/// The national grid projector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NationalGrid {
    ellipsoid: Ellipsoid,
}

impl Default for NationalGrid {
    fn default() -> NationalGrid {
        NationalGrid {
            ellipsoid: Ellipsoid::AIRY1830,
        }
    }
}

impl NationalGrid {
    /// The developed meridional arc from the true origin to `phi`
    #[allow(non_snake_case)]
    fn meridional_arc(&self, phi: f64) -> f64 {
        let b = self.ellipsoid.semiminor_axis();
        let n = self.ellipsoid.third_flattening();
        let (n2, n3) = (n * n, n * n * n);
        let phi0 = LAT_0.to_radians();
        let (dphi, sphi) = (phi - phi0, phi + phi0);

        let Ma = (1. + n + 5. / 4. * n2 + 5. / 4. * n3) * dphi;
        let Mb = (3. * n + 3. * n2 + 21. / 8. * n3) * dphi.sin() * sphi.cos();
        let Mc = (15. / 8. * n2 + 15. / 8. * n3) * (2. * dphi).sin() * (2. * sphi).cos();
        let Md = 35. / 24. * n3 * (3. * dphi).sin() * (3. * sphi).cos();
        b * F0 * (Ma - Mb + Mc - Md)
    }

    /// The radii of curvature in the prime vertical and the meridian,
    /// scaled by F0, and η²
    fn curvatures(&self, phi: f64) -> (f64, f64, f64) {
        let a = self.ellipsoid.semimajor_axis();
        let es = self.ellipsoid.eccentricity_squared();
        let s2 = phi.sin().powi(2);
        let nu = a * F0 / (1. - es * s2).sqrt();
        let rho = a * F0 * (1. - es) / (1. - es * s2).powf(1.5);
        (nu, rho, nu / rho - 1.)
    }

    /// OSGB36 geographic to national grid. Fails with [`Error::Range`]
    /// outside the grid rectangle.
    #[allow(non_snake_case)]
    pub fn forward(&self, position: &GeoPosition) -> Result<NationalGridCoordinate, Error> {
        let phi = position.latitude().to_radians();
        let lam = position.longitude().to_radians();
        let (sinphi, cosphi) = phi.sin_cos();
        let (nu, rho, eta2) = self.curvatures(phi);
        let M = self.meridional_arc(phi);

        let cos3 = cosphi.powi(3);
        let cos5 = cosphi.powi(5);
        let tan2 = phi.tan().powi(2);
        let tan4 = tan2 * tan2;

        let I = M + N0;
        let II = nu / 2. * sinphi * cosphi;
        let III = nu / 24. * sinphi * cos3 * (5. - tan2 + 9. * eta2);
        let IIIA = nu / 720. * sinphi * cos5 * (61. - 58. * tan2 + tan4);
        let IV = nu * cosphi;
        let V = nu / 6. * cos3 * (nu / rho - tan2);
        let VI = nu / 120. * cos5 * (5. - 18. * tan2 + tan4 + 14. * eta2 - 58. * tan2 * eta2);

        let dl = lam - LON_0.to_radians();
        let (dl2, dl3) = (dl * dl, dl * dl * dl);
        let N = I + II * dl2 + III * dl2 * dl2 + IIIA * dl3 * dl3;
        let E = E0 + IV * dl + V * dl3 + VI * dl3 * dl2;
        trace!("National grid: ({phi}, {lam}) -> ({E}, {N})");
        NationalGridCoordinate::new(E, N)
    }

    /// Geographic on any datum to national grid, via a datum shift to OSGB36
    pub fn forward_from(
        &self,
        position: &GeoPosition,
        datum: &Datum,
    ) -> Result<NationalGridCoordinate, Error> {
        let osgb36 = Datum::named("OSGB36")?;
        self.forward(&datum.convert(position, &osgb36)?)
    }

    /// National grid to OSGB36 geographic
    #[allow(non_snake_case)]
    pub fn inverse(&self, coordinate: &NationalGridCoordinate) -> Result<GeoPosition, Error> {
        let (E, N) = (coordinate.easting(), coordinate.northing());
        let a = self.ellipsoid.semimajor_axis();

        // Iterate for the latitude of the foot point, until the developed
        // arc matches the northing to within 0.01 mm
        let mut phi = LAT_0.to_radians();
        let mut M = 0.;
        let mut iterations = 0;
        let mut converged = false;
        while iterations < MAX_ITERATIONS {
            iterations += 1;
            phi += (N - N0 - M) / (a * F0);
            M = self.meridional_arc(phi);
            if (N - N0 - M).abs() < 1e-5 {
                converged = true;
                break;
            }
        }
        let phi = ConvergenceOutcome {
            value: phi,
            iterations,
            converged,
        }
        .into_result("National grid inverse")?;
        debug!("National grid inverse: {iterations} iterations");

        let (nu, rho, eta2) = self.curvatures(phi);
        let tan = phi.tan();
        let (tan2, tan4) = (tan * tan, tan.powi(4));
        let tan6 = tan4 * tan2;
        let sec = 1. / phi.cos();

        let VII = tan / (2. * rho * nu);
        let VIII = tan / (24. * rho * nu.powi(3)) * (5. + 3. * tan2 + eta2 - 9. * tan2 * eta2);
        let IX = tan / (720. * rho * nu.powi(5)) * (61. + 90. * tan2 + 45. * tan4);
        let X = sec / nu;
        let XI = sec / (6. * nu.powi(3)) * (nu / rho + 2. * tan2);
        let XII = sec / (120. * nu.powi(5)) * (5. + 28. * tan2 + 24. * tan4);
        let XIIA = sec / (5040. * nu.powi(7)) * (61. + 662. * tan2 + 1320. * tan4 + 720. * tan6);

        let dE = E - E0;
        let (dE2, dE3) = (dE * dE, dE * dE * dE);
        let lat = phi - VII * dE2 + VIII * dE2 * dE2 - IX * dE3 * dE3;
        let lon = LON_0.to_radians() + X * dE - XI * dE3 + XII * dE3 * dE2 - XIIA * dE3 * dE3 * dE;
        GeoPosition::new(lat.to_degrees(), lon.to_degrees())
    }

    /// National grid to geographic on any datum, via a datum shift from OSGB36
    pub fn inverse_to(
        &self,
        coordinate: &NationalGridCoordinate,
        datum: &Datum,
    ) -> Result<GeoPosition, Error> {
        let osgb36 = Datum::named("OSGB36")?;
        osgb36.convert(&self.inverse(coordinate)?, datum)
    }
}

// ----- Tests ---------------------------------------------------------------------
