//! Datums: An ellipsoid, and the 7-parameter Helmert transform anchoring
//! it to the WGS84 reference frame.
use crate::{Ellipsoid, Error, GeoPosition};
use log::{debug, trace};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// The Helmert transform performs reference frame shifts in 3D cartesian
/// space. Here in its small-angle, "position vector" form:
///
/// ```text
/// ⎡x'⎤   ⎡tx⎤   ⎡  1+s  -rz    ry ⎤ ⎡x⎤
/// ⎢y'⎥ = ⎢ty⎥ + ⎢  rz    1+s  -rx ⎥ ⎢y⎥
/// ⎣z'⎦   ⎣tz⎦   ⎣ -ry    rx    1+s⎦ ⎣z⎦
/// ```
///
/// Translations in meters, scale in ppm, rotations in arc seconds.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Helmert {
    pub translation: [f64; 3],
    pub scale: f64,
    pub rotation: [f64; 3],
}

impl Helmert {
    #[must_use]
    pub fn new(tx: f64, ty: f64, tz: f64, s: f64, rx: f64, ry: f64, rz: f64) -> Helmert {
        Helmert {
            translation: [tx, ty, tz],
            scale: s,
            rotation: [rx, ry, rz],
        }
    }

    /// The (approximate) inverse transform: All parameters negated
    #[must_use]
    pub fn inverse(&self) -> Helmert {
        let [tx, ty, tz] = self.translation;
        let [rx, ry, rz] = self.rotation;
        Helmert::new(-tx, -ty, -tz, -self.scale, -rx, -ry, -rz)
    }

    #[must_use]
    #[allow(non_snake_case)]
    pub fn apply(&self, cartesian: &[f64; 3]) -> [f64; 3] {
        let [x, y, z] = *cartesian;
        let [tx, ty, tz] = self.translation;
        let S = 1. + self.scale / 1e6;
        let [rx, ry, rz] = self.rotation.map(|r| (r / 3600.).to_radians());

        [
            tx + x * S - y * rz + z * ry,
            ty + x * rz + y * S - z * rx,
            tz - x * ry + y * rx + z * S,
        ]
    }
}

/// A named datum. The built-ins are held in a static table, and looked
/// up using [`Datum::named`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datum {
    name: &'static str,
    ellipsoid: Ellipsoid,
    /// From WGS84 to this datum
    transform: Helmert,
}

// Name, ellipsoid, and the Helmert parameters from WGS84:
// tx, ty, tz (m), s (ppm), rx, ry, rz (arc seconds)
#[rustfmt::skip]
const DATUM_LIST: [(&str, &str, [f64; 7]); 8] = [
    ("WGS84",      "WGS84",        [0.; 7]),
    ("OSGB36",     "Airy1830",     [-446.448, 125.157, -542.060, 20.4894, -0.1502, -0.2470, -0.8421]),
    ("ED50",       "Intl1924",     [89.5, 93.8, 123.1, -1.2, 0.0, 0.0, 0.156]),
    ("Irl1975",    "AiryModified", [-482.530, 130.596, -564.557, -8.150, 1.042, 0.214, 0.631]),
    ("NAD27",      "Clarke1866",   [8., -160., -176., 0., 0., 0., 0.]),
    ("NAD83",      "GRS80",        [1.004, -1.910, -0.515, -0.0015, 0.0267, 0.00034, 0.011]),
    ("TokyoJapan", "Bessel1841",   [148., -507., -685., 0., 0., 0., 0.]),
    ("WGS72",      "WGS72",        [0., 0., -4.5, -0.22, 0., 0., 0.554]),
];

static DATUMS: Lazy<BTreeMap<&'static str, Datum>> = Lazy::new(|| {
    let mut datums = BTreeMap::new();
    for (name, ellps, p) in DATUM_LIST {
        // The ellipsoid names are all in the built-in table
        let Ok(ellipsoid) = Ellipsoid::named(ellps) else {
            continue;
        };
        let transform = Helmert::new(p[0], p[1], p[2], p[3], p[4], p[5], p[6]);
        datums.insert(name, Datum { name, ellipsoid, transform });
    }
    datums
});

impl Datum {
    /// Predefined datum, from the static table of built-ins
    pub fn named(name: &str) -> Result<Datum, Error> {
        DATUMS
            .get(name.trim())
            .copied()
            .ok_or_else(|| Error::NotFound(name.to_string(), ": unknown datum".to_string()))
    }

    /// The WGS84 datum, the hub of all conversions
    #[must_use]
    pub fn wgs84() -> Datum {
        Datum {
            name: "WGS84",
            ellipsoid: Ellipsoid::WGS84,
            transform: Helmert::default(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// The transform from WGS84 to this datum
    #[must_use]
    pub fn transform(&self) -> &Helmert {
        &self.transform
    }

    fn is_wgs84(&self) -> bool {
        self.name == "WGS84"
    }

    /// Convert a position from `self` to the datum `to`, via WGS84.
    /// Heights are carried along, and changed by the shift.
    pub fn convert(&self, position: &GeoPosition, to: &Datum) -> Result<GeoPosition, Error> {
        if self == to {
            return Ok(*position);
        }
        trace!("Datum: {} -> {}", self.name, to.name);

        let mut cartesian = self.ellipsoid.cartesian(position);
        if !self.is_wgs84() {
            cartesian = self.transform.inverse().apply(&cartesian);
        }
        if !to.is_wgs84() {
            cartesian = to.transform.apply(&cartesian);
        }

        let result = to.ellipsoid.geographic(&cartesian)?;
        debug!(
            "Datum: ({}, {}) {} -> ({}, {}) {}",
            position.latitude(),
            position.longitude(),
            self.name,
            result.latitude(),
            result.longitude(),
            to.name
        );
        Ok(result)
    }
}

// ----- Tests ---------------------------------------------------------------------
