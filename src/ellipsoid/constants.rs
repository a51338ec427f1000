use super::Ellipsoid;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Coefficients for the series expansion of the normalized meridian arc unit,
/// in terms of n², the squared third flattening.
/// [Karney 2011](crate::Bibliography::Kar11) eq. (14)
pub(crate) const MERIDIAN_ARC_COEFFICIENTS: [f64; 5] =
    [1., 1. / 4., 1. / 64., 1. / 256., 25. / 16384.];

// Name, semimajor axis, reciprocal flattening
#[rustfmt::skip]
const ELLIPSOID_LIST: [(&str, f64, f64); 15] = [
    ("GRS80",         6_378_137.0,   298.257_222_100_882_7),
    ("WGS84",         6_378_137.0,   298.257_223_563),
    ("WGS72",         6_378_135.0,   298.26),
    ("Airy1830",      6_377_563.396, 299.324_964_6),
    ("airy",          6_377_563.396, 299.324_964_6),
    ("AiryModified",  6_377_340.189, 299.324_964_6),
    ("mod_airy",      6_377_340.189, 299.324_964_6),
    ("Bessel1841",    6_377_397.155, 299.152_812_8),
    ("bessel",        6_377_397.155, 299.152_812_8),
    ("Clarke1866",    6_378_206.4,   294.978_698_214),
    ("clrk66",        6_378_206.4,   294.978_698_214),
    ("Clarke1880IGN", 6_378_249.2,   293.466_021_294),
    ("Intl1924",      6_378_388.0,   297.0),
    ("intl",          6_378_388.0,   297.0),
    ("Helmert",       6_378_200.0,   298.3),
];

/// The built-in ellipsoids, by name. Initialized on first use, and
/// never modified afterwards.
pub(crate) static ELLIPSOIDS: Lazy<BTreeMap<&'static str, Ellipsoid>> = Lazy::new(|| {
    ELLIPSOID_LIST
        .iter()
        .map(|&(name, a, rf)| (name, Ellipsoid { a, f: 1. / rf }))
        .collect()
});
