//! Grid operations given by textual definitions in the PROJ-like
//! `name key=value flag` style, e.g. "utm zone=32 south ellps=GRS80", or
//! "lcc lat_1=33 lat_2=45 lon_0=10".
//!
//! Each operation declares its *gamut*: The parameters it accepts, their
//! types, and their defaults. Parameters outside the gamut are warned about
//! and otherwise ignored.
use crate::projection::lcc::{LambertConformalConic, LccConfig};
use crate::projection::osgb::{NationalGrid, NationalGridCoordinate};
use crate::projection::tmerc::TransverseMercator;
use crate::projection::utm::Utm;
use crate::projection::{GridCoordinate, Hemisphere};
use crate::{Datum, Direction, Ellipsoid, Error, GeoPosition};
use log::{debug, error, warn};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// The `OpParameter` enumeration is used to represent which defining parameters
/// are valid for a given operation.
///
/// Required parameters have their default set to `None`, optional ones
/// provide a default of the proper type. Flags are true if present and
/// false if not, so they take no default.
#[derive(Debug)]
pub enum OpParameter {
    /// A flag is a boolean that is true if present, false if not
    Flag { key: &'static str },
    /// The natural numbers + zero (𝐍₀ in math terms)
    Natural {
        key: &'static str,
        default: Option<usize>,
    },
    /// Reals (𝐑 in math terms)
    Real {
        key: &'static str,
        default: Option<f64>,
    },
    /// Any kind of text
    Text {
        key: &'static str,
        default: Option<&'static str>,
    },
}

impl OpParameter {
    fn key(&self) -> &'static str {
        match self {
            OpParameter::Flag { key }
            | OpParameter::Natural { key, .. }
            | OpParameter::Real { key, .. }
            | OpParameter::Text { key, .. } => *key,
        }
    }
}

#[rustfmt::skip]
pub const UTM_GAMUT: [OpParameter; 3] = [
    OpParameter::Natural { key: "zone",  default: None },
    OpParameter::Flag    { key: "south" },
    OpParameter::Text    { key: "ellps", default: Some("WGS84") },
];

#[rustfmt::skip]
pub const TMERC_GAMUT: [OpParameter; 6] = [
    OpParameter::Text { key: "ellps", default: Some("GRS80") },
    OpParameter::Real { key: "lat_0", default: Some(0_f64) },
    OpParameter::Real { key: "lon_0", default: Some(0_f64) },
    OpParameter::Real { key: "k_0",   default: Some(1_f64) },
    OpParameter::Real { key: "x_0",   default: Some(0_f64) },
    OpParameter::Real { key: "y_0",   default: Some(0_f64) },
];

#[rustfmt::skip]
pub const OSGB_GAMUT: [OpParameter; 1] = [
    OpParameter::Text { key: "datum", default: Some("OSGB36") },
];

#[rustfmt::skip]
pub const LCC_GAMUT: [OpParameter; 8] = [
    OpParameter::Text { key: "ellps", default: Some("GRS80") },

    OpParameter::Real { key: "lat_1", default: None },
    OpParameter::Real { key: "lat_2", default: Some(f64::NAN) },
    OpParameter::Real { key: "lat_0", default: Some(f64::NAN) },
    OpParameter::Real { key: "lon_0", default: Some(0_f64) },

    OpParameter::Real { key: "k_0",   default: Some(1_f64) },
    OpParameter::Real { key: "x_0",   default: Some(0_f64) },
    OpParameter::Real { key: "y_0",   default: Some(0_f64) },
];

// ----- P A R A M E T E R S -----------------------------------------------------------

/// The parameters of a definition, type checked against a gamut
#[derive(Debug, Default)]
pub struct ParsedParameters {
    pub name: String,
    pub boolean: BTreeSet<&'static str>,
    pub natural: BTreeMap<&'static str, usize>,
    pub real: BTreeMap<&'static str, f64>,
    pub text: BTreeMap<&'static str, String>,
    pub ignored: Vec<String>,
}

// Accessors
impl ParsedParameters {
    pub fn boolean(&self, key: &str) -> bool {
        self.boolean.contains(key)
    }
    pub fn natural(&self, key: &str) -> Result<usize, Error> {
        if let Some(value) = self.natural.get(key) {
            return Ok(*value);
        }
        Err(Error::MissingParam(key.to_string()))
    }
    pub fn real(&self, key: &str) -> Result<f64, Error> {
        if let Some(value) = self.real.get(key) {
            return Ok(*value);
        }
        Err(Error::MissingParam(key.to_string()))
    }
    /// A real, with NaN (the "not given" default) mapped to `None`
    pub fn optional_real(&self, key: &str) -> Result<Option<f64>, Error> {
        let value = self.real(key)?;
        Ok(if value.is_nan() { None } else { Some(value) })
    }
    pub fn text(&self, key: &str) -> Result<String, Error> {
        if let Some(value) = self.text.get(key) {
            return Ok(value.to_string());
        }
        Err(Error::MissingParam(key.to_string()))
    }
    pub fn ellps(&self) -> Result<Ellipsoid, Error> {
        Ellipsoid::named(&self.text("ellps")?)
    }
    pub fn ignored(&self) -> &[String] {
        &self.ignored
    }
}

impl ParsedParameters {
    pub fn new(definition: &str, gamut: &[OpParameter]) -> Result<ParsedParameters, Error> {
        let mut locals = split_into_parameters(definition);
        let mut params = ParsedParameters {
            name: locals.remove("name").unwrap_or_default(),
            ..Default::default()
        };

        // Locate all accepted parameters, type check, and place them into
        // their proper bins
        for p in gamut {
            match *p {
                OpParameter::Flag { key } => {
                    if let Some(value) = locals.get(key) {
                        if value.is_empty() || value.to_lowercase() == "true" {
                            params.boolean.insert(key);
                            continue;
                        }
                        warn!("Cannot parse {key}:{value} as a boolean constant!");
                        return Err(Error::BadParam(key.to_string(), value.to_string()));
                    }
                    // Flags are always optional, i.e. implicitly false when not given
                    continue;
                }

                OpParameter::Natural { key, default } => {
                    if let Some(value) = locals.get(key) {
                        if let Ok(v) = value.parse::<usize>() {
                            params.natural.insert(key, v);
                            continue;
                        }
                        warn!("Cannot parse {key}:{value} as a natural number!");
                        return Err(Error::BadParam(key.to_string(), value.to_string()));
                    }

                    // Key not found - default given?
                    if let Some(value) = default {
                        params.natural.insert(key, value);
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }

                OpParameter::Real { key, default } => {
                    if let Some(value) = locals.get(key) {
                        if let Ok(v) = value.parse::<f64>() {
                            params.real.insert(key, v);
                            continue;
                        }
                        warn!("Cannot parse {key}:{value} as a real number");
                        return Err(Error::BadParam(key.to_string(), value.to_string()));
                    }

                    if let Some(value) = default {
                        params.real.insert(key, value);
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }

                OpParameter::Text { key, default } => {
                    if let Some(value) = locals.get(key) {
                        params.text.insert(key, value.to_string());
                        continue;
                    }

                    if let Some(value) = default {
                        params.text.insert(key, value.to_string());
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }
            };
        }

        // Params specified, but not used
        let accepted: BTreeSet<&str> = gamut.iter().map(OpParameter::key).collect();
        params.ignored = locals
            .into_keys()
            .filter(|key| !accepted.contains(key.as_str()))
            .collect();
        for key in &params.ignored {
            warn!("{}: ignoring unknown parameter '{key}'", params.name);
        }
        Ok(params)
    }
}

/// Split a definition into its key=value pairs. The first key without a
/// value is the name of the operation, stored under the key "name". Other
/// keys without values are flags, and get the value "true".
pub fn split_into_parameters(definition: &str) -> BTreeMap<String, String> {
    // Conflate contiguous whitespace, then remove whitespace around {"=", ","}
    let elements: Vec<_> = definition.split_whitespace().collect();
    let definition = elements
        .join(" ")
        .replace("= ", "=")
        .replace(", ", ",")
        .replace(" =", "=")
        .replace(" ,", ",");

    let mut params = BTreeMap::new();
    for element in definition.split_whitespace() {
        // Split a key=value-pair into key and value parts
        let (key, value) = match element.split_once('=') {
            Some((key, value)) => (key, value),
            None => (element, "true"),
        };

        // If the first arg is a key-without-value, it is the name of the operation
        if params.is_empty() && !element.contains('=') {
            params.insert(String::from("name"), String::from(key));
            continue;
        }

        params.insert(String::from(key), String::from(value));
    }
    params
}

// ----- O P E R A T I O N S -----------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Projector {
    Utm {
        utm: Utm,
        zone: usize,
        hemisphere: Hemisphere,
    },
    Tmerc(TransverseMercator),
    Osgb {
        grid: NationalGrid,
        datum: Datum,
    },
    Lcc(LambertConformalConic),
}

/// A grid operation instantiated from a textual definition. The forward
/// direction takes latitude and longitude in degrees to easting and
/// northing in meters, the inverse direction takes them back.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    definition: String,
    projector: Projector,
}

impl Operation {
    /// Instantiate one of the operations `utm`, `tmerc`, `osgb`, or `lcc`.
    pub fn new(definition: &str) -> Result<Operation, Error> {
        let name = split_into_parameters(definition)
            .remove("name")
            .ok_or_else(|| Error::Syntax(format!("missing operation name in '{definition}'")))?;

        let projector = match name.as_str() {
            "utm" => {
                let params = ParsedParameters::new(definition, &UTM_GAMUT)?;
                let zone = params.natural("zone")?;
                if !(1..=60).contains(&zone) {
                    return Err(Error::BadParam("zone".to_string(), zone.to_string()));
                }
                let hemisphere = if params.boolean("south") {
                    Hemisphere::South
                } else {
                    Hemisphere::North
                };
                Projector::Utm {
                    utm: Utm::new(params.ellps()?),
                    zone,
                    hemisphere,
                }
            }

            "tmerc" => {
                let params = ParsedParameters::new(definition, &TMERC_GAMUT)?;
                Projector::Tmerc(TransverseMercator::new(
                    params.ellps()?,
                    params.real("lat_0")?,
                    params.real("lon_0")?,
                    params.real("k_0")?,
                    params.real("x_0")?,
                    params.real("y_0")?,
                ))
            }

            "osgb" => {
                let params = ParsedParameters::new(definition, &OSGB_GAMUT)?;
                Projector::Osgb {
                    grid: NationalGrid::default(),
                    datum: Datum::named(&params.text("datum")?)?,
                }
            }

            "lcc" => {
                let params = ParsedParameters::new(definition, &LCC_GAMUT)?;
                let config = LccConfig {
                    standard_parallel_1: params.real("lat_1")?,
                    standard_parallel_2: params.optional_real("lat_2")?,
                    origin_latitude: params.optional_real("lat_0")?,
                    origin_longitude: params.real("lon_0")?,
                    scale: params.real("k_0")?,
                    false_easting: params.real("x_0")?,
                    false_northing: params.real("y_0")?,
                    ellipsoid: params.ellps()?,
                };
                Projector::Lcc(LambertConformalConic::new(&config)?)
            }

            _ => return Err(Error::NotFound(name, ": unknown operation".to_string())),
        };

        debug!("Operation: '{definition}'");
        Ok(Operation {
            definition: definition.trim().to_string(),
            projector,
        })
    }

    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Apply the operation to a single coordinate pair: (latitude, longitude)
    /// in the forward direction, (easting, northing) in the inverse.
    pub fn apply(&self, direction: Direction, a: f64, b: f64) -> Result<(f64, f64), Error> {
        match direction {
            Direction::Fwd => {
                let position = GeoPosition::new(a, b)?;
                self.forward(&position)
            }
            Direction::Inv => {
                let position = self.inverse(a, b)?;
                Ok((position.latitude(), position.longitude()))
            }
        }
    }

    fn forward(&self, position: &GeoPosition) -> Result<(f64, f64), Error> {
        match &self.projector {
            Projector::Utm {
                utm,
                zone,
                hemisphere,
            } => {
                let grid = utm.forward_in(position, *zone, *hemisphere)?;
                Ok((grid.easting(), grid.northing()))
            }
            Projector::Tmerc(tm) => {
                let grid = tm.forward(position)?;
                Ok((grid.easting, grid.northing))
            }
            Projector::Osgb { grid, datum } => {
                let coordinate = grid.forward_from(position, datum)?;
                Ok((coordinate.easting(), coordinate.northing()))
            }
            Projector::Lcc(lcc) => lcc.forward(position),
        }
    }

    fn inverse(&self, easting: f64, northing: f64) -> Result<GeoPosition, Error> {
        match &self.projector {
            Projector::Utm {
                utm,
                zone,
                hemisphere,
            } => utm.inverse(&GridCoordinate::new(*zone, *hemisphere, easting, northing)?),
            Projector::Tmerc(tm) => Ok(tm.inverse(easting, northing)?.0),
            Projector::Osgb { grid, datum } => {
                grid.inverse_to(&NationalGridCoordinate::new(easting, northing)?, datum)
            }
            Projector::Lcc(lcc) => lcc.inverse(easting, northing),
        }
    }
}

impl FromStr for Operation {
    type Err = Error;
    fn from_str(definition: &str) -> Result<Operation, Error> {
        Operation::new(definition)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.definition)
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction::{Fwd, Inv};
    use float_eq::assert_float_eq;

    #[test]
    fn splitting() {
        let params = split_into_parameters("lcc  lat_1 = 33 lat_2=45   south ellps=6378137, 298.25");
        assert_eq!(params["name"], "lcc");
        assert_eq!(params["lat_1"], "33");
        assert_eq!(params["lat_2"], "45");
        assert_eq!(params["south"], "true");
        assert_eq!(params["ellps"], "6378137,298.25");
        assert_eq!(params.len(), 5);

        // A definition starting with a key=value pair has no name
        let params = split_into_parameters("zone=32");
        assert!(!params.contains_key("name"));
    }

    #[test]
    fn parameters() -> Result<(), Error> {
        let params = ParsedParameters::new("lcc lat_1=57 lon_0=12 bogus=1", &LCC_GAMUT)?;
        assert_eq!(params.name, "lcc");
        assert_eq!(params.real("lat_1")?, 57.);
        assert_eq!(params.real("lon_0")?, 12.);
        assert_eq!(params.real("k_0")?, 1.);
        assert_eq!(params.optional_real("lat_2")?, None);
        assert_eq!(params.text("ellps")?, "GRS80");
        assert_eq!(params.ignored(), ["bogus".to_string()]);
        assert!(matches!(params.real("zone"), Err(Error::MissingParam(_))));

        let params = ParsedParameters::new("utm zone=33 south", &UTM_GAMUT)?;
        assert_eq!(params.natural("zone")?, 33);
        assert!(params.boolean("south"));

        assert!(matches!(
            ParsedParameters::new("utm south", &UTM_GAMUT),
            Err(Error::MissingParam(_))
        ));
        assert!(matches!(
            ParsedParameters::new("utm zone=-3", &UTM_GAMUT),
            Err(Error::BadParam(_, _))
        ));
        assert!(matches!(
            ParsedParameters::new("utm zone=32 south=maybe", &UTM_GAMUT),
            Err(Error::BadParam(_, _))
        ));
        assert!(matches!(
            ParsedParameters::new("lcc lat_1=north", &LCC_GAMUT),
            Err(Error::BadParam(_, _))
        ));
        Ok(())
    }

    #[test]
    fn utm() -> Result<(), Error> {
        let op = Operation::new("utm zone=32 ellps=GRS80")?;
        let (e, n) = op.apply(Fwd, 55., 12.)?;
        assert_float_eq!(e, 691_875.632_139_661, abs <= 1e-8);
        assert_float_eq!(n, 6_098_907.825_005_012, abs <= 1e-8);
        let (lat, lon) = op.apply(Inv, e, n)?;
        assert_float_eq!(lat, 55., abs <= 1e-12);
        assert_float_eq!(lon, 12., abs <= 1e-12);

        let op: Operation = "utm zone=32 south ellps=GRS80".parse()?;
        let (_, n) = op.apply(Fwd, -55., 12.)?;
        assert_float_eq!(n, 1e7 - 6_098_907.825_005_012, abs <= 1e-8);

        assert!(matches!(
            Operation::new("utm zone=61"),
            Err(Error::BadParam(_, _))
        ));
        assert!(matches!(
            op.apply(Inv, 2e6, 5e6),
            Err(Error::Range(_))
        ));
        Ok(())
    }

    #[test]
    fn tmerc() -> Result<(), Error> {
        // The national grid projection, by the Krüger series
        let op = Operation::new(
            "tmerc ellps=Airy1830 lat_0=49 lon_0=-2 k_0=0.9996012717 x_0=400000 y_0=-100000",
        )?;
        let (e, n) = op.apply(Fwd, 49., -2.)?;
        assert_float_eq!(e, 400_000., abs <= 1e-6);
        assert_float_eq!(n, -100_000., abs <= 1e-6);
        let (lat, lon) = op.apply(Inv, e, n)?;
        assert_float_eq!(lat, 49., abs <= 1e-10);
        assert_float_eq!(lon, -2., abs <= 1e-10);
        Ok(())
    }

    #[test]
    fn osgb() -> Result<(), Error> {
        let op = Operation::new("osgb")?;
        let (e, n) = op.apply(Fwd, 52.657_570_301_9, 1.717_921_580_7)?;
        assert_float_eq!(e, 651_409.903, abs <= 1e-3);
        assert_float_eq!(n, 313_177.270, abs <= 1e-3);

        let op = Operation::new("osgb datum=WGS84")?;
        let (e, n) = op.apply(Fwd, 52.65798, 1.71605)?;
        assert_float_eq!(e, 651_409.760_4, abs <= 1e-3);
        assert_float_eq!(n, 313_177.419_0, abs <= 1e-3);
        let (lat, lon) = op.apply(Inv, e, n)?;
        assert_float_eq!(lat, 52.65798, abs <= 1e-6);
        assert_float_eq!(lon, 1.71605, abs <= 1e-6);

        assert!(matches!(op.apply(Inv, -1., 0.), Err(Error::Range(_))));
        assert!(matches!(
            Operation::new("osgb datum=Atlantis"),
            Err(Error::NotFound(_, _))
        ));
        Ok(())
    }

    #[test]
    fn lcc() -> Result<(), Error> {
        let op = Operation::new("lcc lat_1=33 lat_2=45 lat_0=35 lon_0=10 x_0=12345 y_0=67890 k_0=0.99")?;
        let (x, y) = op.apply(Fwd, 40., 12.)?;
        assert_float_eq!(x, 180_509.395_832_998_9, abs <= 2e-6);
        assert_float_eq!(y, 616_503.886_385_977_5, abs <= 2e-6);
        let (lat, lon) = op.apply(Inv, x, y)?;
        assert_float_eq!(lat, 40., abs <= 1e-12);
        assert_float_eq!(lon, 12., abs <= 1e-12);

        assert!(matches!(
            Operation::new("lcc lon_0=10"),
            Err(Error::MissingParam(_))
        ));
        assert!(matches!(
            Operation::new("lcc lat_1=30 lat_2=-30"),
            Err(Error::BadParam(_, _))
        ));
        Ok(())
    }

    #[test]
    fn unknown_operations() {
        assert!(matches!(
            Operation::new("merc lat_ts=55"),
            Err(Error::NotFound(_, _))
        ));
        assert!(matches!(Operation::new("zone=32"), Err(Error::Syntax(_))));
        assert!(matches!(Operation::new(""), Err(Error::Syntax(_))));
        assert!(matches!(
            Operation::new("utm zone=32").map(|op| op.to_string()),
            Ok(definition) if definition == "utm zone=32"
        ));
    }
}
