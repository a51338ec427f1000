//! *Geodesy on the sphere and the ellipsoid, and the grids built on top of them*.
//!
//! The crate provides three numerical engines:
//!
//! - An ellipsoidal geodesic solver ([`Vincenty`]), solving the direct and
//!   inverse problems of geodesy on any ellipsoid of revolution,
//! - Spherical "n-vector" geodesy ([`Spherical`], [`NVector`]), which avoids the
//!   trigonometric singularities at the poles and the antipodes,
//! - Forward and inverse grid projections: the transverse Mercator and its zoned
//!   UTM incarnation ([`TransverseMercator`], [`Utm`]), the MGRS
//!   alphanumeric grid ([`GridReference`]), the British national grid
//!   ([`NationalGrid`]), and the Lambert conformal conic ([`LambertConformalConic`]).
//!
//! Ellipsoids and datums are read-only static tables, looked up by name.
//! All computations are pure functions over immutable values, so everything
//! may be called concurrently from any number of threads.
//!
//! ```rust
//! use geogrid::prelude::*;
//! # fn main() -> Result<(), Error> {
//! let vincenty = Vincenty::new(Ellipsoid::named("WGS84")?);
//! let land_s_end = GeoPosition::new(50.06632, -5.71475)?;
//! let john_o_groats = GeoPosition::new(58.64402, -3.07009)?;
//! let d = land_s_end.distance_to(&john_o_groats, &vincenty)?;
//! assert!((d - 969_954.166).abs() < 1e-3);
//! # Ok(())
//! # }
//! ```

pub mod bibliography;
pub mod coordinate;
pub mod datum;
pub mod ellipsoid;
pub mod geodesic;
pub mod math;
pub mod op;
pub mod projection;

pub use bibliography::Bibliography;
pub use coordinate::nvector::NVector;
pub use coordinate::GeoPosition;
pub use datum::Datum;
pub use datum::Helmert;
pub use ellipsoid::Ellipsoid;
pub use geodesic::spherical::Path;
pub use geodesic::spherical::Spherical;
pub use geodesic::vincenty::DirectSolution;
pub use geodesic::vincenty::InverseSolution;
pub use geodesic::vincenty::Vincenty;
pub use geodesic::GeodesicModel;
pub use math::ConvergenceOutcome;
pub use op::Operation;
pub use projection::lcc::LambertConformalConic;
pub use projection::lcc::LccConfig;
pub use projection::mgrs::GridReference;
pub use projection::osgb::NationalGrid;
pub use projection::osgb::NationalGridCoordinate;
pub use projection::osgb::NationalGridReference;
pub use projection::tmerc::GridPoint;
pub use projection::tmerc::TransverseMercator;
pub use projection::utm::Utm;
pub use projection::GridCoordinate;
pub use projection::Hemisphere;

/// The bread-and-butter, shrink-wrapped and ready to use
pub mod prelude {
    pub use crate::Direction;
    pub use crate::Direction::Fwd;
    pub use crate::Direction::Inv;
    pub use crate::Error;
    pub use crate::{Datum, Ellipsoid, GeoPosition, NVector};
    pub use crate::{GeodesicModel, Path, Spherical, Vincenty};
    pub use crate::{GridCoordinate, GridReference, Hemisphere};
    pub use crate::{LambertConformalConic, LccConfig};
    pub use crate::{NationalGrid, NationalGridCoordinate, NationalGridReference};
    pub use crate::{TransverseMercator, Utm};
}

/// The *Rust Geodesy* errors, extended with the failure modes of the
/// geodesic solvers and the grid projections.
///
/// The four numerical failure modes, [`Domain`](Error::Domain),
/// [`Convergence`](Error::Convergence), [`ZoneMismatch`](Error::ZoneMismatch),
/// and [`Range`](Error::Range), are always reported as such, and never
/// masked by an approximate result.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("{0} not found{1}")]
    NotFound(String, String),

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("missing required parameter {0}")]
    MissingParam(String),

    #[error("malformed value for parameter {0}: {1}")]
    BadParam(String, String),

    /// Latitude, longitude, or grid value outside the valid domain of an operation
    #[error("outside domain: {0}")]
    Domain(String),

    /// An iterative solver exhausted its iteration budget
    #[error("{operation} failed to converge after {iterations} iterations")]
    Convergence {
        operation: &'static str,
        iterations: usize,
    },

    /// The letters of a grid reference do not belong to the zone it claims
    #[error("zone mismatch: {0}")]
    ZoneMismatch(String),

    /// Easting or northing outside the defined rectangle of a projection
    #[error("out of range: {0}")]
    Range(String),
}

/// `Fwd`: Indicate that a two-way operator, function, or method,
/// should run in the *forward* direction.
/// `Inv`: Indicate that a two-way operator, function, or method,
/// should run in the *inverse* direction.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Fwd,
    Inv,
}
