//! Miscellaneous math functions for general use

/// Free functions used in more than one module of the crate.
pub mod ancillary;
pub use ancillary::gudermannian;

/// Free functions for handling and converting between
/// different representations of angles.
pub mod angular;

/// Fourier- and Taylor series
pub mod series;
pub use series::fourier;
pub use series::taylor;

pub use series::taylor::fourier_coefficients;
pub use series::taylor::horner;
pub use series::FourierCoefficients;
pub use series::PolynomialCoefficients;

use crate::Error;

/// The result of a bounded fixed-point iteration: The final value,
/// the number of iterations spent getting there, and whether the
/// stop criterion was actually met.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvergenceOutcome<T> {
    pub value: T,
    pub iterations: usize,
    pub converged: bool,
}

impl<T> ConvergenceOutcome<T> {
    /// Surface an unconverged outcome as an [`Error::Convergence`],
    /// so approximate values never escape the solver.
    pub fn into_result(self, operation: &'static str) -> Result<T, Error> {
        if self.converged {
            return Ok(self.value);
        }
        log::warn!("{operation}: no convergence after {} iterations", self.iterations);
        Err(Error::Convergence {
            operation,
            iterations: self.iterations,
        })
    }
}

// ----- Tests ---------------------------------------------------------------------
