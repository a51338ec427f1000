/// The order of the Fourier series used to compute e.g. the Krüger series
pub const POLYNOMIAL_ORDER: usize = 6;

/// Two upper triangular matrices of polynomium coefficients for computing
/// the Fourier coefficients for (a.o.) the transverse Mercator projection
#[derive(Clone, Copy, Debug, Default)]
pub struct PolynomialCoefficients {
    pub fwd: [[f64; POLYNOMIAL_ORDER]; POLYNOMIAL_ORDER],
    pub inv: [[f64; POLYNOMIAL_ORDER]; POLYNOMIAL_ORDER],
}

/// The Fourier coefficients used when computing e.g. the Krüger series
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FourierCoefficients {
    pub fwd: [f64; POLYNOMIAL_ORDER],
    pub inv: [f64; POLYNOMIAL_ORDER],
}

impl FourierCoefficients {
    /// The coefficients 2j·cⱼ of the term-wise derivative of the series
    /// Σ cⱼ sin(2j·arg). Used for the grid convergence and scale of the
    /// transverse Mercator.
    #[must_use]
    pub fn differentiated(&self) -> FourierCoefficients {
        let mut result = FourierCoefficients::default();
        for j in 0..POLYNOMIAL_ORDER {
            let factor = 2. * (j + 1) as f64;
            result.fwd[j] = factor * self.fwd[j];
            result.inv[j] = factor * self.inv[j];
        }
        result
    }
}

// --- Taylor series polynomium evaluation ----

pub mod taylor {
    use super::FourierCoefficients;
    use super::PolynomialCoefficients;
    use super::POLYNOMIAL_ORDER;

    /// Compute Fourier coefficients by evaluating their corresponding
    /// Taylor polynomiums
    pub fn fourier_coefficients(
        arg: f64,
        coefficients: &PolynomialCoefficients,
    ) -> FourierCoefficients {
        let mut result = FourierCoefficients::default();
        for i in 0..POLYNOMIAL_ORDER {
            result.fwd[i] = arg * horner(arg, &coefficients.fwd[i]);
            result.inv[i] = arg * horner(arg, &coefficients.inv[i]);
        }
        result
    }

    /// Evaluate Σ cᵢ · xⁱ using Horner's scheme
    pub fn horner(arg: f64, coefficients: &[f64]) -> f64 {
        let mut coefficients = coefficients.iter().rev();
        let Some(highest) = coefficients.next() else {
            return 0.;
        };
        let mut value = *highest;
        for c in coefficients {
            value = value.mul_add(arg, *c);
        }
        value
    }
}

// --- Fourier series summation using Clenshaw's recurrence ---

pub mod fourier {

    /// Evaluate Σ cᵢ sin( i · arg ), for i ∈ {order, ... , 1}, using Clenshaw summation
    pub fn sin(arg: f64, coefficients: &[f64]) -> f64 {
        let (sin_arg, cos_arg) = arg.sin_cos();
        let x = 2.0 * cos_arg;
        let mut c0 = 0.0;
        let mut c1 = 0.0;

        for c in coefficients.iter().rev() {
            (c1, c0) = (c0, x.mul_add(c0, c - c1));
        }
        sin_arg * c0
    }

    /// Evaluate Σ cᵢ cos( i · arg ), for i ∈ {order, ... , 1}, using Clenshaw summation
    pub fn cos(arg: f64, coefficients: &[f64]) -> f64 {
        let cos_arg = arg.cos();
        let x = 2.0 * cos_arg;
        let mut c0 = 0.0;
        let mut c1 = 0.0;

        for c in coefficients.iter().rev() {
            (c1, c0) = (c0, x.mul_add(c0, c - c1));
        }
        cos_arg * c0 - c1
    }

    // The Clenshaw recurrence for complex arguments, shared by the complex
    // sine and cosine sums. Returns the final two recurrence values, and the
    // trigonometric and hyperbolic factors of the argument.
    #[allow(unused_assignments)] // For symmetric initialization of hr2, hi2
    fn complex_clenshaw(arg: [f64; 2], coefficients: &[f64]) -> ([f64; 4], [f64; 4]) {
        let (sin_r, cos_r) = arg[0].sin_cos();
        let sinh_i = arg[1].sinh();
        let cosh_i = arg[1].cosh();
        let r = 2. * cos_r * cosh_i;
        let i = -2. * sin_r * sinh_i;
        let factors = [sin_r, cos_r, sinh_i, cosh_i];
        let mut coefficients = coefficients.iter().rev();

        // Handle zero length series by conventionally assigning them the sum of 0
        let Some(c) = coefficients.next() else {
            return ([0.; 4], factors);
        };

        // Initialize the recurrence coefficients
        let (mut hr2, mut hr1, mut hr) = (0., 0., *c);
        let (mut hi2, mut hi1, mut hi) = (0., 0., 0.);

        for c in coefficients {
            // Rotate the recurrence coefficients
            (hr2, hi2, hr1, hi1) = (hr1, hi1, hr, hi);

            // Update the recurrent sum
            hr = -hr2 + r * hr1 - i * hi1 + c;
            hi = -hi2 + i * hr1 + r * hi1;
        }
        ([hr, hi, hr1, hi1], factors)
    }

    /// Evaluate Σ cᵢ Sin( i · arg ), for i ∈ {order, ... , 1}, using Clenshaw summation.
    /// i.e. a series of complex sines with real coefficients
    pub fn complex_sin(arg: [f64; 2], coefficients: &[f64]) -> [f64; 2] {
        let ([hr, hi, _, _], [sin_r, cos_r, sinh_i, cosh_i]) =
            complex_clenshaw(arg, coefficients);

        // Finalize the sum: Sin(arg) · h
        let r = sin_r * cosh_i;
        let i = cos_r * sinh_i;
        [r * hr - i * hi, r * hi + i * hr]
    }

    /// Evaluate Σ cᵢ Cos( i · arg ), for i ∈ {order, ... , 1}, using Clenshaw summation.
    /// i.e. a series of complex cosines with real coefficients
    pub fn complex_cos(arg: [f64; 2], coefficients: &[f64]) -> [f64; 2] {
        let ([hr, hi, hr1, hi1], [sin_r, cos_r, sinh_i, cosh_i]) =
            complex_clenshaw(arg, coefficients);

        // Finalize the sum: Cos(arg) · h - h₁
        let r = cos_r * cosh_i;
        let i = -sin_r * sinh_i;
        [r * hr - i * hi - hr1, r * hi + i * hr - hi1]
    }
}

// ----- Tests ---------------------------------------------------------------------
