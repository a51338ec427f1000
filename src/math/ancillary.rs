use super::ConvergenceOutcome;

/// The Gudermannian function (often written as gd), is the work horse for computations involving
/// the isometric latitude (i.e. the vertical coordinate of the Mercator projection)
pub mod gudermannian {
    pub fn fwd(arg: f64) -> f64 {
        arg.sinh().atan()
    }

    pub fn inv(arg: f64) -> f64 {
        arg.tan().asinh()
    }
}

/// ts is the equivalent of Charles Karney's PROJ function `pj_tsfn`.
/// It determines the function ts(phi) as defined in Snyder (1987),
/// Eq. (7-10)
///
/// ts is the exponential of the negated isometric latitude, i.e.
/// exp(-𝜓), but evaluated in a numerically more stable way than
/// the naive ellps.isometric_latitude(...).exp()
///
/// Inputs:
///   (sin 𝜙, cos 𝜙): trigs of geographic latitude
///   e: eccentricity of the ellipsoid
/// Output:
///   ts: exp(-𝜓)  =  1 / (tan 𝜒 + sec 𝜒)
///   where 𝜓 is the isometric latitude (dimensionless)
///   and 𝜒 is the conformal latitude (radians)
pub fn ts(sincos: (f64, f64), e: f64) -> f64 {
    // exp(-asinh(tan 𝜙))
    //    = 1 / (tan 𝜙 + sec 𝜙)
    //    = cos 𝜙 / (1 + sin 𝜙)  good for 𝜙 > 0
    //    = (1 - sin 𝜙) / cos 𝜙  good for 𝜙 < 0
    let factor = if sincos.0 > 0. {
        sincos.1 / (1. + sincos.0)
    } else {
        (1. - sincos.0) / sincos.1
    };
    (e * (e * sincos.0).atanh()).exp() * factor
}

/// Snyder (1982) eq. 12-15, PROJ's pj_msfn()
pub fn pj_msfn(sincos: (f64, f64), es: f64) -> f64 {
    sincos.1 / (1. - sincos.0 * sincos.0 * es).sqrt()
}

/// Ancillary function for computing the inverse isometric latitude. Follows
/// [Karney, 2011](crate::Bibliography::Kar11), and the PROJ implementation
/// in proj/src/phi2.cpp.
///
/// Given τ' = sinh 𝜓, returns τ = tan 𝜙, by Newton iteration. The outcome
/// records whether the iteration met its tolerance within budget.
pub fn sinhpsi_to_tanphi(taup: f64, e: f64) -> ConvergenceOutcome<f64> {
    // min iterations = 1, max iterations = 2; mean = 1.954
    const MAX_ITER: usize = 5;

    // If this shows unbearable, we can just also assume IEEE-64 bit
    // arithmetic, and set rooteps = 0.000000014901161193847656
    let rooteps: f64 = f64::EPSILON.sqrt();
    let tol: f64 = rooteps / 10.; // the criterion for Newton's method
    let tmax: f64 = 2. / rooteps; // threshold for large arg limit exact

    let e2m = 1. - e * e;
    let stol = tol * taup.abs().max(1.0);

    // The initial guess.  70 corresponds to chi = 89.18 deg
    let mut tau = if taup.abs() > 70. {
        taup * (e * e.atanh()).exp()
    } else {
        taup / e2m
    };

    if tau.is_nan() {
        return ConvergenceOutcome {
            value: tau,
            iterations: 0,
            converged: false,
        };
    }

    // Handle +/-inf, and the large arg limit
    if tau.abs() >= tmax {
        return ConvergenceOutcome {
            value: tau,
            iterations: 0,
            converged: true,
        };
    }

    for i in 1..=MAX_ITER {
        let tau1 = (1. + tau * tau).sqrt();
        let sig = (e * (e * tau / tau1).atanh()).sinh();
        let taupa = (1. + sig * sig).sqrt() * tau - sig * tau1;
        let dtau =
            (taup - taupa) * (1. + e2m * (tau * tau)) / (e2m * tau1 * (1. + taupa * taupa).sqrt());
        tau += dtau;

        if tau.is_nan() {
            break;
        }
        if dtau.abs() < stol {
            return ConvergenceOutcome {
                value: tau,
                iterations: i,
                converged: true,
            };
        }
    }

    ConvergenceOutcome {
        value: tau,
        iterations: MAX_ITER,
        converged: false,
    }
}

// ----- Tests ---------------------------------------------------------------------
