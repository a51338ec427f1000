use super::*;
use crate::math::ConvergenceOutcome;
use std::f64::consts::PI;

// ----- Geodesics -------------------------------------------------------------
impl Ellipsoid {
    /// For general geodesics, we use the algorithm by Vincenty
    /// ([1975](crate::Bibliography::Vin75)), with updates by the same author
    /// ([1976](crate::Bibliography::Vin76)).
    /// The Vincenty algorithm is relatively simple to implement, but for near-antipodal
    /// cases, it suffers from lack of convergence and loss of accuracy.
    ///
    /// Karney ([2013](crate::Bibliography::Kar13))
    /// presented an algorithm which is exact to machine precision, and converges everywhere.
    ///
    /// The direct problem: Given the point of origin, `from` = (𝜙, 𝜆), an azimuth and
    /// a distance, find the destination. All angles in radians. The returned value
    /// is (𝜙₂, 𝜆₂, return azimuth), with 𝜆₂ not normalized.
    ///
    /// `epsilon` is the stop criterion for the σ iteration, and `max_iterations`
    /// its budget.
    #[must_use]
    #[allow(non_snake_case)]
    pub fn geodesic_fwd(
        &self,
        from: (f64, f64),
        azimuth: f64,
        distance: f64,
        epsilon: f64,
        max_iterations: usize,
    ) -> ConvergenceOutcome<[f64; 3]> {
        // Coordinates of the point of origin, P1
        let (B1, L1) = from;

        // The latitude of P1 projected onto the auxiliary sphere
        let U1 = self.latitude_geographic_to_reduced(B1);
        let (U1sin, U1cos) = U1.sin_cos();

        // σ_1, here ss1, is the angular distance on the aux sphere from P1 to equator
        let (azisin, azicos) = azimuth.sin_cos();
        let ss1 = ((1. - self.f) * B1.tan()).atan2(azicos);

        // α, the forward azimuth of the geodesic at equator
        let aasin = U1cos * azisin;
        let aasin2 = aasin * aasin;
        let aacos2 = 1. - aasin2;

        // A and B according to Vincenty's update (1976)
        let eps = self.second_eccentricity_squared();
        let us = aacos2 * eps;
        let t = (1. + us).sqrt();
        let k1 = (t - 1.) / (t + 1.);
        let A = (1. + k1 * k1 / 4.) / (1. - k1);
        let B = k1 * (1. - 3. * k1 * k1 / 8.);

        // Initial estimate for σ, the distance on the auxiliary sphere
        let b = self.semiminor_axis();
        let mut ss = distance / (b * A);
        let mut i = 0_usize;
        let mut converged = false;

        while i < max_iterations {
            i += 1;

            // 2σ_m, where σ_m is the latitude of the midpoint on the aux sphere
            let ssmx2cos = (2. * ss1 + ss).cos();

            // dσ = dss: The correction term for σ
            let ssmx2cos2 = ssmx2cos * ssmx2cos;
            let t1 = -1. + 2. * ssmx2cos2;
            let t2 = -3. + 4. * ssmx2cos2;
            let (sssin, sscos) = ss.sin_cos();
            let t3 = -3. + 4. * sssin * sssin;
            let dss = B * sssin * (ssmx2cos + B / 4. * (sscos * t1 - B / 6. * ssmx2cos * t2 * t3));

            let prevss = ss;
            ss = distance / (b * A) + dss;

            // Stop criterion: Last update of σ made little difference
            if (prevss - ss).abs() < epsilon {
                converged = true;
                break;
            }
        }

        let ssmx2cos = (2. * ss1 + ss).cos();
        let t1 = -1. + 2. * ssmx2cos * ssmx2cos;

        // B2: Latitude of destination
        let (sssin, sscos) = ss.sin_cos();
        let t4 = U1cos * azicos * sssin;
        let t5 = U1cos * azicos * sscos;
        let B2 = (U1sin * sscos + t4).atan2((1. - self.f) * aasin.hypot(U1sin * sssin - t5));

        // L2: Longitude of destination
        let ll = (sssin * azisin).atan2(U1cos * sscos - U1sin * sssin * azicos);
        let C = (4. + self.f * (4. - 3. * aacos2)) * self.f * aacos2 / 16.;
        let L = ll - (1. - C) * self.f * aasin * (ss + C * sssin * (ssmx2cos + C * sscos * t1));
        let L2 = L1 + L;

        // Return azimuth
        let aa2 = aasin.atan2(U1cos * sscos * azicos - U1sin * sssin);

        ConvergenceOutcome {
            value: [B2, L2, aa2],
            iterations: i,
            converged,
        }
    }

    /// The inverse problem: Given two points `from` = (𝜙₁, 𝜆₁) and `to` = (𝜙₂, 𝜆₂),
    /// in radians, find the distance and the azimuths at both ends.
    ///
    /// The returned value is (distance, forward azimuth, return azimuth),
    /// azimuths in radians in (-π, π].
    ///
    /// λ, the longitude difference on the auxiliary sphere, is found by
    /// fixed point iteration, stopping when |Δλ| < `epsilon`. The outcome
    /// is marked as unconverged when the budget of `max_iterations` is spent,
    /// when λ runs beyond ±π, or when the auxiliary sphere distance degenerates:
    /// these are the symptoms of the near-antipodal case.
    ///
    /// Coincident points are handled up front: zero distance, zero azimuths.
    #[must_use]
    #[allow(non_snake_case)] // allow math-like notation
    pub fn geodesic_inv(
        &self,
        from: (f64, f64),
        to: (f64, f64),
        epsilon: f64,
        max_iterations: usize,
    ) -> ConvergenceOutcome<[f64; 3]> {
        let (B1, L1) = from;
        let (B2, L2) = to;
        let L = crate::math::angular::normalize_symmetric(L2 - L1);

        // Below the micrometer level, we don't care about directions
        if L.hypot(B2 - B1) < 1e-15 {
            return ConvergenceOutcome {
                value: [0.; 3],
                iterations: 0,
                converged: true,
            };
        }

        let U1 = self.latitude_geographic_to_reduced(B1);
        let U2 = self.latitude_geographic_to_reduced(B2);

        let (U1sin, U1cos) = U1.sin_cos();
        let (U2sin, U2cos) = U2.sin_cos();
        let eps = self.second_eccentricity_squared();

        // Initial estimate for λ, the longitude on the auxiliary sphere
        let mut ll = L;

        let mut aacos2 = 0.;
        let mut ssmx2cos = 0.;
        let mut sscos = 0.;
        let mut sssin = 0.;
        let mut ss = 0.;

        let mut i = 0_usize;
        let mut converged = false;

        while i < max_iterations {
            i += 1;

            // σ, the angular separation between the points
            let (llsin, llcos) = ll.sin_cos();
            let t1 = U2cos * llsin;
            let t2 = U1cos * U2sin - U2cos * U1sin * llcos;
            sssin = t1.hypot(t2);
            if sssin == 0. {
                break;
            }
            sscos = U1sin * U2sin + U1cos * U2cos * llcos;
            ss = sssin.atan2(sscos);

            // α, the forward azimuth of the geodesic at equator
            let aasin = U1cos * U2cos * llsin / sssin;
            aacos2 = 1. - aasin * aasin;

            // cosine of 2 times σ_m, the angular separation from the midpoint to the equator.
            // On equatorial lines, cos²α = 0, and the midpoint term vanishes.
            ssmx2cos = if aacos2 == 0. {
                0.
            } else {
                sscos - 2. * U1sin * U2sin / aacos2
            };
            let C = (4. + self.f * (4. - 3. * aacos2)) * self.f * aacos2 / 16.;
            let ll_next = L
                + (1. - C)
                    * self.f
                    * aasin
                    * (ss + C * sssin * (ssmx2cos + C * sscos * (-1. + 2. * ssmx2cos * ssmx2cos)));
            if ll_next.abs() > PI {
                break;
            }
            let dl = (ll - ll_next).abs();
            ll = ll_next;
            if dl < epsilon {
                converged = true;
                break;
            }
        }

        if !converged {
            return ConvergenceOutcome {
                value: [f64::NAN; 3],
                iterations: i,
                converged,
            };
        }

        // A and B according to Vincenty's update (1976)
        let us = aacos2 * eps;
        let t = (1. + us).sqrt();
        let k1 = (t - 1.) / (t + 1.);
        let A = (1. + k1 * k1 / 4.) / (1. - k1);
        let B = k1 * (1. - 3. * k1 * k1 / 8.);

        // The difference between the dist on the aux sphere and on the ellipsoid.
        let t1 = -1. + 2. * ssmx2cos * ssmx2cos;
        let t2 = -3. + 4. * sssin * sssin;
        let t3 = -3. + 4. * ssmx2cos * ssmx2cos;
        let dss = B * sssin * (ssmx2cos + B / 4. * (sscos * t1 - B / 6. * ssmx2cos * t2 * t3));

        // Distance, forward azimuth, return azimuth
        let (llsin, llcos) = ll.sin_cos();
        let s = self.semiminor_axis() * A * (ss - dss);
        let a1 = (U2cos * llsin).atan2(U1cos * U2sin - U1sin * U2cos * llcos);
        let a2 = (U1cos * llsin).atan2(-U1sin * U2cos + U1cos * U2sin * llcos);
        ConvergenceOutcome {
            value: [s, a1, a2],
            iterations: i,
            converged,
        }
    }
}

// ----- Tests ---------------------------------------------------------------------
