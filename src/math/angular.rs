/// Degrees, minutes and seconds-with-decimals to degrees-with-decimals.
/// The sign is the sign bit of the degree component, so -0° 30' is given
/// as `dms_to_dd(-0., 30, 0.)`. Minutes and seconds are unsigned.
pub fn dms_to_dd(d: f64, m: u16, s: f64) -> f64 {
    let magnitude = d.abs() + (m as f64 + s.abs() / 60.) / 60.;
    if d.is_sign_negative() {
        -magnitude
    } else {
        magnitude
    }
}

/// normalize arbitrary angles to [-π, π):
pub fn normalize_symmetric(angle: f64) -> f64 {
    use std::f64::consts::PI;
    let angle = (angle + PI) % (2.0 * PI);
    angle - PI * angle.signum()
}

/// Normalize a longitude, in degrees, to the half open interval (-180, 180]
pub fn normalize_longitude(degrees: f64) -> f64 {
    let lon = degrees % 360.;
    if lon > 180. {
        return lon - 360.;
    }
    if lon <= -180. {
        return lon + 360.;
    }
    lon
}

/// Normalize a bearing, in degrees, to the half open interval [0, 360)
pub fn normalize_bearing(degrees: f64) -> f64 {
    let bearing = degrees.rem_euclid(360.);
    // rem_euclid may round up to the modulus itself for tiny negative input
    if bearing >= 360. {
        return 0.;
    }
    bearing
}

// ----- Tests ---------------------------------------------------------------------
