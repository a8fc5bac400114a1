use super::consts::{EPS_12, FRAC_PI_2, PI, TAU};

/// Reflect a latitude into the +/- PI/2 range
pub(crate) fn adjlat(lat: f64) -> f64 {
    if lat.abs() <= FRAC_PI_2 {
        lat
    } else {
        lat - PI.copysign(lat)
    }
}

/// Reduce argument to range +/- PI
pub(crate) fn adjlon(mut lon: f64) -> f64 {
    // Let lon slightly overshoot,
    // to avoid spurious sign switching at the date line
    if lon.abs() >= PI + EPS_12 {
        // adjust to 0..2pi rad
        lon += PI;

        // remove integral # of 'revolutions'
        lon -= TAU * (lon / TAU).floor();

        // adjust back to -pi..pi rad
        lon -= PI;
    }
    lon
}
