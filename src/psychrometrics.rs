/// Magnus coefficient over water.
pub const MAGNUS_B: f32 = 17.62;
/// Magnus coefficient over water, in °C.
pub const MAGNUS_C: f32 = 243.12;

/// Standard sea level pressure, in hPa.
pub const SEA_LEVEL_PRESSURE_HPA: f32 = 1013.25;
/// Height of the homogeneous standard atmosphere (T0 / temperature gradient), in meters.
pub const ATMOSPHERE_HEIGHT_M: f32 = 44330.0;
/// Barometric exponent, kappa / (kappa - 1).
pub const BAROMETRIC_EXPONENT: f32 = 5.255;

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 1.8 + 32.0
}

/// Computes the dew point in °C using the Magnus approximation.
///
/// Returns `None` when the relative humidity is not positive, since the logarithm is undefined
/// there.
pub fn dew_point(celsius: f32, relative_humidity: f32) -> Option<f32> {
    if relative_humidity.is_nan() || relative_humidity <= 0.0 {
        return None;
    }
    let k = libm::logf(relative_humidity / 100.0) + MAGNUS_B * celsius / (MAGNUS_C + celsius);
    let dew_point = MAGNUS_C * k / (MAGNUS_B - k);
    if dew_point.is_finite() {
        Some(dew_point)
    } else {
        None
    }
}

/// Computes the standard atmosphere pressure, in hPa, at the given altitude in meters above sea
/// level.
///
/// pLocal = P0 * (1 - h / H0) ^ K0
///
/// This only depends on the altitude. It does not reduce a measured station pressure to sea level.
pub fn local_normal_pressure(altitude: f32) -> f32 {
    SEA_LEVEL_PRESSURE_HPA * libm::powf(1.0 - altitude / ATMOSPHERE_HEIGHT_M, BAROMETRIC_EXPONENT)
}
