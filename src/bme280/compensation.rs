use core::time::Duration;

use super::calibration::CalibrationSet;
use super::Oversampling;

/// Length of the burst read covering the pressure, temperature and humidity data registers.
pub const BURST_LEN: usize = 8;

/// Upper bound of the humidity term before the final shift, i.e. 100 %RH in 1/1024 %RH << 12.
pub const HUMIDITY_LIMIT: i64 = 419_430_400;

// Measurement time, per the datasheet, in microseconds.
const MEASUREMENT_BASE_US: u64 = 1250;
const MEASUREMENT_PER_SAMPLE_US: u64 = 2300;
const MEASUREMENT_CHANNEL_OVERHEAD_US: u64 = 575;

/// Uncompensated ADC counts from a single measurement.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawSample {
    /// 20-bit pressure count.
    pub pressure: u32,
    /// 20-bit temperature count.
    pub temperature: u32,
    /// 16-bit humidity count.
    pub humidity: u16,
}

impl RawSample {
    /// Unpacks a burst read starting at the pressure MSB register (0xF7 - 0xFE).
    pub fn from_burst(bytes: &[u8; BURST_LEN]) -> RawSample {
        RawSample {
            pressure: ((bytes[0] as u32) << 16 | (bytes[1] as u32) << 8 | bytes[2] as u32) >> 4,
            temperature: ((bytes[3] as u32) << 16 | (bytes[4] as u32) << 8 | bytes[5] as u32) >> 4,
            humidity: (bytes[6] as u16) << 8 | bytes[7] as u16,
        }
    }
}

/// High resolution temperature carried from temperature compensation into pressure and humidity
/// compensation.
///
/// Can only be produced by [`compensate_temperature`], so each pressure or humidity value is tied
/// to the temperature of the same sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FineTemperature(i64);

impl FineTemperature {
    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Compensated values in the sensor's fixed-point units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompensatedSample {
    /// Temperature in 1/100 °C.
    pub temperature: i64,
    /// Pressure in 1/256 Pa. Zero when the calibration makes the pressure undefined.
    pub pressure: i64,
    /// Relative humidity in 1/1024 %RH.
    pub humidity: i64,
}

/// Returns how long a forced measurement takes with the given oversampling on all three channels.
///
/// Temperature, pressure and humidity each add `2300us * 2^mode`. Pressure and humidity add a
/// further 575us each.
pub fn settle_time(oversampling: Oversampling) -> Duration {
    let per_channel = MEASUREMENT_PER_SAMPLE_US * (1u64 << oversampling as u8);
    let temperature = MEASUREMENT_BASE_US + per_channel;
    let pressure = per_channel + MEASUREMENT_CHANNEL_OVERHEAD_US;
    let humidity = per_channel + MEASUREMENT_CHANNEL_OVERHEAD_US;
    Duration::from_micros(temperature + pressure + humidity)
}

/// Compensates all three channels of one sample.
///
/// Temperature always runs first, since its fine temperature feeds the other two.
pub fn compensate(raw: &RawSample, calibration: &CalibrationSet) -> CompensatedSample {
    let (temperature, t_fine) = compensate_temperature(raw.temperature, calibration);
    CompensatedSample {
        temperature,
        pressure: compensate_pressure(raw.pressure, t_fine, calibration),
        humidity: compensate_humidity(raw.humidity, t_fine, calibration),
    }
}

/// Returns the temperature in 1/100 °C along with the fine temperature for this sample.
pub fn compensate_temperature(
    raw_temperature: u32,
    calibration: &CalibrationSet,
) -> (i64, FineTemperature) {
    let adc = raw_temperature as i64;
    let t1 = calibration.t1 as i64;
    let t2 = calibration.t2 as i64;
    let t3 = calibration.t3 as i64;

    let var1 = (((adc >> 3) - (t1 << 1)) * t2) >> 11;
    let var2 = (((((adc >> 4) - t1) * ((adc >> 4) - t1)) >> 12) * t3) >> 14;
    let t_fine = var1 + var2;
    ((t_fine * 5 + 128) >> 8, FineTemperature(t_fine))
}

/// Returns the pressure in 1/256 Pa (Q24.8).
///
/// Returns 0 instead of dividing by zero when `p1` cancels the denominator.
pub fn compensate_pressure(
    raw_pressure: u32,
    t_fine: FineTemperature,
    calibration: &CalibrationSet,
) -> i64 {
    let p1 = calibration.p1 as i64;
    let p2 = calibration.p2 as i64;
    let p3 = calibration.p3 as i64;
    let p4 = calibration.p4 as i64;
    let p5 = calibration.p5 as i64;
    let p6 = calibration.p6 as i64;
    let p7 = calibration.p7 as i64;
    let p8 = calibration.p8 as i64;
    let p9 = calibration.p9 as i64;

    let mut var1 = t_fine.0 - 128_000;
    let mut var2 = var1 * var1 * p6;
    var2 += (var1 * p5) << 17;
    var2 += p4 << 35;
    var1 = ((var1 * var1 * p3) >> 8) + ((var1 * p2) << 12);
    var1 = (((1i64 << 47) + var1) * p1) >> 33;
    if var1 == 0 {
        return 0;
    }

    let mut p = 1_048_576 - raw_pressure as i64;
    p = (((p << 31) - var2) * 3125) / var1;
    var1 = (p9 * (p >> 13) * (p >> 13)) >> 25;
    var2 = (p8 * p) >> 19;
    ((p + var1 + var2) >> 8) + (p7 << 4)
}

/// Returns the relative humidity in 1/1024 %RH, clamped to 0-100 %RH.
pub fn compensate_humidity(
    raw_humidity: u16,
    t_fine: FineTemperature,
    calibration: &CalibrationSet,
) -> i64 {
    let adc = raw_humidity as i64;
    let h1 = calibration.h1 as i64;
    let h2 = calibration.h2 as i64;
    let h3 = calibration.h3 as i64;
    let h4 = calibration.h4 as i64;
    let h5 = calibration.h5 as i64;
    let h6 = calibration.h6 as i64;

    let mut h = t_fine.0 - 76_800;
    h = ((((adc << 14) - (h4 << 20) - (h5 * h)) + 16_384) >> 15)
        * (((((((h * h6) >> 10) * (((h * h3) >> 11) + 32_768)) >> 10) + 2_097_152) * h2 + 8192)
            >> 14);
    h -= ((((h >> 15) * (h >> 15)) >> 7) * h1) >> 4;
    h.clamp(0, HUMIDITY_LIMIT) >> 12
}
