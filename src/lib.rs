#![no_std]

/// Driver for the Bosch BME280 temperature, pressure and humidity sensor.
///
/// Refer to [this datasheet](https://www.bosch-sensortec.com/media/boschsensortec/downloads/datasheets/bst-bme280-ds002.pdf)
/// for more information about the device.
pub mod bme280;
/// Quantities derived from temperature, humidity and altitude.
pub mod psychrometrics;
/// The interface shared by the polled sensors.
pub mod sensor;
/// Timing helpers for a simple polling loop.
pub mod ticker;

pub use sensor::Sensor;
