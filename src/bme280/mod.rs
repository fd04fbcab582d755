use core::fmt;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{debug, trace};

use crate::psychrometrics;
use crate::sensor::Sensor;

/// Unpacking of the factory trim values.
pub mod calibration;
/// Raw sample unpacking and the vendor's fixed-point compensation formulas.
pub mod compensation;

use calibration::{
    CalibrationSet, HUMIDITY_BLOCK_LEN, HUMIDITY_BLOCK_REGISTER, TEMP_PRESS_BLOCK_LEN,
    TEMP_PRESS_BLOCK_REGISTER,
};
use compensation::{CompensatedSample, RawSample, BURST_LEN};

/// Device address when SDO is tied to ground.
pub const PRIMARY_ADDRESS: u8 = 0x76;
/// Device address when SDO is tied to V<sub>DDIO</sub>.
pub const SECONDARY_ADDRESS: u8 = 0x77;

/// Local altitudes at or above this height (in meters) have no standard atmosphere pressure.
pub const MAX_LOCAL_ALTITUDE: f32 = psychrometrics::ATMOSPHERE_HEIGHT_M;

const REGISTER_CTRL_HUM: u8 = 0xF2;
const REGISTER_CTRL_MEAS: u8 = 0xF4;
const REGISTER_PRESS_MSB: u8 = 0xF7;

// Normal mode, written once after the trim values are read.
const STARTUP_CTRL_MEAS: u8 = 0x3F;
const FORCED_MODE: u8 = 0b01;

#[derive(Debug, PartialEq)]
pub enum Error<TIoError> {
    /// Wrapped error from the I2C bus.
    Wrapped(TIoError),
    /// Invalid argument was provided.
    InvalidArgument,
    /// The report could not be written to the output.
    Format,
}

impl<TIoError> fmt::Display for Error<TIoError>
where
    TIoError: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Wrapped(err) => write!(f, "I2C error: {:?}", err),
            Error::InvalidArgument => write!(f, "Invalid argument"),
            Error::Format => write!(f, "Could not write the report"),
        }
    }
}

/// A raw oversampling mode that is not one of [`Oversampling`]'s values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidMode(pub u8);

impl<TIoError> From<InvalidMode> for Error<TIoError> {
    fn from(_: InvalidMode) -> Error<TIoError> {
        Error::InvalidArgument
    }
}

/// How many samples are averaged per reported value.
///
/// The same setting is used for the temperature, pressure and humidity channels. Higher settings
/// reduce noise but lengthen each measurement (see [`compensation::settle_time`]).
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Oversampling {
    X1 = 1,
    X2 = 2,
    X4 = 3,
    X8 = 4,
    X16 = 5,
}

impl Oversampling {
    /// Value of the ctrl_meas register that starts a forced measurement with this oversampling.
    fn ctrl_meas(self) -> u8 {
        let mode = self as u8;
        (mode << 5) | (mode << 2) | FORCED_MODE
    }
}

impl TryFrom<u8> for Oversampling {
    type Error = InvalidMode;

    fn try_from(mode: u8) -> Result<Oversampling, InvalidMode> {
        match mode {
            1 => Ok(Oversampling::X1),
            2 => Ok(Oversampling::X2),
            3 => Ok(Oversampling::X4),
            4 => Ok(Oversampling::X8),
            5 => Ok(Oversampling::X16),
            _ => Err(InvalidMode(mode)),
        }
    }
}

/// Options to modify the behavior of the BME280 driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Options {
    pub oversampling: Oversampling,
    /// The device address, either [`PRIMARY_ADDRESS`] or [`SECONDARY_ADDRESS`].
    pub address: u8,
    /// The station's altitude in meters above sea level. Must be below [`MAX_LOCAL_ALTITUDE`].
    pub local_altitude: f32,
}

pub const DEFAULT_OPTIONS: Options = Options {
    oversampling: Oversampling::X1,
    address: PRIMARY_ADDRESS,
    local_altitude: 0.0,
};

/// Measured and derived quantities from a single poll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    pub temperature_celsius: f32,
    pub temperature_fahrenheit: f32,
    /// Relative humidity in percent.
    pub relative_humidity: f32,
    /// Dew point in °C. `None` if the relative humidity was not positive.
    pub dew_point: Option<f32>,
    /// Station air pressure in hPa.
    pub air_pressure: f32,
    /// Standard atmosphere pressure at the local altitude, in hPa.
    pub local_normal_pressure: f32,
    /// Local altitude in meters above sea level.
    pub local_altitude: f32,
}

impl Measurement {
    /// Converts the fixed-point compensated values and derives the remaining quantities.
    pub fn from_compensated(sample: &CompensatedSample, local_altitude: f32) -> Measurement {
        let temperature_celsius = sample.temperature as f32 / 100.0;
        let relative_humidity = sample.humidity as f32 / 1024.0;
        Measurement {
            temperature_celsius,
            temperature_fahrenheit: psychrometrics::celsius_to_fahrenheit(temperature_celsius),
            relative_humidity,
            dew_point: psychrometrics::dew_point(temperature_celsius, relative_humidity),
            air_pressure: sample.pressure as f32 / 25600.0,
            local_normal_pressure: psychrometrics::local_normal_pressure(local_altitude),
            local_altitude,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tC = {:4.1} °C", self.temperature_celsius)?;
        writeln!(f, "tF = {:4.1} °F", self.temperature_fahrenheit)?;
        writeln!(f, "rH = {:4.1} %", self.relative_humidity)?;
        match self.dew_point {
            Some(dew_point) => writeln!(f, "dP = {:4.1} °C", dew_point)?,
            None => writeln!(f, "dP =  n/a °C")?,
        }
        writeln!(f, "airPres = {:5.1} hPa", self.air_pressure)?;
        writeln!(f, "localNP = {:5.1} hPa", self.local_normal_pressure)?;
        writeln!(f, "locAlt  = {:.0} masl", self.local_altitude)
    }
}

/// Driver for the Bosch BME280 temperature, pressure and humidity sensor over I2C.
///
/// The factory trim values are read when the driver is constructed and kept for its lifetime.
/// Each read triggers a forced measurement and blocks on `delay` until it completes.
#[derive(Debug)]
pub struct Bme280<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    oversampling: Oversampling,
    calibration: CalibrationSet,
    local_altitude: f32,
}

impl<I2C, D, TIoError> Bme280<I2C, D>
where
    I2C: I2c<Error = TIoError>,
    D: DelayNs,
{
    /// Constructs a BME280 driver, reads the sensor's trim values, and starts the sensor.
    ///
    /// If options is `None`, then [`DEFAULT_OPTIONS`] is used. Returns
    /// [`Error::InvalidArgument`] before touching the bus if the local altitude is not finite or
    /// not below [`MAX_LOCAL_ALTITUDE`].
    pub fn new(
        i2c: I2C,
        delay: D,
        options: Option<Options>,
    ) -> Result<Bme280<I2C, D>, Error<TIoError>> {
        let options = options.unwrap_or(DEFAULT_OPTIONS);
        let local_altitude = validate_altitude(options.local_altitude)?;

        let mut sensor = Bme280 {
            i2c,
            delay,
            address: options.address,
            oversampling: options.oversampling,
            calibration: CalibrationSet::default(),
            local_altitude,
        };
        sensor.calibration = sensor.read_calibration()?;
        debug!(
            "BME280 at {:#04x} calibrated: {:?}",
            sensor.address, sensor.calibration
        );

        sensor.write_register(REGISTER_CTRL_MEAS, STARTUP_CTRL_MEAS)?;
        debug!("BME280 at {:#04x} started", sensor.address);
        Ok(sensor)
    }

    pub fn calibration(&self) -> &CalibrationSet {
        &self.calibration
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn oversampling(&self) -> Oversampling {
        self.oversampling
    }

    /// The station's altitude in meters above sea level.
    pub fn local_altitude(&self) -> f32 {
        self.local_altitude
    }

    /// Sets the station's altitude in meters above sea level.
    ///
    /// Returns [`Error::InvalidArgument`] and keeps the previous altitude if `altitude` is not
    /// finite or not below [`MAX_LOCAL_ALTITUDE`].
    pub fn set_local_altitude(&mut self, altitude: f32) -> Result<(), Error<TIoError>> {
        self.local_altitude = validate_altitude(altitude)?;
        Ok(())
    }

    /// Triggers a forced measurement and reads the uncompensated ADC counts.
    ///
    /// This blocks for the measurement time, about 16ms with [`Oversampling::X1`].
    pub fn read_raw(&mut self) -> Result<RawSample, Error<TIoError>> {
        let mode = self.oversampling as u8;
        self.write_register(REGISTER_CTRL_HUM, mode)?;
        self.write_register(REGISTER_CTRL_MEAS, self.oversampling.ctrl_meas())?;

        let settle_time = compensation::settle_time(self.oversampling);
        trace!("Waiting {}us for the measurement", settle_time.as_micros());
        self.delay.delay_us(settle_time.as_micros() as u32);

        let mut burst = [0u8; BURST_LEN];
        self.read_block(REGISTER_PRESS_MSB, &mut burst)?;
        let raw = RawSample::from_burst(&burst);
        trace!("Raw sample: {:?}", raw);
        Ok(raw)
    }

    /// Reads a new sample and compensates it using this sensor's trim values.
    pub fn read_compensated(&mut self) -> Result<CompensatedSample, Error<TIoError>> {
        let raw = self.read_raw()?;
        Ok(compensation::compensate(&raw, &self.calibration))
    }

    /// Releases the bus and delay handles.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn read_calibration(&mut self) -> Result<CalibrationSet, Error<TIoError>> {
        let mut temp_press = [0u8; TEMP_PRESS_BLOCK_LEN];
        self.read_block(TEMP_PRESS_BLOCK_REGISTER, &mut temp_press)?;
        let mut humidity = [0u8; HUMIDITY_BLOCK_LEN];
        self.read_block(HUMIDITY_BLOCK_REGISTER, &mut humidity)?;
        Ok(CalibrationSet::from_blocks(&temp_press, &humidity))
    }

    fn read_block(&mut self, register: u8, buffer: &mut [u8]) -> Result<(), Error<TIoError>> {
        self.i2c
            .write_read(self.address, &[register], buffer)
            .map_err(Error::Wrapped)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<TIoError>> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(Error::Wrapped)
    }
}

impl<I2C, D, TIoError> Sensor for Bme280<I2C, D>
where
    I2C: I2c<Error = TIoError>,
    D: DelayNs,
{
    type Values = Measurement;
    type Error = Error<TIoError>;

    fn get_values(&mut self) -> Result<Measurement, Error<TIoError>> {
        let sample = self.read_compensated()?;
        Ok(Measurement::from_compensated(&sample, self.local_altitude))
    }

    fn print_values<W: fmt::Write>(&mut self, out: &mut W) -> Result<(), Error<TIoError>> {
        let values = self.get_values()?;
        write!(out, "{}", values).map_err(|_| Error::Format)
    }
}

fn validate_altitude<TIoError>(altitude: f32) -> Result<f32, Error<TIoError>> {
    if !altitude.is_finite() || altitude >= MAX_LOCAL_ALTITUDE {
        return Err(Error::InvalidArgument);
    }
    Ok(altitude)
}
