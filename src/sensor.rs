use core::fmt::Write;

/// Common interface of the polled sensors.
///
/// Each driver decides what a reading contains; the caller only needs to know how to take one and
/// how to report it.
pub trait Sensor {
    /// One complete set of measured and derived quantities.
    type Values;
    type Error;

    /// Takes a fresh reading from the device.
    fn get_values(&mut self) -> Result<Self::Values, Self::Error>;

    /// Takes a fresh reading and writes it to `out` as a human-readable report, one quantity per
    /// line with units.
    fn print_values<W: Write>(&mut self, out: &mut W) -> Result<(), Self::Error>;
}
