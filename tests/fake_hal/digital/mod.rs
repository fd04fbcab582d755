use embedded_hal::digital::{ErrorType, OutputPin, PinState};

#[derive(Debug, PartialEq)]
pub enum Error {}

impl embedded_hal::digital::Error for Error {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        match *self {}
    }
}

/// An output pin that remembers every level it was driven to.
#[derive(Debug, Default)]
pub struct Pin {
    states: Vec<PinState>,
}

impl Pin {
    pub fn new() -> Pin {
        Pin::default()
    }

    pub fn get_states(&self) -> &[PinState] {
        self.states.as_slice()
    }
}

impl ErrorType for Pin {
    type Error = Error;
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.states.push(PinState::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.states.push(PinState::High);
        Ok(())
    }
}
