use core::time::Duration;
use embedded_hal::digital::{OutputPin, PinState};

/// How often the sensors are polled by default.
pub const DEFAULT_SENSOR_CYCLE: Duration = Duration::from_secs(15);

/// Blink schedule of the heartbeat LED: a 50ms pulse every second.
pub const DEFAULT_BLINKER: Blinker = Blinker {
    period: Duration::from_millis(1000),
    pulse_width: Duration::from_millis(50),
};

/// Fires once every `period`, as observed through the caller's clock.
///
/// The provided `time_fn` closure should provide some representation of a given instant that can
/// be used with `elapsed_since_fn` to determine how much time has passed since then. It does not
/// need to reflect real dates and times.
#[derive(Debug)]
pub struct Ticker<TimeFn, ElapsedFn, TTime>
where
    TimeFn: Fn() -> TTime,
    ElapsedFn: Fn(TTime) -> Duration,
    TTime: Copy,
{
    period: Duration,
    last_tick: TTime,
    time_fn: TimeFn,
    elapsed_since_fn: ElapsedFn,
}

impl<TimeFn, ElapsedFn, TTime> Ticker<TimeFn, ElapsedFn, TTime>
where
    TimeFn: Fn() -> TTime,
    ElapsedFn: Fn(TTime) -> Duration,
    TTime: Copy,
{
    /// Constructs a ticker whose first cycle starts now.
    pub fn new(
        period: Duration,
        time_fn: TimeFn,
        elapsed_since_fn: ElapsedFn,
    ) -> Ticker<TimeFn, ElapsedFn, TTime> {
        Ticker {
            period,
            last_tick: time_fn(),
            time_fn,
            elapsed_since_fn,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true if a full period has passed since the last tick, and starts the next cycle.
    ///
    /// The next cycle is measured from this call, so late polls push later ticks back rather than
    /// bunching them up.
    pub fn is_due(&mut self) -> bool {
        if (self.elapsed_since_fn)(self.last_tick) < self.period {
            return false;
        }
        self.last_tick = (self.time_fn)();
        true
    }
}

/// A periodic pulse on an active-low LED.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blinker {
    pub period: Duration,
    /// How long the LED stays lit at the start of each period.
    pub pulse_width: Duration,
}

impl Blinker {
    /// Returns the pin level for the given time since the blinker started.
    ///
    /// The pin is driven low (LED on) for the first `pulse_width` of every `period`.
    pub fn level(&self, elapsed: Duration) -> PinState {
        let period = self.period.as_micros();
        if period == 0 {
            return PinState::High;
        }
        if elapsed.as_micros() % period < self.pulse_width.as_micros() {
            PinState::Low
        } else {
            PinState::High
        }
    }

    /// Drives `pin` to the level for the given time since the blinker started.
    pub fn drive<TPin>(&self, pin: &mut TPin, elapsed: Duration) -> Result<(), TPin::Error>
    where
        TPin: OutputPin,
    {
        pin.set_state(self.level(elapsed))
    }
}
