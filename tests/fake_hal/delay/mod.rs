use embedded_hal::delay::DelayNs;

/// Records requested delays instead of sleeping.
#[derive(Debug, Default)]
pub struct Delay {
    total_ns: u64,
    waits_us: Vec<u32>,
}

impl Delay {
    pub fn new() -> Delay {
        Delay::default()
    }

    pub fn get_total_ns(&self) -> u64 {
        self.total_ns
    }

    /// Each call to `delay_us`, in order.
    pub fn get_waits_us(&self) -> &[u32] {
        self.waits_us.as_slice()
    }
}

impl DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }

    fn delay_us(&mut self, us: u32) {
        self.waits_us.push(us);
        self.total_ns += us as u64 * 1000;
    }
}
