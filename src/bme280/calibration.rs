/// First trim block: T1-T3, P1-P9, one reserved byte and H1.
pub const TEMP_PRESS_BLOCK_REGISTER: u8 = 0x88;
pub const TEMP_PRESS_BLOCK_LEN: usize = 26;
/// Second trim block: H2-H6.
pub const HUMIDITY_BLOCK_REGISTER: u8 = 0xE1;
pub const HUMIDITY_BLOCK_LEN: usize = 7;

/// Factory trim values burned into the sensor's non-volatile memory.
///
/// Unique to each chip. They are read once when the driver is constructed and are needed to turn
/// the raw ADC counts into physical units (see [`super::compensation`]).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CalibrationSet {
    pub t1: u16,
    pub t2: i16,
    pub t3: i16,
    pub p1: u16,
    pub p2: i16,
    pub p3: i16,
    pub p4: i16,
    pub p5: i16,
    pub p6: i16,
    pub p7: i16,
    pub p8: i16,
    pub p9: i16,
    pub h1: u8,
    pub h2: i16,
    pub h3: u8,
    /// 12-bit signed value, split across registers 0xE4 and the low nibble of 0xE5.
    pub h4: i16,
    /// 12-bit signed value, split across the high nibble of 0xE5 and register 0xE6.
    pub h5: i16,
    pub h6: i8,
}

impl CalibrationSet {
    /// Unpacks both trim blocks, as read starting at [`TEMP_PRESS_BLOCK_REGISTER`] and
    /// [`HUMIDITY_BLOCK_REGISTER`] respectively.
    ///
    /// All multi-byte values are little-endian.
    pub fn from_blocks(
        temp_press: &[u8; TEMP_PRESS_BLOCK_LEN],
        humidity: &[u8; HUMIDITY_BLOCK_LEN],
    ) -> CalibrationSet {
        CalibrationSet {
            t1: u16_le(temp_press, 0),
            t2: i16_le(temp_press, 2),
            t3: i16_le(temp_press, 4),
            p1: u16_le(temp_press, 6),
            p2: i16_le(temp_press, 8),
            p3: i16_le(temp_press, 10),
            p4: i16_le(temp_press, 12),
            p5: i16_le(temp_press, 14),
            p6: i16_le(temp_press, 16),
            p7: i16_le(temp_press, 18),
            p8: i16_le(temp_press, 20),
            p9: i16_le(temp_press, 22),
            // Byte 24 is reserved.
            h1: temp_press[25],
            h2: i16_le(humidity, 0),
            h3: humidity[2],
            h4: signed_12bit(humidity[3], low_nibble(humidity[4])),
            h5: signed_12bit(humidity[5], high_nibble(humidity[4])),
            h6: humidity[6] as i8,
        }
    }
}

/// Combines a signed most-significant byte with a 4-bit nibble into a sign-extended 12-bit value.
///
/// Only the lower four bits of `nibble` are used.
pub fn signed_12bit(msb: u8, nibble: u8) -> i16 {
    ((msb as i8 as i16) << 4) | (nibble & 0x0F) as i16
}

pub fn low_nibble(byte: u8) -> u8 {
    byte & 0x0F
}

pub fn high_nibble(byte: u8) -> u8 {
    byte >> 4
}

fn u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn i16_le(bytes: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}
