//! Curated list of standard baud rates
//!
//! Historical teleprinter rates, the classic RS-232 ladder, MIDI and
//! fieldbus rates, and the fast rates USB bridges are commonly asked for.

/// Number of entries in [`STANDARD_BAUD_RATES`]
pub const STANDARD_RATE_COUNT: usize = 43;

/// Standard baud rates, ascending
pub const STANDARD_BAUD_RATES: [u32; STANDARD_RATE_COUNT] = [
    46, 50, 75, 110, 135, 150, 300, 600, 1200, 1800, 2400, 4800, 7200, 9600, 14400, 19200,
    31250, 38400, 45450, 56000, 57600, 76800, 100000, 115200, 128000, 153846, 187500, 230400,
    250000, 256000, 307200, 460800, 500000, 750000, 857143, 921600, 1000000, 1090909, 1200000,
    1333333, 1500000, 2000000, 3000000,
];
