//! Register programming sequences.
//!
//! The vendor gives no meaning for these values; they are replayed verbatim. `0x7F` selects
//! the register bank that subsequent writes land in.

use embedded_hal::delay::DelayNs;

use crate::error::Result;
use crate::interface::Paa5100Interface;

/// One step of a programming sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Write `value` to `register`.
    Write(u8, u8),
    /// Pause for the given number of milliseconds.
    Delay(u32),
}

use Step::{Delay, Write};

/// First static block of the secret sequence, before the LED driver readback.
pub const SECRET_PRELUDE: &[Step] = &[
    Write(0x7F, 0x00),
    Write(0x55, 0x01),
    Write(0x50, 0x07),
    Write(0x7F, 0x0E),
    Write(0x43, 0x10),
];

/// Second static block of the secret sequence, before the calibration status check.
pub const SECRET_INTERLUDE: &[Step] = &[
    Write(0x7F, 0x00),
    Write(0x51, 0x7B),
    Write(0x50, 0x00),
    Write(0x55, 0x00),
    Write(0x7F, 0x0E),
];

/// Unlocks the calibration registers before the adjusted values are stored.
pub const CALIBRATION_UNLOCK: &[Step] = &[
    Write(0x7F, 0x00),
    Write(0x61, 0xAD),
    Write(0x51, 0x70),
    Write(0x7F, 0x0E),
];

/// Main performance optimisation sequence.
pub const MAIN: &[Step] = &[
    Write(0x7F, 0x00),
    Write(0x61, 0xAD),
    Write(0x7F, 0x03),
    Write(0x40, 0x00),
    Write(0x7F, 0x05),
    Write(0x41, 0xB3),
    Write(0x43, 0xF1),
    Write(0x45, 0x14),
    Write(0x5B, 0x32),
    Write(0x5F, 0x34),
    Write(0x7B, 0x08),
    Write(0x7F, 0x06),
    Write(0x44, 0x1B),
    Write(0x40, 0xBF),
    Write(0x4E, 0x3F),
    Write(0x7F, 0x08),
    Write(0x65, 0x20),
    Write(0x6A, 0x18),
    Write(0x7F, 0x09),
    Write(0x4F, 0xAF),
    Write(0x5F, 0x40),
    Write(0x48, 0x80),
    Write(0x49, 0x80),
    Write(0x57, 0x77),
    Write(0x60, 0x78),
    Write(0x61, 0x78),
    Write(0x62, 0x08),
    Write(0x63, 0x50),
    Write(0x7F, 0x0A),
    Write(0x45, 0x60),
    Write(0x7F, 0x00),
    Write(0x4D, 0x11),
    Write(0x55, 0x80),
    Write(0x74, 0x21),
    Write(0x75, 0x1F),
    Write(0x4A, 0x78),
    Write(0x4B, 0x78),
    Write(0x44, 0x08),
    Write(0x45, 0x50),
    Write(0x64, 0xFF),
    Write(0x65, 0x1F),
    Write(0x7F, 0x14),
    Write(0x65, 0x67),
    Write(0x66, 0x08),
    Write(0x63, 0x70),
    Write(0x7F, 0x15),
    Write(0x48, 0x48),
    Write(0x7F, 0x07),
    Write(0x41, 0x0D),
    Write(0x43, 0x14),
    Write(0x4B, 0x0E),
    Write(0x45, 0x0F),
    Write(0x44, 0x42),
    Write(0x4C, 0x80),
    Write(0x7F, 0x10),
    Write(0x5B, 0x02),
    Write(0x7F, 0x07),
    Write(0x40, 0x41),
    Write(0x70, 0x00),
    Delay(10),
    Write(0x32, 0x44),
    Write(0x7F, 0x07),
    Write(0x40, 0x40),
    Write(0x7F, 0x06),
    Write(0x62, 0xF0),
    Write(0x63, 0x00),
    Write(0x7F, 0x0D),
    Write(0x48, 0xC0),
    Write(0x6F, 0xD5),
    Write(0x7F, 0x00),
    Write(0x5B, 0xA0),
    Write(0x4E, 0xA8),
    Write(0x5A, 0x50),
    Write(0x40, 0x80),
];

/// Switches the illumination LED on.
pub const LED_ON: &[Step] = &[
    Delay(240),
    Write(0x7F, 0x14),
    Write(0x6F, 0x1C),
    Write(0x7F, 0x00),
];

/// Switches the illumination LED off.
pub const LED_OFF: &[Step] = &[
    Delay(240),
    Write(0x7F, 0x14),
    Write(0x6F, 0x00),
    Write(0x7F, 0x00),
];

/// Replays `steps` in order, stopping at the first bus failure.
pub fn run<IFACE>(
    interface: &mut IFACE,
    delay: &mut impl DelayNs,
    steps: &[Step],
) -> Result<(), IFACE::Error>
where
    IFACE: Paa5100Interface,
{
    for step in steps {
        match *step {
            Step::Write(register, value) => {
                trace!("write {:#x} <- {:#x}", register, value);
                interface.write_register(register, value)?;
            }
            Step::Delay(ms) => delay.delay_ms(ms),
        }
    }

    Ok(())
}
