//! Secret tuning sequence with its runtime branches.
//!
//! Two decisions in this sequence depend on values read back from the sensor, so it cannot be
//! expressed as a static [`Step`](crate::sequence::Step) list.

use embedded_hal::delay::DelayNs;

use crate::error::Result;
use crate::interface::Paa5100Interface;
use crate::sequence::{self, CALIBRATION_UNLOCK, SECRET_INTERLUDE, SECRET_PRELUDE};

const REG_LED_DRIVER_STATUS: u8 = 0x67;
const REG_LED_DRIVER: u8 = 0x48;
const REG_CALIBRATION_STATUS: u8 = 0x73;
const REG_CALIBRATION_1: u8 = 0x70;
const REG_CALIBRATION_2: u8 = 0x71;

const LED_DRIVER_HIGH: u8 = 0x04;
const LED_DRIVER_LOW: u8 = 0x02;
const CALIBRATION_1_MAX: u8 = 0x3F;

/// Adjusted calibration values, reported when the calibration branch runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    /// Value written back to register `0x70`.
    pub c1: u8,
    /// Value written back to register `0x71`.
    pub c2: u8,
}

/// Adjusts the first calibration value.
pub fn adjust_c1(raw: u8) -> u8 {
    let offset = if raw <= 28 { 14 } else { 11 };
    raw.saturating_add(offset).min(CALIBRATION_1_MAX)
}

/// Scales the second calibration value to 45%, rounding down.
pub fn adjust_c2(raw: u8) -> u8 {
    (u16::from(raw) * 45 / 100) as u8
}

/// Runs the secret sequence.
///
/// Returns the values stored by the calibration branch, or `None` when the sensor reports
/// that no calibration is needed.
pub fn run_secret_sequence<IFACE>(
    interface: &mut IFACE,
    delay: &mut impl DelayNs,
) -> Result<Option<Calibration>, IFACE::Error>
where
    IFACE: Paa5100Interface,
{
    debug!("running secret sequence");
    sequence::run(interface, delay, SECRET_PRELUDE)?;

    let status = interface.read_register(REG_LED_DRIVER_STATUS)?;
    let driver = if status & 0x80 != 0 {
        LED_DRIVER_HIGH
    } else {
        LED_DRIVER_LOW
    };
    trace!("LED driver status {:#x}, selecting {:#x}", status, driver);
    interface.write_register(REG_LED_DRIVER, driver)?;

    sequence::run(interface, delay, SECRET_INTERLUDE)?;

    if interface.read_register(REG_CALIBRATION_STATUS)? != 0x00 {
        return Ok(None);
    }

    let raw_c1 = interface.read_register(REG_CALIBRATION_1)?;
    let raw_c2 = interface.read_register(REG_CALIBRATION_2)?;
    let calibration = Calibration {
        c1: adjust_c1(raw_c1),
        c2: adjust_c2(raw_c2),
    };
    debug!(
        "calibration c1 {} -> {}, c2 {} -> {}",
        raw_c1,
        calibration.c1,
        raw_c2,
        calibration.c2
    );

    sequence::run(interface, delay, CALIBRATION_UNLOCK)?;
    interface.write_register(REG_CALIBRATION_1, calibration.c1)?;
    interface.write_register(REG_CALIBRATION_2, calibration.c2)?;

    Ok(Some(calibration))
}
