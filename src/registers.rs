//! Register map definitions for the PAA5100EJ optical flow sensor.
//!
//! The vendor documents only a handful of these registers. Everything touched by the
//! programming sequences in [`crate::sequence`] is an undocumented tuning value.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

/// Register address of `PRODUCT_ID`.
pub const REG_PRODUCT_ID: u8 = 0x00;
/// Register address of `MOTION`.
pub const REG_MOTION: u8 = 0x02;
/// Register address of `DELTA_Y_H`.
pub const REG_DELTA_Y_H: u8 = 0x06;
/// Register address of `MOTION_BURST`.
pub const REG_MOTION_BURST: u8 = 0x16;
/// Register address of `POWER_UP_RESET`.
pub const REG_POWER_UP_RESET: u8 = 0x3A;
/// Register address of `ORIENTATION`.
pub const REG_ORIENTATION: u8 = 0x5B;
/// Register address of `INVERSE_PRODUCT_ID`.
pub const REG_INVERSE_PRODUCT_ID: u8 = 0x5F;

/// Set on the command byte of every register write.
pub const WRITE_FLAG: u8 = 0x80;
/// Register addresses are seven bits wide.
pub const ADDRESS_MASK: u8 = 0x7F;

/// Value written to `POWER_UP_RESET` to trigger a soft reset.
pub const RESET_COMMAND: u8 = 0x5A;
/// Expected `PRODUCT_ID` contents.
pub const EXPECTED_PRODUCT_ID: u8 = 0x49;
/// Expected `INVERSE_PRODUCT_ID` contents.
pub const EXPECTED_INVERSE_PRODUCT_ID: u8 = 0xB8;
/// Expected `REVISION_ID` contents.
pub const EXPECTED_REVISION: u8 = 0x00;

/// Number of payload bytes returned by a motion burst, excluding the command echo.
pub const MOTION_BURST_LEN: usize = 12;
/// Number of registers covered by the slow motion read (`MOTION` through `DELTA_Y_H`).
pub const MOTION_REGISTERS_LEN: usize = 5;

/// Register types with a fixed address.
pub trait Register {
    /// Register address.
    const ADDRESS: u8;
}

/// Bitfield representation of the `ORIENTATION` register (address `0x5B`).
///
/// Swapping is applied by the sensor before inversion.
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    #[skip]
    __: B5,
    // Invert the X axis (bit 5).
    pub invert_x: bool,
    // Invert the Y axis (bit 6).
    pub invert_y: bool,
    // Swap the X and Y axes (bit 7).
    pub swap_xy: bool,
}

impl Orientation {
    /// Builds the control value from explicit axis flags.
    pub fn from_flags(invert_x: bool, invert_y: bool, swap_xy: bool) -> Self {
        Self::new()
            .with_invert_x(invert_x)
            .with_invert_y(invert_y)
            .with_swap_xy(swap_xy)
    }
}

impl From<u8> for Orientation {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Orientation> for u8 {
    fn from(value: Orientation) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `MOTION` register (address `0x02`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionStatus {
    #[skip]
    __: B7,
    // New motion data is available (bit 7).
    pub motion: bool,
}

impl From<u8> for MotionStatus {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<MotionStatus> for u8 {
    fn from(value: MotionStatus) -> Self {
        value.into_bytes()[0]
    }
}

impl Register for Orientation {
    const ADDRESS: u8 = REG_ORIENTATION;
}

impl Register for MotionStatus {
    const ADDRESS: u8 = REG_MOTION;
}

/// Builds the command byte for a register write.
pub const fn write_command(register: u8) -> u8 {
    (register & ADDRESS_MASK) | WRITE_FLAG
}

/// Builds the command byte for a register read.
pub const fn read_command(register: u8) -> u8 {
    register & ADDRESS_MASK
}
