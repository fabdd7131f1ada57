//! Bus interface abstraction for the PAA5100EJ driver.

pub mod spi;

use crate::registers::MOTION_BURST_LEN;

/// Abstraction over the low-level bus access required by the driver.
///
/// Every method is one chip-select scoped transaction.
pub trait Paa5100Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Writes a single register.
    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error>;

    /// Reads a single register.
    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error>;

    /// Reads consecutive registers starting at `register`, one two-byte exchange per register.
    fn read_many<const N: usize>(
        &mut self,
        register: u8,
        buf: &mut [u8; N],
    ) -> core::result::Result<(), Self::Error>;

    /// Issues `command` followed by dummy bytes and captures the burst payload.
    fn read_burst(
        &mut self,
        command: u8,
        frame: &mut [u8; MOTION_BURST_LEN],
    ) -> core::result::Result<(), Self::Error>;
}

impl<T> Paa5100Interface for &mut T
where
    T: Paa5100Interface + ?Sized,
{
    type Error = T::Error;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        T::write_register(self, register, value)
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        T::read_register(self, register)
    }

    fn read_many<const N: usize>(
        &mut self,
        register: u8,
        buf: &mut [u8; N],
    ) -> core::result::Result<(), Self::Error> {
        T::read_many(self, register, buf)
    }

    fn read_burst(
        &mut self,
        command: u8,
        frame: &mut [u8; MOTION_BURST_LEN],
    ) -> core::result::Result<(), Self::Error> {
        T::read_burst(self, command, frame)
    }
}
