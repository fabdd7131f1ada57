//! SPI interface implementation built on top of `embedded-hal` `SpiDevice`.

use embedded_hal::spi::{Operation, SpiDevice};

use super::Paa5100Interface;
use crate::registers::{read_command, write_command, MOTION_BURST_LEN};

/// SPI-based interface implementation for the PAA5100EJ driver.
///
/// Chip-select handling is delegated to the `SpiDevice`, which asserts it for exactly one
/// transaction and releases it on every exit path.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new interface from the provided SPI device abstraction.
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Provides mutable access to the wrapped SPI device.
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Consumes the interface and returns the owned SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Paa5100Interface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    type Error = SPI::Error;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.spi.write(&[write_command(register), value])
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_many(register, &mut value)?;
        Ok(value[0])
    }

    fn read_many<const N: usize>(
        &mut self,
        register: u8,
        buf: &mut [u8; N],
    ) -> core::result::Result<(), Self::Error> {
        if N == 0 {
            return Ok(());
        }

        let mut frames = [[0u8; 2]; N];
        for (offset, frame) in frames.iter_mut().enumerate() {
            frame[0] = read_command(register.wrapping_add(offset as u8));
        }

        {
            let mut operations = frames
                .each_mut()
                .map(|frame| Operation::TransferInPlace(frame.as_mut_slice()));
            self.spi.transaction(&mut operations)?;
        }

        for (value, frame) in buf.iter_mut().zip(frames.iter()) {
            *value = frame[1];
        }
        Ok(())
    }

    fn read_burst(
        &mut self,
        command: u8,
        frame: &mut [u8; MOTION_BURST_LEN],
    ) -> core::result::Result<(), Self::Error> {
        let mut raw = [0u8; MOTION_BURST_LEN + 1];
        raw[0] = command;
        self.spi.transfer_in_place(&mut raw)?;

        // The first byte clocked back is the echo of the command.
        frame.copy_from_slice(&raw[1..]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::SpiInterface;
    use crate::interface::Paa5100Interface;
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
    use std::vec;

    #[test]
    fn write_register_sets_write_flag() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0xBA, 0x5A]),
            SpiTransaction::transaction_end(),
        ];
        let mut spi = SpiMock::new(&expectations);
        let mut interface = SpiInterface::new(spi.clone());

        interface.write_register(0x3A, 0x5A).unwrap();
        spi.done();
    }

    #[test]
    fn read_register_uses_two_byte_exchange() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::transfer_in_place(vec![0x5F, 0x00], vec![0xFF, 0xB8]),
            SpiTransaction::transaction_end(),
        ];
        let mut spi = SpiMock::new(&expectations);
        let mut interface = SpiInterface::new(spi.clone());

        assert_eq!(interface.read_register(0x5F).unwrap(), 0xB8);
        spi.done();
    }

    #[test]
    fn read_many_reads_each_register_in_one_transaction() {
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::transfer_in_place(vec![0x02, 0x00], vec![0x00, 0x80]),
            SpiTransaction::transfer_in_place(vec![0x03, 0x00], vec![0x00, 0x0A]),
            SpiTransaction::transfer_in_place(vec![0x04, 0x00], vec![0x00, 0x00]),
            SpiTransaction::transfer_in_place(vec![0x05, 0x00], vec![0x00, 0xF6]),
            SpiTransaction::transfer_in_place(vec![0x06, 0x00], vec![0x00, 0xFF]),
            SpiTransaction::transaction_end(),
        ];
        let mut spi = SpiMock::new(&expectations);
        let mut interface = SpiInterface::new(spi.clone());

        let mut buffer = [0u8; 5];
        interface.read_many(0x02, &mut buffer).unwrap();
        assert_eq!(buffer, [0x80, 0x0A, 0x00, 0xF6, 0xFF]);
        spi.done();
    }

    #[test]
    fn read_many_keeps_chip_select_for_long_reads() {
        let mut expectations = vec![SpiTransaction::transaction_start()];
        for register in 0u8..10 {
            expectations.push(SpiTransaction::transfer_in_place(
                vec![register, 0x00],
                vec![0x00, register.wrapping_mul(3)],
            ));
        }
        expectations.push(SpiTransaction::transaction_end());
        let mut spi = SpiMock::new(&expectations);
        let mut interface = SpiInterface::new(spi.clone());

        let mut buffer = [0u8; 10];
        interface.read_many(0x00, &mut buffer).unwrap();
        assert_eq!(buffer, [0, 3, 6, 9, 12, 15, 18, 21, 24, 27]);
        spi.done();
    }

    #[test]
    fn read_many_ignores_empty_buffer() {
        let expectations: [SpiTransaction<u8>; 0] = [];
        let mut spi = SpiMock::new(&expectations);
        let mut interface = SpiInterface::new(spi.clone());

        interface.read_many(0x08, &mut []).unwrap();
        spi.done();
    }

    #[test]
    fn read_burst_discards_command_echo() {
        let mut expected = vec![0u8; 13];
        expected[0] = 0x16;
        let response = vec![
            0xEE, 0x80, 0x50, 0x0A, 0x00, 0xF6, 0xFF, 0x50, 0x01, 0x02, 0x03, 0x04, 0x05,
        ];
        let expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::transfer_in_place(expected, response),
            SpiTransaction::transaction_end(),
        ];
        let mut spi = SpiMock::new(&expectations);
        let mut interface = SpiInterface::new(spi.clone());

        let mut frame = [0u8; 12];
        interface.read_burst(0x16, &mut frame).unwrap();
        assert_eq!(
            frame,
            [0x80, 0x50, 0x0A, 0x00, 0xF6, 0xFF, 0x50, 0x01, 0x02, 0x03, 0x04, 0x05]
        );
        spi.done();
    }
}
