//! Error handling primitives for the PAA5100EJ driver.

use crate::config::ConfigError;
use crate::device::Id;

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// The provided configuration parameters are invalid.
    InvalidConfig(ConfigError),
    /// Chip ID and inverse chip ID read right after reset did not match.
    ///
    /// The sensor is not programmed when this is returned and must not be used.
    CommsCheckFailed {
        /// Value read from `PRODUCT_ID`.
        chip_id: u8,
        /// Value read from `INVERSE_PRODUCT_ID`.
        inverse_chip_id: u8,
    },
    /// Product ID or revision read after programming is not a PAA5100EJ.
    InvalidId(Id),
    /// No valid motion frame was seen before the deadline.
    Timeout,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
