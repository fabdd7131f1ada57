//! `#![no_std]` driver for the PixArt PAA5100EJ near-field optical flow sensor.
//!
//! The sensor reports relative X/Y displacement. A typical caller polls it and accumulates the
//! samples, retrying on timeouts:
//!
//! ```no_run
//! use embedded_hal::{delay::DelayNs, spi::SpiDevice};
//! use paa5100ej::{Clock, Config, Error, Paa5100ej};
//!
//! fn track<SPI, D, C>(spi: SPI, delay: D, clock: C) -> Result<(), Error<SPI::Error>>
//! where
//!     SPI: SpiDevice,
//!     D: DelayNs,
//!     C: Clock,
//! {
//!     let mut sensor = Paa5100ej::initialize_spi(spi, delay, clock, Config::default())?;
//!     sensor.set_rotation(0)?;
//!
//!     let (mut total_x, mut total_y) = (0i32, 0i32);
//!     loop {
//!         match sensor.motion() {
//!             Ok(sample) => {
//!                 total_x += i32::from(sample.x);
//!                 total_y += i32::from(sample.y);
//!             }
//!             Err(Error::Timeout) => continue,
//!             Err(err) => return Err(err),
//!         }
//!     }
//! }
//! ```
#![no_std]

mod log;

mod error;

pub mod calibration;
pub mod clock;
pub mod config;
pub mod device;
pub mod interface;
pub mod motion;
pub mod params;
pub mod registers;
pub mod sequence;

pub use crate::clock::Clock;
pub use crate::config::{Config, ConfigError};
pub use crate::device::{Id, Paa5100ej};
pub use crate::error::{Error, Result};
pub use crate::motion::MotionSample;
pub use crate::params::{LedState, Rotation};
