//! Strongly typed parameter enumerations for the PAA5100EJ driver.
//!
//! # Examples
//!
//! ```rust
//! use paa5100ej::params::{LedState, Rotation};
//!
//! let rotation = Rotation::try_from(90u16).unwrap();
//! assert_eq!(rotation, Rotation::Deg90);
//! assert!(Rotation::try_from(45u16).is_err());
//! let _ = LedState::On;
//! ```

use crate::config::ConfigError;
use crate::registers::Orientation;

/// Mounting rotation of the sensor in 90 degree steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// 0 degrees.
    Deg0,
    /// 90 degrees.
    Deg90,
    /// 180 degrees.
    Deg180,
    /// 270 degrees.
    Deg270,
}

impl Rotation {
    /// Returns the rotation in degrees.
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Returns the axis flags that realise this rotation.
    pub fn orientation(self) -> Orientation {
        match self {
            Self::Deg0 => Orientation::from_flags(true, true, true),
            Self::Deg90 => Orientation::from_flags(false, true, false),
            Self::Deg180 => Orientation::from_flags(false, false, true),
            Self::Deg270 => Orientation::from_flags(true, false, false),
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = ConfigError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            other => Err(ConfigError::InvalidRotation(other)),
        }
    }
}

/// Illumination LED state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedState {
    /// LED switched off.
    Off,
    /// LED switched on.
    On,
}
