//! High-level PAA5100EJ device driver implementation.

use core::time::Duration;

use crate::calibration::run_secret_sequence;
use crate::clock::Clock;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::interface::spi::SpiInterface;
use crate::interface::Paa5100Interface;
use crate::motion::{sample_from_registers, MotionFrame, MotionSample};
use crate::params::{LedState, Rotation};
use crate::registers::{
    MotionStatus,
    Orientation,
    Register,
    EXPECTED_INVERSE_PRODUCT_ID,
    EXPECTED_PRODUCT_ID,
    EXPECTED_REVISION,
    MOTION_BURST_LEN,
    MOTION_REGISTERS_LEN,
    REG_DELTA_Y_H,
    REG_INVERSE_PRODUCT_ID,
    REG_MOTION,
    REG_MOTION_BURST,
    REG_POWER_UP_RESET,
    REG_PRODUCT_ID,
    RESET_COMMAND,
};
use crate::sequence::{self, LED_OFF, LED_ON, MAIN};
use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiDevice;

/// Product identification read from `PRODUCT_ID` and `REVISION_ID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Id {
    /// `PRODUCT_ID` contents.
    pub product_id: u8,
    /// `REVISION_ID` contents.
    pub revision: u8,
}

impl Id {
    /// Identification reported by a correctly programmed PAA5100EJ.
    pub const EXPECTED: Self = Self {
        product_id: EXPECTED_PRODUCT_ID,
        revision: EXPECTED_REVISION,
    };
}

/// High-level synchronous driver for the PAA5100EJ optical flow sensor.
///
/// The driver does no internal locking; callers sharing a sensor must serialize access.
pub struct Paa5100ej<IFACE, D, C> {
    interface: IFACE,
    delay: D,
    clock: C,
    config: Config,
}

impl<IFACE, D, C> Paa5100ej<IFACE, D, C> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a driver without touching the bus.
    ///
    /// The sensor is unusable until [`init`](Self::init) succeeds; prefer
    /// [`initialize`](Self::initialize).
    pub fn new(interface: IFACE, delay: D, clock: C, config: Config) -> Self {
        Self {
            interface,
            delay,
            clock,
            config,
        }
    }

    /// Consumes the driver and returns its collaborators.
    pub fn release(self) -> (IFACE, D, C) {
        (self.interface, self.delay, self.clock)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<SPI, D, C> Paa5100ej<SpiInterface<SPI>, D, C>
where
    SPI: SpiDevice,
    D: DelayNs,
    C: Clock,
{
    // ==================================================================
    // == SPI Convenience Constructors ==================================
    // ==================================================================
    /// Builds and initializes a driver on an SPI device.
    pub fn initialize_spi(spi: SPI, delay: D, clock: C, config: Config) -> Result<Self, SPI::Error> {
        Self::initialize(SpiInterface::new(spi), delay, clock, config)
    }

    /// Releases the driver, returning the SPI device and the time sources.
    pub fn release_spi(self) -> (SPI, D, C) {
        let (iface, delay, clock) = self.release();
        (iface.release(), delay, clock)
    }
}

impl<IFACE, D, C, CommE> Paa5100ej<IFACE, D, C>
where
    IFACE: Paa5100Interface<Error = CommE>,
    D: DelayNs,
    C: Clock,
{
    // ==================================================================
    // == Initialization ================================================
    // ==================================================================
    /// Builds a driver and runs [`init`](Self::init).
    pub fn initialize(interface: IFACE, delay: D, clock: C, config: Config) -> Result<Self, CommE> {
        let mut device = Self::new(interface, delay, clock, config);
        device.init()?;
        Ok(device)
    }

    /// Resets, verifies and programs the sensor.
    ///
    /// Fails with [`Error::CommsCheckFailed`] before any programming when the bus does not
    /// return the expected chip ID pair, and with [`Error::InvalidId`] when the product ID read
    /// after programming is wrong.
    pub fn init(&mut self) -> Result<(), CommE> {
        self.config.validate().map_err(Error::InvalidConfig)?;

        info!("initializing PAA5100EJ");
        self.reset()?;
        self.check_comms()?;
        self.drain_motion_registers()?;

        run_secret_sequence(&mut self.interface, &mut self.delay)?;
        debug!("running main sequence");
        sequence::run(&mut self.interface, &mut self.delay, MAIN)?;
        self.set_led(self.config.led)?;

        let id = self.id()?;
        if id != Id::EXPECTED {
            error!(
                "invalid product ID or revision: {:#x}/{:#x}",
                id.product_id,
                id.revision
            );
            return Err(Error::InvalidId(id));
        }

        if let Some(rotation) = self.config.rotation {
            self.apply_rotation(rotation)?;
        }

        info!("PAA5100EJ ready");
        Ok(())
    }

    /// Re-runs the full initialization.
    ///
    /// The sensor forgets its programming after a power loss and shuts itself down after
    /// long periods without motion.
    pub fn wake(&mut self) -> Result<(), CommE> {
        debug!("waking sensor");
        self.init()
    }

    /// Issues a soft reset and waits for the sensor to boot.
    pub fn reset(&mut self) -> Result<(), CommE> {
        self.interface
            .write_register(REG_POWER_UP_RESET, RESET_COMMAND)?;
        self.delay.delay_ms(self.config.reset_settle_ms);
        Ok(())
    }

    /// Verifies bus communication against the chip ID and its bitwise inverse.
    pub fn check_comms(&mut self) -> Result<(), CommE> {
        let chip_id = self.interface.read_register(REG_PRODUCT_ID)?;
        let inverse_chip_id = self.interface.read_register(REG_INVERSE_PRODUCT_ID)?;

        if chip_id != EXPECTED_PRODUCT_ID || inverse_chip_id != EXPECTED_INVERSE_PRODUCT_ID {
            error!(
                "comms check failed: chip ID {:#x}, inverse {:#x}",
                chip_id,
                inverse_chip_id
            );
            return Err(Error::CommsCheckFailed {
                chip_id,
                inverse_chip_id,
            });
        }

        debug!("comms check passed");
        Ok(())
    }

    // Stale motion state must be cleared before programming.
    fn drain_motion_registers(&mut self) -> Result<(), CommE> {
        for register in REG_MOTION..=REG_DELTA_Y_H {
            self.interface.read_register(register)?;
        }
        Ok(())
    }

    // ==================================================================
    // == Identification ================================================
    // ==================================================================
    /// Reads the product ID and revision.
    pub fn id(&mut self) -> Result<Id, CommE> {
        let mut raw = [0u8; 2];
        self.interface.read_many(REG_PRODUCT_ID, &mut raw)?;
        Ok(Id {
            product_id: raw[0],
            revision: raw[1],
        })
    }

    // ==================================================================
    // == Orientation & Illumination ====================================
    // ==================================================================
    /// Sets the mounting rotation in degrees.
    ///
    /// Only 0, 90, 180 and 270 are accepted; anything else is rejected without touching the bus.
    pub fn set_rotation(&mut self, degrees: u16) -> Result<(), CommE> {
        let rotation = Rotation::try_from(degrees).map_err(Error::InvalidConfig)?;
        self.apply_rotation(rotation)
    }

    /// Applies a typed rotation.
    pub fn apply_rotation(&mut self, rotation: Rotation) -> Result<(), CommE> {
        debug!("setting rotation to {} degrees", rotation.degrees());
        self.write_orientation(rotation.orientation())
    }

    /// Sets the axis transform directly. Swapping happens before inversion.
    pub fn set_orientation(
        &mut self,
        invert_x: bool,
        invert_y: bool,
        swap_xy: bool,
    ) -> Result<(), CommE> {
        self.write_orientation(Orientation::from_flags(invert_x, invert_y, swap_xy))
    }

    fn write_orientation(&mut self, orientation: Orientation) -> Result<(), CommE> {
        self.interface
            .write_register(Orientation::ADDRESS, u8::from(orientation))?;
        Ok(())
    }

    /// Switches the illumination LED.
    pub fn set_led(&mut self, state: LedState) -> Result<(), CommE> {
        let steps = match state {
            LedState::On => LED_ON,
            LedState::Off => LED_OFF,
        };
        debug!("switching LED {}", state);
        sequence::run(&mut self.interface, &mut self.delay, steps)
    }

    // ==================================================================
    // == Motion ========================================================
    // ==================================================================
    /// Burst-reads motion using the configured timeout.
    pub fn motion(&mut self) -> Result<MotionSample, CommE> {
        self.get_motion(self.config.motion_timeout)
    }

    /// Register-by-register motion read using the configured timeout.
    pub fn motion_slow(&mut self) -> Result<MotionSample, CommE> {
        self.get_motion_slow(self.config.motion_timeout)
    }

    /// Reads motion with a burst transfer, retrying until a trustworthy frame arrives.
    ///
    /// Frames without the motion flag, or with low surface quality at a saturated shutter, are
    /// discarded. Returns [`Error::Timeout`] once `timeout` has elapsed since the call.
    pub fn get_motion(&mut self, timeout: Duration) -> Result<MotionSample, CommE> {
        let retry_ms = self.config.burst_retry_ms;
        self.poll_motion(timeout, retry_ms, |interface| {
            let mut raw = [0u8; MOTION_BURST_LEN];
            interface.read_burst(REG_MOTION_BURST, &mut raw)?;

            let frame = MotionFrame::from_bytes(&raw);
            let sample = frame.sample();
            if sample.is_none() {
                trace!("rejected motion frame {}", frame);
            }
            Ok(sample)
        })
    }

    /// Reads motion one register at a time; only the motion flag is checked.
    pub fn get_motion_slow(&mut self, timeout: Duration) -> Result<MotionSample, CommE> {
        let retry_ms = self.config.slow_retry_ms;
        self.poll_motion(timeout, retry_ms, |interface| {
            let mut raw = [0u8; MOTION_REGISTERS_LEN];
            interface.read_many(MotionStatus::ADDRESS, &mut raw)?;
            Ok(sample_from_registers(&raw))
        })
    }

    fn poll_motion<F>(
        &mut self,
        timeout: Duration,
        retry_ms: u32,
        mut attempt: F,
    ) -> Result<MotionSample, CommE>
    where
        F: FnMut(&mut IFACE) -> core::result::Result<Option<MotionSample>, CommE>,
    {
        // Rounded up so any non-zero timeout gets at least one attempt.
        let timeout_ms = u64::try_from(timeout.as_micros().div_ceil(1_000)).unwrap_or(u64::MAX);
        let start = self.clock.now_ms();

        while self.clock.now_ms().wrapping_sub(start) < timeout_ms {
            if let Some(sample) = attempt(&mut self.interface)? {
                return Ok(sample);
            }
            self.delay.delay_ms(retry_ms);
        }

        warn!("timed out waiting for motion data");
        Err(Error::Timeout)
    }
}
