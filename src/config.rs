//! Configuration primitives for the PAA5100EJ driver.

use core::time::Duration;

use crate::params::{LedState, Rotation};

/// Default deadline for a single motion read.
pub const DEFAULT_MOTION_TIMEOUT: Duration = Duration::from_secs(5);
/// Default pause between burst read attempts (milliseconds).
pub const DEFAULT_BURST_RETRY_MS: u32 = 10;
/// Default pause between register-by-register motion read attempts (milliseconds).
pub const DEFAULT_SLOW_RETRY_MS: u32 = 1;
/// Default boot time granted after a soft reset (milliseconds).
pub const DEFAULT_RESET_SETTLE_MS: u32 = 500;

/// User-facing configuration for the PAA5100EJ sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Deadline used by [`motion`](crate::Paa5100ej::motion) and
    /// [`motion_slow`](crate::Paa5100ej::motion_slow).
    pub motion_timeout: Duration,
    /// Pause between rejected burst frames.
    pub burst_retry_ms: u32,
    /// Pause between rejected register-by-register reads.
    pub slow_retry_ms: u32,
    /// Wait after the soft reset before talking to the sensor again.
    pub reset_settle_ms: u32,
    /// LED state programmed during initialization.
    pub led: LedState,
    /// Rotation applied once initialization succeeds.
    pub rotation: Option<Rotation>,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration is usable.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.motion_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the default motion read deadline.
    pub fn motion_timeout(mut self, timeout: Duration) -> Self {
        self.config.motion_timeout = timeout;
        self
    }

    /// Overrides the pause between burst read attempts.
    pub fn burst_retry_ms(mut self, ms: u32) -> Self {
        self.config.burst_retry_ms = ms;
        self
    }

    /// Overrides the pause between slow read attempts.
    pub fn slow_retry_ms(mut self, ms: u32) -> Self {
        self.config.slow_retry_ms = ms;
        self
    }

    /// Overrides the post-reset settle time.
    pub fn reset_settle_ms(mut self, ms: u32) -> Self {
        self.config.reset_settle_ms = ms;
        self
    }

    /// Selects the LED state programmed during initialization.
    pub fn led(mut self, led: LedState) -> Self {
        self.config.led = led;
        self
    }

    /// Applies the given rotation at the end of initialization.
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = Some(rotation);
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            motion_timeout: DEFAULT_MOTION_TIMEOUT,
            burst_retry_ms: DEFAULT_BURST_RETRY_MS,
            slow_retry_ms: DEFAULT_SLOW_RETRY_MS,
            reset_settle_ms: DEFAULT_RESET_SETTLE_MS,
            led: LedState::On,
            rotation: None,
        }
    }
}

/// Validation errors generated while verifying a [`Config`] or a configuration request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Rotation is not one of 0, 90, 180 or 270 degrees.
    InvalidRotation(u16),
    /// A motion timeout of zero can never produce a sample.
    ZeroTimeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_sensor_timings() {
        let config = Config::default();
        assert_eq!(config.motion_timeout, Duration::from_secs(5));
        assert_eq!(config.burst_retry_ms, 10);
        assert_eq!(config.slow_retry_ms, 1);
        assert_eq!(config.reset_settle_ms, 500);
        assert_eq!(config.led, LedState::On);
        assert_eq!(config.rotation, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_overrides_fields() {
        let config = Config::new()
            .motion_timeout(Duration::from_millis(250))
            .rotation(Rotation::Deg180)
            .led(LedState::Off)
            .build();

        assert_eq!(config.motion_timeout, Duration::from_millis(250));
        assert_eq!(config.rotation, Some(Rotation::Deg180));
        assert_eq!(config.led, LedState::Off);
        assert_eq!(config.burst_retry_ms, DEFAULT_BURST_RETRY_MS);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = Config::new().motion_timeout(Duration::ZERO).build();
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }
}
