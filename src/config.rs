//! Configuration primitives for the AS7343 driver.

use crate::params::{AutoSmux, Gain};
use crate::registers::ASTEP_MAX;

/// User-facing measurement configuration for the AS7343 sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Spectral ADC analog gain.
    pub gain: Gain,
    /// Automatic channel read-out mode.
    pub auto_smux: AutoSmux,
    /// Integration time in ASTEP units (`ATIME`, 0 means a single step).
    pub atime: u8,
    /// Integration step size in 2.78 µs units (`ASTEP`).
    pub astep: u16,
    /// Wait time between measurements in 2.78 ms units (`WTIME`).
    pub wtime: u8,
    /// Whether the wait timer is enabled.
    pub wait_enable: bool,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration is valid according to datasheet rules.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.astep > ASTEP_MAX {
            return Err(ConfigError::AstepReserved);
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

    /// Overrides the spectral ADC gain.
    pub fn gain(mut self, gain: Gain) -> Self {
        self.config.gain = gain;
        self
    }

    /// Overrides the automatic channel read-out mode.
    pub fn auto_smux(mut self, auto_smux: AutoSmux) -> Self {
        self.config.auto_smux = auto_smux;
        self
    }

    /// Sets the integration time multiplier.
    pub fn atime(mut self, atime: u8) -> Self {
        self.config.atime = atime;
        self
    }

    /// Sets the integration step size.
    pub fn astep(mut self, astep: u16) -> Self {
        self.config.astep = astep;
        self
    }

    /// Sets the wait time between measurements and enables the wait timer.
    pub fn wtime(mut self, wtime: u8) -> Self {
        self.config.wtime = wtime;
        self.config.wait_enable = true;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gain: Gain::X128,
            auto_smux: AutoSmux::Channels18,
            atime: 0,
            astep: 999,
            wtime: 0,
            wait_enable: false,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The requested ASTEP value is reserved by the datasheet.
    AstepReserved,
}
