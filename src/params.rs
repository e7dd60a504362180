//! Strongly typed parameter enumerations for the AS7343 driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the high-level driver APIs. Prefer these
//! types over raw integers to keep configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use as7343::params::{AutoSmux, Gain};
//!
//! let gain = Gain::X128;
//! let mode = AutoSmux::Channels18;
//! let _ = (gain, mode);
//! ```

use modular_bitfield::prelude::Specifier;

/// Spectral ADC analog gain selections (`CFG1.AGAIN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 5]
pub enum Gain {
    /// 0.5x gain.
    Half = 0x00,
    /// 1x gain.
    X1 = 0x01,
    /// 2x gain.
    X2 = 0x02,
    /// 4x gain.
    X4 = 0x03,
    /// 8x gain.
    X8 = 0x04,
    /// 16x gain.
    X16 = 0x05,
    /// 32x gain.
    X32 = 0x06,
    /// 64x gain.
    X64 = 0x07,
    /// 128x gain.
    X128 = 0x08,
    /// 256x gain.
    X256 = 0x09,
    /// 512x gain.
    X512 = 0x0A,
    /// 1024x gain.
    X1024 = 0x0B,
    /// 2048x gain.
    X2048 = 0x0C,
}

impl Gain {
    /// Returns the gain multiplier doubled, so 0.5x is representable as an integer.
    pub const fn multiplier_x2(self) -> u32 {
        1 << (self as u32)
    }
}

/// Flicker-detection ADC gain selections (`FD_TIME2.FD_GAIN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 5]
pub enum FlickerGain {
    /// 0.5x gain.
    Half = 0x00,
    /// 1x gain.
    X1 = 0x01,
    /// 2x gain.
    X2 = 0x02,
    /// 4x gain.
    X4 = 0x03,
    /// 8x gain.
    X8 = 0x04,
    /// 16x gain.
    X16 = 0x05,
    /// 32x gain.
    X32 = 0x06,
    /// 64x gain.
    X64 = 0x07,
    /// 128x gain.
    X128 = 0x08,
    /// 256x gain.
    X256 = 0x09,
    /// 512x gain.
    X512 = 0x0A,
    /// 1024x gain.
    X1024 = 0x0B,
    /// 2048x gain.
    X2048 = 0x0C,
}

/// Automatic channel read-out modes encoded in `CFG20.AUTO_SMUX`.
///
/// Selects how many logical channels the device cycles through per
/// measurement. The driver always reads all 18 data slots; this setting only
/// changes which sensing elements the device routes into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 2]
pub enum AutoSmux {
    /// 6-channel read-out: FZ, FY, FXL, NIR, 2xVIS, FD.
    Channels6 = 0b00,
    /// 12-channel read-out, adding F2, F3, F4, F6 on a second cycle.
    Channels12 = 0b10,
    /// 18-channel read-out, adding F1, F7, F8, F5 on a third cycle.
    Channels18 = 0b11,
}

/// FIFO fill levels that trigger the first buffer interrupt (`CFG8.FIFO_TH`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 2]
pub enum FifoThreshold {
    /// Interrupt after 1 entry.
    Level1 = 0b00,
    /// Interrupt after 4 entries.
    Level4 = 0b01,
    /// Interrupt after 8 entries.
    Level8 = 0b10,
    /// Interrupt after 16 entries.
    Level16 = 0b11,
}

/// Data channel used for spectral threshold comparison (`CFG12.SP_TH_CH`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 3]
pub enum ThresholdChannel {
    /// Data channel 0.
    Channel0 = 0b000,
    /// Data channel 1.
    Channel1 = 0b001,
    /// Data channel 2.
    Channel2 = 0b010,
    /// Data channel 3.
    Channel3 = 0b011,
    /// Data channel 4.
    Channel4 = 0b100,
    /// Data channel 5.
    Channel5 = 0b101,
}

/// Register bank selection bit (`CFG0.REG_BANK`).
///
/// The AS7343 exposes two overlapping register address spaces. Registers at
/// addresses below `0x80` require Bank 1; registers at `0x80` and above
/// require Bank 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bank {
    /// Register bank 0 (default) for addresses `0x80..=0xFF`.
    Bank0,
    /// Register bank 1 for addresses `0x58..=0x66`.
    Bank1,
}

impl Bank {
    /// Returns the bank required to access the given register address.
    pub const fn for_address(address: u8) -> Self {
        if address < 0x80 { Self::Bank1 } else { Self::Bank0 }
    }
}

/// GPIO pin operating modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioMode {
    /// Pin driven by the device as an output.
    Output,
    /// Pin sampled by the device as an input.
    Input,
}
