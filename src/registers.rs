//! Register map definitions for the AS7343 spectral sensor.
//!
//! The device exposes two overlapping register banks selected through
//! `CFG0.REG_BANK`; every register type records its bank in the [`Register`]
//! descriptor so the access layer can switch banks before touching it.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{AutoSmux, Bank, FifoThreshold, FlickerGain, Gain, ThresholdChannel};

/// Register address of `AUXID` (Bank 1).
pub const REG_AUXID: u8 = 0x58;
/// Register address of `REVID` (Bank 1).
pub const REG_REVID: u8 = 0x59;
/// Register address of `ID` (Bank 1).
pub const REG_ID: u8 = 0x5A;
/// Register address of `CFG12` (Bank 1).
pub const REG_CFG12: u8 = 0x66;
/// Register address of `GPIO` (Bank 1).
pub const REG_GPIO: u8 = 0x6B;
/// Register address of `ENABLE`.
pub const REG_ENABLE: u8 = 0x80;
/// Register address of `ATIME`.
pub const REG_ATIME: u8 = 0x81;
/// Register address of `WTIME`.
pub const REG_WTIME: u8 = 0x83;
/// Register address of `SP_TH_L` (16-bit little-endian low threshold).
pub const REG_SP_TH_L: u8 = 0x84;
/// Register address of `SP_TH_H` (16-bit little-endian high threshold).
pub const REG_SP_TH_H: u8 = 0x86;
/// Register address of `STATUS2`.
pub const REG_STATUS2: u8 = 0x90;
/// Register address of `STATUS`.
pub const REG_STATUS: u8 = 0x93;
/// Register address of `ASTATUS`.
pub const REG_ASTATUS: u8 = 0x94;
/// Register address of `DATA0`, first of 18 consecutive 16-bit channels.
pub const REG_DATA0: u8 = 0x95;
/// Register address of `CFG0`, holding the bank-select bit.
pub const REG_CFG0: u8 = 0xBF;
/// Register address of `CFG1`.
pub const REG_CFG1: u8 = 0xC6;
/// Register address of `CFG8`.
pub const REG_CFG8: u8 = 0xC9;
/// Register address of `LED`.
pub const REG_LED: u8 = 0xCD;
/// Register address of `PERS`.
pub const REG_PERS: u8 = 0xCF;
/// Register address of `ASTEP` (16-bit little-endian integration step).
pub const REG_ASTEP: u8 = 0xD4;
/// Register address of `CFG20`.
pub const REG_CFG20: u8 = 0xD6;
/// Register address of `FD_TIME1`.
pub const REG_FD_TIME1: u8 = 0xE0;
/// Register address of `FD_TIME2`.
pub const REG_FD_TIME2: u8 = 0xE2;
/// Register address of `FD_STATUS`.
pub const REG_FD_STATUS: u8 = 0xE3;
/// Register address of `INTENAB`.
pub const REG_INTENAB: u8 = 0xF9;
/// Register address of `CONTROL`.
pub const REG_CONTROL: u8 = 0xFA;
/// Register address of `FIFO_LVL`.
pub const REG_FIFO_LVL: u8 = 0xFD;

/// Device ID returned by the `ID` register on a healthy AS7343.
pub const EXPECTED_DEVICE_ID: u8 = 0x81;

/// Maximum legal LED drive encoding (`LED.LED_DRIVE`, 7 bits).
pub const LED_DRIVE_MAX: u8 = 0x7F;

/// Maximum legal spectral persistence encoding (`PERS.APERS`, 4 bits).
pub const PERSISTENCE_MAX: u8 = 0x0F;

/// Largest programmable ASTEP value; `0xFFFF` is reserved by the datasheet.
pub const ASTEP_MAX: u16 = 0xFFFE;

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Write-only register.
    WriteOnly,
    /// Read/write register.
    ReadWrite,
}

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Raw storage backing the register payload.
    type Raw: Copy;
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
    /// Register bank that must be selected before access.
    const BANK: Bank = Bank::for_address(Self::ADDRESS);
    /// Access permission classification.
    const ACCESS: RegisterAccess;
    /// Optional reset/default value defined by the datasheet.
    const RESET_VALUE: Option<Self::Raw>;
}

/// Bitfield representation of the `AUXID` register (address `0x58`, Bank 1).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuxId {
    // Auxiliary identification (bits 3:0).
    pub auxid: B4,
    #[skip]
    __: B4,
}

/// Bitfield representation of the `REVID` register (address `0x59`, Bank 1).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevId {
    // Revision number (bits 2:0).
    pub revid: B3,
    #[skip]
    __: B5,
}

/// Bitfield representation of the `CFG12` register (address `0x66`, Bank 1).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cfg12 {
    #[skip]
    __: B5,
    // Channel routed into the spectral threshold comparator (bits 7:5).
    pub sp_th_ch: ThresholdChannel,
}

/// Bitfield representation of the `GPIO` register (address `0x6B`, Bank 1).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gpio {
    // Sampled input level (bit 0, read-only on the device).
    pub gpio_in: bool,
    // Output level driven when the pin is an output (bit 1).
    pub gpio_out: bool,
    // Input mode enable (bit 2).
    pub gpio_in_en: bool,
    // Output inversion (bit 3).
    pub gpio_inv: bool,
    #[skip]
    __: B4,
}

/// Bitfield representation of the `ENABLE` register (address `0x80`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enable {
    // Power on (bit 0).
    pub pon: bool,
    // Spectral measurement enable (bit 1).
    pub sp_en: bool,
    #[skip]
    __: B1,
    // Wait timer enable (bit 3).
    pub wen: bool,
    // SMUX command execute enable (bit 4).
    pub smuxen: bool,
    #[skip]
    __: B1,
    // Flicker detection enable (bit 6).
    pub fden: bool,
    #[skip]
    __: B1,
}

/// Bitfield representation of the `STATUS2` register (address `0x90`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status2 {
    // Flicker detection digital saturation (bit 0).
    pub fdsat_digital: bool,
    // Flicker detection analog saturation (bit 1).
    pub fdsat_analog: bool,
    #[skip]
    __: B1,
    // Spectral analog saturation (bit 3).
    pub asat_analog: bool,
    // Spectral digital saturation (bit 4).
    pub asat_digital: bool,
    #[skip]
    __: B1,
    // Spectral data valid (bit 6).
    pub avalid: bool,
    #[skip]
    __: B1,
}

/// Bitfield representation of the `STATUS` register (address `0x93`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    // System interrupt (bit 0).
    pub sint: bool,
    #[skip]
    __: B1,
    // FIFO buffer interrupt (bit 2).
    pub fint: bool,
    // Spectral channel interrupt (bit 3).
    pub aint: bool,
    #[skip]
    __: B3,
    // Spectral saturation interrupt (bit 7).
    pub asat: bool,
}

/// Bitfield representation of the `ASTATUS` register (address `0x94`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AStatus {
    // Gain applied to the latest measurement cycle (bits 3:0).
    pub again_status: B4,
    #[skip]
    __: B3,
    // Latched saturation for the latest measurement cycle (bit 7).
    pub asat_status: bool,
}

/// Bitfield representation of the `CFG0` register (address `0xBF`).
///
/// Holds the `REG_BANK` bit; the register itself remains reachable whichever
/// bank is active, otherwise switching back would be impossible.
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cfg0 {
    #[skip]
    __: B2,
    // Extended wait time multiplier (bit 2).
    pub wlong: bool,
    #[skip]
    __: B1,
    // Register bank select (bit 4): set for Bank 1, clear for Bank 0.
    pub reg_bank: bool,
    // Low-power idle (bit 5).
    pub low_power: bool,
    #[skip]
    __: B2,
}

/// Bitfield representation of the `CFG1` register (address `0xC6`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cfg1 {
    // Spectral ADC gain selection (bits 4:0).
    pub again: Gain,
    #[skip]
    __: B3,
}

/// Bitfield representation of the `CFG8` register (address `0xC9`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cfg8 {
    #[skip]
    __: B6,
    // FIFO interrupt threshold (bits 7:6).
    pub fifo_th: FifoThreshold,
}

/// Bitfield representation of the `LED` register (address `0xCD`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Led {
    // LED drive strength (bits 6:0), 0 = 4 mA up to 127 = 258 mA.
    pub led_drive: B7,
    // LED activation (bit 7).
    pub led_act: bool,
}

/// Bitfield representation of the `PERS` register (address `0xCF`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pers {
    // Spectral interrupt persistence (bits 3:0).
    pub apers: B4,
    #[skip]
    __: B4,
}

/// Bitfield representation of the `CFG20` register (address `0xD6`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cfg20 {
    #[skip]
    __: B5,
    // Automatic channel read-out mode (bits 6:5).
    pub auto_smux: AutoSmux,
    // Store flicker samples as 8-bit FIFO entries (bit 7).
    pub fd_fifo_8b: bool,
}

/// Bitfield representation of the `FD_TIME2` register (address `0xE2`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FdTime2 {
    // Upper bits of the flicker detection integration time (bits 2:0).
    pub fd_time_high: B3,
    // Flicker detection ADC gain (bits 7:3).
    pub fd_gain: FlickerGain,
}

/// Bitfield representation of the `FD_STATUS` register (address `0xE3`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FdStatus {
    // 100 Hz flicker detected (bit 0).
    pub fd_100hz: bool,
    // 120 Hz flicker detected (bit 1).
    pub fd_120hz: bool,
    // 100 Hz result valid (bit 2).
    pub fd_100hz_valid: bool,
    // 120 Hz result valid (bit 3).
    pub fd_120hz_valid: bool,
    // Flicker detection saturated (bit 4).
    pub fd_saturation: bool,
    // Flicker detection measurement finished (bit 5).
    pub fd_valid: bool,
    #[skip]
    __: B2,
}

/// Bitfield representation of the `INTENAB` register (address `0xF9`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntEnab {
    // System interrupt enable (bit 0).
    pub sien: bool,
    #[skip]
    __: B1,
    // FIFO buffer interrupt enable (bit 2).
    pub fien: bool,
    // Spectral channel interrupt enable (bit 3).
    pub sp_ien: bool,
    #[skip]
    __: B3,
    // Spectral saturation interrupt enable (bit 7).
    pub asien: bool,
}

/// Bitfield representation of the `CONTROL` register (address `0xFA`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    // Clear sleep-after-interrupt active (bit 0).
    pub clear_sai_active: bool,
    // FIFO buffer clear (bit 1).
    pub fifo_clear: bool,
    // Trigger manual autozero of the spectral engine (bit 2).
    pub sp_man_az: bool,
    // Software reset (bit 3).
    pub sw_reset: bool,
    #[skip]
    __: B4,
}

macro_rules! impl_byte_conversions {
    ($($reg:ty),+ $(,)?) => {
        $(
            impl From<u8> for $reg {
                fn from(value: u8) -> Self {
                    Self::from_bytes([value])
                }
            }

            impl From<$reg> for u8 {
                fn from(value: $reg) -> Self {
                    value.into_bytes()[0]
                }
            }
        )+
    };
}

impl_byte_conversions!(
    AuxId, RevId, Cfg12, Gpio, Enable, Status2, Status, AStatus, Cfg0, Cfg1, Cfg8, Led, Pers,
    Cfg20, FdTime2, FdStatus, IntEnab, Control,
);

impl Register for AuxId {
    type Raw = u8;
    const ADDRESS: u8 = REG_AUXID;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: Option<Self::Raw> = None;
}

impl Register for RevId {
    type Raw = u8;
    const ADDRESS: u8 = REG_REVID;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: Option<Self::Raw> = None;
}

impl Register for Cfg12 {
    type Raw = u8;
    const ADDRESS: u8 = REG_CFG12;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for Gpio {
    type Raw = u8;
    const ADDRESS: u8 = REG_GPIO;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x02);
}

impl Register for Enable {
    type Raw = u8;
    const ADDRESS: u8 = REG_ENABLE;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for Status2 {
    type Raw = u8;
    const ADDRESS: u8 = REG_STATUS2;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: Option<Self::Raw> = None;
}

impl Register for Status {
    type Raw = u8;
    const ADDRESS: u8 = REG_STATUS;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = None;
}

impl Register for AStatus {
    type Raw = u8;
    const ADDRESS: u8 = REG_ASTATUS;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: Option<Self::Raw> = None;
}

impl Register for Cfg0 {
    type Raw = u8;
    const ADDRESS: u8 = REG_CFG0;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for Cfg1 {
    type Raw = u8;
    const ADDRESS: u8 = REG_CFG1;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x0C);
}

impl Register for Cfg8 {
    type Raw = u8;
    const ADDRESS: u8 = REG_CFG8;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for Led {
    type Raw = u8;
    const ADDRESS: u8 = REG_LED;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for Pers {
    type Raw = u8;
    const ADDRESS: u8 = REG_PERS;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for Cfg20 {
    type Raw = u8;
    const ADDRESS: u8 = REG_CFG20;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for FdTime2 {
    type Raw = u8;
    const ADDRESS: u8 = REG_FD_TIME2;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for FdStatus {
    type Raw = u8;
    const ADDRESS: u8 = REG_FD_STATUS;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = None;
}

impl Register for IntEnab {
    type Raw = u8;
    const ADDRESS: u8 = REG_INTENAB;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for Control {
    type Raw = u8;
    const ADDRESS: u8 = REG_CONTROL;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}
