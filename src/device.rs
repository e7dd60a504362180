//! High-level AS7343 device driver implementation.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::interface::As7343Interface;
use crate::interface::i2c::I2cInterface;
use crate::params::{
    AutoSmux,
    Bank,
    FifoThreshold,
    FlickerGain,
    Gain,
    GpioMode,
    ThresholdChannel,
};
use crate::registers::{
    AStatus,
    Cfg0,
    Cfg1,
    Cfg8,
    Cfg12,
    Cfg20,
    Control,
    Enable,
    FdStatus,
    FdTime2,
    Gpio,
    IntEnab,
    Led,
    Pers,
    Register,
    Status,
    Status2,
    ASTEP_MAX,
    EXPECTED_DEVICE_ID,
    LED_DRIVE_MAX,
    PERSISTENCE_MAX,
    REG_ASTEP,
    REG_ATIME,
    REG_CFG0,
    REG_CONTROL,
    REG_DATA0,
    REG_FD_TIME1,
    REG_FIFO_LVL,
    REG_ID,
    REG_SP_TH_H,
    REG_SP_TH_L,
    REG_WTIME,
};
use crate::spectral::{CHANNEL_COUNT, ChannelSnapshot, SNAPSHOT_BYTES};
use embedded_hal::i2c::I2c;

/// High-level synchronous driver for the AS7343 spectral sensor.
pub struct As7343<IFACE> {
    interface: IFACE,
    config: Config,
    snapshot: ChannelSnapshot,
    ready: bool,
}

/// Combined view of the `STATUS` and `STATUS2` registers with explicit flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// STATUS[0] SINT.
    pub system_int: bool,
    /// STATUS[2] FINT.
    pub fifo_int: bool,
    /// STATUS[3] AINT.
    pub spectral_int: bool,
    /// STATUS[7] ASAT.
    pub saturation_int: bool,
    /// STATUS2[6] AVALID.
    pub data_valid: bool,
    /// STATUS2[4] ASAT_DIGITAL.
    pub saturated_digital: bool,
    /// STATUS2[3] ASAT_ANALOG.
    pub saturated_analog: bool,
    /// STATUS2[1] FDSAT_ANALOG.
    pub flicker_saturated_analog: bool,
    /// STATUS2[0] FDSAT_DIGITAL.
    pub flicker_saturated_digital: bool,
}

impl StatusSnapshot {
    /// Builds a snapshot from the raw STATUS and STATUS2 bitfields.
    pub fn from_registers(status: Status, status2: Status2) -> Self {
        Self {
            system_int: status.sint(),
            fifo_int: status.fint(),
            spectral_int: status.aint(),
            saturation_int: status.asat(),
            data_valid: status2.avalid(),
            saturated_digital: status2.asat_digital(),
            saturated_analog: status2.asat_analog(),
            flicker_saturated_analog: status2.fdsat_analog(),
            flicker_saturated_digital: status2.fdsat_digital(),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusSnapshot {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "StatusSnapshot {{\n    SINT: {},\n    FINT: {},\n    AINT: {},\n    ASAT: {},\n    AVALID: {},\n    ASAT_DIG: {},\n    ASAT_ANA: {},\n    FDSAT_ANA: {},\n    FDSAT_DIG: {}\n}}",
            self.system_int,
            self.fifo_int,
            self.spectral_int,
            self.saturation_int,
            self.data_valid,
            self.saturated_digital,
            self.saturated_analog,
            self.flicker_saturated_analog,
            self.flicker_saturated_digital
        );
    }
}

/// Decoded view of the `FD_STATUS` flicker detection register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlickerStatus {
    /// 100 Hz flicker detected.
    pub flicker_100hz: bool,
    /// 120 Hz flicker detected.
    pub flicker_120hz: bool,
    /// The 100 Hz result is valid.
    pub flicker_100hz_valid: bool,
    /// The 120 Hz result is valid.
    pub flicker_120hz_valid: bool,
    /// The flicker ADC saturated during the measurement.
    pub saturated: bool,
    /// The flicker measurement cycle has finished.
    pub measurement_valid: bool,
}

impl FlickerStatus {
    /// Builds a status view from the raw FD_STATUS bitfield.
    pub fn from_register(status: FdStatus) -> Self {
        Self {
            flicker_100hz: status.fd_100hz(),
            flicker_120hz: status.fd_120hz(),
            flicker_100hz_valid: status.fd_100hz_valid(),
            flicker_120hz_valid: status.fd_120hz_valid(),
            saturated: status.fd_saturation(),
            measurement_valid: status.fd_valid(),
        }
    }
}

impl<IFACE> As7343<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    ///
    /// The driver starts unbound; call [`init`](Self::init) before issuing
    /// any other operation.
    pub fn new(interface: IFACE, config: Config) -> Self {
        Self {
            interface,
            config,
            snapshot: ChannelSnapshot::new(),
            ready: false,
        }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> (IFACE, Config) {
        (self.interface, self.config)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the most recent successful channel snapshot.
    pub fn channels(&self) -> &ChannelSnapshot {
        &self.snapshot
    }
}

impl<I2C> As7343<I2cInterface<I2C>>
where
    I2C: I2c,
{
    // ==================================================================
    // == I2C Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for I2C transports at the default address.
    pub fn new_i2c(i2c: I2C, config: Config) -> Self {
        Self::new(I2cInterface::new(i2c), config)
    }

    /// Convenience constructor for I2C transports at a custom address.
    pub fn new_i2c_with_address(i2c: I2C, address: u8, config: Config) -> Self {
        Self::new(I2cInterface::with_address(i2c, address), config)
    }

    /// Releases the driver, returning the I2C peripheral and configuration.
    pub fn release_i2c(self) -> (I2C, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<IFACE, CommE> As7343<IFACE>
where
    IFACE: As7343Interface<Error = CommE>,
{
    // ==================================================================
    // == Initialization & Identification ===============================
    // ==================================================================
    /// Initializes the sensor: verifies the device ID, powers it on, and
    /// applies the current configuration.
    ///
    /// Every other bus-touching operation fails with
    /// [`Error::NotInitialized`] until this has succeeded once.
    pub fn init(&mut self) -> Result<(), CommE> {
        self.config.validate().map_err(|_| Error::InvalidArgument)?;

        let id = self.read_device_id()?;
        if id != EXPECTED_DEVICE_ID {
            return Err(Error::DeviceIdMismatch);
        }

        self.ready = true;
        self.power_on()?;
        self.configure(self.config)?;
        Ok(())
    }

    /// Applies a new measurement configuration to the device.
    pub fn configure(&mut self, config: Config) -> Result<(), CommE> {
        config.validate().map_err(|_| Error::InvalidArgument)?;

        self.set_gain(config.gain)?;
        self.set_auto_smux(config.auto_smux)?;
        self.set_integration_time(config.atime)?;
        self.set_integration_step(config.astep)?;
        self.set_wait_time(config.wtime)?;
        if config.wait_enable {
            self.wait_enable()?;
        } else {
            self.wait_disable()?;
        }

        self.config = config;
        Ok(())
    }

    /// Reads the device ID register (`0x5A`, Bank 1); expected value `0x81`.
    pub fn device_id(&mut self) -> Result<u8, CommE> {
        self.ensure_ready()?;
        self.read_device_id()
    }

    /// Reads the auxiliary ID (`AUXID[3:0]`).
    pub fn aux_id(&mut self) -> Result<u8, CommE> {
        use crate::registers::AuxId;
        Ok(self.read_reg::<AuxId>()?.auxid())
    }

    /// Reads the device revision number (`REVID[2:0]`).
    pub fn revision_id(&mut self) -> Result<u8, CommE> {
        use crate::registers::RevId;
        Ok(self.read_reg::<RevId>()?.revid())
    }

    /// Issues a software reset through the CONTROL register.
    ///
    /// All CONTROL bits are self-clearing strobes, so the command is written
    /// directly instead of read-modify-written.
    pub fn reset(&mut self) -> Result<(), CommE> {
        let command = Control::new().with_sw_reset(true);
        self.write_scalar(REG_CONTROL, command.into())
    }

    // ==================================================================
    // == Power & Measurement Control ===================================
    // ==================================================================
    /// Powers on the device oscillator (`ENABLE.PON`).
    pub fn power_on(&mut self) -> Result<(), CommE> {
        self.modify_reg::<Enable, _>(|enable| enable.set_pon(true))?;
        Ok(())
    }

    /// Powers off the device (`ENABLE.PON` cleared).
    pub fn power_off(&mut self) -> Result<(), CommE> {
        self.modify_reg::<Enable, _>(|enable| enable.set_pon(false))?;
        Ok(())
    }

    /// Starts spectral measurements (`ENABLE.SP_EN`).
    pub fn spectral_measurement_enable(&mut self) -> Result<(), CommE> {
        self.modify_reg::<Enable, _>(|enable| enable.set_sp_en(true))?;
        Ok(())
    }

    /// Stops spectral measurements (`ENABLE.SP_EN` cleared).
    pub fn spectral_measurement_disable(&mut self) -> Result<(), CommE> {
        self.modify_reg::<Enable, _>(|enable| enable.set_sp_en(false))?;
        Ok(())
    }

    /// Enables the wait timer between measurements (`ENABLE.WEN`).
    pub fn wait_enable(&mut self) -> Result<(), CommE> {
        self.modify_reg::<Enable, _>(|enable| enable.set_wen(true))?;
        Ok(())
    }

    /// Disables the wait timer (`ENABLE.WEN` cleared).
    pub fn wait_disable(&mut self) -> Result<(), CommE> {
        self.modify_reg::<Enable, _>(|enable| enable.set_wen(false))?;
        Ok(())
    }

    /// Sets the wait time between measurements in 2.78 ms units.
    pub fn set_wait_time(&mut self, wtime: u8) -> Result<(), CommE> {
        self.write_scalar(REG_WTIME, wtime)?;
        self.config.wtime = wtime;
        Ok(())
    }

    /// Sets the spectral ADC analog gain.
    pub fn set_gain(&mut self, gain: Gain) -> Result<(), CommE> {
        self.modify_reg::<Cfg1, _>(|cfg1| cfg1.set_again(gain))?;
        self.config.gain = gain;
        Ok(())
    }

    /// Sets the integration time multiplier (`ATIME`).
    pub fn set_integration_time(&mut self, atime: u8) -> Result<(), CommE> {
        self.write_scalar(REG_ATIME, atime)?;
        self.config.atime = atime;
        Ok(())
    }

    /// Sets the integration step size (`ASTEP`) in 2.78 µs units.
    ///
    /// `0xFFFF` is reserved by the datasheet and rejected.
    pub fn set_integration_step(&mut self, astep: u16) -> Result<(), CommE> {
        if astep > ASTEP_MAX {
            return Err(Error::InvalidArgument);
        }

        self.write_word(REG_ASTEP, astep)?;
        self.config.astep = astep;
        Ok(())
    }

    /// Selects the automatic channel read-out mode (`CFG20.AUTO_SMUX`).
    ///
    /// The driver keeps reading all 18 data slots whatever the mode; the
    /// setting only changes which sensing elements the device routes into
    /// them.
    pub fn set_auto_smux(&mut self, auto_smux: AutoSmux) -> Result<(), CommE> {
        self.modify_reg::<Cfg20, _>(|cfg20| cfg20.set_auto_smux(auto_smux))?;
        self.config.auto_smux = auto_smux;
        Ok(())
    }

    // ==================================================================
    // == Status ========================================================
    // ==================================================================
    /// Returns a snapshot of the `STATUS` and `STATUS2` registers.
    pub fn status(&mut self) -> Result<StatusSnapshot, CommE> {
        let status = self.read_reg::<Status>()?;
        let status2 = self.read_reg::<Status2>()?;
        Ok(StatusSnapshot::from_registers(status, status2))
    }

    /// Returns whether a completed spectral measurement is available.
    pub fn data_ready(&mut self) -> Result<bool, CommE> {
        Ok(self.read_reg::<Status2>()?.avalid())
    }

    /// Returns the gain applied to the latest completed measurement cycle.
    pub fn gain_status(&mut self) -> Result<u8, CommE> {
        Ok(self.read_reg::<AStatus>()?.again_status())
    }

    // ==================================================================
    // == LED Control ===================================================
    // ==================================================================
    /// Activates the on-board LED (`LED.LED_ACT`).
    pub fn led_on(&mut self) -> Result<(), CommE> {
        self.modify_reg::<Led, _>(|led| led.set_led_act(true))?;
        Ok(())
    }

    /// Deactivates the on-board LED (`LED.LED_ACT` cleared).
    pub fn led_off(&mut self) -> Result<(), CommE> {
        self.modify_reg::<Led, _>(|led| led.set_led_act(false))?;
        Ok(())
    }

    /// Sets the LED drive strength, 0 (4 mA) through 127 (258 mA).
    ///
    /// Values above 127 are rejected before any bus traffic.
    pub fn set_led_drive(&mut self, drive: u8) -> Result<(), CommE> {
        if drive > LED_DRIVE_MAX {
            return Err(Error::InvalidArgument);
        }

        self.modify_reg::<Led, _>(|led| led.set_led_drive(drive))?;
        Ok(())
    }

    // ==================================================================
    // == GPIO ==========================================================
    // ==================================================================
    /// Configures the GPIO pin as input or output.
    pub fn set_gpio_mode(&mut self, mode: GpioMode) -> Result<(), CommE> {
        self.modify_reg::<Gpio, _>(|gpio| {
            gpio.set_gpio_in_en(matches!(mode, GpioMode::Input));
        })?;
        Ok(())
    }

    /// Drives the GPIO output level.
    pub fn gpio_write(&mut self, level: bool) -> Result<(), CommE> {
        self.modify_reg::<Gpio, _>(|gpio| gpio.set_gpio_out(level))?;
        Ok(())
    }

    /// Samples the GPIO input level.
    pub fn gpio_read(&mut self) -> Result<bool, CommE> {
        Ok(self.read_reg::<Gpio>()?.gpio_in())
    }

    /// Inverts the GPIO output polarity.
    pub fn set_gpio_inverted(&mut self, inverted: bool) -> Result<(), CommE> {
        self.modify_reg::<Gpio, _>(|gpio| gpio.set_gpio_inv(inverted))?;
        Ok(())
    }

    // ==================================================================
    // == Interrupts & Thresholds =======================================
    // ==================================================================
    /// Updates interrupt enable flags; `None` leaves a flag unchanged.
    pub fn configure_interrupts(
        &mut self,
        system: Option<bool>,
        fifo: Option<bool>,
        spectral: Option<bool>,
        saturation: Option<bool>,
    ) -> Result<(), CommE> {
        self.modify_reg::<IntEnab, _>(|intenab| {
            if let Some(enabled) = system {
                intenab.set_sien(enabled);
            }

            if let Some(enabled) = fifo {
                intenab.set_fien(enabled);
            }

            if let Some(enabled) = spectral {
                intenab.set_sp_ien(enabled);
            }

            if let Some(enabled) = saturation {
                intenab.set_asien(enabled);
            }
        })?;
        Ok(())
    }

    /// Programs the spectral low and high interrupt thresholds.
    ///
    /// Each threshold goes out as one two-byte little-endian burst write so
    /// the device never observes a half-updated value.
    pub fn set_spectral_thresholds(&mut self, low: u16, high: u16) -> Result<(), CommE> {
        self.write_word(REG_SP_TH_L, low)?;
        self.write_word(REG_SP_TH_H, high)
    }

    /// Sets the spectral interrupt persistence filter (`PERS.APERS`, 0-15).
    pub fn set_spectral_persistence(&mut self, cycles: u8) -> Result<(), CommE> {
        if cycles > PERSISTENCE_MAX {
            return Err(Error::InvalidArgument);
        }

        self.modify_reg::<Pers, _>(|pers| pers.set_apers(cycles))?;
        Ok(())
    }

    /// Selects the data channel compared against the spectral thresholds.
    pub fn set_threshold_channel(&mut self, channel: ThresholdChannel) -> Result<(), CommE> {
        self.modify_reg::<Cfg12, _>(|cfg12| cfg12.set_sp_th_ch(channel))?;
        Ok(())
    }

    /// Sets the FIFO fill level that raises the buffer interrupt.
    pub fn set_fifo_threshold(&mut self, threshold: FifoThreshold) -> Result<(), CommE> {
        self.modify_reg::<Cfg8, _>(|cfg8| cfg8.set_fifo_th(threshold))?;
        Ok(())
    }

    /// Returns the current FIFO fill level in entries.
    pub fn fifo_level(&mut self) -> Result<u8, CommE> {
        self.read_scalar(REG_FIFO_LVL)
    }

    // ==================================================================
    // == Flicker Detection =============================================
    // ==================================================================
    /// Enables the flicker detection engine (`ENABLE.FDEN`).
    pub fn flicker_detection_enable(&mut self) -> Result<(), CommE> {
        self.modify_reg::<Enable, _>(|enable| enable.set_fden(true))?;
        Ok(())
    }

    /// Disables the flicker detection engine (`ENABLE.FDEN` cleared).
    pub fn flicker_detection_disable(&mut self) -> Result<(), CommE> {
        self.modify_reg::<Enable, _>(|enable| enable.set_fden(false))?;
        Ok(())
    }

    /// Sets the flicker detection ADC gain.
    pub fn set_flicker_gain(&mut self, gain: FlickerGain) -> Result<(), CommE> {
        self.modify_reg::<FdTime2, _>(|fd_time2| fd_time2.set_fd_gain(gain))?;
        Ok(())
    }

    /// Sets the flicker detection integration time (`FD_TIME1`).
    pub fn set_flicker_time(&mut self, fd_time: u8) -> Result<(), CommE> {
        self.write_scalar(REG_FD_TIME1, fd_time)
    }

    /// Reads and decodes the flicker detection status register.
    pub fn flicker_status(&mut self) -> Result<FlickerStatus, CommE> {
        Ok(FlickerStatus::from_register(self.read_reg::<FdStatus>()?))
    }

    // ==================================================================
    // == Spectral Data Acquisition =====================================
    // ==================================================================
    /// Captures a consistent snapshot of all 18 spectral data channels.
    ///
    /// Selects Bank 0 and burst-reads the full data block in one bus
    /// transaction. A short read fails with [`Error::PartialRead`] and leaves
    /// the previous snapshot untouched; on success every channel slot is
    /// refreshed at once.
    pub fn read_all_channels(&mut self) -> Result<(), CommE> {
        self.ensure_ready()?;
        self.select_bank(Bank::Bank0)?;

        let mut raw = [0u8; SNAPSHOT_BYTES];
        let count = self
            .interface
            .read_many(REG_DATA0, &mut raw)
            .map_err(Error::from)?;

        if count != SNAPSHOT_BYTES {
            return Err(Error::PartialRead);
        }

        self.snapshot.refresh(&raw);
        Ok(())
    }

    /// Returns the most recent count for the channel at `index`.
    ///
    /// Out-of-range indices return 0 without error;
    /// [`try_channel`](Self::try_channel) is the checked variant.
    pub fn channel(&self, index: usize) -> u16 {
        self.snapshot.channel(index)
    }

    /// Returns the count at `index`, rejecting indices outside `0..18`.
    pub fn try_channel(&self, index: usize) -> Result<u16, CommE> {
        if index >= CHANNEL_COUNT {
            return Err(Error::InvalidArgument);
        }

        Ok(self.snapshot.channel(index))
    }

    /// Red count (F6, 640 nm) from the latest snapshot.
    pub fn red(&self) -> u16 {
        self.snapshot.red()
    }

    /// Green count (FY, 555 nm) from the latest snapshot.
    pub fn green(&self) -> u16 {
        self.snapshot.green()
    }

    /// Blue count (FZ, 450 nm) from the latest snapshot.
    pub fn blue(&self) -> u16 {
        self.snapshot.blue()
    }

    /// Near-infrared count (855 nm) from the latest snapshot.
    pub fn nir(&self) -> u16 {
        self.snapshot.nir()
    }

    // ==================================================================
    // == Register Access Layer ==========================================
    // ==================================================================

    fn ensure_ready(&self) -> Result<(), CommE> {
        if self.ready {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    /// Selects the register bank by toggling `CFG0.REG_BANK` while
    /// preserving every other bit.
    ///
    /// CFG0 stays reachable whichever bank is active, so this is a plain
    /// read-modify-write with no recursion. It is reissued before every
    /// register access rather than cached: the device-side bit is the only
    /// authority on the active bank.
    fn select_bank(&mut self, bank: Bank) -> Result<(), CommE> {
        let current = self.interface.read_register(REG_CFG0).map_err(Error::from)?;

        let mut cfg0 = Cfg0::from(current);
        cfg0.set_reg_bank(matches!(bank, Bank::Bank1));

        let updated = u8::from(cfg0);
        if updated != current {
            self.interface
                .write_register(REG_CFG0, updated)
                .map_err(Error::from)?;
        }

        Ok(())
    }

    /// Reads a bit-field register after selecting its bank.
    fn read_reg<R>(&mut self) -> Result<R, CommE>
    where
        R: Register<Raw = u8> + From<u8>,
    {
        self.ensure_ready()?;
        self.select_bank(R::BANK)?;

        let raw = self
            .interface
            .read_register(R::ADDRESS)
            .map_err(Error::from)?;
        Ok(R::from(raw))
    }

    /// Read-modify-write cycle for a bit-field register.
    ///
    /// Reads the current byte, applies `mutate` to the decoded fields, and
    /// writes the result back, leaving sibling fields untouched. Either bus
    /// failure aborts the operation; no retry is attempted.
    fn modify_reg<R, F>(&mut self, mutate: F) -> Result<R, CommE>
    where
        R: Register<Raw = u8> + From<u8> + Into<u8> + Copy,
        F: FnOnce(&mut R),
    {
        self.ensure_ready()?;
        self.select_bank(R::BANK)?;

        let current = self
            .interface
            .read_register(R::ADDRESS)
            .map_err(Error::from)?;

        let mut reg = R::from(current);
        mutate(&mut reg);

        let updated: u8 = reg.into();
        if updated != current {
            self.interface
                .write_register(R::ADDRESS, updated)
                .map_err(Error::from)?;
        }

        Ok(reg)
    }

    /// Writes a register that carries a plain byte with no sub-fields.
    fn write_scalar(&mut self, address: u8, value: u8) -> Result<(), CommE> {
        self.ensure_ready()?;
        self.select_bank(Bank::for_address(address))?;

        self.interface
            .write_register(address, value)
            .map_err(Error::from)
    }

    /// Reads a register that carries a plain byte with no sub-fields.
    fn read_scalar(&mut self, address: u8) -> Result<u8, CommE> {
        self.ensure_ready()?;
        self.select_bank(Bank::for_address(address))?;

        self.interface.read_register(address).map_err(Error::from)
    }

    /// Writes a 16-bit little-endian register pair as one burst transaction.
    fn write_word(&mut self, address: u8, value: u16) -> Result<(), CommE> {
        self.ensure_ready()?;
        self.select_bank(Bank::for_address(address))?;

        self.interface
            .write_many(address, &value.to_le_bytes())
            .map_err(Error::from)
    }

    /// Reads the ID register without the readiness gate; used during `init`.
    fn read_device_id(&mut self) -> Result<u8, CommE> {
        self.select_bank(Bank::Bank1)?;
        self.interface.read_register(REG_ID).map_err(Error::from)
    }
}
