//! Integration tests driving the full I2C transaction sequences through
//! `embedded-hal-mock`.

use as7343::As7343;
use as7343::config::Config;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

const ADDR: u8 = 0x39;

const REG_GPIO: u8 = 0x6B;
const REG_ENABLE: u8 = 0x80;
const REG_ATIME: u8 = 0x81;
const REG_WTIME: u8 = 0x83;
const REG_SP_TH_L: u8 = 0x84;
const REG_SP_TH_H: u8 = 0x86;
const REG_DATA0: u8 = 0x95;
const REG_CFG0: u8 = 0xBF;
const REG_CFG1: u8 = 0xC6;
const REG_ASTEP: u8 = 0xD4;
const REG_CFG20: u8 = 0xD6;
const REG_ID: u8 = 0x5A;

/// Wire traffic produced by `init()` with the default configuration.
///
/// The reset-state device starts in Bank 0 with all registers cleared, so
/// the ID read first flips `CFG0.REG_BANK` on and the ENABLE access flips it
/// back off. Subsequent Bank 0 accesses read CFG0 but find nothing to change.
fn init_expectations() -> Vec<I2cTransaction> {
    vec![
        // Device ID check (Bank 1).
        I2cTransaction::write_read(ADDR, vec![REG_CFG0], vec![0x00]),
        I2cTransaction::write(ADDR, vec![REG_CFG0, 0x10]),
        I2cTransaction::write_read(ADDR, vec![REG_ID], vec![0x81]),
        // Power on (Bank 0).
        I2cTransaction::write_read(ADDR, vec![REG_CFG0], vec![0x10]),
        I2cTransaction::write(ADDR, vec![REG_CFG0, 0x00]),
        I2cTransaction::write_read(ADDR, vec![REG_ENABLE], vec![0x00]),
        I2cTransaction::write(ADDR, vec![REG_ENABLE, 0x01]),
        // Gain: default X128 encodes as 0x08.
        I2cTransaction::write_read(ADDR, vec![REG_CFG0], vec![0x00]),
        I2cTransaction::write_read(ADDR, vec![REG_CFG1], vec![0x00]),
        I2cTransaction::write(ADDR, vec![REG_CFG1, 0x08]),
        // Auto-SMUX: default 18-channel mode encodes as CFG20 bits 6:5.
        I2cTransaction::write_read(ADDR, vec![REG_CFG0], vec![0x00]),
        I2cTransaction::write_read(ADDR, vec![REG_CFG20], vec![0x00]),
        I2cTransaction::write(ADDR, vec![REG_CFG20, 0x60]),
        // ATIME.
        I2cTransaction::write_read(ADDR, vec![REG_CFG0], vec![0x00]),
        I2cTransaction::write(ADDR, vec![REG_ATIME, 0x00]),
        // ASTEP: default 999 goes out little-endian in one burst.
        I2cTransaction::write_read(ADDR, vec![REG_CFG0], vec![0x00]),
        I2cTransaction::transaction_start(ADDR),
        I2cTransaction::write(ADDR, vec![REG_ASTEP]),
        I2cTransaction::write(ADDR, vec![0xE7, 0x03]),
        I2cTransaction::transaction_end(ADDR),
        // WTIME.
        I2cTransaction::write_read(ADDR, vec![REG_CFG0], vec![0x00]),
        I2cTransaction::write(ADDR, vec![REG_WTIME, 0x00]),
        // Wait timer stays disabled: WEN already clear, nothing written back.
        I2cTransaction::write_read(ADDR, vec![REG_CFG0], vec![0x00]),
        I2cTransaction::write_read(ADDR, vec![REG_ENABLE], vec![0x01]),
    ]
}

#[test]
fn init_performs_id_check_and_applies_config() {
    let i2c = I2cMock::new(&init_expectations());
    let mut device = As7343::new_i2c(i2c, Config::default());

    device.init().unwrap();

    let (mut i2c, _) = device.release_i2c();
    i2c.done();
}

#[test]
fn init_fails_on_foreign_device_id() {
    let expectations = [
        I2cTransaction::write_read(ADDR, vec![REG_CFG0], vec![0x00]),
        I2cTransaction::write(ADDR, vec![REG_CFG0, 0x10]),
        I2cTransaction::write_read(ADDR, vec![REG_ID], vec![0x42]),
    ];
    let i2c = I2cMock::new(&expectations);
    let mut device = As7343::new_i2c(i2c, Config::default());

    assert!(device.init().is_err());

    let (mut i2c, _) = device.release_i2c();
    i2c.done();
}

#[test]
fn acquisition_reads_the_full_data_block_in_one_transaction() {
    let mut response = vec![0u8; 36];
    for (index, chunk) in response.chunks_exact_mut(2).enumerate() {
        chunk.copy_from_slice(&(0x0100u16 + index as u16).to_le_bytes());
    }

    let mut expectations = init_expectations();
    expectations.extend([
        I2cTransaction::write_read(ADDR, vec![REG_CFG0], vec![0x00]),
        I2cTransaction::write_read(ADDR, vec![REG_DATA0], response),
    ]);

    let i2c = I2cMock::new(&expectations);
    let mut device = As7343::new_i2c(i2c, Config::default());

    device.init().unwrap();
    device.read_all_channels().unwrap();

    for index in 0..18 {
        assert_eq!(device.channel(index), 0x0100 + index as u16);
    }
    assert_eq!(device.channel(18), 0);

    let (mut i2c, _) = device.release_i2c();
    i2c.done();
}

#[test]
fn thresholds_are_written_as_little_endian_bursts() {
    let mut expectations = init_expectations();
    expectations.extend([
        I2cTransaction::write_read(ADDR, vec![REG_CFG0], vec![0x00]),
        I2cTransaction::transaction_start(ADDR),
        I2cTransaction::write(ADDR, vec![REG_SP_TH_L]),
        I2cTransaction::write(ADDR, vec![0x02, 0x01]),
        I2cTransaction::transaction_end(ADDR),
        I2cTransaction::write_read(ADDR, vec![REG_CFG0], vec![0x00]),
        I2cTransaction::transaction_start(ADDR),
        I2cTransaction::write(ADDR, vec![REG_SP_TH_H]),
        I2cTransaction::write(ADDR, vec![0x34, 0x12]),
        I2cTransaction::transaction_end(ADDR),
    ]);

    let i2c = I2cMock::new(&expectations);
    let mut device = As7343::new_i2c(i2c, Config::default());

    device.init().unwrap();
    device.set_spectral_thresholds(0x0102, 0x1234).unwrap();

    let (mut i2c, _) = device.release_i2c();
    i2c.done();
}

#[test]
fn bank_one_register_access_switches_and_preserves_cfg0() {
    let mut expectations = init_expectations();
    expectations.extend([
        // CFG0 carries an unrelated bit that must survive the bank flip.
        I2cTransaction::write_read(ADDR, vec![REG_CFG0], vec![0x04]),
        I2cTransaction::write(ADDR, vec![REG_CFG0, 0x14]),
        I2cTransaction::write_read(ADDR, vec![REG_GPIO], vec![0x01]),
    ]);

    let i2c = I2cMock::new(&expectations);
    let mut device = As7343::new_i2c(i2c, Config::default());

    device.init().unwrap();
    assert!(device.gpio_read().unwrap());

    let (mut i2c, _) = device.release_i2c();
    i2c.done();
}

#[test]
fn operations_are_rejected_before_init() {
    let i2c = I2cMock::new(&[]);
    let mut device = As7343::new_i2c(i2c, Config::default());

    assert!(device.power_on().is_err());
    assert!(device.read_all_channels().is_err());

    let (mut i2c, _) = device.release_i2c();
    i2c.done();
}
