//! I2C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::{I2c, Operation};

use super::As7343Interface;

/// Default I2C address of the AS7343.
pub const DEFAULT_ADDRESS: u8 = 0x39;

/// I2C-based interface implementation for the AS7343 driver.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface using the default device address (`0x39`).
    pub const fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            address: DEFAULT_ADDRESS,
        }
    }

    /// Creates a new interface using a custom device address.
    pub const fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Returns the configured device address.
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Provides mutable access to the wrapped I2C peripheral.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned I2C peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> As7343Interface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value])
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_many(register, &mut value)?;
        Ok(value[0])
    }

    fn read_many(
        &mut self,
        register: u8,
        buf: &mut [u8],
    ) -> core::result::Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }

        self.i2c.write_read(self.address, &[register], buf)?;
        Ok(buf.len())
    }

    fn write_many(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error> {
        if data.is_empty() {
            return Ok(());
        }

        // Adjacent same-direction operations are merged into one write on the
        // wire, so register pointer and payload form a single transaction.
        let register = [register];
        let mut operations = [Operation::Write(&register), Operation::Write(data)];
        self.i2c.transaction(self.address, &mut operations)
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_ADDRESS, I2cInterface};
    use crate::interface::As7343Interface;
    use core::convert::Infallible;
    use embedded_hal::i2c::{ErrorType, I2c, Operation};

    struct MockBus<'a> {
        expectations: &'a [BusExpectation<'a>],
        index: usize,
    }

    impl<'a> MockBus<'a> {
        fn new(expectations: &'a [BusExpectation<'a>]) -> Self {
            Self {
                expectations,
                index: 0,
            }
        }
    }

    impl<'a> Drop for MockBus<'a> {
        fn drop(&mut self) {
            assert_eq!(
                self.index,
                self.expectations.len(),
                "not all I2C expectations consumed"
            );
        }
    }

    impl<'a> ErrorType for MockBus<'a> {
        type Error = Infallible;
    }

    impl<'a> I2c for MockBus<'a> {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            let expected = self
                .expectations
                .get(self.index)
                .expect("unexpected I2C transaction");
            self.index += 1;

            assert_eq!(address, DEFAULT_ADDRESS, "device address mismatch");

            match *expected {
                BusExpectation::Write { bytes } => {
                    let mut offset = 0;
                    for op in operations.iter() {
                        match op {
                            Operation::Write(data) => {
                                assert_eq!(
                                    *data,
                                    &bytes[offset..offset + data.len()],
                                    "written bytes mismatch"
                                );
                                offset += data.len();
                            }
                            _ => panic!("expected write-only transaction"),
                        }
                    }
                    assert_eq!(offset, bytes.len(), "write length mismatch");
                }
                BusExpectation::WriteRead { register, response } => {
                    assert_eq!(operations.len(), 2, "expected write+read operations");
                    let (first, rest) = operations.split_first_mut().expect("missing first op");
                    match first {
                        Operation::Write(data) => assert_eq!(*data, &[register]),
                        _ => panic!("first operation must be write"),
                    }

                    let second = rest.first_mut().expect("missing second op");
                    match second {
                        Operation::Read(buf) => {
                            assert_eq!(buf.len(), response.len(), "response length mismatch");
                            buf.copy_from_slice(response);
                        }
                        _ => panic!("second operation must be read"),
                    }
                }
            }

            Ok(())
        }
    }

    #[derive(Clone, Copy)]
    enum BusExpectation<'a> {
        Write { bytes: &'a [u8] },
        WriteRead { register: u8, response: &'a [u8] },
    }

    #[test]
    fn write_register_sends_register_and_value() {
        let expectations = [BusExpectation::Write {
            bytes: &[0xCD, 0x7F],
        }];
        let mock = MockBus::new(&expectations);
        let mut interface = I2cInterface::new(mock);

        interface.write_register(0xCD, 0x7F).unwrap();
    }

    #[test]
    fn read_register_uses_write_read() {
        let expectations = [BusExpectation::WriteRead {
            register: 0x5A,
            response: &[0x81],
        }];
        let mock = MockBus::new(&expectations);
        let mut interface = I2cInterface::new(mock);

        let value = interface.read_register(0x5A).unwrap();
        assert_eq!(value, 0x81);
    }

    #[test]
    fn read_many_reports_bytes_read() {
        let expectations = [BusExpectation::WriteRead {
            register: 0x95,
            response: &[0x34, 0x12, 0x78, 0x56],
        }];
        let mock = MockBus::new(&expectations);
        let mut interface = I2cInterface::new(mock);

        let mut buf = [0u8; 4];
        let count = interface.read_many(0x95, &mut buf).unwrap();
        assert_eq!(count, 4);
        assert_eq!(buf, [0x34, 0x12, 0x78, 0x56]);
    }

    #[test]
    fn write_many_issues_single_transaction() {
        let expectations = [BusExpectation::Write {
            bytes: &[0x86, 0x34, 0x12],
        }];
        let mock = MockBus::new(&expectations);
        let mut interface = I2cInterface::new(mock);

        interface.write_many(0x86, &[0x34, 0x12]).unwrap();
    }

    #[test]
    fn read_many_ignores_empty_buffer() {
        let expectations: [BusExpectation; 0] = [];
        let mock = MockBus::new(&expectations);
        let mut interface = I2cInterface::new(mock);

        let count = interface.read_many(0x95, &mut []).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn write_many_ignores_empty_payload() {
        let expectations: [BusExpectation; 0] = [];
        let mock = MockBus::new(&expectations);
        let mut interface = I2cInterface::new(mock);

        interface.write_many(0xD4, &[]).unwrap();
    }

    #[test]
    fn custom_address_is_reported() {
        let expectations: [BusExpectation; 0] = [];
        let mock = MockBus::new(&expectations);
        let interface = I2cInterface::with_address(mock, 0x39);
        assert_eq!(interface.address(), 0x39);
    }
}
