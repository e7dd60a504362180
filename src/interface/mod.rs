//! Bus interface abstraction for the AS7343 driver.

pub mod i2c;

/// Abstraction over the low-level bus access required by the driver.
pub trait As7343Interface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Writes a single register.
    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error>;

    /// Reads a single register.
    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error>;

    /// Reads multiple consecutive registers into the provided buffer.
    ///
    /// Returns the number of bytes actually read. Callers that require a
    /// complete transfer must verify the count against the buffer length.
    fn read_many(&mut self, register: u8, buf: &mut [u8])
    -> core::result::Result<usize, Self::Error>;

    /// Writes multiple consecutive registers from the provided buffer in a
    /// single bus transaction.
    fn write_many(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error>;
}
