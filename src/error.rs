//! Error handling primitives for the AS7343 driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Bus(E),
    /// The driver has not completed a successful [`init`](crate::As7343::init).
    NotInitialized,
    /// An argument is outside the legal range of the targeted register field.
    InvalidArgument,
    /// The ID register did not return the expected AS7343 device ID.
    DeviceIdMismatch,
    /// A burst read returned fewer bytes than requested.
    PartialRead,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Bus(err)
    }
}
