#![no_std]

mod error;

pub mod config;
pub mod device;
pub mod interface;
pub mod params;
pub mod registers;
pub mod spectral;

pub use crate::device::As7343;
pub use crate::error::{Error, Result};
