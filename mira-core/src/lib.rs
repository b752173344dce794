//! Board-agnostic core logic for the Mira board loader
//!
//! This crate contains the in-memory hardware description that the
//! loader fills in:
//!
//! - Board descriptor (platform metadata, I2C/SPI/UART tables)
//! - Pin table with capability tracking
//! - Pin reservation and overlap detection

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod board;

pub use board::*;
