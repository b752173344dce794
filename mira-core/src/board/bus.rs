//! Bus and device table entries

use alloc::string::String;

#[cfg(feature = "serde")]
use serde::Serialize;

/// I2C bus entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct I2cBus {
    /// Kernel bus number (`/dev/i2c-<bus_id>`)
    pub bus_id: u32,
}

/// SPI bus slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SpiBusEntry {
    /// Kernel SPI bus number
    pub bus_id: u32,
    /// Chip select on that bus
    pub chip_select: u32,
}

/// UART device slot
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct UartDevice {
    /// Slot this device was assigned to
    pub index: usize,
    /// Absolute device node, e.g. `/dev/ttymxc2`
    pub device_path: String,
}
