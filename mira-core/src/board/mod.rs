//! Board descriptor
//!
//! The descriptor is the sole owner of every pin, bus and device entry.
//! Entries never reference each other.

mod bus;
mod pins;

pub use bus::*;
pub use pins::*;

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Maximum I2C buses per board
pub const MAX_I2C_BUS_COUNT: usize = 12;

/// Maximum SPI bus slots per board
pub const MAX_SPI_BUS_COUNT: usize = 12;

/// Maximum UART device slots per board
pub const MAX_UART_COUNT: usize = 6;

/// Fixed platform metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Platform {
    /// Human readable platform name
    pub name: &'static str,
    /// Number of I2C buses exposed by the SoC
    pub i2c_bus_count: usize,
    /// Board has no pin multiplexer
    pub no_bus_mux: bool,
}

impl Platform {
    /// Phytec MIRA
    ///
    /// Assumes nobody adds a PCIe or USB device providing an extra I2C bus.
    pub const PHYTEC_MIRA: Self = Self {
        name: "Phytec MIRA",
        i2c_bus_count: 3,
        no_bus_mux: true,
    };
}

impl Default for Platform {
    fn default() -> Self {
        Self::PHYTEC_MIRA
    }
}

/// Complete board description
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Board {
    /// Human readable platform name
    pub platform_name: &'static str,
    /// Board has no pin multiplexer
    pub no_bus_mux: bool,
    /// Number of valid entries in `i2c_buses`
    pub i2c_bus_count: usize,
    /// I2C bus table
    pub i2c_buses: [I2cBus; MAX_I2C_BUS_COUNT],
    /// SPI bus table, indexed by slot
    pub spi_buses: [Option<SpiBusEntry>; MAX_SPI_BUS_COUNT],
    /// UART device table, indexed by slot
    pub uart_devices: [Option<UartDevice>; MAX_UART_COUNT],
    /// Number of pins with GPIO capability
    ///
    /// Filled in once loading finished, see [`Board::count_gpios`].
    pub gpio_count: usize,
    pins: Vec<PinEntry>,
}

impl Board {
    /// Create an empty board for `platform`
    ///
    /// The first `platform.i2c_bus_count` I2C entries get their index as
    /// bus id; the count is capped at [`MAX_I2C_BUS_COUNT`].
    pub fn new(platform: Platform) -> Self {
        let i2c_bus_count = platform.i2c_bus_count.min(MAX_I2C_BUS_COUNT);
        let mut i2c_buses = [I2cBus::default(); MAX_I2C_BUS_COUNT];
        for (i, bus) in i2c_buses.iter_mut().enumerate().take(i2c_bus_count) {
            bus.bus_id = i as u32;
        }

        Self {
            platform_name: platform.name,
            no_bus_mux: platform.no_bus_mux,
            i2c_bus_count,
            i2c_buses,
            spi_buses: Default::default(),
            uart_devices: Default::default(),
            gpio_count: 0,
            pins: Vec::new(),
        }
    }

    /// Number of physical pin entries in the table
    pub fn phy_pin_count(&self) -> usize {
        self.pins.len()
    }

    /// All pin entries, indexed by physical pin number
    pub fn pins(&self) -> &[PinEntry] {
        &self.pins
    }

    /// Get a pin entry by physical pin number
    pub fn pin(&self, index: u32) -> Option<&PinEntry> {
        self.pins.get(index as usize)
    }

    /// Count the pins with GPIO capability
    pub fn count_gpios(&self) -> usize {
        self.pins.iter().filter(|p| p.capability.is_gpio()).count()
    }

    /// Get an SPI bus entry by slot
    pub fn spi_bus(&self, slot: usize) -> Option<&SpiBusEntry> {
        self.spi_buses.get(slot).and_then(Option::as_ref)
    }

    /// Get a UART device by slot
    pub fn uart_device(&self, slot: usize) -> Option<&UartDevice> {
        self.uart_devices.get(slot).and_then(Option::as_ref)
    }

    /// Number of assigned SPI slots
    pub fn spi_bus_count(&self) -> usize {
        self.spi_buses.iter().flatten().count()
    }

    /// Number of assigned UART slots
    pub fn uart_count(&self) -> usize {
        self.uart_devices.iter().flatten().count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Platform::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board() {
        let board = Board::new(Platform::PHYTEC_MIRA);
        assert_eq!(board.platform_name, "Phytec MIRA");
        assert!(board.no_bus_mux);
        assert_eq!(board.phy_pin_count(), 0);
        assert_eq!(board.gpio_count, 0);
        assert_eq!(board.spi_bus_count(), 0);
        assert_eq!(board.uart_count(), 0);
    }

    #[test]
    fn test_i2c_bus_ids() {
        let board = Board::new(Platform::PHYTEC_MIRA);
        assert_eq!(board.i2c_bus_count, 3);
        assert_eq!(board.i2c_buses[0].bus_id, 0);
        assert_eq!(board.i2c_buses[1].bus_id, 1);
        assert_eq!(board.i2c_buses[2].bus_id, 2);
        assert_eq!(board.i2c_buses[3], I2cBus::default());
    }

    #[test]
    fn test_i2c_bus_count_capped() {
        let platform = Platform {
            i2c_bus_count: 40,
            ..Platform::PHYTEC_MIRA
        };
        let board = Board::new(platform);
        assert_eq!(board.i2c_bus_count, MAX_I2C_BUS_COUNT);
        assert_eq!(board.i2c_buses[11].bus_id, 11);
    }

    #[test]
    fn test_count_gpios() {
        let mut board = Board::default();
        board
            .assign_pin(1, PinCapability::Gpio { offset: 3 }, None)
            .unwrap();
        board
            .assign_pin(4, PinCapability::Pwm { channel: 0, chip_id: 1 }, None)
            .unwrap();
        board
            .assign_pin(7, PinCapability::Gpio { offset: 40 }, None)
            .unwrap();

        assert_eq!(board.phy_pin_count(), 8);
        assert_eq!(board.count_gpios(), 2);
    }
}
