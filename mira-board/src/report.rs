//! Human readable board report

use core::fmt;

use mira_core::{Board, PinCapability};

/// Displays a board as a short multi-line report
pub struct BoardReport<'a>(pub &'a Board);

impl fmt::Display for BoardReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;

        writeln!(f, "platform: {}", board.platform_name)?;
        writeln!(
            f,
            "pins: {} ({} gpio)",
            board.phy_pin_count(),
            board.gpio_count
        )?;

        for (index, pin) in board.pins().iter().enumerate() {
            match pin.capability {
                PinCapability::Unset => continue,
                PinCapability::Gpio { offset } => write!(f, "  pin {index}: gpio {offset}")?,
                PinCapability::Pwm { channel, chip_id } => {
                    write!(f, "  pin {index}: pwm {chip_id}.{channel}")?
                }
            }
            if !pin.name.is_empty() {
                write!(f, " \"{}\"", pin.name)?;
            }
            writeln!(f)?;
        }

        let i2c = &board.i2c_buses[..board.i2c_bus_count];
        writeln!(f, "i2c: {} buses", i2c.len())?;

        for (slot, spi) in board.spi_buses.iter().enumerate() {
            if let Some(spi) = spi {
                writeln!(f, "  spi {slot}: bus {} cs {}", spi.bus_id, spi.chip_select)?;
            }
        }

        for uart in board.uart_devices.iter().flatten() {
            writeln!(f, "  uart {}: {}", uart.index, uart.device_path)?;
        }

        Ok(())
    }
}
