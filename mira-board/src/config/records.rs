//! Record parsers
//!
//! One parser per keyword. Each consumes the record body (the line with
//! the keyword stripped) and applies it to the board:
//!
//! ```text
//! GPIO <pin-number> <bank> <io-idx> [<name>]
//! SPI  <spi-idx> <bus> <ss>
//! SPI  <spi-idx> <sysfs-glob>              glob must end in spidev<bus>.<ss>
//! PWM  <pin-number> <sysfs-glob> <pwm-idx> [<name>]   glob must end in pwmchip<id>
//! UART <uart-idx> <sysfs-glob>
//! ```
//!
//! Names run to the end of the line and are truncated to the pin table's
//! name width.

use mira_core::{
    Board, PinCapability, SpiBusEntry, UartDevice, MAX_SPI_BUS_COUNT, MAX_UART_COUNT,
};
use mira_hal::{Diagnostics, PathMatcher};

use super::device::{parse_decimal, parse_pwmchip, parse_spidev, resolve};
use super::error::{FormatError, RecordError};
use super::line::RecordKind;

/// GPIO lines per bank
pub const GPIOS_PER_BANK: u32 = 32;

/// Highest bank whose offsets still fit in a `u32`
const MAX_GPIO_BANK: u32 = (u32::MAX - (GPIOS_PER_BANK - 1)) / GPIOS_PER_BANK + 1;

/// Global GPIO number of `line` in 1-based `bank`
pub fn gpio_offset(bank: u32, line: u32) -> Result<u32, RecordError> {
    if !(1..=MAX_GPIO_BANK).contains(&bank) {
        return Err(RecordError::OutOfRange {
            what: "gpio bank",
            value: bank,
            min: 1,
            max: MAX_GPIO_BANK,
        });
    }
    if line >= GPIOS_PER_BANK {
        return Err(RecordError::OutOfRange {
            what: "gpio line",
            value: line,
            min: 0,
            max: GPIOS_PER_BANK - 1,
        });
    }

    Ok((bank - 1) * GPIOS_PER_BANK + line)
}

/// Applies records to a board
pub struct RecordParser<'a, M, D> {
    matcher: &'a M,
    diag: &'a D,
    device_dir: &'a str,
}

impl<'a, M: PathMatcher, D: Diagnostics> RecordParser<'a, M, D> {
    /// Create a parser
    ///
    /// `device_dir` is prefixed to resolved UART names, normally `/dev/`.
    pub fn new(matcher: &'a M, diag: &'a D, device_dir: &'a str) -> Self {
        Self {
            matcher,
            diag,
            device_dir,
        }
    }

    /// Dispatch a record body to the parser for `kind`
    pub fn parse(
        &self,
        kind: RecordKind,
        body: &str,
        board: &mut Board,
    ) -> Result<(), RecordError> {
        match kind {
            RecordKind::Gpio => self.parse_gpio(body, board),
            RecordKind::Spi => self.parse_spi(body, board),
            RecordKind::Pwm => self.parse_pwm(body, board),
            RecordKind::Uart => self.parse_uart(body, board),
        }
    }

    /// `GPIO <pin-number> <bank> <io-idx> [<name>]`
    pub fn parse_gpio(&self, body: &str, board: &mut Board) -> Result<(), RecordError> {
        let kind = RecordKind::Gpio;
        let (fields, name) = split_fields(body, 3);

        // sysfs paths for GPIOs are not supported
        let &[pin, bank, line] = fields.as_slice() else {
            return Err(field_count(kind, "at least 3", fields.len()));
        };

        let pin = number(kind, "pin", pin)?;
        let bank = number(kind, "bank", bank)?;
        let line = number(kind, "io index", line)?;
        let offset = gpio_offset(bank, line)?;

        board.assign_pin(pin, PinCapability::Gpio { offset }, name)?;

        self.diag.debug(format_args!("added gpio #{} @{}", offset, pin));
        Ok(())
    }

    /// `SPI <spi-idx> <bus> <ss>` or `SPI <spi-idx> <sysfs-glob>`
    pub fn parse_spi(&self, body: &str, board: &mut Board) -> Result<(), RecordError> {
        let kind = RecordKind::Spi;
        let fields: Vec<&str> = body.split_whitespace().collect();

        let (slot, entry) = match *fields.as_slice() {
            [slot, bus, cs] => {
                let slot = number(kind, "spi index", slot)?;
                let entry = SpiBusEntry {
                    bus_id: number(kind, "bus", bus)?,
                    chip_select: number(kind, "chip select", cs)?,
                };
                (slot, entry)
            }
            [slot, pattern] => {
                let slot = number(kind, "spi index", slot)?;
                let device = resolve(self.matcher, pattern)?;
                let (bus_id, chip_select) = parse_spidev(&device)
                    .ok_or_else(|| device_name(kind, "spidev<bus>.<cs>", device))?;
                (
                    slot,
                    SpiBusEntry {
                        bus_id,
                        chip_select,
                    },
                )
            }
            _ => return Err(field_count(kind, "2 or 3", fields.len())),
        };

        let index = slot_index(slot, MAX_SPI_BUS_COUNT, "spi index")?;
        if let Some(current) = &board.spi_buses[index] {
            return Err(RecordError::Duplicate {
                what: "spi device",
                index: slot,
                current: format!("bus {} cs {}", current.bus_id, current.chip_select),
            });
        }
        board.spi_buses[index] = Some(entry);

        self.diag.debug(format_args!(
            "added SPI {}.{} @{}",
            entry.bus_id, entry.chip_select, slot
        ));
        Ok(())
    }

    /// `PWM <pin-number> <sysfs-glob> <pwm-idx> [<name>]`
    pub fn parse_pwm(&self, body: &str, board: &mut Board) -> Result<(), RecordError> {
        let kind = RecordKind::Pwm;
        let (fields, name) = split_fields(body, 3);

        let &[pin, pattern, channel] = fields.as_slice() else {
            return Err(field_count(kind, "at least 3", fields.len()));
        };

        let pin = number(kind, "pin", pin)?;
        let channel = number(kind, "pwm index", channel)?;

        let device = resolve(self.matcher, pattern)?;
        let chip_id =
            parse_pwmchip(&device).ok_or_else(|| device_name(kind, "pwmchip<id>", device))?;

        let entry = board.assign_pin(pin, PinCapability::Pwm { channel, chip_id }, name)?;

        self.diag.debug(format_args!(
            "added PWM #{}.{} @{} ({})",
            chip_id,
            channel,
            pin,
            entry.name.as_str()
        ));
        Ok(())
    }

    /// `UART <uart-idx> <sysfs-glob>`
    pub fn parse_uart(&self, body: &str, board: &mut Board) -> Result<(), RecordError> {
        let kind = RecordKind::Uart;
        let fields: Vec<&str> = body.split_whitespace().collect();

        let &[slot, pattern] = fields.as_slice() else {
            return Err(field_count(kind, "2", fields.len()));
        };

        let slot = number(kind, "uart index", slot)?;
        let index = slot_index(slot, MAX_UART_COUNT, "uart index")?;
        if let Some(current) = &board.uart_devices[index] {
            return Err(RecordError::Duplicate {
                what: "uart",
                index: slot,
                current: current.device_path.clone(),
            });
        }

        let device = resolve(self.matcher, pattern)?;
        let device_path = device_path(self.device_dir, &device);

        self.diag
            .debug(format_args!("added UART '{}' at {}", device_path, slot));
        board.uart_devices[index] = Some(UartDevice { index, device_path });
        Ok(())
    }
}

/// Split off up to `count` leading whitespace separated fields
///
/// Returns the fields and the trimmed remainder, `None` when nothing is
/// left over.
fn split_fields(body: &str, count: usize) -> (Vec<&str>, Option<&str>) {
    let mut fields = Vec::with_capacity(count);
    let mut rest = body.trim();

    while fields.len() < count && !rest.is_empty() {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }

    (fields, (!rest.is_empty()).then_some(rest))
}

fn number(kind: RecordKind, field: &'static str, value: &str) -> Result<u32, RecordError> {
    parse_decimal(value).ok_or_else(|| RecordError::Format {
        kind,
        reason: FormatError::InvalidNumber {
            field,
            value: value.into(),
        },
    })
}

fn slot_index(slot: u32, max: usize, what: &'static str) -> Result<usize, RecordError> {
    let index = slot as usize;
    if index >= max {
        return Err(RecordError::OutOfRange {
            what,
            value: slot,
            min: 0,
            max: max as u32 - 1,
        });
    }
    Ok(index)
}

fn field_count(kind: RecordKind, expected: &'static str, found: usize) -> RecordError {
    RecordError::Format {
        kind,
        reason: FormatError::FieldCount { expected, found },
    }
}

fn device_name(kind: RecordKind, expected: &'static str, found: String) -> RecordError {
    RecordError::Format {
        kind,
        reason: FormatError::DeviceName { expected, found },
    }
}

fn device_path(dir: &str, device: &str) -> String {
    if dir.is_empty() || dir.ends_with('/') {
        format!("{dir}{device}")
    } else {
        format!("{dir}/{device}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::error::{ErrorKind, ResolveError};
    use crate::config::testing::{RecordingDiagnostics, StaticMatcher};
    use mira_core::{PinError, Platform};

    const SPIDEV_GLOB: &str = "/sys/bus/spi/devices/spi2.1/spidev/*";
    const PWM_GLOB: &str = "/sys/devices/platform/pwm3/pwm/pwmchip*";
    const UART_GLOB: &str = "/sys/devices/soc0/uart3/tty/*";

    fn matcher() -> StaticMatcher {
        StaticMatcher::new()
            .with(SPIDEV_GLOB, &["/sys/bus/spi/devices/spi2.1/spidev/spidev2.1"])
            .with(PWM_GLOB, &["/sys/devices/platform/pwm3/pwm/pwmchip2"])
            .with(UART_GLOB, &["/sys/devices/soc0/uart3/tty/ttymxc2"])
            .with("/sys/class/tty/*", &["/sys/class/tty/console"])
    }

    fn board() -> Board {
        Board::new(Platform::PHYTEC_MIRA)
    }

    #[test]
    fn test_split_fields() {
        assert_eq!(split_fields("5 2 10 myled", 3), (vec!["5", "2", "10"], Some("myled")));
        assert_eq!(
            split_fields(" 5  2\t10   status  led ", 3),
            (vec!["5", "2", "10"], Some("status  led"))
        );
        assert_eq!(split_fields("5 2", 3), (vec!["5", "2"], None));
        assert_eq!(split_fields("", 3), (vec![], None));
    }

    #[test]
    fn test_gpio_offset() {
        assert_eq!(gpio_offset(1, 0).unwrap(), 0);
        assert_eq!(gpio_offset(2, 10).unwrap(), 42);
        assert_eq!(gpio_offset(5, 31).unwrap(), 159);
        assert_eq!(gpio_offset(MAX_GPIO_BANK, 31).unwrap(), u32::MAX);

        assert_eq!(gpio_offset(0, 3).unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(gpio_offset(1, 32).unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(
            gpio_offset(MAX_GPIO_BANK + 1, 0).unwrap_err().kind(),
            ErrorKind::Range
        );
    }

    #[test]
    fn test_gpio_record() {
        let (matcher, diag) = (matcher(), RecordingDiagnostics::default());
        let parser = RecordParser::new(&matcher, &diag, "/dev/");
        let mut board = board();

        parser.parse_gpio("5 2 10 myled", &mut board).unwrap();

        let pin = board.pin(5).unwrap();
        assert_eq!(pin.capability, PinCapability::Gpio { offset: 42 });
        assert_eq!(pin.name.as_str(), "myled");
        assert_eq!(board.phy_pin_count(), 6);
        assert_eq!(diag.debug.borrow().as_slice(), ["added gpio #42 @5"]);
    }

    #[test]
    fn test_gpio_record_name_handling() {
        let (matcher, diag) = (matcher(), RecordingDiagnostics::default());
        let parser = RecordParser::new(&matcher, &diag, "/dev/");
        let mut board = board();

        parser.parse_gpio("1 1 3", &mut board).unwrap();
        parser
            .parse_gpio("2 1 4 user button left", &mut board)
            .unwrap();

        assert_eq!(board.pin(1).unwrap().name.as_str(), "");
        assert_eq!(board.pin(2).unwrap().name.as_str(), "user button");
    }

    #[test]
    fn test_gpio_record_errors() {
        let (matcher, diag) = (matcher(), RecordingDiagnostics::default());
        let parser = RecordParser::new(&matcher, &diag, "/dev/");
        let mut board = board();

        let kind = |body: &str, board: &mut Board| {
            parser.parse_gpio(body, board).unwrap_err().kind()
        };

        assert_eq!(kind("5 2", &mut board), ErrorKind::Format);
        assert_eq!(kind("/sys/class/gpio/gpio7", &mut board), ErrorKind::Format);
        assert_eq!(kind("x 2 3", &mut board), ErrorKind::Format);
        assert_eq!(kind("5 -2 3", &mut board), ErrorKind::Format);
        assert_eq!(kind("5 0 3", &mut board), ErrorKind::Range);
        assert_eq!(kind("5 1 32", &mut board), ErrorKind::Range);
        assert_eq!(kind("4294967295 1 1", &mut board), ErrorKind::Range);

        // nothing was claimed along the way
        assert!(board.pins().iter().all(|p| !p.is_reserved()));
    }

    #[test]
    fn test_spi_numeric() {
        let (matcher, diag) = (matcher(), RecordingDiagnostics::default());
        let parser = RecordParser::new(&matcher, &diag, "/dev/");
        let mut board = board();

        parser.parse_spi("0 1 0", &mut board).unwrap();
        assert_eq!(
            board.spi_bus(0),
            Some(&SpiBusEntry {
                bus_id: 1,
                chip_select: 0
            })
        );
        assert_eq!(board.spi_bus_count(), 1);
    }

    #[test]
    fn test_spi_glob() {
        let (matcher, diag) = (matcher(), RecordingDiagnostics::default());
        let parser = RecordParser::new(&matcher, &diag, "/dev/");
        let mut board = board();

        parser.parse_spi(&format!("0 {SPIDEV_GLOB}"), &mut board).unwrap();
        assert_eq!(
            board.spi_bus(0),
            Some(&SpiBusEntry {
                bus_id: 2,
                chip_select: 1
            })
        );
    }

    #[test]
    fn test_spi_errors() {
        let (matcher, diag) = (matcher(), RecordingDiagnostics::default());
        let parser = RecordParser::new(&matcher, &diag, "/dev/");
        let mut board = board();

        parser.parse_spi("1 1 0", &mut board).unwrap();

        let err = parser.parse_spi("1 2 0", &mut board).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Duplicate);
        assert_eq!(board.spi_bus(1).unwrap().bus_id, 1);

        let err = parser.parse_spi("12 0 0", &mut board).unwrap_err();
        assert_eq!(
            err,
            RecordError::OutOfRange {
                what: "spi index",
                value: 12,
                min: 0,
                max: 11
            }
        );

        // resolves, but to something that is not a spidev
        let err = parser.parse_spi("2 /sys/class/tty/*", &mut board).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);

        let err = parser.parse_spi("2 /sys/nothing/*", &mut board).unwrap_err();
        assert!(matches!(
            err,
            RecordError::Resolve(ResolveError::MatchCount { count: 0, .. })
        ));

        assert_eq!(parser.parse_spi("2", &mut board).unwrap_err().kind(), ErrorKind::Format);
        assert_eq!(
            parser.parse_spi("2 1 0 7", &mut board).unwrap_err().kind(),
            ErrorKind::Format
        );
        assert_eq!(board.spi_bus_count(), 1);
    }

    #[test]
    fn test_pwm_record() {
        let (matcher, diag) = (matcher(), RecordingDiagnostics::default());
        let parser = RecordParser::new(&matcher, &diag, "/dev/");
        let mut board = board();

        parser
            .parse_pwm(&format!("12 {PWM_GLOB} 1 backlight"), &mut board)
            .unwrap();

        let pin = board.pin(12).unwrap();
        assert_eq!(
            pin.capability,
            PinCapability::Pwm {
                channel: 1,
                chip_id: 2
            }
        );
        assert_eq!(pin.name.as_str(), "backlight");
        assert_eq!(board.count_gpios(), 0);
        assert_eq!(
            diag.debug.borrow().as_slice(),
            ["added PWM #2.1 @12 (backlight)"]
        );
    }

    #[test]
    fn test_pwm_errors() {
        let (matcher, diag) = (matcher(), RecordingDiagnostics::default());
        let parser = RecordParser::new(&matcher, &diag, "/dev/");
        let mut board = board();

        let err = parser.parse_pwm(&format!("3 {PWM_GLOB}"), &mut board).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);

        let err = parser.parse_pwm("3 /sys/class/tty/* 0", &mut board).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);

        let err = parser.parse_pwm("3 /sys/none/* 0", &mut board).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);

        // failed records leave the pin free
        assert!(board.pin(3).map_or(true, |p| !p.is_reserved()));
    }

    #[test]
    fn test_pin_claimed_by_other_kind() {
        let (matcher, diag) = (matcher(), RecordingDiagnostics::default());
        let parser = RecordParser::new(&matcher, &diag, "/dev/");
        let mut board = board();

        parser.parse_gpio("7 1 1", &mut board).unwrap();
        let err = parser.parse_pwm(&format!("7 {PWM_GLOB} 0"), &mut board).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Duplicate);
        assert!(matches!(
            err,
            RecordError::Pin(PinError::AlreadyReserved { index: 7, .. })
        ));

        parser.parse_pwm(&format!("8 {PWM_GLOB} 0"), &mut board).unwrap();
        let err = parser.parse_gpio("8 1 2", &mut board).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Duplicate);
    }

    #[test]
    fn test_uart_record() {
        let (matcher, diag) = (matcher(), RecordingDiagnostics::default());
        let parser = RecordParser::new(&matcher, &diag, "/dev/");
        let mut board = board();

        parser.parse_uart(&format!("2 {UART_GLOB}"), &mut board).unwrap();

        let uart = board.uart_device(2).unwrap();
        assert_eq!(uart.index, 2);
        assert_eq!(uart.device_path, "/dev/ttymxc2");
        assert_eq!(board.uart_count(), 1);
    }

    #[test]
    fn test_uart_errors() {
        let (matcher, diag) = (matcher(), RecordingDiagnostics::default());
        let parser = RecordParser::new(&matcher, &diag, "/dev");
        let mut board = board();

        parser.parse_uart(&format!("0 {UART_GLOB}"), &mut board).unwrap();
        assert_eq!(board.uart_device(0).unwrap().device_path, "/dev/ttymxc2");

        let err = parser.parse_uart(&format!("0 {UART_GLOB}"), &mut board).unwrap_err();
        assert_eq!(
            err,
            RecordError::Duplicate {
                what: "uart",
                index: 0,
                current: "/dev/ttymxc2".into()
            }
        );

        let err = parser.parse_uart(&format!("6 {UART_GLOB}"), &mut board).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let err = parser.parse_uart("1 /sys/none/*", &mut board).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resolution);

        assert_eq!(parser.parse_uart("1", &mut board).unwrap_err().kind(), ErrorKind::Format);
        assert_eq!(board.uart_count(), 1);
    }
}
