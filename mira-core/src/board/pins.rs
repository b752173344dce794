//! Pin table
//!
//! Pins are indexed by physical connector number. The table grows on
//! demand and every entry can be claimed by exactly one record.

use core::mem::size_of;

use heapless::String;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::Serialize;

use super::Board;

/// Maximum pin name length (12 byte name field minus terminator)
pub const MAX_PIN_NAME_LEN: usize = 11;

/// Bounded pin display name
pub type PinName = String<MAX_PIN_NAME_LEN>;

/// Largest table the reservation logic accepts
///
/// Keeps the table size representable in 32 bits, whatever the host.
const MAX_PIN_TABLE_LEN: usize = u32::MAX as usize / size_of::<PinEntry>();

/// Hardware capability assigned to a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum PinCapability {
    /// Not claimed by any record
    #[default]
    Unset,
    /// GPIO line
    Gpio {
        /// Global GPIO number (`(bank - 1) * 32 + line`)
        offset: u32,
    },
    /// PWM output
    Pwm {
        /// Channel on the PWM chip
        channel: u32,
        /// `N` of `pwmchipN`
        chip_id: u32,
    },
}

impl PinCapability {
    /// Pin has been claimed
    pub fn is_reserved(self) -> bool {
        !matches!(self, PinCapability::Unset)
    }

    /// Pin is a GPIO
    pub fn is_gpio(self) -> bool {
        matches!(self, PinCapability::Gpio { .. })
    }

    /// Pin is a PWM output
    pub fn is_pwm(self) -> bool {
        matches!(self, PinCapability::Pwm { .. })
    }
}

/// One physical pin
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PinEntry {
    /// Assigned capability
    pub capability: PinCapability,
    /// Optional display name (empty if none)
    pub name: PinName,
}

impl PinEntry {
    /// Pin has been claimed
    pub fn is_reserved(&self) -> bool {
        self.capability.is_reserved()
    }
}

/// Build a pin name, truncating on a character boundary
///
/// Overlong names are cut, never rejected.
pub fn pin_name(name: &str) -> PinName {
    let mut out = PinName::new();
    for c in name.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Pin reservation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Range overflows or would need an absurdly large table
    #[error("invalid pin range {start}+{count}")]
    InvalidRange { start: u32, count: u32 },
    /// Pin was claimed by an earlier record
    #[error("pin {index} already marked as valid while requesting {start}+{count} range")]
    AlreadyReserved { index: u32, start: u32, count: u32 },
    /// Growing the table failed
    #[error("failed to allocate {count} pins")]
    Allocation { count: usize },
}

impl Board {
    /// Make sure pins `start..start + count` exist and are unclaimed
    ///
    /// Grows the table with [`PinCapability::Unset`] entries when needed.
    /// Entries outside the range are never touched and the table never
    /// shrinks. The entries in range stay `Unset`; the caller assigns the
    /// capability afterwards.
    pub fn reserve_pins(&mut self, start: u32, count: u32) -> Result<(), PinError> {
        let end = start
            .checked_add(count)
            .map(|end| end as usize)
            .filter(|&end| end < MAX_PIN_TABLE_LEN)
            .ok_or(PinError::InvalidRange { start, count })?;

        if end > self.pins.len() {
            self.pins
                .try_reserve_exact(end - self.pins.len())
                .map_err(|_| PinError::Allocation { count: end })?;
            self.pins.resize(end, PinEntry::default());
        }

        let first = start as usize;
        if let Some(taken) = self.pins[first..end].iter().position(PinEntry::is_reserved) {
            return Err(PinError::AlreadyReserved {
                index: start + taken as u32,
                start,
                count,
            });
        }

        Ok(())
    }

    /// Reserve a single pin and give it a capability
    pub fn assign_pin(
        &mut self,
        index: u32,
        capability: PinCapability,
        name: Option<&str>,
    ) -> Result<&PinEntry, PinError> {
        self.reserve_pins(index, 1)?;

        let pin = &mut self.pins[index as usize];
        *pin = PinEntry {
            capability,
            name: name.map(pin_name).unwrap_or_default(),
        };

        Ok(pin)
    }
}
