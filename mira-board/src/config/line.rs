//! Line classification
//!
//! Every pin map line is one of: ignorable (blank or `#` comment), a record
//! introduced by a case-sensitive keyword, or garbage.

use core::fmt;

/// Record keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// `GPIO <pin> <bank> <io-index> [name]`
    Gpio,
    /// `SPI <slot> <bus> <cs>` or `SPI <slot> <glob>`
    Spi,
    /// `PWM <pin> <glob> <channel> [name]`
    Pwm,
    /// `UART <slot> <glob>`
    Uart,
}

impl RecordKind {
    /// All kinds, in dispatch order
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Gpio,
        RecordKind::Spi,
        RecordKind::Pwm,
        RecordKind::Uart,
    ];

    /// Keyword introducing this record
    pub const fn keyword(self) -> &'static str {
        match self {
            RecordKind::Gpio => "GPIO",
            RecordKind::Spi => "SPI",
            RecordKind::Pwm => "PWM",
            RecordKind::Uart => "UART",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Classified line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Blank or comment
    Ignore,
    /// Record keyword and the body following it
    Record(RecordKind, &'a str),
    /// Anything else (trimmed)
    Unknown(&'a str),
}

/// Trim a raw line and classify it
pub fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();

    if line.is_empty() || line.starts_with('#') {
        return Line::Ignore;
    }

    RecordKind::ALL
        .iter()
        .find_map(|&kind| {
            line.strip_prefix(kind.keyword())
                .map(|body| Line::Record(kind, body.trim_start()))
        })
        .unwrap_or(Line::Unknown(line))
}
