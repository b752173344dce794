//! Pin map parsing
//!
//! The pin map is a line oriented text file (normally `/etc/mraa.map`)
//! describing which header pins carry GPIO, SPI, PWM and UART resources.
//! See [`records`] for the record formats.

pub mod device;
pub mod error;
pub mod line;
pub mod loader;
pub mod records;

#[cfg(test)]
pub(crate) mod testing;

pub use device::resolve;
pub use error::{ErrorKind, FormatError, LoadError, RecordError, ResolveError};
pub use line::{classify, Line, RecordKind};
pub use loader::{ConfigLoader, LoadState, LoadSummary};
pub use records::RecordParser;
