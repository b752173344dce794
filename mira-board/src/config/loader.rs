//! Pin map loader
//!
//! Reads the map one line at a time and applies each record in order.
//! The first failing line aborts the whole load:
//!
//! ```text
//! Reading ──(record ok / ignorable)──► Reading
//!    │
//!    ├──(EOF)──────────────────────────► Done
//!    └──(read error / bad record)──────► Failed
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use mira_core::Board;
use mira_hal::{Diagnostics, PathMatcher};

use super::error::LoadError;
use super::line::{classify, Line, RecordKind};
use super::records::RecordParser;

/// Loader state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Consuming lines
    Reading,
    /// Reached end of file without errors
    Done,
    /// Stopped at the first error
    Failed,
}

/// Records applied by a load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    /// Lines read, including ignored ones
    pub lines: usize,
    /// GPIO records applied
    pub gpio: usize,
    /// SPI records applied
    pub spi: usize,
    /// PWM records applied
    pub pwm: usize,
    /// UART records applied
    pub uart: usize,
}

impl LoadSummary {
    fn record(&mut self, kind: RecordKind) {
        match kind {
            RecordKind::Gpio => self.gpio += 1,
            RecordKind::Spi => self.spi += 1,
            RecordKind::Pwm => self.pwm += 1,
            RecordKind::Uart => self.uart += 1,
        }
    }

    /// Total number of records applied
    pub fn records(&self) -> usize {
        self.gpio + self.spi + self.pwm + self.uart
    }
}

/// Line oriented pin map loader
pub struct ConfigLoader<'a, M, D> {
    parser: RecordParser<'a, M, D>,
    diag: &'a D,
    state: LoadState,
    summary: LoadSummary,
}

impl<'a, M: PathMatcher, D: Diagnostics> ConfigLoader<'a, M, D> {
    /// Create a loader
    pub fn new(matcher: &'a M, diag: &'a D, device_dir: &'a str) -> Self {
        Self {
            parser: RecordParser::new(matcher, diag, device_dir),
            diag,
            state: LoadState::Reading,
            summary: LoadSummary::default(),
        }
    }

    /// Current state
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Load the pin map at `path` into `board`
    ///
    /// A missing file is not an error: the board simply has no extra pin
    /// configuration and is left untouched.
    pub fn load_file(
        &mut self,
        path: &Path,
        board: &mut Board,
    ) -> Result<LoadSummary, LoadError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.diag.debug(format_args!(
                    "no pin map at {}; nothing to parse",
                    path.display()
                ));
                self.state = LoadState::Done;
                self.summary = LoadSummary::default();
                return Ok(self.summary);
            }
            Err(e) => {
                self.state = LoadState::Failed;
                self.diag
                    .error(format_args!("failed to open {}: {}", path.display(), e));
                return Err(e.into());
            }
        };

        self.load(BufReader::new(file), board)
    }

    /// Load a pin map from `reader` into `board`
    ///
    /// Stops at the first error. `board` is left partially populated in
    /// that case; callers are expected to discard it.
    pub fn load<R: BufRead>(
        &mut self,
        mut reader: R,
        board: &mut Board,
    ) -> Result<LoadSummary, LoadError> {
        self.state = LoadState::Reading;
        self.summary = LoadSummary::default();

        let mut buf = String::new();
        while self.state == LoadState::Reading {
            buf.clear();
            match reader.read_line(&mut buf) {
                Ok(0) => self.state = LoadState::Done,
                Ok(_) => {
                    self.summary.lines += 1;
                    if let Err(e) = self.dispatch(&buf, board) {
                        return Err(self.fail(e));
                    }
                }
                Err(e) => return Err(self.fail(LoadError::Io(e))),
            }
        }

        Ok(self.summary)
    }

    fn dispatch(&mut self, raw: &str, board: &mut Board) -> Result<(), LoadError> {
        let line = self.summary.lines;

        match classify(raw) {
            Line::Ignore => Ok(()),
            Line::Record(kind, body) => {
                self.parser
                    .parse(kind, body, board)
                    .map_err(|source| LoadError::Record {
                        line,
                        content: raw.trim().to_owned(),
                        source,
                    })?;
                self.summary.record(kind);
                Ok(())
            }
            Line::Unknown(content) => Err(LoadError::UnknownRecord {
                line,
                content: content.to_owned(),
            }),
        }
    }

    fn fail(&mut self, error: LoadError) -> LoadError {
        self.state = LoadState::Failed;
        self.diag.error(format_args!("{}", error));
        error
    }
}
