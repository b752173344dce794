//! Phytec MIRA board support
//!
//! Builds the board descriptor from the pin map. The map describes the
//! expansion header; everything else (platform name, I2C buses) is fixed
//! for the board.
//!
//! ```no_run
//! use mira_board::{build_board, LoaderConfig};
//! use mira_hal_linux::{GlobMatcher, TracingDiagnostics};
//!
//! let config = LoaderConfig::default();
//! if let Some(board) = build_board(&config, &GlobMatcher::new(), &TracingDiagnostics) {
//!     println!("{} GPIOs", board.gpio_count);
//! }
//! ```

#![deny(unsafe_code)]

pub mod board;
pub mod config;
pub mod report;
pub mod settings;

pub use board::{build_board, try_build_board};
pub use settings::LoaderConfig;
