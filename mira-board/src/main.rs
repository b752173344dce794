//! Mira - Phytec MIRA board setup
//!
//! Loads the pin map once and prints the resulting board description.
//! Exits non-zero if the map could not be applied.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mira_board::report::BoardReport;
use mira_board::settings::{DEFAULT_DEVICE_DIR, DEFAULT_MAP_PATH};
use mira_board::{try_build_board, LoaderConfig};
use mira_hal_linux::{GlobMatcher, TracingDiagnostics};

#[derive(Parser)]
#[command(name = "mira-board")]
#[command(about = "Load the Phytec MIRA pin map and describe the board", long_about = None)]
#[command(version)]
struct Cli {
    /// Pin map to load
    #[arg(long, env = "MRAA_MAP", default_value = DEFAULT_MAP_PATH)]
    map: PathBuf,
    /// Directory holding the device nodes of resolved UARTs
    #[arg(long, default_value = DEFAULT_DEVICE_DIR)]
    device_dir: String,
    /// Print the board as JSON instead of a report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = LoaderConfig::default()
        .with_map_path(cli.map)
        .with_device_dir(cli.device_dir);

    info!("Loading pin map from {}", config.map_path.display());
    let board = try_build_board(&config, &GlobMatcher::new(), &TracingDiagnostics)
        .with_context(|| format!("failed to set up {}", config.platform.name))?;
    info!(
        "{} ready: {} pins, {} GPIOs",
        board.platform_name,
        board.phy_pin_count(),
        board.gpio_count
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&board)?);
    } else {
        print!("{}", BoardReport(&board));
    }

    Ok(())
}
