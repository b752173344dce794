//! Board construction

use mira_core::Board;
use mira_hal::{Diagnostics, PathMatcher};

use crate::config::{ConfigLoader, LoadError, LoadSummary};
use crate::settings::LoaderConfig;

/// Build the board, reporting why it failed
pub fn try_build_board<M: PathMatcher, D: Diagnostics>(
    config: &LoaderConfig,
    matcher: &M,
    diag: &D,
) -> Result<Board, LoadError> {
    let mut board = Board::new(config.platform);

    let mut loader = ConfigLoader::new(matcher, diag, &config.device_dir);
    let summary = loader.load_file(&config.map_path, &mut board)?;

    board.gpio_count = board.count_gpios();
    log_summary(diag, &board, &summary);

    Ok(board)
}

/// Build the board
///
/// Returns `None` if anything in the pin map is wrong; the partially
/// built board is dropped.
pub fn build_board<M: PathMatcher, D: Diagnostics>(
    config: &LoaderConfig,
    matcher: &M,
    diag: &D,
) -> Option<Board> {
    match try_build_board(config, matcher, diag) {
        Ok(board) => Some(board),
        Err(e) => {
            diag.error(format_args!(
                "failed to set up {} from {}: {}",
                config.platform.name,
                config.map_path.display(),
                e
            ));
            None
        }
    }
}

fn log_summary<D: Diagnostics>(diag: &D, board: &Board, summary: &LoadSummary) {
    diag.debug(format_args!(
        "{}: {} records in {} lines",
        board.platform_name,
        summary.records(),
        summary.lines
    ));
    diag.debug(format_args!(
        "  {} pins, {} GPIO, {} PWM",
        board.phy_pin_count(),
        board.gpio_count,
        summary.pwm
    ));
    diag.debug(format_args!(
        "  {} SPI, {} UART",
        board.spi_bus_count(),
        board.uart_count()
    ));
}
