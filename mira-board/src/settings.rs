//! Loader settings

use std::path::PathBuf;

use mira_core::Platform;

/// Default pin map location
pub const DEFAULT_MAP_PATH: &str = "/etc/mraa.map";

/// Default directory holding device nodes
pub const DEFAULT_DEVICE_DIR: &str = "/dev/";

/// Where to find the pin map and what board it describes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Pin map file
    pub map_path: PathBuf,
    /// Prefix for resolved UART device names
    pub device_dir: String,
    /// Fixed platform metadata
    pub platform: Platform,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            map_path: PathBuf::from(DEFAULT_MAP_PATH),
            device_dir: DEFAULT_DEVICE_DIR.into(),
            platform: Platform::PHYTEC_MIRA,
        }
    }
}

impl LoaderConfig {
    /// Use a different pin map
    pub fn with_map_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.map_path = path.into();
        self
    }

    /// Use a different device directory
    pub fn with_device_dir(mut self, dir: impl Into<String>) -> Self {
        self.device_dir = dir.into();
        self
    }
}
