//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Analysis defaults used when a command leaves a parameter unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Highest histogram bin.
    pub max_bin: u32,

    /// Time covered by one histogram bin.
    pub bin_resolution: f64,

    /// Marker count that ends a formal local-time scan.
    pub n_markers: u32,

    /// Check that input times are non-decreasing before scanning.
    pub validate_order: bool,

    /// Per-event offset for local-time scans.
    pub default_event_offset: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_bin: 60,
            bin_resolution: 1.0,
            n_markers: 1000,
            validate_order: true,
            default_event_offset: 0.0,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // EVT_MAX_BIN, EVT_BIN_RESOLUTION, ...
        figment = figment.merge(Env::prefixed("EVT_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for evt.
///
/// On Linux: `~/.config/evt`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("evt"))
}
