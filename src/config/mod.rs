//! Configuration loading and resolution.
//!
//! Values are merged once at startup, app -> tab -> button, into immutable
//! specs:
//! - `size` - `WxH` strings
//! - `file` - the YAML document and config file lookup
//! - `button` - one launcher, optionally from a desktop entry
//! - `tab` - a group of launchers, with desktop-file discovery
//! - `app` - CLI/file/default precedence

pub mod app;
pub mod button;
pub mod file;
pub mod size;
pub mod tab;

pub use app::{AppConfig, CliOverrides};
pub use button::ButtonSpec;
pub use size::Size;
pub use tab::TabSpec;

use crate::error::ConfigError;
use file::FileConfig;
use std::path::Path;

/// Locate, read and resolve the configuration.
pub fn load(explicit: Option<&Path>, cli: &CliOverrides) -> Result<AppConfig, ConfigError> {
    let path = file::locate_config(explicit)?;
    let file = FileConfig::load(&path)?;
    AppConfig::build(file, cli)
}
