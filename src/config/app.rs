//! Application-level configuration: CLI > file > built-in defaults.

use super::button::Sizing;
use super::file::{FileConfig, LooseBool, RawTab, expand_home, key_to_string, parse_loose_bool};
use super::size::Size;
use super::tab::TabSpec;
use crate::error::ConfigError;
use log::{debug, warn};
use std::path::PathBuf;

pub const DEFAULT_STYLESHEET: &str = "/etc/kilauncher/stylesheet.css";
pub const DEFAULT_LAUNCHER_SIZE: &str = "240x80";
pub const DEFAULT_ICON_SIZE: &str = "64x64";
pub const DEFAULT_QUIT_BUTTON_TEXT: &str = "Quit this program";

/// Options that can also be given on the command line. Raw strings; the
/// same transforms apply as for file values.
#[derive(Clone, Debug, Default)]
pub struct CliOverrides {
    pub stylesheet: Option<String>,
    pub launcher_size: Option<String>,
    pub icon_size: Option<String>,
    pub icon_theme: Option<String>,
    pub show_quit_button: Option<String>,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// `None` when unset or when the configured file does not exist.
    pub stylesheet: Option<PathBuf>,
    pub launcher_size: Size,
    pub icon_size: Size,
    pub icon_theme: Option<String>,
    pub tabs: Vec<TabSpec>,
    pub aggressive_icon_search: bool,
    pub quit_button_text: String,
    pub show_quit_button: bool,
    pub autostart: Vec<String>,
}

/// First non-empty string of (CLI, file, default).
fn coalesce(cli: Option<&str>, file: Option<&str>, default: Option<&str>) -> Option<String> {
    [cli, file, default]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .map(String::from)
}

impl AppConfig {
    pub fn build(file: FileConfig, cli: &CliOverrides) -> Result<Self, ConfigError> {
        let launcher_size = coalesce(
            cli.launcher_size.as_deref(),
            file.launcher_size.as_deref(),
            Some(DEFAULT_LAUNCHER_SIZE),
        )
        .unwrap_or_default();
        let icon_size = coalesce(
            cli.icon_size.as_deref(),
            file.icon_size.as_deref(),
            Some(DEFAULT_ICON_SIZE),
        )
        .unwrap_or_default();

        let show_quit_button = match cli.show_quit_button.as_deref() {
            Some(text) if !text.trim().is_empty() => parse_loose_bool(text),
            _ => file
                .show_quit_button
                .as_ref()
                .and_then(LooseBool::get)
                .unwrap_or(false),
        };

        let stylesheet = coalesce(
            cli.stylesheet.as_deref(),
            file.stylesheet.as_deref(),
            Some(DEFAULT_STYLESHEET),
        )
        .map(|s| expand_home(&s));

        let mut config = Self {
            stylesheet,
            launcher_size: Size::parse(&launcher_size)?,
            icon_size: Size::parse(&icon_size)?,
            icon_theme: coalesce(cli.icon_theme.as_deref(), file.icon_theme.as_deref(), None),
            tabs: Vec::new(),
            aggressive_icon_search: file
                .aggressive_icon_search
                .as_ref()
                .and_then(LooseBool::get)
                .unwrap_or(false),
            quit_button_text: coalesce(
                None,
                file.quit_button_text.as_deref(),
                Some(DEFAULT_QUIT_BUTTON_TEXT),
            )
            .unwrap_or_default(),
            show_quit_button,
            autostart: file
                .autostart
                .unwrap_or_default()
                .into_iter()
                .filter(|c| !c.trim().is_empty())
                .collect(),
        };

        config.tabs = config.build_tabs(file.tabs_and_launchers.unwrap_or_default())?;

        if let Some(path) = &config.stylesheet {
            if !path.exists() {
                warn!(
                    "Stylesheet {:?} could not be located. Using default.",
                    path
                );
                config.stylesheet = None;
            }
        }

        debug!(
            "Resolved config: {} tabs, launcher {}, icon {}",
            config.tabs.len(),
            config.launcher_size,
            config.icon_size
        );
        Ok(config)
    }

    /// Values cascaded into every tab.
    pub fn sizing(&self) -> Sizing {
        Sizing {
            icon_size: self.icon_size,
            launcher_size: self.launcher_size,
            aggressive_icon_search: self.aggressive_icon_search,
        }
    }

    fn build_tabs(&self, raw: serde_yaml::Mapping) -> Result<Vec<TabSpec>, ConfigError> {
        let defaults = self.sizing();
        let mut tabs = Vec::with_capacity(raw.len());

        for (key, value) in raw {
            let key = key_to_string(&key);
            let raw_tab: RawTab = if value.is_null() {
                RawTab::default()
            } else {
                serde_yaml::from_value(value).map_err(|source| ConfigError::TabParse {
                    tab: key.clone(),
                    source,
                })?
            };
            tabs.push(TabSpec::build(&key, raw_tab, defaults)?);
        }

        Ok(tabs)
    }
}
