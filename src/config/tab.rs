//! Tabs: named groups of launcher buttons.

use super::button::{ButtonFields, ButtonSpec, Sizing};
use super::file::{LooseBool, RawTab, expand_home};
use super::size::Size;
use crate::error::{ConfigError, FormatError};
use ki_apps::find_desktop_files;
use log::debug;
use std::path::{Path, PathBuf};

pub const DEFAULT_LAUNCHERS_PER_ROW: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabSpec {
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    /// Discovered launchers first, then explicit ones.
    pub launchers: Vec<ButtonSpec>,
    pub launcher_size: Size,
    pub icon_size: Size,
    pub launchers_per_row: usize,
    pub desktop_path: Option<PathBuf>,
    /// Lowercase category filter for discovered launchers. Empty means no filter.
    pub categories: Vec<String>,
    pub aggressive_icon_search: bool,
}

impl TabSpec {
    /// Build a tab from its raw dict, cascading unset values from `defaults`.
    pub fn build(key: &str, raw: RawTab, defaults: Sizing) -> Result<Self, ConfigError> {
        let tab_format = |source: FormatError| ConfigError::TabFormat {
            tab: key.to_string(),
            source,
        };

        let sizing = Sizing {
            launcher_size: optional_size(raw.launcher_size.as_deref())
                .map_err(tab_format)?
                .unwrap_or(defaults.launcher_size),
            icon_size: optional_size(raw.icon_size.as_deref())
                .map_err(tab_format)?
                .unwrap_or(defaults.icon_size),
            aggressive_icon_search: raw
                .aggressive_icon_search
                .as_ref()
                .and_then(LooseBool::get)
                .unwrap_or(defaults.aggressive_icon_search),
        };

        let categories: Vec<String> = raw
            .categories
            .unwrap_or_default()
            .iter()
            .map(|c| c.to_lowercase())
            .collect();
        let desktop_path = raw
            .desktop_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(expand_home);

        let mut launchers = match &desktop_path {
            Some(path) => discover(path, &categories, sizing),
            None => Vec::new(),
        };

        // Explicit launchers are never category-filtered.
        for raw_launcher in raw.launchers.unwrap_or_default() {
            launchers.push(ButtonSpec::from_raw(&raw_launcher, sizing).map_err(tab_format)?);
        }

        Ok(Self {
            name: raw.name.unwrap_or_else(|| format!("Tab {}", key)),
            description: raw.description.unwrap_or_default(),
            icon: raw.icon.filter(|i| !i.is_empty()),
            launchers,
            launcher_size: sizing.launcher_size,
            icon_size: sizing.icon_size,
            launchers_per_row: raw
                .launchers_per_row
                .unwrap_or(DEFAULT_LAUNCHERS_PER_ROW)
                .max(1),
            desktop_path,
            categories,
            aggressive_icon_search: sizing.aggressive_icon_search,
        })
    }
}

fn optional_size(text: Option<&str>) -> Result<Option<Size>, FormatError> {
    text.map(Size::parse).transpose()
}

/// Build buttons for every desktop file under `path` that passes the category filter.
fn discover(path: &Path, categories: &[String], sizing: Sizing) -> Vec<ButtonSpec> {
    let files = find_desktop_files(path);
    if files.is_empty() {
        debug!("Desktop path {:?} matched no desktop files", path);
    }

    files
        .iter()
        .map(|file| ButtonSpec::build(Some(file), ButtonFields::default(), sizing))
        .filter(|button| {
            let keep = categories.is_empty() || button.in_categories(categories);
            if !keep {
                debug!(
                    "Skipping {:?}: categories {:?} not in {:?}",
                    button.desktop_file, button.categories, categories
                );
            }
            keep
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::file::{LooseBool, RawLauncher};
    use std::fs;

    const DEFAULTS: Sizing = Sizing {
        icon_size: Size::new(64, 64),
        launcher_size: Size::new(240, 80),
        aggressive_icon_search: false,
    };

    fn desktop_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let entries = [
            ("a-writer.desktop", "Writer", "Office;Utility;"),
            ("b-chess.desktop", "Chess", "Game;"),
            ("c-bare.desktop", "Bare", ""),
        ];
        for (file, name, categories) in entries {
            fs::write(
                dir.path().join(file),
                format!(
                    "[Desktop Entry]\nName={}\nExec={}\nCategories={}\n",
                    name,
                    name.to_lowercase(),
                    categories
                ),
            )
            .unwrap();
        }
        dir
    }

    fn names(tab: &TabSpec) -> Vec<&str> {
        tab.launchers.iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn test_category_filter() {
        let dir = desktop_dir();
        let raw = RawTab {
            desktop_path: Some(dir.path().to_string_lossy().to_string()),
            categories: Some(vec!["OFFICE".to_string()]),
            ..Default::default()
        };
        let tab = TabSpec::build("office", raw, DEFAULTS).unwrap();
        assert_eq!(names(&tab), ["Writer"]);
        assert_eq!(tab.categories, ["office"]);
    }

    #[test]
    fn test_no_filter_keeps_everything_in_order() {
        let dir = desktop_dir();
        let raw = RawTab {
            desktop_path: Some(dir.path().to_string_lossy().to_string()),
            ..Default::default()
        };
        let tab = TabSpec::build("all", raw, DEFAULTS).unwrap();
        assert_eq!(names(&tab), ["Writer", "Chess", "Bare"]);
    }

    #[test]
    fn test_glob_desktop_path() {
        let dir = desktop_dir();
        let raw = RawTab {
            desktop_path: Some(dir.path().join("b-*.desktop").to_string_lossy().to_string()),
            ..Default::default()
        };
        let tab = TabSpec::build("games", raw, DEFAULTS).unwrap();
        assert_eq!(names(&tab), ["Chess"]);
    }

    #[test]
    fn test_explicit_launchers_follow_discovered_and_bypass_filter() {
        let dir = desktop_dir();
        let raw = RawTab {
            desktop_path: Some(dir.path().to_string_lossy().to_string()),
            categories: Some(vec!["game".to_string()]),
            launchers: Some(vec![RawLauncher {
                name: Some("Terminal".to_string()),
                command: Some("xterm".to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        };
        let tab = TabSpec::build("mixed", raw, DEFAULTS).unwrap();
        assert_eq!(names(&tab), ["Chess", "Terminal"]);
    }

    #[test]
    fn test_blank_aggressive_flag_inherits() {
        let inherited = Sizing {
            aggressive_icon_search: true,
            ..DEFAULTS
        };
        let raw = RawTab {
            aggressive_icon_search: Some(LooseBool::Text(String::new())),
            launchers: Some(vec![RawLauncher {
                name: Some("Blank".to_string()),
                aggressive_icon_search: Some(LooseBool::Text("".to_string())),
                ..Default::default()
            }]),
            ..Default::default()
        };
        let tab = TabSpec::build("t", raw, inherited).unwrap();
        assert!(tab.aggressive_icon_search);
        assert!(tab.launchers[0].aggressive_icon_search);
    }

    #[test]
    fn test_cascading_sizes() {
        let raw = RawTab {
            icon_size: Some("32x32".to_string()),
            aggressive_icon_search: Some(LooseBool::Bool(true)),
            launchers: Some(vec![
                RawLauncher {
                    name: Some("Inherits".to_string()),
                    ..Default::default()
                },
                RawLauncher {
                    name: Some("Own".to_string()),
                    launcher_size: Some("100x50".to_string()),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        };
        let tab = TabSpec::build("t", raw, DEFAULTS).unwrap();

        assert_eq!(tab.icon_size, Size::new(32, 32));
        assert_eq!(tab.launcher_size, DEFAULTS.launcher_size);
        assert!(tab.aggressive_icon_search);

        let inherits = &tab.launchers[0];
        assert_eq!(inherits.icon_size, Size::new(32, 32));
        assert_eq!(inherits.launcher_size, Size::new(240, 80));
        assert!(inherits.aggressive_icon_search);

        let own = &tab.launchers[1];
        assert_eq!(own.launcher_size, Size::new(100, 50));
        assert_eq!(own.icon_size, Size::new(32, 32));
    }

    #[test]
    fn test_defaults_and_names() {
        let tab = TabSpec::build("7", RawTab::default(), DEFAULTS).unwrap();
        assert_eq!(tab.name, "Tab 7");
        assert_eq!(tab.description, "");
        assert_eq!(tab.launchers_per_row, DEFAULT_LAUNCHERS_PER_ROW);
        assert!(tab.launchers.is_empty());
        assert_eq!(tab.icon_size, DEFAULTS.icon_size);
        assert_eq!(tab.launcher_size, DEFAULTS.launcher_size);

        let raw = RawTab {
            launchers_per_row: Some(0),
            ..Default::default()
        };
        assert_eq!(TabSpec::build("z", raw, DEFAULTS).unwrap().launchers_per_row, 1);
    }

    #[test]
    fn test_bad_size_names_tab() {
        let raw = RawTab {
            launcher_size: Some("wide".to_string()),
            ..Default::default()
        };
        match TabSpec::build("broken", raw, DEFAULTS) {
            Err(ConfigError::TabFormat { tab, source }) => {
                assert_eq!(tab, "broken");
                assert_eq!(source.input, "wide");
            }
            other => panic!("Expected TabFormat error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_desktop_path() {
        let dir = tempfile::tempdir().unwrap();
        let raw = RawTab {
            desktop_path: Some(dir.path().join("nope").to_string_lossy().to_string()),
            ..Default::default()
        };
        assert!(TabSpec::build("x", raw, DEFAULTS).unwrap().launchers.is_empty());
    }
}
