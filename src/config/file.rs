//! The YAML configuration document and where to find it.

use crate::error::ConfigError;
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Searched in order when no `--config` is given; the first existing file wins.
pub const CONFIG_LOCATIONS: [&str; 3] = [
    "~/.kilauncher.yaml",
    "/etc/kilauncher.yaml",
    "/etc/kilauncher/kilauncher.yaml",
];

/// A boolean that may also be written as a string.
/// Any string other than `false` (case-insensitive) counts as true; a blank
/// string counts as unset.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LooseBool {
    Bool(bool),
    Text(String),
}

impl LooseBool {
    pub fn get(&self) -> Option<bool> {
        match self {
            LooseBool::Bool(b) => Some(*b),
            LooseBool::Text(s) if s.trim().is_empty() => None,
            LooseBool::Text(s) => Some(parse_loose_bool(s)),
        }
    }
}

pub fn parse_loose_bool(text: &str) -> bool {
    !text.trim().eq_ignore_ascii_case("false")
}

/// Top-level keys of the configuration file. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub stylesheet: Option<String>,
    pub launcher_size: Option<String>,
    pub icon_size: Option<String>,
    pub icon_theme: Option<String>,
    pub aggressive_icon_search: Option<LooseBool>,
    pub show_quit_button: Option<LooseBool>,
    pub quit_button_text: Option<String>,
    pub autostart: Option<Vec<String>>,
    /// Tab key -> tab dict, kept in file order.
    pub tabs_and_launchers: Option<serde_yaml::Mapping>,
}

/// One entry of `tabs_and_launchers`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawTab {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub launchers_per_row: Option<usize>,
    pub desktop_path: Option<String>,
    pub categories: Option<Vec<String>>,
    pub launcher_size: Option<String>,
    pub icon_size: Option<String>,
    pub aggressive_icon_search: Option<LooseBool>,
    pub launchers: Option<Vec<RawLauncher>>,
}

/// One entry of a tab's `launchers` list.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawLauncher {
    pub name: Option<String>,
    pub comment: Option<String>,
    pub icon: Option<String>,
    pub command: Option<String>,
    pub desktop_file: Option<String>,
    pub launcher_size: Option<String>,
    pub icon_size: Option<String>,
    pub aggressive_icon_search: Option<LooseBool>,
}

impl FileConfig {
    /// Read and parse a configuration file. An empty document is an empty config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_yaml::from_value(value)
    }
}

/// Render a mapping key (usually a string, sometimes a number) as text.
pub fn key_to_string(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().unwrap_or_default().join(rest),
        None => PathBuf::from(path),
    }
}

/// Pick the configuration file: the explicit one, else the first default
/// location that exists.
pub fn locate_config(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    locate_in(CONFIG_LOCATIONS.iter().map(|l| expand_home(l)))
}

fn locate_in(candidates: impl IntoIterator<Item = PathBuf>) -> Result<PathBuf, ConfigError> {
    for candidate in candidates {
        if candidate.exists() {
            info!("Using config file {:?}", candidate);
            return Ok(candidate);
        }
        debug!("No config at {:?}", candidate);
    }
    Err(ConfigError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let doc = r#"
stylesheet: /tmp/style.qss
launcher_size: 300x100
icon_size: 48x48
show_quit_button: "False"
aggressive_icon_search: true
autostart:
  - xterm
unknown_key: 12
tabs_and_launchers:
  zeta:
    name: Zeta
  1:
    name: One
    launchers:
      - name: Shell
        command: xterm
"#;
        let file = FileConfig::parse(doc).unwrap();
        assert_eq!(file.launcher_size.as_deref(), Some("300x100"));
        assert_eq!(file.show_quit_button.and_then(|b| b.get()), Some(false));
        assert_eq!(file.aggressive_icon_search.and_then(|b| b.get()), Some(true));
        assert_eq!(file.autostart, Some(vec!["xterm".to_string()]));

        let keys: Vec<_> = file
            .tabs_and_launchers
            .unwrap()
            .keys()
            .map(key_to_string)
            .collect();
        assert_eq!(keys, ["zeta", "1"]);
    }

    #[test]
    fn test_empty_document() {
        let file = FileConfig::parse("").unwrap();
        assert!(file.tabs_and_launchers.is_none());
        let file = FileConfig::parse("~\n").unwrap();
        assert!(file.stylesheet.is_none());
    }

    #[test]
    fn test_wrong_type_is_error() {
        assert!(FileConfig::parse("autostart: 12\n").is_err());
    }

    #[test]
    fn test_loose_bool() {
        assert!(parse_loose_bool("True"));
        assert!(parse_loose_bool("yes"));
        assert!(!parse_loose_bool("FALSE"));
        assert_eq!(LooseBool::Bool(false).get(), Some(false));
        assert_eq!(LooseBool::Text("no".to_string()).get(), Some(true));
        assert_eq!(LooseBool::Text("  ".to_string()).get(), None);
    }

    #[test]
    fn test_locate_first_existing() {
        let dir = tempfile::tempdir().unwrap();
        let second = dir.path().join("second.yaml");
        let third = dir.path().join("third.yaml");
        fs::write(&second, "").unwrap();
        fs::write(&third, "").unwrap();

        let found = locate_in([dir.path().join("first.yaml"), second.clone(), third]).unwrap();
        assert_eq!(found, second);
    }

    #[test]
    fn test_locate_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let err = locate_in([dir.path().join("missing.yaml")]).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound));
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = Path::new("/does/not/matter.yaml");
        assert_eq!(locate_config(Some(path)).unwrap(), path);
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileConfig::load(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
