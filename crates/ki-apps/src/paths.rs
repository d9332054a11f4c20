//! Path helpers for XDG icon directories and icon theme indexes.

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

/// Theme every freedesktop icon lookup falls back to.
pub const FALLBACK_THEME: &str = "hicolor";

/// Standard pixmap directory checked before any recursive search.
pub const PIXMAP_DIR: &str = "/usr/share/pixmaps";

/// Shared data directory the recursive search starts from.
pub const SHARE_DIR: &str = "/usr/share";

/// Get base icon directories (XDG data home, legacy ~/.icons, XDG data dirs).
pub fn icon_base_directories() -> Vec<PathBuf> {
    let mut result = Vec::new();
    let home = dirs::home_dir().unwrap_or_default();

    let xdg_data_home = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home.join(".local/share"));
    let xdg_data_dirs = std::env::var("XDG_DATA_DIRS")
        .unwrap_or_else(|_| "/usr/local/share:/usr/share".to_string());

    // User icons
    result.push(xdg_data_home.join("icons"));
    result.push(home.join(".icons"));

    // System icons
    for data_dir in xdg_data_dirs.split(':') {
        if !data_dir.is_empty() {
            result.push(PathBuf::from(data_dir).join("icons"));
        }
    }

    result
}

/// One subdirectory listed by an `index.theme`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeDirectory {
    pub path: String,
    pub size: u32,
    pub scalable: bool,
}

/// Parsed index.theme content.
#[derive(Clone, Debug, Default)]
pub struct ParsedIconTheme {
    pub directories: Vec<ThemeDirectory>,
    pub inherits: Vec<String>,
}

pub fn parse_icon_theme_index(theme_root: &Path) -> Option<ParsedIconTheme> {
    let content = fs::read_to_string(theme_root.join("index.theme")).ok()?;
    Some(parse_icon_theme_content(&content))
}

fn parse_icon_theme_content(content: &str) -> ParsedIconTheme {
    let mut parsed = ParsedIconTheme::default();
    let mut section = String::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            section = line[1..line.len() - 1].to_string();
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());

        if section.eq_ignore_ascii_case("Icon Theme") {
            let list = || {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
            };
            match key {
                "Directories" => {
                    parsed.directories = list()
                        .map(|path| ThemeDirectory {
                            path,
                            size: 0,
                            scalable: false,
                        })
                        .collect();
                }
                "Inherits" => parsed.inherits = list().collect(),
                _ => {}
            }
        } else if let Some(dir) = parsed.directories.iter_mut().find(|d| d.path == section) {
            match key {
                "Size" => dir.size = value.parse().unwrap_or(0),
                "Type" => dir.scalable = value.eq_ignore_ascii_case("Scalable"),
                _ => {}
            }
        }
    }

    // Scalable icons first, then the largest fixed sizes; downscaling looks best.
    parsed
        .directories
        .sort_by(|a, b| b.scalable.cmp(&a.scalable).then(b.size.cmp(&a.size)));
    parsed
}

/// Resolve a theme's inheritance chain across the given base directories.
/// The result always ends with `hicolor`.
pub fn theme_search_order(theme: &str, base_dirs: &[PathBuf]) -> Vec<String> {
    let mut result = Vec::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([theme.to_string()]);

    while let Some(theme) = queue.pop_front() {
        if !visited.insert(theme.clone()) {
            continue;
        }
        result.push(theme.clone());

        for base in base_dirs {
            if let Some(parsed) = parse_icon_theme_index(&base.join(&theme)) {
                for parent in parsed.inherits {
                    if !visited.contains(&parent) {
                        queue.push_back(parent);
                    }
                }
                break; // Only parse first found theme instance
            }
        }
    }

    if !visited.contains(FALLBACK_THEME) {
        result.push(FALLBACK_THEME.to_string());
    }

    result
}
