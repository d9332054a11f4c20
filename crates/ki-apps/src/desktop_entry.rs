//! Desktop entry parsing.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Fields read from the `[Desktop Entry]` group of a .desktop file.
/// Keys missing from the file stay `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DesktopEntry {
    pub name: Option<String>,
    pub comment: Option<String>,
    pub icon: Option<String>,
    pub exec: Option<String>,
    pub categories: Vec<String>,
    pub path: PathBuf,
}

/// Read and parse a .desktop file.
///
/// Returns the I/O error untouched so callers can tell a permission problem
/// from a missing file.
pub fn parse_desktop_file(path: &Path) -> io::Result<DesktopEntry> {
    let content = fs::read_to_string(path)?;
    let mut entry = parse_desktop_entry(&content);
    entry.path = path.to_path_buf();
    Ok(entry)
}

/// Parse the text of a .desktop file.
pub fn parse_desktop_entry(content: &str) -> DesktopEntry {
    let mut entries = HashMap::new();
    let mut in_desktop_entry = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            in_desktop_entry = line == "[Desktop Entry]";
            continue;
        }

        if in_desktop_entry {
            if let Some((key, value)) = line.split_once('=') {
                // Localized keys (Name[de]) are not used.
                let key = key.trim();
                if !key.contains('[') {
                    entries.insert(key.to_string(), unescape(value.trim()));
                }
            }
        }
    }

    DesktopEntry {
        name: entries.remove("Name"),
        comment: entries.remove("Comment"),
        icon: entries.remove("Icon"),
        exec: entries.remove("Exec"),
        categories: entries
            .get("Categories")
            .map(|s| {
                s.split(';')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default(),
        path: PathBuf::new(),
    }
}

fn unescape(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => result.push(' '),
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('\\') => result.push('\\'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDITOR: &str = "\
# comment
[Desktop Entry]
Type=Application
Name=Editor
Name[de]=Bearbeiter
Comment=Edit\\stext files
Icon=accessories-text-editor
Exec=editor %F
Categories=Utility;TextEditor;

[Desktop Action new-window]
Name=New Window
Exec=editor --new-window
";

    #[test]
    fn test_parse_entry_fields() {
        let entry = parse_desktop_entry(EDITOR);
        assert_eq!(entry.name.as_deref(), Some("Editor"));
        assert_eq!(entry.comment.as_deref(), Some("Edit text files"));
        assert_eq!(entry.icon.as_deref(), Some("accessories-text-editor"));
        assert_eq!(entry.exec.as_deref(), Some("editor %F"));
        assert_eq!(entry.categories, ["Utility", "TextEditor"]);
    }

    #[test]
    fn test_missing_keys_stay_none() {
        let entry = parse_desktop_entry("[Desktop Entry]\nName=Bare\n");
        assert_eq!(entry.name.as_deref(), Some("Bare"));
        assert!(entry.comment.is_none());
        assert!(entry.exec.is_none());
        assert!(entry.categories.is_empty());
    }

    #[test]
    fn test_parse_file_records_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.desktop");
        fs::write(&path, EDITOR).unwrap();

        let entry = parse_desktop_file(&path).unwrap();
        assert_eq!(entry.path, path);
        assert_eq!(entry.name.as_deref(), Some("Editor"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_desktop_file(&dir.path().join("nope.desktop")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
