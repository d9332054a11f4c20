//! Locating .desktop files from a directory or a glob pattern.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Expand a desktop path into the .desktop files it names.
///
/// A directory means every `*.desktop` file directly inside it. Anything
/// else is split into a parent directory and a file-name pattern, where `*`
/// matches any run of characters and `?` matches one. Results are sorted so
/// repeated runs see the same order. A missing directory yields nothing.
pub fn find_desktop_files(desktop_path: &Path) -> Vec<PathBuf> {
    let (dir, pattern) = if desktop_path.is_dir() {
        (desktop_path.to_path_buf(), "*.desktop".to_string())
    } else {
        let dir = desktop_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();
        let pattern = desktop_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        debug!(
            "{:?} dissected into {:?} and {}",
            desktop_path, dir, pattern
        );
        (dir, pattern)
    };

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Desktop path {:?} is not readable: {}", dir, e);
            return Vec::new();
        }
    };

    let mut found: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| !t.is_dir()).unwrap_or(false))
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|name| wildcard_match(&pattern, name))
        })
        .map(|e| e.path())
        .collect();

    found.sort();
    found
}

/// Shell-style file-name matching supporting `*` and `?`.
pub fn wildcard_match(pattern: &str, name: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let name: Vec<char> = name.chars().collect();

    let (mut p, mut n) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while n < name.len() {
        match pattern.get(p) {
            Some('*') => {
                star = Some((p, n));
                p += 1;
            }
            Some('?') => {
                p += 1;
                n += 1;
            }
            Some(c) if *c == name[n] => {
                p += 1;
                n += 1;
            }
            _ => match star {
                // Backtrack: let the last star swallow one more character.
                Some((sp, sn)) => {
                    p = sp + 1;
                    n = sn + 1;
                    star = Some((sp, sn + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|c| *c == '*')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_match() {
        assert!(wildcard_match("*.desktop", "firefox.desktop"));
        assert!(wildcard_match("org.*.desktop", "org.gnome.Calculator.desktop"));
        assert!(wildcard_match("app?.desktop", "app1.desktop"));
        assert!(wildcard_match("*", ""));
        assert!(!wildcard_match("*.desktop", "firefox.desktop.bak"));
        assert!(!wildcard_match("app?.desktop", "app.desktop"));
        assert!(!wildcard_match("exact.desktop", "other.desktop"));
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.desktop", "a.desktop", "c.txt", "office-writer.desktop"] {
            fs::write(dir.path().join(name), "[Desktop Entry]\n").unwrap();
        }
        fs::create_dir(dir.path().join("sub.desktop")).unwrap();
        dir
    }

    #[test]
    fn test_directory_lists_desktop_files_sorted() {
        let dir = fixture();
        let names: Vec<_> = find_desktop_files(dir.path())
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["a.desktop", "b.desktop", "office-writer.desktop"]);
    }

    #[test]
    fn test_glob_pattern() {
        let dir = fixture();
        let found = find_desktop_files(&dir.path().join("office-*.desktop"));
        assert_eq!(found, [dir.path().join("office-writer.desktop")]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = fixture();
        assert!(find_desktop_files(&dir.path().join("nowhere/*.desktop")).is_empty());
    }
}
