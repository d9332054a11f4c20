//! Resolved launcher buttons.

use super::file::{LooseBool, RawLauncher};
use super::size::Size;
use crate::error::FormatError;
use ki_apps::{DesktopEntry, parse_desktop_file};
use log::warn;
use std::io;
use std::path::{Path, PathBuf};

/// Values a button inherits from its tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sizing {
    pub icon_size: Size,
    pub launcher_size: Size,
    pub aggressive_icon_search: bool,
}

/// The descriptive fields of a button, each possibly unset.
///
/// Used both for what a desktop entry provides and for what the
/// configuration sets explicitly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonFields {
    pub name: Option<String>,
    pub comment: Option<String>,
    pub icon: Option<String>,
    pub command: Option<String>,
}

impl ButtonFields {
    /// Fields set here win; unset ones fall back to `base`.
    pub fn over(self, base: ButtonFields) -> ButtonFields {
        ButtonFields {
            name: self.name.or(base.name),
            comment: self.comment.or(base.comment),
            icon: self.icon.or(base.icon),
            command: self.command.or(base.command),
        }
    }
}

impl From<&DesktopEntry> for ButtonFields {
    fn from(entry: &DesktopEntry) -> Self {
        Self {
            name: entry.name.clone(),
            comment: entry.comment.clone(),
            icon: entry.icon.clone(),
            command: entry.exec.clone(),
        }
    }
}

impl From<&RawLauncher> for ButtonFields {
    fn from(raw: &RawLauncher) -> Self {
        Self {
            name: raw.name.clone(),
            comment: raw.comment.clone(),
            icon: raw.icon.clone(),
            command: raw.command.clone(),
        }
    }
}

/// One launchable item, fully resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonSpec {
    pub name: String,
    pub comment: String,
    /// File path, theme icon name, or empty.
    pub icon: String,
    /// Command line as configured; placeholders are stripped at launch.
    pub command: String,
    /// Lowercase, without duplicates, in file order.
    pub categories: Vec<String>,
    pub icon_size: Size,
    pub launcher_size: Size,
    pub aggressive_icon_search: bool,
    pub desktop_file: Option<PathBuf>,
}

impl ButtonSpec {
    /// Build a button from an optional desktop entry plus explicit fields.
    ///
    /// An unreadable desktop file is reported and treated as empty.
    pub fn build(desktop_file: Option<&Path>, explicit: ButtonFields, sizing: Sizing) -> Self {
        let entry = desktop_file.and_then(read_entry);
        let base = entry.as_ref().map(ButtonFields::from).unwrap_or_default();
        let fields = explicit.over(base);

        let mut categories: Vec<String> = Vec::new();
        for category in entry.iter().flat_map(|e| &e.categories) {
            let category = category.to_lowercase();
            if !categories.contains(&category) {
                categories.push(category);
            }
        }

        Self {
            name: fields.name.unwrap_or_default(),
            comment: fields.comment.unwrap_or_default(),
            icon: fields.icon.unwrap_or_default(),
            command: fields.command.unwrap_or_default(),
            categories,
            icon_size: sizing.icon_size,
            launcher_size: sizing.launcher_size,
            aggressive_icon_search: sizing.aggressive_icon_search,
            desktop_file: desktop_file.map(Path::to_path_buf),
        }
    }

    /// Build a button from a `launchers` entry. Sizes set on the entry
    /// itself override the inherited ones.
    pub fn from_raw(raw: &RawLauncher, inherited: Sizing) -> Result<Self, FormatError> {
        let sizing = Sizing {
            icon_size: raw
                .icon_size
                .as_deref()
                .map(Size::parse)
                .transpose()?
                .unwrap_or(inherited.icon_size),
            launcher_size: raw
                .launcher_size
                .as_deref()
                .map(Size::parse)
                .transpose()?
                .unwrap_or(inherited.launcher_size),
            aggressive_icon_search: raw
                .aggressive_icon_search
                .as_ref()
                .and_then(LooseBool::get)
                .unwrap_or(inherited.aggressive_icon_search),
        };

        let desktop_file = raw
            .desktop_file
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(super::file::expand_home);

        Ok(Self::build(
            desktop_file.as_deref(),
            ButtonFields::from(raw),
            sizing,
        ))
    }

    /// Whether any of this button's categories is in `filter` (lowercase).
    pub fn in_categories(&self, filter: &[String]) -> bool {
        self.categories.iter().any(|c| filter.contains(c))
    }
}

fn read_entry(path: &Path) -> Option<DesktopEntry> {
    match parse_desktop_file(path) {
        Ok(entry) => Some(entry),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            warn!("Access denied on desktop file: {:?}, {}", path, e);
            None
        }
        Err(e) => {
            warn!("Cannot read desktop file {:?}: {}", path, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SIZING: Sizing = Sizing {
        icon_size: Size::new(64, 64),
        launcher_size: Size::new(240, 80),
        aggressive_icon_search: false,
    };

    fn write_entry(dir: &Path, file: &str, content: &str) -> PathBuf {
        let path = dir.join(file);
        fs::write(&path, content).unwrap();
        path
    }

    const EDITOR: &str = "[Desktop Entry]\nName=Editor\nComment=Edits text\nIcon=editor\nExec=editor %F\nCategories=Utility;TextEditor;utility;\n";

    #[test]
    fn test_entry_fields_are_base() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_entry(dir.path(), "editor.desktop", EDITOR);

        let spec = ButtonSpec::build(Some(&path), ButtonFields::default(), SIZING);
        assert_eq!(spec.name, "Editor");
        assert_eq!(spec.comment, "Edits text");
        assert_eq!(spec.icon, "editor");
        assert_eq!(spec.command, "editor %F");
        assert_eq!(spec.categories, ["utility", "texteditor"]);
        assert_eq!(spec.desktop_file.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_explicit_command_overrides_only_command() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_entry(dir.path(), "editor.desktop", EDITOR);
        let plain = ButtonSpec::build(Some(&path), ButtonFields::default(), SIZING);

        let explicit = ButtonFields {
            command: Some("myeditor --flag".to_string()),
            ..Default::default()
        };
        let spec = ButtonSpec::build(Some(&path), explicit, SIZING);

        assert_eq!(spec.name, "Editor");
        assert_eq!(spec.command, "myeditor --flag");
        assert_eq!(
            spec,
            ButtonSpec {
                command: "myeditor --flag".to_string(),
                ..plain
            }
        );
    }

    #[test]
    fn test_sizing_never_comes_from_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_entry(dir.path(), "sized.desktop", "[Desktop Entry]\nName=X\nIconSize=16x16\n");
        let sizing = Sizing {
            aggressive_icon_search: true,
            ..SIZING
        };

        let spec = ButtonSpec::build(Some(&path), ButtonFields::default(), sizing);
        assert_eq!(spec.icon_size, SIZING.icon_size);
        assert!(spec.aggressive_icon_search);
    }

    #[test]
    fn test_missing_entry_degrades_to_explicit_fields() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = ButtonFields {
            name: Some("Fallback".to_string()),
            ..Default::default()
        };

        let spec = ButtonSpec::build(Some(&dir.path().join("gone.desktop")), explicit, SIZING);
        assert_eq!(spec.name, "Fallback");
        assert_eq!(spec.command, "");
        assert!(spec.categories.is_empty());
    }

    #[test]
    fn test_unreadable_entry_keeps_explicit_fields() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_file = dir.path().join("folder.desktop");
        fs::create_dir(&not_a_file).unwrap();
        assert!(read_entry(&not_a_file).is_none());

        let explicit = ButtonFields {
            name: Some("Fallback".to_string()),
            command: Some("xterm".to_string()),
            ..Default::default()
        };
        let spec = ButtonSpec::build(Some(&not_a_file), explicit, SIZING);
        assert_eq!(spec.name, "Fallback");
        assert_eq!(spec.command, "xterm");
        assert_eq!(spec.comment, "");
        assert_eq!(spec.desktop_file.as_deref(), Some(not_a_file.as_path()));
    }

    #[test]
    fn test_no_entry_uses_explicit_fields() {
        let explicit = ButtonFields {
            name: Some("Terminal".to_string()),
            command: Some("xterm".to_string()),
            ..Default::default()
        };
        let spec = ButtonSpec::build(None, explicit, SIZING);
        assert_eq!(spec.name, "Terminal");
        assert_eq!(spec.comment, "");
        assert_eq!(spec.command, "xterm");
        assert_eq!(spec.launcher_size, SIZING.launcher_size);
    }

    #[test]
    fn test_raw_size_overrides_inherited() {
        let raw = RawLauncher {
            name: Some("Big".to_string()),
            icon_size: Some("128x128".to_string()),
            ..Default::default()
        };
        let spec = ButtonSpec::from_raw(&raw, SIZING).unwrap();
        assert_eq!(spec.icon_size, Size::new(128, 128));
        assert_eq!(spec.launcher_size, SIZING.launcher_size);

        let bad = RawLauncher {
            launcher_size: Some("huge".to_string()),
            ..Default::default()
        };
        assert!(ButtonSpec::from_raw(&bad, SIZING).is_err());
    }

    #[test]
    fn test_category_membership() {
        let spec = ButtonSpec {
            categories: vec!["office".to_string(), "utility".to_string()],
            ..ButtonSpec::build(None, ButtonFields::default(), SIZING)
        };
        assert!(spec.in_categories(&["utility".to_string()]));
        assert!(!spec.in_categories(&["game".to_string()]));
        assert!(!spec.in_categories(&[]));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_entry_is_degraded() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = write_entry(dir.path(), "locked.desktop", EDITOR);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();
        // Root ignores permission bits; nothing to check then.
        if fs::read_to_string(&path).is_ok() {
            return;
        }

        let spec = ButtonSpec::build(Some(&path), ButtonFields::default(), SIZING);
        assert_eq!(spec.name, "");
        assert_eq!(spec.desktop_file.as_deref(), Some(path.as_path()));
    }
}
