//! ki-apps: desktop entries and icon resolution for Linux desktops.
//!
//! Provides:
//! - .desktop file parsing and discovery from a directory or glob
//! - Icon lookup by path, icon theme, pixmap directory and (opt-in)
//!   recursive search, with memoization
//! - Toolkit-independent icon handles that render to RGBA or pass SVGs through

mod desktop_entry;
mod discovery;
mod handle;
mod icons;
mod paths;

pub use desktop_entry::{DesktopEntry, parse_desktop_entry, parse_desktop_file};
pub use discovery::{find_desktop_files, wildcard_match};
pub use handle::{IconHandle, IconImage, IconSource};
pub use icons::{IconLocations, IconResolver, IconTheme};
pub use paths::{FALLBACK_THEME, PIXMAP_DIR, icon_base_directories};
