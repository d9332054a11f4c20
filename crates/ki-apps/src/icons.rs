//! Icon theme lookup and the layered icon resolver.

use crate::handle::{IconHandle, IconSource};
use crate::paths::{
    FALLBACK_THEME, PIXMAP_DIR, SHARE_DIR, icon_base_directories, parse_icon_theme_index,
    theme_search_order,
};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Extensions a themed icon may carry, in preference order.
const THEME_EXTENSIONS: [&str; 3] = ["png", "svg", "xpm"];

/// Suffixes tried by the recursive search. The empty entry means the bare name.
const SEARCH_EXTENSIONS: [&str; 10] = [
    "", "png", "xpm", "svg", "jpg", "jpeg", "bmp", "tiff", "tif", "ico",
];

/// Named-icon lookup inside one freedesktop icon theme and its parents.
pub struct IconTheme {
    name: String,
    /// Concrete directories to probe, in lookup order.
    directories: Vec<PathBuf>,
}

impl IconTheme {
    /// Collect the lookup directories of `name` (and the themes it inherits)
    /// across the given base directories. Only `index.theme` files are read.
    pub fn new(name: &str, base_dirs: &[PathBuf]) -> Self {
        let mut directories = Vec::new();

        for theme in theme_search_order(name, base_dirs) {
            for base in base_dirs {
                let theme_root = base.join(&theme);
                if !theme_root.is_dir() {
                    continue;
                }

                match parse_icon_theme_index(&theme_root) {
                    Some(parsed) if !parsed.directories.is_empty() => {
                        for dir in &parsed.directories {
                            directories.push(theme_root.join(&dir.path));
                        }
                    }
                    // Fallback for directories without index.theme
                    _ => directories.push(theme_root),
                }
            }
        }

        debug!(
            "Icon theme {} has {} lookup directories",
            name,
            directories.len()
        );

        Self {
            name: name.to_string(),
            directories,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Find a themed icon by name. Names containing a path separator never match.
    pub fn lookup(&self, icon_name: &str) -> Option<PathBuf> {
        if icon_name.is_empty() || icon_name.contains('/') {
            return None;
        }

        for dir in &self.directories {
            for ext in THEME_EXTENSIONS {
                let candidate = dir.join(format!("{}.{}", icon_name, ext));
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }

        None
    }
}

/// Filesystem locations consulted by [`IconResolver`].
#[derive(Clone, Debug)]
pub struct IconLocations {
    /// Icon theme roots (`<base>/<theme>/...`).
    pub theme_bases: Vec<PathBuf>,
    /// Directory checked for `<dir>/<name>` before any recursive search.
    pub pixmap_dir: PathBuf,
    /// Data directory whose `icons`, `icons/hicolor` and `<name>` subtrees
    /// the recursive search walks.
    pub share_dir: PathBuf,
}

impl IconLocations {
    pub fn system() -> Self {
        Self {
            theme_bases: icon_base_directories(),
            pixmap_dir: PathBuf::from(PIXMAP_DIR),
            share_dir: PathBuf::from(SHARE_DIR),
        }
    }
}

/// Turns icon names or paths into [`IconHandle`]s.
///
/// Strategies are tried in order: direct file, icon theme, pixmap
/// directory, and (only when asked to be aggressive) a recursive search of
/// well-known icon directories. Results are memoized per
/// `(name, aggressive)` pair.
pub struct IconResolver {
    theme: IconTheme,
    locations: IconLocations,
    cache: RwLock<HashMap<(String, bool), IconHandle>>,
}

impl IconResolver {
    /// Resolver over the system icon directories. `theme` defaults to hicolor.
    pub fn new(theme: Option<&str>) -> Self {
        Self::with_locations(theme, IconLocations::system())
    }

    pub fn with_locations(theme: Option<&str>, locations: IconLocations) -> Self {
        let theme = IconTheme::new(theme.unwrap_or(FALLBACK_THEME), &locations.theme_bases);
        Self {
            theme,
            locations,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn theme_name(&self) -> &str {
        self.theme.name()
    }

    /// Resolve an icon name or path. Never fails; an unresolvable icon
    /// yields an empty handle and a warning.
    pub fn resolve(&self, name_or_path: &str, aggressive: bool) -> IconHandle {
        if name_or_path.is_empty() {
            return IconHandle::empty();
        }

        let key = (name_or_path.to_string(), aggressive);
        if let Ok(cache) = self.cache.read() {
            if let Some(cached) = cache.get(&key) {
                return cached.clone();
            }
        }

        let handle = self.resolve_uncached(name_or_path, aggressive);

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key, handle.clone());
        }

        handle
    }

    fn resolve_uncached(&self, name: &str, aggressive: bool) -> IconHandle {
        let direct = Path::new(name);
        if is_readable_file(direct) {
            return IconHandle::found(direct.to_path_buf(), IconSource::File);
        }

        if let Some(path) = self.theme.lookup(name) {
            debug!("Icon {} found in theme {}: {:?}", name, self.theme.name(), path);
            return IconHandle::found(path, IconSource::Theme);
        }

        let pixmap = self.locations.pixmap_dir.join(name);
        if is_readable_file(&pixmap) {
            return IconHandle::found(pixmap, IconSource::Pixmap);
        }

        if aggressive {
            warn!(
                "Had to recursively search for icon \"{}\". \
                 Set a full path to the correct file to reduce startup time.",
                name
            );
            if let Some(path) = self.recursive_search(name) {
                info!("Eventually found icon \"{}\" at {:?}", name, path);
                return IconHandle::found(path, IconSource::Search);
            }
        }

        warn!("Couldn't find an icon for \"{}\"", name);
        IconHandle::empty()
    }

    fn search_directories(&self, name: &str) -> Vec<PathBuf> {
        let share = &self.locations.share_dir;
        vec![
            self.locations.pixmap_dir.clone(),
            share.join("icons"),
            share.join("icons").join(FALLBACK_THEME),
            share.join(name),
        ]
    }

    /// First match in directory-then-extension order.
    fn recursive_search(&self, name: &str) -> Option<PathBuf> {
        // A name with separators cannot be a plain file name.
        if name.contains('/') {
            return None;
        }

        let candidates: Vec<String> = SEARCH_EXTENSIONS
            .iter()
            .map(|ext| {
                if ext.is_empty() {
                    name.to_string()
                } else {
                    format!("{}.{}", name, ext)
                }
            })
            .collect();

        for dir in self.search_directories(name) {
            if !dir.is_dir() {
                continue;
            }

            // One walk per directory; remember the first hit for each candidate.
            let mut hits: Vec<Option<PathBuf>> = vec![None; candidates.len()];
            let walker = walkdir::WalkDir::new(&dir)
                .follow_links(true)
                .sort_by_file_name();
            for entry in walker.into_iter().filter_map(|e| e.ok()) {
                if !entry.file_type().is_file() {
                    continue;
                }
                let Some(file_name) = entry.file_name().to_str() else {
                    continue;
                };
                if let Some(idx) = candidates.iter().position(|c| c == file_name) {
                    if hits[idx].is_none() {
                        hits[idx] = Some(entry.into_path());
                    }
                }
            }

            if let Some(found) = hits.into_iter().flatten().next() {
                return Some(found);
            }
        }

        None
    }
}

/// A regular file this process can open.
fn is_readable_file(path: &Path) -> bool {
    path.is_file() && fs::File::open(path).is_ok()
}
