//! Toolkit-independent icon handles.

use image::imageops::FilterType;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Which resolution step produced an icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconSource {
    File,
    Theme,
    Pixmap,
    Search,
}

/// An icon ready to hand to a presentation layer.
#[derive(Clone, Debug)]
pub enum IconImage {
    /// RGBA8 pixels, row-major, `width * height * 4` bytes.
    Raster {
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    },
    /// A vector file the presentation layer rasterizes itself.
    Vector(PathBuf),
}

/// Result of an icon lookup. Empty when nothing was found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IconHandle {
    found: Option<(PathBuf, IconSource)>,
}

impl IconHandle {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn found(path: PathBuf, source: IconSource) -> Self {
        Self {
            found: Some((path, source)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_none()
    }

    pub fn path(&self) -> Option<&Path> {
        self.found.as_ref().map(|(path, _)| path.as_path())
    }

    pub fn source(&self) -> Option<IconSource> {
        self.found.as_ref().map(|(_, source)| *source)
    }

    /// Load the icon at the given size.
    ///
    /// Raster files are decoded and scaled to exactly `width`x`height`.
    /// SVG files are passed through untouched.
    pub fn render(&self, width: u32, height: u32) -> Option<IconImage> {
        let path = self.path()?;

        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg") || e.eq_ignore_ascii_case("svgz"));
        if is_svg {
            return Some(IconImage::Vector(path.to_path_buf()));
        }

        let img = match image::open(path) {
            Ok(img) => img,
            Err(e) => {
                warn!("Failed to load icon {:?}: {}", path, e);
                return None;
            }
        };

        let scaled = if img.width() == width && img.height() == height {
            img
        } else {
            img.resize_exact(width.max(1), height.max(1), FilterType::CatmullRom)
        };
        let rgba = scaled.to_rgba8();
        debug!(
            "Rendered icon {:?} at {}x{}",
            path,
            rgba.width(),
            rgba.height()
        );

        Some(IconImage::Raster {
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw(),
        })
    }
}
