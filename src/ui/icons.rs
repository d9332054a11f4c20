use crate::config::Size;
use ki_apps::{IconHandle, IconImage, IconResolver};
use log::debug;
use slint::{Image, Rgba8Pixel, SharedPixelBuffer};

/// Resolve `name` and turn it into an image scaled to fit `size`.
pub fn load_icon(resolver: &IconResolver, name: &str, aggressive: bool, size: Size) -> Option<Image> {
    if name.trim().is_empty() {
        return None;
    }
    let handle = resolver.resolve(name, aggressive);
    to_image(&handle, size)
}

pub fn to_image(handle: &IconHandle, size: Size) -> Option<Image> {
    match handle.render(size.width, size.height)? {
        IconImage::Raster {
            width,
            height,
            pixels,
        } => {
            let buffer = SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(&pixels, width, height);
            Some(Image::from_rgba8(buffer))
        }
        IconImage::Vector(path) => match Image::load_from_path(&path) {
            Ok(image) => {
                debug!("Loaded vector icon: {:?}", path);
                Some(image)
            }
            Err(e) => {
                debug!("Failed to load icon {:?}: {}", path, e);
                None
            }
        },
    }
}
