//! Stylesheets.
//!
//! A stylesheet is a list of CSS-like rules addressed by object name:
//!
//! ```text
//! #LaunchButton { background-color: #303040; border-radius: 8px; }
//! QLabel#LaunchButtonTitle { color: white; font-size: 18px; }
//! ```
//!
//! Rules are applied on top of the built-in theme. Anything not understood
//! is logged at debug level and skipped.

use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Styleable parts of the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    Window,
    TabBar,
    Tab,
    TabDescription,
    LauncherPane,
    LaunchButton,
    LaunchButtonTitle,
    LaunchButtonDescription,
    QuitButton,
}

impl Element {
    pub const ALL: [Element; 9] = [
        Element::Window,
        Element::TabBar,
        Element::Tab,
        Element::TabDescription,
        Element::LauncherPane,
        Element::LaunchButton,
        Element::LaunchButtonTitle,
        Element::LaunchButtonDescription,
        Element::QuitButton,
    ];

    pub fn from_object_name(name: &str) -> Option<Self> {
        Some(match name {
            "KiLauncher" => Element::Window,
            "TabBar" => Element::TabBar,
            "Tab" => Element::Tab,
            "TabDescription" => Element::TabDescription,
            "LauncherPane" => Element::LauncherPane,
            "LaunchButton" => Element::LaunchButton,
            "LaunchButtonTitle" => Element::LaunchButtonTitle,
            "LaunchButtonDescription" => Element::LaunchButtonDescription,
            "QuitButton" => Element::QuitButton,
            _ => return None,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    const fn hex(value: u32) -> Self {
        Self::rgba((value >> 16) as u8, (value >> 8) as u8, value as u8, 255)
    }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()`, `rgba()` or a basic color name.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(hex) = text.strip_prefix('#') {
            return parse_hex(hex);
        }

        let lower = text.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_function(args);
        }

        let named = match lower.as_str() {
            "transparent" => Self::TRANSPARENT,
            "black" => Self::hex(0x000000),
            "white" => Self::hex(0xffffff),
            "red" => Self::hex(0xff0000),
            "green" => Self::hex(0x008000),
            "blue" => Self::hex(0x0000ff),
            "yellow" => Self::hex(0xffff00),
            "orange" => Self::hex(0xffa500),
            "purple" => Self::hex(0x800080),
            "navy" => Self::hex(0x000080),
            "silver" => Self::hex(0xc0c0c0),
            "gray" | "grey" => Self::hex(0x808080),
            "darkgray" | "darkgrey" => Self::hex(0xa9a9a9),
            "lightgray" | "lightgrey" => Self::hex(0xd3d3d3),
            _ => return None,
        };
        Some(named)
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(Rgba::rgba(nibble(0)?, nibble(1)?, nibble(2)?, 255))
        }
        6 => Some(Rgba::rgba(byte(0)?, byte(2)?, byte(4)?, 255)),
        8 => Some(Rgba::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_rgb_function(args: &str) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let channel = |s: &str| -> Option<u8> {
        match s.strip_suffix('%') {
            Some(pct) => pct
                .parse::<f32>()
                .ok()
                .map(|p| (p.clamp(0.0, 100.0) * 2.55).round() as u8),
            None => s.parse::<u16>().ok().map(|v| v.min(255) as u8),
        }
    };
    // Fractional alpha is 0.0-1.0 (CSS), integral alpha is 0-255 (Qt).
    let alpha = |s: &str| -> Option<u8> {
        let value = s.parse::<f32>().ok()?;
        if s.contains('.') {
            Some((value.clamp(0.0, 1.0) * 255.0).round() as u8)
        } else {
            Some(value.clamp(0.0, 255.0).round() as u8)
        }
    };

    match parts.as_slice() {
        [r, g, b] => Some(Rgba::rgba(channel(r)?, channel(g)?, channel(b)?, 255)),
        [r, g, b, a] => Some(Rgba::rgba(channel(r)?, channel(g)?, channel(b)?, alpha(a)?)),
        _ => None,
    }
}

/// Resolved look of one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementStyle {
    pub background: Rgba,
    pub foreground: Rgba,
    /// Logical pixels.
    pub font_size: f32,
    pub border_radius: f32,
    pub border_color: Rgba,
}

impl ElementStyle {
    const fn new(background: u32, foreground: u32, font_size: f32, border_radius: f32) -> Self {
        Self {
            background: Rgba::hex(background),
            foreground: Rgba::hex(foreground),
            font_size,
            border_radius,
            border_color: Rgba::TRANSPARENT,
        }
    }

    const fn bordered(self, border_color: u32) -> Self {
        Self {
            border_color: Rgba::hex(border_color),
            ..self
        }
    }

    const fn clear(self) -> Self {
        Self {
            background: Rgba::TRANSPARENT,
            ..self
        }
    }

    /// Apply one `property: value` declaration. Returns false when not understood.
    fn apply(&mut self, property: &str, value: &str) -> bool {
        match property {
            "background" | "background-color" => set(&mut self.background, Rgba::parse(value)),
            "color" => set(&mut self.foreground, Rgba::parse(value)),
            "border-color" => set(&mut self.border_color, Rgba::parse(value)),
            // `border: 1px solid #445` - only the color is used.
            "border" => set(
                &mut self.border_color,
                value.split_whitespace().find_map(Rgba::parse),
            ),
            "font-size" => set(&mut self.font_size, parse_length(value)),
            "border-radius" => set(&mut self.border_radius, parse_length(value)),
            _ => false,
        }
    }
}

fn set<T>(slot: &mut T, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *slot = v;
            true
        }
        None => false,
    }
}

/// `12px`, `12` or `9pt` to logical pixels.
fn parse_length(value: &str) -> Option<f32> {
    let value = value.trim();
    let (number, scale) = if let Some(n) = value.strip_suffix("px") {
        (n, 1.0)
    } else if let Some(n) = value.strip_suffix("pt") {
        (n, 4.0 / 3.0)
    } else {
        (value, 1.0)
    };
    let number: f32 = number.trim().parse().ok()?;
    (number >= 0.0).then_some(number * scale)
}

/// Styles for every element.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    styles: HashMap<Element, ElementStyle>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Theme {
    pub fn builtin() -> Self {
        let styles = Element::ALL
            .into_iter()
            .map(|element| (element, builtin_style(element)))
            .collect();
        Self { styles }
    }

    pub fn get(&self, element: Element) -> ElementStyle {
        self.styles
            .get(&element)
            .copied()
            .unwrap_or_else(|| builtin_style(element))
    }

    /// Built-in theme with the stylesheet's rules applied in order.
    pub fn from_stylesheet(text: &str) -> Self {
        let mut theme = Self::builtin();
        let text = strip_comments(text);

        for block in text.split('}') {
            let Some((selectors, body)) = block.split_once('{') else {
                if !block.trim().is_empty() {
                    debug!("Stylesheet: ignoring trailing text {:?}", block.trim());
                }
                continue;
            };

            let elements: Vec<Element> = selectors
                .split(',')
                .filter_map(|selector| {
                    let element = selector_element(selector);
                    if element.is_none() {
                        debug!("Stylesheet: unsupported selector {:?}", selector.trim());
                    }
                    element
                })
                .collect();
            if elements.is_empty() {
                continue;
            }

            for declaration in body.split(';') {
                let Some((property, value)) = declaration.split_once(':') else {
                    continue;
                };
                let property = property.trim().to_ascii_lowercase();
                let value = value.trim();

                for element in &elements {
                    let style = theme
                        .styles
                        .entry(*element)
                        .or_insert_with(|| builtin_style(*element));
                    if !style.apply(&property, value) {
                        debug!(
                            "Stylesheet: ignoring {}: {} on {:?}",
                            property, value, element
                        );
                    }
                }
            }
        }

        theme
    }

    /// Load the stylesheet at `path`, or the built-in theme when there is none.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };

        match fs::read_to_string(path) {
            Ok(text) => {
                info!("Applying stylesheet {:?}", path);
                Self::from_stylesheet(&text)
            }
            Err(e) => {
                warn!("Cannot read stylesheet {:?}: {}. Using default.", path, e);
                Self::builtin()
            }
        }
    }
}

fn builtin_style(element: Element) -> ElementStyle {
    match element {
        Element::Window => ElementStyle::new(0x1e1e2e, 0xcdd6f4, 14.0, 0.0),
        Element::TabBar => ElementStyle::new(0x181825, 0xcdd6f4, 14.0, 0.0),
        Element::Tab => ElementStyle::new(0x313244, 0xcdd6f4, 15.0, 6.0).bordered(0x45475a),
        Element::TabDescription => ElementStyle::new(0, 0xbac2de, 16.0, 0.0).clear(),
        Element::LauncherPane => ElementStyle::new(0x1e1e2e, 0xcdd6f4, 14.0, 0.0),
        Element::LaunchButton => {
            ElementStyle::new(0x313244, 0xcdd6f4, 14.0, 8.0).bordered(0x45475a)
        }
        Element::LaunchButtonTitle => ElementStyle::new(0, 0xcdd6f4, 16.0, 0.0).clear(),
        Element::LaunchButtonDescription => ElementStyle::new(0, 0xa6adc8, 12.0, 0.0).clear(),
        Element::QuitButton => ElementStyle::new(0xf38ba8, 0x11111b, 14.0, 6.0),
    }
}

fn strip_comments(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("/*") {
        result.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return result,
        }
    }
    result.push_str(rest);
    result
}

/// The element a selector addresses: the last `#ObjectName`, or a bare name.
/// Selectors with pseudo-states (`:hover`) are not supported.
fn selector_element(selector: &str) -> Option<Element> {
    let selector = selector.trim();
    if selector.contains(':') {
        return None;
    }
    let last = selector.split_whitespace().last()?;
    let name = match last.rfind('#') {
        Some(idx) => &last[idx + 1..],
        None => last,
    };
    Element::from_object_name(name)
}
