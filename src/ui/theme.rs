use super::{KiLauncher, Palette};
use crate::style::{self, Element, Rgba, Theme};
use slint::{Color, ComponentHandle};

fn color(rgba: Rgba) -> Color {
    Color::from_argb_u8(rgba.a, rgba.r, rgba.g, rgba.b)
}

fn to_slint(style: style::ElementStyle) -> super::ElementStyle {
    super::ElementStyle {
        background: color(style.background),
        foreground: color(style.foreground),
        font_size: style.font_size,
        border_radius: style.border_radius,
        border_color: color(style.border_color),
    }
}

/// Push every element style into the `Palette` global.
pub fn apply(ui: &KiLauncher, theme: &Theme) {
    let palette = ui.global::<Palette>();
    for element in Element::ALL {
        let style = to_slint(theme.get(element));
        match element {
            Element::Window => palette.set_main_window(style),
            Element::TabBar => palette.set_tab_bar(style),
            Element::Tab => palette.set_tab(style),
            Element::TabDescription => palette.set_tab_description(style),
            Element::LauncherPane => palette.set_launcher_pane(style),
            Element::LaunchButton => palette.set_launch_button(style),
            Element::LaunchButtonTitle => palette.set_launch_button_title(style),
            Element::LaunchButtonDescription => palette.set_launch_button_description(style),
            Element::QuitButton => palette.set_quit_button(style),
        }
    }
}
