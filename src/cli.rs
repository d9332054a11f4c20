//! Command-line arguments.

use crate::config::CliOverrides;
use clap::Parser;
use std::path::PathBuf;

/// KiLauncher - fullscreen launcher menu
#[derive(Parser, Debug)]
#[command(name = "kilauncher")]
#[command(about = "Static fullscreen launcher menu driven by a YAML file", long_about = None)]
pub struct Cli {
    /// The configuration file to use
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the stylesheet in the config file
    #[arg(short, long)]
    pub stylesheet: Option<String>,

    /// Default launcher size, as WxH
    #[arg(long)]
    pub launcher_size: Option<String>,

    /// Default icon size, as WxH
    #[arg(long)]
    pub icon_size: Option<String>,

    /// Icon theme used for name lookups
    #[arg(long)]
    pub icon_theme: Option<String>,

    /// Show the quit button; a bare flag means true
    #[arg(short = 'b', long = "quit-button", num_args = 0..=1, default_missing_value = "true")]
    pub quit_button: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            stylesheet: self.stylesheet.clone(),
            launcher_size: self.launcher_size.clone(),
            icon_size: self.icon_size.clone(),
            icon_theme: self.icon_theme.clone(),
            show_quit_button: self.quit_button.clone(),
        }
    }
}
