//! KiLauncher - static fullscreen launcher menu
//!
//! Reads a YAML file describing tabs of launcher buttons, shows them
//! fullscreen and runs the configured command when a button is pressed.

mod cli;
mod config;
mod error;
mod launch;
mod style;
mod ui;

use clap::Parser;
use cli::Cli;
use ki_apps::IconResolver;
use launch::Autostart;
use log::{error, info};
use std::error::Error;
use std::path::PathBuf;
use style::Theme;

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting KiLauncher...");

    let config = match config::load(cli.config.as_deref(), &cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Loaded {} tabs with {} launchers",
        config.tabs.len(),
        config.tabs.iter().map(|t| t.launchers.len()).sum::<usize>()
    );

    let resolver = IconResolver::new(config.icon_theme.as_deref());
    info!("Using icon theme \"{}\"", resolver.theme_name());
    let theme = Theme::load(config.stylesheet.as_deref());

    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
    let mut autostart = Autostart::start(&config.autostart, &home);
    if !autostart.is_empty() {
        info!("Autostarted {} commands", autostart.len());
    }

    let result = ui::run(&config, &resolver, &theme);
    autostart.shutdown();
    result
}
