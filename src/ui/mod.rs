//! The fullscreen menu.
//!
//! A single Timer drains launch completion events on the UI thread and
//! flips the affected button back to idle.

mod grid;
mod icons;
mod models;
mod theme;

use crate::config::AppConfig;
use crate::error::LaunchError;
use crate::launch::{EVENT_POLL_INTERVAL_MS, LaunchEvent, LaunchRunner, LauncherId};
use crate::style::Theme;
use ki_apps::IconResolver;
use log::{debug, error, info, warn};
use slint::ComponentHandle;
use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

slint::include_modules!();

const ERROR_TITLE: &str = "Command Failed!";
const ERROR_MESSAGE: &str = "Sorry, this program isn't working!";

pub fn run(config: &AppConfig, resolver: &IconResolver, theme: &Theme) -> Result<(), Box<dyn Error>> {
    let ui = KiLauncher::new()?;
    theme::apply(&ui, theme);

    let models = Rc::new(models::TabModels::build(config, resolver));
    ui.set_tabs(models.model());
    ui.set_show_tab_bar(config.tabs.len() > 1);
    ui.set_show_quit_button(config.show_quit_button);
    ui.set_quit_button_text(quit_label(&config.quit_button_text).into());
    ui.set_error_title(ERROR_TITLE.into());
    ui.set_error_message(ERROR_MESSAGE.into());

    if config.tabs.is_empty() {
        warn!("No tabs were configured");
    }

    let runner = Rc::new(RefCell::new(LaunchRunner::new()));

    let ui_weak_launch = ui.as_weak();
    let runner_launch = runner.clone();
    let models_launch = models.clone();
    ui.on_launch(move |tab, index| {
        let (Ok(tab), Ok(index)) = (usize::try_from(tab), usize::try_from(index)) else {
            return;
        };
        let id = LauncherId::new(tab, index);
        let Some(command) = models_launch.command(id) else {
            warn!("Unknown launcher {}", id);
            return;
        };

        match runner_launch.borrow_mut().launch(id, command) {
            Ok(()) => models_launch.set_running(id, true),
            Err(LaunchError::Busy) => debug!("Launcher {} is still running", id),
            Err(e) => {
                error!("Command \"{}\" failed with error: {}", command, e);
                if let Some(ui) = ui_weak_launch.upgrade() {
                    ui.set_error_visible(true);
                }
            }
        }
    });

    ui.on_quit(|| {
        info!("Quit requested");
        if let Err(e) = slint::quit_event_loop() {
            error!("Failed to stop the event loop: {}", e);
        }
    });

    let ui_weak_events = ui.as_weak();
    let runner_events = runner.clone();
    let event_timer = slint::Timer::default();
    event_timer.start(
        slint::TimerMode::Repeated,
        std::time::Duration::from_millis(EVENT_POLL_INTERVAL_MS),
        move || {
            let events = runner_events.borrow_mut().drain();
            for event in events {
                models.set_running(event.id(), false);
                if report(&event) {
                    if let Some(ui) = ui_weak_events.upgrade() {
                        ui.set_error_visible(true);
                    }
                }
            }
        },
    );

    ui.window().set_fullscreen(true);
    ui.run()?;

    let pending = runner.borrow().in_flight();
    if pending > 0 {
        info!("Exiting with {} launched programs still running", pending);
    }
    Ok(())
}

fn quit_label(text: &str) -> &str {
    if text.trim().is_empty() {
        "X"
    } else {
        text
    }
}

/// Log a completed launch. Returns true when the user should be notified.
fn report(event: &LaunchEvent) -> bool {
    let output = event.output();
    match event {
        LaunchEvent::Finished { id, code: 0, .. } => {
            debug!("Launcher {} exited cleanly", id);
            false
        }
        LaunchEvent::Finished { id, code, .. } => {
            warn!("Launcher {} exited with code {}", id, code);
            log_output(&output.stdout, &output.stderr);
            false
        }
        LaunchEvent::Failed { id, reason, .. } => {
            error!("Launcher {} failed: {}", id, reason);
            log_output(&output.stdout, &output.stderr);
            true
        }
    }
}

fn log_output(stdout: &str, stderr: &str) {
    if !stdout.trim().is_empty() {
        info!("stdout: {}", stdout.trim_end());
    }
    if !stderr.trim().is_empty() {
        warn!("stderr: {}", stderr.trim_end());
    }
}
