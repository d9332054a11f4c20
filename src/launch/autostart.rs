//! Commands started alongside the menu and stopped when it closes.

use super::command::{split_command, strip_placeholders};
use crate::error::LaunchError;
use log::{error, info, warn};
use std::path::Path;
use std::process::{Child, Command, Stdio};

pub struct Autostart {
    children: Vec<(String, Child)>,
}

impl Autostart {
    /// Start every command. Failures are logged and skipped.
    pub fn start(commands: &[String], working_dir: &Path) -> Self {
        let mut children = Vec::with_capacity(commands.len());

        for command in commands {
            match spawn(command, working_dir) {
                Ok(child) => {
                    info!("Autostarted \"{}\" (pid {})", command, child.id());
                    children.push((command.clone(), child));
                }
                Err(e) => error!("Command \"{}\" failed with error: {}", command, e),
            }
        }

        Self { children }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Terminate autostarted processes that are still running.
    pub fn shutdown(&mut self) {
        for (command, child) in &mut self.children {
            match child.try_wait() {
                Ok(Some(status)) => info!("Autostart \"{}\" already exited: {}", command, status),
                Ok(None) => {
                    info!("Stopping autostart \"{}\"", command);
                    if let Err(e) = child.kill() {
                        warn!("Failed to stop \"{}\": {}", command, e);
                    }
                    let _ = child.wait();
                }
                Err(e) => warn!("Cannot query autostart \"{}\": {}", command, e),
            }
        }
        self.children.clear();
    }
}

impl Drop for Autostart {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn spawn(command: &str, working_dir: &Path) -> Result<Child, LaunchError> {
    let command = strip_placeholders(command);
    let (program, args) = split_command(&command)?;
    let child = Command::new(program)
        .args(args)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .spawn()?;
    Ok(child)
}
