//! Spawning launcher commands and reporting their completion.
//!
//! Each launch spawns the process, one reader thread per output stream and
//! one watcher thread that waits for the exit and sends a [`LaunchEvent`]
//! back over a channel. The UI thread drains the channel from its polling
//! timer.

use super::command::{split_command, strip_placeholders};
use super::state::{LaunchTracker, LauncherId};
#[cfg(test)]
use super::state::LaunchState;
use crate::error::LaunchError;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, info};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Output collected from a launched process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Bytes kept per stream; the rest is read and dropped.
const OUTPUT_LIMIT: usize = 64 * 1024;

/// How long to wait after exit for output still in flight.
const OUTPUT_GRACE: Duration = Duration::from_millis(250);

/// One output stream drained on its own thread into a bounded buffer.
struct Capture {
    buffer: Arc<Mutex<Vec<u8>>>,
    done: Receiver<()>,
}

impl Capture {
    fn start<R: Read + Send + 'static>(stream: Option<R>, name: String) -> io::Result<Self> {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let (done_tx, done) = crossbeam_channel::bounded(1);

        let Some(mut stream) = stream else {
            let _ = done_tx.send(());
            return Ok(Self { buffer, done });
        };

        let shared = Arc::clone(&buffer);
        std::thread::Builder::new().name(name).spawn(move || {
            let mut chunk = [0u8; 4096];
            loop {
                match stream.read(&mut chunk) {
                    Ok(0) => break,
                    Ok(n) => {
                        if let Ok(mut buffer) = shared.lock() {
                            let room = OUTPUT_LIMIT.saturating_sub(buffer.len());
                            buffer.extend_from_slice(&chunk[..n.min(room)]);
                        }
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(_) => break,
                }
            }
            let _ = done_tx.send(());
        })?;

        Ok(Self { buffer, done })
    }

    /// Output read so far. Waits briefly for EOF, which never comes while a
    /// background child still holds the pipe.
    fn collect(&self) -> String {
        let _ = self.done.recv_timeout(OUTPUT_GRACE);
        self.buffer
            .lock()
            .map(|buffer| String::from_utf8_lossy(&buffer).into_owned())
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug)]
pub enum LaunchEvent {
    /// The process exited on its own, with the given code.
    Finished {
        id: LauncherId,
        code: i32,
        output: ProcessOutput,
    },
    /// The process crashed, was killed, or could not be waited on.
    Failed {
        id: LauncherId,
        reason: String,
        output: ProcessOutput,
    },
}

impl LaunchEvent {
    pub fn id(&self) -> LauncherId {
        match self {
            LaunchEvent::Finished { id, .. } | LaunchEvent::Failed { id, .. } => *id,
        }
    }

    pub fn output(&self) -> &ProcessOutput {
        match self {
            LaunchEvent::Finished { output, .. } | LaunchEvent::Failed { output, .. } => output,
        }
    }
}

/// Starts processes for buttons, at most one in flight per button.
pub struct LaunchRunner {
    tracker: LaunchTracker,
    tx: Sender<LaunchEvent>,
    rx: Receiver<LaunchEvent>,
    working_dir: PathBuf,
}

impl LaunchRunner {
    /// Runner whose processes start in the user's home directory.
    pub fn new() -> Self {
        Self::with_working_dir(dirs::home_dir().unwrap_or_else(|| PathBuf::from("/")))
    }

    pub fn with_working_dir(working_dir: PathBuf) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            tracker: LaunchTracker::new(),
            tx,
            rx,
            working_dir,
        }
    }

    #[cfg(test)]
    fn state(&self, id: LauncherId) -> LaunchState {
        self.tracker.state(id)
    }

    /// Number of buttons whose process has not reported back yet.
    pub fn in_flight(&self) -> usize {
        self.tracker.running_count()
    }

    /// Start `command` for button `id`.
    ///
    /// Fails with [`LaunchError::Busy`] while the button's previous process
    /// is still running. On any other error the button stays idle.
    pub fn launch(&mut self, id: LauncherId, command: &str) -> Result<(), LaunchError> {
        self.tracker.begin(id)?;
        if let Err(e) = self.spawn(id, command) {
            self.tracker.finish(id);
            return Err(e);
        }
        Ok(())
    }

    fn spawn(&self, id: LauncherId, command: &str) -> Result<(), LaunchError> {
        let command = strip_placeholders(command);
        let (program, args) = split_command(&command)?;

        let mut child = Command::new(&program)
            .args(&args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        info!("Launched \"{}\" (pid {}) for button {}", command, child.id(), id);

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let captures = Capture::start(stdout, format!("launch-{}-out", id))
            .and_then(|out| Ok((out, Capture::start(stderr, format!("launch-{}-err", id))?)));
        let (stdout, stderr) = match captures {
            Ok(captures) => captures,
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e.into());
            }
        };

        let tx = self.tx.clone();
        std::thread::Builder::new()
            .name(format!("launch-{}", id))
            .spawn(move || {
                // Completion is the exit, not EOF on the pipes.
                let status = child.wait();
                let output = ProcessOutput {
                    stdout: stdout.collect(),
                    stderr: stderr.collect(),
                };
                let event = match status {
                    Ok(status) => match status.code() {
                        Some(code) => LaunchEvent::Finished { id, code, output },
                        None => LaunchEvent::Failed {
                            id,
                            reason: format!("process {}", status),
                            output,
                        },
                    },
                    Err(e) => LaunchEvent::Failed {
                        id,
                        reason: e.to_string(),
                        output,
                    },
                };
                debug!("Button {} process ended: {:?}", id, event);
                // The receiver only disappears on shutdown.
                let _ = tx.send(event);
            })?;

        Ok(())
    }

    /// Collect finished launches and mark their buttons idle again.
    pub fn drain(&mut self) -> Vec<LaunchEvent> {
        let events: Vec<LaunchEvent> = self.rx.try_iter().collect();
        for event in &events {
            self.tracker.finish(event.id());
        }
        events
    }

    #[cfg(test)]
    fn wait(&mut self, timeout: std::time::Duration) -> Option<LaunchEvent> {
        let event = self.rx.recv_timeout(timeout).ok()?;
        self.tracker.finish(event.id());
        Some(event)
    }
}

impl Default for LaunchRunner {
    fn default() -> Self {
        Self::new()
    }
}
