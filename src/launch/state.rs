//! Per-button launch state.
//!
//! A button is `Idle` until its process starts, `Running` until the
//! process reports completion or an error, then `Idle` again. A running
//! button refuses further launches.

use crate::error::LaunchError;
use std::collections::HashMap;
use std::fmt;

/// Identifies one button: tab position and launcher position within the tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LauncherId {
    pub tab: usize,
    pub index: usize,
}

impl LauncherId {
    pub const fn new(tab: usize, index: usize) -> Self {
        Self { tab, index }
    }
}

impl fmt::Display for LauncherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tab, self.index)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LaunchState {
    #[default]
    Idle,
    Running,
}

#[derive(Debug, Default)]
pub struct LaunchTracker {
    running: HashMap<LauncherId, LaunchState>,
}

impl LaunchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, id: LauncherId) -> LaunchState {
        self.running.get(&id).copied().unwrap_or_default()
    }

    /// Claim the button for a new launch.
    pub fn begin(&mut self, id: LauncherId) -> Result<(), LaunchError> {
        match self.state(id) {
            LaunchState::Running => Err(LaunchError::Busy),
            LaunchState::Idle => {
                self.running.insert(id, LaunchState::Running);
                Ok(())
            }
        }
    }

    /// Release the button after its process ended or failed to start.
    pub fn finish(&mut self, id: LauncherId) {
        self.running.remove(&id);
    }

    pub fn running_count(&self) -> usize {
        self.running.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_launch_rejected_until_finished() {
        let mut tracker = LaunchTracker::new();
        let id = LauncherId::new(0, 2);

        assert_eq!(tracker.state(id), LaunchState::Idle);
        tracker.begin(id).unwrap();
        assert_eq!(tracker.state(id), LaunchState::Running);
        assert!(matches!(tracker.begin(id), Err(LaunchError::Busy)));

        tracker.finish(id);
        assert_eq!(tracker.state(id), LaunchState::Idle);
        tracker.begin(id).unwrap();
    }

    #[test]
    fn test_buttons_are_independent() {
        let mut tracker = LaunchTracker::new();
        tracker.begin(LauncherId::new(0, 0)).unwrap();
        tracker.begin(LauncherId::new(0, 1)).unwrap();
        tracker.begin(LauncherId::new(1, 0)).unwrap();
        assert_eq!(tracker.running_count(), 3);
    }
}
