//! Error types for kilauncher

use std::path::PathBuf;

/// A size string that is not of the form `WxH`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid size {input:?}: expected WxH, e.g. 240x80")]
pub struct FormatError {
    pub input: String,
}

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No config file found or specified; exiting")]
    NotFound,

    #[error("Cannot read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid tab {tab:?}: {source}")]
    TabParse {
        tab: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid size in tab {tab:?}: {source}")]
    TabFormat {
        tab: String,
        #[source]
        source: FormatError,
    },

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Launch errors. Recovered locally; the button becomes usable again.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("No command configured")]
    EmptyCommand,

    #[error("Cannot parse command line {0:?}")]
    Unparsable(String),

    #[error("Launcher is already running")]
    Busy,

    #[error("Failed to start process: {0}")]
    Spawn(#[from] std::io::Error),
}
