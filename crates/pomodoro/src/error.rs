//! Error kinds surfaced to the user

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors specific to timer and session store operations
#[derive(Error, Debug)]
pub enum PomodoroError {
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid stats range: {0}")]
    InvalidRange(String),

    #[error("Session store is corrupt ({}): {reason}", path.display())]
    StoreCorrupt { path: PathBuf, reason: String },

    #[error(
        "Failed to write session store ({}); the completed session was not recorded: {source}",
        path.display()
    )]
    StoreUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, PomodoroError>;
