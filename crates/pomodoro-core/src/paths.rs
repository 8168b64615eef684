//! Standard paths used by the pomodoro timer

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory
pub const HOME_ENV: &str = "POMODORO_HOME";

/// Standard pomodoro paths
#[derive(Debug, Clone)]
pub struct Paths {
    /// Data directory (~/.pomodoro)
    pub data: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let data = match env::var_os(HOME_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join(".pomodoro"),
        };

        Self { data }
    }

    /// Paths rooted at an explicit data directory
    pub fn at(data: &Path) -> Self {
        Self {
            data: data.to_path_buf(),
        }
    }

    /// Session log (date -> count, minutes)
    pub fn sessions_file(&self) -> PathBuf {
        self.data.join("sessions.json")
    }

    /// Optional user configuration
    pub fn config_file(&self) -> PathBuf {
        self.data.join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_data_dir() {
        let paths = Paths::at(Path::new("/tmp/pomo"));
        assert_eq!(paths.sessions_file(), PathBuf::from("/tmp/pomo/sessions.json"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/pomo/config.json"));
    }
}
