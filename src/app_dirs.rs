use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "linguavault";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// `~/.local/share/linguavault`, falling back to the platform data dir
    pub fn data_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("share")
                .join(APP_NAME)
        } else {
            ProjectDirs::from("", "", APP_NAME)
                .map(|proj_dirs| proj_dirs.data_local_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(APP_NAME))
        }
    }

    /// `~/.local/state/linguavault`, where history and logs live
    pub fn state_dir() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
        } else {
            Self::data_dir()
        }
    }

    pub fn vocabulary_path() -> PathBuf {
        Self::data_dir().join("words.json")
    }

    pub fn history_db_path() -> PathBuf {
        Self::state_dir().join("history.db")
    }

    pub fn log_path() -> PathBuf {
        Self::state_dir().join("linguavault.log")
    }
}
