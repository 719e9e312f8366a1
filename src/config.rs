use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tunables for the five games
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameSettings {
    pub hangman_max_errors: usize,
    pub multiple_choice_rounds: u32,
    pub multiple_choice_options: usize,
    pub speed_round_secs: u32,
    pub feedback_clear_ms: u64,
    pub memory_pairs: usize,
    pub match_reveal_ms: u64,
    pub mismatch_reveal_ms: u64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            hangman_max_errors: 6,
            multiple_choice_rounds: 10,
            multiple_choice_options: 4,
            speed_round_secs: 60,
            feedback_clear_ms: 600,
            memory_pairs: 6,
            match_reveal_ms: 500,
            mismatch_reveal_ms: 1000,
        }
    }
}

impl GameSettings {
    pub fn feedback_clear(&self) -> Duration {
        Duration::from_millis(self.feedback_clear_ms)
    }

    pub fn match_reveal(&self) -> Duration {
        Duration::from_millis(self.match_reveal_ms)
    }

    pub fn mismatch_reveal(&self) -> Duration {
        Duration::from_millis(self.mismatch_reveal_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    /// Language preselected in the language picker
    pub default_language: Option<String>,
    /// Fixed RNG seed, mostly useful for reproducing a session
    pub seed: Option<u64>,
    pub games: GameSettings,
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "linguavault") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("linguavault_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("ignoring unreadable config {}: {}", self.path.display(), e);
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(std::io::Error::other)?;
        fs::write(&self.path, data)
    }
}
