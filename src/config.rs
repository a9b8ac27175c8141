// File: src/config.rs
use crate::core::types::KeyScheme;
use std::path::PathBuf;

const APP_DIR: &str = "faizhelp";
const PROGRESS_FILE: &str = "progress.json";
const LOG_FILE: &str = "guide.log";

/// Run-time settings, resolved once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Replaces the built-in catalog when set.
    pub catalog_path: Option<PathBuf>,
    pub key_scheme: KeyScheme,
    pub log_path: Option<PathBuf>,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            catalog_path: None,
            key_scheme: KeyScheme::Section,
            log_path: None,
        }
    }

    pub fn progress_path(&self) -> PathBuf {
        self.data_dir.join(PROGRESS_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(LOG_FILE))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(default_data_dir())
    }
}

/// `<config dir>/faizhelp`, or `./.faizhelp` when the platform has none.
pub fn default_data_dir() -> PathBuf {
    match dirs::config_dir() {
        Some(mut path) => {
            path.push(APP_DIR);
            path
        }
        None => PathBuf::from(format!(".{}", APP_DIR)),
    }
}
