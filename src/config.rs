//! Search configuration
//!
//! Settings come from an optional JSON file and are then overridden by
//! command-line flags. Every field has a default, so an empty object (or no
//! file at all) is a valid configuration.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use shaseek_core::{Digest, DIGEST_SIZE};

use crate::error::{Result, SearchError};
use crate::search::{SearchTask, DEFAULT_BATCH_SIZE};

/// Default number of digits per candidate
pub const DEFAULT_WIDTH: usize = 6;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Search settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Digits per candidate
    pub width: usize,
    /// Candidates generated and scanned together
    pub batch_size: usize,
    /// Worker threads (default: number of CPU cores)
    pub workers: Option<usize>,
    /// First candidate to try (default: all zeros)
    pub start: Option<String>,
    /// Log filter directive
    pub log_level: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            batch_size: DEFAULT_BATCH_SIZE,
            workers: None,
            start: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl SearchConfig {
    /// Read a config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| SearchError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| SearchError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read `path` if given, else the default location if a file exists there
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::load(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Configured worker count, falling back to the number of CPU cores
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    /// Validate the settings and bind them to a target digest
    pub fn to_task(&self, target: Digest) -> Result<SearchTask> {
        let batch_size = NonZeroUsize::new(self.batch_size).ok_or(SearchError::ZeroBatchSize)?;
        let workers = NonZeroUsize::new(self.worker_count()).ok_or(SearchError::ZeroWorkers)?;

        let mut task = SearchTask::new(target, self.width)
            .with_batch_size(batch_size)
            .with_workers(workers);
        if let Some(start) = &self.start {
            task = task.with_start(start.clone());
        }
        Ok(task)
    }
}

/// Default config file location (`<config dir>/shaseek/config.json`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("shaseek").join("config.json"))
}

/// Parse a 64-character hex string into a digest
pub fn parse_digest_hex(text: &str) -> Result<Digest> {
    let bytes = hex::decode(text.trim())?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_| SearchError::TargetLength {
        expected: DIGEST_SIZE,
        actual,
    })
}
