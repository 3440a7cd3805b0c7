//! Configuration for Worldbuilder.
//!
//! # Configuration Priority
//!
//! 1. Environment variables
//! 2. Default values
//!
//! # Environment Variable Mapping
//!
//! - `WORLDBUILDER_WORLDS_DIR` → worlds_dir
//! - `WORLDBUILDER_LOG` → log_level (`RUST_LOG` still overrides the filter)

use std::env;
use std::path::PathBuf;

/// Environment variable naming the storage directory
pub const WORLDS_DIR_ENV: &str = "WORLDBUILDER_WORLDS_DIR";

/// Environment variable naming the default log directive
pub const LOG_LEVEL_ENV: &str = "WORLDBUILDER_LOG";

/// Directory name used for world documents next to the executable
pub const DEFAULT_WORLDS_DIR_NAME: &str = "worlds";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one `<world>.json` per world
    pub worlds_dir: PathBuf,

    /// Default tracing directive when `RUST_LOG` is not set
    pub log_level: String,
}

impl Config {
    /// Build configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let worlds_dir = lookup(WORLDS_DIR_ENV)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_worlds_dir);

        let log_level = lookup(LOG_LEVEL_ENV)
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(default_log_level);

        Self {
            worlds_dir,
            log_level,
        }
    }

    /// Configuration with an explicit storage directory
    pub fn with_worlds_dir(worlds_dir: impl Into<PathBuf>) -> Self {
        Self {
            worlds_dir: worlds_dir.into(),
            log_level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worlds_dir: default_worlds_dir(),
            log_level: default_log_level(),
        }
    }
}

/// `worlds/` beside the running executable, or `./worlds` if that is unknown
pub fn default_worlds_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_WORLDS_DIR_NAME)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_WORLDS_DIR_NAME))
}

fn default_log_level() -> String {
    "info".to_string()
}
