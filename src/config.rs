//! Engine configuration.
//!
//! Handles the optional configuration file at:
//! - Linux: ~/.config/sevenzip-engine/config.toml
//! - macOS: ~/Library/Application Support/sevenzip-engine/config.toml
//! - Windows: %APPDATA%\sevenzip-engine\config.toml
//!
//! The loaded [`EngineConfig`] is passed explicitly to the engine; nothing
//! below this module reads the environment.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::binary::{self, BinaryLocation, Platform};
use crate::command::Verb;
use crate::error::{Result, SevenZipError};

/// Environment variable overriding the bundled binaries directory
pub const BINARIES_DIR_ENV: &str = "SEVENZIP_BINARIES_DIR";

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Root of the bundled binaries tree
    #[serde(default)]
    pub binaries_dir: Option<PathBuf>,

    /// Look the executables up on the system PATH instead of the bundled tree
    #[serde(default)]
    pub search_path: bool,

    /// Binary tried first
    #[serde(default = "default_primary_binary")]
    pub primary_binary: String,

    /// Binary tried after the primary fails
    #[serde(default = "default_secondary_binary")]
    pub secondary_binary: String,

    /// Verbs that surface the primary failure without trying the secondary
    #[serde(default)]
    pub no_fallback: Vec<Verb>,

    /// Platform override (detected when absent)
    #[serde(default)]
    pub platform: Option<Platform>,
}

fn default_primary_binary() -> String {
    "7z".to_string()
}

fn default_secondary_binary() -> String {
    "7za".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binaries_dir: None,
            search_path: false,
            primary_binary: default_primary_binary(),
            secondary_binary: default_secondary_binary(),
            no_fallback: Vec::new(),
            platform: None,
        }
    }
}

impl EngineConfig {
    /// Default config file path, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sevenzip-engine").join("config.toml"))
    }

    /// Load configuration from the default path, then apply environment
    /// overrides
    pub fn load() -> Result<Self> {
        let config = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides())
    }

    /// Load configuration from a specific path. A missing file yields the
    /// defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SevenZipError::Config {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SevenZipError::Config {
            message: format!("Failed to parse config: {}", e),
        })
    }

    /// Apply `SEVENZIP_BINARIES_DIR` when no directory is configured
    pub fn with_env_overrides(mut self) -> Self {
        if self.binaries_dir.is_none() {
            if let Some(dir) = std::env::var_os(BINARIES_DIR_ENV) {
                self.binaries_dir = Some(PathBuf::from(dir));
            }
        }
        self
    }

    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::detect)
    }

    /// Bundled binaries root: the configured directory, else `binaries`
    /// next to the running executable.
    pub fn binaries_dir(&self) -> PathBuf {
        if let Some(dir) = &self.binaries_dir {
            return dir.clone();
        }
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.join("binaries")))
            .unwrap_or_else(|| PathBuf::from("binaries"))
    }

    /// Resolve an executable by short name.
    pub fn locate(&self, name: &str, alternate: bool) -> Result<BinaryLocation> {
        if self.search_path {
            binary::from_system_path(self.platform(), name)
        } else {
            binary::bundled(self.platform(), &self.binaries_dir(), alternate, name)
        }
    }

    pub fn fallback_enabled(&self, verb: Verb) -> bool {
        !self.no_fallback.contains(&verb)
    }

    /// Ordered binaries to attempt for a verb.
    pub fn candidates(&self, verb: Verb) -> Vec<String> {
        let mut candidates = vec![self.primary_binary.clone()];
        if self.fallback_enabled(verb) && self.secondary_binary != self.primary_binary {
            candidates.push(self.secondary_binary.clone());
        }
        candidates
    }
}
