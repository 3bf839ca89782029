use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::request::Endpoint;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// endpoint = "https://example.com/"
/// timeout_secs = 10
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the points-of-interest service. Falls back to `Endpoint::DEFAULT_URL`.
    pub endpoint: Option<String>,

    /// Whole-request timeout for the HTTP transport. No timeout when absent.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Parsed endpoint, or the default one when none is configured.
    pub fn endpoint(&self) -> Result<Endpoint> {
        match &self.endpoint {
            Some(raw) => Endpoint::parse(raw).context(
                "Configured endpoint is invalid.\n\
                 Hint: run `poi configure` and enter an http(s) URL.",
            ),
            None => Ok(Endpoint::default()),
        }
    }

    /// Validate and store the endpoint URL.
    pub fn set_endpoint(&mut self, raw: &str) -> Result<()> {
        Endpoint::parse(raw)?;
        self.endpoint = Some(raw.to_string());
        Ok(())
    }

    pub fn set_timeout_secs(&mut self, secs: Option<u64>) -> Result<()> {
        if secs == Some(0) {
            return Err(anyhow!("Timeout must be at least one second"));
        }
        self.timeout_secs = secs;
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "poi", "poi-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
