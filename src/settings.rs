//! Persistent defaults
//!
//! Stored as JSON in the platform-specific config folder:
//! - Linux: ~/.config/s3-actions/settings.json
//! - Windows: %APPDATA%/s3-actions/settings.json
//! - macOS: ~/Library/Application Support/s3-actions/settings.json
//!
//! Command-line flags and environment variables take precedence over these.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::s3::endpoint::Endpoint;
use crate::s3::fetch::DEFAULT_TIMEOUT;

/// Region used when none is given anywhere
pub const DEFAULT_REGION: &str = "us-east-1";

/// Defaults that persist between invocations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// AWS profile to resolve credentials from
    #[serde(default)]
    pub profile: Option<String>,

    /// Region used when a command does not name one
    #[serde(default)]
    pub region: Option<String>,

    /// Custom S3-compatible endpoint
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Address buckets as `{endpoint}/{bucket}` instead of `{bucket}.{endpoint}`
    #[serde(default)]
    pub force_path_style: Option<bool>,

    /// Maximum keys per listing page
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Per-request timeout in seconds
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Settings {
    /// Load settings from the default location, returning defaults if the file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_path()?)
    }

    /// Load settings from `path`, returning defaults if the file doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("Settings file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;

        let settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings from {:?}", path))?;

        tracing::debug!(
            "Loaded settings: profile={:?}, region={:?}, endpoint={:?}",
            settings.profile,
            settings.region,
            settings.endpoint_url
        );

        Ok(settings)
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::settings_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save settings to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {:?}", parent))?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;

        tracing::debug!("Saved settings to {:?}", path);

        Ok(())
    }

    /// Get the path to the settings file
    pub fn settings_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "github.n-orlov", "s3-actions")
            .context("Failed to determine settings directory")?;

        Ok(proj_dirs.config_dir().join("settings.json"))
    }

    /// Endpoint requests should go to
    pub fn endpoint(&self) -> Result<Endpoint> {
        match &self.endpoint_url {
            Some(url) => Endpoint::custom(url, self.force_path_style.unwrap_or(false))
                .with_context(|| format!("Invalid endpoint URL in settings: {url}")),
            None => Ok(Endpoint::Aws),
        }
    }

    /// Request timeout, falling back to the built-in default
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Overlay values from `other` that are set
    pub fn merge(&mut self, other: Settings) {
        if other.profile.is_some() {
            self.profile = other.profile;
        }
        if other.region.is_some() {
            self.region = other.region;
        }
        if other.endpoint_url.is_some() {
            self.endpoint_url = other.endpoint_url;
        }
        if other.force_path_style.is_some() {
            self.force_path_style = other.force_path_style;
        }
        if other.page_size.is_some() {
            self.page_size = other.page_size;
        }
        if other.request_timeout_secs.is_some() {
            self.request_timeout_secs = other.request_timeout_secs;
        }
    }
}
