//! Media pipeline configuration.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, download::DEFAULT_USER_AGENT};

/// Default per-attachment byte budget (20 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 20 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Largest attachment that will be downloaded and stored, in bytes.
    pub max_bytes: u64,

    /// Whole-request deadline in seconds. Unset means no deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Root directory of the local media store.
    pub media_dir: PathBuf,

    /// User agent for media requests.
    pub user_agent: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            timeout_secs: None,
            media_dir: PathBuf::from("media"),
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

impl MediaConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw).map_err(Error::config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_bytes == 0 {
            return Err(Error::config("max_bytes must be greater than zero"));
        }
        if self.timeout_secs == Some(0) {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = MediaConfig::from_toml("").unwrap();
        assert_eq!(config, MediaConfig::default());
        assert_eq!(config.max_bytes, DEFAULT_MAX_BYTES);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn parses_all_fields() {
        let config = MediaConfig::from_toml(
            r#"
            max_bytes = 1000000
            timeout_secs = 30
            media_dir = "/var/lib/courier/media"
            user_agent = "bot/1.0"
            "#,
        )
        .unwrap();
        assert_eq!(config.max_bytes, 1_000_000);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.media_dir, PathBuf::from("/var/lib/courier/media"));
        assert_eq!(config.user_agent, "bot/1.0");
    }

    #[test]
    fn rejects_zero_budget() {
        let err = MediaConfig::from_toml("max_bytes = 0").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(MediaConfig::from_toml("timeout_secs = 0").is_err());
    }

    #[test]
    fn rejects_unparsable_toml() {
        let err = MediaConfig::from_toml("max_bytes = \"lots\"").unwrap_err();
        assert!(err.to_string().starts_with("invalid media config"));
    }

    #[test]
    fn load_reads_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("media.toml");
        std::fs::write(&path, "max_bytes = 42").unwrap();
        assert_eq!(MediaConfig::load(&path).unwrap().max_bytes, 42);
        assert!(MediaConfig::load(&tmp.path().join("missing.toml")).is_err());
    }
}
