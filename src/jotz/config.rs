use crate::error::{JotzError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Which storage backend holds the journal. Selected once at process
/// wiring time; call sites never see the choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One JSON file per user under the data dir.
    #[default]
    Local,
    /// The remote document store; requires `remote_url`.
    Remote,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Local => f.write_str("local"),
            BackendKind::Remote => f.write_str("remote"),
        }
    }
}

/// Configuration for jotz, stored in `{data_dir}/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct JotzConfig {
    /// Storage backend for journal entries.
    #[serde(default)]
    pub backend: BackendKind,

    /// Base URL of the remote document store. Required when `backend`
    /// is `remote`, ignored otherwise.
    #[serde(default)]
    pub remote_url: Option<String>,
}

impl JotzConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(JotzError::Io)?;
        let config: JotzConfig = serde_json::from_str(&content).map_err(JotzError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(JotzError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(JotzError::Serialization)?;
        fs::write(config_path, content).map_err(JotzError::Io)?;
        Ok(())
    }

    /// The remote base URL, or a config error when the remote backend
    /// is selected without one.
    pub fn require_remote_url(&self) -> Result<&str> {
        self.remote_url.as_deref().ok_or_else(|| {
            JotzError::Config("backend is 'remote' but remote-url is not set".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = JotzConfig::default();
        assert_eq!(config.backend, BackendKind::Local);
        assert_eq!(config.remote_url, None);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = JotzConfig::load(temp.path().join("nope")).unwrap();
        assert_eq!(config, JotzConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();

        let config = JotzConfig {
            backend: BackendKind::Remote,
            remote_url: Some("https://example.test/v1".to_string()),
        };
        config.save(temp.path()).unwrap();

        let loaded = JotzConfig::load(temp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_backend_kind_serializes_lowercase() {
        let json = serde_json::to_string(&BackendKind::Remote).unwrap();
        assert_eq!(json, "\"remote\"");

        let parsed: BackendKind = serde_json::from_str("\"local\"").unwrap();
        assert_eq!(parsed, BackendKind::Local);
    }

    #[test]
    fn test_require_remote_url() {
        let config = JotzConfig {
            backend: BackendKind::Remote,
            remote_url: None,
        };
        assert!(config.require_remote_url().is_err());

        let config = JotzConfig {
            backend: BackendKind::Remote,
            remote_url: Some("https://example.test".to_string()),
        };
        assert_eq!(config.require_remote_url().unwrap(), "https://example.test");
    }
}
