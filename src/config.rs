//! Per-project configuration read from `.yacbi.json`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::EngineError;

pub const CONFIG_FILE: &str = ".yacbi.json";

/// Compile argument adjustments applied to every compile command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Appended to each command before normalization
    pub extra_args: Vec<String>,
    /// Flags dropped during normalization
    pub banned_args: Vec<String>,
}

impl ProjectConfig {
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// Load the configuration of a project. A missing file means defaults.
    pub fn load(root: &Path) -> Result<Self, EngineError> {
        let path = Self::path(root);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No {} in {}, using defaults", CONFIG_FILE, root.display());
                return Ok(Self::default());
            }
            Err(err) => return Err(EngineError::io(path, err)),
        };

        serde_json::from_str(&content).map_err(|source| EngineError::InvalidConfig { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempdir().unwrap();
        let config = ProjectConfig::load(dir.path()).unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"banned_args": ["-Werror"]}"#,
        )
        .unwrap();

        let config = ProjectConfig::load(dir.path()).unwrap();
        assert!(config.extra_args.is_empty());
        assert_eq!(config.banned_args, vec!["-Werror"]);
    }

    #[test]
    fn test_malformed_config() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();

        let err = ProjectConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig { .. }));
        assert!(err.to_string().starts_with("invalid configuration"));
    }
}
