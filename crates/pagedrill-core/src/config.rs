//! Drill configuration and loading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::DEFAULT_EXPECTED_PER_PAGE;
use crate::session::{InputPolicy, SessionConfig};

/// Top-level pagedrill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Directory holding one file per page.
    #[serde(default = "default_pages_dir")]
    pub pages_dir: PathBuf,
    /// Append-only CSV log of page results.
    #[serde(default = "default_record_file")]
    pub record_file: PathBuf,
    /// Input that starts each page.
    #[serde(default = "default_ready_token")]
    pub ready_token: String,
    /// Fast-solve window in seconds, measured from the start of the page.
    #[serde(default = "default_fast_window_secs")]
    pub fast_window_secs: u64,
    /// Operations a full page is assumed to hold.
    #[serde(default = "default_expected_per_page")]
    pub expected_per_page: u32,
    /// What to do with a non-integer answer.
    #[serde(default)]
    pub input_policy: InputPolicy,
}

fn default_pages_dir() -> PathBuf {
    PathBuf::from("pages")
}
fn default_record_file() -> PathBuf {
    PathBuf::from("record.csv")
}
fn default_ready_token() -> String {
    "yes".to_string()
}
fn default_fast_window_secs() -> u64 {
    120
}
fn default_expected_per_page() -> u32 {
    DEFAULT_EXPECTED_PER_PAGE
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            record_file: default_record_file(),
            ready_token: default_ready_token(),
            fast_window_secs: default_fast_window_secs(),
            expected_per_page: default_expected_per_page(),
            input_policy: InputPolicy::default(),
        }
    }
}

impl DrillConfig {
    /// Session settings derived from this config.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            ready_token: self.ready_token.clone(),
            fast_window: Duration::from_secs(self.fast_window_secs),
            input_policy: self.input_policy,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `pagedrill.toml` in the current directory
/// 2. `~/.config/pagedrill/config.toml`
///
/// Environment variable overrides: `PAGEDRILL_PAGES_DIR`, `PAGEDRILL_RECORD_FILE`.
pub fn load_config_from(path: Option<&Path>) -> Result<DrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("pagedrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => DrillConfig::default(),
    };

    if let Ok(dir) = std::env::var("PAGEDRILL_PAGES_DIR") {
        config.pages_dir = PathBuf::from(dir);
    }
    if let Ok(file) = std::env::var("PAGEDRILL_RECORD_FILE") {
        config.record_file = PathBuf::from(file);
    }

    Ok(config)
}

/// Parse a TOML string into a config (useful for testing).
pub fn parse_config_str(content: &str) -> Result<DrillConfig> {
    let config: DrillConfig = toml::from_str(content)?;
    anyhow::ensure!(
        !config.ready_token.trim().is_empty(),
        "ready_token must not be empty"
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("pagedrill"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = DrillConfig::default();
        assert_eq!(config.pages_dir, PathBuf::from("pages"));
        assert_eq!(config.record_file, PathBuf::from("record.csv"));
        assert_eq!(config.expected_per_page, 60);
        assert_eq!(config.fast_window_secs, 120);
        assert_eq!(config.input_policy, InputPolicy::Abort);
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config_str(
            r#"
ready_token = "go"
fast_window_secs = 90
input_policy = "reprompt"
"#,
        )
        .unwrap();
        assert_eq!(config.ready_token, "go");
        assert_eq!(config.expected_per_page, 60);

        let session = config.session_config();
        assert_eq!(session.fast_window, Duration::from_secs(90));
        assert_eq!(session.input_policy, InputPolicy::Reprompt);
    }

    #[test]
    fn reject_empty_ready_token() {
        assert!(parse_config_str("ready_token = \"  \"").is_err());
    }

    #[test]
    fn reject_unknown_policy() {
        assert!(parse_config_str("input_policy = \"retry\"").is_err());
    }

    #[test]
    fn explicit_missing_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_from(Some(&dir.path().join("nope.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pagedrill.toml");
        std::fs::write(&path, "expected_per_page = 30\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.expected_per_page, 30);
    }
}
