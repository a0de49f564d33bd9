//! Toolkit configuration loading and validation.

use crate::error::ConfigError;
use crate::schema::SchemaProvider;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// How the tools requested from one category are run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    /// One tool at a time, in request order.
    #[default]
    Sequential,
    /// All tools of a category at once; results are still reported in request order.
    Concurrent,
}

/// Runtime settings for a [`Toolkit`](crate::Toolkit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    pub dispatch: DispatchMode,
    /// Per-tool deadline in milliseconds. `None` means no deadline.
    pub tool_timeout_ms: Option<u64>,
    /// Provider name used when a caller does not ask for one.
    pub default_provider: String,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            dispatch: DispatchMode::Sequential,
            tool_timeout_ms: None,
            default_provider: SchemaProvider::DEFAULT.name().to_string(),
        }
    }
}

impl ToolkitConfig {
    /// Load and validate a TOML config file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load_from_toml(&content)
    }

    /// Parse and validate TOML config content.
    pub fn load_from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tool_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid {
                reason: "tool_timeout_ms must be greater than zero".to_string(),
            });
        }
        if self.default_provider.trim().is_empty() {
            return Err(ConfigError::Invalid {
                reason: "default_provider must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn with_dispatch(mut self, dispatch: DispatchMode) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Set the per-tool deadline, rounded up to whole milliseconds (at least one).
    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        let millis = timeout.as_nanos().div_ceil(1_000_000).max(1);
        self.tool_timeout_ms = Some(u64::try_from(millis).unwrap_or(u64::MAX));
        self
    }

    pub fn tool_timeout(&self) -> Option<Duration> {
        self.tool_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_toml_valid_config() {
        let config = ToolkitConfig::load_from_toml(
            r#"
            dispatch = "concurrent"
            tool_timeout_ms = 2500
            default_provider = "anthropic"
            "#,
        )
        .unwrap();

        assert_eq!(config.dispatch, DispatchMode::Concurrent);
        assert_eq!(config.tool_timeout(), Some(Duration::from_millis(2500)));
        assert_eq!(config.default_provider, "anthropic");
    }

    #[test]
    fn test_tool_timeout_rounds_up_to_whole_millis() {
        let config = ToolkitConfig::default().with_tool_timeout(Duration::from_micros(300));
        assert_eq!(config.tool_timeout_ms, Some(1));
        assert!(config.validate().is_ok());

        let config = ToolkitConfig::default().with_tool_timeout(Duration::from_micros(2500));
        assert_eq!(config.tool_timeout_ms, Some(3));

        let config = ToolkitConfig::default().with_tool_timeout(Duration::ZERO);
        assert_eq!(config.tool_timeout_ms, Some(1));

        let config = ToolkitConfig::default().with_tool_timeout(Duration::MAX);
        assert_eq!(config.tool_timeout_ms, Some(u64::MAX));
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ToolkitConfig::load_from_toml("").unwrap();
        assert_eq!(config, ToolkitConfig::default());
        assert_eq!(config.dispatch, DispatchMode::Sequential);
    }

    #[test]
    fn test_validate_zero_timeout() {
        let result = ToolkitConfig::load_from_toml("tool_timeout_ms = 0");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_invalid_toml_syntax() {
        let result = ToolkitConfig::load_from_toml("dispatch = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_dispatch_mode_rejected() {
        let result = ToolkitConfig::load_from_toml(r#"dispatch = "parallel""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tool_timeout_ms = 100").unwrap();

        let config = ToolkitConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.tool_timeout_ms, Some(100));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = ToolkitConfig::load_from_file("/nonexistent/multitool.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/multitool.toml"));
    }
}
