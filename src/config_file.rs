//! Configuration file support
//!
//! Loads tool configuration from TOML files.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{LogFormat, ToolConfig};
use crate::error::Result;

/// Configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Logging settings
    pub logging: Option<LoggingSettings>,
    /// URL resolution settings
    pub resolve: Option<ResolveSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive (trace, debug, info, warn, error, or per target)
    pub level: String,
    /// Output format (json, pretty)
    pub format: Option<LogFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveSettings {
    /// Base URL for relative references
    pub base_url: Option<String>,
    /// Re-parse encoded output during validation
    pub strict_roundtrip: Option<bool>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Generate default configuration file
    pub fn default_config() -> Self {
        let defaults = ToolConfig::default();
        Self {
            logging: Some(LoggingSettings {
                level: defaults.log_level,
                format: Some(defaults.log_format),
            }),
            resolve: Some(ResolveSettings {
                base_url: defaults.base_url,
                strict_roundtrip: Some(defaults.strict_roundtrip),
            }),
        }
    }

    /// Convert to ToolConfig
    pub fn into_tool_config(self) -> ToolConfig {
        let defaults = ToolConfig::default();
        let (log_level, log_format) = match self.logging {
            Some(l) => (l.level, l.format.unwrap_or(defaults.log_format)),
            None => (defaults.log_level, defaults.log_format),
        };
        let (base_url, strict_roundtrip) = match self.resolve {
            Some(r) => (r.base_url, r.strict_roundtrip.unwrap_or(defaults.strict_roundtrip)),
            None => (defaults.base_url, defaults.strict_roundtrip),
        };
        ToolConfig {
            log_level,
            log_format,
            base_url,
            strict_roundtrip,
        }
    }
}

/// Load the configuration at `path`. A missing file yields defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ToolConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(ToolConfig::default());
    }
    Ok(ConfigFile::from_file(path)?.into_tool_config())
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let config = ConfigFile::default_config();
    config.to_file(path)?;
    Ok(())
}
