//! Tool configuration

use serde::{Deserialize, Serialize};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Settings used by every subcommand
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub log_level: String,

    pub log_format: LogFormat,

    /// Location relative URIs are resolved against when the command line
    /// does not name one
    pub base_url: Option<String>,

    /// Have `validate` parse the re-encoded output and compare it to the input
    pub strict_roundtrip: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            log_level: "hls_playlist=info".to_string(),
            log_format: LogFormat::Pretty,
            base_url: None,
            strict_roundtrip: true,
        }
    }
}
