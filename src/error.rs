use hls_playlist_lib::PlaylistError;
use thiserror::Error;

/// Main error type for the command line tool
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Playlist error: {0}")]
    Playlist(#[from] PlaylistError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Re-encoded playlist differs from the input after parsing")]
    RoundTrip,
}

impl From<toml::de::Error> for ToolError {
    fn from(e: toml::de::Error) -> Self {
        ToolError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for ToolError {
    fn from(e: toml::ser::Error) -> Self {
        ToolError::Config(e.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ToolError>;
