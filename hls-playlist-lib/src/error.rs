use thiserror::Error;

/// Main error type for playlist parsing and encoding
#[derive(Error, Debug)]
pub enum PlaylistError {
    /// The attribute list of a tag could not be tokenized
    #[error("Malformed attribute list on {tag}: {detail}")]
    MalformedAttributes { tag: String, detail: String },

    /// A required attribute or field is absent
    #[error("{tag} attribute {attribute} must be set")]
    MissingAttribute { tag: String, attribute: String },

    /// An attribute or tag value could not be interpreted
    #[error("Invalid value for {tag} attribute {attribute}: {value:?}")]
    InvalidValue {
        tag: String,
        attribute: String,
        value: String,
    },

    /// A feature is used that the declared protocol version cannot carry
    #[error("Backwards compatibility error on tag {tag} with version {version}")]
    Compatibility { tag: &'static str, version: u32 },

    /// A record violates one of its semantic rules
    #[error("{tag}: {detail}")]
    Invariant { tag: String, detail: String },

    /// A standard I/O error while reading the input
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not valid UTF-8 text
    #[error("Playlist is not valid UTF-8")]
    InvalidUtf8,

    /// A sub-resource reference could not be resolved
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The document is neither a master nor a media playlist
    #[error("Unable to determine playlist kind")]
    UnknownPlaylistKind,
}

impl PlaylistError {
    /// Create a missing attribute error.
    pub fn missing(tag: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            tag: tag.into(),
            attribute: attribute.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid(
        tag: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            tag: tag.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Create a semantic invariant error.
    pub fn invariant(tag: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Invariant {
            tag: tag.into(),
            detail: detail.into(),
        }
    }

    /// Create a malformed attribute list error.
    pub fn malformed(tag: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MalformedAttributes {
            tag: tag.into(),
            detail: detail.into(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PlaylistError>;
