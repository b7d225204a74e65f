//! Playlist scanners and encoders

pub mod master;
pub mod media;
pub(crate) mod writer;

use crate::error::{PlaylistError, Result};

/// Decode input bytes as UTF-8, dropping a leading byte order mark.
pub(crate) fn to_text(input: &[u8]) -> Result<&str> {
    let text = std::str::from_utf8(input).map_err(|_| PlaylistError::InvalidUtf8)?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}

/// Trimmed, non-blank lines. Handles both `\n` and `\r\n` line endings.
pub(crate) fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}
