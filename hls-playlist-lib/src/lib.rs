//! Parse, validate and encode HLS playlists.
//!
//! ```no_run
//! use hls_playlist_lib::{MediaPlaylist, Result};
//!
//! fn rewrite(input: &[u8]) -> Result<bytes::Bytes> {
//!     let mut playlist = MediaPlaylist::parse(input)?;
//!     playlist.end_list = true;
//!     playlist.encode()
//! }
//! ```

pub(crate) mod api;
pub mod attributes;
pub mod compat;
pub(crate) mod error;
pub mod playlist;
pub mod tags;
pub(crate) mod types;
pub mod url;

#[cfg(test)]
pub(crate) mod tests;

pub use api::*;
pub use error::{PlaylistError, Result};
pub use types::*;
pub use self::url::{resolve_url, Resource, ResourceKind};
