use bytes::Bytes;
use serde::Serialize;

use crate::error::{PlaylistError, Result};
use crate::playlist::to_text;
use crate::tags::{EXTINF, EXT_X_I_FRAME_STREAM_INF, EXT_X_STREAM_INF, EXT_X_TARGETDURATION};
use crate::types::{MasterPlaylist, MediaPlaylist};

/// Common interface of master and media playlists.
pub trait Manifest: Sized {
    fn parse(input: &[u8]) -> Result<Self>;
    fn encode(&self) -> Result<Bytes>;
}

impl Manifest for MasterPlaylist {
    fn parse(input: &[u8]) -> Result<Self> {
        MasterPlaylist::parse(input)
    }

    fn encode(&self) -> Result<Bytes> {
        MasterPlaylist::encode(self)
    }
}

impl Manifest for MediaPlaylist {
    fn parse(input: &[u8]) -> Result<Self> {
        MediaPlaylist::parse(input)
    }

    fn encode(&self) -> Result<Bytes> {
        MediaPlaylist::encode(self)
    }
}

/// Which kind of playlist a document is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaylistKind {
    Master,
    Media,
}

/// A playlist of either kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Playlist {
    Master(MasterPlaylist),
    Media(MediaPlaylist),
}

impl Playlist {
    /// Parse a playlist, detecting its kind from the tags it contains.
    pub fn parse(input: &[u8]) -> Result<Playlist> {
        match detect_kind(input)? {
            PlaylistKind::Master => MasterPlaylist::parse(input).map(Playlist::Master),
            PlaylistKind::Media => MediaPlaylist::parse(input).map(Playlist::Media),
        }
    }

    pub fn encode(&self) -> Result<Bytes> {
        match self {
            Playlist::Master(p) => p.encode(),
            Playlist::Media(p) => p.encode(),
        }
    }

    pub fn kind(&self) -> PlaylistKind {
        match self {
            Playlist::Master(_) => PlaylistKind::Master,
            Playlist::Media(_) => PlaylistKind::Media,
        }
    }

    /// Location the playlist was retrieved from.
    pub fn set_uri(&mut self, uri: impl Into<String>) {
        match self {
            Playlist::Master(p) => p.uri = Some(uri.into()),
            Playlist::Media(p) => p.uri = Some(uri.into()),
        }
    }

    pub fn resources(&self) -> Result<Vec<crate::url::Resource>> {
        match self {
            Playlist::Master(p) => p.resources(),
            Playlist::Media(p) => p.resources(),
        }
    }
}

/// Media playlists are recognized by `#EXTINF` or `#EXT-X-TARGETDURATION`,
/// master playlists by a stream-info tag. Media wins when both appear.
pub fn detect_kind(input: &[u8]) -> Result<PlaylistKind> {
    let mut master = false;
    for line in crate::playlist::lines(to_text(input)?) {
        let name = line.split(':').next().unwrap_or(line);
        match name {
            EXTINF | EXT_X_TARGETDURATION => return Ok(PlaylistKind::Media),
            EXT_X_STREAM_INF | EXT_X_I_FRAME_STREAM_INF => master = true,
            _ => {}
        }
    }
    if master {
        Ok(PlaylistKind::Master)
    } else {
        Err(PlaylistError::UnknownPlaylistKind)
    }
}

/// Parse a master playlist.
pub fn parse_master(input: &[u8]) -> Result<MasterPlaylist> {
    MasterPlaylist::parse(input)
}

/// Parse a media playlist.
pub fn parse_media(input: &[u8]) -> Result<MediaPlaylist> {
    MediaPlaylist::parse(input)
}

/// Encode a master playlist.
pub fn encode_master(playlist: &MasterPlaylist) -> Result<Bytes> {
    playlist.encode()
}

/// Encode a media playlist.
pub fn encode_media(playlist: &MediaPlaylist) -> Result<Bytes> {
    playlist.encode()
}
