//! Resolving sub-resource references
//!
//! URIs inside a playlist may be relative to the playlist's own location.
//! A playlist carries that location in its `uri` field; the accessors here
//! join it with each reference:
//!
//! ```no_run
//! use hls_playlist_lib::{MasterPlaylist, Result};
//!
//! fn first_variant(body: &[u8], location: &str) -> Result<String> {
//!     // Parse the downloaded playlist and remember where it came from.
//!     let mut master = MasterPlaylist::parse(body)?;
//!     master.uri = Some(location.to_string());
//!     master.variant_url(0)
//! }
//! ```

use serde::Serialize;
use url::Url;

use crate::error::{PlaylistError, Result};
use crate::types::{MasterPlaylist, MediaPlaylist};

/// Resolve `reference` against `base` the way a browser resolves a link.
///
/// An absolute reference is returned exactly as written; `base` is only
/// needed for relative ones.
pub fn resolve_url(base: Option<&str>, reference: &str) -> Result<String> {
    match Url::parse(reference) {
        Ok(_) => Ok(reference.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = base.ok_or(PlaylistError::Url(url::ParseError::RelativeUrlWithoutBase))?;
            Ok(Url::parse(base)?.join(reference)?.to_string())
        }
        Err(e) => Err(e.into()),
    }
}

/// What a sub-resource is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResourceKind {
    Variant,
    Rendition,
    SessionData,
    Key,
    Map,
    Segment,
}

/// One resolved sub-resource of a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub kind: ResourceKind,
    pub url: String,
}

fn not_found(what: &str, index: impl ToString) -> PlaylistError {
    PlaylistError::invalid("Playlist", what, index.to_string())
}

impl MasterPlaylist {
    fn resolve(&self, reference: &str) -> Result<String> {
        resolve_url(self.uri.as_deref(), reference)
    }

    /// Absolute URL of the variant at `index`.
    pub fn variant_url(&self, index: usize) -> Result<String> {
        let variant = self.variants.get(index).ok_or_else(|| not_found("variant", index))?;
        self.resolve(&variant.uri)
    }

    /// Absolute URL of the playlist-level rendition at `index`, if it has one.
    pub fn rendition_url(&self, index: usize) -> Result<Option<String>> {
        let rendition = self
            .renditions
            .get(index)
            .ok_or_else(|| not_found("rendition", index))?;
        rendition.uri.as_deref().map(|uri| self.resolve(uri)).transpose()
    }

    pub fn session_data_url(&self, index: usize) -> Result<Option<String>> {
        let data = self
            .session_data
            .get(index)
            .ok_or_else(|| not_found("session data", index))?;
        data.uri.as_deref().map(|uri| self.resolve(uri)).transpose()
    }

    pub fn session_key_url(&self, index: usize) -> Result<Option<String>> {
        let key = self
            .session_keys
            .get(index)
            .ok_or_else(|| not_found("session key", index))?;
        key.uri.as_deref().map(|uri| self.resolve(uri)).transpose()
    }

    /// Every sub-resource, resolved: session data, session keys, renditions,
    /// then variants.
    pub fn resources(&self) -> Result<Vec<Resource>> {
        let mut out = Vec::new();
        for data in &self.session_data {
            if let Some(uri) = &data.uri {
                push(&mut out, ResourceKind::SessionData, self.resolve(uri)?);
            }
        }
        for key in &self.session_keys {
            if let Some(uri) = &key.uri {
                push(&mut out, ResourceKind::Key, self.resolve(uri)?);
            }
        }
        for rendition in self.all_renditions() {
            if let Some(uri) = &rendition.uri {
                push(&mut out, ResourceKind::Rendition, self.resolve(uri)?);
            }
        }
        for variant in &self.variants {
            push(&mut out, ResourceKind::Variant, self.resolve(&variant.uri)?);
        }
        Ok(out)
    }
}

impl MediaPlaylist {
    fn resolve(&self, reference: &str) -> Result<String> {
        resolve_url(self.uri.as_deref(), reference)
    }

    /// Absolute URL of the segment with media sequence number `sequence`.
    pub fn segment_url(&self, sequence: u64) -> Result<String> {
        let segment = self
            .segment(sequence)
            .ok_or_else(|| not_found("segment", sequence))?;
        self.resolve(&segment.uri)
    }

    /// Absolute URLs of the keys in force for segment `sequence`.
    pub fn key_urls(&self, sequence: u64) -> Result<Vec<String>> {
        let segment = self
            .segment(sequence)
            .ok_or_else(|| not_found("segment", sequence))?;
        segment
            .keys
            .iter()
            .filter_map(|key| key.uri.as_deref())
            .map(|uri| self.resolve(uri))
            .collect()
    }

    /// Absolute URL of the map in force for segment `sequence`.
    pub fn map_url(&self, sequence: u64) -> Result<Option<String>> {
        let segment = self
            .segment(sequence)
            .ok_or_else(|| not_found("segment", sequence))?;
        segment
            .map
            .as_ref()
            .map(|map| self.resolve(&map.uri))
            .transpose()
    }

    /// Every sub-resource in playlist order. A key or map shared by
    /// consecutive segments is listed once.
    pub fn resources(&self) -> Result<Vec<Resource>> {
        let mut out = Vec::new();
        for segment in &self.segments {
            for key in &segment.keys {
                if let Some(uri) = &key.uri {
                    push(&mut out, ResourceKind::Key, self.resolve(uri)?);
                }
            }
            if let Some(map) = &segment.map {
                push(&mut out, ResourceKind::Map, self.resolve(&map.uri)?);
            }
            push(&mut out, ResourceKind::Segment, self.resolve(&segment.uri)?);
        }
        Ok(out)
    }
}

/// Keys and maps are listed on first use only.
fn push(out: &mut Vec<Resource>, kind: ResourceKind, url: String) {
    let resource = Resource { kind, url };
    if kind != ResourceKind::Segment && out.contains(&resource) {
        return;
    }
    out.push(resource);
}
