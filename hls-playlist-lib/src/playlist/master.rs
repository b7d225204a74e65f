//! Master playlist scanner and encoder
//!
//! The scanner walks the document line by line. `#EXT-X-MEDIA` renditions
//! accumulate until the next variant, which takes them over. A
//! `#EXT-X-STREAM-INF` waits for the URI line that follows it.

use bytes::Bytes;

use super::writer::{self, PlaylistWriter};
use super::{lines, to_text};
use crate::compat;
use crate::error::{PlaylistError, Result};
use crate::tags::{Tag, EXT_X_INDEPENDENT_SEGMENTS, EXT_X_SESSION_KEY, EXT_X_VERSION};
use crate::types::{MasterPlaylist, Rendition, Variant};

#[derive(Default)]
struct MasterScanner {
    playlist: MasterPlaylist,
    /// Renditions seen since the last variant.
    pending_renditions: Vec<Rendition>,
    /// A `#EXT-X-STREAM-INF` waiting for its URI line.
    pending_variant: Option<Variant>,
}

impl MasterScanner {
    fn scan(&mut self, line: &str) -> Result<()> {
        if !line.starts_with('#') {
            match self.pending_variant.take() {
                Some(mut variant) => {
                    variant.uri = line.to_string();
                    variant.renditions = std::mem::take(&mut self.pending_renditions);
                    self.playlist.variants.push(variant);
                }
                None => tracing::trace!(line, "skipping URI line without stream info"),
            }
            return Ok(());
        }

        let tag = match Tag::parse(line)? {
            Some(tag) => tag,
            None => return Ok(()),
        };
        match tag {
            Tag::M3u => self.playlist.m3u = true,
            Tag::Version(v) => {
                self.reset_stream_inf();
                self.playlist.version = Some(v);
            }
            Tag::Start(start) => {
                self.reset_stream_inf();
                self.playlist.start = Some(start);
            }
            Tag::IndependentSegments => {
                self.reset_stream_inf();
                self.playlist.independent_segments = true;
            }
            Tag::SessionKey(key) => {
                self.reset_stream_inf();
                self.playlist.session_keys.push(key);
            }
            Tag::SessionData(data) => {
                self.reset_stream_inf();
                self.playlist.session_data.push(data);
            }
            Tag::Media(rendition) => {
                self.playlist.renditions.push(rendition.clone());
                self.pending_renditions.push(rendition);
            }
            Tag::StreamInf(variant) => {
                if self.pending_variant.is_some() {
                    tracing::trace!("stream info without URI line replaced");
                }
                self.pending_variant = Some(variant);
            }
            Tag::IFrameStreamInf(mut variant) => {
                variant.renditions = std::mem::take(&mut self.pending_renditions);
                self.playlist.variants.push(variant);
            }
            other => tracing::trace!(tag = other.name(), "ignoring tag in master playlist"),
        }
        Ok(())
    }

    fn reset_stream_inf(&mut self) {
        if self.pending_variant.take().is_some() {
            tracing::trace!("stream info without URI line dropped");
        }
    }

    fn finish(self) -> Result<MasterPlaylist> {
        if self.pending_variant.is_some() {
            tracing::trace!("stream info at end of playlist dropped");
        }
        let playlist = self.playlist;
        compat::check_master(&playlist)?;
        Ok(playlist)
    }
}

impl MasterPlaylist {
    /// Parse a master playlist from bytes.
    pub fn parse(input: &[u8]) -> Result<MasterPlaylist> {
        MasterPlaylist::parse_str(to_text(input)?)
    }

    /// Parse a master playlist from any reader.
    pub fn read<R: std::io::Read>(mut reader: R) -> Result<MasterPlaylist> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input)?;
        MasterPlaylist::parse(&input)
    }

    pub fn parse_str(text: &str) -> Result<MasterPlaylist> {
        let mut scanner = MasterScanner::default();
        for line in lines(text) {
            scanner.scan(line)?;
        }
        let playlist = scanner.finish()?;
        tracing::debug!(
            version = playlist.effective_version(),
            variants = playlist.variants.len(),
            renditions = playlist.renditions.len(),
            "parsed master playlist"
        );
        Ok(playlist)
    }

    /// Encode to playlist text.
    ///
    /// Renditions attached to a variant are written just before it. Each one
    /// accounts for one matching entry of the playlist level list; entries
    /// left over are written at the end.
    pub fn encode(&self) -> Result<Bytes> {
        let version = self
            .version
            .ok_or_else(|| PlaylistError::missing(EXT_X_VERSION, "VERSION"))?;
        compat::check(version, &compat::Features::for_master(self))?;

        let mut w = PlaylistWriter::new();
        w.header(version);
        for data in &self.session_data {
            writer::write_session_data(&mut w, data)?;
        }
        for key in &self.session_keys {
            if !key.is_session {
                return Err(PlaylistError::invariant(
                    EXT_X_SESSION_KEY,
                    "session keys must be marked as session keys",
                ));
            }
            writer::write_key(&mut w, key)?;
        }
        if self.independent_segments {
            w.line(EXT_X_INDEPENDENT_SEGMENTS);
        }
        if let Some(start) = &self.start {
            writer::write_start(&mut w, start)?;
        }

        let mut written = vec![false; self.renditions.len()];
        for variant in &self.variants {
            for rendition in &variant.renditions {
                writer::write_rendition(&mut w, rendition)?;
                let slot = self
                    .renditions
                    .iter()
                    .enumerate()
                    .position(|(i, r)| !written[i] && r == rendition);
                if let Some(i) = slot {
                    written[i] = true;
                }
            }
            writer::write_variant(&mut w, variant)?;
        }
        for (rendition, _) in self.renditions.iter().zip(&written).filter(|(_, done)| !**done) {
            writer::write_rendition(&mut w, rendition)?;
        }

        tracing::debug!(version, variants = self.variants.len(), "encoded master playlist");
        Ok(w.into_bytes())
    }
}
