//! Media playlist scanner and encoder
//!
//! Segment tags collect into an in-progress segment that the next URI line
//! closes. Keys and the initialization map stay in force for the following
//! segments until a new one is declared; those segments share the record.

use std::sync::Arc;

use bytes::Bytes;

use super::writer::{self, PlaylistWriter};
use super::{lines, to_text};
use crate::compat::{self, Features};
use crate::error::{PlaylistError, Result};
use crate::tags::*;
use crate::types::{Key, Map, MediaPlaylist, Segment};

#[derive(Default)]
struct MediaScanner {
    playlist: MediaPlaylist,
    segment: Segment,
    /// Segment tags seen since the last URI line.
    segment_open: bool,
    current_keys: Vec<Arc<Key>>,
    current_map: Option<Arc<Map>>,
    /// `None` once the last representable sequence number is taken.
    next_sequence: Option<u64>,
}

impl MediaScanner {
    fn scan(&mut self, line: &str) -> Result<()> {
        if !line.starts_with('#') {
            return self.close_segment(line);
        }

        let tag = match Tag::parse(line)? {
            Some(tag) => tag,
            None => return Ok(()),
        };
        match tag {
            Tag::M3u => self.playlist.m3u = true,
            Tag::Version(v) => self.playlist.version = Some(v),
            Tag::IndependentSegments => self.playlist.independent_segments = true,
            Tag::Start(start) => self.playlist.start = Some(start),
            Tag::TargetDuration(d) => self.playlist.target_duration = d,
            Tag::MediaSequence(n) => {
                self.playlist.media_sequence = n;
                self.next_sequence = Some(n);
            }
            Tag::DiscontinuitySequence(n) => self.playlist.discontinuity_sequence = n,
            Tag::PlaylistType(t) => self.playlist.playlist_type = Some(t),
            Tag::IFramesOnly => self.playlist.i_frames_only = true,
            Tag::AllowCache(allow) => self.playlist.allow_cache = allow,
            Tag::EndList => self.playlist.end_list = true,

            Tag::Inf(inf) => self.open().inf = Some(inf),
            Tag::Byterange(range) => self.open().byterange = Some(range),
            Tag::Discontinuity => self.open().discontinuity = true,
            Tag::ProgramDateTime(date) => self.open().program_date_time = Some(date),
            Tag::DateRange(range) => self.open().date_range = Some(range),
            Tag::Key(key) => self.open().keys.push(Arc::new(key)),
            Tag::Map(map) => {
                let map = Arc::new(map);
                self.current_map = Some(map.clone());
                self.open().map = Some(map);
            }

            other => tracing::trace!(tag = other.name(), "ignoring tag in media playlist"),
        }
        Ok(())
    }

    fn open(&mut self) -> &mut Segment {
        self.segment_open = true;
        &mut self.segment
    }

    fn close_segment(&mut self, uri: &str) -> Result<()> {
        let sequence = self
            .next_sequence
            .ok_or_else(|| sequence_overflow(self.playlist.media_sequence))?;
        self.next_sequence = sequence.checked_add(1);

        let mut segment = std::mem::take(&mut self.segment);
        self.segment_open = false;
        segment.uri = uri.to_string();
        segment.sequence = sequence;

        if segment.keys.is_empty() {
            segment.keys = self.current_keys.clone();
        } else {
            self.current_keys = segment.keys.clone();
        }
        if segment.map.is_none() {
            segment.map = self.current_map.clone();
        }

        self.playlist.segments.push(segment);
        Ok(())
    }

    fn finish(self) -> Result<MediaPlaylist> {
        if self.segment_open {
            tracing::trace!("segment tags without URI line dropped");
        }
        let playlist = self.playlist;
        compat::check_media(&playlist)?;
        Ok(playlist)
    }
}

impl MediaPlaylist {
    /// Parse a media playlist from bytes.
    pub fn parse(input: &[u8]) -> Result<MediaPlaylist> {
        MediaPlaylist::parse_str(to_text(input)?)
    }

    /// Parse a media playlist from any reader.
    pub fn read<R: std::io::Read>(mut reader: R) -> Result<MediaPlaylist> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input)?;
        MediaPlaylist::parse(&input)
    }

    pub fn parse_str(text: &str) -> Result<MediaPlaylist> {
        let mut scanner = MediaScanner {
            next_sequence: Some(0),
            ..Default::default()
        };
        for line in lines(text) {
            scanner.scan(line)?;
        }
        let playlist = scanner.finish()?;
        tracing::debug!(
            version = playlist.effective_version(),
            segments = playlist.segments.len(),
            media_sequence = playlist.media_sequence,
            "parsed media playlist"
        );
        Ok(playlist)
    }

    /// Append a segment numbered after the current last one.
    pub fn push_segment(&mut self, mut segment: Segment) -> Result<()> {
        segment.sequence = self
            .media_sequence
            .checked_add(self.segments.len() as u64)
            .ok_or_else(|| sequence_overflow(self.media_sequence))?;
        self.segments.push(segment);
        Ok(())
    }

    /// Encode to playlist text.
    ///
    /// Segments are written in media sequence order. A key list or map is
    /// only written when it differs from the previous segment's.
    pub fn encode(&self) -> Result<Bytes> {
        let version = self
            .version
            .ok_or_else(|| PlaylistError::missing(EXT_X_VERSION, "VERSION"))?;
        if self.target_duration == 0 {
            return Err(PlaylistError::missing(EXT_X_TARGETDURATION, "TARGETDURATION"));
        }
        if self.segments.is_empty() {
            return Err(PlaylistError::invariant(
                EXTINF,
                "a media playlist needs at least one segment",
            ));
        }
        compat::check(version, &Features::for_media_header(self))?;

        let mut segments: Vec<&Segment> = self.segments.iter().collect();
        segments.sort_by_key(|s| s.sequence);
        for (i, segment) in segments.iter().enumerate() {
            let expected = self
                .media_sequence
                .checked_add(i as u64)
                .ok_or_else(|| sequence_overflow(self.media_sequence))?;
            if segment.sequence != expected {
                return Err(PlaylistError::invariant(
                    EXT_X_MEDIA_SEQUENCE,
                    format!(
                        "segment sequence numbers must run from {} without gaps, found {}",
                        self.media_sequence, segment.sequence
                    ),
                ));
            }
            segment.validate()?;
            compat::check(version, &Features::for_segment(segment, self.i_frames_only))?;
            if let Some(inf) = &segment.inf {
                if inf.duration.round() as u64 > self.target_duration {
                    return Err(PlaylistError::invariant(
                        EXT_X_TARGETDURATION,
                        format!(
                            "segment {} lasts {}s, more than the target duration of {}s",
                            segment.sequence, inf.duration, self.target_duration
                        ),
                    ));
                }
            }
        }

        let mut w = PlaylistWriter::new();
        w.header(version);
        w.tag_value(EXT_X_TARGETDURATION, self.target_duration);
        if self.media_sequence > 0 {
            w.tag_value(EXT_X_MEDIA_SEQUENCE, self.media_sequence);
        }
        if self.independent_segments {
            w.line(EXT_X_INDEPENDENT_SEGMENTS);
        }
        if let Some(start) = &self.start {
            writer::write_start(&mut w, start)?;
        }
        if self.discontinuity_sequence > 0 {
            w.tag_value(EXT_X_DISCONTINUITY_SEQUENCE, self.discontinuity_sequence);
        }
        if let Some(playlist_type) = self.playlist_type {
            w.tag_value(EXT_X_PLAYLIST_TYPE, playlist_type.as_str());
        }
        if self.allow_cache {
            w.tag_value(EXT_X_ALLOW_CACHE, "YES");
        }
        if self.i_frames_only {
            w.line(EXT_X_I_FRAMES_ONLY);
        }

        let mut previous: Option<&Segment> = None;
        for &segment in &segments {
            write_segment(&mut w, segment, previous)?;
            previous = Some(segment);
        }

        if self.end_list {
            w.line(EXT_X_ENDLIST);
        }

        tracing::debug!(version, segments = segments.len(), "encoded media playlist");
        Ok(w.into_bytes())
    }
}

fn sequence_overflow(media_sequence: u64) -> PlaylistError {
    PlaylistError::invalid(
        EXT_X_MEDIA_SEQUENCE,
        "MEDIA-SEQUENCE",
        format!("{} leaves no sequence number for every segment", media_sequence),
    )
}

/// Titles are trimmed on reading, so only trimmed single-line text survives.
fn check_title(sequence: u64, title: &str) -> Result<()> {
    if title.is_empty() || title.trim() != title || title.contains(['\r', '\n']) {
        return Err(PlaylistError::invariant(
            EXTINF,
            format!("segment {} title {:?} cannot be written", sequence, title),
        ));
    }
    Ok(())
}

fn write_segment(w: &mut PlaylistWriter, segment: &Segment, previous: Option<&Segment>) -> Result<()> {
    // A reader carries keys and maps forward, so neither can silently lapse.
    if let Some(previous) = previous {
        if !previous.keys.is_empty() && segment.keys.is_empty() {
            return Err(PlaylistError::invariant(
                EXT_X_KEY,
                format!(
                    "segment {} drops the key in force; declare METHOD=NONE",
                    segment.sequence
                ),
            ));
        }
        if previous.map.is_some() && segment.map.is_none() {
            return Err(PlaylistError::invariant(
                EXT_X_MAP,
                format!("segment {} drops the map in force", segment.sequence),
            ));
        }
    }
    if previous.map_or(true, |p| p.keys != segment.keys) {
        for key in &segment.keys {
            writer::write_key(w, key)?;
        }
    }
    if let Some(map) = &segment.map {
        if previous.map_or(true, |p| p.map.as_ref() != Some(map)) {
            writer::write_map(w, map)?;
        }
    }
    if let Some(date) = &segment.program_date_time {
        w.tag_value(EXT_X_PROGRAM_DATE_TIME, writer::format_date(date));
    }
    if segment.discontinuity {
        w.line(EXT_X_DISCONTINUITY);
    }
    if let Some(range) = &segment.date_range {
        writer::write_date_range(w, range)?;
    }
    if let Some(inf) = &segment.inf {
        let title = inf.title.as_deref().unwrap_or_default();
        if inf.title.is_some() {
            check_title(segment.sequence, title)?;
        }
        w.tag_value(EXTINF, format!("{},{}", inf.duration, title));
    }
    if let Some(range) = &segment.byterange {
        w.tag_value(EXT_X_BYTERANGE, range);
    }
    w.uri_line(EXTINF, &segment.uri)
}

impl Segment {
    /// Mutable access to one of this segment's keys. A key shared with
    /// other segments is copied first, so they keep the old value.
    pub fn key_mut(&mut self, index: usize) -> Option<&mut Key> {
        self.keys.get_mut(index).map(Arc::make_mut)
    }

    /// Mutable access to this segment's map, copied first when shared.
    pub fn map_mut(&mut self) -> Option<&mut Map> {
        self.map.as_mut().map(Arc::make_mut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Byterange, KeyMethod};

    const ENCRYPTED: &str = r#"#EXTM3U
#EXT-X-VERSION:3
#EXT-X-TARGETDURATION:15
#EXT-X-MEDIA-SEQUENCE:7794
#EXT-X-KEY:METHOD=AES-128,URI="https://priv.example.com/key.php?r=52"
#EXTINF:2.833,
http://media.example.com/fileSequence52-A.ts
#EXTINF:15.0,
http://media.example.com/fileSequence52-B.ts
#EXT-X-KEY:METHOD=AES-128,URI="https://priv.example.com/key.php?r=53"
#EXTINF:13.333,
http://media.example.com/fileSequence53-A.ts
"#;

    #[test]
    fn test_key_carry_forward_and_sequence() {
        let playlist = MediaPlaylist::parse(ENCRYPTED.as_bytes()).unwrap();
        let segs = &playlist.segments;
        assert_eq!(segs.len(), 3);
        assert_eq!(
            segs.iter().map(|s| s.sequence).collect::<Vec<_>>(),
            vec![7794, 7795, 7796]
        );
        assert!(Arc::ptr_eq(&segs[0].keys[0], &segs[1].keys[0]));
        assert_eq!(
            segs[2].keys[0].uri.as_deref(),
            Some("https://priv.example.com/key.php?r=53")
        );
        assert!(!Arc::ptr_eq(&segs[1].keys[0], &segs[2].keys[0]));
    }

    #[test]
    fn test_key_mut_copies_shared_key() {
        let mut playlist = MediaPlaylist::parse(ENCRYPTED.as_bytes()).unwrap();
        let key = playlist.segments[1].key_mut(0).unwrap();
        key.uri = Some("https://priv.example.com/rotated".to_string());

        let segs = &playlist.segments;
        assert_eq!(
            segs[0].keys[0].uri.as_deref(),
            Some("https://priv.example.com/key.php?r=52")
        );
        assert_eq!(
            segs[1].keys[0].uri.as_deref(),
            Some("https://priv.example.com/rotated")
        );
    }

    #[test]
    fn test_encode_writes_shared_key_once() {
        let playlist = MediaPlaylist::parse(ENCRYPTED.as_bytes()).unwrap();
        let text = String::from_utf8(playlist.encode().unwrap().to_vec()).unwrap();
        assert_eq!(text.matches("#EXT-X-KEY").count(), 2);
    }

    #[test]
    fn test_map_carry_forward() {
        let text = "#EXTM3U\n#EXT-X-VERSION:6\n#EXT-X-TARGETDURATION:6\n#EXT-X-MAP:URI=\"init.mp4\"\n#EXTINF:6,\na.m4s\n#EXTINF:6,\nb.m4s\n";
        let playlist = MediaPlaylist::parse(text.as_bytes()).unwrap();
        let a = playlist.segments[0].map.as_ref().unwrap();
        let b = playlist.segments[1].map.as_ref().unwrap();
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn test_map_in_version_5_fails() {
        let text = "#EXTM3U\n#EXT-X-VERSION:5\n#EXT-X-TARGETDURATION:6\n#EXT-X-MAP:URI=\"init.mp4\"\n#EXTINF:6,\na.m4s\n";
        let err = MediaPlaylist::parse(text.as_bytes()).unwrap_err();
        assert!(matches!(err, PlaylistError::Compatibility { tag: EXT_X_MAP, version: 5 }));
    }

    #[test]
    fn test_encode_sorts_by_sequence() {
        let mut playlist = MediaPlaylist::new(3);
        playlist.target_duration = 10;
        playlist.media_sequence = 10;
        let mut second = Segment::new("b.ts", 10.0);
        second.sequence = 11;
        let mut first = Segment::new("a.ts", 9.5);
        first.sequence = 10;
        playlist.segments = vec![second, first];

        let text = String::from_utf8(playlist.encode().unwrap().to_vec()).unwrap();
        assert_eq!(
            text,
            "#EXTM3U\n#EXT-X-VERSION:3\n#EXT-X-TARGETDURATION:10\n#EXT-X-MEDIA-SEQUENCE:10\n#EXTINF:9.5,\na.ts\n#EXTINF:10,\nb.ts\n"
        );
    }

    #[test]
    fn test_encode_rejects_segment_longer_than_target() {
        let mut playlist = MediaPlaylist::new(3);
        playlist.target_duration = 10;
        playlist.push_segment(Segment::new("a.ts", 10.6)).unwrap();
        let err = playlist.encode().unwrap_err();
        assert!(matches!(err, PlaylistError::Invariant { .. }));
    }

    #[test]
    fn test_encode_byterange_needs_version_4() {
        let mut playlist = MediaPlaylist::new(3);
        playlist.target_duration = 10;
        let mut segment = Segment::new("all.ts", 10.0);
        segment.byterange = Some(Byterange {
            length: 1000,
            offset: Some(0),
        });
        playlist.push_segment(segment).unwrap();
        let err = playlist.encode().unwrap_err();
        assert!(matches!(
            err,
            PlaylistError::Compatibility {
                tag: EXT_X_BYTERANGE,
                version: 3
            }
        ));
    }

    #[test]
    fn test_encode_empty_playlist_fails() {
        let mut playlist = MediaPlaylist::new(3);
        playlist.target_duration = 10;
        assert!(playlist.encode().is_err());
    }

    #[test]
    fn test_encode_key_requires_uri() {
        let mut playlist = MediaPlaylist::new(3);
        playlist.target_duration = 10;
        let mut segment = Segment::new("a.ts", 10.0);
        segment.keys.push(Arc::new(Key::new(KeyMethod::Aes128, None)));
        playlist.push_segment(segment).unwrap();
        assert!(matches!(
            playlist.encode(),
            Err(PlaylistError::MissingAttribute { .. })
        ));
    }

    fn two_segments(first: Segment, second: Segment) -> MediaPlaylist {
        let mut playlist = MediaPlaylist::new(6);
        playlist.target_duration = 10;
        playlist.push_segment(first).unwrap();
        playlist.push_segment(second).unwrap();
        playlist
    }

    #[test]
    fn test_media_sequence_at_u64_max() {
        let text = "#EXTM3U\n#EXT-X-TARGETDURATION:10\n#EXT-X-MEDIA-SEQUENCE:18446744073709551615\n#EXTINF:10,\na.ts\n";
        let mut playlist = MediaPlaylist::parse(text.as_bytes()).unwrap();
        assert_eq!(playlist.segments[0].sequence, u64::MAX);

        let err = playlist.push_segment(Segment::new("b.ts", 10.0)).unwrap_err();
        assert!(matches!(err, PlaylistError::InvalidValue { .. }));
        assert_eq!(playlist.segments.len(), 1);

        playlist.version = Some(3);
        assert!(playlist.encode().is_ok());

        let text = format!("{}#EXTINF:10,\nb.ts\n", text);
        let err = MediaPlaylist::parse(text.as_bytes()).unwrap_err();
        assert!(matches!(err, PlaylistError::InvalidValue { .. }));
    }

    #[test]
    fn test_encode_refuses_lapsed_key() {
        let mut first = Segment::new("a.ts", 10.0);
        first.keys.push(Arc::new(Key::new(
            KeyMethod::Aes128,
            Some("key.bin".to_string()),
        )));
        let playlist = two_segments(first.clone(), Segment::new("b.ts", 10.0));
        assert!(matches!(
            playlist.encode(),
            Err(PlaylistError::Invariant { tag, .. }) if tag == EXT_X_KEY
        ));

        let mut clear = Segment::new("b.ts", 10.0);
        clear.keys.push(Arc::new(Key::new(KeyMethod::None, None)));
        let playlist = two_segments(first, clear);
        let reparsed = MediaPlaylist::parse(&playlist.encode().unwrap()).unwrap();
        assert_eq!(reparsed.segments[1].keys[0].method, KeyMethod::None);
    }

    #[test]
    fn test_encode_refuses_lapsed_map() {
        let mut first = Segment::new("a.m4s", 10.0);
        first.map = Some(Arc::new(Map {
            uri: "init.mp4".to_string(),
            byterange: None,
        }));
        let playlist = two_segments(first, Segment::new("b.m4s", 10.0));
        assert!(matches!(
            playlist.encode(),
            Err(PlaylistError::Invariant { tag, .. }) if tag == EXT_X_MAP
        ));
    }

    #[test]
    fn test_encode_refuses_values_that_break_lines() {
        let mut titled = Segment::new("a.ts", 10.0);
        if let Some(inf) = titled.inf.as_mut() {
            inf.title = Some("x\n#EXT-X-ENDLIST".to_string());
        }
        let playlist = two_segments(titled, Segment::new("b.ts", 10.0));
        assert!(matches!(playlist.encode(), Err(PlaylistError::Invariant { .. })));

        let playlist = two_segments(Segment::new("a.ts", 10.0), Segment::new("#b.ts", 10.0));
        assert!(matches!(playlist.encode(), Err(PlaylistError::Invariant { .. })));

        let playlist = two_segments(Segment::new("a.ts", 10.0), Segment::new("b.ts\r\nc.ts", 10.0));
        assert!(matches!(playlist.encode(), Err(PlaylistError::Invariant { .. })));

        let mut keyed = Segment::new("a.ts", 10.0);
        keyed.keys.push(Arc::new(Key::new(
            KeyMethod::Aes128,
            Some("key\".bin".to_string()),
        )));
        let playlist = two_segments(keyed, Segment::new("b.ts", 10.0));
        assert!(matches!(playlist.encode(), Err(PlaylistError::Invariant { .. })));
    }

    #[test]
    fn test_title_round_trip() {
        let mut titled = Segment::new("a.ts", 10.0);
        if let Some(inf) = titled.inf.as_mut() {
            inf.title = Some("Opening, part 1".to_string());
        }
        let playlist = two_segments(titled, Segment::new("b.ts", 10.0));
        let reparsed = MediaPlaylist::parse(&playlist.encode().unwrap()).unwrap();
        assert_eq!(reparsed.segments, playlist.segments);
    }
}
