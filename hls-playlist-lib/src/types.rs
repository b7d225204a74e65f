//! Playlist data model
//!
//! Plain records shared by the scanners and the encoder. Every record with
//! required fields or semantic rules has a `validate()` that both the tag
//! decoders and the encoder call, so reading and writing enforce the same
//! rules.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::error::{PlaylistError, Result};
use crate::tags::*;

/// Protocol version assumed when a playlist carries no `#EXT-X-VERSION`.
pub const DEFAULT_VERSION: u32 = 1;

// helper.
macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).expect("valid regex literal"))
    }};
}
pub(crate) use regex;

/// Rendition type (`TYPE` attribute of `#EXT-X-MEDIA`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MediaType {
    Audio,
    Video,
    Subtitles,
    ClosedCaptions,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Audio => "AUDIO",
            MediaType::Video => "VIDEO",
            MediaType::Subtitles => "SUBTITLES",
            MediaType::ClosedCaptions => "CLOSED-CAPTIONS",
        }
    }
}

impl FromStr for MediaType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "AUDIO" => MediaType::Audio,
            "VIDEO" => MediaType::Video,
            "SUBTITLES" => MediaType::Subtitles,
            "CLOSED-CAPTIONS" => MediaType::ClosedCaptions,
            _ => return Err(()),
        })
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-stream closed caption channel: `CC1`..`CC4` or `SERVICE1`..`SERVICE63`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InstreamId {
    Cc(u8),
    Service(u8),
}

impl InstreamId {
    /// `SERVICEn` channels need protocol version 7.
    pub fn is_service(&self) -> bool {
        matches!(self, InstreamId::Service(_))
    }
}

impl FromStr for InstreamId {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        let s = s.to_ascii_uppercase();
        if let Some(caps) = regex!(r"^CC([1-4])$").captures(&s) {
            return caps[1].parse().map(InstreamId::Cc).map_err(|_| ());
        }
        if let Some(caps) = regex!(r"^SERVICE([1-9]|[1-5][0-9]|6[0-3])$").captures(&s) {
            return caps[1].parse().map(InstreamId::Service).map_err(|_| ());
        }
        Err(())
    }
}

impl fmt::Display for InstreamId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InstreamId::Cc(n) => write!(f, "CC{}", n),
            InstreamId::Service(n) => write!(f, "SERVICE{}", n),
        }
    }
}

/// `CLOSED-CAPTIONS` attribute of a variant: a group id or `NONE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ClosedCaptions {
    None,
    Group(String),
}

/// Optimal pixel resolution, written `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl FromStr for Resolution {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        let caps = regex!(r"^(\d+)[xX](\d+)$").captures(s).ok_or(())?;
        Ok(Resolution {
            width: caps[1].parse().map_err(|_| ())?,
            height: caps[2].parse().map_err(|_| ())?,
        })
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Encryption method of a `#EXT-X-KEY` / `#EXT-X-SESSION-KEY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum KeyMethod {
    None,
    Aes128,
    SampleAes,
}

impl KeyMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyMethod::None => "NONE",
            KeyMethod::Aes128 => "AES-128",
            KeyMethod::SampleAes => "SAMPLE-AES",
        }
    }
}

impl FromStr for KeyMethod {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "NONE" => KeyMethod::None,
            "AES-128" => KeyMethod::Aes128,
            "SAMPLE-AES" => KeyMethod::SampleAes,
            _ => return Err(()),
        })
    }
}

/// `#EXT-X-PLAYLIST-TYPE` value. Absent means unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaylistType {
    Event,
    Vod,
}

impl PlaylistType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaylistType::Event => "EVENT",
            PlaylistType::Vod => "VOD",
        }
    }
}

impl FromStr for PlaylistType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s.to_ascii_uppercase().as_str() {
            "EVENT" => Ok(PlaylistType::Event),
            "VOD" => Ok(PlaylistType::Vod),
            _ => Err(()),
        }
    }
}

/// One alternative stream (`#EXT-X-STREAM-INF` or `#EXT-X-I-FRAME-STREAM-INF`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Variant {
    pub is_iframe: bool,
    /// For regular variants the line after the tag, for I-frame variants
    /// the `URI` attribute.
    pub uri: String,
    /// Removed in protocol version 6.
    pub program_id: Option<u64>,
    /// Peak segment bit rate. Required.
    pub bandwidth: u64,
    pub average_bandwidth: Option<u64>,
    pub codecs: Vec<String>,
    pub resolution: Option<Resolution>,
    pub frame_rate: Option<f64>,
    pub video: Option<String>,
    /// Not allowed on I-frame variants.
    pub audio: Option<String>,
    /// Not allowed on I-frame variants.
    pub subtitles: Option<String>,
    /// Not allowed on I-frame variants.
    pub closed_captions: Option<ClosedCaptions>,
    /// Renditions declared since the previous variant, written before this
    /// variant's stream-info tag.
    pub renditions: Vec<Rendition>,
}

impl Variant {
    pub fn tag(&self) -> &'static str {
        if self.is_iframe {
            EXT_X_I_FRAME_STREAM_INF
        } else {
            EXT_X_STREAM_INF
        }
    }

    pub fn validate(&self) -> Result<()> {
        let tag = self.tag();
        if self.bandwidth == 0 {
            return Err(PlaylistError::missing(tag, "BANDWIDTH"));
        }
        if self.is_iframe {
            if self.uri.is_empty() {
                return Err(PlaylistError::missing(tag, "URI"));
            }
            if self.audio.is_some() || self.subtitles.is_some() || self.closed_captions.is_some()
            {
                return Err(PlaylistError::invariant(
                    tag,
                    "I-frame variants must not reference AUDIO, SUBTITLES or CLOSED-CAPTIONS",
                ));
            }
        }
        if let Some(rate) = self.frame_rate {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(PlaylistError::invalid(tag, "FRAME-RATE", rate.to_string()));
            }
        }
        Ok(())
    }
}

/// One alternative track inside a named group (`#EXT-X-MEDIA`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendition {
    pub media_type: MediaType,
    /// Required for subtitles, forbidden for closed captions.
    pub uri: Option<String>,
    pub group_id: String,
    pub language: Option<String>,
    pub assoc_language: Option<String>,
    pub name: String,
    pub default: bool,
    pub autoselect: bool,
    /// Only for subtitles.
    pub forced: bool,
    /// Only for closed captions, where it is required.
    pub instream_id: Option<InstreamId>,
    pub characteristics: Option<String>,
    pub channels: Option<String>,
}

impl Rendition {
    pub fn new(
        media_type: MediaType,
        group_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Rendition {
        Rendition {
            media_type,
            uri: None,
            group_id: group_id.into(),
            language: None,
            assoc_language: None,
            name: name.into(),
            default: false,
            autoselect: false,
            forced: false,
            instream_id: None,
            characteristics: None,
            channels: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.group_id.is_empty() {
            return Err(PlaylistError::missing(EXT_X_MEDIA, "GROUP-ID"));
        }
        if self.name.is_empty() {
            return Err(PlaylistError::missing(EXT_X_MEDIA, "NAME"));
        }
        match self.media_type {
            MediaType::Subtitles if self.uri.as_deref().map_or(true, str::is_empty) => {
                return Err(PlaylistError::missing(EXT_X_MEDIA, "URI for SUBTITLES"));
            }
            MediaType::ClosedCaptions if self.uri.is_some() => {
                return Err(PlaylistError::invariant(
                    EXT_X_MEDIA,
                    "URI must not be present for CLOSED-CAPTIONS",
                ));
            }
            MediaType::ClosedCaptions if self.instream_id.is_none() => {
                return Err(PlaylistError::missing(EXT_X_MEDIA, "INSTREAM-ID"));
            }
            _ => {}
        }
        if self.forced && self.media_type != MediaType::Subtitles {
            return Err(PlaylistError::invariant(
                EXT_X_MEDIA,
                "FORCED is only allowed for SUBTITLES",
            ));
        }
        if self.instream_id.is_some() && self.media_type != MediaType::ClosedCaptions {
            return Err(PlaylistError::invariant(
                EXT_X_MEDIA,
                "INSTREAM-ID is only allowed for CLOSED-CAPTIONS",
            ));
        }
        Ok(())
    }

    /// Whether this rendition belongs to the group a variant references for
    /// its type.
    pub fn belongs_to(&self, variant: &Variant) -> bool {
        let group = match self.media_type {
            MediaType::Audio => variant.audio.as_deref(),
            MediaType::Video => variant.video.as_deref(),
            MediaType::Subtitles => variant.subtitles.as_deref(),
            MediaType::ClosedCaptions => match &variant.closed_captions {
                Some(ClosedCaptions::Group(g)) => Some(g.as_str()),
                _ => None,
            },
        };
        group == Some(self.group_id.as_str())
    }
}

/// Master-playlist-scoped datum (`#EXT-X-SESSION-DATA`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionData {
    pub data_id: String,
    /// Exactly one of `value` and `uri` is set.
    pub value: Option<String>,
    pub uri: Option<String>,
    pub language: Option<String>,
}

impl SessionData {
    pub fn validate(&self) -> Result<()> {
        if self.data_id.is_empty() {
            return Err(PlaylistError::missing(EXT_X_SESSION_DATA, "DATA-ID"));
        }
        match (&self.value, &self.uri) {
            (Some(_), Some(_)) => Err(PlaylistError::invariant(
                EXT_X_SESSION_DATA,
                "must have attributes URI or VALUE, not both",
            )),
            (None, None) => Err(PlaylistError::invariant(
                EXT_X_SESSION_DATA,
                "must have either URI or VALUE attributes set",
            )),
            _ => Ok(()),
        }
    }
}

/// Decryption metadata (`#EXT-X-KEY`, or `#EXT-X-SESSION-KEY` when
/// `is_session` is set).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Key {
    pub is_session: bool,
    pub method: KeyMethod,
    /// Required unless the method is `NONE`.
    pub uri: Option<String>,
    /// Hexadecimal initialization vector, kept as written.
    pub iv: Option<String>,
    pub key_format: Option<String>,
    pub key_format_versions: Option<String>,
}

impl Key {
    pub fn new(method: KeyMethod, uri: Option<String>) -> Key {
        Key {
            is_session: false,
            method,
            uri,
            iv: None,
            key_format: None,
            key_format_versions: None,
        }
    }

    pub fn tag(&self) -> &'static str {
        if self.is_session {
            EXT_X_SESSION_KEY
        } else {
            EXT_X_KEY
        }
    }

    pub fn validate(&self) -> Result<()> {
        let tag = self.tag();
        if self.method == KeyMethod::None {
            if self.is_session {
                return Err(PlaylistError::invariant(tag, "METHOD must not be NONE"));
            }
            if self.uri.is_some()
                || self.iv.is_some()
                || self.key_format.is_some()
                || self.key_format_versions.is_some()
            {
                return Err(PlaylistError::invariant(
                    tag,
                    "METHOD=NONE must not carry other attributes",
                ));
            }
            return Ok(());
        }
        if self.uri.as_deref().map_or(true, str::is_empty) {
            return Err(PlaylistError::missing(tag, "URI"));
        }
        Ok(())
    }
}

/// Length and optional start offset of a sub-range, written `n[@o]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Byterange {
    pub length: u64,
    pub offset: Option<u64>,
}

impl fmt::Display for Byterange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.length)?;
        if let Some(offset) = self.offset {
            write!(f, "@{}", offset)?;
        }
        Ok(())
    }
}

/// Media initialization section (`#EXT-X-MAP`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Map {
    pub uri: String,
    pub byterange: Option<Byterange>,
}

impl Map {
    pub fn validate(&self) -> Result<()> {
        if self.uri.is_empty() {
            return Err(PlaylistError::missing(EXT_X_MAP, "URI"));
        }
        Ok(())
    }
}

/// `#EXTINF:<duration>,[<title>]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inf {
    pub duration: f64,
    pub title: Option<String>,
}

impl Inf {
    pub fn new(duration: f64) -> Inf {
        Inf {
            duration,
            title: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(PlaylistError::invalid(
                EXTINF,
                "DURATION",
                self.duration.to_string(),
            ));
        }
        Ok(())
    }
}

/// Preferred start point (`#EXT-X-START`). A negative offset counts from the
/// end of the playlist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StartPoint {
    pub time_offset: f64,
    pub precise: bool,
}

impl StartPoint {
    pub fn validate(&self) -> Result<()> {
        if !self.time_offset.is_finite() {
            return Err(PlaylistError::invalid(
                EXT_X_START,
                "TIME-OFFSET",
                self.time_offset.to_string(),
            ));
        }
        Ok(())
    }
}

/// Which splice signal an SCTE-35 attribute carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Scte35Kind {
    In,
    Out,
    Cmd,
}

impl Scte35Kind {
    pub fn attribute(&self) -> &'static str {
        match self {
            Scte35Kind::In => "SCTE35-IN",
            Scte35Kind::Out => "SCTE35-OUT",
            Scte35Kind::Cmd => "SCTE35-CMD",
        }
    }

    pub fn from_attribute(name: &str) -> Option<Scte35Kind> {
        match name {
            "SCTE35-IN" => Some(Scte35Kind::In),
            "SCTE35-OUT" => Some(Scte35Kind::Out),
            "SCTE35-CMD" => Some(Scte35Kind::Cmd),
            _ => None,
        }
    }
}

/// SCTE-35 splice_info_section carried in a date range, as a hex sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scte35 {
    pub kind: Scte35Kind,
    pub value: String,
}

/// Client-defined `X-` attribute of a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientAttribute {
    pub name: String,
    pub value: String,
    pub quoted: bool,
}

/// `#EXT-X-DATERANGE`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRange {
    pub id: String,
    pub class: Option<String>,
    pub start_date: DateTime<FixedOffset>,
    pub end_date: Option<DateTime<FixedOffset>>,
    pub duration: Option<f64>,
    pub planned_duration: Option<f64>,
    pub client_attributes: Vec<ClientAttribute>,
    /// Range ends where the next range of the same class starts.
    pub end_on_next: bool,
    pub scte35: Option<Scte35>,
}

impl DateRange {
    pub fn new(id: impl Into<String>, start_date: DateTime<FixedOffset>) -> DateRange {
        DateRange {
            id: id.into(),
            class: None,
            start_date,
            end_date: None,
            duration: None,
            planned_duration: None,
            client_attributes: Vec::new(),
            end_on_next: false,
            scte35: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(PlaylistError::missing(EXT_X_DATERANGE, "ID"));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(PlaylistError::invariant(
                    EXT_X_DATERANGE,
                    "END-DATE must be equal or later than START-DATE",
                ));
            }
        }
        for (name, value) in [
            ("DURATION", self.duration),
            ("PLANNED-DURATION", self.planned_duration),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(PlaylistError::invalid(EXT_X_DATERANGE, name, v.to_string()));
                }
            }
        }
        for attr in &self.client_attributes {
            if !regex!(r"^X-[A-Z0-9-]+$").is_match(&attr.name) {
                return Err(PlaylistError::invariant(
                    EXT_X_DATERANGE,
                    format!("client-defined attribute {:?} must start with X-", attr.name),
                ));
            }
        }
        if let Some(scte) = &self.scte35 {
            if scte.value.is_empty() {
                return Err(PlaylistError::missing(EXT_X_DATERANGE, scte.kind.attribute()));
            }
        }
        if self.end_on_next {
            if self.class.as_deref().map_or(true, str::is_empty) {
                return Err(PlaylistError::invariant(
                    EXT_X_DATERANGE,
                    "CLASS is required when END-ON-NEXT is present",
                ));
            }
            if self.duration.is_some() || self.end_date.is_some() {
                return Err(PlaylistError::invariant(
                    EXT_X_DATERANGE,
                    "DURATION and END-DATE must not be present with END-ON-NEXT",
                ));
            }
        }
        Ok(())
    }
}

/// One media segment.
///
/// Keys and map carried forward from an earlier segment are shared
/// (`Arc::ptr_eq` holds). Shared records are never mutated in place:
/// `Arc::make_mut` copies before writing, so changing one segment's key
/// leaves every other segment alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Segment {
    /// Media sequence number.
    pub sequence: u64,
    pub uri: String,
    /// Required.
    pub inf: Option<Inf>,
    pub byterange: Option<Byterange>,
    pub discontinuity: bool,
    pub keys: Vec<Arc<Key>>,
    pub map: Option<Arc<Map>>,
    pub program_date_time: Option<DateTime<FixedOffset>>,
    pub date_range: Option<DateRange>,
}

impl Segment {
    pub fn new(uri: impl Into<String>, duration: f64) -> Segment {
        Segment {
            uri: uri.into(),
            inf: Some(Inf::new(duration)),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        match &self.inf {
            Some(inf) => inf.validate()?,
            None => return Err(PlaylistError::missing(EXTINF, "DURATION")),
        }
        if self.uri.is_empty() {
            return Err(PlaylistError::missing("Segment", "URI"));
        }
        for key in &self.keys {
            key.validate()?;
        }
        if let Some(map) = &self.map {
            map.validate()?;
        }
        if let Some(range) = &self.date_range {
            range.validate()?;
        }
        Ok(())
    }
}

/// Master playlist: the variants and renditions of one presentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MasterPlaylist {
    /// Where the playlist was retrieved from, used to resolve relative URIs.
    pub uri: Option<String>,
    /// `#EXTM3U` was present.
    pub m3u: bool,
    pub version: Option<u32>,
    pub variants: Vec<Variant>,
    /// Every `#EXT-X-MEDIA` in document order.
    pub renditions: Vec<Rendition>,
    pub session_data: Vec<SessionData>,
    pub session_keys: Vec<Key>,
    pub independent_segments: bool,
    pub start: Option<StartPoint>,
}

impl MasterPlaylist {
    pub fn new(version: u32) -> MasterPlaylist {
        MasterPlaylist {
            m3u: true,
            version: Some(version),
            ..Default::default()
        }
    }

    /// Declared version, or version 1 when undeclared.
    pub fn effective_version(&self) -> u32 {
        self.version.unwrap_or(DEFAULT_VERSION)
    }

    /// Renditions of the groups a variant references.
    pub fn renditions_for<'a>(
        &'a self,
        variant: &'a Variant,
    ) -> impl Iterator<Item = &'a Rendition> + 'a {
        self.renditions.iter().filter(move |r| r.belongs_to(variant))
    }

    /// Playlist-level renditions followed by attached ones not already listed.
    pub fn all_renditions(&self) -> Vec<&Rendition> {
        let mut all: Vec<&Rendition> = self.renditions.iter().collect();
        for variant in &self.variants {
            for rendition in &variant.renditions {
                if !all.contains(&rendition) {
                    all.push(rendition);
                }
            }
        }
        all
    }
}

/// Media playlist: the ordered segments of one variant stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaPlaylist {
    /// Where the playlist was retrieved from, used to resolve relative URIs.
    pub uri: Option<String>,
    /// `#EXTM3U` was present.
    pub m3u: bool,
    pub version: Option<u32>,
    pub segments: Vec<Segment>,
    /// Upper bound on every segment duration, in whole seconds. Required.
    pub target_duration: u64,
    pub media_sequence: u64,
    pub discontinuity_sequence: u64,
    pub end_list: bool,
    pub playlist_type: Option<PlaylistType>,
    pub i_frames_only: bool,
    /// Versions up to 6 only.
    pub allow_cache: bool,
    pub independent_segments: bool,
    pub start: Option<StartPoint>,
}

impl MediaPlaylist {
    pub fn new(version: u32) -> MediaPlaylist {
        MediaPlaylist {
            m3u: true,
            version: Some(version),
            ..Default::default()
        }
    }

    /// Declared version, or version 1 when undeclared.
    pub fn effective_version(&self) -> u32 {
        self.version.unwrap_or(DEFAULT_VERSION)
    }

    /// Sum of all segment durations in seconds.
    pub fn duration(&self) -> f64 {
        self.segments
            .iter()
            .filter_map(|s| s.inf.as_ref())
            .map(|inf| inf.duration)
            .sum()
    }

    pub fn segment(&self, sequence: u64) -> Option<&Segment> {
        self.segments.iter().find(|s| s.sequence == sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_instream_id() {
        assert_eq!("CC1".parse::<InstreamId>(), Ok(InstreamId::Cc(1)));
        assert_eq!("service63".parse::<InstreamId>(), Ok(InstreamId::Service(63)));
        assert!("CC5".parse::<InstreamId>().is_err());
        assert!("SERVICE64".parse::<InstreamId>().is_err());
        assert!("SERVICE0".parse::<InstreamId>().is_err());
        assert_eq!(InstreamId::Service(7).to_string(), "SERVICE7");
    }

    #[test]
    fn test_resolution() {
        let r: Resolution = "1920x1080".parse().unwrap();
        assert_eq!(r, Resolution { width: 1920, height: 1080 });
        assert_eq!(r.to_string(), "1920x1080");
        assert!("1920".parse::<Resolution>().is_err());
    }

    #[test]
    fn test_session_data_value_xor_uri() {
        let mut sd = SessionData {
            data_id: "com.example.title".to_string(),
            ..Default::default()
        };
        assert!(matches!(sd.validate(), Err(PlaylistError::Invariant { .. })));
        sd.value = Some("title".to_string());
        assert!(sd.validate().is_ok());
        sd.uri = Some("title.json".to_string());
        assert!(matches!(sd.validate(), Err(PlaylistError::Invariant { .. })));
    }

    #[test]
    fn test_key_rules() {
        let mut key = Key::new(KeyMethod::Aes128, None);
        assert!(matches!(key.validate(), Err(PlaylistError::MissingAttribute { .. })));
        key.uri = Some("key.bin".to_string());
        assert!(key.validate().is_ok());

        let mut none = Key::new(KeyMethod::None, None);
        assert!(none.validate().is_ok());
        none.is_session = true;
        assert!(none.validate().is_err());
    }

    #[test]
    fn test_rendition_rules() {
        let subs = Rendition::new(MediaType::Subtitles, "subs", "English");
        assert!(subs.validate().is_err());

        let mut cc = Rendition::new(MediaType::ClosedCaptions, "cc", "English");
        cc.instream_id = Some(InstreamId::Cc(1));
        assert!(cc.validate().is_ok());
        cc.uri = Some("cc.m3u8".to_string());
        assert!(cc.validate().is_err());

        let mut audio = Rendition::new(MediaType::Audio, "aac", "English");
        audio.forced = true;
        assert!(audio.validate().is_err());
    }

    #[test]
    fn test_date_range_end_on_next_requires_class() {
        let mut range = DateRange::new("ad-1", date("2024-01-01T00:00:00Z"));
        range.end_on_next = true;
        assert!(matches!(range.validate(), Err(PlaylistError::Invariant { .. })));
        range.class = Some("com.example.ad".to_string());
        assert!(range.validate().is_ok());
        range.duration = Some(10.0);
        assert!(range.validate().is_err());
    }

    #[test]
    fn test_date_range_end_before_start() {
        let mut range = DateRange::new("ad-1", date("2024-01-01T00:00:10Z"));
        range.end_date = Some(date("2024-01-01T00:00:00Z"));
        assert!(matches!(range.validate(), Err(PlaylistError::Invariant { .. })));
    }

    #[test]
    fn test_rendition_group_lookup() {
        let mut master = MasterPlaylist::new(4);
        master.renditions.push(Rendition::new(MediaType::Audio, "aac", "English"));
        master.renditions.push(Rendition::new(MediaType::Audio, "ac3", "English"));
        let variant = Variant {
            bandwidth: 1_000_000,
            audio: Some("ac3".to_string()),
            ..Default::default()
        };
        let found: Vec<_> = master.renditions_for(&variant).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].group_id, "ac3");
    }
}
