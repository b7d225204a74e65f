//! Tag names and per-tag decoders
//!
//! `Tag::parse` turns one `#`-prefixed line into a typed [`Tag`]. Lines
//! with an unrecognized tag name decode to `None`; the scanners skip them.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset};

use crate::attributes::AttributeList;
use crate::error::{PlaylistError, Result};
use crate::types::*;

pub const EXTM3U: &str = "#EXTM3U";
pub const EXT_X_VERSION: &str = "#EXT-X-VERSION";
pub const EXT_X_INDEPENDENT_SEGMENTS: &str = "#EXT-X-INDEPENDENT-SEGMENTS";
pub const EXT_X_START: &str = "#EXT-X-START";

pub const EXT_X_MEDIA: &str = "#EXT-X-MEDIA";
pub const EXT_X_STREAM_INF: &str = "#EXT-X-STREAM-INF";
pub const EXT_X_I_FRAME_STREAM_INF: &str = "#EXT-X-I-FRAME-STREAM-INF";
pub const EXT_X_SESSION_DATA: &str = "#EXT-X-SESSION-DATA";
pub const EXT_X_SESSION_KEY: &str = "#EXT-X-SESSION-KEY";

pub const EXT_X_TARGETDURATION: &str = "#EXT-X-TARGETDURATION";
pub const EXT_X_MEDIA_SEQUENCE: &str = "#EXT-X-MEDIA-SEQUENCE";
pub const EXT_X_DISCONTINUITY_SEQUENCE: &str = "#EXT-X-DISCONTINUITY-SEQUENCE";
pub const EXT_X_PLAYLIST_TYPE: &str = "#EXT-X-PLAYLIST-TYPE";
pub const EXT_X_I_FRAMES_ONLY: &str = "#EXT-X-I-FRAMES-ONLY";
pub const EXT_X_ALLOW_CACHE: &str = "#EXT-X-ALLOW-CACHE";
pub const EXT_X_ENDLIST: &str = "#EXT-X-ENDLIST";

pub const EXTINF: &str = "#EXTINF";
pub const EXT_X_BYTERANGE: &str = "#EXT-X-BYTERANGE";
pub const EXT_X_DISCONTINUITY: &str = "#EXT-X-DISCONTINUITY";
pub const EXT_X_KEY: &str = "#EXT-X-KEY";
pub const EXT_X_MAP: &str = "#EXT-X-MAP";
pub const EXT_X_PROGRAM_DATE_TIME: &str = "#EXT-X-PROGRAM-DATE-TIME";
pub const EXT_X_DATERANGE: &str = "#EXT-X-DATERANGE";

/// One decoded tag line.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    M3u,
    Version(u32),
    IndependentSegments,
    Start(StartPoint),
    // Master playlist.
    Media(Rendition),
    StreamInf(Variant),
    IFrameStreamInf(Variant),
    SessionData(SessionData),
    SessionKey(Key),
    // Media playlist header.
    TargetDuration(u64),
    MediaSequence(u64),
    DiscontinuitySequence(u64),
    PlaylistType(PlaylistType),
    IFramesOnly,
    AllowCache(bool),
    EndList,
    // Media segment.
    Inf(Inf),
    Byterange(Byterange),
    Discontinuity,
    Key(Key),
    Map(Map),
    ProgramDateTime(DateTime<FixedOffset>),
    DateRange(DateRange),
}

impl Tag {
    /// Decode one line that starts with `#`.
    ///
    /// Returns `Ok(None)` for comments and tags this crate does not know.
    pub fn parse(line: &str) -> Result<Option<Tag>> {
        let (name, value) = match line.split_once(':') {
            Some((name, value)) => (name, Some(value.trim())),
            None => (line.trim_end(), None),
        };

        let tag = match name {
            EXTM3U => Tag::M3u,
            EXT_X_VERSION => Tag::Version(number(name, "VERSION", required(name, value)?)?),
            EXT_X_INDEPENDENT_SEGMENTS => Tag::IndependentSegments,
            EXT_X_START => Tag::Start(decode_start(required(name, value)?)?),

            EXT_X_MEDIA => Tag::Media(decode_rendition(required(name, value)?)?),
            EXT_X_STREAM_INF => {
                Tag::StreamInf(decode_variant(name, required(name, value)?, false)?)
            }
            EXT_X_I_FRAME_STREAM_INF => {
                Tag::IFrameStreamInf(decode_variant(name, required(name, value)?, true)?)
            }
            EXT_X_SESSION_DATA => Tag::SessionData(decode_session_data(required(name, value)?)?),
            EXT_X_SESSION_KEY => Tag::SessionKey(decode_key(name, required(name, value)?, true)?),

            EXT_X_TARGETDURATION => Tag::TargetDuration(number(
                name,
                "TARGETDURATION",
                required(name, value)?,
            )?),
            EXT_X_MEDIA_SEQUENCE => Tag::MediaSequence(number(
                name,
                "MEDIA-SEQUENCE",
                required(name, value)?,
            )?),
            EXT_X_DISCONTINUITY_SEQUENCE => Tag::DiscontinuitySequence(number(
                name,
                "DISCONTINUITY-SEQUENCE",
                required(name, value)?,
            )?),
            EXT_X_PLAYLIST_TYPE => {
                let value = required(name, value)?;
                Tag::PlaylistType(
                    value
                        .parse()
                        .map_err(|_| PlaylistError::invalid(name, "PLAYLIST-TYPE", value))?,
                )
            }
            EXT_X_I_FRAMES_ONLY => Tag::IFramesOnly,
            EXT_X_ALLOW_CACHE => {
                Tag::AllowCache(yes_no(name, "ALLOW-CACHE", required(name, value)?)?)
            }
            EXT_X_ENDLIST => Tag::EndList,

            EXTINF => Tag::Inf(decode_inf(required(name, value)?)?),
            EXT_X_BYTERANGE => {
                Tag::Byterange(byterange(name, "BYTERANGE", required(name, value)?)?)
            }
            EXT_X_DISCONTINUITY => Tag::Discontinuity,
            EXT_X_KEY => Tag::Key(decode_key(name, required(name, value)?, false)?),
            EXT_X_MAP => Tag::Map(decode_map(required(name, value)?)?),
            EXT_X_PROGRAM_DATE_TIME => Tag::ProgramDateTime(date_time(
                name,
                "PROGRAM-DATE-TIME",
                required(name, value)?,
            )?),
            EXT_X_DATERANGE => Tag::DateRange(decode_date_range(required(name, value)?)?),

            _ => {
                tracing::trace!(line, "skipping unrecognized line");
                return Ok(None);
            }
        };

        Ok(Some(tag))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tag::M3u => EXTM3U,
            Tag::Version(_) => EXT_X_VERSION,
            Tag::IndependentSegments => EXT_X_INDEPENDENT_SEGMENTS,
            Tag::Start(_) => EXT_X_START,
            Tag::Media(_) => EXT_X_MEDIA,
            Tag::StreamInf(_) => EXT_X_STREAM_INF,
            Tag::IFrameStreamInf(_) => EXT_X_I_FRAME_STREAM_INF,
            Tag::SessionData(_) => EXT_X_SESSION_DATA,
            Tag::SessionKey(_) => EXT_X_SESSION_KEY,
            Tag::TargetDuration(_) => EXT_X_TARGETDURATION,
            Tag::MediaSequence(_) => EXT_X_MEDIA_SEQUENCE,
            Tag::DiscontinuitySequence(_) => EXT_X_DISCONTINUITY_SEQUENCE,
            Tag::PlaylistType(_) => EXT_X_PLAYLIST_TYPE,
            Tag::IFramesOnly => EXT_X_I_FRAMES_ONLY,
            Tag::AllowCache(_) => EXT_X_ALLOW_CACHE,
            Tag::EndList => EXT_X_ENDLIST,
            Tag::Inf(_) => EXTINF,
            Tag::Byterange(_) => EXT_X_BYTERANGE,
            Tag::Discontinuity => EXT_X_DISCONTINUITY,
            Tag::Key(_) => EXT_X_KEY,
            Tag::Map(_) => EXT_X_MAP,
            Tag::ProgramDateTime(_) => EXT_X_PROGRAM_DATE_TIME,
            Tag::DateRange(_) => EXT_X_DATERANGE,
        }
    }
}

fn required<'a>(tag: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(PlaylistError::missing(tag, "value")),
    }
}

fn number<T: FromStr>(tag: &str, attribute: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| PlaylistError::invalid(tag, attribute, value))
}

fn decimal(tag: &str, attribute: &str, value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(PlaylistError::invalid(tag, attribute, value)),
    }
}

fn yes_no(tag: &str, attribute: &str, value: &str) -> Result<bool> {
    match value {
        "YES" => Ok(true),
        "NO" => Ok(false),
        _ => Err(PlaylistError::invalid(tag, attribute, value)),
    }
}

fn byterange(tag: &str, attribute: &str, value: &str) -> Result<Byterange> {
    let (length, offset) = match value.split_once('@') {
        Some((length, offset)) => (length, Some(offset)),
        None => (value, None),
    };
    Ok(Byterange {
        length: number(tag, attribute, length)?,
        offset: offset.map(|o| number(tag, attribute, o)).transpose()?,
    })
}

fn date_time(tag: &str, attribute: &str, value: &str) -> Result<DateTime<FixedOffset>> {
    let value = value.trim();
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map_err(|_| PlaylistError::invalid(tag, attribute, value))
}

fn owned(attrs: &AttributeList, name: &str) -> Option<String> {
    attrs.get(name).map(str::to_string)
}

fn decode_start(value: &str) -> Result<StartPoint> {
    let attrs = AttributeList::parse(EXT_X_START, value)?;
    let offset = attrs
        .get("TIME-OFFSET")
        .ok_or_else(|| PlaylistError::missing(EXT_X_START, "TIME-OFFSET"))?;
    let start = StartPoint {
        time_offset: decimal(EXT_X_START, "TIME-OFFSET", offset)?,
        precise: match attrs.get("PRECISE") {
            Some(v) => yes_no(EXT_X_START, "PRECISE", v)?,
            None => false,
        },
    };
    start.validate()?;
    Ok(start)
}

fn decode_variant(tag: &str, value: &str, is_iframe: bool) -> Result<Variant> {
    let attrs = AttributeList::parse(tag, value)?;
    let mut variant = Variant {
        is_iframe,
        ..Default::default()
    };

    for attr in attrs.iter() {
        let v = attr.value.as_str();
        match attr.name.as_str() {
            "URI" if is_iframe => variant.uri = v.to_string(),
            "PROGRAM-ID" => variant.program_id = Some(number(tag, "PROGRAM-ID", v)?),
            "BANDWIDTH" => variant.bandwidth = number(tag, "BANDWIDTH", v)?,
            "AVERAGE-BANDWIDTH" => {
                variant.average_bandwidth = Some(number(tag, "AVERAGE-BANDWIDTH", v)?)
            }
            "CODECS" => {
                variant.codecs = v
                    .split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect()
            }
            "RESOLUTION" => {
                variant.resolution = Some(
                    v.parse()
                        .map_err(|_| PlaylistError::invalid(tag, "RESOLUTION", v))?,
                )
            }
            "FRAME-RATE" => variant.frame_rate = Some(decimal(tag, "FRAME-RATE", v)?),
            "VIDEO" => variant.video = Some(v.to_string()),
            "AUDIO" => variant.audio = Some(v.to_string()),
            "SUBTITLES" => variant.subtitles = Some(v.to_string()),
            "CLOSED-CAPTIONS" => {
                variant.closed_captions = Some(if !attr.quoted && v == "NONE" {
                    ClosedCaptions::None
                } else {
                    ClosedCaptions::Group(v.to_string())
                })
            }
            _ => {}
        }
    }

    variant.validate()?;
    Ok(variant)
}

fn decode_rendition(value: &str) -> Result<Rendition> {
    let tag = EXT_X_MEDIA;
    let attrs = AttributeList::parse(tag, value)?;

    let media_type = attrs
        .get("TYPE")
        .ok_or_else(|| PlaylistError::missing(tag, "TYPE"))?;
    let media_type: MediaType = media_type
        .parse()
        .map_err(|_| PlaylistError::invalid(tag, "TYPE", media_type))?;

    let mut rendition = Rendition::new(
        media_type,
        attrs.get("GROUP-ID").unwrap_or_default(),
        attrs.get("NAME").unwrap_or_default(),
    );
    rendition.uri = owned(&attrs, "URI");
    rendition.language = owned(&attrs, "LANGUAGE");
    rendition.assoc_language = owned(&attrs, "ASSOC-LANGUAGE");
    rendition.characteristics = owned(&attrs, "CHARACTERISTICS");
    rendition.channels = owned(&attrs, "CHANNELS");
    if let Some(v) = attrs.get("DEFAULT") {
        rendition.default = yes_no(tag, "DEFAULT", v)?;
    }
    if let Some(v) = attrs.get("AUTOSELECT") {
        rendition.autoselect = yes_no(tag, "AUTOSELECT", v)?;
    }
    if let Some(v) = attrs.get("FORCED") {
        rendition.forced = yes_no(tag, "FORCED", v)?;
    }
    if let Some(v) = attrs.get("INSTREAM-ID") {
        rendition.instream_id = Some(
            v.parse()
                .map_err(|_| PlaylistError::invalid(tag, "INSTREAM-ID", v))?,
        );
    }

    rendition.validate()?;
    Ok(rendition)
}

fn decode_session_data(value: &str) -> Result<SessionData> {
    let attrs = AttributeList::parse(EXT_X_SESSION_DATA, value)?;
    let data = SessionData {
        data_id: attrs.get("DATA-ID").unwrap_or_default().to_string(),
        value: owned(&attrs, "VALUE"),
        uri: owned(&attrs, "URI"),
        language: owned(&attrs, "LANGUAGE"),
    };
    data.validate()?;
    Ok(data)
}

fn decode_key(tag: &str, value: &str, is_session: bool) -> Result<Key> {
    let attrs = AttributeList::parse(tag, value)?;
    let method = attrs
        .get("METHOD")
        .ok_or_else(|| PlaylistError::missing(tag, "METHOD"))?;
    let key = Key {
        is_session,
        method: method
            .parse()
            .map_err(|_| PlaylistError::invalid(tag, "METHOD", method))?,
        uri: owned(&attrs, "URI"),
        iv: owned(&attrs, "IV"),
        key_format: owned(&attrs, "KEYFORMAT"),
        key_format_versions: owned(&attrs, "KEYFORMATVERSIONS"),
    };
    if let Some(iv) = &key.iv {
        if !regex!(r"^0[xX][0-9a-fA-F]+$").is_match(iv) {
            return Err(PlaylistError::invalid(tag, "IV", iv.as_str()));
        }
    }
    key.validate()?;
    Ok(key)
}

fn decode_map(value: &str) -> Result<Map> {
    let attrs = AttributeList::parse(EXT_X_MAP, value)?;
    let map = Map {
        uri: attrs.get("URI").unwrap_or_default().to_string(),
        byterange: attrs
            .get("BYTERANGE")
            .map(|v| byterange(EXT_X_MAP, "BYTERANGE", v))
            .transpose()?,
    };
    map.validate()?;
    Ok(map)
}

fn decode_inf(value: &str) -> Result<Inf> {
    let (duration, title) = match value.split_once(',') {
        Some((duration, title)) => (duration, title.trim()),
        None => (value, ""),
    };
    let inf = Inf {
        duration: decimal(EXTINF, "DURATION", duration)?,
        title: (!title.is_empty()).then(|| title.to_string()),
    };
    inf.validate()?;
    Ok(inf)
}

fn decode_date_range(value: &str) -> Result<DateRange> {
    let tag = EXT_X_DATERANGE;
    let attrs = AttributeList::parse(tag, value)?;

    let start = attrs
        .get("START-DATE")
        .ok_or_else(|| PlaylistError::missing(tag, "START-DATE"))?;
    let mut range = DateRange::new(
        attrs.get("ID").unwrap_or_default(),
        date_time(tag, "START-DATE", start)?,
    );

    for attr in attrs.iter() {
        let v = attr.value.as_str();
        match attr.name.as_str() {
            "ID" | "START-DATE" => {}
            "CLASS" => range.class = Some(v.to_string()),
            "END-DATE" => range.end_date = Some(date_time(tag, "END-DATE", v)?),
            "DURATION" => range.duration = Some(decimal(tag, "DURATION", v)?),
            "PLANNED-DURATION" => {
                range.planned_duration = Some(decimal(tag, "PLANNED-DURATION", v)?)
            }
            "END-ON-NEXT" => {
                if v != "YES" {
                    return Err(PlaylistError::invalid(tag, "END-ON-NEXT", v));
                }
                range.end_on_next = true;
            }
            name if name.starts_with("SCTE35-") => {
                let kind = Scte35Kind::from_attribute(name)
                    .ok_or_else(|| PlaylistError::invalid(tag, name, v))?;
                if range.scte35.is_some() {
                    return Err(PlaylistError::invariant(
                        tag,
                        "only one SCTE35 attribute is supported",
                    ));
                }
                range.scte35 = Some(Scte35 {
                    kind,
                    value: v.to_string(),
                });
            }
            name if name.starts_with("X-") => range.client_attributes.push(ClientAttribute {
                name: name.to_string(),
                value: v.to_string(),
                quoted: attr.quoted,
            }),
            _ => {}
        }
    }

    range.validate()?;
    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Tag {
        Tag::parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_unknown_tags_are_skipped() {
        assert_eq!(Tag::parse("#EXT-X-UNKNOWN:FOO=1").unwrap(), None);
        assert_eq!(Tag::parse("# a comment").unwrap(), None);
    }

    #[test]
    fn test_decode_stream_inf() {
        let tag = parse(
            r#"#EXT-X-STREAM-INF:BANDWIDTH=1280000,AVERAGE-BANDWIDTH=1000000,CODECS="avc1.4d401f,mp4a.40.2",RESOLUTION=1280x720,FRAME-RATE=29.970,AUDIO="aac",CLOSED-CAPTIONS=NONE"#,
        );
        let v = match tag {
            Tag::StreamInf(v) => v,
            other => panic!("expected stream-inf, got {:?}", other),
        };
        assert_eq!(v.bandwidth, 1_280_000);
        assert_eq!(v.average_bandwidth, Some(1_000_000));
        assert_eq!(v.codecs, vec!["avc1.4d401f", "mp4a.40.2"]);
        assert_eq!(v.resolution, Some(Resolution { width: 1280, height: 720 }));
        assert_eq!(v.frame_rate, Some(29.97));
        assert_eq!(v.audio.as_deref(), Some("aac"));
        assert_eq!(v.closed_captions, Some(ClosedCaptions::None));
    }

    #[test]
    fn test_stream_inf_requires_bandwidth() {
        let err = Tag::parse(r#"#EXT-X-STREAM-INF:CODECS="avc1.4d401f""#).unwrap_err();
        assert!(matches!(err, PlaylistError::MissingAttribute { .. }));
    }

    #[test]
    fn test_iframe_stream_inf_rejects_audio() {
        let err = Tag::parse(
            r#"#EXT-X-I-FRAME-STREAM-INF:BANDWIDTH=86000,URI="iframe.m3u8",AUDIO="aac""#,
        )
        .unwrap_err();
        assert!(matches!(err, PlaylistError::Invariant { .. }));
    }

    #[test]
    fn test_decode_media() {
        let tag = parse(
            r#"#EXT-X-MEDIA:TYPE=CLOSED-CAPTIONS,GROUP-ID="cc",NAME="English",LANGUAGE="en",DEFAULT=YES,AUTOSELECT=YES,INSTREAM-ID="SERVICE3""#,
        );
        let r = match tag {
            Tag::Media(r) => r,
            other => panic!("expected media, got {:?}", other),
        };
        assert_eq!(r.media_type, MediaType::ClosedCaptions);
        assert_eq!(r.instream_id, Some(InstreamId::Service(3)));
        assert!(r.default && r.autoselect && !r.forced);
    }

    #[test]
    fn test_decode_inf() {
        assert_eq!(
            parse("#EXTINF:9.009,"),
            Tag::Inf(Inf {
                duration: 9.009,
                title: None
            })
        );
        assert_eq!(
            parse("#EXTINF:10,Intro, part one"),
            Tag::Inf(Inf {
                duration: 10.0,
                title: Some("Intro, part one".to_string())
            })
        );
        assert!(Tag::parse("#EXTINF:abc,").is_err());
    }

    #[test]
    fn test_decode_byterange() {
        assert_eq!(
            parse("#EXT-X-BYTERANGE:75232@0"),
            Tag::Byterange(Byterange {
                length: 75232,
                offset: Some(0)
            })
        );
        assert_eq!(
            parse("#EXT-X-BYTERANGE:82112"),
            Tag::Byterange(Byterange {
                length: 82112,
                offset: None
            })
        );
    }

    #[test]
    fn test_decode_key() {
        let tag = parse(
            r#"#EXT-X-KEY:METHOD=AES-128,URI="https://example.com/key",IV=0x1234567890abcdef1234567890abcdef"#,
        );
        let key = match tag {
            Tag::Key(key) => key,
            other => panic!("expected key, got {:?}", other),
        };
        assert_eq!(key.method, KeyMethod::Aes128);
        assert_eq!(key.uri.as_deref(), Some("https://example.com/key"));
        assert!(!key.is_session);

        assert!(Tag::parse(r#"#EXT-X-KEY:METHOD=AES-128,IV=0x00"#).is_err());
        assert!(Tag::parse(r#"#EXT-X-SESSION-KEY:METHOD=NONE"#).is_err());
    }

    #[test]
    fn test_decode_map() {
        let tag = parse(r#"#EXT-X-MAP:URI="init.mp4",BYTERANGE="720@0""#);
        assert_eq!(
            tag,
            Tag::Map(Map {
                uri: "init.mp4".to_string(),
                byterange: Some(Byterange {
                    length: 720,
                    offset: Some(0)
                }),
            })
        );
    }

    #[test]
    fn test_decode_date_range() {
        let tag = parse(
            r#"#EXT-X-DATERANGE:ID="splice-6FFFFFF0",START-DATE="2014-03-05T11:15:00Z",PLANNED-DURATION=59.993,SCTE35-OUT=0xFC002F0000000000FF000014056FFFFFF000E011622DCAFF000052636200000000000A0008029896F50000008700000000,X-COM-EXAMPLE-AD-ID="XYZ123""#,
        );
        let range = match tag {
            Tag::DateRange(range) => range,
            other => panic!("expected date range, got {:?}", other),
        };
        assert_eq!(range.id, "splice-6FFFFFF0");
        assert_eq!(range.planned_duration, Some(59.993));
        assert_eq!(range.scte35.as_ref().map(|s| s.kind), Some(Scte35Kind::Out));
        assert_eq!(range.client_attributes.len(), 1);
        assert!(range.client_attributes[0].quoted);
    }

    #[test]
    fn test_date_range_requires_start_date() {
        let err = Tag::parse(r#"#EXT-X-DATERANGE:ID="a""#).unwrap_err();
        assert!(matches!(err, PlaylistError::MissingAttribute { .. }));
    }

    #[test]
    fn test_session_data_both_value_and_uri() {
        let err =
            Tag::parse(r#"#EXT-X-SESSION-DATA:DATA-ID="com.example",VALUE="x",URI="x.json""#)
                .unwrap_err();
        assert!(matches!(err, PlaylistError::Invariant { .. }));
    }

    #[test]
    fn test_header_values() {
        assert_eq!(parse("#EXT-X-VERSION:7"), Tag::Version(7));
        assert_eq!(parse("#EXT-X-TARGETDURATION:10"), Tag::TargetDuration(10));
        assert_eq!(parse("#EXT-X-PLAYLIST-TYPE:VOD"), Tag::PlaylistType(PlaylistType::Vod));
        assert_eq!(parse("#EXT-X-ALLOW-CACHE:NO"), Tag::AllowCache(false));
        assert!(Tag::parse("#EXT-X-VERSION:seven").is_err());
        assert!(Tag::parse("#EXT-X-TARGETDURATION").is_err());
    }
}
