//! Line-oriented playlist text builder and the per-record tag writers.
//!
//! Every record is validated before it is written, and values that would
//! break the line or attribute syntax are refused, so an encoded playlist
//! always decodes again.

use bytes::Bytes;
use chrono::{DateTime, FixedOffset, SecondsFormat};

use crate::error::{PlaylistError, Result};
use crate::tags::*;
use crate::types::*;

/// Accumulates playlist text.
#[derive(Debug, Default)]
pub(crate) struct PlaylistWriter {
    output: String,
}

impl PlaylistWriter {
    pub fn new() -> PlaylistWriter {
        PlaylistWriter::default()
    }

    /// `#EXTM3U` and `#EXT-X-VERSION`.
    pub fn header(&mut self, version: u32) {
        self.line(EXTM3U);
        self.tag_value(EXT_X_VERSION, version);
    }

    pub fn line(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }

    pub fn tag_value(&mut self, tag: &str, value: impl std::fmt::Display) {
        self.output.push_str(&format!("{}:{}\n", tag, value));
    }

    /// A URI line. It must not be blank, look like a tag or comment, or
    /// carry whitespace the reader would trim.
    pub fn uri_line(&mut self, tag: &str, uri: &str) -> Result<()> {
        if uri.is_empty() {
            return Err(PlaylistError::missing(tag, "URI"));
        }
        if uri.starts_with('#') || has_line_break(uri) || uri.trim() != uri {
            return Err(PlaylistError::invariant(
                tag,
                format!("URI {:?} cannot be written as a playlist line", uri),
            ));
        }
        self.line(uri);
        Ok(())
    }

    /// Start an attribute-list tag. Finish it with [`AttributeWriter::end`].
    pub fn attributes(&mut self, tag: &'static str) -> AttributeWriter<'_> {
        self.output.push_str(tag);
        self.output.push(':');
        AttributeWriter {
            output: &mut self.output,
            tag,
            first: true,
            error: None,
        }
    }

    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.output)
    }
}

fn has_line_break(value: &str) -> bool {
    value.contains(['\r', '\n'])
}

/// Writes comma-separated `NAME=VALUE` pairs of one tag.
///
/// The first value that cannot be written is kept and returned by `end`.
pub(crate) struct AttributeWriter<'a> {
    output: &'a mut String,
    tag: &'static str,
    first: bool,
    error: Option<PlaylistError>,
}

impl<'a> AttributeWriter<'a> {
    fn name(&mut self, name: &str) {
        if !self.first {
            self.output.push(',');
        }
        self.first = false;
        self.output.push_str(name);
        self.output.push('=');
    }

    fn refuse(&mut self, name: &str, value: &str, reason: &str) {
        if self.error.is_none() {
            self.error = Some(PlaylistError::invariant(
                self.tag,
                format!("{} value {:?} {}", name, value, reason),
            ));
        }
    }

    /// Unquoted value: no separators, quotes or line breaks.
    pub fn raw(mut self, name: &str, value: impl std::fmt::Display) -> Self {
        let value = value.to_string();
        if value.is_empty() || value.contains([',', '"']) || has_line_break(&value) {
            self.refuse(name, &value, "cannot be written unquoted");
            return self;
        }
        self.name(name);
        self.output.push_str(&value);
        self
    }

    /// Quoted value: no double quotes or line breaks.
    pub fn quoted(mut self, name: &str, value: &str) -> Self {
        if value.contains('"') || has_line_break(value) {
            self.refuse(name, value, "cannot be written as a quoted string");
            return self;
        }
        self.name(name);
        self.output.push('"');
        self.output.push_str(value);
        self.output.push('"');
        self
    }

    pub fn opt_raw<T: std::fmt::Display>(self, name: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.raw(name, v),
            None => self,
        }
    }

    pub fn opt_quoted(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.quoted(name, v),
            None => self,
        }
    }

    /// `NAME=YES` when set, nothing otherwise.
    pub fn flag(self, name: &str, set: bool) -> Self {
        if set {
            self.raw(name, "YES")
        } else {
            self
        }
    }

    pub fn end(self) -> Result<()> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.output.push('\n');
        Ok(())
    }
}

pub(crate) fn format_date(date: &DateTime<FixedOffset>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub(crate) fn write_start(w: &mut PlaylistWriter, start: &StartPoint) -> Result<()> {
    start.validate()?;
    w.attributes(EXT_X_START)
        .raw("TIME-OFFSET", start.time_offset)
        .flag("PRECISE", start.precise)
        .end()
}

pub(crate) fn write_session_data(w: &mut PlaylistWriter, data: &SessionData) -> Result<()> {
    data.validate()?;
    w.attributes(EXT_X_SESSION_DATA)
        .quoted("DATA-ID", &data.data_id)
        .opt_quoted("VALUE", data.value.as_deref())
        .opt_quoted("URI", data.uri.as_deref())
        .opt_quoted("LANGUAGE", data.language.as_deref())
        .end()
}

pub(crate) fn write_key(w: &mut PlaylistWriter, key: &Key) -> Result<()> {
    key.validate()?;
    w.attributes(key.tag())
        .raw("METHOD", key.method.as_str())
        .opt_quoted("URI", key.uri.as_deref())
        .opt_raw("IV", key.iv.as_deref())
        .opt_quoted("KEYFORMAT", key.key_format.as_deref())
        .opt_quoted("KEYFORMATVERSIONS", key.key_format_versions.as_deref())
        .end()
}

pub(crate) fn write_map(w: &mut PlaylistWriter, map: &Map) -> Result<()> {
    map.validate()?;
    let byterange = map.byterange.map(|b| b.to_string());
    w.attributes(EXT_X_MAP)
        .quoted("URI", &map.uri)
        .opt_quoted("BYTERANGE", byterange.as_deref())
        .end()
}

pub(crate) fn write_rendition(w: &mut PlaylistWriter, rendition: &Rendition) -> Result<()> {
    rendition.validate()?;
    let instream_id = rendition.instream_id.map(|id| id.to_string());
    w.attributes(EXT_X_MEDIA)
        .raw("TYPE", rendition.media_type)
        .quoted("GROUP-ID", &rendition.group_id)
        .quoted("NAME", &rendition.name)
        .opt_quoted("LANGUAGE", rendition.language.as_deref())
        .opt_quoted("ASSOC-LANGUAGE", rendition.assoc_language.as_deref())
        .flag("DEFAULT", rendition.default)
        .flag("AUTOSELECT", rendition.autoselect)
        .flag("FORCED", rendition.forced)
        .opt_quoted("INSTREAM-ID", instream_id.as_deref())
        .opt_quoted("CHARACTERISTICS", rendition.characteristics.as_deref())
        .opt_quoted("CHANNELS", rendition.channels.as_deref())
        .opt_quoted("URI", rendition.uri.as_deref())
        .end()
}

/// Stream-info tag, plus the URI line for regular variants.
pub(crate) fn write_variant(w: &mut PlaylistWriter, variant: &Variant) -> Result<()> {
    variant.validate()?;
    if variant.uri.is_empty() {
        return Err(PlaylistError::missing(variant.tag(), "URI"));
    }

    let codecs = variant.codecs.join(",");
    let mut attrs = w
        .attributes(variant.tag())
        .raw("BANDWIDTH", variant.bandwidth)
        .opt_raw("PROGRAM-ID", variant.program_id)
        .opt_raw("AVERAGE-BANDWIDTH", variant.average_bandwidth)
        .opt_quoted("CODECS", (!codecs.is_empty()).then_some(codecs.as_str()))
        .opt_raw("RESOLUTION", variant.resolution)
        .opt_raw("FRAME-RATE", variant.frame_rate)
        .opt_quoted("VIDEO", variant.video.as_deref());

    if variant.is_iframe {
        return attrs.quoted("URI", &variant.uri).end();
    }

    attrs = attrs
        .opt_quoted("AUDIO", variant.audio.as_deref())
        .opt_quoted("SUBTITLES", variant.subtitles.as_deref());
    attrs = match &variant.closed_captions {
        Some(ClosedCaptions::None) => attrs.raw("CLOSED-CAPTIONS", "NONE"),
        Some(ClosedCaptions::Group(group)) => attrs.quoted("CLOSED-CAPTIONS", group),
        None => attrs,
    };
    attrs.end()?;
    w.uri_line(variant.tag(), &variant.uri)
}

pub(crate) fn write_date_range(w: &mut PlaylistWriter, range: &DateRange) -> Result<()> {
    range.validate()?;
    let mut attrs = w
        .attributes(EXT_X_DATERANGE)
        .quoted("ID", &range.id)
        .opt_quoted("CLASS", range.class.as_deref())
        .quoted("START-DATE", &format_date(&range.start_date))
        .opt_quoted("END-DATE", range.end_date.as_ref().map(format_date).as_deref())
        .opt_raw("DURATION", range.duration)
        .opt_raw("PLANNED-DURATION", range.planned_duration);
    for attr in &range.client_attributes {
        attrs = if attr.quoted {
            attrs.quoted(&attr.name, &attr.value)
        } else {
            attrs.raw(&attr.name, &attr.value)
        };
    }
    if let Some(scte) = &range.scte35 {
        attrs = attrs.raw(scte.kind.attribute(), &scte.value);
    }
    attrs.flag("END-ON-NEXT", range.end_on_next).end()
}
