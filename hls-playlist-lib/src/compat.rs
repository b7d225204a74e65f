//! Protocol-version compatibility rules
//!
//! Each rule names the tag it concerns, a predicate over the features a
//! playlist (or one of its segments) uses, and the range of versions that
//! may carry that feature. `check` reports the first rule that fails.

use crate::error::{PlaylistError, Result};
use crate::tags::*;
use crate::types::{MasterPlaylist, MediaPlaylist, Segment};

/// Version-sensitive features in use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Features {
    /// A key carries an `IV` attribute.
    pub key_iv: bool,
    /// A key carries `KEYFORMAT` or `KEYFORMATVERSIONS`.
    pub key_format: bool,
    /// A segment duration has a fractional part.
    pub fractional_duration: bool,
    /// A segment uses `#EXT-X-BYTERANGE`.
    pub byterange: bool,
    /// A segment references an `#EXT-X-MAP`.
    pub map: bool,
    /// The playlist is `#EXT-X-I-FRAMES-ONLY`.
    pub i_frames_only: bool,
    /// A closed-caption rendition uses a `SERVICEn` channel.
    pub service_instream_id: bool,
    /// A variant carries `PROGRAM-ID`.
    pub program_id: bool,
    /// `#EXT-X-ALLOW-CACHE:YES` is present.
    pub allow_cache: bool,
}

impl Features {
    /// Features of a master playlist: its renditions, variants and session keys.
    pub fn for_master(playlist: &MasterPlaylist) -> Features {
        let mut features = Features::default();
        for rendition in playlist.all_renditions() {
            if rendition.instream_id.map_or(false, |id| id.is_service()) {
                features.service_instream_id = true;
            }
        }
        features.program_id = playlist.variants.iter().any(|v| v.program_id.is_some());
        for key in &playlist.session_keys {
            features.key_iv |= key.iv.is_some();
            features.key_format |= key.key_format.is_some() || key.key_format_versions.is_some();
        }
        features
    }

    /// Features of the media playlist header.
    pub fn for_media_header(playlist: &MediaPlaylist) -> Features {
        Features {
            i_frames_only: playlist.i_frames_only,
            allow_cache: playlist.allow_cache,
            ..Default::default()
        }
    }

    /// Features of one segment. `i_frames_only` is the playlist's flag, which
    /// decides the version `#EXT-X-MAP` needs.
    pub fn for_segment(segment: &Segment, i_frames_only: bool) -> Features {
        let mut features = Features {
            fractional_duration: segment
                .inf
                .as_ref()
                .map_or(false, |inf| inf.duration.fract() != 0.0),
            byterange: segment.byterange.is_some(),
            map: segment.map.is_some(),
            i_frames_only,
            ..Default::default()
        };
        for key in &segment.keys {
            features.key_iv |= key.iv.is_some();
            features.key_format |= key.key_format.is_some() || key.key_format_versions.is_some();
        }
        features
    }
}

struct Rule {
    tag: &'static str,
    applies: fn(&Features) -> bool,
    min_version: u32,
    max_version: u32,
}

const RULES: &[Rule] = &[
    Rule {
        tag: EXT_X_KEY,
        applies: |f: &Features| f.key_iv,
        min_version: 2,
        max_version: u32::MAX,
    },
    Rule {
        tag: EXTINF,
        applies: |f: &Features| f.fractional_duration,
        min_version: 3,
        max_version: u32::MAX,
    },
    Rule {
        tag: EXT_X_BYTERANGE,
        applies: |f: &Features| f.byterange,
        min_version: 4,
        max_version: u32::MAX,
    },
    Rule {
        tag: EXT_X_I_FRAMES_ONLY,
        applies: |f: &Features| f.i_frames_only,
        min_version: 4,
        max_version: u32::MAX,
    },
    Rule {
        tag: EXT_X_KEY,
        applies: |f: &Features| f.key_format,
        min_version: 5,
        max_version: u32::MAX,
    },
    Rule {
        tag: EXT_X_MAP,
        applies: |f: &Features| f.map,
        min_version: 5,
        max_version: u32::MAX,
    },
    Rule {
        tag: EXT_X_MAP,
        applies: |f: &Features| f.map && !f.i_frames_only,
        min_version: 6,
        max_version: u32::MAX,
    },
    Rule {
        tag: EXT_X_MEDIA,
        applies: |f: &Features| f.service_instream_id,
        min_version: 7,
        max_version: u32::MAX,
    },
    Rule {
        tag: EXT_X_STREAM_INF,
        applies: |f: &Features| f.program_id,
        min_version: 1,
        max_version: 5,
    },
    Rule {
        tag: EXT_X_ALLOW_CACHE,
        applies: |f: &Features| f.allow_cache,
        min_version: 1,
        max_version: 6,
    },
];

/// Check that `version` can carry every feature in `features`.
pub fn check(version: u32, features: &Features) -> Result<()> {
    for rule in RULES {
        if (rule.applies)(features)
            && (version < rule.min_version || version > rule.max_version)
        {
            tracing::debug!(tag = rule.tag, version, "version compatibility violation");
            return Err(PlaylistError::Compatibility {
                tag: rule.tag,
                version,
            });
        }
    }
    Ok(())
}

/// Check a whole media playlist: header first, then every segment.
pub fn check_media(playlist: &MediaPlaylist) -> Result<()> {
    let version = playlist.effective_version();
    check(version, &Features::for_media_header(playlist))?;
    for segment in &playlist.segments {
        check(version, &Features::for_segment(segment, playlist.i_frames_only))?;
    }
    Ok(())
}

/// Check a whole master playlist.
pub fn check_master(playlist: &MasterPlaylist) -> Result<()> {
    check(playlist.effective_version(), &Features::for_master(playlist))
}
