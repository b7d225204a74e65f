//! Playlist text validation utilities
//!
//! Line-level checks on encoder output that do not go through the parser.

/// Validate master playlist structure
pub fn validate_master_playlist(content: &str) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    check_header(content, &mut errors);

    if !content.contains("#EXT-X-STREAM-INF") && !content.contains("#EXT-X-I-FRAME-STREAM-INF") {
        errors.push("No stream variants found".to_string());
    }
    if content.contains("#EXTINF") || content.contains("#EXT-X-TARGETDURATION") {
        errors.push("Media playlist tags in master playlist".to_string());
    }

    let lines: Vec<&str> = content.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        if line.starts_with("#EXT-X-MEDIA:") {
            for attr in ["TYPE=", "GROUP-ID=", "NAME="] {
                if !line.contains(attr) {
                    errors.push(format!("EXT-X-MEDIA missing {}", attr.trim_end_matches('=')));
                }
            }
            if line.contains("TYPE=SUBTITLES") && !line.contains("URI=") {
                errors.push("SUBTITLES entry missing URI".to_string());
            }
            if line.contains("TYPE=CLOSED-CAPTIONS") && line.contains("URI=") {
                errors.push("CLOSED-CAPTIONS entry must not have URI".to_string());
            }
        }

        if line.starts_with("#EXT-X-STREAM-INF:") {
            if !line.contains("BANDWIDTH=") {
                errors.push("STREAM-INF missing BANDWIDTH".to_string());
            }
            match lines.get(i + 1) {
                Some(next) if !next.is_empty() && !next.starts_with('#') => {}
                _ => errors.push("STREAM-INF not followed by a URI line".to_string()),
            }
        }

        if line.starts_with("#EXT-X-I-FRAME-STREAM-INF:") && !line.contains("URI=") {
            errors.push("I-FRAME-STREAM-INF missing URI".to_string());
        }

        if line.starts_with("#EXT-X-STREAM-INF:") && !line.contains("CODECS=") {
            warnings.push("STREAM-INF without CODECS".to_string());
        }
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

/// Validate media playlist structure
pub fn validate_media_playlist(content: &str) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    check_header(content, &mut errors);

    let mut target_duration = None;
    for line in content.lines() {
        if let Some(value) = line.strip_prefix("#EXT-X-TARGETDURATION:") {
            match value.trim().parse::<u64>() {
                Ok(v) => target_duration = Some(v),
                Err(_) => errors.push(format!("Invalid target duration: {}", value)),
            }
        }
    }
    let target_duration = match target_duration {
        Some(v) => v,
        None => {
            errors.push("Missing #EXT-X-TARGETDURATION".to_string());
            0
        }
    };

    let mut segments = 0;
    let mut pending_inf = false;
    for line in content.lines() {
        if let Some(value) = line.strip_prefix("#EXTINF:") {
            pending_inf = true;
            let duration = value.split(',').next().unwrap_or_default();
            match duration.parse::<f64>() {
                Ok(d) if d.round() as u64 > target_duration => {
                    errors.push(format!("Segment duration {} exceeds target duration", d));
                }
                Ok(_) => {}
                Err(_) => errors.push(format!("Invalid segment duration: {}", duration)),
            }
        } else if !line.is_empty() && !line.starts_with('#') {
            if !pending_inf {
                errors.push(format!("Segment {} has no #EXTINF", line));
            }
            pending_inf = false;
            segments += 1;
        }
    }

    if segments == 0 {
        errors.push("No segments found".to_string());
    }
    if !content.contains("#EXT-X-ENDLIST") {
        warnings.push("Playlist is not terminated with #EXT-X-ENDLIST".to_string());
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

fn check_header(content: &str, errors: &mut Vec<String>) {
    if !content.starts_with("#EXTM3U\n") {
        errors.push("Missing #EXTM3U header".to_string());
    }
    match content.lines().nth(1) {
        Some(line) if line.starts_with("#EXT-X-VERSION:") => {
            if line["#EXT-X-VERSION:".len()..].parse::<u32>().is_err() {
                errors.push(format!("Invalid version line: {}", line));
            }
        }
        _ => errors.push("Missing #EXT-X-VERSION tag after header".to_string()),
    }
    if !content.ends_with('\n') {
        errors.push("Playlist does not end with a newline".to_string());
    }
}

#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![error.into()],
            warnings: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_valid_master_playlist() {
        let content = r#"#EXTM3U
#EXT-X-VERSION:4
#EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID="aac",NAME="English",URI="en.m3u8"
#EXT-X-STREAM-INF:BANDWIDTH=1000000,CODECS="avc1.4d401f,mp4a.40.2",AUDIO="aac"
video.m3u8
"#;
        let result = validate_master_playlist(content);
        assert!(result.is_valid, "{:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validate_invalid_master_playlist() {
        let content = "#EXTM3U\n#EXT-X-VERSION:4\n#EXT-X-STREAM-INF:BANDWIDTH=1\n#EXT-X-ENDLIST\n";
        let result = validate_master_playlist(content);
        assert!(!result.is_valid);
        assert!(!result.errors.is_empty());
    }

    #[test]
    fn test_validate_media_playlist() {
        let content = r#"#EXTM3U
#EXT-X-VERSION:7
#EXT-X-TARGETDURATION:6
#EXT-X-MEDIA-SEQUENCE:0
#EXT-X-PLAYLIST-TYPE:VOD
#EXTINF:4.000,
segment_0.m4s
#EXT-X-ENDLIST
"#;
        let result = validate_media_playlist(content);
        assert!(result.is_valid, "{:?}", result.errors);
    }

    #[test]
    fn test_validate_media_playlist_long_segment() {
        let content = "#EXTM3U\n#EXT-X-VERSION:3\n#EXT-X-TARGETDURATION:4\n#EXTINF:6.0,\na.ts\n";
        let result = validate_media_playlist(content);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_validation_result() {
        let success = ValidationResult::success();
        assert!(success.is_valid);
        assert!(success.errors.is_empty());

        let fail = ValidationResult::fail("test error");
        assert!(!fail.is_valid);
        assert_eq!(fail.errors.len(), 1);
    }
}
