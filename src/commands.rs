//! Subcommand implementations
//!
//! Each command reads one playlist, works on the library model and writes
//! its result to the given writer. Diagnostics go through tracing.

use std::io::{Read, Write};
use std::path::Path;

use hls_playlist_lib::{detect_kind, MasterPlaylist, MediaPlaylist, Playlist, PlaylistKind};

use crate::config::ToolConfig;
use crate::error::{Result, ToolError};
use crate::{InputArgs, KindArg};

fn read_input(path: &Path) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    if path == Path::new("-") {
        std::io::stdin().lock().read_to_end(&mut data)?;
    } else {
        data = std::fs::read(path)?;
    }
    Ok(data)
}

fn parse_as(data: &[u8], kind: PlaylistKind) -> Result<Playlist> {
    let playlist = match kind {
        PlaylistKind::Master => Playlist::Master(MasterPlaylist::parse(data)?),
        PlaylistKind::Media => Playlist::Media(MediaPlaylist::parse(data)?),
    };
    Ok(playlist)
}

/// Read and parse the input playlist.
pub fn load(args: &InputArgs) -> Result<Playlist> {
    let data = read_input(&args.input)?;
    let kind = match args.kind {
        KindArg::Master => PlaylistKind::Master,
        KindArg::Media => PlaylistKind::Media,
        KindArg::Auto => detect_kind(&data)?,
    };
    tracing::debug!(input = %args.input.display(), ?kind, bytes = data.len(), "loading playlist");
    parse_as(&data, kind)
}

pub fn parse<W: Write>(args: &InputArgs, out: &mut W) -> Result<()> {
    let playlist = load(args)?;
    serde_json::to_writer_pretty(&mut *out, &playlist)?;
    writeln!(out)?;
    Ok(())
}

pub fn validate<W: Write>(args: &InputArgs, config: &ToolConfig, out: &mut W) -> Result<()> {
    let playlist = load(args)?;
    let encoded = playlist.encode()?;
    if config.strict_roundtrip && parse_as(&encoded, playlist.kind())? != playlist {
        return Err(ToolError::RoundTrip);
    }
    let summary = match &playlist {
        Playlist::Master(p) => format!(
            "master playlist, version {}, {} variants, {} renditions",
            p.effective_version(),
            p.variants.len(),
            p.renditions.len()
        ),
        Playlist::Media(p) => format!(
            "media playlist, version {}, {} segments, {:.3}s",
            p.effective_version(),
            p.segments.len(),
            p.duration()
        ),
    };
    writeln!(out, "{}: valid {}", args.input.display(), summary)?;
    Ok(())
}

pub fn encode<W: Write>(args: &InputArgs, out: &mut W) -> Result<()> {
    let playlist = load(args)?;
    out.write_all(&playlist.encode()?)?;
    Ok(())
}

pub fn resolve<W: Write>(args: &InputArgs, base: Option<String>, out: &mut W) -> Result<()> {
    let mut playlist = load(args)?;
    if let Some(base) = base {
        playlist.set_uri(base);
    }
    for resource in playlist.resources()? {
        writeln!(out, "{:?}\t{}", resource.kind, resource.url)?;
    }
    Ok(())
}
