//! Integration testing module
//!
//! End-to-end tests for the playlist codec:
//! - Fixture playlists parsed, encoded and parsed again
//! - Structural checks on encoder output
//! - Version compatibility failures

pub mod validation;
