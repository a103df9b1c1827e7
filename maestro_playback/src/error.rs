//! Error taxonomy.
//!
//! Two tiers: [`StartupError`] is fatal and aborts before the frame loop
//! starts; [`PlaybackError`] is recovered at the dispatch boundary and
//! surfaces only as a status line.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal precondition failures, raised before the frame loop begins.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("no audio tracks found in {dir} (looked for mp3/ogg/wav/flac)")]
    NoTracks { dir: PathBuf },

    #[error("cannot read track directory {dir}: {source}")]
    TrackDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("audio output init failed: {0}")]
    AudioInit(String),
}

/// Recoverable audio-service failures. Callers of [`crate::dispatch()`] never
/// see these; the dispatcher converts them into an `"Error: …"` status.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("audio device unavailable: {0}")]
    Device(String),

    #[error("cannot decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
