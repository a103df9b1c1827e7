//! # maestro_playback
//!
//! Everything between a finger count and an audio device:
//!
//! * [`PlaybackState`] — the per-session mutable record (volume, track
//!   index, status line, current track name), clamped on every mutation.
//! * [`TrackLibrary`] — the ordered, immutable-for-the-session track list
//!   scanned once at startup.
//! * [`PlaybackService`] — the audio collaborator trait, with a
//!   [`RodioPlayer`] backend for real output and a [`NullPlayer`] backend
//!   for silent/headless runs.
//! * [`dispatch()`] — the command table applied once per frame in which a
//!   hand was classified.
//!
//! ## Command table
//!
//! | Fingers | Command | Effect |
//! |---|---|---|
//! | 0 | Mute | device volume → 0, stored volume untouched |
//! | 1 | Play current | load + play the current track |
//! | 2 | Volume down | stored volume −10%, pushed to the device |
//! | 3 | Next track | advance (wrapping), then play |
//! | 4 | Volume up | stored volume +10%, pushed to the device |
//! | 5 | Stop | stop playback, clear the current track |
//!
//! Five fingers is unreachable from the classifier (the thumb is never
//! counted), so Stop is driven from the UI; the row stays in the table to
//! keep it independently testable.

pub mod dispatch;
pub mod error;
pub mod library;
pub mod service;
pub mod state;

pub use dispatch::{apply, dispatch, Command};
pub use error::{PlaybackError, StartupError};
pub use library::TrackLibrary;
pub use service::{NullPlayer, PlaybackService, RodioPlayer};
pub use state::{PlaybackState, NO_TRACK, VOLUME_STEP};
