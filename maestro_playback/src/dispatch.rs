//! The finger-count → playback-command table.
//!
//! Applied once per frame in which a hand was classified. There is no
//! multi-step protocol here — each command reads and writes the
//! [`PlaybackState`] and pokes the [`PlaybackService`], and the next frame
//! starts from scratch.

use tracing::{debug, warn};

use crate::error::PlaybackError;
use crate::library::TrackLibrary;
use crate::service::PlaybackService;
use crate::state::{PlaybackState, NO_TRACK, VOLUME_STEP};

// ════════════════════════════════════════════════════════════════════════════
// Command
// ════════════════════════════════════════════════════════════════════════════

/// One playback command.
///
/// The first six variants are the finger-count rows; [`Command::Pause`] and
/// [`Command::Resume`] are reachable only from the UI keys, and
/// [`Command::Stop`] is reachable only from the UI in practice because the
/// classifier never counts the thumb and so never reports five.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Mute,
    PlayCurrent,
    VolumeDown,
    NextTrack,
    VolumeUp,
    Stop,
    Pause,
    Resume,
}

impl Command {
    /// Map a finger count to its command. Total over the documented `[0, 5]`
    /// vocabulary; anything larger is no command at all.
    pub fn from_count(count: u8) -> Option<Command> {
        match count {
            0 => Some(Command::Mute),
            1 => Some(Command::PlayCurrent),
            2 => Some(Command::VolumeDown),
            3 => Some(Command::NextTrack),
            4 => Some(Command::VolumeUp),
            5 => Some(Command::Stop),
            _ => None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// dispatch / apply
// ════════════════════════════════════════════════════════════════════════════

/// Dispatch one classified finger count.
///
/// Service failures never propagate: they are converted into an
/// `"Error: …"` status so the frame loop keeps running. Returns the status
/// line, which is also stored in `state.status`.
pub fn dispatch(
    count: u8,
    state: &mut PlaybackState,
    library: &TrackLibrary,
    service: &mut dyn PlaybackService,
) -> String {
    match Command::from_count(count) {
        Some(command) => apply(command, state, library, service),
        None => {
            debug!(count, "finger count outside the command vocabulary");
            state.status.clone()
        }
    }
}

/// Apply one command to the state and the audio service.
pub fn apply(
    command: Command,
    state: &mut PlaybackState,
    library: &TrackLibrary,
    service: &mut dyn PlaybackService,
) -> String {
    let outcome = match command {
        // Device volume only — the stored volume keeps its pre-mute value,
        // so a later volume up/down resumes from there.
        Command::Mute => service.set_volume(0.0).map(|_| "Muted".to_string()),

        Command::PlayCurrent => play_current(state, library, service),

        Command::VolumeDown => {
            state.set_volume(state.volume() - VOLUME_STEP);
            service
                .set_volume(state.volume())
                .map(|_| format!("Volume Down: {}%", state.volume_percent()))
        }

        Command::NextTrack => {
            state.advance_track(library.len());
            play_current(state, library, service)
        }

        Command::VolumeUp => {
            state.set_volume(state.volume() + VOLUME_STEP);
            service
                .set_volume(state.volume())
                .map(|_| format!("Volume Up: {}%", state.volume_percent()))
        }

        Command::Stop => service.stop().map(|_| {
            state.current_track = NO_TRACK.to_string();
            "Stopped".to_string()
        }),

        Command::Pause => service.pause().map(|_| "Paused".to_string()),

        Command::Resume => service.unpause().map(|_| "Resumed".to_string()),
    };

    state.status = match outcome {
        Ok(status) => status,
        Err(e) => {
            warn!(?command, error = %e, "playback command failed");
            format!("Error: {e}")
        }
    };
    state.status.clone()
}

/// Load and start the track at the current index. The track name only
/// becomes "current" once the service accepted it.
fn play_current(
    state: &mut PlaybackState,
    library: &TrackLibrary,
    service: &mut dyn PlaybackService,
) -> Result<String, PlaybackError> {
    let index = state.track_index();
    service.load(library.path(index))?;
    service.play()?;
    state.current_track = library.name(index);
    Ok(format!("Playing: {}", state.current_track))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    /// Records every call; `fail_play` injects a failure into `play()`.
    #[derive(Default)]
    struct MockService {
        calls: Vec<String>,
        device_volumes: Vec<f32>,
        fail_play: Option<String>,
    }

    impl PlaybackService for MockService {
        fn load(&mut self, track: &Path) -> Result<(), PlaybackError> {
            self.calls.push(format!("load {}", track.display()));
            Ok(())
        }
        fn play(&mut self) -> Result<(), PlaybackError> {
            self.calls.push("play".to_string());
            match &self.fail_play {
                Some(reason) => Err(PlaybackError::Device(reason.clone())),
                None => Ok(()),
            }
        }
        fn pause(&mut self) -> Result<(), PlaybackError> {
            self.calls.push("pause".to_string());
            Ok(())
        }
        fn unpause(&mut self) -> Result<(), PlaybackError> {
            self.calls.push("unpause".to_string());
            Ok(())
        }
        fn stop(&mut self) -> Result<(), PlaybackError> {
            self.calls.push("stop".to_string());
            Ok(())
        }
        fn set_volume(&mut self, volume: f32) -> Result<(), PlaybackError> {
            self.calls.push(format!("set_volume {volume:.1}"));
            self.device_volumes.push(volume);
            Ok(())
        }
    }

    fn three_tracks() -> TrackLibrary {
        TrackLibrary::from_paths(vec![
            PathBuf::from("songs/alpha.mp3"),
            PathBuf::from("songs/bravo.mp3"),
            PathBuf::from("songs/charlie.mp3"),
        ])
        .unwrap()
    }

    #[test]
    fn every_count_in_vocabulary_has_a_command() {
        for count in 0..=5u8 {
            assert!(Command::from_count(count).is_some(), "count {count}");
        }
        assert_eq!(Command::from_count(6), None);
    }

    #[test]
    fn mute_zeroes_device_but_not_stored_volume() {
        let lib = three_tracks();
        let mut state = PlaybackState::new();
        let mut svc = MockService::default();

        let status = dispatch(0, &mut state, &lib, &mut svc);
        assert_eq!(status, "Muted");
        assert_eq!(svc.device_volumes, vec![0.0]);
        assert_eq!(state.volume(), 0.5);
    }

    #[test]
    fn mute_is_idempotent() {
        let lib = three_tracks();
        let mut state = PlaybackState::new();
        let mut svc = MockService::default();

        for _ in 0..3 {
            dispatch(0, &mut state, &lib, &mut svc);
            assert_eq!(state.status, "Muted");
            assert_eq!(state.volume(), 0.5);
        }
    }

    #[test]
    fn volume_up_after_mute_resumes_from_stored_value() {
        let lib = three_tracks();
        let mut state = PlaybackState::new();
        let mut svc = MockService::default();

        dispatch(0, &mut state, &lib, &mut svc);
        let status = dispatch(4, &mut state, &lib, &mut svc);
        assert_eq!(status, "Volume Up: 60%");
        assert_eq!(svc.device_volumes[0], 0.0);
        assert!((svc.device_volumes[1] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn play_loads_and_plays_current_track() {
        let lib = three_tracks();
        let mut state = PlaybackState::new();
        let mut svc = MockService::default();

        let status = dispatch(1, &mut state, &lib, &mut svc);
        assert_eq!(status, "Playing: alpha.mp3");
        assert_eq!(state.current_track, "alpha.mp3");
        assert_eq!(svc.calls, vec!["load songs/alpha.mp3", "play"]);
    }

    #[test]
    fn volume_down_clamps_at_zero() {
        let lib = three_tracks();
        let mut state = PlaybackState::new();
        state.set_volume(0.05);
        let mut svc = MockService::default();

        let status = dispatch(2, &mut state, &lib, &mut svc);
        assert_eq!(state.volume(), 0.0);
        assert_eq!(status, "Volume Down: 0%");
    }

    #[test]
    fn volume_up_clamps_at_one() {
        let lib = three_tracks();
        let mut state = PlaybackState::new();
        state.set_volume(0.95);
        let mut svc = MockService::default();

        let status = dispatch(4, &mut state, &lib, &mut svc);
        assert_eq!(state.volume(), 1.0);
        assert_eq!(status, "Volume Up: 100%");
    }

    #[test]
    fn next_track_wraps_to_first() {
        let lib = three_tracks();
        let mut state = PlaybackState::new();
        state.advance_track(lib.len());
        state.advance_track(lib.len());
        assert_eq!(state.track_index(), 2);
        let mut svc = MockService::default();

        dispatch(3, &mut state, &lib, &mut svc);
        assert_eq!(state.track_index(), 0);
        assert_eq!(state.status, "Playing: alpha.mp3");
    }

    #[test]
    fn stop_clears_current_track() {
        let lib = three_tracks();
        let mut state = PlaybackState::new();
        let mut svc = MockService::default();

        dispatch(1, &mut state, &lib, &mut svc);
        let status = dispatch(5, &mut state, &lib, &mut svc);
        assert_eq!(status, "Stopped");
        assert_eq!(state.current_track, NO_TRACK);
        assert_eq!(svc.calls.last().unwrap(), "stop");
    }

    #[test]
    fn play_failure_becomes_status_and_leaves_state_alone() {
        let lib = three_tracks();
        let mut state = PlaybackState::new();
        let mut svc = MockService {
            fail_play: Some("disk full".to_string()),
            ..MockService::default()
        };

        let status = dispatch(1, &mut state, &lib, &mut svc);
        assert!(status.starts_with("Error:"), "got {status:?}");
        assert!(status.contains("disk full"));
        assert_eq!(state.track_index(), 0);
        assert_eq!(state.volume(), 0.5);
        assert_eq!(state.current_track, NO_TRACK);
    }

    #[test]
    fn count_above_vocabulary_is_a_no_op() {
        let lib = three_tracks();
        let mut state = PlaybackState::new();
        let mut svc = MockService::default();

        let status = dispatch(7, &mut state, &lib, &mut svc);
        assert_eq!(status, "Ready");
        assert!(svc.calls.is_empty());
    }

    #[test]
    fn pause_and_resume_reach_the_service() {
        let lib = three_tracks();
        let mut state = PlaybackState::new();
        let mut svc = MockService::default();

        apply(Command::Pause, &mut state, &lib, &mut svc);
        assert_eq!(state.status, "Paused");
        apply(Command::Resume, &mut state, &lib, &mut svc);
        assert_eq!(state.status, "Resumed");
        assert_eq!(svc.calls, vec!["pause", "unpause"]);
    }

    #[test]
    fn next_next_play_lands_on_third_track() {
        // Finger sequence [3, 3, 1] starting at index 0.
        let lib = three_tracks();
        let mut state = PlaybackState::new();
        let mut svc = MockService::default();

        for count in [3, 3, 1] {
            dispatch(count, &mut state, &lib, &mut svc);
        }
        assert_eq!(state.track_index(), 2);
        assert_eq!(state.status, "Playing: charlie.mp3");
    }
}
