//! The per-frame application loop.
//!
//! [`App`] owns the [`PlaybackState`], the [`TrackLibrary`] and the audio
//! service — exactly one logical thread touches any of them. Each loop
//! iteration drains source events, classifies and dispatches any hands,
//! and hands the updated state to the visualizer.

use std::path::PathBuf;
use std::sync::mpsc::{self, TryRecvError};

use anyhow::anyhow;
use tracing::{debug, info, warn};

use hand_vision::classify;
use maestro_playback::{
    apply, dispatch, Command, NullPlayer, PlaybackService, PlaybackState, RodioPlayer,
    TrackLibrary,
};

use crate::hand_source::{spawn_hand_source, SimHandSource, SourceEvent};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
pub struct AppConfig {
    /// Directory scanned for tracks at startup.
    pub track_dir: PathBuf,
    /// Stored volume at launch, clamped into `[0, 1]`.
    pub initial_volume: f32,
    /// Use the null audio backend instead of a real device.
    pub silent: bool,
    /// Command line for the external hand-tracker process. Only consulted
    /// when built with the `mediapipe` feature.
    pub detector_command: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            track_dir: PathBuf::from("songs"),
            initial_volume: 0.5,
            silent: false,
            detector_command: None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// App
// ════════════════════════════════════════════════════════════════════════════

pub struct App {
    library: TrackLibrary,
    service: Box<dyn PlaybackService>,
    state: PlaybackState,
    last_fingers: Option<u8>,
    running: bool,
}

impl App {
    pub fn new(library: TrackLibrary, mut service: Box<dyn PlaybackService>, volume: f32) -> Self {
        let mut state = PlaybackState::new();
        state.set_volume(volume);
        if let Err(e) = service.set_volume(state.volume()) {
            warn!(error = %e, "could not push initial volume");
        }
        App {
            library,
            service,
            state,
            last_fingers: None,
            running: true,
        }
    }

    /// Process one source event. Returns false once a quit was seen.
    pub fn handle_event(&mut self, event: SourceEvent) -> bool {
        match event {
            SourceEvent::Hand(frame) => match classify(&frame.landmarks) {
                Ok(count) => {
                    self.last_fingers = Some(count);
                    dispatch(count, &mut self.state, &self.library, self.service.as_mut());
                }
                // Defensive: a conforming source never sends these.
                Err(e) => debug!(error = %e, "skipping invalid landmark set"),
            },
            SourceEvent::Pause => {
                apply(
                    Command::Pause,
                    &mut self.state,
                    &self.library,
                    self.service.as_mut(),
                );
            }
            SourceEvent::Resume => {
                apply(
                    Command::Resume,
                    &mut self.state,
                    &self.library,
                    self.service.as_mut(),
                );
            }
            SourceEvent::Stop => {
                apply(
                    Command::Stop,
                    &mut self.state,
                    &self.library,
                    self.service.as_mut(),
                );
            }
            SourceEvent::Quit => self.running = false,
        }
        self.running
    }

    /// Best-effort stop on the way out.
    pub fn shutdown(&mut self) {
        if let Err(e) = self.service.stop() {
            warn!(error = %e, "stop on shutdown failed");
        }
        info!("playback stopped");
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Finger count of the most recent classified hand, for display.
    pub fn last_fingers(&self) -> Option<u8> {
        self.last_fingers
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application: scan tracks, open the audio device, spawn the
/// hand sources, then drive the event/render loop until quit.
pub fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let library = TrackLibrary::scan(&cfg.track_dir)?;
    info!(tracks = library.len(), dir = %cfg.track_dir.display(), "track library loaded");

    // The audio device is an exclusively-owned singleton: opened here,
    // released when the player drops at the end of this function.
    let service: Box<dyn PlaybackService> = if cfg.silent {
        info!("silent mode: null audio backend");
        Box::new(NullPlayer)
    } else {
        Box::new(RodioPlayer::open()?)
    };

    // ── Hand sources ──────────────────────────────────────────────────────
    let (event_tx, event_rx) = mpsc::channel::<SourceEvent>();
    let (sim_tx, sim_rx) = mpsc::channel();
    spawn_hand_source(SimHandSource { rx: sim_rx }, event_tx.clone());

    #[cfg(feature = "mediapipe")]
    if let Some(command) = &cfg.detector_command {
        use anyhow::Context;
        let source = crate::hand_source::MediaPipeSource::spawn(command)
            .with_context(|| format!("starting hand tracker `{command}`"))?;
        spawn_hand_source(source, event_tx.clone());
    }
    #[cfg(not(feature = "mediapipe"))]
    if cfg.detector_command.is_some() {
        warn!("built without the `mediapipe` feature; detector command ignored");
    }
    drop(event_tx);

    // ── Window (owns the sim input sender) ────────────────────────────────
    let mut vis = Visualizer::new(sim_tx).map_err(|e| anyhow!("cannot open window: {e}"))?;

    let mut app = App::new(library, service, cfg.initial_volume);

    // ── Frame loop ────────────────────────────────────────────────────────
    while vis.is_open() && app.is_running() {
        if !vis.poll_input() {
            break;
        }

        loop {
            match event_rx.try_recv() {
                Ok(event) => {
                    if !app.handle_event(event) {
                        break;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // All sources gone — the frame supply dried up.
                    warn!("hand sources disconnected; leaving frame loop");
                    app.shutdown();
                    return Ok(());
                }
            }
        }

        vis.render(app.state(), app.last_fingers());
    }

    app.shutdown();
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    use hand_vision::synthetic_hand;

    fn make_app() -> App {
        let library = TrackLibrary::from_paths(vec![
            PathBuf::from("songs/one.mp3"),
            PathBuf::from("songs/two.mp3"),
            PathBuf::from("songs/three.mp3"),
        ])
        .unwrap();
        App::new(library, Box::new(NullPlayer), 0.5)
    }

    #[test]
    fn hand_events_drive_the_dispatcher() {
        // Finger sequence [3, 3, 1] lands on the third track, playing.
        let mut app = make_app();
        for count in [3, 3, 1] {
            app.handle_event(SourceEvent::Hand(synthetic_hand(count)));
        }
        assert_eq!(app.state().track_index(), 2);
        assert_eq!(app.state().status, "Playing: three.mp3");
        assert_eq!(app.last_fingers(), Some(1));
    }

    #[test]
    fn fist_mutes_without_touching_stored_volume() {
        let mut app = make_app();
        app.handle_event(SourceEvent::Hand(synthetic_hand(0)));
        assert_eq!(app.state().status, "Muted");
        assert_eq!(app.state().volume(), 0.5);
    }

    #[test]
    fn ui_stop_clears_current_track() {
        let mut app = make_app();
        app.handle_event(SourceEvent::Hand(synthetic_hand(1)));
        assert_eq!(app.state().current_track, "one.mp3");
        app.handle_event(SourceEvent::Stop);
        assert_eq!(app.state().status, "Stopped");
        assert_eq!(app.state().current_track, maestro_playback::NO_TRACK);
    }

    #[test]
    fn ui_pause_and_resume_update_status() {
        let mut app = make_app();
        app.handle_event(SourceEvent::Pause);
        assert_eq!(app.state().status, "Paused");
        app.handle_event(SourceEvent::Resume);
        assert_eq!(app.state().status, "Resumed");
    }

    #[test]
    fn quit_event_stops_the_loop() {
        let mut app = make_app();
        assert!(app.is_running());
        assert!(!app.handle_event(SourceEvent::Quit));
        assert!(!app.is_running());
    }

    #[test]
    fn initial_volume_is_clamped() {
        let library = TrackLibrary::from_paths(vec![PathBuf::from("a.mp3")]).unwrap();
        let app = App::new(library, Box::new(NullPlayer), 7.0);
        assert_eq!(app.state().volume(), 1.0);
    }
}
