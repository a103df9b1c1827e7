//! Hand frame acquisition — simulated from the keyboard, or real via a
//! MediaPipe helper process.
//!
//! The public interface is [`SourceEvent`] delivered over an `mpsc`
//! channel. The frame loop doesn't care whether a landmark set came from a
//! webcam or a number key; both run through the same classifier.

use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use hand_vision::{synthetic_hand, HandFrame};

// ════════════════════════════════════════════════════════════════════════════
// SourceEvent
// ════════════════════════════════════════════════════════════════════════════

/// What a source (or the UI) feeds into the frame loop.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceEvent {
    /// One detected (or simulated) hand, 21 landmarks, classified by the
    /// frame loop.
    Hand(HandFrame),
    /// UI request: pause playback.
    Pause,
    /// UI request: resume paused playback.
    Resume,
    /// UI request: stop playback. The only practical route to stop, since
    /// the classifier tops out at four fingers.
    Stop,
    /// Leave the frame loop.
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// HandSource trait — unified interface for sim and camera
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`SourceEvent`]s over a channel.
pub trait HandSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<SourceEvent>);
}

/// Spawn a source on its own thread, feeding the given sender.
///
/// The source thread never touches playback state; it only produces
/// events, so the frame loop remains the single owner of the state.
pub fn spawn_hand_source<S: HandSource>(source: S, tx: Sender<SourceEvent>) {
    thread::spawn(move || Box::new(source).run(tx));
}

// ════════════════════════════════════════════════════════════════════════════
// SimHandSource — keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimInput {
    KeyDown(SimKey),
}

/// Simulated key codes (mapped from minifb keys by the visualizer).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    /// Show a hand with this many fingers extended (0–4).
    Fingers(u8),
    Pause,  // P
    Resume, // R
    Stop,   // X
    Quit,   // Q
}

/// Source driven by [`SimInput`] events from the visualizer's window.
///
/// Number keys become synthetic landmark sets, so the classifier stays in
/// the loop even without a camera. This translator sits between the window
/// event loop and the gesture pipeline.
pub struct SimHandSource {
    pub rx: Receiver<SimInput>,
}

impl HandSource for SimHandSource {
    fn run(self: Box<Self>, tx: Sender<SourceEvent>) {
        for input in self.rx {
            let event = match input {
                SimInput::KeyDown(SimKey::Fingers(k)) => SourceEvent::Hand(synthetic_hand(k)),
                SimInput::KeyDown(SimKey::Pause) => SourceEvent::Pause,
                SimInput::KeyDown(SimKey::Resume) => SourceEvent::Resume,
                SimInput::KeyDown(SimKey::Stop) => SourceEvent::Stop,
                SimInput::KeyDown(SimKey::Quit) => {
                    let _ = tx.send(SourceEvent::Quit);
                    return;
                }
            };
            if tx.send(event).is_err() {
                return;
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// MediaPipeSource — webcam hand tracking (feature = "mediapipe")
// ════════════════════════════════════════════════════════════════════════════

/// Source backed by a MediaPipe helper process.
///
/// The helper owns the webcam and the landmark model and prints one JSON
/// line per frame in which it saw a hand:
///
/// ```json
/// {"landmarks": [[0.51, 0.83, 0.0], … 21 entries …]}
/// ```
///
/// Frames with a malformed line or the wrong landmark count are dropped;
/// helper exit ends the stream, which the frame loop treats as a
/// frame-acquisition failure and shuts down gracefully.
#[cfg(feature = "mediapipe")]
pub struct MediaPipeSource {
    child: std::process::Child,
}

#[cfg(feature = "mediapipe")]
impl MediaPipeSource {
    /// Spawn the helper. `command` is typically
    /// `python3 tools/hand_stream.py`.
    pub fn spawn(command: &str) -> std::io::Result<Self> {
        use std::process::{Command, Stdio};

        let mut parts = command.split_whitespace();
        let program = parts.next().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty detector command")
        })?;
        let child = Command::new(program)
            .args(parts)
            .stdout(Stdio::piped())
            .stdin(Stdio::null())
            .spawn()?;
        tracing::info!(command, "hand tracker process started");
        Ok(MediaPipeSource { child })
    }
}

#[cfg(feature = "mediapipe")]
impl HandSource for MediaPipeSource {
    fn run(mut self: Box<Self>, tx: Sender<SourceEvent>) {
        use std::io::{BufRead, BufReader};

        use hand_vision::{Landmark, HAND_LANDMARK_COUNT};

        #[derive(serde::Deserialize)]
        struct WireHand {
            landmarks: Vec<[f32; 3]>,
        }

        let stdout = match self.child.stdout.take() {
            Some(out) => out,
            None => return,
        };

        for line in BufReader::new(stdout).lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(error = %e, "hand tracker stream read failed");
                    break;
                }
            };
            let wire: WireHand = match serde_json::from_str(&line) {
                Ok(wire) => wire,
                Err(e) => {
                    tracing::debug!(error = %e, "dropping malformed tracker line");
                    continue;
                }
            };
            if wire.landmarks.len() != HAND_LANDMARK_COUNT {
                tracing::debug!(got = wire.landmarks.len(), "dropping short landmark set");
                continue;
            }

            let mut landmarks = [Landmark::default(); HAND_LANDMARK_COUNT];
            for (lm, [x, y, z]) in landmarks.iter_mut().zip(wire.landmarks) {
                *lm = Landmark::new(x, y, z);
            }
            if tx.send(SourceEvent::Hand(HandFrame { landmarks })).is_err() {
                return;
            }
        }
        tracing::warn!("hand tracker stream ended");
        // Dropping `tx` disconnects the channel; the frame loop exits.
    }
}

#[cfg(feature = "mediapipe")]
impl Drop for MediaPipeSource {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
