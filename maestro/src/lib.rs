//! # maestro
//!
//! Hand-gesture music controller. Each frame, a hand source delivers a
//! 21-point landmark set; the classifier counts extended fingers; the
//! dispatcher maps the count to a playback command.
//!
//! ## Gesture → command mapping
//!
//! | Fingers | Gesture | Command |
//! |---|---|---|
//! | 0 | Fist | Mute (device only — stored volume survives) |
//! | 1 | One finger | Play current track |
//! | 2 | Two fingers | Volume down 10% |
//! | 3 | Three fingers | Next track (wraps), then play |
//! | 4 | Four fingers | Volume up 10% |
//!
//! "Open palm = stop" is advertised but unreachable: the classifier never
//! counts the thumb, so stop lives on a key instead.
//!
//! ## Modes
//!
//! * (default) — **Simulation**: number keys synthesize a hand with that
//!   many fingers extended and push it through the real classify → dispatch
//!   path. No camera or model needed.
//! * `mediapipe` — **Camera**: a helper process owns the webcam and streams
//!   landmark sets as JSON lines on stdout.
//!
//! ### Keys
//!
//! | Key | Effect |
//! |---|---|
//! | `0`–`4` (hold) | Simulated hand with that finger count |
//! | `P` | Pause music |
//! | `R` | Resume music |
//! | `X` | Stop music |
//! | `Q` | Quit |

pub mod app;
pub mod hand_source;
pub mod visualizer;
