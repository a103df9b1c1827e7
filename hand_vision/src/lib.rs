//! # hand_vision
//!
//! Types for a single detected hand — 21 normalized landmarks laid out per
//! the MediaPipe hand-landmark convention — and the extended-finger
//! classifier that turns one landmark set into a finger count.
//!
//! ## Finger counting
//!
//! A finger is counted as extended iff its tip landmark sits strictly
//! *above* its proximal joint on screen (smaller `y`, assuming an upright
//! hand with fingers pointing up):
//!
//! | Finger | Tip | PIP joint |
//! |---|---|---|
//! | Index  | 8  | 6  |
//! | Middle | 12 | 10 |
//! | Ring   | 16 | 14 |
//! | Pinky  | 20 | 18 |
//!
//! The thumb is deliberately not evaluated, so [`classify`] returns 0–4.
//! This is a known limitation of the tip-above-joint heuristic (the thumb
//! extends sideways, not upward), kept rather than papered over.

pub mod classifier;
pub mod landmark;

pub use classifier::{classify, synthetic_hand, ClassifyError, FingerCount};
pub use landmark::{topology, HandFrame, Landmark, HAND_LANDMARK_COUNT};
