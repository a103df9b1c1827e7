//! Hand landmark data model.
//!
//! A detector (real or simulated) delivers one [`HandFrame`] per video frame
//! in which a hand was found: 21 normalized keypoints indexed per the
//! MediaPipe hand topology. Frames are produced fresh each iteration and
//! discarded after classification.

/// Number of landmarks in a complete hand set.
pub const HAND_LANDMARK_COUNT: usize = 21;

/// A single normalized hand keypoint.
///
/// `x` and `y` are typically in `[0, 1]` (fractions of the image), `z` is
/// depth relative to the wrist. The classifier only compares `y` values and
/// tolerates any coordinate range.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }
}

/// All 21 landmarks of one detected hand.
#[derive(Clone, Debug, PartialEq)]
pub struct HandFrame {
    pub landmarks: [Landmark; HAND_LANDMARK_COUNT],
}

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices (MediaPipe hand-landmark convention)
// ════════════════════════════════════════════════════════════════════════════

/// Named indices into a [`HandFrame`], per the standard 21-point layout.
///
/// See <https://google.github.io/mediapipe/solutions/hands.html>.
pub mod topology {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}
