//! Extended-finger classification.
//!
//! Pure and stateless: one landmark set in, one finger count out. The app
//! runs this once per frame in which the detector reported a hand.

use thiserror::Error;

use crate::landmark::{topology, HandFrame, Landmark, HAND_LANDMARK_COUNT};

/// Number of non-thumb fingers classified as extended, in `[0, 4]`.
pub type FingerCount = u8;

/// Rejected landmark input.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    /// The detector handed over something other than a complete 21-point set.
    #[error("expected 21 hand landmarks, got {got}")]
    InvalidLandmarkSet { got: usize },
}

/// `(tip, pip)` index pairs for the four counted fingers, in the fixed
/// index → middle → ring → pinky order.
const FINGER_PAIRS: [(usize, usize); 4] = [
    (topology::INDEX_TIP, topology::INDEX_PIP),
    (topology::MIDDLE_TIP, topology::MIDDLE_PIP),
    (topology::RING_TIP, topology::RING_PIP),
    (topology::PINKY_TIP, topology::PINKY_PIP),
];

/// Count the extended non-thumb fingers in one landmark set.
///
/// A finger is extended iff its tip `y` is strictly less than its PIP joint
/// `y` (smaller `y` = higher on screen, upright hand assumed). The thumb is
/// not evaluated, so the result is at most 4 even though the gesture
/// vocabulary advertises an open palm. Coordinates outside `[0, 1]` are
/// accepted as-is; only the landmark count is validated.
pub fn classify(landmarks: &[Landmark]) -> Result<FingerCount, ClassifyError> {
    if landmarks.len() != HAND_LANDMARK_COUNT {
        return Err(ClassifyError::InvalidLandmarkSet {
            got: landmarks.len(),
        });
    }
    let count = FINGER_PAIRS
        .iter()
        .filter(|&&(tip, pip)| landmarks[tip].y < landmarks[pip].y)
        .count();
    Ok(count as FingerCount)
}

/// Build a synthetic hand with exactly the first `extended` of
/// {index, middle, ring, pinky} extended.
///
/// Used by the keyboard-simulation hand source and by tests, so the full
/// classify → dispatch path runs even without a camera. `extended` is
/// capped at 4.
pub fn synthetic_hand(extended: u8) -> HandFrame {
    let mut landmarks = [Landmark::default(); HAND_LANDMARK_COUNT];
    for (i, lm) in landmarks.iter_mut().enumerate() {
        lm.x = i as f32 / (HAND_LANDMARK_COUNT - 1) as f32;
        lm.y = 0.5;
    }
    for (finger, &(tip, _)) in FINGER_PAIRS.iter().enumerate() {
        // Curled tips sit below the joint, extended tips above it.
        landmarks[tip].y = if (finger as u8) < extended { 0.2 } else { 0.8 };
    }
    HandFrame { landmarks }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_counts_round_trip() {
        for k in 0..=4u8 {
            let hand = synthetic_hand(k);
            assert_eq!(classify(&hand.landmarks), Ok(k));
        }
    }

    #[test]
    fn synthetic_extended_is_capped_at_four() {
        let hand = synthetic_hand(9);
        assert_eq!(classify(&hand.landmarks), Ok(4));
    }

    #[test]
    fn too_few_landmarks_rejected() {
        let short = vec![Landmark::default(); 20];
        assert_eq!(
            classify(&short),
            Err(ClassifyError::InvalidLandmarkSet { got: 20 })
        );
    }

    #[test]
    fn too_many_landmarks_rejected() {
        let long = vec![Landmark::default(); 22];
        assert_eq!(
            classify(&long),
            Err(ClassifyError::InvalidLandmarkSet { got: 22 })
        );
    }

    #[test]
    fn thumb_position_is_ignored() {
        let mut hand = synthetic_hand(2);
        // Wave the thumb anywhere; the count must not move.
        hand.landmarks[topology::THUMB_TIP].y = 0.0;
        assert_eq!(classify(&hand.landmarks), Ok(2));
        hand.landmarks[topology::THUMB_TIP].y = 1.0;
        assert_eq!(classify(&hand.landmarks), Ok(2));
    }

    #[test]
    fn tip_level_with_joint_is_curled() {
        // Strict comparison: tip exactly at joint height does not count.
        let mut hand = synthetic_hand(0);
        hand.landmarks[topology::INDEX_TIP].y = hand.landmarks[topology::INDEX_PIP].y;
        assert_eq!(classify(&hand.landmarks), Ok(0));
    }

    #[test]
    fn any_subset_of_size_k_counts_k() {
        // Ring + pinky extended, index + middle curled.
        let mut hand = synthetic_hand(0);
        hand.landmarks[topology::RING_TIP].y = 0.2;
        hand.landmarks[topology::PINKY_TIP].y = 0.2;
        assert_eq!(classify(&hand.landmarks), Ok(2));
    }

    #[test]
    fn out_of_range_coordinates_tolerated() {
        let mut hand = synthetic_hand(1);
        for lm in &mut hand.landmarks {
            lm.y = lm.y * 500.0 - 100.0;
        }
        // The affine map preserves ordering, so the count is unchanged.
        assert_eq!(classify(&hand.landmarks), Ok(1));
    }
}
