//! The per-session playback state record.
//!
//! Owned by the frame loop and mutated only through commands; the renderer
//! reads it but never writes. `volume` and `track_index` are private so
//! every mutation goes through the clamping/wrapping accessors.

/// Volume change applied per volume-up/down command.
pub const VOLUME_STEP: f32 = 0.1;

/// Shown as the current track when nothing is loaded.
pub const NO_TRACK: &str = "No song selected";

#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackState {
    volume: f32,
    track_index: usize,
    /// Last status line produced by a command (or an error).
    pub status: String,
    /// Display name of the loaded track, or [`NO_TRACK`].
    pub current_track: String,
}

impl PlaybackState {
    pub fn new() -> Self {
        PlaybackState {
            volume: 0.5,
            track_index: 0,
            status: "Ready".to_string(),
            current_track: NO_TRACK.to_string(),
        }
    }

    /// Stored volume in `[0, 1]`.
    ///
    /// Note this is the *stored* value: a mute command drops the device
    /// volume to zero without touching it, so volume up/down after a mute
    /// resumes from the pre-mute level.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Stored volume as a whole percentage, for display.
    pub fn volume_percent(&self) -> u8 {
        (self.volume * 100.0).round() as u8
    }

    /// Set the stored volume, clamped into `[0, 1]`.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Index of the current track, always `< track_count`.
    pub fn track_index(&self) -> usize {
        self.track_index
    }

    /// Step to the next track, wrapping at `track_count`.
    pub fn advance_track(&mut self, track_count: usize) {
        self.track_index = (self.track_index + 1) % track_count.max(1);
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_clamps_low() {
        let mut st = PlaybackState::new();
        st.set_volume(0.05 - VOLUME_STEP);
        assert_eq!(st.volume(), 0.0);
    }

    #[test]
    fn volume_clamps_high() {
        let mut st = PlaybackState::new();
        st.set_volume(0.95 + VOLUME_STEP);
        assert_eq!(st.volume(), 1.0);
    }

    #[test]
    fn volume_percent_rounds() {
        let mut st = PlaybackState::new();
        st.set_volume(0.4 - VOLUME_STEP);
        // 0.3 stored as 0.30000002 must still read as 30%.
        assert_eq!(st.volume_percent(), 30);
    }

    #[test]
    fn advance_wraps_at_track_count() {
        let mut st = PlaybackState::new();
        st.advance_track(3);
        st.advance_track(3);
        assert_eq!(st.track_index(), 2);
        st.advance_track(3);
        assert_eq!(st.track_index(), 0);
    }
}
