//! Audio playback backends.
//!
//! [`PlaybackService`] is the seam between the dispatcher and whatever
//! actually makes sound. [`RodioPlayer`] talks to the default output device
//! through rodio; [`NullPlayer`] accepts every command silently so the demo
//! stays runnable on machines without an audio device (and in tests).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, info};

use crate::error::{PlaybackError, StartupError};

// ════════════════════════════════════════════════════════════════════════════
// PlaybackService trait
// ════════════════════════════════════════════════════════════════════════════

/// The audio collaborator consumed by the dispatcher.
///
/// `load` replaces whatever was queued with the given track, paused;
/// `play` starts or restarts output. Every operation may fail — a missing
/// file, an undecodable stream, a device that went away — and the
/// dispatcher converts each failure into a status line.
pub trait PlaybackService {
    fn load(&mut self, track: &Path) -> Result<(), PlaybackError>;
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self) -> Result<(), PlaybackError>;
    fn unpause(&mut self) -> Result<(), PlaybackError>;
    fn stop(&mut self) -> Result<(), PlaybackError>;
    /// Push a device volume in `[0, 1]`. Values outside the range are
    /// clamped here as a last line of defense.
    fn set_volume(&mut self, volume: f32) -> Result<(), PlaybackError>;
}

// ════════════════════════════════════════════════════════════════════════════
// RodioPlayer — real audio output
// ════════════════════════════════════════════════════════════════════════════

/// Playback through the default rodio output device.
///
/// The output stream is the process-lifetime audio singleton: opened once
/// at startup, closed when the player is dropped at the end of the run.
pub struct RodioPlayer {
    // Dropping the stream closes the device; it must outlive the sink.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Sink,
}

impl RodioPlayer {
    /// Open the default output device. Failure here is fatal — the app
    /// refuses to start without audio unless silent mode was requested.
    pub fn open() -> Result<Self, StartupError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| StartupError::AudioInit(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| StartupError::AudioInit(e.to_string()))?;
        info!("audio output device opened");
        Ok(RodioPlayer {
            _stream: stream,
            handle,
            sink,
        })
    }

    /// Swap in a fresh sink, carrying the current device volume over.
    fn replace_sink(&mut self) -> Result<(), PlaybackError> {
        let volume = self.sink.volume();
        self.sink.stop();
        self.sink = Sink::try_new(&self.handle).map_err(|e| PlaybackError::Device(e.to_string()))?;
        self.sink.set_volume(volume);
        Ok(())
    }
}

impl PlaybackService for RodioPlayer {
    fn load(&mut self, track: &Path) -> Result<(), PlaybackError> {
        let file = File::open(track)?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::Decode {
            path: track.to_path_buf(),
            reason: e.to_string(),
        })?;

        self.replace_sink()?;
        self.sink.pause();
        self.sink.append(source);
        debug!(track = %track.display(), "track loaded");
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.sink.pause();
        Ok(())
    }

    fn unpause(&mut self) -> Result<(), PlaybackError> {
        self.sink.play();
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlaybackError> {
        // Empties the queue; the sink stays usable for the next load.
        self.sink.stop();
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), PlaybackError> {
        self.sink.set_volume(volume.clamp(0.0, 1.0));
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// NullPlayer — silent backend
// ════════════════════════════════════════════════════════════════════════════

/// Accepts every command and produces no sound.
pub struct NullPlayer;

impl PlaybackService for NullPlayer {
    fn load(&mut self, track: &Path) -> Result<(), PlaybackError> {
        debug!(track = %track.display(), "null player: load");
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn unpause(&mut self) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn set_volume(&mut self, _volume: f32) -> Result<(), PlaybackError> {
        Ok(())
    }
}
