//! Track discovery.
//!
//! The library is scanned once at startup and never changes for the
//! session. An empty or unreadable directory is a [`StartupError`]; the
//! app refuses to enter the frame loop without at least one track.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StartupError;

/// File extensions accepted as playable tracks (case-insensitive).
const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "ogg", "wav", "flac"];

/// Ordered, immutable-for-the-session list of track files.
#[derive(Clone, Debug)]
pub struct TrackLibrary {
    tracks: Vec<PathBuf>,
}

impl TrackLibrary {
    /// Scan `dir` for audio files, sorted by filename.
    pub fn scan(dir: &Path) -> Result<Self, StartupError> {
        let entries = fs::read_dir(dir).map_err(|source| StartupError::TrackDir {
            dir: dir.to_path_buf(),
            source,
        })?;

        let mut tracks: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| is_audio_file(path))
            .collect();
        tracks.sort();

        debug!(count = tracks.len(), dir = %dir.display(), "scanned track directory");

        Self::from_paths(tracks).map_err(|_| StartupError::NoTracks {
            dir: dir.to_path_buf(),
        })
    }

    /// Build a library from an explicit track list. Fails on an empty list;
    /// the one-track-minimum invariant holds however the library is built.
    pub fn from_paths(tracks: Vec<PathBuf>) -> Result<Self, StartupError> {
        if tracks.is_empty() {
            return Err(StartupError::NoTracks {
                dir: PathBuf::new(),
            });
        }
        Ok(TrackLibrary { tracks })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        // Construction guarantees at least one track.
        false
    }

    /// Full path of the track at `index`. Panics on out-of-range input;
    /// callers index with `PlaybackState::track_index`, which wraps.
    pub fn path(&self, index: usize) -> &Path {
        &self.tracks[index]
    }

    /// Display name (filename) of the track at `index`.
    pub fn name(&self, index: usize) -> String {
        self.tracks[index]
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.tracks[index].display().to_string())
    }
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            AUDIO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn scan_finds_sorted_audio_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.mp3", "a.ogg", "c.WAV", "notes.txt", "cover.png"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let lib = TrackLibrary::scan(dir.path()).unwrap();
        assert_eq!(lib.len(), 3);
        assert_eq!(lib.name(0), "a.ogg");
        assert_eq!(lib.name(1), "b.mp3");
        assert_eq!(lib.name(2), "c.WAV");
    }

    #[test]
    fn scan_rejects_directory_without_tracks() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("readme.md")).unwrap();

        match TrackLibrary::scan(dir.path()) {
            Err(StartupError::NoTracks { .. }) => {}
            other => panic!("expected NoTracks, got {other:?}"),
        }
    }

    #[test]
    fn scan_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("does-not-exist");

        match TrackLibrary::scan(&gone) {
            Err(StartupError::TrackDir { .. }) => {}
            other => panic!("expected TrackDir, got {other:?}"),
        }
    }

    #[test]
    fn from_paths_rejects_empty() {
        assert!(TrackLibrary::from_paths(Vec::new()).is_err());
    }

    #[test]
    fn extensionless_files_are_skipped() {
        assert!(!is_audio_file(Path::new("Makefile")));
        assert!(is_audio_file(Path::new("song.FLAC")));
    }
}
