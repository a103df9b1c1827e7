//! maestro — interactive entry point.

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use maestro::app::{run, AppConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Maestro — Hand Gesture Music Controller               ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "mediapipe")]
    println!("  Mode: webcam hand tracking (pass --tracker CMD to enable)");
    #[cfg(not(feature = "mediapipe"))]
    println!("  Mode: keyboard simulation  (use --features mediapipe for a camera)");
    println!();
    println!("  Gestures: fist=mute  1=play  2=vol-  3=next  4=vol+");
    println!("  Keys:     0-4=fingers  P=pause  R=resume  X=stop  Q=quit");
    println!();

    let cfg = parse_args();
    println!("  Tracks from: {}", cfg.track_dir.display());
    println!();

    run(cfg)
}

/// Minimal argument handling: an optional track directory, `--silent` for
/// the null audio backend, `--tracker CMD` for the external detector.
fn parse_args() -> AppConfig {
    let mut cfg = AppConfig::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--silent" => cfg.silent = true,
            "--tracker" => cfg.detector_command = args.next(),
            other => cfg.track_dir = PathBuf::from(other),
        }
    }
    cfg
}
