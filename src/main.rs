//! Flappy Deluxe entry point
//!
//! The binary runs the game headless: the autopilot plays, frames are
//! tessellated and measured, and the run is recorded and re-verified as a
//! replay. Window and GPU surface creation belong to the embedding host.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use flappy_deluxe::platform::{self, Autopilot, FrameClock, Headless};
use flappy_deluxe::sim::{Recorder, Replay};
use flappy_deluxe::{GameError, Pacing, Settings};

const DEFAULT_FRAMES: u64 = 60 * 60;

#[derive(Parser, Debug)]
#[command(name = "flappy-deluxe")]
#[command(about = "Headless Flappy Deluxe runner with deterministic replays")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Let the autopilot play, then verify the recorded run
    Play {
        /// Settings JSON (missing or invalid files fall back to defaults)
        #[arg(long)]
        settings: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_FRAMES, value_parser = clap::value_parser!(u64).range(1..))]
        frames: u64,
        /// Skip frame pacing
        #[arg(long)]
        fast: bool,
        /// Write the replay JSON here
        #[arg(long)]
        record: Option<PathBuf>,
    },
    /// Re-simulate a replay file and check its recorded outcome
    Verify {
        #[arg(long)]
        input: PathBuf,
    },
}

fn verify_file(path: &Path) -> Result<(), GameError> {
    let json = std::fs::read_to_string(path)?;
    let replay = Replay::from_json(&json)?;
    let session = replay.verify()?;
    log::info!(
        "Replay {} verified: {} frames, score {}, high score {}",
        path.display(),
        replay.frames.len(),
        session.score,
        session.high_score
    );
    Ok(())
}

fn play(
    settings: Option<&Path>,
    frames: u64,
    fast: bool,
    record: Option<&Path>,
) -> Result<(), GameError> {
    let mut settings = settings.map(Settings::load_or_default).unwrap_or_default();
    if fast {
        settings.pacing = Pacing::Unthrottled;
    }

    log::info!("Flappy Deluxe (headless) starting...");

    let mut recorder = Recorder::new(settings.clone());
    let mut clock = FrameClock::from_settings(&settings);
    let mut presenter = Headless::default();
    let mut pilot = Autopilot::new();

    let summary = platform::run(
        &mut recorder,
        &mut pilot,
        &mut presenter,
        &mut clock,
        Some(frames),
    );
    log::info!(
        "Ran {} frames: {} crashes, {} pipes passed, {} power-ups, high score {}",
        summary.frames,
        summary.crashes,
        summary.pipes_passed,
        summary.power_ups,
        summary.high_score
    );
    log::debug!(
        "Peak frame: {} triangles, {} bytes",
        presenter.peak_triangles,
        presenter.peak_upload_bytes
    );

    let (replay, _) = recorder.finish();
    replay.verify()?;
    log::info!("Replay re-simulated and verified");

    if let Some(path) = record {
        std::fs::write(path, replay.to_json()?)?;
        log::info!("Replay written to {}", path.display());
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Play {
            settings,
            frames,
            fast,
            record,
        } => play(settings.as_deref(), *frames, *fast, record.as_deref()),
        Commands::Verify { input } => verify_file(input),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("flappy-deluxe").chain(args.iter().copied()))
    }

    #[test]
    fn test_play_defaults() {
        let cli = parse(&["play"]).unwrap();
        match cli.command {
            Commands::Play {
                settings,
                frames,
                fast,
                record,
            } => {
                assert!(settings.is_none());
                assert_eq!(frames, DEFAULT_FRAMES);
                assert!(!fast);
                assert!(record.is_none());
            }
            other => panic!("expected play, got {other:?}"),
        }
    }

    #[test]
    fn test_play_flags() {
        let cli = parse(&["play", "--fast", "--frames", "120", "--record", "run.json"]).unwrap();
        match cli.command {
            Commands::Play {
                frames,
                fast,
                record,
                ..
            } => {
                assert_eq!(frames, 120);
                assert!(fast);
                assert_eq!(record, Some(PathBuf::from("run.json")));
            }
            other => panic!("expected play, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_frames_rejected() {
        assert!(parse(&["play", "--fast", "--frames", "abc"]).is_err());
        assert!(parse(&["play", "--frames", "0"]).is_err());
        assert!(parse(&["play", "--frames", "-5"]).is_err());
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(parse(&["play", "--frame", "10"]).is_err());
    }

    #[test]
    fn test_missing_values_rejected() {
        assert!(parse(&["play", "--settings"]).is_err());
        assert!(parse(&["play", "--record"]).is_err());
        assert!(parse(&["verify"]).is_err());
    }

    #[test]
    fn test_verify_takes_input() {
        let cli = parse(&["verify", "--input", "run.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Verify { input } if input == PathBuf::from("run.json")
        ));
    }
}
