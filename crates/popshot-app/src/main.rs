//! `popshot`: headless host for the target-shooting simulation.
//!
//! Reads JSON commands and selections from stdin, one per line, and writes
//! snapshots as JSON lines to stdout. Logs go to stderr (`RUST_LOG`).

use std::io::BufRead;
use std::process::ExitCode;
use std::time::Instant;

use popshot_app::config;
use popshot_app::ipc::{self, ProtocolError, SnapshotFilter};
use popshot_app::state::{AppState, GameLoopCommand};
use popshot_core::commands::PlayerCommand;
use popshot_core::state::FrameSnapshot;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let sim_config = match config::load_sim_config(std::env::args().skip(1), |key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new();
    let started = Instant::now();
    let mut filter = SnapshotFilter::default();
    let sink = move |snapshot: &FrameSnapshot| {
        let now_ms = started.elapsed().as_millis() as u64;
        if filter.should_emit(snapshot, now_ms) {
            if let Err(err) = ipc::write_snapshot(&mut std::io::stdout().lock(), snapshot) {
                log::warn!("failed to write snapshot: {err}");
            }
        }
    };

    let handle = match ipc::start_simulation(&state, sim_config, sink) {
        Ok(handle) => handle,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mut failed = false;
    let start = GameLoopCommand::PlayerCommand(PlayerCommand::StartSession);
    if let Err(err) = ipc::send_command(&state, start) {
        log::error!("{err}");
        failed = true;
    }

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        if failed {
            break;
        }
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::error!("stdin: {err}");
                failed = true;
                break;
            }
        };

        let result = match ipc::parse_line(&line) {
            Ok(Some(command)) => ipc::send_command(&state, command),
            Ok(None) => Ok(()),
            Err(err) => Err(err),
        };
        match result {
            Ok(()) => {}
            Err(ProtocolError::Disconnected) => {
                log::error!("game loop stopped unexpectedly");
                failed = true;
                break;
            }
            Err(err) => log::warn!("{err}"),
        }
    }

    if let Err(err) = ipc::stop_simulation(&state) {
        log::error!("{err}");
    }
    if handle.join().is_err() {
        log::error!("game loop panicked");
        failed = true;
    }

    match ipc::get_snapshot(&state) {
        Ok(Some(last)) => log::info!(
            "session over after {} frames: {} hits, score {}",
            last.time.frame,
            last.score.hits,
            last.score.total
        ),
        Ok(None) => log::info!("session over before the first frame"),
        Err(err) => log::warn!("{err}"),
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
