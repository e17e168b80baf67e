//! Line-oriented JSON protocol between the host process and the game loop.
//!
//! Input: one JSON object per line, either a `PlayerCommand`
//! (`{"type":"Pause"}`) or a `SelectEvent`
//! (`{"source":"RightController","ray":{"origin":[0,1.6,0],"direction":[0,0,-1]}}`).
//! Output: `FrameSnapshot`s as JSON lines, throttled by `SnapshotFilter`.

use std::io::Write;
use std::sync::PoisonError;
use std::thread::JoinHandle;

use popshot_core::events::SimEvent;
use popshot_core::state::FrameSnapshot;
use popshot_sim::SimConfig;

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

/// Minimum gap between periodic snapshot lines.
pub const SNAPSHOT_INTERVAL_MS: u64 = 1000;

/// Errors raised at the host boundary. None of them stop the simulation.
#[derive(thiserror::Error, Debug)]
pub enum ProtocolError {
    #[error("malformed input line: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("simulation already running")]
    AlreadyRunning,

    #[error("simulation not started")]
    NotRunning,

    #[error("game loop has stopped")]
    Disconnected,

    #[error("shared state lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for ProtocolError {
    fn from(_: PoisonError<T>) -> Self {
        ProtocolError::Poisoned
    }
}

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation<F>(
    state: &AppState,
    config: SimConfig,
    sink: F,
) -> Result<JoinHandle<()>, ProtocolError>
where
    F: FnMut(&FrameSnapshot) + Send + 'static,
{
    let mut running = state.running.lock()?;
    if *running {
        return Err(ProtocolError::AlreadyRunning);
    }

    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, state.latest_snapshot.clone(), sink);

    *state.command_tx.lock()? = Some(cmd_tx);
    *running = true;

    Ok(handle)
}

/// Forward a command or selection to the game loop.
pub fn send_command(state: &AppState, command: GameLoopCommand) -> Result<(), ProtocolError> {
    let tx_lock = state.command_tx.lock()?;

    match tx_lock.as_ref() {
        Some(tx) => tx.send(command).map_err(|_| ProtocolError::Disconnected),
        None => Err(ProtocolError::NotRunning),
    }
}

/// Ask the game loop to stop and drop the sender.
pub fn stop_simulation(state: &AppState) -> Result<(), ProtocolError> {
    let mut running = state.running.lock()?;
    let tx = state.command_tx.lock()?.take();

    if let Some(tx) = tx {
        // The loop may already have exited; dropping the sender is enough then.
        let _ = tx.send(GameLoopCommand::Shutdown);
    }
    *running = false;

    Ok(())
}

/// Get the latest snapshot synchronously.
pub fn get_snapshot(state: &AppState) -> Result<Option<FrameSnapshot>, ProtocolError> {
    let lock = state.latest_snapshot.lock()?;
    Ok(lock.clone())
}

/// Parse one input line. Blank lines yield `None`.
///
/// Objects carrying a `ray` are selections; anything else must be a
/// `PlayerCommand`.
pub fn parse_line(line: &str) -> Result<Option<GameLoopCommand>, ProtocolError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let value: serde_json::Value = serde_json::from_str(line)?;
    let command = if value.get("ray").is_some() {
        GameLoopCommand::Select(serde_json::from_value(value)?)
    } else {
        GameLoopCommand::PlayerCommand(serde_json::from_value(value)?)
    };

    Ok(Some(command))
}

/// Write one snapshot as a single JSON line.
pub fn write_snapshot<W: Write>(out: &mut W, snapshot: &FrameSnapshot) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, snapshot)?;
    out.write_all(b"\n")?;
    out.flush()
}

/// Decides which frames are worth writing out: the first one, any frame
/// with a hit, and otherwise one per interval of host time.
#[derive(Debug, Clone)]
pub struct SnapshotFilter {
    interval_ms: u64,
    last_emit_ms: Option<u64>,
}

impl Default for SnapshotFilter {
    fn default() -> Self {
        Self::new(SNAPSHOT_INTERVAL_MS)
    }
}

impl SnapshotFilter {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_emit_ms: None,
        }
    }

    pub fn should_emit(&mut self, snapshot: &FrameSnapshot, now_ms: u64) -> bool {
        let hit = snapshot
            .events
            .iter()
            .any(|e| matches!(e, SimEvent::TargetDestroyed { .. }));
        let due = match self.last_emit_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        };

        if hit || due {
            self.last_emit_ms = Some(now_ms);
        }
        hit || due
    }
}
