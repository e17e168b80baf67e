//! Player commands sent from the host to the simulation.
//!
//! Commands are queued and applied at the next tick boundary. Selections
//! are not commands: they are resolved immediately by
//! `SimulationEngine::on_select`.

use serde::{Deserialize, Serialize};

/// Session-level player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start a session: spawn the initial targets and show the score.
    StartSession,
    /// Freeze the simulation.
    Pause,
    /// Continue a paused simulation.
    Resume,
}
