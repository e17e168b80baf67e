//! Game loop thread: drives the simulation engine at the display frame rate.
//!
//! The engine is created inside this thread and never leaves it. Commands
//! and selections arrive via an `mpsc` channel. Each frame's snapshot is
//! handed to the caller's sink and stored in shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use popshot_core::constants::FRAME_RATE;
use popshot_core::services::TargetPicker;
use popshot_core::state::FrameSnapshot;
use popshot_sim::{SimConfig, SimulationEngine};

use crate::headless::{HeadlessVisuals, LogScoreDisplay, RaySpherePicker};
use crate::state::GameLoopCommand;

/// Nominal duration of one display frame.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// `sink` receives every frame's snapshot on the loop thread. Returns the
/// command sender and the thread handle.
pub fn spawn_game_loop<F>(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
    sink: F,
) -> (mpsc::Sender<GameLoopCommand>, JoinHandle<()>)
where
    F: FnMut(&FrameSnapshot) + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("popshot-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot, sink);
        })
        .expect("Failed to spawn game loop thread");

    (cmd_tx, handle)
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop<F>(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<FrameSnapshot>>,
    mut sink: F,
) where
    F: FnMut(&FrameSnapshot),
{
    log::info!("game loop starting, seed {}", config.seed);
    let mut engine = SimulationEngine::new(
        config,
        Box::new(HeadlessVisuals::new()),
        Box::new(LogScoreDisplay::default()),
    );
    let picker = RaySpherePicker;

    let start = Instant::now();
    let mut last_frame = start;
    let mut next_frame_time = start;

    loop {
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;
        let now_ms = now.duration_since(start).as_millis() as u64;

        // 1. Apply pending commands and selections in arrival order
        if !drain_commands(&mut engine, &cmd_rx, &picker, now_ms) {
            log::info!("game loop stopping at frame {}", engine.time().frame);
            return;
        }

        // 2. Advance one frame by the measured delta
        let snapshot = engine.tick(dt, now_ms);

        // 3. Hand the snapshot to the host
        sink(&snapshot);

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until the next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_frame_time = now;
        }
    }
}

/// Apply everything waiting on the channel, in the order it was sent.
/// Returns false once the loop should stop.
fn drain_commands(
    engine: &mut SimulationEngine,
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
    picker: &dyn TargetPicker,
    now_ms: u64,
) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                engine.apply_command(cmd, now_ms);
            }
            Ok(GameLoopCommand::Select(event)) => {
                engine.on_select(&event, picker);
            }
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use popshot_core::commands::PlayerCommand;
    use popshot_core::config::GameConfig;
    use popshot_core::enums::{GamePhase, InputSource};
    use popshot_core::events::SimEvent;
    use popshot_core::services::SelectEvent;
    use popshot_core::types::Ray;

    use super::*;

    fn headless_engine(initial_targets: u32) -> SimulationEngine {
        let mut game = GameConfig::default();
        game.spawn.initial_targets = initial_targets;
        SimulationEngine::new(
            SimConfig { seed: 3, game },
            Box::new(HeadlessVisuals::new()),
            Box::new(LogScoreDisplay::default()),
        )
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartSession))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartSession)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::Pause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_drain_stops_on_shutdown_or_disconnect() {
        let mut engine = headless_engine(0);
        let picker = RaySpherePicker;

        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartSession))
            .unwrap();
        assert!(drain_commands(&mut engine, &rx, &picker, 0));
        tx.send(GameLoopCommand::Shutdown).unwrap();
        assert!(!drain_commands(&mut engine, &rx, &picker, 0));

        drop(tx);
        assert!(!drain_commands(&mut engine, &rx, &picker, 0));
    }

    #[test]
    fn test_selection_through_channel_destroys_target() {
        let mut engine = headless_engine(1);
        let picker = RaySpherePicker;
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartSession))
            .unwrap();
        assert!(drain_commands(&mut engine, &rx, &picker, 0));
        let snap = engine.tick(0.0, 0);
        assert_eq!(snap.phase, GamePhase::Active);
        let target = snap.targets[0].position.0;

        let camera = Vec3::new(0.0, 1.6, 0.0);
        tx.send(GameLoopCommand::Select(SelectEvent {
            source: InputSource::RightHand,
            ray: Ray::new(camera, target - camera),
        }))
        .unwrap();
        assert!(drain_commands(&mut engine, &rx, &picker, 0));

        let snap = engine.tick(0.0, 0);
        assert!(snap.targets.is_empty());
        assert_eq!(snap.score.total, 10);
        assert_eq!(snap.particles.len(), 10);
        assert!(snap
            .events
            .iter()
            .any(|e| matches!(e, SimEvent::TargetDestroyed { seq: 0, .. })));
    }

    fn aim_at(target: Vec3) -> GameLoopCommand {
        let camera = Vec3::new(0.0, 1.6, 0.0);
        GameLoopCommand::Select(SelectEvent {
            source: InputSource::RightController,
            ray: Ray::new(camera, target - camera),
        })
    }

    #[test]
    fn test_selection_after_pause_in_same_frame_is_ignored() {
        let mut engine = headless_engine(1);
        let picker = RaySpherePicker;
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartSession))
            .unwrap();
        assert!(drain_commands(&mut engine, &rx, &picker, 0));
        let target = engine.tick(0.0, 0).targets[0].position.0;

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        tx.send(aim_at(target)).unwrap();
        assert!(drain_commands(&mut engine, &rx, &picker, 16));

        let snap = engine.tick(0.016, 16);
        assert_eq!(snap.phase, GamePhase::Paused);
        assert_eq!(snap.score.total, 0);
        assert_eq!(snap.targets.len(), 1);
        assert!(snap.particles.is_empty());
    }

    #[test]
    fn test_selection_before_pause_in_same_frame_scores() {
        let mut engine = headless_engine(1);
        let picker = RaySpherePicker;
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartSession))
            .unwrap();
        assert!(drain_commands(&mut engine, &rx, &picker, 0));
        let target = engine.tick(0.0, 0).targets[0].position.0;

        tx.send(aim_at(target)).unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        assert!(drain_commands(&mut engine, &rx, &picker, 16));

        let snap = engine.tick(0.016, 16);
        assert_eq!(snap.phase, GamePhase::Paused);
        assert_eq!(snap.score.total, 10);
        assert!(snap.targets.is_empty());
    }

    #[test]
    fn test_selection_right_after_start_is_resolved() {
        // Same seed, so the twin shows where the first target will appear.
        let mut twin = headless_engine(1);
        twin.queue_command(PlayerCommand::StartSession);
        let target = twin.tick(0.0, 0).targets[0].position.0;

        let mut engine = headless_engine(1);
        let picker = RaySpherePicker;
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartSession))
            .unwrap();
        tx.send(aim_at(target)).unwrap();
        assert!(drain_commands(&mut engine, &rx, &picker, 0));

        let snap = engine.tick(0.0, 0);
        assert_eq!(snap.phase, GamePhase::Active);
        assert_eq!(snap.score.total, 10);
        assert!(snap.targets.is_empty());
    }

    #[test]
    fn test_loop_thread_publishes_and_stops() {
        let latest = Arc::new(Mutex::new(None));
        let frames = Arc::new(Mutex::new(0u32));
        let counter = frames.clone();

        let (tx, handle) = spawn_game_loop(SimConfig::default(), latest.clone(), move |_| {
            *counter.lock().unwrap() += 1;
        });
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartSession))
            .unwrap();
        std::thread::sleep(FRAME_DURATION * 5);
        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();

        assert!(*frames.lock().unwrap() > 0);
        let snap = latest.lock().unwrap().clone().unwrap();
        assert_eq!(snap.phase, GamePhase::Active);
    }

    #[test]
    fn test_frame_duration_constant() {
        // 60Hz = 16.666ms per frame
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(FRAME_DURATION.as_nanos(), expected_nanos as u128);
    }
}
