//! POPSHOT headless host.
//!
//! Wires the simulation to a fixed-rate frame driver thread, a JSON-lines
//! protocol over stdin/stdout, and headless stand-ins for the renderer,
//! picking service, and score widget.

pub mod config;
pub mod game_loop;
pub mod headless;
pub mod ipc;
pub mod state;

pub use popshot_core as core;
