//! Core types and definitions for the POPSHOT target-shooting simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, state snapshots, events, configuration, constants,
//! and the traits through which the simulation talks to its renderer,
//! picking service, and score widget. It has no dependency on any
//! rendering or windowing framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod services;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
