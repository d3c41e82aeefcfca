//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Rendering observes a [`GameState`] after each tick; it never owns game data.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{ActionOutcome, GameEngine, StepInfo, StepResult};
pub use state::{Cell, CollisionType, GameState, Phase, Snake};
