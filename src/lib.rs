//! Tile Snake - the classic arcade Snake on a bordered tile board
//!
//! This library provides:
//! - Core game logic (game module)
//! - Key mapping (input module)
//! - A retained canvas drawn in the terminal (render module)
//! - Session statistics (metrics module)
//! - The interactive game loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
