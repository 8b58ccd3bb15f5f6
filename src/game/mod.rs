//! Core game logic module for Shore Snake
//!
//! This module contains all the game logic without any I/O or rendering
//! dependencies. It can be used programmatically for both human play and
//! agent training.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Turn, TURNS};
pub use config::GameConfig;
pub use engine::{GameEngine, GameOverCause, StepInfo, StepResult};
pub use state::{FoodItem, FoodKind, GameState, Position, Snake};
