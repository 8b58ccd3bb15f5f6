//! Shore Snake - a screen-wrapping snake arcade game
//!
//! This library provides:
//! - Core game logic with multi-type food and edge wrapping (game module)
//! - A tabular Q-learning agent with JSON persistence (agent module)
//! - TUI rendering (render module)
//! - Multiple execution modes: human, watch, train (modes module)

pub mod agent;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
