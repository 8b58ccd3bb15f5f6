//! Tabular Q-learning agent for Shore Snake
//!
//! Provides:
//! - A compact bit-packed observation of the game state
//! - An epsilon-greedy Q-learning agent over relative turns
//! - JSON persistence for trained agents with metadata

pub mod observation;
pub mod persistence;
pub mod qlearn;

pub use observation::{observe, StateKey};
pub use persistence::{load_agent, save_agent, AgentMetadata};
pub use qlearn::{AgentConfig, QAgent, NUM_ACTIONS};
