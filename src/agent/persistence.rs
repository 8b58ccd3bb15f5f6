//! Persistence for trained agents
//!
//! A trained agent is saved as a single JSON file holding the Q-table, the
//! hyperparameters it was trained with, and a metadata block used for
//! compatibility checks when loading.

use super::observation::StateKey;
use super::qlearn::{AgentConfig, QAgent, NUM_ACTIONS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Metadata saved alongside the Q-table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMetadata {
    /// Number of episodes trained
    pub episodes_trained: usize,
    /// Total environment steps taken
    pub training_steps: usize,
    /// Exploration rate at the end of training
    pub final_epsilon: f32,
    /// Board geometry the agent was trained on
    pub board_width: i32,
    pub board_height: i32,
    pub cell_size: i32,
    /// Crate version that produced the file
    pub version: String,
}

impl AgentMetadata {
    pub fn new(
        episodes_trained: usize,
        training_steps: usize,
        final_epsilon: f32,
        board_width: i32,
        board_height: i32,
        cell_size: i32,
    ) -> Self {
        Self {
            episodes_trained,
            training_steps,
            final_epsilon,
            board_width,
            board_height,
            cell_size,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// On-disk representation of a trained agent
#[derive(Serialize, Deserialize)]
struct AgentFile {
    metadata: AgentMetadata,
    config: AgentConfig,
    q: HashMap<StateKey, [f32; NUM_ACTIONS]>,
}

/// Save a trained agent to a JSON file, creating parent directories
/// as needed.
pub fn save_agent(agent: &QAgent, metadata: &AgentMetadata, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
    }

    let file = AgentFile {
        metadata: metadata.clone(),
        config: agent.config().clone(),
        q: agent.table().clone(),
    };

    let json = serde_json::to_string(&file).context("Failed to serialize agent")?;
    fs::write(path, json).with_context(|| format!("Failed to write agent to {:?}", path))?;
    Ok(())
}

/// Load a trained agent and its metadata from a JSON file
pub fn load_agent(path: &Path) -> Result<(QAgent, AgentMetadata)> {
    let json =
        fs::read_to_string(path).with_context(|| format!("Failed to read agent from {:?}", path))?;
    let file: AgentFile =
        serde_json::from_str(&json).with_context(|| format!("Malformed agent file {:?}", path))?;

    let agent = QAgent::from_table(file.config, file.q, file.metadata.final_epsilon);
    Ok((agent, file.metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn trained_agent() -> QAgent {
        let mut agent = QAgent::new(AgentConfig::default());
        agent.learn(1, 0, 10.0, 2, false);
        agent.learn(2, 1, 15.0, 3, true);
        agent
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("agent.json");

        let agent = trained_agent();
        let metadata = AgentMetadata::new(500, 12_000, 0.08, 400, 400, 20);
        save_agent(&agent, &metadata, &path).unwrap();

        let (loaded, loaded_meta) = load_agent(&path).unwrap();

        assert_eq!(loaded.table(), agent.table());
        assert_eq!(loaded.epsilon(), 0.08);
        assert_eq!(loaded_meta.episodes_trained, 500);
        assert_eq!(loaded_meta.training_steps, 12_000);
        assert_eq!(loaded_meta.board_width, 400);
        assert_eq!(loaded_meta.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/models/agent.json");

        let agent = trained_agent();
        let metadata = AgentMetadata::new(1, 10, 0.5, 200, 200, 20);
        save_agent(&agent, &metadata, &path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.json");
        assert!(load_agent(&path).is_err());
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        assert!(load_agent(&path).is_err());
    }
}
