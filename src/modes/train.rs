//! Training mode for the Q-learning agent
//!
//! Runs episodes against the game engine's training step (which enforces
//! the starvation cutoff), applies a temporal-difference update per step,
//! decays exploration per episode, and periodically logs progress and
//! saves checkpoints.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::agent::{observe, save_agent, AgentConfig, AgentMetadata, QAgent};
use crate::game::{GameConfig, GameEngine, TURNS};
use crate::metrics::TrainingStats;

/// Configuration for training mode
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Number of episodes to train
    pub num_episodes: usize,

    /// Path to save the trained agent
    pub save_path: PathBuf,

    /// Save a checkpoint every N episodes
    pub checkpoint_frequency: usize,

    /// Log training progress every N episodes
    pub log_frequency: usize,

    /// Reward shaping applied by the trainer when an episode ends;
    /// the engine's own reward is just the value of food eaten
    pub death_penalty: f32,

    /// Game configuration (board geometry, rules)
    pub game_config: GameConfig,

    /// Q-learning hyperparameters
    pub agent_config: AgentConfig,
}

impl TrainConfig {
    /// Create a training configuration with defaults
    pub fn new(num_episodes: usize, save_path: PathBuf) -> Self {
        Self {
            num_episodes,
            save_path,
            checkpoint_frequency: 1000,
            log_frequency: 100,
            death_penalty: -10.0,
            game_config: GameConfig::default(),
            agent_config: AgentConfig::default(),
        }
    }
}

/// Training mode: episode loop over the engine's training step
pub struct TrainMode {
    engine: GameEngine,
    agent: QAgent,
    stats: TrainingStats,
    config: TrainConfig,
    total_steps: usize,
}

impl TrainMode {
    pub fn new(config: TrainConfig) -> Result<Self> {
        let engine = GameEngine::new(config.game_config.clone())?;
        let agent = QAgent::new(config.agent_config.clone());

        // 100-episode rolling window for progress reporting
        let stats = TrainingStats::new(100);

        Ok(Self {
            engine,
            agent,
            stats,
            config,
            total_steps: 0,
        })
    }

    /// Run the training loop
    pub fn run(&mut self) -> Result<()> {
        self.print_header();

        for episode in 0..self.config.num_episodes {
            let (episode_reward, episode_steps, episode_score) = self.run_episode();

            self.stats
                .record_episode(episode_reward, episode_steps, episode_score);
            self.agent.end_episode();

            if (episode + 1) % self.config.log_frequency == 0 {
                self.print_progress(episode + 1);
            }

            if (episode + 1) % self.config.checkpoint_frequency == 0 {
                self.save_agent_file()
                    .context("Failed to save checkpoint")?;
            }
        }

        self.save_agent_file().context("Failed to save agent")?;

        println!();
        println!("Training complete!");
        println!("Agent saved to: {:?}", self.config.save_path);
        println!("{}", self.stats.format_summary());

        Ok(())
    }

    /// Run one episode and return (shaped reward total, steps, final score)
    fn run_episode(&mut self) -> (f32, usize, u32) {
        let mut state = self.engine.reset();
        let mut episode_reward = 0.0;
        let mut episode_steps = 0;

        loop {
            let key = observe(&state);
            let action = self.agent.act(key);

            let result = self.engine.step_train(&mut state, TURNS[action]);
            let next_key = observe(&state);

            let mut reward = result.reward as f32;
            if result.terminated {
                reward += self.config.death_penalty;
            }

            self.agent
                .learn(key, action, reward, next_key, result.terminated);

            episode_reward += reward;
            episode_steps += 1;
            self.total_steps += 1;

            if result.terminated {
                return (episode_reward, episode_steps, result.score);
            }
        }
    }

    fn save_agent_file(&self) -> Result<()> {
        let game = &self.config.game_config;
        let metadata = AgentMetadata::new(
            self.stats.total_episodes(),
            self.total_steps,
            self.agent.epsilon(),
            game.board_width,
            game.board_height,
            game.cell_size,
        );
        save_agent(&self.agent, &metadata, &self.config.save_path)
    }

    fn print_header(&self) {
        let game = &self.config.game_config;
        println!("{}", "=".repeat(60));
        println!("Training Q-learning agent");
        println!("{}", "=".repeat(60));
        println!("Episodes:   {}", self.config.num_episodes);
        println!(
            "Board:      {}x{} (cell {})",
            game.board_width, game.board_height, game.cell_size
        );
        println!("Save path:  {:?}", self.config.save_path);
        println!("{}", "=".repeat(60));
    }

    fn print_progress(&self, episode: usize) {
        println!(
            "[{}/{}] {} | epsilon: {:.3} | states: {}",
            episode,
            self.config.num_episodes,
            self.stats.format_summary(),
            self.agent.epsilon(),
            self.agent.states_visited(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn quick_config(dir: &TempDir, episodes: usize) -> TrainConfig {
        let mut config = TrainConfig::new(episodes, dir.path().join("agent.json"));
        config.game_config = GameConfig::small();
        // Short starvation leash keeps test episodes brief
        config.game_config.starvation_factor = 5;
        config.log_frequency = usize::MAX;
        config.checkpoint_frequency = usize::MAX;
        config
    }

    #[test]
    fn test_train_config_defaults() {
        let config = TrainConfig::new(5000, PathBuf::from("models/agent.json"));
        assert_eq!(config.num_episodes, 5000);
        assert_eq!(config.checkpoint_frequency, 1000);
        assert_eq!(config.log_frequency, 100);
        assert_eq!(config.death_penalty, -10.0);
    }

    #[test]
    fn test_invalid_game_config_rejected() {
        let mut config = TrainConfig::new(1, PathBuf::from("agent.json"));
        config.game_config = GameConfig::new(410, 400);
        assert!(TrainMode::new(config).is_err());
    }

    #[test]
    fn test_episode_terminates_and_learns() {
        let temp_dir = TempDir::new().unwrap();
        let config = quick_config(&temp_dir, 1);
        let mut mode = TrainMode::new(config).unwrap();

        let (_reward, steps, _score) = mode.run_episode();

        assert!(steps > 0);
        assert!(mode.agent.states_visited() > 0);
        assert_eq!(mode.total_steps, steps);
    }

    #[test]
    fn test_short_training_run_saves_agent() {
        let temp_dir = TempDir::new().unwrap();
        let config = quick_config(&temp_dir, 5);
        let save_path = config.save_path.clone();
        let mut mode = TrainMode::new(config).unwrap();

        mode.run().unwrap();

        assert!(save_path.exists());
        assert_eq!(mode.stats.total_episodes(), 5);

        let (loaded, metadata) = crate::agent::load_agent(&save_path).unwrap();
        assert_eq!(metadata.episodes_trained, 5);
        assert_eq!(metadata.board_width, 200);
        assert!(loaded.states_visited() > 0);
    }

    #[test]
    fn test_epsilon_decays_across_episodes() {
        let temp_dir = TempDir::new().unwrap();
        let config = quick_config(&temp_dir, 5);
        let start_epsilon = config.agent_config.epsilon_start;
        let mut mode = TrainMode::new(config).unwrap();

        mode.run().unwrap();

        assert!(mode.agent.epsilon() < start_epsilon);
    }
}
