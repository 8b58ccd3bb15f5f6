use super::observation::StateKey;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of actions available to the agent (relative turns:
/// left, straight, right)
pub const NUM_ACTIONS: usize = 3;

/// Q-learning hyperparameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Learning rate
    pub alpha: f32,
    /// Discount factor
    pub gamma: f32,
    /// Initial exploration rate
    pub epsilon_start: f32,
    /// Exploration floor
    pub epsilon_min: f32,
    /// Multiplicative decay applied to epsilon after each episode
    pub epsilon_decay: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon_start: 1.0,
            epsilon_min: 0.01,
            epsilon_decay: 0.995,
        }
    }
}

/// Tabular Q-learning agent over the bit-packed observation space.
///
/// The table maps each observed [`StateKey`] to one Q-value per relative
/// turn. Action selection is epsilon-greedy during training and purely
/// greedy when watching a trained agent.
pub struct QAgent {
    q: HashMap<StateKey, [f32; NUM_ACTIONS]>,
    config: AgentConfig,
    epsilon: f32,
    rng: rand::rngs::ThreadRng,
}

impl QAgent {
    /// Create a fresh agent with an empty table
    pub fn new(config: AgentConfig) -> Self {
        let epsilon = config.epsilon_start;
        Self {
            q: HashMap::new(),
            config,
            epsilon,
            rng: rand::thread_rng(),
        }
    }

    /// Reconstruct an agent from a saved table
    pub fn from_table(
        config: AgentConfig,
        q: HashMap<StateKey, [f32; NUM_ACTIONS]>,
        epsilon: f32,
    ) -> Self {
        Self {
            q,
            config,
            epsilon,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn table(&self) -> &HashMap<StateKey, [f32; NUM_ACTIONS]> {
        &self.q
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Number of distinct states the agent has values for
    pub fn states_visited(&self) -> usize {
        self.q.len()
    }

    /// Epsilon-greedy action selection for training
    pub fn act(&mut self, key: StateKey) -> usize {
        if self.rng.gen::<f32>() < self.epsilon {
            self.rng.gen_range(0..NUM_ACTIONS)
        } else {
            self.act_greedy(key)
        }
    }

    /// Greedy action selection; unseen states fall back to action 0
    pub fn act_greedy(&self, key: StateKey) -> usize {
        let values = match self.q.get(&key) {
            Some(v) => v,
            None => return 0,
        };
        values
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// One temporal-difference update:
    /// Q(s, a) += alpha * (r + gamma * max Q(s', .) - Q(s, a))
    pub fn learn(
        &mut self,
        key: StateKey,
        action: usize,
        reward: f32,
        next_key: StateKey,
        done: bool,
    ) {
        let next_max = if done {
            0.0
        } else {
            self.q
                .get(&next_key)
                .map(|v| v.iter().copied().fold(f32::NEG_INFINITY, f32::max))
                .unwrap_or(0.0)
        };

        let entry = self.q.entry(key).or_insert([0.0; NUM_ACTIONS]);
        let target = reward + self.config.gamma * next_max;
        entry[action] += self.config.alpha * (target - entry[action]);
    }

    /// Decay exploration at an episode boundary
    pub fn end_episode(&mut self) {
        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.epsilon_min);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greedy_agent() -> QAgent {
        let config = AgentConfig {
            epsilon_start: 0.0,
            ..Default::default()
        };
        QAgent::new(config)
    }

    #[test]
    fn test_learn_moves_value_towards_target() {
        let mut agent = greedy_agent();

        agent.learn(7, 1, 10.0, 8, true);
        let values = agent.table()[&7];

        // alpha 0.1, target 10 (terminal): value moves to 1.0
        assert!((values[1] - 1.0).abs() < 1e-6);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[2], 0.0);
    }

    #[test]
    fn test_learn_bootstraps_from_next_state() {
        let mut agent = greedy_agent();

        agent.learn(8, 0, 10.0, 9, true); // seed Q(8) with 1.0
        agent.learn(7, 2, 0.0, 8, false);

        // target = 0 + 0.9 * max Q(8) = 0.9 * 1.0; update = 0.1 * 0.9
        let values = agent.table()[&7];
        assert!((values[2] - 0.09).abs() < 1e-6);
    }

    #[test]
    fn test_greedy_picks_best_action() {
        let mut agent = greedy_agent();
        for _ in 0..50 {
            agent.learn(3, 2, 10.0, 4, true);
        }
        agent.learn(3, 0, 1.0, 4, true);

        assert_eq!(agent.act_greedy(3), 2);
        // epsilon 0 makes act deterministic too
        assert_eq!(agent.act(3), 2);
    }

    #[test]
    fn test_unseen_state_defaults() {
        let agent = greedy_agent();
        assert_eq!(agent.act_greedy(999), 0);
        assert_eq!(agent.states_visited(), 0);
    }

    #[test]
    fn test_epsilon_decays_to_floor() {
        let mut agent = QAgent::new(AgentConfig {
            epsilon_start: 1.0,
            epsilon_min: 0.05,
            epsilon_decay: 0.5,
            ..Default::default()
        });

        for _ in 0..20 {
            agent.end_episode();
        }
        assert!((agent.epsilon() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_exploration_stays_in_action_range() {
        let mut agent = QAgent::new(AgentConfig::default());
        for key in 0..100 {
            let action = agent.act(key);
            assert!(action < NUM_ACTIONS);
        }
    }
}
