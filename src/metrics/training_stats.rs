//! Training statistics tracking
//!
//! Rolling-window episode statistics used by the training loop to report
//! progress: rewards, episode lengths and final scores.

use std::collections::VecDeque;

/// Episode statistics with rolling averages.
///
/// # Example
///
/// ```rust
/// use shore_snake::metrics::TrainingStats;
///
/// let mut stats = TrainingStats::new(100);
/// stats.record_episode(25.0, 140, 25);
///
/// assert_eq!(stats.total_episodes(), 1);
/// assert_eq!(stats.total_steps(), 140);
/// ```
#[derive(Debug, Clone)]
pub struct TrainingStats {
    episode_rewards: VecDeque<f32>,
    episode_lengths: VecDeque<usize>,
    episode_scores: VecDeque<u32>,
    total_episodes: usize,
    total_steps: usize,
    window_size: usize,
}

impl TrainingStats {
    /// Create a tracker keeping the last `window_size` episodes
    pub fn new(window_size: usize) -> Self {
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_scores: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            window_size,
        }
    }

    /// Record the completion of one episode
    pub fn record_episode(&mut self, reward: f32, length: usize, score: u32) {
        Self::push(&mut self.episode_rewards, reward, self.window_size);
        Self::push(&mut self.episode_lengths, length, self.window_size);
        Self::push(&mut self.episode_scores, score, self.window_size);
        self.total_episodes += 1;
        self.total_steps += length;
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Mean reward over the window, 0.0 if empty
    pub fn mean_reward(&self) -> f32 {
        mean_f32(self.episode_rewards.iter().copied())
    }

    /// Mean episode length over the window, 0.0 if empty
    pub fn mean_length(&self) -> f32 {
        mean_f32(self.episode_lengths.iter().map(|&l| l as f32))
    }

    /// Mean final score over the window, 0.0 if empty
    pub fn mean_score(&self) -> f32 {
        mean_f32(self.episode_scores.iter().map(|&s| s as f32))
    }

    /// Best score seen within the window
    pub fn recent_max_score(&self) -> u32 {
        self.episode_scores.iter().copied().max().unwrap_or(0)
    }

    /// One-line progress summary for periodic logging
    pub fn format_summary(&self) -> String {
        format!(
            "episodes: {} | steps: {} | mean reward: {:.1} | mean length: {:.1} | mean score: {:.1} | best recent score: {}",
            self.total_episodes,
            self.total_steps,
            self.mean_reward(),
            self.mean_length(),
            self.mean_score(),
            self.recent_max_score(),
        )
    }

    fn push<T>(deque: &mut VecDeque<T>, value: T, window: usize) {
        if deque.len() >= window {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}

fn mean_f32(values: impl Iterator<Item = f32>) -> f32 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = TrainingStats::new(10);
        assert_eq!(stats.total_episodes(), 0);
        assert_eq!(stats.mean_reward(), 0.0);
        assert_eq!(stats.mean_score(), 0.0);
        assert_eq!(stats.recent_max_score(), 0);
    }

    #[test]
    fn test_means_over_window() {
        let mut stats = TrainingStats::new(10);
        stats.record_episode(10.0, 100, 10);
        stats.record_episode(20.0, 200, 30);

        assert_eq!(stats.total_episodes(), 2);
        assert_eq!(stats.total_steps(), 300);
        assert!((stats.mean_reward() - 15.0).abs() < 1e-6);
        assert!((stats.mean_length() - 150.0).abs() < 1e-6);
        assert!((stats.mean_score() - 20.0).abs() < 1e-6);
        assert_eq!(stats.recent_max_score(), 30);
    }

    #[test]
    fn test_window_evicts_old_episodes() {
        let mut stats = TrainingStats::new(2);
        stats.record_episode(100.0, 10, 100);
        stats.record_episode(10.0, 10, 10);
        stats.record_episode(20.0, 10, 20);

        // First episode fell out of the window
        assert!((stats.mean_reward() - 15.0).abs() < 1e-6);
        assert_eq!(stats.recent_max_score(), 20);
        // Totals still count everything
        assert_eq!(stats.total_episodes(), 3);
        assert_eq!(stats.total_steps(), 30);
    }
}
