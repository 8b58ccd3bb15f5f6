use super::{
    action::{Direction, Turn},
    config::GameConfig,
    state::{FoodItem, FoodKind, GameState, Position, Snake},
};
use anyhow::{Context, Result};
use rand::Rng;

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// The head moved onto another body segment
    SelfCollision,
    /// Training cutoff: too many steps without feeding
    Starvation,
}

/// Additional information about a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    /// Kind of food eaten this step, if any
    pub ate: Option<FoodKind>,
    /// Set when the step ended the game
    pub cause: Option<GameOverCause>,
}

/// Result of a single game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Value of food consumed this step (0 if none); the training signal
    pub reward: u32,
    /// Whether the game has ended
    pub terminated: bool,
    /// Cumulative score after this step
    pub score: u32,
    pub info: StepInfo,
}

impl StepResult {
    fn ended(state: &GameState, cause: Option<GameOverCause>) -> Self {
        Self {
            reward: 0,
            terminated: true,
            score: state.score,
            info: StepInfo { ate: None, cause },
        }
    }
}

/// The game engine: owns the rules and the randomness, operates on a
/// [`GameState`] one step at a time.
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    /// Create an engine, validating the configuration up front
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate().context("invalid game configuration")?;
        Ok(Self {
            config,
            rng: rand::thread_rng(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset to the initial state: a snake centered on the board heading Up,
    /// score 0, and an initial round of food.
    pub fn reset(&mut self) -> GameState {
        let cell = self.config.cell_size;
        let center = Position::new(self.config.cols() / 2 * cell, self.config.rows() / 2 * cell);

        let snake = Snake::new(
            center,
            Direction::Up,
            self.config.initial_snake_length,
            cell,
        );

        let mut state = GameState::new(snake, &self.config);
        self.spawn_food(&mut state);
        state
    }

    /// Step under keyboard control with an absolute direction.
    ///
    /// `None` (no recognized key this tick) keeps the current heading, as
    /// does a request to reverse 180 degrees.
    pub fn step_human(&mut self, state: &mut GameState, requested: Option<Direction>) -> StepResult {
        if let Some(dir) = requested {
            if !state.snake.direction.is_opposite(dir) {
                state.snake.direction = dir;
            }
        }
        self.advance(state, false)
    }

    /// Step under agent control with a relative turn, without the
    /// starvation cutoff. Used when watching a trained agent play.
    pub fn step_play(&mut self, state: &mut GameState, turn: Turn) -> StepResult {
        state.snake.direction = state.snake.direction.turned(turn);
        self.advance(state, false)
    }

    /// Step under agent control during training: same as [`step_play`]
    /// but a game that goes too long without feeding is cut off.
    ///
    /// [`step_play`]: GameEngine::step_play
    pub fn step_train(&mut self, state: &mut GameState, turn: Turn) -> StepResult {
        state.snake.direction = state.snake.direction.turned(turn);
        self.advance(state, true)
    }

    /// Advance one step: move and wrap the head, resolve collision,
    /// starvation and feeding, and settle growth.
    fn advance(&mut self, state: &mut GameState, starvation: bool) -> StepResult {
        if !state.is_alive {
            return StepResult::ended(state, None);
        }

        let len_before = state.snake.len();
        let new_head = state.wrap(state.snake.head().moved_in(state.snake.direction, state.cell_size));
        state.snake.body.insert(0, new_head);
        state.steps += 1;
        state.turns_since_fed += 1;

        if state.snake.collides_with_body(new_head) {
            // No feed on a death step: the tail still moves up
            state.snake.body.pop();
            state.is_alive = false;
            return StepResult::ended(state, Some(GameOverCause::SelfCollision));
        }

        // Cutoff is against the length the snake entered the step with
        if starvation
            && state.turns_since_fed > self.config.starvation_factor * len_before as u32
        {
            state.snake.body.pop();
            state.is_alive = false;
            return StepResult::ended(state, Some(GameOverCause::Starvation));
        }

        let mut reward = 0;
        let mut ate = None;
        if let Some(idx) = state.food_at(new_head) {
            let item = state.food.remove(idx);
            reward = item.kind.value();
            ate = Some(item.kind);
            state.score += reward;
            state.turns_since_fed = 0;
            self.spawn_food(state);
        } else {
            // No feed this step: tail moves up, no net growth
            state.snake.body.pop();
        }

        StepResult {
            reward,
            terminated: false,
            score: state.score,
            info: StepInfo { ate, cause: None },
        }
    }

    /// Top up the board with food after a reset or a feed.
    ///
    /// Draws a count uniformly from {0, 1, 2} and adds that many items,
    /// capped at `max_food` live items. If the board would otherwise be
    /// foodless, exactly one item is forced in.
    fn spawn_food(&mut self, state: &mut GameState) {
        let count = self.rng.gen_range(0..=2);
        for _ in 0..count {
            if state.food.len() >= self.config.max_food {
                break;
            }
            if let Some(item) = self.sample_food(state) {
                state.food.push(item);
            }
        }

        if state.food.is_empty() {
            if let Some(item) = self.sample_food(state) {
                state.food.push(item);
            }
        }
    }

    /// Pick a random free cell and a random kind for one food item.
    ///
    /// Rejection sampling over the grid with a bounded retry budget; returns
    /// `None` if the board is too dense to place anything, in which case the
    /// spawn is skipped rather than looping forever.
    fn sample_food(&mut self, state: &GameState) -> Option<FoodItem> {
        let cell = self.config.cell_size;
        let cells = (self.config.cols() * self.config.rows()) as usize;
        let attempts = cells * self.config.spawn_attempts_per_cell;

        for _ in 0..attempts {
            let pos = Position::new(
                self.rng.gen_range(0..self.config.cols()) * cell,
                self.rng.gen_range(0..self.config.rows()) * cell,
            );
            if state.is_occupied(pos) {
                continue;
            }
            let kind = if self.rng.gen_bool(0.5) {
                FoodKind::Snail
            } else {
                FoodKind::Crab
            };
            return Some(FoodItem { kind, pos });
        }

        None
    }
}
