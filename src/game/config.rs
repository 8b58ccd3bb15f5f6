use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the game board and rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board width in board units (must be a multiple of `cell_size`)
    pub board_width: i32,
    /// Board height in board units (must be a multiple of `cell_size`)
    pub board_height: i32,
    /// Grid unit length; every position is a multiple of this
    pub cell_size: i32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Maximum number of live food items
    pub max_food: usize,
    /// Retry budget multiplier for food placement, in attempts per grid cell
    pub spawn_attempts_per_cell: usize,
    /// Starvation cutoff factor: training ends a game once the snake has
    /// gone more than `starvation_factor * length` steps without feeding
    pub starvation_factor: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 400,
            board_height: 400,
            cell_size: 20,
            initial_snake_length: 3,
            max_food: 3,
            spawn_attempts_per_cell: 4,
            starvation_factor: 50,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(board_width: i32, board_height: i32) -> Self {
        Self {
            board_width,
            board_height,
            ..Default::default()
        }
    }

    /// Create a small board for testing (10x10 cells)
    pub fn small() -> Self {
        Self::new(200, 200)
    }

    /// Number of grid columns
    pub fn cols(&self) -> i32 {
        self.board_width / self.cell_size
    }

    /// Number of grid rows
    pub fn rows(&self) -> i32 {
        self.board_height / self.cell_size
    }

    /// Validate the configuration, failing fast on a bad geometry.
    ///
    /// Board dimensions must be positive multiples of the cell size, and the
    /// grid must have room for the initial snake plus the maximum food count.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.cell_size > 0, "cell size must be positive");
        ensure!(
            self.board_width > 0 && self.board_width % self.cell_size == 0,
            "board width {} is not a positive multiple of cell size {}",
            self.board_width,
            self.cell_size
        );
        ensure!(
            self.board_height > 0 && self.board_height % self.cell_size == 0,
            "board height {} is not a positive multiple of cell size {}",
            self.board_height,
            self.cell_size
        );
        ensure!(self.initial_snake_length >= 1, "snake must start non-empty");

        let cells = (self.cols() * self.rows()) as usize;
        ensure!(
            cells >= self.initial_snake_length + self.max_food,
            "grid of {} cells cannot hold a {}-segment snake and {} food items",
            cells,
            self.initial_snake_length,
            self.max_food
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cols(), 20);
        assert_eq!(config.rows(), 20);
        assert_eq!(config.initial_snake_length, 3);
    }

    #[test]
    fn test_unaligned_board_rejected() {
        let config = GameConfig::new(410, 400);
        assert!(config.validate().is_err());

        let config = GameConfig::new(400, 390);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_board_rejected() {
        assert!(GameConfig::new(0, 400).validate().is_err());
        assert!(GameConfig::new(400, -400).validate().is_err());

        let config = GameConfig {
            cell_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cramped_board_rejected() {
        // 2x2 grid cannot hold snake(3) + food(3)
        let config = GameConfig {
            board_width: 40,
            board_height: 40,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
