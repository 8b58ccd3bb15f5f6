use super::action::Direction;
use super::config::GameConfig;

/// A position on the board, always aligned to the cell grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by a raw delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Offset by one cell in a direction
    pub fn moved_in(&self, direction: Direction, cell: i32) -> Self {
        let (dx, dy) = direction.delta(cell);
        self.moved_by(dx, dy)
    }
}

/// The snake: body segments with the head at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    pub body: Vec<Position>,
    /// Current heading
    pub direction: Direction,
}

impl Snake {
    /// Create a snake of the given length, laid out behind the head
    /// opposite to its heading.
    pub fn new(head: Position, direction: Direction, length: usize, cell: i32) -> Self {
        let (dx, dy) = direction.delta(cell);
        let body = (0..length as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();
        Self { body, direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Body segments excluding the head
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check whether a position hits the body (excluding the head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Kind of food on the board, each worth a fixed number of points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodKind {
    Snail,
    Crab,
}

impl FoodKind {
    /// Point value awarded when eaten
    pub fn value(&self) -> u32 {
        match self {
            FoodKind::Snail => 10,
            FoodKind::Crab => 15,
        }
    }
}

/// A live food item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodItem {
    pub kind: FoodKind,
    pub pos: Position,
}

/// Complete state of one game
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Live food items, at most `max_food` of them
    pub food: Vec<FoodItem>,
    pub board_width: i32,
    pub board_height: i32,
    pub cell_size: i32,
    pub score: u32,
    pub steps: u32,
    /// Steps since the snake last ate; drives the training-only
    /// starvation cutoff
    pub turns_since_fed: u32,
    pub is_alive: bool,
}

impl GameState {
    pub fn new(snake: Snake, config: &GameConfig) -> Self {
        Self {
            snake,
            food: Vec::with_capacity(config.max_food),
            board_width: config.board_width,
            board_height: config.board_height,
            cell_size: config.cell_size,
            score: 0,
            steps: 0,
            turns_since_fed: 0,
            is_alive: true,
        }
    }

    /// Wrap a position back onto the board.
    ///
    /// Both axes wrap symmetrically: a coordinate at or past the upper bound
    /// resets to 0, and a negative coordinate resets to the last cell
    /// (bound minus one cell).
    pub fn wrap(&self, pos: Position) -> Position {
        let mut x = pos.x;
        let mut y = pos.y;

        if x >= self.board_width {
            x = 0;
        } else if x < 0 {
            x = self.board_width - self.cell_size;
        }

        if y >= self.board_height {
            y = 0;
        } else if y < 0 {
            y = self.board_height - self.cell_size;
        }

        Position::new(x, y)
    }

    /// Check whether a cell is held by the snake or by a food item
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.snake.contains(pos) || self.food.iter().any(|f| f.pos == pos)
    }

    /// Index of the live food item at a position, if any
    pub fn food_at(&self, pos: Position) -> Option<usize> {
        self.food.iter().position(|f| f.pos == pos)
    }
}
