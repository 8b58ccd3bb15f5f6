use crate::game::{Direction, GameState, Position, Turn};

/// Bit-packed observation of the game from the snake's point of view.
///
/// Layout (9 bits):
/// - bit 0: danger straight ahead
/// - bit 1: danger to the right of the heading
/// - bit 2: danger to the left of the heading
/// - bits 3-4: heading
/// - bit 5: nearest food is left of the head
/// - bit 6: nearest food is right of the head
/// - bit 7: nearest food is above the head
/// - bit 8: nearest food is below the head
pub type StateKey = u16;

/// Encode the current state into a [`StateKey`].
pub fn observe(state: &GameState) -> StateKey {
    let head = state.snake.head();
    let heading = state.snake.direction;

    let mut key: StateKey = 0;
    if danger_towards(state, heading) {
        key |= 1;
    }
    if danger_towards(state, heading.turned(Turn::Right)) {
        key |= 1 << 1;
    }
    if danger_towards(state, heading.turned(Turn::Left)) {
        key |= 1 << 2;
    }

    key |= (heading_index(heading) as StateKey) << 3;

    if let Some(food) = nearest_food(state, head) {
        if food.x < head.x {
            key |= 1 << 5;
        }
        if food.x > head.x {
            key |= 1 << 6;
        }
        if food.y < head.y {
            key |= 1 << 7;
        }
        if food.y > head.y {
            key |= 1 << 8;
        }
    }

    key
}

/// Whether moving one cell in the given direction would hit the body.
/// Wrap-aware: the board has no walls.
fn danger_towards(state: &GameState, dir: Direction) -> bool {
    let cell = state.wrap(state.snake.head().moved_in(dir, state.cell_size));
    state.snake.contains(cell)
}

fn heading_index(dir: Direction) -> u8 {
    match dir {
        Direction::Up => 0,
        Direction::Down => 1,
        Direction::Left => 2,
        Direction::Right => 3,
    }
}

/// Closest live food item by Manhattan distance
fn nearest_food(state: &GameState, head: Position) -> Option<Position> {
    state
        .food
        .iter()
        .map(|f| f.pos)
        .min_by_key(|p| (p.x - head.x).abs() + (p.y - head.y).abs())
}
