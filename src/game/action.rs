/// Direction the snake can travel in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Clockwise ordering used to resolve relative turns.
const CLOCKWISE: [Direction; 4] = [
    Direction::Left,
    Direction::Up,
    Direction::Right,
    Direction::Down,
];

impl Direction {
    /// Returns true if switching from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the offset (dx, dy) for moving one cell in this direction
    pub fn delta(&self, cell: i32) -> (i32, i32) {
        match self {
            Direction::Up => (0, -cell),
            Direction::Down => (0, cell),
            Direction::Left => (-cell, 0),
            Direction::Right => (cell, 0),
        }
    }

    /// Apply a relative turn, rotating within the clockwise cycle.
    ///
    /// A 180-degree reversal is unreachable: the cycle index only ever
    /// moves by one position per turn.
    pub fn turned(&self, turn: Turn) -> Direction {
        let idx = CLOCKWISE
            .iter()
            .position(|d| d == self)
            .unwrap_or_default();
        match turn {
            Turn::Straight => *self,
            Turn::Left => CLOCKWISE[(idx + 3) % 4],
            Turn::Right => CLOCKWISE[(idx + 1) % 4],
        }
    }
}

/// A turn command relative to the current heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Straight,
    Right,
}

/// All relative turns, indexable by agent action number.
pub const TURNS: [Turn; 3] = [Turn::Left, Turn::Straight, Turn::Right];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(20), (0, -20));
        assert_eq!(Direction::Down.delta(20), (0, 20));
        assert_eq!(Direction::Left.delta(20), (-20, 0));
        assert_eq!(Direction::Right.delta(20), (20, 0));
    }

    #[test]
    fn test_relative_turns_from_up() {
        assert_eq!(Direction::Up.turned(Turn::Left), Direction::Left);
        assert_eq!(Direction::Up.turned(Turn::Right), Direction::Right);
        assert_eq!(Direction::Up.turned(Turn::Straight), Direction::Up);
    }

    #[test]
    fn test_turn_cycle_is_clockwise() {
        let mut dir = Direction::Up;
        let expected = [
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ];
        for want in expected {
            dir = dir.turned(Turn::Right);
            assert_eq!(dir, want);
        }
    }

    #[test]
    fn test_reversal_unreachable_in_one_turn() {
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            for turn in TURNS {
                assert!(!dir.is_opposite(dir.turned(turn)));
            }
        }
    }
}
