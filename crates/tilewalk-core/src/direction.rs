//! Compass movement directions plus the explicit no-movement value.

use serde::{Deserialize, Serialize};

/// Direction an entity faces or moves in. `Stay` is a real value rather
/// than an `Option` wrapper because NPC route logic treats "stand still"
/// as an instruction like any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
    Stay,
}

impl Direction {
    /// Animation row index, used only to select frame windows on a
    /// sprite sheet.
    pub fn index(self) -> u32 {
        match self {
            Direction::Down => 0,
            Direction::Left => 1,
            Direction::Up => 2,
            Direction::Right => 3,
            Direction::Stay => 4,
        }
    }

    /// Pixel offset for one tick of movement at `speed`. Left/Right
    /// affect x, Up/Down affect y, Stay never moves.
    pub fn offset(self, speed: i32) -> (i32, i32) {
        match self {
            Direction::Up => (0, -speed),
            Direction::Down => (0, speed),
            Direction::Left => (-speed, 0),
            Direction::Right => (speed, 0),
            Direction::Stay => (0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stay_has_zero_offset() {
        assert_eq!(Direction::Stay.offset(5), (0, 0));
        assert_eq!(Direction::Stay.offset(0), (0, 0));
    }

    #[test]
    fn test_offsets_follow_screen_axes() {
        // y grows downward in screen space.
        assert_eq!(Direction::Up.offset(2), (0, -2));
        assert_eq!(Direction::Down.offset(2), (0, 2));
        assert_eq!(Direction::Left.offset(2), (-2, 0));
        assert_eq!(Direction::Right.offset(2), (2, 0));
    }

    #[test]
    fn test_indices_are_distinct() {
        let dirs = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
            Direction::Stay,
        ];
        for a in dirs {
            for b in dirs {
                if a != b {
                    assert_ne!(a.index(), b.index());
                }
            }
        }
    }
}
