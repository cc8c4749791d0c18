//! Score accumulation
//!
//! Two modes: crediting each piece's point value on settle, and an
//! alternate observer that tracks the stack's height.

use serde::{Deserialize, Serialize};

/// How the running score is computed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum ScoreMode {
    /// Credit each piece's point value when it settles
    #[default]
    PerPiece,
    /// Score tracks the highest settled piece above the floor
    StackHeight {
        floor_y: f32,
        points_per_unit: f32,
        /// Seconds between recomputations
        refresh_interval: f32,
    },
}

/// Process-wide score accumulator. Never negative by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    total: u32,
}

impl Scoreboard {
    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn add(&mut self, delta: u32) {
        self.total = self.total.saturating_add(delta);
    }

    pub fn set(&mut self, value: u32) {
        self.total = value;
    }

    pub fn reset(&mut self) {
        self.total = 0;
    }
}

/// Height-mode score for a stack whose tallest settled piece tops out at
/// `top_y`. Floored at zero when the stack sits below the floor line.
pub fn height_score(top_y: f32, floor_y: f32, points_per_unit: f32) -> u32 {
    let height = top_y - floor_y;
    if height <= 0.0 {
        0
    } else {
        (height * points_per_unit).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoreboard_saturates() {
        let mut board = Scoreboard::default();
        board.add(3);
        board.add(2);
        assert_eq!(board.total(), 5);
        board.set(u32::MAX);
        board.add(10);
        assert_eq!(board.total(), u32::MAX);
        board.reset();
        assert_eq!(board.total(), 0);
    }

    #[test]
    fn test_height_score_rounds_and_floors() {
        assert_eq!(height_score(3.26, 0.0, 10.0), 33);
        assert_eq!(height_score(1.0, 1.0, 10.0), 0);
        // Stack below the floor line never goes negative
        assert_eq!(height_score(-2.0, 0.0, 10.0), 0);
    }
}
