//! Fixed timestep simulation tick
//!
//! One call advances the whole game by `dt`: pause handling, spawning,
//! input routing, settle detection, scoring, and the kill-zone check, all
//! synchronous within the call. The returned events are the only output
//! channel; external audio/UI glue consumes them.

use glam::Vec2;

use super::body::PhysicsBody;
use super::scoring::{height_score, ScoreMode};
use super::state::{Game, GameEvent, GamePhase};
use super::variant::PieceVariant;

/// Input signals for a single tick.
///
/// `left`/`right` are level-triggered (held); `rotate`, `drop`, and `pause`
/// are edge-triggered - the driver sets them on the press tick and clears
/// them afterwards.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub rotate: bool,
    pub drop: bool,
    pub pause: bool,
}

/// Advance the game by one fixed timestep.
pub fn tick<B, F>(game: &mut Game<B, F>, input: &TickInput, dt: f32) -> Vec<GameEvent>
where
    B: PhysicsBody,
    F: FnMut(&PieceVariant, Vec2) -> Option<B>,
{
    let mut events = Vec::new();

    // Handle pause toggle
    if input.pause {
        match game.phase {
            GamePhase::Playing => {
                game.phase = GamePhase::Paused;
                return events;
            }
            GamePhase::Paused => game.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    if game.phase != GamePhase::Playing {
        return events;
    }

    if let Some(settled) = game.spawner.advance(input, dt, &mut events) {
        if matches!(game.score_mode, ScoreMode::PerPiece) {
            game.scoreboard.add(settled.points());
        }
        game.stack.push(settled);
    }

    // Alternate height-scoring observer
    if let ScoreMode::StackHeight {
        floor_y,
        points_per_unit,
        refresh_interval,
    } = game.score_mode
    {
        game.height_refresh += dt;
        if game.height_refresh >= refresh_interval {
            game.height_refresh = 0.0;
            if let Some(top) = game.stack_top_y() {
                game.scoreboard
                    .set(height_score(top, floor_y, points_per_unit));
            }
        }
    }

    // Kill zone: any piece crossing the line ends the run
    let kill_y = game.kill_zone_y;
    let fell = game
        .spawner
        .current()
        .is_some_and(|p| p.bottom_y() <= kill_y)
        || game.stack.iter().any(|p| p.bottom_y() <= kill_y);
    if fell {
        game.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver);
    }

    events
}
