//! Game state wrapper: run phases, tick events, the settled stack, and the
//! kill zone.

use glam::Vec2;

use super::body::PhysicsBody;
use super::piece::Piece;
use super::scoring::{ScoreMode, Scoreboard};
use super::spawner::Spawner;
use super::variant::PieceVariant;
use crate::tuning::GameTuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Simulation frozen
    Paused,
    /// Run ended (a piece reached the kill zone)
    GameOver,
}

/// Notifications produced by a tick, consumed by external audio/UI glue.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PieceSpawned,
    PieceReleased,
    /// Collision energetic enough for a thud cue
    Thud { speed: f32 },
    /// Fires exactly once per piece
    PieceSettled { points: u32 },
    GameOver,
}

/// One full run: spawner, score, and the stack of settled pieces.
///
/// `B` is the physics backend, `F` the body factory handed to the spawner.
pub struct Game<B, F> {
    pub phase: GamePhase,
    pub(crate) spawner: Spawner<B, F>,
    pub(crate) scoreboard: Scoreboard,
    pub(crate) score_mode: ScoreMode,
    /// Settled pieces, retained as static terrain
    pub(crate) stack: Vec<Piece<B>>,
    pub(crate) kill_zone_y: f32,
    /// Elapsed time since the last height-score refresh
    pub(crate) height_refresh: f32,
}

impl<B, F> Game<B, F>
where
    B: PhysicsBody,
    F: FnMut(&PieceVariant, Vec2) -> Option<B>,
{
    pub fn new(tuning: &GameTuning, seed: u64, factory: F) -> Self {
        Self {
            phase: GamePhase::Playing,
            spawner: Spawner::new(tuning.spawner, tuning.catalog.clone(), seed, factory),
            scoreboard: Scoreboard::default(),
            score_mode: tuning.score_mode,
            stack: Vec::new(),
            kill_zone_y: tuning.kill_zone_y,
            height_refresh: 0.0,
        }
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.total()
    }

    pub fn spawner(&self) -> &Spawner<B, F> {
        &self.spawner
    }

    pub fn current_piece(&self) -> Option<&Piece<B>> {
        self.spawner.current()
    }

    /// Mutable access to the controllable piece, for the external driver
    /// that steps its body.
    pub fn current_piece_mut(&mut self) -> Option<&mut Piece<B>> {
        self.spawner.current_mut()
    }

    /// Settled pieces in settle order
    pub fn stack(&self) -> &[Piece<B>] {
        &self.stack
    }

    /// Highest extent of the settled stack, if any
    pub fn stack_top_y(&self) -> Option<f32> {
        self.stack
            .iter()
            .map(|p| p.top_y())
            .fold(None, |acc, y| Some(acc.map_or(y, |a: f32| a.max(y))))
    }

    /// Forward a collision notification from the physics backend. Returns a
    /// thud event when the impact is energetic enough.
    pub fn report_impact(&self, relative_speed: f32) -> Option<GameEvent> {
        let piece = self.spawner.current()?;
        piece
            .report_impact(relative_speed)
            .then_some(GameEvent::Thud {
                speed: relative_speed,
            })
    }

    /// Restart the run with a fresh seed. Equivalent to constructing a new
    /// game with the same tuning and factory.
    pub fn reset(&mut self, seed: u64) {
        self.phase = GamePhase::Playing;
        self.spawner.reset(seed);
        self.scoreboard.reset();
        self.stack.clear();
        self.height_refresh = 0.0;
    }
}
