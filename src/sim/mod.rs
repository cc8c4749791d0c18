//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio playback, or platform dependencies
//!
//! The physics backend is abstract: the host engine implements
//! [`PhysicsBody`] and steps bodies itself, then calls [`tick`] once per
//! simulation step and forwards collision impacts through
//! [`Game::report_impact`].

pub mod body;
pub mod piece;
pub mod scoring;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod variant;

pub use body::{BodyMode, PhysicsBody, SimpleBody};
pub use piece::{Piece, PieceState};
pub use scoring::{height_score, ScoreMode, Scoreboard};
pub use spawner::{Spawner, SpawnerConfig};
pub use state::{Game, GameEvent, GamePhase};
pub use tick::{tick, TickInput};
pub use variant::{PieceVariant, SettleTuning, VariantCatalog};
