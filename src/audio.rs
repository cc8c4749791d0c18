//! Sound cue mapping
//!
//! The simulation emits [`GameEvent`]s; this maps them onto the cue set a
//! host audio backend should play. Playback itself is external and
//! best-effort - dropping a cue never affects game state.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Piece released into simulation
    Release,
    /// Energetic landing while active
    Thud,
}

/// Map a game event to the cue it should trigger, if any.
pub fn cue_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::PieceReleased => Some(SoundEffect::Release),
        GameEvent::Thud { .. } => Some(SoundEffect::Thud),
        GameEvent::PieceSpawned | GameEvent::PieceSettled { .. } | GameEvent::GameOver => None,
    }
}
