//! Cat Stack - a physics-stacking game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (piece state machine, spawning, scoring)
//! - `tuning`: Data-driven game balance
//! - `audio`: Event-to-sound-cue mapping (playback is the host's job)
//!
//! The crate owns no rendering, input devices, or scene management. An
//! external driver steps the simulation at a fixed timestep and plugs in a
//! physics backend through the [`sim::PhysicsBody`] trait.

pub mod audio;
pub mod sim;
pub mod tuning;

pub use tuning::GameTuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World gravity (m/s², downward)
    pub const GRAVITY_Y: f32 = -9.81;

    /// Camera defaults - world-space horizontal extent of the play field
    pub const VIEW_MIN_X: f32 = -5.0;
    pub const VIEW_MAX_X: f32 = 5.0;
    /// Keep the pre-drop piece this far inside the view edges
    pub const SIDE_PADDING: f32 = 0.2;

    /// Spawn point height above the floor
    pub const SPAWN_Y: f32 = 4.5;
    /// Pieces falling below this line end the run
    pub const KILL_ZONE_Y: f32 = -6.0;

    /// Delay between a settle and the next spawn (seconds)
    pub const RESPAWN_DELAY: f32 = 0.25;
    /// Horizontal steering speed while pre-drop (m/s)
    pub const MOVE_SPEED: f32 = 6.0;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(mut angle: f32) -> f32 {
    while angle >= 360.0 {
        angle -= 360.0;
    }
    while angle < 0.0 {
        angle += 360.0;
    }
    angle
}

#[cfg(test)]
mod tests {
    use super::wrap_degrees;

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(450.0), 90.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
    }
}
