//! Per-piece settle-detection state machine
//!
//! A piece moves forward through `PreDrop -> Active -> Settled` and never
//! back. While active, three independent triggers decide when the body has
//! come to rest, checked in fixed priority order each tick:
//!
//! 1. Sleep path: the backend's sleep flag held for `settle_after` seconds
//! 2. Slow-velocity path: both speeds under threshold for
//!    `slow_time_to_settle` seconds (bouncy materials never sleep)
//! 3. Safety timeout: `max_active_seconds` since release, regardless of
//!    motion
//!
//! Invalid-state calls are silently ignored - late or redundant input on a
//! real-time control surface is not an error.

use glam::Vec2;

use super::body::{BodyMode, PhysicsBody};
use super::variant::PieceVariant;

/// Lifecycle of a single piece. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceState {
    /// Player-controlled, non-colliding, no gravity
    PreDrop,
    /// Fully simulated after release
    Active,
    /// Terminal: at rest, converted to a static or sleeping support
    Settled,
}

/// A falling game object and its backing physics body.
pub struct Piece<B> {
    variant: PieceVariant,
    state: PieceState,
    body: B,
    move_speed: f32,
    sleep_timer: f32,
    slow_timer: f32,
    active_secs: f32,
}

impl<B: PhysicsBody> Piece<B> {
    /// Pre-drop = kinematic + no collisions, so the piece can overlap the
    /// stack while being positioned.
    pub fn new(variant: PieceVariant, move_speed: f32, mut body: B) -> Self {
        body.set_mode(BodyMode::Kinematic);
        body.set_gravity_enabled(false);
        body.set_collidable(false);
        Self {
            variant,
            state: PieceState::PreDrop,
            body,
            move_speed,
            sleep_timer: 0.0,
            slow_timer: 0.0,
            active_secs: 0.0,
        }
    }

    pub fn state(&self) -> PieceState {
        self.state
    }

    pub fn variant(&self) -> &PieceVariant {
        &self.variant
    }

    pub fn points(&self) -> u32 {
        self.variant.points
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    /// Mutable backend access for the external driver (stepping, wiring)
    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    /// Highest extent, for height scoring
    pub fn top_y(&self) -> f32 {
        self.body.position().y + self.variant.half_extents.y
    }

    /// Lowest extent, for the kill-zone check
    pub fn bottom_y(&self) -> f32 {
        self.body.position().y - self.variant.half_extents.y
    }

    /// Steer horizontally while pre-drop. `dir` is clamped to [-1, 1].
    pub fn move_pre_drop(&mut self, dir: f32, dt: f32) {
        if self.state != PieceState::PreDrop {
            return;
        }
        let dir = dir.clamp(-1.0, 1.0);
        let pos = self.body.position();
        self.body
            .set_position(pos + Vec2::new(dir * self.move_speed * dt, 0.0));
    }

    /// Discrete rotation by the variant's step, while pre-drop only.
    pub fn rotate_pre_drop(&mut self) {
        if self.state != PieceState::PreDrop {
            return;
        }
        let rotation = self.body.rotation();
        self.body
            .set_rotation(crate::wrap_degrees(rotation + self.variant.rotation_step));
    }

    /// Release the piece into simulation. Returns `true` on the actual
    /// transition (the caller plays the release cue); repeated or
    /// out-of-state calls are no-ops.
    pub fn release(&mut self) -> bool {
        if self.state != PieceState::PreDrop {
            return false;
        }
        self.state = PieceState::Active;

        self.body.set_collidable(true);
        self.body.set_mode(BodyMode::Dynamic);
        self.body.set_gravity_enabled(true);
        // Continuous detection + interpolation so a fast drop can't tunnel
        self.body.set_continuous_collision(true);
        self.body.set_interpolation(true);
        // Damping to help settle
        self.body.set_damping(
            self.variant.released_linear_damping,
            self.variant.released_angular_damping,
        );

        self.active_secs = 0.0;
        self.sleep_timer = 0.0;
        self.slow_timer = 0.0;
        true
    }

    /// One downward impulse. Repeatable while active; impulses stack.
    pub fn fast_drop(&mut self) {
        if self.state != PieceState::Active {
            return;
        }
        self.body
            .apply_impulse(Vec2::new(0.0, -self.variant.drop_impulse));
    }

    /// Evaluate the settle triggers for one tick. Returns `true` exactly on
    /// the tick the piece settles.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.state != PieceState::Active {
            return false;
        }
        self.active_secs += dt;
        let tuning = self.variant.settle;

        // 1) Normal sleep settle path
        if self.body.is_asleep() {
            self.sleep_timer += dt;
            if self.sleep_timer >= tuning.settle_after {
                self.settle();
                return true;
            }
        } else {
            self.sleep_timer = 0.0;
        }

        // 2) Velocity-threshold path, for bouncy materials that never sleep
        let slow_linear = self.body.linear_velocity().length_squared()
            <= tuning.linear_speed_threshold * tuning.linear_speed_threshold;
        let slow_angular = self.body.angular_velocity().abs() <= tuning.angular_speed_threshold;
        if slow_linear && slow_angular {
            self.slow_timer += dt;
            if self.slow_timer >= tuning.slow_time_to_settle {
                self.settle();
                return true;
            }
        } else {
            self.slow_timer = 0.0;
        }

        // 3) Safety cap: hard-stop after N seconds
        if self.active_secs >= tuning.max_active_seconds {
            self.settle();
            return true;
        }

        false
    }

    /// Force the terminal transition. Only valid from `Active`; fires at
    /// most once.
    pub fn settle(&mut self) {
        if self.state != PieceState::Active {
            return;
        }
        self.state = PieceState::Settled;

        // Freeze to stop long-term tiny bounces
        self.body.set_velocity(Vec2::ZERO, 0.0);
        if self.variant.freeze_on_settle {
            self.body.set_mode(BodyMode::Kinematic); // remains a solid support
        } else {
            self.body.force_sleep(); // stays dynamic but dormant
        }
    }

    /// Collision notification from the stepper. True when the impact is
    /// energetic enough for a thud cue.
    pub fn report_impact(&self, relative_speed: f32) -> bool {
        self.state == PieceState::Active && relative_speed >= self.variant.thud_velocity
    }

    /// Horizontal clamp while pre-drop; the spawner supplies the bounds.
    pub fn clamp_x(&mut self, min_x: f32, max_x: f32) {
        if self.state != PieceState::PreDrop || min_x > max_x {
            return;
        }
        let pos = self.body.position();
        let clamped = pos.x.clamp(min_x, max_x);
        if clamped != pos.x {
            self.body.set_position(Vec2::new(clamped, pos.y));
        }
    }
}
