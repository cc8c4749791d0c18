//! Physics body abstraction
//!
//! The core never integrates motion itself; it drives whatever backend the
//! host supplies through the [`PhysicsBody`] trait. [`SimpleBody`] is a
//! minimal built-in backend used by the demo binary and tests.

use glam::Vec2;

/// How the backend simulates a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    /// Moved only by explicit position edits, unaffected by gravity/forces
    Kinematic,
    /// Fully simulated
    Dynamic,
}

/// Operations the core needs from a 2D rigid body backend.
///
/// Angles are in degrees and angular velocity in degrees per second,
/// matching the discrete rotation steps pieces use.
pub trait PhysicsBody {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, pos: Vec2);

    fn rotation(&self) -> f32;
    fn set_rotation(&mut self, degrees: f32);

    fn linear_velocity(&self) -> Vec2;
    fn angular_velocity(&self) -> f32;
    /// Set both velocities at once; implementations should wake the body.
    fn set_velocity(&mut self, linear: Vec2, angular: f32);

    /// Backend's own sleep heuristic
    fn is_asleep(&self) -> bool;

    fn set_mode(&mut self, mode: BodyMode);
    fn set_gravity_enabled(&mut self, enabled: bool);
    fn set_collidable(&mut self, enabled: bool);
    fn set_damping(&mut self, linear: f32, angular: f32);
    fn apply_impulse(&mut self, impulse: Vec2);
    fn force_sleep(&mut self);

    /// Continuous collision detection, for backends that support it
    fn set_continuous_collision(&mut self, _enabled: bool) {}
    /// Motion interpolation for rendering, for backends that support it
    fn set_interpolation(&mut self, _enabled: bool) {}
}

/// Linear speed below which [`SimpleBody`] starts counting toward sleep
const SLEEP_LINEAR_SPEED: f32 = 0.05;
/// Angular speed (deg/s) below which [`SimpleBody`] starts counting toward sleep
const SLEEP_ANGULAR_SPEED: f32 = 2.0;
/// Seconds a [`SimpleBody`] must stay still before it falls asleep
const SLEEP_DELAY: f32 = 0.25;

/// A minimal rigid body: semi-implicit Euler, gravity, damping, a flat
/// floor with restitution, and an auto-sleep heuristic.
///
/// Real games plug their engine's body in through [`PhysicsBody`] instead;
/// this one exists so the crate runs headless.
#[derive(Debug, Clone)]
pub struct SimpleBody {
    pub pos: Vec2,
    /// Degrees
    pub rotation: f32,
    pub vel: Vec2,
    /// Degrees per second
    pub angular_vel: f32,
    pub mode: BodyMode,
    pub gravity_enabled: bool,
    pub collidable: bool,
    pub asleep: bool,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub mass: f32,
    pub half_extents: Vec2,
    /// World-space floor the body lands on
    pub floor_y: f32,
    pub restitution: f32,
    still_secs: f32,
}

impl SimpleBody {
    pub fn new(pos: Vec2, half_extents: Vec2, mass: f32) -> Self {
        Self {
            pos,
            rotation: 0.0,
            vel: Vec2::ZERO,
            angular_vel: 0.0,
            mode: BodyMode::Dynamic,
            gravity_enabled: true,
            collidable: true,
            asleep: false,
            linear_damping: 0.0,
            angular_damping: 0.0,
            mass: mass.max(0.001),
            half_extents,
            floor_y: 0.0,
            restitution: 0.3,
            still_secs: 0.0,
        }
    }

    /// Integrate one step. Returns the relative impact speed when the body
    /// lands on the floor during this step, so the driver can forward a
    /// collision notification.
    pub fn step(&mut self, dt: f32) -> Option<f32> {
        if self.mode != BodyMode::Dynamic || self.asleep {
            return None;
        }

        if self.gravity_enabled {
            self.vel.y += crate::consts::GRAVITY_Y * dt;
        }
        self.vel /= 1.0 + self.linear_damping * dt;
        self.angular_vel /= 1.0 + self.angular_damping * dt;
        self.pos += self.vel * dt;
        self.rotation = crate::wrap_degrees(self.rotation + self.angular_vel * dt);

        let mut impact = None;
        if self.collidable && self.pos.y - self.half_extents.y < self.floor_y && self.vel.y < 0.0 {
            impact = Some(self.vel.y.abs());
            self.pos.y = self.floor_y + self.half_extents.y;
            self.vel.y = -self.vel.y * self.restitution;
            self.vel.x *= 0.9; // contact friction
            if self.vel.y < SLEEP_LINEAR_SPEED {
                self.vel.y = 0.0;
            }
        }

        let still = self.vel.length_squared() <= SLEEP_LINEAR_SPEED * SLEEP_LINEAR_SPEED
            && self.angular_vel.abs() <= SLEEP_ANGULAR_SPEED;
        if still {
            self.still_secs += dt;
            if self.still_secs >= SLEEP_DELAY {
                self.asleep = true;
                self.vel = Vec2::ZERO;
                self.angular_vel = 0.0;
            }
        } else {
            self.still_secs = 0.0;
        }

        impact
    }

    fn wake(&mut self) {
        self.asleep = false;
        self.still_secs = 0.0;
    }
}

impl PhysicsBody for SimpleBody {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
    }

    fn linear_velocity(&self) -> Vec2 {
        self.vel
    }

    fn angular_velocity(&self) -> f32 {
        self.angular_vel
    }

    fn set_velocity(&mut self, linear: Vec2, angular: f32) {
        self.vel = linear;
        self.angular_vel = angular;
        self.wake();
    }

    fn is_asleep(&self) -> bool {
        self.asleep
    }

    fn set_mode(&mut self, mode: BodyMode) {
        self.mode = mode;
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }

    fn set_collidable(&mut self, enabled: bool) {
        self.collidable = enabled;
    }

    fn set_damping(&mut self, linear: f32, angular: f32) {
        self.linear_damping = linear;
        self.angular_damping = angular;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        self.vel += impulse / self.mass;
        self.wake();
    }

    fn force_sleep(&mut self) {
        self.asleep = true;
        self.vel = Vec2::ZERO;
        self.angular_vel = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn test_dynamic_body_falls() {
        let mut body = SimpleBody::new(Vec2::new(0.0, 5.0), Vec2::splat(0.4), 1.0);
        for _ in 0..60 {
            body.step(SIM_DT);
        }
        assert!(body.pos.y < 5.0);
        assert!(body.vel.y < 0.0);
    }

    #[test]
    fn test_kinematic_body_ignores_gravity() {
        let mut body = SimpleBody::new(Vec2::new(0.0, 5.0), Vec2::splat(0.4), 1.0);
        body.set_mode(BodyMode::Kinematic);
        for _ in 0..60 {
            assert_eq!(body.step(SIM_DT), None);
        }
        assert_eq!(body.pos, Vec2::new(0.0, 5.0));
    }

    #[test]
    fn test_floor_impact_reported_once() {
        let mut body = SimpleBody::new(Vec2::new(0.0, 2.0), Vec2::splat(0.4), 1.0);
        let mut impacts = Vec::new();
        for _ in 0..240 {
            if let Some(speed) = body.step(SIM_DT) {
                impacts.push(speed);
            }
        }
        assert!(!impacts.is_empty());
        assert!(impacts[0] > 1.0);
        // Body never ends below the floor
        assert!(body.pos.y >= body.floor_y + body.half_extents.y - 1e-4);
    }

    #[test]
    fn test_body_falls_asleep_at_rest() {
        let mut body = SimpleBody::new(Vec2::new(0.0, 0.5), Vec2::splat(0.4), 1.0);
        for _ in 0..600 {
            body.step(SIM_DT);
        }
        assert!(body.asleep);
        assert_eq!(body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_impulse_wakes_body() {
        let mut body = SimpleBody::new(Vec2::new(0.0, 0.4), Vec2::splat(0.4), 2.0);
        body.force_sleep();
        body.apply_impulse(Vec2::new(0.0, -8.0));
        assert!(!body.asleep);
        assert_eq!(body.vel, Vec2::new(0.0, -4.0));
    }
}
