//! Spawn lifecycle coordination
//!
//! Owns at most one controllable piece at a time: spawns a random variant
//! when the slot is empty and the respawn delay has elapsed, routes player
//! input to it, keeps the pre-drop piece inside the visible field, and
//! hands the piece back to the caller once it settles.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::PhysicsBody;
use super::piece::{Piece, PieceState};
use super::state::GameEvent;
use super::tick::TickInput;
use super::variant::{PieceVariant, VariantCatalog};
use crate::consts;

/// Spawn flow and clamping parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnerConfig {
    pub spawn_point: Vec2,
    /// Seconds between a settle and the next spawn
    pub respawn_delay: f32,
    /// Keep the pre-drop piece this far inside the view edges
    pub side_padding: f32,
    /// World-space horizontal bounds of the camera view
    pub view_min_x: f32,
    pub view_max_x: f32,
    /// Horizontal steering speed while pre-drop (m/s)
    pub move_speed: f32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            spawn_point: Vec2::new(0.0, consts::SPAWN_Y),
            respawn_delay: consts::RESPAWN_DELAY,
            side_padding: consts::SIDE_PADDING,
            view_min_x: consts::VIEW_MIN_X,
            view_max_x: consts::VIEW_MAX_X,
            move_speed: consts::MOVE_SPEED,
        }
    }
}

/// Single-slot spawner. `F` is the injected body factory - the seam where
/// the host's physics engine instantiates a backend body for a variant.
pub struct Spawner<B, F> {
    config: SpawnerConfig,
    catalog: VariantCatalog,
    rng: Pcg32,
    factory: F,
    current: Option<Piece<B>>,
    /// Accumulated simulation time (seconds)
    time: f32,
    next_spawn_at: f32,
    /// Set on a configuration fault; no spawn attempts until corrected
    parked: bool,
}

impl<B, F> Spawner<B, F>
where
    B: PhysicsBody,
    F: FnMut(&PieceVariant, Vec2) -> Option<B>,
{
    pub fn new(config: SpawnerConfig, catalog: VariantCatalog, seed: u64, factory: F) -> Self {
        Self {
            config,
            catalog,
            rng: Pcg32::seed_from_u64(seed),
            factory,
            current: None,
            time: 0.0,
            next_spawn_at: 0.0, // first spawn is immediate
            parked: false,
        }
    }

    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    pub fn current(&self) -> Option<&Piece<B>> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut Piece<B>> {
        self.current.as_mut()
    }

    /// True after a configuration fault (empty catalog or failed factory)
    pub fn is_parked(&self) -> bool {
        self.parked
    }

    /// Replace the catalog and clear any configuration fault.
    pub fn set_catalog(&mut self, catalog: VariantCatalog) {
        self.catalog = catalog;
        self.parked = false;
    }

    /// Restart the spawn cycle with a fresh seed, keeping the factory.
    pub fn reset(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
        self.current = None;
        self.time = 0.0;
        self.next_spawn_at = 0.0;
        self.parked = false;
    }

    /// Advance one tick. A freshly settled piece is returned so the caller
    /// can move it into the stack.
    pub fn advance(
        &mut self,
        input: &TickInput,
        dt: f32,
        events: &mut Vec<GameEvent>,
    ) -> Option<Piece<B>> {
        self.time += dt;

        if self.current.is_none() && !self.parked && self.time >= self.next_spawn_at {
            self.spawn(events);
        }

        let piece = self.current.as_mut()?;

        // Pre-drop steering: movement is level-triggered, rotate/drop edge
        let dir = (input.right as i8 - input.left as i8) as f32;
        if dir != 0.0 {
            piece.move_pre_drop(dir, dt);
        }
        if input.rotate {
            piece.rotate_pre_drop();
        }
        if input.drop {
            let was_pre_drop = piece.state() == PieceState::PreDrop;
            if piece.release() {
                events.push(GameEvent::PieceReleased);
            }
            if !was_pre_drop {
                piece.fast_drop(); // second press = fast drop
            }
        }

        // Keep the pre-drop piece on-screen horizontally
        if piece.state() == PieceState::PreDrop {
            let margin = piece.variant().half_extents.x + self.config.side_padding;
            let min_x = self.config.view_min_x + margin;
            let max_x = self.config.view_max_x - margin;
            if min_x <= max_x {
                piece.clamp_x(min_x, max_x);
            }
        }

        let _ = piece.advance(dt);

        let settled = self
            .current
            .take_if(|p| p.state() == PieceState::Settled)?;
        events.push(GameEvent::PieceSettled {
            points: settled.points(),
        });
        self.next_spawn_at = self.time + self.config.respawn_delay;
        Some(settled)
    }

    fn spawn(&mut self, events: &mut Vec<GameEvent>) {
        let Some(variant) = self.catalog.sample(&mut self.rng).cloned() else {
            log::error!("spawner: variant catalog is empty, spawning disabled");
            self.parked = true;
            return;
        };

        match (self.factory)(&variant, self.config.spawn_point) {
            Some(body) => {
                self.current = Some(Piece::new(variant, self.config.move_speed, body));
                events.push(GameEvent::PieceSpawned);
            }
            None => {
                log::error!(
                    "spawner: body factory failed for variant '{}', spawning disabled",
                    variant.name
                );
                self.parked = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::SimpleBody;

    const DT: f32 = 0.0625;

    type BodyFactory = fn(&PieceVariant, Vec2) -> Option<SimpleBody>;
    type TestSpawner = Spawner<SimpleBody, BodyFactory>;

    fn make_body(variant: &PieceVariant, pos: Vec2) -> Option<SimpleBody> {
        Some(SimpleBody::new(pos, variant.half_extents, variant.mass))
    }

    fn spawner() -> TestSpawner {
        Spawner::new(
            SpawnerConfig::default(),
            VariantCatalog::standard(),
            42,
            make_body,
        )
    }

    fn drive(
        s: &mut TestSpawner,
        input: &TickInput,
        events: &mut Vec<GameEvent>,
    ) -> Option<Piece<SimpleBody>> {
        s.advance(input, DT, events)
    }

    /// Settle the current piece via the slow-velocity path.
    fn settle_current(
        s: &mut TestSpawner,
        events: &mut Vec<GameEvent>,
    ) -> Piece<SimpleBody> {
        let drop = TickInput {
            drop: true,
            ..TickInput::default()
        };
        let _ = drive(s, &drop, events);
        if let Some(p) = s.current_mut() {
            p.body_mut().vel = Vec2::ZERO;
            p.body_mut().angular_vel = 0.0;
        }
        let idle = TickInput::default();
        for _ in 0..200 {
            if let Some(p) = drive(s, &idle, events) {
                return p;
            }
            if let Some(p) = s.current_mut() {
                p.body_mut().vel = Vec2::ZERO;
                p.body_mut().angular_vel = 0.0;
            }
        }
        panic!("piece never settled");
    }

    #[test]
    fn test_first_spawn_is_immediate() {
        let mut s = spawner();
        let mut events = Vec::new();
        assert!(s.current().is_none());
        let _ = drive(&mut s, &TickInput::default(), &mut events);
        assert!(s.current().is_some());
        assert_eq!(events, vec![GameEvent::PieceSpawned]);
    }

    #[test]
    fn test_single_slot_until_settle() {
        let mut s = spawner();
        let mut events = Vec::new();
        for _ in 0..50 {
            let _ = drive(&mut s, &TickInput::default(), &mut events);
        }
        // Still only the one spawn; the slot is occupied
        let spawns = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PieceSpawned))
            .count();
        assert_eq!(spawns, 1);
    }

    #[test]
    fn test_settle_emits_points_and_schedules_respawn() {
        let mut s = spawner();
        let mut events = Vec::new();
        let settled = settle_current(&mut s, &mut events);
        assert_eq!(settled.state(), PieceState::Settled);
        assert!(events.contains(&GameEvent::PieceSettled {
            points: settled.points()
        }));
        assert!(s.current().is_none());

        // No respawn until respawn_delay (0.25 s = 4 ticks at DT) elapses
        events.clear();
        let idle = TickInput::default();
        for _ in 0..3 {
            let _ = drive(&mut s, &idle, &mut events);
            assert!(s.current().is_none());
        }
        let _ = drive(&mut s, &idle, &mut events);
        assert!(s.current().is_some());
        assert_eq!(events, vec![GameEvent::PieceSpawned]);
    }

    #[test]
    fn test_drop_composition_first_release_then_fast_drop() {
        let mut s = spawner();
        let mut events = Vec::new();
        let drop = TickInput {
            drop: true,
            ..TickInput::default()
        };
        let _ = drive(&mut s, &drop, &mut events);
        assert!(events.contains(&GameEvent::PieceReleased));
        // First press only releases; no fast-drop impulse yet (gravity has
        // barely acted for one tick)
        let vel_after_release = s.current().unwrap().body().vel;
        let drop_impulse = s.current().unwrap().variant().drop_impulse;
        let mass = s.current().unwrap().variant().mass;
        assert!(vel_after_release.y.abs() < drop_impulse / mass * 0.5);

        // Second press while active adds the impulse
        events.clear();
        let before = s.current().unwrap().body().vel.y;
        let _ = drive(&mut s, &drop, &mut events);
        let after = s.current().unwrap().body().vel.y;
        assert!(!events.contains(&GameEvent::PieceReleased));
        assert!(after <= before - drop_impulse / mass + 0.1);
    }

    #[test]
    fn test_horizontal_clamp_pre_drop() {
        // Camera maps to x in [-5, 5], half width 0.4, padding 0.2:
        // pre-drop x must stay inside [-4.4, 4.4]
        let mut catalog = VariantCatalog::standard();
        for v in &mut catalog.variants {
            v.half_extents = Vec2::new(0.4, 0.4);
        }
        let mut s: TestSpawner = Spawner::new(SpawnerConfig::default(), catalog, 42, make_body);
        let mut events = Vec::new();
        let right = TickInput {
            right: true,
            ..TickInput::default()
        };
        for _ in 0..400 {
            let _ = drive(&mut s, &right, &mut events);
            let x = s.current().unwrap().body().pos.x;
            assert!(x <= 4.4 + 1e-5, "x = {x}");
        }
        assert!((s.current().unwrap().body().pos.x - 4.4).abs() < 1e-5);

        let left = TickInput {
            left: true,
            ..TickInput::default()
        };
        for _ in 0..800 {
            let _ = drive(&mut s, &left, &mut events);
            let x = s.current().unwrap().body().pos.x;
            assert!(x >= -4.4 - 1e-5, "x = {x}");
        }
        assert!((s.current().unwrap().body().pos.x + 4.4).abs() < 1e-5);
    }

    #[test]
    fn test_empty_catalog_parks_spawner() {
        let mut s: TestSpawner =
            Spawner::new(SpawnerConfig::default(), VariantCatalog::default(), 1, make_body);
        let mut events = Vec::new();
        for _ in 0..10 {
            let _ = drive(&mut s, &TickInput::default(), &mut events);
        }
        assert!(s.is_parked());
        assert!(s.current().is_none());
        assert!(events.is_empty());

        // Correcting the catalog resumes spawning
        s.set_catalog(VariantCatalog::standard());
        let _ = drive(&mut s, &TickInput::default(), &mut events);
        assert!(s.current().is_some());
    }

    #[test]
    fn test_factory_failure_parks_spawner() {
        let failing = |_: &PieceVariant, _: Vec2| -> Option<SimpleBody> { None };
        let mut s = Spawner::new(
            SpawnerConfig::default(),
            VariantCatalog::standard(),
            1,
            failing,
        );
        let mut events = Vec::new();
        for _ in 0..10 {
            let _ = s.advance(&TickInput::default(), DT, &mut events);
        }
        assert!(s.is_parked());
        assert!(events.is_empty());
    }

    #[test]
    fn test_variant_sequence_deterministic_per_seed() {
        let mut names_a = Vec::new();
        let mut names_b = Vec::new();
        for names in [&mut names_a, &mut names_b] {
            let mut s = spawner();
            let mut events = Vec::new();
            for _ in 0..5 {
                while s.current().is_none() {
                    let _ = drive(&mut s, &TickInput::default(), &mut events);
                }
                names.push(s.current().unwrap().variant().name.clone());
                let _ = settle_current(&mut s, &mut events);
            }
        }
        assert_eq!(names_a, names_b);
    }

    #[test]
    fn test_reset_restarts_cycle() {
        let mut s = spawner();
        let mut events = Vec::new();
        let _ = settle_current(&mut s, &mut events);
        let first_name = {
            let mut fresh = spawner();
            let mut ev = Vec::new();
            let _ = drive(&mut fresh, &TickInput::default(), &mut ev);
            fresh.current().unwrap().variant().name.clone()
        };
        s.reset(42);
        let _ = drive(&mut s, &TickInput::default(), &mut events);
        assert_eq!(s.current().unwrap().variant().name, first_name);
    }
}
