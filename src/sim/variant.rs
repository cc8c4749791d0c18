//! Piece variant catalog
//!
//! Variants are the data-driven equivalent of prefabs: each one bundles the
//! physical feel, settle thresholds, and score value of a cat shape. The
//! spawner samples them uniformly with its seeded RNG.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Settle-detection thresholds for one variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettleTuning {
    /// Seconds the body must stay asleep before it counts as settled
    pub settle_after: f32,
    /// Linear speed (m/s) below which the body counts as slow
    pub linear_speed_threshold: f32,
    /// Angular speed (deg/s) below which the body counts as slow
    pub angular_speed_threshold: f32,
    /// Seconds the body must stay below both speed thresholds to settle
    pub slow_time_to_settle: f32,
    /// Safety: force-settle after this many seconds even if still bouncing
    pub max_active_seconds: f32,
}

impl Default for SettleTuning {
    fn default() -> Self {
        Self {
            settle_after: 0.5,
            linear_speed_threshold: 0.15,
            angular_speed_threshold: 5.0,
            slow_time_to_settle: 0.35,
            max_active_seconds: 8.0,
        }
    }
}

/// One cat shape the spawner can produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceVariant {
    pub name: String,
    pub mass: f32,
    /// Half extents of the visual bounds, used for clamping and stacking
    pub half_extents: Vec2,
    /// Extra damping once released, to help the body come to rest
    pub released_linear_damping: f32,
    pub released_angular_damping: f32,
    /// Degrees per rotate press
    pub rotation_step: f32,
    /// Downward impulse magnitude for fast drop
    pub drop_impulse: f32,
    /// Convert to kinematic on settle to eliminate long-tail jitter
    pub freeze_on_settle: bool,
    /// Score granted when this variant settles
    pub points: u32,
    /// Relative impact speed that triggers a thud cue
    pub thud_velocity: f32,
    #[serde(default)]
    pub settle: SettleTuning,
}

impl Default for PieceVariant {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            mass: 1.0,
            half_extents: Vec2::new(0.4, 0.4),
            released_linear_damping: 1.5,
            released_angular_damping: 3.0,
            rotation_step: 90.0,
            drop_impulse: 8.0,
            freeze_on_settle: true,
            points: 1,
            thud_velocity: 4.5,
            settle: SettleTuning::default(),
        }
    }
}

impl PieceVariant {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// Ordered collection of piece variants.
///
/// May be empty; the spawner treats that as a configuration error rather
/// than a panic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantCatalog {
    pub variants: Vec<PieceVariant>,
}

impl VariantCatalog {
    pub fn new(variants: Vec<PieceVariant>) -> Self {
        Self { variants }
    }

    /// The stock four-cat set
    pub fn standard() -> Self {
        let sticky = PieceVariant {
            released_linear_damping: 2.5,
            released_angular_damping: 5.0,
            points: 1,
            ..PieceVariant::named("Sticky")
        };
        let slippery = PieceVariant {
            released_linear_damping: 0.8,
            released_angular_damping: 1.5,
            points: 2,
            ..PieceVariant::named("Slippery")
        };
        let heavy = PieceVariant {
            mass: 2.5,
            half_extents: Vec2::new(0.5, 0.35),
            drop_impulse: 12.0,
            thud_velocity: 3.5,
            points: 2,
            ..PieceVariant::named("Heavy")
        };
        // Bouncy bodies rarely report asleep; the slow-velocity settle path
        // carries them. Left dynamic after settle so the stack stays lively.
        let bouncy = PieceVariant {
            freeze_on_settle: false,
            thud_velocity: 5.0,
            points: 3,
            ..PieceVariant::named("Bouncy")
        };
        Self::new(vec![sticky, slippery, heavy, bouncy])
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Pick one variant uniformly at random, or `None` if the catalog is
    /// empty.
    pub fn sample(&self, rng: &mut Pcg32) -> Option<&PieceVariant> {
        if self.variants.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.variants.len());
        self.variants.get(index)
    }
}
