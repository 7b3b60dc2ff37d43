//! Data-driven game balance
//!
//! The game ships two balance profiles that differ in sandbag physics,
//! enemy roster, and projectile behavior. The differences live here as
//! tuning variants on one core instead of two diverging code paths.

use serde::{Deserialize, Serialize};

use crate::consts::{
    ENEMY_SPAWN_INTERVAL_FRAMES, SANDBAG_FRICTION, SANDBAG_GRAVITY, SANDBAG_MIN_SPEED,
};

/// How thrown sandbags decelerate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SandbagPhysics {
    /// Lobbed shot: constant downward gravity bias, pruned off-screen
    Lobbed { gravity: f32 },
    /// Rolling shot: per-frame friction, snapped to rest below a minimum
    /// speed and pruned once stationary
    Rolling { friction: f32, min_speed: f32 },
}

/// How the enemy side is populated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyRoster {
    /// One fixed boss, no reinforcements
    SingleBoss,
    /// Periodic reinforcements while the match runs
    Horde { spawn_interval: u32 },
}

/// Variant configuration for a match, fixed at match start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub sandbag_physics: SandbagPhysics,
    pub roster: EnemyRoster,
    /// Enemy projectiles re-aim at the player every frame instead of flying
    /// their launch trajectory
    pub tracking_projectiles: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            sandbag_physics: SandbagPhysics::Lobbed {
                gravity: SANDBAG_GRAVITY,
            },
            roster: EnemyRoster::Horde {
                spawn_interval: ENEMY_SPAWN_INTERVAL_FRAMES,
            },
            tracking_projectiles: true,
        }
    }
}

impl Tuning {
    /// Duel profile: a lone boss, lobbed bags, ballistic shots
    pub fn classic() -> Self {
        Self {
            sandbag_physics: SandbagPhysics::Lobbed {
                gravity: SANDBAG_GRAVITY,
            },
            roster: EnemyRoster::SingleBoss,
            tracking_projectiles: false,
        }
    }

    /// Ground-game build: bags roll to a stop instead of dropping away
    pub fn rolling() -> Self {
        Self {
            sandbag_physics: SandbagPhysics::Rolling {
                friction: SANDBAG_FRICTION,
                min_speed: SANDBAG_MIN_SPEED,
            },
            ..Self::default()
        }
    }
}
