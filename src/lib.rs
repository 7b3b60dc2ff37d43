//! Sandbag Siege - a drag-to-throw arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, match state)
//! - `tuning`: Data-driven variant configuration
//! - `ui`: Frame snapshots for the host renderer, HUD formatting
//! - `settings`: Player preferences
//! - `highscores`: Local leaderboard

pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per paint to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Entity box sizes - everything is a square addressed by its top-left corner
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const ENEMY_SIZE: f32 = 80.0;
    pub const SANDBAG_SIZE: f32 = 20.0;
    pub const PROJECTILE_SIZE: f32 = 20.0;

    /// Health pools
    pub const PLAYER_MAX_HEALTH: u32 = 100;
    pub const ENEMY_MAX_HEALTH: u32 = 300;

    /// Damage per hit
    pub const SANDBAG_DAMAGE: u32 = 20;
    pub const PROJECTILE_DAMAGE: u32 = 10;
    pub const ULTIMATE_DAMAGE: u32 = 100;

    /// Scoring
    pub const HIT_SCORE: u64 = 100;
    pub const KILL_SCORE: u64 = 500;
    pub const PARRY_SCORE: u64 = 50;

    /// Ultimate charge awards and gate
    pub const HIT_CHARGE: u32 = 1;
    pub const KILL_CHARGE: u32 = 2;
    pub const PARRY_CHARGE: u32 = 1;
    pub const ULTIMATE_COST: u32 = 10;

    /// Timers, in frames at 60 fps
    pub const ATTACK_INTERVAL_FRAMES: u32 = 120;
    pub const ATTACK_FLASH_FRAMES: u32 = 30;
    pub const ENEMY_SPAWN_INTERVAL_FRAMES: u32 = 600;
    pub const THROW_COOLDOWN_FRAMES: u32 = 30;
    pub const ULTIMATE_COOLDOWN_FRAMES: u32 = 600;
    /// An empty enemy set only counts as victory after this many frames,
    /// so the window before the first spawn tick can't end a fresh match.
    pub const MIN_VICTORY_FRAMES: u64 = 60;

    /// Throw gesture
    pub const MIN_DRAG_DISTANCE: f32 = 20.0;
    pub const THROW_POWER_DIVISOR: f32 = 15.0;
    pub const MAX_THROW_POWER: f32 = 12.0;

    /// Enemy projectile speeds (px per frame)
    pub const PROJECTILE_SPEED: f32 = 3.5;
    pub const TRACKING_SPEED: f32 = 2.5;

    /// Out-of-bounds margin before projectiles are pruned
    pub const PRUNE_MARGIN: f32 = 20.0;

    /// Sandbag deceleration defaults (see `tuning::SandbagPhysics`)
    pub const SANDBAG_GRAVITY: f32 = 0.2;
    pub const SANDBAG_FRICTION: f32 = 0.98;
    pub const SANDBAG_MIN_SPEED: f32 = 0.5;

    /// Particles
    pub const PARTICLE_LIFE_FRAMES: u32 = 30;
    pub const HIT_BURST_COUNT: usize = 8;
    pub const PARRY_BURST_COUNT: usize = 6;
    pub const ULTIMATE_BURST_COUNT: usize = 60;

    /// Start-of-match placements
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 500.0;
    pub const ENEMY_START_X: f32 = 650.0;
    pub const ENEMY_START_Y: f32 = 100.0;
    pub const ENEMY_START_VX: f32 = 2.0;
    pub const ENEMY_START_VY: f32 = 1.0;
}

/// Center of a square box given its top-left corner
#[inline]
pub fn box_center(pos: Vec2, size: f32) -> Vec2 {
    pos + Vec2::splat(size / 2.0)
}
