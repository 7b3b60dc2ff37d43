//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per 60 Hz frame
//! - Seeded RNG only
//! - Stable insertion-order iteration
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{
    bounce_in_arena, boxes_overlap, out_of_bounds, overlap_midpoint, sandbag_out_of_play,
};
pub use state::{
    AimState, Enemy, EnemyProjectile, GameState, MatchPhase, Particle, Player, Sandbag,
    MAX_PARTICLES,
};
pub use tick::{TickInput, drag_to_throw, tick};
