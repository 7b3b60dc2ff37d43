//! Read-only presentation layer
//!
//! The renderer lives in the host page; once per frame the shell hands it a
//! `FrameSnapshot` of everything drawable. HUD value formatting lives here
//! too so the DOM code stays dumb.

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::sim::state::{GameState, MatchPhase};

/// A plain square box to draw
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BoxSprite {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl BoxSprite {
    fn new(pos: Vec2, size: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            size,
        }
    }
}

/// An enemy with its health bar and charging flash
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnemySprite {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub health_ratio: f32,
    pub attacking: bool,
}

/// A spark with its fade-out opacity
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParticleSprite {
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
}

/// The aim line from the player to the pointer, when a drag is live
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AimSprite {
    pub active: bool,
    pub from_x: f32,
    pub from_y: f32,
    pub to_x: f32,
    pub to_y: f32,
}

/// Everything the host renderer needs for one frame, read-only
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub phase: MatchPhase,
    pub player: BoxSprite,
    pub enemies: Vec<EnemySprite>,
    pub sandbags: Vec<BoxSprite>,
    pub projectiles: Vec<BoxSprite>,
    pub particles: Vec<ParticleSprite>,
    pub aim: AimSprite,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let from = state.player.center();
        Self {
            phase: state.phase,
            player: BoxSprite::new(state.player.pos, state.player.size),
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemySprite {
                    x: e.pos.x,
                    y: e.pos.y,
                    size: e.size,
                    health_ratio: e.health_ratio(),
                    attacking: e.attacking,
                })
                .collect(),
            sandbags: state
                .sandbags
                .iter()
                .map(|b| BoxSprite::new(b.pos, SANDBAG_SIZE))
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|p| BoxSprite::new(p.pos, PROJECTILE_SIZE))
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleSprite {
                    x: p.pos.x,
                    y: p.pos.y,
                    opacity: p.life as f32 / PARTICLE_LIFE_FRAMES as f32,
                })
                .collect(),
            aim: AimSprite {
                active: state.aim.dragging,
                from_x: from.x,
                from_y: from.y,
                to_x: state.aim.pointer.x,
                to_y: state.aim.pointer.y,
            },
        }
    }
}

/// Elapsed time as m:ss from the 60 Hz frame counter
pub fn format_elapsed(frames: u64) -> String {
    let secs = frames / 60;
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Whole seconds remaining on a cooldown, rounded up
pub fn cooldown_secs(frames: u32) -> u32 {
    frames.div_ceil(60)
}

/// Ultimate readiness for the HUD button, e.g. "7/10" or "Ready"
pub fn ultimate_label(charge: u32, cooldown: u32) -> String {
    if cooldown > 0 {
        format!("{}s", cooldown_secs(cooldown))
    } else if charge >= ULTIMATE_COST {
        "Ready".to_string()
    } else {
        format!("{}/{}", charge, ULTIMATE_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(59), "0:00");
        assert_eq!(format_elapsed(60), "0:01");
        assert_eq!(format_elapsed(60 * 75), "1:15");
    }

    #[test]
    fn test_cooldown_secs_rounds_up() {
        assert_eq!(cooldown_secs(0), 0);
        assert_eq!(cooldown_secs(1), 1);
        assert_eq!(cooldown_secs(60), 1);
        assert_eq!(cooldown_secs(61), 2);
        assert_eq!(cooldown_secs(600), 10);
    }

    #[test]
    fn test_ultimate_label() {
        assert_eq!(ultimate_label(3, 0), "3/10");
        assert_eq!(ultimate_label(10, 0), "Ready");
        assert_eq!(ultimate_label(12, 0), "Ready");
        assert_eq!(ultimate_label(10, 120), "2s");
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(3);
        state.start_match();
        let snap = FrameSnapshot::capture(&state);

        assert_eq!(snap.phase, MatchPhase::Playing);
        assert_eq!(snap.enemies.len(), 1);
        assert!((snap.enemies[0].health_ratio - 1.0).abs() < 0.001);
        assert!(!snap.aim.active);

        state.enemies[0].health = 150;
        let snap = FrameSnapshot::capture(&state);
        assert!((snap.enemies[0].health_ratio - 0.5).abs() < 0.001);
    }
}
