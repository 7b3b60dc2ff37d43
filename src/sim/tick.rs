//! Per-frame simulation step
//!
//! Advances a match by exactly one frame, deterministically. The operation
//! order inside `tick` is observable behavior and must not be rearranged:
//! timers, spawning, enemy motion and attacks, sandbag motion, projectile
//! motion, the three collision passes, particles, ultimate, phase check.

use glam::Vec2;

use super::collision::{
    bounce_in_arena, boxes_overlap, out_of_bounds, overlap_midpoint, sandbag_out_of_play,
};
use super::state::{AimState, EnemyProjectile, GameState, MatchPhase};
use crate::consts::*;
use crate::tuning::{EnemyRoster, SandbagPhysics};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer position while a throw drag is in progress
    pub aim: Option<Vec2>,
    /// Fire the ultimate this frame (also reachable via
    /// `GameState::use_ultimate` from a button handler)
    pub ultimate: bool,
}

/// Convert a released drag gesture into a throw direction and power.
///
/// Returns `None` for drags at or below the minimum distance. Power grows
/// with drag length and caps at `MAX_THROW_POWER`.
pub fn drag_to_throw(player_center: Vec2, release: Vec2) -> Option<(Vec2, f32)> {
    let delta = release - player_center;
    let distance = delta.length();
    if distance <= MIN_DRAG_DISTANCE {
        return None;
    }
    let power = (distance / THROW_POWER_DIVISOR).min(MAX_THROW_POWER);
    Some((delta / distance, power))
}

/// Advance the match by one frame. A strict no-op outside Playing.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != MatchPhase::Playing {
        return;
    }

    // 1. Timers and aim mirror
    state.frames += 1;
    state.throw_cooldown = state.throw_cooldown.saturating_sub(1);
    state.ultimate_cooldown = state.ultimate_cooldown.saturating_sub(1);
    state.aim = match input.aim {
        Some(pointer) => AimState {
            dragging: true,
            pointer,
        },
        None => AimState::default(),
    };

    // 2. Reinforcement scheduling
    if let EnemyRoster::Horde { spawn_interval } = state.tuning.roster {
        if spawn_interval > 0 && state.frames % spawn_interval as u64 == 0 {
            state.spawn_enemy();
        }
    }

    // 3. Enemy motion and attacks
    let player_center = state.player.center();
    let tracking = state.tuning.tracking_projectiles;
    let mut muzzles: Vec<Vec2> = Vec::new();
    for enemy in &mut state.enemies {
        enemy.pos += enemy.vel;
        enemy.vel = bounce_in_arena(enemy.pos, enemy.vel, enemy.size);

        enemy.attack_timer += 1;
        if enemy.attack_timer > ATTACK_INTERVAL_FRAMES && !enemy.attacking {
            enemy.attacking = true;
            enemy.attack_timer = 0;
            muzzles.push(enemy.center());
        }
        if enemy.attacking && enemy.attack_timer > ATTACK_FLASH_FRAMES {
            enemy.attacking = false;
        }
    }
    for muzzle in muzzles {
        let dir = (player_center - muzzle).normalize_or_zero();
        let speed = if tracking {
            TRACKING_SPEED
        } else {
            PROJECTILE_SPEED
        };
        let id = state.next_entity_id();
        state.projectiles.push(EnemyProjectile {
            id,
            pos: muzzle - Vec2::splat(PROJECTILE_SIZE / 2.0),
            vel: dir * speed,
            tracking,
        });
    }

    // 4. Sandbag motion
    match state.tuning.sandbag_physics {
        SandbagPhysics::Lobbed { gravity } => {
            for bag in &mut state.sandbags {
                bag.pos += bag.vel;
                bag.vel.y += gravity;
            }
            state
                .sandbags
                .retain(|b| !sandbag_out_of_play(b.pos, SANDBAG_SIZE));
        }
        SandbagPhysics::Rolling { friction, min_speed } => {
            for bag in &mut state.sandbags {
                bag.pos += bag.vel;
                bag.vel *= friction;
                if bag.vel.length() < min_speed {
                    bag.vel = Vec2::ZERO;
                }
            }
            state
                .sandbags
                .retain(|b| b.vel != Vec2::ZERO && !sandbag_out_of_play(b.pos, SANDBAG_SIZE));
        }
    }

    // 5. Enemy projectile motion
    for proj in &mut state.projectiles {
        if proj.tracking {
            let center = proj.pos + Vec2::splat(PROJECTILE_SIZE / 2.0);
            proj.vel = (player_center - center).normalize_or_zero() * TRACKING_SPEED;
        }
        proj.pos += proj.vel;
    }
    state
        .projectiles
        .retain(|p| !out_of_bounds(p.pos, PROJECTILE_SIZE, PRUNE_MARGIN));

    // Collision bursts are deferred so particle spawning doesn't interleave
    // with the passes below.
    let mut bursts: Vec<(Vec2, usize)> = Vec::new();

    // 6. Sandbag vs enemy: first enemy per bag in insertion order
    let mut spent_bags: Vec<u32> = Vec::new();
    for bag in &state.sandbags {
        for enemy in &mut state.enemies {
            if boxes_overlap(bag.pos, SANDBAG_SIZE, enemy.pos, enemy.size) {
                enemy.health = enemy.health.saturating_sub(SANDBAG_DAMAGE);
                state.score += HIT_SCORE;
                state.ultimate_charge += HIT_CHARGE;
                bursts.push((bag.pos, HIT_BURST_COUNT));
                spent_bags.push(bag.id);
                break;
            }
        }
    }
    let mut killed = 0u32;
    state.enemies.retain(|e| {
        if e.health == 0 {
            killed += 1;
            false
        } else {
            true
        }
    });
    if killed > 0 {
        state.score += KILL_SCORE * killed as u64;
        state.ultimate_charge += KILL_CHARGE * killed;
        log::info!("{} enemies defeated (score {})", killed, state.score);
    }
    state.sandbags.retain(|b| !spent_bags.contains(&b.id));

    // 7. Sandbag vs enemy projectile (parry): first match per bag, both die
    let mut parried_bags: Vec<u32> = Vec::new();
    let mut parried_shots: Vec<u32> = Vec::new();
    for bag in &state.sandbags {
        for proj in &state.projectiles {
            if parried_shots.contains(&proj.id) {
                continue;
            }
            if boxes_overlap(bag.pos, SANDBAG_SIZE, proj.pos, PROJECTILE_SIZE) {
                state.score += PARRY_SCORE;
                state.ultimate_charge += PARRY_CHARGE;
                bursts.push((
                    overlap_midpoint(bag.pos, SANDBAG_SIZE, proj.pos, PROJECTILE_SIZE),
                    PARRY_BURST_COUNT,
                ));
                parried_bags.push(bag.id);
                parried_shots.push(proj.id);
                break;
            }
        }
    }
    state.sandbags.retain(|b| !parried_bags.contains(&b.id));
    state.projectiles.retain(|p| !parried_shots.contains(&p.id));

    // 8. Enemy projectile vs player
    let player_pos = state.player.pos;
    let player_size = state.player.size;
    let mut player_hits = 0u32;
    state.projectiles.retain(|p| {
        if boxes_overlap(p.pos, PROJECTILE_SIZE, player_pos, player_size) {
            player_hits += 1;
            false
        } else {
            true
        }
    });
    if player_hits > 0 {
        state.player_health = state
            .player_health
            .saturating_sub(PROJECTILE_DAMAGE * player_hits);
    }

    for (pos, count) in bursts {
        state.spawn_burst(pos, count);
    }

    // 9. Particle integration
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);

    // 10. Ultimate, state-gated (silently ignored when ungated)
    if input.ultimate {
        state.use_ultimate();
    }

    // Phase evaluation: defeat takes precedence over victory
    if state.player_health == 0 {
        state.phase = MatchPhase::Defeat;
        log::info!("Defeat after {} frames (score {})", state.frames, state.score);
    } else if state.enemies.is_empty() && state.frames > MIN_VICTORY_FRAMES {
        state.phase = MatchPhase::Victory;
        log::info!("Victory after {} frames (score {})", state.frames, state.score);
    }
}
