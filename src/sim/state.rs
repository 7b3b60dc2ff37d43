//! Match state and core simulation types
//!
//! Everything that must survive a save or replay deterministically lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::box_center;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Title screen, nothing simulated
    Menu,
    /// Active gameplay
    Playing,
    /// All enemies defeated
    Victory,
    /// Player health reached zero
    Defeat,
}

/// The player's avatar. Only input moves it; the simulation never does.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: PLAYER_SIZE,
        }
    }
}

impl Player {
    pub fn center(&self) -> Vec2 {
        box_center(self.pos, self.size)
    }
}

/// A hostile entity bouncing around the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub health: u32,
    /// Frames since the last shot; drives both firing and the charging flash
    pub attack_timer: u32,
    /// Set while the brief post-shot charging window is visible
    pub attacking: bool,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, attack_timer: u32) -> Self {
        Self {
            id,
            pos,
            vel,
            size: ENEMY_SIZE,
            health: ENEMY_MAX_HEALTH,
            attack_timer,
            attacking: false,
        }
    }

    pub fn center(&self) -> Vec2 {
        box_center(self.pos, self.size)
    }

    /// Remaining health as 0..=1 for health-bar rendering
    pub fn health_ratio(&self) -> f32 {
        self.health as f32 / ENEMY_MAX_HEALTH as f32
    }
}

/// A thrown sandbag in flight
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Sandbag {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// An enemy shot. Tracking shots re-aim at the player every frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyProjectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub tracking: bool,
}

/// A visual-only spark spawned by collisions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in frames
    pub life: u32,
}

/// Maximum live particles; the oldest are evicted past this
pub const MAX_PARTICLES: usize = 256;

/// Aiming state mirrored from the input handler for the renderer
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AimState {
    pub dragging: bool,
    pub pointer: Vec2,
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Match seed for reproducibility
    pub seed: u64,
    /// Match RNG; all randomness (spawns, bursts) draws from here
    pub rng: Pcg32,
    /// Variant configuration, fixed for the match
    pub tuning: Tuning,
    pub phase: MatchPhase,
    pub player: Player,
    pub player_health: u32,
    pub score: u64,
    /// Elapsed frames in the current match
    pub frames: u64,
    /// Frames until the next throw is accepted
    pub throw_cooldown: u32,
    pub ultimate_charge: u32,
    pub ultimate_cooldown: u32,
    /// Drag-in-progress state, read by the renderer for the aim line
    pub aim: AimState,
    pub enemies: Vec<Enemy>,
    pub sandbags: Vec<Sandbag>,
    pub projectiles: Vec<EnemyProjectile>,
    /// Visual particles (not gameplay-affecting, not saved)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    next_id: u32,
}

impl GameState {
    /// Create a state on the menu screen with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a state with an explicit variant configuration
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: MatchPhase::Menu,
            player: Player::default(),
            player_health: PLAYER_MAX_HEALTH,
            score: 0,
            frames: 0,
            throw_cooldown: 0,
            ultimate_charge: 0,
            ultimate_cooldown: 0,
            aim: AimState::default(),
            enemies: Vec::new(),
            sandbags: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset everything and enter Playing with the fixed opening enemy.
    ///
    /// Used for both "start" from the menu and "play again" from an end
    /// screen.
    pub fn start_match(&mut self) {
        self.phase = MatchPhase::Playing;
        self.player = Player::default();
        self.player_health = PLAYER_MAX_HEALTH;
        self.score = 0;
        self.frames = 0;
        self.throw_cooldown = 0;
        self.ultimate_charge = 0;
        self.ultimate_cooldown = 0;
        self.aim = AimState::default();
        self.enemies.clear();
        self.sandbags.clear();
        self.projectiles.clear();
        self.particles.clear();

        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(
            id,
            Vec2::new(ENEMY_START_X, ENEMY_START_Y),
            Vec2::new(ENEMY_START_VX, ENEMY_START_VY),
            0,
        ));

        log::info!("Match started (seed {})", self.seed);
    }

    /// Leave an end screen for the title screen
    pub fn return_to_menu(&mut self) {
        self.phase = MatchPhase::Menu;
    }

    /// Push a reinforcement enemy at a randomized spot near the back of the
    /// arena, with randomized velocity and a randomized attack-timer offset
    /// so reinforcements don't fire in lockstep.
    pub fn spawn_enemy(&mut self) {
        let x = self.rng.random_range(520.0..720.0);
        let y = self.rng.random_range(40.0..240.0);
        let vx = self.rng.random_range(1.0..2.5) * flip(&mut self.rng);
        let vy = self.rng.random_range(0.5..1.5) * flip(&mut self.rng);
        let attack_timer = self.rng.random_range(0..ATTACK_INTERVAL_FRAMES);

        let id = self.next_entity_id();
        self.enemies
            .push(Enemy::new(id, Vec2::new(x, y), Vec2::new(vx, vy), attack_timer));
        log::info!("Enemy {} spawned at ({:.0}, {:.0})", id, x, y);
    }

    /// Spawn a sandbag from the player toward `dir` with the given power.
    ///
    /// Silently ignored outside Playing, during the throw cooldown, or for a
    /// zero direction. Returns whether a bag was thrown.
    pub fn throw_sandbag(&mut self, dir: Vec2, power: f32) -> bool {
        if self.phase != MatchPhase::Playing || self.throw_cooldown > 0 {
            return false;
        }
        let dir = dir.normalize_or_zero();
        if dir == Vec2::ZERO {
            return false;
        }
        let power = power.clamp(0.0, MAX_THROW_POWER);

        let id = self.next_entity_id();
        self.sandbags.push(Sandbag {
            id,
            pos: self.player.center(),
            vel: dir * power,
        });
        self.throw_cooldown = THROW_COOLDOWN_FRAMES;
        true
    }

    /// Fire the ultimate: clear all enemy projectiles, hit every enemy for
    /// heavy damage, and fill the arena with sparks.
    ///
    /// A pure no-op unless charge and cooldown allow it. Returns whether it
    /// fired.
    pub fn use_ultimate(&mut self) -> bool {
        if self.phase != MatchPhase::Playing
            || self.ultimate_charge < ULTIMATE_COST
            || self.ultimate_cooldown > 0
        {
            return false;
        }
        self.ultimate_charge -= ULTIMATE_COST;
        self.ultimate_cooldown = ULTIMATE_COOLDOWN_FRAMES;
        self.projectiles.clear();

        for enemy in &mut self.enemies {
            enemy.health = enemy.health.saturating_sub(ULTIMATE_DAMAGE);
        }
        let killed = self.enemies.iter().filter(|e| e.health == 0).count();
        self.score += KILL_SCORE * killed as u64;
        self.enemies.retain(|e| e.health > 0);

        for _ in 0..ULTIMATE_BURST_COUNT {
            let pos = Vec2::new(
                self.rng.random_range(0.0..ARENA_WIDTH),
                self.rng.random_range(0.0..ARENA_HEIGHT),
            );
            let vel = Vec2::new(
                self.rng.random_range(-2.0..2.0),
                self.rng.random_range(-2.0..2.0),
            );
            self.push_particle(pos, vel);
        }

        log::info!("Ultimate fired: {} enemies destroyed", killed);
        true
    }

    /// Spawn a burst of sparks at a collision point
    pub fn spawn_burst(&mut self, pos: Vec2, count: usize) {
        for _ in 0..count {
            let vel = Vec2::new(
                self.rng.random_range(-2.0..2.0),
                self.rng.random_range(-2.0..2.0),
            );
            self.push_particle(pos, vel);
        }
    }

    fn push_particle(&mut self, pos: Vec2, vel: Vec2) {
        if self.particles.len() >= MAX_PARTICLES {
            self.particles.remove(0);
        }
        let id = self.next_entity_id();
        self.particles.push(Particle {
            id,
            pos,
            vel,
            life: PARTICLE_LIFE_FRAMES,
        });
    }
}

fn flip(rng: &mut Pcg32) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_match_state() {
        let mut state = GameState::new(7);
        assert_eq!(state.phase, MatchPhase::Menu);

        state.start_match();
        assert_eq!(state.phase, MatchPhase::Playing);
        assert_eq!(state.player_health, 100);
        assert_eq!(state.score, 0);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 300);
        assert_eq!(state.ultimate_charge, 0);
    }

    #[test]
    fn test_throw_gated_by_cooldown() {
        let mut state = GameState::new(7);
        state.start_match();

        assert!(state.throw_sandbag(Vec2::new(1.0, 0.0), 5.0));
        assert_eq!(state.sandbags.len(), 1);
        assert_eq!(state.throw_cooldown, THROW_COOLDOWN_FRAMES);

        // Second throw during cooldown is ignored
        assert!(!state.throw_sandbag(Vec2::new(1.0, 0.0), 5.0));
        assert_eq!(state.sandbags.len(), 1);
    }

    #[test]
    fn test_throw_ignored_outside_playing() {
        let mut state = GameState::new(7);
        assert!(!state.throw_sandbag(Vec2::new(1.0, 0.0), 5.0));
        assert!(state.sandbags.is_empty());
    }

    #[test]
    fn test_throw_power_is_clamped() {
        let mut state = GameState::new(7);
        state.start_match();
        assert!(state.throw_sandbag(Vec2::new(1.0, 0.0), 99.0));
        assert!((state.sandbags[0].vel.length() - MAX_THROW_POWER).abs() < 0.001);
    }

    #[test]
    fn test_spawn_enemy_is_seed_deterministic() {
        let mut a = GameState::new(123);
        let mut b = GameState::new(123);
        a.start_match();
        b.start_match();
        a.spawn_enemy();
        b.spawn_enemy();
        assert_eq!(a.enemies[1].pos, b.enemies[1].pos);
        assert_eq!(a.enemies[1].vel, b.enemies[1].vel);
        assert_eq!(a.enemies[1].attack_timer, b.enemies[1].attack_timer);
        // Spawns land near the back of the arena with full health
        assert!(a.enemies[1].pos.x >= 520.0 && a.enemies[1].pos.x < 720.0);
        assert_eq!(a.enemies[1].health, ENEMY_MAX_HEALTH);
    }

    #[test]
    fn test_particle_cap_evicts_oldest() {
        let mut state = GameState::new(7);
        state.start_match();
        state.spawn_burst(Vec2::new(100.0, 100.0), MAX_PARTICLES + 10);
        assert_eq!(state.particles.len(), MAX_PARTICLES);
        // Oldest ids were evicted, so the first survivor is a later id
        assert!(state.particles[0].id > state.enemies[0].id + 10);
    }
}
