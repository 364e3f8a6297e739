//! Simulation core: one [`GameSession`] owns every mutable piece of game
//! state (entities, particles, score, phase) and advances it one tick per
//! scheduled frame. Nothing in this module touches the DOM or the canvas; the
//! web glue samples input, forwards wall-clock timestamps for the shot
//! cooldown, and paints from the session after each tick. That keeps the
//! whole core runnable under plain `cargo test` on the host.

use rand::SeedableRng;
use rand::rngs::SmallRng;

pub mod collision;
pub mod config;
pub mod entity;
pub mod input;
pub mod particles;
pub mod spawn;

pub use config::GameConfig;
pub use entity::{Entity, EntityKind, Player, Rect, Viewport};
pub use input::InputSnapshot;
pub use particles::{Particle, ParticleKind, ParticleSystem};

// --- High-score persistence ---------------------------------------------------

/// Persistent best-score storage. Implementations swallow their own backend
/// errors: a failed `save` degrades to an in-memory high score for the
/// session, and a failed `load` reports 0. Gameplay never observes a failure.
pub trait ScoreStore {
    fn load(&self) -> u32;
    fn save(&mut self, score: u32);
}

/// Volatile store used in tests and as the fallback when no persistent
/// backend is available.
#[derive(Default)]
pub struct MemoryStore {
    best: u32,
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.best
    }

    fn save(&mut self, score: u32) {
        self.best = score;
    }
}

// --- Session state machine ----------------------------------------------------

/// Session lifecycle. `Idle` is the pre-start menu state; `GameOver` keeps
/// the final frame's entities frozen on screen until the next `start()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    GameOver,
}

/// One independent game. Owns all entity collections outright (entities never
/// escape), the seeded random source, and the persistence handle.
pub struct GameSession {
    pub config: GameConfig,
    pub viewport: Viewport,
    pub phase: Phase,
    /// Ticks advanced since the last `start()`.
    pub frame: u64,
    pub score: u32,
    pub high_score: u32,
    pub player: Player,
    pub asteroids: Vec<Entity>,
    pub stars: Vec<Entity>,
    pub bullets: Vec<Entity>,
    pub particles: ParticleSystem,
    rng: SmallRng,
    last_shot_ms: Option<f64>,
    store: Box<dyn ScoreStore>,
}

impl GameSession {
    /// Build a session in `Idle`. The seed makes every random decision
    /// (spawns, particle scatter) reproducible for a given input sequence.
    pub fn new(config: GameConfig, viewport: Viewport, seed: u64, store: Box<dyn ScoreStore>) -> Self {
        let high_score = store.load();
        let player = Player::new(&config, viewport);
        Self {
            config,
            viewport,
            phase: Phase::Idle,
            frame: 0,
            score: 0,
            high_score,
            player,
            asteroids: Vec::new(),
            stars: Vec::new(),
            bullets: Vec::new(),
            particles: ParticleSystem::new(),
            rng: SmallRng::seed_from_u64(seed),
            last_shot_ms: None,
            store,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Begin a fresh run from any phase: every collection is emptied, score
    /// and frame counter return to zero, the shot cooldown is rearmed and the
    /// ship returns to its start position.
    pub fn start(&mut self) {
        self.asteroids.clear();
        self.stars.clear();
        self.bullets.clear();
        self.particles.clear();
        self.score = 0;
        self.frame = 0;
        self.last_shot_ms = None;
        self.player = Player::new(&self.config, self.viewport);
        self.phase = Phase::Running;
    }

    /// Advance the simulation one tick. A no-op outside `Running`, which is
    /// what freezes the final frame after game over and the whole scene while
    /// paused (rendering keeps going either way).
    pub fn tick(&mut self, input: &InputSnapshot) {
        if self.phase != Phase::Running {
            return;
        }
        self.frame += 1;

        // Movement first so collisions see this tick's positions.
        self.player.steer(input, self.viewport);
        for a in &mut self.asteroids {
            a.advance();
        }
        for s in &mut self.stars {
            s.advance();
        }
        for b in &mut self.bullets {
            b.advance();
        }

        if let Some(a) = spawn::roll_asteroid(&self.config, &mut self.rng, self.viewport) {
            self.asteroids.push(a);
        }
        if let Some(s) = spawn::roll_star(&self.config, &mut self.rng, self.viewport) {
            self.stars.push(s);
        }

        self.particles.update();
        let (ex, ey) = self.player.engine();
        self.particles.emit_trail(&mut self.rng, ex, ey);

        for (cx, cy) in collision::resolve_bullets(&mut self.bullets, &mut self.asteroids) {
            self.score += self.config.asteroid_points;
            self.particles.emit_explosion(&mut self.rng, cx, cy);
        }
        if collision::player_hit(&self.player.rect, &self.asteroids) {
            // Asteroid contact ends the run before stars are even looked at;
            // an overlapping star on the same tick is deliberately lost.
            self.game_over();
            return;
        }
        for (cx, cy) in collision::collect_stars(&self.player.rect, &mut self.stars) {
            self.score += self.config.star_points;
            self.particles.emit_burst(&mut self.rng, cx, cy);
        }

        let view = self.viewport;
        self.asteroids.retain(|e| !e.off_screen(view));
        self.stars.retain(|e| !e.off_screen(view));
        self.bullets.retain(|e| !e.off_screen(view));
    }

    /// Fire if the wall-clock cooldown has elapsed. `now_ms` comes from the
    /// host's performance clock so the cadence is frame-rate independent.
    pub fn shoot(&mut self, now_ms: f64) {
        if self.phase != Phase::Running {
            return;
        }
        if let Some(last) = self.last_shot_ms {
            if now_ms - last < self.config.shot_cooldown_ms {
                return;
            }
        }
        self.last_shot_ms = Some(now_ms);
        self.bullets.push(spawn::bullet(&self.config, self.player.muzzle()));
    }

    /// Flip between `Running` and `Paused` without disturbing any state.
    /// Ignored in `Idle` and `GameOver`.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            other => other,
        };
    }

    /// Adopt new viewport dimensions and pull the ship back inside them.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
        self.player.clamp_to(self.viewport);
    }

    fn game_over(&mut self) {
        self.phase = Phase::GameOver;
        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.save(self.score);
        }
    }
}
