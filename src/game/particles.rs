//! Short-lived point effects: explosion debris, the ship's engine trail and
//! the star-collect sparkle burst. A particle lives for a fixed number of
//! ticks, fades with `life / max_life`, and is dropped the tick its life
//! reaches zero. Debris additionally feels a constant downward gravity bias;
//! trail and sparkle particles keep their simpler straight-line motion.

use std::f64::consts::TAU;

use rand::Rng;
use rand::rngs::SmallRng;

/// Downward acceleration applied to free debris each tick.
const GRAVITY: f64 = 0.1;

/// Sparkles emitted per star pickup, evenly spaced around the circle.
const BURST_COUNT: u32 = 12;

/// Debris emitted per asteroid explosion.
const EXPLOSION_COUNT: u32 = 16;

/// Which motion rule and palette a particle uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    /// Explosion debris; ballistic, pulled down by [`GRAVITY`].
    Debris,
    /// Engine exhaust puff; drifts straight.
    Trail,
    /// Star-pickup sparkle; radiates straight out.
    Sparkle,
}

/// One fading point effect.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub kind: ParticleKind,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub life: u32,
    pub max_life: u32,
    pub size: f64,
    pub color: (u8, u8, u8),
}

impl Particle {
    /// Render alpha in `[0, 1]`; freshly emitted particles are opaque.
    pub fn alpha(&self) -> f64 {
        self.life as f64 / self.max_life as f64
    }

    fn step(&mut self) {
        self.life = self.life.saturating_sub(1);
        self.x += self.vx;
        self.y += self.vy;
        if self.kind == ParticleKind::Debris {
            self.vy += GRAVITY;
        }
    }
}

/// Owns every live particle. Emission appends, [`ParticleSystem::update`]
/// ages and purges; nothing outside ever holds a particle reference.
#[derive(Default)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Age every particle one tick and drop the expired ones.
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.step();
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Debris scattered in random directions from an asteroid kill.
    pub fn emit_explosion(&mut self, rng: &mut SmallRng, x: f64, y: f64) {
        for _ in 0..EXPLOSION_COUNT {
            let angle = rng.gen_range(0.0..TAU);
            let mag = rng.gen_range(1.0..4.5);
            let life = rng.gen_range(22..40);
            let heat = rng.gen_range(120..200);
            self.particles.push(Particle {
                kind: ParticleKind::Debris,
                x,
                y,
                vx: angle.cos() * mag,
                vy: angle.sin() * mag,
                life,
                max_life: life,
                size: rng.gen_range(1.5..3.5),
                color: (255, heat, 40),
            });
        }
    }

    /// One exhaust puff behind the ship, with a little positional jitter.
    pub fn emit_trail(&mut self, rng: &mut SmallRng, x: f64, y: f64) {
        let life = rng.gen_range(14..24);
        self.particles.push(Particle {
            kind: ParticleKind::Trail,
            x: x + rng.gen_range(-2.0..2.0),
            y: y + rng.gen_range(-1.0..1.0),
            vx: rng.gen_range(-0.4..0.4),
            vy: rng.gen_range(0.5..1.5),
            life,
            max_life: life,
            size: rng.gen_range(1.5..3.0),
            color: (120, 185, 255),
        });
    }

    /// Radial sparkle burst for a star pickup: twelve evenly spaced
    /// directions, each with its own random speed.
    pub fn emit_burst(&mut self, rng: &mut SmallRng, x: f64, y: f64) {
        for i in 0..BURST_COUNT {
            let angle = f64::from(i) * TAU / f64::from(BURST_COUNT);
            let mag = rng.gen_range(1.0..3.0);
            self.particles.push(Particle {
                kind: ParticleKind::Sparkle,
                x,
                y,
                vx: angle.cos() * mag,
                vy: angle.sin() * mag,
                life: 28,
                max_life: 28,
                size: rng.gen_range(2.0..3.0),
                color: (255, 220, 100),
            });
        }
    }
}
