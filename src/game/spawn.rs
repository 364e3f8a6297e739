//! Probabilistic per-tick spawning and the entity factories. Each tick draws
//! one uniform sample per entity class against its configured chance; on a
//! hit the factory builds an entity with randomized size and speed, placed
//! just above the top edge at a horizontal position that respects the spawn
//! margin. All randomness flows through the session's seeded generator.

use rand::Rng;
use rand::rngs::SmallRng;

use super::config::GameConfig;
use super::entity::{Entity, EntityKind, Rect, Viewport};

/// Roll the per-tick asteroid spawn. `None` on a miss.
pub fn roll_asteroid(cfg: &GameConfig, rng: &mut SmallRng, view: Viewport) -> Option<Entity> {
    (rng.gen_range(0.0..1.0) < cfg.asteroid_spawn_chance).then(|| asteroid(cfg, rng, view))
}

/// Roll the per-tick star spawn. `None` on a miss.
pub fn roll_star(cfg: &GameConfig, rng: &mut SmallRng, view: Viewport) -> Option<Entity> {
    (rng.gen_range(0.0..1.0) < cfg.star_spawn_chance).then(|| star(cfg, rng, view))
}

/// Build one asteroid just above the viewport.
pub fn asteroid(cfg: &GameConfig, rng: &mut SmallRng, view: Viewport) -> Entity {
    let size = cfg.asteroid_min_size + rng.gen_range(0.0..1.0) * cfg.asteroid_size_variation;
    let speed = cfg.asteroid_base_speed + rng.gen_range(0.0..1.0) * cfg.asteroid_speed_variation;
    let x = spawn_x(rng, view, size, cfg.spawn_margin);
    Entity::new(EntityKind::Asteroid, Rect::new(x, -size, size, size), speed)
}

/// Build one star just above the viewport.
pub fn star(cfg: &GameConfig, rng: &mut SmallRng, view: Viewport) -> Entity {
    let size = cfg.star_min_size + rng.gen_range(0.0..1.0) * cfg.star_size_variation;
    let speed = cfg.star_base_speed + rng.gen_range(0.0..1.0);
    let x = spawn_x(rng, view, size, cfg.spawn_margin);
    Entity::new(EntityKind::Star, Rect::new(x, -size, size, size), speed)
}

/// Build one bullet leaving the given muzzle position, centered on it.
pub fn bullet(cfg: &GameConfig, muzzle: (f64, f64)) -> Entity {
    let (mx, my) = muzzle;
    Entity::new(
        EntityKind::Bullet,
        Rect::new(
            mx - cfg.bullet_width / 2.0,
            my - cfg.bullet_height,
            cfg.bullet_width,
            cfg.bullet_height,
        ),
        cfg.bullet_speed,
    )
}

/// Uniform horizontal spawn position in `[margin/2, width − size − margin/2]`.
/// Degenerate viewports (narrower than the entity plus margin) pin to the
/// left margin rather than panicking on an empty range.
fn spawn_x(rng: &mut SmallRng, view: Viewport, size: f64, margin: f64) -> f64 {
    let lo = margin / 2.0;
    let hi = view.width - size - margin / 2.0;
    if hi > lo { rng.gen_range(lo..hi) } else { lo }
}
