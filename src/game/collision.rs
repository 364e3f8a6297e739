//! Axis-aligned bounding-box collision testing and the per-tick resolution
//! policy. The resolvers mutate the entity collections directly and hand back
//! the impact centers so the session can score and emit effects; they never
//! touch score or session state themselves.

use super::entity::{Entity, Rect};

/// Open-interval AABB overlap: strictly positive overlap on both axes.
/// Rectangles that merely touch along an edge do not collide.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Resolve bullet-versus-asteroid hits. Each bullet destroys at most the
/// first intersecting asteroid found, then both are removed; a bullet that
/// hits nothing survives. Returns the centers of destroyed asteroids (one per
/// hit, explosion anchor + score count).
pub fn resolve_bullets(bullets: &mut Vec<Entity>, asteroids: &mut Vec<Entity>) -> Vec<(f64, f64)> {
    let mut centers = Vec::new();
    let mut bi = 0;
    while bi < bullets.len() {
        let shot = bullets[bi].rect;
        let hit = asteroids.iter().position(|a| overlaps(&shot, &a.rect));
        if let Some(ai) = hit {
            // Removal order within the collections is irrelevant; swap_remove
            // keeps the scan stable because the swapped-in bullet is examined
            // at the same index on the next pass.
            centers.push(asteroids.swap_remove(ai).rect.center());
            bullets.swap_remove(bi);
        } else {
            bi += 1;
        }
    }
    centers
}

/// True if any live asteroid intersects the player footprint. The caller
/// transitions to game over and skips the remaining collision categories for
/// the tick, so an asteroid always outranks a simultaneous star pickup.
pub fn player_hit(player: &Rect, asteroids: &[Entity]) -> bool {
    asteroids.iter().any(|a| overlaps(player, &a.rect))
}

/// Remove every star intersecting the player and return their centers
/// (sparkle-burst anchors, one score increment each).
pub fn collect_stars(player: &Rect, stars: &mut Vec<Entity>) -> Vec<(f64, f64)> {
    let mut centers = Vec::new();
    stars.retain(|s| {
        if overlaps(player, &s.rect) {
            centers.push(s.rect.center());
            false
        } else {
            true
        }
    });
    centers
}
