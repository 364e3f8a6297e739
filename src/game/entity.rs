//! Moving game objects: the shared axis-aligned rectangle shape, the tagged
//! drifting entities (asteroids, stars, bullets) and the input-driven player
//! ship. All coordinates are logical viewport pixels, y growing downward.

use super::config::GameConfig;
use super::input::InputSnapshot;

/// Smoothing factor applied per tick when the ship eases toward the pointer.
const POINTER_EASE: f64 = 0.1;

// --- Geometry ----------------------------------------------------------------

/// Logical viewport dimensions, supplied by the host and updated on resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle; the collision footprint of every game object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

// --- Drifting entities --------------------------------------------------------

/// Tag distinguishing the three drifting entity classes. Movement and despawn
/// rules dispatch on this instead of per-type structs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Asteroid,
    Star,
    Bullet,
}

/// One drifting object: a rectangle plus a scalar per-tick speed.
#[derive(Clone, Copy, Debug)]
pub struct Entity {
    pub kind: EntityKind,
    pub rect: Rect,
    pub speed: f64,
}

impl Entity {
    pub fn new(kind: EntityKind, rect: Rect, speed: f64) -> Self {
        Self { kind, rect, speed }
    }

    /// Apply this entity's fixed movement rule for one tick. Asteroids and
    /// stars drift down, bullets travel up.
    pub fn advance(&mut self) {
        match self.kind {
            EntityKind::Asteroid | EntityKind::Star => self.rect.y += self.speed,
            EntityKind::Bullet => self.rect.y -= self.speed,
        }
    }

    /// Despawn predicate: true once the entity has fully left the playfield.
    /// Downward drifters leave past the bottom edge (`y > height`, the
    /// boundary value itself is still alive); bullets leave past the top.
    pub fn off_screen(&self, view: Viewport) -> bool {
        match self.kind {
            EntityKind::Asteroid | EntityKind::Star => self.rect.y > view.height,
            EntityKind::Bullet => self.rect.y + self.rect.h < 0.0,
        }
    }
}

// --- Player ship --------------------------------------------------------------

/// The player ship. Unlike drifting entities it has no fixed velocity: its
/// position is driven directly by the sampled input every tick and then
/// clamped so the ship can never leave the playfield.
#[derive(Clone, Copy, Debug)]
pub struct Player {
    pub rect: Rect,
    pub speed: f64,
}

impl Player {
    /// Spawn the ship horizontally centered near the bottom of the viewport.
    pub fn new(cfg: &GameConfig, view: Viewport) -> Self {
        let size = cfg.player_size;
        let rect = Rect::new(
            (view.width - size) / 2.0,
            (view.height - size).max(0.0) - size,
            size,
            size,
        );
        let mut player = Self {
            rect,
            speed: cfg.player_speed,
        };
        player.clamp_to(view);
        player
    }

    /// Move the ship for one tick. Held direction keys step the ship directly
    /// (all held axes apply, so diagonals work); with no key held and a
    /// pointer present, the ship eases toward centering itself on the
    /// pointer. Keys always win over the pointer.
    pub fn steer(&mut self, input: &InputSnapshot, view: Viewport) {
        if input.any_direction() {
            if input.left {
                self.rect.x -= self.speed;
            }
            if input.right {
                self.rect.x += self.speed;
            }
            if input.up {
                self.rect.y -= self.speed;
            }
            if input.down {
                self.rect.y += self.speed;
            }
        } else if let Some((px, py)) = input.pointer {
            let tx = px - self.rect.w / 2.0;
            let ty = py - self.rect.h / 2.0;
            self.rect.x += (tx - self.rect.x) * POINTER_EASE;
            self.rect.y += (ty - self.rect.y) * POINTER_EASE;
        }
        self.clamp_to(view);
    }

    /// Keep the whole ship inside `[0, view − size]` on both axes.
    pub fn clamp_to(&mut self, view: Viewport) {
        self.rect.x = self.rect.x.clamp(0.0, (view.width - self.rect.w).max(0.0));
        self.rect.y = self.rect.y.clamp(0.0, (view.height - self.rect.h).max(0.0));
    }

    /// Where bullets leave the ship: top center.
    pub fn muzzle(&self) -> (f64, f64) {
        (self.rect.x + self.rect.w / 2.0, self.rect.y)
    }

    /// Where the engine trail is emitted: bottom center.
    pub fn engine(&self) -> (f64, f64) {
        (self.rect.x + self.rect.w / 2.0, self.rect.y + self.rect.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn asteroid_and_star_drift_down_bullet_flies_up() {
        let mut a = Entity::new(EntityKind::Asteroid, Rect::new(10.0, 0.0, 30.0, 30.0), 2.0);
        let mut s = Entity::new(EntityKind::Star, Rect::new(10.0, 0.0, 20.0, 20.0), 1.5);
        let mut b = Entity::new(EntityKind::Bullet, Rect::new(10.0, 100.0, 4.0, 15.0), 8.0);
        a.advance();
        s.advance();
        b.advance();
        assert_eq!(a.rect.y, 2.0);
        assert_eq!(s.rect.y, 1.5);
        assert_eq!(b.rect.y, 92.0);
    }

    #[test]
    fn despawn_boundary_is_strict() {
        let view = view();
        let on_edge = Entity::new(
            EntityKind::Asteroid,
            Rect::new(0.0, view.height, 30.0, 30.0),
            2.0,
        );
        let past_edge = Entity::new(
            EntityKind::Asteroid,
            Rect::new(0.0, view.height + 1.0, 30.0, 30.0),
            2.0,
        );
        assert!(!on_edge.off_screen(view));
        assert!(past_edge.off_screen(view));
    }

    #[test]
    fn bullet_despawns_once_fully_above_top() {
        let view = view();
        let peeking = Entity::new(EntityKind::Bullet, Rect::new(0.0, -14.0, 4.0, 15.0), 8.0);
        let gone = Entity::new(EntityKind::Bullet, Rect::new(0.0, -16.0, 4.0, 15.0), 8.0);
        assert!(!peeking.off_screen(view));
        assert!(gone.off_screen(view));
    }

    #[test]
    fn key_steering_applies_all_held_axes() {
        let cfg = GameConfig::default();
        let view = view();
        let mut p = Player::new(&cfg, view);
        let (x0, y0) = (p.rect.x, p.rect.y);
        let input = InputSnapshot {
            right: true,
            up: true,
            ..InputSnapshot::default()
        };
        p.steer(&input, view);
        assert_eq!(p.rect.x, x0 + cfg.player_speed);
        assert_eq!(p.rect.y, y0 - cfg.player_speed);
    }

    #[test]
    fn keys_take_precedence_over_pointer() {
        let cfg = GameConfig::default();
        let view = view();
        let mut p = Player::new(&cfg, view);
        let x0 = p.rect.x;
        let input = InputSnapshot {
            left: true,
            pointer: Some((view.width, 0.0)),
            ..InputSnapshot::default()
        };
        p.steer(&input, view);
        assert_eq!(p.rect.x, x0 - cfg.player_speed);
    }

    #[test]
    fn pointer_steering_eases_toward_centering() {
        let cfg = GameConfig::default();
        let view = view();
        let mut p = Player::new(&cfg, view);
        p.rect.x = 100.0;
        p.rect.y = 100.0;
        let input = InputSnapshot {
            pointer: Some((200.0, 100.0 + p.rect.h / 2.0)),
            ..InputSnapshot::default()
        };
        p.steer(&input, view);
        let expected = 100.0 + (200.0 - p.rect.w / 2.0 - 100.0) * 0.1;
        assert!((p.rect.x - expected).abs() < 1e-9);
        assert!((p.rect.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn player_never_leaves_the_viewport() {
        let cfg = GameConfig::default();
        let view = view();
        let mut p = Player::new(&cfg, view);
        let held_left = InputSnapshot {
            left: true,
            up: true,
            ..InputSnapshot::default()
        };
        for _ in 0..10_000 {
            p.steer(&held_left, view);
        }
        assert_eq!(p.rect.x, 0.0);
        assert_eq!(p.rect.y, 0.0);
        let held_right = InputSnapshot {
            right: true,
            down: true,
            ..InputSnapshot::default()
        };
        for _ in 0..10_000 {
            p.steer(&held_right, view);
        }
        assert_eq!(p.rect.x, view.width - p.rect.w);
        assert_eq!(p.rect.y, view.height - p.rect.h);
    }
}
