//! Canvas painting. Reads the session snapshot once per frame and draws it;
//! nothing here mutates simulation state. The decorative backdrop (drifting
//! starfield + nebula glow) lives on this side of the fence because the core
//! only cares about collision footprints, not pixels.

use std::f64::consts::TAU;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::game::{Entity, GameSession, Phase, Player, Viewport};

// --- Backdrop -----------------------------------------------------------------

struct BgStar {
    x: f64,
    y: f64,
    size: f64,
    speed: f64,
    brightness: f64,
}

/// Purely decorative scrolling starfield. Seeded once at startup; drifts
/// every frame regardless of the session phase so menus stay alive.
pub struct Backdrop {
    stars: Vec<BgStar>,
}

impl Backdrop {
    const STAR_COUNT: usize = 90;

    pub fn new(width: f64, height: f64, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let stars = (0..Self::STAR_COUNT)
            .map(|_| BgStar {
                x: rng.gen_range(0.0..width.max(1.0)),
                y: rng.gen_range(0.0..height.max(1.0)),
                size: rng.gen_range(0.5..2.2),
                speed: rng.gen_range(0.2..1.0),
                brightness: rng.gen_range(0.3..1.0),
            })
            .collect();
        Self { stars }
    }

    /// Drift every background star down one step, wrapping at the bottom.
    pub fn advance(&mut self, view: Viewport) {
        for s in &mut self.stars {
            s.y += s.speed;
            if s.y > view.height {
                s.y -= view.height + s.size;
            }
        }
    }
}

// --- Frame painting -----------------------------------------------------------

/// Paint one frame from the current session state.
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    canvas: &HtmlCanvasElement,
    session: &GameSession,
    backdrop: &Backdrop,
    now: f64,
) {
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;

    ctx.set_fill_style_str("#05060f");
    ctx.fill_rect(0.0, 0.0, w, h);
    draw_nebula(ctx, w, h, now);
    draw_backdrop(ctx, backdrop);

    for s in &session.stars {
        draw_pickup_star(ctx, s);
    }
    for a in &session.asteroids {
        draw_asteroid(ctx, a);
    }
    ctx.set_fill_style_str("#aef6ff");
    for b in &session.bullets {
        ctx.fill_rect(b.rect.x, b.rect.y, b.rect.w, b.rect.h);
    }
    for p in &session.particles.particles {
        let (r, g, b) = p.color;
        ctx.set_fill_style_str(&format!("rgba({},{},{},{:.3})", r, g, b, p.alpha()));
        ctx.fill_rect(p.x - p.size / 2.0, p.y - p.size / 2.0, p.size, p.size);
    }
    if session.phase != Phase::Idle {
        draw_ship(ctx, &session.player);
    }

    match session.phase {
        Phase::Idle => draw_idle_overlay(ctx, w, h),
        Phase::Paused => draw_pause_overlay(ctx, w, h),
        Phase::GameOver => draw_game_over_overlay(ctx, w, h, session),
        Phase::Running => {}
    }
}

fn draw_nebula(ctx: &CanvasRenderingContext2d, w: f64, h: f64, now: f64) {
    // Two slowly breathing gradient blobs; skipped silently if the context
    // refuses to build a gradient.
    let sway = (now / 9_000.0).sin() * w * 0.06;
    let blobs = [
        (w * 0.25 + sway, h * 0.3, w * 0.35, "rgba(90,50,140,0.16)"),
        (w * 0.75 - sway, h * 0.7, w * 0.30, "rgba(30,80,150,0.14)"),
    ];
    for (cx, cy, radius, color) in blobs {
        if let Ok(grad) = ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, radius) {
            grad.add_color_stop(0.0, color).ok();
            grad.add_color_stop(1.0, "rgba(0,0,0,0)").ok();
            ctx.set_fill_style_canvas_gradient(&grad);
            ctx.fill_rect(cx - radius, cy - radius, radius * 2.0, radius * 2.0);
        }
    }
}

fn draw_backdrop(ctx: &CanvasRenderingContext2d, backdrop: &Backdrop) {
    for s in &backdrop.stars {
        ctx.set_fill_style_str(&format!("rgba(255,255,255,{:.3})", s.brightness));
        ctx.fill_rect(s.x, s.y, s.size, s.size);
    }
}

fn draw_pickup_star(ctx: &CanvasRenderingContext2d, star: &Entity) {
    let r = star.rect;
    let (cx, cy) = r.center();
    ctx.set_fill_style_str("#ffd166");
    ctx.begin_path();
    ctx.move_to(cx, r.y);
    ctx.line_to(r.x + r.w, cy);
    ctx.line_to(cx, r.y + r.h);
    ctx.line_to(r.x, cy);
    ctx.close_path();
    ctx.fill();
    ctx.set_fill_style_str("rgba(255,255,255,0.8)");
    ctx.fill_rect(cx - 1.5, cy - 1.5, 3.0, 3.0);
}

fn draw_asteroid(ctx: &CanvasRenderingContext2d, asteroid: &Entity) {
    let r = asteroid.rect;
    let (cx, cy) = r.center();
    ctx.set_fill_style_str("#8a8578");
    ctx.begin_path();
    ctx.arc(cx, cy, r.w / 2.0, 0.0, TAU).ok();
    ctx.fill();
    ctx.set_stroke_style_str("#55514a");
    ctx.set_line_width(2.0);
    ctx.stroke();
    // A crater offset toward the lit side.
    ctx.set_fill_style_str("rgba(0,0,0,0.25)");
    ctx.begin_path();
    ctx.arc(cx - r.w * 0.18, cy - r.h * 0.12, r.w * 0.16, 0.0, TAU).ok();
    ctx.fill();
}

fn draw_ship(ctx: &CanvasRenderingContext2d, player: &Player) {
    let r = player.rect;
    ctx.set_fill_style_str("#d7e9ff");
    ctx.begin_path();
    ctx.move_to(r.x + r.w / 2.0, r.y);
    ctx.line_to(r.x + r.w, r.y + r.h);
    ctx.line_to(r.x, r.y + r.h);
    ctx.close_path();
    ctx.fill();
    ctx.set_fill_style_str("#3d7dd6");
    ctx.begin_path();
    ctx.arc(r.x + r.w / 2.0, r.y + r.h * 0.55, r.w * 0.16, 0.0, TAU).ok();
    ctx.fill();
}

fn draw_idle_overlay(ctx: &CanvasRenderingContext2d, w: f64, h: f64) {
    shade(ctx, w, h, 0.35);
    headline(ctx, w, h, "STARFALL");
    hint(ctx, w, h, "Press Enter or tap to launch");
}

fn draw_pause_overlay(ctx: &CanvasRenderingContext2d, w: f64, h: f64) {
    shade(ctx, w, h, 0.45);
    headline(ctx, w, h, "PAUSED");
    hint(ctx, w, h, "Press P to resume");
}

fn draw_game_over_overlay(ctx: &CanvasRenderingContext2d, w: f64, h: f64, session: &GameSession) {
    shade(ctx, w, h, 0.55);
    headline(ctx, w, h, "GAME OVER");
    hint(
        ctx,
        w,
        h,
        &format!(
            "Score {} · Best {} · Press Enter to restart",
            session.score, session.high_score
        ),
    );
}

fn shade(ctx: &CanvasRenderingContext2d, w: f64, h: f64, alpha: f64) {
    ctx.set_fill_style_str(&format!("rgba(0,0,0,{alpha})"));
    ctx.fill_rect(0.0, 0.0, w, h);
}

fn headline(ctx: &CanvasRenderingContext2d, w: f64, h: f64, text: &str) {
    ctx.set_text_align("center");
    ctx.set_font("64px 'Fira Code', monospace");
    ctx.set_line_width(6.0);
    ctx.set_stroke_style_str("#000000");
    ctx.set_fill_style_str("#ffffff");
    let cx = w / 2.0;
    let cy = h / 2.0;
    ctx.stroke_text(text, cx, cy).ok();
    ctx.fill_text(text, cx, cy).ok();
}

fn hint(ctx: &CanvasRenderingContext2d, w: f64, h: f64, text: &str) {
    ctx.set_text_align("center");
    ctx.set_font("18px 'Fira Code', monospace");
    ctx.set_fill_style_str("#ffd166");
    ctx.fill_text(text, w / 2.0, h / 2.0 + 44.0).ok();
}
