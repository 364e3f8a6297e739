//! Browser glue around the simulation core: canvas and HUD setup, input
//! listeners writing into the shared [`InputSnapshot`], the
//! `requestAnimationFrame` loop, localStorage high-score persistence and
//! touch-device detection. The game state lives in a `thread_local` cell and
//! is only touched from the frame callback and the event listeners, which the
//! browser runs on the one main thread.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, window};

use crate::game::{GameConfig, GameSession, InputSnapshot, Phase, ScoreStore, Viewport};

mod render;
use render::Backdrop;

const CANVAS_ID: &str = "sf-canvas";
const HUD_ID: &str = "sf-hud";
const HIGH_SCORE_KEY: &str = "starfall-high-score";

// --- Persistence --------------------------------------------------------------

/// High-score store over `window.localStorage`. Storage can be absent or
/// locked down (private browsing, iframe policies); every failure collapses
/// to "no stored score" or a dropped write, never an error the game sees.
struct LocalStore;

impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl ScoreStore for LocalStore {
    fn load(&self) -> u32 {
        Self::storage()
            .and_then(|s| s.get_item(HIGH_SCORE_KEY).ok().flatten())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    fn save(&mut self, score: u32) {
        if let Some(s) = Self::storage() {
            let _ = s.set_item(HIGH_SCORE_KEY, &score.to_string());
        }
    }
}

// --- Shared state -------------------------------------------------------------

struct WebGame {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    session: GameSession,
    input: InputSnapshot,
    backdrop: Backdrop,
}

thread_local! {
    static GAME: RefCell<Option<WebGame>> = RefCell::new(None);
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

// --- Entry --------------------------------------------------------------------

pub(crate) fn start() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let width = win.inner_width()?.as_f64().unwrap_or(800.0);
    let height = win.inner_height()?.as_f64().unwrap_or(600.0);

    // Create / reuse the full-viewport canvas.
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id(CANVAS_ID);
        // Anchored at the origin so client coordinates equal canvas coordinates.
        c.set_attribute(
            "style",
            "position:fixed; left:0; top:0; background:#05060f; touch-action:none; z-index:10;",
        )
        .ok();
        doc.body().unwrap().append_child(&c)?;
        c
    };
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    let ctx: CanvasRenderingContext2d = canvas.get_context("2d")?.unwrap().dyn_into()?;

    // Score HUD overlay (top-left DOM element, refreshed every frame).
    if doc.get_element_by_id(HUD_ID).is_none() {
        if let Some(body) = doc.body() {
            let div = doc.create_element("div")?;
            div.set_id(HUD_ID);
            div.set_text_content(Some("Score: 0  Best: 0"));
            div.set_attribute("style", "position:fixed; top:10px; left:12px; font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; color:#ffd166; z-index:45; letter-spacing:0.5px;").ok();
            body.append_child(&div)?;
        }
    }

    // Touch capability classifies the device; the core just gets the flag.
    let mobile = win.navigator().max_touch_points() > 0;
    let seed = now_ms() as u64;
    let session = GameSession::new(
        GameConfig::for_device(mobile),
        Viewport::new(width, height),
        seed,
        Box::new(LocalStore),
    );
    let backdrop = Backdrop::new(width, height, seed.rotate_left(17) ^ 0x517f_a11e);

    web_sys::console::log_1(&format!("starfall: ready ({width:.0}x{height:.0}, mobile={mobile})").into());

    GAME.with(|cell| {
        cell.replace(Some(WebGame {
            canvas: canvas.clone(),
            ctx,
            session,
            input: InputSnapshot::default(),
            backdrop,
        }))
    });

    attach_keyboard(&doc)?;
    attach_pointer(&canvas)?;
    attach_touch(&canvas)?;
    attach_window(&win)?;

    start_frame_loop();
    Ok(())
}

// --- Input listeners ----------------------------------------------------------

fn attach_keyboard(doc: &web_sys::Document) -> Result<(), JsValue> {
    let down = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        GAME.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                match evt.key().as_str() {
                    "ArrowLeft" | "a" | "A" => state.input.left = true,
                    "ArrowRight" | "d" | "D" => state.input.right = true,
                    "ArrowUp" | "w" | "W" => state.input.up = true,
                    "ArrowDown" | "s" | "S" => state.input.down = true,
                    " " => state.session.shoot(now_ms()),
                    "Enter" => {
                        if matches!(state.session.phase, Phase::Idle | Phase::GameOver) {
                            state.session.start();
                        }
                    }
                    "p" | "P" => state.session.toggle_pause(),
                    _ => {}
                }
            }
        });
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", down.as_ref().unchecked_ref())?;
    down.forget();

    let up = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        GAME.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                match evt.key().as_str() {
                    "ArrowLeft" | "a" | "A" => state.input.left = false,
                    "ArrowRight" | "d" | "D" => state.input.right = false,
                    "ArrowUp" | "w" | "W" => state.input.up = false,
                    "ArrowDown" | "s" | "S" => state.input.down = false,
                    _ => {}
                }
            }
        });
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keyup", up.as_ref().unchecked_ref())?;
    up.forget();
    Ok(())
}

fn attach_pointer(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    // offset_x/offset_y are canvas-local for a canvas anchored at the origin,
    // sparing us DomRect lookups.
    let moved = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
        GAME.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.input.pointer = Some((evt.offset_x() as f64, evt.offset_y() as f64));
            }
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mousemove", moved.as_ref().unchecked_ref())?;
    moved.forget();

    let left = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        GAME.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.input.pointer = None;
            }
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mouseleave", left.as_ref().unchecked_ref())?;
    left.forget();
    Ok(())
}

fn attach_touch(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let started = Closure::wrap(Box::new(move |evt: web_sys::TouchEvent| {
        evt.prevent_default();
        GAME.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                if let Some(touch) = evt.touches().get(0) {
                    state.input.pointer =
                        Some((touch.client_x() as f64, touch.client_y() as f64));
                }
                // A tap both launches from the menus and fires while flying.
                if matches!(state.session.phase, Phase::Idle | Phase::GameOver) {
                    state.session.start();
                } else {
                    state.session.shoot(now_ms());
                }
            }
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("touchstart", started.as_ref().unchecked_ref())?;
    started.forget();

    let moved = Closure::wrap(Box::new(move |evt: web_sys::TouchEvent| {
        evt.prevent_default();
        GAME.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                if let Some(touch) = evt.touches().get(0) {
                    state.input.pointer =
                        Some((touch.client_x() as f64, touch.client_y() as f64));
                }
            }
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("touchmove", moved.as_ref().unchecked_ref())?;
    moved.forget();

    let ended = Closure::wrap(Box::new(move |_evt: web_sys::TouchEvent| {
        GAME.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.input.pointer = None;
            }
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("touchend", ended.as_ref().unchecked_ref())?;
    ended.forget();
    Ok(())
}

fn attach_window(win: &web_sys::Window) -> Result<(), JsValue> {
    // Losing focus releases held keys so the ship does not drift forever.
    let blurred = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        GAME.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.input.release_keys();
                state.input.pointer = None;
            }
        });
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("blur", blurred.as_ref().unchecked_ref())?;
    blurred.forget();

    let resized = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        let Some(win) = window() else { return };
        let width = win
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = win
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        GAME.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                state.canvas.set_width(width as u32);
                state.canvas.set_height(height as u32);
                state.session.set_viewport(width, height);
            }
        });
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("resize", resized.as_ref().unchecked_ref())?;
    resized.forget();
    Ok(())
}

// --- Frame loop ---------------------------------------------------------------

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        GAME.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                frame(state, ts);
            }
        });
        if let Some(w) = window() {
            let _ =
                w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

fn frame(state: &mut WebGame, now: f64) {
    // One read of the snapshot per tick; listeners may overwrite it again
    // before the next frame.
    let input = state.input;
    let was_running = state.session.is_running();
    state.session.tick(&input);
    if was_running && state.session.phase == Phase::GameOver {
        web_sys::console::log_1(
            &format!("starfall: game over, score {}", state.session.score).into(),
        );
    }
    state.backdrop.advance(state.session.viewport);
    render::draw(&state.ctx, &state.canvas, &state.session, &state.backdrop, now);
    update_hud(&state.session);
}

fn update_hud(session: &GameSession) {
    if let Some(doc) = window().and_then(|w| w.document()) {
        if let Some(el) = doc.get_element_by_id(HUD_ID) {
            el.set_text_content(Some(&format!(
                "Score: {}  Best: {}",
                session.score, session.high_score
            )));
        }
    }
}
