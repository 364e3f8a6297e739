//! Starfall core crate.
//!
//! A browser-canvas arcade shooter: the ship dodges falling asteroids,
//! shoots them for points and collects stars. The simulation core under
//! [`game`] is pure Rust (testable on the host); [`web`] wraps it in the
//! wasm-bindgen canvas, input and storage glue and is entered from JS via
//! `start_game()`.

use wasm_bindgen::prelude::*;

pub mod game;
mod web;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Boot the game: builds the canvas, session and listeners, then starts the
/// frame loop. Safe to call again on a page that already hosts the game; the
/// existing canvas and overlays are reused.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start()
}
