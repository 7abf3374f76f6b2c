//! Word Strike core crate.
//!
//! A browser vocabulary quiz: questions present a list of words, the player
//! shoots down the ones that do not belong, and the final score is reported
//! to a hosting LMS over SCORM (1.2 or 2004, whichever the host speaks; a
//! local mock transport takes over when no host is found so the game stays
//! playable standalone).

use wasm_bindgen::prelude::*;

pub mod game;
pub mod scorm;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Launches the game with the question table shipped in the crate.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    game::start(None)
}

/// Launches the game with a host-supplied question table (CSV text with
/// `title`, `targets`, `distractors` columns; word lists pipe-delimited).
#[wasm_bindgen]
pub fn start_game_with_questions(csv: &str) -> Result<(), JsValue> {
    game::start(Some(csv))
}
