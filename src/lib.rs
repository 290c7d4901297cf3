//! Evasive Button core crate.
//!
//! A button that dodges the pointer and changes its text until it has been
//! caught `target_count` times, then balloons, confetti and applause. The
//! game loop itself lives in [`session`] and has no browser dependency; the
//! DOM binding in `dom` drives it from pointer events and timers.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod session;

mod dom;
mod rng;

pub use config::GameConfig;
pub use error::{ConfigError, GameError};
pub use session::{Activation, Phase, Session, Stage};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second init (e.g. the module instantiated twice) only keeps the first logger.
    let _ = console_log::init_with_level(log::Level::Debug);
}

// -----------------------------------------------------------------------------
// Button labels, drawn uniformly (with repeats) on every spawn and hover.
// -----------------------------------------------------------------------------

pub const BUTTON_MESSAGES: &[&str] = &[
    "ايلاف اضغطي هنا",
    "ميلا هنا",
    "!ماتشوفي ايلاف هنا",
    "الزر هنا يالحبيب",
    "ميلااا",
    "بسرعة قبل تروح عليك",
    "هنا الزر يابابا",
    "اضغطي بسرعة",
    "هنا الزر الحقيقي",
    "يلا بينا اضغطي",
];

// -----------------------------------------------------------------------------
// Entry points
// -----------------------------------------------------------------------------

/// Start (or restart) the game on `#game-area` with the stock settings.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    dom::start(GameConfig::default())?;
    Ok(())
}

/// Start with a JSON config; missing fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json).map_err(GameError::from)?;
    dom::start(config)?;
    Ok(())
}

/// Back to a fresh round. Safe to call at any time; a no-op before `start_game`.
#[wasm_bindgen]
pub fn reset_game() {
    dom::reset();
}

/// Milliseconds from the page's performance clock, 0 off-browser.
pub(crate) fn performance_now() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        0.0
    }
}
