//! Pookie 404 core crate.
//!
//! The "page not found" page doubles as a tiny game: click Pookie for points,
//! pop balloons for combo points, reach 100 for fireworks, then sign the local
//! leaderboard. This crate owns all of the game state and timing; the page's
//! JS renders whatever [`web::PookiePage::drain_events`] reports.
//!
//! Everything outside [`web`] is plain Rust and runs natively under
//! `cargo test`; time is virtual and driven through [`session::Session::advance`].

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod balloon;
pub mod config;
pub mod constants;
pub mod effects;
pub mod error;
pub mod events;
pub mod leaderboard;
pub mod mascot;
pub mod random;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod web;

pub use config::GameConfig;
pub use error::{PageError, PageResult};
pub use session::Session;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // a second init (hot reload) is harmless
    let _ = console_log::init_with_level(log::Level::Info);
}

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

/// Create the page session and start its frame loop.
#[wasm_bindgen]
pub fn start_page(config_json: Option<String>) -> Result<web::PookiePage, JsValue> {
    let page = web::PookiePage::new(config_json)?;
    page.start();
    Ok(page)
}
