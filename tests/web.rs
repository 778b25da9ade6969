// Browser tests: run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use pookie_404::leaderboard::{KeyValueStore, Leaderboard};
use pookie_404::web::{LocalStorage, PookiePage};
use pookie_404::GameConfig;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_storage_round_trips_the_leaderboard() {
    let cfg = GameConfig::from_json(r#"{ "storage_key": "pookie-highscores-test" }"#).unwrap();
    let mut store = LocalStorage;
    store.save(&cfg.storage_key, "[]").unwrap();

    let mut board = Leaderboard::new(Box::new(LocalStorage), &cfg);
    board.load();
    board.submit("Ada", 42, "today");

    let mut reread = Leaderboard::new(Box::new(LocalStorage), &cfg);
    assert_eq!(reread.load().len(), 1);
    assert_eq!(reread.entries()[0].score, 42);
}

#[wasm_bindgen_test]
fn page_handle_reports_events_as_json() {
    let page = PookiePage::new(None).unwrap();
    page.click_mascot();
    assert_eq!(page.total_score(), 1);
    let json = page.drain_events();
    assert!(json.starts_with('['));
    assert!(json.contains("score_changed"));
    page.stop();
}

#[wasm_bindgen_test]
fn invalid_config_override_is_rejected() {
    assert!(PookiePage::new(Some("{ \"motion_tick_ms\": -1 }".to_string())).is_err());
}

#[wasm_bindgen_test]
fn page_handle_opens_and_resets_the_leaderboard() {
    let page = PookiePage::new(None).unwrap();
    page.open_leaderboard();
    assert!(page.drain_events().contains("leaderboard_opened"));
    page.reset();
    assert!(page.drain_events().contains("leaderboard_closed"));
    page.stop();
}

#[wasm_bindgen_test]
fn page_restarts_after_stop() {
    let page = PookiePage::new(None).unwrap();
    page.start();
    page.stop();
    page.start();
    page.click_mascot();
    assert_eq!(page.total_score(), 1);
    page.stop();
}
