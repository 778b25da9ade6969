//! Browser glue: the exported [`PookiePage`] handle, the animation-frame loop
//! that drives session time, `localStorage` persistence and `<audio>` cues.
//!
//! The page markup is expected to provide:
//! - `<audio id="pookie-chime|pookie-pop|pookie-celebration|pookie-ambient">`
//! - optionally `#pookie-score`, whose text is kept at the current total.
//!
//! Everything else is rendered by JS from the events returned by
//! [`PookiePage::drain_events`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlMediaElement, Storage, window};

use crate::audio::{AudioCue, AudioCues};
use crate::config::GameConfig;
use crate::error::{PageError, PageResult};
use crate::leaderboard::KeyValueStore;
use crate::random::EntropyRandom;
use crate::session::Session;

/// Longest slice of time a single frame may feed the session. A tab coming
/// back from the background would otherwise replay minutes of balloon ticks.
const MAX_FRAME_STEP_MS: f64 = 250.0;

// --- Persistence ---------------------------------------------------------------

/// `window.localStorage`; every access failure becomes a [`PageError`].
pub struct LocalStorage;

fn local_storage() -> PageResult<Storage> {
    window()
        .ok_or(PageError::NoWindow)?
        .local_storage()
        .map_err(js_storage_err)?
        .ok_or(PageError::StorageUnavailable)
}

fn js_storage_err(v: JsValue) -> PageError {
    PageError::Storage(v.as_string().unwrap_or_else(|| format!("{v:?}")))
}

impl KeyValueStore for LocalStorage {
    fn load(&self, key: &str) -> PageResult<Option<String>> {
        local_storage()?.get_item(key).map_err(js_storage_err)
    }

    fn save(&mut self, key: &str, value: &str) -> PageResult<()> {
        local_storage()?.set_item(key, value).map_err(js_storage_err)
    }
}

// --- Audio -----------------------------------------------------------------------

/// Plays cues through `<audio>` elements looked up by id.
pub struct DomAudio {
    ignore_rejection: Closure<dyn FnMut(JsValue)>,
}

impl Default for DomAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl DomAudio {
    pub fn new() -> Self {
        Self {
            ignore_rejection: Closure::<dyn FnMut(_)>::new(|_err: JsValue| {}),
        }
    }

    fn media(cue: AudioCue) -> PageResult<HtmlMediaElement> {
        let doc = window()
            .and_then(|w| w.document())
            .ok_or(PageError::NoWindow)?;
        doc.get_element_by_id(cue.element_id())
            .and_then(|el| el.dyn_into::<HtmlMediaElement>().ok())
            .ok_or_else(|| PageError::MissingElement {
                id: cue.element_id().to_string(),
            })
    }
}

impl AudioCues for DomAudio {
    fn play(&mut self, cue: AudioCue) {
        let el = match Self::media(cue) {
            Ok(el) => el,
            Err(e) => {
                log::debug!("audio cue {cue:?} skipped: {e}");
                return;
            }
        };
        el.set_volume(cue.volume());
        el.set_loop(cue.looping());
        if !cue.looping() {
            el.set_current_time(0.0);
        }
        // autoplay policies may reject; the page stays silent then
        match el.play() {
            Ok(promise) => {
                let _ = promise.catch(&self.ignore_rejection);
            }
            Err(e) => log::debug!("audio cue {cue:?} failed to start: {e:?}"),
        }
    }
}

// --- Exported handle ---------------------------------------------------------------

fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

#[wasm_bindgen]
pub struct PookiePage {
    session: Rc<RefCell<Session>>,
    running: Rc<Cell<bool>>,
    // bumped on every start; a frame loop from an older start exits
    generation: Rc<Cell<u32>>,
}

#[wasm_bindgen]
impl PookiePage {
    /// Build a page session. `config_json` may override any subset of the
    /// defaults; an invalid override is rejected.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<PookiePage, JsValue> {
        let config = match config_json.as_deref() {
            Some(text) => {
                GameConfig::from_json(text).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => GameConfig::default(),
        };
        let session = Session::new(
            config,
            Box::new(LocalStorage),
            Box::new(EntropyRandom::new()),
            Box::new(DomAudio::new()),
        );
        Ok(PookiePage {
            session: Rc::new(RefCell::new(session)),
            running: Rc::new(Cell::new(false)),
            generation: Rc::new(Cell::new(0)),
        })
    }

    /// Start the animation-frame loop that advances session time. After a
    /// `stop` this also re-arms the mascot's idle timers.
    pub fn start(&self) {
        if self.running.replace(true) {
            return;
        }
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        self.session.borrow_mut().resume();
        start_frame_loop(
            self.session.clone(),
            self.running.clone(),
            self.generation.clone(),
            generation,
        );
    }

    /// Stop the frame loop and cancel every pending timer.
    pub fn stop(&self) {
        self.running.set(false);
        self.session.borrow_mut().teardown();
    }

    pub fn click_mascot(&self) {
        self.session.borrow_mut().click_mascot();
    }

    pub fn feed_mascot(&self) -> bool {
        self.session.borrow_mut().feed_mascot()
    }

    pub fn start_mini_game(&self) {
        self.session.borrow_mut().start_mini_game();
    }

    pub fn stop_mini_game(&self) {
        self.session.borrow_mut().stop_mini_game();
    }

    pub fn pop_balloon(&self, id: u32) -> u32 {
        self.session.borrow_mut().pop_balloon(id).unwrap_or(0)
    }

    pub fn open_leaderboard(&self) {
        self.session.borrow_mut().open_leaderboard();
    }

    pub fn submit_score(&self, name: &str, date: &str) -> bool {
        self.session.borrow_mut().submit_score(name, date)
    }

    pub fn close_leaderboard(&self) {
        self.session.borrow_mut().close_leaderboard();
    }

    pub fn play_again(&self) {
        self.session.borrow_mut().play_again();
    }

    pub fn reset(&self) {
        self.session.borrow_mut().reset();
    }

    pub fn total_score(&self) -> u32 {
        self.session.borrow().total_score()
    }

    /// Queued UI events as a JSON array.
    pub fn drain_events(&self) -> String {
        let events = self.session.borrow_mut().drain_events();
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::warn!("dropping {} ui events: {e}", events.len());
            "[]".to_string()
        })
    }
}

fn start_frame_loop(
    session: Rc<RefCell<Session>>,
    running: Rc<Cell<bool>>,
    current: Rc<Cell<u32>>,
    generation: u32,
) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    let last = Cell::new(performance_now());
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        if !running.get() || current.get() != generation {
            // loop ends here; the closure stays parked in `f`
            return;
        }
        let dt = (ts - last.replace(ts)).clamp(0.0, MAX_FRAME_STEP_MS);
        {
            let mut s = session.borrow_mut();
            s.advance(dt);
            update_score_overlay(s.total_score());
        }
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

fn update_score_overlay(total: u32) {
    if let Some(el) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("pookie-score"))
    {
        el.set_text_content(Some(&total.to_string()));
    }
}
