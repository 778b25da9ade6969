// Integration tests (native) for the `pookie-404` crate.
// These drive a whole `Session` with virtual time, a deterministic random
// source and an in-memory store, so they run under `cargo test` on the host.

use pookie_404::audio::{AudioCue, RecordingAudio, SilentAudio};
use pookie_404::balloon::MiniGameState;
use pookie_404::events::UiEvent;
use pookie_404::leaderboard::{KeyValueStore, LeaderboardEntry, MemoryStore};
use pookie_404::{GameConfig, PageError, PageResult};
use pookie_404::random::SequenceRandom;
use pookie_404::session::Session;

const KEY: &str = "pookie-highscores";

struct Harness {
    session: Session,
    store: MemoryStore,
    audio: RecordingAudio,
}

// 0.5 everywhere: mascot never hides (0.5 >= 0.3) and click reactions jump.
fn harness() -> Harness {
    let store = MemoryStore::new();
    let audio = RecordingAudio::default();
    let session = Session::new(
        GameConfig::default(),
        Box::new(store.clone()),
        Box::new(SequenceRandom::constant(0.5)),
        Box::new(audio.clone()),
    );
    Harness { session, store, audio }
}

/// Storage that reads through to a shared map but may refuse reads or writes.
struct FlakyStore {
    inner: MemoryStore,
    reads: bool,
    writes: bool,
}

impl KeyValueStore for FlakyStore {
    fn load(&self, key: &str) -> PageResult<Option<String>> {
        if !self.reads {
            return Err(PageError::StorageUnavailable);
        }
        Ok(self.inner.get(key))
    }

    fn save(&mut self, key: &str, value: &str) -> PageResult<()> {
        if !self.writes {
            return Err(PageError::Storage("quota exceeded".into()));
        }
        self.inner.put(key, value);
        Ok(())
    }
}

fn session_with(store: FlakyStore) -> Session {
    Session::new(
        GameConfig::default(),
        Box::new(store),
        Box::new(SequenceRandom::constant(0.5)),
        Box::new(SilentAudio),
    )
}

/// Click past the celebration threshold and wait for the board to open.
fn reach_leaderboard(s: &mut Session) {
    for _ in 0..100 {
        s.click_mascot();
    }
    s.advance(5_000.0);
    assert!(s.is_leaderboard_open());
}

fn celebrations(events: &[UiEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, UiEvent::CelebrationTriggered { .. }))
        .count()
}

fn pop_first_live(s: &mut Session) -> u32 {
    let id = s
        .balloons()
        .iter()
        .find(|b| !b.popped)
        .map(|b| b.id)
        .expect("a live balloon");
    s.pop_balloon(id).expect("pop succeeds")
}

#[test]
fn ambient_audio_starts_with_the_page() {
    let h = harness();
    assert_eq!(h.audio.played(), vec![AudioCue::Ambient]);
}

#[test]
fn mascot_clicks_add_one_point_each() {
    let mut h = harness();
    for _ in 0..25 {
        h.session.click_mascot();
    }
    assert_eq!(h.session.total_score(), 25);
    assert_eq!(h.session.score().mascot_score, 25);
    assert_eq!(h.audio.count(AudioCue::Chime), 25);
}

#[test]
fn celebration_fires_once_then_reveals_leaderboard() {
    let mut h = harness();
    let mut events = Vec::new();
    for _ in 0..150 {
        h.session.click_mascot();
        events.extend(h.session.drain_events());
    }
    assert_eq!(celebrations(&events), 1);
    assert!(h.session.fireworks_active());
    assert_eq!(h.audio.count(AudioCue::Celebration), 1);

    // leaderboard shows up 5s after the celebration, and not earlier
    h.session.advance(4_999.0);
    assert!(!h.session.is_leaderboard_open());
    h.session.advance(1.0);
    assert!(h.session.is_leaderboard_open());
    assert!(!h.session.fireworks_active());

    let opened = h.session.drain_events().into_iter().find_map(|e| match e {
        UiEvent::LeaderboardOpened {
            current_score,
            new_high_score,
            ..
        } => Some((current_score, new_high_score)),
        _ => None,
    });
    assert_eq!(opened, Some((150, true)));
}

#[test]
fn play_again_rearms_celebration() {
    let mut h = harness();
    for _ in 0..100 {
        h.session.click_mascot();
    }
    assert_eq!(celebrations(&h.session.drain_events()), 1);
    h.session.play_again();
    assert_eq!(h.session.total_score(), 0);
    assert!(!h.session.score().celebration_fired);
    // the pending reveal from the first round must not fire
    h.session.advance(10_000.0);
    assert!(!h.session.is_leaderboard_open());

    for _ in 0..100 {
        h.session.click_mascot();
    }
    assert_eq!(celebrations(&h.session.drain_events()), 1);
}

#[test]
fn balloon_combo_and_decay() {
    let mut h = harness();
    let s = &mut h.session;
    s.start_mini_game();
    assert_eq!(s.mini_game_state(), MiniGameState::Running);

    // pop each balloon as it spawns, 2s apart: inside the 3s combo window
    let mut awards = Vec::new();
    for _ in 0..3 {
        s.advance(2_000.0);
        awards.push(pop_first_live(s));
    }
    assert_eq!(awards, vec![15, 30, 45]);
    assert_eq!(s.score().mini_game_score, 90);
    assert_eq!(s.score().balloons_popped, 3);

    // cooldown passes with no pops: next pop is back to 15
    s.advance(3_000.0);
    assert_eq!(s.combo(), 0);
    s.advance(1_000.0);
    assert_eq!(pop_first_live(s), 15);
}

#[test]
fn pop_inside_window_extends_combo() {
    let mut h = harness();
    let s = &mut h.session;
    s.start_mini_game();
    s.advance(2_000.0);
    assert_eq!(pop_first_live(s), 15);
    s.advance(2_000.0); // second balloon spawns, combo window still open
    assert_eq!(pop_first_live(s), 30);
    // past the first pop's window, but the second pop restarted it
    s.advance(1_900.0);
    assert_eq!(s.combo(), 2);
    s.advance(1_100.0);
    assert_eq!(s.combo(), 0);
}

#[test]
fn popped_balloon_disappears_after_animation() {
    let mut h = harness();
    let s = &mut h.session;
    s.start_mini_game();
    s.advance(2_000.0);
    let id = s.balloons()[0].id;
    s.pop_balloon(id);
    assert_eq!(s.pop_balloon(id), None);
    s.advance(499.0);
    assert!(s.balloons().iter().any(|b| b.id == id));
    s.advance(1.0);
    assert!(s.balloons().iter().all(|b| b.id != id));
    assert_eq!(s.pop_balloon(id), None);
}

#[test]
fn confetti_on_fifty_point_milestones() {
    let mut h = harness();
    let s = &mut h.session;
    s.start_mini_game();
    for _ in 0..4 {
        s.advance(2_000.0);
        pop_first_live(s); // 15, 45, 90, 150
    }
    assert_eq!(s.score().mini_game_score, 150);
    assert!(s.confetti_active());
    let bursts = s
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, UiEvent::Confetti { active: true, pieces } if pieces.len() == 50))
        .count();
    assert_eq!(bursts, 1);
    s.advance(100.0);
    assert!(!s.confetti_active());
}

#[test]
fn stop_mini_game_discards_pending_timers() {
    let mut h = harness();
    let s = &mut h.session;
    let idle = s.pending_timers();
    s.start_mini_game();
    s.advance(2_000.0);
    pop_first_live(s);
    s.stop_mini_game();
    // the mascot dance from the pop is the only new timer allowed to survive
    assert!(s.pending_timers() <= idle + 1);
    assert!(s.balloons().is_empty());
    s.advance(10_000.0);
    assert!(s.balloons().is_empty());
    assert_eq!(s.combo(), 0);
}

#[test]
fn submit_persists_and_highlights() {
    let mut h = harness();
    for _ in 0..120 {
        h.session.click_mascot();
    }
    h.session.advance(5_000.0);
    assert!(h.session.is_leaderboard_open());
    h.session.drain_events();

    assert!(!h.session.submit_score("   ", "10/19/2026"));
    assert!(h.store.get(KEY).is_none());
    assert!(h.session.submit_score(" Ada ", "10/19/2026"));
    assert!(!h.session.submit_score("Ada again", "10/19/2026"));

    let saved: Vec<LeaderboardEntry> = serde_json::from_str(&h.store.get(KEY).unwrap()).unwrap();
    assert_eq!(
        saved,
        vec![LeaderboardEntry {
            name: "Ada".into(),
            score: 120,
            date: "10/19/2026".into(),
        }]
    );
    let events = h.session.drain_events();
    assert!(events.contains(&UiEvent::SubmissionRejected));
    assert!(events.iter().any(|e| matches!(
        e,
        UiEvent::LeaderboardUpdated { highlight: Some(0), .. }
    )));
}

#[test]
fn corrupted_store_opens_empty_board() {
    let mut h = harness();
    h.store.put(KEY, "[{\"name\": 42");
    h.session.open_leaderboard();
    assert!(h.session.is_leaderboard_open());
    assert!(h.session.leaderboard().is_empty());
}

#[test]
fn feeding_awards_a_point_after_the_meal() {
    let mut h = harness();
    assert!(h.session.feed_mascot());
    assert!(!h.session.feed_mascot());
    assert_eq!(h.session.total_score(), 0);
    h.session.advance(1_500.0);
    assert_eq!(h.session.total_score(), 1);
}

#[test]
fn ui_events_serialize_as_tagged_json() {
    let mut h = harness();
    h.session.click_mascot();
    let json = serde_json::to_string(&h.session.drain_events()).unwrap();
    assert!(json.contains(r#""type":"score_changed""#));
    assert!(json.contains(r#""type":"mascot_changed""#));
    assert!(json.contains(r#""expression":"dancing""#));
}

#[test]
fn teardown_silences_everything() {
    let mut h = harness();
    h.session.start_mini_game();
    for _ in 0..100 {
        h.session.click_mascot();
    }
    h.session.teardown();
    assert_eq!(h.session.pending_timers(), 0);
    h.session.drain_events();
    h.session.advance(60_000.0);
    assert!(h.session.drain_events().is_empty());
}

#[test]
fn broken_storage_keeps_the_session_board() {
    for (reads, writes) in [(false, false), (true, false)] {
        let inner = MemoryStore::new();
        inner.put(KEY, r#"[{"name":"old","score":5,"date":""}]"#);
        let mut s = session_with(FlakyStore {
            inner,
            reads,
            writes,
        });
        reach_leaderboard(&mut s);
        assert!(s.submit_score("Ada", "10/19/2026"));
        let after_submit = s.leaderboard().to_vec();
        assert_eq!(after_submit[0].name, "Ada");

        s.close_leaderboard();
        s.open_leaderboard();
        assert_eq!(s.leaderboard(), after_submit.as_slice(), "reads={reads} writes={writes}");
    }
}

#[test]
fn reopening_does_not_allow_a_second_submission() {
    let mut h = harness();
    reach_leaderboard(&mut h.session);
    assert!(h.session.submit_score("Ada", "d"));
    h.session.close_leaderboard();
    h.session.open_leaderboard();
    assert!(!h.session.submit_score("Ada", "d"));
    assert_eq!(h.session.leaderboard().len(), 1);

    // a new round may submit again
    h.session.play_again();
    reach_leaderboard(&mut h.session);
    assert!(h.session.submit_score("Bea", "d"));
    assert_eq!(h.session.leaderboard().len(), 2);
}

#[test]
fn reset_closes_an_open_leaderboard() {
    let mut h = harness();
    h.session.open_leaderboard();
    h.session.drain_events();
    h.session.reset();
    assert!(!h.session.is_leaderboard_open());
    assert!(h.session.drain_events().contains(&UiEvent::LeaderboardClosed));
}

#[test]
fn spawn_sweeps_a_balloon_still_popping() {
    let mut h = harness();
    let s = &mut h.session;
    s.start_mini_game();
    s.advance(2_000.0);
    s.advance(1_800.0);
    let id = pop_first_live(s);
    s.drain_events();

    // the next spawn lands 200ms into the 500ms pop animation
    s.advance(200.0);
    let events = s.drain_events();
    let removed = events
        .iter()
        .position(|e| *e == UiEvent::BalloonRemoved { id })
        .expect("popped balloon swept");
    let spawned = events
        .iter()
        .position(|e| matches!(e, UiEvent::BalloonSpawned { .. }))
        .expect("new balloon");
    assert!(removed < spawned);
    assert!(s.balloons().iter().all(|b| b.id != id));

    // its removal timer went with it
    s.advance(500.0);
    assert!(!s.drain_events().contains(&UiEvent::BalloonRemoved { id }));
}

#[test]
fn resume_rearms_idle_timers_once() {
    let mut h = harness();
    let idle = h.session.pending_timers();
    h.session.teardown();
    assert_eq!(h.session.pending_timers(), 0);
    h.session.resume();
    h.session.resume();
    assert_eq!(h.session.pending_timers(), idle);
}
