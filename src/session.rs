//! The page session: one owned object holding every piece of state, fed input
//! events by the renderer and elapsed time by the frame loop.
//!
//! Nothing here touches the DOM. Outbound changes are queued as [`UiEvent`]s,
//! sounds go through [`AudioCues`], persistence through [`KeyValueStore`] and
//! randomness through [`RandomSource`], so a test can drive a whole session
//! synchronously.

use crate::audio::{AudioCue, AudioCues};
use crate::balloon::{Balloon, BalloonGame, MiniGameState, Spawned};
use crate::config::GameConfig;
use crate::effects::{self, Effects};
use crate::events::{TimerEvent, UiEvent};
use crate::leaderboard::{KeyValueStore, Leaderboard, LeaderboardEntry};
use crate::mascot::{ClickReaction, Mascot};
use crate::random::RandomSource;
use crate::scheduler::{Scheduler, TimerId};
use crate::score::{ScoreAggregator, ScoreState, ScoreUpdate};

pub struct Session {
    config: GameConfig,
    scheduler: Scheduler<TimerEvent>,
    score: ScoreAggregator,
    balloons: BalloonGame,
    mascot: Mascot,
    effects: Effects,
    leaderboard: Leaderboard,
    rng: Box<dyn RandomSource>,
    audio: Box<dyn AudioCues>,
    events: Vec<UiEvent>,
    leaderboard_open: bool,
    submitted: bool,
    reveal: Option<TimerId>,
}

impl Session {
    pub fn new(
        config: GameConfig,
        store: Box<dyn KeyValueStore>,
        mut rng: Box<dyn RandomSource>,
        mut audio: Box<dyn AudioCues>,
    ) -> Self {
        let mut scheduler = Scheduler::new();
        let mut mascot = Mascot::new(rng.as_mut());
        mascot.start(&mut scheduler, &config);
        audio.play(AudioCue::Ambient);

        let mut session = Self {
            score: ScoreAggregator::new(config.celebration_threshold, config.confetti_milestone),
            leaderboard: Leaderboard::new(store, &config),
            balloons: BalloonGame::new(),
            effects: Effects::default(),
            config,
            scheduler,
            mascot,
            rng,
            audio,
            events: Vec::new(),
            leaderboard_open: false,
            submitted: false,
            reveal: None,
        };
        session.emit_score();
        session.emit_mascot();
        log::info!("pookie session started");
        session
    }

    // --- Queries -------------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    pub fn score(&self) -> ScoreState {
        self.score.state()
    }

    pub fn total_score(&self) -> u32 {
        self.score.total()
    }

    pub fn mini_game_state(&self) -> MiniGameState {
        self.balloons.state()
    }

    pub fn mini_game_score(&self) -> u32 {
        self.balloons.score()
    }

    pub fn combo(&self) -> u32 {
        self.balloons.combo()
    }

    pub fn balloons(&self) -> &[Balloon] {
        self.balloons.balloons()
    }

    pub fn mascot(&self) -> &Mascot {
        &self.mascot
    }

    pub fn confetti_active(&self) -> bool {
        self.effects.confetti_active()
    }

    pub fn fireworks_active(&self) -> bool {
        self.effects.fireworks_active()
    }

    pub fn is_leaderboard_open(&self) -> bool {
        self.leaderboard_open
    }

    pub fn leaderboard(&self) -> &[LeaderboardEntry] {
        self.leaderboard.entries()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Take everything queued for the renderer since the last drain.
    pub fn drain_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Input ---------------------------------------------------------------

    /// One point per click, however fast they come.
    pub fn click_mascot(&mut self) {
        let update = self.score.record_mascot_point();
        self.audio.play(AudioCue::Chime);
        let reaction = self
            .mascot
            .click(self.rng.as_mut(), &mut self.scheduler, &self.config);
        if let ClickReaction::Jumped = reaction {
            log::debug!("mascot jumped to ({:.1}, {:.1})", self.mascot.x, self.mascot.y);
        }
        self.after_score(update);
    }

    /// Offer the mascot a hot dog; the point lands once it has finished eating.
    pub fn feed_mascot(&mut self) -> bool {
        let fed = self.mascot.feed(&mut self.scheduler, &self.config);
        if fed {
            self.emit_mascot();
        }
        fed
    }

    pub fn start_mini_game(&mut self) {
        self.balloons.start(&mut self.scheduler, &self.config);
        self.emit_mini_game();
    }

    pub fn stop_mini_game(&mut self) {
        self.balloons.stop(&mut self.scheduler);
        self.emit_mini_game();
    }

    /// Pop a balloon by id. Returns the award, or `None` for a stale click.
    pub fn pop_balloon(&mut self, id: u32) -> Option<u32> {
        let outcome = self.balloons.pop(id, &mut self.scheduler, &self.config)?;
        self.events.push(UiEvent::BalloonPopped {
            id,
            award: outcome.award,
            combo: outcome.combo,
        });
        self.emit_mini_game();

        self.score.record_balloon_popped();
        self.audio.play(AudioCue::Pop);
        let update = self.score.record_mini_game_points(outcome.award);
        if update.milestone {
            self.fire_confetti();
        }
        self.after_score(update);
        Some(outcome.award)
    }

    /// Record the current total under `name`. `date` is the display date the
    /// renderer wants stored. One submission per round; only a reset allows
    /// another.
    pub fn submit_score(&mut self, name: &str, date: &str) -> bool {
        if self.submitted {
            log::debug!("score already submitted for this round");
            return false;
        }
        let total = self.score.total();
        if self.leaderboard.submit(name, total, date).is_none() {
            self.events.push(UiEvent::SubmissionRejected);
            return false;
        }
        self.submitted = true;
        self.events.push(UiEvent::LeaderboardUpdated {
            entries: self.leaderboard.entries().to_vec(),
            highlight: self.leaderboard.position_of(name, total),
        });
        log::info!("score {total} submitted");
        true
    }

    /// Show the leaderboard. Storage is read the first time only.
    pub fn open_leaderboard(&mut self) {
        let entries = self.leaderboard.load().to_vec();
        let total = self.score.total();
        self.leaderboard_open = true;
        self.events.push(UiEvent::LeaderboardOpened {
            new_high_score: self.leaderboard.is_new_high_score(total),
            current_score: total,
            entries,
        });
    }

    pub fn close_leaderboard(&mut self) {
        if std::mem::replace(&mut self.leaderboard_open, false) {
            self.events.push(UiEvent::LeaderboardClosed);
        }
    }

    /// The leaderboard's "play again" button; same as [`Session::reset`].
    pub fn play_again(&mut self) {
        self.reset();
    }

    /// Start over: scores, celebration latch, effects, the mini-game and the
    /// leaderboard dialog.
    pub fn reset(&mut self) {
        self.score.reset();
        self.scheduler.cancel_slot(&mut self.reveal);
        self.effects.reset(&mut self.scheduler);
        self.balloons.stop(&mut self.scheduler);
        self.submitted = false;
        self.emit_score();
        self.emit_mini_game();
        self.events.push(UiEvent::Confetti {
            active: false,
            pieces: Vec::new(),
        });
        self.events.push(UiEvent::Fireworks {
            active: false,
            shells: Vec::new(),
        });
        self.close_leaderboard();
        log::info!("session reset");
    }

    /// Cancel every timer; nothing fires after this.
    pub fn teardown(&mut self) {
        self.balloons.stop(&mut self.scheduler);
        self.mascot.teardown(&mut self.scheduler);
        self.effects.reset(&mut self.scheduler);
        self.scheduler.clear();
        self.reveal = None;
    }

    /// Re-arm the idle timers after a [`Session::teardown`]. A no-op on a live
    /// session.
    pub fn resume(&mut self) {
        self.mascot.start(&mut self.scheduler, &self.config);
    }

    // --- Time ----------------------------------------------------------------

    /// Let `dt_ms` of virtual time pass, delivering every due timer in order.
    pub fn advance(&mut self, dt_ms: f64) {
        let deadline = self.scheduler.now() + dt_ms.max(0.0);
        while let Some((_, event)) = self.scheduler.next_due(deadline) {
            self.on_timer(event);
        }
        self.scheduler.settle(deadline);
    }

    fn on_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::SpawnBalloon => {
                let spawned = self
                    .balloons
                    .spawn(self.rng.as_mut(), &mut self.scheduler, &self.config);
                if let Some(Spawned { balloon, dropped }) = spawned {
                    for id in dropped {
                        self.events.push(UiEvent::BalloonRemoved { id });
                    }
                    self.events.push(UiEvent::BalloonSpawned { balloon });
                }
            }
            TimerEvent::MoveBalloons => {
                let gone = self.balloons.step(&self.config);
                for id in gone {
                    self.events.push(UiEvent::BalloonRemoved { id });
                }
                if !self.balloons.balloons().is_empty() {
                    self.events.push(UiEvent::BalloonsMoved {
                        balloons: self.balloons.balloons().to_vec(),
                    });
                }
            }
            TimerEvent::RemoveBalloon(id) => {
                if self.balloons.remove(id) {
                    self.events.push(UiEvent::BalloonRemoved { id });
                }
            }
            TimerEvent::ComboExpired => {
                if self.balloons.expire_combo() {
                    self.events.push(UiEvent::ComboReset);
                    self.emit_mini_game();
                }
            }
            TimerEvent::ClearConfetti => {
                if self.effects.clear_confetti() {
                    self.events.push(UiEvent::Confetti {
                        active: false,
                        pieces: Vec::new(),
                    });
                }
            }
            TimerEvent::RevealLeaderboard => {
                self.reveal = None;
                if self.effects.stop_fireworks() {
                    self.events.push(UiEvent::Fireworks {
                        active: false,
                        shells: Vec::new(),
                    });
                }
                self.open_leaderboard();
            }
            TimerEvent::MascotPeekaboo => {
                if self
                    .mascot
                    .peekaboo(self.rng.as_mut(), &mut self.scheduler, &self.config)
                {
                    self.emit_mascot();
                }
            }
            TimerEvent::MascotReappear => {
                self.mascot
                    .reappear(self.rng.as_mut(), &mut self.scheduler, &self.config);
                self.emit_mascot();
            }
            TimerEvent::MascotExpressionReset => {
                self.mascot.reset_expression();
                self.emit_mascot();
            }
            TimerEvent::MascotGiggleEnd => {
                self.mascot.end_giggle();
                self.emit_mascot();
            }
            TimerEvent::MascotDanceEnd => {
                self.mascot.end_dance();
                self.emit_mascot();
            }
            TimerEvent::MascotFinishEating => {
                if self.mascot.finish_eating(&mut self.scheduler, &self.config) {
                    let update = self.score.record_mascot_point();
                    self.audio.play(AudioCue::Chime);
                    self.after_score(update);
                }
            }
        }
    }

    // --- Score side effects ----------------------------------------------------

    fn after_score(&mut self, update: ScoreUpdate) {
        self.emit_score();
        self.mascot.dance(&mut self.scheduler, &self.config);
        self.emit_mascot();
        if update.celebration {
            self.celebrate(update.total);
        }
    }

    fn celebrate(&mut self, total: u32) {
        log::info!("celebration at {total} points");
        self.effects.start_fireworks();
        let shells = effects::firework_show(self.rng.as_mut());
        self.events.push(UiEvent::Fireworks { active: true, shells });
        self.events.push(UiEvent::CelebrationTriggered { total });
        self.audio.play(AudioCue::Celebration);
        self.scheduler.cancel_slot(&mut self.reveal);
        self.reveal = Some(
            self.scheduler.schedule_once(
                self.config.leaderboard_reveal_delay_ms,
                TimerEvent::RevealLeaderboard,
            ),
        );
    }

    fn fire_confetti(&mut self) {
        self.effects.trigger_confetti(&mut self.scheduler, &self.config);
        let pieces = effects::confetti_burst(self.rng.as_mut());
        self.events.push(UiEvent::Confetti { active: true, pieces });
    }

    // --- Outbound snapshots ------------------------------------------------------

    fn emit_score(&mut self) {
        self.events.push(UiEvent::ScoreChanged {
            score: self.score.state(),
            total: self.score.total(),
        });
    }

    fn emit_mini_game(&mut self) {
        self.events.push(UiEvent::MiniGameChanged {
            running: self.balloons.is_running(),
            score: self.balloons.score(),
            combo: self.balloons.combo(),
        });
    }

    fn emit_mascot(&mut self) {
        let m = &self.mascot;
        self.events.push(UiEvent::MascotChanged {
            x: m.x,
            y: m.y,
            expression: m.expression(),
            hidden: m.is_hidden(),
            dancing: m.is_dancing(),
            eating: m.is_eating(),
            giggling: m.is_giggling(),
        });
    }
}
