//! Balloon-pop mini-game.
//!
//! Balloons spawn near the bottom of the play area, float upward while bouncing
//! between the side walls, and either drift out of view or get popped. Each pop
//! awards `base × (combo + 1)`; the combo decays back to zero when no pop lands
//! within the combo window of the most recent one.

use serde::Serialize;

use crate::config::GameConfig;
use crate::constants::{BALLOON_SIZE_MAX, BALLOON_SIZE_MIN, PALETTE};
use crate::events::TimerEvent;
use crate::random::RandomSource;
use crate::scheduler::{Scheduler, TimerId};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Balloon {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub color: &'static str,
    pub size: f64,
    pub popped: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MiniGameState {
    Stopped,
    Running,
}

/// Result of a successful pop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopOutcome {
    pub id: u32,
    pub award: u32,
    /// Combo count after this pop.
    pub combo: u32,
    /// Local mini-game score after this pop.
    pub score: u32,
}

/// A fresh balloon, plus the popped ones swept away to make room for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Spawned {
    pub balloon: Balloon,
    pub dropped: Vec<u32>,
}

#[derive(Default)]
struct GameTimers {
    spawn: Option<TimerId>,
    motion: Option<TimerId>,
    combo_decay: Option<TimerId>,
    removals: Vec<(u32, TimerId)>, // (balloon id, timer)
}

pub struct BalloonGame {
    state: MiniGameState,
    balloons: Vec<Balloon>,
    score: u32,
    combo: u32,
    next_id: u32,
    timers: GameTimers,
}

impl Default for BalloonGame {
    fn default() -> Self {
        Self::new()
    }
}

impl BalloonGame {
    pub fn new() -> Self {
        Self {
            state: MiniGameState::Stopped,
            balloons: Vec::new(),
            score: 0,
            combo: 0,
            next_id: 1,
            timers: GameTimers::default(),
        }
    }

    pub fn state(&self) -> MiniGameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == MiniGameState::Running
    }

    pub fn balloons(&self) -> &[Balloon] {
        &self.balloons
    }

    pub fn get(&self, id: u32) -> Option<&Balloon> {
        self.balloons.iter().find(|b| b.id == id)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    // --- Lifecycle ----------------------------------------------------------

    /// Enter `Running` from scratch: no balloons, no combo, local score 0.
    /// Restarting while running re-arms the spawn and motion timers.
    pub fn start(&mut self, sched: &mut Scheduler<TimerEvent>, cfg: &GameConfig) {
        self.clear(sched);
        self.state = MiniGameState::Running;
        self.timers.spawn =
            Some(sched.schedule_every(cfg.spawn_interval_ms, TimerEvent::SpawnBalloon));
        self.timers.motion =
            Some(sched.schedule_every(cfg.motion_tick_ms, TimerEvent::MoveBalloons));
        log::info!("balloon game started");
    }

    /// Back to `Stopped`; every timer the game owns is cancelled.
    pub fn stop(&mut self, sched: &mut Scheduler<TimerEvent>) {
        let was_running = self.is_running();
        self.clear(sched);
        self.state = MiniGameState::Stopped;
        if was_running {
            log::info!("balloon game stopped");
        }
    }

    fn clear(&mut self, sched: &mut Scheduler<TimerEvent>) {
        sched.cancel_slot(&mut self.timers.spawn);
        sched.cancel_slot(&mut self.timers.motion);
        sched.cancel_slot(&mut self.timers.combo_decay);
        for (_, t) in self.timers.removals.drain(..) {
            sched.cancel(t);
        }
        self.balloons.clear();
        self.score = 0;
        self.combo = 0;
    }

    // --- Spawn / motion -----------------------------------------------------

    /// Spawn one randomized balloon. Ignored unless running. Balloons still
    /// showing their pop animation are dropped first.
    pub fn spawn(
        &mut self,
        rng: &mut dyn RandomSource,
        sched: &mut Scheduler<TimerEvent>,
        cfg: &GameConfig,
    ) -> Option<Spawned> {
        if !self.is_running() {
            return None;
        }
        let dropped = self.sweep_popped(sched);
        let x = rng.range(cfg.play_area_min_x, cfg.play_area_max_x);
        let y = rng.range(cfg.spawn_y_min, cfg.spawn_y_max);
        let color = PALETTE[rng.index(PALETTE.len())];
        let size = rng.range(BALLOON_SIZE_MIN, BALLOON_SIZE_MAX);
        let vx = (rng.unit() - 0.5) * cfg.spawn_vx_spread;
        // (vy_min, vy_max]: always net upward
        let vy = cfg.spawn_vy_max - rng.unit() * (cfg.spawn_vy_max - cfg.spawn_vy_min);
        let id = self.launch(x, y, vx, vy);
        let b = self.get_mut(id)?;
        b.color = color;
        b.size = size;
        Some(Spawned {
            balloon: b.clone(),
            dropped,
        })
    }

    fn sweep_popped(&mut self, sched: &mut Scheduler<TimerEvent>) -> Vec<u32> {
        let dropped: Vec<u32> = self.balloons.iter().filter(|b| b.popped).map(|b| b.id).collect();
        if dropped.is_empty() {
            return dropped;
        }
        self.balloons.retain(|b| !b.popped);
        self.timers.removals.retain(|&(id, t)| {
            if dropped.contains(&id) {
                sched.cancel(t);
                false
            } else {
                true
            }
        });
        dropped
    }

    /// Add a balloon with explicit kinematics and return its id.
    pub fn launch(&mut self, x: f64, y: f64, vx: f64, vy: f64) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        self.balloons.push(Balloon {
            id,
            x,
            y,
            vx,
            vy,
            color: PALETTE[0],
            size: BALLOON_SIZE_MIN,
            popped: false,
        });
        id
    }

    /// Advance every unpopped balloon one motion tick. Returns the ids of
    /// balloons that floated out of view and were dropped.
    pub fn step(&mut self, cfg: &GameConfig) -> Vec<u32> {
        if !self.is_running() {
            return Vec::new();
        }
        let (min_x, max_x, top) = (cfg.play_area_min_x, cfg.play_area_max_x, cfg.play_area_top_y);
        let mut gone = Vec::new();
        self.balloons.retain_mut(|b| {
            if b.popped {
                return true; // frozen until its pop animation is done
            }
            let nx = b.x + b.vx;
            let ny = b.y + b.vy;
            if nx <= min_x || nx >= max_x {
                b.vx = -b.vx;
            }
            if ny < top {
                gone.push(b.id);
                return false;
            }
            b.x = nx.clamp(min_x, max_x);
            b.y = ny;
            true
        });
        gone
    }

    // --- Popping ------------------------------------------------------------

    /// Pop a live balloon. Unknown or already-popped ids are a no-op.
    pub fn pop(
        &mut self,
        id: u32,
        sched: &mut Scheduler<TimerEvent>,
        cfg: &GameConfig,
    ) -> Option<PopOutcome> {
        let b = match self.balloons.iter_mut().find(|b| b.id == id) {
            Some(b) if !b.popped => b,
            _ => {
                log::debug!("pop ignored for balloon {id}");
                return None;
            }
        };
        b.popped = true;

        let award = cfg.balloon_base_score.saturating_mul(self.combo.saturating_add(1));
        self.score = self.score.saturating_add(award);
        self.combo = self.combo.saturating_add(1);

        let removal = sched.schedule_once(cfg.pop_removal_ms, TimerEvent::RemoveBalloon(id));
        self.timers.removals.push((id, removal));
        // each pop restarts the decay window
        sched.cancel_slot(&mut self.timers.combo_decay);
        self.timers.combo_decay =
            Some(sched.schedule_once(cfg.combo_window_ms, TimerEvent::ComboExpired));

        Some(PopOutcome {
            id,
            award,
            combo: self.combo,
            score: self.score,
        })
    }

    /// Drop a balloon from the live set (pop animation finished).
    pub fn remove(&mut self, id: u32) -> bool {
        self.timers.removals.retain(|(bid, _)| *bid != id);
        let before = self.balloons.len();
        self.balloons.retain(|b| b.id != id);
        self.balloons.len() != before
    }

    /// Combo window elapsed. Returns true if a running combo was reset.
    pub fn expire_combo(&mut self) -> bool {
        self.timers.combo_decay = None;
        if self.combo == 0 {
            return false;
        }
        self.combo = 0;
        true
    }

    fn get_mut(&mut self, id: u32) -> Option<&mut Balloon> {
        self.balloons.iter_mut().find(|b| b.id == id)
    }
}
