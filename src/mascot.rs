//! Pookie, the clickable mascot.
//!
//! Pookie lives on the screen edges (never in the centre, where the mini-game
//! sits), reacts to clicks, occasionally plays peek-a-boo, dances whenever the
//! score goes up, and can be fed. All of it is presentation state; the only
//! thing the rest of the page cares about is that clicks and meals are points.

use serde::Serialize;

use crate::config::GameConfig;
use crate::events::TimerEvent;
use crate::random::RandomSource;
use crate::scheduler::{Scheduler, TimerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    Happy,
    Surprised,
    Mischief,
    Eating,
    Dancing,
}

const CLICK_REACTIONS: [Expression; 3] =
    [Expression::Mischief, Expression::Surprised, Expression::Happy];

/// What a click did to the mascot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickReaction {
    Expression(Expression),
    Jumped,
}

/// Random point on one of the four edge bands (top, right, bottom, left).
pub fn edge_position(rng: &mut dyn RandomSource) -> (f64, f64) {
    match rng.index(4) {
        0 => (rng.range(10.0, 90.0), rng.range(5.0, 20.0)),
        1 => (rng.range(80.0, 95.0), rng.range(20.0, 80.0)),
        2 => (rng.range(10.0, 90.0), rng.range(80.0, 95.0)),
        _ => (rng.range(5.0, 20.0), rng.range(20.0, 80.0)),
    }
}

#[derive(Default)]
struct MascotTimers {
    peekaboo: Option<TimerId>,
    reappear: Option<TimerId>,
    expression: Option<TimerId>,
    giggle: Option<TimerId>,
    dance: Option<TimerId>,
    eating: Option<TimerId>,
}

pub struct Mascot {
    pub x: f64,
    pub y: f64,
    expression: Expression,
    hidden: bool,
    dancing: bool,
    eating: bool,
    giggling: bool,
    timers: MascotTimers,
}

impl Mascot {
    pub fn new(rng: &mut dyn RandomSource) -> Self {
        let (x, y) = edge_position(rng);
        Self {
            x,
            y,
            expression: Expression::Happy,
            hidden: false,
            dancing: false,
            eating: false,
            giggling: false,
            timers: MascotTimers::default(),
        }
    }

    pub fn expression(&self) -> Expression {
        self.expression
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_dancing(&self) -> bool {
        self.dancing
    }

    pub fn is_eating(&self) -> bool {
        self.eating
    }

    pub fn is_giggling(&self) -> bool {
        self.giggling
    }

    /// Arm the peek-a-boo cycle. A cycle that is already running is kept.
    pub fn start(&mut self, sched: &mut Scheduler<TimerEvent>, cfg: &GameConfig) {
        if self.timers.peekaboo.is_some_and(|t| sched.is_pending(t)) {
            return;
        }
        self.timers.peekaboo =
            Some(sched.schedule_every(cfg.peekaboo_interval_ms, TimerEvent::MascotPeekaboo));
    }

    pub fn click(
        &mut self,
        rng: &mut dyn RandomSource,
        sched: &mut Scheduler<TimerEvent>,
        cfg: &GameConfig,
    ) -> ClickReaction {
        let reaction = CLICK_REACTIONS[rng.index(CLICK_REACTIONS.len())];
        if rng.chance(cfg.mascot_reaction_chance) {
            self.show_for(reaction, cfg.mascot_reaction_ms, sched);
            ClickReaction::Expression(reaction)
        } else {
            (self.x, self.y) = edge_position(rng);
            self.expression = Expression::Happy;
            self.giggle_for(cfg.mascot_giggle_ms, sched);
            ClickReaction::Jumped
        }
    }

    /// Peek-a-boo tick. Returns true if the mascot ducked out of view.
    pub fn peekaboo(
        &mut self,
        rng: &mut dyn RandomSource,
        sched: &mut Scheduler<TimerEvent>,
        cfg: &GameConfig,
    ) -> bool {
        if self.hidden || !rng.chance(cfg.peekaboo_chance) {
            return false;
        }
        self.hidden = true;
        self.timers.reappear =
            Some(sched.schedule_once(cfg.mascot_hidden_ms, TimerEvent::MascotReappear));
        true
    }

    pub fn reappear(
        &mut self,
        rng: &mut dyn RandomSource,
        sched: &mut Scheduler<TimerEvent>,
        cfg: &GameConfig,
    ) {
        self.timers.reappear = None;
        (self.x, self.y) = edge_position(rng);
        self.hidden = false;
        self.show_for(Expression::Surprised, cfg.mascot_surprise_ms, sched);
    }

    /// Dance for a while; a new score restarts the dance.
    pub fn dance(&mut self, sched: &mut Scheduler<TimerEvent>, cfg: &GameConfig) {
        self.dancing = true;
        self.expression = Expression::Dancing;
        sched.cancel_slot(&mut self.timers.expression);
        sched.cancel_slot(&mut self.timers.dance);
        self.timers.dance =
            Some(sched.schedule_once(cfg.mascot_dance_ms, TimerEvent::MascotDanceEnd));
    }

    pub fn end_dance(&mut self) {
        self.timers.dance = None;
        self.dancing = false;
        if !self.eating {
            self.expression = Expression::Happy;
        }
    }

    /// Start a meal. Returns false while already eating.
    pub fn feed(&mut self, sched: &mut Scheduler<TimerEvent>, cfg: &GameConfig) -> bool {
        if self.eating {
            return false;
        }
        self.eating = true;
        self.expression = Expression::Eating;
        sched.cancel_slot(&mut self.timers.expression);
        self.timers.eating =
            Some(sched.schedule_once(cfg.mascot_eating_ms, TimerEvent::MascotFinishEating));
        true
    }

    /// Meal done. Returns true if a meal was actually in progress (worth a point).
    pub fn finish_eating(&mut self, sched: &mut Scheduler<TimerEvent>, cfg: &GameConfig) -> bool {
        self.timers.eating = None;
        if !self.eating {
            return false;
        }
        self.eating = false;
        self.expression = Expression::Happy;
        self.giggle_for(cfg.mascot_fed_giggle_ms, sched);
        true
    }

    pub fn reset_expression(&mut self) {
        self.timers.expression = None;
        if !self.eating && !self.dancing {
            self.expression = Expression::Happy;
        }
    }

    pub fn end_giggle(&mut self) {
        self.timers.giggle = None;
        self.giggling = false;
    }

    fn show_for(&mut self, expr: Expression, ms: f64, sched: &mut Scheduler<TimerEvent>) {
        self.expression = expr;
        sched.cancel_slot(&mut self.timers.expression);
        self.timers.expression = Some(sched.schedule_once(ms, TimerEvent::MascotExpressionReset));
    }

    fn giggle_for(&mut self, ms: f64, sched: &mut Scheduler<TimerEvent>) {
        self.giggling = true;
        sched.cancel_slot(&mut self.timers.giggle);
        self.timers.giggle = Some(sched.schedule_once(ms, TimerEvent::MascotGiggleEnd));
    }

    /// Cancel every pending mascot timer.
    pub fn teardown(&mut self, sched: &mut Scheduler<TimerEvent>) {
        let t = &mut self.timers;
        for slot in [
            &mut t.peekaboo,
            &mut t.reappear,
            &mut t.expression,
            &mut t.giggle,
            &mut t.dance,
            &mut t.eating,
        ] {
            sched.cancel_slot(slot);
        }
    }
}
