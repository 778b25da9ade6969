//! Celebration effects: the confetti / fireworks flags with their timeouts, and
//! the randomized burst parameters handed to the renderer.

use serde::Serialize;

use crate::config::GameConfig;
use crate::constants::{CONFETTI_PIECES, FIREWORK_COUNT, FIREWORK_STAGGER_S, PALETTE};
use crate::events::TimerEvent;
use crate::random::RandomSource;
use crate::scheduler::{Scheduler, TimerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfettiShape {
    Circle,
    Square,
    Triangle,
}

const SHAPES: [ConfettiShape; 3] = [
    ConfettiShape::Circle,
    ConfettiShape::Square,
    ConfettiShape::Triangle,
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConfettiPiece {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub color: &'static str,
    pub shape: ConfettiShape,
    pub size: f64,
    pub rotation: f64,
    pub vx: f64,
    pub vy: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Firework {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub color: &'static str,
    pub delay_s: f64,
}

pub fn confetti_burst(rng: &mut dyn RandomSource) -> Vec<ConfettiPiece> {
    (0..CONFETTI_PIECES as u32)
        .map(|id| ConfettiPiece {
            id,
            x: rng.range(0.0, 100.0),
            y: rng.range(50.0, 70.0),
            color: PALETTE[rng.index(PALETTE.len())],
            shape: SHAPES[rng.index(SHAPES.len())],
            size: rng.range(4.0, 12.0),
            rotation: rng.range(0.0, 360.0),
            vx: (rng.unit() - 0.5) * 50.0,
            vy: -10.0 - rng.unit() * 30.0,
        })
        .collect()
}

/// Four staggered shells over the upper-middle of the screen.
pub fn firework_show(rng: &mut dyn RandomSource) -> Vec<Firework> {
    (0..FIREWORK_COUNT as u32)
        .map(|id| Firework {
            id,
            x: rng.range(25.0, 75.0),
            y: rng.range(25.0, 55.0),
            color: PALETTE[rng.index(PALETTE.len())],
            delay_s: id as f64 * FIREWORK_STAGGER_S,
        })
        .collect()
}

#[derive(Default)]
pub struct Effects {
    confetti: bool,
    fireworks: bool,
    confetti_clear: Option<TimerId>,
}

impl Effects {
    pub fn confetti_active(&self) -> bool {
        self.confetti
    }

    pub fn fireworks_active(&self) -> bool {
        self.fireworks
    }

    /// Raise the confetti flag; a retrigger restarts the clear timeout.
    pub fn trigger_confetti(&mut self, sched: &mut Scheduler<TimerEvent>, cfg: &GameConfig) {
        self.confetti = true;
        sched.cancel_slot(&mut self.confetti_clear);
        self.confetti_clear =
            Some(sched.schedule_once(cfg.confetti_clear_ms, TimerEvent::ClearConfetti));
    }

    pub fn clear_confetti(&mut self) -> bool {
        self.confetti_clear = None;
        std::mem::replace(&mut self.confetti, false)
    }

    pub fn start_fireworks(&mut self) {
        self.fireworks = true;
    }

    pub fn stop_fireworks(&mut self) -> bool {
        std::mem::replace(&mut self.fireworks, false)
    }

    pub fn reset(&mut self, sched: &mut Scheduler<TimerEvent>) {
        sched.cancel_slot(&mut self.confetti_clear);
        self.confetti = false;
        self.fireworks = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;

    #[test]
    fn confetti_burst_shape() {
        let mut rng = SequenceRandom::new(vec![0.0, 0.3, 0.6, 0.99]);
        let pieces = confetti_burst(&mut rng);
        assert_eq!(pieces.len(), 50);
        for p in &pieces {
            assert!((0.0..100.0).contains(&p.x));
            assert!((50.0..70.0).contains(&p.y));
            assert!((4.0..12.0).contains(&p.size));
            assert!(p.vy <= -10.0 && p.vy > -40.0);
        }
    }

    #[test]
    fn fireworks_are_staggered() {
        let mut rng = SequenceRandom::constant(0.5);
        let show = firework_show(&mut rng);
        let delays: Vec<f64> = show.iter().map(|f| f.delay_s).collect();
        assert_eq!(delays, vec![0.0, 0.5, 1.0, 1.5]);
        assert!(show.iter().all(|f| f.x == 50.0 && f.y == 40.0));
    }

    #[test]
    fn confetti_retrigger_keeps_one_timer() {
        let cfg = GameConfig::default();
        let mut sched = Scheduler::new();
        let mut fx = Effects::default();
        fx.trigger_confetti(&mut sched, &cfg);
        sched.advance(60.0);
        fx.trigger_confetti(&mut sched, &cfg);
        assert_eq!(sched.pending(), 1);
        assert_eq!(sched.advance(60.0), vec![]);
        assert_eq!(sched.advance(40.0), vec![TimerEvent::ClearConfetti]);
        assert!(fx.clear_confetti());
        assert!(!fx.confetti_active());
    }
}
