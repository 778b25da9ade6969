//! Session score: mascot clicks plus balloon pops, with a one-shot celebration
//! once the combined total reaches the threshold.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScoreState {
    pub mascot_score: u32,
    pub mini_game_score: u32,
    pub balloons_popped: u32,
    pub celebration_fired: bool,
}

impl ScoreState {
    pub fn total(&self) -> u32 {
        self.mascot_score.saturating_add(self.mini_game_score)
    }
}

/// What a single point-recording call caused, besides bumping the counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub total: u32,
    /// The total crossed the celebration threshold with this call.
    pub celebration: bool,
    /// The mini-game score landed on a positive milestone multiple.
    pub milestone: bool,
}

pub struct ScoreAggregator {
    state: ScoreState,
    threshold: u32,
    milestone: u32,
}

impl ScoreAggregator {
    pub fn new(threshold: u32, milestone: u32) -> Self {
        Self {
            state: ScoreState::default(),
            threshold,
            milestone,
        }
    }

    pub fn state(&self) -> ScoreState {
        self.state
    }

    pub fn total(&self) -> u32 {
        self.state.total()
    }

    pub fn celebration_fired(&self) -> bool {
        self.state.celebration_fired
    }

    pub fn record_mascot_point(&mut self) -> ScoreUpdate {
        self.state.mascot_score = self.state.mascot_score.saturating_add(1);
        ScoreUpdate {
            total: self.total(),
            celebration: self.check_threshold(),
            milestone: false,
        }
    }

    pub fn record_mini_game_points(&mut self, delta: u32) -> ScoreUpdate {
        self.state.mini_game_score = self.state.mini_game_score.saturating_add(delta);
        let s = self.state.mini_game_score;
        ScoreUpdate {
            total: self.total(),
            celebration: self.check_threshold(),
            milestone: delta > 0 && self.milestone > 0 && s > 0 && s % self.milestone == 0,
        }
    }

    pub fn record_balloon_popped(&mut self) {
        self.state.balloons_popped = self.state.balloons_popped.saturating_add(1);
    }

    /// Latch the celebration the first time the total reaches the threshold.
    fn check_threshold(&mut self) -> bool {
        if self.state.celebration_fired || self.total() < self.threshold {
            return false;
        }
        self.state.celebration_fired = true;
        true
    }

    pub fn reset(&mut self) {
        self.state = ScoreState::default();
    }
}
