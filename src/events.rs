//! Events flowing in and out of the session.
//!
//! [`TimerEvent`]s are what the scheduler delivers back to the session.
//! [`UiEvent`]s are queued for the rendering layer, which drains them as a
//! JSON array (`{"type": "...", ...}` objects).

use serde::Serialize;

use crate::balloon::Balloon;
use crate::effects::{ConfettiPiece, Firework};
use crate::leaderboard::LeaderboardEntry;
use crate::mascot::Expression;
use crate::score::ScoreState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    SpawnBalloon,
    MoveBalloons,
    RemoveBalloon(u32),
    ComboExpired,
    ClearConfetti,
    RevealLeaderboard,
    MascotPeekaboo,
    MascotReappear,
    MascotExpressionReset,
    MascotGiggleEnd,
    MascotDanceEnd,
    MascotFinishEating,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    ScoreChanged {
        score: ScoreState,
        total: u32,
    },
    MiniGameChanged {
        running: bool,
        score: u32,
        combo: u32,
    },
    BalloonSpawned {
        balloon: Balloon,
    },
    BalloonsMoved {
        balloons: Vec<Balloon>,
    },
    BalloonPopped {
        id: u32,
        award: u32,
        combo: u32,
    },
    BalloonRemoved {
        id: u32,
    },
    ComboReset,
    Confetti {
        active: bool,
        pieces: Vec<ConfettiPiece>,
    },
    Fireworks {
        active: bool,
        shells: Vec<Firework>,
    },
    CelebrationTriggered {
        total: u32,
    },
    LeaderboardOpened {
        entries: Vec<LeaderboardEntry>,
        current_score: u32,
        new_high_score: bool,
    },
    LeaderboardUpdated {
        entries: Vec<LeaderboardEntry>,
        highlight: Option<usize>,
    },
    SubmissionRejected,
    LeaderboardClosed,
    MascotChanged {
        x: f64,
        y: f64,
        expression: Expression,
        hidden: bool,
        dancing: bool,
        eating: bool,
        giggling: bool,
    },
}
