//! Compile-time defaults for every tunable in [`crate::config::GameConfig`].
//!
//! Times are milliseconds of virtual scheduler time. Positions are percentages
//! of the play area (0..100 on both axes, y grows downward).

// --- Score / celebration -----------------------------------------------------

pub const CELEBRATION_THRESHOLD: u32 = 100;
/// Fireworks play for this long before the leaderboard is revealed.
pub const LEADERBOARD_REVEAL_DELAY_MS: f64 = 5_000.0;
pub const CONFETTI_MILESTONE: u32 = 50;
pub const CONFETTI_CLEAR_MS: f64 = 100.0;

// --- Balloon mini-game ---------------------------------------------------------

pub const BALLOON_BASE_SCORE: u32 = 15;
pub const COMBO_WINDOW_MS: f64 = 3_000.0;
pub const BALLOON_SPAWN_INTERVAL_MS: f64 = 2_000.0;
pub const BALLOON_MOTION_TICK_MS: f64 = 50.0;
pub const BALLOON_POP_REMOVAL_MS: f64 = 500.0;

pub const PLAY_AREA_MIN_X: f64 = 20.0;
pub const PLAY_AREA_MAX_X: f64 = 80.0;
/// Balloons above this line have floated out of view.
pub const PLAY_AREA_TOP_Y: f64 = 10.0;

pub const SPAWN_Y_MIN: f64 = 75.0;
pub const SPAWN_Y_MAX: f64 = 90.0;
pub const SPAWN_VX_SPREAD: f64 = 1.5; // vx in [-spread/2, spread/2)
pub const SPAWN_VY_MIN: f64 = -2.5;
pub const SPAWN_VY_MAX: f64 = -1.0;
pub const BALLOON_SIZE_MIN: f64 = 30.0;
pub const BALLOON_SIZE_MAX: f64 = 50.0;

pub const PALETTE: &[&str] = &[
    "#ff6b9d", "#4ecdc4", "#45b7d1", "#f9ca24", "#6c5ce7", "#ff9f43",
];

// --- Leaderboard -----------------------------------------------------------------

pub const LEADERBOARD_CAPACITY: usize = 10;
pub const MAX_NAME_CHARS: usize = 20;
pub const LEADERBOARD_STORAGE_KEY: &str = "pookie-highscores";

// --- Mascot ----------------------------------------------------------------------

pub const MASCOT_REACTION_CHANCE: f64 = 0.4;
pub const MASCOT_REACTION_MS: f64 = 1_500.0;
pub const MASCOT_GIGGLE_MS: f64 = 1_200.0;
pub const MASCOT_PEEKABOO_INTERVAL_MS: f64 = 4_000.0;
pub const MASCOT_PEEKABOO_CHANCE: f64 = 0.3;
pub const MASCOT_HIDDEN_MS: f64 = 1_500.0;
pub const MASCOT_SURPRISE_MS: f64 = 1_000.0;
pub const MASCOT_DANCE_MS: f64 = 2_000.0;
pub const MASCOT_EATING_MS: f64 = 1_500.0;
pub const MASCOT_FED_GIGGLE_MS: f64 = 1_000.0;

// --- Bursts ----------------------------------------------------------------------

pub const CONFETTI_PIECES: usize = 50;
pub const CONFETTI_LIFETIME_MS: f64 = 3_000.0;
pub const FIREWORK_COUNT: usize = 4;
pub const FIREWORK_STAGGER_S: f64 = 0.5;
