//! Runtime configuration for the page.
//!
//! [`GameConfig`] mirrors every constant in [`crate::constants`]. The web facade
//! accepts an optional JSON document; missing keys fall back to the compile-time
//! defaults, so an override can name just the values it cares about:
//!
//! ```json
//! { "celebration_threshold": 50, "combo_window_ms": 2000 }
//! ```

use crate::constants::*;
use crate::error::{PageError, PageResult};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Score ────────────────────────────────────────────────────────────────
    pub celebration_threshold: u32,
    pub leaderboard_reveal_delay_ms: f64,
    pub confetti_milestone: u32,
    pub confetti_clear_ms: f64,

    // ── Balloons ─────────────────────────────────────────────────────────────
    pub balloon_base_score: u32,
    pub combo_window_ms: f64,
    pub spawn_interval_ms: f64,
    pub motion_tick_ms: f64,
    pub pop_removal_ms: f64,
    pub play_area_min_x: f64,
    pub play_area_max_x: f64,
    pub play_area_top_y: f64,
    pub spawn_y_min: f64,
    pub spawn_y_max: f64,
    pub spawn_vx_spread: f64,
    pub spawn_vy_min: f64,
    pub spawn_vy_max: f64,

    // ── Leaderboard ──────────────────────────────────────────────────────────
    pub leaderboard_capacity: usize,
    pub max_name_chars: usize,
    pub storage_key: String,

    // ── Mascot ───────────────────────────────────────────────────────────────
    pub mascot_reaction_chance: f64,
    pub mascot_reaction_ms: f64,
    pub mascot_giggle_ms: f64,
    pub peekaboo_interval_ms: f64,
    pub peekaboo_chance: f64,
    pub mascot_hidden_ms: f64,
    pub mascot_surprise_ms: f64,
    pub mascot_dance_ms: f64,
    pub mascot_eating_ms: f64,
    pub mascot_fed_giggle_ms: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            celebration_threshold: CELEBRATION_THRESHOLD,
            leaderboard_reveal_delay_ms: LEADERBOARD_REVEAL_DELAY_MS,
            confetti_milestone: CONFETTI_MILESTONE,
            confetti_clear_ms: CONFETTI_CLEAR_MS,
            balloon_base_score: BALLOON_BASE_SCORE,
            combo_window_ms: COMBO_WINDOW_MS,
            spawn_interval_ms: BALLOON_SPAWN_INTERVAL_MS,
            motion_tick_ms: BALLOON_MOTION_TICK_MS,
            pop_removal_ms: BALLOON_POP_REMOVAL_MS,
            play_area_min_x: PLAY_AREA_MIN_X,
            play_area_max_x: PLAY_AREA_MAX_X,
            play_area_top_y: PLAY_AREA_TOP_Y,
            spawn_y_min: SPAWN_Y_MIN,
            spawn_y_max: SPAWN_Y_MAX,
            spawn_vx_spread: SPAWN_VX_SPREAD,
            spawn_vy_min: SPAWN_VY_MIN,
            spawn_vy_max: SPAWN_VY_MAX,
            leaderboard_capacity: LEADERBOARD_CAPACITY,
            max_name_chars: MAX_NAME_CHARS,
            storage_key: LEADERBOARD_STORAGE_KEY.to_string(),
            mascot_reaction_chance: MASCOT_REACTION_CHANCE,
            mascot_reaction_ms: MASCOT_REACTION_MS,
            mascot_giggle_ms: MASCOT_GIGGLE_MS,
            peekaboo_interval_ms: MASCOT_PEEKABOO_INTERVAL_MS,
            peekaboo_chance: MASCOT_PEEKABOO_CHANCE,
            mascot_hidden_ms: MASCOT_HIDDEN_MS,
            mascot_surprise_ms: MASCOT_SURPRISE_MS,
            mascot_dance_ms: MASCOT_DANCE_MS,
            mascot_eating_ms: MASCOT_EATING_MS,
            mascot_fed_giggle_ms: MASCOT_FED_GIGGLE_MS,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override and validate the result.
    pub fn from_json(text: &str) -> PageResult<Self> {
        let cfg: GameConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> PageResult<()> {
        let positive_times = [
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("motion_tick_ms", self.motion_tick_ms),
            ("peekaboo_interval_ms", self.peekaboo_interval_ms),
        ];
        for (name, v) in positive_times {
            // repeating timers with a zero period would never let `advance` finish
            if !(v > 0.0) {
                return Err(PageError::Config(format!("{name} must be > 0, got {v}")));
            }
        }
        if self.play_area_min_x >= self.play_area_max_x {
            return Err(PageError::Config(format!(
                "play area x range is empty ({}..{})",
                self.play_area_min_x, self.play_area_max_x
            )));
        }
        if self.spawn_vy_max >= 0.0 || self.spawn_vy_min > self.spawn_vy_max {
            return Err(PageError::Config(format!(
                "balloons must always rise: vy range {}..{}",
                self.spawn_vy_min, self.spawn_vy_max
            )));
        }
        if self.spawn_y_min > self.spawn_y_max {
            return Err(PageError::Config("spawn_y_min > spawn_y_max".into()));
        }
        if self.leaderboard_capacity == 0 || self.max_name_chars == 0 {
            return Err(PageError::Config(
                "leaderboard capacity and name length must be non-zero".into(),
            ));
        }
        if self.storage_key.is_empty() {
            return Err(PageError::Config("storage_key is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = GameConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.celebration_threshold, 100);
        assert_eq!(cfg.storage_key, "pookie-highscores");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = GameConfig::from_json(r#"{ "combo_window_ms": 1200 }"#).unwrap();
        assert_eq!(cfg.combo_window_ms, 1200.0);
        assert_eq!(cfg.balloon_base_score, 15);
        assert_eq!(cfg.leaderboard_capacity, 10);
    }

    #[test]
    fn rejects_sinking_balloons() {
        let err = GameConfig::from_json(r#"{ "spawn_vy_max": 0.5 }"#).unwrap_err();
        assert!(matches!(err, PageError::Config(_)));
    }

    #[test]
    fn rejects_zero_tick() {
        assert!(GameConfig::from_json(r#"{ "motion_tick_ms": 0 }"#).is_err());
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, PageError::Json(_)));
    }
}
