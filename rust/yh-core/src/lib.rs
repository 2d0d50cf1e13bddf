//! yh-core: Yahtzee rules, scoring, immutable game state, the pure transition engine,
//! and configuration.

pub mod action;
pub mod category;
pub mod chance;
pub mod config;
pub mod engine;
pub mod legal;
pub mod scorecard;
pub mod scoring;
pub mod state;

pub use action::{canonical_hold, Action, HoldMask};
pub use category::{Category, CAT_NAMES, NUM_CATS};
pub use chance::{roll5, ChanceMode, EventKey};
pub use config::{
    ChanceConfig, Config, ConfigError, Controller, PacingConfig, PacingPreset, PacingTicks,
    PlayerConfig, SessionConfig, StrategyConfig, StrategyKind, MAX_PLAYERS,
};
pub use engine::{
    apply_action, apply_hold_mask, can_roll, can_select_category, can_toggle_hold,
    initial_state, is_terminal, reset, roll, select_category, toggle_hold,
};
pub use legal::{is_category_legal, legal_categories, CategorySet};
pub use scorecard::{Scorecard, UPPER_BONUS, UPPER_BONUS_THRESHOLD, YAHTZEE_BONUS};
pub use scoring::{
    face_counts, is_bonus_yahtzee, is_yahtzee, joker_active, potential_score, score,
    score_in_context, scores_for_dice, Faces,
};
pub use state::{
    Die, GameState, InvariantError, TurnLog, TurnRecord, MAX_ROLLS, NUM_DICE, NUM_ROUNDS,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");


#[cfg(test)]
mod scoring_tests;
#[cfg(test)]
mod state_tests;
