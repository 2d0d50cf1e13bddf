//! Serializable renderer view of a session.
//!
//! Everything a renderer needs for one frame: the game state flattened into plain
//! values plus coordinator-only UI state (animation, automated-turn previews, prompts,
//! the category cursor and the turn banner).

use serde::Serialize;
use yh_core::{Category, Die, PacingPreset, PlayerConfig, Scorecard};

use crate::coordinator::Phase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DieView {
    pub value: u8,
    pub held: bool,
}

impl From<Die> for DieView {
    fn from(d: Die) -> Self {
        Self {
            value: d.value,
            held: d.held,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreRow {
    pub category: Category,
    /// `None` while the box is open.
    pub score: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScorecardView {
    /// Canonical category order.
    pub rows: Vec<ScoreRow>,
    pub upper_total: u16,
    pub upper_bonus: u16,
    pub lower_total: u16,
    pub yahtzee_bonus_count: u8,
    pub yahtzee_bonus: u16,
    pub grand_total: u32,
}

impl From<&Scorecard> for ScorecardView {
    fn from(card: &Scorecard) -> Self {
        Self {
            rows: Category::ALL
                .iter()
                .map(|&category| ScoreRow {
                    category,
                    score: card.get(category),
                })
                .collect(),
            upper_total: card.upper_subtotal(),
            upper_bonus: card.upper_bonus(),
            lower_total: card.lower_subtotal(),
            yahtzee_bonus_count: card.yahtzee_bonus_count(),
            yahtzee_bonus: card.yahtzee_bonus(),
            grand_total: card.grand_total(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PotentialScore {
    pub category: Category,
    pub score: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub name: String,
    pub is_human: bool,
    /// Strategy token for automated seats.
    pub strategy: Option<&'static str>,
}

impl From<&PlayerConfig> for PlayerView {
    fn from(p: &PlayerConfig) -> Self {
        Self {
            name: p.name.clone(),
            is_human: p.is_human(),
            strategy: p.controller.strategy().map(|k| k.token()),
        }
    }
}

/// The most recent scoring action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastTurn {
    pub player: usize,
    pub name: String,
    pub category: Category,
    pub score: u16,
}

/// Shown between turns of a multiplayer game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnBanner {
    pub next_player: usize,
    pub next_player_name: String,
    pub round: u8,
    pub last_turn: Option<LastTurn>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub dice: Vec<DieView>,
    pub rolls_used: u8,
    pub rolls_remaining: u8,
    pub current_round: u8,
    pub game_over: bool,
    pub is_rolling: bool,
    pub can_roll: bool,
    pub can_undo: bool,
    pub is_human_turn: bool,
    pub has_any_ai: bool,
    pub ai_reason: String,
    /// Category an automated player is about to commit.
    pub ai_score_choice: Option<Category>,
    /// Current player's card.
    pub scorecard: ScorecardView,
    /// Open categories with what the current dice would score. Empty before the first roll.
    pub potential_scores: Vec<PotentialScore>,
    pub num_players: usize,
    pub current_player_index: usize,
    pub players: Vec<PlayerView>,
    pub all_scorecards: Vec<ScorecardView>,
    pub turn_transition: Option<TurnBanner>,
    pub last_turn: Option<LastTurn>,
    pub speed: PacingPreset,
    pub confirm_zero_category: Option<Category>,
    pub selected_category: Option<Category>,
    pub fault: Option<String>,
}
