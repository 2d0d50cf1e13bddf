//! yh-strategy: the four decision policies and the headless game drivers.
//!
//! Every policy observes a [`GameState`] after at least one roll and proposes an
//! [`Action`]. Policies never mutate state; [`play_turn`] and [`play_game`] apply their
//! proposals through the engine.
//!
//! Tie-breaks shared by all policies: the first category in canonical order wins among
//! equal scores, and among equally valued hold masks the one holding fewer dice wins.

pub mod ev;
pub mod greedy;
pub mod optimal;
pub mod random;

use yh_core::{
    apply_action, can_roll, initial_state, legal_categories, potential_score, roll,
    select_category, Action, Category, ChanceMode, Faces, GameState, HoldMask, Scorecard,
    StrategyConfig, StrategyKind,
};

pub use ev::ExpectedValueStrategy;
pub use greedy::GreedyStrategy;
pub use optimal::OptimalStrategy;
pub use random::RandomStrategy;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A proposed action plus a short explanation for spectators.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub reason: String,
}

impl Decision {
    pub fn new(action: Action, reason: impl Into<String>) -> Self {
        Self {
            action,
            reason: reason.into(),
        }
    }
}

/// Closed set of policies behind one `choose_action` capability.
#[derive(Debug, Clone)]
pub enum Strategy {
    Random(RandomStrategy),
    Greedy(GreedyStrategy),
    ExpectedValue(ExpectedValueStrategy),
    Optimal(OptimalStrategy),
}

impl Strategy {
    /// Build the policy for `kind`. `seed` feeds the policies that sample.
    pub fn new(kind: StrategyKind, config: &StrategyConfig, seed: u64) -> Self {
        match kind {
            StrategyKind::Random => Strategy::Random(RandomStrategy::new(
                seed,
                config.random_roll_again_probability,
            )),
            StrategyKind::Greedy => {
                Strategy::Greedy(GreedyStrategy::new(config.greedy_stop_threshold))
            }
            StrategyKind::ExpectedValue => Strategy::ExpectedValue(ExpectedValueStrategy::new(
                seed,
                config.ev_simulations,
            )),
            StrategyKind::Optimal => Strategy::Optimal(OptimalStrategy::new()),
        }
    }

    /// Default tunables.
    pub fn with_defaults(kind: StrategyKind, seed: u64) -> Self {
        Self::new(kind, &StrategyConfig::default(), seed)
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Random(_) => StrategyKind::Random,
            Strategy::Greedy(_) => StrategyKind::Greedy,
            Strategy::ExpectedValue(_) => StrategyKind::ExpectedValue,
            Strategy::Optimal(_) => StrategyKind::Optimal,
        }
    }

    pub fn decide(&mut self, state: &GameState) -> Decision {
        match self {
            Strategy::Random(s) => s.decide(state),
            Strategy::Greedy(s) => s.decide(state),
            Strategy::ExpectedValue(s) => s.decide(state),
            Strategy::Optimal(s) => s.decide(state),
        }
    }

    pub fn choose_action(&mut self, state: &GameState) -> Action {
        self.decide(state).action
    }
}

/// Highest-scoring legal category for `faces`, first in canonical order on ties.
///
/// `None` only when the scorecard is complete.
pub fn best_category(faces: &Faces, card: &Scorecard) -> Option<(Category, u16)> {
    let mut best: Option<(Category, u16)> = None;
    for cat in legal_categories(faces, card).iter() {
        let s = potential_score(cat, faces, card);
        if best.map_or(true, |(_, b)| s > b) {
            best = Some((cat, s));
        }
    }
    best
}

/// Best immediate score for `faces`, 0 when nothing is open.
pub fn best_score(faces: &Faces, card: &Scorecard) -> u16 {
    best_category(faces, card).map_or(0, |(_, s)| s)
}

/// Score action for the best category. Falls back to Chance on a complete card, which
/// the engine then ignores.
pub(crate) fn score_best(state: &GameState, reason: &str) -> Decision {
    let (cat, s) = best_category(&state.faces(), state.current_scorecard())
        .unwrap_or((Category::Chance, 0));
    Decision::new(Action::Score(cat), format!("{reason}: {cat} for {s}"))
}

/// Roll all five dice, the only move before a turn's first roll.
pub(crate) fn first_roll(who: &str) -> Decision {
    let hold = HoldMask::NONE;
    Decision::new(Action::Reroll { hold }, format!("{who}: first roll"))
}

/// Play the acting player's whole turn: the mandatory first roll, then strategy decisions
/// until a category is scored.
///
/// A reroll request with no rolls left is converted into scoring the first legal
/// category in canonical order.
pub fn play_turn(
    state: &GameState,
    strategy: &mut Strategy,
    chance: &mut ChanceMode,
) -> GameState {
    if state.game_over {
        return state.clone();
    }
    let mut state = if state.rolls_used == 0 {
        roll(state, chance)
    } else {
        state.clone()
    };
    loop {
        let action = match strategy.choose_action(&state) {
            Action::Reroll { .. } if !can_roll(&state) => return force_score(&state),
            a => a,
        };
        let next = apply_action(&state, action, chance);
        if let Action::Score(_) = action {
            if next.log.len() > state.log.len() {
                return next;
            }
            // Refused (category filled or forbidden).
            return force_score(&state);
        }
        state = next;
    }
}

fn force_score(state: &GameState) -> GameState {
    match legal_categories(&state.faces(), state.current_scorecard()).first() {
        Some(cat) => select_category(state, cat),
        None => state.clone(),
    }
}

/// Play a complete single-player game.
pub fn play_game(strategy: &mut Strategy, chance: &mut ChanceMode) -> GameState {
    let mut state = initial_state(1);
    while !state.game_over {
        state = play_turn(&state, strategy, chance);
    }
    state
}
