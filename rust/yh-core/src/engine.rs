//! Pure transition functions over [`GameState`].
//!
//! This module is the single place that derives one game state from another. Every
//! transition takes the current state by reference and returns the next one. A
//! transition whose precondition fails returns an unchanged copy instead of an error:
//! callers are UI event streams that routinely send stale actions (a click on a category
//! an automated opponent just filled, a roll request after the third roll).

use std::sync::Arc;

use crate::action::{Action, HoldMask};
use crate::category::Category;
use crate::chance::{ChanceMode, EventKey};
use crate::legal::is_category_legal;
use crate::scoring::{is_bonus_yahtzee, score_in_context};
use crate::state::{GameState, TurnRecord, MAX_ROLLS, NUM_DICE, NUM_ROUNDS};

/// Fresh game for `num_players` players.
pub fn initial_state(num_players: usize) -> GameState {
    GameState::new(num_players)
}

/// Fresh game with the same number of players as `state`.
pub fn reset(state: &GameState) -> GameState {
    GameState::new(state.num_players())
}

pub fn is_terminal(state: &GameState) -> bool {
    state.game_over
}

pub fn can_roll(state: &GameState) -> bool {
    !state.game_over && state.rolls_used < MAX_ROLLS
}

/// Holding is only possible once the turn's first roll has happened.
pub fn can_toggle_hold(state: &GameState, die_index: usize) -> bool {
    !state.game_over && state.rolls_used > 0 && die_index < NUM_DICE
}

pub fn can_select_category(state: &GameState, category: Category) -> bool {
    !state.game_over
        && state.rolls_used > 0
        && is_category_legal(category, &state.faces(), state.current_scorecard())
}

/// Re-randomize every unheld die and count the roll.
pub fn roll(state: &GameState, chance: &mut ChanceMode) -> GameState {
    if !can_roll(state) {
        return state.clone();
    }
    let key = EventKey {
        seed: 0,
        player: state.current_player as u8,
        round: state.current_round,
        roll: state.rolls_used + 1,
    };
    let dice = chance.reroll(state.dice, key);
    let mut turn_rolls = state.turn_rolls.clone();
    turn_rolls.push(dice.map(|d| d.value));
    GameState {
        dice,
        rolls_used: state.rolls_used + 1,
        turn_rolls,
        ..state.clone()
    }
}

/// Flip the held flag of one die. Out-of-range indices leave the state unchanged.
pub fn toggle_hold(state: &GameState, die_index: usize) -> GameState {
    if !can_toggle_hold(state, die_index) {
        return state.clone();
    }
    let mut dice = state.dice;
    dice[die_index].held = !dice[die_index].held;
    GameState {
        dice,
        ..state.clone()
    }
}

/// Toggle dice until exactly `mask` is held.
pub fn apply_hold_mask(state: &GameState, mask: HoldMask) -> GameState {
    (0..NUM_DICE).fold(state.clone(), |s, i| {
        if s.dice[i].held != mask.is_held(i) {
            toggle_hold(&s, i)
        } else {
            s
        }
    })
}

/// Commit the current dice to `category` and pass the turn.
///
/// Records the score and any Yahtzee bonus on the acting player's scorecard, appends to
/// the turn log, clears holds and the roll count, rotates to the next player (advancing
/// the round when play wraps to player 0) and sets `game_over` once every scorecard is
/// complete.
pub fn select_category(state: &GameState, category: Category) -> GameState {
    if !can_select_category(state, category) {
        return state.clone();
    }
    let faces = state.faces();
    let player = state.current_player;
    let card = state.current_scorecard();

    let score = score_in_context(category, &faces, card);
    let bonus = is_bonus_yahtzee(&faces, card);
    let mut next_card = card.with_score(category, score);
    if bonus {
        next_card = next_card.with_yahtzee_bonus_count(card.yahtzee_bonus_count() + 1);
    }

    let mut scorecards = state.scorecards.clone();
    scorecards[player] = Arc::new(next_card);

    let log = state.log.push(TurnRecord {
        round: state.current_round,
        player,
        rolls: state.turn_rolls.clone(),
        category,
        score,
        yahtzee_bonus: bonus,
    });

    let game_over = scorecards.iter().all(|s| s.is_complete());
    let next_player = (player + 1) % scorecards.len();
    let current_round = if next_player == 0 && !game_over {
        (state.current_round + 1).min(NUM_ROUNDS)
    } else {
        state.current_round
    };

    GameState {
        dice: state.dice.map(|mut d| {
            d.held = false;
            d
        }),
        rolls_used: 0,
        current_round,
        current_player: next_player,
        scorecards,
        game_over,
        turn_rolls: Vec::new(),
        log,
    }
}

/// Apply a strategy decision: set holds and roll, or score.
pub fn apply_action(state: &GameState, action: Action, chance: &mut ChanceMode) -> GameState {
    match action {
        Action::Reroll { hold } => {
            if !can_roll(state) {
                return state.clone();
            }
            roll(&apply_hold_mask(state, hold), chance)
        }
        Action::Score(category) => select_category(state, category),
    }
}
