//! Scoring rules.
//!
//! Every rule takes the same concrete input, an ordered sequence of five die faces.
//! Raw scores ignore the scorecard; the `*_in_context` helpers add the joker rule and
//! category availability on top.

use crate::category::{Category, NUM_CATS};
use crate::legal::is_category_legal;
use crate::scorecard::Scorecard;

/// Five die faces, each in 1..=6. Order does not matter to any scoring rule.
pub type Faces = [u8; 5];

pub const FULL_HOUSE_SCORE: u16 = 25;
pub const SMALL_STRAIGHT_SCORE: u16 = 30;
pub const LARGE_STRAIGHT_SCORE: u16 = 40;
pub const YAHTZEE_SCORE: u16 = 50;

const SMALL_RUNS: [[u8; 4]; 3] = [[1, 2, 3, 4], [2, 3, 4, 5], [3, 4, 5, 6]];
const LARGE_RUNS: [[u8; 5]; 2] = [[1, 2, 3, 4, 5], [2, 3, 4, 5, 6]];

/// `counts[f-1]` = number of dice showing face `f`.
pub fn face_counts(dice: &Faces) -> [u8; 6] {
    let mut counts = [0u8; 6];
    for &d in dice {
        debug_assert!((1..=6).contains(&d), "die face out of range: {}", d);
        counts[(d - 1) as usize] += 1;
    }
    counts
}

pub fn dice_sum(dice: &Faces) -> u16 {
    dice.iter().map(|&d| d as u16).sum()
}

pub fn has_n_of_kind(counts: &[u8; 6], n: u8) -> bool {
    counts.iter().any(|&c| c >= n)
}

pub fn has_full_house(counts: &[u8; 6]) -> bool {
    counts.iter().any(|&c| c == 3) && counts.iter().any(|&c| c == 2)
}

pub fn has_small_straight(counts: &[u8; 6]) -> bool {
    SMALL_RUNS
        .iter()
        .any(|run| run.iter().all(|&f| counts[(f - 1) as usize] > 0))
}

pub fn has_large_straight(counts: &[u8; 6]) -> bool {
    LARGE_RUNS
        .iter()
        .any(|run| run.iter().all(|&f| counts[(f - 1) as usize] == 1))
}

pub fn is_yahtzee(dice: &Faces) -> bool {
    dice.iter().all(|&d| d == dice[0])
}

/// Raw score for `category` with `dice`. Total and side-effect free.
pub fn score(category: Category, dice: &Faces) -> u16 {
    let counts = face_counts(dice);
    score_counts(category, &counts, dice_sum(dice))
}

fn score_counts(category: Category, counts: &[u8; 6], total: u16) -> u16 {
    match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => {
            let face = category.index();
            counts[face] as u16 * (face as u16 + 1)
        }
        Category::ThreeOfAKind => {
            if has_n_of_kind(counts, 3) {
                total
            } else {
                0
            }
        }
        Category::FourOfAKind => {
            if has_n_of_kind(counts, 4) {
                total
            } else {
                0
            }
        }
        Category::FullHouse => {
            if has_full_house(counts) {
                FULL_HOUSE_SCORE
            } else {
                0
            }
        }
        Category::SmallStraight => {
            if has_small_straight(counts) {
                SMALL_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::LargeStraight => {
            if has_large_straight(counts) {
                LARGE_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::Yahtzee => {
            if has_n_of_kind(counts, 5) {
                YAHTZEE_SCORE
            } else {
                0
            }
        }
        Category::Chance => total,
    }
}

/// Raw scores for every category, in canonical order.
pub fn scores_for_dice(dice: &Faces) -> [u16; NUM_CATS] {
    let counts = face_counts(dice);
    let total = dice_sum(dice);
    let mut out = [0u16; NUM_CATS];
    for cat in Category::ALL {
        out[cat.index()] = score_counts(cat, &counts, total);
    }
    out
}

/// A Yahtzee roll while the Yahtzee box already holds 50. Earns the +100 bonus
/// whichever category it is scored in.
pub fn is_bonus_yahtzee(dice: &Faces, scorecard: &Scorecard) -> bool {
    is_yahtzee(dice) && scorecard.get(Category::Yahtzee) == Some(YAHTZEE_SCORE)
}

/// Joker rule in force: bonus Yahtzee and its matching upper category already filled.
pub fn joker_active(dice: &Faces, scorecard: &Scorecard) -> bool {
    is_bonus_yahtzee(dice, scorecard) && scorecard.is_filled(Category::upper_for_face(dice[0]))
}

/// Score `category` would award for `dice` against `scorecard`, applying joker values.
///
/// Does not check whether the category is open; see [`potential_score`].
pub fn score_in_context(category: Category, dice: &Faces, scorecard: &Scorecard) -> u16 {
    if !joker_active(dice, scorecard) {
        return score(category, dice);
    }
    match category {
        Category::FullHouse => FULL_HOUSE_SCORE,
        Category::SmallStraight => SMALL_STRAIGHT_SCORE,
        Category::LargeStraight => LARGE_STRAIGHT_SCORE,
        _ => score(category, dice),
    }
}

/// What committing `category` would award right now, without committing it.
///
/// Zero for filled categories and for categories the joker rule currently forbids.
pub fn potential_score(category: Category, dice: &Faces, scorecard: &Scorecard) -> u16 {
    if !is_category_legal(category, dice, scorecard) {
        return 0;
    }
    score_in_context(category, dice, scorecard)
}

/// Whether `score` is a value `category` can ever award (joker values included).
pub fn is_valid_score(category: Category, score: u16) -> bool {
    match category.upper_face() {
        Some(face) => {
            let face = face as u16;
            score % face == 0 && score <= 5 * face
        }
        None => match category {
            Category::ThreeOfAKind | Category::FourOfAKind | Category::Chance => {
                score == 0 || (5..=30).contains(&score)
            }
            Category::FullHouse => score == 0 || score == FULL_HOUSE_SCORE,
            Category::SmallStraight => score == 0 || score == SMALL_STRAIGHT_SCORE,
            Category::LargeStraight => score == 0 || score == LARGE_STRAIGHT_SCORE,
            Category::Yahtzee => score == 0 || score == YAHTZEE_SCORE,
            _ => false,
        },
    }
}
