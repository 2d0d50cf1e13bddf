//! Per-player scorecard.

use crate::category::{Category, NUM_CATS};
use crate::legal::CategorySet;
use crate::scoring::{is_valid_score, YAHTZEE_SCORE};
use crate::state::InvariantError;

pub const UPPER_BONUS_THRESHOLD: u16 = 63;
pub const UPPER_BONUS: u16 = 35;
pub const YAHTZEE_BONUS: u16 = 100;

/// Assigned scores keyed by category plus the count of bonus Yahtzees.
///
/// A category, once filled, is never overwritten: [`Scorecard::with_score`] on a filled
/// category returns an unchanged copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Scorecard {
    scores: [Option<u16>; NUM_CATS],
    yahtzee_bonus_count: u8,
}

impl Scorecard {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, cat: Category) -> Option<u16> {
        self.scores[cat.index()]
    }

    #[inline]
    pub fn is_filled(&self, cat: Category) -> bool {
        self.scores[cat.index()].is_some()
    }

    pub fn filled(&self) -> CategorySet {
        Category::ALL
            .iter()
            .filter(|c| self.is_filled(**c))
            .copied()
            .collect()
    }

    pub fn open(&self) -> CategorySet {
        self.filled().complement()
    }

    pub fn filled_count(&self) -> usize {
        self.scores.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.filled_count() == NUM_CATS
    }

    pub fn yahtzee_bonus_count(&self) -> u8 {
        self.yahtzee_bonus_count
    }

    /// Copy with `cat` set to `score`, unless `cat` is already filled.
    pub fn with_score(&self, cat: Category, score: u16) -> Scorecard {
        let mut next = self.clone();
        if !next.is_filled(cat) {
            next.scores[cat.index()] = Some(score);
        }
        next
    }

    pub fn with_yahtzee_bonus_count(&self, count: u8) -> Scorecard {
        Scorecard {
            yahtzee_bonus_count: count,
            ..self.clone()
        }
    }

    pub fn upper_subtotal(&self) -> u16 {
        Category::UPPER.iter().filter_map(|c| self.get(*c)).sum()
    }

    pub fn upper_bonus(&self) -> u16 {
        if self.upper_subtotal() >= UPPER_BONUS_THRESHOLD {
            UPPER_BONUS
        } else {
            0
        }
    }

    pub fn lower_subtotal(&self) -> u16 {
        Category::LOWER.iter().filter_map(|c| self.get(*c)).sum()
    }

    pub fn yahtzee_bonus(&self) -> u16 {
        self.yahtzee_bonus_count as u16 * YAHTZEE_BONUS
    }

    pub fn grand_total(&self) -> u32 {
        self.upper_subtotal() as u32
            + self.upper_bonus() as u32
            + self.lower_subtotal() as u32
            + self.yahtzee_bonus() as u32
    }

    /// Check every filled row against the values its category can award.
    pub fn validate(&self, player: usize) -> Result<(), InvariantError> {
        for cat in Category::ALL {
            if let Some(score) = self.get(cat) {
                if !is_valid_score(cat, score) {
                    return Err(InvariantError::ScoreOutOfRange {
                        player,
                        category: cat,
                        score,
                    });
                }
            }
        }
        let count = self.yahtzee_bonus_count;
        if count > 0
            && (self.get(Category::Yahtzee) != Some(YAHTZEE_SCORE) || count as usize >= NUM_CATS)
        {
            return Err(InvariantError::YahtzeeBonus { player, count });
        }
        Ok(())
    }
}
