//! Exact turn-local policy.
//!
//! Backward induction over the reroll tables, one turn at a time:
//! - `score_now[h]`: best legal immediate score for hand `h`
//! - `keep[r][k]`: expected value of keeping keeper `k`, rerolling the rest and playing
//!   on with `r - 1` rerolls, i.e. `E[V_{r-1}(hand')]`
//! - `V_r[h] = max(score_now[h], max_k keep[r][k])` over the keepers reachable from `h`
//!
//! Everything depends on the scorecard only through the open categories and whether the
//! Yahtzee box holds 50 (bonus and joker legality), so the tables are cached under that
//! key. The value of leaving a category open for later turns is not modelled.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use yh_core::{
    canonical_hold, scoring::YAHTZEE_SCORE, Action, Category, Faces, GameState, HoldMask,
    Scorecard, MAX_ROLLS,
};
use yh_tables::{tables, DiceTables, NUM_HANDS, NUM_KEEPERS};

use crate::{best_score, first_roll, score_best, Decision};

/// Cached turn tables before the cache is dropped and rebuilt.
const MAX_CACHED_TURNS: usize = 4096;

/// Values closer than this are ties.
const EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TurnKey {
    open: u16,
    yahtzee_is_fifty: bool,
}

impl TurnKey {
    fn of(card: &Scorecard) -> Self {
        Self {
            open: card.open().bits(),
            yahtzee_is_fifty: card.get(Category::Yahtzee) == Some(YAHTZEE_SCORE),
        }
    }
}

#[derive(Debug)]
struct TurnValues {
    score_now: Vec<f64>,
    // keep[r - 1] for r = 1, 2 rerolls left
    keep: [Vec<f64>; 2],
}

impl TurnValues {
    fn build(card: &Scorecard, t: &DiceTables) -> Self {
        let score_now: Vec<f64> = t.hands().iter().map(|h| best_score(h, card) as f64).collect();
        let keep1 = expectation(t, &score_now);
        let v1: Vec<f64> = (0..NUM_HANDS)
            .map(|h| {
                (0..32u8)
                    .map(|m| keep1[t.hand_keeper(h, m)])
                    .fold(score_now[h], f64::max)
            })
            .collect();
        let keep2 = expectation(t, &v1);
        Self {
            score_now,
            keep: [keep1, keep2],
        }
    }

    /// Best value from hand `h` with `rerolls` left.
    fn value(&self, t: &DiceTables, h: usize, rerolls: u8) -> f64 {
        if rerolls == 0 {
            return self.score_now[h];
        }
        let keep = &self.keep[(rerolls.min(2) - 1) as usize];
        (0..32u8)
            .map(|m| keep[t.hand_keeper(h, m)])
            .fold(self.score_now[h], f64::max)
    }
}

/// `out[k] = sum over outcomes of p * values[hand]` for every keeper.
fn expectation(t: &DiceTables, values: &[f64]) -> Vec<f64> {
    (0..NUM_KEEPERS)
        .map(|k| t.keeper_outcomes(k).iter().map(|&(h, p)| p * values[h]).sum())
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct OptimalStrategy {
    cache: FxHashMap<TurnKey, Arc<TurnValues>>,
}

impl OptimalStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&mut self, card: &Scorecard) -> Arc<TurnValues> {
        let key = TurnKey::of(card);
        if let Some(v) = self.cache.get(&key) {
            return Arc::clone(v);
        }
        if self.cache.len() >= MAX_CACHED_TURNS {
            self.cache.clear();
        }
        let v = Arc::new(TurnValues::build(card, tables()));
        self.cache.insert(key, Arc::clone(&v));
        v
    }

    /// Expected score of the rest of this turn from `faces` with `rerolls` left, playing
    /// optimally.
    pub fn position_value(&mut self, card: &Scorecard, faces: &Faces, rerolls: u8) -> f64 {
        let t = tables();
        self.values(card).value(t, t.hand_index(faces), rerolls)
    }

    /// Expected score of a whole turn before its first roll.
    pub fn turn_value(&mut self, card: &Scorecard) -> f64 {
        let t = tables();
        let v = self.values(card);
        t.distribution(&[1; 5], HoldMask::NONE)
            .iter()
            .map(|&(h, p)| p * v.value(t, h, MAX_ROLLS - 1))
            .sum()
    }

    pub fn cached_turns(&self) -> usize {
        self.cache.len()
    }

    pub fn decide(&mut self, state: &GameState) -> Decision {
        if state.rolls_used == 0 {
            return first_roll("optimal");
        }
        if state.rolls_used >= MAX_ROLLS {
            return score_best(state, "optimal, out of rolls");
        }
        let t = tables();
        let faces = state.faces();
        let values = self.values(state.current_scorecard());
        let keep = &values.keep[(MAX_ROLLS - state.rolls_used - 1) as usize];
        let now = values.score_now[t.hand_index(&faces)];

        let mut best = (HoldMask::NONE, f64::NEG_INFINITY);
        for mask in HoldMask::by_fewest_held() {
            if canonical_hold(&faces, mask) != mask {
                continue;
            }
            let v = if mask == HoldMask::ALL {
                now
            } else {
                keep[t.keeper_for(&faces, mask)]
            };
            if v > best.1 + EPS {
                best = (mask, v);
            }
        }

        let (mask, value) = best;
        if mask == HoldMask::ALL {
            return score_best(state, "optimal: no reroll beats scoring now");
        }
        Decision::new(
            Action::Reroll { hold: mask },
            format!(
                "optimal: keep {} dice, expected {:.2} vs {:.0} now",
                mask.held_count(),
                value,
                now
            ),
        )
    }
}
