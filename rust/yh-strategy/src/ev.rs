//! Monte Carlo expected-value policy.
//!
//! For every distinct hold mask, samples `simulations` rerolls of the unheld dice and
//! averages the best immediate score each sample would allow. Keeping everything stands
//! for scoring now and is valued at the current best score. Looks one reroll ahead.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use yh_core::{canonical_hold, Action, Faces, GameState, HoldMask, Scorecard, MAX_ROLLS};

use crate::{best_score, first_roll, score_best, Decision};

#[derive(Debug, Clone)]
pub struct ExpectedValueStrategy {
    rng: ChaCha8Rng,
    simulations: u32,
}

impl ExpectedValueStrategy {
    pub fn new(seed: u64, simulations: u32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            simulations: simulations.max(1),
        }
    }

    pub fn simulations(&self) -> u32 {
        self.simulations
    }

    pub fn decide(&mut self, state: &GameState) -> Decision {
        if state.rolls_used == 0 {
            return first_roll("ev");
        }
        if state.rolls_used >= MAX_ROLLS {
            return score_best(state, "ev, out of rolls");
        }
        let faces = state.faces();
        let card = state.current_scorecard();

        let mut best = (HoldMask::NONE, f64::NEG_INFINITY);
        for mask in HoldMask::by_fewest_held() {
            // Equivalent masks sort after their canonical form.
            if canonical_hold(&faces, mask) != mask {
                continue;
            }
            let value = if mask == HoldMask::ALL {
                best_score(&faces, card) as f64
            } else {
                self.sample_mean(&faces, mask, card)
            };
            if value > best.1 {
                best = (mask, value);
            }
        }

        let (mask, value) = best;
        if mask == HoldMask::ALL {
            return score_best(state, "ev: scoring now beats every reroll");
        }
        Decision::new(
            Action::Reroll { hold: mask },
            format!("ev: keep {} dice, expecting {:.1}", mask.held_count(), value),
        )
    }

    fn sample_mean(&mut self, faces: &Faces, hold: HoldMask, card: &Scorecard) -> f64 {
        let mut total = 0u64;
        for _ in 0..self.simulations {
            let mut sim = *faces;
            for (i, f) in sim.iter_mut().enumerate() {
                if !hold.is_held(i) {
                    *f = self.rng.gen_range(1..=6);
                }
            }
            total += best_score(&sim, card) as u64;
        }
        total as f64 / self.simulations as f64
    }
}
