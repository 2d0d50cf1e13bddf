//! Baseline policy: random holds, random category.

use rand::seq::IteratorRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use yh_core::{legal_categories, Action, Category, GameState, HoldMask, MAX_ROLLS};

use crate::{first_roll, Decision};

#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: ChaCha8Rng,
    roll_again_probability: f64,
}

impl RandomStrategy {
    pub fn new(seed: u64, roll_again_probability: f64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            roll_again_probability: roll_again_probability.clamp(0.0, 1.0),
        }
    }

    /// While rolls remain, reroll with a uniformly random hold mask with the configured
    /// probability; otherwise score a uniformly random legal category.
    pub fn decide(&mut self, state: &GameState) -> Decision {
        if state.rolls_used == 0 {
            return first_roll("random");
        }
        if state.rolls_used < MAX_ROLLS && self.rng.gen_bool(self.roll_again_probability) {
            let hold = HoldMask::new(self.rng.gen_range(0..32));
            return Decision::new(
                Action::Reroll { hold },
                format!("random: keep {} dice", hold.held_count()),
            );
        }
        let cat = legal_categories(&state.faces(), state.current_scorecard())
            .iter()
            .choose(&mut self.rng)
            .unwrap_or(Category::Chance);
        Decision::new(Action::Score(cat), format!("random: {cat}"))
    }
}
