//! Dice sources for roll transitions.
//!
//! Two modes:
//! - `Rng`: a seeded ChaCha8 stream, the normal mode for play.
//! - `EventKeyed`: dice are a pure function of (seed, player, round, roll number), so two
//!   strategies replaying the same seed see the same dice whenever they reroll the same
//!   number of dice. Used for paired benchmark comparisons.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use crate::state::Die;

/// Structural event key for deterministic dice generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventKey {
    pub seed: u64,
    pub player: u8,
    pub round: u8,
    /// 1..=3, the roll being made.
    pub roll: u8,
}

/// SplitMix64 step.
fn splitmix64_next(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

fn mix_seed(key: EventKey) -> u64 {
    let mut x = key.seed;
    x ^= (key.player as u64).wrapping_mul(0xD6E8FEB86659FD93);
    x ^= (key.round as u64).wrapping_mul(0xA5A35625E4F7C1AD);
    x ^= (key.roll as u64).wrapping_mul(0x9E3779B97F4A7C15);
    let mut s = x;
    splitmix64_next(&mut s)
}

/// Deterministically generate 5 faces for the given event key.
pub fn roll5(key: EventKey) -> [u8; 5] {
    let mut state = mix_seed(key);
    let mut out = [0u8; 5];
    for o in &mut out {
        let r = splitmix64_next(&mut state);
        *o = ((r % 6) + 1) as u8;
    }
    out
}

#[derive(Debug, Clone)]
pub enum ChanceMode {
    Rng { rng: Box<ChaCha8Rng> },
    EventKeyed { seed: u64 },
}

impl ChanceMode {
    pub fn rng(seed: u64) -> Self {
        ChanceMode::Rng {
            rng: Box::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn event_keyed(seed: u64) -> Self {
        ChanceMode::EventKeyed { seed }
    }

    /// New faces for every unheld die; held dice are returned untouched.
    ///
    /// In event-keyed mode the `k` unheld dice take the first `k` values of the event's
    /// stream, in position order.
    pub fn reroll(&mut self, dice: [Die; 5], key: EventKey) -> [Die; 5] {
        let mut next = dice;
        match self {
            ChanceMode::Rng { rng } => {
                for die in next.iter_mut().filter(|d| !d.held) {
                    die.value = rng.gen_range(1..=6);
                }
            }
            ChanceMode::EventKeyed { seed } => {
                let draws = roll5(EventKey { seed: *seed, ..key });
                for (die, &face) in next.iter_mut().filter(|d| !d.held).zip(draws.iter()) {
                    die.value = face;
                }
            }
        }
        next
    }
}
