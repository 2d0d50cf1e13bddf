//! Reroll probability tables.
//!
//! ## Indexing
//! - **Hand**: a 5-dice multiset, stored sorted ascending. 252 hands, indices `0..252`.
//! - **Keeper**: a 0..=5 dice multiset (the dice kept before a reroll). 462 keepers,
//!   indices `0..462`; index 0 is the empty keeper.
//! - **Sorted mask**: `hand_keeper(h, m)` takes a mask over the *sorted* hand, bit `i`
//!   keeping `hand(h)[i]`. Position masks over unsorted dice go through
//!   [`DiceTables::keeper_for`].
//!
//! Several masks of one hand often keep the same multiset; they share one keeper and
//! therefore one outcome distribution.

use rustc_hash::FxHashMap;

use yh_core::{face_counts, Faces, HoldMask};

pub const NUM_HANDS: usize = 252;
pub const NUM_KEEPERS: usize = 462;

/// `counts[f-1]` = number of kept dice showing face `f`.
pub type Counts = [u8; 6];

/// One collapsed outcome of rerolling `k` dice: the multiset rolled and its probability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RerollOutcome {
    pub counts: Counts,
    pub probability: f64,
}

/// A kept multiset of 0..=5 dice.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Keeper {
    pub counts: Counts,
    pub total: u8,
}

impl Keeper {
    fn new(counts: Counts) -> Self {
        let total = counts.iter().sum();
        Keeper { counts, total }
    }

    fn add(&self, face: u8) -> Keeper {
        let mut counts = self.counts;
        counts[(face - 1) as usize] += 1;
        Keeper {
            counts,
            total: self.total + 1,
        }
    }
}

fn counts_to_faces(counts: &Counts) -> Faces {
    let mut out = [0u8; 5];
    let mut i = 0;
    for (f, &c) in counts.iter().enumerate() {
        for _ in 0..c {
            out[i] = f as u8 + 1;
            i += 1;
        }
    }
    out
}

fn factorial(n: u8) -> f64 {
    (1..=n as u64).product::<u64>() as f64
}

/// Probability of rolling exactly `counts` with `sum(counts)` fair dice.
fn multinomial_probability(counts: &Counts) -> f64 {
    let k: u8 = counts.iter().sum();
    let ways = factorial(k) / counts.iter().map(|&c| factorial(c)).product::<f64>();
    ways / 6f64.powi(k as i32)
}

/// Every multiset of exactly `k` dice, faces ascending in lexicographic order.
fn multisets(k: u8) -> Vec<Counts> {
    fn rec(face: usize, left: u8, cur: &mut Counts, out: &mut Vec<Counts>) {
        if face == 5 {
            cur[5] = left;
            out.push(*cur);
            return;
        }
        for c in (0..=left).rev() {
            cur[face] = c;
            rec(face + 1, left - c, cur, out);
        }
        cur[face] = 0;
    }
    let mut out = Vec::new();
    rec(0, k, &mut [0u8; 6], &mut out);
    out
}

/// Immutable reroll tables. Build once via [`crate::tables`].
pub struct DiceTables {
    hands: Vec<Faces>,
    hand_to_idx: FxHashMap<Faces, usize>,

    keepers: Vec<Keeper>,
    keeper_to_idx: FxHashMap<Counts, usize>,

    // hand_keeper_map[hand][sorted mask] = keeper index
    hand_keeper_map: Vec<[usize; 32]>,

    // keeper_add[keeper][face-1] = keeper index after adding that face (unused at total 5)
    keeper_add: Vec<[usize; 6]>,

    // reroll_outcomes[k]: all multisets of k dice with probabilities
    reroll_outcomes: Vec<Vec<RerollOutcome>>,

    // keeper_outcomes[keeper]: distribution over final hands after rerolling the rest
    keeper_outcomes: Vec<Vec<(usize, f64)>>,
}

impl DiceTables {
    pub fn new() -> Self {
        let mut hands = Vec::with_capacity(NUM_HANDS);
        let mut hand_to_idx = FxHashMap::default();
        for a in 1u8..=6 {
            for b in a..=6 {
                for c in b..=6 {
                    for d in c..=6 {
                        for e in d..=6 {
                            let h = [a, b, c, d, e];
                            hand_to_idx.insert(h, hands.len());
                            hands.push(h);
                        }
                    }
                }
            }
        }
        assert_eq!(hands.len(), NUM_HANDS);

        let mut keepers = Vec::with_capacity(NUM_KEEPERS);
        let mut keeper_to_idx = FxHashMap::default();
        for total in 0..=5u8 {
            for counts in multisets(total) {
                keeper_to_idx.insert(counts, keepers.len());
                keepers.push(Keeper::new(counts));
            }
        }
        assert_eq!(keepers.len(), NUM_KEEPERS);

        let mut hand_keeper_map = vec![[0usize; 32]; NUM_HANDS];
        for (h, hand) in hands.iter().enumerate() {
            for mask in 0u8..32 {
                let mut counts = [0u8; 6];
                for (i, &face) in hand.iter().enumerate() {
                    if mask & (1 << i) != 0 {
                        counts[(face - 1) as usize] += 1;
                    }
                }
                hand_keeper_map[h][mask as usize] = keeper_to_idx[&counts];
            }
        }

        let mut keeper_add = vec![[0usize; 6]; NUM_KEEPERS];
        for (kid, keeper) in keepers.iter().enumerate() {
            if keeper.total < 5 {
                for face in 1u8..=6 {
                    keeper_add[kid][(face - 1) as usize] = keeper_to_idx[&keeper.add(face).counts];
                }
            }
        }

        let reroll_outcomes: Vec<Vec<RerollOutcome>> = (0..=5u8)
            .map(|k| {
                multisets(k)
                    .into_iter()
                    .map(|counts| RerollOutcome {
                        counts,
                        probability: multinomial_probability(&counts),
                    })
                    .collect()
            })
            .collect();

        let keeper_outcomes = keepers
            .iter()
            .map(|keeper| {
                let k = (5 - keeper.total) as usize;
                reroll_outcomes[k]
                    .iter()
                    .map(|o| {
                        let mut counts = keeper.counts;
                        for (c, add) in counts.iter_mut().zip(o.counts) {
                            *c += add;
                        }
                        (hand_to_idx[&counts_to_faces(&counts)], o.probability)
                    })
                    .collect()
            })
            .collect();

        DiceTables {
            hands,
            hand_to_idx,
            keepers,
            keeper_to_idx,
            hand_keeper_map,
            keeper_add,
            reroll_outcomes,
            keeper_outcomes,
        }
    }

    /// Sorted faces of hand `idx`.
    #[inline]
    pub fn hand(&self, idx: usize) -> &Faces {
        &self.hands[idx]
    }

    pub fn hands(&self) -> &[Faces] {
        &self.hands
    }

    /// Index of the hand holding `faces` in any order.
    ///
    /// # Panics
    /// If a face is outside 1..=6.
    pub fn hand_index(&self, faces: &Faces) -> usize {
        let mut sorted = *faces;
        sorted.sort_unstable();
        self.hand_to_idx[&sorted]
    }

    pub fn keeper(&self, idx: usize) -> &Keeper {
        &self.keepers[idx]
    }

    pub fn keeper_index(&self, counts: &Counts) -> Option<usize> {
        self.keeper_to_idx.get(counts).copied()
    }

    /// Keeper for a position mask over unsorted `faces`.
    pub fn keeper_for(&self, faces: &Faces, mask: HoldMask) -> usize {
        let mut counts = [0u8; 6];
        for i in mask.indices() {
            counts[(faces[i] - 1) as usize] += 1;
        }
        self.keeper_to_idx[&counts]
    }

    /// Keeper for a mask over the sorted hand.
    #[inline]
    pub fn hand_keeper(&self, hand: usize, sorted_mask: u8) -> usize {
        self.hand_keeper_map[hand][(sorted_mask & 31) as usize]
    }

    /// Keeper reached by adding one die showing `face` (1..=6) to keeper `idx`.
    pub fn keeper_add(&self, idx: usize, face: u8) -> Option<usize> {
        (self.keepers[idx].total < 5).then(|| self.keeper_add[idx][(face - 1) as usize])
    }

    /// All outcome multisets of rerolling `k` dice (0..=5), probabilities summing to 1.
    pub fn reroll_outcomes(&self, k: usize) -> &[RerollOutcome] {
        &self.reroll_outcomes[k]
    }

    /// Distribution over final hands after keeping keeper `idx` and rerolling the rest.
    pub fn keeper_outcomes(&self, idx: usize) -> &[(usize, f64)] {
        &self.keeper_outcomes[idx]
    }

    /// Distribution over final hands after holding `mask` of `faces` and rerolling the
    /// other dice. Entries are `(hand index, probability)`.
    pub fn distribution(&self, faces: &Faces, mask: HoldMask) -> &[(usize, f64)] {
        self.keeper_outcomes(self.keeper_for(faces, mask))
    }

    /// Face counts of hand `idx`.
    pub fn hand_counts(&self, idx: usize) -> Counts {
        face_counts(&self.hands[idx])
    }
}

impl Default for DiceTables {
    fn default() -> Self {
        Self::new()
    }
}
