//! Decision vocabulary shared by strategies and the coordinator.

use crate::category::Category;
use crate::scoring::Faces;

/// Subset of the five dice positions kept before a reroll. Bit `i` set = die `i` held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HoldMask(u8);

impl HoldMask {
    pub const NONE: HoldMask = HoldMask(0);
    pub const ALL: HoldMask = HoldMask(0b1_1111);

    /// Bits above the fifth are dropped.
    pub const fn new(bits: u8) -> HoldMask {
        HoldMask(bits & 0b1_1111)
    }

    pub fn from_indices<I: IntoIterator<Item = usize>>(indices: I) -> HoldMask {
        let bits = indices
            .into_iter()
            .filter(|&i| i < 5)
            .fold(0u8, |acc, i| acc | (1 << i));
        HoldMask(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_held(self, idx: usize) -> bool {
        idx < 5 && (self.0 >> idx) & 1 != 0
    }

    pub fn held_count(self) -> u32 {
        self.0.count_ones()
    }

    pub fn indices(self) -> impl Iterator<Item = usize> {
        (0..5).filter(move |&i| self.is_held(i))
    }

    /// All 32 masks.
    pub fn all() -> impl Iterator<Item = HoldMask> {
        (0u8..32).map(HoldMask)
    }

    /// All 32 masks ordered by number of held dice, then by bit pattern. Scanning in this
    /// order with a strict improvement test breaks ties toward rerolling more dice.
    pub fn by_fewest_held() -> [HoldMask; 32] {
        let mut out = [HoldMask::NONE; 32];
        for (slot, m) in out.iter_mut().zip(0u8..32) {
            *slot = HoldMask(m);
        }
        out.sort_by_key(|m| (m.held_count(), m.0));
        out
    }
}

/// Canonicalize a hold mask for the given faces.
///
/// Masks that keep the same multiset of faces lead to identical reroll outcomes. This maps
/// any mask to one representative by keeping the lowest-indexed occurrences of each
/// kept face.
pub fn canonical_hold(faces: &Faces, mask: HoldMask) -> HoldMask {
    let mut need = [0u8; 6];
    for i in mask.indices() {
        need[(faces[i] - 1) as usize] += 1;
    }
    let mut out = 0u8;
    for (i, &face) in faces.iter().enumerate() {
        let slot = (face - 1) as usize;
        if need[slot] > 0 {
            need[slot] -= 1;
            out |= 1 << i;
        }
    }
    HoldMask(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Hold exactly these dice (releasing the others) and roll again.
    Reroll { hold: HoldMask },
    /// Commit the current dice to a category.
    Score(Category),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_drops_high_bits() {
        assert_eq!(HoldMask::new(0xFF), HoldMask::ALL);
        assert_eq!(HoldMask::ALL.held_count(), 5);
    }

    #[test]
    fn from_indices_ignores_out_of_range() {
        let m = HoldMask::from_indices([0, 2, 7]);
        assert_eq!(m.bits(), 0b101);
        assert_eq!(m.indices().collect::<Vec<_>>(), vec![0, 2]);
        assert!(!m.is_held(5));
    }

    #[test]
    fn fewest_held_order_starts_empty_ends_full() {
        let order = HoldMask::by_fewest_held();
        assert_eq!(order[0], HoldMask::NONE);
        assert_eq!(order[31], HoldMask::ALL);
        assert!(order.windows(2).all(|w| w[0].held_count() <= w[1].held_count()));
        let mut bits: Vec<u8> = order.iter().map(|m| m.bits()).collect();
        bits.sort_unstable();
        assert_eq!(bits, (0u8..32).collect::<Vec<_>>());
    }

    #[test]
    fn canonical_hold_merges_duplicate_faces() {
        let faces = [3, 1, 3, 5, 3];
        // Keep "one 3": positions 0, 2 or 4 are equivalent.
        let a = canonical_hold(&faces, HoldMask::from_indices([0]));
        let b = canonical_hold(&faces, HoldMask::from_indices([2]));
        let c = canonical_hold(&faces, HoldMask::from_indices([4]));
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a, HoldMask::from_indices([0]));
        // Distinct faces keep their own positions.
        let d = canonical_hold(&faces, HoldMask::from_indices([1, 3]));
        assert_eq!(d, HoldMask::from_indices([1, 3]));
    }
}
