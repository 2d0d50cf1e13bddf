//! Category availability and joker-rule legality.

use crate::category::{Category, NUM_CATS};
use crate::scorecard::Scorecard;
use crate::scoring::{is_bonus_yahtzee, Faces};

/// Bitset over categories; bit `i` is `Category::ALL[i]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CategorySet(u16);

impl CategorySet {
    pub const EMPTY: CategorySet = CategorySet(0);
    pub const FULL: CategorySet = CategorySet((1u16 << NUM_CATS) - 1);

    pub fn from_bits(bits: u16) -> CategorySet {
        CategorySet(bits & Self::FULL.0)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn contains(self, cat: Category) -> bool {
        (self.0 >> cat.index()) & 1 != 0
    }

    pub fn with(self, cat: Category) -> CategorySet {
        CategorySet(self.0 | (1 << cat.index()))
    }

    pub fn without(self, cat: Category) -> CategorySet {
        CategorySet(self.0 & !(1 << cat.index()))
    }

    pub fn complement(self) -> CategorySet {
        CategorySet(!self.0 & Self::FULL.0)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in canonical order.
    pub fn iter(self) -> impl Iterator<Item = Category> {
        Category::ALL.into_iter().filter(move |c| self.contains(*c))
    }

    pub fn first(self) -> Option<Category> {
        self.iter().next()
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        iter.into_iter().fold(CategorySet::EMPTY, CategorySet::with)
    }
}

/// Whether `cat` may be scored with `dice` on `scorecard`.
///
/// Rules:
/// - a filled category is never legal
/// - a bonus Yahtzee whose matching upper category is still open must go there
/// - otherwise any open category is legal (lower ones at joker value when the joker
///   rule is in force)
pub fn is_category_legal(cat: Category, dice: &Faces, scorecard: &Scorecard) -> bool {
    if scorecard.is_filled(cat) {
        return false;
    }
    if is_bonus_yahtzee(dice, scorecard) {
        let upper = Category::upper_for_face(dice[0]);
        if !scorecard.is_filled(upper) {
            return cat == upper;
        }
    }
    true
}

/// All categories currently legal for `dice`.
pub fn legal_categories(dice: &Faces, scorecard: &Scorecard) -> CategorySet {
    scorecard
        .open()
        .iter()
        .filter(|c| is_category_legal(*c, dice, scorecard))
        .collect()
}
