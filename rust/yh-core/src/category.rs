//! Scoring categories in canonical order.
//!
//! The order (six upper single-value rows, then the seven lower rows) is part of the
//! renderer wire protocol: category cursors, potential-score hints and the scorecard
//! views all iterate [`Category::ALL`].

use std::fmt;

use serde::{Deserialize, Serialize};

pub const NUM_CATS: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Ones")]
    Ones,
    #[serde(rename = "Twos")]
    Twos,
    #[serde(rename = "Threes")]
    Threes,
    #[serde(rename = "Fours")]
    Fours,
    #[serde(rename = "Fives")]
    Fives,
    #[serde(rename = "Sixes")]
    Sixes,
    #[serde(rename = "3 of a Kind")]
    ThreeOfAKind,
    #[serde(rename = "4 of a Kind")]
    FourOfAKind,
    #[serde(rename = "Full House")]
    FullHouse,
    #[serde(rename = "Small Straight")]
    SmallStraight,
    #[serde(rename = "Large Straight")]
    LargeStraight,
    #[serde(rename = "Yahtzee")]
    Yahtzee,
    #[serde(rename = "Chance")]
    Chance,
}

/// Wire names in index order (0..13).
pub const CAT_NAMES: [&str; NUM_CATS] = [
    "Ones",
    "Twos",
    "Threes",
    "Fours",
    "Fives",
    "Sixes",
    "3 of a Kind",
    "4 of a Kind",
    "Full House",
    "Small Straight",
    "Large Straight",
    "Yahtzee",
    "Chance",
];

impl Category {
    pub const ALL: [Category; NUM_CATS] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    pub const UPPER: [Category; 6] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    pub const LOWER: [Category; 7] = [
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Category> {
        Self::ALL.get(idx).copied()
    }

    pub fn name(self) -> &'static str {
        CAT_NAMES[self.index()]
    }

    /// Look up a category by its exact wire name.
    pub fn from_name(name: &str) -> Option<Category> {
        CAT_NAMES
            .iter()
            .position(|&n| n == name)
            .and_then(Self::from_index)
    }

    #[inline]
    pub fn is_upper(self) -> bool {
        self.index() < 6
    }

    /// Face value counted by an upper category (Ones=1 .. Sixes=6).
    pub fn upper_face(self) -> Option<u8> {
        if self.is_upper() {
            Some(self.index() as u8 + 1)
        } else {
            None
        }
    }

    /// The upper category that counts `face`.
    ///
    /// # Panics
    /// Panics if `face` is not in 1..=6.
    pub fn upper_for_face(face: u8) -> Category {
        assert!((1..=6).contains(&face), "face out of range: {}", face);
        Self::UPPER[(face - 1) as usize]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
