//! Rule-of-thumb policy: take a score once it is good enough, otherwise chase a straight
//! or the most common face.
//!
//! A hand is good enough when a legal category reaches its own bar: the fixed value for
//! Yahtzee, the straights and Full House, three of the face for an upper box, 20 for the
//! n-of-a-kind boxes and the stop threshold for Chance. Checked in that order.
//!
//! Out of rolls, the highest score wins, with a small bonus for upper boxes on pace for
//! the upper bonus. A hand that scores nothing anywhere is dumped in the box that hurts
//! least.

use yh_core::scoring::face_counts;
use yh_core::{
    legal_categories, potential_score, Action, Category, CategorySet, Faces, GameState,
    HoldMask, Scorecard, MAX_ROLLS,
};

use crate::{first_roll, Decision};

const RUNS: [[u8; 4]; 3] = [[1, 2, 3, 4], [2, 3, 4, 5], [3, 4, 5, 6]];

/// Bar for Three and Four of a Kind.
const KIND_BAR: u16 = 20;

/// Extra weight for an upper box scoring at least three of its face.
const UPPER_PACE_WEIGHT: u16 = 5;

const GOOD_ENOUGH_ORDER: [Category; 13] = [
    Category::Yahtzee,
    Category::LargeStraight,
    Category::SmallStraight,
    Category::FullHouse,
    Category::Ones,
    Category::Twos,
    Category::Threes,
    Category::Fours,
    Category::Fives,
    Category::Sixes,
    Category::FourOfAKind,
    Category::ThreeOfAKind,
    Category::Chance,
];

/// Where a zero goes, cheapest first.
const WASTE_ORDER: [Category; 13] = [
    Category::Yahtzee,
    Category::LargeStraight,
    Category::FullHouse,
    Category::SmallStraight,
    Category::Ones,
    Category::Twos,
    Category::Threes,
    Category::FourOfAKind,
    Category::ThreeOfAKind,
    Category::Fours,
    Category::Fives,
    Category::Sixes,
    Category::Chance,
];

#[derive(Debug, Clone)]
pub struct GreedyStrategy {
    stop_threshold: u16,
}

impl GreedyStrategy {
    /// `stop_threshold` is the Chance total worth taking before the last roll.
    pub fn new(stop_threshold: u16) -> Self {
        Self { stop_threshold }
    }

    pub fn decide(&mut self, state: &GameState) -> Decision {
        if state.rolls_used == 0 {
            return first_roll("greedy");
        }
        let faces = state.faces();
        let card = state.current_scorecard();
        if state.rolls_used >= MAX_ROLLS {
            let (cat, s) = choose_score(&faces, card).unwrap_or((Category::Chance, 0));
            return Decision::new(
                Action::Score(cat),
                format!("greedy, out of rolls: {cat} for {s}"),
            );
        }
        if let Some((cat, s)) = self.good_enough(&faces, card) {
            return Decision::new(
                Action::Score(cat),
                format!("greedy: {cat} for {s} is good enough"),
            );
        }
        match keep_partial_straight(&faces) {
            Some(hold) => Decision::new(Action::Reroll { hold }, "greedy: chasing a straight"),
            None => {
                let face = most_common_face(&faces);
                let hold = keep_face(&faces, face);
                Decision::new(Action::Reroll { hold }, format!("greedy: keeping the {face}s"))
            }
        }
    }

    /// Lowest score at which `cat` is taken before the last roll.
    fn bar(&self, cat: Category) -> u16 {
        match cat {
            Category::Yahtzee => 50,
            Category::LargeStraight => 40,
            Category::SmallStraight => 30,
            Category::FullHouse => 25,
            Category::ThreeOfAKind | Category::FourOfAKind => KIND_BAR,
            Category::Chance => self.stop_threshold,
            c => 3 * u16::from(c.upper_face().unwrap_or(0)),
        }
    }

    fn good_enough(&self, faces: &Faces, card: &Scorecard) -> Option<(Category, u16)> {
        let legal = legal_categories(faces, card);
        GOOD_ENOUGH_ORDER
            .iter()
            .filter(|&&cat| legal.contains(cat))
            .map(|&cat| (cat, potential_score(cat, faces, card)))
            .find(|&(cat, s)| s > 0 && s >= self.bar(cat))
    }
}

fn on_upper_pace(cat: Category, score: u16) -> bool {
    cat.upper_face().map_or(false, |f| score >= 3 * u16::from(f))
}

/// Category to score with no rolls left, and its score.
fn choose_score(faces: &Faces, card: &Scorecard) -> Option<(Category, u16)> {
    let legal = legal_categories(faces, card);
    let mut best: Option<(Category, u16, u16)> = None;
    for cat in legal.iter() {
        let s = potential_score(cat, faces, card);
        let weighted = if on_upper_pace(cat, s) {
            s + UPPER_PACE_WEIGHT
        } else {
            s
        };
        if best.map_or(true, |(_, w, _)| weighted > w) {
            best = Some((cat, weighted, s));
        }
    }
    match best {
        Some((cat, w, s)) if w > 0 => Some((cat, s)),
        _ => waste(legal).map(|cat| (cat, 0)),
    }
}

fn waste(legal: CategorySet) -> Option<Category> {
    WASTE_ORDER.iter().copied().find(|&cat| legal.contains(cat))
}

/// Most frequent face; among equals, the one seen first.
fn most_common_face(faces: &Faces) -> u8 {
    let counts = face_counts(faces);
    let mut best = faces[0];
    for &f in &faces[1..] {
        if counts[(f - 1) as usize] > counts[(best - 1) as usize] {
            best = f;
        }
    }
    best
}

fn keep_face(faces: &Faces, face: u8) -> HoldMask {
    HoldMask::from_indices((0..5).filter(|&i| faces[i] == face))
}

/// One die per face of the first run the dice cover three faces of.
fn keep_partial_straight(faces: &Faces) -> Option<HoldMask> {
    let counts = face_counts(faces);
    let run = RUNS
        .iter()
        .find(|run| run.iter().filter(|&&f| counts[(f - 1) as usize] > 0).count() >= 3)?;
    let mut taken = [false; 6];
    let mut idx = Vec::with_capacity(4);
    for (i, &f) in faces.iter().enumerate() {
        if run.contains(&f) && !taken[(f - 1) as usize] {
            taken[(f - 1) as usize] = true;
            idx.push(i);
        }
    }
    Some(HoldMask::from_indices(idx))
}
