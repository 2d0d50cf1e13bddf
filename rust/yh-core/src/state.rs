//! Immutable game snapshot.
//!
//! A `GameState` is a value: the engine never mutates one, it builds the next. Scorecards
//! sit behind `Arc` and the turn log is a persistent list, so a transition copies only
//! the dice, counters and a handful of pointers; the other players' scorecards and the
//! log history are shared with the previous state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::action::HoldMask;
use crate::category::Category;
use crate::scorecard::Scorecard;
use crate::scoring::Faces;

pub const NUM_DICE: usize = 5;
pub const MAX_ROLLS: u8 = 3;
pub const NUM_ROUNDS: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Die {
    pub value: u8,
    pub held: bool,
}

impl Die {
    pub const fn new(value: u8) -> Die {
        Die { value, held: false }
    }
}

impl Default for Die {
    fn default() -> Self {
        Die::new(1)
    }
}

/// Internally inconsistent state. Indicates a defect, never a user error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("player {player}: {category} holds out-of-range score {score}")]
    ScoreOutOfRange {
        player: usize,
        category: Category,
        score: u16,
    },
    #[error("player {player}: yahtzee bonus count {count} is inconsistent with the Yahtzee row")]
    YahtzeeBonus { player: usize, count: u8 },
    #[error("die {index} shows face {face}")]
    DieFace { index: usize, face: u8 },
    #[error("rolls_used {0} exceeds 3")]
    RollsUsed(u8),
    #[error("current_round {0} outside 1..=13")]
    Round(u8),
    #[error("current player {index} out of range for {players} players")]
    PlayerIndex { index: usize, players: usize },
    #[error("game_over={flag} but all scorecards complete={complete}")]
    GameOver { flag: bool, complete: bool },
}

/// One completed turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnRecord {
    pub round: u8,
    pub player: usize,
    /// Faces after each roll of the turn, in order.
    pub rolls: Vec<Faces>,
    pub category: Category,
    pub score: u16,
    pub yahtzee_bonus: bool,
}

#[derive(Debug)]
struct LogNode {
    record: TurnRecord,
    prev: Option<Arc<LogNode>>,
}

/// Append-only turn log, persistent (appending shares the existing entries).
#[derive(Debug, Clone, Default)]
pub struct TurnLog {
    head: Option<Arc<LogNode>>,
    len: usize,
}

impl TurnLog {
    pub fn new() -> TurnLog {
        TurnLog::default()
    }

    pub fn push(&self, record: TurnRecord) -> TurnLog {
        TurnLog {
            head: Some(Arc::new(LogNode {
                record,
                prev: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn last(&self) -> Option<&TurnRecord> {
        self.head.as_deref().map(|n| &n.record)
    }

    /// Newest first.
    pub fn iter(&self) -> TurnLogIter<'_> {
        TurnLogIter {
            node: self.head.as_deref(),
        }
    }

    /// Oldest first.
    pub fn to_vec(&self) -> Vec<TurnRecord> {
        let mut out: Vec<TurnRecord> = self.iter().cloned().collect();
        out.reverse();
        out
    }
}

impl PartialEq for TurnLog {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        match (&self.head, &other.head) {
            (Some(a), Some(b)) if Arc::ptr_eq(a, b) => true,
            _ => self.iter().eq(other.iter()),
        }
    }
}

impl Eq for TurnLog {}

pub struct TurnLogIter<'a> {
    node: Option<&'a LogNode>,
}

impl<'a> Iterator for TurnLogIter<'a> {
    type Item = &'a TurnRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.node?;
        self.node = node.prev.as_deref();
        Some(&node.record)
    }
}

/// Snapshot of one game, single- or multi-player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub dice: [Die; NUM_DICE],
    /// 0..=3
    pub rolls_used: u8,
    /// 1..=13
    pub current_round: u8,
    pub current_player: usize,
    pub scorecards: Vec<Arc<Scorecard>>,
    pub game_over: bool,
    /// Faces seen after each roll of the turn in progress.
    pub turn_rolls: Vec<Faces>,
    pub log: TurnLog,
}

impl GameState {
    /// Fresh game: dice unrolled (face 1, unheld), empty scorecards, round 1, player 0.
    pub fn new(num_players: usize) -> GameState {
        debug_assert!(num_players > 0);
        let empty = Arc::new(Scorecard::new());
        GameState {
            dice: [Die::default(); NUM_DICE],
            rolls_used: 0,
            current_round: 1,
            current_player: 0,
            scorecards: vec![empty; num_players.max(1)],
            game_over: false,
            turn_rolls: Vec::new(),
            log: TurnLog::new(),
        }
    }

    pub fn num_players(&self) -> usize {
        self.scorecards.len()
    }

    pub fn faces(&self) -> Faces {
        self.dice.map(|d| d.value)
    }

    pub fn held_mask(&self) -> HoldMask {
        HoldMask::from_indices((0..NUM_DICE).filter(|&i| self.dice[i].held))
    }

    pub fn current_scorecard(&self) -> &Scorecard {
        &self.scorecards[self.current_player]
    }

    pub fn rolls_remaining(&self) -> u8 {
        MAX_ROLLS.saturating_sub(self.rolls_used)
    }

    pub fn grand_totals(&self) -> Vec<u32> {
        self.scorecards.iter().map(|s| s.grand_total()).collect()
    }

    /// Check every structural invariant.
    pub fn validate(&self) -> Result<(), InvariantError> {
        for (index, die) in self.dice.iter().enumerate() {
            if !(1..=6).contains(&die.value) {
                return Err(InvariantError::DieFace {
                    index,
                    face: die.value,
                });
            }
        }
        if self.rolls_used > MAX_ROLLS {
            return Err(InvariantError::RollsUsed(self.rolls_used));
        }
        if !(1..=NUM_ROUNDS).contains(&self.current_round) {
            return Err(InvariantError::Round(self.current_round));
        }
        if self.current_player >= self.num_players() {
            return Err(InvariantError::PlayerIndex {
                index: self.current_player,
                players: self.num_players(),
            });
        }
        for (player, card) in self.scorecards.iter().enumerate() {
            card.validate(player)?;
        }
        let complete = self.scorecards.iter().all(|s| s.is_complete());
        if complete != self.game_over {
            return Err(InvariantError::GameOver {
                flag: self.game_over,
                complete,
            });
        }
        Ok(())
    }
}
