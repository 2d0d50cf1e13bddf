//! Bounded undo history of full game states.

use std::collections::VecDeque;

use yh_core::GameState;

/// Newest entry on top; the oldest is dropped once `depth` is reached.
#[derive(Debug, Clone)]
pub struct UndoStack {
    depth: usize,
    entries: VecDeque<GameState>,
}

impl UndoStack {
    pub fn new(depth: usize) -> Self {
        Self {
            depth: depth.max(1),
            entries: VecDeque::new(),
        }
    }

    pub fn push(&mut self, state: GameState) {
        if self.entries.len() == self.depth {
            self.entries.pop_front();
        }
        self.entries.push_back(state);
    }

    pub fn pop(&mut self) -> Option<GameState> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yh_core::{initial_state, roll, ChanceMode};

    #[test]
    fn pops_in_reverse_order_and_drops_oldest() {
        let mut chance = ChanceMode::rng(3);
        let s0 = initial_state(1);
        let s1 = roll(&s0, &mut chance);
        let s2 = roll(&s1, &mut chance);

        let mut u = UndoStack::new(2);
        u.push(s0);
        u.push(s1.clone());
        u.push(s2.clone());
        assert_eq!(u.len(), 2);
        assert_eq!(u.pop(), Some(s2));
        assert_eq!(u.pop(), Some(s1));
        assert!(u.pop().is_none());
    }

    #[test]
    fn zero_depth_keeps_one_entry() {
        let mut u = UndoStack::new(0);
        u.push(initial_state(1));
        u.push(initial_state(2));
        assert_eq!(u.depth(), 1);
        assert_eq!(u.pop().map(|s| s.num_players()), Some(2));
        assert!(u.is_empty());
    }
}
