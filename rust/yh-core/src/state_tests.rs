#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::category::Category;
    use crate::scorecard::Scorecard;
    use crate::state::{GameState, InvariantError, TurnLog, TurnRecord};

    fn record(round: u8, category: Category, score: u16) -> TurnRecord {
        TurnRecord {
            round,
            player: 0,
            rolls: vec![[1, 2, 3, 4, 5]],
            category,
            score,
            yahtzee_bonus: false,
        }
    }

    #[test]
    fn turn_log_push_is_persistent() {
        let empty = TurnLog::new();
        let one = empty.push(record(1, Category::Ones, 1));
        let two = one.push(record(2, Category::Chance, 15));
        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
        assert_eq!(two.len(), 2);
        assert_eq!(two.last().unwrap().category, Category::Chance);
        assert_eq!(one.last().unwrap().category, Category::Ones);
        let order: Vec<u8> = two.to_vec().iter().map(|r| r.round).collect();
        assert_eq!(order, vec![1, 2]);
        let newest_first: Vec<u8> = two.iter().map(|r| r.round).collect();
        assert_eq!(newest_first, vec![2, 1]);
    }

    #[test]
    fn turn_log_equality_is_by_content() {
        let a = TurnLog::new().push(record(1, Category::Ones, 1));
        let b = TurnLog::new().push(record(1, Category::Ones, 1));
        let c = TurnLog::new().push(record(1, Category::Twos, 2));
        assert_eq!(a, b);
        assert_eq!(a, a.clone());
        assert_ne!(a, c);
        assert_ne!(a, TurnLog::new());
    }

    #[test]
    fn validate_catches_bad_dice_and_counters() {
        let mut s = GameState::new(1);
        s.dice[2].value = 7;
        assert_eq!(
            s.validate(),
            Err(InvariantError::DieFace { index: 2, face: 7 })
        );

        let mut s = GameState::new(1);
        s.rolls_used = 4;
        assert_eq!(s.validate(), Err(InvariantError::RollsUsed(4)));

        let mut s = GameState::new(1);
        s.current_round = 0;
        assert_eq!(s.validate(), Err(InvariantError::Round(0)));

        let mut s = GameState::new(2);
        s.current_player = 2;
        assert!(matches!(
            s.validate(),
            Err(InvariantError::PlayerIndex { index: 2, players: 2 })
        ));

        let mut s = GameState::new(1);
        s.game_over = true;
        assert!(matches!(s.validate(), Err(InvariantError::GameOver { .. })));
    }

    #[test]
    fn validate_catches_out_of_range_rows() {
        let mut s = GameState::new(2);
        s.scorecards[1] = Arc::new(Scorecard::new().with_score(Category::FullHouse, 20));
        assert_eq!(
            s.validate(),
            Err(InvariantError::ScoreOutOfRange {
                player: 1,
                category: Category::FullHouse,
                score: 20,
            })
        );

        let mut s = GameState::new(1);
        s.scorecards[0] = Arc::new(Scorecard::new().with_yahtzee_bonus_count(1));
        assert!(matches!(
            s.validate(),
            Err(InvariantError::YahtzeeBonus { player: 0, count: 1 })
        ));
    }

    #[test]
    fn invariant_errors_render() {
        let msg = InvariantError::ScoreOutOfRange {
            player: 0,
            category: Category::Sixes,
            score: 7,
        }
        .to_string();
        assert!(msg.contains("Sixes"));
        assert!(msg.contains('7'));
    }

    #[test]
    fn held_mask_reflects_dice() {
        let mut s = GameState::new(1);
        s.dice[1].held = true;
        s.dice[4].held = true;
        assert_eq!(s.held_mask().indices().collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(s.rolls_remaining(), 3);
        assert_eq!(s.grand_totals(), vec![0]);
    }
}
