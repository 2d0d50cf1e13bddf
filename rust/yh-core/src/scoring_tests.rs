#[cfg(test)]
mod tests {
    use crate::category::Category;
    use crate::legal::{is_category_legal, legal_categories};
    use crate::scorecard::{Scorecard, UPPER_BONUS};
    use crate::scoring::{
        is_bonus_yahtzee, is_valid_score, joker_active, potential_score, score, score_in_context,
        scores_for_dice,
    };

    fn card(entries: &[(Category, u16)]) -> Scorecard {
        entries
            .iter()
            .fold(Scorecard::new(), |c, &(cat, s)| c.with_score(cat, s))
    }

    #[test]
    fn three_fives_two_one() {
        let dice = [5, 5, 5, 2, 1];
        assert_eq!(score(Category::Fives, &dice), 15);
        assert_eq!(score(Category::ThreeOfAKind, &dice), 18);
        assert_eq!(score(Category::Chance, &dice), 18);
        assert_eq!(score(Category::FullHouse, &dice), 0);
        assert_eq!(score(Category::FourOfAKind, &dice), 0);
        assert_eq!(score(Category::Twos, &dice), 2);
        assert_eq!(score(Category::Sixes, &dice), 0);
    }

    #[test]
    fn straights() {
        assert_eq!(score(Category::SmallStraight, &[1, 2, 3, 4, 6]), 30);
        assert_eq!(score(Category::LargeStraight, &[1, 2, 3, 4, 6]), 0);
        assert_eq!(score(Category::SmallStraight, &[4, 2, 3, 2, 1]), 30);
        assert_eq!(score(Category::SmallStraight, &[6, 5, 4, 3, 3]), 30);
        assert_eq!(score(Category::SmallStraight, &[1, 2, 3, 5, 6]), 0);
        assert_eq!(score(Category::LargeStraight, &[5, 4, 3, 2, 1]), 40);
        assert_eq!(score(Category::LargeStraight, &[2, 3, 4, 5, 6]), 40);
        assert_eq!(score(Category::SmallStraight, &[2, 3, 4, 5, 6]), 30);
    }

    #[test]
    fn full_house_needs_exactly_three_and_two() {
        assert_eq!(score(Category::FullHouse, &[2, 2, 3, 3, 3]), 25);
        assert_eq!(score(Category::FullHouse, &[6, 1, 6, 1, 6]), 25);
        assert_eq!(score(Category::FullHouse, &[3, 3, 3, 3, 3]), 0);
        assert_eq!(score(Category::FullHouse, &[3, 3, 3, 3, 2]), 0);
    }

    #[test]
    fn kinds_and_yahtzee() {
        let dice = [4, 4, 4, 4, 1];
        assert_eq!(score(Category::FourOfAKind, &dice), 17);
        assert_eq!(score(Category::ThreeOfAKind, &dice), 17);
        assert_eq!(score(Category::Yahtzee, &dice), 0);
        assert_eq!(score(Category::Yahtzee, &[6, 6, 6, 6, 6]), 50);
        assert_eq!(score(Category::FourOfAKind, &[6, 6, 6, 6, 6]), 30);
    }

    #[test]
    fn every_raw_score_is_a_valid_row_value() {
        for a in 1u8..=6 {
            for b in 1u8..=6 {
                for c in 1u8..=6 {
                    for d in 1u8..=6 {
                        for e in 1u8..=6 {
                            let dice = [a, b, c, d, e];
                            let all = scores_for_dice(&dice);
                            for cat in Category::ALL {
                                assert_eq!(all[cat.index()], score(cat, &dice));
                                assert!(is_valid_score(cat, all[cat.index()]), "{cat} {dice:?}");
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn out_of_range_row_values_are_rejected() {
        assert!(!is_valid_score(Category::Threes, 4));
        assert!(!is_valid_score(Category::Sixes, 36));
        assert!(!is_valid_score(Category::FullHouse, 24));
        assert!(!is_valid_score(Category::Chance, 31));
        assert!(!is_valid_score(Category::ThreeOfAKind, 3));
        assert!(is_valid_score(Category::Chance, 5));
    }

    #[test]
    fn upper_bonus_boundary_over_all_fill_patterns() {
        // 63 exactly (three of each face) and one short of it.
        let at = [3u16, 6, 9, 12, 15, 18];
        let below = [2u16, 6, 9, 12, 15, 18];
        for values in [at, below] {
            for mask in 0u32..64 {
                let mut c = Scorecard::new();
                let mut subtotal = 0;
                for (i, cat) in Category::UPPER.iter().enumerate() {
                    if mask & (1 << i) != 0 {
                        c = c.with_score(*cat, values[i]);
                        subtotal += values[i];
                    }
                }
                assert_eq!(c.upper_subtotal(), subtotal);
                let expected = if subtotal >= 63 { UPPER_BONUS } else { 0 };
                assert_eq!(c.upper_bonus(), expected, "mask {mask:06b} values {values:?}");
            }
        }
        let full_at: Scorecard = card(&Category::UPPER.iter().copied().zip(at).collect::<Vec<_>>());
        let full_below = card(&Category::UPPER.iter().copied().zip(below).collect::<Vec<_>>());
        assert_eq!(full_at.upper_bonus(), 35);
        assert_eq!(full_below.upper_bonus(), 0);
    }

    #[test]
    fn grand_total_is_sum_of_parts_and_idempotent() {
        let c = card(&[
            (Category::Ones, 3),
            (Category::Twos, 6),
            (Category::Threes, 9),
            (Category::Fours, 12),
            (Category::Fives, 15),
            (Category::Sixes, 18),
            (Category::FullHouse, 25),
            (Category::Yahtzee, 50),
            (Category::Chance, 22),
        ])
        .with_yahtzee_bonus_count(2);
        let parts = c.upper_subtotal() as u32
            + c.upper_bonus() as u32
            + c.lower_subtotal() as u32
            + c.yahtzee_bonus() as u32;
        assert_eq!(c.grand_total(), parts);
        assert_eq!(c.grand_total(), 63 + 35 + 97 + 200);
        assert_eq!(c.grand_total(), c.clone().grand_total());
        assert_eq!(c.grand_total(), c.grand_total());
    }

    #[test]
    fn filled_categories_never_overwritten() {
        let c = card(&[(Category::Chance, 20)]);
        let again = c.with_score(Category::Chance, 30);
        assert_eq!(again.get(Category::Chance), Some(20));
        assert_eq!(again, c);
    }

    #[test]
    fn potential_score_is_zero_for_filled() {
        let dice = [6, 6, 6, 2, 2];
        let c = card(&[(Category::FullHouse, 0), (Category::Sixes, 12)]);
        assert_eq!(potential_score(Category::FullHouse, &dice, &c), 0);
        assert_eq!(potential_score(Category::Sixes, &dice, &c), 0);
        assert_eq!(potential_score(Category::ThreeOfAKind, &dice, &c), 22);
    }

    #[test]
    fn first_yahtzee_is_not_a_bonus() {
        let dice = [6, 6, 6, 6, 6];
        let empty = Scorecard::new();
        assert!(!is_bonus_yahtzee(&dice, &empty));
        assert!(!joker_active(&dice, &empty));
        assert_eq!(potential_score(Category::Yahtzee, &dice, &empty), 50);
        // Every open category is legal for a first Yahtzee.
        assert_eq!(legal_categories(&dice, &empty).len(), 13);
    }

    #[test]
    fn bonus_yahtzee_forced_into_open_upper() {
        let dice = [6, 6, 6, 6, 6];
        let c = card(&[(Category::Yahtzee, 50)]);
        assert!(is_bonus_yahtzee(&dice, &c));
        assert!(!joker_active(&dice, &c));
        let legal = legal_categories(&dice, &c);
        assert_eq!(legal.iter().collect::<Vec<_>>(), vec![Category::Sixes]);
        assert_eq!(potential_score(Category::Sixes, &dice, &c), 30);
        assert_eq!(potential_score(Category::FullHouse, &dice, &c), 0);
    }

    #[test]
    fn joker_values_once_upper_filled() {
        let dice = [6, 6, 6, 6, 6];
        let c = card(&[(Category::Yahtzee, 50), (Category::Sixes, 24)]);
        assert!(joker_active(&dice, &c));
        assert_eq!(score_in_context(Category::FullHouse, &dice, &c), 25);
        assert_eq!(score_in_context(Category::SmallStraight, &dice, &c), 30);
        assert_eq!(score_in_context(Category::LargeStraight, &dice, &c), 40);
        assert_eq!(score_in_context(Category::ThreeOfAKind, &dice, &c), 30);
        assert_eq!(score_in_context(Category::Chance, &dice, &c), 30);
        // Other upper boxes score normally.
        assert_eq!(potential_score(Category::Twos, &dice, &c), 0);
        assert!(is_category_legal(Category::Twos, &dice, &c));
        assert!(!is_category_legal(Category::Sixes, &dice, &c));
    }

    #[test]
    fn zeroed_yahtzee_box_disables_bonus_and_joker() {
        let dice = [2, 2, 2, 2, 2];
        let c = card(&[(Category::Yahtzee, 0), (Category::Twos, 4)]);
        assert!(!is_bonus_yahtzee(&dice, &c));
        assert!(!joker_active(&dice, &c));
        assert_eq!(potential_score(Category::FullHouse, &dice, &c), 0);
        assert_eq!(potential_score(Category::Chance, &dice, &c), 10);
    }
}
