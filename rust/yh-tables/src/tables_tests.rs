use yh_core::{canonical_hold, HoldMask};

use crate::tables::{DiceTables, NUM_HANDS, NUM_KEEPERS};
use crate::tables;

const EPS: f64 = 1e-12;

fn binom(n: u64, k: u64) -> u64 {
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

#[test]
fn hand_and_keeper_counts() {
    let t = tables();
    assert_eq!(t.hands().len(), NUM_HANDS);
    for (i, h) in t.hands().iter().enumerate() {
        assert!(h.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(t.hand_index(h), i);
    }
    assert_eq!(t.keeper(0).total, 0);
    assert_eq!(t.keeper(NUM_KEEPERS - 1).total, 5);
}

#[test]
fn hand_index_ignores_order() {
    let t = tables();
    assert_eq!(t.hand_index(&[6, 1, 3, 1, 2]), t.hand_index(&[1, 1, 2, 3, 6]));
    assert_eq!(t.hand(t.hand_index(&[5, 4, 3, 2, 1])), &[1, 2, 3, 4, 5]);
}

#[test]
fn reroll_outcomes_collapse_six_pow_k() {
    let t = tables();
    for k in 0..=5usize {
        let outcomes = t.reroll_outcomes(k);
        assert_eq!(outcomes.len() as u64, binom(k as u64 + 5, 5), "k={k}");
        let total: f64 = outcomes.iter().map(|o| o.probability).sum();
        assert!((total - 1.0).abs() < EPS, "k={k} total={total}");

        // Each probability times 6^k is the number of ordered rolls giving that multiset.
        let ordered = 6f64.powi(k as i32);
        let mut ways = 0u64;
        for o in outcomes {
            assert_eq!(o.counts.iter().sum::<u8>() as usize, k);
            let w = o.probability * ordered;
            assert!((w - w.round()).abs() < 1e-6, "non-integral ways {w}");
            ways += w.round() as u64;
        }
        assert_eq!(ways, 6u64.pow(k as u32));
    }
}

#[test]
fn every_keeper_distribution_sums_to_one() {
    let t = tables();
    for kid in 0..NUM_KEEPERS {
        let total: f64 = t.keeper_outcomes(kid).iter().map(|&(_, p)| p).sum();
        assert!((total - 1.0).abs() < EPS, "keeper {kid}: {total}");
        let keeper = t.keeper(kid);
        for &(h, _) in t.keeper_outcomes(kid) {
            let counts = t.hand_counts(h);
            assert!(counts.iter().zip(keeper.counts).all(|(&hc, kc)| hc >= kc));
        }
    }
}

#[test]
fn keep_all_is_certain() {
    let t = tables();
    let faces = [2, 6, 2, 3, 5];
    let dist = t.distribution(&faces, HoldMask::ALL);
    assert_eq!(dist.len(), 1);
    assert_eq!(dist[0].0, t.hand_index(&faces));
    assert!((dist[0].1 - 1.0).abs() < EPS);
}

#[test]
fn rerolling_everything_gives_the_full_roll_distribution() {
    let t = tables();
    let dist = t.distribution(&[1, 2, 3, 4, 5], HoldMask::NONE);
    assert_eq!(dist.len(), NUM_HANDS);
    let yahtzee_p: f64 = dist
        .iter()
        .filter(|&&(h, _)| t.hand(h).iter().all(|&f| f == t.hand(h)[0]))
        .map(|&(_, p)| p)
        .sum();
    assert!((yahtzee_p - 6.0 / 7776.0).abs() < EPS);
}

#[test]
fn one_die_reroll_is_uniform() {
    let t = tables();
    let faces = [1, 1, 1, 1, 1];
    let dist = t.distribution(&faces, HoldMask::from_indices([0, 1, 2, 3]));
    assert_eq!(dist.len(), 6);
    for &(_, p) in dist {
        assert!((p - 1.0 / 6.0).abs() < EPS);
    }
}

#[test]
fn equivalent_masks_share_a_distribution() {
    let t = tables();
    let faces = [3, 5, 3, 3, 5];
    for mask in HoldMask::all() {
        let canon = canonical_hold(&faces, mask);
        assert_eq!(t.keeper_for(&faces, mask), t.keeper_for(&faces, canon));
        assert_eq!(t.distribution(&faces, mask), t.distribution(&faces, canon));
    }
    // Keep {3,3} at positions 0,2 or 2,3: same keeper.
    assert_eq!(
        t.keeper_for(&faces, HoldMask::from_indices([0, 2])),
        t.keeper_for(&faces, HoldMask::from_indices([2, 3]))
    );
}

#[test]
fn sorted_masks_agree_with_position_masks() {
    let t = tables();
    for h in 0..NUM_HANDS {
        let faces = *t.hand(h);
        for m in 0u8..32 {
            assert_eq!(t.hand_keeper(h, m), t.keeper_for(&faces, HoldMask::new(m)));
        }
    }
}

#[test]
fn keeper_add_walks_to_full_hands() {
    let t = tables();
    let mut kid = 0;
    for face in [6u8, 2, 6, 4, 1] {
        kid = t.keeper_add(kid, face).unwrap();
    }
    assert_eq!(t.keeper(kid).total, 5);
    assert_eq!(t.keeper_add(kid, 3), None);
    assert_eq!(t.keeper_index(&[1, 1, 0, 1, 0, 2]), Some(kid));
}

#[test]
fn fresh_tables_match_the_singleton() {
    let fresh = DiceTables::new();
    let shared = tables();
    assert_eq!(fresh.hands(), shared.hands());
    for kid in [0, 7, 100, NUM_KEEPERS - 1] {
        assert_eq!(fresh.keeper_outcomes(kid), shared.keeper_outcomes(kid));
    }
}
