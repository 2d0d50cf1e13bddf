//! Deterministic inputs shared by the criterion benches.

use yh_core::{Category, Faces, Scorecard};

/// `n` dice rolls from a fixed xorshift64 stream.
pub fn dice_samples(n: usize) -> Vec<Faces> {
    let mut x: u64 = 0x1234_5678_9ABC_DEF0;
    (0..n)
        .map(|_| {
            let mut d = [0u8; 5];
            for v in d.iter_mut() {
                x ^= x << 13;
                x ^= x >> 7;
                x ^= x << 17;
                *v = (x % 6) as u8 + 1;
            }
            d
        })
        .collect()
}

/// Scorecards with `filled` categories, chosen by an LCG shuffle, scratched to 0.
pub fn scorecard_samples(n: usize, filled: usize) -> Vec<Scorecard> {
    let mut x: u64 = 0xA5A5_A5A5_0123_4567;
    (0..n)
        .map(|_| {
            let mut order = Category::ALL;
            for i in (1..order.len()).rev() {
                x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
                order.swap(i, (x >> 33) as usize % (i + 1));
            }
            order
                .iter()
                .take(filled)
                .fold(Scorecard::new(), |card, &cat| card.with_score(cat, 0))
        })
        .collect()
}
