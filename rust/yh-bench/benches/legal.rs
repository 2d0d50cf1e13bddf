use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use yh_bench::{dice_samples, scorecard_samples};
use yh_core::{canonical_hold, legal_categories, HoldMask};
use yh_tables::tables;

fn bench_legal_categories(c: &mut Criterion) {
    let mut g = c.benchmark_group("yh_core_legal");
    for &n in &[256usize, 4096usize] {
        let dice = dice_samples(n);
        let cards = scorecard_samples(n, 7);
        g.bench_with_input(BenchmarkId::new("legal_categories_batch", n), &n, |b, _| {
            b.iter(|| {
                for (d, card) in dice.iter().zip(cards.iter()) {
                    black_box(legal_categories(black_box(d), card));
                }
            })
        });
    }
    g.finish();
}

fn bench_keeper_lookup(c: &mut Criterion) {
    let t = tables();
    let dice = dice_samples(1024);
    let mut g = c.benchmark_group("yh_tables");
    g.bench_function("keeper_for_all_masks", |b| {
        b.iter(|| {
            for d in dice.iter() {
                for mask in HoldMask::all() {
                    black_box(t.keeper_for(d, canonical_hold(d, mask)));
                }
            }
        })
    });
    g.bench_function("distribution_hold_two", |b| {
        b.iter(|| {
            for d in dice.iter() {
                black_box(t.distribution(d, HoldMask::new(0b00011)).len());
            }
        })
    });
    g.finish();
}

criterion_group!(benches, bench_legal_categories, bench_keeper_lookup);
criterion_main!(benches);
