use yh_core::{ChanceConfig, StrategyConfig, StrategyKind};

use crate::{benchmark, BenchOptions, BenchReport};

fn run(kind: StrategyKind) -> BenchReport {
    let opts = BenchOptions {
        games: 500,
        start_seed: 1_000,
        chance: ChanceConfig::EventKeyed,
        strategies: StrategyConfig {
            ev_simulations: 40,
            ..StrategyConfig::default()
        },
    };
    benchmark(kind, &opts).unwrap()
}

#[test]
fn mean_scores_follow_strategy_strength() {
    let random = run(StrategyKind::Random);
    let greedy = run(StrategyKind::Greedy);
    let ev = run(StrategyKind::ExpectedValue);
    let optimal = run(StrategyKind::Optimal);
    for r in [&random, &greedy, &ev, &optimal] {
        eprintln!("{}", r.summary_line());
        assert_eq!(r.games, 500);
    }

    assert!(random.mean < greedy.mean);
    assert!(greedy.mean < ev.mean);
    assert!(ev.mean < optimal.mean, "ev {} optimal {}", ev.mean, optimal.mean);

    assert!((20.0..100.0).contains(&random.mean), "random {}", random.mean);
    assert!((130.0..185.0).contains(&greedy.mean), "greedy {}", greedy.mean);
    assert!((190.0..235.0).contains(&ev.mean), "ev {}", ev.mean);
    assert!((190.0..260.0).contains(&optimal.mean), "optimal {}", optimal.mean);
}
