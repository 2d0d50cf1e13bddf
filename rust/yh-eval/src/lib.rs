//! yh-eval: batch self-play benchmark for the decision strategies.
//!
//! Game `i` of a run uses seed `start_seed + i` for both the dice and the strategy, so a
//! run is reproducible and, with event-keyed dice, every strategy sees the same rolls.

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use yh_core::{ChanceConfig, ChanceMode, StrategyConfig, StrategyKind};
use yh_strategy::{play_game, Strategy};

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("invalid benchmark config: {0}")]
    InvalidConfig(&'static str),
}

#[derive(Debug, Clone)]
pub struct BenchOptions {
    pub games: u32,
    pub start_seed: u64,
    pub chance: ChanceConfig,
    pub strategies: StrategyConfig,
}

impl Default for BenchOptions {
    fn default() -> Self {
        Self {
            games: 200,
            start_seed: 0,
            chance: ChanceConfig::Rng,
            strategies: StrategyConfig::default(),
        }
    }
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Grand total of one single-player game.
pub fn play_seeded(
    kind: StrategyKind,
    config: &StrategyConfig,
    chance: ChanceConfig,
    seed: u64,
) -> u32 {
    let mut strategy = Strategy::new(kind, config, splitmix64(seed));
    let mut dice = match chance {
        ChanceConfig::Rng => ChanceMode::rng(seed),
        ChanceConfig::EventKeyed => ChanceMode::event_keyed(seed),
    };
    let end = play_game(&mut strategy, &mut dice);
    end.grand_totals().first().copied().unwrap_or(0)
}

/// Running score moments; mergeable across rayon workers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorePartial {
    pub games: u32,
    pub sum: u64,
    pub sumsq: f64,
    pub min: u32,
    pub max: u32,
}

impl Default for ScorePartial {
    fn default() -> Self {
        Self {
            games: 0,
            sum: 0,
            sumsq: 0.0,
            min: u32::MAX,
            max: 0,
        }
    }
}

impl ScorePartial {
    pub fn push(&mut self, score: u32) {
        self.games += 1;
        self.sum += u64::from(score);
        self.sumsq += f64::from(score) * f64::from(score);
        self.min = self.min.min(score);
        self.max = self.max.max(score);
    }

    pub fn merge(&mut self, other: &ScorePartial) {
        self.games = self.games.saturating_add(other.games);
        self.sum = self.sum.saturating_add(other.sum);
        self.sumsq += other.sumsq;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn into_report(self, kind: StrategyKind, elapsed: Duration) -> BenchReport {
        let mut report = BenchReport {
            kind,
            games: self.games,
            min: if self.games == 0 { 0 } else { self.min },
            max: self.max,
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
            ..BenchReport::default()
        };
        if self.games == 0 {
            return report;
        }
        let n = f64::from(self.games);
        report.mean = self.sum as f64 / n;
        // Sample variance from moments: (Σx² - (Σx)²/n)/(n-1)
        let var = if self.games > 1 {
            let ss = self.sumsq - (self.sum as f64) * (self.sum as f64) / n;
            (ss / (n - 1.0)).max(0.0)
        } else {
            0.0
        };
        report.std = var.sqrt();
        report.se = report.std / n.sqrt();
        report.ms_per_game = report.elapsed_ms / n;
        report
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchReport {
    pub kind: StrategyKind,
    pub games: u32,
    pub mean: f64,
    pub min: u32,
    pub max: u32,
    pub std: f64,
    /// Standard error of the mean.
    pub se: f64,
    pub elapsed_ms: f64,
    pub ms_per_game: f64,
}

impl Default for BenchReport {
    fn default() -> Self {
        Self {
            kind: StrategyKind::Random,
            games: 0,
            mean: 0.0,
            min: 0,
            max: 0,
            std: 0.0,
            se: 0.0,
            elapsed_ms: 0.0,
            ms_per_game: 0.0,
        }
    }
}

impl BenchReport {
    pub fn ci95(&self) -> (f64, f64) {
        let ci = 1.96 * self.se;
        (self.mean - ci, self.mean + ci)
    }

    /// One human-readable result line.
    pub fn summary_line(&self) -> String {
        format!(
            "{:10} avg={:6.1} min={:4} max={:4} ({} games in {:.2}s, {:.1}ms/game)",
            self.kind.token(),
            self.mean,
            self.min,
            self.max,
            self.games,
            self.elapsed_ms / 1000.0,
            self.ms_per_game
        )
    }
}

/// Play `opts.games` games with `kind`, in parallel.
pub fn benchmark(kind: StrategyKind, opts: &BenchOptions) -> Result<BenchReport, EvalError> {
    if opts.games == 0 {
        return Err(EvalError::InvalidConfig("games must be > 0"));
    }
    if opts.strategies.ev_simulations == 0 {
        return Err(EvalError::InvalidConfig("ev_simulations must be > 0"));
    }
    let t0 = Instant::now();
    let end = opts.start_seed.saturating_add(u64::from(opts.games));
    let partial = (opts.start_seed..end)
        .into_par_iter()
        .fold(ScorePartial::default, |mut acc, seed| {
            acc.push(play_seeded(kind, &opts.strategies, opts.chance, seed));
            acc
        })
        .reduce(ScorePartial::default, |mut a, b| {
            a.merge(&b);
            a
        });
    Ok(partial.into_report(kind, t0.elapsed()))
}

/// [`benchmark`] for every strategy, in `StrategyKind::ALL` order.
pub fn benchmark_all(opts: &BenchOptions) -> Result<Vec<BenchReport>, EvalError> {
    StrategyKind::ALL
        .iter()
        .map(|&kind| benchmark(kind, opts))
        .collect()
}


#[cfg(test)]
mod ordering_tests;
