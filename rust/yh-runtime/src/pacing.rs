//! Automated-turn pacing: the active speed preset and its tick counts.

use yh_core::{PacingConfig, PacingPreset, PacingTicks};

#[derive(Debug, Clone)]
pub struct Pacing {
    config: PacingConfig,
    preset: PacingPreset,
}

impl Pacing {
    pub fn new(config: PacingConfig) -> Self {
        let preset = config.preset;
        Self { config, preset }
    }

    pub fn preset(&self) -> PacingPreset {
        self.preset
    }

    pub fn ticks(&self) -> PacingTicks {
        self.config.ticks(self.preset)
    }

    /// Step one preset faster (`+1`) or slower (`-1`). Returns false at either end.
    ///
    /// Timers already running keep the deadline they were started with.
    pub fn adjust(&mut self, direction: i32) -> bool {
        match self.preset.step(direction) {
            Some(p) if direction != 0 => {
                self.preset = p;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_walks_presets_and_stops_at_ends() {
        let mut p = Pacing::new(PacingConfig::default());
        assert_eq!(p.preset(), PacingPreset::Normal);
        assert!(p.adjust(1));
        assert_eq!(p.preset(), PacingPreset::Fast);
        assert_eq!(p.ticks(), PacingTicks::new(10, 20, 8));
        assert!(!p.adjust(1));
        assert!(p.adjust(-1));
        assert!(p.adjust(-1));
        assert_eq!(p.ticks(), PacingTicks::new(60, 90, 30));
        assert!(!p.adjust(-1));
        assert_eq!(p.preset(), PacingPreset::Slow);
    }

    #[test]
    fn zero_direction_is_refused() {
        let mut p = Pacing::new(PacingConfig::default());
        assert!(!p.adjust(0));
        assert_eq!(p.preset(), PacingPreset::Normal);
    }
}
