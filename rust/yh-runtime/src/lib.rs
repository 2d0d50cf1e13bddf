//! yh-runtime: the tick-driven turn coordinator and its renderer surface.

pub mod coordinator;
pub mod pacing;
pub mod protocol;
pub mod snapshot;
pub mod undo;

pub use coordinator::{Coordinator, CoordinatorStats, Phase, SessionError};
pub use pacing::Pacing;
pub use protocol::ClientAction;
pub use snapshot::{
    DieView, LastTurn, PlayerView, PotentialScore, ScoreRow, ScorecardView, Snapshot, TurnBanner,
};
pub use undo::UndoStack;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_nonempty() {
        assert!(!VERSION.is_empty());
    }
}
