//! Precomputed reroll probability tables over 5-dice multisets.
//!
//! Pure combinatorics: no randomness, no I/O. Built on first use and shared for the
//! lifetime of the process.

pub mod tables;

pub use tables::{Counts, DiceTables, Keeper, RerollOutcome, NUM_HANDS, NUM_KEEPERS};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the process-wide tables.
///
/// The first call builds them (a few milliseconds); later calls return the cached value.
pub fn tables() -> &'static DiceTables {
    use std::sync::OnceLock;
    static TABLES: OnceLock<DiceTables> = OnceLock::new();
    TABLES.get_or_init(DiceTables::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_nonempty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn tables_singleton_is_shared() {
        assert!(std::ptr::eq(tables(), tables()));
    }
}

#[cfg(test)]
mod tables_tests;
