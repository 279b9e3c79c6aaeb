//! Advisor trait definition.

use crate::types::{Advice, Candle};

/// Source of trading advice.
///
/// The simulation core treats the signal layer as an opaque collaborator:
/// it feeds candles in and receives at most one advice per candle back.
/// Returning `None` and returning a `Soft` advice are equivalent from the
/// simulator's perspective.
pub trait Advisor {
    /// Get the unique name of this advisor.
    fn name(&self) -> &str;

    /// Process a new candle and optionally produce an advice for it.
    fn update(&mut self, candle: &Candle) -> Option<Advice>;

    /// Reset internal state before a fresh run.
    fn reset(&mut self);

    /// Number of candles needed before advice can be produced.
    fn warmup_period(&self) -> usize {
        0
    }
}
