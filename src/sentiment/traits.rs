// Polarity scorer trait — the swap-ready abstraction.
//
// The default implementation is a lexicon scorer. Anything that maps text to
// a number in [-1, 1] can stand in for it (a hosted model, a test stub).

use anyhow::Result;

/// Scores the polarity of a piece of text.
pub trait PolarityScorer: Send + Sync {
    /// Polarity from -1.0 (unfavorable) to 1.0 (favorable).
    fn polarity(&self, text: &str) -> Result<f64>;
}
