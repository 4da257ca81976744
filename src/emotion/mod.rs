// Emotion tagging — multi-label emotion scores per raw comment, aggregated
// into per-label comment counts.

pub mod lexicon;
pub mod tag;
pub mod traits;
