// Topic modeling — bag-of-words corpus, LDA training, c_v coherence and
// automatic topic-count selection.

pub mod coherence;
pub mod dictionary;
pub mod lda;
pub mod model;
pub mod select;
pub mod special;
pub mod traits;
