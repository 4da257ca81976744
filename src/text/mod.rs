// Text normalization — punctuation stripping, stopword removal and verb
// lemmatization applied before sentiment scoring and topic modeling.

pub mod lemmatize;
pub mod normalize;
