// Analysis pipeline — wires the normalizer, classifiers, topic search,
// emotion tagger and phrase extractor into one run per comment batch, plus
// the fetch-and-analyze flow for a video URL.

pub mod analysis;
pub mod input;
pub mod video;
