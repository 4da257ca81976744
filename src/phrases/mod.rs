// Key-phrase extraction — one generative request over a bounded blob of raw
// comments, parsed back into a phrase list.

pub mod extract;
