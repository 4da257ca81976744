// YouTube Data API v3 — video URL parsing, comment fetching, and a local
// comment cache.

pub mod cache;
pub mod client;
pub mod traits;
pub mod url;
