// Video id extraction from the two common YouTube URL shapes.

use std::sync::LazyLock;

use regex_lite::Regex;

static WATCH_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"youtube\.com/watch\?v=([A-Za-z0-9_-]+)").expect("watch URL pattern compiles")
});

static SHORT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"youtu\.be/([A-Za-z0-9_-]+)").expect("short URL pattern compiles")
});

/// Extract the video id from `youtube.com/watch?v=ID[&...]` or `youtu.be/ID`.
///
/// Ids are restricted to the URL-safe alphabet YouTube uses, which also makes
/// them safe to use as cache file names.
pub fn extract_video_id(url: &str) -> Option<String> {
    let url = url.trim();
    WATCH_URL
        .captures(url)
        .or_else(|| SHORT_URL.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
