use std::sync::LazyLock;

use regex::Regex;

// Unanchored on purpose: share URLs carry arbitrary schemes, subdomains and query strings.
static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/(?:watch\?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{11})")
        .expect("valid YouTube pattern")
});

static TIKTOK_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"tiktok\.com/@[^/]+/video/([0-9]+)|tiktok\.com/t/([A-Za-z0-9]+)|vm\.tiktok\.com/([A-Za-z0-9]+)",
    )
    .expect("valid TikTok pattern")
});

/// Extract the 11-character video id from a YouTube watch, embed, shorts or youtu.be URL.
pub fn youtube_video_id(url: &str) -> Option<&str> {
    YOUTUBE_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract the video id from a TikTok URL.
///
/// Long links (`tiktok.com/@handle/video/<digits>`) yield the numeric id; short links
/// (`tiktok.com/t/<id>`, `vm.tiktok.com/<id>`) yield the alphanumeric short id.
pub fn tiktok_video_id(url: &str) -> Option<&str> {
    let caps = TIKTOK_ID.captures(url)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
}
