use thiserror::Error;

use super::patterns::{tiktok_video_id, youtube_video_id};
use super::{VideoKind, VideoSource};

/// Rejection reasons for a pasted platform link.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("URL is required")]
    Empty,
    #[error("Invalid YouTube URL")]
    InvalidYouTube,
    #[error("Invalid TikTok URL")]
    InvalidTikTok,
    #[error("Only YouTube and TikTok links can be added by URL")]
    UnsupportedKind,
}

/// Validate a pasted link before it is stored.
///
/// Uses the same patterns as [`super::normalize`], so an accepted link always produces a
/// playable descriptor.
pub fn validate_link(kind: VideoKind, url: &str) -> Result<VideoSource, LinkError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(LinkError::Empty);
    }
    match kind {
        VideoKind::YouTube => youtube_video_id(url)
            .map(|_| VideoSource::YouTube { url: url.to_string() })
            .ok_or(LinkError::InvalidYouTube),
        VideoKind::TikTok => tiktok_video_id(url)
            .map(|_| VideoSource::TikTok { url: url.to_string() })
            .ok_or(LinkError::InvalidTikTok),
        VideoKind::Uploaded => Err(LinkError::UnsupportedKind),
    }
}

/// Title given to a new video when the admin leaves it blank.
///
/// Uploads are named after their file without the last extension, so `clip.mov` becomes
/// `clip` and `final.cut.mp4` becomes `final.cut`. Platform links are named after the platform.
pub fn default_title(kind: VideoKind, file_name: Option<&str>) -> String {
    match kind {
        VideoKind::Uploaded => file_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(file_stem)
            .unwrap_or("Uploaded video")
            .to_string(),
        VideoKind::YouTube => "YouTube video".to_string(),
        VideoKind::TikTok => "TikTok video".to_string(),
    }
}

/// Names without a usable stem (`.mov`, `clip`) are returned as-is.
fn file_stem(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}
