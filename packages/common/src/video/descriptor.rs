use serde::Serialize;

use super::patterns::{tiktok_video_id, youtube_video_id};
use super::{VideoKind, VideoReference, VideoSource};

/// Uniform, ready-to-render view of a video, shared by preview cards and the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct PlayableDescriptor {
    /// Image to show before playback. `None` means the client renders the first frame
    /// (uploads) or a branded placeholder (TikTok).
    #[schema(example = "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg")]
    pub thumbnail_source: Option<String>,
    /// Embeddable or directly playable URL. `None` marks the video as unplayable.
    #[schema(example = "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&rel=0")]
    pub embed_source: Option<String>,
    pub platform: VideoKind,
}

impl PlayableDescriptor {
    pub fn is_playable(&self) -> bool {
        self.embed_source.is_some()
    }

    fn unplayable(platform: VideoKind) -> Self {
        Self {
            thumbnail_source: None,
            embed_source: None,
            platform,
        }
    }
}

/// Normalize a video into its playable descriptor.
///
/// Pure function of the source and thumbnail override. A link that no longer matches its
/// platform's pattern yields a descriptor with no sources instead of an error.
pub fn normalize(video: &VideoReference) -> PlayableDescriptor {
    let platform = video.source.kind();
    match &video.source {
        VideoSource::Uploaded { file_url, .. } => PlayableDescriptor {
            thumbnail_source: video.thumbnail_url.clone(),
            embed_source: Some(file_url.clone()),
            platform,
        },
        VideoSource::YouTube { url } => match youtube_video_id(url) {
            Some(id) => PlayableDescriptor {
                thumbnail_source: Some(
                    video
                        .thumbnail_url
                        .clone()
                        .unwrap_or_else(|| youtube_thumbnail_url(id)),
                ),
                embed_source: Some(youtube_embed_url(id)),
                platform,
            },
            None => PlayableDescriptor::unplayable(platform),
        },
        VideoSource::TikTok { url } => match tiktok_video_id(url) {
            Some(id) => PlayableDescriptor {
                thumbnail_source: video.thumbnail_url.clone(),
                embed_source: Some(tiktok_embed_url(id)),
                platform,
            },
            None => PlayableDescriptor::unplayable(platform),
        },
    }
}

fn youtube_thumbnail_url(id: &str) -> String {
    format!("https://img.youtube.com/vi/{id}/maxresdefault.jpg")
}

fn youtube_embed_url(id: &str) -> String {
    format!("https://www.youtube.com/embed/{id}?autoplay=1&rel=0")
}

fn tiktok_embed_url(id: &str) -> String {
    format!("https://www.tiktok.com/embed/v2/{id}")
}
