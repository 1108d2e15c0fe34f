use chrono::{DateTime, Utc};
use common::video::{PlayableDescriptor, VideoKind, VideoReference};
use serde::{Deserialize, Serialize};

use crate::entity::video;
use crate::error::AppError;
use crate::models::shared::{double_option, validate_optional_url, validate_title};

/// A video as shown on the landing page and in the dashboard.
#[derive(Serialize, utoipa::ToSchema)]
pub struct VideoResponse {
    #[schema(example = 12)]
    pub id: i32,
    #[schema(example = "Wedding teaser")]
    pub title: Option<String>,
    pub kind: VideoKind,
    /// File URL for uploads, share URL for YouTube and TikTok.
    #[schema(example = "https://youtu.be/dQw4w9WgXcQ")]
    pub source_url: String,
    /// Explicit thumbnail override, if set.
    pub thumbnail_url: Option<String>,
    #[schema(example = 0)]
    pub display_order: i32,
    pub descriptor: PlayableDescriptor,
    /// `false` when the stored link no longer resolves to an embeddable source.
    pub playable: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<video::Model> for VideoResponse {
    fn from(m: video::Model) -> Self {
        let descriptor = VideoReference::from(&m).descriptor();
        Self {
            id: m.id,
            title: m.title,
            kind: m.kind,
            source_url: m.source_url,
            thumbnail_url: m.thumbnail_url,
            display_order: m.display_order,
            playable: descriptor.is_playable(),
            descriptor,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Request body for adding a YouTube or TikTok video by link.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateVideoLinkRequest {
    /// `youtube` or `tiktok`.
    pub kind: VideoKind,
    #[schema(example = "https://www.youtube.com/watch?v=dQw4w9WgXcQ")]
    pub url: String,
    /// Defaults to "YouTube video" / "TikTok video" when blank.
    pub title: Option<String>,
    pub thumbnail_url: Option<String>,
}

pub fn validate_create_link(payload: &CreateVideoLinkRequest) -> Result<(), AppError> {
    if let Some(title) = payload.title.as_deref()
        && !title.trim().is_empty()
    {
        validate_title(title)?;
    }
    validate_optional_url(payload.thumbnail_url.as_deref().map(str::trim), "Thumbnail URL")
}

/// Request body for editing a video (PATCH semantics).
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateVideoRequest {
    /// Absent leaves the title unchanged, `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    /// Absent leaves the override unchanged, `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub thumbnail_url: Option<Option<String>>,
}

pub fn validate_update_video(payload: &UpdateVideoRequest) -> Result<(), AppError> {
    if let Some(Some(title)) = &payload.title {
        validate_title(title)?;
    }
    if let Some(Some(url)) = &payload.thumbnail_url {
        validate_optional_url(Some(url.trim()), "Thumbnail URL")?;
    }
    Ok(())
}

/// Multipart form accepted by the upload endpoint (documentation only).
#[derive(utoipa::ToSchema)]
#[allow(dead_code)]
pub struct UploadVideoForm {
    /// The video file. Only `video/*` content types are accepted.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Defaults to the file name without its extension.
    pub title: Option<String>,
}
