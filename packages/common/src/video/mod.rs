#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;

mod descriptor;
mod link;
mod patterns;

pub use descriptor::{PlayableDescriptor, normalize};
pub use link::{LinkError, default_title, validate_link};
pub use patterns::{tiktok_video_id, youtube_video_id};

use crate::ordering::Ordered;

/// Where a video's playable content comes from.
///
/// When the `sea-orm` feature is enabled, this enum can be stored directly in a SeaORM entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")
)]
#[serde(rename_all = "lowercase")]
pub enum VideoKind {
    /// A file uploaded to object storage and played directly by the browser.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "upload"))]
    #[serde(rename = "upload")]
    Uploaded,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "youtube"))]
    YouTube,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "tiktok"))]
    TikTok,
}

impl VideoKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uploaded => "upload",
            Self::YouTube => "youtube",
            Self::TikTok => "tiktok",
        }
    }
}

impl fmt::Display for VideoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source payload of a video, one shape per kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VideoSource {
    Uploaded {
        /// Public, browser-playable URL of the stored file.
        file_url: String,
        /// Object storage key backing `file_url`, if known.
        object_key: Option<String>,
    },
    YouTube {
        /// Share URL as pasted by the admin.
        url: String,
    },
    TikTok {
        /// Share URL as pasted by the admin.
        url: String,
    },
}

impl VideoSource {
    pub fn kind(&self) -> VideoKind {
        match self {
            Self::Uploaded { .. } => VideoKind::Uploaded,
            Self::YouTube { .. } => VideoKind::YouTube,
            Self::TikTok { .. } => VideoKind::TikTok,
        }
    }

    /// The stored source URL: the file URL for uploads, the share URL otherwise.
    pub fn url(&self) -> &str {
        match self {
            Self::Uploaded { file_url, .. } => file_url,
            Self::YouTube { url } | Self::TikTok { url } => url,
        }
    }

    pub fn object_key(&self) -> Option<&str> {
        match self {
            Self::Uploaded { object_key, .. } => object_key.as_deref(),
            _ => None,
        }
    }
}

/// One piece of playable portfolio content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoReference {
    pub id: i32,
    pub title: Option<String>,
    pub source: VideoSource,
    /// Explicit thumbnail override.
    pub thumbnail_url: Option<String>,
    pub display_order: i32,
}

impl VideoReference {
    pub fn descriptor(&self) -> PlayableDescriptor {
        normalize(self)
    }
}

impl Ordered for VideoReference {
    fn id(&self) -> i32 {
        self.id
    }

    fn display_order(&self) -> i32 {
        self.display_order
    }

    fn set_display_order(&mut self, order: i32) {
        self.display_order = order;
    }
}
