use common::ordering::Ordered;
use common::video::{VideoKind, VideoReference, VideoSource};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "video")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: Option<String>,
    pub kind: VideoKind,

    /// File URL for uploads, share URL for platform links.
    #[sea_orm(column_type = "Text")]
    pub source_url: String,

    /// Object storage key of an uploaded file.
    pub object_key: Option<String>,

    pub thumbnail_url: Option<String>,

    #[sea_orm(indexed)]
    pub display_order: i32,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

impl Ordered for Model {
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

impl From<&Model> for VideoReference {
    fn from(m: &Model) -> Self {
        let source = match m.kind {
            VideoKind::Uploaded => VideoSource::Uploaded {
                file_url: m.source_url.clone(),
                object_key: m.object_key.clone(),
            },
            VideoKind::YouTube => VideoSource::YouTube {
                url: m.source_url.clone(),
            },
            VideoKind::TikTok => VideoSource::TikTok {
                url: m.source_url.clone(),
            },
        };
        Self {
            id: m.id,
            title: m.title.clone(),
            source,
            thumbnail_url: m.thumbnail_url.clone(),
            display_order: m.display_order,
        }
    }
}
