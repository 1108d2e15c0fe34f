use common::ordering::Ordered;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trusted_client")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    /// Free-form display string such as "1.2M", never parsed.
    pub subscriber_count: Option<String>,

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
