use chrono::Utc;
use sea_orm::sea_query::{Index, OnConflict, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::config::AuthConfig;
use crate::entity::{admin, trusted_client, video};
use crate::utils::hash;

/// Create the admin account from configuration if it does not exist yet.
///
/// An existing account is never modified, so changing the configured password
/// after the first start has no effect.
pub async fn seed_admin(db: &DatabaseConnection, auth: &AuthConfig) -> anyhow::Result<()> {
    let (Some(email), Some(password)) = (auth.admin_email.as_deref(), auth.admin_password.as_deref())
    else {
        tracing::warn!("No admin account configured (auth.admin_email / auth.admin_password)");
        return Ok(());
    };

    let email = email.trim().to_lowercase();
    if email.is_empty() || password.is_empty() {
        anyhow::bail!("auth.admin_email and auth.admin_password must not be empty");
    }

    let model = admin::ActiveModel {
        email: Set(email.clone()),
        password: Set(hash::hash_password(password)
            .map_err(|e| anyhow::anyhow!("Password hash error: {e}"))?),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let result = admin::Entity::insert(model)
        .on_conflict(
            OnConflict::column(admin::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(0) | Err(DbErr::RecordNotInserted) => {}
        Ok(_) => info!(email = %email, "Seeded admin account"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Ensure the `(display_order, id)` indexes backing the public list queries exist.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let statements = [
        (
            "idx_video_display_order_id",
            Index::create()
                .if_not_exists()
                .name("idx_video_display_order_id")
                .table(video::Entity)
                .col(video::Column::DisplayOrder)
                .col(video::Column::Id)
                .to_string(PostgresQueryBuilder),
        ),
        (
            "idx_trusted_client_display_order_id",
            Index::create()
                .if_not_exists()
                .name("idx_trusted_client_display_order_id")
                .table(trusted_client::Entity)
                .col(trusted_client::Column::DisplayOrder)
                .col(trusted_client::Column::Id)
                .to_string(PostgresQueryBuilder),
        ),
    ];

    for (name, stmt) in statements {
        match db.execute_unprepared(&stmt).await {
            Ok(_) => info!("Ensured index {} exists", name),
            Err(e) => tracing::warn!("Failed to create index {}: {}", name, e),
        }
    }

    Ok(())
}
