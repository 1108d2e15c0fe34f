use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::trusted_client;
use crate::error::AppError;
use crate::models::shared::{double_option, validate_optional_url};

/// A trusted client shown in the landing page showcase.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ClientResponse {
    #[schema(example = 4)]
    pub id: i32,
    #[schema(example = "Gaming Channel")]
    pub name: String,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    #[schema(example = "1.2M")]
    pub subscriber_count: Option<String>,
    #[schema(example = 0)]
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<trusted_client::Model> for ClientResponse {
    fn from(m: trusted_client::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            logo_url: m.logo_url,
            website_url: m.website_url,
            subscriber_count: m.subscriber_count,
            display_order: m.display_order,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Request body for adding a trusted client.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateClientRequest {
    #[schema(example = "Gaming Channel")]
    pub name: String,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    /// Display string, e.g. "1.2M".
    pub subscriber_count: Option<String>,
}

fn validate_name(name: &str) -> Result<(), AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Client name is required".into()));
    }
    if name.chars().count() > 128 {
        return Err(AppError::Validation(
            "Client name must be at most 128 characters".into(),
        ));
    }
    Ok(())
}

fn validate_subscriber_count(value: &str) -> Result<(), AppError> {
    if value.trim().chars().count() > 32 {
        return Err(AppError::Validation(
            "Subscriber count must be at most 32 characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_create_client(payload: &CreateClientRequest) -> Result<(), AppError> {
    validate_name(&payload.name)?;
    validate_links(payload.logo_url.as_deref(), payload.website_url.as_deref())?;
    if let Some(count) = payload.subscriber_count.as_deref() {
        validate_subscriber_count(count)?;
    }
    Ok(())
}

fn validate_links<'a>(logo_url: Option<&'a str>, website_url: Option<&'a str>) -> Result<(), AppError> {
    let non_blank = |v: Option<&'a str>| v.map(str::trim).filter(|v| !v.is_empty());
    validate_optional_url(non_blank(logo_url), "Logo URL")?;
    validate_optional_url(non_blank(website_url), "Website URL")
}

/// Request body for editing a trusted client (PATCH semantics).
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub logo_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub website_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub subscriber_count: Option<Option<String>>,
}

pub fn validate_update_client(payload: &UpdateClientRequest) -> Result<(), AppError> {
    if let Some(name) = &payload.name {
        validate_name(name)?;
    }
    validate_links(
        payload.logo_url.as_ref().and_then(|v| v.as_deref()),
        payload.website_url.as_ref().and_then(|v| v.as_deref()),
    )?;
    if let Some(Some(count)) = &payload.subscriber_count {
        validate_subscriber_count(count)?;
    }
    Ok(())
}
