use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Trim an optional text field; blank strings become `None`.
pub fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validate a trimmed title (1-256 Unicode characters).
pub fn validate_title(title: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 256 {
        return Err(AppError::Validation(
            "Title must be 1-256 characters".into(),
        ));
    }
    Ok(())
}

/// Validate an optional URL-ish field (at most 2048 characters, http or https).
pub fn validate_optional_url(value: Option<&str>, field: &str) -> Result<(), AppError> {
    let Some(url) = value else {
        return Ok(());
    };
    if url.chars().count() > 2048 {
        return Err(AppError::Validation(format!(
            "{field} must be at most 2048 characters"
        )));
    }
    if !(url.starts_with("http://") || url.starts_with("https://") || url.starts_with('/')) {
        return Err(AppError::Validation(format!(
            "{field} must be an http(s) URL or an absolute path"
        )));
    }
    Ok(())
}

/// A drag-and-drop gesture: drop `dragged_id` onto the slot of `target_id`.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ReorderRequest {
    #[schema(example = 12)]
    pub dragged_id: i32,
    #[schema(example = 4)]
    pub target_id: i32,
}
