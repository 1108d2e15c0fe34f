use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use common::ordering::{next_display_order, reconcile_move, renumber};
use common::storage::{BoxReader, ObjectKey, ObjectStore};
use common::video::{VideoKind, default_title, validate_link};
use sea_orm::sea_query::LockType;
use sea_orm::*;
use tokio::io::AsyncWriteExt;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::video;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::extractors::json::AppJson;
use crate::models::shared::{ReorderRequest, clean_optional, validate_title};
use crate::models::video::{
    CreateVideoLinkRequest, UpdateVideoRequest, UploadVideoForm, VideoResponse,
    validate_create_link, validate_update_video,
};
use crate::state::AppState;
use crate::utils::filename::{upload_object_key, validate_flat_filename};
use crate::utils::ordering::{current_orders, load_locked, lock_collection, persist_positions};

/// Multipart framing on top of the file itself.
const MULTIPART_OVERHEAD: u64 = 1024 * 1024;

pub fn upload_body_limit(max_upload_size: u64) -> DefaultBodyLimit {
    let limit = max_upload_size.saturating_add(MULTIPART_OVERHEAD);
    DefaultBodyLimit::max(usize::try_from(limit).unwrap_or(usize::MAX))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Videos",
    operation_id = "listVideos",
    summary = "List portfolio videos",
    description = "Returns every video in display order, each with its playable descriptor. \
        Videos whose link no longer resolves are still listed with `playable: false`.",
    responses(
        (status = 200, description = "Videos in display order", body = Vec<VideoResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_videos(
    State(state): State<AppState>,
) -> Result<Json<Vec<VideoResponse>>, AppError> {
    let videos = video::Entity::find()
        .order_by_asc(video::Column::DisplayOrder)
        .order_by_asc(video::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(videos.into_iter().map(VideoResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Videos",
    operation_id = "getVideo",
    summary = "Get a video",
    params(("id" = i32, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video", body = VideoResponse),
        (status = 404, description = "Video not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<VideoResponse>, AppError> {
    let video = find_video(&state.db, id).await?;
    Ok(Json(VideoResponse::from(video)))
}

#[utoipa::path(
    post,
    path = "/links",
    tag = "Videos",
    operation_id = "createVideoLink",
    summary = "Add a YouTube or TikTok video",
    description = "Validates the pasted link against the platform's URL patterns and appends \
        the video at the end of the gallery. A blank title defaults to \"YouTube video\" or \
        \"TikTok video\".",
    request_body = CreateVideoLinkRequest,
    responses(
        (status = 201, description = "Video created", body = VideoResponse),
        (status = 400, description = "Invalid link (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth, payload), fields(admin_id = auth.admin_id, kind = %payload.kind))]
pub async fn create_video_link(
    auth: AuthAdmin,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateVideoLinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_link(&payload)?;
    let source = validate_link(payload.kind, &payload.url)?;

    let kind = source.kind();
    let title = clean_optional(payload.title).unwrap_or_else(|| default_title(kind, None));

    let txn = state.db.begin().await?;
    lock_collection::<video::Entity, _>(&txn).await?;
    let orders = current_orders::<video::Entity, _>(&txn, video::Column::DisplayOrder).await?;
    let display_order = next_display_order(orders)?;

    let now = Utc::now();
    let model = video::ActiveModel {
        title: Set(Some(title)),
        kind: Set(kind),
        source_url: Set(source.url().to_string()),
        object_key: Set(None),
        thumbnail_url: Set(clean_optional(payload.thumbnail_url)),
        display_order: Set(display_order),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(video_id = model.id, display_order, "Video link added");

    Ok((StatusCode::CREATED, Json(VideoResponse::from(model))))
}

#[utoipa::path(
    post,
    path = "/upload",
    tag = "Videos",
    operation_id = "uploadVideo",
    summary = "Upload a video file",
    description = "Stores the `file` multipart field in object storage and appends the video \
        at the end of the gallery. Only `video/*` content types are accepted. An optional \
        `title` field overrides the default, which is the file name without its extension.",
    request_body(content = UploadVideoForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Video uploaded", body = VideoResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 502, description = "Storage failure (STORAGE_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth, multipart), fields(admin_id = auth.admin_id))]
pub async fn upload_video(
    auth: AuthAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let store = &*state.store;
    let mut stored: Option<ObjectKey> = None;

    let result = async {
        let mut file_name: Option<String> = None;
        let mut title: Option<String> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
        {
            match field.name() {
                Some("file") if stored.is_none() => {
                    let filename = field
                        .file_name()
                        .ok_or_else(|| AppError::Validation("File field must have a filename".into()))?;
                    let filename = validate_flat_filename(filename)
                        .map_err(|e| AppError::Validation(e.message().into()))?
                        .to_string();
                    video_content_type(field.content_type(), &filename)?;

                    let key = fresh_upload_key(store, &filename).await?;
                    let size = stream_field_to_store(
                        field,
                        store,
                        &key,
                        state.config.storage.max_upload_size,
                    )
                    .await?;
                    tracing::debug!(key = %key, size, "Upload stored");

                    stored = Some(key);
                    file_name = Some(filename);
                }
                Some("title") => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read title: {e}")))?;
                    title = Some(text);
                }
                _ => {} // Ignore unknown fields.
            }
        }

        let (Some(key), Some(filename)) = (stored.as_ref(), file_name) else {
            return Err(AppError::Validation("Missing 'file' field".into()));
        };

        let title = match clean_optional(title) {
            Some(title) => {
                validate_title(&title)?;
                title
            }
            None => default_title(VideoKind::Uploaded, Some(&filename))
                .chars()
                .take(256)
                .collect(),
        };

        let txn = state.db.begin().await?;
        lock_collection::<video::Entity, _>(&txn).await?;
        let orders = current_orders::<video::Entity, _>(&txn, video::Column::DisplayOrder).await?;
        let display_order = next_display_order(orders)?;

        let now = Utc::now();
        let model = video::ActiveModel {
            title: Set(Some(title)),
            kind: Set(VideoKind::Uploaded),
            source_url: Set(store.public_url(key)),
            object_key: Set(Some(key.as_str().to_string())),
            thumbnail_url: Set(None),
            display_order: Set(display_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        Ok(model)
    }
    .await;

    match result {
        Ok(model) => {
            tracing::info!(video_id = model.id, display_order = model.display_order, "Video uploaded");
            Ok((StatusCode::CREATED, Json(VideoResponse::from(model))))
        }
        Err(e) => {
            if let Some(key) = stored {
                discard_object(store, &key).await;
            }
            Err(e)
        }
    }
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Videos",
    operation_id = "updateVideo",
    summary = "Edit a video",
    description = "Updates the title and/or thumbnail override. Absent fields are left \
        unchanged, `null` clears them.",
    params(("id" = i32, Path, description = "Video ID")),
    request_body = UpdateVideoRequest,
    responses(
        (status = 200, description = "Video updated", body = VideoResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Video not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth, payload), fields(admin_id = auth.admin_id))]
pub async fn update_video(
    auth: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateVideoRequest>,
) -> Result<Json<VideoResponse>, AppError> {
    validate_update_video(&payload)?;

    let existing = find_video(&state.db, id).await?;
    let mut active: video::ActiveModel = existing.into();

    if let Some(title) = payload.title {
        active.title = Set(clean_optional(title));
    }
    if let Some(thumbnail_url) = payload.thumbnail_url {
        active.thumbnail_url = Set(clean_optional(thumbnail_url));
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&state.db).await?;
    Ok(Json(VideoResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Videos",
    operation_id = "deleteVideo",
    summary = "Delete a video",
    description = "Deletes the video and then, for uploads, its stored file. A file that \
        cannot be removed is left behind and logged; the video is still deleted.",
    params(("id" = i32, Path, description = "Video ID")),
    responses(
        (status = 204, description = "Video deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Video not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth), fields(admin_id = auth.admin_id))]
pub async fn delete_video(
    auth: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    let existing = video::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".into()))?;

    video::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    tracing::info!(video_id = id, "Video deleted");

    // Only after commit, so a row never outlives its file.
    if let Some(raw_key) = existing.object_key.as_deref() {
        match ObjectKey::parse(raw_key) {
            Ok(key) => match state.store.remove(&key).await {
                Ok(true) => {}
                Ok(false) => {
                    tracing::warn!(video_id = id, key = %key, "Stored file was already missing");
                }
                Err(e) => {
                    tracing::warn!(video_id = id, key = %key, error = %e, "Failed to remove stored file");
                }
            },
            Err(e) => {
                tracing::warn!(video_id = id, error = %e, "Skipping removal of invalid object key");
            }
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/order",
    tag = "Videos",
    operation_id = "reorderVideos",
    summary = "Move a video onto another video's slot",
    description = "Applies a drag-and-drop gesture. The dragged video takes the target's \
        position, the videos in between shift by one, and the whole gallery is renumbered \
        from 0 in a single transaction. Dropping a video onto itself changes nothing.",
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "Gallery in its new order", body = Vec<VideoResponse>),
        (status = 400, description = "Unknown video (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth, payload), fields(admin_id = auth.admin_id, dragged = payload.dragged_id, target = payload.target_id))]
pub async fn reorder_videos(
    auth: AuthAdmin,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ReorderRequest>,
) -> Result<Json<Vec<VideoResponse>>, AppError> {
    let txn = state.db.begin().await?;
    lock_collection::<video::Entity, _>(&txn).await?;

    let items =
        load_locked::<video::Entity, _>(&txn, video::Column::DisplayOrder, video::Column::Id)
            .await?;
    let reconciliation = reconcile_move(&items, payload.dragged_id, payload.target_id)?;

    if !reconciliation.is_noop() {
        persist_positions::<video::Entity, _>(
            &txn,
            video::Column::Id,
            video::Column::DisplayOrder,
            &reconciliation.updates,
        )
        .await?;
    }
    txn.commit().await?;

    tracing::info!(updates = reconciliation.updates.len(), "Videos reordered");

    Ok(Json(
        reconciliation
            .sequence
            .into_iter()
            .map(VideoResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/order/renumber",
    tag = "Videos",
    operation_id = "renumberVideos",
    summary = "Repair the gallery order",
    description = "Renumbers every video from 0 in its current order, removing gaps and \
        duplicate positions.",
    responses(
        (status = 200, description = "Gallery with contiguous positions", body = Vec<VideoResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth), fields(admin_id = auth.admin_id))]
pub async fn renumber_videos(
    auth: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<VideoResponse>>, AppError> {
    let txn = state.db.begin().await?;
    lock_collection::<video::Entity, _>(&txn).await?;

    let items =
        load_locked::<video::Entity, _>(&txn, video::Column::DisplayOrder, video::Column::Id)
            .await?;
    let reconciliation = renumber(&items)?;

    persist_positions::<video::Entity, _>(
        &txn,
        video::Column::Id,
        video::Column::DisplayOrder,
        &reconciliation.updates,
    )
    .await?;
    txn.commit().await?;

    Ok(Json(
        reconciliation
            .sequence
            .into_iter()
            .map(VideoResponse::from)
            .collect(),
    ))
}

async fn find_video<C: ConnectionTrait>(db: &C, id: i32) -> Result<video::Model, AppError> {
    video::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".into()))
}

/// Resolve the content type of an uploaded file and require `video/*`.
///
/// A missing or generic declared type falls back to a guess from the file name.
fn video_content_type(declared: Option<&str>, filename: &str) -> Result<String, AppError> {
    let content_type = match declared {
        Some(ct) if !ct.is_empty() && ct != "application/octet-stream" => ct.to_ascii_lowercase(),
        _ => mime_guess::from_path(filename)
            .first()
            .map(|m| m.to_string())
            .unwrap_or_default(),
    };

    if content_type.starts_with("video/") {
        Ok(content_type)
    } else {
        Err(AppError::Validation(
            "Only video files can be uploaded".into(),
        ))
    }
}

/// Pick an unused `uploads/<millis>.<ext>` key.
async fn fresh_upload_key(store: &dyn ObjectStore, filename: &str) -> Result<ObjectKey, AppError> {
    let mut millis = Utc::now().timestamp_millis();
    loop {
        let key = ObjectKey::parse(&upload_object_key(filename, millis))?;
        if !store.exists(&key).await? {
            return Ok(key);
        }
        millis += 1;
    }
}

/// Stream a multipart field to object storage via a temp file.
async fn stream_field_to_store(
    mut field: axum::extract::multipart::Field<'_>,
    store: &dyn ObjectStore,
    key: &ObjectKey,
    max_size: u64,
) -> Result<u64, AppError> {
    let temp_path = std::env::temp_dir().join(format!("showreel-upload-{}", Uuid::new_v4()));

    let result = async {
        let mut temp_file = tokio::fs::File::create(&temp_path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create temp file: {e}")))?;

        let mut total_size: u64 = 0;

        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
        {
            total_size += chunk.len() as u64;
            if total_size > max_size {
                return Err(AppError::Validation(format!(
                    "File exceeds maximum size of {max_size} bytes"
                )));
            }
            temp_file
                .write_all(&chunk)
                .await
                .map_err(|e| AppError::Internal(format!("Temp file write failed: {e}")))?;
        }

        if total_size == 0 {
            return Err(AppError::Validation("Uploaded file is empty".into()));
        }

        temp_file
            .flush()
            .await
            .map_err(|e| AppError::Internal(format!("Temp file flush failed: {e}")))?;
        drop(temp_file);

        let file = tokio::fs::File::open(&temp_path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to reopen temp file: {e}")))?;
        let reader: BoxReader = Box::new(file);
        Ok(store.put_stream(key, reader).await?)
    }
    .await;

    // Best effort.
    let _ = tokio::fs::remove_file(&temp_path).await;

    result
}

/// Remove an object written by a request that then failed.
async fn discard_object(store: &dyn ObjectStore, key: &ObjectKey) {
    if let Err(e) = store.remove(key).await {
        tracing::warn!(key = %key, error = %e, "Failed to clean up orphaned upload");
    }
}
