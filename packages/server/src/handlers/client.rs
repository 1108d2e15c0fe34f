use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use common::ordering::{next_display_order, reconcile_move, renumber};
use sea_orm::*;
use tracing::instrument;

use crate::entity::trusted_client;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::extractors::json::AppJson;
use crate::models::client::{
    ClientResponse, CreateClientRequest, UpdateClientRequest, validate_create_client,
    validate_update_client,
};
use crate::models::shared::{ReorderRequest, clean_optional};
use crate::state::AppState;
use crate::utils::ordering::{current_orders, load_locked, lock_collection, persist_positions};

#[utoipa::path(
    get,
    path = "/",
    tag = "Clients",
    operation_id = "listClients",
    summary = "List trusted clients",
    description = "Returns every trusted client in display order.",
    responses(
        (status = 200, description = "Clients in display order", body = Vec<ClientResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_clients(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClientResponse>>, AppError> {
    let clients = trusted_client::Entity::find()
        .order_by_asc(trusted_client::Column::DisplayOrder)
        .order_by_asc(trusted_client::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(clients.into_iter().map(ClientResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Clients",
    operation_id = "createClient",
    summary = "Add a trusted client",
    description = "Appends the client at the end of the showcase.",
    request_body = CreateClientRequest,
    responses(
        (status = 201, description = "Client created", body = ClientResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth, payload), fields(admin_id = auth.admin_id))]
pub async fn create_client(
    auth: AuthAdmin,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateClientRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_client(&payload)?;

    let txn = state.db.begin().await?;
    lock_collection::<trusted_client::Entity, _>(&txn).await?;
    let orders = current_orders::<trusted_client::Entity, _>(
        &txn,
        trusted_client::Column::DisplayOrder,
    )
    .await?;
    let display_order = next_display_order(orders)?;

    let now = Utc::now();
    let model = trusted_client::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        logo_url: Set(clean_optional(payload.logo_url)),
        website_url: Set(clean_optional(payload.website_url)),
        subscriber_count: Set(clean_optional(payload.subscriber_count)),
        display_order: Set(display_order),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(client_id = model.id, display_order, "Client added");

    Ok((StatusCode::CREATED, Json(ClientResponse::from(model))))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Clients",
    operation_id = "updateClient",
    summary = "Edit a trusted client",
    description = "Absent fields are left unchanged, `null` clears optional fields.",
    params(("id" = i32, Path, description = "Client ID")),
    request_body = UpdateClientRequest,
    responses(
        (status = 200, description = "Client updated", body = ClientResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Client not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth, payload), fields(admin_id = auth.admin_id))]
pub async fn update_client(
    auth: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateClientRequest>,
) -> Result<Json<ClientResponse>, AppError> {
    validate_update_client(&payload)?;

    let existing = find_client(&state.db, id).await?;
    let mut active: trusted_client::ActiveModel = existing.into();

    if let Some(name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(logo_url) = payload.logo_url {
        active.logo_url = Set(clean_optional(logo_url));
    }
    if let Some(website_url) = payload.website_url {
        active.website_url = Set(clean_optional(website_url));
    }
    if let Some(subscriber_count) = payload.subscriber_count {
        active.subscriber_count = Set(clean_optional(subscriber_count));
    }
    active.updated_at = Set(Utc::now());

    let updated = active.update(&state.db).await?;
    Ok(Json(ClientResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Clients",
    operation_id = "deleteClient",
    summary = "Delete a trusted client",
    params(("id" = i32, Path, description = "Client ID")),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Client not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth), fields(admin_id = auth.admin_id))]
pub async fn delete_client(
    auth: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let res = trusted_client::Entity::delete_by_id(id)
        .exec(&state.db)
        .await?;

    if res.rows_affected == 0 {
        return Err(AppError::NotFound("Client not found".into()));
    }

    tracing::info!(client_id = id, "Client deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/order",
    tag = "Clients",
    operation_id = "reorderClients",
    summary = "Move a client onto another client's slot",
    description = "Applies a drag-and-drop gesture and renumbers the whole showcase from 0 in \
        a single transaction. Dropping a client onto itself changes nothing.",
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "Showcase in its new order", body = Vec<ClientResponse>),
        (status = 400, description = "Unknown client (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth, payload), fields(admin_id = auth.admin_id, dragged = payload.dragged_id, target = payload.target_id))]
pub async fn reorder_clients(
    auth: AuthAdmin,
    State(state): State<AppState>,
    AppJson(payload): AppJson<ReorderRequest>,
) -> Result<Json<Vec<ClientResponse>>, AppError> {
    let txn = state.db.begin().await?;
    lock_collection::<trusted_client::Entity, _>(&txn).await?;

    let items = load_locked::<trusted_client::Entity, _>(
        &txn,
        trusted_client::Column::DisplayOrder,
        trusted_client::Column::Id,
    )
    .await?;
    let reconciliation = reconcile_move(&items, payload.dragged_id, payload.target_id)?;

    if !reconciliation.is_noop() {
        persist_positions::<trusted_client::Entity, _>(
            &txn,
            trusted_client::Column::Id,
            trusted_client::Column::DisplayOrder,
            &reconciliation.updates,
        )
        .await?;
    }
    txn.commit().await?;

    tracing::info!(updates = reconciliation.updates.len(), "Clients reordered");

    Ok(Json(
        reconciliation
            .sequence
            .into_iter()
            .map(ClientResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/order/renumber",
    tag = "Clients",
    operation_id = "renumberClients",
    summary = "Repair the showcase order",
    description = "Renumbers every client from 0 in its current order.",
    responses(
        (status = 200, description = "Showcase with contiguous positions", body = Vec<ClientResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth), fields(admin_id = auth.admin_id))]
pub async fn renumber_clients(
    auth: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<ClientResponse>>, AppError> {
    let txn = state.db.begin().await?;
    lock_collection::<trusted_client::Entity, _>(&txn).await?;

    let items = load_locked::<trusted_client::Entity, _>(
        &txn,
        trusted_client::Column::DisplayOrder,
        trusted_client::Column::Id,
    )
    .await?;
    let reconciliation = renumber(&items)?;

    persist_positions::<trusted_client::Entity, _>(
        &txn,
        trusted_client::Column::Id,
        trusted_client::Column::DisplayOrder,
        &reconciliation.updates,
    )
    .await?;
    txn.commit().await?;

    Ok(Json(
        reconciliation
            .sequence
            .into_iter()
            .map(ClientResponse::from)
            .collect(),
    ))
}

async fn find_client<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<trusted_client::Model, AppError> {
    trusted_client::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Client not found".into()))
}
