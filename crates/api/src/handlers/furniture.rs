//! Handlers for the `/furniture` resource.
//!
//! Everything except the two retire routes requires authentication.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use furnitrack_core::error::CoreError;
use furnitrack_core::types::DbId;
use furnitrack_db::models::furniture::{
    Furniture, FurnitureDeployment, FurnitureDetail, FurnitureListItem, UpdateLocation,
};
use furnitrack_db::repositories::{DeploymentRepo, FurnitureRepo};

use crate::error::{AppError, AppResult};
use crate::lifecycle::{self, Deletion, Registration, Retirement};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/furniture
///
/// Active items, newest first.
pub async fn list_furniture(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FurnitureListItem>>> {
    Ok(Json(FurnitureRepo::list_active(&state.pool).await?))
}

/// GET /api/furniture/retired
pub async fn list_retired(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FurnitureListItem>>> {
    Ok(Json(FurnitureRepo::list_retired(&state.pool).await?))
}

/// GET /api/furniture/{id}
pub async fn get_furniture(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<FurnitureDetail>> {
    Ok(Json(lifecycle::load_detail(&state.pool, id).await?))
}

/// GET /api/furniture/{id}/deployments
pub async fn list_deployments(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<FurnitureDeployment>>> {
    FurnitureRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Furniture",
            id,
        })?;
    Ok(Json(DeploymentRepo::list_by_furniture(&state.pool, id).await?))
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// POST /api/furniture
///
/// Multipart form with `beaconUUID`, `name`, optional `categoryId` and
/// `description`, and any number of image file fields.
pub async fn create_furniture(
    auth: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<FurnitureDetail>)> {
    let registration = read_registration(multipart).await?;
    let detail =
        lifecycle::register_furniture(&state.pool, state.photo_store.as_ref(), registration)
            .await?;

    tracing::debug!(
        user_id = auth.user_id,
        role = %auth.role,
        furniture_id = detail.item.furniture.id,
        "Furniture registered via API"
    );
    Ok((StatusCode::CREATED, Json(detail)))
}

async fn read_registration(mut multipart: Multipart) -> AppResult<Registration> {
    let mut registration = Registration::default();

    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_some() {
            let data = field.bytes().await?;
            // Browsers send an empty part for an untouched file input.
            if !data.is_empty() {
                registration.images.push(data.to_vec());
            }
            continue;
        }

        let name = field.name().unwrap_or("").to_string();
        let text = field.text().await?;

        match name.as_str() {
            "beaconUUID" | "beaconUuid" => registration.beacon_uuid = text,
            "name" => registration.name = text,
            "description" => registration.description = Some(text),
            "categoryId" => registration.category_id = parse_category_id(&text)?,
            _ => {} // ignore unknown fields
        }
    }

    Ok(registration)
}

fn parse_category_id(raw: &str) -> AppResult<Option<DbId>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("categoryId must be numeric, got '{raw}'")))
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct RetireResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub retirement: Retirement,
}

/// DELETE /api/furniture/{id}
/// POST /api/furniture/retire/{id}
///
/// Retire an active item and free its beacon.
pub async fn retire_furniture(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<RetireResponse>> {
    let retirement = lifecycle::retire_furniture(&state.pool, id).await?;
    Ok(Json(RetireResponse {
        message: "Furniture retired",
        retirement,
    }))
}

/// DELETE /api/furniture/permanent-delete/{id}
///
/// Hard-delete a retired item with its photos, deployments and history.
pub async fn permanently_delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Deletion>> {
    let deletion =
        lifecycle::permanently_delete(&state.pool, state.photo_store.as_ref(), id).await?;
    tracing::info!(
        furniture_id = id,
        user_id = auth.user_id,
        role = %auth.role,
        "Furniture permanently deleted"
    );
    Ok(Json(deletion))
}

/// PUT /api/furniture/{id}/location
pub async fn update_location(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLocation>,
) -> AppResult<Json<Furniture>> {
    Ok(Json(lifecycle::relocate(&state.pool, id, &input.location).await?))
}
