//! Beacon/furniture lifecycle transitions.
//!
//! Every transition that touches more than one row runs in a single
//! transaction and takes row locks before checking state:
//!
//! - registration locks the beacon (`FOR UPDATE`) and re-checks that it is
//!   still free, so two concurrent registrations cannot both claim it;
//! - retirement, deletion and relocation lock the item's beacon and then the
//!   furniture row (see [`lock_item`]).
//!
//! Lock order is always beacon before furniture. Detector ingestion locks the
//! beacon through its upsert and then references the furniture row from the
//! history insert, so any path that took the furniture lock first could
//! deadlock against it.
//!
//! Dropping the transaction on an early `?` return rolls everything back.

use serde::Serialize;
use furnitrack_core::beacon::{validate_beacon_uuid, BeaconState};
use furnitrack_core::error::CoreError;
use furnitrack_core::furniture::{
    ensure_deletable, ensure_relocatable, ensure_retirable, is_new_deployment, validate_location,
    validate_name,
};
use furnitrack_core::types::DbId;
use furnitrack_db::models::beacon::Beacon;
use furnitrack_db::models::furniture::{
    CreateFurniture, Furniture, FurnitureDetail, FurnitureListItem,
};
use furnitrack_db::models::photo::NewPhoto;
use furnitrack_db::repositories::{
    BeaconRepo, CategoryRepo, DeploymentRepo, FurnitureRepo, LocationHistoryRepo, PhotoRepo,
};
use furnitrack_db::DbPool;
use sqlx::PgConnection;

use crate::error::{AppError, AppResult};
use crate::storage::{self, photo_key, sniff_photo, PhotoStore};

// ---------------------------------------------------------------------------
// Beacon validation
// ---------------------------------------------------------------------------

/// Outcome of checking a scanned beacon UUID.
#[derive(Debug)]
pub enum BeaconCheck {
    /// First sighting: the beacon was registered as available.
    Registered(Beacon),
    /// Known and free to be paired.
    Available(Beacon),
    /// Carried by an active item that must be retired first.
    InUse {
        furniture_id: DbId,
        furniture: Option<FurnitureListItem>,
    },
}

/// Check a scanned UUID, registering it on first sight.
///
/// A malformed UUID fails before any row is written.
pub async fn check_beacon(pool: &DbPool, raw_uuid: &str) -> AppResult<BeaconCheck> {
    let uuid = validate_beacon_uuid(raw_uuid)?;
    let (beacon, created) = BeaconRepo::find_or_create(pool, uuid).await?;

    if created {
        tracing::info!(beacon_id = beacon.id, beacon_uuid = %beacon.beacon_uuid, "Registered new beacon");
        return Ok(BeaconCheck::Registered(beacon));
    }

    match beacon.state() {
        BeaconState::Available => Ok(BeaconCheck::Available(beacon)),
        BeaconState::Assigned { furniture_id } => {
            let furniture = FurnitureRepo::find_by_id(pool, furniture_id).await?;
            Ok(BeaconCheck::InUse {
                furniture_id,
                furniture,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Input for [`register_furniture`], already pulled out of the multipart form.
#[derive(Debug, Default)]
pub struct Registration {
    pub beacon_uuid: String,
    pub name: String,
    pub category_id: Option<DbId>,
    pub description: Option<String>,
    /// Raw bytes of each uploaded photo, in form order.
    pub images: Vec<Vec<u8>>,
}

/// Create a furniture item paired with an available beacon.
///
/// Photos are uploaded before the transaction opens; if the transaction
/// fails the uploaded objects are removed again.
pub async fn register_furniture(
    pool: &DbPool,
    store: &dyn PhotoStore,
    input: Registration,
) -> AppResult<FurnitureDetail> {
    let beacon_uuid = validate_beacon_uuid(&input.beacon_uuid)?.to_string();
    let name = validate_name(&input.name)?.to_string();
    let description = input
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    if let Some(category_id) = input.category_id {
        if CategoryRepo::find_by_id(pool, category_id).await?.is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Category {category_id} does not exist"
            ))));
        }
    }

    // Fail fast before spending time on uploads. The locked re-check below
    // is what actually guards the assignment.
    let beacon = BeaconRepo::find_by_uuid(pool, &beacon_uuid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Beacon {beacon_uuid} not found")))?;
    beacon.state().ensure_assignable(&beacon_uuid)?;

    let mut formats = Vec::with_capacity(input.images.len());
    for (index, bytes) in input.images.iter().enumerate() {
        let format = sniff_photo(bytes).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Image {index} is not a supported format (PNG, JPEG or WebP)"
            ))
        })?;
        formats.push(format);
    }

    let mut uploaded: Vec<NewPhoto> = Vec::with_capacity(formats.len());
    for (bytes, format) in input.images.into_iter().zip(formats) {
        let key = photo_key(format);
        if let Err(e) = store.put(&key, format.content_type(), bytes).await {
            discard_uploads(store, &uploaded).await;
            return Err(e.into());
        }
        uploaded.push(NewPhoto {
            photo_url: store.public_url(&key),
            storage_key: key,
        });
    }

    let create = CreateFurniture {
        name,
        category_id: input.category_id,
        description,
        beacon_id: beacon.id,
    };

    match insert_paired(pool, &beacon_uuid, &create, &uploaded).await {
        Ok(furniture_id) => {
            tracing::info!(
                furniture_id,
                beacon_id = beacon.id,
                photos = uploaded.len(),
                "Registered furniture"
            );
            load_detail(pool, furniture_id).await
        }
        Err(e) => {
            discard_uploads(store, &uploaded).await;
            Err(e)
        }
    }
}

/// The transactional half of registration. Returns the new furniture id.
async fn insert_paired(
    pool: &DbPool,
    beacon_uuid: &str,
    create: &CreateFurniture,
    photos: &[NewPhoto],
) -> AppResult<DbId> {
    let mut tx = pool.begin().await?;

    let beacon = BeaconRepo::lock_by_uuid(&mut tx, beacon_uuid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Beacon {beacon_uuid} not found")))?;
    beacon.state().ensure_assignable(beacon_uuid)?;

    let furniture = FurnitureRepo::create(&mut tx, create).await?;
    BeaconRepo::assign(&mut tx, beacon.id, furniture.id).await?;
    for photo in photos {
        PhotoRepo::create(&mut tx, furniture.id, photo).await?;
    }

    tx.commit().await?;
    Ok(furniture.id)
}

async fn discard_uploads(store: &dyn PhotoStore, photos: &[NewPhoto]) {
    let keys: Vec<String> = photos.iter().map(|p| p.storage_key.clone()).collect();
    storage::delete_best_effort(store, &keys).await;
}

/// One item with its photos, or 404.
pub async fn load_detail(pool: &DbPool, id: DbId) -> AppResult<FurnitureDetail> {
    let item = FurnitureRepo::find_by_id(pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Furniture",
            id,
        })?;
    let photos = PhotoRepo::list_by_furniture(pool, id).await?;
    Ok(FurnitureDetail { item, photos })
}

// ---------------------------------------------------------------------------
// Retirement
// ---------------------------------------------------------------------------

/// Result of [`retire_furniture`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Retirement {
    pub furniture: Furniture,
    pub released_beacon_id: Option<DbId>,
}

/// Take an active item out of service and free its beacon.
pub async fn retire_furniture(pool: &DbPool, id: DbId) -> AppResult<Retirement> {
    let mut tx = pool.begin().await?;

    let current = lock_item(&mut tx, id).await?;
    ensure_retirable(id, current.is_active)?;

    let furniture = FurnitureRepo::retire(&mut tx, id).await?;
    let released_beacon_id = BeaconRepo::release_from_furniture(&mut tx, id).await?;

    tx.commit().await?;

    tracing::info!(
        furniture_id = id,
        beacon_id = ?released_beacon_id,
        "Retired furniture"
    );
    Ok(Retirement {
        furniture,
        released_beacon_id,
    })
}

// ---------------------------------------------------------------------------
// Permanent deletion
// ---------------------------------------------------------------------------

/// Rows removed by [`permanently_delete`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deletion {
    pub furniture_id: DbId,
    pub photos_removed: usize,
    pub deployments_removed: u64,
    pub history_removed: u64,
}

/// Hard-delete a retired item and everything recorded against it.
///
/// Photo objects are removed after the commit; failures there only leave
/// orphaned objects behind and are logged.
pub async fn permanently_delete(
    pool: &DbPool,
    store: &dyn PhotoStore,
    id: DbId,
) -> AppResult<Deletion> {
    let mut tx = pool.begin().await?;

    let current = lock_item(&mut tx, id).await?;
    ensure_deletable(id, current.is_active)?;

    let photo_keys = PhotoRepo::delete_by_furniture(&mut tx, id).await?;
    let deployments_removed = DeploymentRepo::delete_by_furniture(&mut tx, id).await?;
    let history_removed = LocationHistoryRepo::delete_by_furniture(&mut tx, id).await?;
    // A retired row should hold no beacon; this guards rows written before
    // the check constraints existed.
    BeaconRepo::release_from_furniture(&mut tx, id).await?;
    FurnitureRepo::delete(&mut tx, id).await?;

    tx.commit().await?;

    storage::delete_best_effort(store, &photo_keys).await;

    tracing::info!(
        furniture_id = id,
        photos = photo_keys.len(),
        deployments = deployments_removed,
        history = history_removed,
        "Permanently deleted furniture"
    );
    Ok(Deletion {
        furniture_id: id,
        photos_removed: photo_keys.len(),
        deployments_removed,
        history_removed,
    })
}

// ---------------------------------------------------------------------------
// Relocation
// ---------------------------------------------------------------------------

/// Record a new last-known location for an active item.
///
/// A location different from the stored one counts as a deployment.
pub async fn relocate(pool: &DbPool, id: DbId, raw_location: &str) -> AppResult<Furniture> {
    let location = validate_location(raw_location)?;

    let mut tx = pool.begin().await?;

    let current = lock_item(&mut tx, id).await?;
    ensure_relocatable(id, current.is_active)?;

    let deployed = is_new_deployment(current.last_location.as_deref(), location);
    let updated = FurnitureRepo::set_location(&mut tx, id, location, deployed).await?;
    if deployed {
        DeploymentRepo::create(&mut tx, id, location).await?;
    }

    tx.commit().await?;

    tracing::info!(
        furniture_id = id,
        location,
        deployed,
        times_deployed = updated.times_deployed,
        "Updated furniture location"
    );
    Ok(updated)
}

// ---------------------------------------------------------------------------
// Locking
// ---------------------------------------------------------------------------

/// Attempts before [`lock_item`] gives up on a pointer that keeps moving.
const LOCK_ATTEMPTS: usize = 3;

/// Lock an item's beacon, then the item itself.
///
/// The beacon pointer is read without a lock, the beacon locked, and the
/// pointer compared again under the furniture lock. It only moves on
/// retirement, so a mismatch settles on the next attempt.
async fn lock_item(conn: &mut PgConnection, id: DbId) -> AppResult<Furniture> {
    for _ in 0..LOCK_ATTEMPTS {
        let beacon_id = FurnitureRepo::current_beacon_id(conn, id)
            .await?
            .ok_or_else(|| furniture_not_found(id))?;
        if let Some(beacon_id) = beacon_id {
            BeaconRepo::lock(conn, beacon_id).await?;
        }

        let furniture = FurnitureRepo::lock(conn, id)
            .await?
            .ok_or_else(|| furniture_not_found(id))?;
        if furniture.current_beacon_id == beacon_id {
            return Ok(furniture);
        }
        tracing::debug!(furniture_id = id, "Beacon pointer moved while locking, retrying");
    }

    Err(CoreError::Conflict(format!("Furniture {id} is being modified concurrently")).into())
}

fn furniture_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Furniture",
        id,
    })
}
