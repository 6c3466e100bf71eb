//! HTTP-level integration tests for the furniture lifecycle:
//! registration, retirement, permanent deletion and location updates.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use chrono::Utc;
use common::{
    body_json, delete, delete_auth, get, get_auth, post, post_json, put_json_auth,
    MemoryPhotoStore, Part, PNG_BYTES,
};
use furnitrack_api::lifecycle;
use furnitrack_db::models::detector::UpsertDetector;
use furnitrack_db::models::location::CreateLocationHistory;
use furnitrack_db::repositories::{BeaconRepo, DetectorRepo, LocationHistoryRepo};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn register(
    app: Router,
    token: &str,
    beacon_uuid: &str,
    name: &str,
) -> axum::response::Response {
    common::post_multipart_auth(
        app,
        "/api/furniture",
        token,
        &[Part::Text("beaconUUID", beacon_uuid), Part::Text("name", name)],
    )
    .await
}

async fn register_ok(app: Router, token: &str, beacon_uuid: &str, name: &str) -> i64 {
    get(app.clone(), &format!("/api/beacons/validate/{beacon_uuid}")).await;
    let response = register(app, token, beacon_uuid, name).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    let row: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap();
    row.0
}

/// Both pointers must agree for every active item and every assigned beacon.
async fn assert_pointers_consistent(pool: &PgPool) {
    let mismatched: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM furniture f \
         FULL OUTER JOIN beacons b ON b.current_furniture_id = f.id \
         WHERE (f.is_active AND (b.id IS NULL OR f.current_beacon_id IS DISTINCT FROM b.id)) \
            OR (b.current_furniture_id IS NOT NULL AND (f.id IS NULL OR NOT f.is_active))",
    )
    .fetch_one(pool)
    .await
    .unwrap();
    assert_eq!(mismatched.0, 0, "beacon and furniture pointers disagree");
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn beacon_is_reusable_only_after_retirement(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let chair_a = register_ok(app.clone(), &token, "PNCLDGS-001", "Chair A").await;

    let rejected = register(app.clone(), &token, "PNCLDGS-001", "Chair B").await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
    let json = body_json(rejected).await;
    assert_eq!(json["needsRetirement"], true);
    assert_eq!(json["furnitureId"], chair_a);
    assert_eq!(count(&pool, "furniture").await, 1);

    let retired = delete(app.clone(), &format!("/api/furniture/{chair_a}")).await;
    assert_eq!(retired.status(), StatusCode::OK);

    let chair_b = register(app.clone(), &token, "PNCLDGS-001", "Chair B").await;
    assert_eq!(chair_b.status(), StatusCode::CREATED);
    let chair_b = body_json(chair_b).await;

    let retired_list = body_json(get_auth(app, "/api/furniture/retired", &token).await).await;
    assert_eq!(retired_list[0]["id"], chair_a);
    assert_eq!(retired_list[0]["beacon_uuid"], "PNCLDGS-001");
    assert!(retired_list[0]["current_beacon_id"].is_null());

    let beacon: (Option<i64>,) = sqlx::query_as(
        "SELECT current_furniture_id FROM beacons WHERE beacon_uuid = 'PNCLDGS-001'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(Some(beacon.0.unwrap()), chair_b["id"].as_i64());
    assert_pointers_consistent(&pool).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn registration_stores_photos_and_category(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let store = Arc::new(MemoryPhotoStore::default());
    let app = common::build_test_app_with_store(pool.clone(), store.clone());

    let category = post_json(app.clone(), "/api/furniture/categories", json!({ "name": "Seating" })).await;
    let category_id = body_json(category).await["id"].as_i64().unwrap().to_string();
    get(app.clone(), "/api/beacons/validate/PNCLDGS-007").await;

    let response = common::post_multipart_auth(
        app.clone(),
        "/api/furniture",
        &token,
        &[
            Part::Text("beaconUUID", "PNCLDGS-007"),
            Part::Text("name", "  Lounge chair "),
            Part::Text("categoryId", &category_id),
            Part::Text("description", "Green velvet"),
            Part::File("image0", "front.png", PNG_BYTES),
            Part::File("image1", "back.png", PNG_BYTES),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;

    assert_eq!(json["name"], "Lounge chair");
    assert_eq!(json["category"], "Seating");
    assert_eq!(json["description"], "Green velvet");
    assert_eq!(json["beacon_uuid"], "PNCLDGS-007");
    assert_eq!(json["is_active"], true);
    let photos = json["photos"].as_array().unwrap();
    assert_eq!(photos.len(), 2);
    assert!(photos[0]["photo_url"]
        .as_str()
        .unwrap()
        .starts_with("https://photos.test/furniture/"));
    assert!(photos[0].get("storage_key").is_none());
    assert_eq!(store.keys().len(), 2);

    let id = json["id"].as_i64().unwrap();
    let detail = body_json(get_auth(app, &format!("/api/furniture/{id}"), &token).await).await;
    assert_eq!(detail["photos"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unsupported_image_is_rejected_before_upload(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let store = Arc::new(MemoryPhotoStore::default());
    let app = common::build_test_app_with_store(pool.clone(), store.clone());
    get(app.clone(), "/api/beacons/validate/PNCLDGS-001").await;

    let response = common::post_multipart_auth(
        app,
        "/api/furniture",
        &token,
        &[
            Part::Text("beaconUUID", "PNCLDGS-001"),
            Part::Text("name", "Desk"),
            Part::File("image0", "notes.pdf", b"%PDF-1.7 not a photo"),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.keys().is_empty());
    assert_eq!(count(&pool, "furniture").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_upload_leaves_no_rows(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let store = Arc::new(MemoryPhotoStore::failing());
    let app = common::build_test_app_with_store(pool.clone(), store);
    get(app.clone(), "/api/beacons/validate/PNCLDGS-001").await;

    let response = common::post_multipart_auth(
        app,
        "/api/furniture",
        &token,
        &[
            Part::Text("beaconUUID", "PNCLDGS-001"),
            Part::Text("name", "Desk"),
            Part::File("image0", "desk.png", PNG_BYTES),
        ],
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(count(&pool, "furniture").await, 0);
    assert_eq!(count(&pool, "furniture_photos").await, 0);
    assert_pointers_consistent(&pool).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_beacon_or_category_is_rejected(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let unknown_beacon = register(app.clone(), &token, "PNCLDGS-404", "Desk").await;
    assert_eq!(unknown_beacon.status(), StatusCode::NOT_FOUND);

    get(app.clone(), "/api/beacons/validate/PNCLDGS-001").await;
    let unknown_category = common::post_multipart_auth(
        app.clone(),
        "/api/furniture",
        &token,
        &[
            Part::Text("beaconUUID", "PNCLDGS-001"),
            Part::Text("name", "Desk"),
            Part::Text("categoryId", "999"),
        ],
    )
    .await;
    assert_eq!(unknown_category.status(), StatusCode::BAD_REQUEST);

    let bad_category = common::post_multipart_auth(
        app,
        "/api/furniture",
        &token,
        &[
            Part::Text("beaconUUID", "PNCLDGS-001"),
            Part::Text("name", "Desk"),
            Part::Text("categoryId", "desks"),
        ],
    )
    .await;
    assert_eq!(bad_category.status(), StatusCode::BAD_REQUEST);

    assert_eq!(count(&pool, "furniture").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_name_is_a_validation_error(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);
    get(app.clone(), "/api/beacons/validate/PNCLDGS-001").await;

    let response = register(app, &token, "PNCLDGS-001", "   ").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Retirement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn retire_via_post_frees_beacon(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool.clone());
    let id = register_ok(app.clone(), &token, "PNCLDGS-001", "Table").await;

    let response = post(app.clone(), &format!("/api/furniture/retire/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["furniture"]["is_active"], false);
    assert!(json["furniture"]["retired_date"].is_string());
    assert!(json["releasedBeaconId"].is_number());

    let again = post(app.clone(), &format!("/api/furniture/retire/{id}")).await;
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);

    let validate = body_json(get(app, "/api/beacons/validate/PNCLDGS-001").await).await;
    assert_eq!(validate["inUse"], false);
    assert_pointers_consistent(&pool).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn retire_unknown_id_is_404_without_writes(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool.clone());
    register_ok(app.clone(), &token, "PNCLDGS-001", "Table").await;

    let response = delete(app, "/api/furniture/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let active: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM furniture WHERE is_active")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(active.0, 1);
    assert_pointers_consistent(&pool).await;
}

// ---------------------------------------------------------------------------
// Permanent deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn active_furniture_cannot_be_deleted(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool.clone());
    let id = register_ok(app.clone(), &token, "PNCLDGS-001", "Table").await;

    let response = delete_auth(app, &format!("/api/furniture/permanent-delete/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(count(&pool, "furniture").await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn permanent_delete_removes_everything_recorded(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let store = Arc::new(MemoryPhotoStore::default());
    let app = common::build_test_app_with_store(pool.clone(), store.clone());
    get(app.clone(), "/api/beacons/validate/PNCLDGS-001").await;

    let created = common::post_multipart_auth(
        app.clone(),
        "/api/furniture",
        &token,
        &[
            Part::Text("beaconUUID", "PNCLDGS-001"),
            Part::Text("name", "Sofa"),
            Part::File("image0", "sofa.png", PNG_BYTES),
        ],
    )
    .await;
    let id = body_json(created).await["id"].as_i64().unwrap();

    put_json_auth(
        app.clone(),
        &format!("/api/furniture/{id}/location"),
        &token,
        json!({ "location": "Lobby" }),
    )
    .await;
    common::post_json_auth(
        app.clone(),
        "/api/location_history/batch",
        &token,
        json!({ "detectorUuid": "DET-1", "beacons": [{ "beaconUuid": "PNCLDGS-001" }] }),
    )
    .await;
    assert_eq!(count(&pool, "location_history").await, 1);

    delete(app.clone(), &format!("/api/furniture/{id}")).await;

    let response =
        delete_auth(app.clone(), &format!("/api/furniture/permanent-delete/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = body_json(response).await;
    assert_eq!(json["photosRemoved"], 1);
    assert_eq!(json["deploymentsRemoved"], 1);
    assert_eq!(json["historyRemoved"], 1);

    assert_eq!(count(&pool, "furniture").await, 0);
    assert_eq!(count(&pool, "furniture_photos").await, 0);
    assert_eq!(count(&pool, "furniture_deployments").await, 0);
    assert_eq!(count(&pool, "location_history").await, 0);
    assert!(store.keys().is_empty());
    // The beacon itself survives and is free again.
    assert_eq!(count(&pool, "beacons").await, 1);

    let gone = delete_auth(app, &format!("/api/furniture/permanent-delete/{id}"), &token).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Location updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn changing_location_counts_deployments(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool.clone());
    let id = register_ok(app.clone(), &token, "PNCLDGS-001", "Lectern").await;
    let uri = format!("/api/furniture/{id}/location");

    let moves = [("Hall A", 1), ("  Hall A  ", 1), ("Hall B", 2)];
    for (location, expected) in moves {
        let response =
            put_json_auth(app.clone(), &uri, &token, json!({ "location": location })).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["times_deployed"], expected);
        assert_eq!(json["last_location"], location.trim());
    }

    let deployments = body_json(
        get_auth(app, &format!("/api/furniture/{id}/deployments"), &token).await,
    )
    .await;
    let deployments = deployments.as_array().unwrap();
    assert_eq!(deployments.len(), 2);
    assert_eq!(deployments[0]["location"], "Hall B");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn location_update_rejects_blank_retired_and_unknown(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);
    let id = register_ok(app.clone(), &token, "PNCLDGS-001", "Lectern").await;
    let uri = format!("/api/furniture/{id}/location");

    let blank = put_json_auth(app.clone(), &uri, &token, json!({ "location": "   " })).await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);

    let unknown = put_json_auth(
        app.clone(),
        "/api/furniture/9999/location",
        &token,
        json!({ "location": "Hall A" }),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    delete(app.clone(), &format!("/api/furniture/{id}")).await;
    let retired = put_json_auth(app, &uri, &token, json!({ "location": "Hall A" })).await;
    assert_eq!(retired.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Auth enforcement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn protected_routes_require_a_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    for uri in ["/api/furniture", "/api/furniture/retired", "/api/furniture/1"] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "GET {uri}");
    }

    let response = delete(app.clone(), "/api/furniture/permanent-delete/1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(
        app,
        "/api/location_history/batch",
        json!({ "detectorUuid": "DET-1", "beacons": [] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lists_split_active_and_retired(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool);
    let first = register_ok(app.clone(), &token, "PNCLDGS-001", "Stool").await;
    register_ok(app.clone(), &token, "PNCLDGS-002", "Bench").await;
    delete(app.clone(), &format!("/api/furniture/{first}")).await;

    let active = body_json(get_auth(app.clone(), "/api/furniture", &token).await).await;
    let active = active.as_array().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["name"], "Bench");
    assert_eq!(active[0]["beacon_uuid"], "PNCLDGS-002");

    let retired = body_json(get_auth(app, "/api/furniture/retired", &token).await).await;
    assert_eq!(retired.as_array().unwrap().len(), 1);
    assert_eq!(retired[0]["name"], "Stool");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn oversized_registration_is_rejected_before_any_write(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let store = Arc::new(MemoryPhotoStore::default());
    let mut config = common::test_config();
    config.max_upload_bytes = 1024;
    let app = common::build_test_app_with(pool.clone(), store.clone(), config);

    get(app.clone(), "/api/beacons/validate/PNCLDGS-077").await;
    let photo = vec![0u8; 4096];
    let response = common::post_multipart_auth(
        app.clone(),
        "/api/furniture",
        &token,
        &[
            Part::Text("beaconUUID", "PNCLDGS-077"),
            Part::Text("name", "Heavy Desk"),
            Part::File("images", "desk.png", &photo),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["code"], "PAYLOAD_TOO_LARGE");
    assert_eq!(count(&pool, "furniture").await, 0);
    assert!(store.keys().is_empty());

    // Only registration bodies are capped; this one fails validation instead.
    let long_name = "x".repeat(2048);
    let category = post_json(app, "/api/furniture/categories", json!({ "name": long_name })).await;
    assert_eq!(category.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn categories_are_unique_and_sorted(pool: PgPool) {
    let app = common::build_test_app(pool);

    for name in ["Tables", "Chairs"] {
        let response = post_json(app.clone(), "/api/furniture/categories", json!({ "name": name })).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    let dup = post_json(app.clone(), "/api/furniture/categories", json!({ "name": "Chairs" })).await;
    assert_eq!(dup.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(dup).await["message"], "Category 'Chairs' already exists");
    let blank = post_json(app.clone(), "/api/furniture/categories", json!({ "name": "  " })).await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);

    let list = body_json(get(app, "/api/furniture/categories").await).await;
    let names: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Chairs", "Tables"]);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_registrations_claim_a_beacon_once(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool.clone());
    get(app.clone(), "/api/beacons/validate/PNCLDGS-001").await;

    let (first, second) = tokio::join!(
        register(app.clone(), &token, "PNCLDGS-001", "Chair A"),
        register(app.clone(), &token, "PNCLDGS-001", "Chair B"),
    );

    let mut statuses = [first.status(), second.status()];
    statuses.sort_by_key(|s| s.as_u16());
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::BAD_REQUEST]);

    let rejected = if first.status() == StatusCode::BAD_REQUEST {
        first
    } else {
        second
    };
    assert_eq!(body_json(rejected).await["needsRetirement"], true);

    assert_eq!(count(&pool, "furniture").await, 1);
    assert_pointers_consistent(&pool).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn retirement_waits_behind_an_open_batch(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool.clone());
    let id = register_ok(app, &token, "PNCLDGS-001", "Chair A").await;

    // Same statements as a detector batch, stopped before the history row.
    let mut batch = pool.begin().await.unwrap();
    let detector = DetectorRepo::upsert(
        &mut batch,
        &UpsertDetector {
            detector_uuid: "DET-1",
            name: None,
            location_type: None,
            latitude: None,
            longitude: None,
            reported_at: Utc::now(),
        },
    )
    .await
    .unwrap();
    let beacon = BeaconRepo::upsert_sighting(&mut batch, "PNCLDGS-001", detector.id, Utc::now())
        .await
        .unwrap();
    assert_eq!(beacon.current_furniture_id, Some(id));

    let retire = tokio::spawn({
        let pool = pool.clone();
        async move { lifecycle::retire_furniture(&pool, id).await }
    });
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!retire.is_finished(), "retirement must queue on the beacon lock");

    // The history insert references the furniture row; it must not wait on
    // the queued retirement.
    LocationHistoryRepo::create(
        &mut batch,
        &CreateLocationHistory {
            beacon_id: beacon.id,
            detector_id: detector.id,
            furniture_id: beacon.current_furniture_id,
            recorded_at: Utc::now(),
            signal_strength: Some(-60),
        },
    )
    .await
    .unwrap();
    batch.commit().await.unwrap();

    let retirement = retire.await.unwrap().unwrap();
    assert_eq!(retirement.released_beacon_id, Some(beacon.id));

    let history: (Option<i64>,) = sqlx::query_as("SELECT furniture_id FROM location_history")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(history.0, Some(id));
    assert_pointers_consistent(&pool).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn retire_and_batch_requests_both_succeed(pool: PgPool) {
    let token = common::staff_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    for n in 1..=5 {
        let uuid = format!("PNCLDGS-10{n}");
        let id = register_ok(app.clone(), &token, &uuid, "Chair").await;

        let path = format!("/api/furniture/{id}");
        let (retired, batch) = tokio::join!(
            delete(app.clone(), &path),
            common::post_json_auth(
                app.clone(),
                "/api/location_history/batch",
                &token,
                json!({ "detectorUuid": "DET-1", "beacons": [{ "beaconUuid": uuid }] }),
            ),
        );
        assert_eq!(retired.status(), StatusCode::OK);
        assert_eq!(batch.status(), StatusCode::CREATED);
    }

    assert_eq!(count(&pool, "location_history").await, 5);
    assert_pointers_consistent(&pool).await;
}
