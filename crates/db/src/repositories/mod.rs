//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Single-statement reads take `&PgPool`; steps of a multi-table transition
//! take `&mut PgConnection` so the caller can run them inside one
//! transaction (`&mut *tx`).

pub mod analytics_repo;
pub mod beacon_repo;
pub mod category_repo;
pub mod deployment_repo;
pub mod detector_repo;
pub mod furniture_repo;
pub mod location_history_repo;
pub mod photo_repo;
pub mod user_repo;

pub use analytics_repo::AnalyticsRepo;
pub use beacon_repo::BeaconRepo;
pub use category_repo::CategoryRepo;
pub use deployment_repo::DeploymentRepo;
pub use detector_repo::DetectorRepo;
pub use furniture_repo::FurnitureRepo;
pub use location_history_repo::LocationHistoryRepo;
pub use photo_repo::PhotoRepo;
pub use user_repo::UserRepo;
