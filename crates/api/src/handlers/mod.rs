pub mod analytics;
pub mod auth;
pub mod beacons;
pub mod categories;
pub mod detectors;
pub mod furniture;
pub mod location;
