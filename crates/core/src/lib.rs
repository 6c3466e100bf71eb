//! Domain rules shared by the database and API crates.
//!
//! Nothing in here touches I/O: the beacon format check, the furniture
//! lifecycle guards and sighting collapsing are pure functions so they can be
//! unit-tested without a database.

pub mod beacon;
pub mod error;
pub mod furniture;
pub mod roles;
pub mod sighting;
pub mod types;
