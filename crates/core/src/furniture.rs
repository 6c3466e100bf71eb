//! Furniture lifecycle guards.
//!
//! Furniture is `active` while it carries a beacon and `retired` afterwards.
//! Retirement is one-way; only retired rows may be permanently deleted.

use crate::error::CoreError;
use crate::types::DbId;

/// Longest furniture name accepted.
pub const MAX_NAME_LEN: usize = 200;

/// Longest location label accepted.
pub const MAX_LOCATION_LEN: usize = 255;

/// Trim and check a furniture name.
pub fn validate_name(raw: &str) -> Result<&str, CoreError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Furniture name is required".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Furniture name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name)
}

/// Trim and check a location label.
pub fn validate_location(raw: &str) -> Result<&str, CoreError> {
    let location = raw.trim();
    if location.is_empty() {
        return Err(CoreError::Validation("Location is required".into()));
    }
    if location.chars().count() > MAX_LOCATION_LEN {
        return Err(CoreError::Validation(format!(
            "Location must be at most {MAX_LOCATION_LEN} characters"
        )));
    }
    Ok(location)
}

/// Retiring is only legal while the item is active.
pub fn ensure_retirable(id: DbId, is_active: bool) -> Result<(), CoreError> {
    if is_active {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Furniture {id} is already retired"
        )))
    }
}

/// Permanent deletion is only legal once the item has been retired.
pub fn ensure_deletable(id: DbId, is_active: bool) -> Result<(), CoreError> {
    if is_active {
        Err(CoreError::Validation(format!(
            "Furniture {id} is still active. Retire it before deleting it permanently"
        )))
    } else {
        Ok(())
    }
}

/// Location updates only apply to items still in service.
pub fn ensure_relocatable(id: DbId, is_active: bool) -> Result<(), CoreError> {
    if is_active {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Furniture {id} is retired and cannot be relocated"
        )))
    }
}

/// Whether moving to `next` counts as a new deployment.
pub fn is_new_deployment(previous: Option<&str>, next: &str) -> bool {
    previous != Some(next)
}
