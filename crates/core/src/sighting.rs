//! Collapsing of raw detector reports into one sighting per beacon.

use crate::beacon::validate_beacon_uuid;

/// One beacon entry from a detector batch after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sighting {
    pub beacon_uuid: String,
    pub signal_strength: Option<i32>,
}

/// Outcome of [`collapse_sightings`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CollapsedBatch {
    /// Unique well-formed beacons in first-seen order.
    pub sightings: Vec<Sighting>,
    /// Entries dropped because the UUID failed the format check.
    pub skipped: usize,
}

/// Keep one sighting per beacon UUID, dropping malformed entries.
///
/// When a beacon appears more than once the strongest signal wins; a
/// reading with a signal beats one without.
pub fn collapse_sightings<'a, I>(entries: I) -> CollapsedBatch
where
    I: IntoIterator<Item = (&'a str, Option<i32>)>,
{
    let mut batch = CollapsedBatch::default();

    for (raw_uuid, signal) in entries {
        let Ok(uuid) = validate_beacon_uuid(raw_uuid) else {
            batch.skipped += 1;
            continue;
        };

        match batch.sightings.iter_mut().find(|s| s.beacon_uuid == uuid) {
            Some(existing) => {
                if signal > existing.signal_strength {
                    existing.signal_strength = signal;
                }
            }
            None => batch.sightings.push(Sighting {
                beacon_uuid: uuid.to_string(),
                signal_strength: signal,
            }),
        }
    }

    batch
}
