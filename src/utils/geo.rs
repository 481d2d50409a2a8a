//! Placeholder geolocation.
//!
//! No lookup is performed: the label is picked uniformly at random from a
//! fixed set, independent of the client address.

use rand::seq::IndexedRandom;

pub const PLACEHOLDER_LOCATIONS: [&str; 5] = ["India", "USA", "Germany", "Brazil", "Canada"];

/// Returns a coarse location label for an access record.
pub fn placeholder_location() -> &'static str {
    PLACEHOLDER_LOCATIONS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(PLACEHOLDER_LOCATIONS[0])
}
