use std::collections::HashSet;

use crate::{Listing, ListingId};

/// Returns the listings of `incoming` whose identifier is not in `existing`,
/// in their original order.
///
/// Repeats inside `incoming` are dropped too (first occurrence wins), so the
/// output never carries an identifier twice and `dedupe` applied to its own
/// output is the identity.
pub fn dedupe(existing: &HashSet<ListingId>, incoming: Vec<Listing>) -> Vec<Listing> {
    let mut seen: HashSet<ListingId> = HashSet::with_capacity(incoming.len());
    incoming
        .into_iter()
        .filter(|listing| !existing.contains(&listing.id) && seen.insert(listing.id.clone()))
        .collect()
}
