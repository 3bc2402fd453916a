use std::collections::HashSet;

use crate::{Listing, ListingId};

/// Insertion-ordered set of listings keyed by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SavedSet {
    entries: Vec<Listing>,
    index: HashSet<ListingId>,
}

impl SavedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from stored entries; later repeats of an identifier are dropped.
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        let mut set = Self::new();
        for listing in listings {
            set.insert(listing);
        }
        set
    }

    /// Appends `listing` unless its identifier is already present.
    /// Returns whether the set changed.
    pub fn insert(&mut self, listing: Listing) -> bool {
        if !self.index.insert(listing.id.clone()) {
            return false;
        }
        self.entries.push(listing);
        true
    }

    /// Removes the entry with `listing_id`. Returns whether one was present.
    pub fn remove(&mut self, listing_id: &str) -> bool {
        if !self.index.remove(listing_id) {
            return false;
        }
        self.entries.retain(|listing| listing.id != listing_id);
        true
    }

    pub fn contains(&self, listing_id: &str) -> bool {
        self.index.contains(listing_id)
    }

    pub fn as_slice(&self) -> &[Listing] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
