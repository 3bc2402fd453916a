use scout_core::{sort_listings, EmploymentType, Listing, Location, SavedSet, SavedSort};
use scout_logging::{scout_error, scout_info, scout_warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::wire::{flatten_highlights, strings, text, timestamp};
use crate::{KeyValueStore, StoreError};

/// Slot holding the saved-jobs list.
pub const SAVED_JOBS_KEY: &str = "savedJobs";

/// Stored form of a listing. Only `id` is required; descriptive fields are
/// read leniently and the aliases accept records stored in the remote API's
/// own field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedListing {
    #[serde(alias = "job_id")]
    id: String,
    #[serde(default, alias = "job_title")]
    title: Option<Value>,
    #[serde(default)]
    employer_name: Option<Value>,
    #[serde(default, alias = "job_city")]
    city: Option<Value>,
    #[serde(default, alias = "job_country")]
    country: Option<Value>,
    #[serde(default, alias = "job_employment_type")]
    employment_type: Option<Value>,
    #[serde(default, alias = "job_posted_at_timestamp")]
    posted_at: Option<Value>,
    #[serde(default, alias = "job_description")]
    description: Option<Value>,
    #[serde(default, alias = "job_highlights")]
    highlights: Option<Value>,
    #[serde(default, alias = "job_required_skills")]
    required_skills: Option<Value>,
    #[serde(default, alias = "job_apply_link")]
    apply_link: Option<Value>,
    #[serde(default)]
    employer_logo: Option<Value>,
}

impl From<&Listing> for PersistedListing {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id.clone(),
            title: Some(Value::from(listing.title.as_str())),
            employer_name: Some(Value::from(listing.employer_name.as_str())),
            city: listing.location.city.as_deref().map(Value::from),
            country: Some(Value::from(listing.location.country.as_str())),
            employment_type: Some(Value::from(listing.employment_type.as_str())),
            posted_at: listing.posted_at.map(Value::from),
            description: Some(Value::from(listing.description.as_str())),
            highlights: Some(Value::from(listing.highlights.clone())),
            required_skills: Some(Value::from(
                listing.required_skills.iter().cloned().collect::<Vec<_>>(),
            )),
            apply_link: Some(Value::from(listing.apply_link.as_str())),
            employer_logo: listing.employer_logo.as_deref().map(Value::from),
        }
    }
}

impl From<PersistedListing> for Listing {
    fn from(stored: PersistedListing) -> Self {
        Listing {
            id: stored.id,
            title: text(stored.title).unwrap_or_default(),
            employer_name: text(stored.employer_name).unwrap_or_default(),
            location: Location {
                city: text(stored.city),
                country: text(stored.country).unwrap_or_default(),
            },
            employment_type: text(stored.employment_type)
                .as_deref()
                .map(EmploymentType::from_label)
                .unwrap_or_default(),
            posted_at: timestamp(stored.posted_at.as_ref()),
            description: text(stored.description).unwrap_or_default(),
            highlights: flatten_highlights(stored.highlights),
            required_skills: strings(stored.required_skills).into_iter().collect(),
            apply_link: text(stored.apply_link).unwrap_or_default(),
            employer_logo: text(stored.employer_logo),
        }
    }
}

/// The user's bookmarked listings, flushed to a durable slot on every change.
///
/// Construct one per process and pass it by reference to whatever needs it.
/// Mutations take `&mut self`, so there is a single writer at a time.
#[derive(Debug)]
pub struct SavedJobsStore<S: KeyValueStore> {
    slot: S,
    key: String,
    saved: SavedSet,
}

impl<S: KeyValueStore> SavedJobsStore<S> {
    /// Loads the saved list from the default slot. Absent or unreadable
    /// content yields an empty store; the failure is logged, not returned.
    pub fn initialize(slot: S) -> Self {
        Self::initialize_with_key(slot, SAVED_JOBS_KEY)
    }

    pub fn initialize_with_key(slot: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let saved = match load(&slot, &key) {
            Ok(listings) => {
                scout_info!("Loaded {} saved jobs from slot {:?}", listings.len(), key);
                SavedSet::from_listings(listings)
            }
            Err(err) => {
                scout_warn!("Discarding saved jobs in slot {:?}: {}", key, err);
                SavedSet::new()
            }
        };
        Self { slot, key, saved }
    }

    /// Adds `listing` unless its identifier is already saved.
    ///
    /// Returns whether the set changed. On a persist failure the in-memory
    /// set is rolled back and the error returned.
    pub fn save(&mut self, listing: Listing) -> Result<bool, StoreError> {
        if self.saved.contains(&listing.id) {
            return Ok(false);
        }
        let previous = self.saved.clone();
        self.saved.insert(listing);
        self.commit(previous)?;
        Ok(true)
    }

    /// Removes the listing with `listing_id` if present and persists the
    /// resulting list either way. Returns whether an entry was removed.
    pub fn unsave(&mut self, listing_id: &str) -> Result<bool, StoreError> {
        let previous = self.saved.clone();
        let removed = self.saved.remove(listing_id);
        self.commit(previous)?;
        Ok(removed)
    }

    pub fn is_saved(&self, listing_id: &str) -> bool {
        self.saved.contains(listing_id)
    }

    /// Snapshot in save order.
    pub fn list(&self) -> Vec<Listing> {
        self.saved.as_slice().to_vec()
    }

    /// Snapshot sorted for display.
    pub fn sorted(&self, order: SavedSort) -> Vec<Listing> {
        let mut listings = self.list();
        sort_listings(&mut listings, order);
        listings
    }

    pub fn len(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    fn commit(&mut self, previous: SavedSet) -> Result<(), StoreError> {
        let result = serde_json::to_string(
            &self
                .saved
                .as_slice()
                .iter()
                .map(PersistedListing::from)
                .collect::<Vec<_>>(),
        )
        .map_err(StoreError::from)
        .and_then(|content| self.slot.set(&self.key, &content));

        if let Err(err) = result {
            scout_error!("Failed to persist saved jobs to slot {:?}: {}", self.key, err);
            self.saved = previous;
            return Err(err);
        }
        Ok(())
    }
}

/// Reads the slot record by record. Only a top level that is not a list
/// counts as corrupt; a record without an id is skipped with a warning.
fn load<S: KeyValueStore>(slot: &S, key: &str) -> Result<Vec<Listing>, StoreError> {
    let Some(content) = slot.get(key)? else {
        return Ok(Vec::new());
    };
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records = match serde_json::from_str::<Value>(&content) {
        Ok(Value::Array(records)) => records,
        Ok(_) => return Err(StoreError::Corrupt("top level is not a list".to_string())),
        Err(err) => return Err(StoreError::Corrupt(err.to_string())),
    };
    let listings = records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<PersistedListing>(record) {
            Ok(stored) => Some(Listing::from(stored)),
            Err(err) => {
                scout_warn!("Skipping saved record in slot {:?}: {}", key, err);
                None
            }
        })
        .collect();
    Ok(listings)
}
