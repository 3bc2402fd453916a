use crate::{EmploymentType, Listing, ListingId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// Translated query text of the current session.
    pub query: Option<String>,
    pub listings: Vec<ListingRowView>,
    pub page: u32,
    pub loading: bool,
    pub loading_more: bool,
    pub exhausted: bool,
    pub can_load_more: bool,
    /// User-facing explanation of the last failed page request.
    pub error: Option<String>,
    /// Whether repeating the failed request may succeed.
    pub error_retryable: bool,
    pub details: Option<Listing>,
    pub details_error: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRowView {
    /// 1-based position in the accumulated results.
    pub index: usize,
    pub listing_id: ListingId,
    pub title: String,
    pub employer: String,
    pub location: String,
    pub employment_type: EmploymentType,
    pub posted_at: Option<i64>,
}

impl ListingRowView {
    pub(crate) fn from_listing(index: usize, listing: &Listing) -> Self {
        Self {
            index,
            listing_id: listing.id.clone(),
            title: listing.title.clone(),
            employer: listing.employer_name.clone(),
            location: listing.location.to_string(),
            employment_type: listing.employment_type,
            posted_at: listing.posted_at,
        }
    }
}
