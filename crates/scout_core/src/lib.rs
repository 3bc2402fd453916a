//! Scout core: pure search-session state machine, filter translation and
//! saved-set bookkeeping. No IO lives here.
mod dedupe;
mod effect;
mod error;
mod listing;
mod msg;
mod query;
mod saved;
mod sort;
mod state;
mod translate;
mod update;
mod view_model;

pub use dedupe::dedupe;
pub use effect::Effect;
pub use error::{FailureKind, SearchError};
pub use listing::{EmploymentType, Listing, ListingId, Location};
pub use msg::Msg;
pub use query::{DatePosted, FilterParseError, Filters, JobTypeFilter, LocationType, PageSize, Query};
pub use saved::SavedSet;
pub use sort::{sort_listings, SavedSort};
pub use state::{AppState, Generation, PageRequest};
pub use translate::{translate, SearchDefaults, SearchParams, DEFAULT_COUNTRY, FALLBACK_TERM};
pub use update::update;
pub use view_model::{AppViewModel, ListingRowView};
