use std::cmp::Ordering;
use std::str::FromStr;

use crate::{FilterParseError, Listing};

/// Display orderings for saved listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavedSort {
    /// Newest first; listings without a posting time go last.
    #[default]
    PostedDate,
    Employer,
    Title,
}

impl FromStr for SavedSort {
    type Err = FilterParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "date" | "posted" => Ok(SavedSort::PostedDate),
            "company" | "employer" => Ok(SavedSort::Employer),
            "title" => Ok(SavedSort::Title),
            _ => Err(FilterParseError {
                filter: "sort",
                value: raw.to_string(),
            }),
        }
    }
}

/// Stable in-place sort of a snapshot.
pub fn sort_listings(listings: &mut [Listing], order: SavedSort) {
    match order {
        SavedSort::PostedDate => listings.sort_by(|a, b| newest_first(a.posted_at, b.posted_at)),
        SavedSort::Employer => {
            listings.sort_by_cached_key(|listing| listing.employer_name.to_lowercase())
        }
        SavedSort::Title => listings.sort_by_cached_key(|listing| listing.title.to_lowercase()),
    }
}

fn newest_first(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
