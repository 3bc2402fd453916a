use crate::{DatePosted, JobTypeFilter, LocationType, Query};

pub const FALLBACK_TERM: &str = "internship";
pub const DEFAULT_COUNTRY: &str = "in";

/// Values substituted when a query leaves them unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDefaults {
    pub fallback_term: String,
    pub country: String,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            fallback_term: FALLBACK_TERM.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

/// The exact parameter set sent to the remote search endpoint.
///
/// Optional fields are `None`/`false` when the corresponding filter is
/// unconstrained and are then omitted from the request entirely.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchParams {
    pub query: String,
    pub page: u32,
    pub num_pages: u8,
    pub country: String,
    pub date_posted: Option<&'static str>,
    pub employment_types: Option<&'static str>,
    pub work_from_home: bool,
}

impl SearchParams {
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Request parameters in a stable order, unconstrained filters left out.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("query", self.query.clone()),
            ("page", self.page.to_string()),
            ("num_pages", self.num_pages.to_string()),
            ("country", self.country.clone()),
        ];
        if let Some(date_posted) = self.date_posted {
            pairs.push(("date_posted", date_posted.to_string()));
        }
        if let Some(employment_types) = self.employment_types {
            pairs.push(("employment_types", employment_types.to_string()));
        }
        if self.work_from_home {
            pairs.push(("work_from_home", "true".to_string()));
        }
        pairs
    }
}

/// Maps a user query and page number to remote search parameters.
pub fn translate(query: &Query, page: u32, defaults: &SearchDefaults) -> SearchParams {
    let filters = &query.filters;

    let mut words: Vec<&str> = Vec::with_capacity(3);
    let term = query.term.trim();
    words.push(if term.is_empty() {
        defaults.fallback_term.trim()
    } else {
        term
    });
    if let Some(location) = query.location.as_deref().map(str::trim) {
        if !location.is_empty() {
            words.push(location);
        }
    }
    // The endpoint only knows a remote flag; the other arrangements ride on the term.
    match filters.location_type {
        LocationType::Onsite => words.push("onsite"),
        LocationType::Hybrid => words.push("hybrid"),
        LocationType::Any | LocationType::Remote => {}
    }

    let country = query
        .country
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(&defaults.country)
        .to_ascii_lowercase();

    SearchParams {
        query: words.join(" "),
        page: page.max(1),
        num_pages: filters.page_size.class(),
        country,
        date_posted: date_posted_param(filters.date_posted),
        employment_types: employment_type_param(filters.job_type),
        work_from_home: filters.location_type == LocationType::Remote,
    }
}

fn date_posted_param(date_posted: DatePosted) -> Option<&'static str> {
    match date_posted {
        DatePosted::All => None,
        DatePosted::Today => Some("today"),
        DatePosted::ThreeDays => Some("3days"),
        DatePosted::SevenDays => Some("week"),
        DatePosted::ThirtyDays => Some("month"),
    }
}

fn employment_type_param(job_type: JobTypeFilter) -> Option<&'static str> {
    match job_type {
        JobTypeFilter::Any => None,
        JobTypeFilter::FullTime => Some("FULLTIME"),
        JobTypeFilter::PartTime => Some("PARTTIME"),
        JobTypeFilter::Internship => Some("INTERN"),
        JobTypeFilter::Contract => Some("CONTRACTOR"),
    }
}
