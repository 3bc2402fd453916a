use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {filter} value: {value:?}")]
pub struct FilterParseError {
    pub filter: &'static str,
    pub value: String,
}

impl FilterParseError {
    fn new(filter: &'static str, value: &str) -> Self {
        Self {
            filter,
            value: value.to_string(),
        }
    }
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JobTypeFilter {
    #[default]
    Any,
    FullTime,
    PartTime,
    Internship,
    Contract,
}

impl FromStr for JobTypeFilter {
    type Err = FilterParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "" | "any" | "all" => Ok(JobTypeFilter::Any),
            "fulltime" => Ok(JobTypeFilter::FullTime),
            "parttime" => Ok(JobTypeFilter::PartTime),
            "intern" | "internship" => Ok(JobTypeFilter::Internship),
            "contract" | "contractor" => Ok(JobTypeFilter::Contract),
            _ => Err(FilterParseError::new("job type", raw)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DatePosted {
    #[default]
    All,
    Today,
    ThreeDays,
    SevenDays,
    ThirtyDays,
}

impl FromStr for DatePosted {
    type Err = FilterParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "" | "all" | "any" => Ok(DatePosted::All),
            "today" => Ok(DatePosted::Today),
            "3days" => Ok(DatePosted::ThreeDays),
            "7days" | "week" => Ok(DatePosted::SevenDays),
            "30days" | "month" => Ok(DatePosted::ThirtyDays),
            _ => Err(FilterParseError::new("date posted", raw)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LocationType {
    #[default]
    Any,
    Remote,
    Onsite,
    Hybrid,
}

impl FromStr for LocationType {
    type Err = FilterParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "" | "any" | "all" => Ok(LocationType::Any),
            "remote" => Ok(LocationType::Remote),
            "onsite" => Ok(LocationType::Onsite),
            "hybrid" => Ok(LocationType::Hybrid),
            _ => Err(FilterParseError::new("location type", raw)),
        }
    }
}

/// Results-per-request tier, 1..=4 (10, 20, 30 or 40 results).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(u8);

impl PageSize {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    /// Clamps `class` into the supported tiers.
    pub fn new(class: u8) -> Self {
        Self(class.clamp(Self::MIN, Self::MAX))
    }

    pub fn class(&self) -> u8 {
        self.0
    }

    pub fn results(&self) -> usize {
        usize::from(self.0) * 10
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl FromStr for PageSize {
    type Err = FilterParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.trim()
            .parse::<u8>()
            .map(PageSize::new)
            .map_err(|_| FilterParseError::new("page size", raw))
    }
}

/// User-facing filter selections. `Default` means "no constraint" everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Filters {
    pub job_type: JobTypeFilter,
    pub date_posted: DatePosted,
    pub location_type: LocationType,
    pub page_size: PageSize,
}

/// One logical search as the user expressed it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    /// Free text; empty falls back to the configured default term.
    pub term: String,
    /// Appended to the term when present.
    pub location: Option<String>,
    pub filters: Filters,
    /// Overrides the configured default country code.
    pub country: Option<String>,
}

impl Query {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }
}
