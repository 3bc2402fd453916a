use std::collections::BTreeSet;
use std::fmt;

/// Stable identifier assigned by the remote search API.
pub type ListingId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Internship,
    Contract,
    #[default]
    Unspecified,
}

impl EmploymentType {
    /// Normalizes the loosely formatted labels the remote API emits
    /// (`FULLTIME`, `Full-time`, `INTERN`, `Contractor`, ...).
    pub fn from_label(label: &str) -> Self {
        let normalized: String = label
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "fulltime" => EmploymentType::FullTime,
            "parttime" => EmploymentType::PartTime,
            "intern" | "internship" => EmploymentType::Internship,
            "contract" | "contractor" => EmploymentType::Contract,
            _ => EmploymentType::Unspecified,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full-time",
            EmploymentType::PartTime => "part-time",
            EmploymentType::Internship => "internship",
            EmploymentType::Contract => "contract",
            EmploymentType::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub city: Option<String>,
    pub country: String,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // A listing without a city is presented as remote.
        let city = self.city.as_deref().unwrap_or("Remote");
        if self.country.is_empty() {
            write!(f, "{city}")
        } else {
            write!(f, "{city}, {}", self.country)
        }
    }
}

/// One normalized job posting.
///
/// Identity is `id` alone; every other field is descriptive and may be only
/// partially populated (list results carry less than a details lookup).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub employer_name: String,
    pub location: Location,
    pub employment_type: EmploymentType,
    /// Posting time as Unix seconds.
    pub posted_at: Option<i64>,
    /// Free text, possibly HTML.
    pub description: String,
    pub highlights: Vec<String>,
    pub required_skills: BTreeSet<String>,
    pub apply_link: String,
    pub employer_logo: Option<String>,
}

impl Listing {
    pub fn new(id: impl Into<ListingId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_employer(mut self, employer_name: impl Into<String>) -> Self {
        self.employer_name = employer_name.into();
        self
    }

    pub fn with_posted_at(mut self, posted_at: i64) -> Self {
        self.posted_at = Some(posted_at);
        self
    }
}
