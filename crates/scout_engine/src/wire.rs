//! JSearch response envelope and record decoding.
//!
//! Only `job_id` is required. Descriptive fields are taken as raw JSON and
//! read leniently, so one oddly shaped field never costs the whole listing.

use chrono::DateTime;
use scout_core::{EmploymentType, FailureKind, Listing, Location, SearchError};
use scout_logging::scout_warn;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    data: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct WireListing {
    job_id: String,
    #[serde(default)]
    job_title: Option<Value>,
    #[serde(default)]
    employer_name: Option<Value>,
    #[serde(default)]
    employer_logo: Option<Value>,
    #[serde(default)]
    job_city: Option<Value>,
    #[serde(default)]
    job_country: Option<Value>,
    #[serde(default)]
    job_employment_type: Option<Value>,
    #[serde(default)]
    job_posted_at_timestamp: Option<Value>,
    #[serde(default)]
    job_posted_at_datetime_utc: Option<Value>,
    #[serde(default)]
    job_description: Option<Value>,
    #[serde(default)]
    job_highlights: Option<Value>,
    #[serde(default)]
    job_required_skills: Option<Value>,
    #[serde(default)]
    job_apply_link: Option<Value>,
}

/// Decodes a response body into listings, in response order.
///
/// A body that is not a JSearch envelope with a `data` array is an
/// `InvalidResponse`; records without a string `job_id` are skipped.
pub(crate) fn decode_listings(body: &[u8]) -> Result<Vec<Listing>, SearchError> {
    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|err| SearchError::new(FailureKind::InvalidResponse, err.to_string()))?;

    if envelope
        .status
        .as_deref()
        .is_some_and(|status| status.eq_ignore_ascii_case("error"))
    {
        let detail = envelope
            .error
            .map(|err| err.to_string())
            .unwrap_or_else(|| "status ERROR".to_string());
        return Err(SearchError::new(FailureKind::InvalidResponse, detail));
    }

    let records = envelope.data.ok_or_else(|| {
        SearchError::new(FailureKind::InvalidResponse, "response has no data array")
    })?;

    let listings = records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<WireListing>(record) {
            Ok(wire) => Some(wire.into_listing()),
            Err(err) => {
                scout_warn!("Skipping listing record without an id: {}", err);
                None
            }
        })
        .collect();
    Ok(listings)
}

impl WireListing {
    fn into_listing(self) -> Listing {
        let posted_at = timestamp(self.job_posted_at_timestamp.as_ref()).or_else(|| {
            text(self.job_posted_at_datetime_utc)
                .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
                .map(|dt| dt.timestamp())
        });

        Listing {
            id: self.job_id,
            title: text(self.job_title).unwrap_or_default(),
            employer_name: text(self.employer_name).unwrap_or_default(),
            location: Location {
                city: text(self.job_city).filter(|city| !city.trim().is_empty()),
                country: text(self.job_country).unwrap_or_default(),
            },
            employment_type: text(self.job_employment_type)
                .as_deref()
                .map(EmploymentType::from_label)
                .unwrap_or_default(),
            posted_at,
            description: text(self.job_description).unwrap_or_default(),
            highlights: flatten_highlights(self.job_highlights),
            required_skills: strings(self.job_required_skills).into_iter().collect(),
            apply_link: text(self.job_apply_link).unwrap_or_default(),
            employer_logo: text(self.employer_logo).filter(|logo| !logo.is_empty()),
        }
    }
}

/// A string field; any other shape reads as absent.
pub(crate) fn text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) => Some(text),
        _ => None,
    }
}

/// Seconds since the epoch from an integer, a float or a numeric string.
pub(crate) fn timestamp(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    }
}

/// The string entries of an array (or a lone string); everything else is dropped.
pub(crate) fn strings(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| text(Some(item)))
            .collect(),
        Some(Value::String(item)) => vec![item],
        _ => Vec::new(),
    }
}

/// Sections keep the response's order: `{"Qualifications": ["a"], "Benefits":
/// ["c"]}` becomes `["Qualifications: a", "Benefits: c"]`. A plain array is
/// taken as already flattened.
pub(crate) fn flatten_highlights(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Object(sections)) => sections
            .into_iter()
            .flat_map(|(section, items)| {
                strings(Some(items))
                    .into_iter()
                    .map(move |item| format!("{section}: {item}"))
            })
            .collect(),
        other => strings(other),
    }
}
