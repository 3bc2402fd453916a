//! Plain-text rendering of view models and listings.

use std::fmt::Write;

use chrono::DateTime;
use scout_core::{AppViewModel, Listing, ListingRowView};
use scout_engine::{render_description, Converter};

pub fn format_posted(posted_at: Option<i64>) -> String {
    posted_at
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn row_line(row: &ListingRowView, saved: bool) -> String {
    let marker = if saved { '*' } else { ' ' };
    let employer = if row.employer.is_empty() {
        "unknown employer"
    } else {
        row.employer.as_str()
    };
    format!(
        "{marker}{:>3}. {} | {} | {} | {} | {}",
        row.index,
        row.title,
        employer,
        row.location,
        row.employment_type,
        format_posted(row.posted_at)
    )
}

/// Results list plus status lines. `is_saved` marks bookmarked rows.
pub fn render_results(view: &AppViewModel, is_saved: impl Fn(&str) -> bool) -> String {
    let mut out = String::new();
    if let Some(query) = &view.query {
        let _ = writeln!(out, "Results for {:?} (page {})", query, view.page);
    }
    if view.loading {
        let _ = writeln!(out, "Searching...");
    } else if view.listings.is_empty() && view.error.is_none() && view.query.is_some() {
        let _ = writeln!(out, "No listings found.");
    }
    for row in &view.listings {
        let _ = writeln!(out, "{}", row_line(row, is_saved(&row.listing_id)));
    }
    if view.loading_more {
        let _ = writeln!(out, "Loading more...");
    }
    if let Some(error) = &view.error {
        let _ = writeln!(out, "Error: {error}");
        if view.error_retryable {
            let _ = writeln!(out, "Retrying may help.");
        }
    } else if view.exhausted {
        let _ = writeln!(out, "No more results.");
    } else if view.can_load_more {
        let _ = writeln!(out, "More results available.");
    }
    out
}

pub fn render_details(listing: &Listing, converter: &dyn Converter) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", listing.title);
    let _ = writeln!(out, "{} | {}", listing.employer_name, listing.location);
    let _ = writeln!(
        out,
        "{} | posted {}",
        listing.employment_type,
        format_posted(listing.posted_at)
    );
    if !listing.required_skills.is_empty() {
        let skills: Vec<_> = listing.required_skills.iter().map(String::as_str).collect();
        let _ = writeln!(out, "Skills: {}", skills.join(", "));
    }
    let description = render_description(converter, &listing.description);
    if !description.is_empty() {
        let _ = writeln!(out, "\n{description}");
    }
    if !listing.highlights.is_empty() {
        let _ = writeln!(out);
        for highlight in &listing.highlights {
            let _ = writeln!(out, "- {highlight}");
        }
    }
    if !listing.apply_link.is_empty() {
        let _ = writeln!(out, "\nApply: {}", listing.apply_link);
    }
    out
}

pub fn render_saved(listings: &[Listing]) -> String {
    if listings.is_empty() {
        return "No saved jobs.\n".to_string();
    }
    let mut out = String::new();
    for listing in listings {
        let _ = writeln!(
            out,
            "{} | {} | {} | {} | {}",
            listing.id,
            listing.title,
            listing.employer_name,
            listing.location,
            format_posted(listing.posted_at)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::{EmploymentType, Location};
    use scout_engine::Html2MdConverter;

    fn view_with_rows() -> AppViewModel {
        AppViewModel {
            query: Some("rust".to_string()),
            listings: vec![
                ListingRowView {
                    index: 1,
                    listing_id: "a".to_string(),
                    title: "Intern".to_string(),
                    employer: "Acme".to_string(),
                    location: "Pune, IN".to_string(),
                    employment_type: EmploymentType::Internship,
                    posted_at: Some(1_700_000_000),
                },
                ListingRowView {
                    index: 2,
                    listing_id: "b".to_string(),
                    title: "Dev".to_string(),
                    employer: String::new(),
                    location: "Remote".to_string(),
                    employment_type: EmploymentType::Unspecified,
                    posted_at: None,
                },
            ],
            page: 1,
            can_load_more: true,
            ..AppViewModel::default()
        }
    }

    #[test]
    fn posted_dates_are_formatted_in_utc() {
        assert_eq!(format_posted(Some(1_700_000_000)), "2023-11-14");
        assert_eq!(format_posted(None), "-");
    }

    #[test]
    fn results_mark_saved_rows_and_hint_next_step() {
        let text = render_results(&view_with_rows(), |id| id == "a");
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Results for \"rust\" (page 1)");
        assert!(lines[1].starts_with("*  1. Intern | Acme | Pune, IN"));
        assert!(lines[2].starts_with("   2. Dev | unknown employer | Remote"));
        assert_eq!(lines[3], "More results available.");
    }

    #[test]
    fn errors_take_precedence_over_more_hint() {
        let view = AppViewModel {
            error: Some("Too many requests".to_string()),
            error_retryable: true,
            ..view_with_rows()
        };
        let text = render_results(&view, |_| false);
        assert!(text.contains("Error: Too many requests\nRetrying may help.\n"));
        assert!(!text.contains("More results"));

        let rejected = AppViewModel {
            error_retryable: false,
            ..view
        };
        assert!(!render_results(&rejected, |_| false).contains("Retrying"));
    }

    #[test]
    fn details_render_markdown_description() {
        let listing = Listing {
            description: "<p>Ship <b>code</b></p>".to_string(),
            location: Location {
                city: Some("Pune".to_string()),
                country: "IN".to_string(),
            },
            apply_link: "https://apply.example.com".to_string(),
            ..Listing::new("a", "Intern")
        };
        let text = render_details(&listing, &Html2MdConverter);
        assert!(text.starts_with("Intern\n"));
        assert!(text.contains("**code**"), "got {text:?}");
        assert!(text.ends_with("Apply: https://apply.example.com\n"));
    }

    #[test]
    fn empty_saved_list_says_so() {
        assert_eq!(render_saved(&[]), "No saved jobs.\n");
    }
}
