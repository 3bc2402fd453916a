use pretty_assertions::assert_eq;
use scout_core::{
    translate, DatePosted, Filters, JobTypeFilter, LocationType, PageSize, Query, SearchDefaults,
};

fn pairs(query: &Query, page: u32) -> Vec<(&'static str, String)> {
    translate(query, page, &SearchDefaults::default()).query_pairs()
}

#[test]
fn default_filters_add_no_constraints() {
    let got = pairs(&Query::new("developer"), 1);
    assert_eq!(
        got,
        vec![
            ("query", "developer".to_string()),
            ("page", "1".to_string()),
            ("num_pages", "1".to_string()),
            ("country", "in".to_string()),
        ]
    );
}

#[test]
fn empty_term_falls_back_and_location_is_appended() {
    let params = translate(
        &Query::new("   ").with_location(" New York "),
        1,
        &SearchDefaults::default(),
    );
    assert_eq!(params.query, "internship New York");

    let defaults = SearchDefaults {
        fallback_term: "developer jobs".to_string(),
        country: "us".to_string(),
    };
    let params = translate(&Query::new("").with_location(""), 3, &defaults);
    assert_eq!(params.query, "developer jobs");
    assert_eq!(params.country, "us");
    assert_eq!(params.page, 3);
}

#[test]
fn every_filter_maps_to_its_remote_parameter() {
    let filters = Filters {
        job_type: JobTypeFilter::Contract,
        date_posted: DatePosted::SevenDays,
        location_type: LocationType::Remote,
        page_size: PageSize::new(3),
    };
    let query = Query::new("rust").with_filters(filters).with_country("DE");
    let got = pairs(&query, 2);
    assert_eq!(
        got,
        vec![
            ("query", "rust".to_string()),
            ("page", "2".to_string()),
            ("num_pages", "3".to_string()),
            ("country", "de".to_string()),
            ("date_posted", "week".to_string()),
            ("employment_types", "CONTRACTOR".to_string()),
            ("work_from_home", "true".to_string()),
        ]
    );
}

#[test]
fn onsite_and_hybrid_ride_on_the_term() {
    let filters = Filters {
        location_type: LocationType::Hybrid,
        ..Filters::default()
    };
    let params = translate(
        &Query::new("nurse").with_location("Leeds").with_filters(filters),
        1,
        &SearchDefaults::default(),
    );
    assert_eq!(params.query, "nurse Leeds hybrid");
    assert!(!params.work_from_home);

    let filters = Filters {
        location_type: LocationType::Onsite,
        ..Filters::default()
    };
    let params = translate(&Query::new("nurse").with_filters(filters), 1, &SearchDefaults::default());
    assert_eq!(params.query, "nurse onsite");
}

#[test]
fn date_and_job_type_vocabulary() {
    let cases = [
        (DatePosted::Today, Some("today")),
        (DatePosted::ThreeDays, Some("3days")),
        (DatePosted::ThirtyDays, Some("month")),
        (DatePosted::All, None),
    ];
    for (date_posted, expected) in cases {
        let filters = Filters {
            date_posted,
            ..Filters::default()
        };
        let params = translate(&Query::new("x").with_filters(filters), 1, &SearchDefaults::default());
        assert_eq!(params.date_posted, expected);
    }

    let cases = [
        (JobTypeFilter::FullTime, Some("FULLTIME")),
        (JobTypeFilter::PartTime, Some("PARTTIME")),
        (JobTypeFilter::Internship, Some("INTERN")),
        (JobTypeFilter::Any, None),
    ];
    for (job_type, expected) in cases {
        let filters = Filters {
            job_type,
            ..Filters::default()
        };
        let params = translate(&Query::new("x").with_filters(filters), 1, &SearchDefaults::default());
        assert_eq!(params.employment_types, expected);
    }
}

#[test]
fn page_zero_is_treated_as_first_page() {
    let params = translate(&Query::new("x"), 0, &SearchDefaults::default());
    assert_eq!(params.page, 1);
    assert_eq!(params.with_page(4).page, 4);
}
