use scout_core::{sort_listings, Listing, SavedSet, SavedSort};

fn ids(listings: &[Listing]) -> Vec<&str> {
    listings.iter().map(|l| l.id.as_str()).collect()
}

#[test]
fn insert_is_idempotent_by_identifier() {
    let mut set = SavedSet::new();
    assert!(set.insert(Listing::new("A", "X")));
    assert!(!set.insert(Listing::new("A", "changed title")));
    assert_eq!(set.len(), 1);
    assert_eq!(set.as_slice()[0].title, "X");
    assert!(set.contains("A"));
}

#[test]
fn remove_of_absent_identifier_is_a_noop() {
    let mut set = SavedSet::from_listings(vec![Listing::new("A", "X")]);
    assert!(!set.remove("Z"));
    assert_eq!(ids(set.as_slice()), vec!["A"]);
    assert!(set.remove("A"));
    assert!(set.is_empty());
    assert!(!set.contains("A"));
}

#[test]
fn from_listings_keeps_first_occurrence_in_order() {
    let set = SavedSet::from_listings(vec![
        Listing::new("b", "first b"),
        Listing::new("a", "A"),
        Listing::new("b", "second b"),
    ]);
    assert_eq!(ids(set.as_slice()), vec!["b", "a"]);
    assert_eq!(set.as_slice()[0].title, "first b");
}

#[test]
fn sorts_by_date_employer_and_title() {
    let mut listings = vec![
        Listing::new("1", "zeta").with_employer("beta corp").with_posted_at(100),
        Listing::new("2", "Alpha").with_employer("Acme"),
        Listing::new("3", "mid").with_employer("acme").with_posted_at(300),
    ];

    sort_listings(&mut listings, SavedSort::PostedDate);
    assert_eq!(ids(&listings), vec!["3", "1", "2"]);

    sort_listings(&mut listings, SavedSort::Employer);
    // Case-insensitive and stable: "3" stayed ahead of "2".
    assert_eq!(ids(&listings), vec!["3", "2", "1"]);

    sort_listings(&mut listings, SavedSort::Title);
    assert_eq!(ids(&listings), vec!["2", "3", "1"]);
}

#[test]
fn sort_names_parse() {
    assert_eq!("date".parse::<SavedSort>(), Ok(SavedSort::PostedDate));
    assert_eq!("Company".parse::<SavedSort>(), Ok(SavedSort::Employer));
    assert_eq!("title".parse::<SavedSort>(), Ok(SavedSort::Title));
    assert!("salary".parse::<SavedSort>().is_err());
}
