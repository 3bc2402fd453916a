use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};

use pretty_assertions::assert_eq;
use scout_core::{EmploymentType, Listing, Location, SavedSort};
use scout_engine::{
    FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, SavedJobsStore, StoreError,
    SAVED_JOBS_KEY,
};
use tempfile::TempDir;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scout_logging::initialize_for_tests);
}

fn ids(listings: &[Listing]) -> Vec<&str> {
    listings.iter().map(|l| l.id.as_str()).collect()
}

/// Slot that can be switched to fail every write.
#[derive(Default)]
struct FlakySlot {
    inner: MemoryKeyValueStore,
    failing: AtomicBool,
}

impl KeyValueStore for FlakySlot {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::other("disk full")));
        }
        self.inner.set(key, value)
    }
}

#[test]
fn save_then_is_saved_and_unsave_then_not() {
    init_logging();
    let mut store = SavedJobsStore::initialize(MemoryKeyValueStore::new());
    assert!(store.is_empty());

    assert!(store.save(Listing::new("A", "X")).unwrap());
    assert!(store.is_saved("A"));

    assert!(store.unsave("A").unwrap());
    assert!(!store.is_saved("A"));
    assert!(store.list().is_empty());
}

#[test]
fn saving_twice_keeps_one_entry() {
    init_logging();
    let slot = Arc::new(MemoryKeyValueStore::new());
    let mut store = SavedJobsStore::initialize(slot.clone());
    assert!(store.save(Listing::new("A", "X")).unwrap());
    assert!(!store.save(Listing::new("A", "X again")).unwrap());

    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].title, "X");

    let reloaded = SavedJobsStore::initialize(slot);
    assert_eq!(ids(&reloaded.list()), vec!["A"]);
}

#[test]
fn unsave_of_unknown_id_is_harmless() {
    init_logging();
    let slot = Arc::new(MemoryKeyValueStore::new());
    let mut store = SavedJobsStore::initialize(slot.clone());
    store.save(Listing::new("A", "X")).unwrap();

    assert!(!store.unsave("Z").unwrap());
    assert_eq!(ids(&store.list()), vec!["A"]);
    // The list is written even when nothing was removed.
    assert!(slot.get(SAVED_JOBS_KEY).unwrap().is_some());
}

#[test]
fn saved_jobs_survive_a_restart_on_disk() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let listing = Listing {
        id: "A".to_string(),
        title: "X".to_string(),
        employer_name: "Acme".to_string(),
        location: Location {
            city: Some("Pune".to_string()),
            country: "IN".to_string(),
        },
        employment_type: EmploymentType::PartTime,
        posted_at: Some(42),
        description: "<b>hi</b>".to_string(),
        highlights: vec!["Benefits: lunch".to_string()],
        required_skills: ["rust".to_string()].into_iter().collect(),
        apply_link: "https://apply.example.com".to_string(),
        employer_logo: Some("https://logo.example.com".to_string()),
    };

    {
        let mut store = SavedJobsStore::initialize(FileKeyValueStore::new(temp.path()));
        store.save(listing.clone()).unwrap();
        store.save(Listing::new("B", "Y")).unwrap();
        store.unsave("B").unwrap();
    }

    let restarted = SavedJobsStore::initialize(FileKeyValueStore::new(temp.path()));
    assert_eq!(restarted.list(), vec![listing]);
}

#[test]
fn missing_data_dir_starts_empty_and_is_created_on_first_save() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("nested").join("data");
    let mut store = SavedJobsStore::initialize(FileKeyValueStore::new(&dir));
    assert!(store.is_empty());

    store.save(Listing::new("A", "X")).unwrap();
    assert!(dir.join("savedJobs.json").is_file());
}

#[test]
fn corrupt_slot_recovers_to_empty() {
    init_logging();
    for content in ["{not json", "{\"id\": \"A\"}", "[{\"title\": \"no id\"}]"] {
        let slot = MemoryKeyValueStore::with_slot(SAVED_JOBS_KEY, content);
        let mut store = SavedJobsStore::initialize(slot);
        assert!(store.is_empty(), "content {content:?}");

        // The store is fully usable afterwards.
        store.save(Listing::new("A", "X")).unwrap();
        assert!(store.is_saved("A"));
    }
}

#[test]
fn corrupt_file_on_disk_recovers_to_empty() {
    init_logging();
    let temp = TempDir::new().unwrap();
    let slot = FileKeyValueStore::new(temp.path());
    fs::write(slot.path_for(SAVED_JOBS_KEY), b"\x00\x01garbage").unwrap();

    let store = SavedJobsStore::initialize(slot);
    assert!(store.is_empty());
}

#[test]
fn records_in_remote_field_names_are_accepted() {
    init_logging();
    let content = r#"[
        {"job_id": "r1", "job_title": "Intern", "employer_name": "Acme",
         "job_city": null, "job_country": "US", "job_employment_type": "INTERN",
         "job_apply_link": "https://x", "job_required_skills": null, "employer_logo": null},
        {"job_id": "r1", "job_title": "Duplicate"}
    ]"#;
    let store = SavedJobsStore::initialize(MemoryKeyValueStore::with_slot(SAVED_JOBS_KEY, content));

    let listings = store.list();
    assert_eq!(ids(&listings), vec!["r1"]);
    assert_eq!(listings[0].title, "Intern");
    assert_eq!(listings[0].employment_type, EmploymentType::Internship);
    assert_eq!(listings[0].location.to_string(), "Remote, US");
}

#[test]
fn one_odd_record_does_not_cost_the_other_bookmarks() {
    init_logging();
    let content = r#"[
        {"id": "A", "title": "Kept"},
        {"job_id": "B", "job_required_skills": ["rust", null], "job_highlights": ["Stipend"]},
        {"title": "no id"},
        {"id": "C", "posted_at": "soon", "required_skills": {"rust": true}}
    ]"#;
    let slot = Arc::new(MemoryKeyValueStore::with_slot(SAVED_JOBS_KEY, content));
    let mut store = SavedJobsStore::initialize(slot.clone());

    let listings = store.list();
    assert_eq!(ids(&listings), vec!["A", "B", "C"]);
    assert_eq!(listings[0].title, "Kept");
    assert_eq!(listings[1].required_skills.iter().collect::<Vec<_>>(), vec!["rust"]);
    assert_eq!(listings[1].highlights, vec!["Stipend".to_string()]);
    assert_eq!(listings[2].posted_at, None);

    // A later save rewrites the slot without losing anyone.
    store.save(Listing::new("D", "New")).unwrap();
    let reloaded = SavedJobsStore::initialize(slot);
    assert_eq!(ids(&reloaded.list()), vec!["A", "B", "C", "D"]);
}

#[test]
fn failed_persist_surfaces_and_rolls_back() {
    init_logging();
    let slot = Arc::new(FlakySlot::default());
    let mut store = SavedJobsStore::initialize(slot.clone());
    store.save(Listing::new("A", "X")).unwrap();

    slot.failing.store(true, Ordering::SeqCst);
    let err = store.save(Listing::new("B", "Y")).unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));
    assert!(!store.is_saved("B"));

    assert!(store.unsave("A").is_err());
    assert!(store.is_saved("A"));

    // Memory still matches what a restart would load.
    slot.failing.store(false, Ordering::SeqCst);
    let reloaded = SavedJobsStore::initialize(slot);
    assert_eq!(reloaded.list(), store.list());
}

#[test]
fn sorted_snapshot_does_not_reorder_the_store() {
    init_logging();
    let mut store = SavedJobsStore::initialize(MemoryKeyValueStore::new());
    store
        .save(Listing::new("1", "b").with_employer("Zed").with_posted_at(10))
        .unwrap();
    store
        .save(Listing::new("2", "a").with_employer("Acme").with_posted_at(20))
        .unwrap();

    assert_eq!(ids(&store.sorted(SavedSort::PostedDate)), vec!["2", "1"]);
    assert_eq!(ids(&store.sorted(SavedSort::Employer)), vec!["2", "1"]);
    assert_eq!(ids(&store.sorted(SavedSort::Title)), vec!["2", "1"]);
    assert_eq!(ids(&store.list()), vec!["1", "2"]);
}
