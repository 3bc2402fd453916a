use std::fs;

use scout_engine::{ensure_dir, AtomicFileWriter, FileKeyValueStore, KeyValueStore};
use tempfile::TempDir;

#[test]
fn creates_missing_data_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("data");
    assert!(!new_dir.exists());
    ensure_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing_content() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("savedJobs.json", "[]").unwrap();
    assert_eq!(first.file_name().unwrap(), "savedJobs.json");
    assert_eq!(fs::read_to_string(&first).unwrap(), "[]");

    let second = writer.write("savedJobs.json", "[1]").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "[1]");
}

#[test]
fn no_partial_file_when_dir_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("savedJobs.json", "[]").is_err());
    assert!(!file_path.with_file_name("savedJobs.json").exists());
}

#[test]
fn file_slots_read_back_what_was_written() {
    let temp = TempDir::new().unwrap();
    let slots = FileKeyValueStore::new(temp.path());
    assert_eq!(slots.get("savedJobs").unwrap(), None);

    slots.set("savedJobs", "[\"a\"]").unwrap();
    assert_eq!(slots.get("savedJobs").unwrap().as_deref(), Some("[\"a\"]"));

    // A fresh handle on the same directory sees the same slot.
    let again = FileKeyValueStore::new(temp.path());
    assert_eq!(again.get("savedJobs").unwrap().as_deref(), Some("[\"a\"]"));
}

#[test]
fn write_errors_surface_through_the_slot() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("blocker");
    fs::write(&file_path, "x").unwrap();

    let slots = FileKeyValueStore::new(&file_path);
    assert!(slots.set("savedJobs", "[]").is_err());
}
