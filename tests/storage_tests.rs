//! Integration tests for the storage engine façade.

use storepass::errors::StorePassError;
use storepass::model::{Database, Entry, EntryKind};
use storepass::storage::Storage;
use tempfile::TempDir;

const PASSWORD: &str = "qwerty";

fn sample_db() -> Database {
    let mut mail = Entry::new(EntryKind::Generic, "mail");
    mail.set_field("generic-hostname", "mail.example.com").unwrap();
    mail.set_field("generic-username", "alice").unwrap();
    mail.set_field("generic-password", "hunter2").unwrap();
    mail.updated = Some(1_546_300_800);

    let mut folder = Entry::new(EntryKind::Folder, "work");
    folder.children_mut().push(mail);

    let mut db = Database::new();
    db.entries_mut().push(folder);
    db
}

fn scratch() -> (TempDir, Storage) {
    let tmp = TempDir::new().unwrap();
    let storage = Storage::new(tmp.path().join("passwords.db"));
    (tmp, storage)
}

// ---------------------------------------------------------------------------
// Round-trip
// ---------------------------------------------------------------------------

#[test]
fn save_then_open_roundtrip() {
    let (_tmp, storage) = scratch();
    let db = sample_db();

    storage.save(&db, PASSWORD).unwrap();
    let reloaded = storage.open(PASSWORD).unwrap();

    assert_eq!(reloaded, db);
}

#[test]
fn empty_database_roundtrips() {
    let (_tmp, storage) = scratch();
    storage.save(&Database::new(), PASSWORD).unwrap();
    assert_eq!(storage.open(PASSWORD).unwrap(), Database::new());
}

#[test]
fn read_plain_returns_markup() {
    let (_tmp, storage) = scratch();
    storage.save(&sample_db(), PASSWORD).unwrap();

    let xml = storage.read_plain(PASSWORD).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(xml.contains("<revelationdata dataversion=\"1\">"));
    assert!(xml.contains("hunter2"));
}

#[test]
fn reorder_survives_save_and_reload() {
    let (_tmp, storage) = scratch();

    let mut db = Database::new();
    db.insert(&[], Entry::new(EntryKind::Folder, "box"), None).unwrap();
    for name in ["A", "B", "C"] {
        db.insert(&["box"], Entry::new(EntryKind::Generic, name), None)
            .unwrap();
    }
    db.move_entry(&["box", "C"], &["box"], Some(0)).unwrap();

    storage.save(&db, PASSWORD).unwrap();
    let reloaded = storage.open(PASSWORD).unwrap();

    let names: Vec<&str> = reloaded
        .entry(&["box"])
        .unwrap()
        .children()
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, ["C", "A", "B"]);
}

// ---------------------------------------------------------------------------
// Envelope layout on disk
// ---------------------------------------------------------------------------

#[test]
fn file_has_revelation_header() {
    let (_tmp, storage) = scratch();
    storage.save(&sample_db(), PASSWORD).unwrap();

    let bytes = std::fs::read(storage.path()).unwrap();
    assert_eq!(&bytes[..12], b"rvl\x00\x02\x00\x00\x00\x00\x00\x00\x00");
    // Header + salt + IV, then block-aligned ciphertext.
    assert!(bytes.len() > 36);
    assert_eq!((bytes.len() - 36) % 16, 0);
}

#[test]
fn each_save_uses_fresh_salt_and_iv() {
    let (_tmp, storage) = scratch();
    let db = sample_db();

    storage.save(&db, PASSWORD).unwrap();
    let first = std::fs::read(storage.path()).unwrap();
    storage.save(&db, PASSWORD).unwrap();
    let second = std::fs::read(storage.path()).unwrap();

    assert_ne!(first[12..20], second[12..20], "salt must differ");
    assert_ne!(first[20..36], second[20..36], "IV must differ");
    // Same tree either way.
    assert_eq!(storage.open(PASSWORD).unwrap(), db);
}

#[test]
fn save_replaces_existing_file() {
    let (_tmp, storage) = scratch();
    storage.save(&sample_db(), PASSWORD).unwrap();

    let mut smaller = Database::new();
    smaller
        .insert(&[], Entry::new(EntryKind::Generic, "only"), None)
        .unwrap();
    storage.save(&smaller, PASSWORD).unwrap();

    assert_eq!(storage.open(PASSWORD).unwrap(), smaller);
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[test]
fn wrong_password_fails_authentication() {
    let (_tmp, storage) = scratch();
    storage.save(&sample_db(), "correct").unwrap();

    assert!(matches!(
        storage.open("wrong"),
        Err(StorePassError::Authentication)
    ));
}

#[test]
fn password_change_invalidates_old_password() {
    let (_tmp, storage) = scratch();
    let db = sample_db();

    storage.save(&db, "first").unwrap();
    let loaded = storage.open("first").unwrap();
    storage.save(&loaded, "second").unwrap();

    assert_eq!(storage.open("second").unwrap(), db);
    assert!(matches!(
        storage.open("first"),
        Err(StorePassError::Authentication)
    ));
}

#[test]
fn missing_file_fails_with_file_error() {
    let tmp = TempDir::new().unwrap();
    let storage = Storage::new(tmp.path().join("nope.db"));

    assert!(matches!(
        storage.open(PASSWORD),
        Err(StorePassError::File(_))
    ));
}

#[test]
fn flipped_ciphertext_byte_fails_closed() {
    let (_tmp, storage) = scratch();
    storage.save(&sample_db(), PASSWORD).unwrap();

    let mut bytes = std::fs::read(storage.path()).unwrap();
    let index = bytes.len() - 1;
    bytes[index] ^= 0x01;
    std::fs::write(storage.path(), &bytes).unwrap();

    assert!(matches!(
        storage.open(PASSWORD),
        Err(StorePassError::Authentication)
    ));
}

#[test]
fn misaligned_truncation_is_format_error() {
    let (_tmp, storage) = scratch();
    storage.save(&sample_db(), PASSWORD).unwrap();

    let mut bytes = std::fs::read(storage.path()).unwrap();
    bytes.truncate(bytes.len() - 1);
    std::fs::write(storage.path(), &bytes).unwrap();

    assert!(matches!(
        storage.open(PASSWORD),
        Err(StorePassError::Format(_))
    ));
}

#[test]
fn truncated_header_is_format_error() {
    let (_tmp, storage) = scratch();
    storage.save(&sample_db(), PASSWORD).unwrap();

    let mut bytes = std::fs::read(storage.path()).unwrap();
    bytes.truncate(10);
    std::fs::write(storage.path(), &bytes).unwrap();

    assert!(matches!(
        storage.open(PASSWORD),
        Err(StorePassError::Format(_))
    ));
}

#[test]
fn unsupported_data_version_is_version_error() {
    let (_tmp, storage) = scratch();
    storage.save(&sample_db(), PASSWORD).unwrap();

    let mut bytes = std::fs::read(storage.path()).unwrap();
    bytes[4] = 3;
    std::fs::write(storage.path(), &bytes).unwrap();

    assert!(matches!(
        storage.open(PASSWORD),
        Err(StorePassError::Version(_))
    ));
}

#[test]
fn no_temp_file_left_behind() {
    let (tmp, storage) = scratch();
    storage.save(&sample_db(), PASSWORD).unwrap();

    let names: Vec<String> = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["passwords.db"]);
}
