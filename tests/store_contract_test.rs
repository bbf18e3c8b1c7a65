//! Behavior shared by every storage backend. Each property runs against
//! both the in-memory store and the file store; the two must be
//! interchangeable from the caller's side.

use jotz::error::JotzError;
use jotz::model::{Entry, EntryDraft, EntryId, UserId};
use jotz::store::fs::FileStore;
use jotz::store::memory::InMemoryStore;
use jotz::store::EntryStore;
use std::thread::sleep;
use std::time::Duration;
use tempfile::TempDir;

fn file_store(dir: &TempDir) -> FileStore {
    FileStore::new(dir.path().to_path_buf())
}

fn user(id: &str) -> UserId {
    UserId::from(id)
}

// --- Create ---

fn check_create_stamps_and_lists<S: EntryStore>(mut store: S) {
    let u = user("u1");
    let draft = EntryDraft::new("Morning thoughts", "Slept well.", "#A8D0E6");

    let created = store.create_entry(&u, draft).unwrap();
    assert_eq!(created.title, "Morning thoughts");
    assert_eq!(created.content, "Slept well.");
    assert_eq!(created.color, "#A8D0E6");
    assert_eq!(created.created_at, created.updated_at);

    let entries = store.list_entries(&u).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0], created);
}

#[test]
fn test_memory_store_create_stamps_and_lists() {
    check_create_stamps_and_lists(InMemoryStore::new());
}

#[test]
fn test_file_store_create_stamps_and_lists() {
    let dir = TempDir::new().unwrap();
    check_create_stamps_and_lists(file_store(&dir));
}

fn check_create_ignores_advisory_timestamps<S: EntryStore>(mut store: S) {
    let u = user("u1");
    let mut draft = EntryDraft::new("Backdated", "", "#FADADD");
    draft.created_at = chrono::Utc::now() - chrono::Duration::days(365);
    draft.updated_at = chrono::Utc::now() - chrono::Duration::days(365);

    let created = store.create_entry(&u, draft).unwrap();
    let age = chrono::Utc::now().signed_duration_since(created.created_at);
    assert!(age.num_seconds() < 5);
}

#[test]
fn test_memory_store_create_ignores_advisory_timestamps() {
    check_create_ignores_advisory_timestamps(InMemoryStore::new());
}

#[test]
fn test_file_store_create_ignores_advisory_timestamps() {
    let dir = TempDir::new().unwrap();
    check_create_ignores_advisory_timestamps(file_store(&dir));
}

// --- Ordering ---

fn check_list_orders_newest_updated_first<S: EntryStore>(mut store: S) {
    let u = user("u1");

    store
        .create_entry(&u, EntryDraft::new("Morning thoughts", "", "#A8D0E6"))
        .unwrap();
    sleep(Duration::from_millis(5));
    store
        .create_entry(&u, EntryDraft::new("Evening reflection", "", "#FADADD"))
        .unwrap();

    let entries = store.list_entries(&u).unwrap();
    assert_eq!(entries[0].title, "Evening reflection");
    assert_eq!(entries[1].title, "Morning thoughts");
}

#[test]
fn test_memory_store_list_orders_newest_updated_first() {
    check_list_orders_newest_updated_first(InMemoryStore::new());
}

#[test]
fn test_file_store_list_orders_newest_updated_first() {
    let dir = TempDir::new().unwrap();
    check_list_orders_newest_updated_first(file_store(&dir));
}

fn check_update_moves_entry_to_front<S: EntryStore>(mut store: S) {
    let u = user("u1");

    let oldest = store
        .create_entry(&u, EntryDraft::new("Oldest", "", "#A8D0E6"))
        .unwrap();
    sleep(Duration::from_millis(5));
    store
        .create_entry(&u, EntryDraft::new("Newest", "", "#FADADD"))
        .unwrap();
    sleep(Duration::from_millis(5));

    let mut edited = oldest.clone();
    edited.content = "Revisited.".to_string();
    store.update_entry(&u, &edited).unwrap();

    let entries = store.list_entries(&u).unwrap();
    assert_eq!(entries[0].title, "Oldest");
    assert_eq!(entries[1].title, "Newest");
}

#[test]
fn test_memory_store_update_moves_entry_to_front() {
    check_update_moves_entry_to_front(InMemoryStore::new());
}

#[test]
fn test_file_store_update_moves_entry_to_front() {
    let dir = TempDir::new().unwrap();
    check_update_moves_entry_to_front(file_store(&dir));
}

// --- Update ---

fn check_update_preserves_identity<S: EntryStore>(mut store: S) {
    let u = user("u1");
    let created = store
        .create_entry(&u, EntryDraft::new("Morning thoughts", "Slept well.", "#A8D0E6"))
        .unwrap();
    sleep(Duration::from_millis(5));

    let mut edited = created.clone();
    edited.title = "Morning thoughts, revised".to_string();
    edited.color = "#FADADD".to_string();

    let updated = store.update_entry(&u, &edited).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.title, "Morning thoughts, revised");
    assert_eq!(updated.color, "#FADADD");
    assert!(updated.updated_at > created.updated_at);

    // The stored copy matches what the call returned.
    let entries = store.list_entries(&u).unwrap();
    assert_eq!(entries[0], updated);
}

#[test]
fn test_memory_store_update_preserves_identity() {
    check_update_preserves_identity(InMemoryStore::new());
}

#[test]
fn test_file_store_update_preserves_identity() {
    let dir = TempDir::new().unwrap();
    check_update_preserves_identity(file_store(&dir));
}

fn check_update_unknown_id_is_not_found<S: EntryStore>(mut store: S) {
    let u = user("u1");
    store
        .create_entry(&u, EntryDraft::new("Kept", "", "#A8D0E6"))
        .unwrap();

    let ghost = Entry::from_draft(EntryDraft::new("Ghost", "", "#FADADD"));
    let err = store.update_entry(&u, &ghost).unwrap_err();
    assert!(matches!(err, JotzError::EntryNotFound(_)));

    // Nothing was written.
    let entries = store.list_entries(&u).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Kept");
}

#[test]
fn test_memory_store_update_unknown_id_is_not_found() {
    check_update_unknown_id_is_not_found(InMemoryStore::new());
}

#[test]
fn test_file_store_update_unknown_id_is_not_found() {
    let dir = TempDir::new().unwrap();
    check_update_unknown_id_is_not_found(file_store(&dir));
}

// --- Delete ---

fn check_delete_removes_and_is_idempotent<S: EntryStore>(mut store: S) {
    let u = user("u1");
    let entry = store
        .create_entry(&u, EntryDraft::new("Doomed", "", "#A8D0E6"))
        .unwrap();

    store.delete_entry(&u, &entry.id).unwrap();
    assert!(store.list_entries(&u).unwrap().is_empty());

    // Deleting again, or deleting an id that never existed, succeeds
    // silently.
    store.delete_entry(&u, &entry.id).unwrap();
    store.delete_entry(&u, &EntryId::from("never-existed")).unwrap();
    assert!(store.list_entries(&u).unwrap().is_empty());
}

#[test]
fn test_memory_store_delete_removes_and_is_idempotent() {
    check_delete_removes_and_is_idempotent(InMemoryStore::new());
}

#[test]
fn test_file_store_delete_removes_and_is_idempotent() {
    let dir = TempDir::new().unwrap();
    check_delete_removes_and_is_idempotent(file_store(&dir));
}

fn check_delete_leaves_other_entries<S: EntryStore>(mut store: S) {
    let u = user("u1");
    let first = store
        .create_entry(&u, EntryDraft::new("Morning thoughts", "", "#A8D0E6"))
        .unwrap();
    sleep(Duration::from_millis(5));
    store
        .create_entry(&u, EntryDraft::new("Evening reflection", "", "#FADADD"))
        .unwrap();

    store.delete_entry(&u, &first.id).unwrap();

    let entries = store.list_entries(&u).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Evening reflection");
}

#[test]
fn test_memory_store_delete_leaves_other_entries() {
    check_delete_leaves_other_entries(InMemoryStore::new());
}

#[test]
fn test_file_store_delete_leaves_other_entries() {
    let dir = TempDir::new().unwrap();
    check_delete_leaves_other_entries(file_store(&dir));
}

// --- Partition Isolation ---

fn check_users_are_isolated<S: EntryStore>(mut store: S) {
    let u1 = user("u1");
    let u2 = user("u2");

    let mine = store
        .create_entry(&u1, EntryDraft::new("Mine", "", "#A8D0E6"))
        .unwrap();
    store
        .create_entry(&u2, EntryDraft::new("Theirs", "", "#FADADD"))
        .unwrap();

    let u1_entries = store.list_entries(&u1).unwrap();
    assert_eq!(u1_entries.len(), 1);
    assert_eq!(u1_entries[0].title, "Mine");

    let u2_entries = store.list_entries(&u2).unwrap();
    assert_eq!(u2_entries.len(), 1);
    assert_eq!(u2_entries[0].title, "Theirs");

    // Mutations in one partition never leak into another.
    store.delete_entry(&u1, &mine.id).unwrap();
    assert!(store.list_entries(&u1).unwrap().is_empty());
    assert_eq!(store.list_entries(&u2).unwrap().len(), 1);
}

#[test]
fn test_memory_store_users_are_isolated() {
    check_users_are_isolated(InMemoryStore::new());
}

#[test]
fn test_file_store_users_are_isolated() {
    let dir = TempDir::new().unwrap();
    check_users_are_isolated(file_store(&dir));
}

fn check_unknown_user_lists_empty<S: EntryStore>(store: S) {
    let entries = store.list_entries(&user("nobody")).unwrap();
    assert!(entries.is_empty());
}

#[test]
fn test_memory_store_unknown_user_lists_empty() {
    check_unknown_user_lists_empty(InMemoryStore::new());
}

#[test]
fn test_file_store_unknown_user_lists_empty() {
    let dir = TempDir::new().unwrap();
    check_unknown_user_lists_empty(file_store(&dir));
}

// --- Content Opacity ---

fn check_markup_content_is_stored_verbatim<S: EntryStore>(mut store: S) {
    let u = user("u1");
    let markup = "<p>Dear diary,<br>today was <b>good</b>.</p>";

    let created = store
        .create_entry(&u, EntryDraft::new("Legacy entry", markup, "#E6E6FA"))
        .unwrap();
    assert_eq!(created.content, markup);

    let entries = store.list_entries(&u).unwrap();
    assert_eq!(entries[0].content, markup);
}

#[test]
fn test_memory_store_markup_content_is_stored_verbatim() {
    check_markup_content_is_stored_verbatim(InMemoryStore::new());
}

#[test]
fn test_file_store_markup_content_is_stored_verbatim() {
    let dir = TempDir::new().unwrap();
    check_markup_content_is_stored_verbatim(file_store(&dir));
}
