//! # Journal Facade
//!
//! [`Journal`] is the repository every caller above the storage layer
//! talks to. It is the only code that touches an [`EntryStore`], and the
//! boundary past which storage details stop existing: callers hand in
//! and get back the canonical [`Entry`] shape with `DateTime<Utc>`
//! timestamps, whichever backend is wired in.
//!
//! ## Generic Over EntryStore
//!
//! `Journal<S: EntryStore>` is generic over the storage backend:
//! - Production: `Journal<FileStore>` or `Journal<RemoteStore>`
//! - Testing: `Journal<InMemoryStore>`
//!
//! The store handle is built once at startup (see `init`) and moved in
//! here; nothing else holds one. There is deliberately no global or
//! lazily-initialized store.

use crate::error::Result;
use crate::model::{Entry, EntryDraft, EntryId, UserId};
use crate::store::EntryStore;

/// The repository for one process. Owns the store handle.
pub struct Journal<S: EntryStore> {
    /// The underlying storage backend.
    pub(crate) store: S,
}

impl<S: EntryStore> Journal<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All entries in the user's partition, most recently updated first.
    pub fn list_entries(&self, user: &UserId) -> Result<Vec<Entry>> {
        self.store.list_entries(user)
    }

    /// Stores a new entry and returns it with its assigned id and
    /// timestamps. The draft's own timestamps are advisory only.
    pub fn add_entry(&mut self, user: &UserId, draft: EntryDraft) -> Result<Entry> {
        self.store.create_entry(user, draft)
    }

    /// Overwrites an existing entry's title, content and color. Fails
    /// with `EntryNotFound` when the id is not in the partition; the
    /// stored collection is untouched in that case.
    pub fn update_entry(&mut self, user: &UserId, entry: &Entry) -> Result<Entry> {
        self.store.update_entry(user, entry)
    }

    /// Removes an entry. A second delete of the same id is a no-op.
    pub fn delete_entry(&mut self, user: &UserId, id: &EntryId) -> Result<()> {
        self.store.delete_entry(user, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JotzError;
    use crate::store::memory::InMemoryStore;

    fn make_journal() -> Journal<InMemoryStore> {
        Journal::new(InMemoryStore::new())
    }

    #[test]
    fn test_add_and_list() {
        let mut journal = make_journal();
        let user = UserId::from("u1");

        let entry = journal
            .add_entry(&user, EntryDraft::new("My Day", "Went fine.", "#A8D0E6"))
            .unwrap();
        assert_eq!(entry.title, "My Day");
        assert_eq!(entry.created_at, entry.updated_at);

        let entries = journal.list_entries(&user).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, entry.id);
    }

    #[test]
    fn test_update_preserves_identity() {
        let mut journal = make_journal();
        let user = UserId::from("u1");

        let entry = journal
            .add_entry(&user, EntryDraft::new("Draft", "v1", "#A8D0E6"))
            .unwrap();
        let mut edited = entry.clone();
        edited.content = "v2".to_string();

        let updated = journal.update_entry(&user, &edited).unwrap();
        assert_eq!(updated.id, entry.id);
        assert_eq!(updated.created_at, entry.created_at);
        assert_eq!(updated.content, "v2");
        assert!(updated.updated_at >= entry.updated_at);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut journal = make_journal();
        let user = UserId::from("u1");

        let ghost = Entry::from_draft(EntryDraft::new("Ghost", "", "#FADADD"));
        let err = journal.update_entry(&user, &ghost).unwrap_err();
        assert!(matches!(err, JotzError::EntryNotFound(id) if id == ghost.id));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut journal = make_journal();
        let user = UserId::from("u1");

        let entry = journal
            .add_entry(&user, EntryDraft::new("Gone soon", "", "#A8D0E6"))
            .unwrap();
        journal.delete_entry(&user, &entry.id).unwrap();
        assert!(journal.list_entries(&user).unwrap().is_empty());

        // Second delete of the same id still succeeds.
        journal.delete_entry(&user, &entry.id).unwrap();
    }
}
