use super::EntryStore;
use crate::error::{JotzError, Result};
use crate::model::{Entry, EntryDraft, EntryId, UserId};
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
///
/// Carries read and write error switches so failure paths can be
/// exercised without a real broken disk or network.
#[derive(Default)]
pub struct InMemoryStore {
    partitions: HashMap<UserId, Vec<Entry>>,
    simulate_read_error: bool,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable read error simulation for testing error handling.
    pub fn set_simulate_read_error(&mut self, simulate: bool) {
        self.simulate_read_error = simulate;
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    fn check_read(&self) -> Result<()> {
        if self.simulate_read_error {
            return Err(JotzError::Store("Simulated read error".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<()> {
        if self.simulate_write_error {
            return Err(JotzError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl EntryStore for InMemoryStore {
    fn list_entries(&self, user: &UserId) -> Result<Vec<Entry>> {
        self.check_read()?;

        let mut entries = self.partitions.get(user).cloned().unwrap_or_default();
        entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(entries)
    }

    fn create_entry(&mut self, user: &UserId, draft: EntryDraft) -> Result<Entry> {
        self.check_write()?;

        let entry = Entry::from_draft(draft);
        self.partitions
            .entry(user.clone())
            .or_default()
            .insert(0, entry.clone());
        Ok(entry)
    }

    fn update_entry(&mut self, user: &UserId, entry: &Entry) -> Result<Entry> {
        self.check_write()?;

        let entries = self
            .partitions
            .get_mut(user)
            .ok_or_else(|| JotzError::EntryNotFound(entry.id.clone()))?;
        let pos = entries
            .iter()
            .position(|e| e.id == entry.id)
            .ok_or_else(|| JotzError::EntryNotFound(entry.id.clone()))?;

        let updated = entries[pos].apply_update(entry);
        entries[pos] = updated.clone();
        Ok(updated)
    }

    fn delete_entry(&mut self, user: &UserId, id: &EntryId) -> Result<()> {
        self.check_write()?;

        if let Some(entries) = self.partitions.get_mut(user) {
            entries.retain(|e| &e.id != id);
        }
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::default_color;

    /// Builder for stores preloaded with entries.
    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_entries(mut self, user: &UserId, count: usize) -> Self {
            for i in 0..count {
                let draft = EntryDraft::new(
                    format!("Test Entry {}", i + 1),
                    format!("Content for entry {}", i + 1),
                    default_color(),
                );
                self.store.create_entry(user, draft).unwrap();
            }
            self
        }

        pub fn with_entry(mut self, user: &UserId, title: &str, color: &str) -> Self {
            let draft = EntryDraft::new(title, "Some content", color);
            self.store.create_entry(user, draft).unwrap();
            self
        }
    }
}
