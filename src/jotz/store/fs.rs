use super::EntryStore;
use crate::error::{JotzError, Result};
use crate::model::{Entry, EntryDraft, EntryId, UserId};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-backed entry storage. Each user's partition is one JSON file,
/// `journal/{user_id}.json` under the store root, holding the full
/// entry list. Every mutation is a read-modify-write of that file.
///
/// Writes go through a temp file and rename, so a crash mid-write never
/// leaves a half-written partition. Nothing guards against two
/// processes writing the same partition at once; the last rename wins.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn journal_dir(&self) -> PathBuf {
        self.root.join("journal")
    }

    /// Path of the user's partition file, derived from the opaque user
    /// id plus a fixed extension.
    pub fn partition_path(&self, user: &UserId) -> PathBuf {
        self.journal_dir().join(format!("{}.json", user.as_str()))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(JotzError::Io)?;
        }
        Ok(())
    }

    /// Reads the user's full partition. An absent file is an empty
    /// partition. A file that no longer parses is also treated as empty,
    /// with a warning: a corrupt partition must never lock the user out,
    /// and the next write replaces it with valid data.
    fn load_partition(&self, user: &UserId) -> Result<Vec<Entry>> {
        let path = self.partition_path(user);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path).map_err(JotzError::Io)?;
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(
                    "corrupt partition file {}: {}; treating as empty",
                    path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    fn persist_partition(&self, user: &UserId, entries: &[Entry]) -> Result<()> {
        let dir = self.journal_dir();
        self.ensure_dir(&dir)?;

        let content = serde_json::to_string_pretty(entries).map_err(JotzError::Serialization)?;

        // Atomic write: temp file in the same directory, then rename.
        let tmp_file = dir.join(format!(".{}-{}.tmp", user.as_str(), Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(JotzError::Io)?;
        fs::rename(&tmp_file, self.partition_path(user)).map_err(JotzError::Io)?;

        debug!("persisted {} entries for user {}", entries.len(), user);
        Ok(())
    }
}

impl EntryStore for FileStore {
    fn list_entries(&self, user: &UserId) -> Result<Vec<Entry>> {
        let mut entries = self.load_partition(user)?;
        // Stable sort: entries with equal timestamps keep file order,
        // which is newest-created first.
        entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(entries)
    }

    fn create_entry(&mut self, user: &UserId, draft: EntryDraft) -> Result<Entry> {
        let mut entries = self.load_partition(user)?;

        let entry = Entry::from_draft(draft);
        entries.insert(0, entry.clone());
        self.persist_partition(user, &entries)?;

        Ok(entry)
    }

    fn update_entry(&mut self, user: &UserId, entry: &Entry) -> Result<Entry> {
        let mut entries = self.load_partition(user)?;

        let pos = entries
            .iter()
            .position(|e| e.id == entry.id)
            .ok_or_else(|| JotzError::EntryNotFound(entry.id.clone()))?;

        let updated = entries[pos].apply_update(entry);
        entries[pos] = updated.clone();
        self.persist_partition(user, &entries)?;

        Ok(updated)
    }

    fn delete_entry(&mut self, user: &UserId, id: &EntryId) -> Result<()> {
        let mut entries = self.load_partition(user)?;

        // Idempotent: removing an absent id rewrites the partition
        // unchanged and reports success.
        entries.retain(|e| &e.id != id);
        self.persist_partition(user, &entries)?;

        Ok(())
    }
}
