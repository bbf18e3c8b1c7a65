//! # Entry Session
//!
//! [`EntrySession`] is the per-user, in-memory mirror of the entry
//! collection, kept so the UI never reloads the full partition after a
//! single mutation.
//!
//! ## State Machine
//!
//! ```text
//! Idle (no user) ──set_user(Some)──▶ Loading ──▶ Ready
//!      ▲                                           │
//!      └───────────── set_user(None) ──────────────┘
//! ```
//!
//! While `Ready`, each confirmed mutation adjusts the mirror in place:
//! `add` prepends (the new entry carries the newest `updated_at`),
//! `update` replaces by id and re-sorts, `delete` removes by id. A
//! mutation only touches the mirror after the repository confirms the
//! write; on failure the mirror is exactly what it was.
//!
//! Changing the user, including signing out, discards the mirror
//! entirely. Entries never survive across user switches.
//!
//! ## Degraded Loads
//!
//! A failed load leaves the session `Ready` with an empty mirror and a
//! warning in the log. Read failures must never lock the user out of
//! their journal; write failures always propagate.

use crate::api::Journal;
use crate::error::{JotzError, Result};
use crate::model::{Entry, EntryDraft, EntryId, UserId};
use crate::store::EntryStore;
use log::warn;

/// Load state of the session mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No user is active; there is nothing to show.
    Idle,
    /// A user became active and their collection is being fetched.
    Loading,
    /// The mirror holds the active user's collection.
    Ready,
}

/// In-memory mirror of one user's entries, backed by a [`Journal`].
pub struct EntrySession<S: EntryStore> {
    pub(crate) journal: Journal<S>,
    user: Option<UserId>,
    entries: Vec<Entry>,
    state: LoadState,
}

impl<S: EntryStore> EntrySession<S> {
    pub fn new(journal: Journal<S>) -> Self {
        Self {
            journal,
            user: None,
            entries: Vec::new(),
            state: LoadState::Idle,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// The mirrored collection, ordered by `updated_at` descending.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    /// Switches the active user. The previous mirror is discarded before
    /// anything loads, so entries cannot leak between users. With
    /// `None` the session goes back to `Idle`; with a user it loads the
    /// full partition, degrading to an empty mirror if the load fails.
    pub fn set_user(&mut self, user: Option<UserId>) {
        self.entries.clear();
        self.user = user;

        let Some(user) = self.user.clone() else {
            self.state = LoadState::Idle;
            return;
        };

        self.state = LoadState::Loading;
        match self.journal.list_entries(&user) {
            Ok(entries) => self.entries = entries,
            Err(e) => {
                warn!("loading entries for user {} failed: {}; starting empty", user, e);
            }
        }
        self.state = LoadState::Ready;
    }

    fn active_user(&self) -> Result<UserId> {
        self.user
            .clone()
            .ok_or_else(|| JotzError::Identity("no user is signed in".to_string()))
    }

    /// Creates an entry and prepends it to the mirror. The new entry has
    /// the newest `updated_at` of the collection, so prepending keeps
    /// descending order without a sort.
    pub fn add(&mut self, draft: EntryDraft) -> Result<Entry> {
        let user = self.active_user()?;
        let entry = self.journal.add_entry(&user, draft)?;
        self.entries.insert(0, entry.clone());
        Ok(entry)
    }

    /// Updates an entry, replaces it in the mirror by id, then re-sorts
    /// by `updated_at` so the mirror matches what a fresh list would
    /// return: the touched entry moves to the front.
    pub fn update(&mut self, entry: &Entry) -> Result<Entry> {
        let user = self.active_user()?;
        let updated = self.journal.update_entry(&user, entry)?;

        if let Some(e) = self.entries.iter_mut().find(|e| e.id == updated.id) {
            *e = updated.clone();
        }
        self.entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(updated)
    }

    /// Deletes an entry and drops it from the mirror.
    pub fn delete(&mut self, id: &EntryId) -> Result<()> {
        let user = self.active_user()?;
        self.journal.delete_entry(&user, id)?;
        self.entries.retain(|e| &e.id != id);
        Ok(())
    }
}
