//! # Storage Layer
//!
//! This module defines the storage abstraction for jotz. The [`EntryStore`]
//! trait allows the application to work with different storage backends.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Keep both backends **interchangeable**: every caller sees identical
//!   semantics whether entries live in a local file or a remote document
//!   store
//! - Enable **testing** with `InMemoryStore` (no filesystem or network)
//! - Keep the journal logic **decoupled** from persistence details
//!
//! The backend is chosen once, at process wiring time (see `init`), never
//! at a call site.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: local storage, one JSON file per user
//!   - Partition file: `journal/{user_id}.json` under the data dir
//!   - Every write is a whole-partition read-modify-write
//!
//! - [`remote::RemoteStore`]: remote document store over HTTP
//!   - One document per entry: `users/{user_id}/entries/{entry_id}`
//!   - Wire timestamps are converted at this boundary; nothing above it
//!     ever sees a wire type
//!
//! - [`memory::InMemoryStore`]: in-memory store for tests
//!   - No persistence, plus a write-error switch for failure-path tests
//!
//! ## Partition Contract
//!
//! All operations are scoped by [`UserId`]. A partition is the set of
//! entries belonging to one user; no operation can see or touch another
//! partition. A partition that was never written to reads as empty, not
//! as an error.
//!
//! Listing returns entries ordered by `updated_at` descending; equal
//! timestamps keep arrival order, newest first.
//!
//! ## Failure Policy
//!
//! Write failures (create/update/delete) surface as errors and are never
//! retried here. Read-side decode failures (a corrupt partition) degrade
//! to an empty partition with a warning in the log; the next successful
//! write replaces the corrupt data. This is a deliberate lossy-recovery
//! policy so a bad file never locks the user out of their journal.
//!
//! ## Concurrency Caveat
//!
//! Writers are not coordinated across processes. `FileStore` rewrites the
//! whole partition file without locking, so two processes mutating the
//! same partition can lose one write (last write wins, silently). Within
//! one process the CLI issues a single operation at a time, which is the
//! supported usage.

use crate::error::Result;
use crate::model::{Entry, EntryDraft, EntryId, UserId};

pub mod fs;
pub mod memory;
pub mod remote;

/// Abstract interface for entry storage.
///
/// Implementations must keep partitions isolated per user and preserve
/// the timestamp semantics: create stamps both timestamps, update
/// refreshes `updated_at` only.
pub trait EntryStore {
    /// List all entries in the user's partition, most recently updated
    /// first. An absent partition yields an empty list.
    fn list_entries(&self, user: &UserId) -> Result<Vec<Entry>>;

    /// Create a new entry from a draft: fresh id, `created_at` and
    /// `updated_at` both set to now. Returns the stored entry.
    fn create_entry(&mut self, user: &UserId, draft: EntryDraft) -> Result<Entry>;

    /// Overwrite an existing entry's mutable fields, located by id.
    /// Fails with `EntryNotFound` if the id is absent. `id` and
    /// `created_at` are preserved, `updated_at` is forced to now.
    fn update_entry(&mut self, user: &UserId, entry: &Entry) -> Result<Entry>;

    /// Remove an entry permanently. Succeeds silently when the id is
    /// already absent; delete is idempotent.
    fn delete_entry(&mut self, user: &UserId, id: &EntryId) -> Result<()>;
}
