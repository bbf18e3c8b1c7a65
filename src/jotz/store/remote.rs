//! Remote document-store backend.
//!
//! Entries live in an HTTP document store, one document per entry inside
//! a per-user collection:
//!
//! ```text
//! GET    {base}/users/{user}/entries          list the collection
//! PUT    {base}/users/{user}/entries/{id}     create a document
//! PATCH  {base}/users/{user}/entries/{id}     merge fields into one
//! DELETE {base}/users/{user}/entries/{id}     remove one
//! ```
//!
//! PUT and PATCH respond with the document as stored; PATCH merges only
//! the fields sent, so `id` and `created_at` stay untouched server-side.
//! Timestamps travel in the store's native `{seconds, nanos}` shape and
//! are converted to [`DateTime<Utc>`] here; no wire type leaks past this
//! module.

use super::EntryStore;
use crate::error::{JotzError, Result};
use crate::model::{Entry, EntryDraft, EntryId, UserId};
use chrono::{DateTime, TimeZone, Utc};
use log::warn;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// The document store's native timestamp: seconds and nanoseconds since
/// the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct WireTimestamp {
    seconds: i64,
    nanos: u32,
}

impl WireTimestamp {
    fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self {
            seconds: dt.timestamp(),
            nanos: dt.timestamp_subsec_nanos(),
        }
    }

    fn to_datetime(self) -> DateTime<Utc> {
        // Out-of-range values cannot come from a well-behaved store;
        // clamp to the epoch rather than failing the whole read.
        Utc.timestamp_opt(self.seconds, self.nanos)
            .single()
            .unwrap_or(DateTime::UNIX_EPOCH)
    }
}

/// One entry as the document store stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntryDocument {
    id: String,
    title: String,
    content: String,
    color: String,
    created_at: WireTimestamp,
    updated_at: WireTimestamp,
}

impl EntryDocument {
    fn from_entry(entry: &Entry) -> Self {
        Self {
            id: entry.id.as_str().to_string(),
            title: entry.title.clone(),
            content: entry.content.clone(),
            color: entry.color.clone(),
            created_at: WireTimestamp::from_datetime(entry.created_at),
            updated_at: WireTimestamp::from_datetime(entry.updated_at),
        }
    }

    fn into_entry(self) -> Entry {
        Entry {
            id: EntryId::from(self.id),
            title: self.title,
            content: self.content,
            color: self.color,
            created_at: self.created_at.to_datetime(),
            updated_at: self.updated_at.to_datetime(),
        }
    }
}

/// The mutable fields sent on update. The store merges them into the
/// stored document; `id` and `created_at` are never part of a patch.
#[derive(Debug, Serialize)]
struct EntryPatch {
    title: String,
    content: String,
    color: String,
    updated_at: WireTimestamp,
}

#[derive(Debug, Deserialize)]
struct CollectionResponse {
    documents: Vec<EntryDocument>,
}

/// Entry storage backed by the remote document store.
#[derive(Debug)]
pub struct RemoteStore {
    client: Client,
    base_url: String,
}

impl RemoteStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("jotz/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        let base: String = base_url.into();
        Self {
            client,
            base_url: base.trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self, user: &UserId) -> String {
        format!("{}/users/{}/entries", self.base_url, user.as_str())
    }

    fn document_url(&self, user: &UserId, id: &EntryId) -> String {
        format!(
            "{}/users/{}/entries/{}",
            self.base_url,
            user.as_str(),
            id.as_str()
        )
    }

    fn check_status(response: Response) -> Result<Response> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(JotzError::Store(format!(
                "remote store returned HTTP {}: {}",
                status, body
            )));
        }
        Ok(response)
    }
}

impl EntryStore for RemoteStore {
    fn list_entries(&self, user: &UserId) -> Result<Vec<Entry>> {
        let response = self.client.get(self.collection_url(user)).send()?;

        // A collection nobody has written to reads as 404. That is an
        // empty partition, not an error.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let response = Self::check_status(response)?;

        let collection: CollectionResponse = match response.json() {
            Ok(c) => c,
            Err(e) => {
                warn!(
                    "undecodable collection for user {}: {}; treating as empty",
                    user, e
                );
                return Ok(Vec::new());
            }
        };

        let mut entries: Vec<Entry> = collection
            .documents
            .into_iter()
            .map(EntryDocument::into_entry)
            .collect();
        // Stable sort: equal timestamps keep the store's arrival order.
        entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(entries)
    }

    fn create_entry(&mut self, user: &UserId, draft: EntryDraft) -> Result<Entry> {
        let entry = Entry::from_draft(draft);
        let doc = EntryDocument::from_entry(&entry);

        let response = self
            .client
            .put(self.document_url(user, &entry.id))
            .json(&doc)
            .send()?;
        let response = Self::check_status(response)?;

        let stored: EntryDocument = response.json()?;
        Ok(stored.into_entry())
    }

    fn update_entry(&mut self, user: &UserId, entry: &Entry) -> Result<Entry> {
        let patch = EntryPatch {
            title: entry.title.clone(),
            content: entry.content.clone(),
            color: entry.color.clone(),
            updated_at: WireTimestamp::from_datetime(Utc::now()),
        };

        let response = self
            .client
            .patch(self.document_url(user, &entry.id))
            .json(&patch)
            .send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(JotzError::EntryNotFound(entry.id.clone()));
        }
        let response = Self::check_status(response)?;

        let stored: EntryDocument = response.json()?;
        Ok(stored.into_entry())
    }

    fn delete_entry(&mut self, user: &UserId, id: &EntryId) -> Result<()> {
        let response = self.client.delete(self.document_url(user, id)).send()?;

        // Deleting an absent document succeeds; delete is idempotent.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::check_status(response)?;
        Ok(())
    }
}
