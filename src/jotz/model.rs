use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Pastel palette offered when creating entries. The store accepts any
/// non-empty color string; this list is a UI default, not a constraint.
pub const ENTRY_COLORS: [&str; 10] = [
    "#A8D0E6", "#FADADD", "#E6E6FA", "#FFDDC1", "#D4F0F0", "#FEE1E8", "#E0BBE4", "#D2F8B0",
    "#FEEAA1", "#B9E2A0",
];

pub fn default_color() -> String {
    ENTRY_COLORS[0].to_string()
}

/// Identifier of a single entry, unique within one user's partition and
/// immutable for the life of the entry. Opaque to everything above the
/// store; only the store mints new ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Mints a fresh identifier. Uniqueness relies on UUID v4 randomness;
    /// a collision is a bug, not a case to handle.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque user identifier scoping every storage operation. Supplied by
/// the identity layer; the journal core only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One journal entry, the canonical shape used everywhere above the
/// store boundary.
///
/// `content` is opaque text. Entries written by older versions of the
/// app may carry embedded HTML markup; the store never interprets or
/// strips it. Any stripping is a display concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    pub content: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Materializes a draft into a stored entry: fresh id, both
    /// timestamps stamped now. The draft's advisory timestamps are
    /// discarded.
    pub fn from_draft(draft: EntryDraft) -> Self {
        let now = Utc::now();
        Self {
            id: EntryId::generate(),
            title: draft.title,
            content: draft.content,
            color: draft.color,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies an incoming update on top of this stored entry. Title,
    /// content and color come from `incoming`; `id` and `created_at`
    /// stay as stored; `updated_at` is stamped now. Keeps
    /// `created_at <= updated_at` regardless of what the caller sends.
    pub fn apply_update(&self, incoming: &Entry) -> Entry {
        Entry {
            id: self.id.clone(),
            title: incoming.title.clone(),
            content: incoming.content.clone(),
            color: incoming.color.clone(),
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }
}

/// Payload for creating a new entry: an [`Entry`] minus the id. The
/// timestamps are advisory; the store overrides both on write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub title: String,
    pub content: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EntryDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>, color: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            title: title.into(),
            content: content.into(),
            color: color.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
