//! Process wiring.
//!
//! Resolves where state lives, loads configuration, and builds the
//! single store handle for the process. Backend selection happens here
//! and nowhere else; everything downstream works against the
//! [`EntryStore`] contract without knowing which backend answered.

use crate::api::Journal;
use crate::config::{BackendKind, JotzConfig};
use crate::error::{JotzError, Result};
use crate::model::{Entry, EntryDraft, EntryId, UserId};
use crate::session::EntrySession;
use crate::store::fs::FileStore;
use crate::store::remote::RemoteStore;
use crate::store::EntryStore;
use directories::ProjectDirs;
use std::env;
use std::path::{Path, PathBuf};

/// Environment override for the data directory. Tests point this at a
/// temp dir so runs stay isolated; normal runs use the platform dir.
pub const DATA_DIR_ENV: &str = "JOTZ_DATA_DIR";

/// The one store handle for the process, holding whichever backend the
/// configuration selected.
#[derive(Debug)]
pub enum StoreHandle {
    Local(FileStore),
    Remote(RemoteStore),
}

impl EntryStore for StoreHandle {
    fn list_entries(&self, user: &UserId) -> Result<Vec<Entry>> {
        match self {
            StoreHandle::Local(s) => s.list_entries(user),
            StoreHandle::Remote(s) => s.list_entries(user),
        }
    }

    fn create_entry(&mut self, user: &UserId, draft: EntryDraft) -> Result<Entry> {
        match self {
            StoreHandle::Local(s) => s.create_entry(user, draft),
            StoreHandle::Remote(s) => s.create_entry(user, draft),
        }
    }

    fn update_entry(&mut self, user: &UserId, entry: &Entry) -> Result<Entry> {
        match self {
            StoreHandle::Local(s) => s.update_entry(user, entry),
            StoreHandle::Remote(s) => s.update_entry(user, entry),
        }
    }

    fn delete_entry(&mut self, user: &UserId, id: &EntryId) -> Result<()> {
        match self {
            StoreHandle::Local(s) => s.delete_entry(user, id),
            StoreHandle::Remote(s) => s.delete_entry(user, id),
        }
    }
}

/// Wired-up state for one CLI invocation. The session starts `Idle`;
/// commands that touch entries activate it with the signed-in user.
pub struct JotzContext {
    pub data_dir: PathBuf,
    pub config: JotzConfig,
    pub session: EntrySession<StoreHandle>,
}

/// Resolves the data directory: the env override wins, then the
/// platform data dir.
pub fn resolve_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    let proj_dirs = ProjectDirs::from("com", "jotz", "jotz")
        .ok_or_else(|| JotzError::Config("could not determine a data directory".to_string()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

/// Builds the store handle the configuration asks for.
pub fn provision_store(data_dir: &Path, config: &JotzConfig) -> Result<StoreHandle> {
    match config.backend {
        BackendKind::Local => Ok(StoreHandle::Local(FileStore::new(data_dir.to_path_buf()))),
        BackendKind::Remote => {
            let url = config.require_remote_url()?;
            Ok(StoreHandle::Remote(RemoteStore::new(url)))
        }
    }
}

/// Resolves directories, loads config, and wires the session over the
/// configured store.
pub fn initialize() -> Result<JotzContext> {
    let data_dir = resolve_data_dir()?;
    let config = JotzConfig::load(&data_dir)?;
    let store = provision_store(&data_dir, &config)?;
    let session = EntrySession::new(Journal::new(store));

    Ok(JotzContext {
        data_dir,
        config,
        session,
    })
}
