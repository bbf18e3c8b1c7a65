//! Local identity provisioning.
//!
//! The journal core scopes everything by an opaque [`UserId`] it is
//! handed; it never owns the identity lifecycle. This module is the
//! minimal provider behind that contract: an anonymous identity is a
//! generated id persisted in `identity.json` under the data dir, so the
//! same journal opens on every run. Nothing here talks to an auth
//! service.

use crate::error::{JotzError, Result};
use crate::model::UserId;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const IDENTITY_FILENAME: &str = "identity.json";

/// The persisted identity record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    #[serde(default)]
    pub anonymous: bool,
}

/// Reads the current identity. An absent file means signed out. A file
/// that no longer parses also reads as signed out, with a warning; the
/// next sign-in rewrites it.
pub fn current_user<P: AsRef<Path>>(data_dir: P) -> Result<Option<UserId>> {
    let path = data_dir.as_ref().join(IDENTITY_FILENAME);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(JotzError::Io)?;
    match serde_json::from_str::<Identity>(&content) {
        Ok(identity) => Ok(Some(identity.user_id)),
        Err(e) => {
            warn!(
                "corrupt identity file {}: {}; treating as signed out",
                path.display(),
                e
            );
            Ok(None)
        }
    }
}

/// Signs in anonymously. When an identity already exists it is returned
/// unchanged, so repeated sign-ins keep opening the same journal.
pub fn sign_in_anonymously<P: AsRef<Path>>(data_dir: P) -> Result<UserId> {
    if let Some(existing) = current_user(&data_dir)? {
        return Ok(existing);
    }

    let identity = Identity {
        user_id: UserId::generate(),
        anonymous: true,
    };
    save_identity(&data_dir, &identity)?;
    Ok(identity.user_id)
}

/// Removes the identity file. Idempotent. The journal files stay on
/// disk; a later sign-in mints a fresh identity with an empty journal.
pub fn sign_out<P: AsRef<Path>>(data_dir: P) -> Result<()> {
    let path = data_dir.as_ref().join(IDENTITY_FILENAME);
    if path.exists() {
        fs::remove_file(path).map_err(JotzError::Io)?;
    }
    Ok(())
}

fn save_identity<P: AsRef<Path>>(data_dir: P, identity: &Identity) -> Result<()> {
    let dir = data_dir.as_ref();
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(JotzError::Io)?;
    }

    let content = serde_json::to_string_pretty(identity).map_err(JotzError::Serialization)?;
    fs::write(dir.join(IDENTITY_FILENAME), content).map_err(JotzError::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fresh_dir_is_signed_out() {
        let temp = TempDir::new().unwrap();
        assert_eq!(current_user(temp.path()).unwrap(), None);
    }

    #[test]
    fn test_sign_in_is_idempotent() {
        let temp = TempDir::new().unwrap();

        let first = sign_in_anonymously(temp.path()).unwrap();
        let second = sign_in_anonymously(temp.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(current_user(temp.path()).unwrap(), Some(first));
    }

    #[test]
    fn test_sign_out_then_sign_in_mints_new_identity() {
        let temp = TempDir::new().unwrap();

        let first = sign_in_anonymously(temp.path()).unwrap();
        sign_out(temp.path()).unwrap();
        assert_eq!(current_user(temp.path()).unwrap(), None);

        let second = sign_in_anonymously(temp.path()).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_sign_out_is_idempotent() {
        let temp = TempDir::new().unwrap();
        sign_out(temp.path()).unwrap();
        sign_out(temp.path()).unwrap();
    }

    #[test]
    fn test_corrupt_identity_reads_as_signed_out() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(IDENTITY_FILENAME), "{not json").unwrap();

        assert_eq!(current_user(temp.path()).unwrap(), None);
    }
}
