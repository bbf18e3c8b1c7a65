use crate::model::EntryId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JotzError {
    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),

    #[error("Identity error: {0}")]
    Identity(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, JotzError>;
