use crate::contact::ContactId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Contact not found: {0}")]
    ContactNotFound(ContactId),

    #[error("Contact already exists: {0}")]
    ContactExists(ContactId),

    #[error("Invalid contact: {0}")]
    InvalidContact(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Contact source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// A collection read failure as seen by observers of a contact source.
///
/// Unlike [`Error`] this is cheap to clone, so it can travel through a
/// `watch` channel next to successful snapshots.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct SourceError {
    pub reason: String,
}

impl SourceError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<SourceError> for Error {
    fn from(e: SourceError) -> Self {
        Error::SourceUnavailable(e.reason)
    }
}
