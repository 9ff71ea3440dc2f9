//! # Rolodex Core
//!
//! Core data structures for the Rolodex contact book.
//!
//! - [`Contact`] - A contact record with a stable [`ContactId`]
//! - [`ContactSnapshot`] - Immutable, name-ordered view of a collection
//! - [`ContactSource`] - The observable collection contract the search engine consumes
//! - [`ContactStore`] - In-memory source publishing a snapshot on every change
//!
//! ## Example
//!
//! ```rust
//! use rolodex_core::{Contact, ContactSource, ContactStore};
//!
//! let store = ContactStore::new();
//! let id = store.insert(Contact::new("Jon Snow", "+1 555 1234")).unwrap();
//!
//! assert_eq!(store.get_by_id(id).unwrap().name, "Jon Snow");
//! assert_eq!(store.all().len(), 1);
//! ```

pub mod contact;
pub mod error;
pub mod source;
pub mod store;

pub use contact::{Contact, ContactId};
pub use error::{Error, Result, SourceError};
pub use source::{ContactSnapshot, ContactSource, SnapshotUpdate};
pub use store::ContactStore;
