//! # Rolodex Storage
//!
//! Durability for the contact store:
//!
//! - [`WriteAheadLog`] - JSON-lines log of every insert and update
//! - [`DumpFile`] - bincode dump of the whole store, replaced atomically
//! - [`BackupManager`] - gzip JSON backups with SHA-256 checksums
//! - [`StorageManager`] - ties them together and implements
//!   [`ContactSource`](rolodex_core::ContactSource)

pub mod backup;
pub mod manager;
pub mod persistence;
pub mod wal;

pub use backup::{BackupData, BackupDescription, BackupError, BackupManager};
pub use manager::{StorageManager, DEFAULT_SAVE_INTERVAL};
pub use persistence::{DumpData, DumpFile};
pub use wal::{WalEntry, WriteAheadLog};
