use crate::backup::{BackupData, BackupDescription, BackupManager};
use crate::persistence::{DumpData, DumpFile};
use crate::wal::{WalEntry, WriteAheadLog};
use chrono::Utc;
use parking_lot::Mutex;
use rolodex_core::{
    Contact, ContactId, ContactSnapshot, ContactSource, ContactStore, Error, Result,
    SnapshotUpdate,
};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Default interval between background saves
pub const DEFAULT_SAVE_INTERVAL: Duration = Duration::from_secs(300);

/// Pieces shared with the background save thread
struct Durable {
    store: Arc<ContactStore>,
    wal: WriteAheadLog,
    dump: DumpFile,
    /// Serializes WAL append + store apply, and dump + WAL truncate
    write_lock: Mutex<()>,
}

impl Durable {
    fn save(&self) -> Result<bool> {
        let _guard = self.write_lock.lock();
        self.save_locked()
    }

    /// Caller holds `write_lock`
    fn save_locked(&self) -> Result<bool> {
        let data = DumpData::from_store(&self.store);
        let saved = self
            .dump
            .save(&data)
            .map_err(|e| Error::Persistence(e.to_string()))?;
        if saved {
            self.wal
                .truncate()
                .map_err(|e| Error::Persistence(e.to_string()))?;
            debug!(contacts = data.contacts.len(), "Dump saved, WAL truncated");
        }
        Ok(saved)
    }
}

/// Read the dump and WAL into a contact list and next id
fn load_from_disk(dump: &DumpFile, wal_path: &Path) -> anyhow::Result<(Vec<Contact>, u64)> {
    let (mut contacts, next_id) = match dump.load()? {
        Some(data) => {
            info!(contacts = data.contacts.len(), "Loading dump from disk");
            (data.contacts, data.next_id)
        }
        None => (Vec::new(), 1),
    };

    let entries = WriteAheadLog::replay(wal_path)?;
    if !entries.is_empty() {
        info!(entries = entries.len(), "Replaying WAL");
    }

    // The dump may already hold some replayed entries, so replay upserts.
    let mut next_id = next_id;
    for entry in entries {
        let contact = match entry {
            WalEntry::Insert(c) | WalEntry::Update(c) => c,
        };
        next_id = next_id.max(contact.id.0 + 1);
        match contacts.iter_mut().find(|c| c.id == contact.id) {
            Some(existing) => *existing = contact,
            None => contacts.push(contact),
        }
    }

    Ok((contacts, next_id))
}

/// Durable contact collection: a [`ContactStore`] kept on disk as a bincode
/// dump plus a JSON-lines write-ahead log.
///
/// Every mutation is appended to the WAL before it is applied to the store.
/// [`save`](Self::save) folds the WAL into a fresh dump; a background thread
/// does the same periodically.
pub struct StorageManager {
    durable: Arc<Durable>,
    data_dir: PathBuf,
    backups: BackupManager,
    // Dropping the sender stops the background save thread
    _stop_background: Option<mpsc::Sender<()>>,
}

impl StorageManager {
    /// Open (or create) the data directory with the default save interval
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        Self::open_with_interval(data_dir, Some(DEFAULT_SAVE_INTERVAL))
    }

    /// Open the data directory. `None` disables background saves.
    pub fn open_with_interval<P: AsRef<Path>>(
        data_dir: P,
        save_interval: Option<Duration>,
    ) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        let dump = DumpFile::new(&data_dir);
        let wal_path = data_dir.join("wal.log");
        let (contacts, next_id) =
            load_from_disk(&dump, &wal_path).map_err(|e| Error::Persistence(e.to_string()))?;

        let store = Arc::new(ContactStore::new());
        store.restore(contacts, next_id)?;

        let wal = WriteAheadLog::open(&wal_path).map_err(|e| Error::Storage(e.to_string()))?;
        let backups = BackupManager::new(data_dir.join("backups"))
            .map_err(|e| Error::Storage(e.to_string()))?;

        let durable = Arc::new(Durable {
            store,
            wal,
            dump,
            write_lock: Mutex::new(()),
        });

        let stop = save_interval.map(|interval| start_background_save(durable.clone(), interval));

        info!(
            path = %data_dir.display(),
            contacts = ?durable.store.count(),
            "Storage opened"
        );

        Ok(Self {
            durable,
            data_dir,
            backups,
            _stop_background: stop,
        })
    }

    /// The in-memory store behind this manager. Mutate through the manager
    /// only, or changes will not reach disk.
    pub fn store(&self) -> Arc<ContactStore> {
        self.durable.store.clone()
    }

    #[inline]
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn all(&self) -> ContactSnapshot {
        self.durable.store.all()
    }

    /// Log and apply an insert. Assigns the next id when the contact has none.
    pub fn insert(&self, mut contact: Contact) -> Result<ContactId> {
        let _guard = self.durable.write_lock.lock();
        let store = &self.durable.store;

        if contact.id.is_assigned() {
            if store.get(contact.id).is_some() {
                return Err(Error::ContactExists(contact.id));
            }
        } else {
            contact.id = ContactId(store.next_id());
        }

        self.durable
            .wal
            .append(&WalEntry::Insert(contact.clone()))
            .map_err(|e| Error::Storage(e.to_string()))?;
        store.insert(contact)
    }

    /// Log and apply a batch of inserts as one snapshot. Used for seeding
    /// and imports, where per-contact snapshots would be wasted.
    pub fn insert_many(&self, contacts: Vec<Contact>) -> Result<Vec<ContactId>> {
        let _guard = self.durable.write_lock.lock();
        let store = &self.durable.store;

        let mut next_id = store.next_id();
        let mut staged = Vec::with_capacity(contacts.len());
        for mut contact in contacts {
            if contact.id.is_assigned() {
                let clash = store.get(contact.id).is_some()
                    || staged.iter().any(|c: &Contact| c.id == contact.id);
                if clash {
                    return Err(Error::ContactExists(contact.id));
                }
                next_id = next_id.max(contact.id.0 + 1);
            } else {
                contact.id = ContactId(next_id);
                next_id += 1;
            }
            staged.push(contact);
        }

        for contact in &staged {
            self.durable
                .wal
                .append(&WalEntry::Insert(contact.clone()))
                .map_err(|e| Error::Storage(e.to_string()))?;
        }
        store.insert_many(staged)
    }

    /// Log and apply an update of an existing contact
    pub fn update(&self, contact: Contact) -> Result<()> {
        let _guard = self.durable.write_lock.lock();
        let store = &self.durable.store;

        if !contact.id.is_assigned() {
            return Err(Error::InvalidContact(
                "cannot update a contact without an id".to_string(),
            ));
        }
        if store.get(contact.id).is_none() {
            return Err(Error::ContactNotFound(contact.id));
        }

        self.durable
            .wal
            .append(&WalEntry::Update(contact.clone()))
            .map_err(|e| Error::Storage(e.to_string()))?;
        store.update(contact)
    }

    /// Fold the WAL into a new dump. `false` if a save was already running.
    pub fn save(&self) -> Result<bool> {
        self.durable.save()
    }

    /// fsync the WAL
    pub fn sync(&self) -> Result<()> {
        self.durable
            .wal
            .sync()
            .map_err(|e| Error::Storage(e.to_string()))
    }

    pub fn last_save_time(&self) -> u64 {
        self.durable.dump.last_save_time()
    }

    /// Re-read the collection from disk. On failure observers see a
    /// degraded update until the next successful reload or mutation.
    pub fn reload(&self) -> Result<()> {
        let _guard = self.durable.write_lock.lock();
        let loaded = load_from_disk(&self.durable.dump, self.durable.wal.path());
        match loaded {
            Ok((contacts, next_id)) => self.durable.store.restore(contacts, next_id),
            Err(e) => {
                let reason = format!("reload failed: {e}");
                self.durable.store.report_failure(reason.clone());
                Err(Error::Persistence(reason))
            }
        }
    }

    // ==================== Backup Methods ====================

    pub fn create_backup(&self) -> Result<BackupDescription> {
        let data = {
            let _guard = self.durable.write_lock.lock();
            BackupData {
                contacts: self.durable.store.all().contacts().to_vec(),
                next_id: self.durable.store.next_id(),
                created_at: Utc::now(),
            }
        };
        let description = self
            .backups
            .create(&data)
            .map_err(|e| Error::Storage(e.to_string()))?;
        info!(name = %description.name, contacts = data.contacts.len(), "Backup created");
        Ok(description)
    }

    pub fn list_backups(&self) -> Result<Vec<BackupDescription>> {
        self.backups
            .list()
            .map_err(|e| Error::Storage(e.to_string()))
    }

    /// Replace the collection with a backup and persist the result
    pub fn restore_backup(&self, name: &str) -> Result<usize> {
        let data = self
            .backups
            .load(name)
            .map_err(|e| Error::Storage(e.to_string()))?;
        let count = data.contacts.len();

        let _guard = self.durable.write_lock.lock();
        self.durable.store.restore(data.contacts, data.next_id)?;
        self.durable.save_locked()?;
        info!(name, contacts = count, "Backup restored");
        Ok(count)
    }

    pub fn delete_backup(&self, name: &str) -> Result<bool> {
        self.backups
            .delete(name)
            .map_err(|e| Error::Storage(e.to_string()))
    }
}

/// Periodically save until the returned sender is dropped
fn start_background_save(durable: Arc<Durable>, interval: Duration) -> mpsc::Sender<()> {
    let (stop_tx, stop_rx) = mpsc::channel::<()>();

    let spawned = thread::Builder::new()
        .name("rolodex-bgsave".to_string())
        .spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => match durable.save() {
                    Ok(true) => debug!("Background save completed"),
                    Ok(false) => debug!("Background save skipped, save in progress"),
                    Err(e) => warn!(error = %e, "Background save failed"),
                },
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
    if let Err(e) = spawned {
        warn!(error = %e, "Could not start background save thread");
    }

    stop_tx
}

impl ContactSource for StorageManager {
    fn observe_all(&self) -> watch::Receiver<SnapshotUpdate> {
        self.durable.store.observe_all()
    }

    fn get_by_id(&self, id: ContactId) -> Result<Contact> {
        self.durable.store.get_by_id(id)
    }

    fn count(&self) -> Result<usize> {
        ContactSource::count(&*self.durable.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open(dir: &Path) -> StorageManager {
        StorageManager::open_with_interval(dir, None).unwrap()
    }

    #[test]
    fn test_insert_many_is_logged() {
        let dir = tempdir().unwrap();
        {
            let storage = open(dir.path());
            storage.insert(Contact::new("Jon Snow", "+1 555 1234")).unwrap();
            let ids = storage
                .insert_many(vec![
                    Contact::new("Arya Stark", "+1 555 0000"),
                    Contact::new("Sansa Stark", "+1 555 0001"),
                ])
                .unwrap();
            assert_eq!(ids, vec![ContactId(2), ContactId(3)]);
            assert_eq!(storage.all().version(), 2);

            let clash = storage.insert_many(vec![Contact::new("Dup", "0").with_id(1)]);
            assert!(matches!(clash, Err(Error::ContactExists(ContactId(1)))));
        }

        let storage = open(dir.path());
        assert_eq!(storage.count().unwrap(), 3);
        assert_eq!(storage.get_by_id(ContactId(3)).unwrap().name, "Sansa Stark");
    }

    #[test]
    fn test_wal_replay_restores_store() {
        let dir = tempdir().unwrap();
        let jon = {
            let storage = open(dir.path());
            let jon = storage.insert(Contact::new("Jon Snow", "+1 555 1234")).unwrap();
            storage.insert(Contact::new("Arya Stark", "+1 555 0000")).unwrap();
            storage
                .update(Contact::new("Jon Snow", "+1 555 9999").with_id(jon))
                .unwrap();
            storage.sync().unwrap();
            jon
        };

        let storage = open(dir.path());
        let snapshot = storage.all();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(storage.get_by_id(jon).unwrap().phone_number, "+1 555 9999");
        assert_eq!(storage.store().next_id(), 3);
    }

    #[test]
    fn test_save_then_more_writes() {
        let dir = tempdir().unwrap();
        {
            let storage = open(dir.path());
            storage.insert(Contact::new("Jon Snow", "1")).unwrap();
            assert!(storage.save().unwrap());
            assert!(storage.last_save_time() > 0);
            storage.insert(Contact::new("Sansa Stark", "2")).unwrap();
        }

        let wal = WriteAheadLog::replay(dir.path().join("wal.log")).unwrap();
        assert_eq!(wal.len(), 1);

        let storage = open(dir.path());
        let names: Vec<String> = storage.all().iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, vec!["Jon Snow", "Sansa Stark"]);
    }

    #[test]
    fn test_boundary_validation() {
        let dir = tempdir().unwrap();
        let storage = open(dir.path());
        let id = storage.insert(Contact::new("Jon", "1")).unwrap();

        assert!(matches!(
            storage.insert(Contact::new("Ghost", "2").with_id(id)),
            Err(Error::ContactExists(_))
        ));
        assert!(matches!(
            storage.update(Contact::new("Nobody", "3")),
            Err(Error::InvalidContact(_))
        ));
        assert!(matches!(
            storage.update(Contact::new("Nobody", "3").with_id(42)),
            Err(Error::ContactNotFound(_))
        ));

        // Rejected writes never reach the WAL
        assert_eq!(WriteAheadLog::replay(dir.path().join("wal.log")).unwrap().len(), 1);
    }

    #[test]
    fn test_backup_round_trip() {
        let dir = tempdir().unwrap();
        let storage = open(dir.path());
        storage.insert(Contact::new("Jon Snow", "1")).unwrap();
        storage.insert(Contact::new("Arya Stark", "2")).unwrap();

        let backup = storage.create_backup().unwrap();
        storage.insert(Contact::new("Hodor", "3")).unwrap();
        assert_eq!(storage.all().len(), 3);

        assert_eq!(storage.restore_backup(&backup.name).unwrap(), 2);
        assert_eq!(storage.all().len(), 2);
        // Ids are never reused after a restore
        assert_eq!(storage.store().next_id(), 4);

        drop(storage);
        let storage = open(dir.path());
        assert_eq!(storage.all().len(), 2);
        assert_eq!(storage.list_backups().unwrap().len(), 1);
        assert!(storage.delete_backup(&backup.name).unwrap());
        assert!(storage.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_restore_missing_backup_fails() {
        let dir = tempdir().unwrap();
        let storage = open(dir.path());
        assert!(matches!(
            storage.restore_backup("contacts-nope.backup"),
            Err(Error::Storage(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_reload_degrades_observers() {
        let dir = tempdir().unwrap();
        let storage = open(dir.path());
        storage.insert(Contact::new("Jon", "1")).unwrap();
        let mut rx = storage.observe_all();

        std::fs::write(dir.path().join("dump.rdb"), b"garbage").unwrap();
        assert!(matches!(storage.reload(), Err(Error::Persistence(_))));
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_err());

        std::fs::remove_file(dir.path().join("dump.rdb")).unwrap();
        storage.reload().unwrap();
        rx.changed().await.unwrap();
        assert!(matches!(&*rx.borrow(), Ok(s) if s.len() == 1));
    }
}
