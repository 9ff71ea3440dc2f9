use anyhow::{anyhow, Result};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use rolodex_core::{Contact, ContactStore};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Everything needed to rebuild a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DumpData {
    pub contacts: Vec<Contact>,
    pub next_id: u64,
    pub timestamp: u64,
}

impl DumpData {
    pub fn from_store(store: &ContactStore) -> Self {
        Self {
            contacts: store.all().contacts().to_vec(),
            next_id: store.next_id(),
            timestamp: unix_now(),
        }
    }
}

pub(crate) fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Point-in-time bincode dump of the whole store (`dump.rdb`).
///
/// Writes go to a temporary file that is renamed over the old dump, so a
/// crash mid-save leaves the previous dump intact.
pub struct DumpFile {
    path: PathBuf,
    save_in_progress: AtomicBool,
    last_save_time: AtomicU64,
}

impl DumpFile {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            path: data_dir.as_ref().join("dump.rdb"),
            save_in_progress: AtomicBool::new(false),
            last_save_time: AtomicU64::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the dump. Returns `false` without writing if another save is
    /// already running.
    pub fn save(&self, data: &DumpData) -> Result<bool> {
        if self.save_in_progress.swap(true, Ordering::Acquire) {
            return Ok(false);
        }

        let result = self.write(data);
        self.save_in_progress.store(false, Ordering::Release);
        result?;

        self.last_save_time.store(data.timestamp, Ordering::Release);
        Ok(true)
    }

    fn write(&self, data: &DumpData) -> Result<()> {
        let bytes =
            bincode::serialize(data).map_err(|e| anyhow!("Serialization error: {}", e))?;
        AtomicFile::new(&self.path, OverwriteBehavior::AllowOverwrite)
            .write(|f| f.write_all(&bytes))?;
        Ok(())
    }

    /// Load the dump from disk (on startup)
    pub fn load(&self) -> Result<Option<DumpData>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = std::fs::read(&self.path)?;
        let data: DumpData =
            bincode::deserialize(&bytes).map_err(|e| anyhow!("Deserialization error: {}", e))?;
        Ok(Some(data))
    }

    pub fn is_save_in_progress(&self) -> bool {
        self.save_in_progress.load(Ordering::Acquire)
    }

    /// Unix time of the last successful save by this process, 0 if none
    pub fn last_save_time(&self) -> u64 {
        self.last_save_time.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let dump = DumpFile::new(dir.path());
        assert!(dump.load().unwrap().is_none());

        let store = ContactStore::new();
        store
            .insert(Contact::new("Jon Snow", "+1 555 1234").with_relationship("brother"))
            .unwrap();
        store.insert(Contact::new("Arya Stark", "+1 555 0000")).unwrap();

        let data = DumpData::from_store(&store);
        assert!(dump.save(&data).unwrap());
        assert_eq!(dump.last_save_time(), data.timestamp);
        assert!(!dump.is_save_in_progress());

        let loaded = dump.load().unwrap().unwrap();
        assert_eq!(loaded, data);
        assert_eq!(loaded.next_id, 3);
    }

    #[test]
    fn test_overwrite_replaces_dump() {
        let dir = tempdir().unwrap();
        let dump = DumpFile::new(dir.path());

        let mut data = DumpData {
            contacts: vec![Contact::new("Jon", "1").with_id(1)],
            next_id: 2,
            timestamp: 1,
        };
        dump.save(&data).unwrap();
        data.contacts.clear();
        dump.save(&data).unwrap();

        assert!(dump.load().unwrap().unwrap().contacts.is_empty());
    }

    #[test]
    fn test_corrupt_dump_is_an_error() {
        let dir = tempdir().unwrap();
        let dump = DumpFile::new(dir.path());
        std::fs::write(dump.path(), b"\x01\x02").unwrap();
        assert!(dump.load().is_err());
    }
}
