// Portable backups: gzip-compressed JSON with a SHA-256 sidecar
use anyhow::Result;
use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use rolodex_core::Contact;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const BACKUP_EXTENSION: &str = "backup";
const CHECKSUM_EXTENSION: &str = "sha256";

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Backup '{0}' not found")]
    NotFound(String),

    #[error("Invalid backup name '{0}'")]
    InvalidName(String),

    #[error("Checksum mismatch for '{name}': expected {expected}, got {actual}")]
    ChecksumMismatch {
        name: String,
        expected: String,
        actual: String,
    },
}

/// Backup description for listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupDescription {
    pub name: String,
    pub creation_time: Option<String>,
    pub size: u64,
    pub contacts: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

/// Backup payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupData {
    pub contacts: Vec<Contact>,
    pub next_id: u64,
    pub created_at: DateTime<Utc>,
}

pub struct BackupManager {
    backup_dir: PathBuf,
}

impl BackupManager {
    pub fn new<P: AsRef<Path>>(backup_dir: P) -> Result<Self> {
        let backup_dir = backup_dir.as_ref().to_path_buf();
        fs::create_dir_all(&backup_dir)?;
        Ok(Self { backup_dir })
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Timestamped name, suffixed when a backup with that name already exists
    fn generate_backup_name(&self, at: DateTime<Utc>) -> String {
        let stem = format!("contacts-{}", at.format("%Y-%m-%d-%H-%M-%S"));
        let mut name = format!("{}.{}", stem, BACKUP_EXTENSION);
        let mut n = 1;
        while self.backup_dir.join(&name).exists() {
            name = format!("{}-{}.{}", stem, n, BACKUP_EXTENSION);
            n += 1;
        }
        name
    }

    /// Resolve a user-supplied name, refusing anything outside the backup dir
    fn backup_path(&self, name: &str) -> Result<PathBuf> {
        let valid = !name.is_empty()
            && !name.contains(['/', '\\'])
            && name != "."
            && name != ".."
            && name.ends_with(&format!(".{}", BACKUP_EXTENSION));
        if !valid {
            return Err(BackupError::InvalidName(name.to_string()).into());
        }
        Ok(self.backup_dir.join(name))
    }

    fn checksum_path(path: &Path) -> PathBuf {
        let mut os = path.as_os_str().to_owned();
        os.push(".");
        os.push(CHECKSUM_EXTENSION);
        PathBuf::from(os)
    }

    fn describe(path: &Path, name: &str, contacts: Option<usize>) -> Result<BackupDescription> {
        let file_data = fs::read(path)?;
        let checksum = format!("{:x}", Sha256::digest(&file_data));
        let creation_time = fs::metadata(path)?
            .modified()
            .ok()
            .map(|t| DateTime::<Utc>::from(t).format("%Y-%m-%dT%H:%M:%SZ").to_string());

        Ok(BackupDescription {
            name: name.to_string(),
            creation_time,
            size: file_data.len() as u64,
            contacts,
            checksum: Some(checksum),
        })
    }

    /// Write a new backup and its checksum file
    pub fn create(&self, data: &BackupData) -> Result<BackupDescription> {
        let name = self.generate_backup_name(data.created_at);
        let path = self.backup_dir.join(&name);

        let json_data = serde_json::to_vec(data)?;
        let file = File::create(&path)?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        encoder.write_all(&json_data)?;
        encoder.finish()?.flush()?;

        let description = Self::describe(&path, &name, Some(data.contacts.len()))?;
        if let Some(checksum) = &description.checksum {
            fs::write(Self::checksum_path(&path), checksum)?;
        }
        Ok(description)
    }

    /// All backups, newest first
    pub fn list(&self) -> Result<Vec<BackupDescription>> {
        let mut backups = Vec::new();
        for entry in fs::read_dir(&self.backup_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                backups.push(Self::describe(&path, name, None)?);
            }
        }

        // Names embed the timestamp
        backups.sort_by(|a, b| b.name.cmp(&a.name));
        Ok(backups)
    }

    /// Read a backup, verifying it against its checksum file when present
    pub fn load(&self, name: &str) -> Result<BackupData> {
        let path = self.backup_path(name)?;
        if !path.exists() {
            return Err(BackupError::NotFound(name.to_string()).into());
        }

        let compressed = fs::read(&path)?;
        let checksum_path = Self::checksum_path(&path);
        if checksum_path.exists() {
            let expected = fs::read_to_string(&checksum_path)?.trim().to_string();
            let actual = format!("{:x}", Sha256::digest(&compressed));
            if actual != expected {
                return Err(BackupError::ChecksumMismatch {
                    name: name.to_string(),
                    expected,
                    actual,
                }
                .into());
            }
        }

        let mut decoder = GzDecoder::new(BufReader::new(compressed.as_slice()));
        let mut json_data = Vec::new();
        decoder.read_to_end(&mut json_data)?;
        Ok(serde_json::from_slice(&json_data)?)
    }

    /// Delete a backup and its checksum. `false` if it did not exist.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let path = self.backup_path(name)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        let checksum_path = Self::checksum_path(&path);
        if checksum_path.exists() {
            fs::remove_file(checksum_path)?;
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn data() -> BackupData {
        BackupData {
            contacts: vec![
                Contact::new("Jon Snow", "+1 555 1234").with_id(1),
                Contact::new("Arya Stark", "+1 555 0000").with_id(2),
            ],
            next_id: 3,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_list_load() {
        let dir = tempdir().unwrap();
        let backups = BackupManager::new(dir.path().join("backups")).unwrap();
        let data = data();

        let description = backups.create(&data).unwrap();
        assert!(description.name.starts_with("contacts-"));
        assert!(description.name.ends_with(".backup"));
        assert_eq!(description.contacts, Some(2));
        assert_eq!(description.checksum.as_ref().map(|c| c.len()), Some(64));

        let listed = backups.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, description.name);
        assert_eq!(listed[0].checksum, description.checksum);

        assert_eq!(backups.load(&description.name).unwrap(), data);
    }

    #[test]
    fn test_same_second_backups_get_distinct_names() {
        let dir = tempdir().unwrap();
        let backups = BackupManager::new(dir.path()).unwrap();
        let data = data();
        let a = backups.create(&data).unwrap();
        let b = backups.create(&data).unwrap();
        assert_ne!(a.name, b.name);
        assert_eq!(backups.list().unwrap().len(), 2);
    }

    #[test]
    fn test_checksum_mismatch_detected() {
        let dir = tempdir().unwrap();
        let backups = BackupManager::new(dir.path()).unwrap();
        let description = backups.create(&data()).unwrap();

        let path = dir.path().join(&description.name);
        let mut bytes = fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;
        fs::write(&path, bytes).unwrap();

        let err = backups.load(&description.name).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BackupError>(),
            Some(BackupError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_delete_and_missing() {
        let dir = tempdir().unwrap();
        let backups = BackupManager::new(dir.path()).unwrap();
        let description = backups.create(&data()).unwrap();

        assert!(backups.delete(&description.name).unwrap());
        assert!(!backups.delete(&description.name).unwrap());
        assert!(backups.list().unwrap().is_empty());

        let err = backups.load(&description.name).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BackupError>(),
            Some(BackupError::NotFound(_))
        ));
    }

    #[test]
    fn test_rejects_path_traversal() {
        let dir = tempdir().unwrap();
        let backups = BackupManager::new(dir.path()).unwrap();
        for name in ["../escape.backup", "a/b.backup", "dump.rdb", ""] {
            let err = backups.load(name).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<BackupError>(),
                Some(BackupError::InvalidName(_))
            ));
        }
    }
}
