use anyhow::{Context, Result};
use parking_lot::Mutex;
use rolodex_core::Contact;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// One logged mutation. Contacts are logged with their final id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "contact", rename_all = "lowercase")]
pub enum WalEntry {
    Insert(Contact),
    Update(Contact),
}

impl WalEntry {
    pub fn contact(&self) -> &Contact {
        match self {
            WalEntry::Insert(c) | WalEntry::Update(c) => c,
        }
    }
}

/// Write-Ahead Log for durability.
/// Append-only, one JSON entry per line, in the spirit of Redis' AOF.
pub struct WriteAheadLog {
    file: Mutex<BufWriter<File>>,
    raw_file: Mutex<File>, // For fsync operations
    path: PathBuf,
}

impl WriteAheadLog {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening WAL at {}", path.display()))?;

        let raw_file = file.try_clone()?;

        Ok(Self {
            file: Mutex::new(BufWriter::new(file)),
            raw_file: Mutex::new(raw_file),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an entry and flush it to the OS
    pub fn append(&self, entry: &WalEntry) -> Result<()> {
        let line = serde_json::to_vec(entry)?;
        let mut writer = self.file.lock();
        writer.write_all(&line)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Flush and fdatasync
    pub fn sync(&self) -> Result<()> {
        let mut writer = self.file.lock();
        writer.flush()?;
        self.raw_file.lock().sync_data()?;
        Ok(())
    }

    /// Drop every entry, once they are covered by a dump
    pub fn truncate(&self) -> Result<()> {
        let mut writer = self.file.lock();
        writer.flush()?;
        let raw = self.raw_file.lock();
        raw.set_len(0)?;
        raw.sync_all()?;
        Ok(())
    }

    /// Read back every entry in the log at `path`.
    ///
    /// A missing file is an empty log. A torn final line (crash mid-append)
    /// is skipped; a corrupt line anywhere else is an error.
    pub fn replay<P: AsRef<Path>>(path: P) -> Result<Vec<WalEntry>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(path)?);
        let lines: Vec<String> = reader
            .lines()
            .collect::<std::io::Result<_>>()?;
        let last = lines.len().saturating_sub(1);

        let mut entries = Vec::with_capacity(lines.len());
        for (i, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(entry) => entries.push(entry),
                Err(e) if i == last => {
                    warn!(path = %path.display(), error = %e, "Skipping torn WAL tail");
                }
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("corrupt WAL entry at {}:{}", path.display(), i + 1)
                    })
                }
            }
        }
        Ok(entries)
    }
}
