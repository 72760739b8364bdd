//! Best scores in a checksummed binary file under `~/.flappy-dart/`.

use super::{beats, ScoreStore, StoreError, UserId};
use crate::core::constants::{SCORES_FILE, SCORES_MAGIC};
use crate::utils::persistence::save_path;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A user's best score and when it was set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub score: u32,
    pub updated_at: DateTime<Utc>,
}

type ScoreTable = BTreeMap<UserId, BestScore>;

/// Keeps best scores in a checksummed binary file.
///
/// File format:
/// - Magic (8 bytes, LE)
/// - Payload length (4 bytes, LE)
/// - bincode-encoded table (variable length)
/// - SHA256 over everything above (32 bytes)
pub struct LocalScoreStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LocalScoreStore {
    /// Store at `~/.flappy-dart/scores.dat`.
    pub fn new() -> io::Result<Self> {
        Ok(Self::with_path(save_path(SCORES_FILE)?))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored entry, or an empty table if the file does not exist yet.
    pub fn load(&self) -> Result<BTreeMap<UserId, BestScore>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => decode(&bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ScoreTable::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Like `load`, but a corrupt file is moved aside and replaced by an
    /// empty table so later submits can persist again.
    fn load_or_recover(&self) -> Result<ScoreTable, StoreError> {
        match self.load() {
            Err(StoreError::Corrupt(reason)) => {
                let aside = self.sibling("corrupt");
                log::warn!(
                    "score file {} is corrupt ({}); moving it to {}",
                    self.path.display(),
                    reason,
                    aside.display()
                );
                fs::rename(&self.path, &aside)?;
                Ok(ScoreTable::new())
            }
            other => other,
        }
    }

    /// Write to a temporary file and rename it over the old one, so a crash
    /// mid-write leaves the previous table intact.
    fn save(&self, table: &ScoreTable) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.sibling("tmp");
        fs::write(&tmp, encode(table)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// `scores.dat` -> `scores.dat.<suffix>`
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>, StoreError> {
        self.lock
            .lock()
            .map_err(|_| StoreError::Corrupt("score file lock poisoned".to_string()))
    }
}

impl ScoreStore for LocalScoreStore {
    fn submit(&self, user: &UserId, score: u32) -> Result<(), StoreError> {
        let _guard = self.guard()?;
        let mut table = self.load_or_recover()?;
        if !beats(table.get(user).map(|b| b.score), score) {
            return Ok(());
        }
        table.insert(
            user.clone(),
            BestScore {
                score,
                updated_at: Utc::now(),
            },
        );
        self.save(&table)
    }

    fn best_score(&self, user: &UserId) -> Result<Option<u32>, StoreError> {
        let _guard = self.guard()?;
        Ok(self.load()?.get(user).map(|b| b.score))
    }
}

fn encode(table: &ScoreTable) -> Result<Vec<u8>, StoreError> {
    let data = bincode::serialize(table)?;
    let data_len = data.len() as u32;

    let mut out = Vec::with_capacity(8 + 4 + data.len() + 32);
    out.extend_from_slice(&SCORES_MAGIC.to_le_bytes());
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(&data);

    let checksum = Sha256::digest(&out);
    out.extend_from_slice(&checksum);
    Ok(out)
}

fn decode(bytes: &[u8]) -> Result<ScoreTable, StoreError> {
    if bytes.len() < 8 + 4 + 32 {
        return Err(StoreError::Corrupt("file too short".to_string()));
    }

    let (header, rest) = bytes.split_at(12);
    let mut magic_bytes = [0u8; 8];
    magic_bytes.copy_from_slice(&header[..8]);
    let magic = u64::from_le_bytes(magic_bytes);
    if magic != SCORES_MAGIC {
        return Err(StoreError::Corrupt(format!(
            "bad magic: expected 0x{:016X}, got 0x{:016X}",
            SCORES_MAGIC, magic
        )));
    }

    let mut length_bytes = [0u8; 4];
    length_bytes.copy_from_slice(&header[8..12]);
    let data_len = u32::from_le_bytes(length_bytes) as usize;
    if rest.len() != data_len + 32 {
        return Err(StoreError::Corrupt("length mismatch".to_string()));
    }

    let (data, stored_checksum) = rest.split_at(data_len);
    let computed = Sha256::digest(&bytes[..12 + data_len]);
    if stored_checksum != computed.as_slice() {
        return Err(StoreError::Corrupt(
            "checksum verification failed".to_string(),
        ));
    }

    Ok(bincode::deserialize(data)?)
}
