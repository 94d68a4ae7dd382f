//! Durable storage for the usage accumulator.
//!
//! On-disk record: `NSPD` magic, one schema version byte, then the
//! bitcode-encoded [`UsageAccumulator`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use log::{debug, warn};
use thiserror::Error;

use super::accumulator::UsageAccumulator;

pub const MAGIC: &[u8; 4] = b"NSPD";
pub const SCHEMA_VERSION: u8 = 1;
const HEADER_LEN: usize = MAGIC.len() + 1;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no saved usage state")]
    NotFound,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("not a usage state file (bad magic)")]
    BadMagic,

    #[error("unsupported usage state version {0}")]
    UnsupportedVersion(u8),

    #[error("failed to encode usage state: {0}")]
    Encode(String),

    #[error("failed to decode usage state: {0}")]
    Decode(String),
}

/// Where the accumulator lives between runs
pub trait UsageStore {
    fn load(&self) -> Result<UsageAccumulator, StoreError>;
    fn save(&mut self, usage: &UsageAccumulator) -> Result<(), StoreError>;
}

pub fn encode(usage: &UsageAccumulator) -> Result<Vec<u8>, StoreError> {
    let body = bitcode::serialize(usage).map_err(|e| StoreError::Encode(e.to_string()))?;
    let mut out = Vec::with_capacity(HEADER_LEN + body.len());
    out.extend_from_slice(MAGIC);
    out.push(SCHEMA_VERSION);
    out.extend_from_slice(&body);
    Ok(out)
}

pub fn decode(bytes: &[u8]) -> Result<UsageAccumulator, StoreError> {
    if bytes.len() < HEADER_LEN || &bytes[..MAGIC.len()] != MAGIC {
        return Err(StoreError::BadMagic);
    }
    let version = bytes[MAGIC.len()];
    if version != SCHEMA_VERSION {
        return Err(StoreError::UnsupportedVersion(version));
    }
    bitcode::deserialize(&bytes[HEADER_LEN..]).map_err(|e| StoreError::Decode(e.to_string()))
}

/// Load saved totals, falling back to fresh ones anchored at `now`.
///
/// A missing file is the normal first-run case; anything else (corrupt
/// record, permission problem) is logged and treated the same way.
pub fn load_or_default(store: &dyn UsageStore, now: NaiveDateTime) -> UsageAccumulator {
    match store.load() {
        Ok(usage) => usage,
        Err(StoreError::NotFound) => {
            debug!("no usage state yet, starting from zero");
            UsageAccumulator::new(now)
        }
        Err(e) => {
            warn!("discarding unreadable usage state: {}", e);
            UsageAccumulator::new(now)
        }
    }
}

/// Default state file: `<data dir>/netspeed/usage_totals.bin`
pub fn default_state_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("netspeed").join("usage_totals.bin"))
}

/// Single-record file store
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "usage_totals.bin".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl UsageStore for FileStore {
    fn load(&self) -> Result<UsageAccumulator, StoreError> {
        let bytes = fs::read(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound,
            _ => StoreError::Io(e),
        })?;
        decode(&bytes)
    }

    /// Write the whole record to a sibling temp file, then rename it over
    /// the target so a crash mid-write never leaves a torn record.
    fn save(&mut self, usage: &UsageAccumulator) -> Result<(), StoreError> {
        let bytes = encode(usage)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.temp_path();
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Keeps the encoded record in memory (`--no-persist`, tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    bytes: Option<Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with raw bytes, valid or not
    #[cfg(test)]
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes: Some(bytes) }
    }

    #[cfg(test)]
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }
}

impl UsageStore for MemoryStore {
    fn load(&self) -> Result<UsageAccumulator, StoreError> {
        match &self.bytes {
            Some(bytes) => decode(bytes),
            None => Err(StoreError::NotFound),
        }
    }

    fn save(&mut self, usage: &UsageAccumulator) -> Result<(), StoreError> {
        self.bytes = Some(encode(usage)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_usage() -> UsageAccumulator {
        UsageAccumulator {
            day_download: 1024,
            week_download: 2048,
            month_download: 4096,
            year_download: 1 << 40,
            day_upload: 1,
            week_upload: 22,
            month_upload: 333,
            year_upload: u64::MAX,
            last_reset: NaiveDate::from_ymd_opt(2024, 2, 29)
                .unwrap()
                .and_hms_milli_opt(13, 37, 5, 250)
                .unwrap(),
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("usage_totals.bin"));
        let usage = sample_usage();

        store.save(&usage).unwrap();
        assert_eq!(store.load().unwrap(), usage);
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn file_store_overwrites_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("usage_totals.bin"));
        let mut usage = sample_usage();

        store.save(&usage).unwrap();
        usage.apply(10, 20, now());
        store.save(&usage).unwrap();

        assert_eq!(store.load().unwrap(), usage);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent.bin"));

        assert!(matches!(store.load(), Err(StoreError::NotFound)));
        assert_eq!(load_or_default(&store, now()), UsageAccumulator::new(now()));
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(matches!(store.load(), Err(StoreError::NotFound)));

        store.save(&sample_usage()).unwrap();
        assert_eq!(&store.bytes().unwrap()[..4], MAGIC);
        assert_eq!(store.load().unwrap(), sample_usage());
    }

    #[test]
    fn rejects_foreign_bytes() {
        let store = MemoryStore::with_bytes(b"\x80\x04\x95pickle".to_vec());
        assert!(matches!(store.load(), Err(StoreError::BadMagic)));

        let store = MemoryStore::with_bytes(b"NS".to_vec());
        assert!(matches!(store.load(), Err(StoreError::BadMagic)));
    }

    #[test]
    fn rejects_unknown_version() {
        let mut bytes = encode(&sample_usage()).unwrap();
        bytes[4] = 9;
        let store = MemoryStore::with_bytes(bytes);

        assert!(matches!(store.load(), Err(StoreError::UnsupportedVersion(9))));
    }

    #[test]
    fn truncated_record_falls_back_to_fresh_state() {
        let bytes = encode(&sample_usage()).unwrap();
        let store = MemoryStore::with_bytes(bytes[..HEADER_LEN + 3].to_vec());

        assert!(matches!(store.load(), Err(StoreError::Decode(_))));
        assert_eq!(load_or_default(&store, now()), UsageAccumulator::new(now()));
    }
}
