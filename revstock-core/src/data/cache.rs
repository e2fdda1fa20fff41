//! Snapshot cache — reuse a loaded dataset until its source file changes.
//!
//! The key is the source path plus the file's modification time and length,
//! plus the load options. A reload happens only when any of them differ.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::{debug, info};

use super::dataset::Dataset;
use super::loader::{load_csv, LoadError, LoadOptions};

/// Identity of a source file at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStamp {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl SourceStamp {
    /// Stat the file at `path`.
    pub fn of(path: &Path) -> Result<Self, LoadError> {
        let meta = std::fs::metadata(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

struct Entry {
    stamp: SourceStamp,
    opts: LoadOptions,
    dataset: Arc<Dataset>,
}

/// Holds the most recently loaded dataset.
#[derive(Default)]
pub struct SnapshotCache {
    entry: Option<Entry>,
    loads: usize,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it when the file (or the
    /// options) changed since the last load.
    pub fn get_or_load(&mut self, path: &Path, opts: &LoadOptions) -> Result<Arc<Dataset>, LoadError> {
        let stamp = SourceStamp::of(path)?;

        if let Some(entry) = &self.entry {
            if entry.stamp == stamp && &entry.opts == opts {
                debug!(path = %path.display(), "snapshot cache hit");
                return Ok(Arc::clone(&entry.dataset));
            }
        }

        let dataset = Arc::new(load_csv(path, opts)?);
        self.loads += 1;
        info!(
            path = %path.display(),
            rows = dataset.len(),
            loads = self.loads,
            "price file loaded into snapshot cache"
        );
        self.entry = Some(Entry {
            stamp,
            opts: opts.clone(),
            dataset: Arc::clone(&dataset),
        });
        Ok(dataset)
    }

    /// Drop the cached snapshot; the next call reloads unconditionally.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Number of loads performed so far (cache misses).
    pub fn load_count(&self) -> usize {
        self.loads
    }
}
