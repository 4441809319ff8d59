use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod models;

use models::Snapshot;

/// Durable home of the last published snapshot: one JSON document,
/// fully replaced on every refresh cycle. Cloned handles share the same
/// path; only the refresh loop writes, the read API only loads.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SnapshotStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // ── Publish ──────────────────────────────────────────────────────────────

    /// Serialize the snapshot (pretty-printed, non-ASCII kept verbatim)
    /// and atomically replace the stored document, staging through a
    /// sibling `<path>.tmp` file before the rename so readers never
    /// observe a torn write.
    pub fn publish(&self, snapshot: &Snapshot) -> Result<()> {
        let body =
            serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;
        let mut staged = OsString::from(self.path.as_os_str());
        staged.push(".tmp");
        let tmp = PathBuf::from(staged);
        fs::write(&tmp, body)
            .with_context(|| format!("Failed to write snapshot to {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace snapshot at {}", self.path.display()))?;
        Ok(())
    }

    // ── Load ─────────────────────────────────────────────────────────────────

    /// Load the last published snapshot. Absent and corrupt documents
    /// both surface as errors with the offending path; no partial data
    /// is ever returned.
    pub fn load(&self) -> Result<Snapshot> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read snapshot at {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Snapshot at {} is not valid JSON", self.path.display()))
    }
}
