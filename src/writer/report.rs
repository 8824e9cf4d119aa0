use crate::manifest::FileEntry;
use crate::writer::UnpackProgress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Final summary of one run. Printed to the console (JSON mode emits it
/// verbatim); never written into the output root, which holds only the
/// manifest's own entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnpackReport {
    pub manifest_path: PathBuf,
    pub output_root: PathBuf,
    pub files: Vec<EntryInfo>,
    pub entries_detected: usize,
    pub files_written: usize,
    pub bytes_written: u64,
    pub duration: Duration,
    pub unpacked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryInfo {
    pub relative_path: String,
    pub destination: PathBuf,
    pub bytes: u64,
}

impl UnpackReport {
    pub fn new(
        manifest_path: PathBuf,
        output_root: PathBuf,
        entries: &[FileEntry],
        progress: &UnpackProgress,
    ) -> Self {
        let files = entries
            .iter()
            .map(|entry| EntryInfo {
                relative_path: entry.relative_path.clone(),
                destination: output_root.join(entry.relative_path.trim()),
                bytes: entry.content_bytes(),
            })
            .collect();

        Self {
            manifest_path,
            output_root,
            files,
            entries_detected: entries.len(),
            files_written: progress.files_written,
            bytes_written: progress.bytes_written,
            duration: progress.elapsed(),
            unpacked_at: Utc::now(),
        }
    }

    pub fn destination_for(&self, relative_path: &str) -> Option<&Path> {
        self.files
            .iter()
            .find(|f| f.relative_path == relative_path)
            .map(|f| f.destination.as_path())
    }
}
