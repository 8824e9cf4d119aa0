use crate::error::{RepogenError, Result};
use crate::manifest::FileEntry;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct UnpackProgress {
    pub files_written: usize,
    pub total_files: usize,
    pub bytes_written: u64,
    pub current_destination: Option<PathBuf>,
    pub start_time: Instant,
}

impl UnpackProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            files_written: 0,
            total_files,
            bytes_written: 0,
            current_destination: None,
            start_time: Instant::now(),
        }
    }

    pub fn update_file(&mut self, destination: PathBuf, bytes: u64) {
        self.files_written += 1;
        self.bytes_written += bytes;
        self.current_destination = Some(destination);
    }

    pub fn percentage(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.files_written as f64 / self.total_files as f64) * 100.0
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Materializes entries under an output root: parent directories are created
/// lazily per entry, destinations are truncated and fully overwritten, and
/// the batch halts on the first failed write (files already written stay on
/// disk).
pub struct FileWriter;

impl FileWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_entries(
        &self,
        entries: &[FileEntry],
        output_root: &Path,
        progress_callback: Option<&dyn Fn(&UnpackProgress)>,
    ) -> Result<UnpackProgress> {
        let mut progress = UnpackProgress::new(entries.len());

        for entry in entries {
            let (destination, bytes) = self.write_entry(entry, output_root)?;
            progress.update_file(destination, bytes);

            if let Some(callback) = progress_callback {
                callback(&progress);
            }
        }

        Ok(progress)
    }

    /// Writes one entry to `output_root/<trimmed path>` and returns the
    /// resolved destination with the byte count written.
    pub fn write_entry(&self, entry: &FileEntry, output_root: &Path) -> Result<(PathBuf, u64)> {
        let destination = output_root.join(entry.relative_path.trim());

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| RepogenError::WriteFailure {
                path: destination.clone(),
                source: e,
            })?;
        }

        let normalized = normalize_content(&entry.content);
        fs::write(&destination, &normalized).map_err(|e| RepogenError::WriteFailure {
            path: destination.clone(),
            source: e,
        })?;

        Ok((destination, normalized.len() as u64))
    }
}

impl Default for FileWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Carriage returns are stripped and the result ends with exactly one
/// newline, however many the manifest carried.
fn normalize_content(content: &str) -> String {
    let mut normalized: String = content.chars().filter(|c| *c != '\r').collect();
    while normalized.ends_with('\n') {
        normalized.pop();
    }
    normalized.push('\n');
    normalized
}
