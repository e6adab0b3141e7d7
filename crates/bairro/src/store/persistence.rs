//! Persistence for datasets - whole-file rewrites with optional history.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use crate::error::{BairroError, Result};

use super::dataset::{Dataset, DatasetFormat};
use super::pipe::to_pipe_string;

impl Dataset {
    /// Save the dataset as a JSON array, replacing the file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use bairro::Dataset;
    /// # fn example(dataset: &Dataset) -> bairro::Result<()> {
    /// dataset.save("pinheiros_restaurants.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_as(path, DatasetFormat::Json)
    }

    /// Render the dataset in the pipe-delimited line format.
    pub fn to_pipe_string(&self) -> String {
        to_pipe_string(&self.records)
    }

    /// Save the dataset in the given format, replacing the file.
    pub fn save_as(&self, path: impl AsRef<Path>, format: DatasetFormat) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| persistence_error("create directory", parent, e))?;
        }

        let file = File::create(path).map_err(|e| persistence_error("create file", path, e))?;
        let mut writer = BufWriter::new(file);

        let written = match format {
            DatasetFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, &self.records).map_err(|e| {
                    BairroError::Persistence(format!("Failed to serialize dataset: {}", e))
                })?;
                writer.write_all(b"\n")
            }
            DatasetFormat::Pipe => writer.write_all(self.to_pipe_string().as_bytes()),
        };
        written
            .and_then(|_| writer.flush())
            .map_err(|e| persistence_error("write", path, e))?;

        info!(path = %path.display(), %format, records = self.records.len(), "saved dataset");
        Ok(())
    }

    /// Save with version history, keeping the dataset's own format.
    ///
    /// Copies the current file into a `.history` subdirectory before
    /// overwriting it.
    ///
    /// ```text
    /// data/
    /// ├── pinheiros.json                      # Current version
    /// └── pinheiros.history/
    ///     └── 2026-10-15T10-00-00.000.json    # Previous version
    /// ```
    pub fn save_with_history(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if path.exists() {
            archive_current(path)?;
        }

        self.save_as(path, self.metadata.format)
    }

    /// List archived versions of a dataset file, newest first.
    ///
    /// Only archives in the dataset's own format are listed. A dataset that
    /// was never saved with history has none.
    pub fn list_history(path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let path = path.as_ref();
        let history_dir = history_directory(path);
        let wanted = archive_extension(path);

        let listing = match fs::read_dir(&history_dir) {
            Ok(listing) => listing,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(persistence_error("read history in", &history_dir, e)),
        };

        let mut archives: Vec<PathBuf> = listing
            .flatten()
            .map(|entry| entry.path())
            .filter(|archive| archive.extension().and_then(|e| e.to_str()) == Some(wanted.as_str()))
            .collect();

        // Timestamped names sort chronologically
        archives.sort_unstable_by(|a, b| b.file_name().cmp(&a.file_name()));
        Ok(archives)
    }
}

fn archive_current(path: &Path) -> Result<()> {
    let history_dir = history_directory(path);
    fs::create_dir_all(&history_dir)
        .map_err(|e| persistence_error("create history directory", &history_dir, e))?;

    let stamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f");
    let target = history_dir.join(format!("{}.{}", stamp, archive_extension(path)));
    fs::copy(path, &target).map_err(|e| persistence_error("archive previous version to", &target, e))?;

    info!(archive = %target.display(), "archived previous dataset");
    Ok(())
}

fn persistence_error(action: &str, path: &Path, e: io::Error) -> BairroError {
    BairroError::Persistence(format!("Failed to {} '{}': {}", action, path.display(), e))
}

/// Archived copies keep the extension of the file they came from.
fn archive_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "json".to_string())
}

/// Get the history directory for a dataset file.
fn history_directory(path: &Path) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let parent = path.parent().unwrap_or(Path::new("."));

    parent.join(format!("{}.history", stem))
}
