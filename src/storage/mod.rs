// src/storage/mod.rs
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tempfile::NamedTempFile;

use crate::nla::models::PaperRecord;
use crate::utils::error::StorageError;

const OUTPUT_EXTENSION: &str = "json";
const TIMESTAMP_FILENAME_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Writes the extracted papers as a JSON array to a single file.
pub struct StorageManager {
    target: PathBuf,
}

impl StorageManager {
    /// Resolves `outpath` into the output file. A path ending in `.json` is
    /// used as-is; anything else is treated as a directory and gets a
    /// timestamped file name.
    pub fn new<P: AsRef<Path>>(outpath: P, now: DateTime<Local>) -> Self {
        let target = resolve_output_path(outpath.as_ref(), now);
        tracing::debug!("Output will be written to {}", target.display());
        Self { target }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Serializes all papers and writes them in one go.
    ///
    /// The JSON goes to a temporary file beside the target, which is then
    /// renamed over it, so a failed write never leaves a truncated file.
    /// Returns the rendered JSON for echoing.
    pub fn save_papers(&self, papers: &[PaperRecord]) -> Result<String, StorageError> {
        let json = render_json(papers)?;

        let dir = match self.target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let io_err = |source| StorageError::Io {
            path: self.target.clone(),
            source,
        };

        let mut file = NamedTempFile::new_in(dir).map_err(io_err)?;
        file.write_all(json.as_bytes()).map_err(io_err)?;
        file.flush().map_err(io_err)?;
        file.persist(&self.target).map_err(|e| StorageError::Persist {
            path: self.target.clone(),
            source: e.error,
        })?;

        tracing::info!("Saved {} papers to {}", papers.len(), self.target.display());
        Ok(json)
    }
}

/// Pretty JSON with two-space indentation, field order as declared on the record.
pub fn render_json(papers: &[PaperRecord]) -> Result<String, StorageError> {
    Ok(serde_json::to_string_pretty(papers)?)
}

pub fn resolve_output_path(outpath: &Path, now: DateTime<Local>) -> PathBuf {
    let suffix = format!(".{}", OUTPUT_EXTENSION);
    let is_json_file = outpath
        .file_name()
        .is_some_and(|name| name.to_string_lossy().to_ascii_lowercase().ends_with(&suffix));

    if is_json_file {
        outpath.to_path_buf()
    } else {
        let filename = format!("{}.{}", now.format(TIMESTAMP_FILENAME_FORMAT), OUTPUT_EXTENSION);
        outpath.join(filename)
    }
}
