use chrono::{NaiveDate, Utc};
use kinotop_models::{CatalogEntry, Snapshot};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write snapshot to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn assemble(
    date: NaiveDate,
    movies: Vec<CatalogEntry>,
    series: Vec<CatalogEntry>,
    movies_cover: Option<String>,
    series_cover: Option<String>,
) -> Snapshot {
    Snapshot {
        date,
        movies,
        series,
        movies_cover,
        series_cover,
    }
}

/// Persists snapshots so readers only ever see a complete document.
///
/// The JSON goes to a hidden temporary file next to the destination, is
/// synced, and then renamed over the destination. If anything fails before
/// the rename, the temporary file is removed and the previous snapshot is
/// left as it was.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    path: PathBuf,
}

impl SnapshotWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let json = serde_json::to_vec_pretty(snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let temp_path = self.temp_path();
        if let Err(source) = write_synced(&temp_path, &json) {
            let _ = fs::remove_file(&temp_path);
            return Err(self.io_error(source));
        }
        debug!(path = %temp_path.display(), bytes = json.len(), "Wrote temporary snapshot");

        if let Err(source) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(self.io_error(source));
        }

        info!(
            path = %self.path.display(),
            date = %snapshot.date,
            movies = snapshot.movies.len(),
            series = snapshot.series.len(),
            "Snapshot written"
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "snapshot".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    fn io_error(&self, source: std::io::Error) -> SnapshotError {
        SnapshotError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
