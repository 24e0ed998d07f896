use std::fs::{rename, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::error::HistoryError;
use super::result_log::ResultLog;

/// Flat text file holding one persisted history line per entry.
///
/// Read once at session start and written once at session end; no locking.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// `<file name>.tmp` next to the target, e.g. `history.txt.tmp`
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Load the file into a fresh log. A missing file yields an empty log.
    pub fn load(&self) -> Result<ResultLog, HistoryError> {
        let mut history = ResultLog::new();
        self.load_into(&mut history)?;
        Ok(history)
    }

    /// Hydrate `history` from the file, returning the number of lines loaded.
    pub fn load_into(&self, history: &mut ResultLog) -> Result<usize, HistoryError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No history file at {:?}", self.path);
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };

        let text = String::from_utf8(bytes).map_err(|_| HistoryError::InvalidEncoding {
            path: self.path.display().to_string(),
        })?;

        let loaded = history.load_from(text.lines());
        log::info!("Loaded {} history entries from {:?}", loaded, self.path);
        Ok(loaded)
    }

    /// Overwrite the file with the log's persisted lines.
    pub fn save(&self, history: &ResultLog) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // write to a sibling temp file, then rename over the target
        let temp_path = self.temp_path();
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            history.flush_to(&mut writer)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        rename(&temp_path, &self.path)?;

        log::info!("Saved {} history entries to {:?}", history.len(), self.path);
        Ok(())
    }
}
