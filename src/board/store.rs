use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Application;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(".jobkan directory not found (walked up from {0})")]
    NotFound(PathBuf),
    #[error("no application with id {0:?}")]
    UnknownApplication(String),
}

const DATA_FILE: &str = "applications.json";

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    next_id: u32,
    applications: Vec<Application>,
}

/// File-backed application store.
///
/// Stands in for the remote data provider: the TUI treats `load` as the
/// authoritative list and `update_status` as the external status-update
/// call, resyncing through `load` whenever an update fails.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Open an existing store by walking up from `start` looking for a
    /// `.jobkan` directory.
    pub fn open(start: &Path) -> Result<Self, StoreError> {
        let mut dir = start.to_path_buf();
        loop {
            let candidate = dir.join(".jobkan");
            if candidate.is_dir() {
                return Ok(Self { dir: candidate });
            }
            if !dir.pop() {
                return Err(StoreError::NotFound(start.to_path_buf()));
            }
        }
    }

    /// Create a `.jobkan` store under `root`. An existing data file is
    /// left untouched.
    pub fn init(root: &Path) -> Result<Self, StoreError> {
        let dir = root.join(".jobkan");
        fs::create_dir_all(&dir)?;
        let store = Self { dir };
        if !store.data_path().exists() {
            store.write_file(&StoreFile { next_id: 1, applications: Vec::new() })?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    fn data_path(&self) -> PathBuf {
        self.dir.join(DATA_FILE)
    }

    fn read_file(&self) -> Result<StoreFile, StoreError> {
        let raw = fs::read_to_string(self.data_path())?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_file(&self, file: &StoreFile) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(file)?;
        fs::write(self.data_path(), raw)?;
        Ok(())
    }

    /// Load the full application list.
    pub fn load(&self) -> Result<Vec<Application>, StoreError> {
        Ok(self.read_file()?.applications)
    }

    /// Append a new application, allocating its id.
    pub fn add(&self, mut app: Application) -> Result<Application, StoreError> {
        let mut file = self.read_file()?;
        app.id = file.next_id.to_string();
        file.next_id += 1;
        file.applications.push(app.clone());
        self.write_file(&file)?;
        Ok(app)
    }

    /// Set the status of one application and persist it.
    ///
    /// Reads the file fresh rather than trusting any in-memory copy, so
    /// a record deleted by another process surfaces as
    /// [`StoreError::UnknownApplication`].
    pub fn update_status(&self, id: &str, status: &str) -> Result<(), StoreError> {
        let mut file = self.read_file()?;
        let app = file
            .applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::UnknownApplication(id.to_string()))?;
        app.status = Some(status.to_string());
        self.write_file(&file)
    }

    /// Remove one application by id.
    pub fn remove(&self, id: &str) -> Result<(), StoreError> {
        let mut file = self.read_file()?;
        let before = file.applications.len();
        file.applications.retain(|a| a.id != id);
        if file.applications.len() == before {
            return Err(StoreError::UnknownApplication(id.to_string()));
        }
        self.write_file(&file)
    }
}
