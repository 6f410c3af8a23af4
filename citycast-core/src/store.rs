use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

/// Where the last selected city name lives between runs.
///
/// `load` is called once at startup. The event loop runs `save` on tokio's
/// blocking pool, so implementations may do ordinary file I/O.
pub trait SelectionStore: Send + Sync + Debug {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, city: &str) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    selection: Selection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Selection {
    city: Option<String>,
}

/// Keeps the selection in a small TOML file:
///
/// ```toml
/// [selection]
/// city = "Da Nang"
/// ```
#[derive(Debug, Clone)]
pub struct FileSelectionStore {
    path: PathBuf,
}

impl FileSelectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform data directory.
    pub fn in_data_dir() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "citycast", "citycast")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().join("state.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SelectionStore for FileSelectionStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read state file: {}", self.path.display()))?;

        let state: StateFile = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse state file: {}", self.path.display()))?;

        Ok(state.selection.city)
    }

    fn save(&self, city: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create state directory: {}", parent.display())
            })?;
        }

        let state = StateFile { selection: Selection { city: Some(city.to_string()) } };
        let toml = toml::to_string_pretty(&state).context("Failed to serialize state to TOML")?;

        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write state file: {}", self.path.display()))?;

        Ok(())
    }
}

/// Process-local store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySelectionStore {
    city: Mutex<Option<String>>,
}

impl MemorySelectionStore {
    pub fn with_city(city: impl Into<String>) -> Self {
        Self { city: Mutex::new(Some(city.into())) }
    }
}

impl SelectionStore for MemorySelectionStore {
    fn load(&self) -> Result<Option<String>> {
        let city = self.city.lock().map_err(|_| anyhow!("selection store lock poisoned"))?;
        Ok(city.clone())
    }

    fn save(&self, city: &str) -> Result<()> {
        let mut slot = self.city.lock().map_err(|_| anyhow!("selection store lock poisoned"))?;
        *slot = Some(city.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_no_selection() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSelectionStore::new(dir.path().join("state.toml"));

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn save_then_load_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.toml");

        FileSelectionStore::new(&path).save("Ho Chi Minh City").unwrap();
        let reopened = FileSelectionStore::new(&path);

        assert_eq!(reopened.load().unwrap().as_deref(), Some("Ho Chi Minh City"));
    }

    #[test]
    fn save_overwrites_previous_city() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSelectionStore::new(dir.path().join("state.toml"));

        store.save("Hanoi").unwrap();
        store.save("Hue").unwrap();

        assert_eq!(store.load().unwrap().as_deref(), Some("Hue"));
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("[selection]"));
        assert!(!raw.contains("Hanoi"));
    }

    #[test]
    fn garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.toml");
        fs::write(&path, "selection = [").unwrap();

        let err = FileSelectionStore::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse state file"));
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemorySelectionStore::default();
        assert_eq!(store.load().unwrap(), None);

        store.save("Lima").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("Lima"));
        assert_eq!(MemorySelectionStore::with_city("Quito").load().unwrap().as_deref(), Some("Quito"));
    }
}
