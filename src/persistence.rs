// File: src/persistence.rs
use crate::core::progress::ProgressMap;
use crate::error::Result;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Where the progress map lives between sessions.
pub trait ProgressPort {
    /// Returns the stored map, or an empty one if nothing usable is stored.
    fn load(&self) -> ProgressMap;
    fn save(&mut self, map: &ProgressMap) -> Result<()>;
}

/// A single JSON object on disk, `{"<key>": bool, ...}`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressPort for JsonFileStore {
    fn load(&self) -> ProgressMap {
        match load_from_disk(&self.path) {
            Ok(map) => map,
            Err(e) => {
                if self.path.exists() {
                    log::warn!("Ignoring unreadable progress file '{}': {}", self.path.display(), e);
                } else {
                    log::debug!("No progress file at '{}'", self.path.display());
                }
                ProgressMap::new()
            }
        }
    }

    fn save(&mut self, map: &ProgressMap) -> Result<()> {
        save_to_disk(map, &self.path)
    }
}

pub fn save_to_disk(map: &ProgressMap, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    // Write next to the target and rename so a crash never leaves half a file.
    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        serde_json::to_writer(&mut writer, map)?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    log::debug!("Saved {} progress entries to '{}'", map.len(), path.display());
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<ProgressMap> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    Ok(ProgressMap::from_json_value(value))
}

/// In-memory port for tests and for runs without a data directory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    initial: ProgressMap,
    saved: Option<ProgressMap>,
    save_count: usize,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial(initial: ProgressMap) -> Self {
        Self {
            initial,
            ..Self::default()
        }
    }

    /// Every subsequent save fails as if storage were full.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// The last map written, if any.
    pub fn saved(&self) -> Option<&ProgressMap> {
        self.saved.as_ref()
    }

    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl ProgressPort for MemoryStore {
    fn load(&self) -> ProgressMap {
        self.saved.clone().unwrap_or_else(|| self.initial.clone())
    }

    fn save(&mut self, map: &ProgressMap) -> Result<()> {
        if self.fail_writes {
            return Err(std::io::Error::new(std::io::ErrorKind::Other, "storage quota exceeded").into());
        }
        self.saved = Some(map.clone());
        self.save_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ProgressKey;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("progress.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn garbage_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "{not json").unwrap();
        assert!(JsonFileStore::new(&path).load().is_empty());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("progress.json");
        let mut store = JsonFileStore::new(&path);
        let mut map = ProgressMap::new();
        map.toggle(&ProgressKey::from("oop-0"));

        store.save(&map).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"{"oop-0":true}"#);
    }

    #[test]
    fn failing_memory_store_reports_error() {
        let mut store = MemoryStore::failing();
        assert!(store.save(&ProgressMap::new()).is_err());
        assert_eq!(store.save_count(), 0);
    }
}
