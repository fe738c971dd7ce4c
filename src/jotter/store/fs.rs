use super::SettingsStore;
use crate::error::{JotterError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILENAME: &str = "settings.json";

/// File-backed settings store: one JSON object of string keys and string
/// values, read in full and rewritten in full on every set. Fine for a
/// handful of small entries.
pub struct FileSettings {
    path: PathBuf,
}

impl FileSettings {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(SETTINGS_FILENAME),
        }
    }

    fn read_map(&self) -> HashMap<String, String> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return HashMap::new();
        };
        // Malformed settings count as empty, same as a missing file.
        serde_json::from_str(&content).unwrap_or_default()
    }
}

impl SettingsStore for FileSettings {
    fn get(&self, key: &str) -> Option<String> {
        let mut map = self.read_map();
        map.remove(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());

        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(JotterError::Io)?;
            }
        }
        let content = serde_json::to_string_pretty(&map).map_err(JotterError::Serialization)?;
        fs::write(&self.path, content).map_err(JotterError::Io)?;
        Ok(())
    }
}
