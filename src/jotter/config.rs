use crate::error::{JotterError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_FILE_EXT: &str = ".txt";
const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 1000;

/// Configuration for jotter, stored in the data dir as config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JotterConfig {
    /// File extension for new notes (e.g., ".txt", ".md")
    #[serde(default = "default_file_ext")]
    pub file_ext: String,

    /// Extensions accepted when importing a directory (e.g. ".md", ".txt")
    #[serde(default = "default_import_ext")]
    pub import_extensions: Vec<String>,

    /// Quiet period before edits are auto-saved, in milliseconds
    #[serde(default = "default_autosave_delay_ms")]
    pub autosave_delay_ms: u64,
}

fn default_file_ext() -> String {
    DEFAULT_FILE_EXT.to_string()
}

fn default_import_ext() -> Vec<String> {
    vec![
        ".md".to_string(),
        ".markdown".to_string(),
        ".txt".to_string(),
        ".text".to_string(),
    ]
}

fn default_autosave_delay_ms() -> u64 {
    DEFAULT_AUTOSAVE_DELAY_MS
}

impl Default for JotterConfig {
    fn default() -> Self {
        Self {
            file_ext: default_file_ext(),
            import_extensions: default_import_ext(),
            autosave_delay_ms: default_autosave_delay_ms(),
        }
    }
}

impl JotterConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(JotterError::Io)?;
        let config: JotterConfig =
            serde_json::from_str(&content).map_err(JotterError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(JotterError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(JotterError::Serialization)?;
        fs::write(config_path, content).map_err(JotterError::Io)?;
        Ok(())
    }

    /// Get the file extension (always starts with a dot)
    pub fn get_file_ext(&self) -> &str {
        &self.file_ext
    }

    /// Set the file extension (normalizes to start with a dot)
    pub fn set_file_ext(&mut self, ext: &str) {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = JotterConfig::default();
        assert_eq!(config.file_ext, ".txt");
        assert_eq!(config.autosave_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn set_file_ext_with_dot() {
        let mut config = JotterConfig::default();
        config.set_file_ext(".md");
        assert_eq!(config.file_ext, ".md");
    }

    #[test]
    fn set_file_ext_without_dot() {
        let mut config = JotterConfig::default();
        config.set_file_ext("md");
        assert_eq!(config.file_ext, ".md");
    }

    #[test]
    fn load_missing_config_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = JotterConfig::load(dir.path()).unwrap();
        assert_eq!(config, JotterConfig::default());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = JotterConfig::default();
        config.set_file_ext(".md");
        config.autosave_delay_ms = 250;
        config.save(dir.path()).unwrap();

        let loaded = JotterConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.file_ext, ".md");
        assert_eq!(loaded.autosave_delay_ms, 250);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"file_ext": ".md"}"#,
        )
        .unwrap();

        let loaded = JotterConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.file_ext, ".md");
        assert_eq!(loaded.autosave_delay_ms, DEFAULT_AUTOSAVE_DELAY_MS);
        assert!(!loaded.import_extensions.is_empty());
    }

    #[test]
    fn serialization_roundtrip() {
        let config = JotterConfig {
            file_ext: ".md".to_string(),
            import_extensions: vec![".md".to_string()],
            autosave_delay_ms: 500,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: JotterConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, parsed);
    }
}
