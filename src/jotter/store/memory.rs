use super::SettingsStore;
use crate::error::Result;
use std::collections::HashMap;

/// In-memory settings for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemorySettings {
    values: HashMap<String, String>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for InMemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::error::JotterError;

    /// Settings store whose writes always fail. Reads behave normally,
    /// served from whatever was seeded at construction.
    #[derive(Default)]
    pub struct FailingSettings {
        values: HashMap<String, String>,
    }

    impl FailingSettings {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn seeded(key: &str, value: &str) -> Self {
            let mut values = HashMap::new();
            values.insert(key.to_string(), value.to_string());
            Self { values }
        }
    }

    impl SettingsStore for FailingSettings {
        fn get(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(JotterError::Store("settings store is read-only".to_string()))
        }
    }
}
