//! # Settings Storage
//!
//! The durable key/value store the note index persists itself into. The
//! [`SettingsStore`] trait keeps the index decoupled from where that data
//! actually lives.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `InMemorySettings` (no filesystem needed)
//! - Allow **future backends** (platform preference stores, etc.) without
//!   changing index logic
//!
//! ## Implementations
//!
//! - [`fs::FileSettings`]: production storage, a single `settings.json` file
//!   holding a string-to-string map
//! - [`memory::InMemorySettings`]: in-memory storage for testing
//!
//! Values are strings; the index stores its serialized JSON under one fixed
//! key. A store read that fails for any reason is reported as "no data":
//! callers treat missing and unreadable identically.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Abstract interface for the durable settings store.
pub trait SettingsStore {
    /// Read the value stored under `key`. Missing or unreadable data is `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
