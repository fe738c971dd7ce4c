//! # Jotter Architecture
//!
//! Jotter is a **UI-agnostic note-keeping library**. The crate tracks which
//! documents exist as plain files on disk, keeps a small durable index of
//! them, auto-saves editor content after a quiet period, and resolves
//! filename collisions when documents are created. The bundled `jot` CLI is
//! just one client of that library.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs, print.rs)                     │
//! │  - Parses arguments, formats output, launches $EDITOR       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session Layer (session.rs)                                 │
//! │  - Owns the index, the open-document buffer, the auto-save  │
//! │    scheduler                                                │
//! │  - list / open / create / save-as / import / delete / clear │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Index + Workers (index.rs, autosave.rs, names.rs)          │
//! │  - Ordered, deduplicated note list, reconciled against the  │
//! │    filesystem, persisted after every mutation               │
//! │  - Debounced write-through of edits                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract SettingsStore trait                             │
//! │  - FileSettings (production), InMemorySettings (testing)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `session.rs` inward, code takes regular Rust arguments, returns
//! regular Rust types, never writes to stdout/stderr, never calls
//! `std::process::exit`, never assumes a terminal. The same core could serve
//! a tray app, a TUI, or any other front end.
//!
//! The one place the core is deliberately lenient: writes to the settings
//! store are allowed to fail without surfacing an error. The in-memory index
//! stays authoritative for the rest of the process and the failure is
//! emitted as a `tracing` warning. Durable persistence is best-effort;
//! losing the recent list must never take the editor down with it.
//!
//! ## Module Overview
//!
//! - [`session`]: The editing session, entry point for all operations
//! - [`index`]: The durable, ordered note index
//! - [`autosave`]: Debounced write-through of editor content
//! - [`names`]: Collision-free filename resolution
//! - [`import`]: Reading existing documents (plain text, markdown)
//! - [`store`]: Settings storage abstraction and implementations
//! - [`model`]: Core data types (`Note`, title derivation)
//! - [`config`]: Configuration management
//! - [`editor`]: External editor integration for CLI-style clients
//! - [`error`]: Error types

pub mod autosave;
pub mod config;
pub mod editor;
pub mod error;
pub mod import;
pub mod index;
pub mod model;
pub mod names;
pub mod session;
pub mod store;
