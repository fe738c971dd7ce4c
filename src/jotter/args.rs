use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jot")]
#[command(about = "Keep quick notes as plain files with a recent-notes list", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List recent notes
    #[command(alias = "ls")]
    List,

    /// Create a new note and open it in the editor
    #[command(alias = "n")]
    New {
        /// Name for the file (defaults to "Untitled")
        title: Option<String>,

        /// Skip opening the editor
        #[arg(long)]
        no_editor: bool,
    },

    /// Print a note's content
    #[command(alias = "v")]
    Show {
        /// Position in the list (1 = most recent)
        index: usize,
    },

    /// Edit a note in the editor
    #[command(alias = "e")]
    Edit {
        /// Position in the list (1 = most recent)
        index: usize,
    },

    /// Register existing documents; the originals stay in place and in use
    Import {
        /// Files or directories to import
        #[arg(required = true, num_args = 1..)]
        paths: Vec<PathBuf>,
    },

    /// Remove a note from the recent list (its file stays on disk)
    #[command(alias = "rm")]
    Remove {
        /// Position in the list (1 = most recent)
        index: usize,
    },

    /// Delete a note's file from disk and drop it from the list
    Delete {
        /// Position in the list (1 = most recent)
        index: usize,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Clear the recent list (no files are deleted)
    Clear,

    /// Print a note's file path
    Path {
        /// Position in the list (1 = most recent)
        index: usize,
    },

    /// Show or change configuration (keys: file-ext, autosave-delay-ms)
    Config {
        key: Option<String>,
        value: Option<String>,
    },
}
