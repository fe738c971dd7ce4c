use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use jotter::config::JotterConfig;
use jotter::editor::open_in_editor;
use jotter::error::{JotterError, Result};
use jotter::model::Note;
use jotter::session::EditorSession;
use jotter::store::fs::FileSettings;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod args;
mod print;

use args::{Cli, Commands};
use print::print_notes;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let home = jotter_home()?;
    let config = JotterConfig::load(&home).unwrap_or_default();

    if let Some(Commands::Config { key, value }) = &cli.command {
        return handle_config(&home, config, key.as_deref(), value.as_deref());
    }

    let notes_dir = home.join("notes");
    let mut session = EditorSession::with_options(
        FileSettings::new(&home),
        notes_dir,
        config.get_file_ext().to_string(),
        config.autosave_delay(),
    );

    match cli.command {
        Some(Commands::List) | None => handle_list(&session),
        Some(Commands::New { title, no_editor }) => handle_new(&mut session, title, no_editor),
        Some(Commands::Show { index }) => handle_show(&mut session, index),
        Some(Commands::Edit { index }) => handle_edit(&mut session, index),
        Some(Commands::Import { paths }) => handle_import(&mut session, &config, paths),
        Some(Commands::Remove { index }) => handle_remove(&mut session, index),
        Some(Commands::Delete { index, force }) => handle_delete(&mut session, index, force),
        Some(Commands::Clear) => handle_clear(&mut session),
        Some(Commands::Path { index }) => handle_path(&session, index),
        Some(Commands::Config { .. }) => unreachable!("handled above"),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "jotter=debug" } else { "jotter=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Data directory: `$JOTTER_HOME` if set (used by the integration tests),
/// otherwise the platform data dir.
fn jotter_home() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("JOTTER_HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    let proj_dirs = ProjectDirs::from("com", "jotter", "jotter")
        .ok_or_else(|| JotterError::Api("Could not determine data dir".to_string()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn note_at(session: &EditorSession<FileSettings>, index: usize) -> Result<Note> {
    let notes = session.list_notes();
    if index == 0 || index > notes.len() {
        return Err(JotterError::Api(format!(
            "No note at position {} (have {})",
            index,
            notes.len()
        )));
    }
    Ok(notes[index - 1].clone())
}

fn handle_list(session: &EditorSession<FileSettings>) -> Result<()> {
    print_notes(&session.list_notes());
    Ok(())
}

fn handle_new(
    session: &mut EditorSession<FileSettings>,
    title: Option<String>,
    no_editor: bool,
) -> Result<()> {
    let note = match title {
        Some(title) => {
            let dir = session.notes_dir().to_path_buf();
            session.save_current_as(&title, &dir)?
        }
        None => session.create_note()?,
    };
    println!("{} {}", "Created".green(), note.location.display());

    if !no_editor {
        open_in_editor(&note.location)?;
        let updated = session.refresh_note(note.id)?;
        println!("{} {}", "Saved".green(), updated.title);
    }
    Ok(())
}

fn handle_show(session: &mut EditorSession<FileSettings>, index: usize) -> Result<()> {
    let note = note_at(session, index)?;
    let content = session.open_note(note.id)?;
    println!("{}", note.title.bold());
    println!("--------------------------------");
    println!("{}", content);
    Ok(())
}

fn handle_edit(session: &mut EditorSession<FileSettings>, index: usize) -> Result<()> {
    let note = note_at(session, index)?;
    open_in_editor(&note.location)?;
    let updated = session.refresh_note(note.id)?;
    println!("{} {}", "Saved".green(), updated.title);
    Ok(())
}

fn handle_import(
    session: &mut EditorSession<FileSettings>,
    config: &JotterConfig,
    paths: Vec<PathBuf>,
) -> Result<()> {
    let mut imported = 0usize;

    for path in paths {
        if path.is_dir() {
            let entries = std::fs::read_dir(&path).map_err(JotterError::Io)?;
            for entry in entries {
                let entry = entry.map_err(JotterError::Io)?;
                let sub_path = entry.path();
                if sub_path.is_file() && has_import_ext(&sub_path, config) {
                    import_one(session, &sub_path, &mut imported);
                }
            }
        } else if path.is_file() {
            import_one(session, &path, &mut imported);
        } else {
            println!("{}", format!("Path not found: {}", path.display()).yellow());
        }
    }

    println!("{}", format!("Total imported: {}", imported).green());
    Ok(())
}

fn has_import_ext(path: &Path, config: &JotterConfig) -> bool {
    path.extension()
        .map(|ext| {
            let dotted = format!(".{}", ext.to_string_lossy());
            config.import_extensions.contains(&dotted)
        })
        .unwrap_or(false)
}

fn import_one(session: &mut EditorSession<FileSettings>, path: &Path, imported: &mut usize) {
    match session.import(path) {
        Ok(note) => {
            *imported += 1;
            println!(
                "{}",
                format!("Imported: {} ({})", path.display(), note.title).dimmed()
            );
        }
        Err(err) => {
            println!(
                "{}",
                format!("Failed to import {}: {}", path.display(), err).yellow()
            );
        }
    }
}

fn handle_remove(session: &mut EditorSession<FileSettings>, index: usize) -> Result<()> {
    let note = note_at(session, index)?;
    session.delete_from_recent(note.id);
    println!(
        "{} {} (file kept at {})",
        "Removed from recent:".green(),
        note.title,
        note.location.display()
    );
    Ok(())
}

fn handle_delete(
    session: &mut EditorSession<FileSettings>,
    index: usize,
    force: bool,
) -> Result<()> {
    let note = note_at(session, index)?;

    if !force && !confirm(&format!("Delete '{}' and its file from disk?", note.title))? {
        println!("Aborted.");
        return Ok(());
    }

    session.delete_from_device(note.id);
    println!("{} {}", "Deleted".green(), note.location.display());
    Ok(())
}

fn handle_clear(session: &mut EditorSession<FileSettings>) -> Result<()> {
    session.clear_all();
    println!("Recent list cleared. No files were deleted.");
    Ok(())
}

fn handle_path(session: &EditorSession<FileSettings>, index: usize) -> Result<()> {
    let note = note_at(session, index)?;
    println!("{}", note.location.display());
    Ok(())
}

fn handle_config(
    home: &Path,
    mut config: JotterConfig,
    key: Option<&str>,
    value: Option<&str>,
) -> Result<()> {
    match (key, value) {
        (None, _) => {
            println!("file-ext          = {}", config.get_file_ext());
            println!("autosave-delay-ms = {}", config.autosave_delay_ms);
            println!(
                "import-extensions = {}",
                config.import_extensions.join(", ")
            );
            Ok(())
        }
        (Some("file-ext"), None) => {
            println!("{}", config.get_file_ext());
            Ok(())
        }
        (Some("autosave-delay-ms"), None) => {
            println!("{}", config.autosave_delay_ms);
            Ok(())
        }
        (Some("file-ext"), Some(ext)) => {
            config.set_file_ext(ext);
            config.save(home)?;
            println!("file-ext = {}", config.get_file_ext());
            Ok(())
        }
        (Some("autosave-delay-ms"), Some(ms)) => {
            config.autosave_delay_ms = ms
                .parse()
                .map_err(|_| JotterError::Api(format!("Not a number of milliseconds: {}", ms)))?;
            config.save(home)?;
            println!("autosave-delay-ms = {}", config.autosave_delay_ms);
            Ok(())
        }
        (Some(other), _) => Err(JotterError::Api(format!(
            "Unknown config key: {} (known: file-ext, autosave-delay-ms)",
            other
        ))),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush().map_err(JotterError::Io)?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(JotterError::Io)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
