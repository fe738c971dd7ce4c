use chrono::{DateTime, Utc};
use colored::Colorize;
use jotter::model::Note;
use timeago::Formatter;
use unicode_width::UnicodeWidthStr;

const LINE_WIDTH: usize = 72;

pub(crate) fn print_notes(notes: &[Note]) {
    if notes.is_empty() {
        println!("No notes yet. Try `jot new` or `jot import <file>`.");
        return;
    }

    for (i, note) in notes.iter().enumerate() {
        let idx = format!("{:>3}.", i + 1);
        let time_ago = format_time_ago(note.saved_at);
        let pad = LINE_WIDTH
            .saturating_sub(idx.len() + 1 + note.title.width() + time_ago.len())
            .max(1);
        println!(
            "{} {}{}{}",
            idx.yellow(),
            note.title.bold(),
            " ".repeat(pad),
            time_ago.dimmed()
        );
    }
}

pub(crate) fn format_time_ago(time: DateTime<Utc>) -> String {
    let now = Utc::now();
    if time > now {
        return "just now".to_string();
    }
    Formatter::new().convert((now - time).to_std().unwrap_or_default())
}
