//! Reading existing documents into plain text for registration.
//!
//! Plain-text files pass through unchanged (UTF-8, validated). Markdown is
//! flattened to plain text so the derived title and the editor buffer carry
//! no markup. Anything that is not valid UTF-8 is rejected; the note is
//! then not registered.

use crate::error::{JotterError, Result};
use pulldown_cmark::{Event, Parser, TagEnd};
use std::fs;
use std::path::Path;

/// Extensions treated as rich text and flattened before use.
const MARKDOWN_EXTS: &[&str] = &["md", "markdown"];

/// Reads a document as plain text.
pub fn read_as_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(JotterError::Io)?;
    let text =
        String::from_utf8(bytes).map_err(|_| JotterError::Decode(path.to_path_buf()))?;

    if is_markdown(path) {
        Ok(markdown_to_plain(&text))
    } else {
        Ok(text)
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| MARKDOWN_EXTS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Flattens markdown to plain text: inline formatting is dropped, block
/// boundaries become newlines.
fn markdown_to_plain(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::End(TagEnd::Paragraph | TagEnd::Item | TagEnd::CodeBlock) => out.push('\n'),
            Event::End(TagEnd::Heading(_)) => out.push('\n'),
            Event::Rule => out.push('\n'),
            _ => {}
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        let content = "Shopping\n\n- milk\n- eggs\n";
        fs::write(&path, content).unwrap();

        assert_eq!(read_as_text(&path).unwrap(), content);
    }

    #[test]
    fn unknown_extensions_are_treated_as_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.log");
        fs::write(&path, "line one\nline two").unwrap();

        assert_eq!(read_as_text(&path).unwrap(), "line one\nline two");
    }

    #[test]
    fn invalid_utf8_fails_with_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, [0x66, 0x6f, 0xff, 0xfe, 0x6f]).unwrap();

        match read_as_text(&path) {
            Err(JotterError::Decode(p)) => assert_eq!(p, path),
            other => panic!("expected Decode error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn missing_file_fails_with_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_as_text(&dir.path().join("absent.txt"));
        assert!(matches!(result, Err(JotterError::Io(_))));
    }

    #[test]
    fn markdown_is_flattened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        fs::write(&path, "# Weekly plan\n\nSome **bold** and *italic* text.\n").unwrap();

        let text = read_as_text(&path).unwrap();
        assert_eq!(text, "Weekly plan\nSome bold and italic text.");
    }

    #[test]
    fn markdown_lists_keep_one_item_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.markdown");
        fs::write(&path, "- first\n- second\n").unwrap();

        let text = read_as_text(&path).unwrap();
        assert_eq!(text, "first\nsecond");
    }

    #[test]
    fn inline_code_survives_flattening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        fs::write(&path, "Run `make all` first.\n").unwrap();

        assert_eq!(read_as_text(&path).unwrap(), "Run make all first.");
    }
}
