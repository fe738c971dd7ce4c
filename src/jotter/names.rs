//! Collision-free filename resolution for newly saved documents.

use crate::model::UNTITLED;
use std::path::{Path, PathBuf};

/// Makes a title safe to use as a file name: filesystem-hostile characters
/// become `-`, zero-width/invisible spaces are stripped, and a blank result
/// falls back to "Untitled".
pub fn sanitize_title(title: &str) -> String {
    let sanitized: String = title
        .chars()
        .filter(|c| *c != '\u{00A0}' && *c != '\u{FEFF}')
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            _ => c,
        })
        .collect();

    let trimmed = sanitized.trim();
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Returns the first path under `dir` named after `base_title` that does not
/// exist yet: `Title.txt`, then `Title (1).txt`, `Title (2).txt`, and so on.
///
/// Deterministic: no randomness, O(n) existence checks where n is the
/// number of prior collisions. Run once when a document is first saved;
/// auto-save keeps reusing the location resolved here.
pub fn resolve(dir: &Path, base_title: &str, ext: &str) -> PathBuf {
    let base = sanitize_title(base_title);
    let mut candidate = dir.join(format!("{}{}", base, ext));
    let mut n = 1u32;
    while candidate.exists() {
        candidate = dir.join(format!("{} ({}){}", base, n, ext));
        n += 1;
    }
    candidate
}
