// src/ports/text.rs
use crate::domain::Note;

/// First non-empty line, trimmed
pub fn first_line(text: &str) -> &str {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

/// One tab-separated line per note: id, name, first description line, image URL
pub fn format_listing(notes: &[Note]) -> String {
    notes
        .iter()
        .map(|note| {
            format!(
                "{}\t{}\t{}\t{}\n",
                note.id.as_deref().unwrap_or("-"),
                note.name,
                first_line(&note.description),
                note.image_url().unwrap_or("-")
            )
        })
        .collect()
}
