//! Text and table output formatting for notes.

use std::io::IsTerminal;

use chrono::{DateTime, Local, Utc};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use notebox_core::Note;

const PREVIEW_CHARS: usize = 48;

/// First line of the content, shortened for list display.
pub fn preview(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or("").trim();
    if first_line.chars().count() <= PREVIEW_CHARS {
        return first_line.to_string();
    }
    let mut shortened: String = first_line.chars().take(PREVIEW_CHARS - 1).collect();
    shortened.push('…');
    shortened
}

fn local_time(value: &DateTime<Utc>) -> String {
    value
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Print a single note in human-readable format.
pub fn print_note(note: &Note, quiet: bool) {
    if !quiet {
        println!("ID: {}", note.id);
        println!("Title: {}", note.title);
        println!("Created: {}", local_time(&note.created_at));
        println!("Updated: {}", local_time(&note.updated_at));
        println!();
    }
    println!("{}", note.content);
}

/// Print notes as a table on a terminal, or as tab-separated lines otherwise.
pub fn print_note_list(notes: &[Note], quiet: bool) {
    if notes.is_empty() {
        if !quiet {
            println!("No notes yet.");
        }
        return;
    }

    if !std::io::stdout().is_terminal() || quiet {
        for note in notes {
            println!("{}\t{}\t{}", note.id, note.updated_at.to_rfc3339(), note.title);
        }
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Title", "Updated", "Preview"]);
    for note in notes {
        table.add_row(vec![
            note.id.to_string(),
            note.title.clone(),
            local_time(&note.updated_at),
            preview(&note.content),
        ]);
    }
    println!("{}", table);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_takes_first_line() {
        assert_eq!(preview("milk\neggs"), "milk");
        assert_eq!(preview(""), "");
    }

    #[test]
    fn test_preview_truncates_long_lines() {
        let long = "x".repeat(100);
        let shown = preview(&long);
        assert_eq!(shown.chars().count(), PREVIEW_CHARS);
        assert!(shown.ends_with('…'));
    }
}
