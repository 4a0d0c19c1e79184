//! Coloured status and note output for the one-shot commands.

use colored::*;

use crate::entity::Note;
use crate::view::ViewContext;

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn print_info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

pub fn print_note(note: &Note, ctx: &ViewContext) {
    println!("{}", "─".repeat(50).dimmed());
    println!("{}: {}", "Title".bold(), note.display_title().yellow());
    println!("{}: {}", "ID".dimmed(), note.id);
    println!("{}: {}", "Created".dimmed(), ctx.format_timestamp(note.created_at));
    println!("{}: {}", "Updated".dimmed(), ctx.format_timestamp(note.updated_at));
    println!();
    if note.content.is_empty() {
        println!("{}", "(empty)".dimmed().italic());
    } else {
        println!("{}", note.content);
    }
    println!("{}", "─".repeat(50).dimmed());
}

pub fn print_note_list(notes: &[Note], ctx: &ViewContext) {
    if notes.is_empty() {
        println!("{}", "No notes yet. Create one with 'notepad add'".dimmed());
        return;
    }

    println!("{}", format!("Notes ({}):", notes.len()).bold());
    for note in notes {
        println!(
            "  {} {} {}",
            note.id.cyan(),
            note.display_title().yellow(),
            format!("({})", ctx.format_timestamp(note.updated_at)).dimmed()
        );
    }
}
