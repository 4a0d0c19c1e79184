use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::display::{print_info, print_note, print_note_list, print_success};
use super::shell::run_shell;
use crate::app::App;
use crate::config::{resolve_data_dir, Config};
use crate::dom::html::to_html;
use crate::dom::text::render_text;
use crate::entity::{Note, NoteDraft};
use crate::error::{NotepadError, Result};
use crate::host::{Dialogs, Terminal};
use crate::repository::NoteRepository;
use crate::storage::{FileStore, NoteStore};
use crate::view::ViewContext;

struct Session {
    config: Config,
    repo: NoteRepository<FileStore>,
}

fn open_session(data_dir: Option<PathBuf>) -> Result<Session> {
    let dir = resolve_data_dir(data_dir);
    open_session_at(&dir)
}

fn open_session_at(dir: &Path) -> Result<Session> {
    let config = Config::load(dir)?;
    let kv = FileStore::open(dir)?.on_corrupt(config.on_corrupt);
    debug!(path = %kv.path().display(), key = %config.storage_key, "opened storage");

    let store = NoteStore::with_key(kv, config.storage_key.clone()).on_corrupt(config.on_corrupt);
    Ok(Session {
        config,
        repo: NoteRepository::new(store),
    })
}

/// Resolve an id given on the command line: exact match first, then prefix.
fn find_note(notes: &[Note], id: &str) -> Result<Note> {
    notes
        .iter()
        .find(|n| n.id == id)
        .or_else(|| notes.iter().find(|n| n.id.starts_with(id)))
        .cloned()
        .ok_or_else(|| NotepadError::NoteNotFound(id.to_string()))
}

/// Confirmation needs someone at the keyboard.
fn require_interactive(interactive: bool) -> Result<()> {
    if interactive {
        Ok(())
    } else {
        Err(NotepadError::Usage(
            "Use --force to delete in non-interactive mode".to_string(),
        ))
    }
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(content)
}

pub fn handle_shell(data_dir: Option<PathBuf>) -> Result<()> {
    let session = open_session(data_dir)?;
    let ctx = ViewContext::from(&session.config);
    let mut app = App::new(session.repo, ctx)?;

    let stdin = io::stdin();
    let mut term = Terminal::new(stdin.lock(), io::stdout());
    run_shell(&mut app, &mut term)
}

pub fn handle_render(data_dir: Option<PathBuf>, text: bool) -> Result<()> {
    let session = open_session(data_dir)?;
    let ctx = ViewContext::from(&session.config);
    let app = App::new(session.repo, ctx)?;

    if text {
        println!("{}", render_text(app.root()).text);
    } else {
        println!("{}", to_html(app.root()));
    }
    Ok(())
}

pub fn handle_list(data_dir: Option<PathBuf>, json: bool) -> Result<()> {
    let session = open_session(data_dir)?;
    let notes = session.repo.list()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else {
        print_note_list(&notes, &ViewContext::from(&session.config));
    }
    Ok(())
}

pub fn handle_show(data_dir: Option<PathBuf>, id: String, json: bool) -> Result<()> {
    let session = open_session(data_dir)?;
    let note = find_note(&session.repo.list()?, &id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        print_note(&note, &ViewContext::from(&session.config));
    }
    Ok(())
}

pub fn handle_add(
    data_dir: Option<PathBuf>,
    title: String,
    content: Option<String>,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let mut session = open_session(data_dir)?;

    let content = if stdin { read_stdin()? } else { content.unwrap_or_default() };
    let draft = NoteDraft::new(&title, &content)?;
    let note = session.repo.create(&draft.title, &draft.content)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        print_success(&format!("Created note {} - {}", note.id, note.title));
    }
    Ok(())
}

pub fn handle_edit(
    data_dir: Option<PathBuf>,
    id: String,
    title: Option<String>,
    content: Option<String>,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let mut session = open_session(data_dir)?;
    let note = find_note(&session.repo.list()?, &id)?;

    let content = if stdin { Some(read_stdin()?) } else { content };
    let draft = NoteDraft::new(
        title.as_deref().unwrap_or(&note.title),
        content.as_deref().unwrap_or(&note.content),
    )?;

    let updated = session
        .repo
        .update(&note.id, &draft.title, &draft.content)?
        .ok_or_else(|| NotepadError::NoteNotFound(note.id.clone()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&updated)?);
    } else {
        print_success(&format!("Updated note {} - {}", updated.id, updated.title));
    }
    Ok(())
}

pub fn handle_delete(data_dir: Option<PathBuf>, id: String, force: bool) -> Result<()> {
    let mut session = open_session(data_dir)?;
    let note = find_note(&session.repo.list()?, &id)?;

    if !force {
        require_interactive(atty::is(atty::Stream::Stdin))?;

        let stdin = io::stdin();
        let mut term = Terminal::new(stdin.lock(), io::stdout());
        let question = format!("Delete note {} - {}?", note.id, note.display_title());
        if !term.confirm(&question) {
            print_info("Cancelled.");
            return Ok(());
        }
    }

    session.repo.delete(&note.id)?;
    print_success(&format!("Deleted note {} - {}", note.id, note.display_title()));
    Ok(())
}
