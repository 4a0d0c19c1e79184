//! Interactive terminal host for the app.
//!
//! The current tree is printed as text with numbered targets; commands fire
//! events at those targets or type into form fields.

use std::io::{BufRead, Write};

use colored::Colorize;

use crate::app::{App, Outcome};
use crate::clock::Clock;
use crate::dom::html::to_html;
use crate::dom::text::{render_text, TextView};
use crate::dom::{DomEvent, EventKind, NodePath};
use crate::error::Result;
use crate::host::Terminal;
use crate::state::Action;
use crate::storage::KeyValueStore;

const PROMPT: &str = "> ";

const HELP: &str = "\
Commands:
  <n> | click <n>     click target [n]
  enter <n>           press Enter on target [n]
  key <n> <KEY>       press KEY on target [n]
  set <field> <text>  type into a form field (title, content; \\n for newline)
  submit              submit the open form
  cancel              cancel the open form
  show                print the app again
  html                print the app as HTML
  help                show this help
  quit                leave";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Fire(usize, DomEvent),
    Set(String, String),
    Submit,
    Cancel,
    Show,
    Html,
    Help,
    Quit,
}

fn parse_command(line: &str) -> std::result::Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let target = |s: &str| {
        s.parse::<usize>()
            .map_err(|_| format!("Expected a target number, got '{}'", s))
    };

    let command = match head {
        "click" => Command::Fire(target(rest)?, DomEvent::Click),
        "enter" => Command::Fire(target(rest)?, DomEvent::key_down("Enter")),
        "key" => {
            let (n, key) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "Usage: key <n> <KEY>".to_string())?;
            Command::Fire(target(n)?, DomEvent::key_down(key.trim()))
        }
        "set" => {
            let (field, text) = match rest.split_once(char::is_whitespace) {
                Some((field, text)) => (field, text),
                None if !rest.is_empty() => (rest, ""),
                None => return Err("Usage: set <field> <text>".to_string()),
            };
            Command::Set(field.to_string(), text.replace("\\n", "\n"))
        }
        "submit" => Command::Submit,
        "cancel" => Command::Cancel,
        "show" | "ls" => Command::Show,
        "html" => Command::Html,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => match other.parse::<usize>() {
            Ok(n) => Command::Fire(n, DomEvent::Click),
            Err(_) => return Err(format!("Unknown command: {}. Type 'help' for commands.", other)),
        },
    };
    Ok(Some(command))
}

/// Run the read-dispatch-print loop until `quit` or end of input.
pub fn run_shell<S, C, R, W>(app: &mut App<S, C>, term: &mut Terminal<R, W>) -> Result<()>
where
    S: KeyValueStore,
    C: Clock,
    R: BufRead,
    W: Write,
{
    let mut view = render_text(app.root());
    print_view(term, &view)?;

    while let Some(line) = term.prompt(PROMPT)? {
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                print_error(term, &message)?;
                continue;
            }
        };

        let outcome = match command {
            Command::Quit => break,
            Command::Help => {
                term.println(HELP)?;
                continue;
            }
            Command::Show => {
                print_view(term, &view)?;
                continue;
            }
            Command::Html => {
                term.println(&to_html(app.root()))?;
                continue;
            }
            Command::Set(field, text) => {
                if app.set_field_value(&field, &text) {
                    Outcome::Rendered
                } else {
                    print_error(term, &format!("No field named '{}'", field))?;
                    continue;
                }
            }
            Command::Fire(n, event) => match view.target(n).cloned() {
                Some(path) => app.dispatch(&path, &event, term)?,
                None => {
                    print_error(term, &format!("No target [{}]", n))?;
                    continue;
                }
            },
            Command::Submit => match find_listener(app, EventKind::Submit, &Action::SubmitForm) {
                Some(path) => app.dispatch(&path, &DomEvent::Submit, term)?,
                None => Outcome::NoListener,
            },
            Command::Cancel => match find_listener(app, EventKind::Click, &Action::CancelEdit) {
                Some(path) => app.dispatch(&path, &DomEvent::Click, term)?,
                None => Outcome::NoListener,
            },
        };

        match outcome {
            Outcome::Rendered => {
                view = render_text(app.root());
                print_view(term, &view)?;
            }
            Outcome::Unchanged => {}
            Outcome::NoListener => print_error(term, "Nothing to do there")?,
        }
    }

    Ok(())
}

fn find_listener<S, C>(app: &App<S, C>, event: EventKind, action: &Action) -> Option<NodePath>
where
    S: KeyValueStore,
    C: Clock,
{
    app.root()
        .find(|el| el.listener(&event) == Some(action))
        .map(|(path, _)| path)
}

fn print_view<R: BufRead, W: Write>(term: &mut Terminal<R, W>, view: &TextView) -> Result<()> {
    term.println(&view.text)?;
    term.println(&"─".repeat(50).dimmed().to_string())
}

fn print_error<R: BufRead, W: Write>(term: &mut Terminal<R, W>, message: &str) -> Result<()> {
    term.println(&format!("{} {}", "✗".red().bold(), message))
}
