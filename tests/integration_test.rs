use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn notepad_cmd(data_dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_notepad"));
    cmd.arg("--data-dir").arg(data_dir);
    cmd.env_remove("NOTEPAD_DATA_DIR");
    cmd
}

fn run(data_dir: &Path, args: &[&str]) -> Output {
    notepad_cmd(data_dir).args(args).output().unwrap()
}

fn run_with_stdin(data_dir: &Path, args: &[&str], input: &str) -> Output {
    let mut child = notepad_cmd(data_dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn list_json(data_dir: &Path) -> Vec<serde_json::Value> {
    let output = run(data_dir, &["list", "--json"]);
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_list_on_fresh_directory_is_empty() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["list"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No notes yet"));
    assert!(list_json(tmp.path()).is_empty());
}

#[test]
fn test_add_then_list_json() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["add", "Groceries", "--content", "Milk, eggs"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Created note"));

    let notes = list_json(tmp.path());
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "Groceries");
    assert_eq!(notes[0]["content"], "Milk, eggs");
    assert_eq!(notes[0]["createdAt"], notes[0]["updatedAt"]);
    assert!(!notes[0]["id"].as_str().unwrap().is_empty());
    assert!(tmp.path().join("storage.json").exists());
}

#[test]
fn test_add_with_blank_title_fails() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["add", "   "]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Title is required"));
    assert!(list_json(tmp.path()).is_empty());
}

#[test]
fn test_add_reads_content_from_stdin() {
    let tmp = TempDir::new().unwrap();

    let output = run_with_stdin(tmp.path(), &["add", "Piped", "--stdin", "--json"], "line one\nline two\n");
    assert!(output.status.success());

    let note: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(note["content"], "line one\nline two");
}

#[test]
fn test_edit_and_show() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["add", "Draft", "--json"]);
    let note: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let id = note["id"].as_str().unwrap().to_string();

    let output = run(tmp.path(), &["edit", &id, "--content", "Final text"]);
    assert!(output.status.success());

    let output = run(tmp.path(), &["show", &id, "--json"]);
    assert!(output.status.success());
    let shown: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown["title"], "Draft");
    assert_eq!(shown["content"], "Final text");
}

#[test]
fn test_show_unknown_id_fails() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["show", "12345"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Note not found"));
}

#[test]
fn test_delete_requires_force_when_not_interactive() {
    let tmp = TempDir::new().unwrap();
    let output = run(tmp.path(), &["add", "Keep me", "--json"]);
    let note: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let id = note["id"].as_str().unwrap().to_string();

    let output = run_with_stdin(tmp.path(), &["delete", &id], "y\n");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Use --force"));
    assert!(!stderr.contains("Storage error"));
    assert_eq!(list_json(tmp.path()).len(), 1);

    let output = run(tmp.path(), &["delete", &id, "--force"]);
    assert!(output.status.success());
    assert!(list_json(tmp.path()).is_empty());
}

#[test]
fn test_render_html_shows_notes_newest_first() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["add", "First"]);
    std::thread::sleep(std::time::Duration::from_millis(5));
    run(tmp.path(), &["add", "Second"]);

    let output = run(tmp.path(), &["render"]);
    assert!(output.status.success());
    let html = String::from_utf8_lossy(&output.stdout);

    assert!(html.starts_with(r#"<div id="app">"#));
    assert!(html.contains(r#"<header class="top-nav">"#));
    let second = html.find("Second").unwrap();
    let first = html.find("First").unwrap();
    assert!(second < first);
}

#[test]
fn test_render_text_on_empty_storage() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["render", "--text"]);
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("[1] <+ New>"));
    assert!(text.contains("No notes yet"));
    assert!(text.contains("Select a note or create a new one."));
}

#[test]
fn test_shell_session_creates_and_deletes() {
    let tmp = TempDir::new().unwrap();

    let script = "1\nset title Groceries\nset content Milk, eggs\nsubmit\nquit\n";
    let output = run_with_stdin(tmp.path(), &["shell"], script);
    assert!(output.status.success());

    let notes = list_json(tmp.path());
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "Groceries");

    // select [2], decline delete at [4], then confirm it
    let script = "2\n4\nn\n4\ny\n";
    let output = run_with_stdin(tmp.path(), &[], script);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Delete this note?").count(), 2);
    assert!(list_json(tmp.path()).is_empty());
}

#[test]
fn test_corrupt_storage_resets_by_default() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("storage.json"),
        r#"{"notes-app.notes": "[{broken"}"#,
    )
    .unwrap();

    assert!(list_json(tmp.path()).is_empty());

    let output = run(tmp.path(), &["add", "Fresh"]);
    assert!(output.status.success());
    assert_eq!(list_json(tmp.path()).len(), 1);
}

#[test]
fn test_damaged_store_file_resets_by_default() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("storage.json"), "[truncated").unwrap();

    assert!(list_json(tmp.path()).is_empty());

    let output = run(tmp.path(), &["add", "Fresh"]);
    assert!(output.status.success());
    assert_eq!(list_json(tmp.path()).len(), 1);
}

#[test]
fn test_bad_time_format_is_config_error() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("config.yaml"), "time_format: \"%Q\"\n").unwrap();

    let output = run(tmp.path(), &["render"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("time_format"));
}

#[test]
fn test_corrupt_storage_fails_when_configured() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("config.yaml"), "on_corrupt: fail\n").unwrap();
    std::fs::write(
        tmp.path().join("storage.json"),
        r#"{"notes-app.notes": "[{broken"}"#,
    )
    .unwrap();

    let output = run(tmp.path(), &["list"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Corrupt data"));
}
