//! The render loop.
//!
//! `App` owns the repository, the UI state and the current element tree.
//! Every handled event computes the next state, then rebuilds the whole tree
//! under the app root from scratch.

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::dom::{DomEvent, Element};
use crate::entity::NoteDraft;
use crate::error::{NotepadError, Result};
use crate::host::Dialogs;
use crate::repository::NoteRepository;
use crate::state::{Action, UiState};
use crate::storage::KeyValueStore;
use crate::view::{self, ViewContext, CONTENT_FIELD, TITLE_FIELD};

pub const ROOT_ID: &str = "app";
pub const DELETE_PROMPT: &str = "Delete this note? This cannot be undone.";
const ENTER_KEY: &str = "Enter";

/// What a dispatched event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed and the tree was rebuilt.
    Rendered,
    /// A handler ran but left state and tree alone.
    Unchanged,
    /// Nothing at the target listens for the event.
    NoListener,
}

pub struct App<S, C = SystemClock> {
    repo: NoteRepository<S, C>,
    state: UiState,
    ctx: ViewContext,
    root: Element<Action>,
    renders: usize,
}

impl<S: KeyValueStore, C: Clock> App<S, C> {
    /// Build the app and perform the initial render.
    pub fn new(repo: NoteRepository<S, C>, ctx: ViewContext) -> Result<Self> {
        let mut root = Element::new("div");
        root.set_attribute("id", ROOT_ID);

        let mut app = Self {
            repo,
            state: UiState::default(),
            ctx,
            root,
            renders: 0,
        };
        app.render()?;
        Ok(app)
    }

    pub fn root(&self) -> &Element<Action> {
        &self.root
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn repository(&self) -> &NoteRepository<S, C> {
        &self.repo
    }

    /// Number of full renders since construction, the initial one included.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// Tear down everything under the root and rebuild it from storage + state.
    pub fn render(&mut self) -> Result<()> {
        let notes = self.repo.list()?;
        self.root.clear_children();
        for child in view::app_view(&notes, &self.state, &self.ctx) {
            self.root.append_element(child);
        }
        self.renders += 1;
        debug!(notes = notes.len(), editing = self.state.editing, "rendered");
        Ok(())
    }

    /// Type into a form control of the current tree, as a user would.
    pub fn set_field_value(&mut self, name: &str, value: &str) -> bool {
        self.root.set_field_value(name, value)
    }

    /// Deliver `event` to the node at `target`, bubbling to the nearest listener.
    pub fn dispatch(
        &mut self,
        target: &[usize],
        event: &DomEvent,
        dialogs: &mut dyn Dialogs,
    ) -> Result<Outcome> {
        let (handler_path, action) = match self.root.resolve_listener(target, &event.kind()) {
            Some((path, action)) => (path, action.clone()),
            None => return Ok(Outcome::NoListener),
        };
        debug!(?action, ?event, "dispatching");

        let next = match action {
            Action::NewNote => Some(self.state.clone().start_new()),
            Action::SelectNote(id) => match event {
                DomEvent::KeyDown { key } if key != ENTER_KEY => None,
                _ => Some(self.state.clone().select(id)),
            },
            Action::EditNote => Some(self.state.clone().start_edit()),
            Action::CancelEdit => Some(self.state.clone().stop_edit()),
            Action::DeleteNote => self.handle_delete(dialogs)?,
            Action::SubmitForm => self.handle_submit(&handler_path, dialogs)?,
        };

        match next {
            Some(state) => {
                self.state = state;
                self.render()?;
                Ok(Outcome::Rendered)
            }
            None => Ok(Outcome::Unchanged),
        }
    }

    fn handle_delete(&mut self, dialogs: &mut dyn Dialogs) -> Result<Option<UiState>> {
        let id = match self.state.selected_note_id.clone() {
            Some(id) => id,
            None => return Ok(None),
        };

        if !dialogs.confirm(DELETE_PROMPT) {
            debug!(%id, "delete declined");
            return Ok(None);
        }

        self.repo.delete(&id)?;
        Ok(Some(self.state.clone().clear_selection()))
    }

    fn handle_submit(
        &mut self,
        form_path: &[usize],
        dialogs: &mut dyn Dialogs,
    ) -> Result<Option<UiState>> {
        let form = match self.root.at(form_path) {
            Some(form) => form,
            None => return Ok(None),
        };
        let title = form.form_value(TITLE_FIELD).unwrap_or_default();
        let content = form.form_value(CONTENT_FIELD).unwrap_or_default();

        let draft = match NoteDraft::new(&title, &content) {
            Ok(draft) => draft,
            Err(NotepadError::Validation(message)) => {
                dialogs.alert(&message);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let state = match self.state.selected_note_id.clone() {
            Some(id) => match self.repo.update(&id, &draft.title, &draft.content)? {
                Some(_) => self.state.clone().stop_edit(),
                None => {
                    warn!(%id, "note vanished while being edited");
                    self.state.clone().clear_selection()
                }
            },
            None => {
                let note = self.repo.create(&draft.title, &draft.content)?;
                self.state.clone().select(note.id)
            }
        };
        Ok(Some(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::dom::{EventKind, NodePath};
    use crate::host::ScriptedDialogs;
    use crate::storage::{MemoryStore, NoteStore};
    use crate::view::PLACEHOLDER;

    type TestApp = App<MemoryStore, ManualClock>;

    fn app() -> TestApp {
        let repo = NoteRepository::with_clock(NoteStore::new(MemoryStore::new()), ManualClock::new(1_000));
        App::new(repo, ViewContext::default()).unwrap()
    }

    fn app_with(titles: &[&str]) -> TestApp {
        let mut repo = NoteRepository::with_clock(NoteStore::new(MemoryStore::new()), ManualClock::new(1_000));
        for title in titles {
            repo.create(title, "body").unwrap();
            repo.clock().advance(1);
        }
        App::new(repo, ViewContext::default()).unwrap()
    }

    fn path_of(app: &TestApp, event: EventKind, action: &Action) -> NodePath {
        app.root()
            .find(|el| el.listener(&event) == Some(action))
            .map(|(path, _)| path)
            .unwrap()
    }

    fn click(app: &mut TestApp, action: Action, dialogs: &mut ScriptedDialogs) -> Outcome {
        let path = path_of(app, EventKind::Click, &action);
        app.dispatch(&path, &DomEvent::Click, dialogs).unwrap()
    }

    fn submit(app: &mut TestApp, dialogs: &mut ScriptedDialogs) -> Outcome {
        let path = path_of(app, EventKind::Submit, &Action::SubmitForm);
        app.dispatch(&path, &DomEvent::Submit, dialogs).unwrap()
    }

    fn detail(app: &TestApp) -> &Element<Action> {
        app.root().find(|el| el.has_class("main-detail")).unwrap().1
    }

    #[test]
    fn test_initial_render() {
        let app = app();
        assert_eq!(app.render_count(), 1);
        assert_eq!(app.root().attribute("id"), Some(ROOT_ID));
        assert_eq!(app.root().children().len(), 2);
        assert_eq!(detail(&app).text_content(), PLACEHOLDER);
    }

    #[test]
    fn test_create_flow_selects_new_note() {
        let mut app = app();
        let mut dialogs = ScriptedDialogs::new();

        assert_eq!(click(&mut app, Action::NewNote, &mut dialogs), Outcome::Rendered);
        assert!(app.state().editing);

        assert!(app.set_field_value(TITLE_FIELD, "  Groceries "));
        assert!(app.set_field_value(CONTENT_FIELD, "Milk, eggs"));
        assert_eq!(submit(&mut app, &mut dialogs), Outcome::Rendered);

        let notes = app.repository().list().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Groceries");
        assert_eq!(app.state().selected_note_id.as_deref(), Some(notes[0].id.as_str()));
        assert!(!app.state().editing);
        assert!(detail(&app).text_content().contains("Milk, eggs"));
        assert!(dialogs.alerts.is_empty());
    }

    #[test]
    fn test_blank_title_alerts_and_keeps_form_open() {
        let mut app = app_with(&["Groceries"]);
        let mut dialogs = ScriptedDialogs::new();
        let id = app.repository().list().unwrap()[0].id.clone();

        click(&mut app, Action::SelectNote(id.clone()), &mut dialogs);
        click(&mut app, Action::EditNote, &mut dialogs);
        let renders = app.render_count();

        app.set_field_value(TITLE_FIELD, "   ");
        assert_eq!(submit(&mut app, &mut dialogs), Outcome::Unchanged);

        assert_eq!(dialogs.alerts, vec!["Title is required"]);
        assert_eq!(app.render_count(), renders);
        assert!(app.state().editing);
        assert_eq!(app.root().form_value(TITLE_FIELD).as_deref(), Some("   "));
        assert_eq!(app.repository().get(&id).unwrap().unwrap().title, "Groceries");
    }

    #[test]
    fn test_edit_updates_selected_note() {
        let mut app = app_with(&["A", "B"]);
        let mut dialogs = ScriptedDialogs::new();
        let a = app.repository().list().unwrap()[1].id.clone();

        click(&mut app, Action::SelectNote(a.clone()), &mut dialogs);
        click(&mut app, Action::EditNote, &mut dialogs);
        assert_eq!(app.root().form_value(TITLE_FIELD).as_deref(), Some("A"));

        app.repository().clock().advance(100);
        app.set_field_value(TITLE_FIELD, "A edited");
        submit(&mut app, &mut dialogs);

        let notes = app.repository().list().unwrap();
        assert_eq!(notes[0].id, a);
        assert_eq!(notes[0].title, "A edited");
        assert_eq!(notes.len(), 2);
        assert_eq!(app.state().selected_note_id.as_deref(), Some(a.as_str()));
        assert!(!app.state().editing);
    }

    #[test]
    fn test_cancel_discards_input() {
        let mut app = app_with(&["A"]);
        let mut dialogs = ScriptedDialogs::new();
        let id = app.repository().list().unwrap()[0].id.clone();

        click(&mut app, Action::SelectNote(id.clone()), &mut dialogs);
        click(&mut app, Action::EditNote, &mut dialogs);
        app.set_field_value(TITLE_FIELD, "changed");
        assert_eq!(click(&mut app, Action::CancelEdit, &mut dialogs), Outcome::Rendered);

        assert!(!app.state().editing);
        assert_eq!(app.repository().get(&id).unwrap().unwrap().title, "A");
    }

    #[test]
    fn test_declined_delete_changes_nothing() {
        let mut app = app_with(&["A"]);
        let mut dialogs = ScriptedDialogs::answering([false]);
        let id = app.repository().list().unwrap()[0].id.clone();

        click(&mut app, Action::SelectNote(id.clone()), &mut dialogs);
        let renders = app.render_count();
        assert_eq!(click(&mut app, Action::DeleteNote, &mut dialogs), Outcome::Unchanged);

        assert_eq!(dialogs.confirms, vec![DELETE_PROMPT]);
        assert_eq!(app.render_count(), renders);
        assert_eq!(app.repository().list().unwrap().len(), 1);
        assert_eq!(app.state().selected_note_id.as_deref(), Some(id.as_str()));
    }

    #[test]
    fn test_confirmed_delete_clears_selection() {
        let mut app = app_with(&["A", "B"]);
        let mut dialogs = ScriptedDialogs::answering([true]);
        let b = app.repository().list().unwrap()[0].id.clone();

        click(&mut app, Action::SelectNote(b.clone()), &mut dialogs);
        assert_eq!(click(&mut app, Action::DeleteNote, &mut dialogs), Outcome::Rendered);

        let notes = app.repository().list().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "A");
        assert_eq!(*app.state(), UiState::default());
        assert_eq!(detail(&app).text_content(), PLACEHOLDER);
    }

    #[test]
    fn test_submit_after_note_vanished_falls_back_to_placeholder() {
        let mut app = app_with(&["A"]);
        let mut dialogs = ScriptedDialogs::new();
        let id = app.repository().list().unwrap()[0].id.clone();

        click(&mut app, Action::SelectNote(id.clone()), &mut dialogs);
        click(&mut app, Action::EditNote, &mut dialogs);
        app.repo.delete(&id).unwrap();

        app.set_field_value(TITLE_FIELD, "Still here?");
        assert_eq!(submit(&mut app, &mut dialogs), Outcome::Rendered);

        assert_eq!(*app.state(), UiState::default());
        assert_eq!(detail(&app).text_content(), PLACEHOLDER);
        assert!(app.repository().list().unwrap().is_empty());
        assert!(dialogs.alerts.is_empty());
    }

    #[test]
    fn test_enter_selects_but_other_keys_do_not() {
        let mut app = app_with(&["A"]);
        let mut dialogs = ScriptedDialogs::new();
        let id = app.repository().list().unwrap()[0].id.clone();
        let item = path_of(&app, EventKind::KeyDown, &Action::SelectNote(id.clone()));

        let outcome = app.dispatch(&item, &DomEvent::key_down("a"), &mut dialogs).unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(app.state().selected_note_id, None);

        let outcome = app.dispatch(&item, &DomEvent::key_down("Enter"), &mut dialogs).unwrap();
        assert_eq!(outcome, Outcome::Rendered);
        assert_eq!(app.state().selected_note_id.as_deref(), Some(id.as_str()));
    }

    #[test]
    fn test_click_on_item_child_bubbles_to_item() {
        let mut app = app_with(&["A"]);
        let mut dialogs = ScriptedDialogs::new();
        let id = app.repository().list().unwrap()[0].id.clone();
        let mut title = path_of(&app, EventKind::Click, &Action::SelectNote(id.clone()));
        title.push(0);

        app.dispatch(&title, &DomEvent::Click, &mut dialogs).unwrap();
        assert_eq!(app.state().selected_note_id.as_deref(), Some(id.as_str()));
    }

    #[test]
    fn test_new_clears_selection() {
        let mut app = app_with(&["A"]);
        let mut dialogs = ScriptedDialogs::new();
        let id = app.repository().list().unwrap()[0].id.clone();

        click(&mut app, Action::SelectNote(id), &mut dialogs);
        click(&mut app, Action::NewNote, &mut dialogs);

        assert!(app.state().editing);
        assert_eq!(app.state().selected_note_id, None);
        assert_eq!(app.root().form_value(TITLE_FIELD).as_deref(), Some(""));
    }

    #[test]
    fn test_event_without_listener() {
        let mut app = app();
        let mut dialogs = ScriptedDialogs::new();
        let renders = app.render_count();

        let outcome = app.dispatch(&[], &DomEvent::Click, &mut dialogs).unwrap();
        assert_eq!(outcome, Outcome::NoListener);
        assert_eq!(app.render_count(), renders);
    }

    #[test]
    fn test_every_render_rebuilds_root_children() {
        let mut app = app_with(&["A"]);
        let mut dialogs = ScriptedDialogs::new();

        click(&mut app, Action::NewNote, &mut dialogs);
        click(&mut app, Action::CancelEdit, &mut dialogs);

        assert_eq!(app.render_count(), 3);
        assert_eq!(app.root().children().len(), 2);
    }
}
