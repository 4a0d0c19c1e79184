//! Blocking dialogs supplied by whatever hosts the element tree.

mod terminal;

pub use terminal::Terminal;

use std::collections::VecDeque;

/// Modal dialogs. Both calls block until the user responds.
pub trait Dialogs {
    fn alert(&mut self, message: &str);
    fn confirm(&mut self, message: &str) -> bool;
}

/// Dialogs answered from a prepared script; records everything it was shown.
#[derive(Debug, Default)]
pub struct ScriptedDialogs {
    answers: VecDeque<bool>,
    pub alerts: Vec<String>,
    pub confirms: Vec<String>,
}

impl ScriptedDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue answers for upcoming `confirm` calls. Unscripted confirms answer `false`.
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl Dialogs for ScriptedDialogs {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirms.push(message.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}
