//! View functions: notes + UI state in, element subtrees out.

mod main_detail;
mod sidebar;
mod top_nav;

pub use main_detail::{main_detail, CONTENT_FIELD, PLACEHOLDER, TITLE_FIELD};
pub use sidebar::{sidebar, EMPTY_MESSAGE};
pub use top_nav::{top_nav, APP_TITLE};

use std::fmt::Write;

use chrono::{DateTime, Local, Utc};
use tracing::debug;

use crate::config::Config;
use crate::dom::{build, Element};
use crate::entity::Note;
use crate::state::{Action, UiState};

pub type View = Element<Action>;

/// Settings the view functions need beyond notes and state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewContext {
    pub time_format: String,
    pub utc: bool,
}

impl Default for ViewContext {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ViewContext {
    fn from(config: &Config) -> Self {
        Self {
            time_format: config.time_format.clone(),
            utc: config.utc,
        }
    }
}

impl ViewContext {
    /// Format a millisecond timestamp for display. Falls back to the raw
    /// millisecond value when the time is out of range or the format is bad.
    pub fn format_timestamp(&self, ms: i64) -> String {
        let utc = match DateTime::<Utc>::from_timestamp_millis(ms) {
            Some(dt) => dt,
            None => return ms.to_string(),
        };

        let mut out = String::new();
        let written = if self.utc {
            write!(out, "{}", utc.format(&self.time_format))
        } else {
            write!(out, "{}", utc.with_timezone(&Local).format(&self.time_format))
        };

        match written {
            Ok(()) => out,
            Err(_) => {
                debug!(format = %self.time_format, "timestamp format failed");
                ms.to_string()
            }
        }
    }
}

/// Everything that goes under the app root, in order.
pub fn app_view(notes: &[Note], state: &UiState, ctx: &ViewContext) -> Vec<View> {
    vec![
        top_nav(),
        build(
            "div",
            [("className", "layout".into())],
            [sidebar(notes, state, ctx).into(), main_detail(notes, state, ctx).into()],
        ),
    ]
}
