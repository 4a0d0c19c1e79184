use super::View;
use crate::dom::{build, handler};
use crate::state::Action;

pub const APP_TITLE: &str = "Notes";

pub fn top_nav() -> View {
    build(
        "header",
        [("className", "top-nav".into())],
        [
            build("h1", [], [APP_TITLE.into()]).into(),
            build(
                "button",
                [
                    ("id", "new-note".into()),
                    ("type", "button".into()),
                    ("className", "btn btn-primary".into()),
                    ("onclick", handler(Action::NewNote)),
                ],
                ["+ New".into()],
            )
            .into(),
        ],
    )
}
