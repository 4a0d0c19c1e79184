//! Plain-text rendering of an element tree for terminals.
//!
//! Every element that owns a listener gets a `[n]` marker; `targets[n - 1]`
//! holds its path so the host can dispatch events at it.

use super::{Element, Node, NodePath};

const BLOCK_TAGS: &[&str] = &[
    "article", "aside", "div", "footer", "form", "h1", "h2", "h3", "header", "label", "li",
    "main", "nav", "ol", "p", "section", "ul",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextView {
    pub text: String,
    pub targets: Vec<NodePath>,
}

impl TextView {
    /// Path of the `[n]` marker (1-based).
    pub fn target(&self, n: usize) -> Option<&NodePath> {
        n.checked_sub(1).and_then(|i| self.targets.get(i))
    }
}

pub fn render_text<A>(root: &Element<A>) -> TextView {
    let mut writer = Writer::default();
    writer.element(root, &mut Vec::new());
    writer.flush();

    let mut lines: Vec<String> = Vec::new();
    for line in writer.lines {
        if line.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    TextView {
        text: lines.join("\n"),
        targets: writer.targets,
    }
}

#[derive(Default)]
struct Writer {
    lines: Vec<String>,
    line: String,
    targets: Vec<NodePath>,
}

impl Writer {
    fn flush(&mut self) {
        let line = self.line.trim_end().to_string();
        if !line.is_empty() {
            self.lines.push(line);
        }
        self.line.clear();
    }

    fn blank(&mut self) {
        self.flush();
        self.lines.push(String::new());
    }

    fn push(&mut self, piece: &str) {
        if piece.is_empty() {
            return;
        }
        if !self.line.is_empty() && !self.line.ends_with(' ') {
            self.line.push(' ');
        }
        self.line.push_str(piece);
    }

    fn element<A>(&mut self, el: &Element<A>, path: &mut NodePath) {
        let block = BLOCK_TAGS.contains(&el.tag());
        if block {
            self.flush();
        }
        if matches!(el.tag(), "header" | "main" | "article" | "form") {
            self.blank();
        }
        if el.tag() == "li" {
            self.push("-");
        }
        if !el.listeners().is_empty() {
            self.targets.push(path.clone());
            let marker = format!("[{}]", self.targets.len());
            self.push(&marker);
        }

        match el.tag() {
            "input" => {
                let name = el.attribute("name").unwrap_or("input");
                let value = el.attribute("value").unwrap_or_default();
                self.flush();
                self.line = format!("  {}: {}", name, value);
                self.flush();
            }
            "textarea" => {
                let name = el.attribute("name").unwrap_or("textarea");
                self.flush();
                self.lines.push(format!("  {}:", name));
                for line in el.text_content().lines() {
                    self.lines.push(format!("    {}", line));
                }
            }
            "button" => {
                let label = format!("<{}>", el.text_content().trim());
                self.push(&label);
            }
            _ => {
                for (index, child) in el.children().iter().enumerate() {
                    match child {
                        Node::Text(text) => self.text(text),
                        Node::Element(child) => {
                            path.push(index);
                            self.element(child, path);
                            path.pop();
                        }
                    }
                }
            }
        }

        if block {
            self.flush();
        }
    }

    fn text(&mut self, text: &str) {
        let mut parts = text.split('\n');
        if let Some(first) = parts.next() {
            self.push(first.trim());
        }
        for part in parts {
            self.flush();
            self.push(part.trim());
        }
    }
}
