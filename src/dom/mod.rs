//! A minimal retained element tree.
//!
//! Elements carry attributes, native properties, event listeners and
//! children. Listeners hold a value of type `A` (the action to run) instead of
//! a closure, so a tree can be inspected and dispatched against in tests.

mod builder;
pub mod html;
pub mod text;

pub use builder::{build, handler, AttrKind, AttrValue, Child};

use std::fmt;

/// Child indices from a root element down to a node.
pub type NodePath = Vec<usize>;

/// Event names the builder recognises; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    Submit,
    Input,
    Change,
    Other(String),
}

impl EventKind {
    /// Map a lower-cased event name (`"click"`, `"keydown"`) to its kind.
    pub fn from_name(name: &str) -> Self {
        match name {
            "click" => Self::Click,
            "keydown" => Self::KeyDown,
            "submit" => Self::Submit,
            "input" => Self::Input,
            "change" => Self::Change,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::Submit => "submit",
            Self::Input => "input",
            Self::Change => "change",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Native properties reachable through a reserved attribute alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomProperty {
    /// `className`
    ClassName,
    /// `htmlFor`, the id of the control a label targets.
    HtmlFor,
}

impl DomProperty {
    /// Attribute name the property reflects to in markup.
    pub fn html_name(self) -> &'static str {
        match self {
            Self::ClassName => "class",
            Self::HtmlFor => "for",
        }
    }
}

/// An event delivered by the host to a target node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    Click,
    KeyDown { key: String },
    Submit,
}

impl DomEvent {
    pub fn key_down(key: impl Into<String>) -> Self {
        Self::KeyDown { key: key.into() }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click => EventKind::Click,
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::Submit => EventKind::Submit,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Self::KeyDown { key } => Some(key),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listener<A> {
    pub event: EventKind,
    pub action: A,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<A> {
    Element(Element<A>),
    Text(String),
}

impl<A> Node<A> {
    pub fn as_element(&self) -> Option<&Element<A>> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<A> {
    tag: String,
    attributes: Vec<(String, String)>,
    properties: Vec<(DomProperty, String)>,
    listeners: Vec<Listener<A>>,
    children: Vec<Node<A>>,
}

impl<A> Element<A> {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            properties: Vec::new(),
            listeners: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn property(&self, property: DomProperty) -> Option<&str> {
        self.properties
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn properties(&self) -> &[(DomProperty, String)] {
        &self.properties
    }

    pub fn set_property(&mut self, property: DomProperty, value: impl Into<String>) {
        let value = value.into();
        match self.properties.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = value,
            None => self.properties.push((property, value)),
        }
    }

    /// True when the `className` property contains `class` as a whole word.
    pub fn has_class(&self, class: &str) -> bool {
        self.property(DomProperty::ClassName)
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn listeners(&self) -> &[Listener<A>] {
        &self.listeners
    }

    pub fn add_listener(&mut self, event: EventKind, action: A) {
        self.listeners.push(Listener { event, action });
    }

    pub fn listener(&self, event: &EventKind) -> Option<&A> {
        self.listeners
            .iter()
            .find(|l| &l.event == event)
            .map(|l| &l.action)
    }

    pub fn children(&self) -> &[Node<A>] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element<A>> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn append(&mut self, child: Node<A>) {
        self.children.push(child);
    }

    pub fn append_element(&mut self, child: Element<A>) {
        self.children.push(Node::Element(child));
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => el.collect_text(out),
            }
        }
    }

    /// The element at `path`, or `None` when the path leaves the tree or ends on text.
    pub fn at(&self, path: &[usize]) -> Option<&Element<A>> {
        let mut current = self;
        for &index in path {
            current = current.children.get(index)?.as_element()?;
        }
        Some(current)
    }

    fn at_mut(&mut self, path: &[usize]) -> Option<&mut Element<A>> {
        let mut current = self;
        for &index in path {
            current = match current.children.get_mut(index)? {
                Node::Element(el) => el,
                Node::Text(_) => return None,
            };
        }
        Some(current)
    }

    /// Pre-order walk over this element and its descendants with their paths.
    pub fn walk(&self) -> Vec<(NodePath, &Element<A>)> {
        let mut out = Vec::new();
        self.walk_into(&mut Vec::new(), &mut out);
        out
    }

    fn walk_into<'a>(&'a self, path: &mut NodePath, out: &mut Vec<(NodePath, &'a Element<A>)>) {
        out.push((path.clone(), self));
        for (index, child) in self.children.iter().enumerate() {
            if let Node::Element(el) = child {
                path.push(index);
                el.walk_into(path, out);
                path.pop();
            }
        }
    }

    /// First element, in document order, matching `predicate`.
    pub fn find(&self, predicate: impl Fn(&Element<A>) -> bool) -> Option<(NodePath, &Element<A>)> {
        self.walk().into_iter().find(|(_, el)| predicate(el))
    }

    /// First element whose `id` attribute equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<(NodePath, &Element<A>)> {
        self.find(|el| el.attribute("id") == Some(id))
    }

    /// Find the listener for `event` on the target at `path`, bubbling up to
    /// the root. A path that ends on a text node targets its parent.
    ///
    /// Returns the path of the element that owns the listener with its action.
    pub fn resolve_listener(&self, path: &[usize], event: &EventKind) -> Option<(NodePath, &A)> {
        let mut chain: Vec<(usize, &Element<A>)> = vec![(0, self)];
        let mut current = self;
        for (depth, &index) in path.iter().enumerate() {
            match current.children.get(index) {
                Some(Node::Element(el)) => {
                    current = el;
                    chain.push((depth + 1, el));
                }
                Some(Node::Text(_)) => break,
                None => return None,
            }
        }

        chain
            .into_iter()
            .rev()
            .find_map(|(depth, el)| el.listener(event).map(|a| (path[..depth].to_vec(), a)))
    }

    /// Values of named form controls under this element, in document order.
    /// `input` contributes its `value` attribute, `textarea` its text.
    pub fn form_values(&self) -> Vec<(String, String)> {
        self.walk()
            .into_iter()
            .filter_map(|(_, el)| {
                let name = el.attribute("name")?;
                let value = match el.tag() {
                    "input" => el.attribute("value").unwrap_or_default().to_string(),
                    "textarea" => el.text_content(),
                    _ => return None,
                };
                Some((name.to_string(), value))
            })
            .collect()
    }

    /// Value of the named form control, if present.
    pub fn form_value(&self, name: &str) -> Option<String> {
        self.form_values()
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Set the value of the first form control named `name`. Returns false if none exists.
    pub fn set_field_value(&mut self, name: &str, value: &str) -> bool {
        let path = match self.find(|el| {
            el.attribute("name") == Some(name) && matches!(el.tag(), "input" | "textarea")
        }) {
            Some((path, _)) => path,
            None => return false,
        };

        match self.at_mut(&path) {
            Some(el) if el.tag() == "textarea" => {
                el.children = vec![Node::Text(value.to_string())];
                true
            }
            Some(el) => {
                el.set_attribute("value", value);
                true
            }
            None => false,
        }
    }
}
