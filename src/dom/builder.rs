use tracing::debug;

use super::{DomProperty, Element, EventKind, Node};

/// Reserved attribute names that map onto native properties.
const PROPERTY_ALIASES: &[(&str, DomProperty)] = &[
    ("className", DomProperty::ClassName),
    ("htmlFor", DomProperty::HtmlFor),
];

const EVENT_PREFIX: &str = "on";

/// How an attribute name is applied to an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrKind {
    /// `on<event>`: binds a listener.
    Event(EventKind),
    /// A reserved alias for a native property.
    Property(DomProperty),
    /// Anything else: a generic attribute.
    Plain,
}

impl AttrKind {
    pub fn classify(name: &str) -> Self {
        if let Some(event) = name.strip_prefix(EVENT_PREFIX) {
            if !event.is_empty() {
                return Self::Event(EventKind::from_name(&event.to_lowercase()));
            }
        }

        PROPERTY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, property)| Self::Property(*property))
            .unwrap_or(Self::Plain)
    }
}

/// Value passed for an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue<A> {
    Text(String),
    Handler(A),
    Absent,
}

impl<A> From<&str> for AttrValue<A> {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl<A> From<String> for AttrValue<A> {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<A> From<Option<String>> for AttrValue<A> {
    fn from(value: Option<String>) -> Self {
        value.map(Self::Text).unwrap_or(Self::Absent)
    }
}

impl<A> From<Option<&str>> for AttrValue<A> {
    fn from(value: Option<&str>) -> Self {
        value.map(Self::from).unwrap_or(Self::Absent)
    }
}

/// Wrap an action so it binds as an event listener.
pub fn handler<A>(action: A) -> AttrValue<A> {
    AttrValue::Handler(action)
}

/// A child passed to [`build`]. Absent and empty-text children are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child<A> {
    Text(String),
    Element(Element<A>),
    Absent,
}

impl<A> From<&str> for Child<A> {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl<A> From<String> for Child<A> {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<A> From<Element<A>> for Child<A> {
    fn from(value: Element<A>) -> Self {
        Self::Element(value)
    }
}

impl<A> From<Option<Element<A>>> for Child<A> {
    fn from(value: Option<Element<A>>) -> Self {
        value.map(Self::Element).unwrap_or(Self::Absent)
    }
}

/// Construct an element with its attributes, listeners and children in one call.
pub fn build<'a, A, I, C>(tag: &str, attributes: I, children: C) -> Element<A>
where
    I: IntoIterator<Item = (&'a str, AttrValue<A>)>,
    C: IntoIterator<Item = Child<A>>,
{
    let mut element = Element::new(tag);

    for (name, value) in attributes {
        match (AttrKind::classify(name), value) {
            (_, AttrValue::Absent) => {}
            (AttrKind::Event(event), AttrValue::Handler(action)) => {
                element.add_listener(event, action);
            }
            (AttrKind::Property(property), AttrValue::Text(text)) => {
                element.set_property(property, text);
            }
            (AttrKind::Event(_) | AttrKind::Plain, AttrValue::Text(text)) => {
                element.set_attribute(name, text);
            }
            (AttrKind::Property(_) | AttrKind::Plain, AttrValue::Handler(_)) => {
                debug!(tag, attribute = name, "dropping handler bound to a non-event attribute");
            }
        }
    }

    for child in children {
        match child {
            Child::Text(text) if !text.is_empty() => element.append(Node::Text(text)),
            Child::Element(el) => element.append(Node::Element(el)),
            Child::Text(_) | Child::Absent => {}
        }
    }

    element
}
