//! Serialize an element tree to HTML markup.
//!
//! Listeners are not part of the markup; properties are written under their
//! reflected attribute names (`class`, `for`).

use super::{Element, Node};

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

pub fn to_html<A>(root: &Element<A>) -> String {
    let mut out = String::new();
    write_element(root, &mut out);
    out
}

fn write_element<A>(el: &Element<A>, out: &mut String) {
    out.push('<');
    out.push_str(el.tag());

    for (property, value) in el.properties() {
        write_attr(property.html_name(), value, out);
    }
    for (name, value) in el.attributes() {
        write_attr(name, value, out);
    }
    out.push('>');

    if VOID_TAGS.contains(&el.tag()) {
        return;
    }

    for child in el.children() {
        match child {
            Node::Text(text) => out.push_str(&escape(text)),
            Node::Element(child) => write_element(child, out),
        }
    }

    out.push_str("</");
    out.push_str(el.tag());
    out.push('>');
}

fn write_attr(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape(value));
    out.push('"');
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{build, handler};

    #[test]
    fn test_serializes_properties_attributes_and_children() {
        let el = build(
            "label",
            [("htmlFor", "title".into()), ("className", "field".into()), ("onclick", handler(()))],
            ["Title".into()],
        );
        assert_eq!(to_html(&el), r#"<label for="title" class="field">Title</label>"#);
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let el: Element<()> = build("input", [("name", "title".into()), ("value", "x".into())], []);
        assert_eq!(to_html(&el), r#"<input name="title" value="x">"#);
    }

    #[test]
    fn test_escapes_text_and_attribute_values() {
        let el: Element<()> = build("p", [("title", "a\"b".into())], ["<b> & 'c'".into()]);
        assert_eq!(
            to_html(&el),
            r#"<p title="a&quot;b">&lt;b&gt; &amp; &#39;c&#39;</p>"#
        );
    }
}
