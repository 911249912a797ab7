//! Document serialization back to HTML text.
//!
//! Deterministic output for demos and test comparisons, not a spec-complete
//! serializer: attribute order is preserved as parsed, void elements emit no
//! end tag, and rawtext element content is written verbatim.

use crate::document::Document;
use crate::tokenizer::{is_rawtext_element, is_void_element};
use crate::types::{Id, NodeData};

pub fn to_html(doc: &Document) -> String {
    let mut out = String::new();
    if let Some(NodeData::Document {
        doctype: Some(dt), ..
    }) = doc.get(doc.root())
    {
        out.push_str("<!");
        out.push_str(dt);
        out.push('>');
    }
    for &child in doc.children(doc.root()) {
        serialize_node(doc, child, &mut out);
    }
    out
}

fn serialize_node(doc: &Document, id: Id, out: &mut String) {
    let Some(node) = doc.get(id) else {
        return;
    };
    match node {
        NodeData::Element { name, attributes } => {
            out.push('<');
            out.push_str(name);
            for (key, value) in attributes {
                out.push(' ');
                out.push_str(key);
                if let Some(value) = value {
                    out.push_str("=\"");
                    escape_attr(value, out);
                    out.push('"');
                }
            }
            out.push('>');
            if is_void_element(name) && doc.children(id).is_empty() {
                return;
            }
            if is_rawtext_element(name) {
                for &child in doc.children(id) {
                    if let Some(text) = doc.text(child) {
                        out.push_str(text);
                    }
                }
            } else {
                for &child in doc.children(id) {
                    serialize_node(doc, child, out);
                }
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        NodeData::Text { text } => escape_text(text, out),
        NodeData::Comment { text } => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::Document { .. } => {
            for &child in doc.children(id) {
                serialize_node(doc, child, out);
            }
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_structure_and_escapes_text() {
        let doc = Document::from_html(r#"<div class="a">x &amp; y</div>"#);
        assert_eq!(to_html(&doc), r#"<div class="a">x &amp; y</div>"#);
    }

    #[test]
    fn serializes_doctype_and_void_elements() {
        let doc = Document::from_html("<!DOCTYPE html><p>a<br>b</p>");
        assert_eq!(to_html(&doc), "<!DOCTYPE html><p>a<br>b</p>");
    }

    #[test]
    fn rawtext_content_is_not_escaped() {
        let doc = Document::from_html("<style>p::before { content: \"(\"; }</style>");
        assert_eq!(to_html(&doc), "<style>p::before { content: \"(\"; }</style>");
    }

    #[test]
    fn utf8_text_survives_round_trip() {
        let doc = Document::from_html("<p>我爱中国</p>");
        assert_eq!(to_html(&doc), "<p>我爱中国</p>");
    }
}
