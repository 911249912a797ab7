//! Idempotent stylesheet injection for annotation wrappers.

use crate::config::AnnotateConfig;
use dom::{Document, query};

/// CSS presentation for the wrappers: reduced size, muted color, parenthesis
/// brackets from generated content, hairline margins so inline flow is not
/// disturbed.
pub fn stylesheet(class: &str) -> String {
    format!(
        "\
.{class} {{
    font-size: 0.8em;
    color: #666;
    font-weight: normal;
    margin-left: 1px;
    margin-right: 1px;
}}

.{class}::before {{
    content: \"(\";
}}

.{class}::after {{
    content: \")\";
}}
"
    )
}

/// Insert the annotation stylesheet into `<head>`, at most once per document
/// (guarded by the style element id). Returns whether anything was inserted.
pub fn inject(doc: &mut Document, config: &AnnotateConfig) -> bool {
    if query::find_by_attr(doc, "id", &config.style_element_id).is_some() {
        return false;
    }

    let head = match query::find_element(doc, "head") {
        Some(head) => head,
        None => {
            let parent = doc.root_element().unwrap_or_else(|| doc.root());
            let head = doc.create_element("head", Vec::new());
            if doc.append_child(parent, head).is_err() {
                return false;
            }
            head
        }
    };

    let style = doc.create_element(
        "style",
        vec![(
            "id".to_string(),
            Some(config.style_element_id.clone()),
        )],
    );
    let css = doc.create_text(stylesheet(&config.annotation_class));
    if doc.append_child(style, css).is_err() || doc.append_child(head, style).is_err() {
        return false;
    }
    true
}
