//! Subtree exclusion policy.
//!
//! Fail-safe: anything that is not a live element with a usable tag name is
//! excluded. Visibility is judged from the inline `style` attribute; an
//! engine without a style cascade has nothing else to consult.

use crate::config::AnnotateConfig;
use dom::{Document, Id};

/// Whether the subtree rooted at `id` is off-limits for annotation.
/// Called once per candidate element during discovery; keep it cheap.
pub fn is_excluded(doc: &Document, id: Id, config: &AnnotateConfig) -> bool {
    let Some(node) = doc.get(id) else {
        return true;
    };
    let Some(tag) = node.tag_name() else {
        return true;
    };

    if config
        .excluded_tags
        .iter()
        .any(|t| t.eq_ignore_ascii_case(tag))
    {
        return true;
    }

    // A bare contenteditable attribute and contenteditable="" both enable
    // editing, same as "true".
    if node.has_attr("contenteditable") {
        match node.attr("contenteditable") {
            None => return true,
            Some(value) if value.is_empty() || value.eq_ignore_ascii_case("true") => {
                return true;
            }
            Some(_) => {}
        }
    }

    // Never descend into our own annotation wrappers.
    if node.attr("class").is_some_and(|classes| {
        classes
            .split_ascii_whitespace()
            .any(|c| c == config.annotation_class)
    }) {
        return true;
    }

    if let Some(style) = node.attr("style")
        && style_hides(style)
    {
        return true;
    }

    false
}

fn style_hides(style: &str) -> bool {
    for declaration in style.split(';') {
        let mut parts = declaration.splitn(2, ':');
        let (Some(property), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let property = property.trim();
        let value = value.trim();
        if property.eq_ignore_ascii_case("display") && value.eq_ignore_ascii_case("none") {
            return true;
        }
        if property.eq_ignore_ascii_case("visibility") && value.eq_ignore_ascii_case("hidden") {
            return true;
        }
    }
    false
}
