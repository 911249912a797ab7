use crate::document::Document;
use crate::types::Id;

/// First element named `name` in document order, depth-first.
pub fn find_element(doc: &Document, name: &str) -> Option<Id> {
    walk(doc, |doc, id| {
        doc.get(id)
            .and_then(|n| n.tag_name())
            .is_some_and(|t| t.eq_ignore_ascii_case(name))
    })
}

/// First element whose attribute `key` equals `value`, depth-first.
pub fn find_by_attr(doc: &Document, key: &str, value: &str) -> Option<Id> {
    walk(doc, |doc, id| {
        doc.get(id).and_then(|n| n.attr(key)) == Some(value)
    })
}

fn walk(doc: &Document, pred: impl Fn(&Document, Id) -> bool) -> Option<Id> {
    let mut stack = vec![doc.root()];
    while let Some(id) = stack.pop() {
        if pred(doc, id) {
            return Some(id);
        }
        for &child in doc.children(id).iter().rev() {
            stack.push(child);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_element_returns_first_in_document_order() {
        let doc = Document::from_html("<div><span id=a></span></div><span id=b></span>");
        let id = find_element(&doc, "span").expect("span");
        assert_eq!(doc.get(id).unwrap().attr("id"), Some("a"));
    }

    #[test]
    fn find_by_attr_matches_exact_value() {
        let doc = Document::from_html(r#"<style id="x"></style><div id="y"></div>"#);
        let id = find_by_attr(&doc, "id", "y").expect("div#y");
        assert_eq!(doc.get(id).unwrap().tag_name(), Some("div"));
        assert!(find_by_attr(&doc, "id", "z").is_none());
    }
}
