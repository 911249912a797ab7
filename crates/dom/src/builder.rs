use crate::document::Document;
use crate::tokenizer::tokenize;
use crate::types::{Id, Token};

fn element_named(doc: &Document, id: Id, name: &str) -> bool {
    doc.get(id).and_then(|n| n.tag_name()) == Some(name)
}

/// Parse `input` and attach the resulting nodes under `parent`.
///
/// Returns the ids attached directly to `parent` (the subtree roots).
/// Attachment happens through the record-free internal path; callers decide
/// how the insertion is reported.
pub(crate) fn build_into(doc: &mut Document, parent: Id, input: &str) -> Vec<Id> {
    let mut roots = Vec::new();
    let mut open: Vec<Id> = Vec::new();

    for token in tokenize(input) {
        let attach_to = open.last().copied().unwrap_or(parent);
        match token {
            Token::Doctype(s) => {
                if attach_to == doc.root() {
                    doc.set_doctype(s);
                }
            }
            Token::Text(text) => {
                if !text.is_empty() {
                    let id = doc.create_text(text);
                    let _ = doc.attach(attach_to, id);
                    if attach_to == parent {
                        roots.push(id);
                    }
                }
            }
            Token::Comment(text) => {
                let id = doc.create_comment(text);
                let _ = doc.attach(attach_to, id);
                if attach_to == parent {
                    roots.push(id);
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let id = doc.create_element(&name, attributes);
                let _ = doc.attach(attach_to, id);
                if attach_to == parent {
                    roots.push(id);
                }
                if !self_closing {
                    open.push(id);
                }
            }
            Token::EndTag(name) => {
                // Pop to the matching open element; a stray end tag with no
                // matching open element is dropped instead of draining the
                // stack.
                if open.iter().any(|&id| element_named(doc, id, &name)) {
                    while let Some(id) = open.pop() {
                        if element_named(doc, id, &name) {
                            break;
                        }
                    }
                }
            }
        }
    }

    log::trace!(
        target: "dom.builder",
        "built {} subtree roots under {:?}",
        roots.len(),
        parent
    );
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeData;

    fn tags(doc: &Document, ids: &[Id]) -> Vec<String> {
        ids.iter()
            .filter_map(|&id| doc.get(id).and_then(|n| n.tag_name()).map(str::to_string))
            .collect()
    }

    #[test]
    fn builds_nested_structure() {
        let doc = Document::from_html("<div><p>one</p><p>two</p></div>");
        let root = doc.root();
        let div = doc.children(root)[0];
        assert_eq!(doc.get(div).unwrap().tag_name(), Some("div"));
        assert_eq!(tags(&doc, doc.children(div)), vec!["p", "p"]);
        let p1 = doc.children(div)[0];
        assert_eq!(doc.text(doc.children(p1)[0]), Some("one"));
    }

    #[test]
    fn stray_end_tag_does_not_drain_open_elements() {
        let doc = Document::from_html("<div><p>a</span>b</p></div>");
        let div = doc.children(doc.root())[0];
        let p = doc.children(div)[0];
        // Both text nodes stay inside <p>.
        assert_eq!(
            doc.children(p)
                .iter()
                .filter_map(|&id| doc.text(id))
                .collect::<Vec<_>>(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn doctype_lands_on_the_document_node() {
        let doc = Document::from_html("<!DOCTYPE html><html></html>");
        assert_eq!(
            doc.get(doc.root()),
            Some(&NodeData::Document {
                doctype: Some("DOCTYPE html".to_string())
            })
        );
    }

    #[test]
    fn script_content_stays_one_text_node() {
        let doc = Document::from_html("<script>if (a < b) { go(); }</script>");
        let script = doc.children(doc.root())[0];
        let kids = doc.children(script);
        assert_eq!(kids.len(), 1);
        assert_eq!(doc.text(kids[0]), Some("if (a < b) { go(); }"));
    }

    #[test]
    fn void_elements_do_not_nest_following_content() {
        let doc = Document::from_html("<br>after");
        let root = doc.root();
        assert_eq!(doc.children(root).len(), 2);
        assert_eq!(doc.text(doc.children(root)[1]), Some("after"));
    }
}
