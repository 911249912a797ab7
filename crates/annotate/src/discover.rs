//! Budgeted discovery of text units.

use crate::config::AnnotateConfig;
use crate::exclude::is_excluded;
use dom::{Document, Id, NodeData};

/// Finite, non-restartable depth-first walk over leaf text nodes.
///
/// The exclusion policy runs once per element visited; an excluded element
/// prunes its entire subtree, so descendants are never re-checked against
/// it. Emission stops after the budget is spent even if eligible text
/// remains: a later pass picks up the rest instead of letting one pass run
/// unbounded on a huge tree.
pub struct TextUnits<'a> {
    doc: &'a Document,
    config: &'a AnnotateConfig,
    stack: Vec<Id>,
    remaining: usize,
}

impl<'a> TextUnits<'a> {
    pub fn new(doc: &'a Document, root: Id, config: &'a AnnotateConfig) -> Self {
        Self {
            doc,
            config,
            stack: vec![root],
            remaining: config.max_nodes_per_scan,
        }
    }
}

impl Iterator for TextUnits<'_> {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        if self.remaining == 0 {
            return None;
        }
        while let Some(id) = self.stack.pop() {
            match self.doc.get(id) {
                Some(NodeData::Text { .. }) => {
                    self.remaining -= 1;
                    return Some(id);
                }
                Some(NodeData::Element { .. }) => {
                    if is_excluded(self.doc, id, self.config) {
                        continue;
                    }
                    for &child in self.doc.children(id).iter().rev() {
                        self.stack.push(child);
                    }
                }
                Some(NodeData::Document { .. }) => {
                    // The document node itself carries no tag to judge;
                    // policy applies from its element children down.
                    for &child in self.doc.children(id).iter().rev() {
                        self.stack.push(child);
                    }
                }
                Some(NodeData::Comment { .. }) | None => {}
            }
        }
        None
    }
}

/// Collect one pass worth of text units in document order.
pub fn discover(doc: &Document, root: Id, config: &AnnotateConfig) -> Vec<Id> {
    TextUnits::new(doc, root, config).collect()
}
