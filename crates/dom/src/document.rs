//! Arena-backed live document tree.
//!
//! Invariants:
//! - `Id`s are allocated monotonically and never reused; a freed slot stays
//!   empty for the lifetime of the document.
//! - Every attached node has exactly one parent; detached nodes (freshly
//!   created or never attached) have none.
//! - Structural mutations through the public methods append one
//!   `MutationRecord` each, and only when the mutated position is connected
//!   to the document node; builder-internal attachment of a parsed subtree
//!   records only the subtree roots, matching how a host tree reports one
//!   added node per inserted subtree.
//! - Records are queued until drained with `take_records`.

use crate::builder::build_into;
use crate::types::{Id, NodeData};

/// One structural change notification: children of `target` changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationRecord {
    pub target: Id,
    pub added: Vec<Id>,
    pub removed: Vec<Id>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum DomError {
    MissingNode(Id),
    NotAContainer(Id),
    AlreadyAttached(Id),
    Detached(Id),
}

#[derive(Debug)]
struct Slot {
    data: NodeData,
    parent: Option<Id>,
    children: Vec<Id>,
}

#[derive(Debug)]
pub struct Document {
    slots: Vec<Option<Slot>>,
    records: Vec<MutationRecord>,
}

impl Document {
    pub fn new() -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            records: Vec::new(),
        };
        doc.alloc(NodeData::Document { doctype: None });
        doc
    }

    /// Parse `html` into a fresh document. Loading emits no mutation records;
    /// observers care about changes after the initial tree exists.
    pub fn from_html(html: &str) -> Self {
        let mut doc = Self::new();
        let root = doc.root();
        build_into(&mut doc, root, html);
        doc.records.clear();
        doc
    }

    pub fn root(&self) -> Id {
        Id(0)
    }

    /// First element child of the document node, usually `<html>`.
    pub fn root_element(&self) -> Option<Id> {
        self.children(self.root())
            .iter()
            .copied()
            .find(|&id| self.get(id).is_some_and(NodeData::is_element))
    }

    pub fn body(&self) -> Option<Id> {
        crate::query::find_element(self, "body")
    }

    pub fn get(&self, id: Id) -> Option<&NodeData> {
        self.slot(id).map(|s| &s.data)
    }

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.slot(id).and_then(|s| s.parent)
    }

    pub fn children(&self, id: Id) -> &[Id] {
        self.slot(id).map(|s| s.children.as_slice()).unwrap_or(&[])
    }

    /// Text content of a text node; `None` for anything else.
    pub fn text(&self, id: Id) -> Option<&str> {
        match self.get(id)? {
            NodeData::Text { text } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Number of live nodes, the document node included.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ---- construction ----

    pub fn create_element(
        &mut self,
        name: &str,
        attributes: Vec<(String, Option<String>)>,
    ) -> Id {
        self.alloc(NodeData::Element {
            name: name.to_ascii_lowercase(),
            attributes,
        })
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> Id {
        self.alloc(NodeData::Text { text: text.into() })
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> Id {
        self.alloc(NodeData::Comment { text: text.into() })
    }

    // ---- mutation ----

    /// Whether `id` is reachable from the document node. Mutations inside
    /// detached subtrees are invisible to observers, exactly like a host
    /// tree that only reports changes under the observed document.
    pub fn is_connected(&self, id: Id) -> bool {
        let mut cursor = id;
        loop {
            if cursor == self.root() {
                return true;
            }
            match self.parent(cursor) {
                Some(parent) => cursor = parent,
                None => return false,
            }
        }
    }

    /// Attach a detached node as the last child of `parent`. Observers are
    /// notified only when `parent` is connected; assembling a detached
    /// fragment stays silent.
    pub fn append_child(&mut self, parent: Id, child: Id) -> Result<(), DomError> {
        self.attach(parent, child)?;
        if self.is_connected(parent) {
            self.records.push(MutationRecord {
                target: parent,
                added: vec![child],
                removed: Vec::new(),
            });
        }
        Ok(())
    }

    /// Parse `html` and attach its top-level nodes under `parent`, reporting
    /// the whole insertion as one record. Returns the attached subtree roots.
    pub fn append_html(&mut self, parent: Id, html: &str) -> Result<Vec<Id>, DomError> {
        if !self.is_container(parent) {
            return Err(self.container_error(parent));
        }
        let added = build_into(self, parent, html);
        if !added.is_empty() && self.is_connected(parent) {
            self.records.push(MutationRecord {
                target: parent,
                added: added.clone(),
                removed: Vec::new(),
            });
        }
        Ok(added)
    }

    /// Detach `id` and free its subtree.
    pub fn remove_node(&mut self, id: Id) -> Result<(), DomError> {
        let parent = self.parent(id).ok_or(DomError::Detached(id))?;
        let connected = self.is_connected(parent);
        self.detach(parent, id);
        self.free_subtree(id);
        if connected {
            self.records.push(MutationRecord {
                target: parent,
                added: Vec::new(),
                removed: vec![id],
            });
        }
        Ok(())
    }

    /// Replace `target` with `fragment` in a single structural step: the
    /// fragment nodes take `target`'s position in order, `target`'s subtree
    /// is freed, and exactly one record is emitted. No observer can see the
    /// tree with `target` gone but the fragment not yet in place.
    pub fn replace_with_fragment(
        &mut self,
        target: Id,
        fragment: Vec<Id>,
    ) -> Result<(), DomError> {
        let parent = self.parent(target).ok_or(DomError::Detached(target))?;
        for &id in &fragment {
            let slot = self.slot(id).ok_or(DomError::MissingNode(id))?;
            if slot.parent.is_some() {
                return Err(DomError::AlreadyAttached(id));
            }
        }

        let index = self
            .slot(parent)
            .expect("parent slot exists for attached child")
            .children
            .iter()
            .position(|&c| c == target)
            .expect("attached child is listed under its parent");

        {
            let parent_slot = self.slot_mut(parent).expect("parent slot exists");
            parent_slot.children.remove(index);
            for (offset, &id) in fragment.iter().enumerate() {
                parent_slot.children.insert(index + offset, id);
            }
        }
        for &id in &fragment {
            if let Some(slot) = self.slot_mut(id) {
                slot.parent = Some(parent);
            }
        }
        self.free_subtree(target);

        log::trace!(
            target: "dom.document",
            "replaced {target:?} with a {}-node fragment",
            fragment.len()
        );
        if self.is_connected(parent) {
            self.records.push(MutationRecord {
                target: parent,
                added: fragment,
                removed: vec![target],
            });
        }
        Ok(())
    }

    /// Drain queued structural change notifications.
    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.records)
    }

    // ---- internal ----

    pub(crate) fn alloc(&mut self, data: NodeData) -> Id {
        let id = Id(self.slots.len() as u32);
        self.slots.push(Some(Slot {
            data,
            parent: None,
            children: Vec::new(),
        }));
        id
    }

    /// Attachment without a record; the builder uses this for the interior of
    /// parsed subtrees.
    pub(crate) fn attach(&mut self, parent: Id, child: Id) -> Result<(), DomError> {
        if !self.is_container(parent) {
            return Err(self.container_error(parent));
        }
        let child_slot = self.slot(child).ok_or(DomError::MissingNode(child))?;
        if child_slot.parent.is_some() {
            return Err(DomError::AlreadyAttached(child));
        }
        self.slot_mut(parent)
            .expect("container checked above")
            .children
            .push(child);
        self.slot_mut(child)
            .expect("child checked above")
            .parent = Some(parent);
        Ok(())
    }

    pub(crate) fn set_doctype(&mut self, doctype: String) {
        if let Some(slot) = self.slot_mut(self.root())
            && let NodeData::Document { doctype: dt } = &mut slot.data
            && dt.is_none()
        {
            *dt = Some(doctype);
        }
    }

    fn detach(&mut self, parent: Id, child: Id) {
        if let Some(slot) = self.slot_mut(parent) {
            slot.children.retain(|&c| c != child);
        }
        if let Some(slot) = self.slot_mut(child) {
            slot.parent = None;
        }
    }

    fn free_subtree(&mut self, id: Id) {
        let children = self
            .slot(id)
            .map(|s| s.children.clone())
            .unwrap_or_default();
        for child in children {
            self.free_subtree(child);
        }
        if let Some(slot) = self.slots.get_mut(id.0 as usize) {
            *slot = None;
        }
    }

    fn is_container(&self, id: Id) -> bool {
        matches!(
            self.get(id),
            Some(NodeData::Document { .. }) | Some(NodeData::Element { .. })
        )
    }

    fn container_error(&self, id: Id) -> DomError {
        if self.slot(id).is_none() {
            DomError::MissingNode(id)
        } else {
            DomError::NotAContainer(id)
        }
    }

    fn slot(&self, id: Id) -> Option<&Slot> {
        self.slots.get(id.0 as usize).and_then(|s| s.as_ref())
    }

    fn slot_mut(&mut self, id: Id) -> Option<&mut Slot> {
        self.slots.get_mut(id.0 as usize).and_then(|s| s.as_mut())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_child_emits_one_record() {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc.create_element("div", Vec::new());
        doc.append_child(root, div).unwrap();

        let records = doc.take_records();
        assert_eq!(
            records,
            vec![MutationRecord {
                target: root,
                added: vec![div],
                removed: Vec::new(),
            }]
        );
        assert!(doc.take_records().is_empty(), "records drain once");
    }

    #[test]
    fn append_html_reports_only_subtree_roots() {
        let mut doc = Document::from_html("<body></body>");
        let body = doc.body().expect("body");
        let added = doc
            .append_html(body, "<div><p>one</p></div><p>two</p>")
            .unwrap();

        assert_eq!(added.len(), 2, "two top-level nodes attached");
        let records = doc.take_records();
        assert_eq!(records.len(), 1, "one record per insertion");
        assert_eq!(records[0].added, added);
        assert_eq!(records[0].target, body);
    }

    #[test]
    fn from_html_emits_no_records() {
        let mut doc = Document::from_html("<div>x</div>");
        assert!(doc.take_records().is_empty());
    }

    #[test]
    fn detached_assembly_is_silent() {
        let mut doc = Document::from_html("<body></body>");
        let span = doc.create_element("span", Vec::new());
        let text = doc.create_text("gloss");
        doc.append_child(span, text).unwrap();
        assert!(
            doc.take_records().is_empty(),
            "detached subtree mutations are not observable"
        );

        let body = doc.body().unwrap();
        doc.append_child(body, span).unwrap();
        assert_eq!(doc.take_records().len(), 1, "connection is observable");
        assert!(doc.is_connected(text));
    }

    #[test]
    fn replace_with_fragment_preserves_position_and_order() {
        let mut doc = Document::from_html("<p>a</p><p>b</p><p>c</p>");
        let root = doc.root();
        let middle = doc.children(root)[1];
        let target = doc.children(middle)[0];

        let t1 = doc.create_text("b1");
        let span = doc.create_element("span", Vec::new());
        let t2 = doc.create_text("b2");
        doc.attach(span, t2).unwrap();
        doc.replace_with_fragment(target, vec![t1, span]).unwrap();

        assert_eq!(doc.children(middle), &[t1, span]);
        assert_eq!(doc.get(target), None, "old node is freed");
        let records = doc.take_records();
        assert_eq!(records.len(), 1, "replacement is a single step");
        assert_eq!(records[0].added, vec![t1, span]);
        assert_eq!(records[0].removed, vec![target]);
    }

    #[test]
    fn replace_rejects_attached_fragment_nodes() {
        let mut doc = Document::from_html("<p>a</p><p>b</p>");
        let root = doc.root();
        let first = doc.children(root)[0];
        let target = doc.children(first)[0];
        let second = doc.children(root)[1];

        let err = doc.replace_with_fragment(target, vec![second]).unwrap_err();
        assert_eq!(err, DomError::AlreadyAttached(second));
    }

    #[test]
    fn replace_detached_target_is_an_error() {
        let mut doc = Document::new();
        let loose = doc.create_text("x");
        let err = doc.replace_with_fragment(loose, Vec::new()).unwrap_err();
        assert_eq!(err, DomError::Detached(loose));
    }

    #[test]
    fn remove_node_frees_subtree_and_keeps_ids_unreused() {
        let mut doc = Document::from_html("<div><p>x</p></div>");
        let root = doc.root();
        let div = doc.children(root)[0];
        let p = doc.children(div)[0];
        let before = doc.len();

        doc.remove_node(div).unwrap();
        assert_eq!(doc.get(div), None);
        assert_eq!(doc.get(p), None);
        assert_eq!(doc.len(), before - 3);

        let fresh = doc.create_text("y");
        assert!(fresh > p, "ids are never reused after a free");
    }

    #[test]
    fn body_and_root_element_resolve() {
        let doc = Document::from_html("<html><head></head><body><p>hi</p></body></html>");
        let html = doc.root_element().expect("root element");
        assert_eq!(doc.get(html).unwrap().tag_name(), Some("html"));
        let body = doc.body().expect("body");
        assert_eq!(doc.get(body).unwrap().tag_name(), Some("body"));
    }
}
