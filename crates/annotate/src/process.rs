//! Per-unit processing: decide, splice, remember.

use crate::classify::count_target_chars;
use crate::exclude::is_excluded;
use crate::render::{Rendered, Segment, render};
use crate::scan::Annotator;
use dom::{Document, DomError, Id};
use pinyin::ScriptProvider;
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to do: already processed, parent excluded, or no target text.
    Skipped,
    /// Rendered, but no gloss differed from its source character.
    Unchanged,
    /// The unit was replaced by an annotated fragment.
    Annotated,
    /// The splice failed; the unit is retired so it is never retried forever.
    Failed,
}

/// Identities that have completed processing, whatever the outcome.
///
/// Keyed by node identity, never by content, and append-only for the
/// lifetime of the engine that owns it. Checked before any expensive work;
/// extended unconditionally after an attempt, failures included.
#[derive(Debug, Default)]
pub struct ProcessedSet {
    ids: HashSet<Id>,
}

impl ProcessedSet {
    pub fn contains(&self, id: Id) -> bool {
        self.ids.contains(&id)
    }

    pub fn insert(&mut self, id: Id) {
        self.ids.insert(id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<P: ScriptProvider> Annotator<P> {
    /// Process one text unit. Preconditions short-circuit in order:
    /// processed identity, excluded live parent, blank text, not enough
    /// target-script characters. Everything past the first check retires the
    /// unit whatever happens, so re-discovery is always a no-op.
    pub(crate) fn process_unit(&mut self, doc: &mut Document, id: Id) -> Outcome {
        if self.processed.contains(id) {
            return Outcome::Skipped;
        }

        // The tree may have changed since discovery; re-check the parent.
        let parent_excluded = match doc.parent(id) {
            Some(parent) => is_excluded(doc, parent, &self.config),
            None => true,
        };
        if parent_excluded {
            self.processed.insert(id);
            return Outcome::Skipped;
        }

        let text = match doc.text(id) {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ => {
                self.processed.insert(id);
                return Outcome::Skipped;
            }
        };

        let needed = self.config.min_target_chars.max(1);
        if count_target_chars(&text, &self.provider, needed) < needed {
            self.processed.insert(id);
            return Outcome::Skipped;
        }

        match render(&text, &self.provider) {
            Rendered::Unchanged => {
                self.processed.insert(id);
                Outcome::Unchanged
            }
            Rendered::Fragment(segments) => match self.splice(doc, id, segments) {
                Ok(()) => {
                    self.processed.insert(id);
                    Outcome::Annotated
                }
                Err(err) => {
                    log::warn!(
                        target: "annotate.process",
                        "splice failed for unit {id:?}: {err:?}"
                    );
                    self.processed.insert(id);
                    Outcome::Failed
                }
            },
        }
    }

    /// Materialize the rendered segments as detached nodes, then swap them in
    /// with one structural replacement. The replacement text nodes are
    /// retired immediately: they carry the same logical content the unit was
    /// already glossed for, and must never be annotated again.
    fn splice(
        &mut self,
        doc: &mut Document,
        id: Id,
        segments: Vec<Segment>,
    ) -> Result<(), DomError> {
        let mut fragment = Vec::with_capacity(segments.len());
        let mut replacement_texts = Vec::new();

        for segment in segments {
            match segment {
                Segment::Run(text) => {
                    let run = doc.create_text(text);
                    replacement_texts.push(run);
                    fragment.push(run);
                }
                Segment::Gloss(gloss) => {
                    let wrapper = doc.create_element(
                        "span",
                        vec![(
                            "class".to_string(),
                            Some(self.config.annotation_class.clone()),
                        )],
                    );
                    let content = doc.create_text(gloss);
                    doc.append_child(wrapper, content)?;
                    fragment.push(wrapper);
                }
            }
        }

        doc.replace_with_fragment(id, fragment)?;
        for text in replacement_texts {
            self.processed.insert(text);
        }
        Ok(())
    }
}
