//! Debounced mutation watching.
//!
//! Two states only: `Idle` and `Pending` with one owned deadline. A relevant
//! batch arms the deadline; further relevant batches replace it, so a burst
//! of mutations collapses into a single trailing re-scan trigger. Time is
//! passed in by the caller, which makes the machine testable with plain
//! `Instant` arithmetic and lets an event loop sleep exactly until the
//! deadline.

use crate::config::AnnotateConfig;
use crate::exclude::is_excluded;
use dom::{Document, Id, MutationRecord, NodeData};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Idle,
    Pending { deadline: Instant },
}

#[derive(Debug)]
pub struct MutationWatcher {
    state: State,
    window: Duration,
}

impl MutationWatcher {
    pub fn new(window: Duration) -> Self {
        Self {
            state: State::Idle,
            window,
        }
    }

    /// Feed a batch of structural change records observed at `now`.
    ///
    /// A batch matters only if it added at least one text node or one
    /// non-excluded element; anything else (removals, excluded additions)
    /// causes no state transition at all.
    pub fn note(
        &mut self,
        doc: &Document,
        records: &[MutationRecord],
        config: &AnnotateConfig,
        now: Instant,
    ) {
        let relevant = records
            .iter()
            .flat_map(|record| record.added.iter())
            .any(|&id| added_node_matters(doc, id, config));
        if !relevant {
            return;
        }

        let deadline = now + self.window;
        log::trace!(target: "annotate.watch", "debounce armed until {deadline:?}");
        self.state = State::Pending { deadline };
    }

    /// True exactly once per armed deadline, once `now` reaches it; the
    /// machine returns to `Idle` on firing.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            State::Pending { deadline } if now >= deadline => {
                self.state = State::Idle;
                true
            }
            _ => false,
        }
    }

    /// The pending deadline, if one is armed.
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            State::Pending { deadline } => Some(deadline),
            State::Idle => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == State::Idle
    }
}

fn added_node_matters(doc: &Document, id: Id, config: &AnnotateConfig) -> bool {
    match doc.get(id) {
        Some(NodeData::Text { .. }) => true,
        Some(NodeData::Element { .. }) => !is_excluded(doc, id, config),
        _ => false,
    }
}
