//! Scan orchestration: one bounded pass of discovery plus processing.

use crate::config::AnnotateConfig;
use crate::discover::discover;
use crate::process::{Outcome, ProcessedSet};
use dom::{Document, Id};
use pinyin::ScriptProvider;

/// Outcome counts for one pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub visited: usize,
    pub annotated: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// The annotation engine for one document.
///
/// Owns the provider, the tunables, and the processed-identity set, so two
/// engines (say, one per frame) share nothing.
pub struct Annotator<P: ScriptProvider> {
    pub(crate) provider: P,
    pub(crate) config: AnnotateConfig,
    pub(crate) processed: ProcessedSet,
}

impl<P: ScriptProvider> Annotator<P> {
    pub fn new(provider: P, config: AnnotateConfig) -> Self {
        Self {
            provider,
            config,
            processed: ProcessedSet::default(),
        }
    }

    pub fn config(&self) -> &AnnotateConfig {
        &self.config
    }

    /// Number of text unit identities retired so far.
    pub fn processed_len(&self) -> usize {
        self.processed.len()
    }

    /// One pass over the document, rooted at `<body>` when present.
    pub fn scan(&mut self, doc: &mut Document) -> ScanSummary {
        let root = doc.body().unwrap_or_else(|| doc.root());
        self.scan_subtree(doc, root)
    }

    /// One pass over the subtree under `root`: discover up to the budget,
    /// then process in discovery order. Discovery completes before the first
    /// splice, so processing can never invalidate the walk.
    pub fn scan_subtree(&mut self, doc: &mut Document, root: Id) -> ScanSummary {
        let units = discover(doc, root, &self.config);
        let mut summary = ScanSummary {
            visited: units.len(),
            ..ScanSummary::default()
        };

        for unit in units {
            match self.process_unit(doc, unit) {
                Outcome::Annotated => summary.annotated += 1,
                Outcome::Unchanged => summary.unchanged += 1,
                Outcome::Skipped => summary.skipped += 1,
                Outcome::Failed => summary.failed += 1,
            }
        }

        log::debug!(
            target: "annotate.scan",
            "pass under {root:?}: visited={} annotated={} unchanged={} skipped={} failed={}",
            summary.visited,
            summary.annotated,
            summary.unchanged,
            summary.skipped,
            summary.failed
        );
        summary
    }
}
