//! Incremental annotation engine for a live document tree.
//!
//! One initial pass glosses every eligible text node; after that, structural
//! mutations feed a debounced watcher that re-enters the scan. The engine
//! never revisits a text node it has already decided about, so overlapping
//! passes are no-ops, and every pass is bounded by the configured node
//! budget.

pub mod classify;
pub mod config;
pub mod discover;
pub mod exclude;
pub mod frame;
pub mod process;
pub mod render;
pub mod scan;
pub mod styles;
pub mod watch;

pub use crate::config::AnnotateConfig;
pub use crate::frame::{FrameInfo, should_run_in_frame};
pub use crate::process::{Outcome, ProcessedSet};
pub use crate::render::{Rendered, Segment, render};
pub use crate::scan::{Annotator, ScanSummary};
pub use crate::watch::MutationWatcher;
