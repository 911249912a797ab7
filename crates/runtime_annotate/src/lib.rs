//! Annotation runtime: the lifecycle controller on its own thread.
//!
//! One thread owns every frame's document, engine, and watcher. Commands
//! arrive over the bus; the only suspension points are `recv_timeout` waits
//! bounded by the nearest pending deadline (the delayed first scan or a
//! debounce window), so scans and mutation handling run to completion
//! between waits and never interleave.
//!
//! Per-frame sequence: policy check, provider check, style injection,
//! delayed first scan, then mutation watching. The watcher only sees records
//! produced after the first scan; everything earlier is covered by that scan
//! anyway.

use std::collections::HashMap;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use annotate::{AnnotateConfig, Annotator, MutationWatcher, should_run_in_frame, styles};
use bus::{EngineCommand, EngineEvent};
use core_types::{FrameId, ScanReason};
use dom::Document;
use pinyin::ScriptProvider;

pub fn start_annotate_runtime<P>(
    cmd_rx: Receiver<EngineCommand>,
    evt_tx: Sender<EngineEvent>,
    provider: Option<P>,
    config: AnnotateConfig,
) -> JoinHandle<()>
where
    P: ScriptProvider + Clone + Send + 'static,
{
    thread::spawn(move || {
        let mut runtime = Runtime {
            frames: HashMap::new(),
            evt_tx,
            provider,
            config,
            warned_missing_provider: false,
        };

        loop {
            let command = match runtime.nearest_deadline() {
                Some(deadline) => {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    match cmd_rx.recv_timeout(wait) {
                        Ok(command) => Some(command),
                        Err(RecvTimeoutError::Timeout) => None,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match cmd_rx.recv() {
                    Ok(command) => Some(command),
                    Err(_) => break,
                },
            };

            match command {
                Some(EngineCommand::Shutdown) => break,
                Some(command) => runtime.handle(command),
                None => {}
            }
            runtime.fire_due(Instant::now());
        }
    })
}

struct FrameState<P: ScriptProvider> {
    doc: Document,
    engine: Option<Annotator<P>>,
    watcher: MutationWatcher,
    /// Pending delayed first scan; `None` once it has run.
    first_scan_at: Option<Instant>,
}

struct Runtime<P: ScriptProvider> {
    frames: HashMap<FrameId, FrameState<P>>,
    evt_tx: Sender<EngineEvent>,
    provider: Option<P>,
    config: AnnotateConfig,
    warned_missing_provider: bool,
}

impl<P: ScriptProvider + Clone> Runtime<P> {
    fn handle(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::LoadDocument {
                frame_id,
                frame,
                html,
            } => self.load_document(frame_id, frame, html),
            EngineCommand::AppendHtml { frame_id, html } => self.append_html(frame_id, &html),
            EngineCommand::ScanNow { frame_id } => self.scan_now(frame_id),
            EngineCommand::Snapshot { frame_id } => {
                if let Some(state) = self.frames.get(&frame_id) {
                    let _ = self.evt_tx.send(EngineEvent::Snapshot {
                        frame_id,
                        html: dom::to_html(&state.doc),
                    });
                }
            }
            EngineCommand::Shutdown => {}
        }
    }

    fn load_document(&mut self, frame_id: FrameId, frame: annotate::FrameInfo, html: String) {
        if !should_run_in_frame(&frame) {
            log::debug!(target: "runtime.annotate", "frame {frame_id} declined by policy: {frame:?}");
            let _ = self.evt_tx.send(EngineEvent::DocumentLoaded {
                frame_id,
                running: false,
            });
            return;
        }

        let engine = match self.provider.clone() {
            Some(provider) => Some(Annotator::new(provider, self.config.clone())),
            None => {
                if !self.warned_missing_provider {
                    self.warned_missing_provider = true;
                    log::warn!(
                        target: "runtime.annotate",
                        "no script provider configured; documents stay unannotated"
                    );
                }
                None
            }
        };

        let mut doc = Document::from_html(&html);
        let running = engine.is_some();
        let first_scan_at = if running {
            styles::inject(&mut doc, &self.config);
            Some(Instant::now() + self.config.processing_delay)
        } else {
            None
        };
        // Loading and style injection precede observation.
        let _ = doc.take_records();

        self.frames.insert(
            frame_id,
            FrameState {
                doc,
                engine,
                watcher: MutationWatcher::new(self.config.debounce_window),
                first_scan_at,
            },
        );
        let _ = self
            .evt_tx
            .send(EngineEvent::DocumentLoaded { frame_id, running });
    }

    fn append_html(&mut self, frame_id: FrameId, html: &str) {
        let Some(state) = self.frames.get_mut(&frame_id) else {
            log::debug!(target: "runtime.annotate", "append for unknown frame {frame_id}");
            return;
        };
        let parent = state.doc.body().unwrap_or_else(|| state.doc.root());
        if let Err(err) = state.doc.append_html(parent, html) {
            log::warn!(target: "runtime.annotate", "append failed for frame {frame_id}: {err:?}");
            return;
        }
        let records = state.doc.take_records();
        // Mutations before the first scan are covered by that scan; the
        // watcher only runs afterwards.
        if state.first_scan_at.is_none() && state.engine.is_some() {
            state
                .watcher
                .note(&state.doc, &records, &self.config, Instant::now());
        }
    }

    fn scan_now(&mut self, frame_id: FrameId) {
        let Some(state) = self.frames.get_mut(&frame_id) else {
            return;
        };
        let Some(engine) = &mut state.engine else {
            log::debug!(target: "runtime.annotate", "scan request for inactive frame {frame_id}");
            return;
        };
        let summary = engine.scan(&mut state.doc);
        let records = state.doc.take_records();
        if state.first_scan_at.is_none() {
            state
                .watcher
                .note(&state.doc, &records, &self.config, Instant::now());
        }
        let _ = self.evt_tx.send(EngineEvent::ScanComplete {
            frame_id,
            reason: ScanReason::Manual,
            summary,
        });
    }

    fn nearest_deadline(&self) -> Option<Instant> {
        self.frames
            .values()
            .flat_map(|state| {
                state
                    .first_scan_at
                    .into_iter()
                    .chain(state.watcher.deadline())
            })
            .min()
    }

    fn fire_due(&mut self, now: Instant) {
        for (&frame_id, state) in self.frames.iter_mut() {
            if let Some(due) = state.first_scan_at
                && now >= due
            {
                state.first_scan_at = None;
                if let Some(engine) = &mut state.engine {
                    let summary = engine.scan(&mut state.doc);
                    // The initial pass happens before observation starts.
                    let _ = state.doc.take_records();
                    let _ = self.evt_tx.send(EngineEvent::ScanComplete {
                        frame_id,
                        reason: ScanReason::Initial,
                        summary,
                    });
                }
            }

            if state.watcher.poll(now)
                && let Some(engine) = &mut state.engine
            {
                let summary = engine.scan(&mut state.doc);
                // The pass's own splices are observable; idempotence makes
                // the follow-up pass they trigger a cheap no-op.
                let records = state.doc.take_records();
                state.watcher.note(&state.doc, &records, &self.config, now);
                let _ = self.evt_tx.send(EngineEvent::ScanComplete {
                    frame_id,
                    reason: ScanReason::Mutation,
                    summary,
                });
            }
        }
    }
}
