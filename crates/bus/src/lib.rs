use annotate::{FrameInfo, ScanSummary};
use core_types::{FrameId, ScanReason};
use std::sync::mpsc::{Receiver, Sender, channel};

#[derive(Debug)]
pub enum EngineCommand {
    /// Hand a freshly loaded document to the engine.
    LoadDocument {
        frame_id: FrameId,
        frame: FrameInfo,
        html: String,
    },
    /// Structural mutation: parse `html` and append it under the body
    /// (dynamically loaded content, infinite scroll, SPA navigation).
    AppendHtml { frame_id: FrameId, html: String },
    /// Explicit re-scan, outside the debounce path.
    ScanNow { frame_id: FrameId },
    /// Ask for the current serialized document.
    Snapshot { frame_id: FrameId },
    Shutdown,
}

#[derive(Debug)]
pub enum EngineEvent {
    /// The document was taken on (or declined, when `running` is false).
    DocumentLoaded { frame_id: FrameId, running: bool },
    ScanComplete {
        frame_id: FrameId,
        reason: ScanReason,
        summary: ScanSummary,
    },
    Snapshot { frame_id: FrameId, html: String },
}

pub struct Bus {
    pub cmd_tx: Sender<EngineCommand>,
    pub evt_rx: Receiver<EngineEvent>,
    pub evt_tx: Sender<EngineEvent>, // shareable for runtimes
}

impl Bus {
    /// Channel bundle plus the command receiver the runtime consumes.
    pub fn new() -> (Self, Receiver<EngineCommand>) {
        let (cmd_tx, cmd_rx) = channel();
        let (evt_tx, evt_rx) = channel();
        (
            Self {
                cmd_tx,
                evt_rx,
                evt_tx,
            },
            cmd_rx,
        )
    }
}
