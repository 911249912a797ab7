//! End-to-end lifecycle: load, delayed first scan, debounced re-scan.

use annotate::{AnnotateConfig, FrameInfo};
use bus::{EngineCommand, EngineEvent};
use core_types::ScanReason;
use pinyin::PinyinTable;
use runtime_annotate::start_annotate_runtime;
use std::sync::mpsc::{Receiver, channel};
use std::time::Duration;

/// Generous receive bound; real deadlines in these tests are far shorter.
const EVENT_WAIT: Duration = Duration::from_secs(5);

fn test_config() -> AnnotateConfig {
    AnnotateConfig {
        processing_delay: Duration::from_millis(30),
        debounce_window: Duration::from_millis(100),
        ..AnnotateConfig::default()
    }
}

fn page_frame() -> FrameInfo {
    FrameInfo {
        width: 1280,
        height: 720,
        url: "https://example.com/feed".to_string(),
    }
}

fn next_event(evt_rx: &Receiver<EngineEvent>) -> EngineEvent {
    evt_rx
        .recv_timeout(EVENT_WAIT)
        .expect("runtime should emit an event")
}

#[test]
fn load_scan_mutate_rescan() {
    let (cmd_tx, cmd_rx) = channel();
    let (evt_tx, evt_rx) = channel();
    let handle = start_annotate_runtime(cmd_rx, evt_tx, Some(PinyinTable::new()), test_config());

    cmd_tx
        .send(EngineCommand::LoadDocument {
            frame_id: 1,
            frame: page_frame(),
            html: "<html><head></head><body><p>我爱中国</p></body></html>".to_string(),
        })
        .unwrap();

    match next_event(&evt_rx) {
        EngineEvent::DocumentLoaded { frame_id, running } => {
            assert_eq!(frame_id, 1);
            assert!(running);
        }
        other => panic!("expected DocumentLoaded, got: {other:?}"),
    }

    match next_event(&evt_rx) {
        EngineEvent::ScanComplete {
            reason, summary, ..
        } => {
            assert_eq!(reason, ScanReason::Initial);
            assert_eq!(summary.annotated, 1);
        }
        other => panic!("expected the initial scan, got: {other:?}"),
    }

    // Two mutations in quick succession coalesce into one re-scan.
    cmd_tx
        .send(EngineCommand::AppendHtml {
            frame_id: 1,
            html: "<p>你好</p>".to_string(),
        })
        .unwrap();
    cmd_tx
        .send(EngineCommand::AppendHtml {
            frame_id: 1,
            html: "<p>世界</p>".to_string(),
        })
        .unwrap();

    match next_event(&evt_rx) {
        EngineEvent::ScanComplete {
            reason, summary, ..
        } => {
            assert_eq!(reason, ScanReason::Mutation);
            assert_eq!(
                summary.annotated, 2,
                "both appended paragraphs glossed in one coalesced pass"
            );
        }
        other => panic!("expected one debounced re-scan, got: {other:?}"),
    }

    // The re-scan's own splices arm the watcher once more; idempotence makes
    // that trailing pass annotate nothing, and then the system goes quiet.
    match next_event(&evt_rx) {
        EngineEvent::ScanComplete {
            reason, summary, ..
        } => {
            assert_eq!(reason, ScanReason::Mutation);
            assert_eq!(summary.annotated, 0);
        }
        other => panic!("expected the convergence pass, got: {other:?}"),
    }
    assert!(
        evt_rx.recv_timeout(Duration::from_millis(300)).is_err(),
        "no further passes once converged"
    );

    cmd_tx.send(EngineCommand::Snapshot { frame_id: 1 }).unwrap();
    match next_event(&evt_rx) {
        EngineEvent::Snapshot { html, .. } => {
            assert_eq!(
                html.matches("<span class=\"pinyin-annotation\">").count(),
                8,
                "我爱中国 + 你好 + 世界 = eight glosses: {html}"
            );
            assert!(html.contains("pinyin-annotator-styles"));
        }
        other => panic!("expected a snapshot, got: {other:?}"),
    }

    cmd_tx.send(EngineCommand::Shutdown).unwrap();
    handle.join().unwrap();
}

#[test]
fn declined_frame_never_scans() {
    let (cmd_tx, cmd_rx) = channel();
    let (evt_tx, evt_rx) = channel();
    let handle = start_annotate_runtime(cmd_rx, evt_tx, Some(PinyinTable::new()), test_config());

    cmd_tx
        .send(EngineCommand::LoadDocument {
            frame_id: 7,
            frame: FrameInfo {
                width: 50,
                height: 50,
                url: "https://example.com".to_string(),
            },
            html: "<body><p>我</p></body>".to_string(),
        })
        .unwrap();

    match next_event(&evt_rx) {
        EngineEvent::DocumentLoaded { running, .. } => assert!(!running),
        other => panic!("expected a declined load, got: {other:?}"),
    }
    assert!(
        evt_rx.recv_timeout(Duration::from_millis(200)).is_err(),
        "a declined frame produces no scans"
    );

    cmd_tx.send(EngineCommand::Shutdown).unwrap();
    handle.join().unwrap();
}

#[test]
fn missing_provider_degrades_to_inaction() {
    let (cmd_tx, cmd_rx) = channel();
    let (evt_tx, evt_rx) = channel();
    let handle =
        start_annotate_runtime(cmd_rx, evt_tx, None::<PinyinTable>, test_config());

    cmd_tx
        .send(EngineCommand::LoadDocument {
            frame_id: 2,
            frame: page_frame(),
            html: "<body><p>我</p></body>".to_string(),
        })
        .unwrap();

    match next_event(&evt_rx) {
        EngineEvent::DocumentLoaded { running, .. } => assert!(!running),
        other => panic!("expected a degraded load, got: {other:?}"),
    }

    cmd_tx
        .send(EngineCommand::AppendHtml {
            frame_id: 2,
            html: "<p>中</p>".to_string(),
        })
        .unwrap();
    assert!(
        evt_rx.recv_timeout(Duration::from_millis(200)).is_err(),
        "no provider, no passes"
    );

    cmd_tx.send(EngineCommand::Snapshot { frame_id: 2 }).unwrap();
    match next_event(&evt_rx) {
        EngineEvent::Snapshot { html, .. } => {
            assert!(
                !html.contains("pinyin-annotation"),
                "content must stay untouched without a provider: {html}"
            );
        }
        other => panic!("expected a snapshot, got: {other:?}"),
    }

    cmd_tx.send(EngineCommand::Shutdown).unwrap();
    handle.join().unwrap();
}
