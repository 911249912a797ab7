//! Demo shell: run the annotation engine over a document and print what the
//! reader would see, including a simulated infinite-scroll mutation.

use annotate::{AnnotateConfig, FrameInfo};
use bus::{Bus, EngineCommand, EngineEvent};
use core_types::ScanReason;
use mimalloc::MiMalloc;
use pinyin::PinyinTable;
use runtime_annotate::start_annotate_runtime;
use std::time::Duration;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const SAMPLE_PAGE: &str = "\
<!DOCTYPE html>
<html>
<head><title>阅读 demo</title></head>
<body>
<h1>你好，世界</h1>
<p>我爱中国。This mixed paragraph stays readable.</p>
<code>let 中文 = \"never annotated\";</code>
<div contenteditable=\"true\">编辑区域 stays clean</div>
</body>
</html>
";

const FEED_ITEMS: [&str; 2] = [
    "<p>新闻：今天天气很好。</p>",
    "<p>朋友们都说好。</p>",
];

fn main() {
    let html = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                eprintln!("read {path}: {err}");
                std::process::exit(1);
            }
        },
        None => SAMPLE_PAGE.to_string(),
    };

    // Short demo timings; a real host would keep the second-scale defaults.
    let config = AnnotateConfig {
        processing_delay: Duration::from_millis(150),
        debounce_window: Duration::from_millis(100),
        ..AnnotateConfig::default()
    };

    let (bus, cmd_rx) = Bus::new();
    let handle = start_annotate_runtime(cmd_rx, bus.evt_tx.clone(), Some(PinyinTable::new()), config);

    let frame_id = 1;
    let frame = FrameInfo {
        width: 1280,
        height: 720,
        url: "https://example.com/reader".to_string(),
    };
    bus.cmd_tx
        .send(EngineCommand::LoadDocument {
            frame_id,
            frame,
            html,
        })
        .expect("runtime alive");

    let mut pending_feed = FEED_ITEMS.iter();
    let mut mutation_passes = 0;
    loop {
        let event = match bus.evt_rx.recv_timeout(Duration::from_secs(10)) {
            Ok(event) => event,
            Err(err) => {
                eprintln!("runtime went quiet unexpectedly: {err}");
                break;
            }
        };
        match event {
            EngineEvent::DocumentLoaded { running, .. } => {
                if running {
                    println!("document loaded, first scan pending");
                } else {
                    println!("frame declined; nothing to do");
                    break;
                }
            }
            EngineEvent::ScanComplete {
                reason, summary, ..
            } => {
                println!(
                    "{reason:?} pass: visited={} annotated={} unchanged={} skipped={} failed={}",
                    summary.visited,
                    summary.annotated,
                    summary.unchanged,
                    summary.skipped,
                    summary.failed
                );
                match reason {
                    ScanReason::Initial => {
                        // Simulate content arriving after load, in one burst
                        // so the debounce coalesces it.
                        for item in pending_feed.by_ref() {
                            bus.cmd_tx
                                .send(EngineCommand::AppendHtml {
                                    frame_id,
                                    html: (*item).to_string(),
                                })
                                .expect("runtime alive");
                        }
                        println!("appended {} feed items", FEED_ITEMS.len());
                    }
                    ScanReason::Mutation => {
                        mutation_passes += 1;
                        // First pass glosses the feed items, the second is
                        // the convergence no-op; then ask for the result.
                        if summary.annotated == 0 || mutation_passes >= 2 {
                            bus.cmd_tx
                                .send(EngineCommand::Snapshot { frame_id })
                                .expect("runtime alive");
                        }
                    }
                    ScanReason::Manual => {}
                }
            }
            EngineEvent::Snapshot { html, .. } => {
                println!("--- annotated document ---");
                println!("{html}");
                break;
            }
        }
    }

    let _ = bus.cmd_tx.send(EngineCommand::Shutdown);
    let _ = handle.join();
}
