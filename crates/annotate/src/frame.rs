//! Run-eligibility precondition for a candidate frame.

use url::Url;

/// Host-environment description of one frame.
#[derive(Clone, Debug)]
pub struct FrameInfo {
    pub width: u32,
    pub height: u32,
    pub url: String,
}

const MIN_FRAME_EDGE: u32 = 100;

/// Host substrings that never get annotation: ad and tracking frames.
const DENIED_HOST_PARTS: &[&str] = &["doubleclick", "googlesyndication", "googleadservices"];

/// Whether the engine should run in `frame` at all. Fails closed: an
/// unparseable URL or a hostless one disqualifies the frame.
pub fn should_run_in_frame(frame: &FrameInfo) -> bool {
    if frame.width < MIN_FRAME_EDGE || frame.height < MIN_FRAME_EDGE {
        return false;
    }
    let Ok(parsed) = Url::parse(&frame.url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    !DENIED_HOST_PARTS.iter().any(|part| host.contains(part))
}
