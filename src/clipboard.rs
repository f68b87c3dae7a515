//! Best-effort clipboard delivery over the session's output stream.
//!
//! A retrieved paste is pushed to the client's clipboard with an OSC 52
//! sequence. Terminals that do not support OSC 52 ignore the bytes, so
//! failure here is cosmetic and never surfaces to the workflow.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tokio::sync::mpsc;

/// Build the OSC 52 clipboard-write sequence for `content`.
pub fn osc52(content: &str) -> Vec<u8> {
    let mut seq = b"\x1b]52;c;".to_vec();
    seq.extend_from_slice(STANDARD.encode(content).as_bytes());
    seq.push(0x07);
    seq
}

/// Deliver `content` to the session's clipboard. Failures are ignored.
pub async fn deliver(output: &mpsc::Sender<Vec<u8>>, content: &str) {
    let _ = output.send(osc52(content)).await;
}
