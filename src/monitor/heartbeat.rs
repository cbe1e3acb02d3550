//! Wire payloads of the liveness protocol.
//!
//! The peer proves it is alive by sending [`HEARTBEAT_SENTINEL`] as the whole
//! content of a single receive. The watchdog answers a missed window with
//! [`TIMEOUT_NOTICE`] exactly once.

/// Payload that counts as a heartbeat when it is the entire receive.
pub const HEARTBEAT_SENTINEL: &[u8] = b"ICMP-RESPONSE-RECEIVED";

/// Terminal notice sent to the peer, NUL included (8 bytes on the wire).
pub const TIMEOUT_NOTICE: &[u8] = b"TIMEOUT\0";

/// Returns true if `payload` is exactly one heartbeat.
///
/// Peers commonly write fixed, NUL-padded buffers, so trailing NUL bytes are
/// dropped before the comparison. Anything else after the sentinel (including
/// bytes that follow a NUL) breaks the match.
pub fn is_heartbeat(payload: &[u8]) -> bool {
    let end = payload
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1);
    &payload[..end] == HEARTBEAT_SENTINEL
}
