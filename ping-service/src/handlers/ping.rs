//! Liveness handler

/// Body returned by the liveness probe
pub const PONG: &str = "PONG";

/// Always answers; only confirms the process is up.
pub async fn ping() -> &'static str {
    PONG
}
