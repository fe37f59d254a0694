//! Line-driven click session over any async reader.
//!
//! Each input line clicks the trigger until EOF or a quit word. Fetches
//! accepted during the session are awaited before [`drive`] returns, so
//! whatever they publish is visible to the caller afterwards.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

use super::ThrottledTrigger;

/// Counters for one finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionReport {
    /// Lines that clicked the trigger.
    pub clicks: usize,
    /// Clicks the throttle let through.
    pub accepted: usize,
    /// Clicks dropped by the throttle.
    pub throttled: usize,
}

/// Returns `true` for input lines that end an interactive session.
pub fn is_quit(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "q" | "quit" | "exit")
}

/// Click `trigger` once per line of `input` and wait for every accepted
/// fetch to settle. `on_throttled` runs for each dropped click.
pub async fn drive<R>(
    trigger: &ThrottledTrigger,
    input: R,
    mut on_throttled: impl FnMut(),
) -> std::io::Result<SessionReport>
where
    R: AsyncBufRead + Unpin,
{
    let mut report = SessionReport::default();
    let mut pending = Vec::new();
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        if is_quit(&line) {
            debug!("quit requested");
            break;
        }
        report.clicks += 1;
        match trigger.fire() {
            Some(handle) => pending.push(handle),
            None => {
                report.throttled += 1;
                on_throttled();
            }
        }
    }

    report.accepted = pending.len();
    for handle in pending {
        if let Err(err) = handle.await {
            warn!(error = %err, "fetch task failed");
        }
    }

    info!(
        clicks = report.clicks,
        accepted = report.accepted,
        throttled = report.throttled,
        "session finished"
    );
    Ok(report)
}
