//! The tick loop behind every streaming response.

use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use crate::capability::{DisconnectNotifier, Flusher};
use crate::row::{HEADER_LINE, format_row};
use crate::walk::RandomWalk;

/// Interval between two data rows.
pub const TICK_PERIOD: Duration = Duration::from_millis(1000);

/// What a finished stream delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    pub rows_written: u64,
}

/// Stream `walk` to `sink` until the client disconnects.
///
/// Writes the header line, then one row every `period`, starting one period
/// after the call. Each row is flushed before the next tick is awaited, so
/// rows arrive in tick order. The loop ends as soon as the disconnect signal
/// fires or a flush fails; nothing is written after that.
pub async fn stream_walk<S>(sink: &S, mut walk: RandomWalk, period: Duration) -> StreamSummary
where
    S: Flusher + DisconnectNotifier,
{
    let mut summary = StreamSummary::default();

    if sink
        .flush_chunk(Bytes::from_static(HEADER_LINE.as_bytes()))
        .await
        .is_err()
    {
        info!("Connection closed before header was sent");
        return summary;
    }

    let mut ticker = interval_at(Instant::now() + period, period);
    // A slow client gets fewer rows, not a burst of stale ones.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = sink.disconnected() => break,
            _ = ticker.tick() => {
                let at = Utc::now();
                debug!(at = %at, "Tick");

                let sample = walk.step();
                let row = format_row(at, &sample);
                if sink.flush_chunk(Bytes::from(row)).await.is_err() {
                    break;
                }
                summary.rows_written += 1;
            }
        }
    }

    info!(rows_written = summary.rows_written, "Connection closed");
    summary
}
