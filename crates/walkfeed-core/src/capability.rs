//! Transport capabilities required to stream a walk.
//!
//! A streaming response needs two things from whatever carries it: a way to
//! push a chunk to the client right away, and a signal that the client has
//! gone. Both are traits so the tick loop never depends on a concrete
//! transport, and a transport lacking either one cannot be wired in at all.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::body::Body;
use bytes::Bytes;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// The client end of the connection is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("client disconnected")]
pub struct Disconnected;

/// Push partial output to the client immediately.
#[async_trait]
pub trait Flusher: Send + Sync {
    /// Send one chunk. Fails only when the client has disconnected.
    async fn flush_chunk(&self, chunk: Bytes) -> Result<(), Disconnected>;
}

/// Signal that fires when the client end of the connection closes.
#[async_trait]
pub trait DisconnectNotifier: Send + Sync {
    /// Resolves once the client has disconnected. Cancel-safe; calling it
    /// again after it fired resolves immediately.
    async fn disconnected(&self);
}

/// Writing half of a chunked response body.
///
/// Every chunk handed over becomes its own frame of the response body, so
/// hyper writes it out as a separate chunk of the chunked transfer encoding.
/// When the connection closes hyper drops the body, which closes the channel
/// and wakes [`DisconnectNotifier::disconnected`].
#[derive(Debug, Clone)]
pub struct ChunkSender {
    tx: mpsc::Sender<Result<Bytes, Infallible>>,
}

/// Create a streamed response body together with its writer.
pub fn chunked_body() -> (ChunkSender, Body) {
    // A single slot: a chunk is handed to hyper before the next one is made.
    let (tx, rx) = mpsc::channel(1);
    let body = Body::from_stream(ReceiverStream::new(rx));
    (ChunkSender { tx }, body)
}

#[async_trait]
impl Flusher for ChunkSender {
    async fn flush_chunk(&self, chunk: Bytes) -> Result<(), Disconnected> {
        self.tx.send(Ok(chunk)).await.map_err(|_| Disconnected)
    }
}

#[async_trait]
impl DisconnectNotifier for ChunkSender {
    async fn disconnected(&self) {
        self.tx.closed().await
    }
}
