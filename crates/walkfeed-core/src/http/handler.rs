use axum::{
    http::{Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::capability::chunked_body;
use crate::stream::{TICK_PERIOD, stream_walk};
use crate::walk::RandomWalk;

/// Serve a random walk on any path.
///
/// Preflight requests get the CORS headers only. Everything else gets a
/// `text/plain` body that grows by one row per tick until the client leaves.
pub async fn walk_handler(method: Method, uri: Uri) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    info!(uri = %uri, "Got connection");

    let (sender, body) = chunked_body();
    // Bound to the response body: dropping the body ends this task.
    tokio::spawn(async move {
        stream_walk(&sender, RandomWalk::from_entropy(), TICK_PERIOD).await;
    });

    ([(header::CONTENT_TYPE, "text/plain")], body).into_response()
}
