//! Walkfeed: a synthetic time series streamed over chunked HTTP.
//!
//! Every connection gets its own random walk. Once per second the walk takes
//! a step and one CSV-like row is pushed to the client as a separate chunk,
//! until the client goes away.
//!
//! # Layout
//!
//! - [`walk`]: the per-request random walk and its min/max bands.
//! - [`row`]: the text format of the header and data rows.
//! - [`capability`]: the `Flusher` / `DisconnectNotifier` capabilities a
//!   transport must provide, and the channel-backed body implementing them.
//! - [`stream`]: the tick loop tying the three together.
//! - [`http`]: router, CORS headers and the listening server.

pub mod capability;
pub mod config;
pub mod error;
pub mod http;
pub mod row;
pub mod stream;
pub mod walk;

pub use capability::{ChunkSender, DisconnectNotifier, Disconnected, Flusher, chunked_body};
pub use config::ServerConfig;
pub use error::{Error, Result};
pub use http::{WalkServer, build_router};
pub use row::{HEADER_LINE, Row, RowError, format_row, parse_row, rfc3339_nano};
pub use stream::{StreamSummary, TICK_PERIOD, stream_walk};
pub use walk::{RandomWalk, Sample};
