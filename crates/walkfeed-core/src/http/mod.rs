pub mod handler;
pub mod middleware;
pub mod router;
pub mod server;

pub use router::build_router;
pub use server::WalkServer;
