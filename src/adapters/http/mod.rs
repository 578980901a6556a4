//! HTTP import endpoint.
//!
//! Serves the schedule import collaborator over axum:
//!
//! - `GET /api/import` - the default three-entry schedule
//! - `GET /api/import?code=<code>` - remote lookup response, forwarded verbatim
//! - `GET /health` - liveness

pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
