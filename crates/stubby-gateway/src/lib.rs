//! HTTP front end for the Stubby URL shortener.
//!
//! Routes:
//! - `POST /api/shorten`: the request body is the destination URL
//! - `GET /r/{id}`: permanent redirect to the destination, counts a click
//! - `GET /api/stats/{id}`: record and click count as JSON
//! - `GET /health`

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use error::AppError;
pub use state::AppState;
