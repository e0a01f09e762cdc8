//! practica-api
//!
//! HTTP JSON surface over the roster service, plus the configuration and
//! backend wiring used by the `practica` binary.

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use app::router;
pub use state::AppState;
