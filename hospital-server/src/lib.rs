//! Hospital operations HTTP server
//!
//! Exposes the admission, vitals, billing and emergency services as a JSON
//! API under `/api/v1`, with a health probe and the OpenAPI document.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use error::*;
pub use server::HospitalServer;

use axum::{middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the application router with all routes and middleware
pub fn create_app(server: HospitalServer) -> Router {
    let cors = middleware::create_cors_layer(&server.config.server.cors_origins);
    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(from_fn(middleware::request_timing_middleware)),
        )
        .with_state(server)
}
