//! HTTP server module
//!
//! Contains the actix-web server setup, shared application state,
//! middleware, and route handlers.

pub mod builder;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use server::HttpServer;
pub use state::AppState;
