//! # Cartmate - price-match chat assistant
//!
//! Cartmate is a thin conversational front-end that routes user chat
//! messages to a hosted large-language-model API, optionally enriches the
//! conversation with scraped product-page content, and dispatches a small
//! set of named tools (competitor price search, price-match policy lookup)
//! that the model may request.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cartmate::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Load configuration
//!     let settings = Settings::new()?;
//!
//!     // Server will start on configured host:port
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **assistant**: domain types, model client, tool registry, controller
//! - **adapters**: search/scrape clients and the HTTP API surface
//! - **config**: configuration management

pub mod adapters;
pub mod assistant;
pub mod cli;
pub mod config;

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::api_handler::{self, ApiState};

/// Creates the Axum application router with all endpoints configured.
pub fn create_app(state: ApiState) -> Router {
    let api_router = Router::new()
        .route("/chat", post(api_handler::post_chat))
        .route("/price-match", post(api_handler::post_price_match))
        .route("/sessions", get(api_handler::list_sessions))
        .route(
            "/sessions/:id",
            get(api_handler::get_session).delete(api_handler::delete_session),
        )
        .route("/tools", get(api_handler::list_tools))
        .route("/tools/:name", post(api_handler::dispatch_tool))
        .route(
            "/model",
            get(api_handler::get_model).put(api_handler::update_model),
        )
        .route("/starter", get(api_handler::get_starter))
        .with_state(state);

    Router::new()
        .route("/health", get(api_handler::health))
        .nest("/api", api_router)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
}
