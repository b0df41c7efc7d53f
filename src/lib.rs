pub mod config;
pub mod domain {
    pub mod authorization;
    pub mod order;
}
pub mod error;
pub mod gateways;
pub mod http {
    pub mod handlers {
        pub mod checkout;
        pub mod ops;
        pub mod order;
    }
}
pub mod service {
    pub mod order_service;
}

use axum::routing::{get, post};
use axum::Router;
use std::path::PathBuf;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub order_service: service::order_service::OrderService,
    pub checkout: config::CheckoutSettings,
    pub public_dir: PathBuf,
}

/// Builds the router: `POST /order`, `GET /checkout-config`, `GET /health`,
/// and static files from `public_dir` for everything else (so `GET /` serves
/// `index.html`).
pub fn app(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.public_dir);

    Router::new()
        .route("/order", post(http::handlers::order::create_order))
        .route("/checkout-config", get(http::handlers::checkout::checkout_config))
        .route("/health", get(http::handlers::ops::health))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
