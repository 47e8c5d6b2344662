//! HTTP API for the Agentwaala marketplace.
//!
//! Customers find and call verified agents, agents manage their own listing,
//! and administrators review listings from a JSON API or the `/admin` page.
//! Routing lives in [`routes`]; lifecycle actions that persist and then
//! notify live in [`services`].

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod storage;
pub mod views;

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use session::{AuthUser, Claims, Session, TokenVerifier};
pub use state::{AppState, DisabledNotifier};
pub use storage::AvatarStore;

/// The full application: API routes, the admin page, and uploaded avatars.
pub fn app(state: AppState) -> Router {
    let uploads = ServeDir::new(state.avatars.root());

    routes::router()
        .nest_service(storage::UPLOADS_PREFIX, uploads)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
