//! Route handlers for the marketplace API and admin page.

pub mod admin;
pub mod agents;
pub mod calls;
pub mod dashboard;
pub mod health;
pub mod locations;
pub mod me;
pub mod session;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::state::AppState;
use crate::storage::MAX_AVATAR_BYTES;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // HTML pages
        .route("/admin", get(dashboard::admin_page))
        // Health check
        .route("/health", get(health::health))
        // Session
        .route("/api/session", get(session::current))
        .route("/api/onboarding/role", post(session::choose_role))
        // Public discovery
        .route("/api/agents", get(agents::list))
        .route("/api/agents/featured", get(agents::featured))
        .route("/api/agents/:id", get(agents::detail))
        .route("/api/agents/:id/review", put(agents::rate))
        // The signed-in user's own records
        .route("/api/me/agent", get(me::get_listing).put(me::update_listing))
        .route("/api/me/agent/availability", post(me::set_availability))
        .route("/api/me/agent/reapply", post(me::reapply))
        .route(
            "/api/me/agent/avatar",
            put(me::upload_avatar).layer(DefaultBodyLimit::max(MAX_AVATAR_BYTES + 1)),
        )
        .route("/api/me/calls", get(me::calls))
        // Calls
        .route("/api/calls", post(calls::create))
        .route("/api/calls/:id/status", post(calls::update_status))
        // Administration
        .route("/api/admin/agents", get(admin::list))
        .route("/api/admin/agents/:id/verify", post(admin::verify))
        .route("/api/admin/agents/:id/revoke", post(admin::revoke))
        .route("/api/admin/agents/:id/reject", post(admin::reject))
        .route("/api/admin/agents/:id/restore", post(admin::restore))
        .route("/api/admin/agents/:id/premium", post(admin::premium))
        .route("/api/admin/stats", get(admin::stats))
        // Locations
        .route("/api/locations/states", get(locations::states))
        .route("/api/locations/states/:state/cities", get(locations::cities))
        .route("/api/locate", post(locations::locate))
}
