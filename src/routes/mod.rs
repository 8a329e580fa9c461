use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{
    attendees, checkin, dashboard, events, health_check, notifications, revenue, team,
};
use crate::state::AppState;

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::overview))
        .route("/events", get(events::list_events).post(events::create_event))
        .route(
            "/events/:id",
            get(events::get_event)
                .patch(events::update_event)
                .delete(events::delete_event),
        )
        .route("/events/:id/stats", get(events::event_stats))
        .route("/events/:id/registrations", get(events::event_registrations))
        .route(
            "/events/:id/assignments",
            get(events::event_assignments).post(events::add_assignment),
        )
        .route("/assignments/:id", delete(events::remove_assignment))
        .route("/registrations", get(attendees::list_registrations))
        .route("/registrations/:id/status", patch(attendees::update_status))
        .route("/checkin", post(checkin::check_in))
        .route("/checkin/stats", get(checkin::checkin_stats))
        .route("/revenue/stats", get(revenue::revenue_stats))
        .route("/revenue/events", get(revenue::revenue_by_event))
        .route("/revenue/transactions", get(revenue::recent_transactions))
        .route("/team", get(team::list_members))
        .route("/team/:id/role", patch(team::update_role))
        .route("/profiles/search", get(team::search_profiles))
        .route("/notifications", post(notifications::send))
        .route("/notifications/events", get(notifications::targets))
        .route("/notifications/audience", get(notifications::audience))
}

/// Routes without the environment-driven middleware; used by tests.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
}

pub fn create_routes(state: AppState, cors_allowed_origins: &str) -> Router {
    app_router(state)
        .layer(create_security_headers_layer())
        .layer(create_cors_layer(cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}
