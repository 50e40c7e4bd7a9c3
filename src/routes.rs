use crate::polls::{create_poll, get_admin_poll, get_poll, stop_poll, vote_on_poll};
use crate::socket::socket_handler;
use crate::sse::{all_polls_sse, poll_updates_sse};
use crate::startup::AppState;
use axum::{
    Router,
    extract::Extension,
    http::{
        Method, StatusCode,
        header::{ACCEPT, CONTENT_TYPE},
    },
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn create_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/create", post(create_poll))
        .route("/api/poll/:poll_id", get(get_poll))
        .route("/api/poll/:poll_id/vote", post(vote_on_poll))
        .route("/api/poll/:poll_id/events", get(poll_updates_sse))
        .route("/api/admin/:admin_id", get(get_admin_poll))
        .route("/api/admin/:admin_id/stop", post(stop_poll))
        .route("/api/events", get(all_polls_sse))
        .route("/ws", get(socket_handler))
        .fallback(handler_404)
        .layer(Extension(app_state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE, ACCEPT]),
        )
        .layer(TraceLayer::new_for_http())
}

async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "nothing to see here")
}
