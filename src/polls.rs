use crate::db::{CreatedPoll, NewPoll};
use crate::error::PollError;
use crate::lifecycle::{self, VoteOutcome};
use crate::startup::AppState;
use axum::{
    extract::{Extension, Json, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    pub option_index: i64,
}

/// Counts a vote and pushes the new state to every observer. Unknown polls,
/// stopped polls and bad indices are dropped without a reply.
pub fn dispatch_vote(app_state: &AppState, poll_id: &str, option_index: i64) {
    match lifecycle::apply_vote(app_state.store.as_ref(), poll_id, option_index) {
        Ok(VoteOutcome::Counted(poll)) => {
            info!("vote counted on {poll_id} option {option_index}");
            app_state.broadcaster.poll_updated(&poll);
        }
        Ok(ignored) => {
            debug!(
                "vote on {poll_id} option {option_index} ignored (stopped: {})",
                ignored.poll().is_stopped
            );
        }
        Err(e) => debug!("vote on {poll_id} dropped: {e}"),
    }
}

pub fn dispatch_stop(app_state: &AppState, admin_id: &str) {
    match lifecycle::stop_poll(app_state.store.as_ref(), admin_id) {
        Ok(poll) => {
            info!("poll {} stopped", poll.poll_id);
            app_state.broadcaster.poll_stopped(&poll.poll_id);
        }
        Err(e) => debug!("stop request dropped: {e}"),
    }
}

/// Create a new poll. The admin id is only ever returned here and from the
/// admin view.
pub async fn create_poll(
    Extension(app_state): Extension<AppState>,
    Json(payload): Json<NewPoll>,
) -> Result<impl IntoResponse, PollError> {
    let poll = lifecycle::create_poll(app_state.store.as_ref(), payload, Utc::now())?;
    info!("poll {} created with {} options", poll.poll_id, poll.options.len());

    Ok((StatusCode::OK, Json(CreatedPoll::from(&poll))))
}

pub async fn get_poll(
    Extension(app_state): Extension<AppState>,
    Path(poll_id): Path<String>,
) -> Result<impl IntoResponse, PollError> {
    let view = lifecycle::voter_view(app_state.store.as_ref(), &poll_id)?;
    Ok((StatusCode::OK, Json(view)))
}

pub async fn get_admin_poll(
    Extension(app_state): Extension<AppState>,
    Path(admin_id): Path<String>,
) -> Result<impl IntoResponse, PollError> {
    let poll = lifecycle::admin_view(app_state.store.as_ref(), &admin_id)?;
    Ok((StatusCode::OK, Json(poll)))
}

/// Fire-and-forget: the outcome arrives on the real-time channels. An
/// unreadable body is dropped the same way a bad socket frame is.
pub async fn vote_on_poll(
    Extension(app_state): Extension<AppState>,
    Path(poll_id): Path<String>,
    payload: Result<Json<CastVoteRequest>, JsonRejection>,
) -> impl IntoResponse {
    match payload {
        Ok(Json(vote)) => dispatch_vote(&app_state, &poll_id, vote.option_index),
        Err(rejection) => debug!("vote on {poll_id} dropped: {rejection}"),
    }
    StatusCode::ACCEPTED
}

pub async fn stop_poll(
    Extension(app_state): Extension<AppState>,
    Path(admin_id): Path<String>,
) -> impl IntoResponse {
    dispatch_stop(&app_state, &admin_id);
    StatusCode::ACCEPTED
}
