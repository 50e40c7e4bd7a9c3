use crate::db::VoterView;
use crate::lifecycle;
use crate::sse::models::PollEvent;
use crate::startup::AppState;
use axum::{
    extract::{Extension, Path},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use tokio::sync::broadcast::error::RecvError;

/// Feed scoped to one poll. Updates carry the voter view, never the admin id.
pub async fn poll_updates_sse(
    Extension(app_state): Extension<AppState>,
    Path(poll_id): Path<String>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // subscribe before reading so no update falls between the two
    let mut rx = app_state.broadcaster.subscribe();
    let initial = lifecycle::voter_view(app_state.store.as_ref(), &poll_id);

    let stream = async_stream::stream! {
        let known = match initial {
            Ok(view) => {
                yield Ok(Event::default()
                    .event("init")
                    .data(json!(view).to_string()));
                true
            }
            Err(e) => {
                yield Ok(Event::default()
                    .event("error")
                    .data(json!({"error": e.to_string()}).to_string()));
                false
            }
        };

        if known {
            loop {
                match rx.recv().await {
                    Ok(event) if event.poll_id() != poll_id => {}
                    Ok(PollEvent::PollUpdated(poll)) => {
                        yield Ok(Event::default()
                            .event("pollUpdate")
                            .data(json!(VoterView::from(&poll)).to_string()));
                    }
                    Ok(PollEvent::PollStopped(stopped)) => {
                        yield Ok(Event::default()
                            .event("pollStopped")
                            .data(stopped));
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("observer of {poll_id} lagged, skipped {skipped} event(s)");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(app_state.keep_alive)
            .text("keep-alive"),
    )
}
