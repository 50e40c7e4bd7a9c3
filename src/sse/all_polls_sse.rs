use crate::startup::AppState;
use axum::{
    extract::Extension,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;
use tokio::sync::broadcast::error::RecvError;

/// Unscoped feed of every poll event. Observers filter by `pollId` themselves,
/// and `pollUpdate` carries the full record including `adminId`.
pub async fn all_polls_sse(
    Extension(app_state): Extension<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = app_state.broadcaster.subscribe();
    info!("observer subscribed to global feed");

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    yield Ok(Event::default().event(event.name()).data(event.sse_data()));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("global feed observer lagged, skipped {skipped} event(s)");
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(app_state.keep_alive)
            .text("keep-alive"),
    )
}
