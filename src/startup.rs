use crate::config::Config;
use crate::db::{MemoryPollStore, PollStore};
use crate::sse::Broadcaster;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PollStore>,
    pub broadcaster: Broadcaster,
    pub keep_alive: Duration,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self::with_store(Arc::new(MemoryPollStore::new()), config)
    }

    pub fn with_store(store: Arc<dyn PollStore>, config: &Config) -> Self {
        AppState {
            store,
            broadcaster: Broadcaster::new(config.broadcast_capacity),
            keep_alive: config.sse_keep_alive,
        }
    }
}
