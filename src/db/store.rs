use crate::db::models::Poll;
use crate::error::StoreError;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Backing storage for polls. Only the lifecycle functions write through it.
pub trait PollStore: Send + Sync {
    fn put(&self, poll: Poll) -> Result<(), StoreError>;

    fn get_by_poll_id(&self, poll_id: &str) -> Result<Poll, StoreError>;

    fn get_by_admin_id(&self, admin_id: &str) -> Result<Poll, StoreError>;

    /// Applies `f` to the stored record and returns the result. The record is
    /// not visible to other callers until `f` returns.
    fn mutate(&self, poll_id: &str, f: &mut dyn FnMut(&mut Poll)) -> Result<Poll, StoreError>;
}

#[derive(Default)]
struct Tables {
    polls: HashMap<String, Poll>,
    admin_index: HashMap<String, String>,
}

#[derive(Default)]
pub struct MemoryPollStore {
    tables: Mutex<Tables>,
}

impl MemoryPollStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl PollStore for MemoryPollStore {
    fn put(&self, poll: Poll) -> Result<(), StoreError> {
        let mut tables = self.lock()?;

        if tables.polls.contains_key(&poll.poll_id)
            || tables.admin_index.contains_key(&poll.admin_id)
        {
            return Err(StoreError::DuplicateId);
        }

        tables
            .admin_index
            .insert(poll.admin_id.clone(), poll.poll_id.clone());
        tables.polls.insert(poll.poll_id.clone(), poll);

        Ok(())
    }

    fn get_by_poll_id(&self, poll_id: &str) -> Result<Poll, StoreError> {
        self.lock()?
            .polls
            .get(poll_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn get_by_admin_id(&self, admin_id: &str) -> Result<Poll, StoreError> {
        let tables = self.lock()?;
        tables
            .admin_index
            .get(admin_id)
            .and_then(|poll_id| tables.polls.get(poll_id))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn mutate(&self, poll_id: &str, f: &mut dyn FnMut(&mut Poll)) -> Result<Poll, StoreError> {
        let mut tables = self.lock()?;
        let poll = tables.polls.get_mut(poll_id).ok_or(StoreError::NotFound)?;

        f(poll);

        Ok(poll.clone())
    }
}
