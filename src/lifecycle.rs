use crate::db::{NewPoll, Poll, PollOption, PollStore, VoterView};
use crate::error::{PollError, StoreError};
use chrono::{DateTime, Utc};
use uuid::Uuid;

const MIN_OPTIONS: usize = 2;
const ID_ATTEMPTS: usize = 3;

/// Result of a vote command. Votes on stopped polls or with an out-of-range
/// index are ignored rather than rejected; the caller has no response leg.
#[derive(Debug, Clone, PartialEq)]
pub enum VoteOutcome {
    Counted(Poll),
    Ignored(Poll),
}

impl VoteOutcome {
    pub fn poll(&self) -> &Poll {
        match self {
            VoteOutcome::Counted(poll) | VoteOutcome::Ignored(poll) => poll,
        }
    }
}

fn generate_id(prefix: &str, now: DateTime<Utc>, random_len: usize) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}{}", now.timestamp_millis(), &random[..random_len])
}

/// Validates the input and stores a fresh poll with every counter at zero.
pub fn create_poll(
    store: &dyn PollStore,
    input: NewPoll,
    now: DateTime<Utc>,
) -> Result<Poll, PollError> {
    let question = input.question.trim().to_string();
    let options: Vec<PollOption> = input
        .options
        .iter()
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .map(|text| PollOption {
            text: text.to_string(),
            votes: 0,
        })
        .collect();

    if question.is_empty() || options.len() < MIN_OPTIONS {
        return Err(PollError::InvalidPollData);
    }

    let end_time = input.end_time.filter(|t| !t.trim().is_empty());

    for _ in 0..ID_ATTEMPTS {
        let poll = Poll {
            poll_id: generate_id("p", now, 12),
            admin_id: generate_id("a", now, 32),
            question: question.clone(),
            options: options.clone(),
            show_results: input.show_results,
            end_time: end_time.clone(),
            is_stopped: false,
            created_at: now,
        };

        match store.put(poll.clone()) {
            Ok(()) => return Ok(poll),
            Err(StoreError::DuplicateId) => {
                warn!("identifier collision creating poll, regenerating");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(PollError::Store(StoreError::DuplicateId))
}

pub fn apply_vote(
    store: &dyn PollStore,
    poll_id: &str,
    option_index: i64,
) -> Result<VoteOutcome, PollError> {
    let mut counted = false;
    let poll = store.mutate(poll_id, &mut |poll: &mut Poll| {
        if poll.is_stopped {
            return;
        }
        let slot = usize::try_from(option_index)
            .ok()
            .and_then(|i| poll.options.get_mut(i));
        if let Some(option) = slot {
            option.votes += 1;
            counted = true;
        }
    })?;

    Ok(if counted {
        VoteOutcome::Counted(poll)
    } else {
        VoteOutcome::Ignored(poll)
    })
}

/// Marks the poll behind `admin_id` as stopped. Stopping twice is not an error.
pub fn stop_poll(store: &dyn PollStore, admin_id: &str) -> Result<Poll, PollError> {
    let poll = store.get_by_admin_id(admin_id)?;
    if poll.is_stopped {
        return Ok(poll);
    }

    Ok(store.mutate(&poll.poll_id, &mut |record: &mut Poll| record.is_stopped = true)?)
}

pub fn voter_view(store: &dyn PollStore, poll_id: &str) -> Result<VoterView, PollError> {
    let poll = store.get_by_poll_id(poll_id)?;
    Ok(VoterView::from(&poll))
}

pub fn admin_view(store: &dyn PollStore, admin_id: &str) -> Result<Poll, PollError> {
    Ok(store.get_by_admin_id(admin_id)?)
}
