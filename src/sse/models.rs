use crate::db::Poll;
use serde::Serialize;
use serde_json::json;

/// State change fanned out to every connected observer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum PollEvent {
    #[serde(rename = "pollUpdate")]
    PollUpdated(Poll),
    #[serde(rename = "pollStopped")]
    PollStopped(String),
}

impl PollEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PollEvent::PollUpdated(_) => "pollUpdate",
            PollEvent::PollStopped(_) => "pollStopped",
        }
    }

    /// SSE payload: the record as JSON, or the bare poll id for a stop.
    pub fn sse_data(&self) -> String {
        match self {
            PollEvent::PollUpdated(poll) => json!(poll).to_string(),
            PollEvent::PollStopped(poll_id) => poll_id.clone(),
        }
    }

    pub fn poll_id(&self) -> &str {
        match self {
            PollEvent::PollUpdated(poll) => &poll.poll_id,
            PollEvent::PollStopped(poll_id) => poll_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::PollOption;
    use chrono::Utc;

    #[test]
    fn frames_follow_socket_event_names() {
        let stopped = serde_json::to_value(PollEvent::PollStopped("p_9".to_string())).unwrap();
        assert_eq!(stopped, json!({"event": "pollStopped", "data": "p_9"}));
        assert_eq!(PollEvent::PollStopped("p_9".to_string()).sse_data(), "p_9");

        let poll = Poll {
            poll_id: "p_9".to_string(),
            admin_id: "a_9".to_string(),
            question: "Q?".to_string(),
            options: vec![PollOption {
                text: "yes".to_string(),
                votes: 1,
            }],
            show_results: true,
            end_time: None,
            is_stopped: false,
            created_at: Utc::now(),
        };
        let updated = PollEvent::PollUpdated(poll);
        let frame = serde_json::to_value(&updated).unwrap();

        assert_eq!(frame["event"], updated.name());
        assert_eq!(frame["data"]["pollId"], "p_9");
        assert_eq!(frame["data"]["options"][0]["votes"], 1);
        assert_eq!(updated.poll_id(), "p_9");
        let data: serde_json::Value = serde_json::from_str(&updated.sse_data()).unwrap();
        assert_eq!(data["adminId"], "a_9");
    }
}
