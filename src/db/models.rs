use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The stored poll record. Serialized as-is this is the admin view, so it
/// must never be handed to a voter-facing route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub poll_id: String,
    pub admin_id: String,
    pub question: String,
    pub options: Vec<PollOption>,
    pub show_results: bool,
    pub end_time: Option<String>,
    pub is_stopped: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub text: String,
    pub votes: u64,
}

/// Projection served to anonymous participants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterView {
    pub poll_id: String,
    pub question: String,
    pub options: Vec<PollOption>,
    pub show_results: bool,
    pub end_time: Option<String>,
    pub is_stopped: bool,
}

impl From<&Poll> for VoterView {
    fn from(poll: &Poll) -> Self {
        VoterView {
            poll_id: poll.poll_id.clone(),
            question: poll.question.clone(),
            options: poll.options.clone(),
            show_results: poll.show_results,
            end_time: poll.end_time.clone(),
            is_stopped: poll.is_stopped,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPoll {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub show_results: bool,
    #[serde(default)]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPoll {
    pub poll_id: String,
    pub admin_id: String,
}

impl From<&Poll> for CreatedPoll {
    fn from(poll: &Poll) -> Self {
        CreatedPoll {
            poll_id: poll.poll_id.clone(),
            admin_id: poll.admin_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(is_stopped: bool) -> Poll {
        Poll {
            poll_id: "p_1".to_string(),
            admin_id: "a_1secret".to_string(),
            question: "Tea or coffee?".to_string(),
            options: vec![
                PollOption {
                    text: "Tea".to_string(),
                    votes: 3,
                },
                PollOption {
                    text: "Coffee".to_string(),
                    votes: 0,
                },
            ],
            show_results: true,
            end_time: None,
            is_stopped,
            created_at: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
        }
    }

    #[test]
    fn voter_view_never_carries_admin_id() {
        for stopped in [false, true] {
            let poll = sample(stopped);
            let json = serde_json::to_value(VoterView::from(&poll)).unwrap();
            let object = json.as_object().unwrap();

            assert!(!object.contains_key("adminId"));
            assert!(!json.to_string().contains("a_1secret"));
            assert_eq!(object["isStopped"], stopped);
            assert!(!object.contains_key("createdAt"));
        }
    }

    #[test]
    fn admin_shape_uses_camel_case_and_millis() {
        let json = serde_json::to_value(sample(false)).unwrap();

        assert_eq!(json["pollId"], "p_1");
        assert_eq!(json["adminId"], "a_1secret");
        assert_eq!(json["showResults"], true);
        assert!(json["endTime"].is_null());
        assert_eq!(json["createdAt"], 1_700_000_000_123i64);
        assert_eq!(json["options"][0]["votes"], 3);
    }

    #[test]
    fn new_poll_fields_are_optional_on_the_wire() {
        let poll: NewPoll = serde_json::from_str(r#"{"question":"Q?"}"#).unwrap();

        assert_eq!(poll.question, "Q?");
        assert!(poll.options.is_empty());
        assert!(!poll.show_results);
        assert!(poll.end_time.is_none());
    }
}
