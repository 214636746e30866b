use serde::{Deserialize, Serialize};

/// One turn of conversation with the tutor. Immutable once appended to a
/// user's history.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Exchange {
    pub speaker_label: String,
    pub user_message: String,
    pub assistant_response: String,
}

impl Exchange {
    pub fn new(speaker_label: &str, user_message: &str, assistant_response: &str) -> Self {
        Exchange {
            speaker_label: speaker_label.to_string(),
            user_message: user_message.to_string(),
            assistant_response: assistant_response.to_string(),
        }
    }
}

/// Per-user chat history document. One document per user; exchanges are
/// appended in chronological order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatHistory {
    pub user_id: String,
    pub history: Vec<Exchange>,
}

impl ChatHistory {
    pub fn empty(user_id: &str) -> Self {
        ChatHistory {
            user_id: user_id.to_string(),
            history: Vec::new(),
        }
    }
}
