use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Message;

/// One `{role, content}` pair from the prior conversation, stripped of ids
/// and timestamps as the wire contract requires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub role: String,
    pub content: String,
}

impl From<&Message> for HistoryMessage {
    fn from(message: &Message) -> HistoryMessage {
        return HistoryMessage {
            role: message.role.as_str().to_string(),
            content: message.content.to_string(),
        };
    }
}

/// A single chat turn request handed to the agent client.
pub struct BackendPrompt {
    pub message: String,
    pub conversation_history: Vec<HistoryMessage>,
}

impl BackendPrompt {
    pub fn new(message: String, conversation_history: Vec<HistoryMessage>) -> BackendPrompt {
        return BackendPrompt {
            message,
            conversation_history,
        };
    }
}
