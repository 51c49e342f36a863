#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use std::time::SystemTime;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use uuid::Uuid;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
    // Local app output such as the help menu. Never sent to the agent.
    App,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => return "user",
            Role::Assistant => return "assistant",
            Role::App => return "app",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: SystemTime,
    pub is_streaming: bool,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Message {
        return Message {
            id: Uuid::new_v4(),
            role,
            content: content.to_string().replace('\t', "  "),
            timestamp: SystemTime::now(),
            is_streaming: false,
        };
    }

    /// An empty assistant placeholder that grows as stream chunks arrive.
    pub fn new_streaming(role: Role) -> Message {
        let mut message = Message::new(role, "");
        message.is_streaming = true;
        return message;
    }

    pub fn append(&mut self, content: &str) {
        self.content += &content.replace('\t', "  ");
    }

    pub fn finalize(&mut self) {
        self.is_streaming = false;
    }
}
