#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use crate::domain::models::BackendPrompt;
use crate::domain::models::HistoryMessage;
use crate::domain::models::Message;
use crate::domain::models::Role;

/// The conversation state machine. One instance lives for the whole app
/// session; all mutation happens on the UI task, in stream arrival order.
///
/// A turn goes Idle -> Streaming on `submit`, and back to Idle on either
/// `handle_done` (the only normal exit) or `handle_error` (which removes the
/// dangling assistant placeholder so no message is ever left visibly stuck
/// in a streaming state).
#[derive(Default)]
pub struct Conversation {
    pub messages: Vec<Message>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Conversation {
    /// Starts a turn. Returns the prompt to hand to the agent client, or
    /// None when the input is empty or a turn is already in flight.
    pub fn submit(&mut self, text: &str) -> Option<BackendPrompt> {
        if text.trim().is_empty() || self.is_loading {
            return None;
        }

        let history = self
            .messages
            .iter()
            .filter(|message| return message.role != Role::App)
            .map(|message| return HistoryMessage::from(message))
            .collect::<Vec<HistoryMessage>>();

        self.messages.push(Message::new(Role::User, text));
        self.messages.push(Message::new_streaming(Role::Assistant));
        self.is_loading = true;
        self.error = None;

        return Some(BackendPrompt::new(text.to_string(), history));
    }

    /// Local app output such as the help menu. Shown in the chat, kept out
    /// of the history sent to the agent.
    pub fn add_app_message(&mut self, content: &str) {
        self.messages.push(Message::new(Role::App, content));
    }

    /// Appends a `content` chunk to the in-flight assistant message.
    pub fn handle_content(&mut self, chunk: &str) {
        if let Some(last) = self.messages.last_mut() {
            if last.is_streaming {
                last.append(chunk);
                return;
            }
        }

        tracing::warn!(chunk = chunk, "Dropped content chunk with no streaming message");
    }

    /// Finalizes the turn: the assistant message keeps the accumulated
    /// buffer as its final content.
    pub fn handle_done(&mut self) {
        if let Some(last) = self.messages.last_mut() {
            if last.is_streaming {
                last.finalize();
            }
        }
        self.is_loading = false;
    }

    /// Transport failure: record the error and delete the in-flight
    /// placeholder entirely.
    pub fn handle_error(&mut self, err: &str) {
        if let Some(last) = self.messages.last() {
            if last.is_streaming {
                self.messages.pop();
            }
        }
        self.error = Some(err.to_string());
        self.is_loading = false;
    }

    /// The most recent assistant message that has finished streaming. Used
    /// by the lazy client-side artifact rescan.
    pub fn latest_completed_assistant(&self) -> Option<&Message> {
        return self
            .messages
            .iter()
            .rev()
            .find(|message| return message.role == Role::Assistant && !message.is_streaming);
    }
}
