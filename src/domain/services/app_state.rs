#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use syntect::highlighting::Theme;

use super::artifacts;
use super::BubbleList;
use super::Conversation;
use super::Panel;
use super::Scroll;
use super::Themes;
use crate::domain::models::BackendPrompt;
use crate::domain::models::CodeArtifact;

// UITick fires every 500ms, so four ticks keeps a notice up for roughly
// two seconds.
const NOTICE_TICKS: u8 = 4;

/// Everything the UI task owns: the conversation, the artifact panel, the
/// render caches, and the transient status notice. All mutation happens on
/// the UI task so event ordering is the same as arrival ordering.
pub struct AppState<'a> {
    pub conversation: Conversation,
    pub panel: Panel,
    pub artifacts: Vec<CodeArtifact>,
    pub bubble_list: BubbleList<'a>,
    pub scroll: Scroll,
    pub theme: Theme,
    pub notice: Option<String>,
    notice_ticks: u8,
    pub last_known_height: u16,
    pub last_known_width: u16,
}

impl<'a> AppState<'a> {
    pub fn new(theme_name: &str, theme_file: &str) -> Result<AppState<'a>> {
        let theme = Themes::get(theme_name, theme_file)?;

        return Ok(AppState {
            conversation: Conversation::default(),
            panel: Panel::default(),
            artifacts: vec![],
            bubble_list: BubbleList::new(theme.clone()),
            scroll: Scroll::default(),
            theme,
            notice: None,
            notice_ticks: 0,
            last_known_height: 0,
            last_known_width: 0,
        });
    }

    pub fn set_chat_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    pub fn submit(&mut self, text: &str) -> Option<BackendPrompt> {
        let prompt = self.conversation.submit(text);
        if prompt.is_some() {
            self.sync_dependants();
            self.scroll.last();
        }

        return prompt;
    }

    pub fn add_app_message(&mut self, content: &str) {
        self.conversation.add_app_message(content);
        self.sync_dependants();
        self.scroll.last();
    }

    pub fn handle_content(&mut self, chunk: &str) {
        self.conversation.handle_content(chunk);
        self.sync_dependants();
    }

    /// A structured artifact arriving mid-stream is stored and immediately
    /// published to the panel, superseding whatever was shown.
    pub fn handle_artifact(&mut self, artifact: CodeArtifact) {
        self.panel.publish(artifact.clone());
        self.artifacts.push(artifact);
        self.sync_dependants();
    }

    pub fn handle_done(&mut self) {
        self.conversation.handle_done();
        self.sync_dependants();
    }

    pub fn handle_error(&mut self, err: &str) {
        self.conversation.handle_error(err);
        self.sync_dependants();
    }

    /// Fenced blocks across the whole conversation, numbered the way the
    /// chat tags them. One-based command indices resolve against this list
    /// so they always match what is on screen.
    pub fn display_artifacts(&self) -> Vec<CodeArtifact> {
        return artifacts::conversation_artifacts(&self.conversation.messages);
    }

    /// Fallback for agents that never emit `code` events: re-extract fenced
    /// blocks from the latest completed assistant message and show the
    /// newest one. Repeat runs are idempotent; the blocks themselves stay
    /// addressable through `display_artifacts`.
    pub fn rescan_artifacts(&mut self) -> usize {
        let found = match self.conversation.latest_completed_assistant() {
            Some(message) => artifacts::extract_artifacts(&message.content),
            None => vec![],
        };

        let count = found.len();
        if let Some(last) = found.into_iter().last() {
            self.panel.publish(last);
        }

        return count;
    }

    pub fn set_notice(&mut self, text: &str) {
        self.notice = Some(text.to_string());
        self.notice_ticks = NOTICE_TICKS;
    }

    pub fn tick(&mut self) {
        if self.notice.is_none() {
            return;
        }

        self.notice_ticks = self.notice_ticks.saturating_sub(1);
        if self.notice_ticks == 0 {
            self.notice = None;
        }
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_messages(&self.conversation.messages, self.last_known_width as usize);

        self.scroll
            .set_state(self.bubble_list.len() as u16, self.last_known_height);

        if self.conversation.is_loading {
            self.scroll.last();
        }
    }
}
