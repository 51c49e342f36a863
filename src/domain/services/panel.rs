#[cfg(test)]
#[path = "panel_test.rs"]
mod tests;

use crate::domain::models::CodeArtifact;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PanelView {
    #[default]
    Code,
    Preview,
}

/// The artifact panel state machine. Knows nothing about where artifacts
/// come from; it only tracks which one is displayed and in which view.
///
/// Invariant: `current_artifact == None` implies the panel is closed. A
/// toggle with no payload while open is treated as a close, so the
/// invariant holds on every path.
#[derive(Default)]
pub struct Panel {
    pub is_open: bool,
    pub active_view: PanelView,
    pub current_artifact: Option<CodeArtifact>,
}

impl Panel {
    pub fn open(&mut self, artifact: CodeArtifact) {
        self.is_open = true;
        self.current_artifact = Some(artifact);
        self.active_view = PanelView::Code;
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.current_artifact = None;
    }

    /// Same artifact while open closes the panel; anything else opens it
    /// with the payload, resetting the view to Code.
    pub fn toggle(&mut self, artifact: Option<CodeArtifact>) {
        let same_artifact = match (&self.current_artifact, &artifact) {
            (Some(current), Some(next)) => current.id == next.id,
            _ => artifact.is_none(),
        };

        if self.is_open && same_artifact {
            self.close();
            return;
        }

        match artifact {
            Some(artifact) => self.open(artifact),
            None => {}
        }
    }

    /// A new artifact arriving mid-stream supersedes whatever is shown and
    /// opens the panel.
    pub fn publish(&mut self, artifact: CodeArtifact) {
        self.open(artifact);
    }

    pub fn set_view(&mut self, view: PanelView) {
        self.active_view = view;
    }

    pub fn toggle_view(&mut self) {
        self.active_view = match self.active_view {
            PanelView::Code => PanelView::Preview,
            PanelView::Preview => PanelView::Code,
        };
    }
}
