use tui_textarea::Input;

use super::CodeArtifact;

/// Everything the UI loop reacts to: typed events from the agent stream in
/// strict arrival order, worker notices, and keyboard/terminal input.
pub enum Event {
    StreamContent(String),
    StreamArtifact(CodeArtifact),
    StreamDone,
    StreamError(String),
    Notice(String),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    PanelToggle(),
    PanelViewToggle(),
    UITick(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
}
