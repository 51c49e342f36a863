use super::AppState;
use crate::domain::models::CodeArtifact;
use crate::domain::services::PanelView;

fn state() -> AppState<'static> {
    return AppState::new("base16-ocean.dark", "").unwrap();
}

#[test]
fn it_runs_a_full_turn() {
    let mut state = state();

    let prompt = state.submit("Write me a counter").unwrap();
    assert_eq!(prompt.message, "Write me a counter");
    assert!(state.conversation.is_loading);

    state.handle_content("Here you ");
    state.handle_content("go.");
    state.handle_done();

    assert!(!state.conversation.is_loading);
    let last = state.conversation.messages.last().unwrap();
    assert_eq!(last.content, "Here you go.");
    assert!(!last.is_streaming);
}

#[test]
fn it_publishes_stream_artifacts_to_the_panel() {
    let mut state = state();
    state.submit("counter please");

    let artifact = CodeArtifact::new("jsx", "const App = () => null;", None);
    let id = artifact.id;
    state.handle_artifact(artifact);

    assert!(state.panel.is_open);
    assert_eq!(state.panel.active_view, PanelView::Code);
    assert_eq!(state.panel.current_artifact.as_ref().unwrap().id, id);
    assert_eq!(state.artifacts.len(), 1);
}

#[test]
fn it_rescans_fenced_blocks_from_the_last_completed_message() {
    let mut state = state();
    state.submit("two blocks please");
    state.handle_content("```python\nprint(1)\n```\n\n```javascript\nconsole.log(2);\n```");
    state.handle_done();

    let count = state.rescan_artifacts();

    assert_eq!(count, 2);
    assert!(state.panel.is_open);
    assert_eq!(
        state.panel.current_artifact.as_ref().unwrap().language,
        "javascript"
    );

    // Repeat runs find the same blocks and leave the stream store alone.
    assert_eq!(state.rescan_artifacts(), 2);
    assert!(state.artifacts.is_empty());
    assert_eq!(state.display_artifacts().len(), 2);
}

#[test]
fn it_matches_command_indices_to_the_chat_tags() {
    let mut state = state();
    state.submit("first");
    state.handle_content("```python\nprint(1)\n```");
    state.handle_done();
    state.submit("second");
    state.handle_content("```javascript\nconsole.log(2);\n```");
    state.handle_done();

    state.rescan_artifacts();

    // The chat tags these (1) and (2); index 2 must reach the second one.
    let artifacts = state.display_artifacts();
    assert_eq!(artifacts.len(), 2);
    assert_eq!(artifacts[0].language, "python");
    assert_eq!(artifacts[1].language, "javascript");
    assert_eq!(artifacts[1].filename.as_deref(), Some("javascript_2.js"));
}

#[test]
fn it_finds_nothing_to_rescan_mid_stream() {
    let mut state = state();
    state.submit("anything");
    state.handle_content("```python\nprint(1)\n```");

    assert_eq!(state.rescan_artifacts(), 0);
    assert!(!state.panel.is_open);
}

#[test]
fn it_drops_the_placeholder_on_stream_error() {
    let mut state = state();
    state.submit("anything");
    state.handle_content("partial");
    state.handle_error("connection reset");

    assert_eq!(state.conversation.messages.len(), 1);
    assert_eq!(
        state.conversation.error.as_deref(),
        Some("connection reset")
    );
}

#[test]
fn it_expires_notices_after_a_few_ticks() {
    let mut state = state();
    state.set_notice("Copied to clipboard");
    assert!(state.notice.is_some());

    for _ in 0..4 {
        state.tick();
    }

    assert!(state.notice.is_none());
}
