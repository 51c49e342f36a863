use super::Panel;
use super::PanelView;
use crate::domain::models::CodeArtifact;

fn artifact(language: &str, code: &str) -> CodeArtifact {
    return CodeArtifact::new(language, code, None);
}

#[test]
fn it_starts_closed() {
    let panel = Panel::default();
    assert!(!panel.is_open);
    assert!(panel.current_artifact.is_none());
    assert_eq!(panel.active_view, PanelView::Code);
}

#[test]
fn it_opens_with_an_artifact() {
    let mut panel = Panel::default();
    let a = artifact("jsx", "const App = () => null;");

    panel.open(a.clone());

    assert!(panel.is_open);
    assert_eq!(panel.current_artifact.as_ref().unwrap().id, a.id);
    assert_eq!(panel.active_view, PanelView::Code);
}

#[test]
fn it_clears_the_artifact_on_close() {
    let mut panel = Panel::default();
    panel.open(artifact("html", "<p>hi</p>"));
    panel.close();

    assert!(!panel.is_open);
    assert!(panel.current_artifact.is_none());
}

#[test]
fn it_closes_when_toggled_with_the_same_artifact() {
    let mut panel = Panel::default();
    let a = artifact("jsx", "const App = () => null;");

    panel.toggle(Some(a.clone()));
    assert!(panel.is_open);

    panel.toggle(Some(a));
    assert!(!panel.is_open);
    assert!(panel.current_artifact.is_none());
}

#[test]
fn it_swaps_artifacts_and_resets_the_view() {
    let mut panel = Panel::default();
    let a = artifact("jsx", "const App = () => null;");
    let b = artifact("css", ".btn { color: red; }");

    panel.toggle(Some(a));
    panel.set_view(PanelView::Preview);

    panel.toggle(Some(b.clone()));

    assert!(panel.is_open);
    assert_eq!(panel.current_artifact.as_ref().unwrap().id, b.id);
    assert_eq!(panel.active_view, PanelView::Code);
}

#[test]
fn it_treats_a_toggle_without_payload_as_close() {
    let mut panel = Panel::default();
    panel.open(artifact("html", "<p>hi</p>"));

    panel.toggle(None);
    assert!(!panel.is_open);
    assert!(panel.current_artifact.is_none());

    // And while closed it's a no-op, never an open-with-nothing.
    panel.toggle(None);
    assert!(!panel.is_open);
    assert!(panel.current_artifact.is_none());
}

#[test]
fn it_publishes_a_superseding_artifact() {
    let mut panel = Panel::default();
    let a = artifact("jsx", "const App = () => null;");
    let b = artifact("jsx", "const Counter = () => null;");

    panel.publish(a);
    panel.set_view(PanelView::Preview);
    panel.publish(b.clone());

    assert!(panel.is_open);
    assert_eq!(panel.current_artifact.as_ref().unwrap().id, b.id);
    assert_eq!(panel.active_view, PanelView::Code);
}

#[test]
fn it_toggles_the_view() {
    let mut panel = Panel::default();
    panel.open(artifact("html", "<p>hi</p>"));

    panel.toggle_view();
    assert_eq!(panel.active_view, PanelView::Preview);
    panel.toggle_view();
    assert_eq!(panel.active_view, PanelView::Code);
}
