use super::render_markdown;
use super::MarkdownNode;

fn text(content: &str) -> MarkdownNode {
    return MarkdownNode::Text(content.to_string());
}

#[test]
fn it_passes_plain_text_through() {
    let doc = render_markdown("Hello world", false);
    assert_eq!(doc.nodes, vec![text("Hello world")]);
}

#[test]
fn it_splits_line_breaks() {
    let doc = render_markdown("one\ntwo", false);
    assert_eq!(
        doc.nodes,
        vec![text("one"), MarkdownNode::LineBreak, text("two")]
    );
}

#[test]
fn it_keeps_empty_lines_as_breaks() {
    let doc = render_markdown("one\n\ntwo", false);
    assert_eq!(
        doc.nodes,
        vec![
            text("one"),
            MarkdownNode::LineBreak,
            MarkdownNode::LineBreak,
            text("two")
        ]
    );
}

#[test]
fn it_parses_bold() {
    let doc = render_markdown("a **bold** word", false);
    assert_eq!(
        doc.nodes,
        vec![
            text("a "),
            MarkdownNode::Bold(vec![text("bold")]),
            text(" word")
        ]
    );
}

#[test]
fn it_parses_italic() {
    let doc = render_markdown("an *italic* word", false);
    assert_eq!(
        doc.nodes,
        vec![
            text("an "),
            MarkdownNode::Italic(vec![text("italic")]),
            text(" word")
        ]
    );
}

#[test]
fn it_parses_italic_inside_bold() {
    let doc = render_markdown("**outer *inner* text**", false);
    assert_eq!(
        doc.nodes,
        vec![MarkdownNode::Bold(vec![
            text("outer "),
            MarkdownNode::Italic(vec![text("inner")]),
            text(" text")
        ])]
    );
}

#[test]
fn it_does_not_read_bold_markers_as_italic() {
    let doc = render_markdown("**bold** and *italic*", false);
    assert_eq!(
        doc.nodes,
        vec![
            MarkdownNode::Bold(vec![text("bold")]),
            text(" and "),
            MarkdownNode::Italic(vec![text("italic")]),
        ]
    );
}

#[test]
fn it_keeps_inline_code_verbatim() {
    let doc = render_markdown("run `cargo **test**` now", false);
    assert_eq!(
        doc.nodes,
        vec![
            text("run "),
            MarkdownNode::Code("cargo **test**".to_string()),
            text(" now")
        ]
    );
}

#[test]
fn it_parses_fenced_code_blocks() {
    let doc = render_markdown("before\n```js\nconsole.log(1)\n```\nafter", false);
    assert_eq!(
        doc.nodes,
        vec![
            text("before"),
            MarkdownNode::LineBreak,
            MarkdownNode::CodeBlock {
                language: "js".to_string(),
                code: "console.log(1)".to_string(),
            },
            MarkdownNode::LineBreak,
            text("after")
        ]
    );
}

#[test]
fn it_never_formats_a_fence_interior() {
    let doc = render_markdown("```text\n**not bold** and *not italic*\n```", false);
    assert_eq!(
        doc.nodes,
        vec![MarkdownNode::CodeBlock {
            language: "text".to_string(),
            code: "**not bold** and *not italic*".to_string(),
        }]
    );
}

#[test]
fn it_leaves_an_unterminated_fence_as_text() {
    // A growing stream ends mid-fence; earlier segments must be untouched
    // and the partial fence stays plain text until the closing fence lands.
    let doc = render_markdown("done part\n```rust\nfn main() {", true);
    assert_eq!(
        doc.nodes,
        vec![
            text("done part"),
            MarkdownNode::LineBreak,
            text("```rust"),
            MarkdownNode::LineBreak,
            text("fn main() {"),
            MarkdownNode::Cursor,
        ]
    );
}

#[test]
fn it_leaves_unterminated_bold_as_text() {
    let doc = render_markdown("**almost bold", false);
    assert_eq!(doc.nodes, vec![text("**almost bold")]);
}

#[test]
fn it_appends_a_cursor_while_streaming() {
    let doc = render_markdown("Hi", true);
    assert_eq!(doc.nodes, vec![text("Hi"), MarkdownNode::Cursor]);

    let done = render_markdown("Hi", false);
    assert_eq!(done.nodes, vec![text("Hi")]);
}
