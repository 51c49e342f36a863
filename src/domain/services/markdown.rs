#[cfg(test)]
#[path = "markdown_test.rs"]
mod tests;

use once_cell::sync::Lazy;
use regex::Captures;
use regex::Regex;

use super::artifacts::FENCE;

static INLINE_CODE: Lazy<Regex> = Lazy::new(|| return Regex::new(r"`([^`\n]+)`").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| return Regex::new(r"\*\*(.+?)\*\*").unwrap());
// Single-asterisk spans with no asterisk inside, so leftover bold markers
// from a partially streamed `**` pair are never misread as italics.
static ITALIC: Lazy<Regex> = Lazy::new(|| return Regex::new(r"\*([^*\n]+)\*").unwrap());

/// Structured content parsed out of one message. Recomputed from scratch on
/// every chunk; parsing is cheap enough to run per chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkdownNode {
    CodeBlock { language: String, code: String },
    Code(String),
    Bold(Vec<MarkdownNode>),
    Italic(Vec<MarkdownNode>),
    Text(String),
    LineBreak,
    Cursor,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkdownDocument {
    pub nodes: Vec<MarkdownNode>,
}

/// Parses the narrow markdown subset the agent emits: fenced code blocks,
/// inline code, bold, italics, and literal line breaks, in that precedence
/// order. Each layer claims its matches and hands the unmatched spans to the
/// next layer down; code interiors are verbatim and never recursed into.
/// Partial markup at the tail of a growing stream falls through as plain
/// text until its closing marker arrives.
pub fn render_markdown(text: &str, is_streaming: bool) -> MarkdownDocument {
    let mut nodes = parse_blocks(text);
    if is_streaming {
        nodes.push(MarkdownNode::Cursor);
    }

    return MarkdownDocument { nodes };
}

/// Scans `text` left to right with one global pattern, alternating matched
/// nodes with the next layer's parse of everything outside the matches.
fn split_layer<M, R>(text: &str, pattern: &Regex, on_match: M, on_rest: R) -> Vec<MarkdownNode>
where
    M: Fn(&Captures) -> MarkdownNode,
    R: Fn(&str) -> Vec<MarkdownNode>,
{
    let mut nodes: Vec<MarkdownNode> = vec![];
    let mut cursor = 0;

    for caps in pattern.captures_iter(text) {
        let matched = caps.get(0).unwrap();
        if matched.start() > cursor {
            nodes.extend(on_rest(&text[cursor..matched.start()]));
        }
        nodes.push(on_match(&caps));
        cursor = matched.end();
    }

    if cursor < text.len() {
        nodes.extend(on_rest(&text[cursor..]));
    }

    return nodes;
}

fn parse_blocks(text: &str) -> Vec<MarkdownNode> {
    return split_layer(
        text,
        &FENCE,
        |caps| {
            let language = caps
                .get(1)
                .map(|m| return m.as_str().to_string())
                .unwrap_or_else(|| return "text".to_string());

            return MarkdownNode::CodeBlock {
                language,
                code: caps.get(2).unwrap().as_str().trim().to_string(),
            };
        },
        parse_inline_code,
    );
}

fn parse_inline_code(text: &str) -> Vec<MarkdownNode> {
    return split_layer(
        text,
        &INLINE_CODE,
        |caps| return MarkdownNode::Code(caps.get(1).unwrap().as_str().to_string()),
        parse_bold,
    );
}

fn parse_bold(text: &str) -> Vec<MarkdownNode> {
    return split_layer(
        text,
        &BOLD,
        |caps| return MarkdownNode::Bold(parse_italic(caps.get(1).unwrap().as_str())),
        parse_italic,
    );
}

fn parse_italic(text: &str) -> Vec<MarkdownNode> {
    return split_layer(
        text,
        &ITALIC,
        |caps| return MarkdownNode::Italic(parse_line_breaks(caps.get(1).unwrap().as_str())),
        parse_line_breaks,
    );
}

fn parse_line_breaks(text: &str) -> Vec<MarkdownNode> {
    let mut nodes: Vec<MarkdownNode> = vec![];
    for (idx, segment) in text.split('\n').enumerate() {
        if idx > 0 {
            nodes.push(MarkdownNode::LineBreak);
        }
        if !segment.is_empty() {
            nodes.push(MarkdownNode::Text(segment.to_string()));
        }
    }

    return nodes;
}
