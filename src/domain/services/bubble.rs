#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use syntect::easy::HighlightLines;
use syntect::highlighting::Theme;

use super::markdown::render_markdown;
use super::markdown::MarkdownNode;
use super::Syntaxes;
use super::SYNTAX_SET;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Message;
use crate::domain::models::Role;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
    codeblock_counter: usize,
}

pub struct BubbleConfig {
    pub bubble_padding: usize,
    pub border_elements_length: usize,
    pub outer_padding_percentage: f32,
}

fn span_width(span: &Span) -> usize {
    return span.content.chars().count();
}

fn repeat_from_subtractions(text: &str, subtractions: Vec<usize>) -> String {
    let count = subtractions
        .into_iter()
        .map(|e| {
            return i32::try_from(e).unwrap();
        })
        .reduce(|a, b| {
            return a - b;
        })
        .unwrap();

    if count <= 0 {
        return "".to_string();
    }

    return [text].repeat(count.try_into().unwrap()).join("");
}

fn inline_spans<'a>(node: MarkdownNode, style: Style) -> Vec<Span<'a>> {
    match node {
        MarkdownNode::Text(text) => return vec![Span::styled(text, style)],
        MarkdownNode::Code(code) => {
            return vec![Span::styled(code, style.fg(Color::Yellow))];
        }
        MarkdownNode::Bold(children) => {
            return children
                .into_iter()
                .flat_map(|child| {
                    return inline_spans(child, style.add_modifier(Modifier::BOLD));
                })
                .collect();
        }
        MarkdownNode::Italic(children) => {
            return children
                .into_iter()
                .flat_map(|child| {
                    return inline_spans(child, style.add_modifier(Modifier::ITALIC));
                })
                .collect();
        }
        // Block-level nodes are handled before inline rendering.
        _ => return vec![],
    }
}

impl<'a> Bubble<'_> {
    pub fn new(
        message: &'a Message,
        alignment: BubbleAlignment,
        window_max_width: usize,
        codeblock_counter: usize,
    ) -> Bubble {
        return Bubble {
            alignment,
            message,
            window_max_width,
            codeblock_counter,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // Unicode character border + padding.
            bubble_padding: 8,
            // left border + left padding + (text, not counted) + right padding + right border +
            // scrollbar.
            border_elements_length: 5,
            outer_padding_percentage: 0.04,
        };
    }

    pub fn as_lines(&mut self, theme: &Theme) -> Vec<Line<'a>> {
        let document = render_markdown(&self.message.content, self.message.is_streaming);
        let max_line_length = self.get_max_line_length();

        let mut raw_lines: Vec<Vec<Span<'a>>> = vec![];
        let mut current: Vec<Span<'a>> = vec![];

        for node in document.nodes {
            match node {
                MarkdownNode::LineBreak => {
                    raw_lines.push(std::mem::take(&mut current));
                }
                MarkdownNode::CodeBlock { language, code } => {
                    if !current.is_empty() {
                        raw_lines.push(std::mem::take(&mut current));
                    }
                    raw_lines.extend(self.codeblock_lines(&language, &code, theme));
                }
                MarkdownNode::Cursor => {
                    current.push(Span::styled(
                        "▌".to_string(),
                        Style::default().add_modifier(Modifier::SLOW_BLINK),
                    ));
                }
                inline => {
                    current.extend(inline_spans(inline, Style::default()));
                }
            }
        }
        raw_lines.push(current);

        let mut lines: Vec<Line<'a>> = vec![];
        for raw_line in raw_lines {
            for wrapped in self.wrap_spans(raw_line, max_line_length) {
                lines.push(self.spans_to_line(wrapped, max_line_length));
            }
        }

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    fn codeblock_lines(
        &mut self,
        language: &str,
        code: &str,
        theme: &Theme,
    ) -> Vec<Vec<Span<'a>>> {
        self.codeblock_counter += 1;
        let mut lines: Vec<Vec<Span<'a>>> = vec![vec![
            Span::from(format!("```{language}")),
            Span::styled(
                format!(" ({})", self.codeblock_counter),
                Style {
                    fg: Some(Color::White),
                    ..Style::default()
                },
            ),
        ]];

        let mut highlight = HighlightLines::new(Syntaxes::get(language), theme);
        for line in code.lines() {
            // Highlighting doesn't work accurately unless each line is postfixed with '\n',
            // especially when dealing with multi-line code comments.
            let line_nl = format!("{line}\n");
            match highlight.highlight_line(&line_nl, &SYNTAX_SET) {
                Ok(regions) => {
                    let spans = regions
                        .iter()
                        .enumerate()
                        .map(|(idx, segment)| {
                            let (style, content) = segment;
                            let mut text = content.to_string();
                            if idx == regions.len() - 1 {
                                text = text.trim_end().to_string();
                            }

                            return Span::styled(
                                text,
                                Style {
                                    fg: Syntaxes::translate_colour(style.foreground),
                                    ..Style::default()
                                },
                            );
                        })
                        .collect();

                    lines.push(spans);
                }
                Err(_) => {
                    lines.push(vec![Span::from(line.to_owned())]);
                }
            }
        }

        lines.push(vec![Span::from("```".to_string())]);
        return lines;
    }

    fn wrap_spans(&self, spans: Vec<Span<'a>>, max_line_length: usize) -> Vec<Vec<Span<'a>>> {
        let mut wrapped: Vec<Vec<Span<'a>>> = vec![];
        let mut line_spans: Vec<Span<'a>> = vec![];
        let mut line_char_count = 0;

        for span in spans {
            if span_width(&span) + line_char_count <= max_line_length {
                line_char_count += span_width(&span);
                line_spans.push(span);
                continue;
            }

            let mut word_set: Vec<&str> = vec![];
            for word in span.content.split(' ') {
                if word.chars().count() + line_char_count > max_line_length {
                    line_spans.push(Span::styled(word_set.join(" "), span.style));
                    wrapped.push(std::mem::take(&mut line_spans));

                    word_set = vec![];
                    line_char_count = 0;
                }

                word_set.push(word);
                line_char_count += word.chars().count() + 1;
            }

            line_spans.push(Span::styled(word_set.join(" "), span.style));
        }

        wrapped.push(line_spans);
        return wrapped;
    }

    fn spans_to_line(&self, mut spans: Vec<Span<'a>>, max_line_length: usize) -> Line<'a> {
        let line_str_len: usize = spans.iter().map(|e| return span_width(e)).sum();
        let fill = repeat_from_subtractions(" ", vec![max_line_length, line_str_len]);
        let formatted_line_length =
            line_str_len + fill.len() + Bubble::style_config().bubble_padding;

        let mut wrapped_spans = vec![self.highlight_span("│ ".to_string())];
        wrapped_spans.append(&mut spans);
        wrapped_spans.push(self.highlight_span(format!("{fill} │")));

        let outer_bubble_padding =
            repeat_from_subtractions(" ", vec![self.window_max_width, formatted_line_length]);

        if self.alignment == BubbleAlignment::Left {
            wrapped_spans.push(Span::from(outer_bubble_padding));
            return Line::from(wrapped_spans);
        }

        let mut line_spans = vec![Span::from(outer_bubble_padding)];
        line_spans.extend(wrapped_spans);

        return Line::from(line_spans);
    }

    fn get_max_line_length(&self) -> usize {
        let style_config = Bubble::style_config();
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        // Border elements + minimum bubble padding.
        let line_border_width = style_config.border_elements_length + min_bubble_padding_length;

        // An in-flight assistant placeholder may still be empty.
        let mut max_line_length = self
            .message
            .content
            .lines()
            .map(|line| {
                return line.chars().count();
            })
            .max()
            .unwrap_or(1);

        // The trailing stream cursor takes up a column of its own, so the
        // last content line must leave room for it.
        if self.message.is_streaming {
            max_line_length += 1;
        }

        // The window can be narrower than the border allowance before the
        // first draw sizes the chat rect, so never let the cap underflow.
        let width_cap = self
            .window_max_width
            .saturating_sub(line_border_width)
            .max(1);
        if max_line_length > width_cap {
            max_line_length = width_cap;
        }

        let author = self.author_label();
        if max_line_length < author.chars().count() {
            max_line_length = author.chars().count();
        }

        return max_line_length;
    }

    fn wrap_lines_in_bubble(&self, lines: Vec<Line<'a>>, max_line_length: usize) -> Vec<Line<'a>> {
        // Add 2 for the vertical bars.
        let inner_bar = ["─"].repeat(max_line_length + 2).join("");
        let top_left_border = "╭";
        let mut top_bar = format!("{top_left_border}{inner_bar}╮");
        let bottom_bar = format!("╰{inner_bar}╯");
        let bar_bubble_padding = repeat_from_subtractions(
            " ",
            vec![
                self.window_max_width,
                max_line_length,
                Bubble::style_config().bubble_padding,
            ],
        );

        let author = self.author_label();
        let top_replace = ["─"].repeat(author.chars().count()).join("");
        top_bar = top_bar.replace(
            format!("{top_left_border}{top_replace}").as_str(),
            format!("{top_left_border}{author}").as_str(),
        );

        if self.alignment == BubbleAlignment::Left {
            let mut res = vec![self.highlight_line(format!("{top_bar}{bar_bubble_padding}"))];
            res.extend(lines);
            res.push(self.highlight_line(format!("{bottom_bar}{bar_bubble_padding}")));
            return res;
        }

        let mut res = vec![self.highlight_line(format!("{bar_bubble_padding}{top_bar}"))];
        res.extend(lines);
        res.push(self.highlight_line(format!("{bar_bubble_padding}{bottom_bar}")));
        return res;
    }

    fn author_label(&self) -> String {
        match self.message.role {
            Role::User => return Config::get(ConfigKey::Username),
            Role::Assistant => return String::from("Agent"),
            Role::App => return String::from("Flapjack"),
        }
    }

    fn highlight_span(&self, text: String) -> Span<'a> {
        if self.message.role != Role::User {
            return Span::styled(
                text,
                Style {
                    fg: Some(Color::Rgb(94, 129, 172)),
                    ..Style::default()
                },
            );
        }

        return Span::from(text);
    }

    fn highlight_line(&self, text: String) -> Line<'a> {
        return Line::from(self.highlight_span(text));
    }
}
