use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use syntect::easy::HighlightLines;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::CodeArtifact;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::SlashCommand;
use crate::domain::models::TextArea;
use crate::domain::services::actions::help_text;
use crate::domain::services::events::EventsService;
use crate::domain::services::preview;
use crate::domain::services::AppState;
use crate::domain::services::PanelView;
use crate::domain::services::Syntaxes;
use crate::domain::services::SYNTAX_SET;

const WELCOME: &str = r#"
Welcome to Flapjack!

Ask the agent to build something, and any code it writes back
lands in the artifact panel on the right.

- /help lists every command and hotkey.
- CTRL+A toggles the artifact panel.
- CTRL+P flips the panel between code and preview.
"#;

fn welcome_paragraph<'a>() -> Paragraph<'a> {
    return Paragraph::new(WELCOME.trim())
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);
}

fn panel_code_lines<'a>(
    artifact: &CodeArtifact,
    theme: &syntect::highlighting::Theme,
) -> Vec<Line<'a>> {
    let mut highlight = HighlightLines::new(Syntaxes::get(&artifact.language), theme);
    let mut lines: Vec<Line<'a>> = vec![];

    for line in artifact.code.lines() {
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
                    .collect::<Vec<Span<'a>>>();

                lines.push(Line::from(spans));
            }
            Err(_) => {
                lines.push(Line::from(line.to_owned()));
            }
        }
    }

    return lines;
}

fn panel_preview_lines<'a>(artifact: &CodeArtifact) -> Vec<Line<'a>> {
    let mut lines = vec![];

    if preview::is_previewable(&artifact.language) {
        lines.push(Line::from(format!(
            "This {} artifact can be previewed live.",
            artifact.language
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(
            "Run /preview to render it and open it in your browser.",
        ));
    } else {
        lines.push(Line::from(format!(
            "Live preview is not available for {} code.",
            artifact.language
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(
            "Supported languages are HTML, CSS, JavaScript, JSX, TSX, and React.",
        ));
    }

    return lines;
}

fn render_panel<B: Backend>(frame: &mut Frame<'_, B>, rect: Rect, app_state: &AppState<'_>) {
    let artifact = match app_state.panel.current_artifact.as_ref() {
        Some(artifact) => artifact,
        None => return,
    };

    let title = artifact
        .filename
        .clone()
        .unwrap_or_else(|| return format!("{} artifact", artifact.language));

    let view_label = match app_state.panel.active_view {
        PanelView::Code => "code",
        PanelView::Preview => "preview",
    };

    let lines = match app_state.panel.active_view {
        PanelView::Code => panel_code_lines(artifact, &app_state.theme),
        PanelView::Preview => panel_preview_lines(artifact),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} ({view_label}) "));

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        rect,
    );
}

fn status_line<'a>(app_state: &AppState<'_>) -> Line<'a> {
    if let Some(err) = app_state.conversation.error.as_ref() {
        return Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        ));
    }

    if let Some(notice) = app_state.notice.as_ref() {
        return Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Green),
        ));
    }

    return Line::from(Span::styled(
        "/help for commands".to_string(),
        Style::default().fg(Color::DarkGray),
    ));
}

/// Picks the artifact a slash command refers to. An explicit one-based
/// index resolves against the conversation's fenced blocks in display
/// order, so `/copy 2` always means the block tagged (2) on screen. With
/// no argument, the latest streamed artifact wins, falling back to the
/// last block in the chat.
fn artifact_from_command(
    app_state: &AppState<'_>,
    command: &SlashCommand,
) -> Option<CodeArtifact> {
    if let Some(arg) = command.args.first() {
        if let Ok(idx) = arg.parse::<usize>() {
            if idx >= 1 {
                return app_state.display_artifacts().into_iter().nth(idx - 1);
            }
        }
        return None;
    }

    if let Some(artifact) = app_state.artifacts.last() {
        return Some(artifact.clone());
    }

    return app_state.display_artifacts().pop();
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState<'_>,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let loading = Loading::default();

    loop {
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Min(1),
                    Constraint::Max(1),
                    Constraint::Max(4),
                ])
                .split(frame.size());

            let mut chat_rect = layout[0];
            if app_state.panel.is_open {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints(vec![Constraint::Percentage(60), Constraint::Percentage(40)])
                    .split(layout[0]);

                chat_rect = columns[0];
                render_panel(frame, columns[1], app_state);
            }

            if chat_rect.width != app_state.last_known_width
                || chat_rect.height != app_state.last_known_height
            {
                app_state.set_chat_rect(chat_rect);
            }

            if app_state.conversation.messages.is_empty() {
                frame.render_widget(welcome_paragraph(), chat_rect);
            } else {
                app_state
                    .bubble_list
                    .render(frame, chat_rect, app_state.scroll.position as usize);
                frame.render_stateful_widget(
                    Scrollbar::new(ScrollbarOrientation::VerticalRight),
                    chat_rect.inner(&Margin {
                        vertical: 1,
                        horizontal: 0,
                    }),
                    &mut app_state.scroll.scrollbar_state,
                );
            }

            frame.render_widget(Paragraph::new(status_line(app_state)), layout[1]);

            if app_state.conversation.is_loading {
                loading.render(frame, layout[2]);
            } else {
                frame.render_widget(textarea.widget(), layout[2]);
            }
        })?;

        match events.next().await? {
            Event::StreamContent(chunk) => {
                app_state.handle_content(&chunk);
            }
            Event::StreamArtifact(artifact) => {
                app_state.handle_artifact(artifact);
            }
            Event::StreamDone => {
                app_state.handle_done();
            }
            Event::StreamError(err) => {
                app_state.handle_error(&err);
            }
            Event::Notice(text) => {
                app_state.set_notice(&text);
            }
            Event::UITick() => {
                app_state.tick();
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::PanelToggle() => {
                let latest = app_state
                    .artifacts
                    .last()
                    .cloned()
                    .or_else(|| return app_state.display_artifacts().pop());
                app_state.panel.toggle(latest);
            }
            Event::PanelViewToggle() => {
                if app_state.panel.is_open {
                    app_state.panel.toggle_view();
                }
            }
            Event::KeyboardCTRLC() => {
                if !app_state.conversation.is_loading {
                    break;
                }

                tx.send(Action::BackendAbort())?;
                app_state.handle_done();
                app_state.set_notice("Interrupted waiting for the agent.");
            }
            Event::KeyboardPaste(text) => {
                textarea.set_yank_text(text.replace('\r', "\n"));
                textarea.paste();
            }
            Event::KeyboardCharInput(input) => {
                if !app_state.conversation.is_loading {
                    textarea.input(input);
                }
            }
            Event::KeyboardEnter() => {
                if app_state.conversation.is_loading {
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                if input_str.trim().is_empty() {
                    continue;
                }

                textarea = TextArea::default();

                if let Some(command) = SlashCommand::parse(&input_str) {
                    if command.is_quit() {
                        break;
                    }

                    if command.is_help() {
                        app_state.add_app_message(&help_text());
                        continue;
                    }

                    if command.is_artifact() {
                        let count = app_state.rescan_artifacts();
                        if count == 0 {
                            app_state.set_notice("No code blocks found in the latest reply.");
                        } else {
                            app_state.set_notice(&format!("Found {count} code block(s)."));
                        }
                        continue;
                    }

                    if command.is_copy() {
                        match artifact_from_command(app_state, &command) {
                            Some(artifact) => {
                                tx.send(Action::CopyText(artifact.code))?;
                            }
                            None => {
                                app_state.set_notice("There is no artifact to copy.");
                            }
                        }
                        continue;
                    }

                    if command.is_download() {
                        match artifact_from_command(app_state, &command) {
                            Some(artifact) => {
                                tx.send(Action::SaveArtifact(artifact))?;
                            }
                            None => {
                                app_state.set_notice("There is no artifact to download.");
                            }
                        }
                        continue;
                    }

                    if command.is_preview() {
                        let artifact = app_state
                            .panel
                            .current_artifact
                            .clone()
                            .or_else(|| return app_state.artifacts.last().cloned())
                            .or_else(|| return app_state.display_artifacts().pop());

                        match artifact {
                            Some(artifact) => {
                                app_state.panel.set_view(PanelView::Preview);
                                tx.send(Action::OpenPreview(artifact))?;
                            }
                            None => {
                                app_state.set_notice("There is no artifact to preview.");
                            }
                        }
                        continue;
                    }
                }

                if let Some(prompt) = app_state.submit(&input_str) {
                    tx.send(Action::BackendRequest(prompt))?;
                }
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )
    .unwrap();
    crossterm::execute!(io::stdout(), cursor::Show).unwrap();
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let mut app_state = AppState::new(
        &Config::get(ConfigKey::Theme),
        &Config::get(ConfigKey::ThemeFile),
    )?;

    let mut events = EventsService::new(rx);
    start_loop(&mut terminal, &mut app_state, tx, &mut events).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
