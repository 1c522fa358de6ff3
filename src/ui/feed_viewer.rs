use super::confirm::{self, Choice, Step};
use super::{Term, render_help_bar};
use crate::feed::{Feed, FeedBackend, FeedRow, Status};
use crate::refresh::RefreshTimer;
use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use miette::IntoDiagnostic;
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::time::Duration;

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Browse,
    ConfirmDelete(Choice),
}

pub fn run(
    terminal: &mut Term,
    feed: &mut Feed,
    backend: &mut impl FeedBackend,
    refresh_every: Duration,
) -> miette::Result<()> {
    let mut timer = RefreshTimer::start(refresh_every);
    let mut mode = Mode::Browse;
    let mut scroll_offset = 0;

    loop {
        if timer.due() {
            feed.refresh_labels(Utc::now());
        }

        terminal
            .draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Min(0),
                        Constraint::Length(1),
                        Constraint::Length(3),
                    ])
                    .split(area);

                let main_chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .split(chunks[0]);

                let visible_height = main_chunks[0].height.saturating_sub(2) as usize;
                let selected = feed.selected_index();
                if visible_height > 0 && selected >= scroll_offset + visible_height {
                    scroll_offset = selected + 1 - visible_height;
                }
                if selected < scroll_offset {
                    scroll_offset = selected;
                }

                render_list(f, main_chunks[0], feed, scroll_offset);
                render_post_pane(f, main_chunks[1], feed.selected());

                match mode {
                    Mode::ConfirmDelete(choice) => {
                        let line = confirm::prompt_line("Delete this post?", choice);
                        f.render_widget(Paragraph::new(line), chunks[1]);
                    }
                    Mode::Browse => render_status(f, chunks[1], feed.status()),
                }

                let help = match mode {
                    Mode::Browse => render_help_bar(&[
                        ("j/k", "navigate"),
                        ("l", "like"),
                        ("d", "delete"),
                        ("r", "reload"),
                        ("q/esc", "quit"),
                    ]),
                    Mode::ConfirmDelete(_) => render_help_bar(&[
                        ("y/n", "answer"),
                        ("h/l", "choose"),
                        ("enter", "confirm"),
                    ]),
                };
                f.render_widget(help, chunks[2]);
            })
            .into_diagnostic()?;

        if event::poll(Duration::from_millis(50)).into_diagnostic()?
            && let Event::Key(key) = event::read().into_diagnostic()?
        {
            match mode {
                Mode::Browse => match (key.code, key.modifiers) {
                    (KeyCode::Esc, _)
                    | (KeyCode::Char('q'), _)
                    | (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,
                    (KeyCode::Up, _) | (KeyCode::Char('k'), _) => feed.select_prev(),
                    (KeyCode::Down, _) | (KeyCode::Char('j'), _) => feed.select_next(),
                    (KeyCode::Home, _) | (KeyCode::Char('g'), _) => feed.select_first(),
                    (KeyCode::End, _) | (KeyCode::Char('G'), _) => feed.select_last(),
                    (KeyCode::Char('l'), _) | (KeyCode::Char(' '), _) => {
                        feed.toggle_like(backend)
                    }
                    (KeyCode::Char('d'), _) | (KeyCode::Delete, _) => {
                        if feed.selected().is_some() {
                            mode = Mode::ConfirmDelete(Choice::No);
                        }
                    }
                    (KeyCode::Char('r'), _) => {
                        feed.reload(backend, Utc::now());
                        if !matches!(feed.status(), Some(Status::Error(_))) {
                            feed.set_status(Status::Info("Reloaded".to_string()));
                        }
                    }
                    _ => {}
                },
                Mode::ConfirmDelete(choice) => {
                    match confirm::handle_key(key.code, key.modifiers, choice) {
                        Step::Highlight(choice) => mode = Mode::ConfirmDelete(choice),
                        Step::Answer(true) => {
                            mode = Mode::Browse;
                            feed.delete_selected(backend, Utc::now());
                        }
                        Step::Answer(false) => mode = Mode::Browse,
                        Step::Ignore => {}
                    }
                }
            }
        }
    }

    timer.stop();
    Ok(())
}

fn render_list(f: &mut ratatui::Frame, area: Rect, feed: &Feed, scroll_offset: usize) {
    let visible_height = area.height.saturating_sub(2) as usize;
    let selected = feed.selected_index();

    let items: Vec<ListItem> = feed
        .rows()
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_height)
        .map(|(i, row)| {
            let is_selected = i == selected;
            let heart = if row.post.liked { "♥" } else { "♡" };

            let line = Line::from(vec![
                Span::styled(
                    format!("{} {:>3} ", heart, row.post.likes_count),
                    Style::default().fg(Color::Red),
                ),
                Span::styled(
                    truncate(&row.post.title, 40),
                    if is_selected {
                        Style::default().fg(Color::White).bold()
                    } else {
                        Style::default()
                    },
                ),
                Span::raw(" "),
                Span::styled(&row.time_relative, Style::default().fg(Color::DarkGray)),
            ]);

            if is_selected {
                ListItem::new(line).style(Style::default().bg(Color::DarkGray))
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    let title = format!(" Feed ({} posts) ", feed.rows().len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(list, area);
}

fn render_post_pane(f: &mut ratatui::Frame, area: Rect, row: Option<&FeedRow>) {
    let content = match row {
        Some(row) => {
            let mut lines = vec![
                Line::from(Span::styled(&row.post.title, Style::default().bold())),
                Line::from(""),
            ];
            lines.extend(row.post.content.lines().map(Line::from));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Author: ", Style::default().fg(Color::DarkGray)),
                Span::raw(&row.post.author_id),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Posted: ", Style::default().fg(Color::DarkGray)),
                Span::raw(&row.time_relative),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Id: ", Style::default().fg(Color::DarkGray)),
                Span::styled(&row.post.id, Style::default().fg(Color::Yellow)),
            ]));
            lines
        }
        None => vec![Line::from("No posts yet.")],
    };

    let paragraph = Paragraph::new(content)
        .block(Block::default().borders(Borders::ALL).title(" Post "))
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

fn render_status(f: &mut ratatui::Frame, area: Rect, status: Option<&Status>) {
    let line = match status {
        Some(Status::Info(text)) => Line::from(Span::styled(
            format!(" {}", text),
            Style::default().fg(Color::Green),
        )),
        Some(Status::Error(text)) => Line::from(Span::styled(
            format!(" {}", text),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(""),
    };

    f.render_widget(Paragraph::new(line), area);
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}
