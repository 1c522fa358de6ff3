use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use miette::IntoDiagnostic;
use ratatui::prelude::*;
use ratatui::widgets::*;
use ratatui::{TerminalOptions, Viewport};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Choice {
    Yes,
    No,
}

#[derive(Debug, PartialEq)]
pub enum Step {
    Highlight(Choice),
    Answer(bool),
    Ignore,
}

/// Maps one key press onto the prompt. Shared with the feed viewer's
/// inline delete prompt.
pub fn handle_key(code: KeyCode, modifiers: KeyModifiers, current: Choice) -> Step {
    match (code, modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Step::Answer(false),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => Step::Highlight(Choice::Yes),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => Step::Highlight(Choice::No),
        (KeyCode::Char('y'), _) | (KeyCode::Char('Y'), _) => Step::Answer(true),
        (KeyCode::Char('n'), _) | (KeyCode::Char('N'), _) | (KeyCode::Esc, _) => {
            Step::Answer(false)
        }
        (KeyCode::Enter, _) => Step::Answer(current == Choice::Yes),
        _ => Step::Ignore,
    }
}

pub fn prompt_line(message: &str, current: Choice) -> Line<'static> {
    let yes_style = if current == Choice::Yes {
        Style::default().fg(Color::Black).bg(Color::Green)
    } else {
        Style::default().fg(Color::Green)
    };

    let no_style = if current == Choice::No {
        Style::default().fg(Color::Black).bg(Color::Red)
    } else {
        Style::default().fg(Color::Red)
    };

    Line::from(vec![
        Span::styled(format!("{} ", message), Style::default().fg(Color::Yellow)),
        Span::styled(" y ", yes_style),
        Span::raw(" "),
        Span::styled(" n ", no_style),
        Span::styled("  (y/n)", Style::default().fg(Color::DarkGray)),
    ])
}

/// One-line inline y/n prompt, defaulting to "no".
pub fn run(message: &str) -> miette::Result<bool> {
    let mut stdout = io::stdout();
    let backend = CrosstermBackend::new(&mut stdout);
    let mut terminal = Terminal::with_options(
        backend,
        TerminalOptions {
            viewport: Viewport::Inline(1),
        },
    )
    .into_diagnostic()?;

    enable_raw_mode().into_diagnostic()?;

    let mut current = Choice::No;

    let answer = loop {
        let drawn = terminal.draw(|f| {
            f.render_widget(Paragraph::new(prompt_line(message, current)), f.area());
        });
        if let Err(e) = drawn {
            disable_raw_mode().ok();
            return Err(e).into_diagnostic();
        }

        let key = match event::read() {
            Ok(Event::Key(key)) => key,
            Ok(_) => continue,
            Err(e) => {
                disable_raw_mode().ok();
                return Err(e).into_diagnostic();
            }
        };

        match handle_key(key.code, key.modifiers, current) {
            Step::Highlight(choice) => current = choice,
            Step::Answer(answer) => break answer,
            Step::Ignore => {}
        }
    };

    disable_raw_mode().ok();
    println!();
    Ok(answer)
}
