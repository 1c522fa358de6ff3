use super::Term;
use crossterm::{cursor, execute, terminal::*};
use miette::{IntoDiagnostic, Result};
use ratatui::prelude::*;
use std::io;

pub fn setup_terminal() -> Result<Term> {
    enable_raw_mode().into_diagnostic()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide).into_diagnostic()?;
    Terminal::new(CrosstermBackend::new(stdout)).into_diagnostic()
}

pub fn restore_terminal(mut terminal: Term) -> Result<()> {
    disable_raw_mode().into_diagnostic()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).into_diagnostic()?;
    terminal.show_cursor().into_diagnostic()?;
    Ok(())
}
