//! Interactive single-choice list shown inline in the terminal.
//!
//! Used to pick a commit or a pull request when no target was given on the
//! command line, and by the `--config` menu.

mod list;
mod ui;

pub use list::{KeyOutcome, SelectList};

use std::io::{self, IsTerminal};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::{Terminal, TerminalOptions, Viewport};
use thiserror::Error;

/// Rows shown at once; longer lists scroll.
const MAX_VISIBLE_ROWS: usize = 12;

#[derive(Error, Debug)]
pub enum SelectError {
    #[error("Interactive selection needs a terminal")]
    NotInteractive,

    #[error("Selection cancelled")]
    Cancelled,

    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SelectError>;

/// Lets the user choose one entry out of `items`.
pub trait Picker {
    /// Returns the index of the chosen item.
    fn pick(&self, title: &str, items: &[String]) -> Result<usize>;
}

/// Picker drawing on stderr so stdout stays reserved for results.
pub struct TerminalPicker;

impl Picker for TerminalPicker {
    fn pick(&self, title: &str, items: &[String]) -> Result<usize> {
        require_terminal(io::stdin().is_terminal(), io::stderr().is_terminal())?;

        let mut list = SelectList::new(items.to_vec());
        let height = items.len().min(MAX_VISIBLE_ROWS) as u16 + 2;

        enable_raw_mode()?;
        let result = run_inline(title, &mut list, height);
        disable_raw_mode()?;

        match result? {
            Some(index) => Ok(index),
            None => Err(SelectError::Cancelled),
        }
    }
}

/// Keys are read from stdin and the list is drawn on stderr; both must be ttys.
fn require_terminal(stdin: bool, stderr: bool) -> Result<()> {
    if stdin && stderr {
        Ok(())
    } else {
        Err(SelectError::NotInteractive)
    }
}

fn run_inline(title: &str, list: &mut SelectList, height: u16) -> Result<Option<usize>> {
    let backend = CrosstermBackend::new(io::stderr());
    let mut terminal = Terminal::with_options(
        backend,
        TerminalOptions {
            viewport: Viewport::Inline(height),
        },
    )?;

    let outcome = loop {
        terminal.draw(|frame| ui::render(frame, title, list))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match list.handle_key(key.code, key.modifiers) {
                KeyOutcome::Continue => {}
                KeyOutcome::Chosen(index) => break Some(index),
                KeyOutcome::Cancelled => break None,
            }
        }
    };

    terminal.clear()?;
    Ok(outcome)
}
