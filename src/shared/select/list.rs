use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::widgets::ListState;

/// What a key press did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Chosen(usize),
    Cancelled,
}

/// Selection state for [`super::TerminalPicker`]. Navigation wraps around.
pub struct SelectList {
    pub items: Vec<String>,
    pub list_state: ListState,
}

impl SelectList {
    pub fn new(items: Vec<String>) -> Self {
        let mut list_state = ListState::default();
        if !items.is_empty() {
            list_state.select(Some(0));
        }
        Self { items, list_state }
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if i + 1 < self.items.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let previous = match self.list_state.selected() {
            Some(0) | None => self.items.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(previous));
    }

    /// Jumps to the 1-based `number`; out-of-range numbers are ignored.
    pub fn select_by_number(&mut self, number: usize) {
        if number >= 1 && number <= self.items.len() {
            self.list_state.select(Some(number - 1));
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> KeyOutcome {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                KeyOutcome::Cancelled
            }
            KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::Cancelled,
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                self.select_next();
                KeyOutcome::Continue
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
                self.select_previous();
                KeyOutcome::Continue
            }
            KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                let num = c.to_digit(10).unwrap_or(0) as usize;
                self.select_by_number(num);
                KeyOutcome::Continue
            }
            KeyCode::Enter => match self.selected() {
                Some(index) => KeyOutcome::Chosen(index),
                None => KeyOutcome::Continue,
            },
            _ => KeyOutcome::Continue,
        }
    }
}
