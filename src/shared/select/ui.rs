use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, List, ListItem},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::SelectList;

/// Width taken by borders and the highlight symbol.
const CHROME_WIDTH: usize = 4;

pub fn render(frame: &mut Frame, title: &str, list: &mut SelectList) {
    let area = frame.area();
    let label_width = (area.width as usize).saturating_sub(CHROME_WIDTH);

    let items: Vec<ListItem> = list
        .items
        .iter()
        .map(|item| ListItem::new(fit_to_width(item, label_width)))
        .collect();

    let block = Block::bordered()
        .title(format!(" {title} "))
        .title_bottom(Line::from(" ↑/↓ move · enter select · esc cancel ").right_aligned());

    let widget = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(widget, area, &mut list.list_state);
}

/// Cuts `s` to `max_width` display columns, ending with "…" when shortened.
fn fit_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width - 1 {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
