use termimad::MadSkin;
use termimad::crossterm::style::{Attribute, Color};

/// Render markdown text for terminal display using termimad
pub fn render_markdown(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let mut skin = MadSkin::default_dark();

    for header in &mut skin.headers {
        header.compound_style.remove_attr(Attribute::Underlined);
        header.compound_style.set_fg(Color::White);
        header.left_margin = 2;
    }

    skin.inline_code
        .set_fgbg(Color::AnsiValue(203), Color::AnsiValue(236));
    skin.code_block
        .set_fgbg(Color::AnsiValue(251), Color::AnsiValue(237));

    skin.paragraph.left_margin = 2;
    skin.code_block.left_margin = 4;

    skin.term_text(text).to_string()
}
