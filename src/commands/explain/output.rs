use std::io::{BufRead, Write};

use super::error::{ExplainError, Result};
use crate::infra::clipboard::Clipboard;
use crate::shared::confirm::confirm;
use crate::shared::markdown::render_markdown;

const COPY_QUESTION: &str = "Copy raw markdown to clipboard? [y/N] ";

#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// `--clipboard`: copy instead of printing.
    pub clipboard: bool,
    pub ask_copy: bool,
    pub stdout_is_terminal: bool,
    pub stdin_is_terminal: bool,
}

/// Hands the explanation to the user. With `clipboard` set nothing is
/// written to `out`; status messages go to stderr.
pub fn deliver(
    text: &str,
    opts: &OutputOptions,
    out: &mut dyn Write,
    input: &mut dyn BufRead,
    clipboard: &dyn Clipboard,
) -> Result<()> {
    if opts.clipboard {
        copy(text, clipboard)?;
        return Ok(());
    }

    if opts.stdout_is_terminal {
        write!(out, "{}", render_markdown(text))?;
    } else {
        writeln!(out, "{text}")?;
    }
    out.flush()?;

    let can_ask = opts.ask_copy && opts.stdout_is_terminal && opts.stdin_is_terminal;
    if can_ask && confirm(COPY_QUESTION, input)? {
        copy(text, clipboard)?;
    }
    Ok(())
}

fn copy(text: &str, clipboard: &dyn Clipboard) -> Result<()> {
    let method = clipboard.copy(text).map_err(ExplainError::Clipboard)?;
    tracing::debug!(method, "copied explanation");
    eprintln!("✓ Copied explanation to clipboard");
    Ok(())
}
