use std::io::{IsTerminal, Write};

use anyhow::{Context, Result};
use base64::Engine;

/// Destination for `--clipboard` output.
pub trait Clipboard {
    /// Copies `text` and returns the mechanism used.
    fn copy(&self, text: &str) -> Result<&'static str>;
}

/// Desktop clipboard, falling back to an OSC 52 escape sequence for
/// terminals without one (SSH sessions, headless Linux).
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<&'static str> {
        match copy_desktop(text) {
            Ok(method) => return Ok(method),
            Err(e) => tracing::warn!("desktop clipboard unavailable, trying OSC 52: {e:#}"),
        }

        copy_osc52(text)?;
        Ok("osc52")
    }
}

fn copy_desktop(text: &str) -> Result<&'static str> {
    use copypasta::{ClipboardContext, ClipboardProvider};
    let mut ctx =
        ClipboardContext::new().map_err(|e| anyhow::anyhow!("init clipboard context: {e}"))?;
    ctx.set_contents(text.to_string())
        .map_err(|e| anyhow::anyhow!("set clipboard contents: {e}"))?;
    Ok("desktop")
}

fn copy_osc52(text: &str) -> Result<()> {
    // Written to stderr: stdout must stay empty when copying.
    let mut err = std::io::stderr().lock();
    if !err.is_terminal() {
        anyhow::bail!("no clipboard available (no desktop clipboard and stderr is not a terminal)");
    }
    err.write_all(osc52_sequence(text).as_bytes())
        .context("write OSC52 sequence")?;
    err.flush().ok();
    Ok(())
}

/// OSC 52 clipboard: ESC ] 52 ; c ; <base64> BEL
fn osc52_sequence(text: &str) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{b64}\x07")
}
