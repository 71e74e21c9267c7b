use std::io::{self, BufRead, Write};

/// Asks `question` on stderr and reads one line from `input`.
/// Only `y` or `yes` (any case) count as consent; EOF is a no.
pub fn confirm(question: &str, input: &mut dyn BufRead) -> io::Result<bool> {
    let mut err = io::stderr().lock();
    write!(err, "{question}")?;
    err.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
