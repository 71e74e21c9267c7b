mod cli;
mod commands;
mod infra;
mod shared;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use cli::Cli;

fn main() -> ExitCode {
    shared::logging::init();

    match Cli::parse().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Nothing useful is left to do if stderr itself is gone.
            let _ = report(&e, &mut io::stderr().lock());
            ExitCode::FAILURE
        }
    }
}

/// Writes `err` and its causes, one per line.
fn report(err: &anyhow::Error, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Error: {err}")?;
    for cause in err.chain().skip(1) {
        writeln!(out, "  Caused by: {cause}")?;
    }
    Ok(())
}
