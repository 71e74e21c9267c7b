//! Explains a commit, a pull request or a working-tree diff by piping it to
//! an AI CLI.

mod collect;
mod error;
mod output;
mod prompt;

use std::io::{self, BufRead, IsTerminal, Write};

use collect::Collector;
use error::Result;
use output::OutputOptions;

use crate::infra::ai::{Backend, CliBackend};
use crate::infra::clipboard::Clipboard;
use crate::infra::{git, github};
use crate::shared::command::{CommandError, CommandRunner};
use crate::shared::config::{Config, Provider};
use crate::shared::select::Picker;
use crate::shared::spinner;

/// What to explain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A commit; `None` means HEAD.
    Commit { reference: Option<String> },
    /// A pull request; `None` means the PR of the current branch.
    PullRequest { number: Option<u64> },
    /// The working tree against `reference`.
    Diff { reference: String },
}

impl Target {
    /// CLI the collector shells out to.
    fn program(&self) -> &'static str {
        match self {
            Target::Commit { .. } | Target::Diff { .. } => git::PROGRAM,
            Target::PullRequest { .. } => github::PROGRAM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainRequest {
    pub target: Target,
    pub select: bool,
    pub clipboard: bool,
    /// Overrides the configured provider for this run.
    pub provider: Option<Provider>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalState {
    pub stdin: bool,
    pub stdout: bool,
    pub stderr: bool,
}

impl TerminalState {
    pub fn detect() -> Self {
        Self {
            stdin: io::stdin().is_terminal(),
            stdout: io::stdout().is_terminal(),
            stderr: io::stderr().is_terminal(),
        }
    }
}

/// External collaborators of an explain run.
pub struct ExplainContext<'a> {
    pub runner: &'a dyn CommandRunner,
    pub picker: &'a dyn Picker,
    pub clipboard: &'a dyn Clipboard,
    pub terminal: TerminalState,
}

pub fn run(
    request: &ExplainRequest,
    config: &Config,
    ctx: &ExplainContext,
    out: &mut dyn Write,
    input: &mut dyn BufRead,
) -> Result<()> {
    let provider = request.provider.unwrap_or(config.provider);
    let backend = CliBackend::from_config(config, provider, ctx.runner)?;

    check_dependencies(ctx.runner, &[request.target.program(), backend.program()])?;

    let mut collector = Collector::new(ctx.runner, ctx.picker, config.commit_limit);
    if ctx.terminal.stdin && ctx.terminal.stderr {
        collector = collector.with_answers(&mut *input);
    }
    let collected = collector.collect(&request.target, request.select)?;
    tracing::debug!(subject = ?collected.subject, bytes = collected.diff.len(), "collected diff");

    let prompt = prompt::build(&collected.subject, config.verbosity);

    let spinner = spinner::start(
        format!(
            "Getting explanation from {}...",
            backend.provider().description()
        ),
        ctx.terminal.stderr,
    );
    let explanation = backend.explain(&prompt, &collected.diff);
    spinner.finish_and_clear();
    let explanation = explanation?;

    let opts = OutputOptions {
        clipboard: request.clipboard,
        ask_copy: config.ask_copy,
        stdout_is_terminal: ctx.terminal.stdout,
        stdin_is_terminal: ctx.terminal.stdin,
    };
    output::deliver(&explanation, &opts, out, input, ctx.clipboard)
}

fn check_dependencies(runner: &dyn CommandRunner, programs: &[&str]) -> Result<()> {
    match programs.iter().find(|program| !runner.is_available(program)) {
        Some(missing) => Err(CommandError::MissingBinary((*missing).to_string()).into()),
        None => Ok(()),
    }
}
