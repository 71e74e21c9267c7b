//! Git collector: every call shells out to the `git` CLI.

mod log;

pub use log::{CommitSummary, parse_oneline_log};

use crate::shared::command::{CommandError, CommandRunner, run_checked, run_raw};

pub const PROGRAM: &str = "git";

pub struct Git<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> Git<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Fails with git's own message (`not a git repository`) outside a work tree.
    pub fn ensure_repository(&self) -> Result<(), CommandError> {
        run_checked(self.runner, PROGRAM, &["rev-parse", "--git-dir"], None).map(|_| ())
    }

    /// Whether `reference` names a commit (SHA, tag, branch, `HEAD~2`, ...).
    pub fn commit_exists(&self, reference: &str) -> Result<bool, CommandError> {
        let object = format!("{reference}^{{commit}}");
        let output = run_raw(self.runner, PROGRAM, &["cat-file", "-e", &object], None)?;
        if !output.success() {
            tracing::debug!(reference, stderr = %output.stderr.trim(), "not a commit");
        }
        Ok(output.success())
    }

    /// `git show <reference>`: commit metadata followed by its patch.
    pub fn show(&self, reference: &str) -> Result<String, CommandError> {
        run_checked(
            self.runner,
            PROGRAM,
            &["--no-pager", "show", "--no-color", reference, "--"],
            None,
        )
    }

    /// `git diff <reference>`: working tree against `reference`.
    pub fn diff(&self, reference: &str) -> Result<String, CommandError> {
        run_checked(
            self.runner,
            PROGRAM,
            &["--no-pager", "diff", "--no-color", reference, "--"],
            None,
        )
    }

    /// The `limit` most recent commits reachable from HEAD.
    pub fn recent_commits(&self, limit: usize) -> Result<Vec<CommitSummary>, CommandError> {
        let count = format!("-{limit}");
        let stdout = run_checked(
            self.runner,
            PROGRAM,
            &[
                "--no-pager",
                "log",
                "--oneline",
                "--decorate",
                "--color=never",
                &count,
            ],
            None,
        )?;
        Ok(parse_oneline_log(&stdout))
    }
}
