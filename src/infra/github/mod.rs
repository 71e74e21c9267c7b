//! GitHub collector built on the `gh` CLI.
//!
//! Authentication and repository detection are left to `gh` itself.

mod pr;

pub use pr::PullRequestSummary;

use thiserror::Error;

use crate::shared::command::{CommandError, CommandRunner, run_checked, run_raw};

pub const PROGRAM: &str = "gh";

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Failed to parse `gh` output: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GitHubError>;

pub struct GitHub<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> GitHub<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Number of the pull request for the current branch, if there is one.
    ///
    /// `gh pr view` exits non-zero when the branch has no pull request; that
    /// case is `Ok(None)` rather than an error.
    pub fn current_pr_number(&self) -> Result<Option<u64>> {
        let output = run_raw(self.runner, PROGRAM, &["pr", "view", "--json", "number"], None)?;
        if !output.success() {
            tracing::debug!(stderr = %output.stderr.trim(), "no pull request for current branch");
            return Ok(None);
        }

        #[derive(serde::Deserialize)]
        struct Number {
            number: u64,
        }
        let parsed: Number = serde_json::from_str(&output.stdout)?;
        Ok(Some(parsed.number))
    }

    /// Pull requests in any state, newest first as returned by `gh`.
    pub fn list_prs(&self) -> Result<Vec<PullRequestSummary>> {
        let stdout = run_checked(
            self.runner,
            PROGRAM,
            &[
                "pr",
                "list",
                "--state",
                "all",
                "--json",
                "number,title,author,state",
            ],
            None,
        )?;
        if stdout.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&stdout)?)
    }

    /// `gh pr diff [number]`; without a number `gh` uses the current branch's PR.
    pub fn pr_diff(&self, number: Option<u64>) -> Result<String> {
        let number = number.map(|n| n.to_string());
        let mut args = vec!["pr", "diff", "--color", "never"];
        if let Some(number) = &number {
            args.push(number.as_str());
        }
        Ok(run_checked(self.runner, PROGRAM, &args, None)?)
    }
}
