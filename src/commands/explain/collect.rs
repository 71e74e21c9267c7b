//! Turns a [`Target`] into the diff text handed to the AI CLI.

use std::io::BufRead;

use super::Target;
use super::error::{ExplainError, Result};
use crate::infra::git::Git;
use crate::infra::github::GitHub;
use crate::shared::command::CommandRunner;
use crate::shared::confirm::confirm;
use crate::shared::select::{Picker, SelectError};

const DEFAULT_COMMIT: &str = "HEAD";

/// What the collected diff describes; drives the prompt wording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    Commit(String),
    /// `None` is the pull request of the current branch.
    PullRequest(Option<u64>),
    Diff(String),
}

#[derive(Debug)]
pub struct Collected {
    pub subject: Subject,
    pub diff: String,
}

pub struct Collector<'a> {
    runner: &'a dyn CommandRunner,
    picker: &'a dyn Picker,
    commit_limit: usize,
    /// Where to read the answer when offering the picker for an unknown
    /// commit. `None` when stdin is not a terminal.
    answers: Option<&'a mut dyn BufRead>,
}

impl<'a> Collector<'a> {
    pub fn new(runner: &'a dyn CommandRunner, picker: &'a dyn Picker, commit_limit: usize) -> Self {
        Self {
            runner,
            picker,
            commit_limit,
            answers: None,
        }
    }

    pub fn with_answers(mut self, input: &'a mut dyn BufRead) -> Self {
        self.answers = Some(input);
        self
    }

    pub fn collect(&mut self, target: &Target, select: bool) -> Result<Collected> {
        match target {
            Target::Commit { reference } => self.commit(reference.as_deref(), select),
            Target::PullRequest { number } => self.pull_request(*number, select),
            Target::Diff { reference } => self.diff(reference),
        }
    }

    fn commit(&mut self, reference: Option<&str>, select: bool) -> Result<Collected> {
        let git = Git::new(self.runner);
        git.ensure_repository()?;

        let reference = match reference {
            Some(r) if git.commit_exists(r)? => r.to_string(),
            Some(r) if select => {
                eprintln!("Could not find commit '{r}'; select one from recent commits instead.");
                self.pick_commit(&git)?
            }
            Some(r) if self.offer_selection(r)? => self.pick_commit(&git)?,
            Some(r) => return Err(ExplainError::InvalidRef(r.to_string())),
            None if select => self.pick_commit(&git)?,
            None if git.commit_exists(DEFAULT_COMMIT)? => DEFAULT_COMMIT.to_string(),
            None => return Err(ExplainError::InvalidRef(DEFAULT_COMMIT.to_string())),
        };

        let diff = trimmed(git.show(&reference)?);
        if diff.is_empty() {
            return Err(ExplainError::EmptyCommit(reference));
        }
        Ok(Collected {
            subject: Subject::Commit(reference),
            diff,
        })
    }

    fn offer_selection(&mut self, reference: &str) -> Result<bool> {
        let Some(input) = self.answers.as_deref_mut() else {
            return Ok(false);
        };
        let question =
            format!("Could not find commit '{reference}'. Select from recent commits? [y/N] ");
        Ok(confirm(&question, input)?)
    }

    fn pick_commit(&self, git: &Git) -> Result<String> {
        let commits = git.recent_commits(self.commit_limit)?;
        if commits.is_empty() {
            return Err(ExplainError::NothingToSelect("commits"));
        }

        let labels: Vec<String> = commits.iter().map(|c| c.label()).collect();
        let index = self.picker.pick("Select a commit", &labels)?;
        Ok(commits[index].sha.clone())
    }

    fn pull_request(&self, number: Option<u64>, select: bool) -> Result<Collected> {
        let github = GitHub::new(self.runner);

        let number = match number {
            Some(n) => Some(n),
            None if select => Some(self.pick_pull_request(&github)?),
            None => match github.current_pr_number()? {
                Some(current) => {
                    tracing::debug!(current, "using pull request of current branch");
                    None
                }
                None => Some(self.pick_pull_request(&github).map_err(|e| match e {
                    ExplainError::Select(SelectError::NotInteractive) => {
                        ExplainError::NoCurrentPullRequest
                    }
                    other => other,
                })?),
            },
        };

        let diff = trimmed(github.pr_diff(number)?);
        if diff.is_empty() {
            return Err(ExplainError::EmptyPullRequest);
        }
        Ok(Collected {
            subject: Subject::PullRequest(number),
            diff,
        })
    }

    fn pick_pull_request(&self, github: &GitHub) -> Result<u64> {
        let prs = github.list_prs()?;
        if prs.is_empty() {
            return Err(ExplainError::NothingToSelect("pull requests"));
        }

        let labels: Vec<String> = prs.iter().map(|pr| pr.label()).collect();
        let index = self.picker.pick("Select a pull request", &labels)?;
        Ok(prs[index].number)
    }

    fn diff(&self, reference: &str) -> Result<Collected> {
        let git = Git::new(self.runner);
        git.ensure_repository()?;
        if !git.commit_exists(reference)? {
            return Err(ExplainError::InvalidRef(reference.to_string()));
        }

        let diff = trimmed(git.diff(reference)?);
        if diff.is_empty() {
            return Err(ExplainError::NoDifferences(reference.to_string()));
        }
        Ok(Collected {
            subject: Subject::Diff(reference.to_string()),
            diff,
        })
    }
}

fn trimmed(mut diff: String) -> String {
    diff.truncate(diff.trim_end().len());
    diff
}
