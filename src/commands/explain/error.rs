use std::io;

use thiserror::Error;

use crate::infra::ai::AiError;
use crate::infra::github::GitHubError;
use crate::shared::command::CommandError;
use crate::shared::select::SelectError;

#[derive(Error, Debug)]
pub enum ExplainError {
    #[error("Could not find commit '{0}'. Please provide a valid commit SHA, tag, or branch.")]
    InvalidRef(String),

    #[error("Could not get a diff for commit '{0}'")]
    EmptyCommit(String),

    #[error("No differences found between the working tree and '{0}'")]
    NoDifferences(String),

    #[error("Could not get PR diff or PR has no changes")]
    EmptyPullRequest,

    #[error("No pull request for the current branch; pass a PR number or run in a terminal to pick one")]
    NoCurrentPullRequest,

    #[error("No {0} found")]
    NothingToSelect(&'static str),

    #[error("Failed to copy to clipboard")]
    Clipboard(#[source] anyhow::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error(transparent)]
    Ai(#[from] AiError),

    #[error(transparent)]
    Select(#[from] SelectError),
}

pub type Result<T> = std::result::Result<T, ExplainError>;
