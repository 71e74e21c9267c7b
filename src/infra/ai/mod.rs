//! AI CLI invocation.
//!
//! The diff is piped to the assistant's stdin and the prompt is passed as the
//! last argument, e.g. `git show HEAD | gemini -p "<prompt>"`.

use thiserror::Error;

use crate::shared::command::{CommandError, CommandRunner, run_checked};
use crate::shared::config::{Config, Provider};

#[derive(Error, Debug)]
pub enum AiError {
    #[error("No command configured for {0}")]
    NoCommand(Provider),

    #[error("Failed to run {provider} command")]
    Command {
        provider: Provider,
        #[source]
        source: CommandError,
    },

    #[error("{0} returned an empty response")]
    EmptyResponse(Provider),
}

pub type Result<T> = std::result::Result<T, AiError>;

/// Backend trait for turning a prompt plus diff into an explanation.
pub trait Backend {
    fn provider(&self) -> Provider;

    /// Program that must be installed for this backend to work.
    fn program(&self) -> &str;

    fn explain(&self, prompt: &str, diff: &str) -> Result<String>;
}

/// Backend running a configured command line such as `claude -p`.
pub struct CliBackend<'a> {
    provider: Provider,
    command: Vec<String>,
    runner: &'a dyn CommandRunner,
}

impl<'a> CliBackend<'a> {
    pub fn from_config(
        config: &Config,
        provider: Provider,
        runner: &'a dyn CommandRunner,
    ) -> Result<Self> {
        let command = config.command_for(provider).to_vec();
        if command.is_empty() {
            return Err(AiError::NoCommand(provider));
        }
        Ok(Self {
            provider,
            command,
            runner,
        })
    }
}

impl Backend for CliBackend<'_> {
    fn provider(&self) -> Provider {
        self.provider
    }

    fn program(&self) -> &str {
        &self.command[0]
    }

    fn explain(&self, prompt: &str, diff: &str) -> Result<String> {
        let mut args: Vec<&str> = self.command[1..].iter().map(String::as_str).collect();
        args.push(prompt);

        let stdout = run_checked(self.runner, self.program(), &args, Some(diff)).map_err(
            |source| AiError::Command {
                provider: self.provider,
                source,
            },
        )?;

        let text = stdout.trim();
        if text.is_empty() {
            return Err(AiError::EmptyResponse(self.provider));
        }
        Ok(text.to_string())
    }
}
