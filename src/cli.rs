use std::io::{self, Write};

use clap::{ArgGroup, CommandFactory, Parser};
use clap_complete::Shell;

use crate::commands::{config, explain};
use crate::infra::clipboard::SystemClipboard;
use crate::shared::command::SystemRunner;
use crate::shared::config::{ConfigStore, Provider, Verbosity};
use crate::shared::env_var::EnvVars;
use crate::shared::select::TerminalPicker;

const BIN_NAME: &str = "explain";

#[derive(Parser, Debug)]
#[command(
    name = BIN_NAME,
    version,
    about = "Explain a commit, pull request or diff with an AI CLI",
    arg_required_else_help = true
)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .args([
            "commit",
            "pull_request",
            "diff",
            "config",
            "show_config",
            "set_provider",
            "set_verbosity",
            "completions",
        ])
))]
#[command(group(ArgGroup::new("explain_mode").args(["commit", "pull_request", "diff"])))]
#[command(group(ArgGroup::new("selectable").args(["commit", "pull_request"])))]
pub struct Cli {
    /// Explain a commit (defaults to HEAD)
    #[arg(short = 'C', long, value_name = "REF")]
    pub commit: Option<Option<String>>,

    /// Explain a pull request (defaults to the current branch's PR)
    #[arg(short = 'P', long, value_name = "NUMBER")]
    pub pull_request: Option<Option<u64>>,

    /// Explain the working tree changes against REF
    #[arg(short = 'D', long, value_name = "REF")]
    pub diff: Option<String>,

    /// Interactively pick the commit or pull request
    #[arg(short, long, requires = "selectable")]
    pub select: bool,

    /// Copy the explanation to the clipboard instead of printing it
    #[arg(short, long, requires = "explain_mode")]
    pub clipboard: bool,

    /// Use this AI CLI for this run only
    #[arg(long, value_enum, requires = "explain_mode")]
    pub provider: Option<Provider>,

    /// Open the interactive configuration menu
    #[arg(long)]
    pub config: bool,

    /// Print the current configuration
    #[arg(long)]
    pub show_config: bool,

    /// Set the AI CLI used for explanations
    #[arg(long, value_enum, value_name = "PROVIDER")]
    pub set_provider: Option<Provider>,

    /// Set how detailed explanations are
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub set_verbosity: Option<Verbosity>,

    /// Generate a shell completion script
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Explain(explain::ExplainRequest),
    Configure,
    ShowConfig,
    SetProvider(Provider),
    SetVerbosity(Verbosity),
    Completions(Shell),
}

impl Cli {
    pub fn action(&self) -> Option<Action> {
        let target = if let Some(reference) = &self.commit {
            explain::Target::Commit {
                reference: reference.clone(),
            }
        } else if let Some(number) = self.pull_request {
            explain::Target::PullRequest { number }
        } else if let Some(reference) = &self.diff {
            explain::Target::Diff {
                reference: reference.clone(),
            }
        } else if self.config {
            return Some(Action::Configure);
        } else if self.show_config {
            return Some(Action::ShowConfig);
        } else if let Some(provider) = self.set_provider {
            return Some(Action::SetProvider(provider));
        } else if let Some(verbosity) = self.set_verbosity {
            return Some(Action::SetVerbosity(verbosity));
        } else {
            return self.completions.map(Action::Completions);
        };

        Some(Action::Explain(explain::ExplainRequest {
            target,
            select: self.select,
            clipboard: self.clipboard,
            provider: self.provider,
        }))
    }

    pub fn run(self) -> anyhow::Result<()> {
        let Some(action) = self.action() else {
            anyhow::bail!("No action given");
        };
        tracing::debug!(?action, "dispatching");

        let stdout = io::stdout();
        let mut out = stdout.lock();
        let env = EnvVars::load();

        match action {
            Action::Explain(request) => {
                let mut config = ConfigStore::locate(&env)?.load()?;
                config.apply_env(&env)?;

                let runner = SystemRunner::new();
                let ctx = explain::ExplainContext {
                    runner: &runner,
                    picker: &TerminalPicker,
                    clipboard: &SystemClipboard,
                    terminal: explain::TerminalState::detect(),
                };
                let mut input = io::stdin().lock();
                explain::run(&request, &config, &ctx, &mut out, &mut input)?;
            }
            Action::Configure => {
                config::interactive(&ConfigStore::locate(&env)?, &TerminalPicker, &mut out)?
            }
            Action::ShowConfig => {
                let store = ConfigStore::locate(&env)?;
                config::show(&store.load()?, &store, &mut out)?
            }
            Action::SetProvider(provider) => {
                config::set_provider(&ConfigStore::locate(&env)?, provider, &mut out)?
            }
            Action::SetVerbosity(verbosity) => {
                config::set_verbosity(&ConfigStore::locate(&env)?, verbosity, &mut out)?
            }
            Action::Completions(shell) => {
                clap_complete::generate(shell, &mut Cli::command(), BIN_NAME, &mut out)
            }
        }

        out.flush()?;
        Ok(())
    }
}
