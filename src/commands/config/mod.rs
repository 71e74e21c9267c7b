//! `--config`, `--show-config`, `--set-provider` and `--set-verbosity`.

use std::io::Write;

use anyhow::Context;
use indoc::writedoc;

use crate::shared::config::{Config, ConfigStore, Provider, Verbosity};
use crate::shared::select::{Picker, SelectError};

/// Prints the effective configuration and where it is stored.
pub fn show(config: &Config, store: &ConfigStore, out: &mut dyn Write) -> anyhow::Result<()> {
    writedoc!(
        out,
        "
        Config file: {path}
        Provider:    {provider}
        Verbosity:   {verbosity}
        Commit list: {limit} commits
        Ask to copy: {ask_copy}
        Commands:
        ",
        path = store.path().display(),
        provider = config.provider,
        verbosity = config.verbosity,
        limit = config.commit_limit,
        ask_copy = on_off(config.ask_copy),
    )?;
    for provider in Provider::ALL {
        let marker = if provider == config.provider { "*" } else { " " };
        let command = config.command_for(provider);
        let joined = shlex::try_join(command.iter().map(String::as_str))
            .unwrap_or_else(|_| command.join(" "));
        writeln!(out, "  {marker} {provider:<7} {joined}")?;
    }
    Ok(())
}

pub fn set_provider(
    store: &ConfigStore,
    provider: Provider,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let mut config = store.load()?;
    config.provider = provider;
    let path = store.save(&config)?;
    writeln!(
        out,
        "Provider set to {provider} ({}) in {}",
        provider.description(),
        path.display()
    )?;
    Ok(())
}

pub fn set_verbosity(
    store: &ConfigStore,
    verbosity: Verbosity,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let mut config = store.load()?;
    config.verbosity = verbosity;
    let path = store.save(&config)?;
    writeln!(out, "Verbosity set to {verbosity} in {}", path.display())?;
    Ok(())
}

enum MenuEntry {
    Provider,
    Verbosity,
    AskCopy,
    Save,
}

const MENU: [MenuEntry; 4] = [
    MenuEntry::Provider,
    MenuEntry::Verbosity,
    MenuEntry::AskCopy,
    MenuEntry::Save,
];

impl MenuEntry {
    fn label(&self, config: &Config) -> String {
        match self {
            MenuEntry::Provider => format!("Provider: {}", config.provider),
            MenuEntry::Verbosity => format!("Verbosity: {}", config.verbosity),
            MenuEntry::AskCopy => {
                format!("Ask to copy after printing: {}", on_off(config.ask_copy))
            }
            MenuEntry::Save => "Save and exit".to_string(),
        }
    }
}

/// Menu loop editing the stored config. Nothing is written unless
/// "Save and exit" is chosen.
pub fn interactive(
    store: &ConfigStore,
    picker: &dyn Picker,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let mut config = store.load()?;

    loop {
        let labels: Vec<String> = MENU.iter().map(|entry| entry.label(&config)).collect();
        let choice = match picker.pick("Configure explain", &labels) {
            Ok(index) => index,
            Err(SelectError::Cancelled) => {
                writeln!(out, "No changes saved.")?;
                return Ok(());
            }
            Err(e) => return Err(e).context("Interactive configuration failed"),
        };

        match MENU[choice] {
            MenuEntry::Provider => {
                let items: Vec<String> = Provider::ALL
                    .iter()
                    .map(|p| format!("{p} ({})", p.description()))
                    .collect();
                if let Some(index) = pick_optional(picker, "AI provider", &items)? {
                    config.provider = Provider::ALL[index];
                }
            }
            MenuEntry::Verbosity => {
                let items: Vec<String> = Verbosity::ALL.iter().map(|v| v.to_string()).collect();
                if let Some(index) = pick_optional(picker, "Explanation length", &items)? {
                    config.verbosity = Verbosity::ALL[index];
                }
            }
            MenuEntry::AskCopy => config.ask_copy = !config.ask_copy,
            MenuEntry::Save => {
                let path = store.save(&config)?;
                writeln!(out, "Saved configuration to {}", path.display())?;
                return Ok(());
            }
        }
    }
}

/// A cancelled submenu returns to the main menu.
fn pick_optional(
    picker: &dyn Picker,
    title: &str,
    items: &[String],
) -> anyhow::Result<Option<usize>> {
    match picker.pick(title, items) {
        Ok(index) => Ok(Some(index)),
        Err(SelectError::Cancelled) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::FakePicker;
    use tempfile::TempDir;

    fn store() -> (TempDir, ConfigStore) {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("explain"));
        (dir, store)
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn show_marks_current_provider() {
        let (_dir, store) = store();
        let config = Config {
            provider: Provider::Claude,
            ..Config::default()
        };

        let text = output(|out| show(&config, &store, out));

        assert!(text.contains("Provider:    claude"), "{text}");
        assert!(text.contains("Verbosity:   balanced"), "{text}");
        assert!(text.contains("  * claude  claude -p"), "{text}");
        assert!(text.contains("    gemini  gemini -p"), "{text}");
    }

    #[test]
    fn set_provider_persists_choice() {
        let (_dir, store) = store();

        let text = output(|out| set_provider(&store, Provider::Claude, out));

        assert!(text.starts_with("Provider set to claude (Claude Code)"));
        assert_eq!(store.load().unwrap().provider, Provider::Claude);
    }

    #[test]
    fn set_verbosity_keeps_other_settings() {
        let (_dir, store) = store();
        store
            .save(&Config {
                provider: Provider::Claude,
                ask_copy: false,
                ..Config::default()
            })
            .unwrap();

        output(|out| set_verbosity(&store, Verbosity::Detailed, out));

        let config = store.load().unwrap();
        assert_eq!(config.verbosity, Verbosity::Detailed);
        assert_eq!(config.provider, Provider::Claude);
        assert!(!config.ask_copy);
    }

    #[test]
    fn menu_edits_and_saves() {
        let (_dir, store) = store();
        // provider -> claude, verbosity -> concise, toggle ask_copy, save
        let picker = FakePicker::choosing([0, 0, 1, 0, 2, 3]);

        let text = output(|out| interactive(&store, &picker, out));

        assert!(text.starts_with("Saved configuration to"));
        let config = store.load().unwrap();
        assert_eq!(config.provider, Provider::Claude);
        assert_eq!(config.verbosity, Verbosity::Concise);
        assert!(!config.ask_copy);

        let shown = picker.shown();
        assert_eq!(shown[0].1[0], "Provider: gemini");
        assert_eq!(shown[2].1[0], "Provider: claude");
    }

    #[test]
    fn cancelling_menu_writes_nothing() {
        let (_dir, store) = store();
        let picker = FakePicker::choosing([2]);

        let text = output(|out| interactive(&store, &picker, out));

        assert_eq!(text, "No changes saved.\n");
        assert!(!store.path().exists());
    }

    #[test]
    fn cancelled_submenu_returns_to_menu() {
        let (_dir, store) = store();
        let picker = FakePicker::choosing([0]);

        let text = output(|out| interactive(&store, &picker, out));

        // Submenu and then main menu both run out of choices.
        assert_eq!(text, "No changes saved.\n");
        assert_eq!(picker.shown().len(), 3);
        assert_eq!(picker.shown()[1].0, "AI provider");
    }

    #[test]
    fn menu_without_terminal_fails() {
        let (_dir, store) = store();
        let picker = FakePicker::unavailable();

        let mut out = Vec::new();
        assert!(interactive(&store, &picker, &mut out).is_err());
    }
}
