use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::env_var::EnvVars;

const FILE_NAMES: [&str; 2] = ["config.yaml", "config.yml"];

/// Top-level configuration for explain.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// AI CLI used to generate explanations (default: gemini).
    #[serde(default)]
    pub provider: Provider,

    /// How long the explanation should be (default: balanced).
    #[serde(default)]
    pub verbosity: Verbosity,

    /// Number of recent commits offered by `--select` (default: 20).
    #[serde(default = "default_commit_limit")]
    pub commit_limit: usize,

    /// Offer to copy the raw markdown after printing to a terminal (default: true).
    #[serde(default = "default_true")]
    pub ask_copy: bool,

    /// Command lines used to invoke each provider.
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            verbosity: Verbosity::default(),
            commit_limit: default_commit_limit(),
            ask_copy: default_true(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl Config {
    /// Argv prefix for `provider`; the prompt is appended as the last argument.
    pub fn command_for(&self, provider: Provider) -> &[String] {
        match provider {
            Provider::Claude => &self.providers.claude.command,
            Provider::Gemini => &self.providers.gemini.command,
        }
    }

    /// Applies EXPLAIN_* overrides on top of the file contents.
    pub fn apply_env(&mut self, env: &EnvVars) -> Result<(), ConfigError> {
        if let Some(value) = &env.provider {
            self.provider =
                Provider::from_str(value, true).map_err(|_| ConfigError::InvalidEnv {
                    name: EnvVars::provider_name(),
                    value: value.clone(),
                })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), String> {
        if self.commit_limit == 0 {
            return Err("commit_limit must be at least 1".to_string());
        }
        for provider in Provider::ALL {
            if self.command_for(provider).is_empty() {
                return Err(format!("providers.{provider}.command must not be empty"));
            }
        }
        Ok(())
    }
}

/// Supported AI CLIs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Claude,
    #[default]
    Gemini,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Claude, Provider::Gemini];

    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Claude => "claude",
            Provider::Gemini => "gemini",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Provider::Claude => "Claude Code",
            Provider::Gemini => "Google Gemini CLI",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Explanation length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Concise,
    #[default]
    Balanced,
    Detailed,
}

impl Verbosity {
    pub const ALL: [Verbosity; 3] = [Verbosity::Concise, Verbosity::Balanced, Verbosity::Detailed];

    pub fn as_str(self) -> &'static str {
        match self {
            Verbosity::Concise => "concise",
            Verbosity::Balanced => "balanced",
            Verbosity::Detailed => "detailed",
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Per-provider command lines.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    #[serde(default = "default_claude")]
    pub claude: ProviderConfig,

    #[serde(default = "default_gemini")]
    pub gemini: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            claude: default_claude(),
            gemini: default_gemini(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Program and leading arguments, e.g. `["claude", "-p"]`.
    pub command: Vec<String>,
}

fn default_claude() -> ProviderConfig {
    ProviderConfig {
        command: vec!["claude".to_string(), "-p".to_string()],
    }
}

fn default_gemini() -> ProviderConfig {
    ProviderConfig {
        command: vec!["gemini".to_string(), "-p".to_string()],
    }
}

fn default_commit_limit() -> usize {
    20
}

fn default_true() -> bool {
    true
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Neither EXPLAIN_CONFIG_DIR, XDG_CONFIG_HOME nor HOME is set
    #[error("Cannot locate the config directory (set EXPLAIN_CONFIG_DIR or HOME)")]
    NoConfigDir,

    /// Failed to read config file (permission error, etc.)
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parse error or invalid value
    #[error("Invalid config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Failed to write config file {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid {name} value '{value}' (expected claude or gemini)")]
    InvalidEnv { name: &'static str, value: String },
}

/// Reads and writes `config.yaml` in one directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// EXPLAIN_CONFIG_DIR, else `<XDG config dir>/explain`.
    pub fn locate(env: &EnvVars) -> Result<Self, ConfigError> {
        if let Some(dir) = &env.config_dir {
            return Ok(Self::new(dir));
        }
        super::dirs::config_dir()
            .map(|dir| Self::new(dir.join("explain")))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// The file that is read and written: an existing `config.yaml` or
    /// `config.yml`, otherwise `config.yaml`.
    pub fn path(&self) -> PathBuf {
        FILE_NAMES
            .iter()
            .map(|name| self.dir.join(name))
            .find(|path| path.is_file())
            .unwrap_or_else(|| self.dir.join(FILE_NAMES[0]))
    }

    /// Returns `Config::default()` if no config file exists.
    pub fn load(&self) -> Result<Config, ConfigError> {
        for name in FILE_NAMES {
            let path = self.dir.join(name);
            match std::fs::read_to_string(&path) {
                Ok(content) => return parse_config(&content, &path),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(ConfigError::ReadError { path, source: e }),
            }
        }
        Ok(Config::default())
    }

    /// Writes `config`, creating the directory if needed. Returns the file written.
    pub fn save(&self, config: &Config) -> Result<PathBuf, ConfigError> {
        let path = self.path();
        let yaml = serde_yaml::to_string(config).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            message: e.to_string(),
        })?;

        std::fs::create_dir_all(&self.dir).map_err(|e| ConfigError::WriteError {
            path: path.clone(),
            source: e,
        })?;
        std::fs::write(&path, yaml).map_err(|e| ConfigError::WriteError {
            path: path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), "saved config");
        Ok(path)
    }
}

fn parse_config(content: &str, path: &Path) -> Result<Config, ConfigError> {
    let parse_error = |message: String| ConfigError::ParseError {
        path: path.to_path_buf(),
        message,
    };

    // An empty file deserializes to unit, not a mapping.
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
    config.validate().map_err(parse_error)?;
    Ok(config)
}
