use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

/// Captured result of a finished subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("'{0}' CLI not found in PATH")]
    MissingBinary(String),

    #[error("Failed to run {program}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {}: {}", exit_label(.code), .stderr.trim())]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// Seam for every external process the tool starts (`git`, `gh`, the AI CLI).
pub trait CommandRunner {
    /// Runs `program args...`, optionally feeding `stdin`, and waits for it to exit.
    fn run(&self, program: &str, args: &[&str], stdin: Option<&str>) -> io::Result<CommandOutput>;

    /// Whether `program` can be started at all.
    fn is_available(&self, program: &str) -> bool {
        is_command_available(program)
    }
}

/// Runs real processes, optionally from a fixed working directory.
#[derive(Debug, Default)]
pub struct SystemRunner {
    cwd: Option<PathBuf>,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(dir.into()),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], stdin: Option<&str>) -> io::Result<CommandOutput> {
        tracing::debug!(program, ?args, piped_bytes = stdin.map(str::len), "spawning");

        let mut command = Command::new(program);
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }

        let mut child = command
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // The child may fill its stdout pipe before it reads stdin.
        let writer = stdin.zip(child.stdin.take()).map(|(input, mut handle)| {
            let input = input.to_owned();
            std::thread::spawn(move || handle.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output()?;
        if let Some(Ok(Err(e))) = writer.map(std::thread::JoinHandle::join)
            && e.kind() != io::ErrorKind::BrokenPipe
        {
            return Err(e);
        }
        tracing::debug!(program, code = ?output.status.code(), "exited");

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Runs a command and returns its stdout, turning spawn failures and
/// non-zero exits into a [`CommandError`].
pub fn run_checked(
    runner: &dyn CommandRunner,
    program: &str,
    args: &[&str],
    stdin: Option<&str>,
) -> Result<String, CommandError> {
    let output = run_raw(runner, program, args, stdin)?;
    if !output.success() {
        return Err(CommandError::Failed {
            command: display_command(program, args),
            code: output.code,
            stderr: output.stderr,
        });
    }
    Ok(output.stdout)
}

/// Runs a command and returns its output whatever the exit status.
/// Only a failure to start the process is an error.
pub fn run_raw(
    runner: &dyn CommandRunner,
    program: &str,
    args: &[&str],
    stdin: Option<&str>,
) -> Result<CommandOutput, CommandError> {
    runner.run(program, args, stdin).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            CommandError::MissingBinary(program.to_string())
        } else {
            CommandError::Io {
                program: program.to_string(),
                source: e,
            }
        }
    })
}

/// Shell-quoted command line for messages. Long arguments (prompts) are elided.
pub fn display_command(program: &str, args: &[&str]) -> String {
    const MAX_ARG_LEN: usize = 40;

    let shortened: Vec<String> = args
        .iter()
        .map(|arg| {
            if arg.chars().count() > MAX_ARG_LEN {
                let head: String = arg.chars().take(MAX_ARG_LEN).collect();
                format!("{head}...")
            } else {
                (*arg).to_string()
            }
        })
        .collect();

    std::iter::once(program)
        .chain(shortened.iter().map(String::as_str))
        .map(|part| shlex::try_quote(part).map_or_else(|_| part.to_string(), |q| q.into_owned()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check if a command is available in PATH.
pub fn is_command_available(cmd: &str) -> bool {
    find_command_path(cmd).is_some()
}

/// Find the full path of a command in PATH.
pub fn find_command_path(cmd: &str) -> Option<PathBuf> {
    let candidate = Path::new(cmd);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(cmd))
        .find(|path| is_executable(path))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.is_file()
        && path
            .metadata()
            .map(|m| m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
