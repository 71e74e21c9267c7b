//! Test doubles for the process, picker and clipboard seams.

mod git_repo;

pub use git_repo::TestRepo;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

use crate::infra::clipboard::Clipboard;
use crate::shared::command::{CommandOutput, CommandRunner};
use crate::shared::select::{Picker, SelectError};

/// A single recorded subprocess call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<String>,
}

impl Invocation {
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

enum Reply {
    Output(CommandOutput),
    NotFound,
}

/// [`CommandRunner`] answering from canned replies and recording every call.
///
/// A reply registered for `"git show"` matches `git show` and any call whose
/// command line continues with a space (`git show HEAD`). The first matching
/// rule wins; unmatched calls exit with status 127.
#[derive(Default)]
pub struct FakeRunner {
    rules: Vec<(String, Reply)>,
    calls: RefCell<Vec<Invocation>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(mut self, command: &str, stdout: &str) -> Self {
        self.rules.push((
            command.to_string(),
            Reply::Output(CommandOutput {
                code: Some(0),
                stdout: stdout.to_string(),
                stderr: String::new(),
            }),
        ));
        self
    }

    pub fn fail(mut self, command: &str, code: i32, stderr: &str) -> Self {
        self.rules.push((
            command.to_string(),
            Reply::Output(CommandOutput {
                code: Some(code),
                stdout: String::new(),
                stderr: stderr.to_string(),
            }),
        ));
        self
    }

    /// Makes `program` unavailable: not on PATH and failing to spawn.
    pub fn missing(mut self, program: &str) -> Self {
        self.rules.push((program.to_string(), Reply::NotFound));
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(Invocation::command_line)
            .collect()
    }

    /// Calls whose program is `program`.
    pub fn calls_to(&self, program: &str) -> Vec<Invocation> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.program == program)
            .cloned()
            .collect()
    }

    fn find(&self, command_line: &str) -> Option<&Reply> {
        self.rules
            .iter()
            .find(|(key, _)| {
                command_line == key
                    || command_line
                        .strip_prefix(key.as_str())
                        .is_some_and(|rest| rest.starts_with(' '))
            })
            .map(|(_, reply)| reply)
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[&str], stdin: Option<&str>) -> io::Result<CommandOutput> {
        let invocation = Invocation {
            program: program.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            stdin: stdin.map(str::to_string),
        };
        let command_line = invocation.command_line();
        self.calls.borrow_mut().push(invocation);

        match self.find(&command_line) {
            Some(Reply::Output(output)) => Ok(output.clone()),
            Some(Reply::NotFound) => Err(io::Error::from(io::ErrorKind::NotFound)),
            None => Ok(CommandOutput {
                code: Some(127),
                stdout: String::new(),
                stderr: format!("no fake reply for `{command_line}`"),
            }),
        }
    }

    fn is_available(&self, program: &str) -> bool {
        !self
            .rules
            .iter()
            .any(|(key, reply)| key == program && matches!(reply, Reply::NotFound))
    }
}

/// [`Picker`] returning scripted choices in order, then cancelling.
pub struct FakePicker {
    choices: RefCell<VecDeque<usize>>,
    interactive: bool,
    shown: RefCell<Vec<(String, Vec<String>)>>,
}

impl FakePicker {
    pub fn choosing(choices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            choices: RefCell::new(choices.into_iter().collect()),
            interactive: true,
            shown: RefCell::new(Vec::new()),
        }
    }

    /// Behaves like a picker without a terminal attached.
    pub fn unavailable() -> Self {
        Self {
            interactive: false,
            ..Self::choosing([])
        }
    }

    /// Every `(title, items)` pair the picker was asked to show.
    pub fn shown(&self) -> Vec<(String, Vec<String>)> {
        self.shown.borrow().clone()
    }
}

impl Picker for FakePicker {
    fn pick(&self, title: &str, items: &[String]) -> Result<usize, SelectError> {
        if !self.interactive {
            return Err(SelectError::NotInteractive);
        }
        self.shown
            .borrow_mut()
            .push((title.to_string(), items.to_vec()));
        self.choices
            .borrow_mut()
            .pop_front()
            .ok_or(SelectError::Cancelled)
    }
}

/// [`Clipboard`] keeping everything copied in memory.
#[derive(Default)]
pub struct RecordingClipboard {
    copied: RefCell<Vec<String>>,
}

impl RecordingClipboard {
    pub fn copied(&self) -> Vec<String> {
        self.copied.borrow().clone()
    }
}

impl Clipboard for RecordingClipboard {
    fn copy(&self, text: &str) -> anyhow::Result<&'static str> {
        self.copied.borrow_mut().push(text.to_string());
        Ok("memory")
    }
}
