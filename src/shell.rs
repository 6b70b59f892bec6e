//! Running external command lines.
//!
//! Commands can run with the caller's streams (optionally silenced),
//! interactively with stdin attached, or with their output captured. The
//! [`Shell`] trait is the seam the rest of the crate talks to, so command
//! handlers can be exercised without spawning processes.

use std::{
    env, fmt,
    path::Path,
    process::{Command, Stdio},
};

use bitflags::bitflags;
use thiserror::Error;
use tracing::{debug, instrument};

bitflags! {
    /// Output streams to silence while a command runs.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Quiet: u8 {
        /// Discard standard output.
        const STDOUT = 0b01;
        /// Hold back standard error (kept for diagnostics on failure).
        const STDERR = 0b10;
        /// Both streams.
        const ALL = Self::STDOUT.bits() | Self::STDERR.bits();
    }
}

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Starts a command line for `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Executable name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments, without the program.
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How [`Shell::run`] treats the child process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Attach stdin, stdout and stderr to the child. Overrides `quiet`.
    pub interactive: bool,
    /// Streams to silence.
    pub quiet: Quiet,
    /// Return a non-zero exit code instead of failing.
    pub suppress: bool,
}

impl RunOptions {
    /// Silences both output streams.
    pub fn quiet() -> Self {
        Self {
            quiet: Quiet::ALL,
            ..Self::default()
        }
    }

    /// Attaches the terminal and hands back the child's exit code.
    pub fn interactive() -> Self {
        Self {
            interactive: true,
            suppress: true,
            ..Self::default()
        }
    }
}

/// Errors raised while running external commands.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// The process could not be started at all
    #[error("command: {command} could not be started: {details}")]
    Spawn {
        /// Command line that was attempted
        command: String,
        /// Underlying error
        details: String,
    },

    /// The process exited with a non-zero status
    #[error("command: {command} failed with {code}")]
    Failed {
        /// Command line that failed
        command: String,
        /// Exit code of the process
        code: i32,
        /// Captured standard error, when it was not shown to the user
        stderr: String,
    },

    /// The process was killed by a signal
    #[error("command: {command} was terminated by a signal")]
    Terminated {
        /// Command line that was terminated
        command: String,
    },
}

impl ShellError {
    /// Captured standard error of a failed command, if any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            ShellError::Failed { stderr, .. } if !stderr.is_empty() => Some(stderr),
            _ => None,
        }
    }
}

/// Executes command lines.
pub trait Shell {
    /// Runs a command to completion and returns its exit code.
    ///
    /// # Errors
    /// Returns `ShellError::Failed` on a non-zero exit unless
    /// `options.suppress` is set, and `Spawn`/`Terminated` when the process
    /// cannot start or is killed.
    fn run(&self, command: &CommandLine, options: RunOptions) -> Result<i32, ShellError>;

    /// Runs a command and returns its standard output split into lines.
    ///
    /// # Errors
    /// Returns `ShellError` when the command cannot run or exits non-zero.
    fn output(&self, command: &CommandLine) -> Result<Vec<String>, ShellError>;

    /// Whether `program` can be found on the `PATH`.
    fn is_installed(&self, program: &str) -> bool;
}

/// [`Shell`] backed by real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemShell;

impl Shell for SystemShell {
    #[instrument(skip(self), fields(command = %command))]
    fn run(&self, command: &CommandLine, options: RunOptions) -> Result<i32, ShellError> {
        let quiet = if options.interactive {
            Quiet::empty()
        } else {
            options.quiet
        };

        let mut process = command.to_command();
        process
            .stdin(if options.interactive {
                Stdio::inherit()
            } else {
                Stdio::null()
            })
            .stdout(if quiet.contains(Quiet::STDOUT) {
                Stdio::null()
            } else {
                Stdio::inherit()
            })
            .stderr(if quiet.contains(Quiet::STDERR) {
                Stdio::piped()
            } else {
                Stdio::inherit()
            });

        debug!("Running command");
        let output = process
            .spawn()
            .and_then(|child| child.wait_with_output())
            .map_err(|e| spawn_error(command, e))?;

        let code = output.status.code().ok_or_else(|| ShellError::Terminated {
            command: command.to_string(),
        })?;
        debug!(code, "Command finished");

        if code == 0 || options.suppress {
            return Ok(code);
        }

        Err(ShellError::Failed {
            command: command.to_string(),
            code,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    #[instrument(skip(self), fields(command = %command))]
    fn output(&self, command: &CommandLine) -> Result<Vec<String>, ShellError> {
        let output = command
            .to_command()
            .stdin(Stdio::null())
            .output()
            .map_err(|e| spawn_error(command, e))?;

        let code = output.status.code().ok_or_else(|| ShellError::Terminated {
            command: command.to_string(),
        })?;

        if code != 0 {
            return Err(ShellError::Failed {
                command: command.to_string(),
                code,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .trim()
            .lines()
            .map(str::to_string)
            .collect())
    }

    fn is_installed(&self, program: &str) -> bool {
        if program.contains(std::path::MAIN_SEPARATOR) {
            return Path::new(program).is_file();
        }

        env::var_os("PATH")
            .map(|paths| env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
            .unwrap_or(false)
    }
}

fn spawn_error(command: &CommandLine, error: std::io::Error) -> ShellError {
    ShellError::Spawn {
        command: command.to_string(),
        details: error.to_string(),
    }
}
