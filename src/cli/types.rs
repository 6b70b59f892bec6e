use std::io;

use clap::{Parser, error::ErrorKind};
use thiserror::Error;

use crate::{config::ConfigError, context::Context, engine::EngineError};

/// Errors that can occur during CLI command resolution and execution.
///
/// Each variant carries the message shown to the user at the command line
/// boundary; every one of them ends the process with a non-zero status.
#[derive(Error, Debug)]
pub enum CliError {
    /// No command, unique prefix or alias matched the requested name.
    #[error("No such command `{0}`.")]
    CommandNotFound(String),

    /// A prefix matched more than one command.
    ///
    /// Never resolved silently, not even when an alias of the same name
    /// exists.
    #[error("`{name}` is ambiguous and matched multiple commands: {}", .candidates.join(", "))]
    AmbiguousCommand {
        /// The prefix the user typed
        name: String,
        /// Every command starting with the prefix, in registry order
        candidates: Vec<String>,
    },

    /// Alias expansion revisited an alias or nested too deeply.
    #[error("Alias expansion does not terminate: {}", .chain.join(" -> "))]
    AliasCycle {
        /// Aliases in expansion order, ending with the repeated one
        chain: Vec<String>,
    },

    /// Argument parsing failed; carries the rendered usage error.
    #[error("{0}")]
    Usage(String),

    /// Arguments parsed but are not usable.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The alias being inspected is not defined.
    #[error("No `{0}` alias defined.")]
    NoAlias(String),

    /// The user declined a confirmation prompt.
    #[error("Aborted!")]
    Aborted,

    /// An interactive child process exited unsuccessfully.
    #[error("den exited with status {0}")]
    ChildExit(i32),

    /// An error occurred in the configuration system.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An error occurred talking to the container engine.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::ChildExit(code) => u8::try_from(*code).ok().filter(|code| *code != 0).unwrap_or(1),
            _ => 1,
        }
    }
}

/// Type alias for command execution results.
///
/// Commands return the text to print on success (possibly empty).
pub type CommandResult = Result<String, CliError>;

/// Descriptive data about a command used for help output.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// The command name (e.g., "create", "config").
    pub name: String,

    /// Brief description of what this command does.
    pub description: String,

    /// Example usage strings to show in help text.
    pub examples: Vec<String>,
}

/// Trait defining the interface for all CLI commands.
///
/// Commands receive the invocation [`Context`] and the arguments that
/// followed the command name.
pub trait Command {
    /// Executes the command with the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns `CliError` for any execution failures, including:
    /// - Invalid argument values
    /// - Configuration system errors
    /// - Container engine failures
    fn execute(&self, context: &mut Context, args: &[String]) -> CommandResult;

    /// Returns the metadata for this command.
    fn metadata(&self) -> CommandMetadata;
}

/// Outcome of parsing a command's arguments.
pub(crate) enum Parsed<T> {
    /// Arguments parsed successfully.
    Args(T),
    /// `--help` was requested; holds the rendered help.
    Help(String),
}

/// Parses `args` for the command `name` with its clap definition.
///
/// # Errors
/// Returns `CliError::Usage` with clap's rendered message on invalid input.
pub(crate) fn parse_args<T: Parser>(name: &str, args: &[String]) -> Result<Parsed<T>, CliError> {
    let argv = std::iter::once(name.to_string()).chain(args.iter().cloned());

    match T::try_parse_from(argv) {
        Ok(parsed) => Ok(Parsed::Args(parsed)),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Ok(Parsed::Help(e.render().to_string()))
        }
        Err(e) => Err(CliError::Usage(e.render().to_string().trim_end().to_string())),
    }
}
