use clap::{ArgAction, Parser};
use tracing::debug;

use crate::context::Context;

use super::{
    CommandRegistry, CommandResult, commands, dispatch::resolve_command,
    formatting::format_command_list,
};

/// Global command line options.
///
/// Everything after the first positional argument belongs to the command
/// and is parsed by it.
#[derive(Parser, Debug, Default)]
#[command(
    name = "den",
    version,
    about = "Easy development environments aka development dens"
)]
pub struct GlobalArgs {
    /// Increase output verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Enable debug mode
    #[arg(short, long)]
    pub debug: bool,

    /// Command to run and its arguments
    #[arg(trailing_var_arg = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// High-level service for resolving and executing CLI commands.
///
/// Holds the top level registry. Commands resolve by exact name, unique
/// prefix, or a configured alias.
pub struct CliService {
    registry: CommandRegistry,
}

impl CliService {
    /// Creates a new CLI service with all available commands registered.
    pub fn new() -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        CliService { registry }
    }

    /// Resolves `args[0]` and runs the command with the remaining arguments.
    ///
    /// An empty argument list returns the command listing.
    ///
    /// # Errors
    /// Returns `CliError` if resolution fails, the configuration cannot be
    /// loaded, or the command itself fails.
    pub fn execute(&self, context: &mut Context, args: &[String]) -> CommandResult {
        if args.is_empty() {
            return Ok(self.help(context.reporter().color()));
        }

        let resolution = resolve_command(&self.registry, args, Some(context.config()?))?;
        debug!(command = %resolution.name, args = ?resolution.args, "Resolved command");

        resolution.command.execute(context, &resolution.args)
    }

    /// Names of all top level commands, sorted.
    pub fn list_commands(&self) -> Vec<String> {
        self.registry.list_commands()
    }

    /// Listing of the available commands, styled when `color` is set.
    pub fn help(&self, color: bool) -> String {
        format_command_list(
            "den [-v]... [-d] <COMMAND> [ARGS]...",
            &self.registry.metadata(),
            color,
        )
    }
}

impl Default for CliService {
    fn default() -> Self {
        Self::new()
    }
}
