//! Configuration management commands.
//!
//! Commands act on a single file: the project's `.den.ini`, or the user
//! level file with `-u`.

mod get;
mod rm;
mod set;

use std::path::PathBuf;

use clap::Parser;

pub use get::GetCommand;
pub use rm::RmCommand;
pub use set::SetCommand;

use crate::{
    cli::{
        CliError, Command, CommandRegistry, CommandResult,
        dispatch::resolve_command,
        formatting::format_command_list,
        types::{CommandMetadata, Parsed, parse_args},
    },
    context::Context,
};

/// Output format of a single configuration value.
pub(crate) fn format_entry(section: &str, key: &str, value: &str) -> String {
    format!("{section}.{key} = {value}")
}

/// File selected by the enclosing group, defaulting to the local one.
pub(crate) fn target_file(context: &mut Context) -> Result<PathBuf, CliError> {
    match context.target_config() {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(context.select_target_config(false)?.to_path_buf()),
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "config",
    about = "Modify and view configuration values",
    disable_help_subcommand = true
)]
struct ConfigArgs {
    /// Use the user level configuration
    #[arg(short, long)]
    user: bool,

    /// Subcommand and its arguments
    #[arg(trailing_var_arg = true, value_name = "COMMAND")]
    command: Vec<String>,
}

/// `den config` group, dispatching to `get`, `set` and `rm`.
///
/// Subcommands resolve by exact name or unique prefix; aliases do not apply
/// inside the group.
pub struct ConfigCommand {
    registry: CommandRegistry,
}

impl ConfigCommand {
    /// Creates the group with its subcommands registered.
    pub fn new() -> Self {
        let mut registry = CommandRegistry::new();
        registry.register_command(Box::new(GetCommand));
        registry.register_command(Box::new(SetCommand));
        registry.register_command(Box::new(RmCommand));

        Self { registry }
    }
}

impl Default for ConfigCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for ConfigCommand {
    fn execute(&self, context: &mut Context, args: &[String]) -> CommandResult {
        let args = match parse_args::<ConfigArgs>("config", args)? {
            Parsed::Args(args) => args,
            Parsed::Help(help) => return Ok(help),
        };

        context.select_target_config(args.user)?;

        if args.command.is_empty() {
            return Ok(format_command_list(
                "den config [-u] <COMMAND> [ARGS]...",
                &self.registry.metadata(),
                context.reporter().color(),
            ));
        }

        let resolution = resolve_command(&self.registry, &args.command, None)?;
        resolution.command.execute(context, &resolution.args)
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "config".to_string(),
            description: "Modify and view configuration values".to_string(),
            examples: vec![
                "den config set image.default ubuntu:24.04".to_string(),
                "den config -u get alias".to_string(),
            ],
        }
    }
}
