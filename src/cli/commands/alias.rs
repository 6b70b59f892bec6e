//! Command aliases stored in the `[alias]` config section.

use clap::Parser;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        alias::ALIAS_SECTION,
        types::{CommandMetadata, Parsed, parse_args},
    },
    config::{ConfigError, ConfigFile},
    context::Context,
};

#[derive(Parser, Debug)]
#[command(name = "alias", about = "Create or modify command aliases")]
struct AliasArgs {
    /// Use the user level configuration
    #[arg(short, long)]
    user: bool,

    /// Alias to act on
    alias: String,

    /// Command the alias expands to
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

/// Shows or defines an alias.
///
/// With a command, `den alias crst create --start` makes `den crst` behave
/// like `den create --start`. Without one, the current expansion is shown.
pub struct AliasCommand;

impl Command for AliasCommand {
    fn execute(&self, context: &mut Context, args: &[String]) -> CommandResult {
        let args = match parse_args::<AliasArgs>("alias", args)? {
            Parsed::Args(args) => args,
            Parsed::Help(help) => return Ok(help),
        };

        let mut file = ConfigFile::open(context.select_target_config(args.user)?)?;

        if !args.command.is_empty() {
            file.set_value(ALIAS_SECTION, &args.alias, &args.command.join(" "));
            file.save()?;
            return Ok(String::new());
        }

        match file.get(ALIAS_SECTION, &args.alias) {
            Ok(expansion) => Ok(format!(
                "`den {}` is aliased to `den {expansion}`",
                args.alias
            )),
            Err(ConfigError::MissingSection(_) | ConfigError::MissingOption { .. }) => {
                Err(CliError::NoAlias(args.alias))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "alias".to_string(),
            description: "Create or modify command aliases".to_string(),
            examples: vec!["den alias crst create --start".to_string()],
        }
    }
}
