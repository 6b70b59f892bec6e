use clap::Parser;

use crate::{
    cli::{
        Command, CommandResult,
        types::{CommandMetadata, Parsed, parse_args},
    },
    context::Context,
};

#[derive(Parser, Debug)]
#[command(name = "start", about = "Start an existing den")]
struct StartArgs {
    /// Name of the den
    name: Option<String>,
}

/// Starts a den attached to the current terminal.
pub struct StartCommand;

impl Command for StartCommand {
    fn execute(&self, context: &mut Context, args: &[String]) -> CommandResult {
        let args = match parse_args::<StartArgs>("start", args)? {
            Parsed::Args(args) => args,
            Parsed::Help(help) => return Ok(help),
        };

        let name = context.den_name(args.name)?;
        super::start_den(context, &name)?;

        Ok(String::new())
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "start".to_string(),
            description: "Start an existing den".to_string(),
            examples: vec![],
        }
    }
}
