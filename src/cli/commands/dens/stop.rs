use clap::Parser;

use crate::{
    cli::{
        Command, CommandResult,
        types::{CommandMetadata, Parsed, parse_args},
    },
    context::Context,
};

#[derive(Parser, Debug)]
#[command(name = "stop", about = "Stop a running den")]
struct StopArgs {
    /// Delete the den after stopping it
    #[arg(short, long)]
    delete: bool,

    /// Name of the den
    name: Option<String>,
}

/// Stops a den, optionally deleting it afterwards.
pub struct StopCommand;

impl Command for StopCommand {
    fn execute(&self, context: &mut Context, args: &[String]) -> CommandResult {
        let args = match parse_args::<StopArgs>("stop", args)? {
            Parsed::Args(args) => args,
            Parsed::Help(help) => return Ok(help),
        };

        let name = context.den_name(args.name)?;
        let engine = context.engine()?;
        context
            .reporter()
            .report_success(&format!("Spinning down `{name}` environment"), || {
                engine.stop(&name)
            })?;

        if args.delete {
            super::delete_dens(context, &[name])?;
        }

        Ok(String::new())
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "stop".to_string(),
            description: "Stop a running den".to_string(),
            examples: vec!["den stop --delete".to_string()],
        }
    }
}
