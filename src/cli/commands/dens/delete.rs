use clap::Parser;
use tracing::info;

use crate::{
    cli::{
        Command, CommandResult,
        types::{CommandMetadata, Parsed, parse_args},
    },
    context::Context,
};

#[derive(Parser, Debug)]
#[command(name = "delete", about = "Delete existing dens")]
struct DeleteArgs {
    /// Delete all dens
    #[arg(short, long)]
    all: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,

    /// Names of the dens
    names: Vec<String>,
}

/// Deletes the named dens, the current one, or every den with `--all`.
pub struct DeleteCommand;

impl Command for DeleteCommand {
    fn execute(&self, context: &mut Context, args: &[String]) -> CommandResult {
        let args = match parse_args::<DeleteArgs>("delete", args)? {
            Parsed::Args(args) => args,
            Parsed::Help(help) => return Ok(help),
        };

        let names = if args.all {
            let names: Vec<String> = context
                .engine()?
                .list(false)?
                .into_iter()
                .map(|den| den.name)
                .collect();

            if names.is_empty() {
                info!("No dens to delete");
                return Ok(String::new());
            }

            context.confirm(
                &format!("This will delete the containers: {}", names.join(", ")),
                false,
                args.yes,
            )?;
            names
        } else if args.names.is_empty() {
            vec![context.den_name(None)?]
        } else {
            args.names
        };

        super::delete_dens(context, &names)?;

        Ok(String::new())
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "delete".to_string(),
            description: "Delete existing dens".to_string(),
            examples: vec!["den delete --all".to_string()],
        }
    }
}
