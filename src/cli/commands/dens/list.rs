use clap::Parser;
use tracing::{debug, info};

use crate::{
    cli::{
        Command, CommandResult,
        formatting::align_table,
        types::{CommandMetadata, Parsed, parse_args},
    },
    context::Context,
};

const MIN_COLUMN_WIDTH: usize = 8;

#[derive(Parser, Debug)]
#[command(name = "list", about = "List current dens")]
struct ListArgs {
    /// Only display running dens
    #[arg(short, long)]
    running: bool,
}

/// Prints a `NAME STATUS IMAGE` summary of the labelled dens.
pub struct ListCommand;

impl Command for ListCommand {
    fn execute(&self, context: &mut Context, args: &[String]) -> CommandResult {
        let args = match parse_args::<ListArgs>("list", args)? {
            Parsed::Args(args) => args,
            Parsed::Help(help) => return Ok(help),
        };

        let dens = context.engine()?.list(args.running)?;
        info!("Found {} containers.", dens.len());

        let mut rows = vec![vec![
            "NAME".to_string(),
            "STATUS".to_string(),
            "IMAGE".to_string(),
        ]];
        for den in dens {
            debug!(name = %den.name, image = %den.image, "Listing den");
            rows.push(vec![den.name, den.state, den.image]);
        }

        Ok(align_table(&rows, MIN_COLUMN_WIDTH, " ").join("\n"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "list".to_string(),
            description: "List current dens".to_string(),
            examples: vec![],
        }
    }
}
